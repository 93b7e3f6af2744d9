//! Provenance indexing for learned episodes.

pub mod enclosing;

pub use enclosing::EnclosingMethods;
