//! Event-stream and mapping file I/O.
//!
//! Stream lines are `"<eventId>,<time>"` with a three-decimal time; the
//! mapping file holds one serialized event per line, line index = id.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use epmine_core::types::stream::{DUMMY_ID, TIMEOUT_GAP};
use epmine_core::{Episode, Event, EventStream, Fact};

pub fn write_stream(path: &Path, stream: &EventStream) -> io::Result<()> {
    fs::write(path, stream.stream_text())?;
    debug!(lines = stream.lines().len(), path = %path.display(), "stream written");
    Ok(())
}

pub fn write_mapping(path: &Path, stream: &EventStream) -> io::Result<()> {
    fs::write(path, stream.mapping_text())?;
    debug!(entries = stream.mapping().len(), path = %path.display(), "mapping written");
    Ok(())
}

/// Read the `(id, time)` pairs of a persisted stream, time in thousandths.
pub fn read_stream_lines(path: &Path) -> io::Result<Vec<(u32, u64)>> {
    let text = fs::read_to_string(path)?;
    let mut lines = Vec::new();
    for (number, line) in text.lines().enumerate() {
        lines.push(parse_stream_line(line).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("malformed stream line {}: {line:?}", number + 1),
            )
        })?);
    }
    Ok(lines)
}

/// Read a mapping file back into its ordered event list.
pub fn read_mapping(path: &Path) -> io::Result<Vec<Event>> {
    let text = fs::read_to_string(path)?;
    let mut events = Vec::new();
    for (number, line) in text.lines().enumerate() {
        events.push(Event::decode(line).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("malformed mapping line {}: {line:?}", number + 1),
            )
        })?);
    }
    Ok(events)
}

/// Re-parse a persisted stream into one episode per recorded method.
///
/// A time gap of at least the timeout threshold closes the current method.
/// Within a method, ids are deduplicated in first-occurrence order and
/// consecutive distinct ids are chained with precedence relations; the
/// auxiliary id 0 carries no event identity and is skipped. Every produced
/// method episode has frequency 1. Empty groups are not emitted.
pub fn read_stream_as_methods(path: &Path) -> io::Result<Vec<Episode>> {
    let lines = read_stream_lines(path)?;

    let mut methods = Vec::new();
    let mut ids: Vec<u32> = Vec::new();
    let mut previous_time = 0u64;

    for (id, time) in lines {
        if time.saturating_sub(previous_time) >= TIMEOUT_GAP && !ids.is_empty() {
            methods.push(method_episode(&ids)?);
            ids.clear();
        }
        if id != DUMMY_ID && !ids.contains(&id) {
            ids.push(id);
        }
        previous_time = time;
    }
    if !ids.is_empty() {
        methods.push(method_episode(&ids)?);
    }

    Ok(methods)
}

fn method_episode(ids: &[u32]) -> io::Result<Episode> {
    let mut episode = Episode::new();
    for &id in ids {
        episode.add_fact(Fact::event(id));
    }
    for pair in ids.windows(2) {
        episode.add_fact(Fact::relation(pair[0], pair[1]));
    }
    episode
        .set_frequency(1)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(episode)
}

fn parse_stream_line(line: &str) -> Option<(u32, u64)> {
    let (id, time) = line.split_once(',')?;
    let (seconds, millis) = time.split_once('.')?;
    if millis.len() != 3 {
        return None;
    }
    let id = id.parse::<u32>().ok()?;
    let seconds = seconds.parse::<u64>().ok()?;
    let millis = millis.parse::<u64>().ok()?;
    Some((id, seconds * 1000 + millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_lines_parse_back_exactly() {
        assert_eq!(parse_stream_line("2,0.500"), Some((2, 500)));
        assert_eq!(parse_stream_line("13,4.021"), Some((13, 4021)));
        assert_eq!(parse_stream_line("2,0.5"), None);
        assert_eq!(parse_stream_line("2;0.500"), None);
        assert_eq!(parse_stream_line("x,0.500"), None);
    }
}
