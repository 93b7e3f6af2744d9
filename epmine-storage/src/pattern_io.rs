//! Learned-pattern export and import.
//!
//! One line per episode: canonical facts joined by `,`, a tab, then the
//! frequency. `# level <k>` headers keep the size-class structure
//! round-trippable.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use epmine_core::Episode;

pub fn patterns_text(levels: &BTreeMap<usize, Vec<Episode>>) -> String {
    let mut text = String::new();
    for (level, episodes) in levels {
        text.push_str(&format!("# level {level}\n"));
        for episode in episodes {
            text.push_str(&format!("{}\t{}\n", episode.rendering(), episode.frequency()));
        }
    }
    text
}

/// Machine-readable export of the level map for downstream tooling.
pub fn patterns_json(levels: &BTreeMap<usize, Vec<Episode>>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(levels)
}

pub fn write_patterns_json(path: &Path, levels: &BTreeMap<usize, Vec<Episode>>) -> io::Result<()> {
    let json = patterns_json(levels)?;
    fs::write(path, json)
}

pub fn write_patterns(path: &Path, levels: &BTreeMap<usize, Vec<Episode>>) -> io::Result<()> {
    fs::write(path, patterns_text(levels))?;
    debug!(
        levels = levels.len(),
        episodes = levels.values().map(Vec::len).sum::<usize>(),
        path = %path.display(),
        "patterns written"
    );
    Ok(())
}

pub fn read_patterns(path: &Path) -> io::Result<BTreeMap<usize, Vec<Episode>>> {
    let text = fs::read_to_string(path)?;
    parse_patterns(&text)
}

pub fn parse_patterns(text: &str) -> io::Result<BTreeMap<usize, Vec<Episode>>> {
    let mut levels: BTreeMap<usize, Vec<Episode>> = BTreeMap::new();
    let mut current_level: Option<usize> = None;

    for (number, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix("# level ") {
            let level = header
                .trim()
                .parse::<usize>()
                .map_err(|_| malformed(number, line))?;
            current_level = Some(level);
            continue;
        }

        let level = current_level.ok_or_else(|| malformed(number, line))?;
        let (facts, frequency) = line.split_once('\t').ok_or_else(|| malformed(number, line))?;
        let raws: Vec<&str> = facts.split(',').collect();
        let mut episode =
            Episode::from_raw_facts(&raws).map_err(|e| invalid(number, line, e))?;
        let frequency = frequency.parse::<u32>().map_err(|_| malformed(number, line))?;
        episode.set_frequency(frequency).map_err(|e| invalid(number, line, e))?;

        if episode.num_events() != level {
            return Err(malformed(number, line));
        }
        levels.entry(level).or_default().push(episode);
    }

    Ok(levels)
}

fn malformed(number: usize, line: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("malformed pattern line {}: {line:?}", number + 1),
    )
}

fn invalid(number: usize, line: &str, source: epmine_core::InvalidInputError) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid pattern line {}: {line:?}: {source}", number + 1),
    )
}
