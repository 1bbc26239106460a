//! Find a byte pattern.

use anyhow::{bail, Result};
use hexed_buffer::{Buffer, Direction, FileStore};
use std::path::Path;

use super::{format_offset, open_buffer, resolve_literal};
use crate::config::Config;

/// Search options for the find command.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Encoding override for the pattern.
    pub encoding: Option<String>,
    /// Start offset (default: 0 forward, end of file backward).
    pub from: Option<usize>,
    /// Search toward the start of the file.
    pub backward: bool,
    /// Report every match instead of the first.
    pub all: bool,
}

/// Run the find command.
///
/// Fails when nothing matches, so scripts can test the exit status.
pub fn run(path: &Path, config: &Config, pattern: &str, options: &FindOptions) -> Result<()> {
    let buffer = open_buffer(path, config)?;
    let needle = resolve_literal(pattern, options.encoding.as_deref(), config)?;
    tracing::debug!("Searching for {} in {}", hex::encode(&needle), path.display());

    let hits = matches(&buffer, &needle, options);
    if hits.is_empty() {
        bail!("Pattern not found");
    }
    for offset in hits {
        println!("{}", format_offset(offset));
    }
    Ok(())
}

/// Offsets of the first match, or of every match with `options.all`.
///
/// Overlapping matches are all reported.
pub fn matches<S: FileStore>(buffer: &Buffer<S>, needle: &[u8], options: &FindOptions) -> Vec<usize> {
    let direction = if options.backward {
        Direction::Backward
    } else {
        Direction::Forward
    };
    let mut start = options.from.unwrap_or(match direction {
        Direction::Forward => 0,
        Direction::Backward => buffer.size(),
    });

    let mut hits = Vec::new();
    while let Some(offset) = buffer.find(needle, start, direction) {
        hits.push(offset);
        if !options.all {
            break;
        }
        start = match direction {
            Direction::Forward => offset + 1,
            Direction::Backward => offset,
        };
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexed_buffer::MemoryStore;

    fn buffer(bytes: &[u8]) -> Buffer<MemoryStore> {
        let store = MemoryStore::new();
        store.put("f", bytes.to_vec());
        Buffer::open_with(store, "f").unwrap()
    }

    #[test]
    fn first_match_forward() {
        let b = buffer(b"Hello, World!");
        assert_eq!(matches(&b, b"o", &FindOptions::default()), vec![4]);
    }

    #[test]
    fn all_matches_overlap() {
        let b = buffer(b"aaaa");
        let options = FindOptions {
            all: true,
            ..Default::default()
        };
        assert_eq!(matches(&b, b"aa", &options), vec![0, 1, 2]);
    }

    #[test]
    fn backward_defaults_to_end() {
        let b = buffer(b"abcabc");
        let options = FindOptions {
            backward: true,
            ..Default::default()
        };
        assert_eq!(matches(&b, b"abc", &options), vec![3]);
    }

    #[test]
    fn backward_all_descends() {
        let b = buffer(b"abcabcabc");
        let options = FindOptions {
            backward: true,
            all: true,
            from: Some(7),
            ..Default::default()
        };
        assert_eq!(matches(&b, b"abc", &options), vec![6, 3, 0]);
    }

    #[test]
    fn forward_from_offset() {
        let b = buffer(b"abcabc");
        let options = FindOptions {
            from: Some(1),
            ..Default::default()
        };
        assert_eq!(matches(&b, b"abc", &options), vec![3]);
    }

    #[test]
    fn no_match_is_empty() {
        let b = buffer(b"abc");
        assert!(matches(&b, b"xyz", &FindOptions::default()).is_empty());
        assert!(matches(&b, b"", &FindOptions::default()).is_empty());
    }
}
