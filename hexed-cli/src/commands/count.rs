//! Count pattern occurrences.

use anyhow::Result;
use std::path::Path;

use super::{open_buffer, resolve_literal};
use crate::config::Config;

/// Run the count command. Overlapping matches are counted.
pub fn run(path: &Path, config: &Config, pattern: &str, encoding: Option<&str>) -> Result<()> {
    println!("{}", count(path, config, pattern, encoding)?);
    Ok(())
}

/// Number of occurrences of `pattern` in the file at `path`.
pub fn count(path: &Path, config: &Config, pattern: &str, encoding: Option<&str>) -> Result<usize> {
    let buffer = open_buffer(path, config)?;
    let needle = resolve_literal(pattern, encoding, config)?;
    Ok(buffer.count_matches(&needle))
}
