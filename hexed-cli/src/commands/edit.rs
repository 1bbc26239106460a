//! Apply scripted edits to a file.
//!
//! Each operation is one line:
//!
//! ```text
//! insert  <offset> <literal>
//! delete  <offset> <count>
//! replace <offset> <literal>   # overwrites, growing the file past the end
//! undo
//! redo
//! ```
//!
//! Offsets accept `0x` hex. Literals follow the same rules as `find`
//! patterns (`hex:...`, `u32:...`, or the configured default encoding).

use anyhow::{bail, Context, Result};
use hexed_buffer::{Buffer, FileStore};
use hexed_types::parse_offset;
use std::path::{Path, PathBuf};

use super::{open_buffer, resolve_literal};
use crate::config::Config;

/// One scripted edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Insert bytes at an offset.
    Insert {
        /// Target offset.
        offset: usize,
        /// Bytes to insert.
        data: Vec<u8>,
    },
    /// Delete a byte range.
    Delete {
        /// Start offset.
        offset: usize,
        /// Number of bytes.
        count: usize,
    },
    /// Overwrite bytes.
    Replace {
        /// Start offset.
        offset: usize,
        /// New bytes.
        data: Vec<u8>,
    },
    /// Undo the newest edit.
    Undo,
    /// Redo the newest undone edit.
    Redo,
}

impl EditOp {
    /// Parse one operation line.
    pub fn parse(line: &str, config: &Config) -> Result<Self> {
        let (verb, rest) = next_word(line).context("Empty operation")?;
        match verb.to_ascii_lowercase().as_str() {
            "insert" => {
                let (offset, literal) = offset_and_rest(rest, verb)?;
                let data = resolve_literal(literal, None, config)?;
                Ok(EditOp::Insert { offset, data })
            }
            "replace" => {
                let (offset, literal) = offset_and_rest(rest, verb)?;
                let data = resolve_literal(literal, None, config)?;
                Ok(EditOp::Replace { offset, data })
            }
            "delete" => {
                let (offset, count) = offset_and_rest(rest, verb)?;
                let count = parse_offset(count)
                    .with_context(|| format!("Invalid byte count {:?}", count))?;
                Ok(EditOp::Delete { offset, count })
            }
            "undo" if rest.trim().is_empty() => Ok(EditOp::Undo),
            "redo" if rest.trim().is_empty() => Ok(EditOp::Redo),
            _ => bail!("Unknown operation {:?}", line.trim()),
        }
    }

    /// Apply to `buffer`. Undo and redo with empty stacks only log.
    pub fn apply<S: FileStore>(&self, buffer: &mut Buffer<S>) {
        match self {
            EditOp::Insert { offset, data } => buffer.insert(*offset, data),
            EditOp::Delete { offset, count } => buffer.delete(*offset, *count),
            EditOp::Replace { offset, data } => buffer.replace_bytes(*offset, data),
            EditOp::Undo => {
                if !buffer.undo() {
                    tracing::warn!("Nothing to undo");
                }
            }
            EditOp::Redo => {
                if !buffer.redo() {
                    tracing::warn!("Nothing to redo");
                }
            }
        }
    }
}

fn next_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

fn offset_and_rest<'a>(rest: &'a str, verb: &str) -> Result<(usize, &'a str)> {
    let (offset, rest) =
        next_word(rest).with_context(|| format!("{} needs an offset", verb))?;
    let offset = parse_offset(offset)?;
    let rest = rest.trim();
    if rest.is_empty() {
        bail!("{} needs a value after the offset", verb);
    }
    Ok((offset, rest))
}

/// Parse a script: one operation per line, `#` starts a comment line.
pub fn parse_script(script: &str, config: &Config) -> Result<Vec<EditOp>> {
    script
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| EditOp::parse(line, config).with_context(|| format!("line {}", i + 1)))
        .collect()
}

/// Options for the edit command.
#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    /// Inline operations, applied after the script.
    pub ops: Vec<String>,
    /// Script file with one operation per line.
    pub script: Option<PathBuf>,
    /// Write here instead of back to the input file.
    pub output: Option<PathBuf>,
    /// Apply but do not write.
    pub dry_run: bool,
    /// Overwrite even if the file changed since it was read.
    pub force: bool,
}

/// What the edit command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Content was written to this path.
    Saved(PathBuf),
    /// Nothing changed, nothing written.
    Unchanged,
    /// Dry run; nothing written.
    DryRun,
}

/// Run the edit command.
pub fn run(path: &Path, config: &Config, options: &EditOptions) -> Result<()> {
    let mut ops = Vec::new();
    if let Some(script) = &options.script {
        let text = std::fs::read_to_string(script)
            .with_context(|| format!("Failed to read script {}", script.display()))?;
        ops.extend(parse_script(&text, config)?);
    }
    for op in &options.ops {
        ops.push(EditOp::parse(op, config)?);
    }

    let mut buffer = open_buffer(path, config)?;
    let before = buffer.size();
    match apply_and_save(&mut buffer, &ops, options)? {
        Outcome::Saved(to) => println!(
            "Applied {} operations ({} -> {} bytes), saved to {}",
            ops.len(),
            before,
            buffer.size(),
            to.display()
        ),
        Outcome::Unchanged => println!("No changes"),
        Outcome::DryRun => println!(
            "Dry run: {} operations ({} -> {} bytes), nothing written",
            ops.len(),
            before,
            buffer.size()
        ),
    }
    Ok(())
}

/// Apply `ops` to an opened buffer and persist the result.
///
/// Writing back to the opened file is refused if it changed on disk since
/// it was read, unless `options.force` is set.
pub fn apply_and_save<S: FileStore>(
    buffer: &mut Buffer<S>,
    ops: &[EditOp],
    options: &EditOptions,
) -> Result<Outcome> {
    for op in ops {
        tracing::debug!("Applying {:?}", op);
        op.apply(buffer);
    }

    if options.dry_run {
        return Ok(Outcome::DryRun);
    }

    if let Some(output) = &options.output {
        buffer
            .save_as(output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        return Ok(Outcome::Saved(output.clone()));
    }

    if !buffer.is_modified() {
        return Ok(Outcome::Unchanged);
    }

    let target = buffer
        .filename()
        .map(Path::to_path_buf)
        .context("Buffer has no file to save to")?;
    if !options.force && buffer.has_changed_on_disk()? {
        bail!(
            "{} changed on disk since it was read; use --force to overwrite",
            target.display()
        );
    }
    buffer
        .save()
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(Outcome::Saved(target))
}
