//! CLI command implementations.

pub mod count;
pub mod dump;
pub mod edit;
pub mod find;
pub mod info;
pub mod inspect;

use anyhow::{Context, Result};
use hexed_buffer::Buffer;
use std::path::Path;

use crate::config::Config;

/// Open `path` using the configured fingerprint algorithm.
pub fn open_buffer(path: &Path, config: &Config) -> Result<Buffer> {
    Buffer::new()
        .with_digest_kind(config.buffer.fingerprint)
        .load_file(path)
        .with_context(|| format!("Failed to open {}", path.display()))
}

/// Resolve a user-typed pattern or value into bytes.
///
/// An explicit `encoding` applies to the whole input. Otherwise a known
/// `<encoding>:` prefix is honored, and anything else uses the configured
/// default encoding.
pub fn resolve_literal(input: &str, encoding: Option<&str>, config: &Config) -> Result<Vec<u8>> {
    let endian = config.buffer.endian;

    if let Some(name) = encoding {
        let encoding = config.search.resolve(name)?;
        return encoding
            .encode(input, endian)
            .with_context(|| format!("Invalid {} literal {:?}", encoding, input));
    }

    if let Some((prefix, rest)) = input.split_once(':') {
        if let Ok(encoding) = config.search.resolve(prefix) {
            return encoding
                .encode(rest, endian)
                .with_context(|| format!("Invalid {} literal {:?}", encoding, rest));
        }
    }

    let encoding = config.search.default_encoding()?;
    encoding
        .encode(input, endian)
        .with_context(|| format!("Invalid {} literal {:?}", encoding, input))
}

/// clap value parser for offsets (`0x1f` or `31`).
pub fn offset_arg(s: &str) -> std::result::Result<usize, String> {
    hexed_types::parse_offset(s).map_err(|e| e.to_string())
}

/// Format an offset the way every command prints it.
pub fn format_offset(offset: usize) -> String {
    format!("0x{:08X}", offset)
}
