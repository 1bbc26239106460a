//! Hex dump.

use anyhow::Result;
use std::path::Path;

use super::open_buffer;
use crate::config::{Config, DisplayConfig};

/// Run the dump command.
///
/// Dumps `length` bytes from `offset` (everything to the end when `None`).
pub fn run(path: &Path, config: &Config, offset: usize, length: Option<usize>) -> Result<()> {
    let buffer = open_buffer(path, config)?;
    let count = length.unwrap_or_else(|| buffer.size().saturating_sub(offset));
    let bytes = buffer.get_bytes(offset, count);
    tracing::debug!("Dumping {} bytes from {}", bytes.len(), offset);

    for row in rows(&bytes, offset, &config.display) {
        println!("{}", row);
    }
    Ok(())
}

/// Format `bytes` as `offset  hex  |ascii|` rows.
///
/// `base` is the file offset of `bytes[0]`. The last row is padded so the
/// ASCII column lines up.
pub fn rows(bytes: &[u8], base: usize, display: &DisplayConfig) -> Vec<String> {
    let width = display.bytes_per_row.max(1);
    bytes
        .chunks(width)
        .enumerate()
        .map(|(i, chunk)| {
            let offset = base + i * width;
            let offset = if display.uppercase {
                format!("{:08X}", offset)
            } else {
                format!("{:08x}", offset)
            };
            let hex = chunk
                .iter()
                .map(|&b| {
                    if display.uppercase {
                        hex::encode_upper([b])
                    } else {
                        hex::encode([b])
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            let ascii: String = chunk.iter().map(|&b| printable(b)).collect();
            format!("{}  {:<pad$}  |{}|", offset, hex, ascii, pad = width * 3 - 1)
        })
        .collect()
}

fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '.'
    }
}
