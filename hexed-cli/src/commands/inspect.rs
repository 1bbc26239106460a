//! Decode the bytes at an offset as numbers.

use anyhow::{Context, Result};
use hexed_core::{inspect, Inspection, INSPECT_WINDOW};
use hexed_types::Endian;
use std::fmt::Display;
use std::path::Path;

use super::{format_offset, open_buffer};
use crate::config::Config;

/// Run the inspect command.
pub fn run(
    path: &Path,
    config: &Config,
    offset: usize,
    big_endian: bool,
    json: bool,
) -> Result<()> {
    let endian = if big_endian {
        Endian::Big
    } else {
        config.buffer.endian
    };
    let buffer = open_buffer(path, config)?;
    if offset >= buffer.size() {
        anyhow::bail!(
            "Offset {} is past the end of the file ({} bytes)",
            format_offset(offset),
            buffer.size()
        );
    }

    let inspection = inspect(&buffer.get_bytes(offset, INSPECT_WINDOW), endian);
    if json {
        let out = serde_json::to_string_pretty(&inspection).context("Failed to encode values")?;
        println!("{}", out);
    } else {
        print!("{}", render(offset, &inspection));
    }
    Ok(())
}

fn field<T: Display>(name: &str, value: Option<T>) -> String {
    match value {
        Some(v) => format!("{:<6}{}\n", name, v),
        None => format!("{:<6}-\n", name),
    }
}

/// Render an inspection as a two-column table.
pub fn render(offset: usize, insp: &Inspection) -> String {
    let endian = match insp.endian {
        Endian::Little => "little",
        Endian::Big => "big",
    };
    let mut out = format!("Offset {} ({} endian)\n", format_offset(offset), endian);
    out.push_str(&format!("{:<6}{}\n", "bits", insp.bits));
    out.push_str(&field("u8", insp.u8));
    out.push_str(&field("i8", insp.i8));
    out.push_str(&field("u16", insp.u16));
    out.push_str(&field("i16", insp.i16));
    out.push_str(&field("u32", insp.u32));
    out.push_str(&field("i32", insp.i32));
    out.push_str(&field("u64", insp.u64));
    out.push_str(&field("i64", insp.i64));
    out.push_str(&field("u128", insp.u128));
    out.push_str(&field("i128", insp.i128));
    out.push_str(&field("f32", insp.f32));
    out.push_str(&field("f64", insp.f64));
    out
}
