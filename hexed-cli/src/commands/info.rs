//! Show file size and fingerprint.

use anyhow::{Context, Result};
use hexed_buffer::Fingerprint;
use serde::Serialize;
use std::path::Path;

use super::open_buffer;
use crate::config::Config;

/// Summary of an opened file.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Path as given on the command line.
    pub path: String,
    /// Size in bytes.
    pub size: usize,
    /// Content fingerprint.
    pub fingerprint: Option<Fingerprint>,
}

/// Run the info command.
pub fn run(path: &Path, config: &Config, json: bool) -> Result<()> {
    let report = report(path, config)?;
    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", out);
    } else {
        print!("{}", render(&report));
    }
    Ok(())
}

/// Build the report for `path`.
pub fn report(path: &Path, config: &Config) -> Result<Report> {
    let buffer = open_buffer(path, config)?;
    Ok(Report {
        path: path.display().to_string(),
        size: buffer.size(),
        fingerprint: buffer.fingerprint(),
    })
}

fn render(report: &Report) -> String {
    let fingerprint = report
        .fingerprint
        .map(|f| f.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "File:        {}\nSize:        {} bytes ({:#x})\nFingerprint: {}\n",
        report.path, report.size, report.size, fingerprint
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexed_buffer::DigestKind;
    use tempfile::tempdir;

    #[test]
    fn report_for_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.bin");
        std::fs::write(&path, b"Hello").unwrap();

        let report = report(&path, &Config::default()).unwrap();
        assert_eq!(report.size, 5);
        assert_eq!(
            report.fingerprint,
            Some(Fingerprint::compute(DigestKind::Sha256, b"Hello"))
        );
    }

    #[test]
    fn report_uses_configured_digest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.bin");
        std::fs::write(&path, b"Hello").unwrap();

        let mut config = Config::default();
        config.buffer.fingerprint = DigestKind::Blake3;
        let report = report(&path, &config).unwrap();
        assert_eq!(report.fingerprint.unwrap().kind(), DigestKind::Blake3);
    }

    #[test]
    fn render_lists_fields() {
        let report = Report {
            path: "x.bin".to_string(),
            size: 16,
            fingerprint: None,
        };
        let text = render(&report);
        assert!(text.contains("x.bin"));
        assert!(text.contains("16 bytes (0x10)"));
        assert!(text.contains("Fingerprint: -"));
    }

    #[test]
    fn json_report_has_prefixed_fingerprint() {
        let report = Report {
            path: "x.bin".to_string(),
            size: 0,
            fingerprint: Some(Fingerprint::compute(DigestKind::Sha256, b"")),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["size"], 0);
        assert!(json["fingerprint"].as_str().unwrap().starts_with("sha256:"));
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(run(&dir.path().join("nope"), &Config::default(), false).is_err());
    }
}
