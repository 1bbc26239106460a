//! Configuration loading for hexed.
//!
//! Configuration is loaded from a TOML file: `--config PATH`, or
//! `hexed.toml` in the platform config directory. Every field has a
//! default, and a missing default-location file is not an error.

use hexed_types::{DigestKind, Encoding, Endian, LiteralError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration for hexed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Dump layout.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Pattern defaults for `find` and `count`.
    #[serde(default)]
    pub search: SearchConfig,
    /// Buffer behavior.
    #[serde(default)]
    pub buffer: BufferConfig,
}

/// Dump layout configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Bytes shown per dump row (default: 16).
    #[serde(default = "default_bytes_per_row")]
    pub bytes_per_row: usize,
    /// Upper-case hex digits (default: true).
    #[serde(default = "default_uppercase")]
    pub uppercase: bool,
}

/// Search configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Encoding for unprefixed patterns: text, hex, bits, decimal, or u8..u64
    /// (default: text).
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Byte width used when `encoding = "decimal"` (default: 4).
    #[serde(default = "default_decimal_width")]
    pub decimal_width: usize,
}

/// Buffer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BufferConfig {
    /// Digest used for external-change detection (default: sha256).
    #[serde(default)]
    pub fingerprint: DigestKind,
    /// Byte order for decimal literals and inspection (default: little).
    #[serde(default)]
    pub endian: Endian,
}

fn default_bytes_per_row() -> usize {
    16
}

fn default_uppercase() -> bool {
    true
}

fn default_encoding() -> String {
    "text".to_string()
}

fn default_decimal_width() -> usize {
    4
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bytes_per_row: default_bytes_per_row(),
            uppercase: default_uppercase(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            decimal_width: default_decimal_width(),
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            fingerprint: DigestKind::default(),
            endian: Endian::default(),
        }
    }
}

impl SearchConfig {
    /// Resolve an encoding name, mapping `decimal` to the configured width.
    pub fn resolve(&self, name: &str) -> Result<Encoding, LiteralError> {
        if name.eq_ignore_ascii_case("decimal") {
            Encoding::decimal(self.decimal_width)
        } else {
            name.parse()
        }
    }

    /// The default encoding for unprefixed patterns.
    pub fn default_encoding(&self) -> Result<Encoding, LiteralError> {
        self.resolve(&self.encoding)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `explicit` if given, else from the default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the commands cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.bytes_per_row == 0 {
            return Err(ConfigError::Invalid(
                "display.bytes_per_row must be at least 1".to_string(),
            ));
        }
        Encoding::decimal(self.search.decimal_width)
            .map_err(|e| ConfigError::Invalid(format!("search.decimal_width: {e}")))?;
        self.search
            .default_encoding()
            .map_err(|e| ConfigError::Invalid(format!("search.encoding: {e}")))?;
        Ok(())
    }
}

/// Default config file location (`<config dir>/hexed.toml`).
pub fn default_config_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("io", "hexed", "hexed")?;
    Some(dirs.config_dir().join("hexed.toml"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.display.bytes_per_row, 16);
        assert!(config.display.uppercase);
        assert_eq!(config.search.encoding, "text");
        assert_eq!(config.search.decimal_width, 4);
        assert_eq!(config.buffer.fingerprint, DigestKind::Sha256);
        assert_eq!(config.buffer.endian, Endian::Little);
        config.validate().unwrap();
    }

    #[test]
    fn config_from_toml_string() {
        let toml = r#"
[display]
bytes_per_row = 8
uppercase = false

[search]
encoding = "decimal"
decimal_width = 2

[buffer]
fingerprint = "blake3"
endian = "big"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.display.bytes_per_row, 8);
        assert!(!config.display.uppercase);
        assert_eq!(
            config.search.default_encoding().unwrap(),
            Encoding::Decimal { width: 2 }
        );
        assert_eq!(config.buffer.fingerprint, DigestKind::Blake3);
        assert_eq!(config.buffer.endian, Endian::Big);
    }

    #[test]
    fn config_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[display]\nuppercase = false\n").unwrap();
        assert_eq!(config.display.bytes_per_row, 16);
        assert_eq!(config.search.decimal_width, 4);
        assert_eq!(config.buffer.fingerprint, DigestKind::Sha256);
    }

    #[test]
    fn zero_bytes_per_row_rejected() {
        let config: Config = toml::from_str("[display]\nbytes_per_row = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn bad_decimal_width_rejected() {
        let config: Config = toml::from_str("[search]\ndecimal_width = 3\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_encoding_rejected() {
        let config: Config = toml::from_str("[search]\nencoding = \"base64\"\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_digest_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hexed.toml");
        std::fs::write(&path, "[buffer]\nfingerprint = \"md5\"\n").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn explicit_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hexed.toml");
        std::fs::write(&path, "[display]\nbytes_per_row = 32\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.display.bytes_per_row, 32);
    }

    #[test]
    fn resolve_accepts_width_names() {
        let search = SearchConfig::default();
        assert_eq!(search.resolve("hex").unwrap(), Encoding::Hex);
        assert_eq!(search.resolve("u16").unwrap(), Encoding::Decimal { width: 2 });
        assert_eq!(
            search.resolve("decimal").unwrap(),
            Encoding::Decimal { width: 4 }
        );
    }
}
