//! Content fingerprints for external-change detection.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Size of a fingerprint in bytes (both supported digests are 256-bit).
pub const FINGERPRINT_SIZE: usize = 32;

/// Digest algorithm used to fingerprint buffer content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestKind {
    /// SHA-256.
    #[default]
    Sha256,
    /// BLAKE3, faster on large files.
    Blake3,
}

impl DigestKind {
    /// Lowercase name used in config files and fingerprint strings.
    pub fn name(self) -> &'static str {
        match self {
            DigestKind::Sha256 => "sha256",
            DigestKind::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for DigestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed-size digest of byte content.
///
/// Two fingerprints are equal only if they were computed with the same
/// [`DigestKind`] over the same bytes. Displayed as `<kind>:<hex>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Fingerprint {
    kind: DigestKind,
    bytes: [u8; FINGERPRINT_SIZE],
}

impl Fingerprint {
    /// Fingerprint `data` with the given digest algorithm.
    pub fn compute(kind: DigestKind, data: &[u8]) -> Self {
        let bytes = match kind {
            DigestKind::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(data);
                let result = hasher.finalize();
                let mut bytes = [0u8; FINGERPRINT_SIZE];
                bytes.copy_from_slice(&result);
                bytes
            }
            DigestKind::Blake3 => *blake3::hash(data).as_bytes(),
        };
        Self { kind, bytes }
    }

    /// The algorithm this fingerprint was computed with.
    pub fn kind(&self) -> DigestKind {
        self.kind
    }

    /// Get the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_SIZE] {
        &self.bytes
    }

    /// Lowercase hex encoding of the digest (without the kind prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({}:{})", self.kind, &self.to_hex()[..8])
    }
}

impl FromStr for Fingerprint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, digest) = s
            .split_once(':')
            .ok_or_else(|| format!("missing digest kind in {s:?}"))?;
        let kind = match kind {
            "sha256" => DigestKind::Sha256,
            "blake3" => DigestKind::Blake3,
            other => return Err(format!("unknown digest kind: {other}")),
        };
        let decoded = hex::decode(digest).map_err(|e| format!("invalid digest hex: {e}"))?;
        let bytes: [u8; FINGERPRINT_SIZE] = decoded
            .try_into()
            .map_err(|v: Vec<u8>| format!("digest must be {FINGERPRINT_SIZE} bytes, got {}", v.len()))?;
        Ok(Self { kind, bytes })
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.to_string()
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
