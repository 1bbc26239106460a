//! Textual byte literals.
//!
//! Search patterns and edit values are typed by humans as text, hex digits,
//! bit strings, or decimal numbers. This module resolves them into the raw
//! byte sequences the buffer engine consumes:
//!
//! ```text
//! text:Hi      -> 48 69
//! hex:c0 ffe   -> 0c 0f fe        (odd length gets a leading 0)
//! bits:101     -> 05              (left-padded to whole bytes)
//! u16:258      -> 02 01 / 01 02   (little / big endian)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::LiteralError;

/// Byte order for multi-byte decimal values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// How a literal's text maps to bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Encoding {
    /// UTF-8 bytes of the input.
    Text,
    /// Pairs of hex digits.
    Hex,
    /// Groups of eight `0`/`1` digits.
    Bits,
    /// An unsigned decimal number stored in `width` bytes.
    Decimal {
        /// Output size in bytes: 1, 2, 4 or 8.
        width: usize,
    },
}

impl Encoding {
    /// Decimal encoding, validating the width.
    pub fn decimal(width: usize) -> Result<Self, LiteralError> {
        match width {
            1 | 2 | 4 | 8 => Ok(Encoding::Decimal { width }),
            other => Err(LiteralError::UnsupportedWidth(other)),
        }
    }

    /// Resolve `input` into bytes.
    ///
    /// `endian` only affects [`Encoding::Decimal`]. Empty input (after
    /// whitespace removal for hex/bits/decimal) yields an empty sequence.
    pub fn encode(&self, input: &str, endian: Endian) -> Result<Vec<u8>, LiteralError> {
        match *self {
            Encoding::Text => Ok(input.as_bytes().to_vec()),
            Encoding::Hex => encode_hex(input),
            Encoding::Bits => encode_bits(input),
            Encoding::Decimal { width } => encode_decimal(input, width, endian),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Text => f.write_str("text"),
            Encoding::Hex => f.write_str("hex"),
            Encoding::Bits => f.write_str("bits"),
            Encoding::Decimal { width } => write!(f, "u{}", width * 8),
        }
    }
}

impl FromStr for Encoding {
    type Err = LiteralError;

    /// Accepts `text`, `hex`, `bits`, `u8`, `u16`, `u32`, `u64`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "ascii" => Ok(Encoding::Text),
            "hex" => Ok(Encoding::Hex),
            "bits" => Ok(Encoding::Bits),
            "u8" => Ok(Encoding::Decimal { width: 1 }),
            "u16" => Ok(Encoding::Decimal { width: 2 }),
            "u32" => Ok(Encoding::Decimal { width: 4 }),
            "u64" => Ok(Encoding::Decimal { width: 8 }),
            _ => Err(LiteralError::UnknownEncoding(s.to_string())),
        }
    }
}

impl From<Encoding> for String {
    fn from(encoding: Encoding) -> Self {
        encoding.to_string()
    }
}

impl TryFrom<String> for Encoding {
    type Error = LiteralError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parse a prefixed literal such as `hex:deadbeef` or `text:PNG`.
pub fn parse_literal(literal: &str, endian: Endian) -> Result<Vec<u8>, LiteralError> {
    let (encoding, input) = literal
        .split_once(':')
        .ok_or_else(|| LiteralError::MissingPrefix(literal.to_string()))?;
    encoding.parse::<Encoding>()?.encode(input, endian)
}

/// Parse an offset: `0x`-prefixed hexadecimal, otherwise decimal.
pub fn parse_offset(s: &str) -> Result<usize, LiteralError> {
    let trimmed = s.trim();
    let lower = trimmed.to_ascii_lowercase();
    let parsed = match lower.strip_prefix("0x") {
        Some(digits) => usize::from_str_radix(digits, 16),
        None => lower.parse::<usize>(),
    };
    parsed.map_err(|_| LiteralError::InvalidOffset(trimmed.to_string()))
}

fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

fn encode_hex(input: &str) -> Result<Vec<u8>, LiteralError> {
    let mut digits = strip_whitespace(input);
    if digits.len() % 2 != 0 {
        digits.insert(0, '0');
    }
    hex::decode(&digits).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, .. } => LiteralError::InvalidDigit {
            encoding: "hex",
            digit: c,
        },
        // Length is even by construction; anything else is a bad character.
        _ => LiteralError::InvalidDigit {
            encoding: "hex",
            digit: digits.chars().find(|c| !c.is_ascii_hexdigit()).unwrap_or('?'),
        },
    })
}

fn encode_bits(input: &str) -> Result<Vec<u8>, LiteralError> {
    let digits = strip_whitespace(input);
    if let Some(bad) = digits.chars().find(|c| *c != '0' && *c != '1') {
        return Err(LiteralError::InvalidDigit {
            encoding: "bits",
            digit: bad,
        });
    }

    let pad = (8 - digits.len() % 8) % 8;
    let padded: Vec<u8> = std::iter::repeat(b'0')
        .take(pad)
        .chain(digits.bytes())
        .collect();

    Ok(padded
        .chunks(8)
        .map(|group| {
            group
                .iter()
                .fold(0u8, |acc, bit| (acc << 1) | u8::from(*bit == b'1'))
        })
        .collect())
}

fn encode_decimal(input: &str, width: usize, endian: Endian) -> Result<Vec<u8>, LiteralError> {
    if !matches!(width, 1 | 2 | 4 | 8) {
        return Err(LiteralError::UnsupportedWidth(width));
    }
    let digits = input.trim();
    if digits.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
        return Err(LiteralError::InvalidDigit {
            encoding: "decimal",
            digit: bad,
        });
    }
    let value: u64 = digits
        .parse()
        .map_err(|_| LiteralError::DecimalOverflow(digits.to_string()))?;

    // Values wider than `width` keep only their low bytes.
    let bytes = match endian {
        Endian::Little => value.to_le_bytes()[..width].to_vec(),
        Endian::Big => value.to_be_bytes()[8 - width..].to_vec(),
    };
    Ok(bytes)
}
