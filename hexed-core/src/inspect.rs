//! Value inspector.
//!
//! Reads the bytes at an offset as the common fixed-width numeric types.
//! A field is `None` when fewer bytes remain than the type needs.
//!
//! Every value starts at the inspected offset and extends toward the end
//! of the content; bytes before the offset are never read. With
//! [`Endian::Little`] the byte at the offset is the least significant, with
//! [`Endian::Big`] the most significant.

use hexed_types::Endian;
use serde::Serialize;

/// Largest window the inspector reads (one 128-bit value).
pub const INSPECT_WINDOW: usize = 16;

/// The bytes at an offset decoded as integers, floats, and bits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    /// Byte order used for multi-byte values.
    pub endian: Endian,
    /// Up to 16 bytes as `%08b` groups separated by spaces.
    pub bits: String,
    /// Unsigned 8-bit value.
    pub u8: Option<u8>,
    /// Signed 8-bit value.
    pub i8: Option<i8>,
    /// Unsigned 16-bit value.
    pub u16: Option<u16>,
    /// Signed 16-bit value.
    pub i16: Option<i16>,
    /// Unsigned 32-bit value.
    pub u32: Option<u32>,
    /// Signed 32-bit value.
    pub i32: Option<i32>,
    /// Unsigned 64-bit value.
    pub u64: Option<u64>,
    /// Signed 64-bit value.
    pub i64: Option<i64>,
    /// Unsigned 128-bit value.
    pub u128: Option<u128>,
    /// Signed 128-bit value.
    pub i128: Option<i128>,
    /// IEEE 754 single precision.
    pub f32: Option<f32>,
    /// IEEE 754 double precision.
    pub f64: Option<f64>,
}

macro_rules! read_as {
    ($bytes:expr, $ty:ty, $endian:expr) => {{
        const N: usize = std::mem::size_of::<$ty>();
        $bytes.get(..N).map(|window| {
            let mut arr = [0u8; N];
            arr.copy_from_slice(window);
            match $endian {
                Endian::Little => <$ty>::from_le_bytes(arr),
                Endian::Big => <$ty>::from_be_bytes(arr),
            }
        })
    }};
}

/// Decode `bytes` (the content starting at the inspected offset).
///
/// Only the first [`INSPECT_WINDOW`] bytes are looked at.
pub fn inspect(bytes: &[u8], endian: Endian) -> Inspection {
    let window = &bytes[..bytes.len().min(INSPECT_WINDOW)];
    let bits = window
        .iter()
        .map(|b| format!("{b:08b}"))
        .collect::<Vec<_>>()
        .join(" ");

    Inspection {
        endian,
        bits,
        u8: read_as!(window, u8, endian),
        i8: read_as!(window, i8, endian),
        u16: read_as!(window, u16, endian),
        i16: read_as!(window, i16, endian),
        u32: read_as!(window, u32, endian),
        i32: read_as!(window, i32, endian),
        u64: read_as!(window, u64, endian),
        i64: read_as!(window, i64, endian),
        u128: read_as!(window, u128, endian),
        i128: read_as!(window, i128, endian),
        f32: read_as!(window, f32, endian),
        f64: read_as!(window, f64, endian),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ones_is_minus_one() {
        let insp = inspect(&[0xFF; 16], Endian::Little);
        assert_eq!(insp.u8, Some(255));
        assert_eq!(insp.i8, Some(-1));
        assert_eq!(insp.u16, Some(65535));
        assert_eq!(insp.i32, Some(-1));
        assert_eq!(insp.u128, Some(u128::MAX));
        assert_eq!(insp.i128, Some(-1));
    }

    #[test]
    fn endianness_changes_multibyte_values() {
        let bytes = [0x01, 0x02, 0x03, 0x04];
        let le = inspect(&bytes, Endian::Little);
        let be = inspect(&bytes, Endian::Big);
        assert_eq!(le.u16, Some(0x0201));
        assert_eq!(be.u16, Some(0x0102));
        assert_eq!(le.u32, Some(0x0403_0201));
        assert_eq!(be.u32, Some(0x0102_0304));
        assert_eq!(le.u8, be.u8);
    }

    #[test]
    fn value_starts_at_offset_byte() {
        // Content 00 11 22 33 44 inspected at offset 2.
        let content = [0x00, 0x11, 0x22, 0x33, 0x44];
        let le = inspect(&content[2..], Endian::Little);
        let be = inspect(&content[2..], Endian::Big);
        assert_eq!(le.u8, Some(0x22));
        assert_eq!(le.u16, Some(0x3322));
        assert_eq!(be.u16, Some(0x2233));
        assert_eq!(le.u32, None);
    }

    #[test]
    fn short_input_leaves_wide_types_empty() {
        let insp = inspect(&[0x2A, 0x00, 0x00], Endian::Little);
        assert_eq!(insp.u8, Some(42));
        assert_eq!(insp.u16, Some(42));
        assert_eq!(insp.u32, None);
        assert_eq!(insp.f32, None);
        assert_eq!(insp.u128, None);
    }

    #[test]
    fn floats_decode() {
        let insp = inspect(&1.5f32.to_be_bytes(), Endian::Big);
        assert_eq!(insp.f32, Some(1.5));
        let insp = inspect(&(-2.25f64).to_le_bytes(), Endian::Little);
        assert_eq!(insp.f64, Some(-2.25));
    }

    #[test]
    fn bits_grouped_per_byte() {
        let insp = inspect(&[0x05, 0xA0], Endian::Big);
        assert_eq!(insp.bits, "00000101 10100000");
    }

    #[test]
    fn window_capped_at_sixteen_bytes() {
        let insp = inspect(&[0u8; 32], Endian::Little);
        assert_eq!(insp.bits.split(' ').count(), INSPECT_WINDOW);
    }

    #[test]
    fn json_uses_null_for_missing_values() {
        let insp = inspect(&[0x01, 0x00], Endian::Little);
        let json = serde_json::to_value(&insp).unwrap();
        assert_eq!(json["endian"], "little");
        assert_eq!(json["u16"], 1);
        assert!(json["u32"].is_null());
    }

    #[test]
    fn empty_input() {
        let insp = inspect(&[], Endian::Little);
        assert!(insp.bits.is_empty());
        assert_eq!(insp.u8, None);
    }
}
