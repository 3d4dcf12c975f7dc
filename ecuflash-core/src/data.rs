//! Raw data types and numeric helpers shared by the image accessor and
//! the calibration layer.

use serde::{Deserialize, Serialize};

/// Integer types that can be read from or written to a firmware image.
///
/// Widths are fixed by the ECU's memory layout, not by the host:
/// 1 byte for the 8-bit types, 2 for 16-bit, 4 for 32-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
}

impl DataType {
    /// Width of the type in bytes.
    pub fn size(&self) -> u32 {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 => 4,
        }
    }

    /// Short name as used in layout files and log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int8 => "Int8",
            Self::UInt8 => "UInt8",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parse an address literal.
///
/// A string is treated as hexadecimal only when it carries a `0x`/`0X`
/// prefix (case-insensitive). Missing prefix, empty input, and bad
/// digits all parse to `0` rather than an error, matching how layout
/// files treat absent fields.
pub fn parse_hex(text: &str) -> u32 {
    let Some(digits) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    else {
        return 0;
    };

    if digits.is_empty() {
        return 0;
    }

    u32::from_str_radix(digits, 16).unwrap_or(0)
}

/// Format an address as an uppercase hex literal (`0x1A`, `0xDEADBEEF`).
///
/// No zero padding beyond the value's natural digit count.
pub fn format_hex(value: u32) -> String {
    format!("0x{value:X}")
}

/// Scale a value and clamp the result to `[min, max]`.
pub fn clamped_scale(value: f32, scale: f32, min: f32, max: f32) -> f32 {
    (value * scale).clamp(min, max)
}

/// Offset a value and clamp the result to `[min, max]`.
pub fn clamped_offset(value: f32, offset: f32, min: f32, max: f32) -> f32 {
    (value + offset).clamp(min, max)
}

/// Convert a raw stored value to engineering units: `raw * scale + offset`.
pub fn corrected_from_raw(raw: f64, scale: f64, offset: f64) -> f64 {
    raw * scale + offset
}

/// Inverse of [`corrected_from_raw`]: `(corrected - offset) / scale`.
///
/// Round-trips exactly with [`corrected_from_raw`] for values that are
/// representable without rounding loss.
pub fn raw_from_corrected(corrected: f64, scale: f64, offset: f64) -> f64 {
    (corrected - offset) / scale
}
