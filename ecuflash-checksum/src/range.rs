//! Address ranges over ECU memory.

use serde::{Deserialize, Serialize};

use ecuflash_core::format_hex;

/// A contiguous region of ECU address space to be summed.
///
/// Pure value; a zero-length range is representable and is never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressRange {
    pub start_address: u32,
    pub num_bytes: u32,
}

impl AddressRange {
    pub fn new(start_address: u32, num_bytes: u32) -> Self {
        Self {
            start_address,
            num_bytes,
        }
    }

    /// Range covering `[start, end)`, with the length computed in the
    /// target's wrapping `u32` arithmetic (an inverted pair produces a
    /// huge range whose reads then fail, rather than a panic).
    pub fn from_bounds(start_address: u32, end_address: u32) -> Self {
        Self::new(start_address, end_address.wrapping_sub(start_address))
    }

    /// One past the last address, without overflow.
    pub fn end_address(&self) -> u64 {
        self.start_address as u64 + self.num_bytes as u64
    }

    pub fn is_empty(&self) -> bool {
        self.num_bytes == 0
    }
}

impl std::fmt::Display for AddressRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}+{}",
            format_hex(self.start_address),
            format_hex(self.num_bytes)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bounds_computes_length() {
        let range = AddressRange::from_bounds(0x1000, 0x1400);
        assert_eq!(range.start_address, 0x1000);
        assert_eq!(range.num_bytes, 0x400);
        assert_eq!(range.end_address(), 0x1400);
    }

    #[test]
    fn inverted_bounds_wrap_instead_of_panicking() {
        let range = AddressRange::from_bounds(0x1400, 0x1000);
        assert_eq!(range.num_bytes, 0u32.wrapping_sub(0x400));
    }

    #[test]
    fn zero_length_is_empty() {
        assert!(AddressRange::new(0x1000, 0).is_empty());
        assert!(!AddressRange::new(0x1000, 1).is_empty());
    }

    #[test]
    fn display_format() {
        let range = AddressRange::new(0x8000, 0x10);
        assert_eq!(range.to_string(), "0x8000+0x10");
    }
}
