//! Typed accessor over a firmware image.
//!
//! A [`MemoryImage`] owns a contiguous byte buffer representing a region
//! of ECU address space. All reads and writes take absolute addresses and
//! are bounds-checked against the region; the wire encoding is always
//! little-endian, independent of the host.

use crate::data::DataType;

/// A bounds-checked, little-endian view over a region of ECU memory.
///
/// Byte 0 of the buffer corresponds to `start_address`. Accesses that are
/// not fully contained in `[start_address, end_address)` fail instead of
/// reading out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
    data: Vec<u8>,
    start_address: u32,
}

impl MemoryImage {
    /// Wrap raw image bytes starting at the given base address.
    pub fn new(data: Vec<u8>, start_address: u32) -> Self {
        Self {
            data,
            start_address,
        }
    }

    /// Allocate a zero-filled image of `num_bytes` at the given base.
    pub fn zeroed(num_bytes: u32, start_address: u32) -> Self {
        Self::new(vec![0; num_bytes as usize], start_address)
    }

    /// Absolute address of byte 0.
    pub fn start_address(&self) -> u32 {
        self.start_address
    }

    /// One past the last valid absolute address.
    pub fn end_address(&self) -> u32 {
        self.start_address.wrapping_add(self.size())
    }

    /// Number of bytes in the image.
    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    /// Borrow the raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Recover the owned bytes, consuming the image.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Translate an absolute address to a buffer offset, checking that
    /// `width` bytes fit inside the image.
    fn offset_of(&self, address: u32, width: u32) -> Option<usize> {
        let offset = address.checked_sub(self.start_address)? as usize;
        let end = offset.checked_add(width as usize)?;
        (end <= self.data.len()).then_some(offset)
    }

    /// Read an integer of the given type at an absolute address.
    ///
    /// Signed types sign-extend into the returned `u32`. Returns `None`
    /// if any byte of the value lies outside the image.
    pub fn read_int(&self, ty: DataType, address: u32) -> Option<u32> {
        let offset = self.offset_of(address, ty.size())?;
        let bytes = &self.data[offset..];

        let value = match ty {
            DataType::Int8 => bytes[0] as i8 as u32,
            DataType::UInt8 => bytes[0] as u32,
            DataType::Int16 => {
                i16::from_le_bytes([bytes[0], bytes[1]]) as u32
            }
            DataType::UInt16 => {
                u16::from_le_bytes([bytes[0], bytes[1]]) as u32
            }
            DataType::Int32 | DataType::UInt32 => {
                u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
            }
        };

        Some(value)
    }

    /// Write an integer of the given type at an absolute address.
    ///
    /// Values wider than the destination type saturate to the type's
    /// maximum (the value space is unsigned, so signed destinations
    /// saturate at their positive maximum). Returns `false` if any byte
    /// of the value would land outside the image.
    pub fn write_int(&mut self, value: u32, ty: DataType, address: u32) -> bool {
        let Some(offset) = self.offset_of(address, ty.size()) else {
            return false;
        };

        match ty {
            DataType::Int8 => {
                self.data[offset] = value.min(i8::MAX as u32) as u8;
            }
            DataType::UInt8 => {
                self.data[offset] = value.min(u8::MAX as u32) as u8;
            }
            DataType::Int16 => {
                let clamped = value.min(i16::MAX as u32) as u16;
                self.data[offset..offset + 2].copy_from_slice(&clamped.to_le_bytes());
            }
            DataType::UInt16 => {
                let clamped = value.min(u16::MAX as u32) as u16;
                self.data[offset..offset + 2].copy_from_slice(&clamped.to_le_bytes());
            }
            DataType::Int32 => {
                let clamped = value.min(i32::MAX as u32);
                self.data[offset..offset + 4].copy_from_slice(&clamped.to_le_bytes());
            }
            DataType::UInt32 => {
                self.data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
            }
        }

        true
    }
}

#[path = "tests/image_tests.rs"]
#[cfg(test)]
mod tests;
