//! Multipoint checksum blocks: self-describing 16-byte entries scanned
//! out of a table by detection.

use ecuflash_core::{DataType, MemoryImage, StatusSink};

use crate::kernel::{range_sum, read_u32};

const UINT32_SIZE: u32 = 4;

/// One entry of the multipoint checksum table.
///
/// The block at `location` holds four `u32`s: range start, range end,
/// checksum, inverse checksum. Blocks whose range lives in internal ROM
/// (below the supplied image) cannot be checked against the image and
/// are treated as vacuously correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MultipointChecksum {
    location: u32,
    start_address: u32,
    end_address: u32,
    checksum: u32,
    inverse_checksum: u32,
}

impl MultipointChecksum {
    /// Size of one stored block: start, end, checksum, inverse.
    pub const BLOCK_SIZE: u32 = UINT32_SIZE * 4;

    pub fn new(location: u32) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    pub fn location(&self) -> u32 {
        self.location
    }

    /// Range bounds read from the block.
    pub fn addresses(&self) -> (u32, u32) {
        (self.start_address, self.end_address)
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn inverse_checksum(&self) -> u32 {
        self.inverse_checksum
    }

    /// Read all four block words from the image.
    pub fn load(&mut self, image: &MemoryImage) -> bool {
        if image.size() == 0 {
            return false;
        }

        let mut ok = true;
        ok &= read_u32(image, self.location, &mut self.start_address);
        ok &= read_u32(
            image,
            self.location.wrapping_add(UINT32_SIZE),
            &mut self.end_address,
        );
        ok &= read_u32(
            image,
            self.location.wrapping_add(UINT32_SIZE * 2),
            &mut self.checksum,
        );
        ok &= read_u32(
            image,
            self.location.wrapping_add(UINT32_SIZE * 3),
            &mut self.inverse_checksum,
        );
        ok
    }

    /// Recompute the block's checksum; does not commit.
    ///
    /// A failed computation over a range that leaves the image is still
    /// reported as updatable: those blocks cover memory this image does
    /// not carry, and rewriting their stored value would be wrong.
    pub fn update(&mut self, image: &MemoryImage, verbose: bool, sink: &StatusSink) -> bool {
        let num_bytes = self.end_address.wrapping_sub(self.start_address);
        let computed = range_sum(image, self.start_address, num_bytes, DataType::UInt16);

        if let Some(checksum) = computed {
            self.checksum = checksum;
            self.inverse_checksum = !checksum;
        }

        let mut result = computed.is_some();
        let mut range_valid = true;

        if !result
            && (self.start_address < image.start_address()
                || self.end_address >= image.end_address())
        {
            result = true;
            range_valid = false;
        }

        if verbose {
            if !range_valid {
                sink.log("Multipoint checksum has invalid address range");
            } else if result {
                sink.log("Multipoint checksum updated");
            } else {
                sink.log("Multipoint checksum failed to update");
            }
        }

        result
    }

    /// Recompute without mutating stored state and compare.
    ///
    /// A block whose range lies entirely below the image start covers
    /// internal ROM; it is reported correct with a distinct status
    /// message rather than failed.
    pub fn is_correct(&self, image: &MemoryImage, verbose: bool, sink: &StatusSink) -> bool {
        let num_bytes = self.end_address.wrapping_sub(self.start_address);
        let mut result = range_sum(image, self.start_address, num_bytes, DataType::UInt16)
            == Some(self.checksum);

        let mut range_valid = true;

        if !result
            && self.start_address < image.start_address()
            && self.end_address < image.start_address()
        {
            result = true;
            range_valid = false;
        }

        if verbose {
            if !result {
                sink.log("Multipoint checksum incorrect.");
            } else if range_valid {
                sink.log("Multipoint checksum OK.");
            } else {
                sink.log("Multipoint checksum address range is outside memory image.");
            }
        }

        result
    }

    /// Write only the checksum and complement words of the block.
    pub fn commit(&self, image: &mut MemoryImage) -> bool {
        image.write_int(
            self.checksum,
            DataType::UInt32,
            self.location.wrapping_add(UINT32_SIZE * 2),
        ) && image.write_int(
            self.inverse_checksum,
            DataType::UInt32,
            self.location.wrapping_add(UINT32_SIZE * 3),
        )
    }
}

#[path = "tests/multipoint_tests.rs"]
#[cfg(test)]
mod tests;
