//! The multi-range checksum: ranges supplied by detection, byte-wise
//! sum, checksum and complement both verified.

use ecuflash_core::{DataType, MemoryImage, StatusSink};

use crate::kernel::{range_sum, read_u32};
use crate::range::AddressRange;

const UINT32_SIZE: u32 = 4;

/// Byte-granularity checksum over externally supplied ranges.
///
/// Unlike [`MainChecksum`](crate::MainChecksum), the ranges are not
/// stored in the image, detection hands them over. This is the only
/// variant whose verification also checks the stored complement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultiRangeChecksum {
    checksum_location: u32,
    ranges: Vec<AddressRange>,
    checksum: u32,
    inverse_checksum: u32,
}

impl MultiRangeChecksum {
    pub fn new(checksum_location: u32) -> Self {
        Self {
            checksum_location,
            ..Self::default()
        }
    }

    pub fn checksum_location(&self) -> u32 {
        self.checksum_location
    }

    pub fn add_range(&mut self, range: AddressRange) {
        self.ranges.push(range);
    }

    pub fn ranges(&self) -> &[AddressRange] {
        &self.ranges
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn inverse_checksum(&self) -> u32 {
        self.inverse_checksum
    }

    /// Read the stored checksum and complement from the image.
    pub fn load(&mut self, image: &MemoryImage) -> bool {
        if image.size() == 0 {
            return false;
        }

        let mut ok = true;
        ok &= read_u32(image, self.checksum_location, &mut self.checksum);
        ok &= read_u32(
            image,
            self.checksum_location.wrapping_add(UINT32_SIZE),
            &mut self.inverse_checksum,
        );
        ok
    }

    /// Recompute over all ranges; does not commit.
    pub fn update(&mut self, image: &MemoryImage, verbose: bool, sink: &StatusSink) -> bool {
        match self.compute(image) {
            Some(checksum) => {
                self.checksum = checksum;
                self.inverse_checksum = !checksum;
                if verbose {
                    sink.log("Multi range checksum updated");
                }
                true
            }
            None => {
                if verbose {
                    sink.log("Multi range checksum failed to update");
                }
                false
            }
        }
    }

    /// Recompute and require both the checksum and its complement to
    /// match the stored pair.
    pub fn is_correct(&self, image: &MemoryImage, verbose: bool, sink: &StatusSink) -> bool {
        let correct = match self.compute(image) {
            Some(computed) => {
                computed == self.checksum && !computed == self.inverse_checksum
            }
            None => false,
        };

        if verbose {
            if correct {
                sink.log("Multi range checksum OK");
            } else {
                sink.log("Multi range checksum incorrect");
            }
        }

        correct
    }

    /// Write the in-memory checksum pair back to the image.
    pub fn commit(&self, image: &mut MemoryImage) -> bool {
        if image.size() == 0 {
            return false;
        }

        let mut ok = true;
        ok &= image.write_int(self.checksum, DataType::UInt32, self.checksum_location);
        ok &= image.write_int(
            self.inverse_checksum,
            DataType::UInt32,
            self.checksum_location.wrapping_add(UINT32_SIZE),
        );
        ok
    }

    fn compute(&self, image: &MemoryImage) -> Option<u32> {
        let mut checksum = 0u32;

        for range in &self.ranges {
            let sum = range_sum(image, range.start_address, range.num_bytes, DataType::UInt8)?;
            checksum = checksum.wrapping_add(sum);
        }

        Some(checksum)
    }
}

#[path = "tests/multirange_tests.rs"]
#[cfg(test)]
mod tests;
