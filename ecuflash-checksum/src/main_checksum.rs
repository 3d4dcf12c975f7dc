//! The main checksum: one checksum over a table of address ranges that
//! is itself stored in the image.

use ecuflash_core::{DataType, MemoryImage, StatusSink};

use crate::kernel::{range_sum, read_u32};

const UINT32_SIZE: u32 = 4;

/// The image-wide main checksum.
///
/// `address_location` points at `num_ranges` (start, end) `u32` pairs
/// (8-byte stride); `checksum_location` points at the checksum and its
/// bitwise complement (2×`u32`). The ranges are loaded from the image,
/// then summed at 16-bit word granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainChecksum {
    address_location: u32,
    checksum_location: u32,
    start_addresses: Vec<u32>,
    end_addresses: Vec<u32>,
    checksum: u32,
    inverse_checksum: u32,
}

impl MainChecksum {
    pub fn new(address_location: u32, checksum_location: u32, num_ranges: u32) -> Self {
        Self {
            address_location,
            checksum_location,
            start_addresses: vec![0; num_ranges as usize],
            end_addresses: vec![0; num_ranges as usize],
            checksum: 0,
            inverse_checksum: 0,
        }
    }

    pub fn address_location(&self) -> u32 {
        self.address_location
    }

    pub fn checksum_location(&self) -> u32 {
        self.checksum_location
    }

    pub fn num_ranges(&self) -> u32 {
        self.start_addresses.len() as u32
    }

    /// Change the number of ranges, reallocating the start/end tables.
    pub fn set_num_ranges(&mut self, num_ranges: u32) {
        self.start_addresses = vec![0; num_ranges as usize];
        self.end_addresses = vec![0; num_ranges as usize];
    }

    /// Checksum value currently held in memory (loaded or recomputed).
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn inverse_checksum(&self) -> u32 {
        self.inverse_checksum
    }

    /// Read the stored checksum pair and the range table from the image.
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

        for index in 0..self.start_addresses.len() {
            let entry = self
                .address_location
                .wrapping_add((UINT32_SIZE * 2).wrapping_mul(index as u32));
            ok &= read_u32(image, entry, &mut self.start_addresses[index]);
            ok &= read_u32(
                image,
                entry.wrapping_add(UINT32_SIZE),
                &mut self.end_addresses[index],
            );
        }

        ok
    }

    /// Recompute the checksum over all loaded ranges; does not commit.
    pub fn update(&mut self, image: &MemoryImage, verbose: bool, sink: &StatusSink) -> bool {
        match self.compute(image) {
            Some(checksum) => {
                self.checksum = checksum;
                self.inverse_checksum = !checksum;
                if verbose {
                    sink.log("Main checksum updated");
                }
                true
            }
            None => {
                if verbose {
                    sink.log("Main checksum failed to update");
                }
                false
            }
        }
    }

    /// Recompute without mutating stored state and compare.
    pub fn is_correct(&self, image: &MemoryImage, verbose: bool, sink: &StatusSink) -> bool {
        let correct = self.compute(image) == Some(self.checksum);

        if verbose {
            if correct {
                sink.log("Main checksum OK");
            } else {
                sink.log("Main checksum incorrect");
            }
        }

        correct
    }

    /// Write the in-memory checksum pair back to the image.
    pub fn commit(&self, image: &mut MemoryImage) -> bool {
        if image.size() == 0 {
            return false;
        }

        image.write_int(self.checksum, DataType::UInt32, self.checksum_location)
            && image.write_int(
                self.inverse_checksum,
                DataType::UInt32,
                self.checksum_location.wrapping_add(UINT32_SIZE),
            )
    }

    /// 16-bit word sum of every `[start, end)` range, wrapping-summed.
    fn compute(&self, image: &MemoryImage) -> Option<u32> {
        let mut checksum = 0u32;

        for (start, end) in self.start_addresses.iter().zip(&self.end_addresses) {
            let num_bytes = end.wrapping_sub(*start);
            let range = range_sum(image, *start, num_bytes, DataType::UInt16)?;
            checksum = checksum.wrapping_add(range);
        }

        Some(checksum)
    }
}

#[path = "tests/main_checksum_tests.rs"]
#[cfg(test)]
mod tests;
