//! Rolling (seed-table) checksums over ordered groups of address
//! ranges, optionally chained through one running accumulator.

use ecuflash_core::{DataType, MemoryImage, StatusSink};

use crate::kernel::{read_u32, rolling_sum};
use crate::range::AddressRange;

/// Accumulator seed for every fresh rolling computation.
const ACCUMULATOR_SEED: u32 = 0xFFFF_FFFF;

/// One group: an ordered run of ranges with one stored checksum word.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChecksumGroup {
    ranges: Vec<AddressRange>,
    checksum_address: u32,
}

/// The rolling/chained checksum set.
///
/// Each group mixes its ranges into a 32-bit accumulator through the
/// seed table at `seed_address` and owns one stored checksum word. Two
/// modes: with chaining enabled (via [`enable_init_range`]) a single
/// accumulator primed by the init range is carried across all groups;
/// otherwise every group restarts from the seed value.
///
/// The words stored in the image are the bitwise complement of the live
/// accumulator: load un-complements, commit re-complements.
///
/// [`enable_init_range`]: RollingChecksums::enable_init_range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingChecksums {
    seed_address: u32,
    init_range: Option<AddressRange>,
    groups: Vec<ChecksumGroup>,
    /// Loaded (or recomputed) live accumulator value per group, in
    /// group order.
    checksums: Vec<u32>,
}

impl RollingChecksums {
    pub fn new(seed_address: u32) -> Self {
        Self {
            seed_address,
            init_range: None,
            groups: Vec::new(),
            checksums: Vec::new(),
        }
    }

    pub fn seed_address(&self) -> u32 {
        self.seed_address
    }

    /// Switch on chaining: the init range primes one accumulator that
    /// is then carried across all groups.
    pub fn enable_init_range(&mut self, start_address: u32, num_bytes: u32) {
        self.init_range = Some(AddressRange::new(start_address, num_bytes));
    }

    pub fn is_chained(&self) -> bool {
        self.init_range.is_some()
    }

    /// Append a group of ranges with the address of its stored word.
    pub fn add_group(&mut self, ranges: Vec<AddressRange>, checksum_address: u32) {
        self.groups.push(ChecksumGroup {
            ranges,
            checksum_address,
        });
    }

    pub fn num_groups(&self) -> u32 {
        self.groups.len() as u32
    }

    /// Live (un-complemented) accumulator values, one per group.
    pub fn checksums(&self) -> &[u32] {
        &self.checksums
    }

    /// Read every group's stored word and un-complement it.
    pub fn load(&mut self, image: &MemoryImage) -> bool {
        let mut ok = true;
        self.checksums.clear();

        for group in &self.groups {
            let mut stored = 0;
            ok &= read_u32(image, group.checksum_address, &mut stored);
            // Checksums are stored inverted
            self.checksums.push(!stored);
        }

        ok
    }

    /// Recompute every group's accumulator in order; does not commit.
    pub fn update(&mut self, image: &MemoryImage, verbose: bool, sink: &StatusSink) -> bool {
        self.checksums.clear();

        let mut acc = ACCUMULATOR_SEED;
        let mut ok = self.prime(image, &mut acc);

        for index in 0..self.groups.len() {
            if self.init_range.is_none() {
                acc = ACCUMULATOR_SEED;
            }

            for range in &self.groups[index].ranges {
                ok &= rolling_sum(
                    image,
                    range.start_address,
                    range.num_bytes,
                    self.seed_address,
                    &mut acc,
                );
            }

            self.checksums.push(acc);

            if !ok {
                if verbose {
                    sink.log("Rolling checksum failed to update");
                }
                return false;
            }
        }

        if verbose {
            sink.log("Rolling checksum updated");
        }

        ok
    }

    /// Recompute every group and compare against the loaded values, in
    /// order. A stale load (group/value count mismatch) is incorrect.
    pub fn is_correct(&self, image: &MemoryImage, verbose: bool, sink: &StatusSink) -> bool {
        let mut acc = ACCUMULATOR_SEED;
        let mut ok = self.prime(image, &mut acc);

        if self.groups.len() != self.checksums.len() {
            if verbose {
                sink.log("Rolling checksum incorrect");
            }
            return false;
        }

        for (group, expected) in self.groups.iter().zip(&self.checksums) {
            if self.init_range.is_none() {
                acc = ACCUMULATOR_SEED;
            }

            for range in &group.ranges {
                ok &= rolling_sum(
                    image,
                    range.start_address,
                    range.num_bytes,
                    self.seed_address,
                    &mut acc,
                );
            }

            if !ok || acc != *expected {
                if verbose {
                    sink.log("Rolling checksum incorrect");
                }
                return false;
            }
        }

        if verbose {
            sink.log("Rolling checksum OK");
        }

        ok
    }

    /// Complement every in-memory value and write it to its group's
    /// stored word.
    pub fn commit(&self, image: &mut MemoryImage) -> bool {
        if self.checksums.len() != self.groups.len() {
            return false;
        }

        let mut ok = true;

        for (group, checksum) in self.groups.iter().zip(&self.checksums) {
            // Checksums are stored inverted
            ok &= image.write_int(!checksum, DataType::UInt32, group.checksum_address);
        }

        ok
    }

    /// Run the chaining init range, if configured.
    fn prime(&self, image: &MemoryImage, acc: &mut u32) -> bool {
        match &self.init_range {
            Some(range) => rolling_sum(
                image,
                range.start_address,
                range.num_bytes,
                self.seed_address,
                acc,
            ),
            None => true,
        }
    }
}

#[path = "tests/rolling_tests.rs"]
#[cfg(test)]
mod tests;
