//! The two low-level reducers every checksum variant is built on.
//!
//! Both operate on absolute addresses through the bounds-checked
//! [`MemoryImage`] accessor; a single failed read fails the whole
//! reduction. Unsigned wraparound in the accumulators is intentional,
//! it is part of the checksum's value space on the ECU.

use ecuflash_core::{DataType, MemoryImage};

/// Additive sum over one address range at 8- or 16-bit granularity.
///
/// Reads successive values of `granularity` width from `start_address`
/// and folds them into a wrapping 32-bit accumulator. Returns `None` for
/// an empty range or on any out-of-bounds read.
pub fn range_sum(
    image: &MemoryImage,
    start_address: u32,
    num_bytes: u32,
    granularity: DataType,
) -> Option<u32> {
    if num_bytes == 0 {
        return None;
    }

    let step = granularity.size() as u64;
    let end = start_address as u64 + num_bytes as u64;

    let mut checksum = 0u32;
    let mut address = start_address as u64;

    while address < end {
        let addr32 = u32::try_from(address).ok()?;
        let value = image.read_int(granularity, addr32)?;
        checksum = checksum.wrapping_add(value);
        address += step;
    }

    Some(checksum)
}

/// Seed-table rolling reducer, the primitive behind the rolling/chained
/// checksum.
///
/// For each byte `b` of the range, in ascending address order:
/// the low accumulator byte selects a 32-bit seed from the table at
/// `seed_address` (`index = b ^ (acc & 0xFF)`, entries 4 bytes apart),
/// then `acc = (acc >> 8) ^ seed`. The accumulator is carried in `acc`
/// so callers can chain ranges.
///
/// Requires a non-empty range smaller than the image and a seed table
/// that starts inside it; returns `false` on any failed read, leaving
/// `acc` at whatever point the mixing reached.
pub fn rolling_sum(
    image: &MemoryImage,
    start_address: u32,
    num_bytes: u32,
    seed_address: u32,
    acc: &mut u32,
) -> bool {
    if num_bytes == 0 || num_bytes >= image.size() || seed_address >= image.end_address() {
        return false;
    }

    let end = start_address as u64 + num_bytes as u64;
    let mut address = start_address as u64;

    while address < end {
        let Ok(addr32) = u32::try_from(address) else {
            return false;
        };
        let Some(byte) = image.read_int(DataType::UInt8, addr32) else {
            return false;
        };

        let index = (byte ^ (*acc & 0xFF)) << 2;
        let Some(seed) = image.read_int(DataType::UInt32, seed_address.wrapping_add(index))
        else {
            return false;
        };

        *acc >>= 8;
        *acc ^= seed;

        address += 1;
    }

    true
}

/// Read a `u32` into an out slot, leaving the slot untouched on a
/// failed read. Lets callers accumulate success across several stored
/// fields the way the variants' load paths do.
pub(crate) fn read_u32(image: &MemoryImage, address: u32, out: &mut u32) -> bool {
    match image.read_int(DataType::UInt32, address) {
        Some(value) => {
            *out = value;
            true
        }
        None => false,
    }
}
