//! Checksum layout configuration.
//!
//! Describes where a firmware family keeps its checksum structures.
//! This is hosting-shell configuration (typically deserialized from a
//! definition file); the engine itself never consults it, validation
//! only gates whether a layout is accepted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::range::AddressRange;

/// Where the checksum structures live for one firmware family.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChecksumLayout {
    /// Base address of the memory image.
    pub base_address: u32,
    /// Address of the main checksum value pair.
    pub main_checksum_address: u32,
    /// Address of the main checksum's range block.
    pub main_block_address: u32,
    /// Start address of the multipoint checksum blocks.
    pub multipoint_blocks_address: u32,
    /// Number of multipoint checksum blocks.
    pub num_multipoint_blocks: u32,
    /// Address of the rolling checksum seed table.
    pub rolling_seed_address: u32,
    /// Start address of the rolling checksum storage blocks.
    pub rolling_blocks_address: u32,
    /// Ranges covered by the rolling checksums.
    pub rolling_ranges: Vec<AddressRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{field} 0x{address:X} is not word aligned")]
    UnalignedAddress { field: &'static str, address: u32 },
    #[error("number of multipoint checksum blocks must be nonzero")]
    NoMultipointBlocks,
    #[error("at least one rolling checksum range is required")]
    NoRollingRanges,
}

impl ChecksumLayout {
    /// Check every field, returning all problems rather than the first.
    /// An empty result means the layout is acceptable.
    pub fn validate(&self) -> Vec<LayoutError> {
        let mut errors = Vec::new();

        let addresses = [
            ("base address", self.base_address),
            ("main checksum address", self.main_checksum_address),
            ("main checksum block address", self.main_block_address),
            ("multipoint blocks address", self.multipoint_blocks_address),
            ("rolling seed address", self.rolling_seed_address),
            ("rolling blocks address", self.rolling_blocks_address),
        ];
        for (field, address) in addresses {
            if address % 2 != 0 {
                errors.push(LayoutError::UnalignedAddress { field, address });
            }
        }

        if self.num_multipoint_blocks == 0 {
            errors.push(LayoutError::NoMultipointBlocks);
        }

        if self.rolling_ranges.is_empty() {
            errors.push(LayoutError::NoRollingRanges);
        }

        errors
    }
}
