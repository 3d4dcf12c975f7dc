//! Closed set of checksum variants behind one dispatch type.

use ecuflash_core::{MemoryImage, StatusSink};

use crate::main_checksum::MainChecksum;
use crate::multipoint::MultipointChecksum;
use crate::multirange::MultiRangeChecksum;
use crate::rolling::RollingChecksums;

/// Any of the checksum kinds found in an image, exposing the common
/// load/update/is_correct/commit lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ChecksumVariant {
    Main(MainChecksum),
    MultiRange(MultiRangeChecksum),
    Multipoint(MultipointChecksum),
    Rolling(RollingChecksums),
}

impl ChecksumVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Main(_) => "main checksum",
            Self::MultiRange(_) => "multi range checksum",
            Self::Multipoint(_) => "multipoint checksum",
            Self::Rolling(_) => "rolling checksum",
        }
    }

    /// Read the stored value(s) from the image.
    pub fn load(&mut self, image: &MemoryImage) -> bool {
        match self {
            Self::Main(c) => c.load(image),
            Self::MultiRange(c) => c.load(image),
            Self::Multipoint(c) => c.load(image),
            Self::Rolling(c) => c.load(image),
        }
    }

    /// Recompute the value(s) from the image contents.
    pub fn update(&mut self, image: &MemoryImage, verbose: bool, sink: &StatusSink) -> bool {
        match self {
            Self::Main(c) => c.update(image, verbose, sink),
            Self::MultiRange(c) => c.update(image, verbose, sink),
            Self::Multipoint(c) => c.update(image, verbose, sink),
            Self::Rolling(c) => c.update(image, verbose, sink),
        }
    }

    /// Recompute and compare against the stored value(s).
    pub fn is_correct(&self, image: &MemoryImage, verbose: bool, sink: &StatusSink) -> bool {
        match self {
            Self::Main(c) => c.is_correct(image, verbose, sink),
            Self::MultiRange(c) => c.is_correct(image, verbose, sink),
            Self::Multipoint(c) => c.is_correct(image, verbose, sink),
            Self::Rolling(c) => c.is_correct(image, verbose, sink),
        }
    }

    /// Write the in-memory value(s) back to the image.
    pub fn commit(&self, image: &mut MemoryImage) -> bool {
        match self {
            Self::Main(c) => c.commit(image),
            Self::MultiRange(c) => c.commit(image),
            Self::Multipoint(c) => c.commit(image),
            Self::Rolling(c) => c.commit(image),
        }
    }
}

impl From<MainChecksum> for ChecksumVariant {
    fn from(c: MainChecksum) -> Self {
        Self::Main(c)
    }
}

impl From<MultiRangeChecksum> for ChecksumVariant {
    fn from(c: MultiRangeChecksum) -> Self {
        Self::MultiRange(c)
    }
}

impl From<MultipointChecksum> for ChecksumVariant {
    fn from(c: MultipointChecksum) -> Self {
        Self::Multipoint(c)
    }
}

impl From<RollingChecksums> for ChecksumVariant {
    fn from(c: RollingChecksums) -> Self {
        Self::Rolling(c)
    }
}
