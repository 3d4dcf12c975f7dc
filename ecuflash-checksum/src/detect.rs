//! Detection contract and aggregation.
//!
//! Locating checksum structures in unknown firmware is the hosting
//! application's business; this module only defines the trait it
//! implements and the all-or-nothing aggregation over it.

use log::debug;

use crate::main_checksum::MainChecksum;
use crate::multipoint::MultipointChecksum;
use crate::multirange::MultiRangeChecksum;
use crate::rolling::RollingChecksums;
use crate::variant::ChecksumVariant;

/// Locates checksum structures in a raw firmware buffer.
///
/// Every method takes the raw bytes and returns `None` when the
/// corresponding structure cannot be found.
pub trait ChecksumDetection: Send + Sync {
    /// Combined rolling + multi range detection. `Some` means the scan
    /// itself succeeded; either slot may still be absent.
    fn detect_rolling_and_multi_range(
        &self,
        buffer: &[u8],
    ) -> Option<(Option<RollingChecksums>, Option<MultiRangeChecksum>)>;

    /// Standalone multi range detection, used as a fallback when the
    /// combined scan finds nothing.
    fn detect_multi_range(&self, buffer: &[u8]) -> Option<MultiRangeChecksum>;

    fn detect_main(&self, buffer: &[u8]) -> Option<MainChecksum>;

    /// Multipoint block detection. Returns the image base address the
    /// blocks were resolved against along with the blocks themselves.
    fn detect_multipoint(&self, buffer: &[u8]) -> Option<(u32, Vec<MultipointChecksum>)>;
}

/// Everything detection found in one buffer.
#[derive(Debug)]
pub struct DetectedChecksums {
    /// Base address the checksum addresses are relative to.
    pub base_address: u32,
    /// Multi range (if present), rolling (if present), main, then the
    /// multipoint blocks.
    pub checksums: Vec<ChecksumVariant>,
}

impl DetectedChecksums {
    pub fn num_checksums(&self) -> u32 {
        self.checksums.len() as u32
    }
}

/// Run every detector over the buffer. All three categories (rolling or
/// multi range, main, multipoint) are required; any miss discards the
/// partial results.
pub fn detect_checksums(
    detector: &dyn ChecksumDetection,
    buffer: &[u8],
) -> Option<DetectedChecksums> {
    if buffer.is_empty() {
        debug!("checksum detection on empty buffer");
        return None;
    }

    let mut ok = true;
    let mut checksums = Vec::new();

    let (rolling, multi_range) = match detector.detect_rolling_and_multi_range(buffer) {
        Some(found) => found,
        None => (None, detector.detect_multi_range(buffer)),
    };

    if let Some(multi_range) = multi_range {
        checksums.push(ChecksumVariant::MultiRange(multi_range));
    }
    if let Some(rolling) = rolling {
        checksums.push(ChecksumVariant::Rolling(rolling));
    }
    if checksums.is_empty() {
        debug!("no rolling or multi range checksum found");
        ok = false;
    }

    match detector.detect_main(buffer) {
        Some(main) => checksums.push(ChecksumVariant::Main(main)),
        None => {
            debug!("no main checksum found");
            ok = false;
        }
    }

    let mut base_address = 0;
    match detector.detect_multipoint(buffer) {
        Some((base, blocks)) => {
            base_address = base;
            checksums.extend(blocks.into_iter().map(ChecksumVariant::Multipoint));
        }
        None => {
            debug!("no multipoint checksum blocks found");
            ok = false;
        }
    }

    if !ok {
        return None;
    }

    Some(DetectedChecksums {
        base_address,
        checksums,
    })
}

#[path = "tests/detect_tests.rs"]
#[cfg(test)]
mod tests;
