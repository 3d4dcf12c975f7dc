//! Checksum engine for ECU firmware images.
//!
//! Bosch-style firmware carries several overlapping checksum
//! structures: a main checksum over two large ranges, a multi range
//! checksum, a set of fixed-size multipoint blocks, and seed-table
//! rolling checksums. Each variant follows the same lifecycle (load the
//! stored values, update from the image contents, verify, commit) and
//! all of them are driven together by the validate/correct operations.

pub mod detect;
pub mod kernel;
pub mod layout;
pub mod main_checksum;
pub mod multipoint;
pub mod multirange;
pub mod ops;
pub mod range;
pub mod rolling;
pub mod variant;

pub use detect::{ChecksumDetection, DetectedChecksums, detect_checksums};
pub use layout::{ChecksumLayout, LayoutError};
pub use main_checksum::MainChecksum;
pub use multipoint::MultipointChecksum;
pub use multirange::MultiRangeChecksum;
pub use ops::{
    CorrectChecksumsOperation, OperationError, OperationState, ValidateChecksumsOperation,
};
pub use range::AddressRange;
pub use rolling::RollingChecksums;
pub use variant::ChecksumVariant;
