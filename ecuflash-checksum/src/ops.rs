//! Validate and correct operations over one firmware buffer.
//!
//! Both operations own the raw bytes for their whole lifetime: detect
//! the checksums, bind them to a [`MemoryImage`] at the detected base,
//! then walk them. `run` executes synchronously on the caller's thread;
//! `spawn` moves the operation onto a blocking tokio task and hands the
//! completed operation back through the join handle.

use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;
use tokio::task::JoinHandle;

use ecuflash_core::{MemoryImage, StatusSink};

use crate::detect::{ChecksumDetection, DetectedChecksums, detect_checksums};
use crate::variant::ChecksumVariant;

/// Lifecycle of an operation. No cancellation, no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    NotStarted,
    Running,
    Completed { success: bool },
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("no checksums detected in image")]
    DetectionFailed,
    #[error("corrected {corrected} of {total} checksums")]
    PartialCorrection { total: u32, corrected: u32 },
    #[error("checksum still incorrect after correction")]
    VerificationFailed,
}

/// Detect the checksums and bind each one to a fresh image over the
/// buffer at the detected base address. Loads stored values as part of
/// binding.
fn bind_checksums(
    detector: &dyn ChecksumDetection,
    buffer: &[u8],
    sink: &StatusSink,
) -> Option<(MemoryImage, Vec<ChecksumVariant>)> {
    let DetectedChecksums {
        base_address,
        mut checksums,
    } = match detect_checksums(detector, buffer) {
        Some(detected) => detected,
        None => {
            warn!("{}", OperationError::DetectionFailed);
            sink.log("Unable to detect checksums in memory image");
            return None;
        }
    };

    debug!(
        "detected {} checksums, base address 0x{:X}",
        checksums.len(),
        base_address
    );

    let image = MemoryImage::new(buffer.to_vec(), base_address);

    for checksum in &mut checksums {
        if !checksum.load(&image) {
            warn!("failed to load stored {}", checksum.name());
        }
    }

    Some((image, checksums))
}

/// Checks every detected checksum without touching the buffer.
pub struct ValidateChecksumsOperation {
    buffer: Vec<u8>,
    detector: Arc<dyn ChecksumDetection>,
    sink: StatusSink,
    state: OperationState,
    num_checksums: u32,
    num_incorrect: u32,
}

impl ValidateChecksumsOperation {
    pub fn new(buffer: Vec<u8>, detector: Arc<dyn ChecksumDetection>, sink: StatusSink) -> Self {
        Self {
            buffer,
            detector,
            sink,
            state: OperationState::NotStarted,
            num_checksums: 0,
            num_incorrect: 0,
        }
    }

    pub fn state(&self) -> OperationState {
        self.state
    }

    pub fn num_checksums(&self) -> u32 {
        self.num_checksums
    }

    pub fn num_incorrect(&self) -> u32 {
        self.num_incorrect
    }

    /// Whether every detected checksum verified. `false` until a run
    /// has completed successfully.
    pub fn checksums_correct(&self) -> bool {
        matches!(self.state, OperationState::Completed { success: true })
            && self.num_incorrect == 0
    }

    /// Recover the buffer, unchanged by this operation.
    pub fn into_image(self) -> Vec<u8> {
        self.buffer
    }

    /// Detect and check every checksum. Succeeds whenever detection
    /// does, regardless of the individual verdicts.
    pub fn run(&mut self) -> bool {
        self.state = OperationState::Running;
        self.num_checksums = 0;
        self.num_incorrect = 0;

        let (image, checksums) = match bind_checksums(&*self.detector, &self.buffer, &self.sink) {
            Some(bound) => bound,
            None => {
                self.state = OperationState::Completed { success: false };
                return false;
            }
        };

        self.num_checksums = checksums.len() as u32;

        for checksum in &checksums {
            if !checksum.is_correct(&image, false, &self.sink) {
                self.num_incorrect += 1;
            }
        }

        if self.num_incorrect == 0 {
            info!("all {} checksums correct", self.num_checksums);
        } else {
            info!(
                "{} of {} checksums incorrect",
                self.num_incorrect, self.num_checksums
            );
        }

        self.state = OperationState::Completed { success: true };
        true
    }

    /// Run on a blocking tokio task, yielding the completed operation.
    pub fn spawn(mut self) -> JoinHandle<Self> {
        tokio::task::spawn_blocking(move || {
            self.run();
            self
        })
    }
}

/// Recomputes and commits every detected checksum, then re-verifies.
pub struct CorrectChecksumsOperation {
    buffer: Vec<u8>,
    detector: Arc<dyn ChecksumDetection>,
    sink: StatusSink,
    state: OperationState,
    num_checksums: u32,
    num_corrected: u32,
}

impl CorrectChecksumsOperation {
    pub fn new(buffer: Vec<u8>, detector: Arc<dyn ChecksumDetection>, sink: StatusSink) -> Self {
        Self {
            buffer,
            detector,
            sink,
            state: OperationState::NotStarted,
            num_checksums: 0,
            num_corrected: 0,
        }
    }

    pub fn state(&self) -> OperationState {
        self.state
    }

    pub fn num_checksums(&self) -> u32 {
        self.num_checksums
    }

    pub fn num_corrected(&self) -> u32 {
        self.num_corrected
    }

    /// Recover the buffer with whatever corrections stuck. There is no
    /// rollback, a failed run may leave it partially corrected.
    pub fn into_image(self) -> Vec<u8> {
        self.buffer
    }

    /// Detect, recompute and commit every checksum, then verify the
    /// result. Fails if detection misses, any checksum fails to
    /// update or commit, or any re-check still reports incorrect.
    pub fn run(&mut self) -> bool {
        self.state = OperationState::Running;
        self.num_checksums = 0;
        self.num_corrected = 0;

        let (mut image, mut checksums) =
            match bind_checksums(&*self.detector, &self.buffer, &self.sink) {
                Some(bound) => bound,
                None => {
                    self.state = OperationState::Completed { success: false };
                    return false;
                }
            };

        self.num_checksums = checksums.len() as u32;

        for checksum in &mut checksums {
            if checksum.update(&image, true, &self.sink) && checksum.commit(&mut image) {
                self.num_corrected += 1;
            } else {
                self.sink
                    .log(format!("Failed to correct {}", checksum.name()));
            }
        }

        let mut success = self.num_corrected == self.num_checksums;

        if !success {
            warn!(
                "{}",
                OperationError::PartialCorrection {
                    total: self.num_checksums,
                    corrected: self.num_corrected,
                }
            );
        } else {
            for checksum in &checksums {
                if !checksum.is_correct(&image, false, &self.sink) {
                    warn!("{}", OperationError::VerificationFailed);
                    success = false;
                    break;
                }
            }
        }

        self.buffer = image.into_bytes();
        self.state = OperationState::Completed { success };
        success
    }

    /// Run on a blocking tokio task, yielding the completed operation.
    pub fn spawn(mut self) -> JoinHandle<Self> {
        tokio::task::spawn_blocking(move || {
            self.run();
            self
        })
    }
}

#[path = "tests/ops_tests.rs"]
#[cfg(test)]
mod tests;
