//! Low-level building blocks for the ECU flasher: the typed accessor
//! over a firmware image, raw data types and hex literal helpers,
//! calibration conversions, and the structured status-event sink.

pub mod data;
pub mod image;
pub mod status;

pub use data::{
    DataType, clamped_offset, clamped_scale, corrected_from_raw, format_hex, parse_hex,
    raw_from_corrected,
};
pub use image::MemoryImage;
pub use status::{StatusLevel, StatusMessage, StatusSink};
