//! Vehicle data models
//!
//! This module contains the core data types for resolution:
//! - `types` - The `NOT_AVAILABLE` sentinel and `TrimSource`
//! - `trim` - Trim options and their specs (TrimOption, TrimSpecs, SpecField)
//! - `vehicle` - Decode snapshots handed to callers (VehicleData, VinDecodeResult)
//! - `raw` - Tagged per-source raw trim shapes and their normalization

mod raw;
mod trim;
mod types;
mod vehicle;

pub use raw::{
    RawTrim, RawTrimFromBackend, RawTrimFromPatternApi, RawTrimFromStructuredApi,
    RawTrimFromTopLevel, VinDecodePayload,
};
pub use trim::{SpecField, TrimOption, TrimSpecs};
pub use types::{TrimSource, NOT_AVAILABLE};
pub use vehicle::{VehicleData, VinDecodeResult};
