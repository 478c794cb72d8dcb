//! External API adapters.
//!
//! This module contains:
//! - One trait per external collaborator (`VinDecodeBackend`,
//!   `StructuredTrimSource`, `VinPatternSource`)
//! - Their HTTP implementations (backend decoder, CarAPI, NHTSA vPIC)
//! - `PatternDecodeAdapter`, which turns a `VinPatternSource` into a trim
//!   source by decoding exemplar VINs
//!
//! Every adapter returns trims already passed through the normalizer.
//! Failures are reported as `VehicleDataError` values and never abort the
//! fallback chain on their own.

mod pattern;
mod traits;

pub mod backend;
pub mod carapi;
pub mod nhtsa;

// Re-exports
pub use pattern::PatternDecodeAdapter;
pub use traits::{StructuredTrimSource, VinDecodeBackend, VinPatternSource};
