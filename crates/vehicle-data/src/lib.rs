//! DealerBid Vehicle Data Crate
//!
//! Vehicle identity and spec resolution for bid requests: given a VIN or a
//! manually chosen year/make/model/trim, produce a de-duplicated list of
//! trim options and engine/transmission/drivetrain/body-style specs from
//! several unreliable, inconsistently shaped sources.
//!
//! # Overview
//!
//! The crate supports:
//! - VIN decoding through a backend endpoint, with soft failure to manual entry
//! - Trim lookup: local catalog, structured API, VIN-pattern decodes, generic list
//! - Per-field spec resolution with an explicit priority chain
//! - Session-scoped caching of resolved specs
//!
//! # Architecture
//!
//! ```text
//!   VIN                              year / make / model
//!    |                                        |
//!    v                                        v
//! +-------------------+            +----------------------+
//! | VinDecodeBackend  |            | Local catalog        |
//! +-------------------+            | StructuredTrimSource |
//!    |                             | PatternDecodeAdapter |
//!    |                             | generic trims        |
//!    |                             +----------------------+
//!    v                                        |
//! +-------------------+                       |
//! |    Normalizer     | <---------------------+
//! +-------------------+
//!    |
//!    v
//! +-------------------+      +-------------+
//! |   SpecResolver    | <--> |  SpecCache  |
//! +-------------------+      +-------------+
//! ```
//!
//! # Core Types
//!
//! - [`VehicleDataService`] - The outward operations
//! - [`VehicleData`] / [`VinDecodeResult`] - Decode snapshots
//! - [`TrimOption`] / [`TrimSpecs`] - Trims and their specs
//! - [`SpecResolver`] / [`ResolvedSpecs`] - Per-field resolution with origins
//! - [`VehicleDataError`] - Failures, classified by [`ErrorClass`]

pub mod cache;
pub mod catalog;
pub mod errors;
pub mod models;
pub mod normalizer;
pub mod parser;
pub mod provider;
pub mod resolver;
pub mod vin;

mod service;

// Re-export all public types from models
pub use models::{
    RawTrim, RawTrimFromBackend, RawTrimFromPatternApi, RawTrimFromStructuredApi,
    RawTrimFromTopLevel, SpecField, TrimOption, TrimSource, TrimSpecs, VehicleData,
    VinDecodePayload, VinDecodeResult, NOT_AVAILABLE,
};

pub use errors::{ErrorClass, VehicleDataError};

pub use cache::{SpecCache, SpecKey};

pub use normalizer::{deduplicate_trims, get_display_trim, get_display_value, normalize_trim_name};

pub use resolver::{FieldOrigins, ResolvedSpecs, SpecOrigin, SpecRequest, SpecResolver};

// Re-export provider types
pub use provider::backend::BackendVinDecoder;
pub use provider::carapi::CarApiProvider;
pub use provider::nhtsa::NhtsaProvider;
pub use provider::{PatternDecodeAdapter, StructuredTrimSource, VinDecodeBackend, VinPatternSource};

pub use service::{
    ResolverConfig, VehicleDataService, DEFAULT_GENERIC_TRIMS, DEFAULT_MAX_PATTERN_EXEMPLARS,
};
