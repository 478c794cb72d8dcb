//! Spec resolution for a selected trim.
//!
//! Each field walks its own ordered chain of sources and stops at the first
//! one with a usable value:
//!
//! ```text
//!  1. Embedded            specs already on the TrimOption
//!  2. TrimDescription     parsed from the trim's own description
//!  3. Cache               earlier resolution of the same key
//!  4. StructuredApi       live fetch for that exact trim
//!  5. TopLevelDescription parsed from the vehicle-level description
//!  6. ManufacturerDefault drivetrain only
//!  7. Exhausted           "Not Available"
//! ```
//!
//! The chains are `const` slices, so the priority order is data rather than
//! nested conditionals.

mod origin;
mod spec_resolver;

pub use origin::{
    chain_for, FieldOrigins, SpecOrigin, BODY_STYLE_CHAIN, DRIVETRAIN_CHAIN, ENGINE_CHAIN,
    TRANSMISSION_CHAIN,
};
pub use spec_resolver::{ResolvedSpecs, SpecRequest, SpecResolver};
