//! Session-scoped caching of resolved specs.

mod spec_cache;

pub use spec_cache::{SpecCache, SpecKey};
