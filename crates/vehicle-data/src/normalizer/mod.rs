//! Trim name canonicalization, de-duplication and display formatting.
//!
//! Every trim list returned by this crate passes through
//! [`deduplicate_trims`], so within one list no two entries share a
//! canonical name.

mod dedup;
mod display;
mod trim_name;

pub use dedup::{deduplicate_trims, resolve_alias, trim_key};
pub use display::{clean_description, get_display_trim, get_display_value, UNKNOWN_TRIM_LABEL};
pub use trim_name::{
    find_meaningful_token, is_generic_trim_name, normalize_trim_name, FALLBACK_TRIM_NAME,
};
