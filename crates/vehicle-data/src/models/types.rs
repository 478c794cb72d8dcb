use std::fmt;

use serde::{Deserialize, Serialize};

/// Literal marking a field whose resolution was attempted and exhausted.
pub const NOT_AVAILABLE: &str = "Not Available";

/// Where a trim option came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimSource {
    /// In-process hand-curated trim table
    Local,
    /// Structured vehicle-data API
    Structured,
    /// Aggregated VIN-pattern decodes
    Pattern,
    /// Trim list carried on a backend VIN decode payload
    Backend,
    /// Synthesized from top-level make/model/trim strings
    TopLevel,
    /// Generic last-resort trim list
    Generic,
}

impl fmt::Display for TrimSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Structured => write!(f, "structured"),
            Self::Pattern => write!(f, "pattern"),
            Self::Backend => write!(f, "backend"),
            Self::TopLevel => write!(f, "top_level"),
            Self::Generic => write!(f, "generic"),
        }
    }
}
