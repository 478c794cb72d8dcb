//! Error types and failure classification for the vehicle data crate.
//!
//! This module provides:
//! - [`VehicleDataError`]: The main error enum for all resolution operations
//! - [`ErrorClass`]: Classification deciding whether a fallback chain continues

mod class;

pub use class::ErrorClass;

use thiserror::Error;

/// Errors that can occur while decoding VINs or fetching trims and specs.
///
/// Each variant is classified into an [`ErrorClass`] via the
/// [`class`](Self::class) method. Only [`ErrorClass::InvalidInput`] is ever
/// surfaced to callers; the source classes are absorbed by the fallback chain.
#[derive(Error, Debug)]
pub enum VehicleDataError {
    /// The VIN is not exactly 17 characters.
    /// Rejected before any I/O.
    #[error("invalid VIN length")]
    InvalidVinLength {
        /// Length of the rejected input, in characters
        length: usize,
    },

    /// The decode backend does not know this VIN.
    /// A normal business outcome: the caller falls back to manual entry.
    #[error("VIN not found")]
    VinNotFound(String),

    /// The source answered but had no usable records.
    #[error("No data from {provider}")]
    NoData {
        /// The source that came back empty
        provider: String,
    },

    /// The request to the source timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The source that timed out
        provider: String,
    },

    /// A source-specific failure (bad status, unparseable body, error payload).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The source that returned the error
        provider: String,
        /// The error message from the source
        message: String,
    },

    /// A network error occurred while communicating with a source.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl VehicleDataError {
    /// Returns the failure classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use dealerbid_vehicle_data::errors::{ErrorClass, VehicleDataError};
    ///
    /// let error = VehicleDataError::InvalidVinLength { length: 5 };
    /// assert_eq!(error.class(), ErrorClass::InvalidInput);
    ///
    /// let error = VehicleDataError::Timeout { provider: "NHTSA".to_string() };
    /// assert_eq!(error.class(), ErrorClass::SourceUnreachable);
    /// ```
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidVinLength { .. } => ErrorClass::InvalidInput,

            // The source answered, just not with anything we can use
            Self::VinNotFound(_) | Self::NoData { .. } => ErrorClass::SourceEmpty,

            Self::Timeout { .. } | Self::ProviderError { .. } | Self::Network(_) => {
                ErrorClass::SourceUnreachable
            }
        }
    }

    /// Build a `NoData` error for a source.
    pub(crate) fn no_data(provider: &str) -> Self {
        Self::NoData {
            provider: provider.to_string(),
        }
    }

    /// Map a transport failure, keeping timeouts distinct.
    pub(crate) fn from_transport(provider: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::Network(error)
        }
    }
}
