//! Free-text spec extraction.
//!
//! Pure functions pulling engine, transmission, drivetrain and body style
//! tokens out of trim descriptions and API text fields.

mod description;

pub use description::{
    extract_body_style_from_description, extract_drivetrain_from_description,
    extract_engine_from_description, extract_transmission_from_description,
};

use crate::models::TrimSpecs;

/// Run every extractor over one description.
pub fn extract_specs_from_description(description: &str) -> TrimSpecs {
    TrimSpecs {
        engine: extract_engine_from_description(description),
        transmission: extract_transmission_from_description(description),
        drivetrain: extract_drivetrain_from_description(description),
        body_style: extract_body_style_from_description(description),
    }
}
