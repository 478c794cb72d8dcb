//! Per-field resolution order.

use std::fmt;

use serde::Serialize;

use crate::models::SpecField;

/// A step in a field's resolution chain.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecOrigin {
    /// Specs already carried by the trim option
    Embedded,
    /// Parsed from the trim's own description
    TrimDescription,
    /// Earlier resolution of the same year/make/model/trim
    Cache,
    /// Live fetch from the structured API for that exact trim
    StructuredApi,
    /// Parsed from the top-level decode description
    TopLevelDescription,
    /// Manufacturer-wide default (drivetrain only)
    ManufacturerDefault,
    /// Every source came back empty; the value is the sentinel
    #[default]
    Exhausted,
}

impl fmt::Display for SpecOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded"),
            Self::TrimDescription => write!(f, "trim_description"),
            Self::Cache => write!(f, "cache"),
            Self::StructuredApi => write!(f, "structured_api"),
            Self::TopLevelDescription => write!(f, "top_level_description"),
            Self::ManufacturerDefault => write!(f, "manufacturer_default"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

impl SpecOrigin {
    /// Whether a value from this step belongs to the trim itself and may be
    /// stored for later requests. Request-specific and fallback steps
    /// (top-level description, manufacturer default, sentinel) are redone on
    /// every request so they never outrank a later request's own sources.
    pub fn is_cacheable(self) -> bool {
        matches!(
            self,
            Self::Embedded | Self::TrimDescription | Self::Cache | Self::StructuredApi
        )
    }
}

/// Engine, transmission and body style: no manufacturer default.
pub const ENGINE_CHAIN: &[SpecOrigin] = &[
    SpecOrigin::Embedded,
    SpecOrigin::TrimDescription,
    SpecOrigin::Cache,
    SpecOrigin::StructuredApi,
    SpecOrigin::TopLevelDescription,
    SpecOrigin::Exhausted,
];

pub const TRANSMISSION_CHAIN: &[SpecOrigin] = ENGINE_CHAIN;

pub const BODY_STYLE_CHAIN: &[SpecOrigin] = ENGINE_CHAIN;

pub const DRIVETRAIN_CHAIN: &[SpecOrigin] = &[
    SpecOrigin::Embedded,
    SpecOrigin::TrimDescription,
    SpecOrigin::Cache,
    SpecOrigin::StructuredApi,
    SpecOrigin::TopLevelDescription,
    SpecOrigin::ManufacturerDefault,
    SpecOrigin::Exhausted,
];

/// The resolution chain of a field, highest priority first.
pub fn chain_for(field: SpecField) -> &'static [SpecOrigin] {
    match field {
        SpecField::Engine => ENGINE_CHAIN,
        SpecField::Transmission => TRANSMISSION_CHAIN,
        SpecField::Drivetrain => DRIVETRAIN_CHAIN,
        SpecField::BodyStyle => BODY_STYLE_CHAIN,
    }
}

/// Which step produced each field.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOrigins {
    pub engine: SpecOrigin,
    pub transmission: SpecOrigin,
    pub drivetrain: SpecOrigin,
    pub body_style: SpecOrigin,
}

impl FieldOrigins {
    pub fn get(&self, field: SpecField) -> SpecOrigin {
        match field {
            SpecField::Engine => self.engine,
            SpecField::Transmission => self.transmission,
            SpecField::Drivetrain => self.drivetrain,
            SpecField::BodyStyle => self.body_style,
        }
    }

    pub fn set(&mut self, field: SpecField, origin: SpecOrigin) {
        match field {
            SpecField::Engine => self.engine = origin,
            SpecField::Transmission => self.transmission = origin,
            SpecField::Drivetrain => self.drivetrain = origin,
            SpecField::BodyStyle => self.body_style = origin,
        }
    }
}
