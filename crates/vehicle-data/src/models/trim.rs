use serde::{Deserialize, Serialize};

use super::types::{TrimSource, NOT_AVAILABLE};

/// One of the independently resolved spec fields.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SpecField {
    Engine,
    Transmission,
    Drivetrain,
    BodyStyle,
}

impl SpecField {
    pub const ALL: [SpecField; 4] = [
        SpecField::Engine,
        SpecField::Transmission,
        SpecField::Drivetrain,
        SpecField::BodyStyle,
    ];
}

/// Engine, transmission, drivetrain and body style of a trim.
///
/// Each field is either a resolved value, the empty string (unresolved), or
/// [`NOT_AVAILABLE`] (resolution attempted and exhausted).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimSpecs {
    #[serde(default)]
    pub engine: String,

    #[serde(default)]
    pub transmission: String,

    #[serde(default)]
    pub drivetrain: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body_style: String,
}

impl TrimSpecs {
    /// Create specs from the three core fields.
    pub fn new(
        engine: impl Into<String>,
        transmission: impl Into<String>,
        drivetrain: impl Into<String>,
    ) -> Self {
        Self {
            engine: engine.into(),
            transmission: transmission.into(),
            drivetrain: drivetrain.into(),
            body_style: String::new(),
        }
    }

    /// Builder-style body style setter.
    pub fn with_body_style(mut self, body_style: impl Into<String>) -> Self {
        self.body_style = body_style.into();
        self
    }

    pub fn get(&self, field: SpecField) -> &str {
        match field {
            SpecField::Engine => &self.engine,
            SpecField::Transmission => &self.transmission,
            SpecField::Drivetrain => &self.drivetrain,
            SpecField::BodyStyle => &self.body_style,
        }
    }

    pub fn set(&mut self, field: SpecField, value: String) {
        match field {
            SpecField::Engine => self.engine = value,
            SpecField::Transmission => self.transmission = value,
            SpecField::Drivetrain => self.drivetrain = value,
            SpecField::BodyStyle => self.body_style = value,
        }
    }

    /// The field value if it carries real data.
    ///
    /// Empty strings and the sentinel both count as "no value".
    pub fn usable(&self, field: SpecField) -> Option<&str> {
        let value = self.get(field).trim();
        if value.is_empty() || value == NOT_AVAILABLE {
            None
        } else {
            Some(value)
        }
    }

    /// True when no field carries real data.
    pub fn is_empty(&self) -> bool {
        SpecField::ALL.iter().all(|f| self.usable(*f).is_none())
    }

    /// Fill unusable fields from `other`, keeping our own values first.
    pub fn or_fill(mut self, other: &TrimSpecs) -> Self {
        for field in SpecField::ALL {
            if self.usable(field).is_none() {
                if let Some(value) = other.usable(field) {
                    self.set(field, value.to_string());
                }
            }
        }
        self
    }
}

/// A selectable trim with whatever specs its source carried.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimOption {
    /// Canonical short trim label
    pub name: String,

    /// Raw source string the name was derived from
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub specs: TrimSpecs,

    #[serde(default)]
    pub year: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<TrimSource>,
}

impl TrimOption {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_specs(mut self, specs: TrimSpecs) -> Self {
        self.specs = specs;
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_source(mut self, source: TrimSource) -> Self {
        self.source = Some(source);
        self
    }
}
