use serde::{Deserialize, Serialize};

use super::trim::TrimOption;

/// Immutable snapshot produced by a VIN decode or a manual year/make/model
/// selection. Re-decoding produces a new snapshot.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleData {
    pub year: String,
    pub make: String,
    pub model: String,

    /// Selected trim name, empty when the caller still has to choose
    pub trim: String,

    /// Rendered label for the selected trim
    pub display_trim: String,

    /// Engine description (displacement, layout, induction)
    pub engine_cylinders: String,
    pub transmission: String,
    pub drivetrain: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_style: Option<String>,

    #[serde(default)]
    pub available_trims: Vec<TrimOption>,
}

/// Outward contract of a decode attempt.
///
/// On `success == false` the caller falls back to manual entry.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VinDecodeResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<VehicleData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_to_manual: Option<bool>,
}

impl VinDecodeResult {
    pub fn decoded(data: VehicleData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            fallback_to_manual: None,
        }
    }

    pub fn failed(error: impl Into<String>, fallback_to_manual: bool) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            fallback_to_manual: Some(fallback_to_manual),
        }
    }
}
