//! Raw trim shapes as delivered by each source, and their normalization.
//!
//! Every source has its own layout; rather than probing an untyped blob,
//! each known shape is a variant of [`RawTrim`] and a single
//! [`RawTrim::into_trim_option`] turns any of them into a [`TrimOption`].

use serde::{Deserialize, Deserializer, Serialize};

use super::trim::{TrimOption, TrimSpecs};
use super::types::TrimSource;
use crate::normalizer::{is_generic_trim_name, normalize_trim_name};
use crate::parser::{
    extract_body_style_from_description, extract_drivetrain_from_description,
    extract_transmission_from_description,
};

/// A trim record from the structured vehicle-data API.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTrimFromStructuredApi {
    pub name: Option<String>,
    pub description: Option<String>,
    pub year: Option<String>,
    /// Pre-assembled engine string, e.g. "3.5L V6"
    pub engine: Option<String>,
    pub transmission: Option<String>,
    pub drive_type: Option<String>,
    pub body_type: Option<String>,
}

/// A flat VIN-pattern decode record.
///
/// Every value arrives as a string; `"Not Applicable"` and `""` mean absent.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTrimFromPatternApi {
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub model_year: Option<String>,
    #[serde(default)]
    pub trim: Option<String>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default, rename = "DisplacementL")]
    pub displacement_l: Option<String>,
    #[serde(default)]
    pub engine_cylinders: Option<String>,
    #[serde(default)]
    pub engine_configuration: Option<String>,
    #[serde(default)]
    pub turbo: Option<String>,
    #[serde(default)]
    pub transmission_style: Option<String>,
    #[serde(default)]
    pub transmission_speeds: Option<String>,
    #[serde(default)]
    pub drive_type: Option<String>,
    #[serde(default)]
    pub fuel_type_primary: Option<String>,
    #[serde(default)]
    pub electrification_level: Option<String>,
    #[serde(default)]
    pub body_class: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// Bare make/model/trim strings from the top level of a decode payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTrimFromTopLevel {
    pub trim: Option<String>,
    pub description: Option<String>,
}

/// A trim entry carried on a backend VIN decode payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrimFromBackend {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub drivetrain: Option<String>,
    #[serde(default)]
    pub body_style: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

/// Any raw trim shape this crate knows how to normalize.
#[derive(Clone, Debug, PartialEq)]
pub enum RawTrim {
    Structured(RawTrimFromStructuredApi),
    Pattern(RawTrimFromPatternApi),
    TopLevel(RawTrimFromTopLevel),
    Backend(RawTrimFromBackend),
}

impl RawTrim {
    /// Normalize into a trim option.
    ///
    /// Returns `None` when the record carries neither a usable name nor a
    /// description to derive one from. Top-level records always produce an
    /// option, since they back the single-trim synthesis of a decode.
    pub fn into_trim_option(self, year: &str) -> Option<TrimOption> {
        match self {
            RawTrim::Structured(raw) => structured_to_option(raw, year),
            RawTrim::Pattern(raw) => pattern_to_option(raw, year),
            RawTrim::TopLevel(raw) => Some(top_level_to_option(raw, year)),
            RawTrim::Backend(raw) => backend_to_option(raw, year),
        }
    }
}

/// The value if it carries data (not empty, not "Not Applicable").
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("Not Applicable"))
}

fn has_identity(name: Option<&str>, description: Option<&str>) -> bool {
    name.is_some_and(|n| !is_generic_trim_name(n)) || description.is_some()
}

fn structured_to_option(raw: RawTrimFromStructuredApi, year: &str) -> Option<TrimOption> {
    let name = present(&raw.name);
    let description = present(&raw.description);
    if !has_identity(name, description) {
        return None;
    }

    let transmission = present(&raw.transmission)
        .map(|t| {
            let parsed = extract_transmission_from_description(t);
            if parsed.is_empty() {
                t.to_string()
            } else {
                parsed
            }
        })
        .unwrap_or_default();

    let specs = TrimSpecs {
        engine: present(&raw.engine).unwrap_or_default().to_string(),
        transmission,
        drivetrain: present(&raw.drive_type)
            .map(extract_drivetrain_from_description)
            .unwrap_or_default(),
        body_style: present(&raw.body_type)
            .map(extract_body_style_from_description)
            .unwrap_or_default(),
    };

    Some(
        TrimOption::new(
            normalize_trim_name(name, description),
            description.or(name).unwrap_or_default(),
        )
        .with_specs(specs)
        .with_year(present(&raw.year).unwrap_or(year))
        .with_source(TrimSource::Structured),
    )
}

fn pattern_to_option(raw: RawTrimFromPatternApi, year: &str) -> Option<TrimOption> {
    let trim = present(&raw.trim);
    let series = present(&raw.series);
    if trim.is_none() && series.is_none() {
        return None;
    }

    let description = [trim, series]
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let specs = TrimSpecs {
        engine: pattern_engine(&raw),
        transmission: pattern_transmission(&raw),
        drivetrain: present(&raw.drive_type)
            .map(extract_drivetrain_from_description)
            .unwrap_or_default(),
        body_style: present(&raw.body_class)
            .map(extract_body_style_from_description)
            .unwrap_or_default(),
    };

    Some(
        TrimOption::new(normalize_trim_name(trim.or(series), Some(&description)), description)
            .with_specs(specs)
            .with_year(present(&raw.model_year).unwrap_or(year))
            .with_source(TrimSource::Pattern),
    )
}

fn top_level_to_option(raw: RawTrimFromTopLevel, year: &str) -> TrimOption {
    let name = present(&raw.trim);
    let description = present(&raw.description);

    TrimOption::new(
        normalize_trim_name(name, description),
        description.or(name).unwrap_or_default(),
    )
    .with_specs(
        description
            .map(crate::parser::extract_specs_from_description)
            .unwrap_or_default(),
    )
    .with_year(year)
    .with_source(TrimSource::TopLevel)
}

fn backend_to_option(raw: RawTrimFromBackend, year: &str) -> Option<TrimOption> {
    let name = present(&raw.name);
    let description = present(&raw.description);
    if !has_identity(name, description) {
        return None;
    }

    let specs = TrimSpecs {
        engine: present(&raw.engine).unwrap_or_default().to_string(),
        transmission: present(&raw.transmission).unwrap_or_default().to_string(),
        drivetrain: present(&raw.drivetrain).unwrap_or_default().to_string(),
        body_style: present(&raw.body_style).unwrap_or_default().to_string(),
    };

    Some(
        TrimOption::new(
            normalize_trim_name(name, description),
            description.or(name).unwrap_or_default(),
        )
        .with_specs(specs)
        .with_year(present(&raw.year).unwrap_or(year))
        .with_source(TrimSource::Backend),
    )
}

/// Engine string from displacement, cylinder layout, turbo and
/// electrification fields, in that order.
fn pattern_engine(raw: &RawTrimFromPatternApi) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);

    if let Some(litres) = present(&raw.displacement_l).and_then(|d| d.parse::<f64>().ok()) {
        if litres > 0.0 {
            parts.push(format!("{:.1}L", litres));
        }
    }

    if let Some(cylinders) = present(&raw.engine_cylinders) {
        let layout = present(&raw.engine_configuration)
            .map(str::to_ascii_lowercase)
            .and_then(|config| {
                if config.starts_with('v') {
                    Some("V")
                } else if config.starts_with("in-line") || config.starts_with("inline") {
                    Some("I")
                } else if config.starts_with("horizontally") || config.contains("boxer") {
                    Some("H")
                } else if config.starts_with('w') {
                    Some("W")
                } else {
                    None
                }
            });
        match layout {
            Some(letter) => parts.push(format!("{}{}", letter, cylinders)),
            None => parts.push(format!("{}-Cylinder", cylinders)),
        }
    }

    if present(&raw.turbo).is_some_and(|t| t.eq_ignore_ascii_case("yes")) {
        parts.push("Turbo".to_string());
    }

    let electrification = present(&raw.electrification_level).map(str::to_ascii_uppercase);
    match electrification.as_deref() {
        Some(level) if level.starts_with("PHEV") => parts.push("Plug-In Hybrid".to_string()),
        Some(level) if level.starts_with("BEV") => parts.push("Electric".to_string()),
        Some(level) if level.contains("HEV") => parts.push("Hybrid".to_string()),
        _ => {
            if present(&raw.fuel_type_primary).is_some_and(|f| f.eq_ignore_ascii_case("electric")) {
                parts.push("Electric".to_string());
            }
        }
    }

    parts.join(" ")
}

/// Transmission string from style and speed count.
fn pattern_transmission(raw: &RawTrimFromPatternApi) -> String {
    let Some(style) = present(&raw.transmission_style) else {
        return String::new();
    };

    let kind = extract_transmission_from_description(style);
    if kind.is_empty() {
        return style.to_string();
    }

    match present(&raw.transmission_speeds) {
        Some(speeds) if kind == "Automatic" || kind == "Manual" => {
            format!("{}-Speed {}", speeds, kind)
        }
        _ => kind,
    }
}

/// Success body of the backend VIN decode call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VinDecodePayload {
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    /// Trim explicitly flagged by the backend
    #[serde(default)]
    pub trim: Option<String>,
    /// Top-level free-text description of the vehicle
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub available_trims: Option<Vec<RawTrimFromBackend>>,
}

impl VinDecodePayload {
    /// True when year, make and model are all present.
    pub fn has_identity(&self) -> bool {
        !self.year.trim().is_empty() && !self.make.trim().is_empty() && !self.model.trim().is_empty()
    }
}

/// Years arrive both as `"2023"` and `2023`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    Ok(match Option::<Year>::deserialize(deserializer)? {
        Some(Year::Text(text)) => text.trim().to_string(),
        Some(Year::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_pattern_record_parsing() {
        let json = r#"{
            "Make": "BMW",
            "Model": "M3",
            "ModelYear": "2023",
            "Trim": "Competition",
            "Series": "",
            "DisplacementL": "2.993",
            "EngineCylinders": "6",
            "EngineConfiguration": "In-Line",
            "Turbo": "Yes",
            "TransmissionStyle": "Automatic",
            "TransmissionSpeeds": "8",
            "DriveType": "RWD/Rear-Wheel Drive",
            "FuelTypePrimary": "Gasoline",
            "ElectrificationLevel": "Not Applicable",
            "BodyClass": "Sedan/Saloon",
            "ErrorCode": "0"
        }"#;

        let raw: RawTrimFromPatternApi = serde_json::from_str(json).unwrap();
        let trim = RawTrim::Pattern(raw).into_trim_option("2023").unwrap();

        assert_eq!(trim.name, "Competition");
        assert_eq!(trim.specs.engine, "3.0L I6 Turbo");
        assert_eq!(trim.specs.transmission, "8-Speed Automatic");
        assert_eq!(trim.specs.drivetrain, "RWD");
        assert_eq!(trim.specs.body_style, "Sedan");
        assert_eq!(trim.source, Some(TrimSource::Pattern));
    }

    #[test]
    fn test_pattern_record_without_trim_is_skipped() {
        let raw = RawTrimFromPatternApi {
            trim: some("Not Applicable"),
            series: some(""),
            displacement_l: some("2.0"),
            ..Default::default()
        };
        assert!(RawTrim::Pattern(raw).into_trim_option("2020").is_none());
    }

    #[test]
    fn test_pattern_electric_and_cvt() {
        let raw = RawTrimFromPatternApi {
            series: some("Long Range"),
            electrification_level: some("BEV (Battery Electric Vehicle)"),
            transmission_style: some("Continuously Variable Transmission (CVT)"),
            transmission_speeds: some("1"),
            ..Default::default()
        };
        let trim = RawTrim::Pattern(raw).into_trim_option("2022").unwrap();
        assert_eq!(trim.name, "Long Range");
        assert_eq!(trim.specs.engine, "Electric");
        assert_eq!(trim.specs.transmission, "CVT");
    }

    #[test]
    fn test_structured_record() {
        let raw = RawTrimFromStructuredApi {
            name: some("XLE"),
            description: some("XLE 4dr Sedan (2.5L 4cyl 8A)"),
            year: some("2021"),
            engine: some("2.5L I4"),
            transmission: some("8-speed automatic"),
            drive_type: some("front wheel drive"),
            body_type: some("Sedan"),
        };

        let trim = RawTrim::Structured(raw).into_trim_option("2021").unwrap();
        assert_eq!(trim.name, "XLE");
        assert_eq!(trim.description, "XLE 4dr Sedan (2.5L 4cyl 8A)");
        assert_eq!(trim.specs.transmission, "8-Speed Automatic");
        assert_eq!(trim.specs.drivetrain, "FWD");
        assert_eq!(trim.specs.body_style, "Sedan");
    }

    #[test]
    fn test_top_level_synthesis_parses_description() {
        let raw = RawTrimFromTopLevel {
            trim: None,
            description: some("Sport 2.0L Turbo I4 6-Speed Manual FWD"),
        };
        let trim = RawTrim::TopLevel(raw).into_trim_option("2019").unwrap();
        assert_eq!(trim.name, "Sport");
        assert_eq!(trim.specs.engine, "2.0L I4 Turbo");
        assert_eq!(trim.specs.transmission, "6-Speed Manual");
        assert_eq!(trim.specs.drivetrain, "FWD");
        assert_eq!(trim.year, "2019");
    }

    #[test]
    fn test_top_level_without_anything_is_base() {
        let trim = RawTrim::TopLevel(RawTrimFromTopLevel::default())
            .into_trim_option("2019")
            .unwrap();
        assert_eq!(trim.name, "Base");
        assert!(trim.specs.is_empty());
    }

    #[test]
    fn test_backend_record_without_identity_is_skipped() {
        let raw = RawTrimFromBackend {
            name: some("unknown"),
            engine: some("2.0L"),
            ..Default::default()
        };
        assert!(RawTrim::Backend(raw).into_trim_option("2020").is_none());
    }

    #[test]
    fn test_decode_payload_numeric_year() {
        let json = r#"{"year": 2023, "make": "BMW", "model": "M3", "availableTrims": null}"#;
        let payload: VinDecodePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.year, "2023");
        assert!(payload.available_trims.is_none());
        assert!(payload.has_identity());

        let json = r#"{"year": "2021", "make": "Toyota", "model": "", "trim": "XLE"}"#;
        let payload: VinDecodePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.trim.as_deref(), Some("XLE"));
        assert!(!payload.has_identity());
    }
}
