//! CarAPI response structures.

use serde::Deserialize;

use crate::models::RawTrimFromStructuredApi;
use crate::parser::extract_engine_from_description;

/// Paged envelope shared by the list endpoints
#[derive(Debug, Deserialize)]
pub(super) struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Entry of /models
#[derive(Debug, Deserialize)]
pub(super) struct ModelItem {
    pub id: u64,
    #[serde(default)]
    pub make: Option<String>,
    pub name: String,
}

/// Entry of /trims with `verbose=yes`
#[derive(Debug, Deserialize)]
pub(super) struct TrimItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub make_model_trim_engine: Option<EngineBlock>,
    #[serde(default)]
    pub make_model_trim_body: Option<BodyBlock>,
}

/// Engine and driveline details of a trim
#[derive(Debug, Default, Deserialize)]
pub(super) struct EngineBlock {
    /// "gas", "hybrid", "electric", ...
    #[serde(default)]
    pub engine_type: Option<String>,
    /// Layout code, e.g. "I6"
    #[serde(default)]
    pub cylinders: Option<String>,
    /// Displacement in litres
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub drive_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct BodyBlock {
    #[serde(default, rename = "type")]
    pub body_type: Option<String>,
}

impl TrimItem {
    /// Engine string assembled from the engine block. Induction is only
    /// ever mentioned in the description, so that is scanned too.
    fn engine(&self) -> Option<String> {
        let block = self.make_model_trim_engine.as_ref()?;
        let size = block
            .size
            .filter(|litres| *litres > 0.0)
            .map(|litres| format!("{:.1}L", litres))
            .unwrap_or_default();

        let text = format!(
            "{} {} {} {}",
            size,
            block.cylinders.as_deref().unwrap_or_default(),
            block.engine_type.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
        );
        Some(extract_engine_from_description(&text)).filter(|engine| !engine.is_empty())
    }

    pub fn into_raw(self) -> RawTrimFromStructuredApi {
        let engine = self.engine();
        let block = self.make_model_trim_engine.unwrap_or_default();
        let body = self.make_model_trim_body.unwrap_or_default();

        RawTrimFromStructuredApi {
            name: self.name,
            description: self.description,
            year: self.year.map(|y| y.to_string()),
            engine,
            transmission: block.transmission,
            drive_type: block.drive_type,
            body_type: body.body_type,
        }
    }
}
