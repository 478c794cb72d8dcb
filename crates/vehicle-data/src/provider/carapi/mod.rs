//! CarAPI structured vehicle-data client.
//!
//! Two dependent calls per lookup:
//! - `/models?make=..&model=..` resolves the make/model to a numeric id
//! - `/trims?make_model_id=..&year=..&verbose=yes` lists the trims of that
//!   id for one year, with engine and body details
//!
//! API documentation: https://carapi.app/docs

mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use self::models::{ListResponse, ModelItem, TrimItem};
use crate::catalog::matches_loosely;
use crate::errors::VehicleDataError;
use crate::models::{RawTrim, TrimOption};
use crate::normalizer::deduplicate_trims;
use crate::provider::StructuredTrimSource;

pub const DEFAULT_BASE_URL: &str = "https://carapi.app/api";
const PROVIDER_ID: &str = "CARAPI";

/// CarAPI client.
///
/// The token is optional: the free tier answers without one, with some
/// fields redacted.
pub struct CarApiProvider {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl CarApiProvider {
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Make a GET request and parse the JSON body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, VehicleDataError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.client.get(&url).query(params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!("CarAPI request: {} with {} params", endpoint, params.len());

        let response = request
            .send()
            .await
            .map_err(|e| VehicleDataError::from_transport(PROVIDER_ID, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(VehicleDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Invalid or missing API token".to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VehicleDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response.json::<T>().await.map_err(|e| VehicleDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse response: {}", e),
        })
    }

    /// Numeric make/model id for a model name.
    async fn resolve_model_id(&self, make: &str, model: &str) -> Result<u64, VehicleDataError> {
        let response: ListResponse<ModelItem> = self
            .fetch("/models", &[("make", make), ("model", model)])
            .await?;

        pick_model(&response.data, make, model)
            .map(|item| item.id)
            .ok_or_else(|| VehicleDataError::no_data(PROVIDER_ID))
    }
}

/// Best model entry: exact name first, then a loose match.
fn pick_model<'a>(items: &'a [ModelItem], make: &str, model: &str) -> Option<&'a ModelItem> {
    let same_make = |item: &&ModelItem| {
        item.make
            .as_deref()
            .map_or(true, |item_make| matches_loosely(item_make, make))
    };

    items
        .iter()
        .filter(same_make)
        .find(|item| item.name.eq_ignore_ascii_case(model.trim()))
        .or_else(|| {
            items
                .iter()
                .filter(same_make)
                .find(|item| matches_loosely(&item.name, model))
        })
}

/// Normalize a trim listing into de-duplicated trim options.
fn trims_from_items(items: Vec<TrimItem>, year: &str) -> Vec<TrimOption> {
    let options = items
        .into_iter()
        .filter_map(|item| RawTrim::Structured(item.into_raw()).into_trim_option(year))
        .collect();
    deduplicate_trims(options)
}

#[async_trait]
impl StructuredTrimSource for CarApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_trims(
        &self,
        year: &str,
        make: &str,
        model: &str,
    ) -> Result<Vec<TrimOption>, VehicleDataError> {
        let model_id = self.resolve_model_id(make, model).await?.to_string();

        let response: ListResponse<TrimItem> = self
            .fetch(
                "/trims",
                &[
                    ("make_model_id", model_id.as_str()),
                    ("year", year),
                    ("verbose", "yes"),
                ],
            )
            .await?;

        let trims = trims_from_items(response.data, year);
        if trims.is_empty() {
            return Err(VehicleDataError::no_data(PROVIDER_ID));
        }

        debug!(
            "CarAPI returned {} trims for {} {} {}",
            trims.len(),
            year,
            make,
            model
        );
        Ok(trims)
    }
}
