//! NHTSA vPIC VIN-pattern decoder.
//!
//! `/DecodeVinValues/{vin}?format=json` returns one flat record per VIN.
//! Absent values are `""` or `"Not Applicable"`.
//!
//! API documentation: https://vpic.nhtsa.dot.gov/api/

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::VehicleDataError;
use crate::models::RawTrimFromPatternApi;
use crate::provider::VinPatternSource;

pub const DEFAULT_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";
const PROVIDER_ID: &str = "NHTSA";

/// Response envelope of /DecodeVinValues
#[derive(Debug, Deserialize)]
struct DecodeValuesResponse {
    #[serde(rename = "Results", default)]
    results: Vec<RawTrimFromPatternApi>,
}

/// vPIC client. No API key required.
pub struct NhtsaProvider {
    client: Client,
    base_url: String,
}

impl NhtsaProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn decode_url(&self, vin: &str) -> String {
        format!(
            "{}/DecodeVinValues/{}?format=json",
            self.base_url,
            urlencoding::encode(vin)
        )
    }
}

/// First record of a response, if it decoded to a make at all.
fn first_record(response: DecodeValuesResponse) -> Result<RawTrimFromPatternApi, VehicleDataError> {
    response
        .results
        .into_iter()
        .next()
        .filter(|record| {
            record
                .make
                .as_deref()
                .is_some_and(|make| !make.trim().is_empty())
        })
        .ok_or_else(|| VehicleDataError::no_data(PROVIDER_ID))
}

#[async_trait]
impl VinPatternSource for NhtsaProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn decode_values(&self, vin: &str) -> Result<RawTrimFromPatternApi, VehicleDataError> {
        let url = self.decode_url(vin);
        debug!("NHTSA request: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| VehicleDataError::from_transport(PROVIDER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VehicleDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let parsed: DecodeValuesResponse =
            response
                .json()
                .await
                .map_err(|e| VehicleDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to parse response: {}", e),
                })?;

        first_record(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_url() {
        let provider = NhtsaProvider::new(DEFAULT_BASE_URL, Duration::from_secs(1));
        assert_eq!(
            provider.decode_url("WBA5R1C03PFH12345"),
            "https://vpic.nhtsa.dot.gov/api/vehicles/DecodeVinValues/WBA5R1C03PFH12345?format=json"
        );
    }

    #[test]
    fn test_first_record() {
        let json = r#"{
            "Count": 1,
            "Message": "Results returned successfully",
            "Results": [{
                "Make": "TOYOTA",
                "Model": "Camry",
                "ModelYear": "2021",
                "Trim": "XSE",
                "Series": "",
                "DisplacementL": "3.5",
                "EngineCylinders": "6",
                "EngineConfiguration": "V-Shaped",
                "Turbo": "",
                "TransmissionStyle": "Automatic",
                "TransmissionSpeeds": "8",
                "DriveType": "FWD/Front-Wheel Drive",
                "BodyClass": "Sedan/Saloon",
                "ErrorCode": "0",
                "VehicleDescriptor": "4T1K61AK*MU"
            }]
        }"#;

        let response: DecodeValuesResponse = serde_json::from_str(json).unwrap();
        let record = first_record(response).unwrap();
        assert_eq!(record.trim.as_deref(), Some("XSE"));
        assert_eq!(record.engine_configuration.as_deref(), Some("V-Shaped"));
    }

    #[test]
    fn test_undecodable_vin_is_no_data() {
        let json = r#"{"Results": [{"Make": "", "ErrorCode": "8"}]}"#;
        let response: DecodeValuesResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            first_record(response),
            Err(VehicleDataError::NoData { .. })
        ));

        let response: DecodeValuesResponse = serde_json::from_str(r#"{"Results": []}"#).unwrap();
        assert!(first_record(response).is_err());
    }
}
