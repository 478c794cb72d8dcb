//! Backend VIN decode client.
//!
//! POSTs `{"vin": ...}` to the configured endpoint. A success body carries
//! year/make/model plus optional trim data; an error body carries
//! `{error, message?}`, where "VIN not found" is a normal outcome that the
//! caller answers with manual entry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::VehicleDataError;
use crate::models::VinDecodePayload;
use crate::provider::VinDecodeBackend;

const PROVIDER_ID: &str = "VIN_BACKEND";
const VIN_NOT_FOUND: &str = "VIN not found";

// ============================================================================
// Request / Response Structures
// ============================================================================

#[derive(Debug, Serialize)]
struct DecodeRequest<'a> {
    vin: &'a str,
}

/// Error body of the decode call
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorResponse {
    fn is_vin_not_found(&self) -> bool {
        let matches = |text: &str| text.trim().eq_ignore_ascii_case(VIN_NOT_FOUND);
        matches(&self.error) || self.message.as_deref().is_some_and(matches)
    }
}

// ============================================================================
// BackendVinDecoder
// ============================================================================

/// HTTP client for the backend VIN decode endpoint.
pub struct BackendVinDecoder {
    client: Client,
    endpoint: String,
}

impl BackendVinDecoder {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Interpret a response body.
    ///
    /// Bodies carrying an `error` field are errors whatever the status code.
    fn parse_body(
        vin: &str,
        status: reqwest::StatusCode,
        body: &str,
    ) -> Result<VinDecodePayload, VehicleDataError> {
        if let Ok(error) = serde_json::from_str::<ErrorResponse>(body) {
            if error.is_vin_not_found() {
                return Err(VehicleDataError::VinNotFound(vin.to_string()));
            }
            return Err(VehicleDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: error.message.unwrap_or(error.error),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(VehicleDataError::VinNotFound(vin.to_string()));
        }

        if !status.is_success() {
            return Err(VehicleDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        serde_json::from_str(body).map_err(|e| VehicleDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse response: {}", e),
        })
    }
}

#[async_trait]
impl VinDecodeBackend for BackendVinDecoder {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn decode(&self, vin: &str) -> Result<VinDecodePayload, VehicleDataError> {
        debug!("VIN backend request for {}", vin);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&DecodeRequest { vin })
            .send()
            .await
            .map_err(|e| VehicleDataError::from_transport(PROVIDER_ID, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VehicleDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })?;

        Self::parse_body(vin, status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    const VIN: &str = "WBS33AY09PFM12345";

    #[test]
    fn test_provider_id() {
        let decoder = BackendVinDecoder::new("http://localhost/decode", Duration::from_secs(1));
        assert_eq!(decoder.id(), "VIN_BACKEND");
    }

    #[test]
    fn test_parse_success_body() {
        let body = r#"{
            "year": "2023",
            "make": "BMW",
            "model": "M3",
            "description": "M3 Competition 4dr Sedan (3.0L 6cyl Twin-Turbo 8A)",
            "availableTrims": [
                {"name": "M3", "description": "M3 4dr Sedan (3.0L 6cyl Twin-Turbo 6M)"},
                {"name": "M3 Competition", "engine": "3.0L I6 Twin-Turbo"}
            ]
        }"#;

        let payload = BackendVinDecoder::parse_body(VIN, StatusCode::OK, body).unwrap();
        assert_eq!(payload.make, "BMW");
        assert_eq!(payload.trim, None);
        assert_eq!(payload.available_trims.map(|t| t.len()), Some(2));
    }

    #[test]
    fn test_parse_vin_not_found() {
        let body = r#"{"error": "VIN not found"}"#;
        let result = BackendVinDecoder::parse_body(VIN, StatusCode::OK, body);
        assert!(matches!(result, Err(VehicleDataError::VinNotFound(_))));

        let body = r#"{"error": "decode_failed", "message": "VIN not found"}"#;
        let result = BackendVinDecoder::parse_body(VIN, StatusCode::BAD_REQUEST, body);
        assert!(matches!(result, Err(VehicleDataError::VinNotFound(_))));
    }

    #[test]
    fn test_parse_other_error_body() {
        let body = r#"{"error": "upstream", "message": "Decoder unavailable"}"#;
        let result = BackendVinDecoder::parse_body(VIN, StatusCode::BAD_GATEWAY, body);
        match result {
            Err(VehicleDataError::ProviderError { message, .. }) => {
                assert_eq!(message, "Decoder unavailable");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_unexpected_status() {
        let result = BackendVinDecoder::parse_body(VIN, StatusCode::INTERNAL_SERVER_ERROR, "oops");
        assert!(matches!(result, Err(VehicleDataError::ProviderError { .. })));
    }
}
