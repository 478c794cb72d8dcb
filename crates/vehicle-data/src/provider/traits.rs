//! Adapter trait definitions.
//!
//! One trait per external collaborator. The service and resolver only see
//! these traits, so every fallback stage can be exercised with an in-test
//! mock instead of a live API.

use async_trait::async_trait;

use crate::errors::VehicleDataError;
use crate::models::{RawTrimFromPatternApi, TrimOption, TrimSpecs, VinDecodePayload};
use crate::normalizer::trim_key;

/// The backend VIN decode call.
#[async_trait]
pub trait VinDecodeBackend: Send + Sync {
    /// Identifier used in logs and error values.
    fn id(&self) -> &'static str;

    /// Decode one VIN.
    ///
    /// An unknown VIN is reported as [`VehicleDataError::VinNotFound`],
    /// never as a transport error.
    async fn decode(&self, vin: &str) -> Result<VinDecodePayload, VehicleDataError>;
}

/// A structured vehicle-data API keyed by year/make/model.
#[async_trait]
pub trait StructuredTrimSource: Send + Sync {
    /// Identifier used in logs and error values.
    fn id(&self) -> &'static str;

    /// Fetch the trims of a year/make/model.
    ///
    /// Implementations return the list already normalized and
    /// de-duplicated. An empty result is reported as
    /// [`VehicleDataError::NoData`].
    async fn fetch_trims(
        &self,
        year: &str,
        make: &str,
        model: &str,
    ) -> Result<Vec<TrimOption>, VehicleDataError>;

    /// Fetch the specs of one exact trim.
    ///
    /// The default implementation looks the trim up in [`fetch_trims`]
    /// by canonical name.
    ///
    /// [`fetch_trims`]: StructuredTrimSource::fetch_trims
    async fn fetch_trim_specs(
        &self,
        year: &str,
        make: &str,
        model: &str,
        trim: &str,
    ) -> Result<TrimSpecs, VehicleDataError> {
        let wanted = trim_key(trim);
        self.fetch_trims(year, make, model)
            .await?
            .into_iter()
            .find(|option| trim_key(&option.name) == wanted)
            .map(|option| option.specs)
            .filter(|specs| !specs.is_empty())
            .ok_or_else(|| VehicleDataError::no_data(self.id()))
    }
}

/// A VIN-pattern decode API returning one flat record per VIN.
#[async_trait]
pub trait VinPatternSource: Send + Sync {
    /// Identifier used in logs and error values.
    fn id(&self) -> &'static str;

    /// Decode one VIN into its flat field set.
    async fn decode_values(&self, vin: &str) -> Result<RawTrimFromPatternApi, VehicleDataError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        trims: Vec<TrimOption>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl StructuredTrimSource for FixedSource {
        fn id(&self) -> &'static str {
            "FIXED"
        }

        async fn fetch_trims(
            &self,
            _year: &str,
            _make: &str,
            _model: &str,
        ) -> Result<Vec<TrimOption>, VehicleDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.trims.clone())
        }
    }

    fn source() -> FixedSource {
        FixedSource {
            trims: vec![
                TrimOption::new("LE", "").with_specs(TrimSpecs::new("2.5L I4", "", "FWD")),
                TrimOption::new("M3 Competition", "")
                    .with_specs(TrimSpecs::new("3.0L I6 Twin-Turbo", "", "RWD")),
                TrimOption::new("XSE", ""),
            ],
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_default_trim_specs_matches_by_name() {
        let source = source();
        let specs = source
            .fetch_trim_specs("2021", "Toyota", "Camry", " le ")
            .await
            .unwrap();
        assert_eq!(specs.engine, "2.5L I4");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_default_trim_specs_matches_alias() {
        let specs = source()
            .fetch_trim_specs("2023", "BMW", "M3", "M3 Comp")
            .await
            .unwrap();
        assert_eq!(specs.drivetrain, "RWD");
    }

    #[tokio::test]
    async fn test_default_trim_specs_missing_or_empty_is_no_data() {
        let source = source();
        let missing = source.fetch_trim_specs("2021", "Toyota", "Camry", "TRD").await;
        assert!(matches!(missing, Err(VehicleDataError::NoData { .. })));

        let empty = source.fetch_trim_specs("2021", "Toyota", "Camry", "XSE").await;
        assert!(matches!(empty, Err(VehicleDataError::NoData { .. })));
    }
}
