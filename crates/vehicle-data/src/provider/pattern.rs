//! Trim discovery through VIN-pattern decodes of exemplar VINs.
//!
//! When no structured record exists, decoding real VINs of the same make is
//! the only ground truth available. Exemplars from the static table are
//! rewritten for the requested model year, decoded concurrently, and
//! whatever trims come back are aggregated in exemplar order.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::VinPatternSource;
use crate::catalog::{exemplars_for, matches_loosely};
use crate::errors::{ErrorClass, VehicleDataError};
use crate::models::{RawTrim, RawTrimFromPatternApi, TrimOption};
use crate::normalizer::deduplicate_trims;
use crate::vin::with_model_year;

const ADAPTER_ID: &str = "PATTERN_DECODE";

/// Aggregates pattern decodes of exemplar VINs into a trim list.
pub struct PatternDecodeAdapter {
    source: Arc<dyn VinPatternSource>,
    max_exemplars: usize,
}

impl PatternDecodeAdapter {
    pub fn new(source: Arc<dyn VinPatternSource>, max_exemplars: usize) -> Self {
        Self {
            source,
            max_exemplars,
        }
    }

    /// Exemplar VINs for a year/make/model, rewritten for that year.
    fn exemplar_vins(&self, year: &str, make: &str, model: &str) -> Vec<String> {
        let Ok(year) = year.trim().parse::<u16>() else {
            return Vec::new();
        };

        exemplars_for(make, model, self.max_exemplars)
            .into_iter()
            .filter_map(|exemplar| with_model_year(exemplar.vin, year))
            .collect()
    }

    /// Decode the exemplars and aggregate their trims.
    ///
    /// Individual decode failures are tolerated; only when every exemplar
    /// fails or yields nothing for this make/model is `NoData` returned.
    pub async fn fetch_trims(
        &self,
        year: &str,
        make: &str,
        model: &str,
    ) -> Result<Vec<TrimOption>, VehicleDataError> {
        let vins = self.exemplar_vins(year, make, model);
        if vins.is_empty() {
            return Err(VehicleDataError::no_data(ADAPTER_ID));
        }

        let decodes = join_all(vins.iter().map(|vin| self.source.decode_values(vin))).await;

        let mut options = Vec::with_capacity(decodes.len());
        for (vin, decoded) in vins.iter().zip(decodes) {
            match decoded {
                Ok(record) if describes(&record, make, model) => {
                    if let Some(option) = RawTrim::Pattern(record).into_trim_option(year) {
                        options.push(option);
                    }
                }
                Ok(_) => debug!("Pattern decode of {} is for another vehicle", vin),
                Err(e) if e.class() == ErrorClass::SourceUnreachable => {
                    warn!("Pattern decode of {} failed: {}", vin, e)
                }
                Err(e) => debug!("Pattern decode of {} empty: {}", vin, e),
            }
        }

        let trims = deduplicate_trims(options);
        if trims.is_empty() {
            return Err(VehicleDataError::no_data(ADAPTER_ID));
        }
        Ok(trims)
    }
}

/// Whether a decoded record is for the requested make and model.
///
/// Model names are compared on letters and digits only, since decoders
/// spell them differently ("3-Series" vs "3 SERIES").
fn describes(record: &RawTrimFromPatternApi, make: &str, model: &str) -> bool {
    let make_matches = record
        .make
        .as_deref()
        .is_some_and(|decoded| matches_loosely(decoded, make));

    let model_matches = record.model.as_deref().map_or(true, |decoded| {
        let decoded = alphanumeric(decoded);
        decoded.is_empty() || matches_loosely(&decoded, &alphanumeric(model))
    });

    make_matches && model_matches
}

fn alphanumeric(value: &str) -> String {
    value.chars().filter(|c| c.is_alphanumeric()).collect()
}
