//! Outward operations of the engine.
//!
//! [`VehicleDataService`] wires the static catalog, the adapters, the cache
//! and the resolver together. It holds no per-request state: everything
//! shared lives in the injected [`SpecCache`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::SpecCache;
use crate::catalog::{get_comprehensive_trims, guess_trim_specs};
use crate::errors::{ErrorClass, VehicleDataError};
use crate::models::{
    RawTrim, RawTrimFromTopLevel, TrimOption, TrimSource, TrimSpecs, VehicleData,
    VinDecodePayload, VinDecodeResult,
};
use crate::normalizer::{deduplicate_trims, get_display_trim, is_generic_trim_name, trim_key};
use crate::parser::extract_specs_from_description;
use crate::provider::{
    PatternDecodeAdapter, StructuredTrimSource, VinDecodeBackend, VinPatternSource,
};
use crate::resolver::{ResolvedSpecs, SpecRequest, SpecResolver};
use crate::vin::validate_vin;

/// Default pattern-decode fan-out.
pub const DEFAULT_MAX_PATTERN_EXEMPLARS: usize = 3;

/// Last-resort trim list when no source knows the model.
pub const DEFAULT_GENERIC_TRIMS: &[&str] = &["Base", "Sport", "Premium", "Limited"];

/// Engine tuning knobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// How many exemplar VINs the pattern adapter decodes per lookup
    pub max_pattern_exemplars: usize,
    /// Trims offered when every source comes back empty
    pub generic_trims: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_pattern_exemplars: DEFAULT_MAX_PATTERN_EXEMPLARS,
            generic_trims: DEFAULT_GENERIC_TRIMS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// VIN decoding, trim lookup and spec resolution.
///
/// Every adapter is optional. A service without adapters still answers from
/// the local catalog and the description parser.
pub struct VehicleDataService {
    config: ResolverConfig,
    cache: Arc<SpecCache>,
    backend: Option<Arc<dyn VinDecodeBackend>>,
    structured: Option<Arc<dyn StructuredTrimSource>>,
    pattern: Option<PatternDecodeAdapter>,
}

impl VehicleDataService {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            cache: Arc::new(SpecCache::new()),
            backend: None,
            structured: None,
            pattern: None,
        }
    }

    /// Share a cache with other services, e.g. one per user session.
    pub fn with_cache(mut self, cache: Arc<SpecCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_backend(mut self, backend: Arc<dyn VinDecodeBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_structured_source(mut self, source: Arc<dyn StructuredTrimSource>) -> Self {
        self.structured = Some(source);
        self
    }

    pub fn with_pattern_source(mut self, source: Arc<dyn VinPatternSource>) -> Self {
        self.pattern = Some(PatternDecodeAdapter::new(
            source,
            self.config.max_pattern_exemplars,
        ));
        self
    }

    pub fn cache(&self) -> &Arc<SpecCache> {
        &self.cache
    }

    fn resolver(&self) -> SpecResolver {
        SpecResolver::new(self.cache.clone(), self.structured.clone())
    }

    // ========================================================================
    // VIN decoding
    // ========================================================================

    /// Decode a VIN into a vehicle snapshot.
    ///
    /// Never fails: an invalid length is reported without any network call,
    /// and an unknown or undecodable VIN yields `success: false` with
    /// `fallback_to_manual: true`.
    pub async fn decode_vin(&self, vin: &str) -> VinDecodeResult {
        let vin = match validate_vin(vin) {
            Ok(vin) => vin,
            Err(e) => {
                debug!("Rejected VIN input: {}", e);
                return VinDecodeResult::failed(e.to_string(), false);
            }
        };

        let Some(backend) = &self.backend else {
            return VinDecodeResult::failed("VIN decoding is not configured", true);
        };

        let payload = match backend.decode(&vin).await {
            Ok(payload) => payload,
            Err(e) => {
                log_source_failure(backend.id(), &e);
                return VinDecodeResult::failed(e.to_string(), true);
            }
        };

        if !payload.has_identity() {
            info!("VIN {} decoded without year/make/model", vin);
            return VinDecodeResult::failed(VehicleDataError::VinNotFound(vin).to_string(), true);
        }

        VinDecodeResult::decoded(self.vehicle_from_payload(payload).await)
    }

    async fn vehicle_from_payload(&self, payload: VinDecodePayload) -> VehicleData {
        let year = payload.year.trim().to_string();
        let make = payload.make.trim().to_string();
        let model = payload.model.trim().to_string();

        let from_backend = payload
            .available_trims
            .clone()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| RawTrim::Backend(raw).into_trim_option(&year))
            .collect();
        let mut trims = deduplicate_trims(from_backend);

        let flagged = payload
            .trim
            .as_deref()
            .map(str::trim)
            .filter(|name| !is_generic_trim_name(name));

        // Synthesize from the top-level strings when the list is empty, or
        // when the flagged trim is missing from it.
        let flagged_missing = flagged.is_some_and(|name| find_trim(&trims, name).is_none());
        if trims.is_empty() || flagged_missing {
            let top_level = RawTrimFromTopLevel {
                trim: flagged.map(str::to_string),
                description: payload.description.clone(),
            };
            trims.extend(RawTrim::TopLevel(top_level).into_trim_option(&year));
            trims = deduplicate_trims(trims);
        }

        let selected = match flagged {
            Some(name) => find_trim(&trims, name),
            None if trims.len() == 1 => Some(0),
            None => None,
        };

        let (trim, display_trim, specs) = match selected.map(|index| &trims[index]) {
            Some(option) => {
                let request = SpecRequest::new(option, &year, &make, &model)
                    .with_top_level_description(payload.description.as_deref());
                let resolved = self.resolver().resolve(&request).await;
                (option.name.clone(), get_display_trim(option), resolved.specs)
            }
            None => (
                String::new(),
                String::new(),
                payload
                    .description
                    .as_deref()
                    .map(extract_specs_from_description)
                    .unwrap_or_default(),
            ),
        };

        debug!(
            "Decoded {} {} {} with {} trims, selected {:?}",
            year,
            make,
            model,
            trims.len(),
            trim
        );

        VehicleData {
            year,
            make,
            model,
            trim,
            display_trim,
            engine_cylinders: specs.engine,
            transmission: specs.transmission,
            drivetrain: specs.drivetrain,
            body_style: Some(specs.body_style).filter(|b| !b.is_empty()),
            available_trims: trims,
        }
    }

    // ========================================================================
    // Trim lookup
    // ========================================================================

    /// Trims for a year/make/model.
    ///
    /// Tries the local catalog, the structured API, the pattern-decode
    /// adapter and finally the generic list, returning the first non-empty
    /// result. Never empty.
    pub async fn fetch_trims_by_year_make_model(
        &self,
        year: &str,
        make: &str,
        model: &str,
    ) -> Vec<TrimOption> {
        let local = self.local_trims(year, make, model);
        if !local.is_empty() {
            debug!("Local catalog has {} trims for {} {}", local.len(), make, model);
            return local;
        }

        if let Some(source) = &self.structured {
            match source.fetch_trims(year, make, model).await {
                Ok(trims) if !trims.is_empty() => return deduplicate_trims(trims),
                Ok(_) => debug!("{} returned no trims", source.id()),
                Err(e) => log_source_failure(source.id(), &e),
            }
        }

        if let Some(pattern) = &self.pattern {
            match pattern.fetch_trims(year, make, model).await {
                Ok(trims) if !trims.is_empty() => return deduplicate_trims(trims),
                Ok(_) => debug!("Pattern decode returned no trims"),
                Err(e) => log_source_failure("PATTERN_DECODE", &e),
            }
        }

        info!(
            "No trim source knows {} {} {}, using generic trims",
            year, make, model
        );
        deduplicate_trims(
            self.config
                .generic_trims
                .iter()
                .map(|name| {
                    TrimOption::new(name.as_str(), "")
                        .with_year(year)
                        .with_source(TrimSource::Generic)
                })
                .collect(),
        )
    }

    fn local_trims(&self, year: &str, make: &str, model: &str) -> Vec<TrimOption> {
        let trims = get_comprehensive_trims(make, model)
            .into_iter()
            .map(|name| {
                let specs = guess_trim_specs(make, model, &name);
                TrimOption::new(name, "")
                    .with_specs(specs)
                    .with_year(year)
                    .with_source(TrimSource::Local)
            })
            .collect();
        deduplicate_trims(trims)
    }

    // ========================================================================
    // Spec resolution
    // ========================================================================

    /// Specs for a named trim, with the step each field came from.
    pub async fn fetch_resolved_specs(
        &self,
        year: &str,
        make: &str,
        model: &str,
        trim_name: &str,
    ) -> ResolvedSpecs {
        let wanted = trim_key(trim_name);
        let trim = self
            .local_trims(year, make, model)
            .into_iter()
            .find(|option| trim_key(&option.name) == wanted)
            .unwrap_or_else(|| TrimOption::new(trim_name.trim(), "").with_year(year));

        self.resolver()
            .resolve(&SpecRequest::new(&trim, year, make, model))
            .await
    }

    /// Specs for a named trim. Two identical calls reach the network at
    /// most once.
    pub async fn fetch_specs_by_year_make_model_trim(
        &self,
        year: &str,
        make: &str,
        model: &str,
        trim_name: &str,
    ) -> TrimSpecs {
        self.fetch_resolved_specs(year, make, model, trim_name)
            .await
            .specs
    }

    /// Resolve the specs of a trim option the caller already holds.
    pub async fn resolve_specs(
        &self,
        trim: &TrimOption,
        year: &str,
        make: &str,
        model: &str,
    ) -> TrimSpecs {
        self.resolver()
            .resolve(&SpecRequest::new(trim, year, make, model))
            .await
            .specs
    }
}

impl Default for VehicleDataService {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

/// Index of the trim matching a name, by canonical key.
fn find_trim(trims: &[TrimOption], name: &str) -> Option<usize> {
    let wanted = trim_key(name);
    trims.iter().position(|trim| trim_key(&trim.name) == wanted)
}

fn log_source_failure(source: &str, error: &VehicleDataError) {
    match error.class() {
        ErrorClass::SourceUnreachable => warn!("{} unreachable: {}", source, error),
        _ => debug!("{} had no data: {}", source, error),
    }
}
