//! Per-field spec resolution across every known source.

use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

use super::origin::{chain_for, FieldOrigins, SpecOrigin};
use crate::cache::{SpecCache, SpecKey};
use crate::catalog::default_drivetrain;
use crate::errors::ErrorClass;
use crate::models::{SpecField, TrimOption, TrimSpecs, NOT_AVAILABLE};
use crate::parser::extract_specs_from_description;
use crate::provider::StructuredTrimSource;

/// Inputs of one resolution.
#[derive(Clone, Copy, Debug)]
pub struct SpecRequest<'a> {
    pub trim: &'a TrimOption,
    pub year: &'a str,
    pub make: &'a str,
    pub model: &'a str,
    /// Description of the whole vehicle from a VIN decode, if any
    pub top_level_description: Option<&'a str>,
}

impl<'a> SpecRequest<'a> {
    pub fn new(trim: &'a TrimOption, year: &'a str, make: &'a str, model: &'a str) -> Self {
        Self {
            trim,
            year,
            make,
            model,
            top_level_description: None,
        }
    }

    pub fn with_top_level_description(mut self, description: Option<&'a str>) -> Self {
        self.top_level_description = description;
        self
    }
}

/// Resolved specs plus the step each field came from.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSpecs {
    pub specs: TrimSpecs,
    pub origins: FieldOrigins,
}

/// Outcome of the structured fetch for one resolution.
enum StructuredFetch {
    /// No fetch was made: cache hit, nothing open, or no source configured
    Skipped,
    Specs(TrimSpecs),
    /// The source answered without specs for this trim
    Empty,
    /// Timeout or transport failure; the answer is unknown, not empty
    Unreachable,
}

/// What each step had to offer for this request.
struct Candidates {
    embedded: TrimSpecs,
    trim_description: TrimSpecs,
    cached: Option<TrimSpecs>,
    structured: Option<TrimSpecs>,
    top_level: TrimSpecs,
    manufacturer_drivetrain: Option<&'static str>,
}

impl Candidates {
    fn value(&self, origin: SpecOrigin, field: SpecField) -> Option<String> {
        let value = match origin {
            SpecOrigin::Embedded => self.embedded.usable(field),
            SpecOrigin::TrimDescription => self.trim_description.usable(field),
            SpecOrigin::Cache => self.cached.as_ref().and_then(|s| s.usable(field)),
            SpecOrigin::StructuredApi => self.structured.as_ref().and_then(|s| s.usable(field)),
            SpecOrigin::TopLevelDescription => self.top_level.usable(field),
            SpecOrigin::ManufacturerDefault => match field {
                SpecField::Drivetrain => self.manufacturer_drivetrain,
                _ => None,
            },
            SpecOrigin::Exhausted => Some(NOT_AVAILABLE),
        };
        value.map(str::to_string)
    }

    /// Whether any field is still open after the offline steps before the
    /// network (embedded and trim description).
    fn needs_network(&self) -> bool {
        SpecField::ALL.iter().any(|field| {
            self.embedded.usable(*field).is_none()
                && self.trim_description.usable(*field).is_none()
        })
    }
}

/// Fills engine, transmission, drivetrain and body style independently,
/// each from the first step of its chain that has a value.
///
/// The structured API is called at most once per resolution, and only on
/// a cache miss with some field still open. Values from the trim-level
/// steps are cached, so a repeated request never reaches the network; the
/// top-level description and manufacturer default are reapplied per
/// request. Nothing is cached when the structured source was unreachable.
pub struct SpecResolver {
    cache: Arc<SpecCache>,
    structured: Option<Arc<dyn StructuredTrimSource>>,
}

impl SpecResolver {
    pub fn new(cache: Arc<SpecCache>, structured: Option<Arc<dyn StructuredTrimSource>>) -> Self {
        Self { cache, structured }
    }

    pub async fn resolve(&self, request: &SpecRequest<'_>) -> ResolvedSpecs {
        let key = SpecKey::new(request.year, request.make, request.model, &request.trim.name);

        let mut candidates = Candidates {
            embedded: request.trim.specs.clone(),
            trim_description: extract_specs_from_description(&request.trim.description),
            cached: self.cache.get(&key),
            structured: None,
            top_level: request
                .top_level_description
                .map(extract_specs_from_description)
                .unwrap_or_default(),
            manufacturer_drivetrain: default_drivetrain(request.make),
        };

        let fetch = if candidates.cached.is_none() && candidates.needs_network() {
            self.fetch_structured(request).await
        } else {
            StructuredFetch::Skipped
        };
        let unreachable = matches!(fetch, StructuredFetch::Unreachable);
        if let StructuredFetch::Specs(specs) = fetch {
            candidates.structured = Some(specs);
        }

        let mut resolved = ResolvedSpecs::default();
        for field in SpecField::ALL {
            let (origin, value) = chain_for(field)
                .iter()
                .find_map(|origin| candidates.value(*origin, field).map(|v| (*origin, v)))
                .unwrap_or((SpecOrigin::Exhausted, NOT_AVAILABLE.to_string()));
            resolved.specs.set(field, value);
            resolved.origins.set(field, origin);
        }

        debug!(
            "Resolved specs for {} {} {} {}: {:?}",
            request.year, request.make, request.model, request.trim.name, resolved.origins
        );

        if candidates.cached.is_none() && !unreachable {
            self.cache.put(key, cacheable_specs(&resolved));
        }
        resolved
    }

    async fn fetch_structured(&self, request: &SpecRequest<'_>) -> StructuredFetch {
        let Some(source) = self.structured.as_ref() else {
            return StructuredFetch::Skipped;
        };
        match source
            .fetch_trim_specs(request.year, request.make, request.model, &request.trim.name)
            .await
        {
            Ok(specs) => StructuredFetch::Specs(specs),
            Err(e) if e.class() == ErrorClass::SourceUnreachable => {
                warn!("{} unreachable for trim specs: {}", source.id(), e);
                StructuredFetch::Unreachable
            }
            Err(e) => {
                debug!("{} has no specs for {}: {}", source.id(), request.trim.name, e);
                StructuredFetch::Empty
            }
        }
    }
}

/// The part of a resolution that holds for every request of the same key.
/// Fields from request-specific or fallback steps are left empty.
fn cacheable_specs(resolved: &ResolvedSpecs) -> TrimSpecs {
    let mut entry = TrimSpecs::default();
    for field in SpecField::ALL {
        if resolved.origins.get(field).is_cacheable() {
            entry.set(field, resolved.specs.get(field).to_string());
        }
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VehicleDataError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock structured source: times out for the first `outages` calls,
    /// then answers with `specs` or `NoData`.
    struct MockStructured {
        specs: Option<TrimSpecs>,
        outages: usize,
        call_count: AtomicUsize,
    }

    impl MockStructured {
        fn new(specs: Option<TrimSpecs>, outages: usize) -> Arc<Self> {
            Arc::new(Self {
                specs,
                outages,
                call_count: AtomicUsize::new(0),
            })
        }

        fn returning(specs: TrimSpecs) -> Arc<Self> {
            Self::new(Some(specs), 0)
        }

        fn failing() -> Arc<Self> {
            Self::new(None, usize::MAX)
        }

        fn empty() -> Arc<Self> {
            Self::new(None, 0)
        }

        fn recovering(specs: TrimSpecs) -> Arc<Self> {
            Self::new(Some(specs), 1)
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StructuredTrimSource for MockStructured {
        fn id(&self) -> &'static str {
            "MOCK_STRUCTURED"
        }

        async fn fetch_trims(
            &self,
            _year: &str,
            _make: &str,
            _model: &str,
        ) -> Result<Vec<TrimOption>, VehicleDataError> {
            Err(VehicleDataError::no_data("MOCK_STRUCTURED"))
        }

        async fn fetch_trim_specs(
            &self,
            _year: &str,
            _make: &str,
            _model: &str,
            _trim: &str,
        ) -> Result<TrimSpecs, VehicleDataError> {
            let call = self.call_count.fetch_add(1, Ordering::SeqCst);
            if call < self.outages {
                return Err(VehicleDataError::Timeout {
                    provider: "MOCK_STRUCTURED".to_string(),
                });
            }
            self.specs
                .clone()
                .ok_or_else(|| VehicleDataError::no_data("MOCK_STRUCTURED"))
        }
    }

    fn resolver(structured: Option<Arc<MockStructured>>) -> (SpecResolver, Arc<SpecCache>) {
        let cache = Arc::new(SpecCache::new());
        let structured = structured.map(|s| s as Arc<dyn StructuredTrimSource>);
        (SpecResolver::new(cache.clone(), structured), cache)
    }

    #[tokio::test]
    async fn test_embedded_specs_win_without_network() {
        let api = MockStructured::returning(TrimSpecs::new("9.9L V12", "CVT", "FWD"));
        let (resolver, _) = resolver(Some(api.clone()));

        let specs = TrimSpecs::new("3.0L I6 Twin-Turbo", "6-Speed Manual", "RWD")
            .with_body_style("Sedan");
        let trim = TrimOption::new("M3", "").with_specs(specs);
        let resolved = resolver
            .resolve(&SpecRequest::new(&trim, "2023", "BMW", "3 Series"))
            .await;

        assert_eq!(resolved.specs.engine, "3.0L I6 Twin-Turbo");
        assert_eq!(resolved.origins.engine, SpecOrigin::Embedded);
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_fields_resolve_independently() {
        let api = MockStructured::returning(TrimSpecs::new("2.5L I4", "8-Speed Automatic", ""));
        let (resolver, _) = resolver(Some(api.clone()));

        let trim = TrimOption::new("XSE", "XSE AWD Sedan")
            .with_specs(TrimSpecs::new("", "", "").with_body_style(NOT_AVAILABLE));
        let request = SpecRequest::new(&trim, "2022", "Lada", "Vesta")
            .with_top_level_description(Some("Vesta 1.6L I4 5-Speed Manual FWD"));
        let resolved = resolver.resolve(&request).await;

        assert_eq!(resolved.specs.drivetrain, "AWD");
        assert_eq!(resolved.origins.drivetrain, SpecOrigin::TrimDescription);
        assert_eq!(resolved.specs.body_style, "Sedan");
        assert_eq!(resolved.origins.body_style, SpecOrigin::TrimDescription);
        assert_eq!(resolved.specs.engine, "2.5L I4");
        assert_eq!(resolved.origins.engine, SpecOrigin::StructuredApi);
        assert_eq!(resolved.specs.transmission, "8-Speed Automatic");
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn test_top_level_description_after_api() {
        let (resolver, _) = resolver(Some(MockStructured::failing()));

        let trim = TrimOption::new("GT", "");
        let request = SpecRequest::new(&trim, "2020", "Ford", "Mustang")
            .with_top_level_description(Some("Mustang GT 5.0L V8 10-Speed Automatic RWD Coupe"));
        let resolved = resolver.resolve(&request).await;

        assert_eq!(resolved.specs.engine, "5.0L V8");
        assert_eq!(resolved.specs.transmission, "10-Speed Automatic");
        assert_eq!(resolved.specs.drivetrain, "RWD");
        assert_eq!(resolved.origins.engine, SpecOrigin::TopLevelDescription);
    }

    #[tokio::test]
    async fn test_exhaustion_with_manufacturer_default() {
        let (resolver, _) = resolver(Some(MockStructured::failing()));

        let trim = TrimOption::new("318d", "");
        let resolved = resolver
            .resolve(&SpecRequest::new(&trim, "2019", "BMW", "3 Series"))
            .await;

        assert_eq!(resolved.specs.engine, NOT_AVAILABLE);
        assert_eq!(resolved.specs.transmission, NOT_AVAILABLE);
        assert_eq!(resolved.specs.body_style, NOT_AVAILABLE);
        assert_eq!(resolved.specs.drivetrain, "RWD");
        assert_eq!(resolved.origins.drivetrain, SpecOrigin::ManufacturerDefault);
        assert_eq!(resolved.origins.engine, SpecOrigin::Exhausted);
    }

    #[tokio::test]
    async fn test_exhaustion_unknown_make() {
        let (resolver, _) = resolver(None);

        let trim = TrimOption::new("Classic", "");
        let resolved = resolver
            .resolve(&SpecRequest::new(&trim, "1988", "Lada", "Niva"))
            .await;

        assert_eq!(resolved.specs.drivetrain, NOT_AVAILABLE);
        assert_eq!(resolved.origins.drivetrain, SpecOrigin::Exhausted);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let api = MockStructured::returning(TrimSpecs::new("3.5L V6", "6-Speed Automatic", "4WD"));
        let (resolver, cache) = resolver(Some(api.clone()));

        let trim = TrimOption::new("Adventure", "");
        let request = SpecRequest::new(&trim, "2023", "Rivian", "R1T");

        let first = resolver.resolve(&request).await;
        let second = resolver.resolve(&request).await;

        assert_eq!(api.calls(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(first.specs, second.specs);
        assert_eq!(second.origins.engine, SpecOrigin::Cache);
    }

    #[tokio::test]
    async fn test_stale_sentinel_does_not_block_later_steps() {
        let (resolver, cache) = resolver(None);
        cache.put(
            SpecKey::new("2021", "Subaru", "Outback", "Wilderness"),
            TrimSpecs::new(NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE),
        );

        let trim = TrimOption::new("Wilderness", "");
        let resolved = resolver
            .resolve(&SpecRequest::new(&trim, "2021", "Subaru", "Outback"))
            .await;

        assert_eq!(resolved.specs.drivetrain, "AWD");
        assert_eq!(resolved.origins.drivetrain, SpecOrigin::ManufacturerDefault);
    }

    #[tokio::test]
    async fn test_fallback_steps_are_not_cached() {
        let (resolver, cache) = resolver(None);
        let trim = TrimOption::new("Foo", "");

        let first = resolver
            .resolve(&SpecRequest::new(&trim, "2019", "BMW", "X5"))
            .await;
        assert_eq!(first.specs.drivetrain, "RWD");
        assert_eq!(first.origins.drivetrain, SpecOrigin::ManufacturerDefault);
        assert_eq!(cache.len(), 1);

        let request = SpecRequest::new(&trim, "2019", "BMW", "X5")
            .with_top_level_description(Some("X5 xDrive40i AWD 3.0L I6 Turbo"));
        let second = resolver.resolve(&request).await;
        assert_eq!(second.specs.drivetrain, "AWD");
        assert_eq!(second.origins.drivetrain, SpecOrigin::TopLevelDescription);
        assert_eq!(second.specs.engine, "3.0L I6 Turbo");
        assert_eq!(second.origins.engine, SpecOrigin::TopLevelDescription);
    }

    #[tokio::test]
    async fn test_unreachable_source_is_retried() {
        let api = MockStructured::recovering(TrimSpecs::new("1.6L I4", "5-Speed Manual", "FWD"));
        let (resolver, cache) = resolver(Some(api.clone()));
        let trim = TrimOption::new("Foo", "");
        let request = SpecRequest::new(&trim, "2021", "Lada", "Vesta");

        let first = resolver.resolve(&request).await;
        assert_eq!(first.specs.engine, NOT_AVAILABLE);
        assert!(cache.is_empty());

        let second = resolver.resolve(&request).await;
        assert_eq!(second.specs.engine, "1.6L I4");
        assert_eq!(second.origins.engine, SpecOrigin::StructuredApi);
        assert_eq!(api.calls(), 2);

        let third = resolver.resolve(&request).await;
        assert_eq!(third.specs.engine, "1.6L I4");
        assert_eq!(third.origins.engine, SpecOrigin::Cache);
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_source_answer_is_cached() {
        let api = MockStructured::empty();
        let (resolver, _) = resolver(Some(api.clone()));
        let trim = TrimOption::new("Foo", "");
        let request = SpecRequest::new(&trim, "2021", "Lada", "Vesta");

        let first = resolver.resolve(&request).await;
        let second = resolver.resolve(&request).await;

        assert_eq!(first.specs, second.specs);
        assert_eq!(second.specs.engine, NOT_AVAILABLE);
        assert_eq!(api.calls(), 1);
    }
}
