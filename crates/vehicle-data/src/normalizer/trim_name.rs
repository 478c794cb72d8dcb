//! Canonical trim names.

use lazy_static::lazy_static;
use regex::Regex;

/// Fallback name when neither the raw name nor the description yields one.
pub const FALLBACK_TRIM_NAME: &str = "Base";

/// Raw names that carry no information and are treated as absent.
const GENERIC_TRIM_NAMES: &[&str] = &[
    "unknown",
    "n/a",
    "na",
    "not applicable",
    "not available",
    "none",
    "null",
    "standard",
    "default",
    "trim",
    "-",
];

/// Meaningful trim tokens scanned in descriptions, in priority order.
///
/// Longer spellings come before their prefixes ("Premium Plus" before
/// "Premium", "TRD Pro" before "TRD Sport").
const MEANINGFUL_TRIM_TOKENS: &[&str] = &[
    // Performance
    "M3 Competition",
    "Competition",
    "Launch Edition",
    "Shelby",
    "Raptor",
    "Hellcat",
    "SRT",
    "AMG",
    "Nismo",
    "Type R",
    "TRD Pro",
    "TRD Off-Road",
    "TRD Sport",
    "Rubicon",
    "Trailhawk",
    // Luxury
    "Premium Plus",
    "Platinum",
    "Prestige",
    "Signature",
    "King Ranch",
    "Denali",
    "Lariat",
    "Limited",
    "Touring",
    "Premium",
    "Luxury",
    // Sport / volume grades
    "Sport",
    "GT",
    "RS",
    "SS",
    "ST",
    "XSE",
    "XLE",
    "SEL",
    "SE",
    "LE",
    "EX-L",
    "EX",
    "LX",
    "SR5",
    "SV",
    "SL",
    // Body styles
    "Coupe",
    "Convertible",
    "Hatchback",
    "Wagon",
    "Sedan",
];

lazy_static! {
    static ref TOKEN_PATTERNS: Vec<(&'static str, Regex)> = MEANINGFUL_TRIM_TOKENS
        .iter()
        .map(|token| {
            // Short grade codes are matched case-sensitively so "se" or "le"
            // inside ordinary prose do not count.
            let flags = if token.len() > 3 { "(?i)" } else { "" };
            let pattern = format!(r"{}\b{}\b", flags, regex::escape(token));
            (*token, Regex::new(&pattern).expect("Invalid regex pattern"))
        })
        .collect();
}

/// True when the raw name is empty or one of the known placeholder values.
pub fn is_generic_trim_name(name: &str) -> bool {
    let lowered = name.trim().to_ascii_lowercase();
    lowered.is_empty() || GENERIC_TRIM_NAMES.contains(&lowered.as_str())
}

/// First meaningful trim token found in a description, in token priority order.
pub fn find_meaningful_token(description: &str) -> Option<&'static str> {
    TOKEN_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(description))
        .map(|(token, _)| *token)
}

/// Canonical trim name.
///
/// 1. A non-empty, non-generic raw name, verbatim (trimmed).
/// 2. The first meaningful token found in the description.
/// 3. [`FALLBACK_TRIM_NAME`].
pub fn normalize_trim_name(name: Option<&str>, description: Option<&str>) -> String {
    if let Some(name) = name {
        if !is_generic_trim_name(name) {
            return collapse_whitespace(name);
        }
    }

    description
        .and_then(find_meaningful_token)
        .unwrap_or(FALLBACK_TRIM_NAME)
        .to_string()
}

pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_name_used_verbatim() {
        assert_eq!(normalize_trim_name(Some("  M340i "), Some("Sport")), "M340i");
    }

    #[test]
    fn test_generic_name_falls_back_to_description() {
        assert_eq!(
            normalize_trim_name(Some("Not Applicable"), Some("Limited 4dr SUV AWD")),
            "Limited"
        );
        assert_eq!(normalize_trim_name(None, Some("Premium Plus 45 TFSI")), "Premium Plus");
    }

    #[test]
    fn test_token_priority_over_position() {
        // "Sport" appears first in the text but "Competition" ranks higher
        assert_eq!(
            normalize_trim_name(None, Some("Sport Sedan Competition Package")),
            "Competition"
        );
    }

    #[test]
    fn test_short_codes_are_case_sensitive() {
        assert_eq!(normalize_trim_name(None, Some("XLE V6")), "XLE");
        assert_eq!(normalize_trim_name(None, Some("se habla")), "Base");
    }

    #[test]
    fn test_fallback_base() {
        assert_eq!(normalize_trim_name(None, None), "Base");
        assert_eq!(normalize_trim_name(Some(""), Some("")), "Base");
        assert_eq!(normalize_trim_name(Some("unknown"), Some("4dr")), "Base");
    }

    #[test]
    fn test_normalization_is_stable() {
        let once = normalize_trim_name(None, Some("EX-L 4dr Sedan"));
        assert_eq!(once, "EX-L");
        assert_eq!(normalize_trim_name(Some(&once), None), once);
    }
}
