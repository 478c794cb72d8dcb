//! Near-duplicate trim removal.

use std::collections::HashMap;

use log::debug;

use super::trim_name::{collapse_whitespace, normalize_trim_name};
use crate::models::TrimOption;

/// Explicit alias equivalences: canonical label and the source spellings
/// that resolve to it. Matching is case-insensitive on whitespace-collapsed
/// names. Only spellings listed here are merged.
const TRIM_ALIASES: &[(&str, &[&str])] = &[(
    "M3 Competition",
    &[
        "m3 competition",
        "m3 comp",
        "competition m3",
        "m3 competition package",
        "m3 competition sedan",
    ],
)];

/// The canonical alias a trim name resolves to, if any.
pub fn resolve_alias(name: &str) -> Option<&'static str> {
    let key = collapse_whitespace(name).to_lowercase();
    TRIM_ALIASES
        .iter()
        .find(|(_, spellings)| spellings.contains(&key.as_str()))
        .map(|(canonical, _)| *canonical)
}

/// Key under which two trims count as the same entry.
fn dedup_key(normalized: &str) -> String {
    match resolve_alias(normalized) {
        Some(canonical) => canonical.to_lowercase(),
        None => normalized.to_lowercase(),
    }
}

/// Comparison key for a bare trim name, as used by [`deduplicate_trims`].
///
/// Two names with equal keys denote the same trim.
pub fn trim_key(name: &str) -> String {
    dedup_key(&normalize_trim_name(Some(name), None))
}

/// Remove near-duplicate trims.
///
/// Two trims are duplicates when their normalized names are equal, or both
/// resolve to the same entry in the alias table. The first occurrence wins
/// and keeps its position; its name is replaced by the normalized name and
/// any spec fields it lacks are filled from later duplicates. Applying this
/// twice yields the same list as applying it once.
pub fn deduplicate_trims(trims: Vec<TrimOption>) -> Vec<TrimOption> {
    let input_len = trims.len();
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(input_len);
    let mut unique: Vec<TrimOption> = Vec::with_capacity(input_len);

    for mut trim in trims {
        let normalized = normalize_trim_name(Some(&trim.name), Some(&trim.description));
        let key = dedup_key(&normalized);

        match seen.get(&key) {
            Some(&index) => {
                let kept = &mut unique[index];
                kept.specs = std::mem::take(&mut kept.specs).or_fill(&trim.specs);
            }
            None => {
                trim.name = normalized;
                seen.insert(key, unique.len());
                unique.push(trim);
            }
        }
    }

    if unique.len() < input_len {
        debug!(
            "Deduplicated trims: {} -> {} entries",
            input_len,
            unique.len()
        );
    }

    unique
}
