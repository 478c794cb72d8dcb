//! Static data tables.
//!
//! Hand-curated make/model trims, trim spec guesses, manufacturer default
//! drivetrains and VIN exemplars. Everything here is a pure lookup with no
//! I/O; resolution control flow lives in `resolver` and `service`.

mod defaults;
mod spec_guesses;
mod trims;
mod vin_exemplars;

pub use defaults::{default_drivetrain, DEFAULT_DRIVETRAINS};
pub use spec_guesses::{guess_trim_specs, SpecGuess, SPEC_GUESSES};
pub use trims::{get_comprehensive_trims, MakeTrims, ModelTrims, TRIM_TABLE};
pub use vin_exemplars::{exemplars_for, VinExemplar, VIN_EXEMPLARS};

/// Case-insensitive match where either side may be a substring of the other.
/// An empty query never matches.
pub(crate) fn matches_loosely(known: &str, query: &str) -> bool {
    let known = known.trim().to_lowercase();
    let query = query.trim().to_lowercase();
    if known.is_empty() || query.is_empty() {
        return false;
    }
    known == query || known.contains(&query) || query.contains(&known)
}
