//! Trim -> spec guesses for the local trim table.

use super::matches_loosely;
use crate::models::TrimSpecs;

/// Best-known specs for a trim, optionally limited to one model.
#[derive(Clone, Copy, Debug)]
pub struct SpecGuess {
    pub make: &'static str,
    pub model: Option<&'static str>,
    pub trim: &'static str,
    pub engine: &'static str,
    pub transmission: &'static str,
    pub drivetrain: &'static str,
    pub body_style: &'static str,
}

const fn guess(
    make: &'static str,
    model: Option<&'static str>,
    trim: &'static str,
    engine: &'static str,
    transmission: &'static str,
    drivetrain: &'static str,
    body_style: &'static str,
) -> SpecGuess {
    SpecGuess {
        make,
        model,
        trim,
        engine,
        transmission,
        drivetrain,
        body_style,
    }
}

pub const SPEC_GUESSES: &[SpecGuess] = &[
    // BMW
    guess("BMW", Some("3 Series"), "330i", "2.0L I4 Turbo", "8-Speed Automatic", "RWD", "Sedan"),
    guess("BMW", Some("3 Series"), "330e", "2.0L I4 Turbo Plug-In Hybrid", "8-Speed Automatic", "RWD", "Sedan"),
    guess("BMW", Some("3 Series"), "M340i", "3.0L I6 Turbo", "8-Speed Automatic", "RWD", "Sedan"),
    guess("BMW", None, "M3", "3.0L I6 Twin-Turbo", "6-Speed Manual", "RWD", "Sedan"),
    guess("BMW", None, "M3 Competition", "3.0L I6 Twin-Turbo", "8-Speed Automatic", "RWD", "Sedan"),
    guess("BMW", Some("5 Series"), "530i", "2.0L I4 Turbo", "8-Speed Automatic", "RWD", "Sedan"),
    guess("BMW", Some("5 Series"), "540i", "3.0L I6 Turbo", "8-Speed Automatic", "RWD", "Sedan"),
    guess("BMW", Some("5 Series"), "M5", "4.4L V8 Twin-Turbo", "8-Speed Automatic", "AWD", "Sedan"),
    guess("BMW", Some("X3"), "xDrive30i", "2.0L I4 Turbo", "8-Speed Automatic", "AWD", "SUV"),
    guess("BMW", Some("X3"), "M40i", "3.0L I6 Turbo", "8-Speed Automatic", "AWD", "SUV"),
    guess("BMW", Some("X5"), "xDrive40i", "3.0L I6 Turbo", "8-Speed Automatic", "AWD", "SUV"),
    // Toyota
    guess("Toyota", Some("Camry"), "LE", "2.5L I4", "8-Speed Automatic", "FWD", "Sedan"),
    guess("Toyota", Some("Camry"), "SE", "2.5L I4", "8-Speed Automatic", "FWD", "Sedan"),
    guess("Toyota", Some("Camry"), "XLE", "2.5L I4", "8-Speed Automatic", "FWD", "Sedan"),
    guess("Toyota", Some("Camry"), "XSE", "2.5L I4", "8-Speed Automatic", "FWD", "Sedan"),
    guess("Toyota", Some("Camry"), "TRD", "3.5L V6", "8-Speed Automatic", "FWD", "Sedan"),
    guess("Toyota", Some("Tacoma"), "TRD Pro", "3.5L V6", "6-Speed Automatic", "4WD", "Crew Cab"),
    guess("Toyota", Some("RAV4"), "Adventure", "2.5L I4", "8-Speed Automatic", "AWD", "SUV"),
    // Honda
    guess("Honda", Some("Civic"), "LX", "2.0L I4", "CVT", "FWD", "Sedan"),
    guess("Honda", Some("Civic"), "Sport", "2.0L I4", "CVT", "FWD", "Sedan"),
    guess("Honda", Some("Civic"), "EX", "1.5L I4 Turbo", "CVT", "FWD", "Sedan"),
    guess("Honda", Some("Civic"), "Touring", "1.5L I4 Turbo", "CVT", "FWD", "Sedan"),
    guess("Honda", Some("Civic"), "Si", "1.5L I4 Turbo", "6-Speed Manual", "FWD", "Sedan"),
    guess("Honda", Some("Civic"), "Type R", "2.0L I4 Turbo", "6-Speed Manual", "FWD", "Hatchback"),
    // Ford
    guess("Ford", Some("F-150"), "Raptor", "3.5L V6 Twin-Turbo", "10-Speed Automatic", "4WD", "Crew Cab"),
    guess("Ford", Some("Mustang"), "EcoBoost", "2.3L I4 Turbo", "10-Speed Automatic", "RWD", "Coupe"),
    guess("Ford", Some("Mustang"), "GT", "5.0L V8", "6-Speed Manual", "RWD", "Coupe"),
    guess("Ford", Some("Mustang"), "Dark Horse", "5.0L V8", "6-Speed Manual", "RWD", "Coupe"),
    // Chevrolet
    guess("Chevrolet", Some("Camaro"), "ZL1", "6.2L V8 Supercharged", "10-Speed Automatic", "RWD", "Coupe"),
    guess("Chevrolet", Some("Camaro"), "1SS", "6.2L V8", "6-Speed Manual", "RWD", "Coupe"),
    // Tesla
    guess("Tesla", Some("Model 3"), "Rear-Wheel Drive", "Electric", "1-Speed Automatic", "RWD", "Sedan"),
    guess("Tesla", Some("Model 3"), "Long Range", "Electric", "1-Speed Automatic", "AWD", "Sedan"),
    guess("Tesla", Some("Model 3"), "Performance", "Electric", "1-Speed Automatic", "AWD", "Sedan"),
    guess("Tesla", Some("Model Y"), "Long Range", "Electric", "1-Speed Automatic", "AWD", "SUV"),
    guess("Tesla", Some("Model Y"), "Performance", "Electric", "1-Speed Automatic", "AWD", "SUV"),
    // Subaru
    guess("Subaru", Some("Outback"), "Premium", "2.5L H4", "CVT", "AWD", "Wagon"),
    guess("Subaru", Some("Outback"), "Onyx Edition XT", "2.4L H4 Turbo", "CVT", "AWD", "Wagon"),
    guess("Subaru", Some("WRX"), "Base", "2.4L H4 Turbo", "6-Speed Manual", "AWD", "Sedan"),
    // Porsche
    guess("Porsche", Some("911"), "Carrera", "3.0L H6 Twin-Turbo", "8-Speed DCT", "RWD", "Coupe"),
    guess("Porsche", Some("911"), "Carrera 4S", "3.0L H6 Twin-Turbo", "8-Speed DCT", "AWD", "Coupe"),
    guess("Porsche", Some("911"), "GT3", "4.0L H6", "7-Speed DCT", "RWD", "Coupe"),
];

/// Spec guess for a trim from the local table.
///
/// Model-specific entries win over make-wide ones. Unknown trims yield
/// empty specs, never an error.
pub fn guess_trim_specs(make: &str, model: &str, trim: &str) -> TrimSpecs {
    let trim = trim.trim();
    let candidates = SPEC_GUESSES.iter().filter(|g| {
        g.trim.eq_ignore_ascii_case(trim) && matches_loosely(g.make, make)
    });

    let mut make_wide: Option<&SpecGuess> = None;
    for candidate in candidates {
        match candidate.model {
            Some(m) if matches_loosely(m, model) => return to_specs(candidate),
            Some(_) => {}
            None if make_wide.is_none() => make_wide = Some(candidate),
            None => {}
        }
    }

    make_wide.map(to_specs).unwrap_or_default()
}

fn to_specs(guess: &SpecGuess) -> TrimSpecs {
    TrimSpecs::new(guess.engine, guess.transmission, guess.drivetrain)
        .with_body_style(guess.body_style)
}
