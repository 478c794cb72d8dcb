//! Manufacturer-wide default drivetrains.

use super::matches_loosely;

/// Makes whose line-up is dominated by one drivetrain.
///
/// Only drivetrain has reliable manufacturer-wide defaults; there is no
/// equivalent table for engine or transmission.
pub const DEFAULT_DRIVETRAINS: &[(&str, &str)] = &[
    ("BMW", "RWD"),
    ("Mercedes-Benz", "RWD"),
    ("Porsche", "RWD"),
    ("Lexus", "RWD"),
    ("Audi", "AWD"),
    ("Subaru", "AWD"),
    ("Land Rover", "AWD"),
    ("Jeep", "4WD"),
    ("Honda", "FWD"),
    ("Toyota", "FWD"),
    ("Nissan", "FWD"),
    ("Hyundai", "FWD"),
    ("Kia", "FWD"),
    ("Mazda", "FWD"),
    ("Volkswagen", "FWD"),
];

/// Default drivetrain for a make, if the make is known.
pub fn default_drivetrain(make: &str) -> Option<&'static str> {
    DEFAULT_DRIVETRAINS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(make.trim()))
        .or_else(|| {
            DEFAULT_DRIVETRAINS
                .iter()
                .find(|(known, _)| matches_loosely(known, make))
        })
        .map(|(_, drivetrain)| *drivetrain)
}
