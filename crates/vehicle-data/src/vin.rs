//! VIN helpers: length validation, model-year codes and check digits.

use crate::errors::VehicleDataError;

/// Required VIN length in characters.
pub const VIN_LENGTH: usize = 17;

/// Model-year codes (position 10), repeating every 30 years from 1980.
const MODEL_YEAR_CODES: &[u8; 30] = b"ABCDEFGHJKLMNPRSTVWXY123456789";

/// Position weights for the check digit calculation.
const CHECK_DIGIT_WEIGHTS: [u32; VIN_LENGTH] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

/// Validate VIN length and return it upper-cased.
///
/// Only the length is checked; decode backends decide whether the VIN
/// itself exists.
pub fn validate_vin(vin: &str) -> Result<String, VehicleDataError> {
    let length = vin.chars().count();
    if length != VIN_LENGTH {
        return Err(VehicleDataError::InvalidVinLength { length });
    }
    Ok(vin.to_ascii_uppercase())
}

/// The position-10 code for a model year (1980 onwards).
pub fn model_year_code(year: u16) -> Option<char> {
    if year < 1980 {
        return None;
    }
    let index = usize::from(year - 1980) % MODEL_YEAR_CODES.len();
    Some(MODEL_YEAR_CODES[index] as char)
}

fn transliterate(c: char) -> Option<u32> {
    let value = match c {
        '0'..='9' => c.to_digit(10)?,
        'A' | 'J' => 1,
        'B' | 'K' | 'S' => 2,
        'C' | 'L' | 'T' => 3,
        'D' | 'M' | 'U' => 4,
        'E' | 'N' | 'V' => 5,
        'F' | 'W' => 6,
        'G' | 'P' | 'X' => 7,
        'H' | 'Y' => 8,
        'R' | 'Z' => 9,
        // I, O and Q never appear in a VIN
        _ => return None,
    };
    Some(value)
}

/// Compute the check digit (position 9) of a 17-character VIN.
///
/// Returns `None` for wrong lengths or characters outside the VIN alphabet.
pub fn check_digit(vin: &str) -> Option<char> {
    let chars: Vec<char> = vin.to_ascii_uppercase().chars().collect();
    if chars.len() != VIN_LENGTH {
        return None;
    }

    let mut sum = 0u32;
    for (c, weight) in chars.iter().zip(CHECK_DIGIT_WEIGHTS) {
        sum += transliterate(*c)? * weight;
    }

    match sum % 11 {
        10 => Some('X'),
        remainder => char::from_digit(remainder, 10),
    }
}

/// Rewrite an exemplar VIN for another model year.
///
/// Replaces the model-year code and recomputes the check digit so the
/// result decodes as a well-formed VIN of that year.
pub fn with_model_year(vin: &str, year: u16) -> Option<String> {
    let mut chars: Vec<char> = vin.to_ascii_uppercase().chars().collect();
    if chars.len() != VIN_LENGTH {
        return None;
    }

    chars[9] = model_year_code(year)?;
    chars[8] = '0';
    let provisional: String = chars.iter().collect();
    chars[8] = check_digit(&provisional)?;

    Some(chars.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_vin_length() {
        assert!(validate_vin("1HGCM82633A004352").is_ok());
        assert!(matches!(
            validate_vin("1HGCM82633A00435"),
            Err(VehicleDataError::InvalidVinLength { length: 16 })
        ));
        assert!(matches!(
            validate_vin(""),
            Err(VehicleDataError::InvalidVinLength { length: 0 })
        ));
    }

    #[test]
    fn test_validate_vin_uppercases() {
        assert_eq!(validate_vin("1hgcm82633a004352").unwrap(), "1HGCM82633A004352");
    }

    #[test]
    fn test_model_year_code() {
        assert_eq!(model_year_code(1980), Some('A'));
        assert_eq!(model_year_code(2001), Some('1'));
        assert_eq!(model_year_code(2010), Some('A'));
        assert_eq!(model_year_code(2023), Some('P'));
        assert_eq!(model_year_code(1979), None);
    }

    #[test]
    fn test_check_digit_known_vins() {
        assert_eq!(check_digit("1M8GDM9AXKP042788"), Some('X'));
        assert_eq!(check_digit("11111111111111111"), Some('1'));
        assert_eq!(check_digit("1HGCM82633A004352"), Some('3'));
    }

    #[test]
    fn test_check_digit_rejects_bad_input() {
        assert_eq!(check_digit("1HGCM8263"), None);
        assert_eq!(check_digit("1HGCM82633A00O352"), None);
    }

    #[test]
    fn test_with_model_year() {
        assert_eq!(
            with_model_year("WBA5R1C05LFH12345", 2023).as_deref(),
            Some("WBA5R1C03PFH12345")
        );
    }
}
