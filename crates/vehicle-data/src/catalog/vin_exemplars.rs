//! Real-world VIN exemplars per make, used to probe the pattern decoder.

use super::matches_loosely;

#[derive(Clone, Copy, Debug)]
pub struct VinExemplar {
    pub make: &'static str,
    pub model: &'static str,
    pub vin: &'static str,
}

const fn exemplar(make: &'static str, model: &'static str, vin: &'static str) -> VinExemplar {
    VinExemplar { make, model, vin }
}

/// Exemplar table. The model-year code and check digit of each entry are
/// rewritten for the requested year before decoding.
pub const VIN_EXEMPLARS: &[VinExemplar] = &[
    exemplar("BMW", "3 Series", "WBA5R1C05LFH12345"),
    exemplar("BMW", "M3", "WBS33AY09PFM12345"),
    exemplar("BMW", "X5", "5UXCR6C09L9B12345"),
    exemplar("Toyota", "Camry", "4T1B11HK5KU123456"),
    exemplar("Toyota", "RAV4", "2T3P1RFV8MC123456"),
    exemplar("Toyota", "Tacoma", "3TMCZ5AN1MM123456"),
    exemplar("Honda", "Civic", "2HGFC2F59LH123456"),
    exemplar("Honda", "Accord", "1HGCV1F30LA123456"),
    exemplar("Honda", "CR-V", "7FARW2H85ME123456"),
    exemplar("Ford", "F-150", "1FTFW1E50MFA12345"),
    exemplar("Ford", "Mustang", "1FA6P8CF5L5123456"),
    exemplar("Chevrolet", "Silverado 1500", "1GCUYDED5MZ123456"),
    exemplar("Chevrolet", "Camaro", "1G1FB1RS0L0123456"),
    exemplar("Tesla", "Model 3", "5YJ3E1EA7LF123456"),
    exemplar("Tesla", "Model Y", "5YJYGDEE1MF123456"),
    exemplar("Mercedes-Benz", "C-Class", "W1KAF4HB5MR123456"),
    exemplar("Audi", "A4", "WAUDAAF41MN123456"),
    exemplar("Subaru", "Outback", "4S4BTAFC5L3123456"),
    exemplar("Porsche", "911", "WP0AB2A94LS123456"),
    exemplar("Nissan", "Altima", "1N4BL4BV5LC123456"),
    exemplar("Hyundai", "Elantra", "5NPD84LF5LH123456"),
    exemplar("Jeep", "Wrangler", "1C4HJXDG5LW123456"),
];

/// Exemplars for a make, those matching the model first, capped at `limit`.
pub fn exemplars_for(make: &str, model: &str, limit: usize) -> Vec<&'static VinExemplar> {
    let (mut matching, others): (Vec<_>, Vec<_>) = VIN_EXEMPLARS
        .iter()
        .filter(|e| matches_loosely(e.make, make))
        .partition(|e| matches_loosely(e.model, model));

    matching.extend(others);
    matching.truncate(limit);
    matching
}
