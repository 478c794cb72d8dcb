//! Hand-curated make/model trim lists.

use super::matches_loosely;

/// Trim names for one model.
#[derive(Clone, Copy, Debug)]
pub struct ModelTrims {
    pub model: &'static str,
    pub trims: &'static [&'static str],
}

/// Models for one make, in lookup order.
#[derive(Clone, Copy, Debug)]
pub struct MakeTrims {
    pub make: &'static str,
    pub models: &'static [ModelTrims],
}

/// Local trim table. Within a make, models whose names contain other
/// models' names come first ("3 Series" before "X3") so loose matching
/// lands on the intended entry.
pub const TRIM_TABLE: &[MakeTrims] = &[
    MakeTrims {
        make: "BMW",
        models: &[
            ModelTrims {
                model: "3 Series",
                trims: &["330i", "330e", "M340i", "M3", "M3 Competition"],
            },
            ModelTrims {
                model: "5 Series",
                trims: &["530i", "530e", "540i", "M550i", "M5"],
            },
            ModelTrims {
                model: "X3",
                trims: &["sDrive30i", "xDrive30i", "M40i", "X3 M"],
            },
            ModelTrims {
                model: "X5",
                trims: &["sDrive40i", "xDrive40i", "xDrive45e", "M50i", "X5 M"],
            },
        ],
    },
    MakeTrims {
        make: "Toyota",
        models: &[
            ModelTrims {
                model: "Camry",
                trims: &["LE", "SE", "XLE", "XSE", "TRD"],
            },
            ModelTrims {
                model: "Corolla",
                trims: &["L", "LE", "SE", "XLE", "XSE"],
            },
            ModelTrims {
                model: "RAV4",
                trims: &["LE", "XLE", "XLE Premium", "Adventure", "TRD Off-Road", "Limited"],
            },
            ModelTrims {
                model: "Tacoma",
                trims: &["SR", "SR5", "TRD Sport", "TRD Off-Road", "Limited", "TRD Pro"],
            },
            ModelTrims {
                model: "Highlander",
                trims: &["L", "LE", "XLE", "Limited", "Platinum"],
            },
        ],
    },
    MakeTrims {
        make: "Honda",
        models: &[
            ModelTrims {
                model: "Civic",
                trims: &["LX", "Sport", "EX", "Touring", "Si", "Type R"],
            },
            ModelTrims {
                model: "Accord",
                trims: &["LX", "Sport", "EX-L", "Touring"],
            },
            ModelTrims {
                model: "CR-V",
                trims: &["LX", "EX", "EX-L", "Sport", "Sport Touring"],
            },
        ],
    },
    MakeTrims {
        make: "Ford",
        models: &[
            ModelTrims {
                model: "F-150",
                trims: &["XL", "XLT", "Lariat", "King Ranch", "Platinum", "Limited", "Raptor"],
            },
            ModelTrims {
                model: "Mustang",
                trims: &["EcoBoost", "EcoBoost Premium", "GT", "GT Premium", "Mach 1", "Dark Horse"],
            },
            ModelTrims {
                model: "Explorer",
                trims: &["Base", "XLT", "Limited", "ST", "Platinum"],
            },
        ],
    },
    MakeTrims {
        make: "Chevrolet",
        models: &[
            ModelTrims {
                model: "Silverado 1500",
                trims: &["WT", "Custom", "LT", "RST", "LTZ", "High Country", "ZR2"],
            },
            ModelTrims {
                model: "Camaro",
                trims: &["1LS", "1LT", "2LT", "LT1", "1SS", "2SS", "ZL1"],
            },
            ModelTrims {
                model: "Equinox",
                trims: &["LS", "LT", "RS", "Premier"],
            },
        ],
    },
    MakeTrims {
        make: "Tesla",
        models: &[
            ModelTrims {
                model: "Model 3",
                trims: &["Rear-Wheel Drive", "Long Range", "Performance"],
            },
            ModelTrims {
                model: "Model Y",
                trims: &["Long Range", "Performance"],
            },
        ],
    },
    MakeTrims {
        make: "Mercedes-Benz",
        models: &[
            ModelTrims {
                model: "C-Class",
                trims: &["C 300", "C 300 4MATIC", "AMG C 43", "AMG C 63"],
            },
            ModelTrims {
                model: "GLE",
                trims: &["GLE 350", "GLE 450", "AMG GLE 53", "AMG GLE 63 S"],
            },
        ],
    },
    MakeTrims {
        make: "Audi",
        models: &[
            ModelTrims {
                model: "A4",
                trims: &["Premium", "Premium Plus", "Prestige"],
            },
            ModelTrims {
                model: "Q5",
                trims: &["Premium", "Premium Plus", "Prestige"],
            },
        ],
    },
    MakeTrims {
        make: "Subaru",
        models: &[
            ModelTrims {
                model: "Outback",
                trims: &["Base", "Premium", "Limited", "Touring", "Onyx Edition XT", "Wilderness"],
            },
            ModelTrims {
                model: "WRX",
                trims: &["Base", "Premium", "Limited", "GT"],
            },
        ],
    },
    MakeTrims {
        make: "Porsche",
        models: &[ModelTrims {
            model: "911",
            trims: &["Carrera", "Carrera S", "Carrera 4S", "Turbo", "Turbo S", "GT3"],
        }],
    },
];

fn find_make(make: &str) -> Option<&'static MakeTrims> {
    TRIM_TABLE
        .iter()
        .find(|entry| entry.make.eq_ignore_ascii_case(make.trim()))
        .or_else(|| {
            TRIM_TABLE
                .iter()
                .find(|entry| matches_loosely(entry.make, make))
        })
}

fn find_model(entry: &'static MakeTrims, model: &str) -> Option<&'static ModelTrims> {
    entry
        .models
        .iter()
        .find(|m| m.model.eq_ignore_ascii_case(model.trim()))
        .or_else(|| entry.models.iter().find(|m| matches_loosely(m.model, model)))
}

/// Trim names for a make/model from the local table.
///
/// Pure lookup: case-insensitive, exact names preferred, then either side
/// being a substring of the other ("3 SERIES" vs "3"). Returns an empty
/// list when nothing matches.
pub fn get_comprehensive_trims(make: &str, model: &str) -> Vec<String> {
    find_make(make)
        .and_then(|entry| find_model(entry, model))
        .map(|m| m.trims.iter().map(|t| t.to_string()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmw_3_series() {
        assert_eq!(
            get_comprehensive_trims("BMW", "3 SERIES"),
            vec!["330i", "330e", "M340i", "M3", "M3 Competition"]
        );
    }

    #[test]
    fn test_substring_either_side() {
        let expected = get_comprehensive_trims("BMW", "3 Series");
        assert_eq!(get_comprehensive_trims("bmw", "3"), expected);
        assert_eq!(get_comprehensive_trims("Mercedes", "C-Class").len(), 4);
        assert_eq!(
            get_comprehensive_trims("Chevrolet", "Silverado").first().map(String::as_str),
            Some("WT")
        );
    }

    #[test]
    fn test_exact_model_preferred() {
        assert_eq!(
            get_comprehensive_trims("BMW", "X3"),
            vec!["sDrive30i", "xDrive30i", "M40i", "X3 M"]
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(get_comprehensive_trims("Lada", "Niva").is_empty());
        assert!(get_comprehensive_trims("BMW", "Isetta").is_empty());
        assert!(get_comprehensive_trims("", "").is_empty());
    }
}
