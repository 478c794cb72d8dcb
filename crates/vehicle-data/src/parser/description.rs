//! Spec extraction from free-form trim descriptions.
//!
//! Every function here is total: no match yields the empty string, and the
//! input is only borrowed. Returned values use canonical spelling
//! (`8-Speed Automatic`, `AWD`) rather than the raw matched text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Engine displacement, e.g. "2.0L", "5 L"
    static ref DISPLACEMENT_REGEX: Regex =
        Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s?L\b").expect("Invalid regex pattern");

    /// Cylinder layout, e.g. "V6", "I4", "H4", "Inline 6"
    static ref CYLINDERS_REGEX: Regex =
        Regex::new(r"\b(?:([VIHW])(\d{1,2})|(?i:in-?line)[\s-]*(\d{1,2}))\b")
            .expect("Invalid regex pattern");

    /// Forced induction
    static ref INDUCTION_REGEX: Regex =
        Regex::new(r"(?i)\b(twin[\s-]?turbo(?:charged)?|turbo(?:charged)?|supercharged)\b")
            .expect("Invalid regex pattern");

    /// Electrification
    static ref ELECTRIFICATION_REGEX: Regex =
        Regex::new(r"(?i)\b(plug[\s-]?in[\s-]hybrid|hybrid|electric)\b")
            .expect("Invalid regex pattern");

    /// Speed count plus type, e.g. "8-Speed Automatic", "6 speed manual"
    static ref SPEED_TRANSMISSION_REGEX: Regex =
        Regex::new(r"(?i)\b(\d{1,2})\s*-?\s*speed\s*(automatic|manual|cvt)\b")
            .expect("Invalid regex pattern");

    /// Compact automated-manual / manual codes, e.g. "7AM", "6MM"
    static ref COMPACT_DUAL_CODE_REGEX: Regex =
        Regex::new(r"\b(\d{1,2})(AM|MM)\b").expect("Invalid regex pattern");

    /// Parenthesised spec block, e.g. "(2.0L 4cyl Turbo 8A)"
    static ref SPEC_BLOCK_REGEX: Regex =
        Regex::new(r"\(([^)]*)\)").expect("Invalid regex pattern");

    /// Compact single-letter codes, e.g. "8A", "6M". Only read inside spec
    /// blocks: outside them they collide with model names ("1M Coupe").
    static ref COMPACT_SINGLE_CODE_REGEX: Regex =
        Regex::new(r"\b(\d{1,2})([AM])\b").expect("Invalid regex pattern");

    /// Bare transmission type
    static ref BARE_TRANSMISSION_REGEX: Regex =
        Regex::new(r"(?i)\b(automatic|manual|cvt|dct|sequential)\b")
            .expect("Invalid regex pattern");

    /// Drivetrain abbreviations, spelled-out forms and brand drive systems
    static ref DRIVETRAIN_REGEX: Regex = Regex::new(
        r"(?i)\b(sh-awd|awd|fwd|rwd|4wd|4x4|all[\s-]wheel[\s-]drive|front[\s-]wheel[\s-]drive|rear[\s-]wheel[\s-]drive|four[\s-]wheel[\s-]drive|4[\s-]wheel[\s-]drive|xdrive|quattro|4matic|4motion)\b"
    )
    .expect("Invalid regex pattern");

    /// Body style words
    static ref BODY_STYLE_REGEX: Regex = Regex::new(
        r"(?i)\b(sedan|saloon|coupe|convertible|cabriolet|hatchback|wagon|sport utility|suv|crew\s*cab|extended\s*cab|regular\s*cab|pickup|minivan|van)\b"
    )
    .expect("Invalid regex pattern");
}

/// Extract an engine description.
///
/// Concatenates, space-separated and in this order, whichever of
/// displacement, cylinder layout, induction and electrification are present.
///
/// ```
/// use dealerbid_vehicle_data::parser::extract_engine_from_description;
///
/// assert_eq!(
///     extract_engine_from_description("3.0L Twin-Turbo V6 Hybrid"),
///     "3.0L V6 Twin-Turbo Hybrid"
/// );
/// ```
pub fn extract_engine_from_description(description: &str) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);

    if let Some(caps) = DISPLACEMENT_REGEX.captures(description) {
        parts.push(format!("{}L", &caps[1]));
    }

    if let Some(caps) = CYLINDERS_REGEX.captures(description) {
        let layout = match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(letter), Some(count), _) => format!("{}{}", letter.as_str(), count.as_str()),
            (_, _, Some(count)) => format!("I{}", count.as_str()),
            _ => String::new(),
        };
        if !layout.is_empty() {
            parts.push(layout);
        }
    }

    if let Some(m) = INDUCTION_REGEX.find(description) {
        let token = m.as_str().to_ascii_lowercase();
        let canonical = if token.starts_with("twin") {
            "Twin-Turbo"
        } else if token.starts_with("turbo") {
            "Turbo"
        } else {
            "Supercharged"
        };
        parts.push(canonical.to_string());
    }

    if let Some(m) = ELECTRIFICATION_REGEX.find(description) {
        let token = m.as_str().to_ascii_lowercase();
        let canonical = if token.starts_with("plug") {
            "Plug-In Hybrid"
        } else if token == "hybrid" {
            "Hybrid"
        } else {
            "Electric"
        };
        parts.push(canonical.to_string());
    }

    parts.join(" ")
}

/// Extract a transmission description. First matching pattern wins:
/// speed count plus type, compact codes, then a bare type word.
pub fn extract_transmission_from_description(description: &str) -> String {
    if let Some(caps) = SPEED_TRANSMISSION_REGEX.captures(description) {
        return format!("{}-Speed {}", &caps[1], canonical_transmission_type(&caps[2]));
    }

    if let Some(caps) = COMPACT_DUAL_CODE_REGEX.captures(description) {
        let kind = if &caps[2] == "AM" {
            "Automated Manual"
        } else {
            "Manual"
        };
        return format!("{}-Speed {}", &caps[1], kind);
    }

    let block_code = SPEC_BLOCK_REGEX
        .captures_iter(description)
        .find_map(|block| COMPACT_SINGLE_CODE_REGEX.captures(block.get(1)?.as_str()))
        .map(|caps| {
            let kind = if &caps[2] == "A" { "Automatic" } else { "Manual" };
            format!("{}-Speed {}", &caps[1], kind)
        });
    if let Some(transmission) = block_code {
        return transmission;
    }

    BARE_TRANSMISSION_REGEX
        .find(description)
        .map(|m| canonical_transmission_type(m.as_str()).to_string())
        .unwrap_or_default()
}

/// Extract a drivetrain abbreviation (`AWD`, `FWD`, `RWD`, `4WD`).
/// The leftmost match in the text wins.
pub fn extract_drivetrain_from_description(description: &str) -> String {
    let Some(m) = DRIVETRAIN_REGEX.find(description) else {
        return String::new();
    };

    let token = m.as_str().to_ascii_lowercase();
    let canonical = if token.starts_with("front") || token == "fwd" {
        "FWD"
    } else if token.starts_with("rear") || token == "rwd" {
        "RWD"
    } else if token.starts_with("four") || (token.starts_with('4') && !token.starts_with("4m")) {
        "4WD"
    } else {
        "AWD"
    };
    canonical.to_string()
}

/// Extract a body style (`Sedan`, `Coupe`, `SUV`, ...). Leftmost match wins.
pub fn extract_body_style_from_description(description: &str) -> String {
    let Some(m) = BODY_STYLE_REGEX.find(description) else {
        return String::new();
    };

    let token = m.as_str().to_ascii_lowercase();
    let collapsed = token.split_whitespace().collect::<Vec<_>>().join(" ");
    let canonical = match collapsed.as_str() {
        "sedan" | "saloon" => "Sedan",
        "coupe" => "Coupe",
        "convertible" | "cabriolet" => "Convertible",
        "hatchback" => "Hatchback",
        "wagon" => "Wagon",
        "sport utility" | "suv" => "SUV",
        "crew cab" | "crewcab" => "Crew Cab",
        "extended cab" | "extendedcab" => "Extended Cab",
        "regular cab" | "regularcab" => "Regular Cab",
        "pickup" => "Pickup",
        "minivan" => "Minivan",
        _ => "Van",
    };
    canonical.to_string()
}

fn canonical_transmission_type(token: &str) -> &'static str {
    match token.to_ascii_lowercase().as_str() {
        "automatic" => "Automatic",
        "manual" => "Manual",
        "cvt" => "CVT",
        "dct" => "DCT",
        _ => "Sequential",
    }
}
