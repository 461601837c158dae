//! Structured extraction from a single normalized entry.
//!
//! Two grammars are tried in order.
//!
//! Dimension grammar, anchored on the first `(` that yields a match:
//!
//! ```text
//! ( [first x] [second x] last UNIT [, weight WUNIT] [any] ) rest
//!
//! number := [0-9.]+
//! UNIT   := cm | in. | mm
//! WUNIT  := word characters, possibly empty (g, kg, dwt, oz, ...)
//! ```
//!
//! | leading groups | height | width  | depth |
//! |----------------|--------|--------|-------|
//! | 0              | last   | last   | -     |
//! | 1              | first  | last   | -     |
//! | 2              | first  | second | last  |
//!
//! Weight grammar, used only when the dimension grammar does not match:
//! `( number g )` closing the entry.

use crate::dimension::measurement::Measurement;
use crate::dimension::normalizer::SEPARATOR;
use crate::dimension::units::{LengthUnit, WeightUnit};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::num::ParseFloatError;

const NUMBER: &str = r"[0-9.]+";

static DIMENSION_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    let leading = |name: &str| format!(r"(?:(?P<{name}>{NUMBER})\s{SEPARATOR}\s)?");
    let pattern = format!(
        r"^.*?\({first}{second}(?P<last>{NUMBER})\s?(?P<length_unit>cm|in\.|mm){weight}.?\).*$",
        first = leading("first"),
        second = leading("second"),
        weight = format!(r"(?:,.(?P<weight>{NUMBER}).(?P<weight_unit>\w*))?"),
    );
    Regex::new(&pattern).expect("dimension grammar")
});

static WEIGHT_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^.*?\((?P<weight>{NUMBER})\s?g\)$")).expect("weight grammar")
});

/// Extract a measurement from one normalized entry. Returns `None` when
/// neither grammar matches or when any matched number fails to parse.
pub fn extract(normalized: &str) -> Option<Measurement> {
    if let Some(caps) = DIMENSION_GRAMMAR.captures(normalized) {
        return extract_dimensions(&caps).ok().flatten();
    }
    let caps = WEIGHT_GRAMMAR.captures(normalized)?;
    let grams = caps["weight"].parse::<f64>().ok()?;
    Some(Measurement::weight_only(grams * WeightUnit::Gram.to_grams()))
}

fn extract_dimensions(caps: &Captures) -> Result<Option<Measurement>, ParseFloatError> {
    let Some(unit) = LengthUnit::from_tag(&caps["length_unit"]) else {
        return Ok(None);
    };
    let scale = unit.to_centimeters();

    let last = caps["last"].parse::<f64>()? * scale;
    let first = scaled_group(caps, "first", scale)?;
    let second = scaled_group(caps, "second", scale)?;

    let (height, width, depth) = match (first, second) {
        (Some(height), Some(width)) => (height, width, Some(last)),
        (Some(height), None) | (None, Some(height)) => (height, last, None),
        (None, None) => (last, last, None),
    };

    let weight = match (caps.name("weight"), caps.name("weight_unit")) {
        (Some(value), Some(tag)) => {
            Some(value.as_str().parse::<f64>()? * WeightUnit::from_tag(tag.as_str()).to_grams())
        }
        _ => None,
    };

    Ok(Some(Measurement::new(Some(height), Some(width), depth, weight)))
}

fn scaled_group(caps: &Captures, name: &str, scale: f64) -> Result<Option<f64>, ParseFloatError> {
    caps.name(name)
        .map(|m| m.as_str().parse::<f64>().map(|v| v * scale))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn test_single_value_fills_height_and_width() {
        let m = extract("Diam. 11/16 in. (1.7 cm)").unwrap();
        assert_eq!(m.height, Some(1.7));
        assert_eq!(m.width, Some(1.7));
        assert_eq!(m.depth, None);
        assert_eq!(m.weight, None);
    }

    #[test]
    fn test_two_values() {
        let m = extract("(59.1 x 46.4 cm)").unwrap();
        assert_eq!(m, Measurement::planar(59.1, 46.4));
    }

    #[test]
    fn test_three_values() {
        let m = extract("(117.5 x 63.2 x 44.8 cm)").unwrap();
        assert_eq!(m.height, Some(117.5));
        assert_eq!(m.width, Some(63.2));
        assert_eq!(m.depth, Some(44.8));
    }

    #[test]
    fn test_inches_are_converted() {
        let m = extract("(10 x 2 in.)").unwrap();
        assert!(close(m.height, 25.4));
        assert!(close(m.width, 5.08));
    }

    #[test]
    fn test_weight_clause() {
        let m = extract("(28.4 x 36.7 x 28.9 mm, 5.1 kg)").unwrap();
        assert!(close(m.height, 2.84));
        assert!(close(m.width, 3.67));
        assert!(close(m.depth, 2.89));
        assert!(close(m.weight, 5100.0));

        let m = extract("(3 cm, 2 oz.)").unwrap();
        assert!(close(m.weight, 56.7));

        let m = extract("(3 cm, 10 dwt)").unwrap();
        assert!(close(m.weight, 15.55));
    }

    #[test]
    fn test_weight_only_entry() {
        let m = extract("41 oz. 5 dwt. (1282.7 g)").unwrap();
        assert_eq!(m, Measurement::weight_only(1282.7));
    }

    #[test]
    fn test_first_matching_parenthesis_wins() {
        let m = extract("(approx.) 12 in. (30.5 cm) (box 40 cm)").unwrap();
        assert_eq!(m.height, Some(30.5));
    }

    #[test]
    fn test_no_grammar_matches() {
        assert_eq!(extract("Dimensions unavailable"), None);
        assert_eq!(extract("12 x 4 in."), None);
        assert_eq!(extract("(12 ft)"), None);
        assert_eq!(extract(""), None);
    }

    #[test]
    fn test_malformed_number_fails_whole_entry() {
        assert_eq!(extract("(1.2.3 x 4 cm)"), None);
        assert_eq!(extract("(4 x . cm)"), None);
        assert_eq!(extract("(4 cm, 1.2.3 g)"), None);
        assert_eq!(extract("(1.2.3 g)"), None);
    }
}
