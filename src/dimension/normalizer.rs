//! Rewrites raw catalog dimension text into the shape the extractor expects,
//! e.g. `H x W x D cm` inside parentheses.
//!
//! The stages run in a fixed order and later stages rely on earlier ones:
//! the missing-unit stage only sees `(12.1)` after ranges were collapsed, and
//! the decimal repairs only see values whose separators were already unified.

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator token between values after normalization.
pub const SEPARATOR: &str = "x";

/// `(12.1-25.4` -> `(25.4`
static RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([0-9.]+)-([0-9.]+)").expect("range pattern"));

/// `(12.1)` -> `(12.1 cm)`
static MISSING_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([0-9.]+)\)").expect("missing unit pattern"));

/// `(12.456.3` -> `(12.4 x 56.3`
static MERGED_DECIMALS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([0-9]+\.[0-9])([0-9]+\.[0-9])").expect("merged decimals pattern"));

/// `(12. 3` -> `(12.3`
static SPACED_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([0-9]+\.)\s?([0-9])\.?").expect("spaced decimal pattern"));

/// Separator variants and stray whitespace around them, plus decorative
/// suffixes that sometimes follow the unit.
const SEPARATOR_AND_SUFFIX_FIXES: &[(&str, &str)] = &[
    ("  x", " x"),
    (" x. ", " x "),
    ("cm Diam.", "cm"),
    ("cm x", "x"),
    ("cm H.", "cm"),
    ("cm.", "cm"),
];

/// Typos and doubled punctuation.
const TYPO_FIXES: &[(&str, &str)] = &[
    ("com", "cm"),
    ("  cm", " cm"),
    ("..", "."),
    ("( ", "("),
    ("))", ")"),
];

/// Canonicalize `raw`. Never fails; text that cannot be repaired comes back
/// with whatever rewrites applied.
pub fn normalize(raw: &str) -> String {
    let mut text = unify_separators(raw);
    text = unify_dashes(&text);
    text = replace_all_literal(&text, SEPARATOR_AND_SUFFIX_FIXES);
    text = replace_all_literal(&text, TYPO_FIXES);

    // ranges collapse to their upper bound
    text = RANGE.replace_all(&text, "(${2}").into_owned();
    // unitless values are centimeters
    text = MISSING_UNIT.replace_all(&text, "(${1} cm)").into_owned();
    text = MERGED_DECIMALS
        .replace_all(&text, format!("(${{1}} {} ${{2}}", SEPARATOR).as_str())
        .into_owned();
    text = SPACED_DECIMAL.replace_all(&text, "(${1}${2}").into_owned();

    text.trim().to_string()
}

fn unify_separators(text: &str) -> String {
    text.replace(['×', 'X'], SEPARATOR)
}

fn unify_dashes(text: &str) -> String {
    text.replace(['–', '—', '−'], "-")
}

fn replace_all_literal(text: &str, rules: &[(&str, &str)]) -> String {
    rules
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(*from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input_is_unchanged() {
        let raw = "23 1/4 x 18 1/4 in. (59.1 x 46.4 cm)";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn test_separator_variants() {
        assert_eq!(
            normalize("10 × 20 in. (25.4 X 50.8 cm)"),
            "10 x 20 in. (25.4 x 50.8 cm)"
        );
        assert_eq!(normalize("(3  x 4 cm)"), "(3 x 4 cm)");
        assert_eq!(normalize("(3 x. 4 cm)"), "(3 x 4 cm)");
    }

    #[test]
    fn test_unit_between_values_is_dropped() {
        assert_eq!(normalize("(10 cm x 20 cm)"), "(10 x 20 cm)");
    }

    #[test]
    fn test_decorative_suffixes() {
        assert_eq!(normalize("(4.5 cm Diam.)"), "(4.5 cm)");
        assert_eq!(normalize("(4.5 cm H.)"), "(4.5 cm)");
        assert_eq!(normalize("(4.5 cm.)"), "(4.5 cm)");
    }

    #[test]
    fn test_typos_and_punctuation() {
        assert_eq!(normalize("( 5 com)"), "(5 cm)");
        assert_eq!(normalize("(5  cm))"), "(5 cm)");
        assert_eq!(normalize("(5.. cm)"), "(5. cm)");
    }

    #[test]
    fn test_range_keeps_upper_bound() {
        assert_eq!(normalize("(12.1-25.4 cm)"), "(25.4 cm)");
        assert_eq!(normalize("(3–4 cm)"), "(4 cm)");
    }

    #[test]
    fn test_missing_unit_assumed_centimeters() {
        assert_eq!(normalize("(12.1)"), "(12.1 cm)");
        // range collapse runs first, so the bare upper bound picks up the unit
        assert_eq!(normalize("(3-4)"), "(4 cm)");
    }

    #[test]
    fn test_merged_decimals_are_split() {
        assert_eq!(normalize("(12.456.3 cm)"), "(12.4 x 56.3 cm)");
    }

    #[test]
    fn test_spaced_decimal_is_closed() {
        assert_eq!(normalize("12 in. (12. 3 cm)"), "12 in. (12.3 cm)");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(normalize("  (1 x 2 cm)\t"), "(1 x 2 cm)");
        assert_eq!(normalize(""), "");
    }
}
