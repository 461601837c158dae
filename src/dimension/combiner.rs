//! Entry point of the parser: splits multi-item descriptions and folds the
//! per-item measurements into one.

use crate::dimension::extractor::extract;
use crate::dimension::measurement::Measurement;
use crate::dimension::normalizer::normalize;

/// Characters separating independent sub-descriptions in one field.
pub const ENTRY_SEPARATORS: [char; 3] = [';', '|', '\n'];

pub fn is_composite(raw: &str) -> bool {
    raw.split(ENTRY_SEPARATORS).filter(|s| !s.trim().is_empty()).count() > 1
}

/// Parse a raw catalog dimension string.
///
/// A composite description (see [`ENTRY_SEPARATORS`]) yields the per-axis
/// maximum over the entries that parse; entries that fail are skipped. The
/// result is `None` when no entry parses.
pub fn parse(raw: &str) -> Option<Measurement> {
    if !is_composite(raw) {
        // a lone entry may still carry a stray separator, e.g. "(1 x 1 cm);"
        return parse_entry(raw.trim_matches(ENTRY_SEPARATORS));
    }

    raw.split(ENTRY_SEPARATORS)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            let parsed = parse_entry(segment);
            if parsed.is_none() {
                tracing::trace!(segment, "skipping unparsable dimension entry");
            }
            parsed
        })
        .reduce(|acc, m| acc.max(&m))
}

fn parse_entry(entry: &str) -> Option<Measurement> {
    extract(&normalize(entry))
}
