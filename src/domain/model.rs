use crate::dimension::{self, Measurement};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the museum's open-access CSV export. Only the columns the
/// import needs are bound; the export carries many more.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObjectRow {
    #[serde(rename = "Object ID")]
    pub id: u64,
    #[serde(rename = "Dimensions", default)]
    pub dimensions: Option<String>,
}

/// A catalog object together with the measurement parsed from its text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetObject {
    pub id: u64,
    pub dimension_raw: String,
    pub dimension: Option<Measurement>,
}

impl MetObject {
    /// Builds the object and parses its dimension text once.
    pub fn new(id: u64, dimension_raw: impl Into<String>) -> Self {
        let dimension_raw = dimension_raw.into();
        let dimension = dimension::parse(&dimension_raw);
        Self {
            id,
            dimension_raw,
            dimension,
        }
    }

    pub fn has_valid_dimension(&self) -> bool {
        self.dimension.is_some()
    }
}

/// Persisted form of an imported object. Missing axes use the `-1` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObject {
    pub id: u64,
    pub dim: String,
    pub height: f64,
    pub width: f64,
    pub depth: f64,
    pub weight: f64,
}

impl StoredObject {
    /// `None` for objects without a parsed measurement; those are never stored.
    pub fn from_object(object: &MetObject) -> Option<Self> {
        let [height, width, depth, weight] = object.dimension?.to_sentinel_array();
        Some(Self {
            id: object.id,
            dim: object.dimension_raw.clone(),
            height,
            width,
            depth,
            weight,
        })
    }

    pub fn measurement(&self) -> Measurement {
        Measurement::from_sentinel_values(self.height, self.width, self.depth, self.weight)
    }

    /// Rebuilds the object from the stored numbers without re-parsing `dim`.
    pub fn to_object(&self) -> MetObject {
        MetObject {
            id: self.id,
            dimension_raw: self.dim.clone(),
            dimension: Some(self.measurement()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    pub fits: bool,
    pub object: Option<MetObject>,
}

/// Counters for one import run, written next to the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub malformed_rows: usize,
    pub blank_dimensions: usize,
    pub unavailable_dimensions: usize,
    pub unparsable_dimensions: usize,
    pub imported: usize,
    pub batches: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Output of the transform step.
#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub objects: Vec<MetObject>,
    pub summary: ImportSummary,
}
