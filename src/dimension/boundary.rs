use crate::dimension::measurement::{Axis, Measurement, SENTINEL};
use serde::Deserialize;

/// Lower and upper limit for each of the four axes.
///
/// Unset minimums default to [`SENTINEL`] and unset maximums to infinity, so an
/// unconstrained axis never disqualifies a measurement, known or not. An
/// explicit minimum above the sentinel requires the axis to be present.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoundarySpec {
    pub min_height: f64,
    pub max_height: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub min_depth: f64,
    pub max_depth: f64,
    pub min_weight: f64,
    pub max_weight: f64,
}

impl Default for BoundarySpec {
    fn default() -> Self {
        Self {
            min_height: SENTINEL,
            max_height: f64::INFINITY,
            min_width: SENTINEL,
            max_width: f64::INFINITY,
            min_depth: SENTINEL,
            max_depth: f64::INFINITY,
            min_weight: SENTINEL,
            max_weight: f64::INFINITY,
        }
    }
}

impl BoundarySpec {
    pub fn range(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Height => (self.min_height, self.max_height),
            Axis::Width => (self.min_width, self.max_width),
            Axis::Depth => (self.min_depth, self.max_depth),
            Axis::Weight => (self.min_weight, self.max_weight),
        }
    }

    pub fn with_min(mut self, axis: Axis, min: f64) -> Self {
        match axis {
            Axis::Height => self.min_height = min,
            Axis::Width => self.min_width = min,
            Axis::Depth => self.min_depth = min,
            Axis::Weight => self.min_weight = min,
        }
        self
    }

    pub fn with_max(mut self, axis: Axis, max: f64) -> Self {
        match axis {
            Axis::Height => self.max_height = max,
            Axis::Width => self.max_width = max,
            Axis::Depth => self.max_depth = max,
            Axis::Weight => self.max_weight = max,
        }
        self
    }

    /// Inclusive range test of a single axis value in the sentinel encoding.
    pub fn contains(&self, axis: Axis, value: f64) -> bool {
        let (min, max) = self.range(axis);
        min <= value && value <= max
    }
}

/// Per-axis outcome of a boundary check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisFit {
    pub height: bool,
    pub width: bool,
    pub depth: bool,
    pub weight: bool,
}

impl AxisFit {
    pub fn all(&self) -> bool {
        self.height && self.width && self.depth && self.weight
    }

    pub fn failing_axes(&self) -> Vec<Axis> {
        Axis::ALL
            .into_iter()
            .filter(|axis| !self.get(*axis))
            .collect()
    }

    pub fn get(&self, axis: Axis) -> bool {
        match axis {
            Axis::Height => self.height,
            Axis::Width => self.width,
            Axis::Depth => self.depth,
            Axis::Weight => self.weight,
        }
    }
}

pub fn evaluate(measurement: &Measurement, boundary: &BoundarySpec) -> AxisFit {
    let check = |axis| boundary.contains(axis, measurement.axis_or_sentinel(axis));
    AxisFit {
        height: check(Axis::Height),
        width: check(Axis::Width),
        depth: check(Axis::Depth),
        weight: check(Axis::Weight),
    }
}

/// Whether `measurement` lies within `boundary` on every axis.
pub fn fits(measurement: &Measurement, boundary: &BoundarySpec) -> bool {
    evaluate(measurement, boundary).all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_boundary_accepts_everything() {
        let boundary = BoundarySpec::default();
        assert!(fits(&Measurement::default(), &boundary));
        assert!(fits(&Measurement::planar(1000.0, 0.0), &boundary));
        assert!(fits(&Measurement::weight_only(1e12), &boundary));
    }

    #[test]
    fn test_missing_axis_fails_explicit_minimum() {
        let m = Measurement::planar(10.0, 10.0);
        let boundary = BoundarySpec::default().with_min(Axis::Depth, 0.0);

        let result = evaluate(&m, &boundary);
        assert!(!result.depth);
        assert!(result.height && result.width && result.weight);
        assert_eq!(result.failing_axes(), vec![Axis::Depth]);
        assert!(!fits(&m, &boundary));
    }

    #[test]
    fn test_missing_axis_passes_any_maximum() {
        let m = Measurement::planar(10.0, 10.0);
        let boundary = BoundarySpec::default()
            .with_max(Axis::Depth, 5.0)
            .with_max(Axis::Weight, 0.0);
        assert!(fits(&m, &boundary));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let m = Measurement::planar(10.0, 20.0);
        let boundary = BoundarySpec::default()
            .with_min(Axis::Height, 10.0)
            .with_max(Axis::Height, 10.0)
            .with_max(Axis::Width, 20.0);
        assert!(fits(&m, &boundary));

        let too_small = boundary.with_max(Axis::Width, 19.9);
        assert!(!fits(&m, &too_small));
    }

    #[test]
    fn test_deserialize_partial_boundary() {
        let boundary: BoundarySpec =
            serde_json::from_str(r#"{"minHeight": 5.0, "maxWeight": 100.0}"#).unwrap();
        assert_eq!(boundary.min_height, 5.0);
        assert_eq!(boundary.max_weight, 100.0);
        assert_eq!(boundary.min_depth, SENTINEL);
        assert_eq!(boundary.max_depth, f64::INFINITY);
    }
}
