use serde::{Deserialize, Serialize};

/// Value used in storage rows for an axis that could not be read from the text.
pub const SENTINEL: f64 = -1.0;

/// One of the four measured axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Height,
    Width,
    Depth,
    Weight,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Height, Axis::Width, Axis::Depth, Axis::Weight];

    pub fn name(&self) -> &'static str {
        match self {
            Axis::Height => "height",
            Axis::Width => "width",
            Axis::Depth => "depth",
            Axis::Weight => "weight",
        }
    }
}

/// Physical size of a catalog object in canonical units.
///
/// Height, width and depth are centimeters, weight is grams. An axis is `None`
/// when the source text did not determine it. A dimension parse always yields
/// height and width together; depth and weight are independent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurement {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
    pub weight: Option<f64>,
}

impl Measurement {
    pub fn new(
        height: Option<f64>,
        width: Option<f64>,
        depth: Option<f64>,
        weight: Option<f64>,
    ) -> Self {
        Self {
            height,
            width,
            depth,
            weight,
        }
    }

    /// Height and width only, as produced by a two-value or diameter entry.
    pub fn planar(height: f64, width: f64) -> Self {
        Self::new(Some(height), Some(width), None, None)
    }

    pub fn weight_only(grams: f64) -> Self {
        Self::new(None, None, None, Some(grams))
    }

    pub fn axis(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Height => self.height,
            Axis::Width => self.width,
            Axis::Depth => self.depth,
            Axis::Weight => self.weight,
        }
    }

    /// Axis value with a missing axis reported as [`SENTINEL`].
    pub fn axis_or_sentinel(&self, axis: Axis) -> f64 {
        self.axis(axis).unwrap_or(SENTINEL)
    }

    /// `[height, width, depth, weight]` in the storage encoding.
    pub fn to_sentinel_array(&self) -> [f64; 4] {
        Axis::ALL.map(|axis| self.axis_or_sentinel(axis))
    }

    /// Inverse of [`Measurement::to_sentinel_array`]. Any negative value is
    /// read back as a missing axis.
    pub fn from_sentinel_values(height: f64, width: f64, depth: f64, weight: f64) -> Self {
        let known = |v: f64| if v < 0.0 { None } else { Some(v) };
        Self::new(known(height), known(width), known(depth), known(weight))
    }

    /// Per-axis maximum. An axis stays missing only when both sides miss it.
    pub fn max(&self, other: &Measurement) -> Measurement {
        let pick = |a: Option<f64>, b: Option<f64>| match (a, b) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, None) => a,
            (None, b) => b,
        };
        Measurement::new(
            pick(self.height, other.height),
            pick(self.width, other.width),
            pick(self.depth, other.depth),
            pick(self.weight, other.weight),
        )
    }

    pub fn is_empty(&self) -> bool {
        Axis::ALL.iter().all(|axis| self.axis(*axis).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_encoding() {
        let m = Measurement::planar(12.0, 4.5);
        assert_eq!(m.to_sentinel_array(), [12.0, 4.5, -1.0, -1.0]);

        let back = Measurement::from_sentinel_values(12.0, 4.5, -1.0, -1.0);
        assert_eq!(back, m);
    }

    #[test]
    fn test_zero_is_a_measured_value() {
        let m = Measurement::from_sentinel_values(0.0, 0.0, 0.0, -1.0);
        assert_eq!(m.depth, Some(0.0));
        assert_eq!(m.weight, None);
    }

    #[test]
    fn test_max_keeps_known_axes() {
        let a = Measurement::new(Some(10.0), Some(3.0), None, None);
        let b = Measurement::new(Some(2.0), Some(8.0), None, Some(500.0));

        let folded = a.max(&b);
        assert_eq!(folded, Measurement::new(Some(10.0), Some(8.0), None, Some(500.0)));
        assert_eq!(folded, b.max(&a));
    }

    #[test]
    fn test_empty_measurement() {
        assert!(Measurement::default().is_empty());
        assert!(!Measurement::weight_only(3.0).is_empty());
    }
}
