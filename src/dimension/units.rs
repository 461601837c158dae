//! Unit tags found in catalog dimension text and their canonical multipliers.
//!
//! Lengths convert to centimeters, weights to grams. The weight factors are the
//! values the catalog import has always used (pennyweight 1.555, ounce 28.35),
//! not the textbook constants.

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;
/// Centimeters per millimeter
pub const CM_PER_MM: f64 = 0.1;

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per pennyweight
pub const G_PER_DWT: f64 = 1.555;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Centimeter,
    Inch,
    Millimeter,
}

impl LengthUnit {
    /// Tag as written after normalization: `cm`, `in.` or `mm`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "cm" => Some(LengthUnit::Centimeter),
            "in." => Some(LengthUnit::Inch),
            "mm" => Some(LengthUnit::Millimeter),
            _ => None,
        }
    }

    pub fn to_centimeters(&self) -> f64 {
        match self {
            LengthUnit::Centimeter => 1.0,
            LengthUnit::Inch => CM_PER_INCH,
            LengthUnit::Millimeter => CM_PER_MM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Gram,
    Kilogram,
    Pennyweight,
    Ounce,
}

impl WeightUnit {
    /// Any tag other than `kg`, `dwt` or `oz` (including an empty one) is read
    /// as grams.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "kg" => WeightUnit::Kilogram,
            "dwt" => WeightUnit::Pennyweight,
            "oz" => WeightUnit::Ounce,
            _ => WeightUnit::Gram,
        }
    }

    pub fn to_grams(&self) -> f64 {
        match self {
            WeightUnit::Gram => 1.0,
            WeightUnit::Kilogram => G_PER_KG,
            WeightUnit::Pennyweight => G_PER_DWT,
            WeightUnit::Ounce => G_PER_OZ,
        }
    }
}
