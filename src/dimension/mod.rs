// Dimension parsing core: free-text catalog dimensions -> canonical measurement.
// Pure functions only; nothing in here touches I/O.

pub mod boundary;
pub mod combiner;
pub mod extractor;
pub mod measurement;
pub mod normalizer;
pub mod units;

pub use boundary::{evaluate, fits, AxisFit, BoundarySpec};
pub use combiner::parse;
pub use measurement::{Axis, Measurement, SENTINEL};
pub use normalizer::normalize;
