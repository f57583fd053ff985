//! Envelope generators for shaping amplitude over time.

mod cubic;

pub use cubic::CubicCurve;
