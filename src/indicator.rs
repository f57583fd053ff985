//! Indicator light boundary.

use thiserror::Error;

/// Error type for indicator operations.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// The underlying light driver failed.
    #[error("indicator driver error: {0}")]
    Driver(String),
}

/// A single RGB indicator light.
///
/// Mirrors addressable-LED drivers that stage a color and transmit it
/// separately: [`set_color`](Indicator::set_color) stages,
/// [`refresh`](Indicator::refresh) transmits, and
/// [`clear`](Indicator::clear) blanks the light immediately.
pub trait Indicator {
    /// Stages an RGB color.
    fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<(), IndicatorError>;

    /// Turns the light off.
    fn clear(&mut self) -> Result<(), IndicatorError>;

    /// Transmits the staged color to the light.
    fn refresh(&mut self) -> Result<(), IndicatorError>;
}
