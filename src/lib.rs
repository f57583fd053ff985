//! Chime - status tones with cubic fade envelopes.
//!
//! This library synthesizes short indicator tones: a sine oscillator shaped
//! by a fade-in / sustain / fade-out amplitude envelope, delivered to a
//! blocking audio sink in fixed-size chunks. The envelope is evaluated with
//! the forward-difference method, so producing each sample costs a handful
//! of additions and no allocation, which keeps the core usable on small
//! targets. Around the tone sits a status cycle that steps an RGB indicator
//! light through red, green and blue, beeping at each color.
//!
//! Hardware stays behind three small traits ([`AudioSink`], [`Indicator`],
//! [`Clock`]); the library ships std-based and demo implementations only.

pub mod clock;
pub mod envelopes;
pub mod gain;
pub mod indicator;
pub mod sink;
pub mod status;
pub mod tone;

// Re-export commonly used types at the crate root
pub use clock::{Clock, SystemClock};
pub use envelopes::CubicCurve;
pub use gain::{db_to_ratio, ratio_to_db};
pub use indicator::{Indicator, IndicatorError};
pub use sink::{AudioSink, SinkError};
pub use status::{StatusCycle, StatusError};
pub use tone::{CHUNK_SAMPLES, ToneConfig, ToneError, ToneSequencer};
