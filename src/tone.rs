//! Tone synthesis with a fade-in / sustain / fade-out envelope.

use std::f32::consts::PI;

use thiserror::Error;
use tracing::debug;

use crate::envelopes::CubicCurve;
use crate::gain::db_to_ratio;
use crate::sink::{AudioSink, SinkError};

/// Samples per chunk handed to the sink.
pub const CHUNK_SAMPLES: usize = 256;

/// All-zero chunks appended after the tone so the stream does not pop when
/// it closes.
const SILENT_TAIL_CHUNKS: usize = 10;

/// Full-scale amplitude of a 16-bit sample.
const FULL_SCALE: f32 = 32767.0;

/// Error produced while driving a tone into a sink.
#[derive(Debug, Error)]
pub enum ToneError {
    /// The sink itself failed.
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// The sink accepted fewer samples than it was handed.
    #[error("sink accepted {accepted} of {expected} samples")]
    ShortWrite {
        /// Samples in the chunk.
        expected: usize,
        /// Samples the sink took.
        accepted: usize,
    },
}

/// Parameters for one tone.
///
/// The defaults describe the stock status beep: a quiet 700 Hz tone of
/// 200 ms at 48 kHz with 6 ms fades.
#[derive(Debug, Clone, Copy)]
pub struct ToneConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Oscillator frequency in Hz.
    pub frequency: f32,
    /// Total tone duration in milliseconds, fades included.
    pub duration_ms: u32,
    /// Gain in decibels; equal to `floor_db` means silence.
    pub gain_db: f32,
    /// Fade-in and fade-out length in milliseconds.
    pub fade_ms: u32,
    /// Decibel floor treated as silence.
    pub floor_db: f32,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            frequency: 700.0,
            duration_ms: 200,
            gain_db: -40.0,
            fade_ms: 6,
            floor_db: -120.0,
        }
    }
}

impl ToneConfig {
    fn total_samples(&self) -> u32 {
        self.sample_rate * self.duration_ms / 1000
    }

    fn fade_samples(&self) -> u32 {
        self.sample_rate * self.fade_ms / 1000
    }
}

/// Generates one tone's worth of samples: fade-in, sustain, fade-out.
///
/// A single [`CubicCurve`] supplies the envelope. It starts ramping 0 → 1
/// over the fade length; once the fade-in has been consumed, the same curve
/// object is re-initialized in place to ramp 1 → 0, with a pre-delay that
/// holds the envelope at 1 through the sustain phase. When the total
/// duration is shorter than two fades, the pre-delay clamps to zero and the
/// fade-out begins immediately after the fade-in.
///
/// Per sample, the oscillator output is scaled by the gain ratio, truncated
/// to `i16` at full scale, and only then multiplied by the envelope value:
/// the envelope scales already-quantized samples. That ordering is part of
/// the output contract — moving the envelope multiply ahead of the
/// truncation produces a measurably different waveform.
///
/// # Examples
///
/// ```
/// use chime::{ToneConfig, ToneSequencer};
///
/// let mut tone = ToneSequencer::new(ToneConfig::default());
/// let first = tone.next_sample();
/// assert_eq!(first, 0); // envelope starts at zero
/// ```
pub struct ToneSequencer {
    envelope: CubicCurve,
    gain_ratio: f32,
    sample_rate: f32,
    frequency: f32,
    /// Running sample index.
    n: u32,
    total: u32,
    fade: u32,
}

impl ToneSequencer {
    /// Creates a sequencer for one tone described by `config`.
    pub fn new(config: ToneConfig) -> Self {
        let total = config.total_samples();
        let fade = config.fade_samples();

        Self {
            envelope: CubicCurve::new(0.0, 1.0, 0, fade as i32),
            gain_ratio: db_to_ratio(config.gain_db, config.floor_db),
            sample_rate: config.sample_rate as f32,
            frequency: config.frequency,
            n: 0,
            total,
            fade,
        }
    }

    /// True once every sample of the tone has been produced.
    pub fn is_finished(&self) -> bool {
        self.n >= self.total
    }

    /// Produces the next sample of the tone.
    pub fn next_sample(&mut self) -> i16 {
        let envelope = self.envelope.next_sample();

        let phase = 2.0 * PI * self.frequency * self.n as f32 / self.sample_rate;
        let sample = ((self.gain_ratio * phase.sin() * FULL_SCALE) as i16 as f32 * envelope) as i16;

        if self.n == self.fade {
            // Fade-in consumed; rearm the same curve for the fade-out. The
            // pre-delay is the sustain and clamps to zero for short tones.
            let sustain = self.total as i32 - 2 * self.fade as i32;
            debug!(sustain_samples = sustain, "rearming envelope for fade-out");
            self.envelope.set(1.0, 0.0, sustain, self.fade as i32);
        }

        self.n += 1;
        sample
    }

    /// Drives the tone to completion against `sink`.
    ///
    /// Samples go out in chunks of at most [`CHUNK_SAMPLES`] from one reused
    /// stack buffer; the final chunk may be shorter. After the last sample,
    /// a fixed run of all-zero chunks is written so the stream does not end
    /// on an audible discontinuity. Any write the sink does not accept in
    /// full aborts the tone with [`ToneError::ShortWrite`].
    pub fn play<S: AudioSink>(&mut self, sink: &mut S) -> Result<(), ToneError> {
        debug!(
            frequency = self.frequency,
            samples = self.total,
            "playing tone"
        );

        let mut buffer = [0i16; CHUNK_SAMPLES];
        let mut chunk_len = CHUNK_SAMPLES;

        while !self.is_finished() {
            let remaining = (self.total - self.n) as usize;
            chunk_len = remaining.min(CHUNK_SAMPLES);

            for slot in buffer[..chunk_len].iter_mut() {
                *slot = self.next_sample();
            }
            write_chunk(sink, &buffer[..chunk_len])?;
        }

        debug!(value = self.envelope.value(), "final envelope value");

        buffer[..chunk_len].fill(0);
        for _ in 0..SILENT_TAIL_CHUNKS {
            write_chunk(sink, &buffer[..chunk_len])?;
        }

        Ok(())
    }
}

fn write_chunk<S: AudioSink>(sink: &mut S, chunk: &[i16]) -> Result<(), ToneError> {
    let accepted = sink.write(chunk)?;
    if accepted != chunk.len() {
        return Err(ToneError::ShortWrite {
            expected: chunk.len(),
            accepted,
        });
    }
    Ok(())
}
