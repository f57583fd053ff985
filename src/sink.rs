//! Audio output boundary.

use thiserror::Error;

/// Error type for audio sink operations.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The backing device or stream failed.
    #[error("audio backend error: {0}")]
    Backend(String),
    /// The stream was closed while samples remained to be written.
    #[error("audio stream closed")]
    Closed,
}

/// Blocking destination for 16-bit mono samples.
///
/// `write` may block indefinitely; that block is the flow control — a
/// producer cannot run more than one chunk ahead of whatever consumes the
/// sink. An accept count shorter than the slice is not an error at this
/// level; callers decide whether to retry or abort.
pub trait AudioSink {
    /// Writes `samples` to the sink, blocking as needed, and returns the
    /// number of samples accepted.
    fn write(&mut self, samples: &[i16]) -> Result<usize, SinkError>;
}
