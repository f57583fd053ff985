//! Renders one status tone to `tone.wav`.

use std::fs::File;
use std::io::BufWriter;

use anyhow::Result;
use chime::{AudioSink, SinkError, ToneConfig, ToneSequencer};
use hound::{SampleFormat, WavSpec, WavWriter};
use tracing_subscriber::EnvFilter;

/// Sink that appends samples to a mono 16-bit WAV file.
struct WavSink {
    writer: WavWriter<BufWriter<File>>,
}

impl AudioSink for WavSink {
    fn write(&mut self, samples: &[i16]) -> Result<usize, SinkError> {
        for &sample in samples {
            self.writer
                .write_sample(sample)
                .map_err(|e| SinkError::Backend(e.to_string()))?;
        }
        Ok(samples.len())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ToneConfig::default();
    let spec = WavSpec {
        channels: 1,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut sink = WavSink {
        writer: WavWriter::create("tone.wav", spec)?,
    };
    ToneSequencer::new(config).play(&mut sink)?;
    sink.writer.finalize()?;

    println!("wrote tone.wav");
    Ok(())
}
