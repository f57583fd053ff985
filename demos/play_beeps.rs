//! Plays a few red/green/blue status cycles through the default audio device.

use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

use anyhow::{Context, Result, anyhow};
use chime::{
    AudioSink, Indicator, IndicatorError, SinkError, StatusCycle, SystemClock, ToneConfig,
};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample, StreamConfig};
use tracing_subscriber::EnvFilter;

/// Sink feeding a bounded channel that the cpal callback drains. A full
/// channel blocks the producer, which is the flow control.
struct StreamSink {
    tx: SyncSender<i16>,
    _stream: cpal::Stream,
}

impl AudioSink for StreamSink {
    fn write(&mut self, samples: &[i16]) -> Result<usize, SinkError> {
        for &sample in samples {
            self.tx.send(sample).map_err(|_| SinkError::Closed)?;
        }
        Ok(samples.len())
    }
}

/// Indicator that prints the staged color instead of driving a light.
struct ConsoleIndicator {
    staged: (u8, u8, u8),
}

impl Indicator for ConsoleIndicator {
    fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<(), IndicatorError> {
        self.staged = (r, g, b);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), IndicatorError> {
        println!("indicator off");
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), IndicatorError> {
        let (r, g, b) = self.staged;
        println!("indicator #{r:02x}{g:02x}{b:02x}");
        Ok(())
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    rx: Receiver<i16>,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<i16>,
{
    let channels = config.channels as usize;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                // Silence when the producer is between tones.
                let sample = rx.try_recv().unwrap_or(0);
                let value = T::from_sample(sample);
                for slot in frame.iter_mut() {
                    *slot = value;
                }
            }
        },
        |err| eprintln!("Audio stream error: {err}"),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("no output device available"))?;
    let device_config = device
        .default_output_config()
        .context("querying output config")?;

    let sample_format = device_config.sample_format();
    let stream_config: StreamConfig = device_config.into();

    // Roughly 20 ms of buffered audio at 48 kHz.
    let (tx, rx) = sync_channel::<i16>(1024);

    let stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, rx)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, rx)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, rx)?,
        other => return Err(anyhow!("unsupported sample format: {other}")),
    };

    let config = ToneConfig {
        sample_rate: stream_config.sample_rate.0,
        ..ToneConfig::default()
    };

    let sink = StreamSink {
        tx,
        _stream: stream,
    };
    let indicator = ConsoleIndicator { staged: (0, 0, 0) };

    let mut cycle = StatusCycle::new(sink, indicator, SystemClock, config);
    cycle.run(3)?;

    Ok(())
}
