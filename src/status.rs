//! Red/green/blue status cycle: blink a color, sound a beep, wait.

use thiserror::Error;
use tracing::info;

use crate::clock::Clock;
use crate::indicator::{Indicator, IndicatorError};
use crate::sink::AudioSink;
use crate::tone::{ToneConfig, ToneError, ToneSequencer};

/// Channel brightness of the status colors.
const BRIGHTNESS: u8 = 64;

/// Pause after each step of the cycle, in milliseconds.
const STEP_DELAY_MS: u64 = 500;

/// The cycle colors, in order.
const COLORS: [(u8, u8, u8); 3] = [
    (BRIGHTNESS, 0, 0),
    (0, BRIGHTNESS, 0),
    (0, 0, BRIGHTNESS),
];

/// Error produced by the status cycle.
#[derive(Debug, Error)]
pub enum StatusError {
    /// Tone playback failed.
    #[error(transparent)]
    Tone(#[from] ToneError),
    /// The indicator light failed.
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

/// Steps an RGB indicator through red, green and blue, sounding a short
/// tone at each color, then blanks the light and pauses.
///
/// The cycle owns its collaborators for its whole run; any failure aborts
/// the current cycle and propagates out.
pub struct StatusCycle<S, I, C> {
    sink: S,
    indicator: I,
    clock: C,
    config: ToneConfig,
}

impl<S: AudioSink, I: Indicator, C: Clock> StatusCycle<S, I, C> {
    /// Creates a cycle over the given collaborators.
    pub fn new(sink: S, indicator: I, clock: C, config: ToneConfig) -> Self {
        Self {
            sink,
            indicator,
            clock,
            config,
        }
    }

    /// Runs `cycles` full red/green/blue/off passes.
    pub fn run(&mut self, cycles: u32) -> Result<(), StatusError> {
        for _ in 0..cycles {
            self.run_once()?;
        }
        Ok(())
    }

    fn run_once(&mut self) -> Result<(), StatusError> {
        for (r, g, b) in COLORS {
            info!(r, g, b, "status color");
            self.indicator.set_color(r, g, b)?;
            self.indicator.refresh()?;

            let mut tone = ToneSequencer::new(self.config);
            tone.play(&mut self.sink)?;

            self.clock.delay_ms(STEP_DELAY_MS);
        }

        self.indicator.clear()?;
        self.clock.delay_ms(STEP_DELAY_MS);
        Ok(())
    }

    /// Gives the collaborators back, consuming the cycle.
    pub fn into_parts(self) -> (S, I, C) {
        (self.sink, self.indicator, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SinkError;

    #[derive(Default)]
    struct CountingSink {
        samples: usize,
        tones: usize,
        last_was_data: bool,
    }

    impl AudioSink for CountingSink {
        fn write(&mut self, samples: &[i16]) -> Result<usize, SinkError> {
            // A nonzero sample after silence marks the start of a new tone.
            let has_signal = samples.iter().any(|&s| s != 0);
            if has_signal && !self.last_was_data {
                self.tones += 1;
            }
            self.last_was_data = has_signal;
            self.samples += samples.len();
            Ok(samples.len())
        }
    }

    /// Records indicator and clock calls in order.
    #[derive(Debug, PartialEq, Eq, Clone)]
    enum Call {
        Color(u8, u8, u8),
        Refresh,
        Clear,
        Delay(u64),
    }

    #[derive(Default)]
    struct RecordingIndicator {
        calls: std::rc::Rc<std::cell::RefCell<Vec<Call>>>,
        fail_on_refresh: bool,
    }

    impl Indicator for RecordingIndicator {
        fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<(), IndicatorError> {
            self.calls.borrow_mut().push(Call::Color(r, g, b));
            Ok(())
        }

        fn clear(&mut self) -> Result<(), IndicatorError> {
            self.calls.borrow_mut().push(Call::Clear);
            Ok(())
        }

        fn refresh(&mut self) -> Result<(), IndicatorError> {
            if self.fail_on_refresh {
                return Err(IndicatorError::Driver("refresh failed".into()));
            }
            self.calls.borrow_mut().push(Call::Refresh);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingClock {
        calls: std::rc::Rc<std::cell::RefCell<Vec<Call>>>,
    }

    impl Clock for RecordingClock {
        fn delay_ms(&mut self, ms: u64) {
            self.calls.borrow_mut().push(Call::Delay(ms));
        }
    }

    fn quick_config() -> ToneConfig {
        // Keep the test fast: 2 ms tone, 1 ms fades.
        ToneConfig {
            duration_ms: 2,
            fade_ms: 1,
            ..ToneConfig::default()
        }
    }

    #[test]
    fn test_cycle_call_order() {
        let calls = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let indicator = RecordingIndicator {
            calls: calls.clone(),
            fail_on_refresh: false,
        };
        let clock = RecordingClock {
            calls: calls.clone(),
        };

        let mut cycle =
            StatusCycle::new(CountingSink::default(), indicator, clock, quick_config());
        cycle.run(1).unwrap();

        let recorded = calls.borrow().clone();
        assert_eq!(
            recorded,
            vec![
                Call::Color(64, 0, 0),
                Call::Refresh,
                Call::Delay(500),
                Call::Color(0, 64, 0),
                Call::Refresh,
                Call::Delay(500),
                Call::Color(0, 0, 64),
                Call::Refresh,
                Call::Delay(500),
                Call::Clear,
                Call::Delay(500),
            ]
        );
    }

    #[test]
    fn test_one_tone_per_color() {
        let mut cycle = StatusCycle::new(
            CountingSink::default(),
            RecordingIndicator::default(),
            RecordingClock::default(),
            quick_config(),
        );
        cycle.run(2).unwrap();

        let (sink, _, _) = cycle.into_parts();
        assert_eq!(sink.tones, 6);
    }

    #[test]
    fn test_indicator_failure_aborts_cycle() {
        let indicator = RecordingIndicator {
            calls: Default::default(),
            fail_on_refresh: true,
        };
        let mut cycle = StatusCycle::new(
            CountingSink::default(),
            indicator,
            RecordingClock::default(),
            quick_config(),
        );

        assert!(matches!(cycle.run(1), Err(StatusError::Indicator(_))));

        // Nothing was played before the failure.
        let (sink, _, _) = cycle.into_parts();
        assert_eq!(sink.samples, 0);
    }
}
