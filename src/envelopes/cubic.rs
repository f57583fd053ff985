//! Forward-difference cubic envelope segment generator.

/// A single cubic ease segment evaluated with forward differences.
///
/// The segment ramps from a start value toward an end value over a fixed
/// number of steps. After initialization, advancing one step is three
/// additions — no powers, no multiplies, no allocation — which is the point
/// of the forward-difference method when a low-degree polynomial has to be
/// sampled at every audio frame on a small processor.
///
/// An optional pre-delay holds the output flat at the start value before the
/// ramp begins. Once both the pre-delay and the ramp have run out the segment
/// is *settled*: further reads return the same value and mutate nothing. The
/// settled value approximates the end value but is not guaranteed bit-exact
/// to it, because the addition chain accumulates floating-point drift.
///
/// A `CubicCurve` has exactly one owner at a time and is re-initialized in
/// place with [`set`](CubicCurve::set) when a new segment is needed; it is
/// not meant to be shared across threads.
///
/// # Examples
///
/// ```
/// use chime::CubicCurve;
///
/// // Ramp 0 -> 1 over 100 steps, no pre-delay.
/// let mut curve = CubicCurve::new(0.0, 1.0, 0, 100);
/// for _ in 0..100 {
///     curve.next_sample();
/// }
/// assert!((curve.next_sample() - 1.0).abs() < 1e-3);
/// assert!(curve.is_settled());
/// ```
#[derive(Debug, Clone)]
pub struct CubicCurve {
    // Forward differences; d0 is always the next value to be emitted.
    d0: f32,
    d1: f32,
    d2: f32,
    d3: f32,
    /// End value of the segment; informational, not used while stepping.
    target: f32,
    /// Pre-delay steps remaining before the ramp starts advancing.
    start_counter: u32,
    /// Ramp steps remaining until the segment is fully advanced.
    stop_counter: u32,
}

impl CubicCurve {
    /// Creates a segment ramping from `start` toward `end` over `duration`
    /// steps, after `pre_delay` steps of flat output at `start`.
    ///
    /// `duration` of zero or less is clamped to a single step; a negative
    /// `pre_delay` is clamped to zero.
    pub fn new(start: f32, end: f32, pre_delay: i32, duration: i32) -> Self {
        let mut curve = Self {
            d0: 0.0,
            d1: 0.0,
            d2: 0.0,
            d3: 0.0,
            target: 0.0,
            start_counter: 0,
            stop_counter: 0,
        };
        curve.set(start, end, pre_delay, duration);
        curve
    }

    /// Re-initializes the segment in place, overwriting all previous state.
    ///
    /// The curve is a cubic ease in its own normalized parameter space,
    /// converted to forward-difference form so that stepping needs only
    /// additions. Input clamping is the same as [`new`](CubicCurve::new).
    ///
    /// # Examples
    ///
    /// ```
    /// use chime::CubicCurve;
    ///
    /// let mut curve = CubicCurve::new(0.0, 1.0, 0, 64);
    /// for _ in 0..64 {
    ///     curve.next_sample();
    /// }
    /// // Reuse the same object for the next segment.
    /// curve.set(1.0, 0.0, 32, 64);
    /// assert_eq!(curve.next_sample(), 1.0);
    /// ```
    pub fn set(&mut self, start: f32, end: f32, pre_delay: i32, duration: i32) {
        let duration = duration.max(1);

        let h = 1.0 / duration as f32;
        let delta = end - start;

        // Cubic coefficients in the normalized domain [0, 1].
        let a = start;
        let b = 1.0;
        let c = 3.0 * (delta - 1.0);
        let d = -2.0 * (delta - 1.0);

        // Forward-difference form of the same polynomial.
        self.d0 = a;
        self.d1 = b * h + c * h * h + d * h * h * h;
        self.d2 = 2.0 * c * h * h + 6.0 * d * h * h * h;
        self.d3 = 6.0 * d * h * h * h;

        self.target = end;
        self.start_counter = pre_delay.max(0) as u32;
        self.stop_counter = duration as u32;
    }

    /// Returns the current value and advances the segment by one step.
    ///
    /// While the pre-delay is running, the output stays flat at the start
    /// value and only the pre-delay counter moves. Once the ramp has fully
    /// advanced, the call is side-effect free and keeps returning the
    /// settled value.
    pub fn next_sample(&mut self) -> f32 {
        let value = self.d0;

        if self.start_counter > 0 {
            self.start_counter -= 1;
        } else if self.stop_counter > 0 {
            self.d0 += self.d1;
            self.d1 += self.d2;
            self.d2 += self.d3;

            self.stop_counter -= 1;
        }

        value
    }

    /// The value the next call to [`next_sample`](CubicCurve::next_sample)
    /// will return, without advancing.
    pub fn value(&self) -> f32 {
        self.d0
    }

    /// True once both the pre-delay and the ramp have run out.
    pub fn is_settled(&self) -> bool {
        self.start_counter == 0 && self.stop_counter == 0
    }

    /// The end value this segment was initialized toward.
    pub fn target(&self) -> f32 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn drain(curve: &mut CubicCurve, n: usize) -> Vec<f32> {
        (0..n).map(|_| curve.next_sample()).collect()
    }

    #[test]
    fn test_first_value_is_start() {
        let mut curve = CubicCurve::new(0.25, 0.75, 0, 10);
        assert_eq!(curve.next_sample(), 0.25);
    }

    #[test]
    fn test_ramp_reaches_end() {
        let mut curve = CubicCurve::new(0.0, 1.0, 0, 100);
        let values = drain(&mut curve, 100);
        assert_eq!(values[0], 0.0);
        assert!(approx_eq(curve.next_sample(), 1.0));
    }

    #[test]
    fn test_ramp_is_monotone_for_unit_delta() {
        let mut curve = CubicCurve::new(0.0, 1.0, 0, 100);
        let values = drain(&mut curve, 101);
        for pair in values.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_pre_delay_holds_start_exactly() {
        let mut curve = CubicCurve::new(0.0, 1.0, 10, 5);
        for _ in 0..10 {
            assert_eq!(curve.next_sample(), 0.0);
        }
        // Ramp portion: 5 steps toward 1.0.
        let ramp = drain(&mut curve, 5);
        assert_eq!(ramp[0], 0.0);
        for pair in ramp.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert!(approx_eq(curve.next_sample(), 1.0));
    }

    #[test]
    fn test_settled_reads_are_constant() {
        let mut curve = CubicCurve::new(0.0, 1.0, 3, 7);
        drain(&mut curve, 10);
        assert!(curve.is_settled());

        let settled = curve.next_sample();
        for _ in 0..50 {
            assert_eq!(curve.next_sample(), settled);
        }
        assert!(approx_eq(settled, 1.0));
    }

    #[test]
    fn test_non_positive_duration_clamps_to_one_step() {
        let mut curve = CubicCurve::new(0.0, 1.0, 0, 0);
        curve.next_sample();
        assert!(curve.is_settled());

        let mut curve = CubicCurve::new(0.0, 1.0, 0, -5);
        curve.next_sample();
        assert!(curve.is_settled());
    }

    #[test]
    fn test_negative_pre_delay_clamps_to_zero() {
        let mut curve = CubicCurve::new(0.0, 1.0, -20, 4);
        // Ramp starts immediately: second value is already above start.
        assert_eq!(curve.next_sample(), 0.0);
        assert!(curve.next_sample() > 0.0);
    }

    #[test]
    fn test_set_overwrites_previous_segment() {
        let mut curve = CubicCurve::new(0.0, 1.0, 0, 8);
        drain(&mut curve, 8);
        assert!(approx_eq(curve.value(), 1.0));

        curve.set(1.0, 0.0, 2, 8);
        assert_eq!(curve.target(), 0.0);
        assert_eq!(curve.next_sample(), 1.0);
        assert_eq!(curve.next_sample(), 1.0);
        drain(&mut curve, 8);
        assert!(approx_eq(curve.next_sample(), 0.0));
    }

    #[test]
    fn test_descending_ramp() {
        let mut curve = CubicCurve::new(1.0, 0.0, 0, 50);
        assert_eq!(curve.next_sample(), 1.0);
        drain(&mut curve, 49);
        assert!(approx_eq(curve.next_sample(), 0.0));
    }

    #[test]
    fn test_pre_delay_leaves_coefficients_untouched() {
        let mut held = CubicCurve::new(0.0, 1.0, 5, 20);
        let mut immediate = CubicCurve::new(0.0, 1.0, 0, 20);

        drain(&mut held, 5);
        // After the hold, both curves emit the same ramp.
        for _ in 0..21 {
            assert_eq!(held.next_sample(), immediate.next_sample());
        }
    }
}
