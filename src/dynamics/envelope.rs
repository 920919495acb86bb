// SPDX-License-Identifier: LGPL-3.0-or-later

//! Single-pole envelope smoother.
//!
//! One detector holds one time constant; a compressor owns two of them
//! (attack and release) and picks per sample which one to run. The
//! smoothing coefficient is `exp(-1000 / (time_constant_ms * fs))`, so
//! a shorter time constant gives a smaller coefficient and a faster
//! response.

/// One-pole smoother with a millisecond time constant.
#[derive(Debug, Clone)]
pub struct EnvelopeDetector {
    sample_rate: f32,
    time_constant: f32,
    coefficient: f32,
}

impl EnvelopeDetector {
    /// Create a detector with the given time constant in milliseconds.
    pub fn new(sample_rate: f32, time_constant_ms: f32) -> Self {
        let mut detector = Self {
            sample_rate,
            time_constant: time_constant_ms,
            coefficient: 0.0,
        };
        detector.update_coefficient();
        detector
    }

    /// Change the time constant. Values `<= 0` (and NaN) are ignored.
    pub fn set_time_constant(&mut self, time_constant_ms: f32) {
        if time_constant_ms > 0.0 {
            self.time_constant = time_constant_ms;
            self.update_coefficient();
        } else {
            log::debug!("ignoring non-positive time constant {time_constant_ms}");
        }
    }

    pub fn time_constant(&self) -> f32 {
        self.time_constant
    }

    pub fn coefficient(&self) -> f32 {
        self.coefficient
    }

    fn update_coefficient(&mut self) {
        self.coefficient = (-1000.0 / (self.time_constant * self.sample_rate)).exp();
    }

    /// Advance `state` one sample toward `input`.
    ///
    /// `state' = input + coefficient * (state - input)`
    #[inline]
    pub fn run(&self, input: f32, state: &mut f32) {
        *state = input + self.coefficient * (*state - input);
    }
}
