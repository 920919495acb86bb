// SPDX-License-Identifier: LGPL-3.0-or-later

//! Stateful biquad filter cell.
//!
//! Wraps a [`BiquadCoeffs`] set with two feedback registers and
//! parameter management. Every setter re-derives all five coefficients
//! together so the transfer function is never a mix of old and new
//! parameters.
//!
//! # Examples
//!
//! ```
//! use strip_dsp::filters::biquad::Biquad;
//! use strip_dsp::filters::coeffs::FilterType;
//!
//! let mut filt = Biquad::new(48000.0, FilterType::Lowpass);
//! filt.set_frequency(1000.0).set_quality(0.707);
//!
//! let out = filt.process(1.0);
//! assert!(out.is_finite());
//! ```

use super::coeffs::{calc_biquad_coeffs, BiquadCoeffs, BiquadParams, FilterType};

/// Second-order IIR filter section with parameter management.
///
/// State is two feedback registers mutated every sample; coefficients
/// are a pure function of the parameters and are recomputed atomically
/// by each setter.
#[derive(Debug, Clone)]
pub struct Biquad {
    params: BiquadParams,
    coeffs: BiquadCoeffs,
    z1: f32,
    z2: f32,
}

impl Biquad {
    /// Create a filter at the given sample rate and response type.
    ///
    /// Defaults: 100 Hz, Q 0.5, 0 dB gain.
    pub fn new(sample_rate: f32, filter_type: FilterType) -> Self {
        let params = BiquadParams {
            sample_rate,
            frequency: 100.0,
            quality: 0.5,
            gain: 0.0,
            filter_type,
        };
        Self {
            coeffs: calc_biquad_coeffs(&params),
            params,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// Set the center/cutoff frequency in Hz.
    ///
    /// A non-positive or NaN frequency switches the section to identity
    /// pass-through coefficients.
    pub fn set_frequency(&mut self, frequency: f32) -> &mut Self {
        self.params.frequency = frequency;
        self.coeffs = calc_biquad_coeffs(&self.params);
        self
    }

    /// Set the quality factor. Values `<= 0` (and NaN) are ignored.
    pub fn set_quality(&mut self, quality: f32) -> &mut Self {
        if quality > 0.0 {
            self.params.quality = quality;
            self.coeffs = calc_biquad_coeffs(&self.params);
        } else {
            log::debug!("ignoring non-positive quality {quality}");
        }
        self
    }

    /// Set the gain in dB (used by Peak and the shelf types).
    pub fn set_gain(&mut self, gain_db: f32) -> &mut Self {
        self.params.gain = gain_db;
        self.coeffs = calc_biquad_coeffs(&self.params);
        self
    }

    /// Set the filter response type.
    pub fn set_filter_type(&mut self, filter_type: FilterType) -> &mut Self {
        self.params.filter_type = filter_type;
        self.coeffs = calc_biquad_coeffs(&self.params);
        self
    }

    pub fn sample_rate(&self) -> f32 {
        self.params.sample_rate
    }

    pub fn frequency(&self) -> f32 {
        self.params.frequency
    }

    pub fn quality(&self) -> f32 {
        self.params.quality
    }

    pub fn gain(&self) -> f32 {
        self.params.gain
    }

    pub fn filter_type(&self) -> FilterType {
        self.params.filter_type
    }

    /// Current transfer-function coefficients.
    pub fn coefficients(&self) -> BiquadCoeffs {
        self.coeffs
    }

    /// Process one sample through the transposed direct-form-II
    /// recurrence. NaN in gives NaN out; there are no error paths here.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let out = input * self.coeffs.a0 + self.z1;
        self.z1 = input * self.coeffs.a1 + self.z2 - self.coeffs.b1 * out;
        self.z2 = input * self.coeffs.a2 - self.coeffs.b2 * out;
        out
    }

    /// Process a buffer in-place.
    pub fn process_block(&mut self, buf: &mut [f32]) {
        for sample in buf.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear the feedback registers without touching parameters.
    pub fn clear(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new(48000.0, FilterType::Off)
    }
}

/// Two independent biquad sections with mirrored parameters.
#[derive(Debug, Clone)]
pub struct StereoBiquad {
    left: Biquad,
    right: Biquad,
}

impl StereoBiquad {
    pub fn new(sample_rate: f32, filter_type: FilterType) -> Self {
        Self {
            left: Biquad::new(sample_rate, filter_type),
            right: Biquad::new(sample_rate, filter_type),
        }
    }

    pub fn set_frequency(&mut self, frequency: f32) -> &mut Self {
        self.left.set_frequency(frequency);
        self.right.set_frequency(frequency);
        self
    }

    pub fn set_quality(&mut self, quality: f32) -> &mut Self {
        self.left.set_quality(quality);
        self.right.set_quality(quality);
        self
    }

    pub fn set_gain(&mut self, gain_db: f32) -> &mut Self {
        self.left.set_gain(gain_db);
        self.right.set_gain(gain_db);
        self
    }

    pub fn set_filter_type(&mut self, filter_type: FilterType) -> &mut Self {
        self.left.set_filter_type(filter_type);
        self.right.set_filter_type(filter_type);
        self
    }

    /// Process one stereo frame.
    #[inline]
    pub fn process(&mut self, left: f32, right: f32) -> (f32, f32) {
        (self.left.process(left), self.right.process(right))
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }

    pub fn left(&self) -> &Biquad {
        &self.left
    }

    pub fn right(&self) -> &Biquad {
        &self.right
    }
}
