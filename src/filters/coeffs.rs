// SPDX-License-Identifier: LGPL-3.0-or-later

//! Biquad coefficient calculation.
//!
//! Closed-form coefficient sets for eleven second-order responses,
//! derived from analog prototypes via the bilinear transform with
//! `K = tan(π f / fs)` frequency pre-warping. Peak and shelf types have
//! separate boost and cut branches that swap where the gain term `V`
//! lands between numerator and denominator.
//!
//! Convention: `a0, a1, a2` are the numerator (feed-forward) and
//! `b1, b2` the denominator (feedback) coefficients, with the
//! denominator normalized to a leading 1.

use std::f32::consts::PI;

/// Second-order filter response selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterType {
    /// Pass-through (identity coefficients).
    #[default]
    Off,
    Lowpass,
    Highpass,
    Bandpass,
    Notch,
    /// Peaking bell with Q and gain.
    Peak,
    LowShelf,
    HighShelf,
    /// Low shelf with fixed sqrt(2) damping instead of a Q control.
    LowShelfNoQ,
    /// High shelf with fixed sqrt(2) damping instead of a Q control.
    HighShelfNoQ,
    Allpass,
}

/// Transfer-function coefficients of one biquad section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub a0: f32,
    pub a1: f32,
    pub a2: f32,
    pub b1: f32,
    pub b2: f32,
}

impl BiquadCoeffs {
    /// Pass-through coefficients: `out == input`, state stays zero.
    pub const IDENTITY: Self = Self {
        a0: 1.0,
        a1: 0.0,
        a2: 0.0,
        b1: 0.0,
        b2: 0.0,
    };
}

impl Default for BiquadCoeffs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Full parameter set a biquad derives its coefficients from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BiquadParams {
    pub sample_rate: f32,
    /// Center/cutoff frequency in Hz.
    pub frequency: f32,
    /// Quality factor. Ignored by the NoQ shelf types.
    pub quality: f32,
    /// Gain in dB. Only Peak and the shelf types use it.
    pub gain: f32,
    pub filter_type: FilterType,
}

/// Compute all five coefficients from a parameter set.
///
/// A non-positive or NaN frequency yields [`BiquadCoeffs::IDENTITY`]
/// so the section degrades to a transparent pass-through instead of
/// feeding a singularity into `tan`. All five coefficients are always
/// derived together; callers must never patch individual fields.
pub fn calc_biquad_coeffs(params: &BiquadParams) -> BiquadCoeffs {
    if !(params.frequency > 0.0) {
        // Covers frequency <= 0 and NaN
        return BiquadCoeffs::IDENTITY;
    }

    let q = params.quality;
    let v = 10.0_f32.powf(params.gain.abs() / 20.0);
    let k = (PI * params.frequency / params.sample_rate).tan();
    let k2 = k * k;

    let (a0, a1, a2, b1, b2);
    match params.filter_type {
        FilterType::Off => return BiquadCoeffs::IDENTITY,

        FilterType::Lowpass => {
            let norm = 1.0 / (1.0 + k / q + k2);
            a0 = k2 * norm;
            a1 = 2.0 * a0;
            a2 = a0;
            b1 = 2.0 * (k2 - 1.0) * norm;
            b2 = (1.0 - k / q + k2) * norm;
        }

        FilterType::Highpass => {
            let norm = 1.0 / (1.0 + k / q + k2);
            a0 = norm;
            a1 = -2.0 * a0;
            a2 = a0;
            b1 = 2.0 * (k2 - 1.0) * norm;
            b2 = (1.0 - k / q + k2) * norm;
        }

        FilterType::Bandpass => {
            let norm = 1.0 / (1.0 + k / q + k2);
            a0 = k / q * norm;
            a1 = 0.0;
            a2 = -a0;
            b1 = 2.0 * (k2 - 1.0) * norm;
            b2 = (1.0 - k / q + k2) * norm;
        }

        FilterType::Notch => {
            let norm = 1.0 / (1.0 + k / q + k2);
            a0 = (1.0 + k2) * norm;
            a1 = 2.0 * (k2 - 1.0) * norm;
            a2 = a0;
            b1 = a1;
            b2 = (1.0 - k / q + k2) * norm;
        }

        FilterType::Peak => {
            if params.gain >= 0.0 {
                let norm = 1.0 / (1.0 + k / q + k2);
                a0 = (1.0 + k / q * v + k2) * norm;
                a1 = 2.0 * (k2 - 1.0) * norm;
                a2 = (1.0 - k / q * v + k2) * norm;
                b1 = a1;
                b2 = (1.0 - k / q + k2) * norm;
            } else {
                let norm = 1.0 / (1.0 + k / q * v + k2);
                a0 = (1.0 + k / q + k2) * norm;
                a1 = 2.0 * (k2 - 1.0) * norm;
                a2 = (1.0 - k / q + k2) * norm;
                b1 = a1;
                b2 = (1.0 - k / q * v + k2) * norm;
            }
        }

        FilterType::LowShelf => {
            if params.gain >= 0.0 {
                let norm = 1.0 / (1.0 + k / q + k2);
                a0 = (1.0 + v.sqrt() * k / q + v * k2) * norm;
                a1 = 2.0 * (v * k2 - 1.0) * norm;
                a2 = (1.0 - v.sqrt() * k / q + v * k2) * norm;
                b1 = 2.0 * (k2 - 1.0) * norm;
                b2 = (1.0 - k / q + k2) * norm;
            } else {
                let norm = 1.0 / (1.0 + v.sqrt() * k / q + v * k2);
                a0 = (1.0 + k / q + k2) * norm;
                a1 = 2.0 * (k2 - 1.0) * norm;
                a2 = (1.0 - k / q + k2) * norm;
                b1 = 2.0 * (v * k2 - 1.0) * norm;
                b2 = (1.0 - v.sqrt() * k / q + v * k2) * norm;
            }
        }

        FilterType::HighShelf => {
            if params.gain >= 0.0 {
                let norm = 1.0 / (1.0 + k / q + k2);
                a0 = (v + v.sqrt() * k / q + k2) * norm;
                a1 = 2.0 * (k2 - v) * norm;
                a2 = (v - v.sqrt() * k / q + k2) * norm;
                b1 = 2.0 * (k2 - 1.0) * norm;
                b2 = (1.0 - k / q + k2) * norm;
            } else {
                let norm = 1.0 / (v + v.sqrt() * k / q + k2);
                a0 = (1.0 + k / q + k2) * norm;
                a1 = 2.0 * (k2 - 1.0) * norm;
                a2 = (1.0 - k / q + k2) * norm;
                b1 = 2.0 * (k2 - v) * norm;
                b2 = (v - v.sqrt() * k / q + k2) * norm;
            }
        }

        FilterType::LowShelfNoQ => {
            let sqrt2 = std::f32::consts::SQRT_2;
            if params.gain >= 0.0 {
                let norm = 1.0 / (1.0 + sqrt2 * k + k2);
                a0 = (1.0 + (2.0 * v).sqrt() * k + v * k2) * norm;
                a1 = 2.0 * (v * k2 - 1.0) * norm;
                a2 = (1.0 - (2.0 * v).sqrt() * k + v * k2) * norm;
                b1 = 2.0 * (k2 - 1.0) * norm;
                b2 = (1.0 - sqrt2 * k + k2) * norm;
            } else {
                let norm = 1.0 / (1.0 + (2.0 * v).sqrt() * k + v * k2);
                a0 = (1.0 + sqrt2 * k + k2) * norm;
                a1 = 2.0 * (k2 - 1.0) * norm;
                a2 = (1.0 - sqrt2 * k + k2) * norm;
                b1 = 2.0 * (v * k2 - 1.0) * norm;
                b2 = (1.0 - (2.0 * v).sqrt() * k + v * k2) * norm;
            }
        }

        FilterType::HighShelfNoQ => {
            let sqrt2 = std::f32::consts::SQRT_2;
            if params.gain >= 0.0 {
                let norm = 1.0 / (1.0 + sqrt2 * k + k2);
                a0 = (v + (2.0 * v).sqrt() * k + k2) * norm;
                a1 = 2.0 * (k2 - v) * norm;
                a2 = (v - (2.0 * v).sqrt() * k + k2) * norm;
                b1 = 2.0 * (k2 - 1.0) * norm;
                b2 = (1.0 - sqrt2 * k + k2) * norm;
            } else {
                let norm = 1.0 / (v + (2.0 * v).sqrt() * k + k2);
                a0 = (1.0 + sqrt2 * k + k2) * norm;
                a1 = 2.0 * (k2 - 1.0) * norm;
                a2 = (1.0 - sqrt2 * k + k2) * norm;
                b1 = 2.0 * (k2 - v) * norm;
                b2 = (v - (2.0 * v).sqrt() * k + k2) * norm;
            }
        }

        FilterType::Allpass => {
            let norm = 1.0 / (1.0 + k / q + k2);
            a0 = (1.0 - k / q + k2) * norm;
            a1 = 2.0 * (k2 - 1.0) * norm;
            a2 = 1.0;
            b1 = a1;
            b2 = a0;
        }
    }

    BiquadCoeffs { a0, a1, a2, b1, b2 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48000.0;

    fn params(filter_type: FilterType, frequency: f32, quality: f32, gain: f32) -> BiquadParams {
        BiquadParams {
            sample_rate: SR,
            frequency,
            quality,
            gain,
            filter_type,
        }
    }

    /// DC gain of a section: H(1) = (a0+a1+a2) / (1+b1+b2).
    fn dc_gain(c: &BiquadCoeffs) -> f32 {
        (c.a0 + c.a1 + c.a2) / (1.0 + c.b1 + c.b2)
    }

    /// Nyquist gain: H(-1) = (a0-a1+a2) / (1-b1+b2).
    fn nyquist_gain(c: &BiquadCoeffs) -> f32 {
        (c.a0 - c.a1 + c.a2) / (1.0 - c.b1 + c.b2)
    }

    /// Magnitude response at angular frequency w (radians/sample).
    fn magnitude_at(c: &BiquadCoeffs, w: f32) -> f32 {
        let (cos_w, sin_w) = (w.cos(), w.sin());
        let (cos_2w, sin_2w) = ((2.0 * w).cos(), (2.0 * w).sin());

        let num_re = c.a0 + c.a1 * cos_w + c.a2 * cos_2w;
        let num_im = -c.a1 * sin_w - c.a2 * sin_2w;
        let den_re = 1.0 + c.b1 * cos_w + c.b2 * cos_2w;
        let den_im = -c.b1 * sin_w - c.b2 * sin_2w;

        ((num_re * num_re + num_im * num_im) / (den_re * den_re + den_im * den_im)).sqrt()
    }

    #[test]
    fn invalid_frequency_yields_identity() {
        for freq in [0.0, -10.0, f32::NAN] {
            let c = calc_biquad_coeffs(&params(FilterType::Lowpass, freq, 0.707, 0.0));
            assert_eq!(c, BiquadCoeffs::IDENTITY, "freq {freq} should be identity");
        }
    }

    #[test]
    fn off_is_identity() {
        let c = calc_biquad_coeffs(&params(FilterType::Off, 1000.0, 0.707, 6.0));
        assert_eq!(c, BiquadCoeffs::IDENTITY);
    }

    #[test]
    fn lowpass_passes_dc_blocks_nyquist() {
        let c = calc_biquad_coeffs(&params(FilterType::Lowpass, 1000.0, 0.707, 0.0));
        assert!((dc_gain(&c) - 1.0).abs() < 1e-4, "lowpass DC gain should be 1");
        assert!(
            nyquist_gain(&c).abs() < 1e-4,
            "lowpass Nyquist gain should be 0"
        );
    }

    #[test]
    fn highpass_blocks_dc_passes_nyquist() {
        let c = calc_biquad_coeffs(&params(FilterType::Highpass, 1000.0, 0.707, 0.0));
        assert!(dc_gain(&c).abs() < 1e-4, "highpass DC gain should be 0");
        assert!(
            (nyquist_gain(&c) - 1.0).abs() < 1e-3,
            "highpass Nyquist gain should be 1"
        );
    }

    #[test]
    fn bandpass_blocks_band_edges_passes_center() {
        let c = calc_biquad_coeffs(&params(FilterType::Bandpass, 1000.0, 1.0, 0.0));
        assert!(dc_gain(&c).abs() < 1e-4);
        assert!(nyquist_gain(&c).abs() < 1e-3);

        let w = 2.0 * PI * 1000.0 / SR;
        assert!(
            (magnitude_at(&c, w) - 1.0).abs() < 1e-3,
            "bandpass should be unity at center"
        );
    }

    #[test]
    fn notch_rejects_center_frequency() {
        let c = calc_biquad_coeffs(&params(FilterType::Notch, 1000.0, 2.0, 0.0));
        let w = 2.0 * PI * 1000.0 / SR;
        assert!(
            magnitude_at(&c, w) < 1e-3,
            "notch should null the center frequency"
        );
        assert!((dc_gain(&c) - 1.0).abs() < 1e-3);
        assert!((nyquist_gain(&c) - 1.0).abs() < 1e-2);
    }

    #[test]
    fn peak_boost_hits_target_gain_at_center() {
        let gain_db = 6.0;
        let c = calc_biquad_coeffs(&params(FilterType::Peak, 1000.0, 1.0, gain_db));
        let w = 2.0 * PI * 1000.0 / SR;
        let target = 10.0_f32.powf(gain_db / 20.0);
        assert!(
            (magnitude_at(&c, w) - target).abs() < 0.02,
            "peak boost should reach +6 dB at center"
        );
        // Unity away from the bell
        assert!((dc_gain(&c) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn peak_cut_is_reciprocal_of_boost() {
        let boost = calc_biquad_coeffs(&params(FilterType::Peak, 1000.0, 1.0, 6.0));
        let cut = calc_biquad_coeffs(&params(FilterType::Peak, 1000.0, 1.0, -6.0));
        let w = 2.0 * PI * 1000.0 / SR;
        let product = magnitude_at(&boost, w) * magnitude_at(&cut, w);
        assert!(
            (product - 1.0).abs() < 0.01,
            "boost and cut at the same settings should cancel, got product {product}"
        );
    }

    #[test]
    fn low_shelf_boost_lifts_dc_only() {
        let c = calc_biquad_coeffs(&params(FilterType::LowShelf, 1000.0, 0.707, 6.0));
        let v = 10.0_f32.powf(6.0 / 20.0);
        assert!(
            (dc_gain(&c) - v).abs() < 0.01,
            "low shelf boost should lift DC by V"
        );
        assert!((nyquist_gain(&c) - 1.0).abs() < 0.01);
    }

    #[test]
    fn low_shelf_cut_drops_dc_only() {
        let c = calc_biquad_coeffs(&params(FilterType::LowShelf, 1000.0, 0.707, -6.0));
        let v = 10.0_f32.powf(6.0 / 20.0);
        assert!(
            (dc_gain(&c) - 1.0 / v).abs() < 0.01,
            "low shelf cut should attenuate DC by 1/V"
        );
        assert!((nyquist_gain(&c) - 1.0).abs() < 0.01);
    }

    #[test]
    fn high_shelf_boost_lifts_nyquist_only() {
        let c = calc_biquad_coeffs(&params(FilterType::HighShelf, 1000.0, 0.707, 6.0));
        let v = 10.0_f32.powf(6.0 / 20.0);
        assert!((dc_gain(&c) - 1.0).abs() < 0.01);
        assert!(
            (nyquist_gain(&c) - v).abs() < 0.02,
            "high shelf boost should lift Nyquist by V"
        );
    }

    #[test]
    fn high_shelf_cut_drops_nyquist_only() {
        let c = calc_biquad_coeffs(&params(FilterType::HighShelf, 1000.0, 0.707, -6.0));
        let v = 10.0_f32.powf(6.0 / 20.0);
        assert!((dc_gain(&c) - 1.0).abs() < 0.01);
        assert!((nyquist_gain(&c) - 1.0 / v).abs() < 0.01);
    }

    #[test]
    fn noq_shelves_match_band_edge_gains() {
        let v = 10.0_f32.powf(6.0 / 20.0);

        let c = calc_biquad_coeffs(&params(FilterType::LowShelfNoQ, 1000.0, 0.5, 6.0));
        assert!((dc_gain(&c) - v).abs() < 0.01);
        assert!((nyquist_gain(&c) - 1.0).abs() < 0.01);

        let c = calc_biquad_coeffs(&params(FilterType::HighShelfNoQ, 1000.0, 0.5, -6.0));
        assert!((dc_gain(&c) - 1.0).abs() < 0.01);
        assert!((nyquist_gain(&c) - 1.0 / v).abs() < 0.01);
    }

    #[test]
    fn noq_shelves_ignore_quality() {
        let a = calc_biquad_coeffs(&params(FilterType::LowShelfNoQ, 500.0, 0.1, 4.0));
        let b = calc_biquad_coeffs(&params(FilterType::LowShelfNoQ, 500.0, 10.0, 4.0));
        assert_eq!(a, b, "NoQ shelf must not depend on quality");
    }

    #[test]
    fn allpass_has_unit_magnitude_everywhere() {
        let c = calc_biquad_coeffs(&params(FilterType::Allpass, 1000.0, 0.707, 0.0));
        assert!(
            (c.a2 - 1.0).abs() < 1e-6,
            "allpass numerator tail should be exactly 1"
        );
        for freq in [50.0, 500.0, 1000.0, 5000.0, 20000.0] {
            let w = 2.0 * PI * freq / SR;
            let mag = magnitude_at(&c, w);
            assert!(
                (mag - 1.0).abs() < 1e-3,
                "allpass magnitude at {freq} Hz was {mag}"
            );
        }
    }

    #[test]
    fn coefficients_stay_finite_over_parameter_sweep() {
        let types = [
            FilterType::Lowpass,
            FilterType::Highpass,
            FilterType::Bandpass,
            FilterType::Notch,
            FilterType::Peak,
            FilterType::LowShelf,
            FilterType::HighShelf,
            FilterType::LowShelfNoQ,
            FilterType::HighShelfNoQ,
            FilterType::Allpass,
        ];
        for ft in types {
            for freq in [20.0, 100.0, 1000.0, 10000.0, 20000.0] {
                for q in [0.1, 0.707, 4.0] {
                    for gain in [-18.0, 0.0, 18.0] {
                        let c = calc_biquad_coeffs(&params(ft, freq, q, gain));
                        for (name, value) in [
                            ("a0", c.a0),
                            ("a1", c.a1),
                            ("a2", c.a2),
                            ("b1", c.b1),
                            ("b2", c.b2),
                        ] {
                            assert!(
                                value.is_finite(),
                                "{name} not finite for {ft:?} f={freq} q={q} g={gain}"
                            );
                        }
                    }
                }
            }
        }
    }
}
