// SPDX-License-Identifier: LGPL-3.0-or-later

//! Feed-forward compressor with internal sidechain equalizer.
//!
//! The detector path runs the input through a sidechain [`Equalizer`]
//! (one high-pass band, transparent until configured), converts the
//! rectified level to dB, and smooths the over-threshold amount with an
//! asymmetric attack/release envelope. The gain computer supports a hard
//! knee or a linearly blended soft knee.
//!
//! Stereo and mid/side composites share one detector value per frame
//! (`max` of the two rectified sidechain levels) unless `dual_mono` is
//! requested, in which case each channel follows its own level.
//!
//! # Examples
//!
//! ```
//! use strip_dsp::dynamics::compressor::Compressor;
//!
//! let mut comp = Compressor::new(48000.0);
//! comp.set_threshold(-20.0);
//! comp.set_ratio(4.0);
//! comp.set_knee(6.0);
//!
//! let out = comp.process(0.8);
//! assert!(out.is_finite());
//! ```

use crate::channel::{MsChannel, StereoChannel};
use crate::consts::DC_OFFSET;
use crate::filters::coeffs::FilterType;
use crate::filters::equalizer::{Equalizer, MsEqualizer, StereoEqualizer};
use crate::midside;
use crate::units::{db_to_gain, gain_to_db};

use super::envelope::EnvelopeDetector;

/// Static compressor parameters.
///
/// The running envelope lives on the compressor itself, not here, so a
/// parameter block can be applied wholesale without disturbing the
/// detector state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressorParams {
    /// Threshold in dB.
    pub threshold: f32,
    /// Compression ratio, `> 0`. 1 means no compression.
    pub ratio: f32,
    /// Soft-knee width in dB. 0 selects the hard knee.
    pub knee_width: f32,
    /// Output makeup gain in dB.
    pub makeup_gain: f32,
    /// Attack time constant in ms.
    pub attack: f32,
    /// Release time constant in ms.
    pub release: f32,
}

impl Default for CompressorParams {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            ratio: 1.0,
            knee_width: 0.0,
            makeup_gain: 0.0,
            attack: 10.0,
            release: 100.0,
        }
    }
}

/// Mono feed-forward compressor.
#[derive(Debug, Clone)]
pub struct Compressor {
    params: CompressorParams,
    env: f32,
    attack: EnvelopeDetector,
    release: EnvelopeDetector,
    sidechain: Equalizer,
}

impl Compressor {
    /// Create a compressor with default parameters.
    ///
    /// The sidechain equalizer starts with a single high-pass band at
    /// 0 Hz, which resolves to identity coefficients: the detector sees
    /// the raw input until the sidechain is configured.
    pub fn new(sample_rate: f32) -> Self {
        let params = CompressorParams::default();
        let mut sidechain = Equalizer::new(sample_rate);
        sidechain.add_band(0.0, 1.0, 0.0, FilterType::Highpass);

        Self {
            attack: EnvelopeDetector::new(sample_rate, params.attack),
            release: EnvelopeDetector::new(sample_rate, params.release),
            env: 0.0,
            sidechain,
            params,
        }
    }

    /// Apply a whole parameter block.
    ///
    /// Every field goes through its individual setter, so out-of-range
    /// values are rejected field by field and the detector coefficients
    /// never fall out of sync with the stored times.
    pub fn set_parameters(&mut self, params: CompressorParams) {
        self.set_threshold(params.threshold);
        self.set_ratio(params.ratio);
        self.set_knee(params.knee_width);
        self.set_makeup_gain(params.makeup_gain);
        self.set_attack(params.attack);
        self.set_release(params.release);
    }

    pub fn set_threshold(&mut self, threshold_db: f32) {
        self.params.threshold = threshold_db;
    }

    /// Set the ratio. Values `<= 0` (and NaN) are ignored.
    pub fn set_ratio(&mut self, ratio: f32) {
        if ratio > 0.0 {
            self.params.ratio = ratio;
        } else {
            log::debug!("ignoring non-positive ratio {ratio}");
        }
    }

    /// Set the knee width in dB. Negative values (and NaN) are ignored.
    pub fn set_knee(&mut self, knee_width_db: f32) {
        if knee_width_db >= 0.0 {
            self.params.knee_width = knee_width_db;
        } else {
            log::debug!("ignoring negative knee width {knee_width_db}");
        }
    }

    pub fn set_makeup_gain(&mut self, gain_db: f32) {
        self.params.makeup_gain = gain_db;
    }

    /// Set the attack time constant in ms. Values `<= 0` are ignored.
    pub fn set_attack(&mut self, attack_ms: f32) {
        if attack_ms > 0.0 {
            self.params.attack = attack_ms;
            self.attack.set_time_constant(attack_ms);
        }
    }

    /// Set the release time constant in ms. Values `<= 0` are ignored.
    pub fn set_release(&mut self, release_ms: f32) {
        if release_ms > 0.0 {
            self.params.release = release_ms;
            self.release.set_time_constant(release_ms);
        }
    }

    pub fn set_sidechain_frequency(&mut self, frequency: f32) {
        self.sidechain.set_frequency(0, frequency);
    }

    pub fn set_sidechain_quality(&mut self, quality: f32) {
        self.sidechain.set_quality(0, quality);
    }

    pub fn set_sidechain_gain(&mut self, gain_db: f32) {
        self.sidechain.set_gain(0, gain_db);
    }

    pub fn set_sidechain_filter_type(&mut self, filter_type: FilterType) {
        self.sidechain.set_filter_type(0, filter_type);
    }

    pub fn params(&self) -> &CompressorParams {
        &self.params
    }

    /// Running over-threshold envelope in dB.
    pub fn envelope(&self) -> f32 {
        self.env
    }

    pub fn sidechain_equalizer(&self) -> &Equalizer {
        &self.sidechain
    }

    /// Process one sample through the internal sidechain and the gain
    /// computer.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let sidechain = self.sidechain.process(input);
        self.compress(input, sidechain.abs())
    }

    /// Reset the envelope and sidechain filter state.
    pub fn clear(&mut self) {
        self.env = 0.0;
        self.sidechain.clear();
    }

    /// Apply gain reduction to `input`, driven by the rectified
    /// `detector` level. The envelope is updated exactly once per call.
    fn compress(&mut self, input: f32, detector: f32) -> f32 {
        // DC_OFFSET keeps the log away from -inf and the envelope
        // recurrence out of denormal range
        let key_db = gain_to_db(detector + DC_OFFSET);

        let mut over_db = (key_db - self.params.threshold).max(0.0);
        over_db += DC_OFFSET;

        if over_db > self.env {
            self.attack.run(over_db, &mut self.env);
        } else {
            self.release.run(over_db, &mut self.env);
        }
        over_db = self.env - DC_OFFSET;

        let gain_reduction = if self.params.knee_width > 0.0 {
            self.knee_gain(over_db)
        } else {
            db_to_gain(-over_db)
        };

        input * gain_reduction * db_to_gain(self.params.makeup_gain)
    }

    /// Soft-knee transfer function. Takes the smoothed over-threshold
    /// value in dB, returns linear gain.
    fn knee_gain(&self, over_db: f32) -> f32 {
        let knee_start = self.params.threshold - self.params.knee_width / 2.0;
        let knee_end = self.params.threshold + self.params.knee_width / 2.0;

        if over_db <= knee_start {
            1.0
        } else if over_db >= knee_end {
            // Full compression above the knee
            let reduced = over_db / self.params.ratio;
            db_to_gain(-(over_db - reduced))
        } else {
            // Inside the knee, blend linearly toward full compression
            let blend = (over_db - knee_start) / self.params.knee_width;
            let reduced = over_db / self.params.ratio;
            let compressed = db_to_gain(-(over_db - reduced));
            1.0 + blend * (compressed - 1.0)
        }
    }
}

/// Stereo compressor with channel linking.
///
/// Owns a composite sidechain equalizer; the per-channel compressors'
/// own sidechains are bypassed because detection happens here, before
/// [`Compressor::compress`] is driven with the shared or per-channel
/// level.
#[derive(Debug, Clone)]
pub struct StereoCompressor {
    left: Compressor,
    right: Compressor,
    params: CompressorParams,
    sidechain: StereoEqualizer,
}

impl StereoCompressor {
    pub fn new(sample_rate: f32) -> Self {
        let mut sidechain = StereoEqualizer::new(sample_rate);
        sidechain.add_band(0.0, 1.0, 0.0, FilterType::Highpass);

        Self {
            left: Compressor::new(sample_rate),
            right: Compressor::new(sample_rate),
            params: CompressorParams::default(),
            sidechain,
        }
    }

    /// Apply a whole parameter block field by field, rejecting
    /// out-of-range values the same way the individual setters do.
    pub fn set_parameters(&mut self, params: CompressorParams) {
        self.set_threshold(params.threshold);
        self.set_ratio(params.ratio);
        self.set_knee(params.knee_width);
        self.set_makeup_gain(params.makeup_gain);
        self.set_attack(params.attack);
        self.set_release(params.release);
    }

    pub fn set_threshold(&mut self, threshold_db: f32) {
        self.params.threshold = threshold_db;
        self.left.set_threshold(threshold_db);
        self.right.set_threshold(threshold_db);
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        if ratio > 0.0 {
            self.params.ratio = ratio;
        }
        self.left.set_ratio(ratio);
        self.right.set_ratio(ratio);
    }

    pub fn set_knee(&mut self, knee_width_db: f32) {
        if knee_width_db >= 0.0 {
            self.params.knee_width = knee_width_db;
        }
        self.left.set_knee(knee_width_db);
        self.right.set_knee(knee_width_db);
    }

    pub fn set_makeup_gain(&mut self, gain_db: f32) {
        self.params.makeup_gain = gain_db;
        self.left.set_makeup_gain(gain_db);
        self.right.set_makeup_gain(gain_db);
    }

    pub fn set_attack(&mut self, attack_ms: f32) {
        if attack_ms > 0.0 {
            self.params.attack = attack_ms;
        }
        self.left.set_attack(attack_ms);
        self.right.set_attack(attack_ms);
    }

    pub fn set_release(&mut self, release_ms: f32) {
        if release_ms > 0.0 {
            self.params.release = release_ms;
        }
        self.left.set_release(release_ms);
        self.right.set_release(release_ms);
    }

    pub fn set_sidechain_frequency(&mut self, frequency: f32, channel: StereoChannel) {
        self.sidechain.set_frequency(0, frequency, channel);
    }

    pub fn set_sidechain_quality(&mut self, quality: f32, channel: StereoChannel) {
        self.sidechain.set_quality(0, quality, channel);
    }

    pub fn set_sidechain_gain(&mut self, gain_db: f32, channel: StereoChannel) {
        self.sidechain.set_gain(0, gain_db, channel);
    }

    pub fn set_sidechain_filter_type(&mut self, filter_type: FilterType, channel: StereoChannel) {
        self.sidechain.set_filter_type(0, filter_type, channel);
    }

    pub fn params(&self) -> &CompressorParams {
        &self.params
    }

    pub fn sidechain_equalizer(&self) -> &StereoEqualizer {
        &self.sidechain
    }

    /// Process one stereo frame.
    ///
    /// With `dual_mono` each channel follows its own rectified sidechain
    /// level; otherwise both channels share `max(|left|, |right|)`.
    pub fn process(&mut self, left: f32, right: f32, dual_mono: bool) -> (f32, f32) {
        let (sc_left, sc_right) = self.sidechain.process(left, right);

        let abs_left = sc_left.abs();
        let abs_right = sc_right.abs();
        let link = abs_left.max(abs_right);

        if dual_mono {
            (
                self.left.compress(left, abs_left),
                self.right.compress(right, abs_right),
            )
        } else {
            (
                self.left.compress(left, link),
                self.right.compress(right, link),
            )
        }
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
        self.sidechain.clear();
    }
}

/// Mid/side compressor.
///
/// Encodes the input frame to mid/side by value, compresses each signal
/// (linked or dual-mono), and decodes back to left/right. The sidechain
/// equalizer filters the encoded pair, so linking happens on mid/side
/// levels rather than left/right levels.
#[derive(Debug, Clone)]
pub struct MsCompressor {
    mid: Compressor,
    side: Compressor,
    params: CompressorParams,
    sidechain: MsEqualizer,
}

impl MsCompressor {
    pub fn new(sample_rate: f32) -> Self {
        let mut sidechain = MsEqualizer::new(sample_rate);
        sidechain.add_band(0.0, 1.0, 0.0, FilterType::Highpass);

        Self {
            mid: Compressor::new(sample_rate),
            side: Compressor::new(sample_rate),
            params: CompressorParams::default(),
            sidechain,
        }
    }

    /// Apply a whole parameter block field by field, rejecting
    /// out-of-range values the same way the individual setters do.
    pub fn set_parameters(&mut self, params: CompressorParams) {
        self.set_threshold(params.threshold);
        self.set_ratio(params.ratio);
        self.set_knee(params.knee_width);
        self.set_makeup_gain(params.makeup_gain);
        self.set_attack(params.attack);
        self.set_release(params.release);
    }

    pub fn set_threshold(&mut self, threshold_db: f32) {
        self.params.threshold = threshold_db;
        self.mid.set_threshold(threshold_db);
        self.side.set_threshold(threshold_db);
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        if ratio > 0.0 {
            self.params.ratio = ratio;
        }
        self.mid.set_ratio(ratio);
        self.side.set_ratio(ratio);
    }

    pub fn set_knee(&mut self, knee_width_db: f32) {
        if knee_width_db >= 0.0 {
            self.params.knee_width = knee_width_db;
        }
        self.mid.set_knee(knee_width_db);
        self.side.set_knee(knee_width_db);
    }

    pub fn set_makeup_gain(&mut self, gain_db: f32) {
        self.params.makeup_gain = gain_db;
        self.mid.set_makeup_gain(gain_db);
        self.side.set_makeup_gain(gain_db);
    }

    pub fn set_attack(&mut self, attack_ms: f32) {
        if attack_ms > 0.0 {
            self.params.attack = attack_ms;
        }
        self.mid.set_attack(attack_ms);
        self.side.set_attack(attack_ms);
    }

    pub fn set_release(&mut self, release_ms: f32) {
        if release_ms > 0.0 {
            self.params.release = release_ms;
        }
        self.mid.set_release(release_ms);
        self.side.set_release(release_ms);
    }

    pub fn set_sidechain_frequency(&mut self, frequency: f32, channel: MsChannel) {
        self.sidechain.set_frequency(0, frequency, channel);
    }

    pub fn set_sidechain_quality(&mut self, quality: f32, channel: MsChannel) {
        self.sidechain.set_quality(0, quality, channel);
    }

    pub fn set_sidechain_gain(&mut self, gain_db: f32, channel: MsChannel) {
        self.sidechain.set_gain(0, gain_db, channel);
    }

    pub fn set_sidechain_filter_type(&mut self, filter_type: FilterType, channel: MsChannel) {
        self.sidechain.set_filter_type(0, filter_type, channel);
    }

    pub fn params(&self) -> &CompressorParams {
        &self.params
    }

    pub fn sidechain_equalizer(&self) -> &MsEqualizer {
        &self.sidechain
    }

    /// Process one stereo frame through mid/side compression.
    pub fn process(&mut self, left: f32, right: f32, dual_mono: bool) -> (f32, f32) {
        let (sc_mid, sc_side) = self.sidechain.process_encoded(left, right);

        let abs_mid = sc_mid.abs();
        let abs_side = sc_side.abs();
        let link = abs_mid.max(abs_side);

        let (mid, side) = midside::encode(left, right);
        let (mid, side) = if dual_mono {
            (
                self.mid.compress(mid, abs_mid),
                self.side.compress(side, abs_side),
            )
        } else {
            (
                self.mid.compress(mid, link),
                self.side.compress(side, link),
            )
        };

        midside::decode(mid, side)
    }

    pub fn clear(&mut self) {
        self.mid.clear();
        self.side.clear();
        self.sidechain.clear();
    }
}
