// SPDX-License-Identifier: LGPL-3.0-or-later

//! Filter-bank equalizer.
//!
//! An ordered list of [`Biquad`] bands applied in series. Stereo and
//! mid/side variants own two mono equalizers and keep them structurally
//! identical: adding or removing a band is always a paired operation.
//!
//! Band indices are positional. Removing band `i` compacts the list, so
//! every band previously at an index greater than `i` moves down by one;
//! callers must not cache indices across removals.
//!
//! # Examples
//!
//! ```
//! use strip_dsp::filters::coeffs::FilterType;
//! use strip_dsp::filters::equalizer::Equalizer;
//!
//! let mut eq = Equalizer::new(48000.0);
//! eq.add_band(100.0, 0.707, 3.0, FilterType::LowShelf);
//! eq.add_band(3000.0, 1.0, -2.0, FilterType::Peak);
//!
//! let out = eq.process(0.5);
//! assert!(out.is_finite());
//! ```

use crate::channel::{MsChannel, StereoChannel};
use crate::consts::MAX_EQ_BANDS;
use crate::midside;

use super::biquad::Biquad;
use super::coeffs::FilterType;

/// Series cascade of biquad bands on one channel.
#[derive(Debug, Clone)]
pub struct Equalizer {
    bands: Vec<Biquad>,
    sample_rate: f32,
}

impl Equalizer {
    /// Create an empty equalizer.
    ///
    /// Band storage is pre-allocated to [`MAX_EQ_BANDS`] so steady-state
    /// adds never reallocate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            bands: Vec::with_capacity(MAX_EQ_BANDS),
            sample_rate,
        }
    }

    /// Append a band to the end of the cascade.
    ///
    /// Ignored (with a debug log) once [`MAX_EQ_BANDS`] is reached.
    pub fn add_band(&mut self, frequency: f32, quality: f32, gain: f32, filter_type: FilterType) {
        if self.bands.len() >= MAX_EQ_BANDS {
            log::debug!("band limit {MAX_EQ_BANDS} reached, add_band ignored");
            return;
        }

        let mut band = Biquad::new(self.sample_rate, filter_type);
        band.set_frequency(frequency)
            .set_quality(quality)
            .set_gain(gain);
        self.bands.push(band);
    }

    /// Remove the band at `index`, shifting later bands down by one.
    /// Out-of-range indices are a no-op.
    pub fn remove_band(&mut self, index: usize) {
        if index < self.bands.len() {
            self.bands.remove(index);
        }
    }

    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn band(&self, index: usize) -> Option<&Biquad> {
        self.bands.get(index)
    }

    /// Set the frequency of the band at `index`; no-op out of range.
    pub fn set_frequency(&mut self, index: usize, frequency: f32) {
        if let Some(band) = self.bands.get_mut(index) {
            band.set_frequency(frequency);
        }
    }

    /// Set the quality of the band at `index`; no-op out of range.
    pub fn set_quality(&mut self, index: usize, quality: f32) {
        if let Some(band) = self.bands.get_mut(index) {
            band.set_quality(quality);
        }
    }

    /// Set the gain of the band at `index`; no-op out of range.
    pub fn set_gain(&mut self, index: usize, gain: f32) {
        if let Some(band) = self.bands.get_mut(index) {
            band.set_gain(gain);
        }
    }

    /// Set the response type of the band at `index`; no-op out of range.
    pub fn set_filter_type(&mut self, index: usize, filter_type: FilterType) {
        if let Some(band) = self.bands.get_mut(index) {
            band.set_filter_type(filter_type);
        }
    }

    /// Fold one sample through every band in insertion order.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut sample = input;
        for band in self.bands.iter_mut() {
            sample = band.process(sample);
        }
        sample
    }

    /// Process a buffer in-place.
    pub fn process_block(&mut self, buf: &mut [f32]) {
        for sample in buf.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear every band's feedback registers.
    pub fn clear(&mut self) {
        for band in self.bands.iter_mut() {
            band.clear();
        }
    }
}

/// Two mono equalizers with identical band topology on left and right.
#[derive(Debug, Clone)]
pub struct StereoEqualizer {
    left: Equalizer,
    right: Equalizer,
}

impl StereoEqualizer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            left: Equalizer::new(sample_rate),
            right: Equalizer::new(sample_rate),
        }
    }

    /// Append the same band to both channels.
    pub fn add_band(&mut self, frequency: f32, quality: f32, gain: f32, filter_type: FilterType) {
        self.left.add_band(frequency, quality, gain, filter_type);
        self.right.add_band(frequency, quality, gain, filter_type);
    }

    /// Remove the band at `index` from both channels.
    pub fn remove_band(&mut self, index: usize) {
        self.left.remove_band(index);
        self.right.remove_band(index);
    }

    pub fn num_bands(&self) -> usize {
        self.left.num_bands()
    }

    pub fn left(&self) -> &Equalizer {
        &self.left
    }

    pub fn right(&self) -> &Equalizer {
        &self.right
    }

    pub fn set_frequency(&mut self, index: usize, frequency: f32, channel: StereoChannel) {
        match channel {
            StereoChannel::Both => {
                self.left.set_frequency(index, frequency);
                self.right.set_frequency(index, frequency);
            }
            StereoChannel::Left => self.left.set_frequency(index, frequency),
            StereoChannel::Right => self.right.set_frequency(index, frequency),
        }
    }

    pub fn set_quality(&mut self, index: usize, quality: f32, channel: StereoChannel) {
        match channel {
            StereoChannel::Both => {
                self.left.set_quality(index, quality);
                self.right.set_quality(index, quality);
            }
            StereoChannel::Left => self.left.set_quality(index, quality),
            StereoChannel::Right => self.right.set_quality(index, quality),
        }
    }

    pub fn set_gain(&mut self, index: usize, gain: f32, channel: StereoChannel) {
        match channel {
            StereoChannel::Both => {
                self.left.set_gain(index, gain);
                self.right.set_gain(index, gain);
            }
            StereoChannel::Left => self.left.set_gain(index, gain),
            StereoChannel::Right => self.right.set_gain(index, gain),
        }
    }

    pub fn set_filter_type(&mut self, index: usize, filter_type: FilterType, channel: StereoChannel) {
        match channel {
            StereoChannel::Both => {
                self.left.set_filter_type(index, filter_type);
                self.right.set_filter_type(index, filter_type);
            }
            StereoChannel::Left => self.left.set_filter_type(index, filter_type),
            StereoChannel::Right => self.right.set_filter_type(index, filter_type),
        }
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
}

/// Two mono equalizers applied to the mid and side signals.
///
/// Input is encoded to mid/side, filtered, and decoded back to
/// left/right by value; the input frame is never mutated in place
/// before the reverse transform.
#[derive(Debug, Clone)]
pub struct MsEqualizer {
    mid: Equalizer,
    side: Equalizer,
}

impl MsEqualizer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            mid: Equalizer::new(sample_rate),
            side: Equalizer::new(sample_rate),
        }
    }

    /// Append the same band to both the mid and side equalizers.
    pub fn add_band(&mut self, frequency: f32, quality: f32, gain: f32, filter_type: FilterType) {
        self.mid.add_band(frequency, quality, gain, filter_type);
        self.side.add_band(frequency, quality, gain, filter_type);
    }

    /// Remove the band at `index` from both equalizers.
    pub fn remove_band(&mut self, index: usize) {
        self.mid.remove_band(index);
        self.side.remove_band(index);
    }

    pub fn num_bands(&self) -> usize {
        self.mid.num_bands()
    }

    pub fn mid(&self) -> &Equalizer {
        &self.mid
    }

    pub fn side(&self) -> &Equalizer {
        &self.side
    }

    pub fn set_frequency(&mut self, index: usize, frequency: f32, channel: MsChannel) {
        match channel {
            MsChannel::Both => {
                self.mid.set_frequency(index, frequency);
                self.side.set_frequency(index, frequency);
            }
            MsChannel::Mid => self.mid.set_frequency(index, frequency),
            MsChannel::Side => self.side.set_frequency(index, frequency),
        }
    }

    pub fn set_quality(&mut self, index: usize, quality: f32, channel: MsChannel) {
        match channel {
            MsChannel::Both => {
                self.mid.set_quality(index, quality);
                self.side.set_quality(index, quality);
            }
            MsChannel::Mid => self.mid.set_quality(index, quality),
            MsChannel::Side => self.side.set_quality(index, quality),
        }
    }

    pub fn set_gain(&mut self, index: usize, gain: f32, channel: MsChannel) {
        match channel {
            MsChannel::Both => {
                self.mid.set_gain(index, gain);
                self.side.set_gain(index, gain);
            }
            MsChannel::Mid => self.mid.set_gain(index, gain),
            MsChannel::Side => self.side.set_gain(index, gain),
        }
    }

    pub fn set_filter_type(&mut self, index: usize, filter_type: FilterType, channel: MsChannel) {
        match channel {
            MsChannel::Both => {
                self.mid.set_filter_type(index, filter_type);
                self.side.set_filter_type(index, filter_type);
            }
            MsChannel::Mid => self.mid.set_filter_type(index, filter_type),
            MsChannel::Side => self.side.set_filter_type(index, filter_type),
        }
    }

    /// Encode to mid/side, filter each signal, decode back to L/R.
    #[inline]
    pub fn process(&mut self, left: f32, right: f32) -> (f32, f32) {
        let (mid, side) = self.process_encoded(left, right);
        midside::decode(mid, side)
    }

    /// Encode to mid/side and filter, returning the still-encoded pair.
    ///
    /// Used by the compressor sidechain, which links on the filtered
    /// mid/side levels before compressing.
    #[inline]
    pub fn process_encoded(&mut self, left: f32, right: f32) -> (f32, f32) {
        let (mid, side) = midside::encode(left, right);
        (self.mid.process(mid), self.side.process(side))
    }

    pub fn clear(&mut self) {
        self.mid.clear();
        self.side.clear();
    }
}
