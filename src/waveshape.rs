// SPDX-License-Identifier: LGPL-3.0-or-later

//! Memoryless waveshapers: a clipper and a drive-controlled saturator.
//!
//! Both processors are stateless transfer functions, so the stereo
//! process methods simply apply the same curve to each channel and no
//! `clear()` is needed.
//!
//! # Examples
//!
//! ```
//! use strip_dsp::waveshape::{Clipper, ClipType};
//!
//! let mut clipper = Clipper::new();
//! clipper.set_clip_type(ClipType::Arctangent);
//! assert!(clipper.process(10.0) <= 1.0);
//! ```

use crate::units::db_to_gain;

/// Clipper transfer curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClipType {
    /// Clamp to [-1, 1].
    #[default]
    Hard,
    /// Fifth-order polynomial soft clip, hard limit beyond |x| = 1.25.
    Quintic,
    /// Scaled arctangent, asymptotic to +/-1.
    Arctangent,
}

/// Hard, quintic or arctangent clipper.
#[derive(Debug, Clone)]
pub struct Clipper {
    clip_type: ClipType,
}

impl Clipper {
    pub fn new() -> Self {
        Self {
            clip_type: ClipType::default(),
        }
    }

    pub fn set_clip_type(&mut self, clip_type: ClipType) -> &mut Self {
        self.clip_type = clip_type;
        self
    }

    pub fn clip_type(&self) -> ClipType {
        self.clip_type
    }

    /// Shape one sample.
    #[inline]
    pub fn process(&self, input: f32) -> f32 {
        match self.clip_type {
            ClipType::Hard => hard_clip(input),
            ClipType::Quintic => quintic_clip(input),
            ClipType::Arctangent => arctangent_clip(input),
        }
    }

    /// Shape one stereo frame with the same curve on both channels.
    #[inline]
    pub fn process_stereo(&self, left: f32, right: f32) -> (f32, f32) {
        (self.process(left), self.process(right))
    }

    /// Shape a block of samples in place.
    pub fn process_block(&self, buffer: &mut [f32]) {
        for sample in buffer {
            *sample = self.process(*sample);
        }
    }
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn hard_clip(input: f32) -> f32 {
    input.clamp(-1.0, 1.0)
}

#[inline]
fn quintic_clip(input: f32) -> f32 {
    if input.abs() < 1.25 {
        // x - (256/3125) x^5 reaches exactly +/-1 at |x| = 1.25
        input - (256.0 / 3125.0) * input.powi(5)
    } else {
        input.signum()
    }
}

#[inline]
fn arctangent_clip(input: f32) -> f32 {
    (2.0 / std::f32::consts::PI) * (0.96 * input).atan()
}

/// Saturator transfer curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SaturationCurve {
    /// `atan` of the driven input.
    #[default]
    Arctangent,
    /// `tanh` of the driven input, asymptotic to +/-1.
    Tangent,
}

/// Drive-controlled saturator.
///
/// `drive` is a pre-gain in dB applied inside the curve, so at 0 dB the
/// tangent curve is plain `tanh(x)` and turning the drive up pushes the
/// signal deeper into the knee without changing the output ceiling.
#[derive(Debug, Clone)]
pub struct Saturator {
    curve: SaturationCurve,
    drive: f32,
}

impl Saturator {
    pub fn new(curve: SaturationCurve) -> Self {
        Self { curve, drive: 0.0 }
    }

    /// Set the drive in dB. Non-finite values are ignored.
    pub fn set_drive(&mut self, drive_db: f32) -> &mut Self {
        if drive_db.is_finite() {
            self.drive = drive_db;
        } else {
            log::debug!("ignoring non-finite drive {drive_db}");
        }
        self
    }

    pub fn set_curve(&mut self, curve: SaturationCurve) -> &mut Self {
        self.curve = curve;
        self
    }

    pub fn drive(&self) -> f32 {
        self.drive
    }

    pub fn curve(&self) -> SaturationCurve {
        self.curve
    }

    /// Shape one sample.
    #[inline]
    pub fn process(&self, input: f32) -> f32 {
        let driven = input * db_to_gain(self.drive);
        match self.curve {
            SaturationCurve::Arctangent => driven.atan(),
            SaturationCurve::Tangent => driven.tanh(),
        }
    }

    /// Shape one stereo frame with the same curve and drive on both
    /// channels.
    #[inline]
    pub fn process_stereo(&self, left: f32, right: f32) -> (f32, f32) {
        (self.process(left), self.process(right))
    }

    /// Shape a block of samples in place.
    pub fn process_block(&self, buffer: &mut [f32]) {
        for sample in buffer {
            *sample = self.process(*sample);
        }
    }
}

impl Default for Saturator {
    fn default() -> Self {
        Self::new(SaturationCurve::default())
    }
}
