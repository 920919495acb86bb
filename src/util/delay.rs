// SPDX-License-Identifier: LGPL-3.0-or-later

//! Fractional delay line with feedback and dry/wet mix.
//!
//! The delay time is split into a whole-sample offset and a fractional
//! remainder; the output is linearly interpolated between the two
//! nearest buffered samples, so sub-sample delay times are reproduced
//! without zipper artifacts. The feedback sample is written before the
//! output mix, the standard digital delay topology.
//!
//! The backing buffer is sized once from `max_time` at construction;
//! changing the delay *time* afterwards only moves the read offset and
//! never reallocates.
//!
//! # Examples
//!
//! ```
//! use strip_dsp::util::delay::DelayLine;
//!
//! let mut delay = DelayLine::new(48000.0, 2.0).unwrap();
//! delay.set_time(0.25);
//! delay.set_feedback(0.4);
//! delay.set_dry_wet(0.5);
//!
//! let out = delay.process(1.0);
//! assert!(out.is_finite());
//! ```

use crate::channel::StereoChannel;
use crate::error::DspError;
use crate::units::seconds_to_samples;

use super::circular_buffer::CircularBuffer;

/// Delay time decomposed for sub-sample interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayTime {
    /// Requested time in seconds.
    pub seconds: f32,
    /// Whole-sample part of the read offset. Always less than the
    /// buffer capacity.
    pub whole: usize,
    /// Fractional remainder in `[0, 1)`.
    pub fraction: f32,
}

/// Mono fractional delay line.
#[derive(Debug, Clone)]
pub struct DelayLine {
    sample_rate: f32,
    max_time: f32,
    time: DelayTime,
    feedback: f32,
    dry_wet: f32,
    buffer: CircularBuffer,
}

impl DelayLine {
    /// Create a delay line able to hold up to `max_time` seconds.
    ///
    /// The buffer capacity is `ceil(sample_rate * max_time)` samples,
    /// allocated once here. Defaults: delay time at half of `max_time`,
    /// feedback 0.5, dry/wet 0.5.
    pub fn new(sample_rate: f32, max_time: f32) -> Result<Self, DspError> {
        if !(sample_rate > 0.0) || !sample_rate.is_finite() {
            return Err(DspError::InvalidSampleRate(sample_rate));
        }
        if !(max_time > 0.0) || !max_time.is_finite() {
            return Err(DspError::InvalidMaxTime(max_time));
        }

        let capacity = seconds_to_samples(sample_rate, max_time).ceil() as usize;
        let mut delay = Self {
            sample_rate,
            max_time,
            time: DelayTime {
                seconds: 0.0,
                whole: 0,
                fraction: 0.0,
            },
            feedback: 0.5,
            dry_wet: 0.5,
            buffer: CircularBuffer::new(capacity),
        };
        delay.set_time(max_time * 0.5);
        Ok(delay)
    }

    /// Set the delay time in seconds.
    ///
    /// Accepted only for `0 < time < max_time`; anything else (including
    /// NaN) is ignored. The time is split into whole samples and a
    /// fractional remainder for interpolation.
    pub fn set_time(&mut self, time: f32) {
        if !(time > 0.0 && time < self.max_time) {
            log::debug!("ignoring out-of-range delay time {time}");
            return;
        }

        let time_in_samples = seconds_to_samples(self.sample_rate, time);
        let whole = time_in_samples.floor();
        self.time = DelayTime {
            seconds: time,
            whole: whole as usize,
            fraction: time_in_samples - whole,
        };
    }

    /// Set the feedback amount. Accepted only in `[0, 1]`.
    pub fn set_feedback(&mut self, feedback: f32) {
        if (0.0..=1.0).contains(&feedback) {
            self.feedback = feedback;
        } else {
            log::debug!("ignoring out-of-range feedback {feedback}");
        }
    }

    /// Set the dry/wet mix. Accepted only in `[0, 1]`; 0 is fully dry,
    /// 1 fully wet.
    pub fn set_dry_wet(&mut self, dry_wet: f32) {
        if (0.0..=1.0).contains(&dry_wet) {
            self.dry_wet = dry_wet;
        } else {
            log::debug!("ignoring out-of-range dry/wet {dry_wet}");
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn max_time(&self) -> f32 {
        self.max_time
    }

    pub fn time(&self) -> DelayTime {
        self.time
    }

    /// Buffer capacity in samples: `ceil(sample_rate * max_time)`.
    pub fn capacity(&self) -> usize {
        self.buffer.max_length()
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    pub fn dry_wet(&self) -> f32 {
        self.dry_wet
    }

    /// Process one sample: read the interpolated tap, write the
    /// feedback sample, blend dry and wet.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.read_tap();
        self.write(input + self.feedback * delayed);
        self.mix(input, delayed)
    }

    /// Zero the buffered samples; parameters are untouched.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Linearly interpolated read between the two taps either side of
    /// the fractional read position.
    #[inline]
    pub(crate) fn read_tap(&self) -> f32 {
        let len = self.buffer.max_length();
        let read1 = (self.buffer.head() + len - self.time.whole) % len;
        let read2 = (read1 + 1) % len;

        let delayed1 = self.buffer.get(read1);
        let delayed2 = self.buffer.get(read2);
        delayed1 + self.time.fraction * (delayed2 - delayed1)
    }

    #[inline]
    pub(crate) fn write(&mut self, sample: f32) {
        self.buffer.push(sample);
    }

    #[inline]
    pub(crate) fn mix(&self, input: f32, delayed: f32) -> f32 {
        (1.0 - self.dry_wet) * input + self.dry_wet * delayed
    }
}

/// Stereo delay with an optional ping-pong mode.
///
/// In ping-pong mode each channel's interpolated tap feeds the *other*
/// channel's feedback write, so echoes alternate between the sides.
#[derive(Debug, Clone)]
pub struct StereoDelay {
    left: DelayLine,
    right: DelayLine,
    ping_pong: bool,
}

impl StereoDelay {
    pub fn new(sample_rate: f32, max_time: f32) -> Result<Self, DspError> {
        Ok(Self {
            left: DelayLine::new(sample_rate, max_time)?,
            right: DelayLine::new(sample_rate, max_time)?,
            ping_pong: false,
        })
    }

    pub fn set_time(&mut self, time: f32, channel: StereoChannel) {
        match channel {
            StereoChannel::Both => {
                self.left.set_time(time);
                self.right.set_time(time);
            }
            StereoChannel::Left => self.left.set_time(time),
            StereoChannel::Right => self.right.set_time(time),
        }
    }

    pub fn set_feedback(&mut self, feedback: f32, channel: StereoChannel) {
        match channel {
            StereoChannel::Both => {
                self.left.set_feedback(feedback);
                self.right.set_feedback(feedback);
            }
            StereoChannel::Left => self.left.set_feedback(feedback),
            StereoChannel::Right => self.right.set_feedback(feedback),
        }
    }

    pub fn set_dry_wet(&mut self, dry_wet: f32, channel: StereoChannel) {
        match channel {
            StereoChannel::Both => {
                self.left.set_dry_wet(dry_wet);
                self.right.set_dry_wet(dry_wet);
            }
            StereoChannel::Left => self.left.set_dry_wet(dry_wet),
            StereoChannel::Right => self.right.set_dry_wet(dry_wet),
        }
    }

    /// Enable or disable cross-feeding the feedback paths.
    pub fn set_ping_pong(&mut self, ping_pong: bool) {
        self.ping_pong = ping_pong;
    }

    pub fn ping_pong(&self) -> bool {
        self.ping_pong
    }

    pub fn left(&self) -> &DelayLine {
        &self.left
    }

    pub fn right(&self) -> &DelayLine {
        &self.right
    }

    /// Process one stereo frame.
    pub fn process(&mut self, left: f32, right: f32) -> (f32, f32) {
        let tap_left = self.left.read_tap();
        let tap_right = self.right.read_tap();

        if self.ping_pong {
            self.left.write(left + self.left.feedback * tap_right);
            self.right.write(right + self.right.feedback * tap_left);
        } else {
            self.left.write(left + self.left.feedback * tap_left);
            self.right.write(right + self.right.feedback * tap_right);
        }

        (
            self.left.mix(left, tap_left),
            self.right.mix(right, tap_right),
        )
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}
