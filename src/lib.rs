// SPDX-License-Identifier: LGPL-3.0-or-later

//! # strip-dsp
//!
//! Single-sample DSP units for building a channel strip inside a
//! real-time audio host:
//!
//! - **Filters**: parametric biquad (11 responses), filter-bank
//!   equalizer in mono, stereo and mid/side variants
//! - **Dynamics**: feed-forward compressor with asymmetric envelope
//!   follower, soft knee and internal sidechain equalizer
//! - **Waveshaping**: hard/quintic/arctangent clipper and a
//!   drive-controlled saturator
//! - **Utilities**: circular buffer, fractional delay line with
//!   feedback, dry/wet mix and ping-pong stereo mode
//! - **Mid/Side**: lossless encode/decode codec
//!
//! Every `process` call runs in bounded, allocation-free time. Parameter
//! setters are plain synchronous writes; the host must either mutate
//! parameters on the audio thread or publish them through its own
//! lock-free mechanism. Unsynchronized mutation from another thread
//! while `process` runs is not supported.
//!
//! Invalid numeric input never produces an error value on the audio
//! path: a non-positive or NaN frequency falls back to identity
//! (pass-through) coefficients, out-of-range setters are ignored, and
//! out-of-range band indices are no-ops.

pub mod channel;
pub mod consts;
pub mod error;
pub mod midside;
pub mod units;
pub mod waveshape;

pub mod dynamics;
pub mod filters;
pub mod util;
