// SPDX-License-Identifier: LGPL-3.0-or-later

//! Construction-time error type.
//!
//! Only operations that allocate (delay line creation) can fail.
//! Runtime numeric problems never surface as errors: the audio path
//! resolves them locally with identity coefficients or ignored setters.

use thiserror::Error;

/// Errors reported when constructing a processor.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DspError {
    /// Sample rate must be a positive, finite number of Hz.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    /// Maximum delay time must be a positive, finite number of seconds.
    #[error("invalid maximum delay time: {0} s")]
    InvalidMaxTime(f32),
}
