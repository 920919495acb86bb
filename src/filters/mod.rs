// SPDX-License-Identifier: LGPL-3.0-or-later

//! Biquad filters and filter-bank equalizers.
//!
//! [`coeffs`] computes transfer-function coefficients from analog
//! prototypes via the bilinear transform, [`biquad`] wraps them in a
//! stateful per-sample filter cell, and [`equalizer`] chains filter
//! cells into mono, stereo and mid/side band cascades.

pub mod biquad;
pub mod coeffs;
pub mod equalizer;
