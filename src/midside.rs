// SPDX-License-Identifier: LGPL-3.0-or-later

//! Mid/Side encoding and decoding.
//!
//! Converts between Left/Right stereo and Mid/Side representation.
//! - Mid  = (L + R) * 0.5
//! - Side = (L - R) * 0.5
//! - Left  = M + S
//! - Right = M - S
//!
//! The pair is an exact algebraic inverse: `decode(encode(l, r))`
//! reproduces `(l, r)` up to floating-point rounding of the halving.
//! Both functions are stateless and used by every stereo-to-mid/side
//! wrapper in this crate.

/// Convert Left/Right to Mid/Side.
///
/// `mid = (left + right) * 0.5`, `side = (left - right) * 0.5`
#[inline]
pub fn encode(left: f32, right: f32) -> (f32, f32) {
    ((left + right) * 0.5, (left - right) * 0.5)
}

/// Convert Mid/Side back to Left/Right.
///
/// `left = mid + side`, `right = mid - side`
#[inline]
pub fn decode(mid: f32, side: f32) -> (f32, f32) {
    (mid + side, mid - side)
}
