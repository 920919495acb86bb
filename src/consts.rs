// SPDX-License-Identifier: LGPL-3.0-or-later

//! Shared constants.

/// Tiny offset added before logarithms and envelope recurrences to avoid
/// `log(0)` and denormal drift. Far below the 24-bit noise floor.
pub const DC_OFFSET: f32 = 1.0e-25;

/// Maximum number of bands a filter-bank equalizer will hold.
///
/// Band storage is pre-allocated to this capacity so adding bands in
/// steady state never reallocates.
pub const MAX_EQ_BANDS: usize = 24;
