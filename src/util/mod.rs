// SPDX-License-Identifier: LGPL-3.0-or-later

//! Buffering utilities.
//!
//! [`circular_buffer`] provides the fixed-capacity sample ring the
//! fractional [`delay`] line reads its taps from.

pub mod circular_buffer;
pub mod delay;
