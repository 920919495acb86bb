// SPDX-License-Identifier: LGPL-3.0-or-later

//! Dynamics processors.
//!
//! [`envelope`] provides the single-pole level smoother and
//! [`compressor`] the feed-forward compressor built on it, in mono,
//! stereo and mid/side variants.

pub mod compressor;
pub mod envelope;
