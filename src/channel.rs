// SPDX-License-Identifier: LGPL-3.0-or-later

//! Channel selectors for stereo and mid/side composites.
//!
//! Composite processors expose the same setters as their mono
//! counterpart plus one of these selectors for asymmetric parameter
//! changes. `Both` is always the explicit composite of the two
//! single-channel operations; the arms never cascade into each other.

/// Target channel for a [`StereoEqualizer`](crate::filters::equalizer::StereoEqualizer),
/// [`StereoCompressor`](crate::dynamics::compressor::StereoCompressor) or
/// [`StereoDelay`](crate::util::delay::StereoDelay) setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StereoChannel {
    #[default]
    Both,
    Left,
    Right,
}

/// Target channel for a mid/side composite setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MsChannel {
    #[default]
    Both,
    Mid,
    Side,
}
