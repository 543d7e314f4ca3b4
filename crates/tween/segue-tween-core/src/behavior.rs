//! Behavior flags modifying how a tween interpolates and repeats.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Independent modifiers applied across every binding of a tween.
    ///
    /// The bits are not mutually exclusive by type; combinations outside
    /// {none, rotation, ROUND, HEX_COLOR, rotation|ROUND} are caller error
    /// and left undefined.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Behavior: u8 {
        /// Swap direction every repeat cycle.
        const REFLECT = 1 << 0;
        /// Round interpolated values to the nearest integer.
        const ROUND = 1 << 1;
        /// Shortest-path angle interpolation, angles in degrees.
        const ROTATION_DEGREES = 1 << 2;
        /// Shortest-path angle interpolation, angles in radians.
        const ROTATION_RADIANS = 1 << 3;
        /// Interpolate packed 24-bit RGB colors channel-wise.
        const HEX_COLOR = 1 << 4;
    }
}

impl Behavior {
    /// True when either rotation unit is requested.
    #[inline]
    pub fn rotation(self) -> bool {
        self.intersects(Self::ROTATION_DEGREES | Self::ROTATION_RADIANS)
    }

    /// True when angles are expressed in radians.
    #[inline]
    pub fn radians(self) -> bool {
        self.contains(Self::ROTATION_RADIANS)
    }
}

/// Angle unit for [`crate::TweenHandle::rotation`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationUnit {
    #[default]
    Degrees,
    Radians,
}
