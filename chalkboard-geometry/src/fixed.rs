//               Copyright John Nunley, 2022.
// Distributed under the Boost Software License, Version 1.0.
//       (See accompanying file LICENSE or copy at
//         https://www.boost.org/LICENSE_1_0.txt)

use super::{point2, Box2D, PixelBox};
use core::fmt;

/// Number of fractional bits in a [`Fixed`].
pub const FIXED_SHIFT: u32 = 8;

const FIXED_ONE: i32 = 1 << FIXED_SHIFT;

/// A device-space coordinate in 24.8 fixed point.
///
/// Every conversion back to integer pixels clamps the raw value first, so that rounding a value
/// near `Fixed::MAX` never overflows. The clamped values land on the largest pixel coordinate
/// the format can express.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Fixed {
    bits: i32,
}

impl Fixed {
    /// The smallest representable coordinate.
    pub const MIN: Fixed = Fixed { bits: i32::MIN };
    /// The largest representable coordinate.
    pub const MAX: Fixed = Fixed { bits: i32::MAX };
    /// Zero.
    pub const ZERO: Fixed = Fixed { bits: 0 };

    /// Convert an integer pixel coordinate, saturating at the representable range.
    #[must_use]
    #[inline]
    pub fn from_int(value: i32) -> Fixed {
        let value = num_traits::clamp(value, i32::MIN >> FIXED_SHIFT, i32::MAX >> FIXED_SHIFT);
        Fixed {
            bits: value << FIXED_SHIFT,
        }
    }

    /// Convert a floating point coordinate, saturating at the representable range. `NaN` maps to
    /// zero.
    #[must_use]
    #[inline]
    pub fn from_f32(value: f32) -> Fixed {
        // float to int casts saturate
        #[allow(clippy::cast_possible_truncation)]
        let bits = (value * FIXED_ONE as f32).round() as i32;
        Fixed { bits }
    }

    /// Convert to a floating point coordinate.
    #[must_use]
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f32(self) -> f32 {
        self.bits as f32 / FIXED_ONE as f32
    }

    /// The largest pixel coordinate not greater than this value.
    #[must_use]
    #[inline]
    pub fn floor(self) -> i32 {
        self.bits >> FIXED_SHIFT
    }

    /// The smallest pixel coordinate not less than this value.
    #[must_use]
    #[inline]
    pub fn ceil(self) -> i32 {
        let bits = self.bits.min(i32::MAX - (FIXED_ONE - 1));
        (bits + (FIXED_ONE - 1)) >> FIXED_SHIFT
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({})", self.to_f32())
    }
}

impl From<i32> for Fixed {
    #[inline]
    fn from(value: i32) -> Fixed {
        Fixed::from_int(value)
    }
}

/// The smallest pixel box that covers a fixed-point box.
///
/// The minimum corner is floored and the maximum corner is ceiled, both with clamping.
#[must_use]
pub fn covering_pixels(fixed: &Box2D<Fixed>) -> PixelBox {
    PixelBox::new(
        point2(fixed.min.x.floor(), fixed.min.y.floor()),
        point2(fixed.max.x.ceil(), fixed.max.y.ceil()),
    )
}
