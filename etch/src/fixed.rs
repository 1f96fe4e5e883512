// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 26.6 fixed-point scalars, points and rectangles.
//!
//! Every position, size and advance in the drawing pipeline is expressed in
//! 1/64ths of a pixel. Integer arithmetic keeps measurement and drawing exactly
//! reproducible across code paths. Arithmetic saturates at [`Fixed::MIN`] and
//! [`Fixed::MAX`], so far-away anchors clamp instead of wrapping around.

use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A 26.6 fixed-point value. The low 6 bits hold 1/64ths of a pixel.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    /// Zero.
    pub const ZERO: Self = Self(0);
    /// One whole pixel.
    pub const ONE: Self = Self(64);
    /// The smallest representable value.
    pub const MIN: Self = Self(i32::MIN);
    /// The largest representable value.
    pub const MAX: Self = Self(i32::MAX);

    /// Creates a value from raw 1/64 units.
    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the raw 1/64 units.
    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Creates a value from a whole number of pixels, saturating outside
    /// roughly ±33 million pixels.
    #[inline]
    pub const fn from_int(pixels: i32) -> Self {
        Self(pixels.saturating_mul(64))
    }

    /// Creates a value from a float, rounding to the nearest 1/64.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "pixel coordinates are far inside the i32 range"
    )]
    #[inline]
    pub fn from_f32(pixels: f32) -> Self {
        Self((pixels * 64.0).round() as i32)
    }

    /// Converts to a float number of pixels.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 64.0
    }

    /// Largest whole pixel not greater than the value.
    #[inline]
    pub const fn floor(self) -> i32 {
        self.0 >> 6
    }

    /// Smallest whole pixel not less than the value.
    #[inline]
    pub const fn ceil(self) -> i32 {
        (self.0 >> 6) + (self.0 & 63 != 0) as i32
    }

    /// Nearest whole pixel, rounding halves up.
    #[inline]
    pub const fn round(self) -> i32 {
        self.0.saturating_add(32) >> 6
    }

    /// The fractional part, in 1/64 units (always `0..64`).
    #[inline]
    pub const fn fract(self) -> i32 {
        self.0 & 63
    }

    /// Half of the value, truncating towards zero.
    #[inline]
    pub const fn half(self) -> Self {
        Self(self.0 / 2)
    }

    /// Scales the value by a float factor, rounding to the nearest 1/64.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "scaled line metrics stay far inside the i32 range"
    )]
    #[inline]
    pub fn scale(self, factor: f32) -> Self {
        Self((self.0 as f32 * factor).round() as i32)
    }

    /// Computes `self * num / den` with 64-bit intermediates, rounding to nearest.
    ///
    /// Used to scale font units into pixel space. `den` must be positive.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "the result of scaling font units is bounded by the font size"
    )]
    pub fn mul_div(self, num: i32, den: i32) -> Self {
        debug_assert!(den > 0, "fixed-point divisor must be positive");
        let product = i64::from(self.0) * i64::from(num);
        let den = i64::from(den);
        let half = den / 2;
        let rounded = if product >= 0 {
            (product + half) / den
        } else {
            (product - half) / den
        };
        Self(rounded.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }

    /// Multiplies by a whole number.
    #[inline]
    pub const fn mul_int(self, n: i32) -> Self {
        Self(self.0.saturating_mul(n))
    }

    /// The larger of two values.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }

    /// The absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }
}

impl Add for Fixed {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fixed {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fixed {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}

/// A fixed-point position, such as the drawing dot.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    /// Horizontal coordinate, growing rightwards.
    pub x: Fixed,
    /// Vertical coordinate, growing downwards.
    pub y: Fixed,
}

impl FixedPoint {
    /// Creates a point from fixed-point coordinates.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Creates a point from whole pixel coordinates.
    #[inline]
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self {
            x: Fixed::from_int(x),
            y: Fixed::from_int(y),
        }
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The size of a block of text, as reported by measurement.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct RectSize {
    /// Width of the widest line.
    pub width: Fixed,
    /// Height from the top of the first line to the bottom of the last one.
    pub height: Fixed,
}

impl RectSize {
    /// Width rounded up to whole pixels.
    #[inline]
    pub const fn width_ceil(self) -> i32 {
        self.width.ceil()
    }

    /// Height rounded up to whole pixels.
    #[inline]
    pub const fn height_ceil(self) -> i32 {
        self.height.ceil()
    }

    /// The pixel rectangle covering this size, anchored at the origin.
    pub const fn pixel_rect(self) -> PixelRect {
        PixelRect::new(0, 0, self.width_ceil(), self.height_ceil())
    }
}

/// An integer pixel rectangle. `x1` and `y1` are exclusive.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge.
    pub x0: i32,
    /// Top edge.
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl PixelRect {
    /// Creates a rectangle from its edges.
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width in pixels; zero for inverted rectangles.
    #[inline]
    pub const fn width(&self) -> i32 {
        if self.x1 > self.x0 {
            self.x1 - self.x0
        } else {
            0
        }
    }

    /// Height in pixels; zero for inverted rectangles.
    #[inline]
    pub const fn height(&self) -> i32 {
        if self.y1 > self.y0 {
            self.y1 - self.y0
        } else {
            0
        }
    }

    /// Whether the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// The overlapping area of two rectangles.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    /// Whether `other` lies entirely within `self`. Empty rectangles are
    /// contained everywhere.
    pub fn contains(&self, other: &Self) -> bool {
        other.is_empty()
            || (self.x0 <= other.x0
                && self.y0 <= other.y0
                && other.x1 <= self.x1
                && other.y1 <= self.y1)
    }
}
