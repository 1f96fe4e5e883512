// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping continuous drawing positions onto cache-stable sub-pixel buckets.

use crate::fixed::{Fixed, FixedPoint};

/// Number of sub-pixel buckets per pixel on each unsnapped axis.
pub const SUBPIXEL_BUCKETS: u8 = 4;

/// Width of one bucket in 1/64 pixel units.
const BUCKET_STEP: i32 = 64 / SUBPIXEL_BUCKETS as i32;

/// How glyph positions are quantized before rasterization.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum Quantization {
    /// Both axes snap to whole pixels. Maximizes mask reuse.
    #[default]
    Full,
    /// The vertical axis snaps to whole pixels; the horizontal axis keeps
    /// sub-pixel precision in [`SUBPIXEL_BUCKETS`] steps.
    Vertical,
    /// Neither axis snaps to whole pixels; both use sub-pixel buckets.
    None,
}

/// The fractional part of a quantized glyph origin, in 1/64 pixel units.
///
/// Each component is a multiple of the bucket step (`0`, `16`, `32` or `48`).
/// This is both the cache-key bucket and the exact offset the rasterizer bakes
/// into the mask.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct SubpixelOffset {
    x: u8,
    y: u8,
}

impl SubpixelOffset {
    /// No offset: the origin sits on a pixel corner.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "fract() is always in 0..64"
    )]
    fn of(point: FixedPoint) -> Self {
        Self {
            x: point.x.fract() as u8,
            y: point.y.fract() as u8,
        }
    }

    /// Horizontal offset within the pixel.
    #[inline]
    pub fn x(self) -> Fixed {
        Fixed::from_bits(i32::from(self.x))
    }

    /// Vertical offset within the pixel.
    #[inline]
    pub fn y(self) -> Fixed {
        Fixed::from_bits(i32::from(self.y))
    }

    /// Horizontal bucket index, `0..SUBPIXEL_BUCKETS`.
    #[inline]
    pub fn x_bucket(self) -> u8 {
        self.x / BUCKET_STEP as u8
    }

    /// Vertical bucket index, `0..SUBPIXEL_BUCKETS`.
    #[inline]
    pub fn y_bucket(self) -> u8 {
        self.y / BUCKET_STEP as u8
    }
}

/// Snaps to the nearest whole pixel.
#[inline]
fn snap_to_pixel(v: Fixed) -> Fixed {
    Fixed::from_int(v.round())
}

/// Snaps to the nearest bucket, carrying into the whole-pixel part.
#[inline]
fn snap_to_bucket(v: Fixed) -> Fixed {
    Fixed::from_bits(v.to_bits().saturating_add(BUCKET_STEP / 2) & !(BUCKET_STEP - 1))
}

/// Quantizes a drawing position.
///
/// Returns the cache bucket and the position the glyph must actually be
/// rendered at. Glyphs must be placed at the returned position (not the raw
/// one) so their coverage matches whatever was cached for the bucket.
/// Quantizing an already quantized position is a no-op.
pub fn quantize(dot: FixedPoint, mode: Quantization) -> (SubpixelOffset, FixedPoint) {
    let render = match mode {
        Quantization::Full => FixedPoint::new(snap_to_pixel(dot.x), snap_to_pixel(dot.y)),
        Quantization::Vertical => FixedPoint::new(snap_to_bucket(dot.x), snap_to_pixel(dot.y)),
        Quantization::None => FixedPoint::new(snap_to_bucket(dot.x), snap_to_bucket(dot.y)),
    };
    (SubpixelOffset::of(render), render)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i32, y: i32) -> FixedPoint {
        FixedPoint::new(Fixed::from_bits(x), Fixed::from_bits(y))
    }

    #[test]
    fn quantize_full_is_position_independent() {
        let (bucket, render) = quantize(pt(64 * 3 + 40, 64 * 7 + 10), Quantization::Full);
        assert_eq!(bucket, SubpixelOffset::ZERO);
        assert_eq!(render, FixedPoint::from_ints(4, 7));
    }

    #[test]
    fn quantize_vertical_keeps_horizontal_buckets() {
        let (bucket, render) = quantize(pt(64 + 20, 64 * 2 + 33), Quantization::Vertical);
        assert_eq!(bucket.x(), Fixed::from_bits(16));
        assert_eq!(bucket.y(), Fixed::ZERO);
        assert_eq!(render, pt(64 + 16, 64 * 3));
    }

    #[test]
    fn quantize_buckets_carry_into_next_pixel() {
        // 0.9px rounds up to the next pixel rather than clamping to the last bucket.
        let (bucket, render) = quantize(pt(58, 58), Quantization::None);
        assert_eq!(bucket, SubpixelOffset::ZERO);
        assert_eq!(render, FixedPoint::from_ints(1, 1));

        let (bucket, _) = quantize(pt(40, 7), Quantization::None);
        assert_eq!(bucket.x_bucket(), 3);
        assert_eq!(bucket.y_bucket(), 0);
    }

    #[test]
    fn quantize_handles_negative_positions() {
        let (bucket, render) = quantize(pt(-20, -40), Quantization::None);
        // Ties round towards positive infinity on both axes.
        assert_eq!(render, pt(-16, -32));
        assert_eq!(bucket.x(), Fixed::from_bits(48));
        assert_eq!(bucket.y(), Fixed::from_bits(32));
    }

    #[test]
    fn quantize_is_idempotent() {
        for mode in [Quantization::Full, Quantization::Vertical, Quantization::None] {
            for raw in [-130, -1, 0, 7, 8, 63, 100, 1000] {
                let (bucket, render) = quantize(pt(raw, raw * 3), mode);
                assert_eq!(quantize(render, mode), (bucket, render), "{mode:?} at {raw}");
            }
        }
    }
}
