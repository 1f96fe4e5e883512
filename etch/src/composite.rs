// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blending glyph coverage onto surfaces.
//!
//! All arithmetic is done on 8-bit integers. For a mask value `m` and a draw
//! color with alpha `ca`, the effective coverage is `a = m * ca / 255`. Every
//! product below is rounded to the nearest integer and every sum saturates.
//!
//! | Mode | Color channel `d` | Alpha `da` |
//! |---|---|---|
//! | Over | `c*a + d*(1-a)` | `a + da*(1-a)` |
//! | Replace | `c*a` | `a` |
//! | Cut | unchanged | `0` where `a > 0` |
//! | Subtract | `d - c*a` | unchanged |
//! | Multiply | `d*(1-a) + (c*d)*a` | unchanged |
//! | Add | `d + c*a` | unchanged |
//! | `FiftyFifty` | `d*(1-h) + c*h` with `h = a/2` | unchanged |

use peniko::color::Rgba8;

use crate::fixed::PixelRect;
use crate::mask::GlyphMask;

/// Per-pixel rule for combining a glyph with the surface below it.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum MixMode {
    /// Source-over blending.
    #[default]
    Over,
    /// Overwrites color and alpha inside the glyph's mask rectangle.
    Replace,
    /// Erases alpha wherever the glyph has any coverage.
    Cut,
    /// Subtracts the color from the surface.
    Subtract,
    /// Multiplies the surface by the color.
    Multiply,
    /// Adds the color to the surface.
    Add,
    /// Mixes at most half of the color into the surface.
    FiftyFifty,
}

/// `x * y / 255`, rounded to nearest.
#[allow(
    clippy::cast_possible_truncation,
    reason = "the quotient of two bytes by 255 fits in a byte"
)]
#[inline]
pub fn mul255(x: u8, y: u8) -> u8 {
    let p = u32::from(x) * u32::from(y) + 128;
    ((p + (p >> 8)) >> 8) as u8
}

#[inline]
fn mix_channel(d: u8, c: u8, a: u8, mode: MixMode) -> u8 {
    match mode {
        MixMode::Over => mul255(c, a).saturating_add(mul255(d, 255 - a)),
        MixMode::Replace => mul255(c, a),
        MixMode::Cut => d,
        MixMode::Subtract => d.saturating_sub(mul255(c, a)),
        MixMode::Multiply => mul255(d, 255 - a).saturating_add(mul255(mul255(c, d), a)),
        MixMode::Add => d.saturating_add(mul255(c, a)),
        MixMode::FiftyFifty => {
            let h = a / 2;
            mul255(d, 255 - h).saturating_add(mul255(c, h))
        }
    }
}

#[inline]
fn mix_alpha(da: u8, a: u8, mode: MixMode) -> u8 {
    match mode {
        MixMode::Over => a.saturating_add(mul255(da, 255 - a)),
        MixMode::Replace => a,
        MixMode::Cut if a > 0 => 0,
        _ => da,
    }
}

/// Blends one RGBA pixel.
#[inline]
pub fn blend_rgba(dst: [u8; 4], color: Rgba8, coverage: u8, mode: MixMode) -> [u8; 4] {
    let a = mul255(coverage, color.a);
    let [r, g, b, da] = dst;
    [
        mix_channel(r, color.r, a, mode),
        mix_channel(g, color.g, a, mode),
        mix_channel(b, color.b, a, mode),
        mix_alpha(da, a, mode),
    ]
}

/// Blends one pixel of an alpha-only surface.
///
/// The single channel is treated as alpha, drawn with a full-intensity color.
#[inline]
pub fn blend_alpha(dst: u8, color_alpha: u8, coverage: u8, mode: MixMode) -> u8 {
    let a = mul255(coverage, color_alpha);
    if mode == MixMode::Cut {
        mix_alpha(dst, a, mode)
    } else {
        mix_channel(dst, 255, a, mode)
    }
}

/// A pixel buffer glyphs can be composited onto.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Blends a horizontal run of coverage values whose first pixel is at
    /// `(x, y)`.
    ///
    /// Callers guarantee the whole run lies inside the surface.
    fn blend_row(&mut self, x: u32, y: u32, coverage: &[u8], color: Rgba8, mode: MixMode);

    /// The full extent of the surface.
    #[allow(
        clippy::cast_possible_wrap,
        reason = "surface dimensions fit in i32"
    )]
    fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width() as i32, self.height() as i32)
    }
}

/// Composites `mask` onto `surface` with its origin at the whole pixel `(x, y)`.
///
/// Only pixels inside both the mask rectangle and the surface are visited.
#[allow(
    clippy::cast_sign_loss,
    reason = "clipped coordinates are non-negative"
)]
pub fn composite<S: Surface + ?Sized>(
    surface: &mut S,
    x: i32,
    y: i32,
    mask: &GlyphMask,
    color: Rgba8,
    mode: MixMode,
) {
    if mask.is_empty() {
        return;
    }
    let area = mask.bounds_at(x, y);
    let clip = area.intersect(&surface.bounds());
    if clip.is_empty() {
        return;
    }
    let stride = mask.width() as usize;
    let col0 = (clip.x0 - area.x0) as usize;
    let cols = clip.width() as usize;
    for row_y in clip.y0..clip.y1 {
        let row = (row_y - area.y0) as usize * stride;
        let coverage = &mask.data()[row + col0..row + col0 + cols];
        surface.blend_row(clip.x0 as u32, row_y as u32, coverage, color, mode);
    }
}
