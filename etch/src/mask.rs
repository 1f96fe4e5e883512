// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coverage masks and the rasterizer seam that produces them.

use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::error::RasterError;
use crate::fixed::{Fixed, PixelRect};
use crate::font::{Font, GlyphId};
use crate::quantize::SubpixelOffset;

/// Bytes charged to the cache budget for every mask on top of its pixel area.
///
/// Models allocation and bookkeeping cost, so even empty masks are not free.
pub const MASK_OVERHEAD_BYTES: usize = 56;

/// An immutable grid of 8-bit coverage values for one glyph.
///
/// The mask is anchored by `left`/`top`, the offset of its top-left pixel from
/// the whole-pixel part of the glyph's drawing origin. Cloning is cheap; the
/// pixel data is shared.
#[derive(Clone, PartialEq, Eq)]
pub struct GlyphMask {
    left: i32,
    top: i32,
    width: u32,
    height: u32,
    data: Arc<[u8]>,
}

impl GlyphMask {
    /// Creates a mask from row-major coverage data.
    ///
    /// # Panics
    ///
    /// Panics if `data` does not hold exactly `width * height` values.
    pub fn new(left: i32, top: i32, width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize,
            "mask data does not match its dimensions"
        );
        Self {
            left,
            top,
            width,
            height,
            data: data.into(),
        }
    }

    /// A zero-sized mask, used for whitespace and other invisible glyphs.
    pub fn empty() -> Self {
        Self {
            left: 0,
            top: 0,
            width: 0,
            height: 0,
            data: Arc::from([]),
        }
    }

    /// Whether the mask covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Horizontal offset of the first column from the drawing origin.
    #[inline]
    pub fn left(&self) -> i32 {
        self.left
    }

    /// Vertical offset of the first row from the drawing origin.
    #[inline]
    pub fn top(&self) -> i32 {
        self.top
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major coverage values.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Coverage at a mask-local pixel, or 0 outside the mask.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// The pixels this mask covers when its origin sits at `(x, y)`.
    #[allow(
        clippy::cast_possible_wrap,
        reason = "mask dimensions are bounded by glyph sizes"
    )]
    pub fn bounds_at(&self, x: i32, y: i32) -> PixelRect {
        let x0 = x + self.left;
        let y0 = y + self.top;
        PixelRect::new(x0, y0, x0 + self.width as i32, y0 + self.height as i32)
    }

    /// Bytes this mask costs against a cache budget.
    #[inline]
    pub fn byte_size(&self) -> usize {
        mask_byte_size(self.width, self.height)
    }
}

/// Bytes charged to a cache budget for a mask of the given dimensions.
#[inline]
pub fn mask_byte_size(width: u32, height: u32) -> usize {
    width as usize * height as usize + MASK_OVERHEAD_BYTES
}

impl Default for GlyphMask {
    fn default() -> Self {
        Self::empty()
    }
}

impl Debug for GlyphMask {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphMask")
            .field("left", &self.left)
            .field("top", &self.top)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Converts glyph outlines into coverage masks.
///
/// Rasterizers are pluggable and may be swapped at runtime. They must be
/// deterministic: identical inputs must yield identical masks, since cached
/// and freshly rasterized masks are required to composite identically.
pub trait Rasterizer: Send + Sync + Debug {
    /// Rasterizes `glyph` at `size` with its origin displaced by `offset`
    /// within the first pixel.
    ///
    /// The returned mask's `left`/`top` are relative to the whole-pixel
    /// origin; the offset is already baked into the coverage. Invisible
    /// glyphs return [`GlyphMask::empty`].
    fn rasterize(
        &self,
        font: &dyn Font,
        size: Fixed,
        glyph: GlyphId,
        offset: SubpixelOffset,
    ) -> Result<GlyphMask, RasterError>;

    /// Identifies the rasterizer's configuration.
    ///
    /// Becomes part of every cache key, so two rasterizers (or two settings of
    /// one rasterizer) that produce different masks must return different
    /// signatures.
    fn cache_signature(&self) -> u64;
}
