// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph mask cache key.

use crate::fixed::Fixed;
use crate::font::{Font, FontId, GlyphId};
use crate::mask::Rasterizer;
use crate::quantize::SubpixelOffset;

/// Unique identifier for a cached glyph mask.
///
/// Two draws with equal keys produce identical masks and can share one cache
/// entry. The key holds every input that affects rasterization: which font,
/// which rasterizer configuration, the size, the glyph and the quantized
/// sub-pixel offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GlyphCacheKey {
    /// Identity of the font.
    pub font: FontId,
    /// Signature of the rasterizer configuration.
    pub rasterizer: u64,
    /// Font size in 1/64 pixels per em (exact match, no quantization).
    pub size: Fixed,
    /// Glyph index within the font.
    pub glyph: GlyphId,
    /// Quantized sub-pixel offset the mask was rasterized at.
    pub offset: SubpixelOffset,
}

impl GlyphCacheKey {
    /// Creates the key for rasterizing `glyph` of `font` with `rasterizer`.
    #[inline]
    pub fn new(
        font: &dyn Font,
        rasterizer: &dyn Rasterizer,
        size: Fixed,
        glyph: GlyphId,
        offset: SubpixelOffset,
    ) -> Self {
        Self {
            font: font.id(),
            rasterizer: rasterizer.cache_signature(),
            size,
            glyph,
            offset,
        }
    }
}
