// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

use std::sync::Arc;

use etch::{
    quantize, Direction, Font, FixedPoint, GlyphId, HorizontalAlign, MaskCache, Quantization,
    Renderer, Rgba8, RgbaPixmap, VerticalAlign,
};
use etch_dev::{BlockFont, BoxRasterizer};

pub(crate) const BLACK: Rgba8 = Rgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};

pub(crate) const WHITE: [u8; 4] = [255, 255, 255, 255];

pub(crate) const DIRECTIONS: [Direction; 2] = [Direction::LeftToRight, Direction::RightToLeft];

pub(crate) const QUANTIZATIONS: [Quantization; 3] =
    [Quantization::Full, Quantization::Vertical, Quantization::None];

pub(crate) const ALIGNMENTS: [(VerticalAlign, HorizontalAlign); 4] = [
    (VerticalAlign::Baseline, HorizontalAlign::Left),
    (VerticalAlign::Center, HorizontalAlign::Center),
    (VerticalAlign::Top, HorizontalAlign::Right),
    (VerticalAlign::Bottom, HorizontalAlign::Left),
];

/// A renderer drawing black [`BlockFont`] text at `size` pixels with an exact
/// coverage rasterizer and no cache.
pub(crate) fn block_renderer(size: i32) -> Renderer {
    let mut renderer = Renderer::new(Arc::new(BoxRasterizer));
    renderer.set_font(Arc::new(BlockFont::new()));
    renderer.set_size_px(size);
    renderer.set_color(BLACK);
    renderer
}

/// Like [`block_renderer`], attached to a fresh cache of `capacity` bytes.
pub(crate) fn cached_renderer(size: i32, capacity: usize) -> (Renderer, Arc<MaskCache>) {
    let cache = Arc::new(MaskCache::new(capacity).unwrap());
    let mut renderer = block_renderer(size);
    renderer.set_cache_handler(Some(cache.handler()));
    (renderer, cache)
}

/// Resolves the glyphs of a single line of text.
pub(crate) fn glyphs_of(renderer: &Renderer, text: &str) -> Vec<GlyphId> {
    let font = renderer.font().unwrap();
    text.chars()
        .map(|ch| font.glyph_id(ch).unwrap().unwrap_or(GlyphId::NOTDEF))
        .collect()
}

/// A white surface with room for `text` around the anchor returned alongside.
pub(crate) fn canvas_for(renderer: &Renderer, text: &str) -> (RgbaPixmap, i32, i32) {
    let size = renderer.selection_rect(text).unwrap();
    let (w, h) = (size.width_ceil(), size.height_ceil());
    let canvas = RgbaPixmap::filled((w * 2 + 8) as u32, (h * 2 + 8) as u32, WHITE);
    (canvas, w + 4, h + 4)
}

/// Draws `text` on a fresh canvas, returning the pixels and the final dot.
pub(crate) fn render(renderer: &Renderer, text: &str) -> (RgbaPixmap, FixedPoint) {
    let (mut canvas, x, y) = canvas_for(renderer, text);
    let end = renderer.draw(&mut canvas, text, x, y).unwrap();
    (canvas, end)
}

/// Device pixels where the glyphs of `text`, drawn at `(x, y)`, have full coverage.
pub(crate) fn fully_covered(renderer: &Renderer, text: &str, x: i32, y: i32) -> Vec<(u32, u32)> {
    let mut pixels = Vec::new();
    renderer
        .traverse(text, FixedPoint::from_ints(x, y), |dot, glyph| {
            let mask = renderer.load_glyph_mask(glyph, dot)?;
            let (_, at) = quantize(dot, renderer.quantization());
            for my in 0..mask.height() {
                for mx in 0..mask.width() {
                    if mask.coverage(mx, my) == 255 {
                        let px = at.x.floor() + mask.left() + mx as i32;
                        let py = at.y.floor() + mask.top() + my as i32;
                        pixels.push((px as u32, py as u32));
                    }
                }
            }
            Ok(())
        })
        .unwrap();
    pixels
}
