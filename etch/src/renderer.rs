// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing pipeline: traversal, mask loading and compositing.

use std::sync::Arc;

use peniko::color::{AlphaColor, Rgba8, Srgb};

use crate::cache::{CacheHandler, GlyphCacheKey, MaskSource};
use crate::composite::{composite, MixMode, Surface};
use crate::error::Error;
use crate::fixed::{Fixed, FixedPoint, RectSize};
use crate::font::{Font, GlyphId};
use crate::mask::{GlyphMask, Rasterizer};
use crate::quantize::{quantize, Quantization};
use crate::scratch::ScratchPool;
use crate::sizer::{DefaultSizer, Sizer};
use crate::traverse::{Direction, GlyphRun, HorizontalAlign, Traverser, VerticalAlign};

/// Opaque white, the default draw color.
const WHITE: Rgba8 = Rgba8 {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

/// How the height of a line is chosen.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum LineHeight {
    /// Use the sizer's line height for the current font and size.
    #[default]
    Auto,
    /// Use a fixed height.
    Fixed(Fixed),
}

/// Caller-owned drawing configuration.
///
/// The pipeline reads it on every call and never modifies it.
#[derive(Clone, Debug)]
pub struct DrawState {
    /// Font to draw with. Drawing and measuring fail with [`Error::NoFont`]
    /// while unset.
    pub font: Option<Arc<dyn Font>>,
    /// Font size in pixels per em.
    pub size: Fixed,
    /// Draw color.
    pub color: Rgba8,
    /// How glyphs are blended onto the target.
    pub mix_mode: MixMode,
    /// How glyph positions are quantized.
    pub quantization: Quantization,
    /// Horizontal direction of the pen.
    pub direction: Direction,
    /// Vertical alignment against the draw anchor.
    pub vertical_align: VerticalAlign,
    /// Horizontal alignment against the draw anchor.
    pub horizontal_align: HorizontalAlign,
    /// Height of a line.
    pub line_height: LineHeight,
    /// Factor applied to the line height to get the distance between
    /// baselines. `1.0` stacks lines tightly; `0.0` draws every line on the
    /// same baseline.
    pub line_spacing: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            font: None,
            size: Fixed::from_int(16),
            color: WHITE,
            mix_mode: MixMode::default(),
            quantization: Quantization::default(),
            direction: Direction::default(),
            vertical_align: VerticalAlign::default(),
            horizontal_align: HorizontalAlign::default(),
            line_height: LineHeight::default(),
            line_spacing: 1.0,
        }
    }
}

/// Draws and measures text.
///
/// A renderer bundles a [`DrawState`] with its collaborators: the rasterizer
/// producing glyph masks, the sizer producing advances and an optional shared
/// mask cache. Drawing takes `&self`, so one renderer may serve many threads
/// as long as each draws onto its own target.
#[derive(Clone, Debug)]
pub struct Renderer {
    state: DrawState,
    rasterizer: Arc<dyn Rasterizer>,
    sizer: Arc<dyn Sizer>,
    cache: Option<CacheHandler>,
    scratch: ScratchPool,
}

impl Renderer {
    /// Creates a renderer with the default state, the default sizer and no cache.
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self::with_state(rasterizer, DrawState::default())
    }

    /// Creates a renderer starting from `state`.
    pub fn with_state(rasterizer: Arc<dyn Rasterizer>, state: DrawState) -> Self {
        Self {
            state,
            rasterizer,
            sizer: Arc::new(DefaultSizer),
            cache: None,
            scratch: ScratchPool::default(),
        }
    }

    /// The current drawing configuration.
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Mutable access to the drawing configuration.
    pub fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }

    /// Sets the font.
    pub fn set_font(&mut self, font: Arc<dyn Font>) {
        self.state.font = Some(font);
    }

    /// The font, if one is set.
    pub fn font(&self) -> Option<&Arc<dyn Font>> {
        self.state.font.as_ref()
    }

    /// Sets the font size in pixels per em.
    pub fn set_size(&mut self, size: Fixed) {
        self.state.size = size;
    }

    /// Sets the font size in whole pixels per em.
    pub fn set_size_px(&mut self, px: i32) {
        self.set_size(Fixed::from_int(px));
    }

    /// The font size.
    pub fn size(&self) -> Fixed {
        self.state.size
    }

    /// Sets the draw color.
    pub fn set_color(&mut self, color: Rgba8) {
        self.state.color = color;
    }

    /// Sets the draw color from a floating point sRGB color.
    pub fn set_color_srgb(&mut self, color: AlphaColor<Srgb>) {
        self.state.color = color.to_rgba8();
    }

    /// The draw color.
    pub fn color(&self) -> Rgba8 {
        self.state.color
    }

    /// Sets the mix mode.
    pub fn set_mix_mode(&mut self, mode: MixMode) {
        self.state.mix_mode = mode;
    }

    /// The mix mode.
    pub fn mix_mode(&self) -> MixMode {
        self.state.mix_mode
    }

    /// Sets the quantization mode.
    pub fn set_quantization(&mut self, quantization: Quantization) {
        self.state.quantization = quantization;
    }

    /// The quantization mode.
    pub fn quantization(&self) -> Quantization {
        self.state.quantization
    }

    /// Sets the text direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.state.direction = direction;
    }

    /// The text direction.
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Sets both alignments.
    pub fn set_align(&mut self, vertical: VerticalAlign, horizontal: HorizontalAlign) {
        self.state.vertical_align = vertical;
        self.state.horizontal_align = horizontal;
    }

    /// Sets the vertical alignment.
    pub fn set_vertical_align(&mut self, align: VerticalAlign) {
        self.state.vertical_align = align;
    }

    /// Sets the horizontal alignment.
    pub fn set_horizontal_align(&mut self, align: HorizontalAlign) {
        self.state.horizontal_align = align;
    }

    /// The vertical and horizontal alignment.
    pub fn align(&self) -> (VerticalAlign, HorizontalAlign) {
        (self.state.vertical_align, self.state.horizontal_align)
    }

    /// Uses a fixed line height.
    pub fn set_line_height(&mut self, height: Fixed) {
        self.state.line_height = LineHeight::Fixed(height);
    }

    /// Derives the line height from the font and size.
    pub fn set_line_height_auto(&mut self) {
        self.state.line_height = LineHeight::Auto;
    }

    /// Sets the line spacing factor.
    pub fn set_line_spacing(&mut self, spacing: f32) {
        self.state.line_spacing = spacing;
    }

    /// The line spacing factor.
    pub fn line_spacing(&self) -> f32 {
        self.state.line_spacing
    }

    /// Replaces the rasterizer. Masks cached for the previous rasterizer are
    /// never reused, since its signature is part of every key.
    pub fn set_rasterizer(&mut self, rasterizer: Arc<dyn Rasterizer>) {
        self.rasterizer = rasterizer;
    }

    /// The rasterizer.
    pub fn rasterizer(&self) -> &Arc<dyn Rasterizer> {
        &self.rasterizer
    }

    /// Replaces the sizer.
    pub fn set_sizer(&mut self, sizer: Arc<dyn Sizer>) {
        self.sizer = sizer;
    }

    /// The sizer.
    pub fn sizer(&self) -> &Arc<dyn Sizer> {
        &self.sizer
    }

    /// Attaches a cache, or detaches it with `None`.
    pub fn set_cache_handler(&mut self, handler: Option<CacheHandler>) {
        self.cache = handler;
    }

    /// The attached cache handler.
    pub fn cache_handler(&self) -> Option<&CacheHandler> {
        self.cache.as_ref()
    }

    /// Mutable access to the attached cache handler, e.g. to toggle bypass.
    pub fn cache_handler_mut(&mut self) -> Option<&mut CacheHandler> {
        self.cache.as_mut()
    }

    /// The resolved height of one line.
    pub fn line_height(&self) -> Result<Fixed, Error> {
        self.resolve_line_height(self.require_font()?)
    }

    /// The distance between consecutive baselines: line height times spacing.
    pub fn line_advance(&self) -> Result<Fixed, Error> {
        Ok(self.line_height()?.scale(self.state.line_spacing))
    }

    /// Draws `text` with the anchor at the whole pixel `(x, y)`.
    ///
    /// Returns the final pen position. On error, glyphs drawn before the
    /// failure stay on the target.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        target: &mut S,
        text: &str,
        x: i32,
        y: i32,
    ) -> Result<FixedPoint, Error> {
        self.draw_at(target, text, FixedPoint::from_ints(x, y))
    }

    /// Draws `text` with the anchor at a sub-pixel position.
    pub fn draw_at<S: Surface + ?Sized>(
        &self,
        target: &mut S,
        text: &str,
        origin: FixedPoint,
    ) -> Result<FixedPoint, Error> {
        self.traverse(text, origin, |dot, glyph| {
            let mask = self.load_glyph_mask(glyph, dot)?;
            self.draw_mask(target, dot, &mask);
            Ok(())
        })
    }

    /// Draws already resolved glyphs on a single line.
    pub fn draw_glyphs<S: Surface + ?Sized>(
        &self,
        target: &mut S,
        glyphs: &[GlyphId],
        x: i32,
        y: i32,
    ) -> Result<FixedPoint, Error> {
        self.traverse_glyphs(glyphs, FixedPoint::from_ints(x, y), |dot, glyph| {
            let mask = self.load_glyph_mask(glyph, dot)?;
            self.draw_mask(target, dot, &mask);
            Ok(())
        })
    }

    /// The size `text` occupies when drawn.
    ///
    /// Measuring has no side effects: it neither rasterizes nor touches the cache.
    pub fn selection_rect(&self, text: &str) -> Result<RectSize, Error> {
        let font = self.require_font()?;
        let mut scratch = self.scratch.acquire();
        scratch.load(font, text)?;
        self.traverser(font)?.measure(scratch.run())
    }

    /// The size a single line of glyphs occupies when drawn.
    pub fn selection_rect_glyphs(&self, glyphs: &[GlyphId]) -> Result<RectSize, Error> {
        let font = self.require_font()?;
        self.traverser(font)?.measure(GlyphRun::single_line(glyphs))
    }

    /// Walks `text` without drawing, calling `on_glyph` with the quantized
    /// position of every glyph. Returns the final pen position.
    ///
    /// Together with [`load_glyph_mask`](Self::load_glyph_mask) and
    /// [`draw_mask`](Self::draw_mask) this allows custom draw loops.
    pub fn traverse<F>(
        &self,
        text: &str,
        origin: FixedPoint,
        on_glyph: F,
    ) -> Result<FixedPoint, Error>
    where
        F: FnMut(FixedPoint, GlyphId) -> Result<(), Error>,
    {
        let font = self.require_font()?;
        let mut scratch = self.scratch.acquire();
        scratch.load(font, text)?;
        self.traverser(font)?.traverse(scratch.run(), origin, on_glyph)
    }

    /// Like [`traverse`](Self::traverse), for already resolved glyphs on a
    /// single line.
    pub fn traverse_glyphs<F>(
        &self,
        glyphs: &[GlyphId],
        origin: FixedPoint,
        on_glyph: F,
    ) -> Result<FixedPoint, Error>
    where
        F: FnMut(FixedPoint, GlyphId) -> Result<(), Error>,
    {
        let font = self.require_font()?;
        self.traverser(font)?
            .traverse(GlyphRun::single_line(glyphs), origin, on_glyph)
    }

    /// Loads the mask of `glyph` for drawing at `dot`, from the cache when
    /// one is attached and not bypassed.
    pub fn load_glyph_mask(&self, glyph: GlyphId, dot: FixedPoint) -> Result<GlyphMask, Error> {
        let font = self.require_font()?;
        let size = self.state.size;
        let (offset, _) = quantize(dot, self.state.quantization);
        let key = GlyphCacheKey::new(font, &*self.rasterizer, size, glyph, offset);
        MaskSource::from_handler(self.cache.as_ref())
            .load(&key, || self.rasterizer.rasterize(font, size, glyph, offset))
            .map_err(|err| {
                log::warn!(
                    "failed to rasterize glyph {} at {size}px: {err}",
                    glyph.to_u32()
                );
                Error::Raster(err)
            })
    }

    /// Composites `mask` onto `target` for a glyph at `dot`, using the current
    /// color and mix mode.
    pub fn draw_mask<S: Surface + ?Sized>(
        &self,
        target: &mut S,
        dot: FixedPoint,
        mask: &GlyphMask,
    ) {
        let (_, render) = quantize(dot, self.state.quantization);
        composite(
            target,
            render.x.floor(),
            render.y.floor(),
            mask,
            self.state.color,
            self.state.mix_mode,
        );
    }

    fn require_font(&self) -> Result<&dyn Font, Error> {
        self.state.font.as_deref().ok_or(Error::NoFont)
    }

    fn resolve_line_height(&self, font: &dyn Font) -> Result<Fixed, Error> {
        match self.state.line_height {
            LineHeight::Fixed(height) => Ok(height),
            LineHeight::Auto => Ok(self.sizer.line_height(font, self.state.size)?),
        }
    }

    fn traverser<'a>(&'a self, font: &'a dyn Font) -> Result<Traverser<'a>, Error> {
        let line_height = self.resolve_line_height(font)?;
        Ok(Traverser {
            font,
            sizer: &*self.sizer,
            size: self.state.size,
            direction: self.state.direction,
            vertical_align: self.state.vertical_align,
            horizontal_align: self.state.horizontal_align,
            line_height,
            line_advance: line_height.scale(self.state.line_spacing),
            quantization: self.state.quantization,
        })
    }
}
