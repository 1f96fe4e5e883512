// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sizers: glyph advances, kerning and line metrics at a given size.
//!
//! The traverser never computes advances itself; it always asks a [`Sizer`].
//! Swapping the sizer is how callers get padded or monospaced layouts out of
//! an arbitrary font.

use core::fmt::Debug;

use crate::error::FontError;
use crate::fixed::Fixed;
use crate::font::{Font, FontMetrics, GlyphId};

/// Vertical metrics scaled to a font size.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct VerticalMetrics {
    /// Distance from the baseline to the top of a line.
    pub ascent: Fixed,
    /// Distance from the baseline to the bottom of a line (positive).
    pub descent: Fixed,
    /// Extra gap recommended between lines.
    pub line_gap: Fixed,
}

/// Computes glyph advances and line metrics in fixed-point pixels.
pub trait Sizer: Send + Sync + Debug {
    /// Horizontal advance of `glyph` at `size`.
    fn advance(&self, font: &dyn Font, size: Fixed, glyph: GlyphId) -> Result<Fixed, FontError>;

    /// Kerning adjustment between two consecutive glyphs at `size`.
    fn kern(
        &self,
        font: &dyn Font,
        size: Fixed,
        left: GlyphId,
        right: GlyphId,
    ) -> Result<Fixed, FontError>;

    /// Vertical metrics at `size`.
    fn vertical_metrics(&self, font: &dyn Font, size: Fixed) -> Result<VerticalMetrics, FontError>;

    /// Default line height at `size`: ascent, descent and line gap combined.
    fn line_height(&self, font: &dyn Font, size: Fixed) -> Result<Fixed, FontError> {
        let metrics = self.vertical_metrics(font, size)?;
        Ok(metrics.ascent + metrics.descent + metrics.line_gap)
    }
}

/// Scales a value in font units to fixed-point pixels at `size`.
#[inline]
fn scale_units(font: &dyn Font, size: Fixed, units: i32) -> Fixed {
    size.mul_div(units, i32::from(font.units_per_em().max(1)))
}

fn scale_metrics(font: &dyn Font, size: Fixed, metrics: FontMetrics) -> VerticalMetrics {
    VerticalMetrics {
        ascent: scale_units(font, size, metrics.ascent),
        descent: scale_units(font, size, metrics.descent),
        line_gap: scale_units(font, size, metrics.line_gap),
    }
}

/// Scales the font's own metrics. This is the sizer renderers start with.
#[derive(Copy, Clone, Default, Debug)]
pub struct DefaultSizer;

impl Sizer for DefaultSizer {
    fn advance(&self, font: &dyn Font, size: Fixed, glyph: GlyphId) -> Result<Fixed, FontError> {
        Ok(scale_units(font, size, font.advance_units(glyph)?))
    }

    fn kern(
        &self,
        font: &dyn Font,
        size: Fixed,
        left: GlyphId,
        right: GlyphId,
    ) -> Result<Fixed, FontError> {
        Ok(scale_units(font, size, font.kern_units(left, right)?))
    }

    fn vertical_metrics(&self, font: &dyn Font, size: Fixed) -> Result<VerticalMetrics, FontError> {
        Ok(scale_metrics(font, size, font.metrics_units()?))
    }
}

/// Adds a constant horizontal padding to every advance.
#[derive(Copy, Clone, Default, Debug)]
pub struct PaddedSizer {
    /// Padding added after each glyph. May be negative to tighten text.
    pub padding: Fixed,
}

impl PaddedSizer {
    /// Creates a sizer padding every advance by `padding`.
    pub const fn new(padding: Fixed) -> Self {
        Self { padding }
    }
}

impl Sizer for PaddedSizer {
    fn advance(&self, font: &dyn Font, size: Fixed, glyph: GlyphId) -> Result<Fixed, FontError> {
        Ok(DefaultSizer.advance(font, size, glyph)? + self.padding)
    }

    fn kern(
        &self,
        font: &dyn Font,
        size: Fixed,
        left: GlyphId,
        right: GlyphId,
    ) -> Result<Fixed, FontError> {
        DefaultSizer.kern(font, size, left, right)
    }

    fn vertical_metrics(&self, font: &dyn Font, size: Fixed) -> Result<VerticalMetrics, FontError> {
        DefaultSizer.vertical_metrics(font, size)
    }
}

/// Gives every glyph the same advance and ignores kerning, for monospaced
/// layouts.
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedSizer {
    /// The advance used for every glyph.
    pub advance: Fixed,
}

impl FixedSizer {
    /// Creates a sizer that advances every glyph by `advance`.
    pub const fn new(advance: Fixed) -> Self {
        Self { advance }
    }
}

impl Sizer for FixedSizer {
    fn advance(&self, _font: &dyn Font, _size: Fixed, _glyph: GlyphId) -> Result<Fixed, FontError> {
        Ok(self.advance)
    }

    fn kern(
        &self,
        _font: &dyn Font,
        _size: Fixed,
        _left: GlyphId,
        _right: GlyphId,
    ) -> Result<Fixed, FontError> {
        Ok(Fixed::ZERO)
    }

    fn vertical_metrics(&self, font: &dyn Font, size: Fixed) -> Result<VerticalMetrics, FontError> {
        DefaultSizer.vertical_metrics(font, size)
    }
}
