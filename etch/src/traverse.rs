// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walking glyph runs: pen positions for drawing and sizes for measuring.
//!
//! Drawing and measuring share the per-line width computation below, so an
//! aligned draw always lands where a measurement says it will.

use crate::error::Error;
use crate::fixed::{Fixed, FixedPoint, RectSize};
use crate::font::{Font, GlyphId};
use crate::quantize::{quantize, Quantization};
use crate::sizer::Sizer;

/// Horizontal text direction.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The pen moves rightwards.
    #[default]
    LeftToRight,
    /// The pen moves leftwards.
    ///
    /// Glyphs are still visited in the order they are given; only the
    /// geometry is mirrored.
    RightToLeft,
}

/// Where the anchor sits relative to the first line of text.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    /// The anchor is at the top of the first line (its ascent).
    Top,
    /// The anchor is at the vertical center of the whole block.
    Center,
    /// The anchor is on the first line's baseline.
    #[default]
    Baseline,
    /// The anchor is at the bottom of the last line (its descent).
    Bottom,
}

/// Where the anchor sits relative to each line.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    /// Lines start at the anchor.
    #[default]
    Left,
    /// Lines are centered on the anchor.
    Center,
    /// Lines end at the anchor.
    Right,
}

const SINGLE_LINE: &[usize] = &[0];

/// A sequence of glyphs split into lines.
#[derive(Copy, Clone, Debug)]
pub struct GlyphRun<'a> {
    glyphs: &'a [GlyphId],
    line_starts: &'a [usize],
}

impl<'a> GlyphRun<'a> {
    /// A run of glyphs on a single line.
    pub fn single_line(glyphs: &'a [GlyphId]) -> Self {
        Self {
            glyphs,
            line_starts: SINGLE_LINE,
        }
    }

    /// A run split into lines at the given glyph indices.
    ///
    /// `line_starts` must begin with 0 and be non-decreasing; an index equal
    /// to `glyphs.len()` denotes a trailing empty line.
    pub fn new(glyphs: &'a [GlyphId], line_starts: &'a [usize]) -> Self {
        debug_assert!(
            line_starts.first().is_none_or(|&first| first == 0)
                && line_starts.windows(2).all(|w| w[0] <= w[1])
                && line_starts.last().is_none_or(|&last| last <= glyphs.len()),
            "line starts must be sorted indices into the run"
        );
        if line_starts.is_empty() {
            Self::single_line(glyphs)
        } else {
            Self {
                glyphs,
                line_starts,
            }
        }
    }

    /// All glyphs, across every line.
    pub fn glyphs(&self) -> &'a [GlyphId] {
        self.glyphs
    }

    /// Number of lines, including empty ones. Always at least one.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Glyphs of each line, in order.
    pub fn lines(&self) -> impl Iterator<Item = &'a [GlyphId]> + 'a {
        let glyphs = self.glyphs;
        let starts = self.line_starts;
        starts.iter().enumerate().map(move |(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(glyphs.len());
            &glyphs[start..end]
        })
    }
}

/// Lays glyph runs out with fixed inputs.
///
/// A traverser holds no state between calls; it is rebuilt from the draw state
/// whenever a renderer draws or measures.
#[derive(Copy, Clone, Debug)]
pub struct Traverser<'a> {
    /// Font the glyphs belong to.
    pub font: &'a dyn Font,
    /// Source of advances, kerning and vertical metrics.
    pub sizer: &'a dyn Sizer,
    /// Font size.
    pub size: Fixed,
    /// Horizontal direction of the pen.
    pub direction: Direction,
    /// Vertical alignment of the block against the anchor.
    pub vertical_align: VerticalAlign,
    /// Horizontal alignment of each line against the anchor.
    pub horizontal_align: HorizontalAlign,
    /// Height of one line.
    pub line_height: Fixed,
    /// Distance between consecutive baselines.
    pub line_advance: Fixed,
    /// How pen positions are quantized before glyphs are emitted.
    pub quantization: Quantization,
}

impl Traverser<'_> {
    /// Walks `run` starting at the anchor `origin`, calling `on_glyph` with the
    /// quantized position of every glyph.
    ///
    /// Returns the final, unquantized pen position. Errors from the sizer or
    /// from `on_glyph` stop the walk.
    pub fn traverse<F>(
        &self,
        run: GlyphRun<'_>,
        origin: FixedPoint,
        mut on_glyph: F,
    ) -> Result<FixedPoint, Error>
    where
        F: FnMut(FixedPoint, GlyphId) -> Result<(), Error>,
    {
        let mut pen = FixedPoint::new(
            origin.x,
            self.first_baseline(origin.y, run.line_count())?,
        );
        let needs_width = !matches!(
            (self.direction, self.horizontal_align),
            (Direction::LeftToRight, HorizontalAlign::Left)
                | (Direction::RightToLeft, HorizontalAlign::Right)
        );

        for (i, line) in run.lines().enumerate() {
            if i > 0 {
                pen.y += self.line_advance;
            }
            let width = if needs_width {
                self.line_width(line)?
            } else {
                Fixed::ZERO
            };
            pen.x = self.line_start(origin.x, width);

            let mut prev = None;
            for &glyph in line {
                if let Some(prev) = prev {
                    let kern = self.sizer.kern(self.font, self.size, prev, glyph)?;
                    match self.direction {
                        Direction::LeftToRight => pen.x += kern,
                        Direction::RightToLeft => pen.x -= kern,
                    }
                }
                let advance = self.sizer.advance(self.font, self.size, glyph)?;
                match self.direction {
                    Direction::LeftToRight => {
                        on_glyph(quantize(pen, self.quantization).1, glyph)?;
                        pen.x += advance;
                    }
                    Direction::RightToLeft => {
                        pen.x -= advance;
                        on_glyph(quantize(pen, self.quantization).1, glyph)?;
                    }
                }
                prev = Some(glyph);
            }
        }
        Ok(pen)
    }

    /// Size of the block `run` would occupy.
    ///
    /// Independent of alignment, direction, quantization and position.
    pub fn measure(&self, run: GlyphRun<'_>) -> Result<RectSize, Error> {
        let mut width = Fixed::ZERO;
        for line in run.lines() {
            width = width.max(self.line_width(line)?);
        }
        Ok(RectSize {
            width,
            height: self.block_height(run.line_count()),
        })
    }

    fn block_height(&self, lines: usize) -> Fixed {
        self.line_height + self.line_advance.mul_int(extra_lines(lines))
    }

    /// Baseline of the first line for an anchor at `y`.
    fn first_baseline(&self, y: Fixed, lines: usize) -> Result<Fixed, Error> {
        if self.vertical_align == VerticalAlign::Baseline {
            return Ok(y);
        }
        let metrics = self.sizer.vertical_metrics(self.font, self.size)?;
        let below_first = metrics.descent + self.line_advance.mul_int(extra_lines(lines));
        Ok(match self.vertical_align {
            VerticalAlign::Baseline => y,
            VerticalAlign::Top => y + metrics.ascent,
            VerticalAlign::Bottom => y - below_first,
            VerticalAlign::Center => y - (metrics.ascent + below_first).half() + metrics.ascent,
        })
    }

    fn line_start(&self, x: Fixed, width: Fixed) -> Fixed {
        match (self.direction, self.horizontal_align) {
            (Direction::LeftToRight, HorizontalAlign::Left) => x,
            (Direction::LeftToRight, HorizontalAlign::Center) => x - width.half(),
            (Direction::LeftToRight, HorizontalAlign::Right) => x - width,
            (Direction::RightToLeft, HorizontalAlign::Right) => x,
            (Direction::RightToLeft, HorizontalAlign::Center) => x + width.half(),
            (Direction::RightToLeft, HorizontalAlign::Left) => x + width,
        }
    }

    /// Advances plus kerning of one line.
    fn line_width(&self, line: &[GlyphId]) -> Result<Fixed, Error> {
        let mut width = Fixed::ZERO;
        let mut prev = None;
        for &glyph in line {
            if let Some(prev) = prev {
                width += self.sizer.kern(self.font, self.size, prev, glyph)?;
            }
            width += self.sizer.advance(self.font, self.size, glyph)?;
            prev = Some(glyph);
        }
        Ok(width)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "line counts are bounded by text length"
)]
fn extra_lines(lines: usize) -> i32 {
    lines.saturating_sub(1) as i32
}
