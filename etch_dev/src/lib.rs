// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Etch Dev
//!
//! This crate provides utilities for developing Etch: a synthetic font whose
//! glyphs are made of rectangles, a rasterizer that computes their exact
//! coverage, and text samples.
//!
//! Both collaborators are fully deterministic, which is what the cache and
//! compositing tests rely on.

use etch::{
    Fixed, Font, FontError, FontErrorKind, FontId, FontMetrics, GlyphId, GlyphMask, NameProperty,
    OutlinePen, RasterError, Rasterizer, SubpixelOffset,
};

/// Font units per em of [`BlockFont`].
pub const BLOCK_UNITS_PER_EM: u16 = 1000;

const FIRST_CHAR: u32 = 32;
const LAST_CHAR: u32 = 126;

/// Characters drawn as rectangles with a rectangular counter.
const RINGS: &str = "0DOo";
/// Lowercase letters reaching above the x-height.
const ASCENDERS: &str = "bdfhklt";
/// Lowercase letters reaching below the baseline.
const DESCENDERS: &str = "gjpqy";

/// A synthetic font covering printable ASCII.
///
/// - Glyph 0 is `.notdef`, drawn as a hollow box.
/// - Every printable ASCII character has a glyph; everything else is missing.
/// - Advances vary per character so layout bugs show up as pixel differences.
/// - `"fo"` and `"VA"` are kerned.
#[derive(Debug)]
pub struct BlockFont {
    id: FontId,
}

impl BlockFont {
    /// Creates a font with a fresh identity.
    pub fn new() -> Self {
        Self { id: FontId::next() }
    }

    fn char_of(glyph: GlyphId) -> Option<char> {
        let code = glyph.to_u32().checked_add(FIRST_CHAR - 1)?;
        if glyph == GlyphId::NOTDEF || code > LAST_CHAR {
            return None;
        }
        char::from_u32(code)
    }

    fn is_valid(glyph: GlyphId) -> bool {
        glyph == GlyphId::NOTDEF || Self::char_of(glyph).is_some()
    }

    fn advance_of(glyph: GlyphId) -> i32 {
        match Self::char_of(glyph) {
            None => 500,
            Some(' ') => 300,
            Some(ch) => 400 + 50 * (u32::from(ch) % 7) as i32,
        }
    }
}

impl Default for BlockFont {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits an axis-aligned rectangle given in font units at `size` pixels per em.
///
/// Filled rectangles wind counter-clockwise (y up); holes wind clockwise.
fn rect(pen: &mut dyn OutlinePen, size: f32, [x0, y0, x1, y1]: [i32; 4], hole: bool) {
    let px = |units: i32| units as f32 * size / f32::from(BLOCK_UNITS_PER_EM);
    let (x0, y0, x1, y1) = (px(x0), px(y0), px(x1), px(y1));
    pen.move_to(x0, y0);
    if hole {
        pen.line_to(x0, y1);
        pen.line_to(x1, y1);
        pen.line_to(x1, y0);
    } else {
        pen.line_to(x1, y0);
        pen.line_to(x1, y1);
        pen.line_to(x0, y1);
    }
    pen.close();
}

impl Font for BlockFont {
    fn id(&self) -> FontId {
        self.id
    }

    fn units_per_em(&self) -> u16 {
        BLOCK_UNITS_PER_EM
    }

    fn glyph_id(&self, ch: char) -> Result<Option<GlyphId>, FontError> {
        let code = u32::from(ch);
        Ok((FIRST_CHAR..=LAST_CHAR)
            .contains(&code)
            .then(|| GlyphId::new(code - FIRST_CHAR + 1)))
    }

    fn advance_units(&self, glyph: GlyphId) -> Result<i32, FontError> {
        if !Self::is_valid(glyph) {
            return Err(FontError::new(FontErrorKind::MissingGlyph));
        }
        Ok(Self::advance_of(glyph))
    }

    fn kern_units(&self, left: GlyphId, right: GlyphId) -> Result<i32, FontError> {
        Ok(match (Self::char_of(left), Self::char_of(right)) {
            (Some('f'), Some('o')) => -40,
            (Some('V'), Some('A')) => -80,
            _ => 0,
        })
    }

    fn metrics_units(&self) -> Result<FontMetrics, FontError> {
        Ok(FontMetrics {
            ascent: 800,
            descent: 200,
            line_gap: 100,
        })
    }

    fn draw_outline(
        &self,
        glyph: GlyphId,
        size: Fixed,
        pen: &mut dyn OutlinePen,
    ) -> Result<(), FontError> {
        if !Self::is_valid(glyph) {
            return Err(FontError::with_detail(
                FontErrorKind::MissingGlyph,
                format!("glyph {} is not in the block font", glyph.to_u32()),
            ));
        }
        let size = size.to_f32();
        let right = Self::advance_of(glyph) - 50;
        let Some(ch) = Self::char_of(glyph) else {
            rect(pen, size, [50, 0, right, 700], false);
            rect(pen, size, [100, 50, right - 50, 650], true);
            return Ok(());
        };
        if ch == ' ' {
            return Ok(());
        }
        let (bottom, top) = if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            (0, 700)
        } else if ASCENDERS.contains(ch) {
            (0, 750)
        } else if DESCENDERS.contains(ch) {
            (-200, 500)
        } else if ch.is_ascii_lowercase() {
            (0, 500)
        } else {
            (200, 500)
        };
        rect(pen, size, [50, bottom, right, top], false);
        if RINGS.contains(ch) {
            rect(pen, size, [150, bottom + 100, right - 100, top - 100], true);
        }
        Ok(())
    }

    fn name(&self, property: NameProperty) -> Result<Option<String>, FontError> {
        Ok(match property {
            NameProperty::Family => Some("Etch Block".to_owned()),
            NameProperty::Subfamily => Some("Regular".to_owned()),
            NameProperty::FullName => Some("Etch Block Regular".to_owned()),
            NameProperty::Identifier => None,
        })
    }
}

/// One closed rectangular contour in device space (y down).
#[derive(Copy, Clone, Debug)]
struct Contour {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    /// `1.0` for filled contours, `-1.0` for holes.
    sign: f64,
}

/// Collects contours, keeping the bounds and winding of each.
#[derive(Default)]
struct BoxPen {
    points: Vec<(f64, f64)>,
    boxes: Vec<Contour>,
    dx: f64,
    dy: f64,
}

impl BoxPen {
    fn flush(&mut self) {
        if self.points.len() < 3 {
            self.points.clear();
            return;
        }
        // Shoelace area in font space (y up); positive means counter-clockwise.
        let n = self.points.len();
        let area: f64 = (0..n)
            .map(|i| {
                let (x0, y0) = self.points[i];
                let (x1, y1) = self.points[(i + 1) % n];
                x0 * y1 - x1 * y0
            })
            .sum();
        if area != 0.0 {
            let xs = self.points.iter().map(|p| p.0);
            let ys = self.points.iter().map(|p| p.1);
            let min_x = xs.clone().fold(f64::INFINITY, f64::min);
            let max_x = xs.fold(f64::NEG_INFINITY, f64::max);
            let min_y = ys.clone().fold(f64::INFINITY, f64::min);
            let max_y = ys.fold(f64::NEG_INFINITY, f64::max);
            self.boxes.push(Contour {
                x0: min_x + self.dx,
                x1: max_x + self.dx,
                y0: self.dy - max_y,
                y1: self.dy - min_y,
                sign: area.signum(),
            });
        }
        self.points.clear();
    }
}

impl OutlinePen for BoxPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.flush();
        self.points.push((f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.points.push((f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, _cx0: f32, _cy0: f32, x: f32, y: f32) {
        self.line_to(x, y);
    }

    fn curve_to(&mut self, _cx0: f32, _cy0: f32, _cx1: f32, _cy1: f32, x: f32, y: f32) {
        self.line_to(x, y);
    }

    fn close(&mut self) {
        self.flush();
    }
}

fn overlap(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

/// Rasterizes rectangle outlines with exact area coverage.
///
/// Curves are flattened to their end points, so only fonts drawn from
/// axis-aligned rectangles (such as [`BlockFont`]) render correctly.
#[derive(Copy, Clone, Debug, Default)]
pub struct BoxRasterizer;

impl Rasterizer for BoxRasterizer {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "coverage is clamped to 0..=255 and mask bounds are small"
    )]
    fn rasterize(
        &self,
        font: &dyn Font,
        size: Fixed,
        glyph: GlyphId,
        offset: SubpixelOffset,
    ) -> Result<GlyphMask, RasterError> {
        let mut pen = BoxPen {
            dx: f64::from(offset.x().to_f32()),
            dy: f64::from(offset.y().to_f32()),
            ..BoxPen::default()
        };
        font.draw_outline(glyph, size, &mut pen)?;
        pen.flush();
        if pen.boxes.is_empty() {
            return Ok(GlyphMask::empty());
        }

        let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
        let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for b in &pen.boxes {
            x0 = x0.min(b.x0);
            y0 = y0.min(b.y0);
            x1 = x1.max(b.x1);
            y1 = y1.max(b.y1);
        }
        let (left, top) = (x0.floor() as i32, y0.floor() as i32);
        let (right, bottom) = (x1.ceil() as i32, y1.ceil() as i32);
        let (width, height) = ((right - left) as u32, (bottom - top) as u32);

        let mut data = Vec::with_capacity(width as usize * height as usize);
        for py in top..bottom {
            for px in left..right {
                let (fx, fy) = (f64::from(px), f64::from(py));
                let coverage: f64 = pen
                    .boxes
                    .iter()
                    .map(|b| {
                        let dx = overlap(b.x0, b.x1, fx, fx + 1.0);
                        let dy = overlap(b.y0, b.y1, fy, fy + 1.0);
                        b.sign * dx * dy
                    })
                    .sum();
                data.push((coverage.abs().min(1.0) * 255.0).round() as u8);
            }
        }
        Ok(GlyphMask::new(left, top, width, height, data))
    }

    fn cache_signature(&self) -> u64 {
        0x424F_5852
    }
}

/// A sample to be used for development.
#[derive(Debug)]
pub struct Sample {
    /// The name of the sample.
    pub name: &'static str,
    /// The text of the sample.
    pub text: &'static str,
}

/// Text samples the block font covers completely.
pub const SAMPLES: &[Sample] = &[
    Sample {
        name: "words",
        text: "for lack of better words",
    },
    Sample {
        name: "short",
        text: "hey ho",
    },
    Sample {
        name: "kerned",
        text: "VAfo of VA",
    },
    Sample {
        name: "multiline",
        text: "first line\nsecond\n\nlast one",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_font_maps_printable_ascii() {
        let font = BlockFont::new();
        assert_eq!(font.glyph_id(' ').unwrap(), Some(GlyphId::new(1)));
        assert_eq!(font.glyph_id('~').unwrap(), Some(GlyphId::new(95)));
        assert_eq!(font.glyph_id('é').unwrap(), None);
        assert_eq!(BlockFont::char_of(GlyphId::new(48)), Some('O'));
        assert!(font.advance_units(GlyphId::new(96)).is_err());
    }

    #[test]
    fn box_rasterizer_punches_counters() {
        let font = BlockFont::new();
        let o = font.glyph_id('O').unwrap().unwrap();
        let mask = BoxRasterizer
            .rasterize(&font, Fixed::from_int(10), o, SubpixelOffset::ZERO)
            .unwrap();
        // Spans 0.5..4.5 px horizontally and 7 px above the baseline; the
        // counter spans 1.5..3.5 px and 1..6 px.
        assert_eq!((mask.left(), mask.top()), (0, -7));
        assert_eq!((mask.width(), mask.height()), (5, 7));
        assert_eq!(mask.coverage(1, 0), 255);
        assert_eq!(mask.coverage(0, 3), 128);
        assert_eq!(mask.coverage(1, 3), 128);
        assert_eq!(mask.coverage(2, 3), 0);
    }

    #[test]
    fn box_rasterizer_space_is_empty() {
        let font = BlockFont::new();
        let space = font.glyph_id(' ').unwrap().unwrap();
        let mask = BoxRasterizer
            .rasterize(&font, Fixed::from_int(24), space, SubpixelOffset::ZERO)
            .unwrap();
        assert!(mask.is_empty());
    }
}
