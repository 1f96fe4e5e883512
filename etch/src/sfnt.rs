// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! OpenType and TrueType fonts through skrifa.

use peniko::FontData;
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::DrawSettings;
use skrifa::raw::ReadError;
use skrifa::string::StringId;
use skrifa::{FontRef, MetadataProvider};

use crate::error::{FontError, FontErrorKind};
use crate::fixed::Fixed;
use crate::font::{Font, FontId, FontMetrics, GlyphId, NameProperty, OutlinePen};

/// A font backed by sfnt (OpenType/TrueType) data.
///
/// The data is validated once on construction and parsed lazily afterwards;
/// each query borrows a fresh skrifa [`FontRef`], which is cheap.
#[derive(Clone, Debug)]
pub struct SfntFont {
    id: FontId,
    data: FontData,
    units_per_em: u16,
    metrics: FontMetrics,
}

impl SfntFont {
    /// Loads the font at `data.index` within `data`.
    pub fn new(data: FontData) -> Result<Self, FontError> {
        let font = FontRef::from_index(data.data.as_ref(), data.index).map_err(malformed)?;
        let metrics = font.metrics(Size::unscaled(), LocationRef::default());
        Ok(Self {
            id: FontId::next(),
            units_per_em: metrics.units_per_em,
            metrics: FontMetrics {
                ascent: font_units(metrics.ascent),
                descent: -font_units(metrics.descent),
                line_gap: font_units(metrics.leading),
            },
            data,
        })
    }

    /// The underlying font data.
    pub fn data(&self) -> &FontData {
        &self.data
    }

    fn font_ref(&self) -> Result<FontRef<'_>, FontError> {
        FontRef::from_index(self.data.data.as_ref(), self.data.index).map_err(malformed)
    }
}

fn malformed(err: ReadError) -> FontError {
    FontError::with_detail(FontErrorKind::Malformed, format!("{err}"))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "font unit metrics fit in i32"
)]
fn font_units(value: f32) -> i32 {
    value.round() as i32
}

fn skrifa_glyph(glyph: GlyphId) -> skrifa::GlyphId {
    skrifa::GlyphId::new(glyph.to_u32())
}

impl Font for SfntFont {
    fn id(&self) -> FontId {
        self.id
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Result<Option<GlyphId>, FontError> {
        let font = self.font_ref()?;
        Ok(font
            .charmap()
            .map(ch)
            .filter(|glyph| glyph.to_u32() != 0)
            .map(|glyph| GlyphId::new(glyph.to_u32())))
    }

    fn advance_units(&self, glyph: GlyphId) -> Result<i32, FontError> {
        let font = self.font_ref()?;
        font.glyph_metrics(Size::unscaled(), LocationRef::default())
            .advance_width(skrifa_glyph(glyph))
            .map(font_units)
            .ok_or_else(|| FontError::new(FontErrorKind::MissingGlyph))
    }

    fn metrics_units(&self) -> Result<FontMetrics, FontError> {
        Ok(self.metrics)
    }

    fn draw_outline(
        &self,
        glyph: GlyphId,
        size: Fixed,
        pen: &mut dyn OutlinePen,
    ) -> Result<(), FontError> {
        let font = self.font_ref()?;
        let outlines = font.outline_glyphs();
        let Some(outline) = outlines.get(skrifa_glyph(glyph)) else {
            return Err(FontError::new(FontErrorKind::MissingGlyph));
        };
        let settings = DrawSettings::unhinted(Size::new(size.to_f32()), LocationRef::default());
        outline
            .draw(settings, &mut DynPen(pen))
            .map(|_| ())
            .map_err(|err| FontError::with_detail(FontErrorKind::Malformed, format!("{err}")))
    }

    fn name(&self, property: NameProperty) -> Result<Option<String>, FontError> {
        let font = self.font_ref()?;
        let id = match property {
            NameProperty::Family => StringId::FAMILY_NAME,
            NameProperty::Subfamily => StringId::SUBFAMILY_NAME,
            NameProperty::FullName => StringId::FULL_NAME,
            NameProperty::Identifier => StringId::UNIQUE_ID,
        };
        Ok(font
            .localized_strings(id)
            .english_or_first()
            .map(|name| name.chars().collect()))
    }
}

/// Forwards to a borrowed pen trait object.
struct DynPen<'a>(&'a mut dyn OutlinePen);

impl OutlinePen for DynPen<'_> {
    #[inline]
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    #[inline]
    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    #[inline]
    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.0.quad_to(cx0, cy0, x, y);
    }

    #[inline]
    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.0.curve_to(cx0, cy0, cx1, cy1, x, y);
    }

    #[inline]
    fn close(&mut self) {
        self.0.close();
    }
}
