// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font seam consumed by the drawing pipeline, plus font property lookups.
//!
//! Font parsing is not done here. Implementations of [`Font`] answer glyph
//! mapping, metrics, outline and naming questions; [`SfntFont`](crate::SfntFont)
//! does so for OpenType data through skrifa.

use core::fmt::Debug;
use core::sync::atomic::{AtomicU64, Ordering};

pub use skrifa::outline::OutlinePen;

use crate::error::FontError;
use crate::fixed::Fixed;

/// Opaque identity of a font, stable for the font's lifetime.
///
/// Identities are never reused within a process, which makes them safe to
/// embed in cache keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontId(u64);

impl FontId {
    /// Allocates a fresh, process-unique identity.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identifier value.
    pub const fn to_u64(self) -> u64 {
        self.0
    }
}

/// The font-specific index of a glyph. It is *not* a Unicode code point.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphId(u32);

impl GlyphId {
    /// The `.notdef` glyph, drawn for characters the font cannot map.
    pub const NOTDEF: Self = Self(0);

    /// Creates a glyph identifier.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw glyph index.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

/// Vertical font metrics, in font units.
///
/// `descent` is a positive distance below the baseline.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the tallest glyphs.
    pub ascent: i32,
    /// Distance from the baseline to the bottom of the deepest glyphs.
    pub descent: i32,
    /// Recommended extra gap between lines.
    pub line_gap: i32,
}

/// Human-readable name fields a font may carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NameProperty {
    /// Family name, e.g. "Roboto".
    Family,
    /// Subfamily name, usually one of Regular, Italic, Bold or Bold Italic.
    Subfamily,
    /// Full font name, e.g. "Roboto Bold".
    FullName,
    /// Unique font identifier.
    Identifier,
}

/// A font as seen by the drawing pipeline.
///
/// Implementations must be deterministic: the same inputs always produce the
/// same answers, otherwise cached masks would diverge from fresh ones.
pub trait Font: Send + Sync + Debug {
    /// Identity used in cache keys.
    fn id(&self) -> FontId;

    /// Number of font units per em.
    fn units_per_em(&self) -> u16;

    /// Maps a character to a glyph, or `None` if the font has no glyph for it.
    fn glyph_id(&self, ch: char) -> Result<Option<GlyphId>, FontError>;

    /// Horizontal advance of a glyph, in font units.
    fn advance_units(&self, glyph: GlyphId) -> Result<i32, FontError>;

    /// Kerning adjustment between two consecutive glyphs, in font units.
    fn kern_units(&self, left: GlyphId, right: GlyphId) -> Result<i32, FontError> {
        let _ = (left, right);
        Ok(0)
    }

    /// Vertical metrics, in font units.
    fn metrics_units(&self) -> Result<FontMetrics, FontError>;

    /// Emits the outline of `glyph` scaled to `size` pixels per em into `pen`.
    ///
    /// Coordinates are in pixels relative to the glyph origin, with the y axis
    /// pointing up.
    fn draw_outline(
        &self,
        glyph: GlyphId,
        size: Fixed,
        pen: &mut dyn OutlinePen,
    ) -> Result<(), FontError>;

    /// Looks up a name field. `Ok(None)` means the font does not carry it.
    fn name(&self, property: NameProperty) -> Result<Option<String>, FontError>;
}

/// Returns the family name of the font.
///
/// A missing or empty value is reported as [`FontErrorKind::NotFound`];
/// other errors come from the font itself (e.g. an invalid naming table).
///
/// [`FontErrorKind::NotFound`]: crate::FontErrorKind::NotFound
pub fn font_family(font: &dyn Font) -> Result<String, FontError> {
    required_name(font, NameProperty::Family)
}

/// Returns the subfamily name of the font, usually one of Regular, Italic,
/// Bold or Bold Italic.
pub fn font_subfamily(font: &dyn Font) -> Result<String, FontError> {
    required_name(font, NameProperty::Subfamily)
}

/// Returns the full name of the font.
pub fn font_name(font: &dyn Font) -> Result<String, FontError> {
    required_name(font, NameProperty::FullName)
}

/// Returns the unique identifier of the font.
pub fn font_identifier(font: &dyn Font) -> Result<String, FontError> {
    required_name(font, NameProperty::Identifier)
}

fn required_name(font: &dyn Font, property: NameProperty) -> Result<String, FontError> {
    match font.name(property)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(FontError::not_found()),
    }
}

/// Returns the characters of `text` that the font cannot represent.
///
/// Repeated characters are reported once per occurrence. Useful to validate
/// dynamically loaded fonts before drawing with them.
pub fn missing_chars(font: &dyn Font, text: &str) -> Result<Vec<char>, FontError> {
    let mut missing = Vec::new();
    for ch in text.chars() {
        if font.glyph_id(ch)?.is_none() {
            missing.push(ch);
        }
    }
    Ok(missing)
}
