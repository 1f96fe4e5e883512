// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types surfaced by fonts, rasterizers, the mask cache and the renderer.

use core::fmt;

/// The non-exhaustive category of a [`FontError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FontErrorKind {
    /// The font data could not be parsed, or a table it relies on is invalid.
    Malformed,
    /// A requested property is missing or empty.
    NotFound,
    /// A glyph identifier is not present in the font.
    MissingGlyph,
}

/// Error reported by a [`Font`](crate::Font) implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontError {
    kind: FontErrorKind,
    detail: Option<String>,
}

impl FontError {
    /// Creates an error of the given kind without further detail.
    pub const fn new(kind: FontErrorKind) -> Self {
        Self { kind, detail: None }
    }

    /// Creates an error of the given kind with a human-readable detail.
    pub fn with_detail(kind: FontErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
        }
    }

    /// Creates a [`FontErrorKind::NotFound`] error.
    pub const fn not_found() -> Self {
        Self::new(FontErrorKind::NotFound)
    }

    /// The category of this error.
    pub fn kind(&self) -> FontErrorKind {
        self.kind
    }

    /// Extra detail, when the font implementation provided one.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            FontErrorKind::Malformed => "malformed font data",
            FontErrorKind::NotFound => "font property not found or empty",
            FontErrorKind::MissingGlyph => "glyph not present in font",
        };
        match &self.detail {
            Some(detail) => write!(f, "{msg}: {detail}"),
            None => f.write_str(msg),
        }
    }
}

impl core::error::Error for FontError {}

/// Error reported by a [`Rasterizer`](crate::Rasterizer) that could not
/// produce a mask, typically because the outline data is malformed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterError {
    message: String,
}

impl RasterError {
    /// Creates a rasterization error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message describing the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rasterization failed: {}", self.message)
    }
}

impl core::error::Error for RasterError {}

impl From<FontError> for RasterError {
    fn from(err: FontError) -> Self {
        Self::new(format!("{err}"))
    }
}

/// A mask cache was configured with a byte budget of zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CapacityError;

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("mask cache capacity must be greater than zero")
    }
}

impl core::error::Error for CapacityError {}

/// Error returned by drawing and measuring operations.
///
/// Compositing is not transactional: when a draw fails midway, glyphs
/// composited before the failure remain on the target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// No font has been set on the renderer.
    NoFont,
    /// The font collaborator failed.
    Font(FontError),
    /// The rasterizer collaborator failed.
    Raster(RasterError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFont => f.write_str("no font set on renderer"),
            Self::Font(err) => fmt::Display::fmt(err, f),
            Self::Raster(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::NoFont => None,
            Self::Font(err) => Some(err),
            Self::Raster(err) => Some(err),
        }
    }
}

impl From<FontError> for Error {
    fn from(err: FontError) -> Self {
        Self::Font(err)
    }
}

impl From<RasterError> for Error {
    fn from(err: RasterError) -> Self {
        Self::Raster(err)
    }
}
