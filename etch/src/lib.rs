// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Etch draws sequences of font glyphs onto pixel surfaces.
//!
//! The pipeline walks a glyph run with a [`Traverser`], quantizes every pen
//! position, obtains a coverage mask for each glyph from a shared
//! [`MaskCache`] or straight from a [`Rasterizer`], and blends that mask onto
//! a [`Surface`] with one of several [`MixMode`]s. Drawing a glyph from the
//! cache and drawing it freshly rasterized produce identical pixels.
//!
//! Fonts, sizers and rasterizers are pluggable. [`SfntFont`] adapts OpenType
//! data through skrifa.
//!
//! ```ignore
//! let cache = Arc::new(MaskCache::new(1 << 20)?);
//! let mut renderer = Renderer::new(rasterizer);
//! renderer.set_font(font);
//! renderer.set_cache_handler(Some(cache.handler()));
//! let mut target = RgbaPixmap::new(256, 64);
//! renderer.draw(&mut target, "Hello", 8, 40)?;
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cache;
mod composite;
mod error;
mod fixed;
mod font;
mod mask;
mod pixmap;
mod quantize;
mod renderer;
mod scratch;
mod sfnt;
mod sizer;
mod traverse;

pub use peniko;
pub use peniko::color::Rgba8;

pub use cache::{CacheHandler, CacheStats, GlyphCacheKey, Insertion, MaskCache};
pub use composite::{blend_alpha, blend_rgba, composite, mul255, MixMode, Surface};
pub use error::{CapacityError, Error, FontError, FontErrorKind, RasterError};
pub use fixed::{Fixed, FixedPoint, PixelRect, RectSize};
pub use font::{
    font_family, font_identifier, font_name, font_subfamily, missing_chars, Font, FontId,
    FontMetrics, GlyphId, NameProperty, OutlinePen,
};
pub use mask::{mask_byte_size, GlyphMask, Rasterizer, MASK_OVERHEAD_BYTES};
pub use pixmap::{AlphaPixmap, RgbaPixmap};
pub use quantize::{quantize, Quantization, SubpixelOffset, SUBPIXEL_BUCKETS};
pub use renderer::{DrawState, LineHeight, Renderer};
pub use sfnt::SfntFont;
pub use sizer::{DefaultSizer, FixedSizer, PaddedSizer, Sizer, VerticalMetrics};
pub use traverse::{Direction, GlyphRun, HorizontalAlign, Traverser, VerticalAlign};
