// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attaching a shared cache to a renderer.

use std::sync::Arc;

use super::{GlyphCacheKey, MaskCache};
use crate::error::RasterError;
use crate::mask::GlyphMask;

/// A renderer's connection to a shared [`MaskCache`].
///
/// Handlers are cheap to clone; every clone talks to the same cache. A
/// bypassed handler keeps its cache attached but neither reads nor writes it,
/// which is useful for one-off text that would only pollute the cache.
#[derive(Clone, Debug)]
pub struct CacheHandler {
    cache: Arc<MaskCache>,
    bypass: bool,
}

impl CacheHandler {
    /// Creates a handler for `cache`.
    pub fn new(cache: Arc<MaskCache>) -> Self {
        Self {
            cache,
            bypass: false,
        }
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<MaskCache> {
        &self.cache
    }

    /// Enables or disables bypassing the cache.
    pub fn set_bypass(&mut self, bypass: bool) {
        self.bypass = bypass;
    }

    /// Whether draws ignore the cache.
    pub fn is_bypassed(&self) -> bool {
        self.bypass
    }

    pub(crate) fn source(&self) -> MaskSource<'_> {
        if self.bypass {
            MaskSource::Direct
        } else {
            MaskSource::Cached(&self.cache)
        }
    }
}

/// Where glyph masks come from during one draw.
#[derive(Copy, Clone, Debug)]
pub(crate) enum MaskSource<'a> {
    /// Rasterize every glyph.
    Direct,
    /// Consult the cache first and store fresh masks in it.
    Cached(&'a MaskCache),
}

impl MaskSource<'_> {
    pub(crate) fn from_handler(handler: Option<&CacheHandler>) -> MaskSource<'_> {
        handler.map_or(MaskSource::Direct, CacheHandler::source)
    }

    /// Loads the mask for `key`, calling `rasterize` on a miss.
    pub(crate) fn load(
        self,
        key: &GlyphCacheKey,
        rasterize: impl FnOnce() -> Result<GlyphMask, RasterError>,
    ) -> Result<GlyphMask, RasterError> {
        match self {
            Self::Direct => rasterize(),
            Self::Cached(cache) => {
                if let Some(mask) = cache.get(key) {
                    return Ok(mask);
                }
                let mask = rasterize()?;
                cache.put(*key, mask.clone());
                Ok(mask)
            }
        }
    }
}
