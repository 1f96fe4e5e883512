// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable buffers for converting text into glyph runs.

use core::ops::{Deref, DerefMut};

use parking_lot::{Mutex, MutexGuard};
use smallvec::SmallVec;

use crate::error::FontError;
use crate::font::{Font, GlyphId};
use crate::traverse::GlyphRun;

/// Glyphs of a piece of text, split into lines.
#[derive(Default, Debug)]
pub(crate) struct TextBuffer {
    glyphs: Vec<GlyphId>,
    line_starts: SmallVec<[usize; 4]>,
}

impl TextBuffer {
    /// Maps `text` through `font`, replacing the previous contents.
    ///
    /// `'\n'` starts a new line. Characters without a glyph become
    /// [`GlyphId::NOTDEF`].
    pub(crate) fn load(&mut self, font: &dyn Font, text: &str) -> Result<(), FontError> {
        self.glyphs.clear();
        self.line_starts.clear();
        self.line_starts.push(0);
        for ch in text.chars() {
            if ch == '\n' {
                self.line_starts.push(self.glyphs.len());
            } else {
                self.glyphs
                    .push(font.glyph_id(ch)?.unwrap_or(GlyphId::NOTDEF));
            }
        }
        Ok(())
    }

    pub(crate) fn run(&self) -> GlyphRun<'_> {
        GlyphRun::new(&self.glyphs, &self.line_starts)
    }
}

/// A single pooled [`TextBuffer`] shared by every call on a renderer.
///
/// When the pooled buffer is busy (another thread is drawing with the same
/// renderer) a fresh buffer is handed out instead of waiting.
#[derive(Default)]
pub(crate) struct ScratchPool {
    shared: Mutex<TextBuffer>,
}

impl ScratchPool {
    pub(crate) fn acquire(&self) -> Scratch<'_> {
        match self.shared.try_lock() {
            Some(guard) => Scratch::Pooled(guard),
            None => {
                log::trace!("scratch buffer busy, allocating a fresh one");
                Scratch::Fresh(TextBuffer::default())
            }
        }
    }
}

impl Clone for ScratchPool {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl core::fmt::Debug for ScratchPool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScratchPool")
            .field("busy", &self.shared.is_locked())
            .finish()
    }
}

/// A borrowed scratch buffer. The pooled buffer is released when this drops.
pub(crate) enum Scratch<'a> {
    Pooled(MutexGuard<'a, TextBuffer>),
    Fresh(TextBuffer),
}

impl Deref for Scratch<'_> {
    type Target = TextBuffer;

    fn deref(&self) -> &TextBuffer {
        match self {
            Self::Pooled(guard) => guard,
            Self::Fresh(buffer) => buffer,
        }
    }
}

impl DerefMut for Scratch<'_> {
    fn deref_mut(&mut self) -> &mut TextBuffer {
        match self {
            Self::Pooled(guard) => guard,
            Self::Fresh(buffer) => buffer,
        }
    }
}
