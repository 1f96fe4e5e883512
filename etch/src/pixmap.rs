// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned pixel buffers implementing [`Surface`].

use peniko::color::Rgba8;

use crate::composite::{blend_alpha, blend_rgba, MixMode, Surface};

/// An 8-bit RGBA pixel buffer, rows top to bottom without padding.
#[derive(Clone, PartialEq, Eq)]
pub struct RgbaPixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaPixmap {
    /// Creates a transparent black pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0; 4])
    }

    /// Creates a pixmap with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        let mut data = vec![0; width as usize * height as usize * 4];
        bytemuck::cast_slice_mut::<u8, [u8; 4]>(&mut data).fill(pixel);
        Self {
            width,
            height,
            data,
        }
    }

    /// Sets every pixel to `pixel`.
    pub fn fill(&mut self, pixel: [u8; 4]) {
        self.pixels_mut().fill(pixel);
    }

    /// The pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the pixmap.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.pixels()[self.index(x, y)]
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.data)
    }

    /// All pixels, row-major, mutably.
    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Surface for RgbaPixmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn blend_row(&mut self, x: u32, y: u32, coverage: &[u8], color: Rgba8, mode: MixMode) {
        let start = self.index(x, y);
        let row = &mut self.pixels_mut()[start..start + coverage.len()];
        for (pixel, &m) in row.iter_mut().zip(coverage) {
            *pixel = blend_rgba(*pixel, color, m, mode);
        }
    }
}

impl core::fmt::Debug for RgbaPixmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RgbaPixmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// An 8-bit alpha-only pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct AlphaPixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaPixmap {
    /// Creates a fully transparent pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    /// Creates a pixmap with every value set to `alpha`.
    pub fn filled(width: u32, height: u32, alpha: u8) -> Self {
        Self {
            width,
            height,
            data: vec![alpha; width as usize * height as usize],
        }
    }

    /// Sets every value to `alpha`.
    pub fn fill(&mut self, alpha: u8) {
        self.data.fill(alpha);
    }

    /// The value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the pixmap.
    pub fn value(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Raw alpha values, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Surface for AlphaPixmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn blend_row(&mut self, x: u32, y: u32, coverage: &[u8], color: Rgba8, mode: MixMode) {
        let start = y as usize * self.width as usize + x as usize;
        let row = &mut self.data[start..start + coverage.len()];
        for (value, &m) in row.iter_mut().zip(coverage) {
            *value = blend_alpha(*value, color.a, m, mode);
        }
    }
}

impl core::fmt::Debug for AlphaPixmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AlphaPixmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
