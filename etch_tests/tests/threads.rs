// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;
use std::thread;

use etch::{Fixed, GlyphCacheKey, GlyphId, GlyphMask, MaskCache, Quantization, SubpixelOffset};
use etch_dev::{BlockFont, BoxRasterizer, SAMPLES};

use crate::util::{cached_renderer, render};

#[test]
fn threads_share_one_cache() {
    let capacity = 2048;
    let (renderer, cache) = cached_renderer(14, capacity);
    let mut direct = renderer.clone();
    direct.set_cache_handler(None);
    let expected: Vec<_> = SAMPLES
        .iter()
        .map(|sample| render(&direct, sample.text).0)
        .collect();

    thread::scope(|scope| {
        for worker in 0..4 {
            let mut renderer = renderer.clone();
            let expected = &expected;
            let cache = &cache;
            scope.spawn(move || {
                if worker % 2 == 1 {
                    renderer.set_quantization(Quantization::Vertical);
                }
                for round in 0..8 {
                    let index = (worker + round) % SAMPLES.len();
                    let (pixels, _) = render(&renderer, SAMPLES[index].text);
                    if worker % 2 == 0 {
                        assert!(pixels.data() == expected[index].data());
                    }
                    assert!(cache.occupied_bytes() <= capacity);
                }
            });
        }
    });

    assert!(cache.occupied_bytes() <= capacity);
    let stats = cache.stats();
    assert!(stats.hits + stats.misses > 0);
}

#[test]
fn threads_hammer_get_and_put() {
    let font = BlockFont::new();
    let cache = Arc::new(MaskCache::new(10_000).unwrap());
    let size = Fixed::from_int(12);
    let glyphs: Vec<_> = (1..=94).map(GlyphId::new).collect();

    thread::scope(|scope| {
        for worker in 0..4_u32 {
            let cache = Arc::clone(&cache);
            let (font, glyphs) = (&font, &glyphs);
            scope.spawn(move || {
                for (i, &glyph) in glyphs.iter().enumerate().skip(worker as usize) {
                    let key =
                        GlyphCacheKey::new(font, &BoxRasterizer, size, glyph, SubpixelOffset::ZERO);
                    if cache.get(&key).is_none() {
                        let side = 8 + (i as u32 % 5) * 4;
                        let data = vec![u8::MAX; (side * side) as usize];
                        let mask = GlyphMask::new(0, 0, side, side, data);
                        cache.put(key, mask);
                    }
                    assert!(cache.occupied_bytes() <= cache.capacity());
                }
            });
        }
    });

    assert!(cache.occupied_bytes() <= 10_000);
    assert!(cache.stats().evictions > 0);
}
