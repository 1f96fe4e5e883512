// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use etch::{CacheStats, Fixed, FixedPoint, Quantization, RgbaPixmap};
use etch_dev::{BlockFont, SAMPLES};

use crate::util::{block_renderer, cached_renderer, glyphs_of, render, WHITE};

#[test]
fn cache_serves_repeated_glyphs() {
    let (renderer, cache) = cached_renderer(16, 1 << 20);
    render(&renderer, "hey ho");
    // h, e, y, space and o.
    assert_eq!(cache.len(), 5);
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            misses: 5,
            evictions: 0
        }
    );

    render(&renderer, "hey ho");
    assert_eq!(cache.len(), 5);
    assert_eq!(cache.stats().hits, 7);
    assert_eq!(cache.stats().misses, 5);

    cache.clear_stats();
    assert_eq!(cache.stats(), CacheStats::default());
    assert_eq!(cache.len(), 5);
}

#[test]
fn cache_stays_within_budget() {
    let capacity = 1500;
    let (renderer, cache) = cached_renderer(20, capacity);
    for sample in SAMPLES {
        render(&renderer, sample.text);
        assert!(cache.occupied_bytes() <= capacity, "{}", sample.name);
    }
    assert!(cache.stats().evictions > 0);
    assert!(!cache.is_empty());
}

#[test]
fn cache_evicts_least_recently_used() {
    let (renderer, cache) = cached_renderer(16, 1 << 20);
    let [a, b] = glyphs_of(&renderer, "ab")[..] else {
        unreachable!()
    };
    render(&renderer, "a");
    let cost_a = cache.occupied_bytes();
    render(&renderer, "b");
    render(&renderer, "a");
    let recency: Vec<_> = cache.keys().iter().map(|key| key.glyph).collect();
    assert_eq!(recency, [a, b]);

    cache.resize(cost_a).unwrap();
    let recency: Vec<_> = cache.keys().iter().map(|key| key.glyph).collect();
    assert_eq!(recency, [a]);
    assert_eq!(cache.occupied_bytes(), cost_a);
    assert_eq!(cache.stats().evictions, 1);
    assert!(cache.resize(0).is_err());
}

#[test]
fn cache_too_big_masks_are_not_retained() {
    // Only the empty space mask fits.
    let (renderer, cache) = cached_renderer(16, etch::MASK_OVERHEAD_BYTES + 1);
    let mut direct = renderer.clone();
    direct.set_cache_handler(None);

    let (cached_pixels, _) = render(&renderer, "hey ho");
    let (direct_pixels, _) = render(&direct, "hey ho");
    assert!(cached_pixels.data() == direct_pixels.data());

    // The space was stored after "hey", then flushed out by the second "h".
    assert!(cache.is_empty());
    assert_eq!(cache.stats().evictions, 1);

    render(&renderer, "  ");
    let space = glyphs_of(&renderer, " ")[0];
    let keys = cache.keys();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].glyph, space);
}

#[test]
fn cache_bypass_leaves_cache_untouched() {
    let (mut renderer, cache) = cached_renderer(16, 1 << 20);
    renderer.cache_handler_mut().unwrap().set_bypass(true);
    assert!(renderer.cache_handler().unwrap().is_bypassed());

    let (bypassed, _) = render(&renderer, "for lack of better words");
    assert!(cache.is_empty());
    assert_eq!(cache.stats(), CacheStats::default());

    renderer.cache_handler_mut().unwrap().set_bypass(false);
    let (cached, _) = render(&renderer, "for lack of better words");
    assert!(!cache.is_empty());
    assert!(bypassed.data() == cached.data());
}

#[test]
fn cache_keys_follow_subpixel_offsets() {
    let (mut renderer, cache) = cached_renderer(16, 1 << 20);
    renderer.set_quantization(Quantization::None);
    let mut canvas = RgbaPixmap::filled(32, 32, WHITE);
    for step in 0..4 {
        let x = Fixed::from_bits(4 * 64 + step * 16);
        let y = Fixed::from_int(20);
        renderer.draw_at(&mut canvas, "o", FixedPoint::new(x, y)).unwrap();
    }
    assert_eq!(cache.len(), 4);
    let mut buckets: Vec<_> = cache.keys().iter().map(|key| key.offset.x_bucket()).collect();
    buckets.sort_unstable();
    assert_eq!(buckets, [0, 1, 2, 3]);

    // Positions in the same bucket share an entry.
    let nudged = FixedPoint::new(Fixed::from_bits(4 * 64 + 3), Fixed::from_int(20));
    renderer.draw_at(&mut canvas, "o", nudged).unwrap();
    assert_eq!(cache.len(), 4);
}

#[test]
fn cache_keys_follow_size_and_font() {
    let (mut renderer, cache) = cached_renderer(16, 1 << 20);
    render(&renderer, "o");
    renderer.set_size_px(17);
    render(&renderer, "o");
    assert_eq!(cache.len(), 2);

    renderer.set_font(Arc::new(BlockFont::new()));
    render(&renderer, "o");
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.stats().hits, 0);
}

#[test]
fn cache_shared_between_renderers() {
    let (first, cache) = cached_renderer(16, 1 << 20);
    let second = first.clone();
    render(&first, "hey ho");
    let misses = cache.stats().misses;
    render(&second, "hey ho");
    assert_eq!(cache.stats().misses, misses);

    let mut third = block_renderer(16);
    third.set_font(Arc::clone(first.font().unwrap()));
    third.set_cache_handler(Some(cache.handler()));
    render(&third, "oh hey");
    assert_eq!(cache.stats().misses, misses);
}

#[test]
fn cache_clear_keeps_capacity() {
    let (renderer, cache) = cached_renderer(16, 4096);
    render(&renderer, "hey ho");
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.occupied_bytes(), 0);
    assert_eq!(cache.capacity(), 4096);
    render(&renderer, "hey ho");
    assert!(!cache.is_empty());
}
