// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use etch::{AlphaPixmap, Fixed, FixedPoint, MixMode};
use etch_dev::SAMPLES;

use crate::util::{
    block_renderer, cached_renderer, canvas_for, glyphs_of, render, ALIGNMENTS, DIRECTIONS,
    QUANTIZATIONS, WHITE,
};

#[test]
fn draw_string_matches_glyph_sequence() {
    for sample in SAMPLES.iter().filter(|s| !s.text.contains('\n')) {
        for direction in DIRECTIONS {
            for quantization in QUANTIZATIONS {
                for (vertical, horizontal) in ALIGNMENTS {
                    let mut renderer = block_renderer(17);
                    renderer.set_direction(direction);
                    renderer.set_quantization(quantization);
                    renderer.set_align(vertical, horizontal);
                    let context = format!(
                        "{}: {direction:?} {quantization:?} {vertical:?} {horizontal:?}",
                        sample.name
                    );

                    let (from_text, text_end) = render(&renderer, sample.text);
                    let (mut from_glyphs, x, y) = canvas_for(&renderer, sample.text);
                    let glyphs = glyphs_of(&renderer, sample.text);
                    let glyphs_end = renderer.draw_glyphs(&mut from_glyphs, &glyphs, x, y).unwrap();

                    assert_eq!(text_end, glyphs_end, "{context}");
                    assert!(from_text.data() == from_glyphs.data(), "{context}");
                    assert!(
                        from_text.pixels().iter().any(|p| *p != WHITE),
                        "{context}: nothing was drawn"
                    );
                }
            }
        }
    }
}

#[test]
fn draw_cached_matches_uncached() {
    for sample in SAMPLES {
        for direction in DIRECTIONS {
            for quantization in QUANTIZATIONS {
                for (vertical, horizontal) in ALIGNMENTS {
                    let (mut cached, _cache) = cached_renderer(15, 1 << 20);
                    cached.set_direction(direction);
                    cached.set_quantization(quantization);
                    cached.set_align(vertical, horizontal);
                    let mut direct = cached.clone();
                    direct.set_cache_handler(None);
                    let context = format!(
                        "{}: {direction:?} {quantization:?} {vertical:?} {horizontal:?}",
                        sample.name
                    );

                    let (expected, expected_end) = render(&direct, sample.text);
                    // Drawing twice serves the second pass entirely from the cache.
                    for _ in 0..2 {
                        let (actual, actual_end) = render(&cached, sample.text);
                        assert_eq!(expected_end, actual_end, "{context}");
                        assert!(expected.data() == actual.data(), "{context}");
                    }
                }
            }
        }
    }
}

#[test]
fn draw_custom_loop_matches_draw() {
    let (mut renderer, _cache) = cached_renderer(20, 1 << 16);
    renderer.set_mix_mode(MixMode::Multiply);
    let text = "VAfo of VA";
    let (expected, expected_end) = render(&renderer, text);

    let (mut canvas, x, y) = canvas_for(&renderer, text);
    let glyphs = glyphs_of(&renderer, text);
    let end = renderer
        .traverse_glyphs(&glyphs, FixedPoint::from_ints(x, y), |dot, glyph| {
            let mask = renderer.load_glyph_mask(glyph, dot)?;
            renderer.draw_mask(&mut canvas, dot, &mask);
            Ok(())
        })
        .unwrap();

    assert_eq!(end, expected_end);
    assert!(canvas.data() == expected.data());
}

#[test]
fn draw_multiline_stacks_lines() {
    let mut renderer = block_renderer(12);
    renderer.set_line_height(Fixed::from_int(16));
    let advance = renderer.line_advance().unwrap();
    assert_eq!(advance, Fixed::from_int(16));
    let mut baselines = Vec::new();
    renderer
        .traverse("ab\ncd\n\nef", FixedPoint::from_ints(0, 0), |dot, _| {
            if !baselines.contains(&dot.y) {
                baselines.push(dot.y);
            }
            Ok(())
        })
        .unwrap();
    // The empty third line emits no glyphs but still takes up space.
    assert_eq!(baselines.len(), 3);
    assert_eq!(baselines[1] - baselines[0], advance);
    assert_eq!(baselines[2] - baselines[1], advance.mul_int(2));
}

#[test]
fn draw_onto_alpha_surface() {
    let (renderer, cache) = cached_renderer(16, 1 << 16);
    let mut target = AlphaPixmap::new(64, 24);
    renderer.draw(&mut target, "hey ho", 2, 18).unwrap();
    assert!(target.data().iter().any(|&a| a == 255));
    assert!(target.data().iter().any(|&a| a == 0));
    assert!(!cache.is_empty());

    let mut direct = renderer.clone();
    direct.set_cache_handler(None);
    let mut expected = AlphaPixmap::new(64, 24);
    direct.draw(&mut expected, "hey ho", 2, 18).unwrap();
    assert_eq!(target.data(), expected.data());
}

#[test]
fn draw_clips_to_the_surface() {
    let renderer = block_renderer(24);
    let mut target = AlphaPixmap::new(8, 8);
    // Mostly off the surface on every side.
    renderer.draw(&mut target, "OOOO", -20, 4).unwrap();
    renderer.draw(&mut target, "OOOO", 4, 40).unwrap();
    renderer.draw(&mut target, "O", -4, 20).unwrap();
}

#[test]
fn draw_far_away_anchors_clamp() {
    let renderer = block_renderer(16);
    let mut target = AlphaPixmap::new(16, 16);

    let end = renderer.draw(&mut target, "hey", 33_554_431, 4).unwrap();
    assert_eq!(end.x, Fixed::MAX);
    let end = renderer.draw(&mut target, "hey", 40_000_000, 4).unwrap();
    assert_eq!(end.x, Fixed::MAX);
    let end = renderer.draw(&mut target, "hey", i32::MIN, i32::MIN).unwrap();
    assert!(end.x < Fixed::ZERO);
    assert_eq!(end.y, Fixed::MIN);

    let mut rtl = renderer.clone();
    rtl.set_direction(etch::Direction::RightToLeft);
    let end = rtl.draw(&mut target, "hey", i32::MIN, 4).unwrap();
    assert_eq!(end.x, Fixed::MIN);

    // Nothing wrapped around onto the surface.
    assert!(target.data().iter().all(|&a| a == 0));
}
