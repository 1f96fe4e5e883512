// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared glyph mask cache with a byte budget and LRU eviction.
//!
//! A [`MaskCache`] is shared between renderers through an `Arc`, usually by
//! way of a [`CacheHandler`]. All methods take `&self` and are safe to call
//! from many threads at once.

mod handler;
mod key;
mod lru;

use core::fmt::{self, Debug, Formatter};
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::CapacityError;
use crate::mask::GlyphMask;
use lru::LruTable;

pub(crate) use handler::MaskSource;
pub use handler::CacheHandler;
pub use key::GlyphCacheKey;
pub use lru::Insertion;

/// Hit, miss and eviction counters of a [`MaskCache`].
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found a mask.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries dropped to stay within the byte budget.
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit, or 0 before the first lookup.
    #[allow(
        clippy::cast_precision_loss,
        reason = "the ratio is informational"
    )]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A thread-safe, byte-budgeted LRU cache of glyph masks.
///
/// Each entry costs [`GlyphMask::byte_size`] bytes. Occupancy never exceeds
/// the capacity: storing a mask evicts least recently used entries until the
/// new one fits. A mask larger than the whole capacity empties the cache and
/// is not retained.
pub struct MaskCache {
    table: Mutex<LruTable>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl MaskCache {
    /// Creates an empty cache that holds at most `capacity` bytes of masks.
    pub fn new(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError);
        }
        Ok(Self {
            table: Mutex::new(LruTable::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        })
    }

    /// Creates a handler that draws through this cache.
    pub fn handler(self: &Arc<Self>) -> CacheHandler {
        CacheHandler::new(Arc::clone(self))
    }

    /// Looks up a mask, marking it as most recently used on a hit.
    ///
    /// A miss leaves the cache unchanged apart from the statistics.
    pub fn get(&self, key: &GlyphCacheKey) -> Option<GlyphMask> {
        let found = self.table.lock().get(key);
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Stores a mask as the most recently used entry.
    ///
    /// Storing under a key that is already present replaces the old mask.
    pub fn put(&self, key: GlyphCacheKey, mask: GlyphMask) -> Insertion {
        let bytes = mask.byte_size();
        let outcome = self.table.lock().insert(key, mask);
        match outcome {
            Insertion::Stored { evicted } if evicted > 0 => {
                self.evictions.fetch_add(evicted as u64, Ordering::Relaxed);
                log::trace!("evicted {evicted} glyph masks to store {bytes} bytes");
            }
            Insertion::Stored { .. } => {}
            Insertion::TooBig { evicted } => {
                self.evictions.fetch_add(evicted as u64, Ordering::Relaxed);
                log::trace!(
                    "glyph mask of {bytes} bytes exceeds cache capacity, not retained \
                     ({evicted} entries evicted)"
                );
            }
        }
        outcome
    }

    /// Whether a mask is cached for `key`. Does not affect recency or stats.
    pub fn contains(&self, key: &GlyphCacheKey) -> bool {
        self.table.lock().contains(key)
    }

    /// Changes the byte budget, evicting least recently used entries if the
    /// cache no longer fits.
    pub fn resize(&self, capacity: usize) -> Result<(), CapacityError> {
        if capacity == 0 {
            return Err(CapacityError);
        }
        let evicted = self.table.lock().set_capacity(capacity);
        self.evictions.fetch_add(evicted as u64, Ordering::Relaxed);
        log::debug!("glyph mask cache resized to {capacity} bytes, {evicted} entries evicted");
        Ok(())
    }

    /// Drops every entry. The capacity and statistics are kept.
    pub fn clear(&self) {
        let mut table = self.table.lock();
        let dropped = table.len();
        table.clear();
        drop(table);
        log::debug!("glyph mask cache cleared, {dropped} entries dropped");
    }

    /// The byte budget.
    pub fn capacity(&self) -> usize {
        self.table.lock().capacity()
    }

    /// Bytes currently charged against the budget.
    pub fn occupied_bytes(&self) -> usize {
        self.table.lock().occupied()
    }

    /// Number of cached masks.
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    /// Whether the cache holds no masks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of every cached mask, most recently used first. For debugging.
    pub fn keys(&self) -> Vec<GlyphCacheKey> {
        self.table.lock().keys_by_recency()
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Resets the counters without touching the cached masks.
    pub fn clear_stats(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }
}

impl Debug for MaskCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let table = self.table.lock();
        f.debug_struct("MaskCache")
            .field("entries", &table.len())
            .field("occupied", &table.occupied())
            .field("capacity", &table.capacity())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Fixed;
    use crate::font::{FontId, GlyphId};
    use crate::mask::MASK_OVERHEAD_BYTES;
    use crate::quantize::SubpixelOffset;

    fn key(glyph: u32) -> GlyphCacheKey {
        GlyphCacheKey {
            font: FontId::next(),
            rasterizer: 1,
            size: Fixed::from_int(12),
            glyph: GlyphId::new(glyph),
            offset: SubpixelOffset::ZERO,
        }
    }

    fn square(side: u32) -> GlyphMask {
        GlyphMask::new(0, -(side as i32), side, side, vec![200; (side * side) as usize])
    }

    #[test]
    fn cache_rejects_zero_capacity() {
        assert_eq!(MaskCache::new(0).unwrap_err(), CapacityError);
        let cache = MaskCache::new(64).unwrap();
        assert_eq!(cache.resize(0), Err(CapacityError));
        assert_eq!(cache.capacity(), 64);
    }

    #[test]
    fn cache_counts_hits_and_misses() {
        let cache = MaskCache::new(4096).unwrap();
        let k = key(3);
        assert!(cache.get(&k).is_none());
        assert_eq!(cache.put(k, square(4)), Insertion::Stored { evicted: 0 });
        assert_eq!(cache.get(&k), Some(square(4)));
        assert!(cache.contains(&k));

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);

        cache.clear_stats();
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_tracks_occupancy_and_evictions() {
        let entry = mask_cost(10);
        let cache = MaskCache::new(entry * 2).unwrap();
        let (a, b, c) = (key(1), key(2), key(3));
        cache.put(a, square(10));
        cache.put(b, square(10));
        assert_eq!(cache.occupied_bytes(), entry * 2);

        cache.put(c, square(10));
        assert!(!cache.contains(&a));
        assert_eq!(cache.keys(), [c, b]);
        assert_eq!(cache.stats().evictions, 1);
        assert!(cache.occupied_bytes() <= cache.capacity());
    }

    #[test]
    fn cache_too_big_mask_is_not_retained() {
        let cache = MaskCache::new(mask_cost(4)).unwrap();
        let small = key(1);
        cache.put(small, square(4));
        assert_eq!(
            cache.put(key(2), square(5)),
            Insertion::TooBig { evicted: 1 }
        );
        assert!(cache.is_empty());
        assert!(!cache.contains(&small));
        assert_eq!(cache.occupied_bytes(), 0);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn cache_clear_keeps_capacity() {
        let cache = MaskCache::new(1000).unwrap();
        cache.put(key(1), square(2));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.occupied_bytes(), 0);
        assert_eq!(cache.capacity(), 1000);
    }

    fn mask_cost(side: usize) -> usize {
        side * side + MASK_OVERHEAD_BYTES
    }
}
