// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Byte-budgeted least-recently-used table.
//!
//! Entries live in a slot arena and are threaded onto an intrusive doubly
//! linked recency list by index, so lookups, promotions and evictions are all
//! O(1) without reference-counted nodes.

use hashbrown::HashMap;

use super::key::GlyphCacheKey;
use crate::mask::GlyphMask;

/// Sentinel index for "no slot".
const NIL: u32 = u32::MAX;

/// Result of offering a mask to the cache.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Insertion {
    /// The mask was stored. `evicted` older entries were dropped to make room.
    Stored {
        /// Number of entries evicted to make room.
        evicted: usize,
    },
    /// The mask alone exceeds the capacity and was not retained.
    ///
    /// Making room for it emptied the cache first, so `evicted` counts every
    /// entry that was held. This is not an error; the caller still has the
    /// mask.
    TooBig {
        /// Number of entries evicted while trying to make room.
        evicted: usize,
    },
}

struct Slot {
    key: GlyphCacheKey,
    mask: GlyphMask,
    bytes: usize,
    /// Towards the most recently used end.
    prev: u32,
    /// Towards the least recently used end.
    next: u32,
}

pub(crate) struct LruTable {
    index: HashMap<GlyphCacheKey, u32>,
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Most recently used slot.
    head: u32,
    /// Least recently used slot; the next eviction victim.
    tail: u32,
    occupied: usize,
    capacity: usize,
}

impl LruTable {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            occupied: 0,
            capacity,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn contains(&self, key: &GlyphCacheKey) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up a mask, marking it as the most recently used on a hit.
    pub(crate) fn get(&mut self, key: &GlyphCacheKey) -> Option<GlyphMask> {
        let idx = *self.index.get(key)?;
        self.promote(idx);
        Some(self.slots[idx as usize].mask.clone())
    }

    /// Stores a mask as the most recently used entry, evicting least recently
    /// used entries until it fits.
    pub(crate) fn insert(&mut self, key: GlyphCacheKey, mask: GlyphMask) -> Insertion {
        let bytes = mask.byte_size();
        if bytes > self.capacity {
            return Insertion::TooBig {
                evicted: self.evict_to(0),
            };
        }

        if let Some(&idx) = self.index.get(&key) {
            // Masks are deterministic per key, but a caller may still offer a
            // replacement; account for its size.
            let slot = &mut self.slots[idx as usize];
            self.occupied = self.occupied - slot.bytes + bytes;
            slot.bytes = bytes;
            slot.mask = mask;
            self.promote(idx);
            let evicted = self.evict_to(self.capacity);
            return Insertion::Stored { evicted };
        }

        let evicted = self.evict_to(self.capacity - bytes);
        let idx = self.alloc(Slot {
            key,
            mask,
            bytes,
            prev: NIL,
            next: NIL,
        });
        self.push_front(idx);
        self.index.insert(key, idx);
        self.occupied += bytes;
        debug_assert!(
            self.occupied <= self.capacity,
            "cache occupancy exceeded its capacity"
        );
        Insertion::Stored { evicted }
    }

    /// Changes the capacity, evicting as needed. Returns the number of evictions.
    pub(crate) fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;
        self.evict_to(capacity)
    }

    pub(crate) fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.occupied = 0;
    }

    /// Keys from most to least recently used.
    pub(crate) fn keys_by_recency(&self) -> Vec<GlyphCacheKey> {
        let mut keys = Vec::with_capacity(self.len());
        let mut idx = self.head;
        while idx != NIL {
            let slot = &self.slots[idx as usize];
            keys.push(slot.key);
            idx = slot.next;
        }
        keys
    }

    /// Evicts least recently used entries until occupancy is at most `limit`.
    fn evict_to(&mut self, limit: usize) -> usize {
        let mut evicted = 0;
        while self.occupied > limit && self.tail != NIL {
            let idx = self.tail;
            self.unlink(idx);
            let slot = &mut self.slots[idx as usize];
            self.occupied -= slot.bytes;
            slot.bytes = 0;
            // Release the pixel data now; the slot itself is recycled later.
            let mask = core::mem::take(&mut slot.mask);
            self.index.remove(&slot.key);
            self.free.push(idx);
            drop(mask);
            evicted += 1;
        }
        evicted
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "a cache holding four billion masks is not a supported configuration"
    )]
    fn alloc(&mut self, slot: Slot) -> u32 {
        if let Some(idx) = self.free.pop() {
            self.slots[idx as usize] = slot;
            idx
        } else {
            self.slots.push(slot);
            (self.slots.len() - 1) as u32
        }
    }

    fn promote(&mut self, idx: u32) {
        if self.head != idx {
            self.unlink(idx);
            self.push_front(idx);
        }
    }

    fn push_front(&mut self, idx: u32) {
        let old_head = self.head;
        {
            let slot = &mut self.slots[idx as usize];
            slot.prev = NIL;
            slot.next = old_head;
        }
        if old_head != NIL {
            self.slots[old_head as usize].prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
    }

    fn unlink(&mut self, idx: u32) {
        let (prev, next) = {
            let slot = &self.slots[idx as usize];
            (slot.prev, slot.next)
        };
        if prev != NIL {
            self.slots[prev as usize].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.slots[next as usize].prev = prev;
        } else {
            self.tail = prev;
        }
        let slot = &mut self.slots[idx as usize];
        slot.prev = NIL;
        slot.next = NIL;
    }
}
