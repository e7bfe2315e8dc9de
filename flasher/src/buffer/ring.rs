/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Unsynchronized fixed-capacity circular store.
//!
//! Private to [`buffer`](super): only [`SafeBuffer`](super::SafeBuffer) ever
//! touches it, and only while holding its mutex after the slot semaphore has
//! been taken.  Nothing here blocks or validates.

pub(super) struct RingStore<T> {
    slots: Box<[T]>,
    write_idx: usize,
    read_idx: usize,
    /// Occupancy, kept only to assert the capacity invariant.
    len: usize,
}

impl<T: Copy + Default> RingStore<T> {
    /// `capacity` must be non-zero; `SafeBuffer::new` checks this.
    pub(super) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            slots: vec![T::default(); capacity].into_boxed_slice(),
            write_idx: 0,
            read_idx: 0,
            len: 0,
        }
    }

    /// Copy `item` into the slot at the write cursor and advance it.
    pub(super) fn write(&mut self, item: T) {
        debug_assert!(self.len < self.slots.len(), "ring store overrun");
        self.slots[self.write_idx] = item;
        self.write_idx = (self.write_idx + 1) % self.slots.len();
        self.len += 1;
    }

    /// Copy the slot at the read cursor out and advance it.
    pub(super) fn read(&mut self) -> T {
        debug_assert!(self.len > 0, "ring store underrun");
        let item = self.slots[self.read_idx];
        self.read_idx = (self.read_idx + 1) % self.slots.len();
        self.len -= 1;
        item
    }

    pub(super) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(super) fn len(&self) -> usize {
        self.len
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_back_in_write_order() {
        let mut ring = RingStore::<u32>::new(4);
        for i in 0..4 {
            ring.write(i);
        }
        assert_eq!(ring.len(), 4);
        for i in 0..4 {
            assert_eq!(ring.read(), i);
        }
        assert_eq!(ring.len(), 0);
    }

    #[test]
    fn cursors_wrap_around() {
        let mut ring = RingStore::<u32>::new(3);
        // Fill and drain several times so both cursors cross the end.
        for round in 0..5 {
            for i in 0..3 {
                ring.write(round * 10 + i);
            }
            for i in 0..3 {
                assert_eq!(ring.read(), round * 10 + i);
            }
        }
    }

    #[test]
    fn interleaved_write_read_keeps_order() {
        let mut ring = RingStore::<u32>::new(2);
        ring.write(1);
        ring.write(2);
        assert_eq!(ring.read(), 1);
        ring.write(3);
        assert_eq!(ring.read(), 2);
        assert_eq!(ring.read(), 3);
    }

    #[test]
    fn capacity_is_fixed_at_construction() {
        let ring = RingStore::<u8>::new(6);
        assert_eq!(ring.capacity(), 6);
    }

    #[test]
    #[should_panic(expected = "overrun")]
    #[cfg(debug_assertions)]
    fn writing_into_full_store_trips_debug_assert() {
        let mut ring = RingStore::<u8>::new(1);
        ring.write(1);
        ring.write(2);
    }
}
