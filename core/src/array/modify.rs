//! Mutation: capacity management, insertion, erasure and assignment.
//!
//! Element motion is per-slot relocation. Opening a gap shifts the suffix
//! right starting from the highest index; closing one shifts it left starting
//! from the lowest, so a slot is never overwritten before it has moved.

use core::mem;
use core::ptr;

use allocator_api2::alloc::Allocator;
use contig_raw_slots::relocate;

use super::{DynArray, count_range};
use crate::cursor::{Access, SlotCursor};
use crate::error::{Error, Result, report};

impl<T, A: Allocator> DynArray<T, A> {
    /// Ensures room for at least `n` elements.
    ///
    /// No-op when `n <= capacity()`. Otherwise reallocates to exactly `n`
    /// slots, which invalidates every cursor and reference into the array.
    /// Never changes the length or the elements.
    pub fn reserve(&mut self, n: usize) -> Result<()> {
        if n <= self.capacity() {
            return Ok(());
        }
        let max = self.max_size();
        if n > max {
            return Err(report(Error::CapacityExceeded { requested: n, max }));
        }
        self.reallocate(n)
    }

    fn reallocate(&mut self, new_cap: usize) -> Result<()> {
        tracing::trace!(
            len = self.len,
            old_capacity = self.capacity(),
            new_capacity = new_cap,
            "reallocating storage"
        );
        let len = self.len;
        self.buf
            .try_reallocate(new_cap, |old, new| {
                for i in 0..len {
                    // SAFETY: old[i] is live, new[i] is fresh; relocation cannot panic.
                    unsafe { relocate(old.add(i), new.add(i)) };
                }
            })
            .map_err(report)
    }

    /// Capacity after one geometric growth step: `max(1, 2 * capacity())`,
    /// capped at `max_size()`.
    fn grown_capacity(&self) -> Result<usize> {
        let cap = self.capacity();
        let max = self.max_size();
        let grown = if cap == 0 { 1 } else { cap.saturating_mul(2).min(max) };
        if grown <= cap {
            return Err(report(Error::CapacityExceeded {
                requested: cap.saturating_add(1),
                max,
            }));
        }
        Ok(grown)
    }

    /// Appends `value`, doubling the capacity first when the array is full.
    ///
    /// Only a growing push invalidates cursors.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.len == self.capacity() {
            let grown = self.grown_capacity()?;
            self.reserve(grown)?;
        }
        // SAFETY: len < capacity, slot `len` is uninitialized.
        unsafe { self.buf.init(self.len, value) };
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element. Never reallocates.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was the last live one and is no longer counted.
        Some(unsafe { self.buf.take(self.len) })
    }

    /// Destroys the elements from `n` on, highest index first. Keeps capacity.
    pub fn truncate(&mut self, n: usize) {
        while self.len > n {
            self.len -= 1;
            // SAFETY: slot `len` was live and is no longer counted.
            unsafe { self.buf.finalize(self.len) };
        }
    }

    /// Destroys every element. Keeps capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes to `n` elements, appending copies of `value` when growing.
    ///
    /// Shrinking never reallocates. Growing behaves like
    /// [`insert_fill`](Self::insert_fill) at `end()`.
    pub fn resize(&mut self, n: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        let max = self.max_size();
        if n > max {
            return Err(report(Error::CapacityExceeded { requested: n, max }));
        }
        if n <= self.len {
            self.truncate(n);
            return Ok(());
        }
        let extra = n - self.len;
        self.insert_with(self.len, extra, core::iter::repeat_n(value, extra))
    }

    /// [`resize`](Self::resize) with `T::default()`.
    pub fn resize_default(&mut self, n: usize) -> Result<()>
    where
        T: Clone + Default,
    {
        self.resize(n, T::default())
    }

    // --- Insertion ---

    /// Inserts `value` before `position` and returns a cursor to it.
    ///
    /// Reallocates to exactly `len() + 1` slots when the array is full, which
    /// invalidates every cursor. Otherwise cursors at or after `position` keep
    /// their offsets and so name different elements.
    pub fn insert<M: Access>(
        &mut self,
        position: SlotCursor<T, M>,
        value: T,
    ) -> Result<SlotCursor<T>> {
        let index = self.locate(position);
        self.insert_with(index, 1, core::iter::once(value))?;
        Ok(self.cursor_at(index))
    }

    /// Inserts `n` copies of `value` before `position` and returns a cursor to
    /// the first of them (or `position`'s slot when `n == 0`).
    pub fn insert_fill<M: Access>(
        &mut self,
        position: SlotCursor<T, M>,
        n: usize,
        value: T,
    ) -> Result<SlotCursor<T>>
    where
        T: Clone,
    {
        let index = self.locate(position);
        self.insert_with(index, n, core::iter::repeat_n(value, n))?;
        Ok(self.cursor_at(index))
    }

    /// Inserts the elements of a multi-pass `range` before `position`.
    ///
    /// The range is counted first so the array grows at most once. Panics
    /// when it then yields fewer elements than counted.
    pub fn insert_range<M, I>(
        &mut self,
        position: SlotCursor<T, M>,
        range: I,
    ) -> Result<SlotCursor<T>>
    where
        M: Access,
        I: IntoIterator<Item = T>,
        I::IntoIter: Clone,
    {
        let index = self.locate(position);
        let iter = range.into_iter();
        let n = count_range(&iter);
        self.insert_with(index, n, iter)?;
        Ok(self.cursor_at(index))
    }

    /// Inserts exactly `count` items from `items` at slot `index`.
    ///
    /// Strong guarantee: on error or on a panic from `items` the array is left
    /// exactly as it was.
    fn insert_with<I>(&mut self, index: usize, count: usize, items: I) -> Result<()>
    where
        I: Iterator<Item = T>,
    {
        debug_assert!(index <= self.len);
        if count == 0 {
            return Ok(());
        }
        let len = self.len;
        let max = self.max_size();
        let new_len = match len.checked_add(count) {
            Some(new_len) if new_len <= max => new_len,
            _ => {
                return Err(report(Error::CapacityExceeded {
                    requested: len.saturating_add(count),
                    max,
                }));
            }
        };

        if new_len <= self.capacity() {
            let base = self.buf.as_mut_ptr();
            // SAFETY: slots [len, new_len) are spare capacity. Moving the
            // suffix highest-first never overwrites a slot that has not moved.
            unsafe {
                for i in (index..len).rev() {
                    relocate(base.add(i), base.add(i + count));
                }
            }
            let mut gap = Gap {
                base,
                index,
                count,
                tail: len - index,
                filled: 0,
            };
            // SAFETY: the gap [index, index + count) is uninitialized.
            unsafe { gap.fill(items) };
            mem::forget(gap);
        } else {
            tracing::trace!(
                len,
                old_capacity = self.capacity(),
                new_capacity = new_len,
                "reallocating storage for insert"
            );
            self.buf
                .try_reallocate(new_len, |old, new| {
                    // New elements go first: until they all exist the old
                    // region is untouched and still owns everything.
                    let mut gap = Gap {
                        base: new,
                        index,
                        count,
                        tail: 0,
                        filled: 0,
                    };
                    // SAFETY: the fresh region is entirely uninitialized.
                    unsafe { gap.fill(items) };
                    mem::forget(gap);
                    // SAFETY: relocation cannot panic; every old slot moves once.
                    unsafe {
                        for i in 0..index {
                            relocate(old.add(i), new.add(i));
                        }
                        for i in (index..len).rev() {
                            relocate(old.add(i), new.add(i + count));
                        }
                    }
                })
                .map_err(report)?;
        }
        self.len = new_len;
        Ok(())
    }

    // --- Erasure ---

    /// Removes the element at `position` and returns a cursor to the element
    /// that takes its slot (`end()` when the last element was removed).
    ///
    /// Never reallocates. Panics when `position` is `end()` or does not
    /// address this array.
    pub fn erase<M: Access>(&mut self, position: SlotCursor<T, M>) -> SlotCursor<T> {
        let first = self.resolve(position);
        self.erase_slots(first, first + 1);
        self.cursor_at(first)
    }

    /// Removes `[first, last)` and returns a cursor to the slot `first` held.
    pub fn erase_range<M: Access, N: Access>(
        &mut self,
        first: SlotCursor<T, M>,
        last: SlotCursor<T, N>,
    ) -> SlotCursor<T> {
        let start = self.locate(first);
        let end = self.locate(last);
        assert!(start <= end, "erase range ends before it starts");
        self.erase_slots(start, end);
        self.cursor_at(start)
    }

    fn erase_slots(&mut self, first: usize, last: usize) {
        let len = self.len;
        let removed = last - first;
        if removed == 0 {
            return;
        }
        // A panicking destructor leaks the suffix instead of dropping it twice.
        self.len = first;
        let base = self.buf.as_mut_ptr();
        // SAFETY: [first, last) is live and destroyed once; the suffix then
        // moves lowest-first into slots that are already vacated.
        unsafe {
            for i in first..last {
                ptr::drop_in_place(base.add(i));
            }
            for i in last..len {
                relocate(base.add(i), base.add(i - removed));
            }
        }
        self.len = len - removed;
    }

    // --- Whole-array operations ---

    /// Exchanges contents, capacity and allocation strategy with `other` in
    /// O(1). Cursors follow their storage to the other array.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Replaces the contents with copies of `source`'s elements.
    pub fn assign_from<B: Allocator>(&mut self, source: &DynArray<T, B>) -> Result<()>
    where
        T: Clone,
    {
        self.assign_range(source.iter().cloned())
    }

    /// Replaces the contents with the elements of a multi-pass `range`.
    ///
    /// Room for the new contents is reserved before anything is destroyed, so
    /// an error leaves the array unchanged.
    pub fn assign_range<I>(&mut self, range: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Clone,
    {
        let iter = range.into_iter();
        let n = count_range(&iter);
        self.reserve(n)?;
        self.clear();
        self.insert_with(0, n, iter)
    }

    /// Replaces the contents with `n` copies of `value`.
    pub fn assign_fill(&mut self, n: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        self.reserve(n)?;
        self.clear();
        self.insert_with(0, n, core::iter::repeat_n(value, n))
    }
}

/// Exchanges the contents of two arrays.
pub fn swap<T, A: Allocator>(a: &mut DynArray<T, A>, b: &mut DynArray<T, A>) {
    a.swap(b);
}

/// The open gap `[index, index + count)` of a region while it is filled.
///
/// Dropped only when filling unwinds: it destroys what was constructed and, for
/// an in-place insert, moves the `tail` suffix back down over the gap.
struct Gap<T> {
    base: *mut T,
    index: usize,
    count: usize,
    tail: usize,
    filled: usize,
}

impl<T> Gap<T> {
    /// # Safety
    ///
    /// The `count` slots from `index` are uninitialized.
    unsafe fn fill(&mut self, mut items: impl Iterator<Item = T>) {
        while self.filled < self.count {
            let item = items
                .next()
                .expect("range yielded fewer elements than it counted");
            unsafe { ptr::write(self.base.add(self.index + self.filled), item) };
            self.filled += 1;
        }
    }
}

impl<T> Drop for Gap<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `filled` slots of the gap are live, and the tail sits
        // right after the gap.
        unsafe {
            for i in 0..self.filled {
                ptr::drop_in_place(self.base.add(self.index + i));
            }
            for i in 0..self.tail {
                let from = self.index + self.count + i;
                relocate(self.base.add(from), self.base.add(self.index + i));
            }
        }
    }
}
