//! The dynamic array: a growable contiguous sequence over a pluggable
//! allocation strategy.
//!
//! # Representation
//!
//! ```text
//! DynArray<T, A>:  buf.ptr ──▶ [ live ... live | uninitialized ... ]
//!                               └──── len ─────┘
//!                               └──────────── buf.cap ──────────────┘
//! ```
//!
//! `len <= capacity` always; slots `[0, len)` hold constructed elements and
//! slots `[len, capacity)` are allocated but uninitialized. The array is the
//! only owner of its region. The region is replaced only by reallocation
//! (`reserve`, growing `push_back`, an `insert` that does not fit), which
//! allocates exactly the requested slot count, relocates the live elements in
//! order and releases the old region.
//!
//! # Cursors
//!
//! [`begin`](DynArray::begin)/[`end`](DynArray::end) hand out
//! [`SlotCursor`]s and [`rbegin`](DynArray::rbegin)/[`rend`](DynArray::rend)
//! their reversed counterparts. Cursors do not borrow the array; reading
//! through one (`array[cursor]`) checks that it still addresses the current
//! region and a live slot, and panics otherwise.

use core::ops::{Index, IndexMut};

use allocator_api2::alloc::{Allocator, Global};
use contig_raw_slots::RawSlots;

use crate::cursor::{
    Access, BidirectionalCursor, ConstCursor, Mutable, ReverseCursor, SlotCursor, Walk,
};
use crate::error::{Error, Result, report};

mod into_iter;
mod modify;
mod traits;

pub use into_iter::IntoIter;
pub use modify::swap;

#[cfg(test)]
mod array_test;

/// A growable contiguous sequence.
///
/// ```
/// use contig_core::DynArray;
///
/// let mut array = DynArray::new();
/// for i in 1..=5 {
///     array.push_back(i).unwrap();
/// }
/// let pos = array.insert(array.begin() + 2, 99).unwrap();
/// assert_eq!(array[pos], 99);
/// assert_eq!(array.as_slice(), &[1, 2, 99, 3, 4, 5]);
/// ```
pub struct DynArray<T, A: Allocator = Global> {
    buf: RawSlots<T, A>,
    len: usize,
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
static_assertions::assert_eq_size!(DynArray<u64>, [usize; 3]);

impl<T> DynArray<T> {
    /// An empty array. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// `n` copies of `value`, in exactly `n` slots.
    pub fn filled(n: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        Self::filled_in(n, value, Global)
    }

    /// The elements of a multi-pass `range`, in exactly as many slots.
    pub fn from_range<I>(range: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Clone,
    {
        Self::from_range_in(range, Global)
    }
}

impl<T, A: Allocator> DynArray<T, A> {
    /// An empty array bound to `alloc`. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        DynArray {
            buf: RawSlots::new_in(alloc),
            len: 0,
        }
    }

    pub fn filled_in(n: usize, value: T, alloc: A) -> Result<Self>
    where
        T: Clone,
    {
        let buf = RawSlots::try_with_capacity_in(n, alloc).map_err(report)?;
        let mut array = DynArray { buf, len: 0 };
        array.construct_tail(core::iter::repeat_n(value, n));
        Ok(array)
    }

    /// Counts `range`, allocates exactly that many slots, then constructs the
    /// elements in order.
    ///
    /// Panics when `range` yields fewer elements than its exact `size_hint`
    /// promised, the same as [`insert_range`](Self::insert_range).
    pub fn from_range_in<I>(range: I, alloc: A) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Clone,
    {
        let iter = range.into_iter();
        let n = count_range(&iter);
        let buf = RawSlots::try_with_capacity_in(n, alloc).map_err(report)?;
        let mut array = DynArray { buf, len: 0 };
        array.construct_tail(iter.take(n));
        assert!(array.len == n, "range yielded fewer elements than it counted");
        Ok(array)
    }

    /// An independent copy with exactly `len()` slots.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
        A: Clone,
    {
        Self::from_range_in(self.iter().cloned(), self.buf.allocator().clone())
    }

    /// Constructs `items` into the uninitialized slots after `len`, growing
    /// `len` one element at a time so a panicking source leaks nothing.
    fn construct_tail(&mut self, items: impl Iterator<Item = T>) {
        for item in items {
            debug_assert!(self.len < self.buf.capacity());
            // SAFETY: callers reserved room for every item; slot `len` is uninitialized.
            unsafe { self.buf.init(self.len, item) };
            self.len += 1;
        }
    }

    // --- Queries ---

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Largest element count the allocation strategy can describe.
    pub fn max_size(&self) -> usize {
        RawSlots::<T, A>::max_capacity()
    }

    /// The allocation strategy.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are live.
        unsafe { self.buf.as_slice(self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots [0, len) are live.
        unsafe { self.buf.as_mut_slice(self.len) }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    // --- Element access ---

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or_else(|| report(Error::IndexOutOfRange { index, len }))
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or_else(|| report(Error::IndexOutOfRange { index, len }))
    }

    /// First element. Panics on an empty array.
    pub fn front(&self) -> &T {
        assert!(!self.is_empty(), "front() called on an empty array");
        &self[0]
    }

    pub fn front_mut(&mut self) -> &mut T {
        assert!(!self.is_empty(), "front_mut() called on an empty array");
        &mut self[0]
    }

    /// Last element. Panics on an empty array.
    pub fn back(&self) -> &T {
        assert!(!self.is_empty(), "back() called on an empty array");
        &self[self.len - 1]
    }

    pub fn back_mut(&mut self) -> &mut T {
        assert!(!self.is_empty(), "back_mut() called on an empty array");
        let last = self.len - 1;
        &mut self[last]
    }

    // --- Cursors ---

    #[inline(always)]
    fn region(&self) -> usize {
        self.buf.region()
    }

    fn cursor_at<M: Access>(&self, index: usize) -> SlotCursor<T, M> {
        // Offsets never exceed `max_size() <= isize::MAX` for sized `T`.
        SlotCursor::new(self.region(), index as isize)
    }

    pub fn begin(&self) -> SlotCursor<T> {
        self.cursor_at(0)
    }

    pub fn end(&self) -> SlotCursor<T> {
        self.cursor_at(self.len)
    }

    pub fn cbegin(&self) -> ConstCursor<T> {
        self.cursor_at(0)
    }

    pub fn cend(&self) -> ConstCursor<T> {
        self.cursor_at(self.len)
    }

    pub fn rbegin(&self) -> ReverseCursor<SlotCursor<T>> {
        ReverseCursor::new(self.end())
    }

    pub fn rend(&self) -> ReverseCursor<SlotCursor<T>> {
        ReverseCursor::new(self.begin())
    }

    pub fn crbegin(&self) -> ReverseCursor<ConstCursor<T>> {
        ReverseCursor::new(self.cend())
    }

    pub fn crend(&self) -> ReverseCursor<ConstCursor<T>> {
        ReverseCursor::new(self.cbegin())
    }

    /// Iterates `[first, last)` of any cursor kind this array can resolve.
    pub fn walk<C>(&self, first: C, last: C) -> Walk<'_, Self, C>
    where
        Self: Index<C>,
    {
        Walk::new(self, first, last)
    }

    /// Slot index of a position in `[begin, end]`. Panics when the cursor
    /// belongs to another region or lies outside that range.
    fn locate<M: Access>(&self, position: SlotCursor<T, M>) -> usize {
        assert_eq!(
            position.region(),
            self.region(),
            "cursor does not address this array's current storage"
        );
        match usize::try_from(position.offset_from_start()) {
            Ok(index) if index <= self.len => index,
            _ => panic!(
                "cursor offset {} is outside an array of size {}",
                position.offset_from_start(),
                self.len
            ),
        }
    }

    /// Slot index of a live element. Panics like [`Self::locate`], and on `end()`.
    fn resolve<M: Access>(&self, cursor: SlotCursor<T, M>) -> usize {
        let index = self.locate(cursor);
        assert!(index < self.len, "cannot dereference the end cursor");
        index
    }
}

/// Element count of a multi-pass range. Walks a copy of it unless the
/// iterator already knows its exact length.
fn count_range<I: Iterator + Clone>(iter: &I) -> usize {
    match iter.size_hint() {
        (lower, Some(upper)) if lower == upper => lower,
        _ => iter.clone().count(),
    }
}

impl<T, A: Allocator> Drop for DynArray<T, A> {
    fn drop(&mut self) {
        self.truncate(0);
    }
}

impl<T, A: Allocator + Default> Default for DynArray<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

// --- Indexing ---

impl<T, A: Allocator> Index<usize> for DynArray<T, A> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T, A: Allocator> IndexMut<usize> for DynArray<T, A> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T, A: Allocator, M: Access> Index<SlotCursor<T, M>> for DynArray<T, A> {
    type Output = T;

    fn index(&self, cursor: SlotCursor<T, M>) -> &T {
        let index = self.resolve(cursor);
        &self.as_slice()[index]
    }
}

/// Only mutable cursors write.
impl<T, A: Allocator> IndexMut<SlotCursor<T, Mutable>> for DynArray<T, A> {
    fn index_mut(&mut self, cursor: SlotCursor<T, Mutable>) -> &mut T {
        let index = self.resolve(cursor);
        &mut self.as_mut_slice()[index]
    }
}

impl<T, A: Allocator, C> Index<ReverseCursor<C>> for DynArray<T, A>
where
    C: BidirectionalCursor,
    Self: Index<C>,
{
    type Output = <Self as Index<C>>::Output;

    fn index(&self, rev: ReverseCursor<C>) -> &Self::Output {
        &self[rev.target()]
    }
}

impl<T, A: Allocator, C> IndexMut<ReverseCursor<C>> for DynArray<T, A>
where
    C: BidirectionalCursor,
    Self: IndexMut<C>,
{
    fn index_mut(&mut self, rev: ReverseCursor<C>) -> &mut Self::Output {
        &mut self[rev.target()]
    }
}
