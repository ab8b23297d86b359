//! Random access cursor over the slots of a [`DynArray`](crate::DynArray).
//!
//! A `SlotCursor` is the address of one slot, kept as the identity of the
//! storage region it was issued from plus a signed slot offset. It does not
//! own or borrow memory, so it survives mutation of the array. Whether it is
//! still meaningful follows the invalidation rules of the array:
//!
//! - reallocation gives the array a new region; older cursors stop resolving
//!   and dereferencing them panics,
//! - a non-reallocating insert or erase keeps the region, so cursors at or
//!   after the affected position now name different elements,
//! - `swap` moves the region, and with it the cursors, to the other array.
//!
//! Dereference always goes through the array, which checks the region and the
//! bounds.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use super::{BidirectionalCursor, Cursor, RandomAccessCursor, RandomAccessTag};

mod private {
    pub trait Sealed {}
}

/// What a cursor may do with the element it names.
pub trait Access: private::Sealed + 'static {}

/// Grants read and write access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mutable;

/// Grants read access only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadOnly;

impl private::Sealed for Mutable {}
impl private::Sealed for ReadOnly {}
impl Access for Mutable {}
impl Access for ReadOnly {}

/// Position of one slot of a contiguous region.
pub struct SlotCursor<T, M: Access = Mutable> {
    region: usize,
    offset: isize,
    _marker: PhantomData<(fn() -> T, M)>,
}

/// A cursor that only reads.
pub type ConstCursor<T> = SlotCursor<T, ReadOnly>;

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
static_assertions::assert_eq_size!(SlotCursor<u64>, [usize; 2]);

impl<T, M: Access> SlotCursor<T, M> {
    pub(crate) const fn new(region: usize, offset: isize) -> Self {
        SlotCursor {
            region,
            offset,
            _marker: PhantomData,
        }
    }

    /// Slot offset from the start of the region.
    #[inline(always)]
    pub fn offset_from_start(&self) -> isize {
        self.offset
    }

    #[inline(always)]
    pub(crate) fn region(&self) -> usize {
        self.region
    }

    /// Same position with read-only access.
    pub fn as_const(self) -> ConstCursor<T> {
        SlotCursor::new(self.region, self.offset)
    }
}

impl<T> From<SlotCursor<T, Mutable>> for SlotCursor<T, ReadOnly> {
    fn from(cursor: SlotCursor<T, Mutable>) -> Self {
        cursor.as_const()
    }
}

// --- Manual impls to avoid bounds on T ---

impl<T, M: Access> Clone for SlotCursor<T, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, M: Access> Copy for SlotCursor<T, M> {}

impl<T, M: Access> Default for SlotCursor<T, M> {
    fn default() -> Self {
        SlotCursor::new(0, 0)
    }
}

impl<T, M: Access> fmt::Debug for SlotCursor<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotCursor")
            .field("region", &format_args!("{:#x}", self.region))
            .field("offset", &self.offset)
            .finish()
    }
}

impl<T, M: Access> Hash for SlotCursor<T, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.region.hash(state);
        self.offset.hash(state);
    }
}

// --- Comparison: by address ---

impl<T, M: Access, N: Access> PartialEq<SlotCursor<T, N>> for SlotCursor<T, M> {
    fn eq(&self, other: &SlotCursor<T, N>) -> bool {
        self.region == other.region && self.offset == other.offset
    }
}

impl<T, M: Access> Eq for SlotCursor<T, M> {}

/// Cursors into different regions are unordered.
impl<T, M: Access, N: Access> PartialOrd<SlotCursor<T, N>> for SlotCursor<T, M> {
    fn partial_cmp(&self, other: &SlotCursor<T, N>) -> Option<Ordering> {
        if self.region != other.region {
            return None;
        }
        Some(self.offset.cmp(&other.offset))
    }
}

// --- Arithmetic ---

impl<T, M: Access> Add<isize> for SlotCursor<T, M> {
    type Output = Self;

    fn add(self, n: isize) -> Self {
        SlotCursor::new(self.region, self.offset + n)
    }
}

impl<T, M: Access> Add<SlotCursor<T, M>> for isize {
    type Output = SlotCursor<T, M>;

    fn add(self, cursor: SlotCursor<T, M>) -> SlotCursor<T, M> {
        cursor + self
    }
}

impl<T, M: Access> Sub<isize> for SlotCursor<T, M> {
    type Output = Self;

    fn sub(self, n: isize) -> Self {
        SlotCursor::new(self.region, self.offset - n)
    }
}

impl<T, M: Access> AddAssign<isize> for SlotCursor<T, M> {
    fn add_assign(&mut self, n: isize) {
        self.offset += n;
    }
}

impl<T, M: Access> SubAssign<isize> for SlotCursor<T, M> {
    fn sub_assign(&mut self, n: isize) {
        self.offset -= n;
    }
}

/// Distance in slots. Both cursors must come from the same region.
impl<T, M: Access, N: Access> Sub<SlotCursor<T, N>> for SlotCursor<T, M> {
    type Output = isize;

    fn sub(self, origin: SlotCursor<T, N>) -> isize {
        debug_assert_eq!(self.region, origin.region, "cursors from different regions");
        self.offset - origin.offset
    }
}

// --- Cursor traits ---

impl<T, M: Access> Cursor for SlotCursor<T, M> {
    type Category = RandomAccessTag;

    #[inline(always)]
    fn step_forward(&mut self) {
        self.offset += 1;
    }

    /// A reversed range is empty.
    fn distance(self, last: Self) -> usize {
        usize::try_from(last - self).unwrap_or(0)
    }
}

impl<T, M: Access> BidirectionalCursor for SlotCursor<T, M> {
    #[inline(always)]
    fn step_back(&mut self) {
        self.offset -= 1;
    }
}

impl<T, M: Access> RandomAccessCursor for SlotCursor<T, M> {
    #[inline(always)]
    fn advance(&mut self, n: isize) {
        *self += n;
    }

    #[inline(always)]
    fn difference(self, origin: Self) -> isize {
        self - origin
    }
}
