//! Direction-reversing adaptor over any bidirectional cursor.

use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use super::{BidirectionalCursor, Cursor, Mutable, RandomAccessCursor, ReadOnly, SlotCursor};

/// Walks the positions of its base cursor backwards.
///
/// The stored base always sits one position past the element the adaptor
/// names: `rev` refers to `*(rev.base() - 1)`. That is what lets
/// `ReverseCursor::new(end)` stand for the last element and
/// `ReverseCursor::new(begin)` for one-before-the-first.
///
/// ```
/// use contig_core::DynArray;
///
/// let array = DynArray::from_range([1, 2, 3]).unwrap();
/// let rev = array.rbegin();
/// assert_eq!(rev.base(), array.end());
/// assert_eq!(array[rev], 3);
/// assert_eq!(array[rev + 2], 1);
/// ```
///
/// Ordering compares the bases directly, so `a < b` holds when `a`'s base is
/// before `b`'s base. In reverse traversal order that means `a` comes *after*
/// `b`. This matches the usual reverse iterator contract.
#[derive(Debug, Default, Clone, Copy, Hash)]
pub struct ReverseCursor<C> {
    current: C,
}

impl<C> ReverseCursor<C> {
    pub const fn new(base: C) -> Self {
        ReverseCursor { current: base }
    }

    /// Builds from another reverse cursor whose base converts into `C`.
    pub fn from_reversed<D: Into<C>>(other: ReverseCursor<D>) -> Self {
        ReverseCursor::new(other.current.into())
    }
}

impl<C: Copy> ReverseCursor<C> {
    /// A copy of the underlying cursor.
    pub fn base(&self) -> C {
        self.current
    }
}

impl<C: BidirectionalCursor> ReverseCursor<C> {
    /// The base position of the element this cursor names, `base() - 1`.
    /// The stored base is not touched.
    pub fn target(&self) -> C {
        let mut tmp = self.current;
        tmp.step_back();
        tmp
    }
}

impl<T> From<ReverseCursor<SlotCursor<T, Mutable>>> for ReverseCursor<SlotCursor<T, ReadOnly>> {
    fn from(rev: ReverseCursor<SlotCursor<T, Mutable>>) -> Self {
        ReverseCursor::from_reversed(rev)
    }
}

impl<C: PartialEq<D>, D> PartialEq<ReverseCursor<D>> for ReverseCursor<C> {
    fn eq(&self, other: &ReverseCursor<D>) -> bool {
        self.current == other.current
    }
}

impl<C: Eq> Eq for ReverseCursor<C> {}

impl<C: PartialOrd<D>, D> PartialOrd<ReverseCursor<D>> for ReverseCursor<C> {
    fn partial_cmp(&self, other: &ReverseCursor<D>) -> Option<Ordering> {
        self.current.partial_cmp(&other.current)
    }
}

impl<C: BidirectionalCursor> Cursor for ReverseCursor<C> {
    type Category = C::Category;

    #[inline(always)]
    fn step_forward(&mut self) {
        self.current.step_back();
    }

    fn distance(self, last: Self) -> usize {
        last.current.distance(self.current)
    }
}

impl<C: BidirectionalCursor> BidirectionalCursor for ReverseCursor<C> {
    #[inline(always)]
    fn step_back(&mut self) {
        self.current.step_forward();
    }
}

impl<C: RandomAccessCursor> RandomAccessCursor for ReverseCursor<C> {
    #[inline(always)]
    fn advance(&mut self, n: isize) {
        self.current.advance(-n);
    }

    fn difference(self, origin: Self) -> isize {
        origin.current.difference(self.current)
    }
}

impl<C: RandomAccessCursor> Add<isize> for ReverseCursor<C> {
    type Output = Self;

    fn add(self, n: isize) -> Self {
        ReverseCursor::new(self.current.offset(-n))
    }
}

impl<C: RandomAccessCursor> Add<ReverseCursor<C>> for isize {
    type Output = ReverseCursor<C>;

    fn add(self, rev: ReverseCursor<C>) -> ReverseCursor<C> {
        rev + self
    }
}

impl<C: RandomAccessCursor> Sub<isize> for ReverseCursor<C> {
    type Output = Self;

    fn sub(self, n: isize) -> Self {
        ReverseCursor::new(self.current.offset(n))
    }
}

impl<C: RandomAccessCursor> AddAssign<isize> for ReverseCursor<C> {
    fn add_assign(&mut self, n: isize) {
        self.current.advance(-n);
    }
}

impl<C: RandomAccessCursor> SubAssign<isize> for ReverseCursor<C> {
    fn sub_assign(&mut self, n: isize) {
        self.current.advance(n);
    }
}

/// Distance in traversal order: `rhs.base() - lhs.base()`.
impl<C: RandomAccessCursor> Sub for ReverseCursor<C> {
    type Output = isize;

    fn sub(self, rhs: Self) -> isize {
        self.difference(rhs)
    }
}
