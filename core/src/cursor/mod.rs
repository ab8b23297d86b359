//! Cursors: positions into a sequence that are moved and compared without
//! touching the elements.
//!
//! A cursor never dereferences on its own. Reading goes through the source it
//! was issued by, via `Index<Cursor>`:
//!
//! ```
//! use contig_core::{DynArray, cursor::Cursor};
//!
//! let array = DynArray::from_range([10, 20, 30]).unwrap();
//! let it = array.begin() + 1;
//! assert_eq!(array[it], 20);
//! assert_eq!(*it.get(&array), 20);
//! ```
//!
//! The traits follow the capability tags in [`category`]: every
//! [`BidirectionalCursor`] is a [`Cursor`] whose tag refines
//! [`BidirectionalTag`], and so on up to [`RandomAccessCursor`].

use core::ops::Index;

pub mod category;
mod reverse;
mod slot;
mod walk;

pub use category::{
    BidirectionalTag, Category, ForwardTag, InputTag, OutputTag, RandomAccessTag, Refines,
};
pub use reverse::ReverseCursor;
pub use slot::{Access, ConstCursor, Mutable, ReadOnly, SlotCursor};
pub use walk::Walk;


/// A position that can step forward and be compared for equality.
pub trait Cursor: Copy + PartialEq {
    type Category: Category;

    /// Moves to the next position.
    fn step_forward(&mut self);

    /// Number of forward steps from `self` to `last`.
    ///
    /// Counts one step at a time; random access cursors answer in O(1).
    /// `last` must be reachable from `self`. Random access cursors report 0
    /// when `last` lies before `self`.
    fn distance(self, last: Self) -> usize {
        let mut first = self;
        let mut n = 0;
        while first != last {
            first.step_forward();
            n += 1;
        }
        n
    }

    /// Prefix increment: steps and returns the moved cursor.
    fn inc(&mut self) -> &mut Self {
        self.step_forward();
        self
    }

    /// Postfix increment: steps and returns the position before the step.
    fn post_inc(&mut self) -> Self {
        let before = *self;
        self.step_forward();
        before
    }

    /// Dereferences through `source`.
    fn get<S>(self, source: &S) -> &S::Output
    where
        S: Index<Self> + ?Sized,
    {
        &source[self]
    }
}

/// A cursor that can also step backwards.
pub trait BidirectionalCursor: Cursor<Category: Refines<BidirectionalTag>> {
    /// Moves to the previous position.
    fn step_back(&mut self);

    fn dec(&mut self) -> &mut Self {
        self.step_back();
        self
    }

    fn post_dec(&mut self) -> Self {
        let before = *self;
        self.step_back();
        before
    }
}

/// A cursor with constant-time jumps, distances and ordering.
pub trait RandomAccessCursor:
    BidirectionalCursor<Category: Refines<RandomAccessTag>> + PartialOrd
{
    /// Moves `n` positions (backwards when negative).
    fn advance(&mut self, n: isize);

    /// Signed distance `self - origin`.
    fn difference(self, origin: Self) -> isize;

    /// A copy moved `n` positions.
    fn offset(self, n: isize) -> Self {
        let mut moved = self;
        moved.advance(n);
        moved
    }

    /// Subscript: the element `n` positions away, `source[self + n]`.
    fn nth<S>(self, source: &S, n: isize) -> &S::Output
    where
        S: Index<Self> + ?Sized,
    {
        &source[self.offset(n)]
    }
}

/// Number of elements in `[first, last)`.
pub fn distance<C: Cursor>(first: C, last: C) -> usize {
    first.distance(last)
}
