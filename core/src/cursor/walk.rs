use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use super::{BidirectionalCursor, Cursor, RandomAccessCursor};

/// Iterator over `[first, last)` of a cursor range, reading through `source`.
///
/// ```
/// use contig_core::DynArray;
///
/// let array = DynArray::from_range([1, 2, 3]).unwrap();
/// let backwards: Vec<_> = array.walk(array.rbegin(), array.rend()).copied().collect();
/// assert_eq!(backwards, [3, 2, 1]);
/// ```
pub struct Walk<'a, S: ?Sized, C> {
    source: &'a S,
    first: C,
    last: C,
}

impl<'a, S: ?Sized, C> Walk<'a, S, C> {
    pub fn new(source: &'a S, first: C, last: C) -> Self {
        Walk {
            source,
            first,
            last,
        }
    }
}

impl<S: ?Sized, C: Copy> Clone for Walk<'_, S, C> {
    fn clone(&self) -> Self {
        Walk {
            source: self.source,
            first: self.first,
            last: self.last,
        }
    }
}

impl<S: ?Sized, C: fmt::Debug> fmt::Debug for Walk<'_, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walk")
            .field("first", &self.first)
            .field("last", &self.last)
            .finish()
    }
}

impl<'a, S, C> Iterator for Walk<'a, S, C>
where
    S: Index<C> + ?Sized,
    S::Output: 'a,
    C: Cursor,
{
    type Item = &'a S::Output;

    fn next(&mut self) -> Option<Self::Item> {
        if self.first == self.last {
            return None;
        }
        let source: &'a S = self.source;
        let item = source.index(self.first);
        self.first.step_forward();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.first.distance(self.last);
        (n, Some(n))
    }
}

impl<'a, S, C> DoubleEndedIterator for Walk<'a, S, C>
where
    S: Index<C> + ?Sized,
    S::Output: 'a,
    C: BidirectionalCursor,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.first == self.last {
            return None;
        }
        self.last.step_back();
        let source: &'a S = self.source;
        Some(source.index(self.last))
    }
}

impl<'a, S, C> ExactSizeIterator for Walk<'a, S, C>
where
    S: Index<C> + ?Sized,
    S::Output: 'a,
    C: RandomAccessCursor,
{
}

impl<'a, S, C> FusedIterator for Walk<'a, S, C>
where
    S: Index<C> + ?Sized,
    S::Output: 'a,
    C: Cursor,
{
}
