//! Standard trait impls for [`DynArray`].
//!
//! The relational operators read both arrays through their cursor ranges and
//! delegate to [`crate::algorithm`]: `==` needs equal sizes and elementwise
//! equality, `<` is lexicographic, and the remaining operators are derived
//! from those two.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use allocator_api2::alloc::Allocator;

use super::{DynArray, IntoIter};
use crate::algorithm;
use crate::error::infallible;

impl<T: Clone, A: Allocator + Clone> Clone for DynArray<T, A> {
    fn clone(&self) -> Self {
        infallible(self.try_clone())
    }

    /// Reuses the existing region when it is large enough.
    fn clone_from(&mut self, source: &Self) {
        infallible(self.assign_from(source));
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for DynArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Hash, A: Allocator> Hash for DynArray<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

// --- Comparison ---

impl<T, U, A: Allocator, B: Allocator> PartialEq<DynArray<U, B>> for DynArray<T, A>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &DynArray<U, B>) -> bool {
        self.len() == other.len()
            && algorithm::equal(
                self.walk(self.cbegin(), self.cend()),
                other.walk(other.cbegin(), other.cend()),
            )
    }
}

impl<T: Eq, A: Allocator> Eq for DynArray<T, A> {}

/// `a < b` when `a` orders lexicographically before `b`.
fn less<T: PartialOrd, A: Allocator, B: Allocator>(a: &DynArray<T, A>, b: &DynArray<T, B>) -> bool {
    algorithm::lexicographical_compare(a.walk(a.cbegin(), a.cend()), b.walk(b.cbegin(), b.cend()))
}

impl<T: PartialOrd, A: Allocator, B: Allocator> PartialOrd<DynArray<T, B>> for DynArray<T, A> {
    fn partial_cmp(&self, other: &DynArray<T, B>) -> Option<Ordering> {
        if less(self, other) {
            Some(Ordering::Less)
        } else if less(other, self) {
            Some(Ordering::Greater)
        } else if *self == *other {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    fn lt(&self, other: &DynArray<T, B>) -> bool {
        less(self, other)
    }

    fn le(&self, other: &DynArray<T, B>) -> bool {
        !less(other, self)
    }

    fn gt(&self, other: &DynArray<T, B>) -> bool {
        less(other, self)
    }

    fn ge(&self, other: &DynArray<T, B>) -> bool {
        !less(self, other)
    }
}

impl<T: Ord, A: Allocator> Ord for DynArray<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        if less(self, other) {
            Ordering::Less
        } else if less(other, self) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

// --- Collection traits ---

/// Grows by the `push_back` rule.
impl<T, A: Allocator> Extend<T> for DynArray<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            infallible(self.push_back(value));
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for DynArray<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

/// Collects single-pass sources. Multi-pass sources can use
/// [`DynArray::from_range`] to allocate once.
impl<T, A: Allocator + Default> FromIterator<T> for DynArray<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = DynArray::new_in(A::default());
        array.extend(iter);
        array
    }
}

impl<T, A: Allocator> IntoIterator for DynArray<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter::new(self)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a DynArray<T, A> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut DynArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A: Allocator> AsRef<[T]> for DynArray<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for DynArray<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}
