//! Range predicates used by the relational operators of
//! [`DynArray`](crate::DynArray).
//!
//! Ranges are anything iterable: slices, arrays, [`Walk`](crate::cursor::Walk)s
//! over cursor pairs.

pub use crate::cursor::distance;

/// `true` when both ranges have the same length and are elementwise equal.
pub fn equal<I, J>(a: I, b: J) -> bool
where
    I: IntoIterator,
    J: IntoIterator,
    I::Item: PartialEq<J::Item>,
{
    equal_by(a, b, |x, y| x == y)
}

pub fn equal_by<I, J, F>(a: I, b: J, mut eq: F) -> bool
where
    I: IntoIterator,
    J: IntoIterator,
    F: FnMut(&I::Item, &J::Item) -> bool,
{
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if eq(&x, &y) => {}
            _ => return false,
        }
    }
}

/// `true` when `a` orders strictly before `b`.
///
/// Stops at the first position where one element is less than the other, or
/// where a range runs out. A proper prefix orders first.
pub fn lexicographical_compare<I, J>(a: I, b: J) -> bool
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    I::Item: PartialOrd,
{
    lexicographical_compare_by(a, b, |x, y| x < y)
}

/// [`lexicographical_compare`] with a caller-supplied strict ordering.
pub fn lexicographical_compare_by<I, J, F>(a: I, b: J, mut less: F) -> bool
where
    I: IntoIterator,
    J: IntoIterator<Item = I::Item>,
    F: FnMut(&I::Item, &I::Item) -> bool,
{
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (_, None) => return false,
            (None, Some(_)) => return true,
            (Some(x), Some(y)) => {
                if less(&x, &y) {
                    return true;
                }
                if less(&y, &x) {
                    return false;
                }
            }
        }
    }
}
