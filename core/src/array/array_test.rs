//! Tests for construction, access, cursors and the standard traits

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use bumpalo::Bump;
use pretty_assertions::assert_eq;

use super::DynArray;
use crate::cursor::{ConstCursor, Cursor, RandomAccessCursor, ReverseCursor};
use crate::error::Error;
use crate::test_utils::init_test_logging;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_is_empty_without_allocating() {
    let array = DynArray::<u32>::new();
    assert!(array.is_empty());
    assert_eq!(array.len(), 0);
    assert_eq!(array.capacity(), 0);
    assert_eq!(array.begin(), array.end());
    assert_eq!(array.rbegin(), array.rend());
}

#[test]
fn test_filled() {
    let array = DynArray::filled(3, 'x').unwrap();
    assert_eq!(array.as_slice(), &['x', 'x', 'x']);
    assert_eq!(array.capacity(), 3);

    let empty = DynArray::filled(0, 'x').unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.capacity(), 0);
}

#[test]
fn test_from_range_allocates_exactly() {
    let array = DynArray::from_range(10..15).unwrap();
    assert_eq!(array.as_slice(), &[10, 11, 12, 13, 14]);
    assert_eq!(array.len(), 5);
    assert_eq!(array.capacity(), 5);
}

#[test]
fn test_from_range_round_trips() {
    let source = ["a", "b", "c", "d"];
    let array = DynArray::from_range(source.iter().map(|s| s.to_string())).unwrap();
    assert_eq!(array.len(), source.len());
    assert!(array.iter().zip(source).all(|(x, y)| x == y));
}

/// Claims an exact length of 3 but yields only 2 items.
#[derive(Clone)]
struct Shortfall(u8);

impl Iterator for Shortfall {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.0 += 1;
        (self.0 <= 2).then_some(self.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (3, Some(3))
    }
}

#[test]
#[should_panic(expected = "range yielded fewer elements than it counted")]
fn test_from_range_rejects_short_range() {
    let _ = DynArray::from_range(Shortfall(0));
}

#[test]
#[should_panic(expected = "range yielded fewer elements than it counted")]
fn test_insert_range_rejects_short_range() {
    let mut array = DynArray::from_range([0u8]).unwrap();
    let _ = array.insert_range(array.end(), Shortfall(0));
}

#[test]
fn test_try_clone_is_independent() {
    let original = DynArray::from_range([1, 2, 3]).unwrap();
    let mut copy = original.try_clone().unwrap();
    copy[0] = 100;
    assert_eq!(original.as_slice(), &[1, 2, 3]);
    assert_eq!(copy.as_slice(), &[100, 2, 3]);
    assert_eq!(copy.capacity(), 3);
}

#[test]
fn test_clone_of_grown_array_is_tight() {
    let mut original = DynArray::new();
    for i in 0..5 {
        original.push_back(i).unwrap();
    }
    assert_eq!(original.capacity(), 8);
    let copy = original.clone();
    assert_eq!(copy, original);
    assert_eq!(copy.capacity(), 5);
}

#[test]
fn test_clone_from_reuses_region() {
    let source = DynArray::from_range([7, 8]).unwrap();
    let mut target = DynArray::from_range([1, 2, 3, 4]).unwrap();
    let region = target.begin();
    target.clone_from(&source);
    assert_eq!(target.as_slice(), &[7, 8]);
    assert_eq!(target.capacity(), 4);
    assert_eq!(target.begin(), region);
}

#[test]
fn test_arena_strategy() {
    let arena = Bump::new();
    let mut array = DynArray::new_in(&arena);
    for i in 0..100u64 {
        array.push_back(i).unwrap();
    }
    assert_eq!(array.len(), 100);
    assert_eq!(array.capacity(), 128);
    assert_eq!(array.iter().sum::<u64>(), 4950);

    let copy = array.try_clone().unwrap();
    assert!(core::ptr::eq(*copy.allocator(), &arena));
    assert_eq!(copy, array);
}

// ============================================================================
// Queries and element access
// ============================================================================

#[test]
fn test_max_size() {
    assert_eq!(DynArray::<u64>::new().max_size(), isize::MAX as usize / 8);
    assert_eq!(DynArray::<()>::new().max_size(), usize::MAX);
}

#[test]
fn test_at_is_checked() {
    init_test_logging();
    let mut array = DynArray::from_range([1, 2, 3]).unwrap();
    assert_eq!(array.at(2), Ok(&3));
    assert_eq!(array.at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    *array.at_mut(0).unwrap() = 10;
    assert_eq!(array[0], 10);
    assert!(array.at_mut(7).is_err());
}

#[test]
fn test_front_and_back() {
    let mut array = DynArray::from_range([1, 2, 3]).unwrap();
    assert_eq!(*array.front(), 1);
    assert_eq!(*array.back(), 3);
    *array.front_mut() = 0;
    *array.back_mut() = 4;
    assert_eq!(array.as_slice(), &[0, 2, 4]);
}

#[test]
#[should_panic(expected = "front() called on an empty array")]
fn test_front_of_empty_panics() {
    DynArray::<i32>::new().front();
}

#[test]
#[should_panic(expected = "back() called on an empty array")]
fn test_back_of_empty_panics() {
    DynArray::<i32>::new().back();
}

#[test]
#[should_panic]
fn test_index_out_of_range_panics() {
    let array = DynArray::from_range([1]).unwrap();
    let _ = array[1];
}

// ============================================================================
// Cursors
// ============================================================================

#[test]
fn test_cursor_walk() {
    let array = DynArray::from_range([1, 2, 3, 4]).unwrap();
    let mut it = array.begin();
    let mut seen = Vec::new();
    while it != array.end() {
        seen.push(*it.get(&array));
        it.inc();
    }
    assert_eq!(seen, vec![1, 2, 3, 4]);
    assert_eq!(array.end() - array.begin(), 4);
}

#[test]
fn test_cursor_writes_through_array() {
    let mut array = DynArray::from_range([1, 2, 3]).unwrap();
    let it = array.begin() + 1;
    array[it] *= 10;
    assert_eq!(array.as_slice(), &[1, 20, 3]);
}

#[test]
fn test_const_cursor_reads() {
    let array = DynArray::from_range([5, 6]).unwrap();
    let it: ConstCursor<i32> = array.begin().into();
    assert_eq!(it, array.cbegin());
    assert_eq!(array[it + 1], 6);
    assert_eq!(array.cend() - it, 2);
}

#[test]
fn test_reverse_walk() {
    let array = DynArray::from_range([1, 2, 3]).unwrap();
    let backwards: Vec<_> = array.walk(array.rbegin(), array.rend()).copied().collect();
    assert_eq!(backwards, vec![3, 2, 1]);

    let const_backwards: Vec<_> = array.walk(array.crbegin(), array.crend()).copied().collect();
    assert_eq!(const_backwards, backwards);
    assert_eq!(array.rend() - array.rbegin(), 3);
}

#[test]
fn test_reverse_cursor_writes() {
    let mut array = DynArray::from_range([1, 2, 3]).unwrap();
    let rev = array.rbegin() + 1;
    array[rev] = 20;
    assert_eq!(array.as_slice(), &[1, 20, 3]);
    assert_eq!(rev.base(), array.begin() + 2);
}

#[test]
fn test_walk_is_exact_size_and_double_ended() {
    let array = DynArray::from_range([1, 2, 3, 4, 5]).unwrap();
    let mut walk = array.walk(array.begin() + 1, array.end());
    assert_eq!(walk.len(), 4);
    assert_eq!(walk.next_back(), Some(&5));
    assert_eq!(walk.next(), Some(&2));
    assert_eq!(walk.len(), 2);
    assert_eq!(walk.collect::<Vec<_>>(), vec![&3, &4]);
}

#[test]
fn test_reverse_cursor_from_mutable() {
    let array = DynArray::from_range([1, 2]).unwrap();
    let rev: ReverseCursor<ConstCursor<i32>> = array.rbegin().into();
    assert_eq!(rev, array.crbegin());
    assert_eq!(*rev.nth(&array, 1), 1);
}

#[test]
#[should_panic(expected = "cannot dereference the end cursor")]
fn test_end_cursor_does_not_dereference() {
    let array = DynArray::from_range([1, 2]).unwrap();
    let _ = array[array.end()];
}

#[test]
#[should_panic(expected = "cursor does not address this array's current storage")]
fn test_cursor_from_other_array_panics() {
    let a = DynArray::from_range([1, 2]).unwrap();
    let b = DynArray::from_range([1, 2]).unwrap();
    let _ = a[b.begin()];
}

#[test]
#[should_panic(expected = "cursor offset -1 is outside an array of size 2")]
fn test_cursor_before_begin_panics() {
    let array = DynArray::from_range([1, 2]).unwrap();
    let _ = array[array.rend()];
}

// ============================================================================
// Comparison
// ============================================================================

#[test]
fn test_equality() {
    let a = DynArray::from_range([1, 2, 3]).unwrap();
    let mut b = DynArray::from_range([1, 2, 3]).unwrap();
    assert_eq!(a, b);
    b[1] = 0;
    assert_ne!(a, b);
    b.truncate(1);
    assert_ne!(a, b);
}

#[test]
fn test_equality_across_strategies() {
    let arena = Bump::new();
    let a = DynArray::from_range([1, 2]).unwrap();
    let b = DynArray::from_range_in([1, 2], &arena).unwrap();
    assert!(a == b);
}

#[test]
fn test_ordering_is_lexicographic() {
    let short = DynArray::from_range([1, 2]).unwrap();
    let long = DynArray::from_range([1, 2, 0]).unwrap();
    let big = DynArray::from_range([1, 3]).unwrap();

    assert!(short < long);
    assert!(long < big);
    assert!(short <= short.clone());
    assert!(big > short);
    assert!(big >= long);
    assert!(!(short > long));
    assert_eq!(short.cmp(&long), core::cmp::Ordering::Less);
    assert_eq!(big.cmp(&big.clone()), core::cmp::Ordering::Equal);
}

#[test]
fn test_partial_cmp_with_unordered_elements() {
    let a = DynArray::from_range([f64::NAN]).unwrap();
    let b = DynArray::from_range([1.0]).unwrap();
    assert_eq!(a.partial_cmp(&b), None);
    assert!(!(a < b));
    assert!(a <= b);
}

// ============================================================================
// Standard traits
// ============================================================================

#[test]
fn test_debug() {
    let array = DynArray::from_range([1, 2]).unwrap();
    assert_eq!(alloc::format!("{array:?}"), "[1, 2]");
}

#[test]
fn test_collect_and_extend() {
    let mut array: DynArray<i32> = (1..=3).collect();
    assert_eq!(array.capacity(), 4);
    array.extend([4, 5]);
    array.extend(&[6]);
    assert_eq!(array.as_slice(), &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_into_iter_by_value() {
    let array = DynArray::from_range(["a", "b", "c"].map(String::from)).unwrap();
    let mut iter = array.into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next_back().as_deref(), Some("c"));
    assert_eq!(iter.as_slice(), &["a".to_string(), "b".to_string()]);
    assert_eq!(iter.next().as_deref(), Some("a"));
}

#[test]
fn test_into_iter_by_reference() {
    let mut array = DynArray::from_range([1, 2, 3]).unwrap();
    for x in &mut array {
        *x += 1;
    }
    let sum: i32 = (&array).into_iter().sum();
    assert_eq!(sum, 9);
}

#[test]
fn test_hash_matches_slice() {
    use core::hash::{BuildHasher, BuildHasherDefault};
    use std::collections::hash_map::DefaultHasher;

    let hasher = BuildHasherDefault::<DefaultHasher>::default();
    let array = DynArray::from_range([1, 2, 3]).unwrap();
    assert_eq!(hasher.hash_one(&array), hasher.hash_one([1, 2, 3].as_slice()));
}

#[test]
fn test_distance_of_cursors() {
    let array = DynArray::from_range([1, 2, 3]).unwrap();
    assert_eq!(crate::cursor::distance(array.begin(), array.end()), 3);
    assert_eq!(array.rbegin().distance(array.rend()), 3);
    assert_eq!((array.begin() + 2).difference(array.begin()), 2);
}
