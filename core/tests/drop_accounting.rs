//! Every element the array constructs must be destroyed exactly once, also
//! when a clone panics half way through an operation.

use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use contig_core::DynArray;
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct Ledger {
    created: Cell<usize>,
    dropped: Cell<usize>,
    /// Clones left before the next one panics.
    clones_left: Cell<Option<usize>>,
}

impl Ledger {
    fn live(&self) -> usize {
        self.created.get() - self.dropped.get()
    }

    fn fail_after(&self, clones: usize) {
        self.clones_left.set(Some(clones));
    }

    fn stop_failing(&self) {
        self.clones_left.set(None);
    }
}

#[derive(Debug)]
struct Tracked {
    value: u32,
    ledger: Rc<Ledger>,
}

impl Tracked {
    fn new(value: u32, ledger: &Rc<Ledger>) -> Self {
        ledger.created.set(ledger.created.get() + 1);
        Tracked {
            value,
            ledger: Rc::clone(ledger),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if let Some(left) = self.ledger.clones_left.get() {
            if left == 0 {
                panic!("clone of {} failed", self.value);
            }
            self.ledger.clones_left.set(Some(left - 1));
        }
        Tracked::new(self.value, &self.ledger)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.dropped.set(self.ledger.dropped.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

fn values(array: &DynArray<Tracked>) -> Vec<u32> {
    array.iter().map(|t| t.value).collect()
}

fn tracked(values: &[u32], ledger: &Rc<Ledger>) -> DynArray<Tracked> {
    DynArray::from_range(values.iter().map(|&v| Tracked::new(v, ledger))).unwrap()
}

#[test]
fn test_lifecycle_balances() {
    let ledger = Rc::new(Ledger::default());
    {
        let mut array = tracked(&[1, 2, 3], &ledger);
        array.push_back(Tracked::new(4, &ledger)).unwrap();
        array.insert(array.begin(), Tracked::new(0, &ledger)).unwrap();
        array.erase_range(array.begin() + 1, array.begin() + 3);
        drop(array.pop_back());
        array.resize(6, Tracked::new(9, &ledger)).unwrap();
        array.truncate(2);
        let copy = array.clone();
        assert_eq!(values(&copy), vec![0, 3]);
        assert_eq!(ledger.live(), 4);
    }
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_into_iter_drops_remaining() {
    let ledger = Rc::new(Ledger::default());
    let array = tracked(&[1, 2, 3, 4], &ledger);
    let mut iter = array.into_iter();
    let first = iter.next().unwrap();
    assert_eq!(first.value, 1);
    drop(iter);
    assert_eq!(ledger.live(), 1);
    drop(first);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_panicking_fill_construction_leaks_nothing() {
    let ledger = Rc::new(Ledger::default());
    let seed = Tracked::new(7, &ledger);
    ledger.fail_after(3);
    let result = catch_unwind(AssertUnwindSafe(|| DynArray::filled(10, seed.clone())));
    assert!(result.is_err());
    ledger.stop_failing();
    drop(seed);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_panicking_in_place_insert_restores_array() {
    let ledger = Rc::new(Ledger::default());
    let mut array = tracked(&[1, 2, 3, 4], &ledger);
    array.reserve(16).unwrap();
    let begin = array.begin();
    let filler = Tracked::new(0, &ledger);

    // repeat_n hands out clones for all but the last copy.
    ledger.fail_after(2);
    let result = catch_unwind(AssertUnwindSafe(|| {
        array.insert_fill(array.begin() + 1, 5, filler.clone())
    }));
    assert!(result.is_err());
    ledger.stop_failing();

    assert_eq!(values(&array), vec![1, 2, 3, 4]);
    assert_eq!(array.capacity(), 16);
    assert_eq!(array.begin(), begin);
    drop(filler);
    assert_eq!(ledger.live(), 4);
    drop(array);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_panicking_reallocating_insert_restores_array() {
    let ledger = Rc::new(Ledger::default());
    let mut array = tracked(&[1, 2, 3], &ledger);
    let begin = array.begin();
    let source = tracked(&[10, 11, 12, 13], &ledger);

    ledger.fail_after(2);
    let result = catch_unwind(AssertUnwindSafe(|| {
        array.insert_range(array.begin() + 1, source.iter().cloned())
    }));
    assert!(result.is_err());
    ledger.stop_failing();

    assert_eq!(values(&array), vec![1, 2, 3]);
    assert_eq!(array.capacity(), 3);
    assert_eq!(array.begin(), begin);
    assert_eq!(array[begin + 2].value, 3);
    drop(source);
    assert_eq!(ledger.live(), 3);
    drop(array);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn test_panicking_clone_leaves_source_intact() {
    let ledger = Rc::new(Ledger::default());
    let array = tracked(&[1, 2, 3], &ledger);
    ledger.fail_after(1);
    let result = catch_unwind(AssertUnwindSafe(|| array.clone()));
    assert!(result.is_err());
    ledger.stop_failing();
    assert_eq!(values(&array), vec![1, 2, 3]);
    assert_eq!(ledger.live(), 3);
}

#[test]
fn test_insert_erase_round_trip_balances() {
    let ledger = Rc::new(Ledger::default());
    let mut array = tracked(&[1, 2, 3, 4, 5], &ledger);
    let original = values(&array);
    for offset in 0..=5 {
        let pos = array
            .insert_fill(array.begin() + offset, 2, Tracked::new(99, &ledger))
            .unwrap();
        array.erase_range(pos, pos + 2);
        assert_eq!(values(&array), original);
    }
    assert_eq!(ledger.live(), 5);
}

#[test]
fn test_assign_replaces_contents() {
    let ledger = Rc::new(Ledger::default());
    let mut array = tracked(&[1, 2, 3], &ledger);
    let source = tracked(&[8, 9], &ledger);
    array.clone_from(&source);
    assert!(array == source);
    array.assign_fill(4, Tracked::new(5, &ledger)).unwrap();
    assert_eq!(values(&array), vec![5, 5, 5, 5]);
    assert_eq!(ledger.live(), 6);
}
