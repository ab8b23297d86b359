use core::fmt;
use core::iter::FusedIterator;
use core::mem::ManuallyDrop;
use core::ptr;

use allocator_api2::alloc::{Allocator, Global};
use contig_raw_slots::RawSlots;

use super::DynArray;

/// Owning iterator returned by `DynArray::into_iter`.
///
/// Takes over the array's region; slots `[start, end)` are still live.
pub struct IntoIter<T, A: Allocator = Global> {
    buf: RawSlots<T, A>,
    start: usize,
    end: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(super) fn new(array: DynArray<T, A>) -> Self {
        let array = ManuallyDrop::new(array);
        // SAFETY: `array` is never dropped, so ownership of the region moves here.
        let buf = unsafe { ptr::read(&array.buf) };
        IntoIter {
            buf,
            start: 0,
            end: array.len,
        }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [start, end) are live.
        unsafe { core::slice::from_raw_parts(self.buf.slot(self.start), self.end - self.start) }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let index = self.start;
        self.start += 1;
        // SAFETY: slot `index` was live and is no longer counted.
        Some(unsafe { self.buf.take(index) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.start;
        (n, Some(n))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot `end` was live and is no longer counted.
        Some(unsafe { self.buf.take(self.end) })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        while self.start < self.end {
            let index = self.start;
            self.start += 1;
            // SAFETY: slot `index` was live and is no longer counted.
            unsafe { self.buf.finalize(index) };
        }
    }
}
