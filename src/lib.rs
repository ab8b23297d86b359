//! Contig - a growable contiguous array with cursors
//!
//! # Overview
//!
//! [`DynArray`] owns one contiguous region obtained from a pluggable
//! allocation strategy. It grows geometrically on `push_back`, reallocates to
//! the exact size an `insert` needs, and never shrinks on its own. Positions
//! are [`SlotCursor`]s that support the full random access vocabulary, and
//! [`ReverseCursor`] walks any bidirectional cursor backwards.
//!
//! # Quick Start
//!
//! ```
//! use contig::{DynArray, cursor::Cursor};
//!
//! let mut array = DynArray::new();
//! for i in 1..=5 {
//!     array.push_back(i)?;
//! }
//! assert_eq!(array.capacity(), 8);
//!
//! // Cursors do not borrow the array, so they can name insertion points.
//! let pos = array.insert(array.begin() + 2, 99)?;
//! assert_eq!(array[pos], 99);
//! array.erase(pos);
//!
//! // Reverse traversal.
//! let mut rev = array.rbegin();
//! assert_eq!(*rev.get(&array), 5);
//! rev.inc();
//! assert_eq!(array[rev], 4);
//!
//! array.truncate(2);
//! assert_eq!(array.as_slice(), &[1, 2]);
//! assert_eq!(array.capacity(), 8);
//! # Ok::<(), contig::Error>(())
//! ```
//!
//! # Allocation Strategies
//!
//! Every constructor has an `_in` form taking an
//! [`Allocator`](allocator::Allocator). An arena works too:
//!
//! ```
//! use bumpalo::Bump;
//! use contig::DynArray;
//!
//! let arena = Bump::new();
//! let mut names = DynArray::new_in(&arena);
//! names.push_back("ada")?;
//! names.push_back("grace")?;
//! assert_eq!(names.len(), 2);
//! # Ok::<(), contig::Error>(())
//! ```
//!
//! # Errors
//!
//! Operations that allocate return [`Result`]. A failed operation leaves the
//! array unchanged. Misusing a position (a cursor from another array, or one
//! issued before a reallocation) panics instead of reading stale memory.
#![cfg_attr(not(feature = "std"), no_std)]

// Re-export public API from contig_core
pub use contig_core::{
    BidirectionalCursor, ConstCursor, Cursor, DynArray, Error, IntoIter, RandomAccessCursor,
    Result, ReverseCursor, SlotCursor, swap,
};

pub use contig_core::{algorithm, cursor};

/// The allocation strategy interface and the default global strategy.
pub mod allocator {
    pub use contig_core::{Allocator, Global};
}
