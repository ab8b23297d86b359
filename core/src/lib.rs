#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

//! A growable contiguous array over a pluggable allocation strategy, with
//! random access cursors and a reverse cursor adaptor.
//!
//! ```
//! use contig_core::{DynArray, cursor::RandomAccessCursor};
//!
//! let mut array = DynArray::from_range([3, 1, 2])?;
//! array.push_back(4)?;
//! let first = array.begin();
//! assert_eq!(*first.nth(&array, 3), 4);
//! assert_eq!(array[array.rbegin()], 4);
//! # Ok::<(), contig_core::Error>(())
//! ```

// This works on std and no_std and is harmless.
extern crate alloc;

pub mod algorithm;
pub mod array;
pub mod cursor;
mod error;

pub use allocator_api2::alloc::{Allocator, Global};
pub use array::{DynArray, IntoIter, swap};
pub use cursor::{
    BidirectionalCursor, ConstCursor, Cursor, RandomAccessCursor, ReverseCursor, SlotCursor,
};
pub use error::{Error, Result};
