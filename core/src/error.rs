//! Errors reported by [`DynArray`](crate::DynArray) operations.
//!
//! Every error is reported synchronously to the immediate caller. Nothing is
//! retried internally, and a failed operation leaves the array as it was.

use core::alloc::Layout;

use contig_raw_slots::ReserveError;
use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The allocation strategy could not satisfy a storage request.
    #[error("allocation strategy could not provide {} bytes", .layout.size())]
    AllocationFailure { layout: Layout },

    /// The requested size or capacity exceeds `max_size()`. Reported before
    /// any allocation is attempted.
    #[error("requested capacity {requested} exceeds the maximum of {max} elements")]
    CapacityExceeded { requested: usize, max: usize },

    /// Checked access past the end (`at` / `at_mut`).
    #[error("index {index} is out of range for an array of size {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl From<ReserveError> for Error {
    fn from(err: ReserveError) -> Self {
        match err {
            ReserveError::CapacityOverflow { requested, max } => {
                Error::CapacityExceeded { requested, max }
            }
            ReserveError::AllocFailed { layout } => Error::AllocationFailure { layout },
        }
    }
}

/// Logs an error on its way back to the caller.
pub(crate) fn report(err: impl Into<Error>) -> Error {
    let err = err.into();
    tracing::debug!(%err, "dynamic array operation failed");
    err
}

/// Unwraps results for trait impls that cannot return errors, routing
/// allocation failure to the global handler like the standard collections.
pub(crate) fn infallible<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(Error::AllocationFailure { layout }) => alloc::alloc::handle_alloc_error(layout),
        Err(err) => panic!("{err}"),
    }
}
