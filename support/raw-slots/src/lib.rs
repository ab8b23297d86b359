#![allow(unsafe_code)]

//! Raw slot storage for contiguous containers.
//!
//! A `RawSlots<T, A>` owns one region of memory obtained from an allocation
//! strategy `A` and knows nothing about which of its slots hold live values.
//! The owning container tracks that and drives the per-slot operations:
//!
//! ```text
//! RawSlots<T>:  ptr ──▶ [ slot 0 | slot 1 | ... | slot cap-1 ]
//!                        └─ live ─────┘└─ uninitialized ─────┘
//!                                     ▲
//!                                     len (kept by the container)
//! ```
//!
//! - **acquire**: [`RawSlots::try_with_capacity_in`] allocates exactly `cap` slots.
//! - **reallocate**: [`RawSlots::try_reallocate`] acquires a fresh region, lets the
//!   caller transfer values into it, then releases the old one.
//! - **release**: dropping a `RawSlots` frees the region. It never drops values.
//! - **initialize / finalize**: [`RawSlots::init`], [`RawSlots::finalize`],
//!   [`RawSlots::take`] and [`RawSlots::relocate`] work on single slots.
//!
//! Zero-sized types and zero capacities never touch the allocator; the region
//! is a dangling, well-aligned pointer.
//!
//! # Example
//!
//! ```
//! use contig_raw_slots::RawSlots;
//!
//! let mut slots = RawSlots::<String>::try_with_capacity(2).unwrap();
//! unsafe {
//!     slots.init(0, "a".to_string());
//!     slots.relocate(0, 1);
//!     assert_eq!(slots.take(1), "a");
//! }
//! ```

#![no_std]

use core::{
    alloc::Layout,
    error::Error,
    fmt,
    marker::PhantomData,
    mem,
    ptr::{self, NonNull},
};

use allocator_api2::alloc::{Allocator, Global};

/// Why a region could not be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveError {
    /// More slots were requested than a single region can describe.
    CapacityOverflow { requested: usize, max: usize },
    /// The allocation strategy refused the request.
    AllocFailed { layout: Layout },
}

impl fmt::Display for ReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReserveError::CapacityOverflow { requested, max } => {
                write!(f, "capacity overflow: {requested} slots requested, at most {max}")
            }
            ReserveError::AllocFailed { layout } => {
                write!(f, "allocation of {} bytes failed", layout.size())
            }
        }
    }
}

impl Error for ReserveError {}

/// An owned region of `cap` possibly-uninitialized slots of `T`.
///
/// See [crate-level docs](crate) for the ownership model.
pub struct RawSlots<T, A: Allocator = Global> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
static_assertions::assert_eq_size!(RawSlots<u64>, [usize; 2]);

impl<T> RawSlots<T, Global> {
    /// An empty region from the global allocator. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    pub fn try_with_capacity(cap: usize) -> Result<Self, ReserveError> {
        Self::try_with_capacity_in(cap, Global)
    }
}

impl<T> Default for RawSlots<T, Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> RawSlots<T, A> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// An empty region bound to `alloc`. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        RawSlots {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Acquires a region of exactly `cap` slots from `alloc`.
    pub fn try_with_capacity_in(cap: usize, alloc: A) -> Result<Self, ReserveError> {
        let ptr = acquire::<T, A>(&alloc, cap)?;
        Ok(RawSlots {
            ptr,
            cap,
            alloc,
            _marker: PhantomData,
        })
    }

    /// Largest slot count a single region of `T` can hold.
    pub const fn max_capacity() -> usize {
        if Self::IS_ZST {
            usize::MAX
        } else {
            isize::MAX as usize / mem::size_of::<T>()
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Address identifying the current region. Changes whenever the region is
    /// replaced; every empty region of the same `T` shares one identity.
    #[inline(always)]
    pub fn region(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index <= capacity()`.
    #[inline(always)]
    pub unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.cap);
        // SAFETY: caller keeps `index` within the region (or one past it).
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Constructs `value` in slot `index`.
    ///
    /// # Safety
    ///
    /// `index < capacity()` and the slot is uninitialized (otherwise the old
    /// value is leaked).
    #[inline(always)]
    pub unsafe fn init(&mut self, index: usize, value: T) {
        debug_assert!(index < self.cap);
        unsafe { ptr::write(self.slot(index), value) }
    }

    /// Moves the value out of slot `index`, leaving the slot uninitialized.
    ///
    /// # Safety
    ///
    /// `index < capacity()` and the slot holds a live value.
    #[inline(always)]
    pub unsafe fn take(&mut self, index: usize) -> T {
        debug_assert!(index < self.cap);
        unsafe { ptr::read(self.slot(index)) }
    }

    /// Destroys the value in slot `index`, leaving the slot uninitialized.
    ///
    /// # Safety
    ///
    /// `index < capacity()` and the slot holds a live value.
    #[inline(always)]
    pub unsafe fn finalize(&mut self, index: usize) {
        debug_assert!(index < self.cap);
        unsafe { ptr::drop_in_place(self.slot(index)) }
    }

    /// Constructs slot `to` from the value in slot `from` and ends `from`.
    ///
    /// # Safety
    ///
    /// Both indices are below `capacity()`, `from` is live and `to` is
    /// uninitialized (or equal to `from`).
    #[inline(always)]
    pub unsafe fn relocate(&mut self, from: usize, to: usize) {
        unsafe { relocate(self.slot(from), self.slot(to)) }
    }

    /// The first `len` slots as a slice.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` are live.
    #[inline(always)]
    pub unsafe fn as_slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.cap);
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), len) }
    }

    /// The first `len` slots as a mutable slice.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` are live.
    #[inline(always)]
    pub unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.cap);
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), len) }
    }

    /// Replaces the region with a fresh one of exactly `new_cap` slots.
    ///
    /// `transfer` receives the old and new base pointers and must leave every
    /// value it wants to keep in the new region. If acquisition fails nothing
    /// changes. If `transfer` panics the fresh region is released and the old
    /// one stays in place, so `transfer` must only have moved values out of
    /// the old region once it can no longer panic.
    pub fn try_reallocate<F>(&mut self, new_cap: usize, transfer: F) -> Result<(), ReserveError>
    where
        F: FnOnce(*mut T, *mut T),
    {
        let fresh = acquire::<T, A>(&self.alloc, new_cap)?;
        let guard = Release {
            ptr: fresh,
            cap: new_cap,
            alloc: &self.alloc,
        };
        transfer(self.ptr.as_ptr(), fresh.as_ptr());
        mem::forget(guard);

        let old_ptr = mem::replace(&mut self.ptr, fresh);
        let old_cap = mem::replace(&mut self.cap, new_cap);
        // SAFETY: (old_ptr, old_cap) was acquired from `self.alloc`.
        unsafe { release::<T, A>(&self.alloc, old_ptr, old_cap) };
        Ok(())
    }
}

impl<T, A: Allocator> Drop for RawSlots<T, A> {
    fn drop(&mut self) {
        // SAFETY: (ptr, cap) was acquired from `alloc`.
        unsafe { release::<T, A>(&self.alloc, self.ptr, self.cap) }
    }
}

impl<T, A: Allocator> fmt::Debug for RawSlots<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSlots")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .finish()
    }
}

// Same rules as `Box<[T], A>`.
unsafe impl<T: Send, A: Allocator + Send> Send for RawSlots<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawSlots<T, A> {}

/// Constructs `*to` from `*from` and ends `*from`.
///
/// # Safety
///
/// `from` points to a live value, `to` to writable uninitialized memory (or
/// `to == from`).
#[inline(always)]
pub unsafe fn relocate<T>(from: *mut T, to: *mut T) {
    if from != to {
        unsafe { ptr::write(to, ptr::read(from)) }
    }
}

/// Frees a region on drop. Armed while a fresh region is being populated.
struct Release<'a, T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: &'a A,
}

impl<T, A: Allocator> Drop for Release<'_, T, A> {
    fn drop(&mut self) {
        unsafe { release::<T, A>(self.alloc, self.ptr, self.cap) }
    }
}

fn layout_for<T>(cap: usize) -> Option<Layout> {
    Layout::array::<T>(cap).ok()
}

fn acquire<T, A: Allocator>(alloc: &A, cap: usize) -> Result<NonNull<T>, ReserveError> {
    let max = RawSlots::<T, A>::max_capacity();
    if cap > max {
        return Err(ReserveError::CapacityOverflow { requested: cap, max });
    }
    if mem::size_of::<T>() == 0 || cap == 0 {
        return Ok(NonNull::dangling());
    }
    let layout =
        layout_for::<T>(cap).ok_or(ReserveError::CapacityOverflow { requested: cap, max })?;
    alloc
        .allocate(layout)
        .map(NonNull::cast)
        .map_err(|_| ReserveError::AllocFailed { layout })
}

/// # Safety
///
/// `(ptr, cap)` was returned by `acquire` on the same allocator.
unsafe fn release<T, A: Allocator>(alloc: &A, ptr: NonNull<T>, cap: usize) {
    if mem::size_of::<T>() == 0 || cap == 0 {
        return;
    }
    if let Some(layout) = layout_for::<T>(cap) {
        unsafe { alloc.deallocate(ptr.cast(), layout) }
    }
}
