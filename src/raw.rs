//! Owned, uninitialized storage for `DynamicArray`.
//!
//! `RawBuffer<T>` owns exactly one block of `capacity` slots obtained from the
//! global allocator. It never reads, writes or drops elements: tracking which
//! slots are live is the job of the owning array.

#![allow(unsafe_code)]

use alloc::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use crate::error::DynArrayError;

pub(crate) struct RawBuffer<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: the buffer is uniquely owned; sending or sharing it is as safe as
// sending or sharing the `T` values it may contain.
unsafe impl<T: Send> Send for RawBuffer<T> {}
// SAFETY: see above.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// A buffer that owns no block.
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: if Self::IS_ZST { usize::MAX } else { 0 },
            _marker: PhantomData,
        }
    }

    /// Allocates a block of exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// - `CapacityOverflow` if `capacity` slots do not fit in a `Layout`
    /// - `AllocationFailed` if the allocator returns no block
    pub(crate) fn allocate(capacity: usize) -> Result<Self, DynArrayError> {
        if Self::IS_ZST || capacity == 0 {
            return Ok(Self::new());
        }

        let layout = Self::layout_for(capacity)?;

        // SAFETY: `layout` has a non-zero size because `T` is not zero-sized
        // and `capacity > 0`.
        let raw = unsafe { alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(DynArrayError::AllocationFailed {
            requested: capacity,
        })?;

        Ok(Self {
            ptr,
            cap: capacity,
            _marker: PhantomData,
        })
    }

    fn layout_for(capacity: usize) -> Result<Layout, DynArrayError> {
        Layout::array::<T>(capacity).map_err(|_| DynArrayError::CapacityOverflow {
            requested: capacity,
        })
    }

    /// The largest slot count a single block can describe.
    pub(crate) const fn max_capacity() -> usize {
        if Self::IS_ZST {
            usize::MAX
        } else {
            isize::MAX as usize / mem::size_of::<T>()
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    pub(crate) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    fn owns_block(&self) -> bool {
        !Self::IS_ZST && self.cap != 0
    }
}

/// Reports an allocation failure from an infallible entry point (`Clone`,
/// `FromIterator`, `Extend`) the way the standard collections do.
pub(crate) fn handle_reserve_error<T>(error: DynArrayError) -> ! {
    match error {
        DynArrayError::AllocationFailed { requested } => match Layout::array::<T>(requested) {
            Ok(layout) => handle_alloc_error(layout),
            Err(_) => panic!("capacity overflow"),
        },
        DynArrayError::CapacityOverflow { .. } => panic!("capacity overflow"),
        other => panic!("{other}"),
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if !self.owns_block() {
            return;
        }
        // The layout was valid when the block was allocated with this capacity.
        if let Ok(layout) = Self::layout_for(self.cap) {
            // SAFETY: `ptr` was returned by `alloc` with exactly this layout and
            // has not been released yet.
            unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}
