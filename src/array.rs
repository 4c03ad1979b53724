use core::cmp;
use core::mem;
use core::ops::{Bound, Range, RangeBounds};
use core::ptr;
use core::slice;

use crate::error::DynArrayError;
use crate::raw::RawBuffer;

/// A growable, contiguous array that exclusively owns its storage.
///
/// Slots `[0, len)` hold live values; slots `[len, capacity)` are allocated
/// but empty. The storage block is replaced only by the private
/// reallocation routine, which every capacity change goes through.
pub struct DynamicArray<T> {
    buf: RawBuffer<T>,
    len: usize,
}

/// Smallest capacity allocated on the first growth of an empty array.
const fn min_non_zero_cap<T>() -> usize {
    if mem::size_of::<T>() > 1024 {
        1
    } else {
        4
    }
}

impl<T> DynamicArray<T> {
    /// Creates an empty array. Nothing is allocated.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
        }
    }

    /// Creates an empty array with room for exactly `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::AllocationFailed` if the allocator cannot
    /// provide the block, or `DynArrayError::CapacityOverflow` if
    /// `capacity` elements exceed the addressable size.
    pub fn with_capacity(capacity: usize) -> Result<Self, DynArrayError> {
        Ok(Self {
            buf: RawBuffer::allocate(capacity)?,
            len: 0,
        })
    }

    /// Builds an array from an iterator, reporting allocation failures
    /// instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the storage cannot grow to hold every
    /// item.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, DynArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut array = Self::with_capacity(lower)?;
        for item in iter {
            array.push(item)?;
        }
        Ok(array)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the array can hold without reallocating.
    ///
    /// Zero-sized element types never allocate and report `usize::MAX`.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The largest number of elements an array of `T` can ever hold.
    #[must_use]
    pub const fn max_size() -> usize {
        RawBuffer::<T>::max_capacity()
    }

    /// Position of the first element. Always `0`.
    #[must_use]
    pub fn begin(&self) -> usize {
        0
    }

    /// Position one past the last element. Equal to `len()`.
    #[must_use]
    pub fn end(&self) -> usize {
        self.len
    }

    /// The positions bounding the live region, `begin()..end()`.
    ///
    /// Positions are plain indices. They stay in bounds only until the next
    /// operation that removes elements.
    #[must_use]
    pub fn positions(&self) -> Range<usize> {
        self.begin()..self.end()
    }

    /// Raw pointer to the storage block.
    ///
    /// The pointer changes only when the array reallocates.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    #[must_use]
    #[allow(unsafe_code)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[0, len)` are initialized and the pointer is
        // non-null and aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    #[must_use]
    #[allow(unsafe_code)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    /// View of the live elements. Same as `as_slice`.
    #[must_use]
    pub fn data(&self) -> &[T] {
        self.as_slice()
    }

    /// Ensures `capacity() >= capacity`.
    ///
    /// A request at or below the current capacity does nothing. Otherwise
    /// the array moves to a block of exactly `capacity` slots. Elements keep
    /// their values and order.
    ///
    /// # Errors
    ///
    /// Returns an allocation error and leaves the array untouched if the new
    /// block cannot be obtained.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), DynArrayError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.reallocate(capacity)
    }

    /// Shrinks the capacity to exactly `len()`.
    ///
    /// An empty array gives its block back and ends with capacity `0`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error and leaves the array untouched if the
    /// smaller block cannot be obtained.
    pub fn shrink_to_fit(&mut self) -> Result<(), DynArrayError> {
        if mem::size_of::<T>() == 0 || self.capacity() == self.len {
            return Ok(());
        }
        self.reallocate(self.len)
    }

    /// Moves the live elements into a fresh block of exactly `capacity` slots.
    #[allow(unsafe_code)]
    fn reallocate(&mut self, capacity: usize) -> Result<(), DynArrayError> {
        debug_assert!(capacity >= self.len);

        let mut fresh = RawBuffer::allocate(capacity)?;
        // SAFETY: both blocks hold at least `len` slots and are distinct
        // allocations. After the copy the old slots are treated as
        // uninitialized, so every element keeps exactly one owner.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), fresh.as_mut_ptr(), self.len);
        }
        let old = mem::replace(&mut self.buf, fresh);
        drop(old);
        Ok(())
    }

    /// Grows with amortized doubling so that `required` elements fit.
    fn grow_to(&mut self, required: usize) -> Result<(), DynArrayError> {
        let capacity = self.capacity();
        if required <= capacity {
            return Ok(());
        }

        let doubled = capacity.saturating_mul(2);
        let target = cmp::max(cmp::max(doubled, required), min_non_zero_cap::<T>());
        let target = cmp::max(cmp::min(target, Self::max_size()), required);
        self.reserve(target)
    }

    pub(crate) fn grow_by(&mut self, additional: usize) -> Result<(), DynArrayError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(DynArrayError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        self.grow_to(required)
    }

    /// Writes `value` into slot `len` and makes it live.
    ///
    /// # Safety
    ///
    /// `len() < capacity()` must hold.
    #[allow(unsafe_code)]
    pub(crate) unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        // SAFETY: the caller guarantees slot `len` is allocated; it is not
        // live, so writing does not overwrite a value.
        unsafe { ptr::write(self.buf.as_mut_ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Shifts `[index, len)` up by one slot and writes `value` at `index`.
    ///
    /// # Safety
    ///
    /// `index <= len() < capacity()` must hold.
    #[allow(unsafe_code)]
    unsafe fn insert_unchecked(&mut self, index: usize, value: T) {
        debug_assert!(index <= self.len && self.len < self.capacity());
        // SAFETY: slots up to `len` are allocated. `ptr::copy` handles the
        // overlapping move of the tail.
        unsafe {
            let slot = self.buf.as_mut_ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            ptr::write(slot, value);
        }
        self.len += 1;
    }

    /// Appends `value` to the end of the array.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the array is full and cannot grow.
    /// The array is unchanged in that case.
    #[allow(unsafe_code)]
    pub fn push(&mut self, value: T) -> Result<(), DynArrayError> {
        self.grow_by(1)?;
        // SAFETY: `grow_by(1)` guarantees a free slot.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Removes and returns the last element, or `None` if the array is empty.
    #[allow(unsafe_code)]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is now outside the live region, so
        // ownership moves to the caller.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.len)) })
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::EmptyArray` if the array is empty.
    pub fn try_pop(&mut self) -> Result<T, DynArrayError> {
        self.pop().ok_or(DynArrayError::EmptyArray)
    }

    fn check_insert_position(&self, index: usize) -> Result<(), DynArrayError> {
        if index > self.len {
            Err(DynArrayError::IndexOutOfBounds {
                index,
                length: self.len,
            })
        } else {
            Ok(())
        }
    }

    /// Inserts `value` before position `index`, shifting later elements
    /// toward the end. `index == len()` appends.
    ///
    /// Returns the position of the inserted element.
    ///
    /// # Errors
    ///
    /// - `DynArrayError::IndexOutOfBounds` if `index > len()`
    /// - an allocation error if the array is full and cannot grow
    ///
    /// The array is unchanged on error.
    #[allow(unsafe_code)]
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize, DynArrayError> {
        self.check_insert_position(index)?;
        self.grow_by(1)?;
        // SAFETY: position checked above, free slot secured by `grow_by`.
        unsafe { self.insert_unchecked(index, value) };
        Ok(index)
    }

    /// Constructs an element with `make` and inserts it before `index`.
    ///
    /// `make` runs only after the position is validated and storage is
    /// secured, so a failed call never constructs a value.
    ///
    /// # Errors
    ///
    /// Same as [`DynamicArray::insert`].
    #[allow(unsafe_code)]
    pub fn emplace<F>(&mut self, index: usize, make: F) -> Result<usize, DynArrayError>
    where
        F: FnOnce() -> T,
    {
        self.check_insert_position(index)?;
        self.grow_by(1)?;
        let value = make();
        // SAFETY: as in `insert`; `make` cannot touch `self`.
        unsafe { self.insert_unchecked(index, value) };
        Ok(index)
    }

    /// Constructs an element with `make` at the end of the array and returns
    /// a reference to it.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the array is full and cannot grow.
    #[allow(unsafe_code)]
    pub fn emplace_back<F>(&mut self, make: F) -> Result<&mut T, DynArrayError>
    where
        F: FnOnce() -> T,
    {
        self.grow_by(1)?;
        let value = make();
        // SAFETY: `grow_by(1)` guarantees a free slot.
        unsafe { self.push_unchecked(value) };
        let last = self.len - 1;
        Ok(&mut self.as_mut_slice()[last])
    }

    /// Removes the element at `index`, shifts later elements down and
    /// returns the removed element.
    ///
    /// # Errors
    ///
    /// - `DynArrayError::EmptyArray` if the array is empty
    /// - `DynArrayError::IndexOutOfBounds` if `index >= len()`
    #[allow(unsafe_code)]
    pub fn remove(&mut self, index: usize) -> Result<T, DynArrayError> {
        if self.len == 0 {
            return Err(DynArrayError::EmptyArray);
        }
        if index >= self.len {
            return Err(DynArrayError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }

        // SAFETY: `index < len`, so the slot is live. The value is moved out
        // before the tail is shifted over it.
        let value = unsafe {
            let slot = self.buf.as_mut_ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            value
        };
        self.len -= 1;
        Ok(value)
    }

    /// Drops the element at `index` and shifts later elements down.
    ///
    /// Returns the position following the removed element, which is `index`
    /// itself: it now holds the element that came after, or equals `len()` if
    /// the last element was removed.
    ///
    /// # Errors
    ///
    /// Same as [`DynamicArray::remove`].
    pub fn erase(&mut self, index: usize) -> Result<usize, DynArrayError> {
        let removed = self.remove(index)?;
        drop(removed);
        Ok(index)
    }

    fn checked_range<R>(&self, range: R) -> Result<(usize, usize), DynArrayError>
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };

        if start > end || end > self.len {
            return Err(DynArrayError::InvalidRange {
                start,
                end,
                length: self.len,
            });
        }
        Ok((start, end))
    }

    /// Drops every element in `range` and shifts the remainder down.
    ///
    /// Returns the start of the range, which now holds the first element
    /// after the removed ones (or equals `len()`).
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::InvalidRange` if the range is reversed or ends
    /// past `len()`. The array is unchanged in that case.
    #[allow(unsafe_code)]
    pub fn erase_range<R>(&mut self, range: R) -> Result<usize, DynArrayError>
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = self.checked_range(range)?;
        if start == end {
            return Ok(start);
        }

        let tail = self.len - end;
        // If a destructor panics the tail leaks instead of being dropped twice.
        self.len = start;
        // SAFETY: `[start, end)` is live and dropped exactly once; the tail
        // `[end, end + tail)` is then moved down over the dropped slots.
        unsafe {
            let base = self.buf.as_mut_ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), end - start));
            ptr::copy(base.add(end), base.add(start), tail);
        }
        self.len = start + tail;
        Ok(start)
    }

    /// Drops the elements in `[len, len())`. Does nothing if `len >= len()`.
    /// Capacity is unchanged.
    #[allow(unsafe_code)]
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        // SAFETY: `[len, self.len)` is live. The length is lowered first so
        // a panicking destructor cannot cause a second drop.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr().add(len), self.len - len);
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element. Capacity is retained.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes to `new_len`, filling new slots with values from `make`.
    ///
    /// Growing reserves exactly `new_len` slots before anything is
    /// constructed. Shrinking drops the tail in place.
    ///
    /// # Errors
    ///
    /// Returns an allocation error, with the array unchanged, if growing
    /// fails.
    #[allow(unsafe_code)]
    pub fn resize_with<F>(&mut self, new_len: usize, mut make: F) -> Result<(), DynArrayError>
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.reserve(new_len)?;
        while self.len < new_len {
            // SAFETY: `reserve(new_len)` leaves a free slot for every
            // iteration.
            unsafe { self.push_unchecked(make()) };
        }
        Ok(())
    }

    /// Resizes to `new_len`, default-constructing new elements.
    ///
    /// # Errors
    ///
    /// Same as [`DynamicArray::resize_with`].
    pub fn resize(&mut self, new_len: usize) -> Result<(), DynArrayError>
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Resizes to `new_len`, filling new slots with clones of `value`.
    ///
    /// # Errors
    ///
    /// Same as [`DynamicArray::resize_with`].
    pub fn resize_value(&mut self, new_len: usize, value: &T) -> Result<(), DynArrayError>
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone())
    }

    /// Replaces the contents with `count` clones of `value`.
    ///
    /// Capacity grows to at least `count` and is never shrunk.
    ///
    /// # Errors
    ///
    /// Returns an allocation error, with the array unchanged, if the
    /// capacity cannot grow.
    pub fn assign(&mut self, count: usize, value: &T) -> Result<(), DynArrayError>
    where
        T: Clone,
    {
        self.reserve(count)?;
        self.clear();
        self.resize_value(count, value)
    }

    /// Replaces the contents with clones of `items`, in order.
    ///
    /// # Errors
    ///
    /// Returns an allocation error, with the array unchanged, if the
    /// capacity cannot grow.
    #[allow(unsafe_code)]
    pub fn assign_from_slice(&mut self, items: &[T]) -> Result<(), DynArrayError>
    where
        T: Clone,
    {
        self.reserve(items.len())?;
        self.clear();
        for item in items {
            // SAFETY: capacity covers `items.len()` elements.
            unsafe { self.push_unchecked(item.clone()) };
        }
        Ok(())
    }

    /// Replaces the contents with the items of `iter`, in order.
    ///
    /// The new contents are collected into a fresh buffer before the old one
    /// is released.
    ///
    /// # Errors
    ///
    /// Returns an allocation error, with the array unchanged, if the items
    /// do not fit in memory.
    pub fn assign_iter<I>(&mut self, iter: I) -> Result<(), DynArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        let fresh = Self::try_from_iter(iter)?;
        *self = fresh;
        Ok(())
    }

    /// Appends clones of `items`, growing once for the whole slice.
    ///
    /// # Errors
    ///
    /// Returns an allocation error, with the array unchanged, if the array
    /// cannot grow.
    #[allow(unsafe_code)]
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), DynArrayError>
    where
        T: Clone,
    {
        self.grow_by(items.len())?;
        for item in items {
            // SAFETY: `grow_by` secured `items.len()` free slots.
            unsafe { self.push_unchecked(item.clone()) };
        }
        Ok(())
    }

    /// Builds an array holding clones of `items`, with capacity exactly
    /// `items.len()`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the storage cannot be obtained.
    pub fn from_slice(items: &[T]) -> Result<Self, DynArrayError>
    where
        T: Clone,
    {
        let mut array = Self::with_capacity(items.len())?;
        array.extend_from_slice(items)?;
        Ok(array)
    }

    /// Deep copy with the same capacity as `self`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the new storage cannot be obtained.
    #[allow(unsafe_code)]
    pub fn try_clone(&self) -> Result<Self, DynArrayError>
    where
        T: Clone,
    {
        let mut copy = Self::with_capacity(self.capacity())?;
        for item in self.as_slice() {
            // SAFETY: the copy has the source's capacity, which is at least
            // the source's length.
            unsafe { copy.push_unchecked(item.clone()) };
        }
        Ok(copy)
    }

    /// Replaces `self` with a deep copy of `source`.
    ///
    /// The copy is built first and the old buffer released afterwards.
    ///
    /// # Errors
    ///
    /// Returns an allocation error, with `self` unchanged, if the copy
    /// cannot be built.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), DynArrayError>
    where
        T: Clone,
    {
        let copy = source.try_clone()?;
        *self = copy;
        Ok(())
    }

    /// Moves the contents out, leaving `self` empty with no allocation.
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Exchanges storage and length with `other`. No element is moved.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.buf, &mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::IndexOutOfBounds` if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, DynArrayError> {
        self.as_slice()
            .get(index)
            .ok_or(DynArrayError::IndexOutOfBounds {
                index,
                length: self.len,
            })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::IndexOutOfBounds` if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DynArrayError> {
        let length = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(DynArrayError::IndexOutOfBounds { index, length })
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty. Use [`DynamicArray::try_front`] when
    /// emptiness is expected.
    #[must_use]
    pub fn front(&self) -> &T {
        assert!(!self.is_empty(), "front() called on an empty array");
        &self.as_slice()[0]
    }

    /// # Panics
    ///
    /// Panics if the array is empty.
    #[must_use]
    pub fn front_mut(&mut self) -> &mut T {
        assert!(!self.is_empty(), "front_mut() called on an empty array");
        &mut self.as_mut_slice()[0]
    }

    /// Returns the last element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty. Use [`DynamicArray::try_back`] when
    /// emptiness is expected.
    #[must_use]
    pub fn back(&self) -> &T {
        assert!(!self.is_empty(), "back() called on an empty array");
        &self.as_slice()[self.len - 1]
    }

    /// # Panics
    ///
    /// Panics if the array is empty.
    #[must_use]
    pub fn back_mut(&mut self) -> &mut T {
        assert!(!self.is_empty(), "back_mut() called on an empty array");
        let last = self.len - 1;
        &mut self.as_mut_slice()[last]
    }

    /// # Errors
    ///
    /// Returns `DynArrayError::EmptyArray` if the array is empty.
    pub fn try_front(&self) -> Result<&T, DynArrayError> {
        self.as_slice().first().ok_or(DynArrayError::EmptyArray)
    }

    /// # Errors
    ///
    /// Returns `DynArrayError::EmptyArray` if the array is empty.
    pub fn try_back(&self) -> Result<&T, DynArrayError> {
        self.as_slice().last().ok_or(DynArrayError::EmptyArray)
    }

    /// Gives up the storage and length, leaving `self` empty.
    pub(crate) fn into_raw_parts(mut self) -> (RawBuffer<T>, usize) {
        let len = mem::replace(&mut self.len, 0);
        let buf = mem::replace(&mut self.buf, RawBuffer::new());
        (buf, len)
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // Live elements go first; the `buf` field then releases the block.
        self.clear();
    }
}
