use core::fmt;
use core::iter::FusedIterator;
use core::ptr;
use core::slice;

use crate::array::DynamicArray;
use crate::raw::RawBuffer;

/// Owning iterator over the elements of a `DynamicArray`
///
/// Takes over the array's storage block. Elements not yet yielded are
/// dropped together with the iterator.
pub struct IntoIter<T> {
    buf: RawBuffer<T>,
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(array: DynamicArray<T>) -> Self {
        let (buf, len) = array.into_raw_parts();
        Self {
            buf,
            front: 0,
            back: len,
        }
    }

    /// The elements not yet yielded.
    #[must_use]
    #[allow(unsafe_code)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` is the part of the block still owned by the
        // iterator.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.front), self.back - self.front) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[allow(unsafe_code)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: slot `front` is live; advancing `front` hands ownership to
        // the caller.
        let item = unsafe { ptr::read(self.buf.as_ptr().add(self.front)) };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[allow(unsafe_code)]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: slot `back` was live and is now outside the owned range.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.back)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        let remaining = self.back - self.front;
        // SAFETY: `[front, back)` is live and dropped once; the range is
        // emptied first so a panicking destructor cannot repeat it.
        unsafe {
            let rest = ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr().add(self.front), remaining);
            self.front = self.back;
            ptr::drop_in_place(rest);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
