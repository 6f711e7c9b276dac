//! Iteration over a [`DynArray`].
//!
//! Borrowing iteration is the slice's (`iter`, `iter_mut`, `for x in
//! &arr`). This module adds the owning iterator.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use revec_raw::RawStorage;

use crate::array::DynArray;

/// An iterator that moves elements out of a [`DynArray`].
///
/// Elements not consumed are dropped with the iterator.
pub struct IntoIter<T> {
    storage: RawStorage<T>,
    /// Slots `[start, end)` are still live.
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` are live and contiguous.
        unsafe { slice::from_raw_parts(self.storage.ptr_at(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: slot `start` is live; advancing `start` forgets it.
        let item = unsafe { self.storage.read_at(self.start) };
        self.start += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot `end` was live and is no longer counted.
        Some(unsafe { self.storage.read_at(self.end) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let (start, end) = (self.start, self.end);
        self.start = end;
        // SAFETY: `[start, end)` are the remaining live slots.
        unsafe { self.storage.drop_range(start, end) }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let (storage, len) = self.into_raw_parts();
        IntoIter {
            storage,
            start: 0,
            end: len,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}
