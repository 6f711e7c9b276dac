//! Drop guard for filling uninitialised slots.

#![allow(unsafe_code)]

use std::mem;

use revec_raw::RawStorage;

/// Writes values into consecutive slots starting at `start`.
///
/// If the guard is dropped before [`finish`](Self::finish) (a constructor
/// panicked), every value it wrote is dropped again, so the storage is
/// left with exactly the live slots it had before.
pub(crate) struct InitGuard<'a, T> {
    storage: &'a mut RawStorage<T>,
    start: usize,
    written: usize,
}

impl<'a, T> InitGuard<'a, T> {
    /// Slots from `start` up to the capacity must not be live.
    pub(crate) fn new(storage: &'a mut RawStorage<T>, start: usize) -> Self {
        Self {
            storage,
            start,
            written: 0,
        }
    }

    pub(crate) fn push(&mut self, value: T) {
        let slot = self.start + self.written;
        assert!(
            slot < self.storage.capacity(),
            "slot {slot} beyond capacity {}",
            self.storage.capacity()
        );
        // SAFETY: in bounds; slots past `start + written` are not live.
        unsafe {
            self.storage.write_at(slot, value);
        }
        self.written += 1;
    }

    /// Keep the written values and return how many there are.
    pub(crate) fn finish(self) -> usize {
        let written = self.written;
        mem::forget(self);
        written
    }
}

impl<T> Drop for InitGuard<'_, T> {
    fn drop(&mut self) {
        // SAFETY: exactly `[start, start + written)` were written by us.
        unsafe { self.storage.drop_range(self.start, self.start + self.written) }
    }
}
