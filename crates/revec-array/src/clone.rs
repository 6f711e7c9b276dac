//! Copy construction and copy assignment.

use crate::array::DynArray;
use crate::guard::InitGuard;

impl<T: Clone> DynArray<T> {
    /// An array of `n` clones of `elem`, with capacity exactly `n`.
    pub fn from_elem(elem: T, n: usize) -> Self {
        Self::from_fn(n, |_| elem.clone())
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Allocates exactly `self.len()` slots and clones each element in
    /// order. A panicking `Clone` drops the copies made so far. The copy
    /// has the same growth policy.
    fn clone(&self) -> Self {
        let source = self.as_slice();
        let mut copy = Self::from_fn(source.len(), |index| source[index].clone());
        copy.set_growth(self.growth());
        copy
    }

    /// Copy assignment.
    ///
    /// If `source` does not fit in the current capacity, a full copy is
    /// built first and swapped in, so a panicking `Clone` leaves `self`
    /// untouched. Otherwise the existing block is reused: the shared
    /// prefix is clone-assigned element by element, surplus elements are
    /// dropped, and missing ones are cloned into the free tail. The length
    /// is updated last.
    fn clone_from(&mut self, source: &Self) {
        if source.len() > self.capacity() {
            let mut copy = source.clone();
            self.swap(&mut copy);
            return;
        }

        let shared = self.len().min(source.len());
        self.as_mut_slice()[..shared].clone_from_slice(&source[..shared]);

        if source.len() < self.len() {
            self.truncate(source.len());
        } else if source.len() > self.len() {
            let start = self.len();
            let (storage, len) = self.storage_and_len();
            let mut guard = InitGuard::new(storage, start);
            for item in &source[start..] {
                guard.push(item.clone());
            }
            *len += guard.finish();
        }
    }
}
