//! The dynamic array: element lifetimes, growth and positional mutation.

#![allow(unsafe_code)]

use std::convert::Infallible;
use std::mem;

use revec_core::{AllocError, EmplaceError, GrowthConfig, IndexError};
use revec_raw::{handle_alloc_failure, RawStorage};

use crate::guard::InitGuard;

/// A contiguous growable array.
///
/// `DynArray` is a `(RawStorage, len)` pair. Slots `[0, len)` hold live
/// elements; slots `[len, capacity)` are uninitialised and reserved for
/// future growth. Storage is never resized in place: growing allocates a
/// new [`RawStorage`], relocates the elements into it, and swaps it in.
/// How much a full array grows is set by its [`GrowthConfig`], which
/// defaults to [`GrowthConfig::DOUBLING`].
///
/// ```
/// use revec_array::DynArray;
///
/// let mut arr = DynArray::new();
/// arr.push_back(1);
/// arr.push_back(2);
/// arr.insert(1, 5);
/// assert_eq!(arr, [1, 5, 2]);
///
/// arr.erase(0);
/// assert_eq!(arr, [5, 2]);
/// ```
///
/// # Positions
///
/// Positions are indices. `emplace`/`insert` accept `index <= len`;
/// `erase`/`remove` accept `index < len`. Anything else panics. Element
/// access goes through the slice (`arr[i]`, `get`, `get_unchecked`) or
/// through [`try_get`](Self::try_get) for a recoverable [`IndexError`].
///
/// # Reallocation and references
///
/// Any reallocating call ([`reserve`](Self::reserve) growth,
/// [`resize`](Self::resize) growth, appending to a full array) moves every
/// element to a new block. The borrow checker already forbids holding
/// references across those calls; raw pointers obtained from the slice
/// (`as_ptr`, `as_ptr_range`) are invalidated by them. In-place insertion
/// and erasure only move the elements at or after the affected index.
pub struct DynArray<T> {
    storage: RawStorage<T>,
    len: usize,
    growth: GrowthConfig,
}

impl<T> DynArray<T> {
    /// An empty array. Does not allocate.
    pub const fn new() -> Self {
        Self::with_growth(GrowthConfig::DOUBLING)
    }

    /// An empty array that grows by `growth` when full. Does not allocate.
    ///
    /// ```
    /// use revec_array::{DynArray, GrowthConfig};
    ///
    /// let mut arr = DynArray::with_growth(GrowthConfig::new(4, 8));
    /// arr.push_back(1);
    /// assert_eq!(arr.capacity(), 8);
    /// ```
    pub const fn with_growth(growth: GrowthConfig) -> Self {
        Self {
            storage: RawStorage::new(),
            len: 0,
            growth,
        }
    }

    /// An empty array with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_storage(RawStorage::with_capacity(capacity), 0)
    }

    /// Fallible form of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self::from_storage(RawStorage::try_with_capacity(capacity)?, 0))
    }

    fn from_storage(storage: RawStorage<T>, len: usize) -> Self {
        Self {
            storage,
            len,
            growth: GrowthConfig::DOUBLING,
        }
    }

    /// An array of `len` elements, element `i` being `f(i)`.
    ///
    /// Storage for exactly `len` slots is allocated up front. If `f`
    /// panics, the elements built so far are dropped and the storage is
    /// released before the panic propagates.
    pub fn from_fn<F>(len: usize, f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self::try_from_fn(len, f).unwrap_or_else(|err| handle_alloc_failure(err))
    }

    /// Fallible form of [`from_fn`](Self::from_fn).
    pub fn try_from_fn<F>(len: usize, mut f: F) -> Result<Self, AllocError>
    where
        F: FnMut(usize) -> T,
    {
        let mut storage = RawStorage::try_with_capacity(len)?;
        let mut guard = InitGuard::new(&mut storage, 0);
        for index in 0..len {
            guard.push(f(index));
        }
        let len = guard.finish();
        Ok(Self::from_storage(storage, len))
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the current block.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The growth policy applied when appending to a full array.
    pub fn growth(&self) -> GrowthConfig {
        self.growth
    }

    /// Replace the growth policy. Takes effect at the next reallocation;
    /// the current block is kept.
    pub fn set_growth(&mut self, growth: GrowthConfig) {
        self.growth = growth;
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[0, len)` are live.
        unsafe { self.storage.as_slice(self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots `[0, len)` are live.
        unsafe { self.storage.as_mut_slice(self.len) }
    }

    /// Checked access returning an [`IndexError`] instead of panicking.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexError> {
        let len = self.len;
        self.as_slice().get(index).ok_or(IndexError { index, len })
    }

    /// Checked mutable access; see [`try_get`](Self::try_get).
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(IndexError { index, len })
    }

    /// Ensure the capacity is at least `new_capacity`.
    ///
    /// A no-op when it already is. Otherwise a block of exactly
    /// `new_capacity` slots is allocated and the elements are moved into
    /// it; order and values are unchanged. Capacity never decreases.
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve(new_capacity) {
            handle_alloc_failure(err);
        }
    }

    /// Fallible form of [`reserve`](Self::reserve). On error the array is
    /// untouched.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        let new_storage = RawStorage::try_with_capacity(new_capacity)?;
        self.relocate_into(new_storage);
        Ok(())
    }

    /// Move every live element into `new_storage` and swap it in. The old
    /// block is released when `new_storage` goes out of scope.
    fn relocate_into(&mut self, mut new_storage: RawStorage<T>) {
        debug_assert!(new_storage.capacity() >= self.len);
        tracing::trace!(
            len = self.len,
            from = self.capacity(),
            to = new_storage.capacity(),
            "relocating elements"
        );
        // SAFETY: `[0, len)` are live here; the new block has room for
        // them and nothing live in it.
        unsafe { self.storage.move_to(0, self.len, &mut new_storage, 0) };
        self.storage.swap(&mut new_storage);
    }

    /// Drop the elements past `len`. A no-op when `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let old_len = mem::replace(&mut self.len, len);
        // SAFETY: `[len, old_len)` were live and are no longer counted.
        unsafe { self.storage.drop_range(len, old_len) }
    }

    /// Drop every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resize to `new_len`, filling new slots with `f()`.
    ///
    /// Shrinking drops the trailing elements. Growing first reserves
    /// exactly `new_len` slots, then constructs the new tail; if `f`
    /// panics, the part of the tail built so far is dropped and the
    /// original elements are kept.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len);
        let start = self.len;
        let mut guard = InitGuard::new(&mut self.storage, start);
        for _ in start..new_len {
            guard.push(f());
        }
        let added = guard.finish();
        self.len += added;
    }

    /// Append `value` and return a reference to it.
    pub fn push_back(&mut self, value: T) -> &mut T {
        self.emplace_back(move || value)
    }

    /// Append the element built by `construct` and return a reference to it.
    ///
    /// Grows with the same policy as [`emplace`](Self::emplace).
    pub fn emplace_back<F>(&mut self, construct: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let index = self.len;
        self.emplace(index, construct)
    }

    /// Fallible form of [`emplace_back`](Self::emplace_back).
    pub fn try_emplace_back<E, F>(&mut self, construct: F) -> Result<&mut T, EmplaceError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let index = self.len;
        self.try_emplace(index, construct)
    }

    /// Remove and return the last element, or `None` when empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is no longer counted.
        Some(unsafe { self.storage.read_at(self.len) })
    }

    /// Insert `value` at `index`, shifting later elements back by one.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.emplace(index, move || value)
    }

    /// Construct an element at `index`, preserving the order of the others.
    ///
    /// See [`try_emplace`](Self::try_emplace) for the two growth paths.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn emplace<F>(&mut self, index: usize, construct: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace(index, || Ok::<T, Infallible>(construct())) {
            Ok(slot) => slot,
            Err(EmplaceError::Alloc(err)) => handle_alloc_failure(err),
            Err(EmplaceError::Construct(never)) => match never {},
        }
    }

    /// Construct an element at `index` with a constructor that may fail.
    ///
    /// When the array is full (`len == capacity`), a block of
    /// [`growth().next_capacity(len)`](GrowthConfig::next_capacity) slots
    /// (`max(1, len * 2)` by default) is allocated, the element is built and
    /// placed at `index` in the new block, and only then are the prefix
    /// `[0, index)` and suffix `[index, len)` moved around it. A failed
    /// allocation or constructor leaves the array exactly as it was; the
    /// new block is simply released.
    ///
    /// When there is room, the element is built first. If `index == len`
    /// it goes straight into the free slot; otherwise `[index, len)` is
    /// shifted one slot towards the end and the element is moved into the
    /// gap.
    ///
    /// # Failure on the in-place path
    ///
    /// The in-place path mutates the array while it runs. Its only
    /// fallible step, building the element, happens before the shift, and
    /// the shift is a bitwise move. A constructor failure therefore never
    /// observes a half-shifted array here. This holds only while shifting
    /// stays a plain move; any change that runs user code between the
    /// shift and the final write has to restore that ordering.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn try_emplace<E, F>(&mut self, index: usize, construct: F) -> Result<&mut T, EmplaceError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        assert!(
            index <= self.len,
            "emplace index {index} out of bounds for length {}",
            self.len
        );
        if self.len == self.capacity() {
            self.emplace_with_reallocation(index, construct)
        } else {
            self.emplace_without_reallocation(index, construct)
        }
    }

    fn emplace_with_reallocation<E, F>(
        &mut self,
        index: usize,
        construct: F,
    ) -> Result<&mut T, EmplaceError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let new_capacity = self.growth.next_capacity(self.len)?;
        let mut new_storage = RawStorage::try_with_capacity(new_capacity)?;
        let value = construct().map_err(EmplaceError::Construct)?;

        tracing::trace!(
            len = self.len,
            from = self.capacity(),
            to = new_capacity,
            "relocating elements"
        );
        // SAFETY: `index <= len < new_capacity`. The new block has nothing
        // live; `[0, len)` are live in the old block and are moved to
        // `[0, index)` and `[index + 1, len + 1)` around the new element.
        unsafe {
            new_storage.write_at(index, value);
            self.storage.move_to(0, index, &mut new_storage, 0);
            self.storage
                .move_to(index, self.len - index, &mut new_storage, index + 1);
        }
        self.storage.swap(&mut new_storage);
        self.len += 1;
        // SAFETY: slot `index` was written above and is now counted.
        Ok(unsafe { self.storage.slot_mut(index) })
    }

    fn emplace_without_reallocation<E, F>(
        &mut self,
        index: usize,
        construct: F,
    ) -> Result<&mut T, EmplaceError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let value = construct().map_err(EmplaceError::Construct)?;
        // SAFETY: `len < capacity`, so slot `len` is free. `[index, len)`
        // are live and shift into `[index + 1, len + 1)`, freeing `index`.
        let slot = unsafe {
            if index < self.len {
                self.storage.shift_right(index, self.len);
            }
            self.storage.write_at(index, value)
        };
        self.len += 1;
        Ok(slot)
    }

    /// Remove and return the element at `index`, shifting later elements
    /// forward by one. O(len - index).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(index < len, "erase index {index} out of bounds for length {len}");
        // SAFETY: slot `index` is live and is moved out; the live slots
        // `(index, len)` then close the gap, leaving `len - 1` stale.
        let value = unsafe {
            let value = self.storage.read_at(index);
            self.storage.shift_left(index, len);
            value
        };
        self.len = len - 1;
        value
    }

    /// Drop the element at `index`, shifting later elements forward.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) {
        drop(self.remove(index));
    }

    /// Exchange contents and storage with `other` in O(1). Each array keeps
    /// its own growth policy.
    pub fn swap(&mut self, other: &mut Self) {
        self.storage.swap(&mut other.storage);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Split borrow of the block and the live count, for filling the
    /// uninitialised tail through an `InitGuard`.
    pub(crate) fn storage_and_len(&mut self) -> (&mut RawStorage<T>, &mut usize) {
        (&mut self.storage, &mut self.len)
    }

    /// Give up ownership of the storage, leaving the array empty with
    /// capacity 0. Used by the owning iterator.
    pub(crate) fn into_raw_parts(mut self) -> (RawStorage<T>, usize) {
        let len = mem::replace(&mut self.len, 0);
        (self.storage.take(), len)
    }
}

impl<T: Default> DynArray<T> {
    /// An array of `len` default-constructed elements, with capacity
    /// exactly `len`.
    pub fn with_len(len: usize) -> Self {
        Self::from_fn(len, |_| T::default())
    }

    /// Fallible form of [`with_len`](Self::with_len).
    pub fn try_with_len(len: usize) -> Result<Self, AllocError> {
        Self::try_from_fn(len, |_| T::default())
    }

    /// Resize to `new_len`, default-constructing any new elements.
    ///
    /// See [`resize_with`](Self::resize_with).
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        // SAFETY: `[0, len)` are live. The block itself is released by
        // `RawStorage`'s own drop.
        unsafe { self.storage.drop_range(0, len) }
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}
