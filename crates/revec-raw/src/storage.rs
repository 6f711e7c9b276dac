//! The storage owner: one block of uninitialised slots.
//!
//! Every slot operation is `unsafe` and states its precondition in terms
//! of which slots the caller knows to be live. Bounds are checked with
//! `debug_assert!` only; the array layer is responsible for validity.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

use revec_core::AllocError;

use crate::failure::handle_alloc_failure;

/// An exclusively owned block of `capacity` uninitialised `T` slots.
///
/// Dropping a `RawStorage` releases the block but never drops any `T`
/// inside it. Callers must destroy live elements first.
pub struct RawStorage<T> {
    /// `None` iff `capacity == 0`. Zero-sized `T` with nonzero capacity
    /// holds a dangling pointer and no allocation.
    ptr: Option<NonNull<T>>,
    capacity: usize,
    _owns: PhantomData<T>,
}

// SAFETY: `RawStorage<T>` uniquely owns its block, like `Box<[T]>`.
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: shared access only hands out `&T` / `*const T`.
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    /// The null/0 state. Makes no allocation call.
    pub const fn new() -> Self {
        Self {
            ptr: None,
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate exactly `capacity` slots.
    ///
    /// Allocation failure is escalated through [`handle_alloc_failure`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|err| handle_alloc_failure(err))
    }

    /// Allocate exactly `capacity` slots, reporting failure to the caller.
    ///
    /// `capacity == 0` returns the null state without calling the
    /// allocator. Zero-sized `T` never allocates.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        let layout = Self::layout(capacity)?;
        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: `layout` has nonzero size.
            let raw = unsafe { alloc::alloc(layout) };
            NonNull::new(raw.cast::<T>()).ok_or_else(|| {
                tracing::debug!(
                    bytes = layout.size(),
                    align = layout.align(),
                    capacity,
                    "slot allocation refused"
                );
                AllocError::OutOfMemory {
                    bytes: layout.size(),
                    align: layout.align(),
                }
            })?
        };
        Ok(Self {
            ptr: Some(ptr),
            capacity,
            _owns: PhantomData,
        })
    }

    fn layout(capacity: usize) -> Result<Layout, AllocError> {
        Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow {
            requested: capacity,
            elem_size: mem::size_of::<T>(),
        })
    }

    /// Number of slots in the block.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True when no block is held.
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Base address of the block, or a dangling well-aligned pointer when
    /// null. Valid for zero-length slices in either case.
    pub fn as_ptr(&self) -> *const T {
        self.base().as_ptr()
    }

    /// Mutable base address; see [`as_ptr`](Self::as_ptr).
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.base().as_ptr()
    }

    fn base(&self) -> NonNull<T> {
        self.ptr.unwrap_or(NonNull::dangling())
    }

    /// Address of slot `offset`. `offset == capacity` is the one-past-end
    /// address.
    pub fn ptr_at(&self, offset: usize) -> *const T {
        debug_assert!(offset <= self.capacity, "offset {offset} > capacity {}", self.capacity);
        self.as_ptr().wrapping_add(offset)
    }

    /// Mutable address of slot `offset`; see [`ptr_at`](Self::ptr_at).
    pub fn mut_ptr_at(&mut self, offset: usize) -> *mut T {
        debug_assert!(offset <= self.capacity, "offset {offset} > capacity {}", self.capacity);
        self.as_mut_ptr().wrapping_add(offset)
    }

    /// Construct `value` in slot `index` and return a reference to it.
    ///
    /// # Safety
    ///
    /// `index < capacity` and the slot is not live; a live value there is
    /// overwritten without being dropped.
    pub unsafe fn write_at(&mut self, index: usize, value: T) -> &mut T {
        debug_assert!(index < self.capacity, "slot {index} >= capacity {}", self.capacity);
        let slot = self.mut_ptr_at(index);
        // SAFETY: in bounds per caller; writing does not read the old slot.
        unsafe {
            slot.write(value);
            &mut *slot
        }
    }

    /// Move the value out of slot `index`, leaving it logically uninitialised.
    ///
    /// # Safety
    ///
    /// Slot `index` is live. The caller must not treat it as live again
    /// until it is rewritten.
    pub unsafe fn read_at(&mut self, index: usize) -> T {
        debug_assert!(index < self.capacity, "slot {index} >= capacity {}", self.capacity);
        // SAFETY: live slot per caller.
        unsafe { self.mut_ptr_at(index).read() }
    }

    /// Shared reference to slot `index`.
    ///
    /// # Safety
    ///
    /// Slot `index` is live.
    pub unsafe fn slot(&self, index: usize) -> &T {
        debug_assert!(index < self.capacity, "slot {index} >= capacity {}", self.capacity);
        // SAFETY: live slot per caller.
        unsafe { &*self.ptr_at(index) }
    }

    /// Mutable reference to slot `index`.
    ///
    /// # Safety
    ///
    /// Slot `index` is live.
    pub unsafe fn slot_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.capacity, "slot {index} >= capacity {}", self.capacity);
        // SAFETY: live slot per caller.
        unsafe { &mut *self.mut_ptr_at(index) }
    }

    /// View slots `[0, len)` as a slice.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` are live.
    pub unsafe fn as_slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.capacity);
        // SAFETY: base is non-null and aligned; `len` slots are live.
        unsafe { slice::from_raw_parts(self.as_ptr(), len) }
    }

    /// View slots `[0, len)` as a mutable slice.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` are live.
    pub unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.capacity);
        // SAFETY: base is non-null and aligned; `len` slots are live.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }

    /// Drop the values in slots `[start, end)` in order.
    ///
    /// If one of the destructors panics the rest are still dropped.
    ///
    /// # Safety
    ///
    /// Slots `[start, end)` are live; afterwards they are not.
    pub unsafe fn drop_range(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end && end <= self.capacity);
        let live = ptr::slice_from_raw_parts_mut(self.mut_ptr_at(start), end - start);
        // SAFETY: the range is live and owned by this block.
        unsafe { ptr::drop_in_place(live) }
    }

    /// Relocate `count` live values starting at slot `src` into `dst`,
    /// starting at slot `dst_offset`.
    ///
    /// This is a bitwise move; it cannot fail.
    ///
    /// # Safety
    ///
    /// Source slots `[src, src + count)` are live and become logically
    /// uninitialised. Destination slots `[dst_offset, dst_offset + count)`
    /// are in bounds and not live; they become live.
    pub unsafe fn move_to(&mut self, src: usize, count: usize, dst: &mut Self, dst_offset: usize) {
        debug_assert!(src + count <= self.capacity);
        debug_assert!(dst_offset + count <= dst.capacity);
        if count == 0 {
            return;
        }
        let from = self.ptr_at(src);
        let to = dst.mut_ptr_at(dst_offset);
        // SAFETY: both ranges in bounds; two distinct owners never share a block.
        unsafe { ptr::copy_nonoverlapping(from, to, count) }
    }

    /// Shift slots `[index, len)` one slot towards the end, leaving slot
    /// `index` logically uninitialised.
    ///
    /// # Safety
    ///
    /// `index <= len < capacity` and slots `[index, len)` are live.
    pub unsafe fn shift_right(&mut self, index: usize, len: usize) {
        debug_assert!(index <= len && len < self.capacity);
        let base = self.mut_ptr_at(index);
        // SAFETY: source and destination both lie within `[index, len]`.
        unsafe { ptr::copy(base, base.add(1), len - index) }
    }

    /// Shift slots `(index, len)` one slot towards the front, overwriting
    /// slot `index` and leaving slot `len - 1` logically uninitialised.
    ///
    /// # Safety
    ///
    /// `index < len <= capacity`, slot `index` has already been moved out
    /// or dropped, and slots `(index, len)` are live.
    pub unsafe fn shift_left(&mut self, index: usize, len: usize) {
        debug_assert!(index < len && len <= self.capacity);
        let base = self.mut_ptr_at(index);
        // SAFETY: source and destination both lie within `[index, len)`.
        unsafe { ptr::copy(base.add(1), base, len - index - 1) }
    }

    /// Exchange blocks with `other` in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Move the block out, leaving `self` in the null/0 state.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Release the block now. A no-op when already null.
    ///
    /// Live values in the block are leaked, not dropped.
    pub fn release(&mut self) {
        drop(self.take());
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        let Some(ptr) = self.ptr else {
            return;
        };
        if let Ok(layout) = Self::layout(self.capacity) {
            if layout.size() != 0 {
                // SAFETY: allocated in `try_with_capacity` with this layout.
                unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) }
            }
        }
    }
}

impl<T> Default for RawStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RawStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawStorage")
            .field("ptr", &self.as_ptr())
            .field("capacity", &self.capacity)
            .finish()
    }
}
