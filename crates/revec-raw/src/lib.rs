//! Raw slot storage for the revec dynamic array.
//!
//! [`RawStorage<T>`] owns one contiguous block of uninitialised slots and
//! nothing else. It never constructs or destroys elements on its own; the
//! array layer decides which slots are live and calls the unsafe slot
//! operations accordingly.
//!
//! ```text
//! RawStorage<T>
//! ├── ptr: Option<NonNull<T>>   (None iff capacity == 0)
//! └── capacity: usize           (slots, all logically uninitialised)
//! ```
//!
//! Ownership moves only through [`RawStorage::swap`] and
//! [`RawStorage::take`], both O(1); the source of a transfer is always
//! left in the null/0 state. There is no `Clone`.
//!
//! This crate denies `unsafe` everywhere except `storage.rs`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod failure;
pub mod storage;

pub use failure::handle_alloc_failure;
pub use revec_core::AllocError;
pub use storage::RawStorage;
