//! Dynamic array built on explicit raw storage.
//!
//! [`DynArray<T>`] behaves like a standard resizable array: amortised
//! O(1) append, ordered insertion and removal at any index, contiguous
//! slice access. What it makes explicit is *when* storage is allocated,
//! relocated and released.
//!
//! # Architecture
//!
//! ```text
//! DynArray<T>
//! ├── storage: RawStorage<T>   (revec-raw, owns the block)
//! └── len: usize               (slots [0, len) are live)
//! ```
//!
//! Every mutation first asks whether the current block has room. If it
//! does, the element is constructed, destroyed or shifted in place. If it
//! does not, a larger block is allocated, populated, and swapped in; the
//! old block is released only after the new one is complete
//! ("relocate-and-swap").
//!
//! # Failure guarantees
//!
//! - Allocation failure and element-construction failure on a
//!   reallocating path leave the array exactly as it was.
//! - Copy construction and copy assignment unwind any partially built
//!   elements if a `Clone` panics.
//! - Moves are bitwise and cannot fail, so relocation itself never fails.
//!
//! This crate denies `unsafe` everywhere except `array.rs`, `guard.rs`
//! and `iter.rs`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod array;
mod clone;
mod guard;
pub mod iter;
mod macros;
mod traits;

pub use array::DynArray;
pub use iter::IntoIter;
pub use revec_core::{AllocError, EmplaceError, GrowthConfig, IndexError};
