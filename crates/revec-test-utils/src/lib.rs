//! Test utilities for revec development.
//!
//! Element types that make lifetimes and failures observable:
//!
//! - [`Tracked`] / [`LiveCounter`] — count live instances and drops, so a
//!   test can assert that nothing leaked and nothing was dropped twice.
//! - [`FaultyClone`] / [`CloneBudget`] — `Clone` panics once a shared
//!   budget is spent, to drive the unwinding paths of copy operations.
//! - [`FaultyDefault`] — `Default` panics once a thread-local budget is
//!   spent, for sized construction and `resize`.
//! - [`MoveOnly`] — no `Clone` at all.
//! - [`expect_panic`] — run a closure that must panic and return its message.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod faults;
pub mod tracked;

pub use faults::{expect_panic, CloneBudget, FaultyClone, FaultyDefault};
pub use tracked::{LiveCounter, MoveOnly, Tracked};
