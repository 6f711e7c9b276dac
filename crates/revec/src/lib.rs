//! revec: a dynamic array whose storage, growth and relocation are explicit.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the revec sub-crates. For most users, adding `revec` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use revec::prelude::*;
//!
//! let mut arr: DynArray<i32> = DynArray::new();
//! arr.push_back(1);
//! arr.push_back(2);
//! arr.insert(1, 5);
//! assert_eq!(arr, [1, 5, 2]);
//!
//! arr.erase(0);
//! assert_eq!(arr, [5, 2]);
//!
//! // Growth is visible: a full array doubles.
//! let mut full = dynarray![10, 20, 30, 40];
//! assert_eq!(full.capacity(), 4);
//! full.push_back(50);
//! assert_eq!(full.capacity(), 8);
//!
//! // Fallible construction reports instead of panicking.
//! let err = full.try_emplace(0, || Err::<i32, _>("rejected")).unwrap_err();
//! assert_eq!(err, EmplaceError::Construct("rejected"));
//! assert_eq!(full, [10, 20, 30, 40, 50]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`array`] | `revec-array` | `DynArray`, `IntoIter` |
//! | [`raw`] | `revec-raw` | `RawStorage`, allocation-failure escalation |
//! | [`types`] | `revec-core` | Errors, `GrowthConfig` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The dynamic array and its owning iterator.
pub mod array {
    pub use revec_array::{DynArray, IntoIter};
}

/// Raw slot storage.
pub mod raw {
    pub use revec_raw::{handle_alloc_failure, RawStorage};
}

/// Errors and growth configuration.
pub mod types {
    pub use revec_core::{AllocError, EmplaceError, GrowthConfig, IndexError};
}

pub use revec_array::dynarray;

/// Common imports.
pub mod prelude {
    pub use revec_array::{dynarray, DynArray};
    pub use revec_core::{AllocError, EmplaceError, IndexError};
}
