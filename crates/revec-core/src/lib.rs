//! Core types for the revec workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the error taxonomy shared by the storage and array layers and the
//! growth policy that decides how large a replacement block must be.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;

pub use config::GrowthConfig;
pub use error::{AllocError, EmplaceError, IndexError};
