//! Error types for the revec workspace.
//!
//! Two failure families reach callers: the allocator could not provide a
//! block ([`AllocError`]), or a caller-supplied constructor refused to
//! produce an element ([`EmplaceError::Construct`]). Index errors only
//! come from the checked accessors; the positional operations assert.

use thiserror::Error;

/// Storage for the requested number of slots could not be obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The byte size of the request does not fit in `isize::MAX`, or
    /// computing the grown capacity overflowed.
    #[error("capacity overflow: {requested} slots of {elem_size} bytes")]
    CapacityOverflow {
        /// Number of slots requested.
        requested: usize,
        /// Size of one slot in bytes, or 0 when the slot count itself
        /// overflowed.
        elem_size: usize,
    },
    /// The global allocator returned null for a nonzero request.
    #[error("allocator refused {bytes} bytes (align {align})")]
    OutOfMemory {
        /// Size of the refused request in bytes.
        bytes: usize,
        /// Alignment of the refused request.
        align: usize,
    },
}

/// Failure of a fallible emplacement.
///
/// `E` is whatever error the caller's constructor returns. When the
/// constructor cannot fail, use [`Infallible`](std::convert::Infallible)
/// and the `Construct` arm becomes uninhabited.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum EmplaceError<E> {
    /// Replacement storage could not be allocated.
    #[error(transparent)]
    Alloc(#[from] AllocError),
    /// The element constructor returned an error.
    #[error("element construction failed: {0}")]
    Construct(E),
}

impl<E> EmplaceError<E> {
    /// Returns the allocation failure, if that is what happened.
    pub fn alloc_error(&self) -> Option<AllocError> {
        match self {
            Self::Alloc(err) => Some(*err),
            Self::Construct(_) => None,
        }
    }

    /// Consumes the error, returning the constructor's error if any.
    pub fn into_construct(self) -> Option<E> {
        match self {
            Self::Alloc(_) => None,
            Self::Construct(err) => Some(err),
        }
    }
}

/// A checked access used an index outside `[0, len)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("index {index} out of bounds for length {len}")]
pub struct IndexError {
    /// The rejected index.
    pub index: usize,
    /// Number of live elements at the time of the access.
    pub len: usize,
}
