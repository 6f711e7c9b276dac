//! Escalation of allocation failures for the infallible API forms.

use std::alloc::{handle_alloc_error, Layout};

use revec_core::AllocError;

/// Turn an [`AllocError`] into a non-recoverable failure.
///
/// `OutOfMemory` goes to [`handle_alloc_error`], matching what the
/// standard collections do; `CapacityOverflow` panics, because no
/// allocator could have satisfied the request.
#[cold]
#[inline(never)]
pub fn handle_alloc_failure(err: AllocError) -> ! {
    match err {
        AllocError::OutOfMemory { bytes, align } => match Layout::from_size_align(bytes, align) {
            Ok(layout) => handle_alloc_error(layout),
            Err(_) => panic!("{err}"),
        },
        AllocError::CapacityOverflow { .. } => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn capacity_overflow_panics() {
        handle_alloc_failure(AllocError::CapacityOverflow {
            requested: usize::MAX,
            elem_size: 8,
        });
    }
}
