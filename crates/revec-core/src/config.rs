//! Growth policy configuration.

use crate::error::AllocError;

/// How much a full array grows when it needs one more slot.
///
/// A full array of length `len` is moved into a block of
/// [`next_capacity(len)`](Self::next_capacity) slots. The policy is a
/// plain value; [`GrowthConfig::DOUBLING`] is what `DynArray` uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthConfig {
    /// Multiplier applied to the current length. At least 2, so that the
    /// total relocation cost over N appends stays O(N).
    pub factor: usize,

    /// Capacity of the first block allocated for an empty array.
    /// At least 1.
    pub min_capacity: usize,
}

impl GrowthConfig {
    /// Default growth multiplier.
    pub const DEFAULT_FACTOR: usize = 2;

    /// Default capacity of the first allocation.
    pub const DEFAULT_MIN_CAPACITY: usize = 1;

    /// `max(1, len * 2)`.
    pub const DOUBLING: Self = Self {
        factor: Self::DEFAULT_FACTOR,
        min_capacity: Self::DEFAULT_MIN_CAPACITY,
    };

    /// Create a growth policy.
    ///
    /// # Panics
    ///
    /// Panics if `factor < 2` or `min_capacity == 0`; either would let a
    /// full array "grow" into a block with no free slot.
    pub const fn new(factor: usize, min_capacity: usize) -> Self {
        assert!(factor >= 2, "growth factor must be >= 2");
        assert!(min_capacity >= 1, "min_capacity must be >= 1");
        Self {
            factor,
            min_capacity,
        }
    }

    /// Capacity of the replacement block for a full array of `len` elements.
    ///
    /// Always strictly greater than `len`.
    pub fn next_capacity(&self, len: usize) -> Result<usize, AllocError> {
        if len == 0 {
            return Ok(self.min_capacity);
        }
        len.checked_mul(self.factor)
            .map(|grown| grown.max(self.min_capacity))
            .ok_or(AllocError::CapacityOverflow {
                requested: len,
                elem_size: 0,
            })
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self::DOUBLING
    }
}
