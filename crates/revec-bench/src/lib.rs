//! Benchmark workloads for the revec dynamic array.
//!
//! Provides deterministic inputs shared by the Criterion benches:
//!
//! - [`filled`]: an array of `len` sequential values at exact capacity
//! - [`string_payloads`]: heap-owning elements, so copies cost something
//! - [`scattered_positions`]: insertion indices spread over a growing array

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use revec_array::DynArray;

/// Multiplier for [`scattered_positions`]; any large prime works.
const POSITION_STRIDE: usize = 7_919;

/// An array holding `0..len` with capacity exactly `len`.
pub fn filled(len: usize) -> DynArray<u64> {
    DynArray::from_fn(len, |i| i as u64)
}

/// `len` short owned strings.
pub fn string_payloads(len: usize) -> DynArray<String> {
    DynArray::from_fn(len, |i| format!("payload-{i:06}"))
}

/// Insertion indices for `count` inserts into an array that starts at
/// `start_len` elements. Position `i` is valid for length `start_len + i`.
pub fn scattered_positions(start_len: usize, count: usize) -> Vec<usize> {
    (0..count)
        .map(|i| (i.wrapping_mul(POSITION_STRIDE)) % (start_len + i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_is_exact() {
        let arr = filled(100);
        assert_eq!(arr.len(), 100);
        assert_eq!(arr.capacity(), 100);
        assert_eq!(arr[99], 99);
    }

    #[test]
    fn scattered_positions_are_in_bounds() {
        let positions = scattered_positions(10, 1000);
        for (i, &pos) in positions.iter().enumerate() {
            assert!(pos <= 10 + i);
        }
    }
}
