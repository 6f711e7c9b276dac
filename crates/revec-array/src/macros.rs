//! The `dynarray!` constructor macro.

/// Build a [`DynArray`](crate::DynArray) from a list of elements or from
/// `value; count`.
///
/// ```
/// use revec_array::dynarray;
///
/// let a = dynarray![1, 2, 3];
/// assert_eq!(a.capacity(), 3);
///
/// let b = dynarray![0u8; 4];
/// assert_eq!(b, [0, 0, 0, 0]);
///
/// let c: revec_array::DynArray<String> = dynarray![];
/// assert!(c.is_empty());
/// ```
#[macro_export]
macro_rules! dynarray {
    () => {
        $crate::DynArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynArray::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynArray::from([$($x),+])
    };
}
