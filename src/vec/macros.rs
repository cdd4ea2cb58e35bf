/// Create a [`Vec`](crate::vec::Vec) containing the arguments.
///
/// The capacity is taken from the type annotation of the result.
///
/// ```
/// use fixed_collections::{vec, vec::Vec};
///
/// let empty: Vec<u8, 4> = vec![];
/// let zeros: Vec<u8, 4> = vec![0; 3];
/// let items: Vec<u8, 4> = vec![1, 2, 3];
/// assert!(empty.is_empty());
/// assert_eq!(zeros, [0, 0, 0]);
/// assert_eq!(items, [1, 2, 3]);
/// ```
#[macro_export]
macro_rules! vec {
    () => (
        $crate::vec::Vec::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::vec::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::vec::Vec::from([$($x),+])
    );
}
