/// Create a [`Deque`](crate::deque::Deque) containing the arguments.
///
/// The capacity is taken from the type annotation of the result.
///
/// ```
/// use fixed_collections::{deque, deque::Deque};
///
/// let empty: Deque<u8, 4> = deque![];
/// let ones: Deque<u8, 4> = deque![1; 4];
/// let items: Deque<u8, 4> = deque![1, 2, 3];
/// assert!(empty.is_empty());
/// assert!(ones.is_full());
/// assert_eq!(items, [1, 2, 3]);
/// ```
#[macro_export]
macro_rules! deque {
    () => (
        $crate::deque::Deque::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::deque::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::deque::Deque::from([$($x),+])
    );
}
