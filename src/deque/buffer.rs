use core::mem::MaybeUninit;

use crate::storage::{RawBuffer, RingStorage};

use super::{DequeInner, DequeView};

mod sealed {
    pub trait Sealed {}
}

/// Storage types usable by a `Deque`: either a fixed-size ring or the
/// unsized ring of a `DequeView`.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait DequeBuffer<T>: RawBuffer<RawData = T> + sealed::Sealed {
    /// Borrow a deque using this storage as a capacity-independent view.
    fn as_deque_view(this: &DequeInner<T, Self>) -> &DequeView<T>
    where
        Self: DequeBuffer<T>;

    /// Mutably borrow a deque using this storage as a capacity-independent view.
    fn as_deque_view_mut(this: &mut DequeInner<T, Self>) -> &mut DequeView<T>
    where
        Self: DequeBuffer<T>;
}

impl<T, const N: usize> sealed::Sealed for RingStorage<T, [MaybeUninit<T>; N]> {}

impl<T, const N: usize> DequeBuffer<T> for RingStorage<T, [MaybeUninit<T>; N]> {
    #[inline]
    fn as_deque_view(this: &DequeInner<T, Self>) -> &DequeView<T> {
        this
    }

    #[inline]
    fn as_deque_view_mut(this: &mut DequeInner<T, Self>) -> &mut DequeView<T> {
        this
    }
}

impl<T> sealed::Sealed for RingStorage<T, [MaybeUninit<T>]> {}

impl<T> DequeBuffer<T> for RingStorage<T, [MaybeUninit<T>]> {
    #[inline]
    fn as_deque_view(this: &DequeInner<T, Self>) -> &DequeView<T> {
        this
    }

    #[inline]
    fn as_deque_view_mut(this: &mut DequeInner<T, Self>) -> &mut DequeView<T> {
        this
    }
}
