use core::mem::MaybeUninit;

use crate::storage::{ArrayStorage, RawBuffer};

use super::{VecInner, VecView};

mod sealed {
    pub trait Sealed {}
}

/// Storage types usable by a `Vec`: either a fixed-size slot array or the
/// unsized slot slice of a `VecView`.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait VecBuffer<T>: RawBuffer<RawData = T> + sealed::Sealed {
    /// Borrow a vector using this storage as a capacity-independent view.
    fn as_vec_view(this: &VecInner<T, Self>) -> &VecView<T>
    where
        Self: VecBuffer<T>;

    /// Mutably borrow a vector using this storage as a capacity-independent view.
    fn as_vec_view_mut(this: &mut VecInner<T, Self>) -> &mut VecView<T>
    where
        Self: VecBuffer<T>;
}

impl<T, const N: usize> sealed::Sealed for ArrayStorage<[MaybeUninit<T>; N]> {}

impl<T, const N: usize> VecBuffer<T> for ArrayStorage<[MaybeUninit<T>; N]> {
    #[inline]
    fn as_vec_view(this: &VecInner<T, Self>) -> &VecView<T> {
        this
    }

    #[inline]
    fn as_vec_view_mut(this: &mut VecInner<T, Self>) -> &mut VecView<T> {
        this
    }
}

impl<T> sealed::Sealed for ArrayStorage<[MaybeUninit<T>]> {}

impl<T> VecBuffer<T> for ArrayStorage<[MaybeUninit<T>]> {
    #[inline]
    fn as_vec_view(this: &VecInner<T, Self>) -> &VecView<T> {
        this
    }

    #[inline]
    fn as_vec_view_mut(this: &mut VecInner<T, Self>) -> &mut VecView<T> {
        this
    }
}
