use core::fmt;
use core::mem::MaybeUninit;

use const_default::ConstDefault;

use super::RawBuffer;

/// A storage buffer consisting of an uninitialized `MaybeUninit` array.
#[repr(transparent)]
pub struct ArrayStorage<A: ?Sized>(pub(crate) A);

impl<T, const N: usize> RawBuffer for ArrayStorage<[MaybeUninit<T>; N]> {
    type RawData = T;

    #[inline]
    fn slot_count(&self) -> usize {
        N
    }

    #[inline]
    fn data_ptr(&self) -> *const T {
        self.0.as_ptr().cast()
    }

    #[inline]
    fn data_ptr_mut(&mut self) -> *mut T {
        self.0.as_mut_ptr().cast()
    }
}

impl<T> RawBuffer for ArrayStorage<[MaybeUninit<T>]> {
    type RawData = T;

    #[inline]
    fn slot_count(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn data_ptr(&self) -> *const T {
        self.0.as_ptr().cast()
    }

    #[inline]
    fn data_ptr_mut(&mut self) -> *mut T {
        self.0.as_mut_ptr().cast()
    }
}

impl<A: ?Sized> fmt::Debug for ArrayStorage<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayStorage").finish_non_exhaustive()
    }
}

impl<T, const N: usize> ConstDefault for ArrayStorage<[MaybeUninit<T>; N]> {
    const DEFAULT: Self = Self(unsafe { MaybeUninit::uninit().assume_init() });
}

impl<T, const N: usize> Default for ArrayStorage<[MaybeUninit<T>; N]> {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "zeroize")]
impl<A: zeroize::Zeroize + ?Sized> zeroize::Zeroize for ArrayStorage<A> {
    #[inline]
    fn zeroize(&mut self) {
        self.0.zeroize()
    }
}
