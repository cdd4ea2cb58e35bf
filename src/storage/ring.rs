use core::fmt;
use core::mem::MaybeUninit;

use const_default::ConstDefault;

use super::RawBuffer;

/// A storage buffer holding one more slot than its nominal capacity.
///
/// The spare slot is laid out directly in front of the slot array, so the
/// buffer is a single contiguous run of `N + 1` slots. Ring buffers keep one
/// slot vacant to tell a full ring from an empty one.
#[repr(C)]
pub struct RingStorage<T, A: ?Sized> {
    spare: MaybeUninit<T>,
    slots: A,
}

impl<T, const N: usize> RawBuffer for RingStorage<T, [MaybeUninit<T>; N]> {
    type RawData = T;

    #[inline]
    fn slot_count(&self) -> usize {
        N + 1
    }

    #[inline]
    fn data_ptr(&self) -> *const T {
        (self as *const Self).cast()
    }

    #[inline]
    fn data_ptr_mut(&mut self) -> *mut T {
        (self as *mut Self).cast()
    }
}

impl<T> RawBuffer for RingStorage<T, [MaybeUninit<T>]> {
    type RawData = T;

    #[inline]
    fn slot_count(&self) -> usize {
        self.slots.len() + 1
    }

    #[inline]
    fn data_ptr(&self) -> *const T {
        (self as *const Self).cast()
    }

    #[inline]
    fn data_ptr_mut(&mut self) -> *mut T {
        (self as *mut Self).cast()
    }
}

impl<T, A: ?Sized> fmt::Debug for RingStorage<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingStorage").finish_non_exhaustive()
    }
}

impl<T, const N: usize> ConstDefault for RingStorage<T, [MaybeUninit<T>; N]> {
    const DEFAULT: Self = Self {
        spare: MaybeUninit::uninit(),
        slots: unsafe { MaybeUninit::uninit().assume_init() },
    };
}

impl<T, const N: usize> Default for RingStorage<T, [MaybeUninit<T>; N]> {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: zeroize::Zeroize + ?Sized> zeroize::Zeroize for RingStorage<T, A> {
    #[inline]
    fn zeroize(&mut self) {
        self.spare.zeroize();
        self.slots.zeroize();
    }
}
