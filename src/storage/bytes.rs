use core::fmt;
use core::mem::MaybeUninit;

use const_default::ConstDefault;

use super::RawBuffer;

#[repr(align(8))]
struct SlotAlign;

/// The alignment of every byte storage buffer.
pub const BYTE_STORAGE_ALIGN: usize = core::mem::align_of::<SlotAlign>();

/// A reusable storage buffer consisting of an array of bytes, aligned
/// to `BYTE_STORAGE_ALIGN`.
#[repr(C)]
pub struct ByteStorage<A: ?Sized> {
    _align: [SlotAlign; 0],
    data: A,
}

impl<const N: usize> RawBuffer for ByteStorage<[MaybeUninit<u8>; N]> {
    type RawData = u8;

    #[inline]
    fn slot_count(&self) -> usize {
        N
    }

    #[inline]
    fn data_ptr(&self) -> *const u8 {
        self.data.as_ptr().cast()
    }

    #[inline]
    fn data_ptr_mut(&mut self) -> *mut u8 {
        self.data.as_mut_ptr().cast()
    }
}

impl RawBuffer for ByteStorage<[MaybeUninit<u8>]> {
    type RawData = u8;

    #[inline]
    fn slot_count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn data_ptr(&self) -> *const u8 {
        self.data.as_ptr().cast()
    }

    #[inline]
    fn data_ptr_mut(&mut self) -> *mut u8 {
        self.data.as_mut_ptr().cast()
    }
}

impl<const N: usize> ConstDefault for ByteStorage<[MaybeUninit<u8>; N]> {
    const DEFAULT: Self = Self {
        _align: [],
        data: unsafe { MaybeUninit::uninit().assume_init() },
    };
}

impl<A: ?Sized> fmt::Debug for ByteStorage<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStorage").finish_non_exhaustive()
    }
}

impl<const N: usize> Default for ByteStorage<[MaybeUninit<u8>; N]> {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "zeroize")]
impl<A: zeroize::Zeroize + ?Sized> zeroize::Zeroize for ByteStorage<A> {
    #[inline]
    fn zeroize(&mut self) {
        self.data.zeroize()
    }
}
