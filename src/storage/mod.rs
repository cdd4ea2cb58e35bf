//! Backing storage types for collections.
//!
//! Each storage type is generic over its slot array `A`. The owning
//! collections use a sized array, while their views use the matching
//! unsized slice, which lets a `&mut` reference to an owned collection
//! coerce to a reference to its view.

use core::mem::MaybeUninit;
use core::slice;

use const_default::ConstDefault;

mod array;
mod bytes;
mod ring;

pub use self::{
    array::ArrayStorage,
    bytes::{ByteStorage, BYTE_STORAGE_ALIGN},
    ring::RingStorage,
};

/// Create a new array storage buffer for type `T` and maximum capacity `N`.
pub const fn array_storage<T, const N: usize>() -> ArrayStorage<[MaybeUninit<T>; N]> {
    ArrayStorage::DEFAULT
}

/// Create a new ring storage buffer for type `T`, holding `N + 1` slots.
pub const fn ring_storage<T, const N: usize>() -> RingStorage<T, [MaybeUninit<T>; N]> {
    RingStorage::DEFAULT
}

/// Create a new byte storage buffer for a maximum byte capacity `N`.
pub const fn byte_storage<const N: usize>() -> ByteStorage<[MaybeUninit<u8>; N]> {
    ByteStorage::DEFAULT
}

/// Provide access to the uninitialized slots of a storage buffer.
pub trait RawBuffer {
    /// The concrete slot type.
    type RawData;

    /// The number of slots in the buffer.
    fn slot_count(&self) -> usize;

    /// Access the first slot as a readonly pointer.
    fn data_ptr(&self) -> *const Self::RawData;

    /// Access the first slot as a mutable pointer.
    fn data_ptr_mut(&mut self) -> *mut Self::RawData;

    /// Access every slot of the buffer as an uninitialized slice.
    #[inline]
    fn as_uninit_slice(&mut self) -> &mut [MaybeUninit<Self::RawData>] {
        let count = self.slot_count();
        // SAFETY: the slots are contiguous and `MaybeUninit` places no
        // requirements on their contents.
        unsafe { slice::from_raw_parts_mut(self.data_ptr_mut().cast(), count) }
    }
}
