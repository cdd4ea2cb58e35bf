//! A fixed-size slot holding a type-erased callable.
//!
//! A [`Function<A, R, N>`] stores any cloneable callable taking the argument
//! tuple `A` and returning `R` inline in `N` bytes, without allocating and
//! without dynamic trait objects. Every `Function` can be borrowed as a
//! [`FunctionView<A, R>`], so functions with different buffer sizes can be
//! assigned to one another.
//!
//! ```
//! use fixed_collections::function::Function;
//!
//! let offset = 5i64;
//! let mut add: Function<(i64,), i64, 16> = Function::from_fn(move |x: i64| x + offset);
//! assert_eq!(add.call((10,)), 15);
//!
//! let mut larger = Function::<(i64,), i64, 32>::new();
//! assert!(larger.try_call((1,)).is_none());
//! larger.assign_from(&add);
//! assert_eq!(larger.call((1,)), 6);
//! ```

use core::fmt;
use core::marker::PhantomData;
use core::mem::{align_of, size_of, MaybeUninit};
use core::ops::{Deref, DerefMut};
use core::ptr;

use const_default::ConstDefault;

use crate::error::{StorageError, UpdateError};
use crate::storage::{byte_storage, ByteStorage, RawBuffer, BYTE_STORAGE_ALIGN};

use self::dispatch::{Dispatch, Op};

pub use self::dispatch::Callable;

mod dispatch;

mod sealed {
    pub trait Sealed {}
}

/// Storage types usable by a `Function`: either a fixed-size byte array or
/// the unsized byte slice of a `FunctionView`.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait FunctionBuffer: RawBuffer<RawData = u8> + sealed::Sealed {
    /// Borrow a function using this storage as a size-independent view.
    fn as_function_view<A, R>(this: &FunctionInner<A, R, Self>) -> &FunctionView<A, R>
    where
        Self: FunctionBuffer;

    /// Mutably borrow a function using this storage as a size-independent view.
    fn as_function_view_mut<A, R>(this: &mut FunctionInner<A, R, Self>) -> &mut FunctionView<A, R>
    where
        Self: FunctionBuffer;
}

impl<const N: usize> sealed::Sealed for ByteStorage<[MaybeUninit<u8>; N]> {}

impl<const N: usize> FunctionBuffer for ByteStorage<[MaybeUninit<u8>; N]> {
    #[inline]
    fn as_function_view<A, R>(this: &FunctionInner<A, R, Self>) -> &FunctionView<A, R> {
        this
    }

    #[inline]
    fn as_function_view_mut<A, R>(this: &mut FunctionInner<A, R, Self>) -> &mut FunctionView<A, R> {
        this
    }
}

impl sealed::Sealed for ByteStorage<[MaybeUninit<u8>]> {}

impl FunctionBuffer for ByteStorage<[MaybeUninit<u8>]> {
    #[inline]
    fn as_function_view<A, R>(this: &FunctionInner<A, R, Self>) -> &FunctionView<A, R> {
        this
    }

    #[inline]
    fn as_function_view_mut<A, R>(this: &mut FunctionInner<A, R, Self>) -> &mut FunctionView<A, R> {
        this
    }
}

/// A callable slot with inline storage, generic over its storage type.
///
/// Use the [`Function`] alias for an owned slot and [`FunctionView`] for a
/// size-independent view of one.
pub struct FunctionInner<A, R, S: FunctionBuffer + ?Sized> {
    dispatch: Option<Dispatch<A, R>>,
    _marker: PhantomData<fn(A) -> R>,
    // the stored callable is not required to be `Send` or `Sync`
    _local: PhantomData<*const ()>,
    buffer: S,
}

/// A slot holding a callable of up to `N` bytes, invoked with the argument
/// tuple `A` and returning `R`.
pub type Function<A, R, const N: usize> = FunctionInner<A, R, ByteStorage<[MaybeUninit<u8>; N]>>;

/// A size-independent view of a callable slot.
///
/// A `&mut Function<A, R, N>` coerces to a `&mut FunctionView<A, R>` for any
/// `N`.
pub type FunctionView<A, R> = FunctionInner<A, R, ByteStorage<[MaybeUninit<u8>]>>;

#[cold]
#[inline(never)]
fn empty_panic() -> ! {
    panic!("Called an empty function");
}

impl<A, R, const N: usize> Function<A, R, N> {
    /// Create a new, empty function slot.
    pub const fn new() -> Self {
        Self {
            dispatch: None,
            _marker: PhantomData,
            _local: PhantomData,
            buffer: byte_storage(),
        }
    }

    /// Create a function slot holding `f`. Panics if `f` does not fit.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Callable<A, R> + Clone + 'static,
    {
        match Self::try_from_fn(f) {
            Ok(function) => function,
            Err(error) => error.panic(),
        }
    }

    /// Create a function slot holding `f`, returning it back if it is too
    /// large or too strictly aligned for the slot.
    pub fn try_from_fn<F>(f: F) -> Result<Self, UpdateError<F>>
    where
        F: Callable<A, R> + Clone + 'static,
    {
        let mut function = Self::new();
        function.try_set(f)?;
        Ok(function)
    }

    /// Create a function slot holding a clone of the callable in another
    /// slot of any size.
    pub fn from_view(other: &FunctionView<A, R>) -> Self {
        match Self::try_from_view(other) {
            Ok(function) => function,
            Err(error) => error.panic(),
        }
    }

    /// Create a function slot holding a clone of the callable in another
    /// slot of any size, failing if it does not fit.
    pub fn try_from_view(other: &FunctionView<A, R>) -> Result<Self, StorageError> {
        let mut function = Self::new();
        function.try_assign_from(other)?;
        Ok(function)
    }
}

impl<A, R, S: FunctionBuffer + ?Sized> FunctionInner<A, R, S> {
    /// Borrow this function as a size-independent view.
    #[inline]
    pub fn as_view(&self) -> &FunctionView<A, R> {
        S::as_function_view(self)
    }

    /// Mutably borrow this function as a size-independent view.
    #[inline]
    pub fn as_mut_view(&mut self) -> &mut FunctionView<A, R> {
        S::as_function_view_mut(self)
    }
}

impl<A, R> FunctionView<A, R> {
    /// The number of bytes available for a stored callable.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.slot_count()
    }

    /// Check whether a callable is stored.
    #[inline]
    pub fn is_some(&self) -> bool {
        self.dispatch.is_some()
    }

    /// Check whether the slot is empty.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.dispatch.is_none()
    }

    /// Invoke the stored callable. Panics if the slot is empty.
    #[inline]
    pub fn call(&mut self, args: A) -> R {
        match self.try_call(args) {
            Some(result) => result,
            None => empty_panic(),
        }
    }

    /// Invoke the stored callable, or return `None` if the slot is empty.
    #[inline]
    pub fn try_call(&mut self, args: A) -> Option<R> {
        let dispatch = self.dispatch?;
        Some(unsafe { (dispatch.invoke)(self.buffer.data_ptr_mut(), args) })
    }

    /// Replace the stored callable with `f`. Panics if `f` does not fit.
    pub fn set<F>(&mut self, f: F)
    where
        F: Callable<A, R> + Clone + 'static,
    {
        match self.try_set(f) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the stored callable with `f`.
    ///
    /// A callable larger than the slot is rejected with
    /// `StorageError::CapacityLimit`, and one aligned more strictly than
    /// `BYTE_STORAGE_ALIGN` with `StorageError::Unsupported`. The slot is
    /// unchanged on failure.
    pub fn try_set<F>(&mut self, f: F) -> Result<(), UpdateError<F>>
    where
        F: Callable<A, R> + Clone + 'static,
    {
        if align_of::<F>() > BYTE_STORAGE_ALIGN {
            return Err(UpdateError::new(StorageError::Unsupported, f));
        }
        if size_of::<F>() > self.capacity() {
            return Err(UpdateError::new(StorageError::CapacityLimit, f));
        }
        self.clear();
        unsafe { self.buffer.data_ptr_mut().cast::<F>().write(f) };
        self.dispatch = Some(Dispatch::new::<F>());
        Ok(())
    }

    /// Drop the stored callable, leaving the slot empty.
    pub fn clear(&mut self) {
        if let Some(dispatch) = self.dispatch.take() {
            unsafe { (dispatch.manage)(Op::Drop(self.buffer.data_ptr_mut())) };
        }
    }

    /// Replace the stored callable with a clone of the callable held by
    /// another slot of any size. Panics if it does not fit.
    pub fn assign_from(&mut self, other: &FunctionView<A, R>) {
        match self.try_assign_from(other) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the stored callable with a clone of the callable held by
    /// another slot of any size.
    ///
    /// The existing callable is dropped before the clone is made, so the
    /// slot is left empty if cloning panics. Fails without changes if the
    /// callable does not fit.
    pub fn try_assign_from(&mut self, other: &FunctionView<A, R>) -> Result<(), StorageError> {
        let Some(dispatch) = other.dispatch else {
            self.clear();
            return Ok(());
        };
        if dispatch.size() > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        self.clear();
        unsafe {
            (dispatch.manage)(Op::Clone {
                src: other.buffer.data_ptr(),
                dst: self.buffer.data_ptr_mut(),
            })
        };
        self.dispatch = Some(dispatch);
        Ok(())
    }

    /// Move the callable out of another slot of any size, leaving it empty.
    /// Panics if it does not fit.
    pub fn take_from(&mut self, other: &mut FunctionView<A, R>) {
        match self.try_take_from(other) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Move the callable out of another slot of any size, leaving it empty.
    /// Fails without changes to either slot if the callable does not fit.
    pub fn try_take_from(&mut self, other: &mut FunctionView<A, R>) -> Result<(), StorageError> {
        let Some(dispatch) = other.dispatch else {
            self.clear();
            return Ok(());
        };
        let size = dispatch.size();
        if size > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        self.clear();
        unsafe {
            ptr::copy_nonoverlapping(other.buffer.data_ptr(), self.buffer.data_ptr_mut(), size)
        };
        other.dispatch = None;
        self.dispatch = Some(dispatch);
        Ok(())
    }
}

impl<A, R, const N: usize> Clone for Function<A, R, N> {
    fn clone(&self) -> Self {
        Self::from_view(self)
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<A, R, const N: usize> ConstDefault for Function<A, R, N> {
    const DEFAULT: Self = Self::new();
}

impl<A, R, S: FunctionBuffer + ?Sized> fmt::Debug for FunctionInner<A, R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.as_view();
        f.debug_struct("Function")
            .field("capacity", &view.capacity())
            .field("is_some", &view.is_some())
            .finish_non_exhaustive()
    }
}

impl<A, R, const N: usize> Default for Function<A, R, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R, const N: usize> Deref for Function<A, R, N> {
    type Target = FunctionView<A, R>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self
    }
}

impl<A, R, const N: usize> DerefMut for Function<A, R, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self
    }
}

impl<A, R, S: FunctionBuffer + ?Sized> Drop for FunctionInner<A, R, S> {
    fn drop(&mut self) {
        self.as_mut_view().clear();
    }
}
