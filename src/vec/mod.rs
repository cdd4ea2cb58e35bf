//! Fixed-capacity vector types.
//!
//! A [`Vec<T, N>`] stores up to `N` elements inline and never allocates.
//! Every `Vec`, whatever its capacity, can be borrowed as a [`VecView<T>`]
//! which carries its capacity at runtime. All of the vector algorithms are
//! implemented on the view, so vectors of different capacities can be
//! assigned, compared and swapped with each other.
//!
//! ```
//! use fixed_collections::vec::{Vec, VecView};
//!
//! fn fill(view: &mut VecView<u32>) {
//!     while view.try_push(view.len() as u32).is_ok() {}
//! }
//!
//! let mut small = Vec::<u32, 3>::new();
//! let mut large = Vec::<u32, 10>::new();
//! fill(&mut small);
//! fill(&mut large);
//! assert_eq!(small, [0, 1, 2]);
//! assert_eq!(large.len(), 10);
//! assert!(small < large[..4]);
//! ```

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ops::{Bound, Deref, DerefMut, Range, RangeBounds};
use core::ptr;
use core::slice;

use const_default::ConstDefault;

use crate::error::{index_panic, StorageError, UpdateError};
use crate::storage::{array_storage, ArrayStorage, RawBuffer};

use self::insert::Inserter;

pub use self::{buffer::VecBuffer, into_iter::IntoIter};

mod buffer;

pub(crate) mod insert;

mod into_iter;

#[macro_use]
mod macros;

/// A vector with inline storage, generic over its storage type.
///
/// Use the [`Vec`] alias for an owned vector and [`VecView`] for a
/// capacity-independent view of one.
pub struct VecInner<T, S: VecBuffer<T> + ?Sized> {
    _marker: PhantomData<T>,
    len: usize,
    buffer: S,
}

/// A fixed-capacity vector storing up to `N` elements inline.
pub type Vec<T, const N: usize> = VecInner<T, ArrayStorage<[MaybeUninit<T>; N]>>;

/// A capacity-independent view of a fixed-capacity vector.
///
/// A `&mut Vec<T, N>` coerces to a `&mut VecView<T>` for any `N`. Views can
/// only be obtained by borrowing an owned `Vec`.
pub type VecView<T> = VecInner<T, ArrayStorage<[MaybeUninit<T>]>>;

#[inline]
pub(crate) fn bounds_to_range(range: impl RangeBounds<usize>, length: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(i) => *i,
        Bound::Excluded(i) => i.checked_add(1).unwrap_or_else(|| index_panic()),
    };
    let end = match range.end_bound() {
        Bound::Unbounded => length,
        Bound::Included(i) => i.checked_add(1).unwrap_or_else(|| index_panic()),
        Bound::Excluded(i) => *i,
    };
    if start > end || end > length {
        index_panic();
    }
    Range { start, end }
}

/// Create a `Vec<T, N>` containing `count` clones of `elem`.
pub fn from_elem<T: Clone, const N: usize>(elem: T, count: usize) -> Vec<T, N> {
    Vec::from_elem(elem, count)
}

/// Exchange the contents of two vectors, which may differ in capacity.
pub fn swap<T>(a: &mut VecView<T>, b: &mut VecView<T>) {
    a.swap_with(b)
}

impl<T, const N: usize> Vec<T, N> {
    /// Create a new, empty vector.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
            len: 0,
            buffer: array_storage(),
        }
    }

    /// Create a vector containing `count` clones of `elem`.
    pub fn from_elem(elem: T, count: usize) -> Self
    where
        T: Clone,
    {
        let mut vec = Self::new();
        vec.resize(count, elem);
        vec
    }

    /// Create a vector by cloning the contents of a slice.
    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice(data) {
            Ok(vec) => vec,
            Err(error) => error.panic(),
        }
    }

    /// Try to create a vector by cloning the contents of a slice.
    pub fn try_from_slice(data: &[T]) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut vec = Self::new();
        vec.try_extend_from_slice(data)?;
        Ok(vec)
    }

    /// Try to create a vector from the items of an iterator. The first item
    /// which does not fit is returned in the error.
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, UpdateError<T>> {
        let mut vec = Self::new();
        vec.try_extend(iter)?;
        Ok(vec)
    }

    /// Create a vector by cloning the contents of a vector of any capacity.
    pub fn cloned_from(other: &VecView<T>) -> Self
    where
        T: Clone,
    {
        Self::from_slice(other.as_slice())
    }

    /// Try to create a vector by cloning the contents of a vector of any capacity.
    pub fn try_cloned_from(other: &VecView<T>) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        Self::try_from_slice(other.as_slice())
    }

    /// Create a vector by moving every element out of a vector of any
    /// capacity, leaving it empty.
    pub fn moved_from(other: &mut VecView<T>) -> Self {
        match Self::try_moved_from(other) {
            Ok(vec) => vec,
            Err(error) => error.panic(),
        }
    }

    /// Try to create a vector by moving every element out of a vector of any
    /// capacity. On failure `other` is left unchanged.
    pub fn try_moved_from(other: &mut VecView<T>) -> Result<Self, StorageError> {
        let mut vec = Self::new();
        vec.try_take_from(other)?;
        Ok(vec)
    }
}

impl<T, S: VecBuffer<T> + ?Sized> VecInner<T, S> {
    /// Borrow this vector as a capacity-independent view.
    #[inline]
    pub fn as_view(&self) -> &VecView<T> {
        S::as_vec_view(self)
    }

    /// Mutably borrow this vector as a capacity-independent view.
    #[inline]
    pub fn as_mut_view(&mut self) -> &mut VecView<T> {
        S::as_vec_view_mut(self)
    }
}

impl<T> VecView<T> {
    /// Get a pointer to the first slot of the buffer.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.data_ptr()
    }

    /// Get a mutable pointer to the first slot of the buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.data_ptr_mut()
    }

    /// Access the contained elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Access the contained elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// The maximum number of elements this vector can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.slot_count()
    }

    /// The number of contained elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check whether the vector has reached its capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Access the unused slots of the buffer.
    #[inline]
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        let len = self.len;
        &mut self.buffer.as_uninit_slice()[len..]
    }

    /// Force the length of the vector.
    ///
    /// # Safety
    /// `len` must not exceed the capacity, and the first `len` slots must be
    /// initialized.
    #[inline]
    pub unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity());
        self.len = len;
    }

    /// Access an element, reporting `StorageError::OutOfRange` for an
    /// invalid index.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, StorageError> {
        self.as_slice().get(index).ok_or(StorageError::OutOfRange)
    }

    /// Mutably access an element, reporting `StorageError::OutOfRange` for
    /// an invalid index.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, StorageError> {
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(StorageError::OutOfRange)
    }

    /// Access the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Mutably access the first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Access the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Mutably access the last element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Append an element, panicking if the vector is full.
    pub fn push(&mut self, item: T) {
        match self.try_push(item) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Append an element, returning it back if the vector is full.
    pub fn try_push(&mut self, item: T) -> Result<(), UpdateError<T>> {
        if self.is_full() {
            return Err(UpdateError::new(StorageError::CapacityLimit, item));
        }
        unsafe {
            self.push_unchecked(item);
        }
        Ok(())
    }

    /// Append an element without checking the capacity.
    ///
    /// # Safety
    /// The vector must not be full.
    #[inline]
    pub unsafe fn push_unchecked(&mut self, item: T) {
        let len = self.len;
        self.as_mut_ptr().add(len).write(item);
        self.len = len + 1;
    }

    /// Append an element constructed by `f`, panicking if the vector is full.
    pub fn push_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_push_with(f) {
            Ok(item) => item,
            Err(error) => error.panic(),
        }
    }

    /// Append an element constructed by `f`. The capacity is checked before
    /// `f` is called, and the vector is unchanged if `f` panics.
    pub fn try_push_with<F>(&mut self, f: F) -> Result<&mut T, StorageError>
    where
        F: FnOnce() -> T,
    {
        let len = self.len;
        if len == self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        let item = self.buffer.as_uninit_slice()[len].write(f());
        self.len = len + 1;
        Ok(item)
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(unsafe { self.as_mut_ptr().add(self.len).read() })
    }

    /// Insert an element at `index`, shifting the following elements
    /// toward the back. Panics if the vector is full.
    pub fn insert(&mut self, index: usize, value: T) {
        match self.try_insert(index, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert an element at `index`, returning it back if the vector is full.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), UpdateError<T>> {
        if index > self.len {
            index_panic();
        }
        if self.is_full() {
            return Err(UpdateError::new(StorageError::CapacityLimit, value));
        }
        unsafe { self.insert_unchecked(index, value) };
        Ok(())
    }

    /// Insert an element constructed by `f` at `index`. Panics if the
    /// vector is full.
    pub fn insert_with<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_insert_with(index, f) {
            Ok(item) => item,
            Err(error) => error.panic(),
        }
    }

    /// Insert an element constructed by `f` at `index`. The element is
    /// constructed before any elements are shifted, so the vector is
    /// unchanged if `f` panics.
    pub fn try_insert_with<F>(&mut self, index: usize, f: F) -> Result<&mut T, StorageError>
    where
        F: FnOnce() -> T,
    {
        if index > self.len {
            index_panic();
        }
        if self.is_full() {
            return Err(StorageError::CapacityLimit);
        }
        let value = f();
        Ok(unsafe { self.insert_unchecked(index, value) })
    }

    unsafe fn insert_unchecked(&mut self, index: usize, value: T) -> &mut T {
        let len = self.len;
        let head = self.as_mut_ptr().add(index);
        if index < len {
            ptr::copy(head, head.add(1), len - index);
        }
        head.write(value);
        self.len = len + 1;
        &mut *head
    }

    /// Insert `count` clones of `value` at `index`.
    pub fn insert_n(&mut self, index: usize, count: usize, value: &T)
    where
        T: Clone,
    {
        match self.try_insert_n(index, count, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert `count` clones of `value` at `index`. If a clone panics, the
    /// vector is restored to its previous contents.
    pub fn try_insert_n(&mut self, index: usize, count: usize, value: &T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        if index > self.len {
            index_panic();
        }
        if count > self.capacity() - self.len {
            return Err(StorageError::CapacityLimit);
        }
        let mut insert = Inserter::open(self.buffer.as_uninit_slice(), &mut self.len, index, count);
        for _ in 0..count {
            insert.push_clone(value);
        }
        insert.complete();
        Ok(())
    }

    /// Insert clones of the contents of a slice at `index`.
    pub fn insert_slice(&mut self, index: usize, values: &[T])
    where
        T: Clone,
    {
        match self.try_insert_slice(index, values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert clones of the contents of a slice at `index`. If a clone
    /// panics, the vector is restored to its previous contents.
    pub fn try_insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        if index > self.len {
            index_panic();
        }
        if values.len() > self.capacity() - self.len {
            return Err(StorageError::CapacityLimit);
        }
        let mut insert =
            Inserter::open(self.buffer.as_uninit_slice(), &mut self.len, index, values.len());
        for item in values {
            insert.push_clone(item);
        }
        insert.complete();
        Ok(())
    }

    /// Insert the items of an iterator at `index`.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        match self.try_insert_iter(index, iter) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert the items of an iterator at `index`.
    ///
    /// Items are inserted until the vector is full. If the iterator still
    /// has items at that point, the inserted items are kept and the first
    /// item which did not fit is returned in the error. If the iterator
    /// panics, the vector is restored to its previous contents.
    pub fn try_insert_iter<I>(&mut self, index: usize, iter: I) -> Result<(), UpdateError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.len {
            index_panic();
        }
        let mut iter = iter.into_iter();
        let mut insert = Inserter::open_spare(self.buffer.as_uninit_slice(), &mut self.len, index);
        insert.push_iter(&mut iter);
        let full = insert.is_full();
        insert.complete();
        if full {
            if let Some(item) = iter.next() {
                return Err(UpdateError::new(StorageError::CapacityLimit, item));
            }
        }
        Ok(())
    }

    /// Append clones of the contents of a slice.
    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        match self.try_extend_from_slice(items) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Append clones of the contents of a slice, failing without changes if
    /// they do not all fit.
    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_insert_slice(self.len, items)
    }

    /// Append the items of an iterator. The first item which does not fit
    /// is returned in the error.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), UpdateError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        self.try_insert_iter(self.len, iter)
    }

    /// Remove and return the element at `index`, shifting the following
    /// elements toward the front.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            index_panic();
        }
        unsafe {
            let head = self.as_mut_ptr().add(index);
            let result = head.read();
            ptr::copy(head.add(1), head, len - index - 1);
            self.len = len - 1;
            result
        }
    }

    /// Remove and return the element at `index`, replacing it with the
    /// last element.
    pub fn swap_remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            index_panic();
        }
        let last = len - 1;
        self.len = last;
        unsafe {
            let base = self.as_mut_ptr();
            let result = base.add(index).read();
            if index != last {
                ptr::copy_nonoverlapping(base.add(last), base.add(index), 1);
            }
            result
        }
    }

    /// Drop the elements in `range`, shifting the following elements
    /// toward the front.
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) {
        struct CloseGap<'a, T> {
            vec: &'a mut VecView<T>,
            start: usize,
            end: usize,
            len: usize,
        }

        impl<T> Drop for CloseGap<'_, T> {
            fn drop(&mut self) {
                let tail = self.len - self.end;
                if tail > 0 {
                    unsafe {
                        let base = self.vec.as_mut_ptr();
                        ptr::copy(base.add(self.end), base.add(self.start), tail);
                    }
                }
                self.vec.len = self.start + tail;
            }
        }

        let len = self.len;
        let Range { start, end } = bounds_to_range(range, len);
        if start == end {
            return;
        }
        let base = self.as_mut_ptr();
        self.len = start;
        let guard = CloseGap {
            vec: self,
            start,
            end,
            len,
        };
        // a panicking destructor still closes the gap
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), end - start));
        }
        drop(guard);
    }

    /// Shorten the vector to at most `len` elements, dropping the rest.
    pub fn truncate(&mut self, len: usize) {
        let old_len = self.len;
        if len < old_len {
            self.len = len;
            unsafe {
                let to_drop = slice::from_raw_parts_mut(self.as_mut_ptr().add(len), old_len - len);
                ptr::drop_in_place(to_drop);
            }
        }
    }

    /// Drop every element.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resize the vector, filling new slots with clones of `value`.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        match self.try_resize(new_len, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Resize the vector, filling new slots with clones of `value`.
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        let len = self.len;
        if new_len > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        if new_len > len {
            let count = new_len - len;
            let mut insert = Inserter::open(self.buffer.as_uninit_slice(), &mut self.len, len, count);
            for _ in 1..count {
                insert.push_clone(&value);
            }
            insert.push(value);
            insert.complete();
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }

    /// Resize the vector, filling new slots with values returned by `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        match self.try_resize_with(new_len, f) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Resize the vector, filling new slots with values returned by `f`.
    pub fn try_resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), StorageError>
    where
        F: FnMut() -> T,
    {
        let len = self.len;
        if new_len > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        if new_len > len {
            let count = new_len - len;
            let mut insert = Inserter::open(self.buffer.as_uninit_slice(), &mut self.len, len, count);
            for _ in 0..count {
                insert.push(f());
            }
            insert.complete();
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }

    /// Keep only the elements for which `f` returns `true`.
    #[inline]
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.retain_mut(|r| f(r))
    }

    /// Keep only the elements for which `f` returns `true`, passing each
    /// element mutably.
    pub fn retain_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        struct Backshift<'a, T> {
            vec: &'a mut VecView<T>,
            processed: usize,
            deleted: usize,
            orig_len: usize,
        }

        impl<T> Drop for Backshift<'_, T> {
            fn drop(&mut self) {
                if self.deleted > 0 && self.processed < self.orig_len {
                    unsafe {
                        let base = self.vec.as_mut_ptr();
                        ptr::copy(
                            base.add(self.processed),
                            base.add(self.processed - self.deleted),
                            self.orig_len - self.processed,
                        );
                    }
                }
                self.vec.len = self.orig_len - self.deleted;
            }
        }

        let orig_len = self.len;
        let base = self.as_mut_ptr();
        self.len = 0;
        let mut shift = Backshift {
            vec: self,
            processed: 0,
            deleted: 0,
            orig_len,
        };
        while shift.processed < orig_len {
            let cur = unsafe { &mut *base.add(shift.processed) };
            if !f(cur) {
                shift.processed += 1;
                shift.deleted += 1;
                unsafe { ptr::drop_in_place(cur) };
                continue;
            }
            if shift.deleted > 0 {
                unsafe {
                    ptr::copy_nonoverlapping(
                        base.add(shift.processed),
                        base.add(shift.processed - shift.deleted),
                        1,
                    )
                };
            }
            shift.processed += 1;
        }
        drop(shift);
    }

    /// Remove consecutive repeated elements.
    #[inline]
    pub fn dedup(&mut self)
    where
        T: PartialEq,
    {
        self.dedup_by(|a, b| a == b)
    }

    /// Remove consecutive elements which map to the same key.
    #[inline]
    pub fn dedup_by_key<F, K>(&mut self, mut key_f: F)
    where
        F: FnMut(&mut T) -> K,
        K: PartialEq,
    {
        self.dedup_by(|a, b| key_f(a) == key_f(b))
    }

    /// Remove consecutive elements for which `same` returns `true`. The
    /// first argument is the candidate element and the second is the last
    /// retained element.
    pub fn dedup_by<F>(&mut self, mut same: F)
    where
        F: FnMut(&mut T, &mut T) -> bool,
    {
        struct FillGap<'a, T> {
            vec: &'a mut VecView<T>,
            read: usize,
            write: usize,
            len: usize,
        }

        impl<T> Drop for FillGap<'_, T> {
            fn drop(&mut self) {
                let remain = self.len - self.read;
                if remain > 0 && self.read != self.write {
                    unsafe {
                        let base = self.vec.as_mut_ptr();
                        ptr::copy(base.add(self.read), base.add(self.write), remain);
                    }
                }
                self.vec.len = self.write + remain;
            }
        }

        let len = self.len;
        if len < 2 {
            return;
        }
        let base = self.as_mut_ptr();
        let mut gap = FillGap {
            vec: self,
            read: 1,
            write: 1,
            len,
        };
        while gap.read < len {
            unsafe {
                let cur = base.add(gap.read);
                let prev = base.add(gap.write - 1);
                if same(&mut *cur, &mut *prev) {
                    gap.read += 1;
                    ptr::drop_in_place(cur);
                } else {
                    if gap.read != gap.write {
                        ptr::copy_nonoverlapping(cur, base.add(gap.write), 1);
                    }
                    gap.write += 1;
                    gap.read += 1;
                }
            }
        }
        drop(gap);
    }

    /// Replace the contents with `count` clones of `value`.
    pub fn assign_n(&mut self, count: usize, value: &T)
    where
        T: Clone,
    {
        match self.try_assign_n(count, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the contents with `count` clones of `value`.
    ///
    /// Existing elements are updated with `Clone::clone_from`, surplus
    /// elements are dropped and missing ones are appended. Fails without
    /// changes if `count` exceeds the capacity.
    pub fn try_assign_n(&mut self, count: usize, value: &T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        if count > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        let len = self.len;
        for item in &mut self.as_mut_slice()[..count.min(len)] {
            item.clone_from(value);
        }
        if count > len {
            self.try_insert_n(len, count - len, value)
        } else {
            self.truncate(count);
            Ok(())
        }
    }

    /// Replace the contents with clones of the contents of a slice.
    pub fn assign_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        match self.try_assign_from_slice(values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the contents with clones of the contents of a slice.
    ///
    /// Existing elements are updated with `Clone::clone_from`, surplus
    /// elements are dropped and missing ones are appended. Fails without
    /// changes if the slice exceeds the capacity.
    pub fn try_assign_from_slice(&mut self, values: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        if values.len() > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        let len = self.len;
        let overlap = values.len().min(len);
        self.as_mut_slice()[..overlap].clone_from_slice(&values[..overlap]);
        if values.len() > len {
            self.try_insert_slice(len, &values[len..])
        } else {
            self.truncate(values.len());
            Ok(())
        }
    }

    /// Replace the contents with the items of an iterator.
    pub fn assign_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        match self.try_assign_iter(iter) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the contents with the items of an iterator. The first item
    /// which does not fit is returned in the error.
    pub fn try_assign_iter<I>(&mut self, iter: I) -> Result<(), UpdateError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let len = self.len;
        let mut written = 0;
        while written < len {
            let Some(item) = iter.next() else { break };
            self.as_mut_slice()[written] = item;
            written += 1;
        }
        if written < len {
            self.truncate(written);
            Ok(())
        } else {
            self.try_extend(iter)
        }
    }

    /// Replace the contents with clones of the elements of another vector,
    /// which may differ in capacity.
    pub fn assign_from(&mut self, other: &VecView<T>)
    where
        T: Clone,
    {
        self.assign_from_slice(other.as_slice())
    }

    /// Replace the contents with clones of the elements of another vector,
    /// which may differ in capacity.
    pub fn try_assign_from(&mut self, other: &VecView<T>) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_assign_from_slice(other.as_slice())
    }

    /// Replace the contents by moving every element out of another vector,
    /// leaving it empty.
    pub fn take_from(&mut self, other: &mut VecView<T>) {
        match self.try_take_from(other) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the contents by moving every element out of another vector.
    /// Fails without changes to either vector if the elements do not fit.
    pub fn try_take_from(&mut self, other: &mut VecView<T>) -> Result<(), StorageError> {
        let count = other.len;
        if count > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        self.clear();
        other.len = 0;
        unsafe { ptr::copy_nonoverlapping(other.as_ptr(), self.as_mut_ptr(), count) };
        self.len = count;
        Ok(())
    }

    /// Exchange the contents of two vectors, which may differ in capacity.
    pub fn swap_with(&mut self, other: &mut VecView<T>) {
        match self.try_swap_with(other) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Exchange the contents of two vectors, which may differ in capacity.
    ///
    /// The common prefix is swapped in place, then the surplus of the longer
    /// vector is moved to the shorter one. Fails without changes if either
    /// vector's contents do not fit in the other.
    pub fn try_swap_with(&mut self, other: &mut VecView<T>) -> Result<(), StorageError> {
        let (a_len, b_len) = (self.len, other.len);
        if a_len > other.capacity() || b_len > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        let common = a_len.min(b_len);
        self.as_mut_slice()[..common].swap_with_slice(&mut other.as_mut_slice()[..common]);
        unsafe {
            if a_len > common {
                ptr::copy_nonoverlapping(
                    self.as_ptr().add(common),
                    other.as_mut_ptr().add(common),
                    a_len - common,
                );
            } else if b_len > common {
                ptr::copy_nonoverlapping(
                    other.as_ptr().add(common),
                    self.as_mut_ptr().add(common),
                    b_len - common,
                );
            }
        }
        self.len = b_len;
        other.len = a_len;
        Ok(())
    }
}

impl<T, S: VecBuffer<T> + ?Sized> AsRef<[T]> for VecInner<T, S> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_view().as_slice()
    }
}

impl<T, S: VecBuffer<T> + ?Sized> AsMut<[T]> for VecInner<T, S> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_view().as_mut_slice()
    }
}

impl<T, S: VecBuffer<T> + ?Sized> Borrow<[T]> for VecInner<T, S> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_view().as_slice()
    }
}

impl<T, S: VecBuffer<T> + ?Sized> BorrowMut<[T]> for VecInner<T, S> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_view().as_mut_slice()
    }
}

impl<T: Clone, const N: usize> Clone for Vec<T, N> {
    fn clone(&self) -> Self {
        let mut inst = Self::new();
        inst.extend_from_slice(self.as_slice());
        inst
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from_slice(source.as_slice());
    }
}

impl<T, const N: usize> ConstDefault for Vec<T, N> {
    const DEFAULT: Self = Self::new();
}

impl<T: fmt::Debug, S: VecBuffer<T> + ?Sized> fmt::Debug for VecInner<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_view().as_slice().fmt(f)
    }
}

impl<T, const N: usize> Default for Vec<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Deref for Vec<T, N> {
    type Target = VecView<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self
    }
}

impl<T, const N: usize> DerefMut for Vec<T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self
    }
}

impl<T> Deref for VecView<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for VecView<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, S: VecBuffer<T> + ?Sized> Drop for VecInner<T, S> {
    fn drop(&mut self) {
        self.as_mut_view().clear();
    }
}

impl<T, S: VecBuffer<T> + ?Sized> Extend<T> for VecInner<T, S> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        match self.as_mut_view().try_extend(iter) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<'a, T: Clone + 'a, S: VecBuffer<T> + ?Sized> Extend<&'a T> for VecInner<T, S> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        match self.as_mut_view().try_extend(iter.into_iter().cloned()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<T, const N: usize> FromIterator<T> for Vec<T, N> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        match Self::try_from_iter(iter) {
            Ok(vec) => vec,
            Err(error) => error.panic(),
        }
    }
}

impl<T: Clone, const N: usize> From<&[T]> for Vec<T, N> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T, const N: usize, const M: usize> From<[T; M]> for Vec<T, N> {
    #[inline]
    fn from(data: [T; M]) -> Self {
        Self::from_iter(data)
    }
}

impl<T, const N: usize> IntoIterator for Vec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, S: VecBuffer<T> + ?Sized> IntoIterator for &'a VecInner<T, S> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_view().as_slice().iter()
    }
}

impl<'a, T, S: VecBuffer<T> + ?Sized> IntoIterator for &'a mut VecInner<T, S> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_view().as_mut_slice().iter_mut()
    }
}

impl<T1, S1, T2, S2> PartialEq<VecInner<T2, S2>> for VecInner<T1, S1>
where
    T1: PartialEq<T2>,
    S1: VecBuffer<T1> + ?Sized,
    S2: VecBuffer<T2> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &VecInner<T2, S2>) -> bool {
        self.as_view().as_slice().eq(other.as_view().as_slice())
    }
}

impl<T: Eq, S: VecBuffer<T> + ?Sized> Eq for VecInner<T, S> {}

impl<T1, S1, T2> PartialEq<[T2]> for VecInner<T1, S1>
where
    T1: PartialEq<T2>,
    S1: VecBuffer<T1> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        self.as_view().as_slice().eq(other)
    }
}

impl<T1, S1, T2> PartialEq<&[T2]> for VecInner<T1, S1>
where
    T1: PartialEq<T2>,
    S1: VecBuffer<T1> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        self.as_view().as_slice().eq(*other)
    }
}

impl<T1, S1, T2, const N: usize> PartialEq<[T2; N]> for VecInner<T1, S1>
where
    T1: PartialEq<T2>,
    S1: VecBuffer<T1> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        self.as_view().as_slice().eq(other)
    }
}

impl<T1, S1, T2, const N: usize> PartialEq<&[T2; N]> for VecInner<T1, S1>
where
    T1: PartialEq<T2>,
    S1: VecBuffer<T1> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &&[T2; N]) -> bool {
        self.as_view().as_slice().eq(*other)
    }
}

impl<T1, T2, S2> PartialEq<VecInner<T2, S2>> for [T1]
where
    T1: PartialEq<T2>,
    S2: VecBuffer<T2> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &VecInner<T2, S2>) -> bool {
        self.eq(other.as_view().as_slice())
    }
}

impl<T1, T2, S2> PartialEq<VecInner<T2, S2>> for &[T1]
where
    T1: PartialEq<T2>,
    S2: VecBuffer<T2> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &VecInner<T2, S2>) -> bool {
        (*self).eq(other.as_view().as_slice())
    }
}

impl<T1, T2, S2, const N: usize> PartialEq<VecInner<T2, S2>> for [T1; N]
where
    T1: PartialEq<T2>,
    S2: VecBuffer<T2> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &VecInner<T2, S2>) -> bool {
        self.as_slice().eq(other.as_view().as_slice())
    }
}

impl<T, S1, S2> PartialOrd<VecInner<T, S2>> for VecInner<T, S1>
where
    T: PartialOrd,
    S1: VecBuffer<T> + ?Sized,
    S2: VecBuffer<T> + ?Sized,
{
    #[inline]
    fn partial_cmp(&self, other: &VecInner<T, S2>) -> Option<Ordering> {
        self.as_view()
            .as_slice()
            .partial_cmp(other.as_view().as_slice())
    }
}

impl<T, S> PartialOrd<[T]> for VecInner<T, S>
where
    T: PartialOrd,
    S: VecBuffer<T> + ?Sized,
{
    #[inline]
    fn partial_cmp(&self, other: &[T]) -> Option<Ordering> {
        self.as_view().as_slice().partial_cmp(other)
    }
}

impl<T: Ord, S: VecBuffer<T> + ?Sized> Ord for VecInner<T, S> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_view().as_slice().cmp(other.as_view().as_slice())
    }
}

impl<T: Hash, S: VecBuffer<T> + ?Sized> Hash for VecInner<T, S> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_view().as_slice().hash(state)
    }
}

impl<T, const N: usize, const M: usize> TryFrom<Vec<T, N>> for [T; M] {
    type Error = Vec<T, N>;

    #[inline]
    fn try_from(mut vec: Vec<T, N>) -> Result<Self, Self::Error> {
        if vec.len != M {
            return Err(vec);
        }
        vec.len = 0;
        let data = vec.as_ptr() as *const [T; M];
        Ok(unsafe { data.read() })
    }
}

#[cfg(feature = "std")]
impl<S: VecBuffer<u8> + ?Sized> std::io::Write for VecInner<u8, S> {
    #[inline]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let vec = self.as_mut_view();
        let count = buf.len().min(vec.capacity() - vec.len());
        vec.extend_from_slice(&buf[..count]);
        Ok(count)
    }
}

#[cfg(feature = "zeroize")]
impl<T, S> zeroize::Zeroize for VecInner<T, S>
where
    S: VecBuffer<T> + zeroize::Zeroize + ?Sized,
{
    fn zeroize(&mut self) {
        self.as_mut_view().clear();
        self.buffer.zeroize();
    }
}
