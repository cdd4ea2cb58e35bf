//! Fixed-capacity double-ended queue types.
//!
//! A [`Deque<T, N>`] stores up to `N` elements inline in a ring of `N + 1`
//! slots and never allocates. Every `Deque` can be borrowed as a
//! [`DequeView<T>`], which carries its capacity at runtime and implements
//! all of the deque algorithms.
//!
//! Insertion and removal in the middle of a deque relocate whichever side
//! of the position holds fewer elements.
//!
//! ```
//! use fixed_collections::deque::Deque;
//!
//! let mut deque = Deque::<u32, 11>::from([0, 1, 2, 3, 4]);
//! deque.insert(2, 10);
//! // the two leading elements were shifted toward the front, across the
//! // start of the ring
//! assert_eq!(deque.as_slices(), (&[0][..], &[1, 10, 2, 3, 4][..]));
//! assert_eq!(deque, [0, 1, 10, 2, 3, 4]);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ops::{Deref, DerefMut, Index, IndexMut, Range, RangeBounds};
use core::ptr;
use core::slice;

use const_default::ConstDefault;

use crate::error::{index_panic, StorageError, UpdateError};
use crate::storage::{ring_storage, RawBuffer, RingStorage};
use crate::vec::bounds_to_range;

use self::gap::{CloseGap, DropRun, InsertGap};
use self::ring::{Ring, Shift};

pub use self::{
    buffer::DequeBuffer,
    iter::{IntoIter, Iter, IterMut},
};

mod buffer;

mod gap;

mod iter;

#[macro_use]
mod macros;

mod ring;

/// A double-ended queue with inline storage, generic over its storage type.
///
/// Use the [`Deque`] alias for an owned deque and [`DequeView`] for a
/// capacity-independent view of one.
pub struct DequeInner<T, S: DequeBuffer<T> + ?Sized> {
    head: usize,
    tail: usize,
    _marker: PhantomData<T>,
    buffer: S,
}

/// A fixed-capacity double-ended queue storing up to `N` elements inline.
pub type Deque<T, const N: usize> = DequeInner<T, RingStorage<T, [MaybeUninit<T>; N]>>;

/// A capacity-independent view of a fixed-capacity deque.
///
/// A `&mut Deque<T, N>` coerces to a `&mut DequeView<T>` for any `N`. Views
/// can only be obtained by borrowing an owned `Deque`.
pub type DequeView<T> = DequeInner<T, RingStorage<T, [MaybeUninit<T>]>>;

/// Create a `Deque<T, N>` containing `count` clones of `elem`.
pub fn from_elem<T: Clone, const N: usize>(elem: T, count: usize) -> Deque<T, N> {
    Deque::from_elem(elem, count)
}

/// Exchange the contents of two deques, which may differ in capacity.
pub fn swap<T>(a: &mut DequeView<T>, b: &mut DequeView<T>) {
    a.swap_with(b)
}

impl<T, const N: usize> Deque<T, N> {
    /// Create a new, empty deque.
    pub const fn new() -> Self {
        Self {
            head: 0,
            tail: 0,
            _marker: PhantomData,
            buffer: ring_storage(),
        }
    }

    /// Create a deque containing `count` clones of `elem`.
    pub fn from_elem(elem: T, count: usize) -> Self
    where
        T: Clone,
    {
        let mut deque = Self::new();
        deque.resize(count, elem);
        deque
    }

    /// Create a deque by cloning the contents of a slice.
    pub fn from_slice(data: &[T]) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice(data) {
            Ok(deque) => deque,
            Err(error) => error.panic(),
        }
    }

    /// Try to create a deque by cloning the contents of a slice.
    pub fn try_from_slice(data: &[T]) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut deque = Self::new();
        deque.try_extend_from_slice(data)?;
        Ok(deque)
    }

    /// Try to create a deque from the items of an iterator. The first item
    /// which does not fit is returned in the error.
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, UpdateError<T>> {
        let mut deque = Self::new();
        deque.try_extend(iter)?;
        Ok(deque)
    }

    /// Create a deque by cloning the contents of a deque of any capacity.
    pub fn cloned_from(other: &DequeView<T>) -> Self
    where
        T: Clone,
    {
        match Self::try_cloned_from(other) {
            Ok(deque) => deque,
            Err(error) => error.panic(),
        }
    }

    /// Try to create a deque by cloning the contents of a deque of any capacity.
    pub fn try_cloned_from(other: &DequeView<T>) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let mut deque = Self::new();
        deque.try_assign_from(other)?;
        Ok(deque)
    }

    /// Create a deque by moving every element out of a deque of any
    /// capacity, leaving it empty.
    pub fn moved_from(other: &mut DequeView<T>) -> Self {
        match Self::try_moved_from(other) {
            Ok(deque) => deque,
            Err(error) => error.panic(),
        }
    }

    /// Try to create a deque by moving every element out of a deque of any
    /// capacity. On failure `other` is left unchanged.
    pub fn try_moved_from(other: &mut DequeView<T>) -> Result<Self, StorageError> {
        let mut deque = Self::new();
        deque.try_take_from(other)?;
        Ok(deque)
    }
}

impl<T, S: DequeBuffer<T> + ?Sized> DequeInner<T, S> {
    /// Borrow this deque as a capacity-independent view.
    #[inline]
    pub fn as_view(&self) -> &DequeView<T> {
        S::as_deque_view(self)
    }

    /// Mutably borrow this deque as a capacity-independent view.
    #[inline]
    pub fn as_mut_view(&mut self) -> &mut DequeView<T> {
        S::as_deque_view_mut(self)
    }
}

impl<T> DequeView<T> {
    #[inline]
    fn ring(&self) -> Ring {
        Ring::new(self.buffer.slot_count())
    }

    #[inline]
    fn slot_ptr(&self, index: usize) -> *const T {
        let slot = self.ring().forward(self.head, index);
        unsafe { self.buffer.data_ptr().add(slot) }
    }

    #[inline]
    fn slot_mut_ptr(&mut self, index: usize) -> *mut T {
        let slot = self.ring().forward(self.head, index);
        unsafe { self.buffer.data_ptr_mut().add(slot) }
    }

    /// The maximum number of elements this deque can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring().capacity()
    }

    /// The number of contained elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring().distance(self.head, self.tail)
    }

    /// Check whether the deque is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Check whether the deque has reached its capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring().next(self.tail) == self.head
    }

    /// Access the contained elements as the (up to) two contiguous runs of
    /// the ring, in order.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (first, second) = self.ring().split(self.head, self.len());
        let base = self.buffer.data_ptr();
        unsafe {
            (
                slice::from_raw_parts(base.add(first.start), first.len()),
                slice::from_raw_parts(base.add(second.start), second.len()),
            )
        }
    }

    /// Mutably access the contained elements as the (up to) two contiguous
    /// runs of the ring, in order.
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (first, second) = self.ring().split(self.head, self.len());
        let base = self.buffer.data_ptr_mut();
        unsafe {
            (
                slice::from_raw_parts_mut(base.add(first.start), first.len()),
                slice::from_raw_parts_mut(base.add(second.start), second.len()),
            )
        }
    }

    /// Rotate the ring so that the contained elements form a single
    /// slice, and return it.
    pub fn make_contiguous(&mut self) -> &mut [T] {
        let len = self.len();
        if self.head + len > self.ring().slots() {
            let head = self.head;
            self.buffer.as_uninit_slice().rotate_left(head);
            self.head = 0;
            self.tail = len;
        }
        self.as_mut_slices().0
    }

    /// Iterate over the contained elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        let (front, back) = self.as_slices();
        Iter::new(front, back)
    }

    /// Iterate mutably over the contained elements.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (front, back) = self.as_mut_slices();
        IterMut::new(front, back)
    }

    /// Access an element by position.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            Some(unsafe { &*self.slot_ptr(index) })
        } else {
            None
        }
    }

    /// Mutably access an element by position.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            Some(unsafe { &mut *self.slot_mut_ptr(index) })
        } else {
            None
        }
    }

    /// Access an element without checking the position.
    ///
    /// # Safety
    /// `index` must be less than the length of the deque.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        &*self.slot_ptr(index)
    }

    /// Mutably access an element without checking the position.
    ///
    /// # Safety
    /// `index` must be less than the length of the deque.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        &mut *self.slot_mut_ptr(index)
    }

    /// Access an element, reporting `StorageError::OutOfRange` for an
    /// invalid index.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, StorageError> {
        self.get(index).ok_or(StorageError::OutOfRange)
    }

    /// Mutably access an element, reporting `StorageError::OutOfRange` for
    /// an invalid index.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, StorageError> {
        self.get_mut(index).ok_or(StorageError::OutOfRange)
    }

    /// Access the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Mutably access the first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Access the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Mutably access the last element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len().checked_sub(1) {
            Some(index) => self.get_mut(index),
            None => None,
        }
    }

    /// Append an element, panicking if the deque is full.
    pub fn push_back(&mut self, item: T) {
        match self.try_push_back(item) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Append an element, returning it back if the deque is full.
    pub fn try_push_back(&mut self, item: T) -> Result<(), UpdateError<T>> {
        if self.is_full() {
            return Err(UpdateError::new(StorageError::CapacityLimit, item));
        }
        unsafe { self.push_back_unchecked(item) };
        Ok(())
    }

    #[inline]
    unsafe fn push_back_unchecked(&mut self, item: T) -> &mut T {
        let slot = self.buffer.data_ptr_mut().add(self.tail);
        slot.write(item);
        self.tail = self.ring().next(self.tail);
        &mut *slot
    }

    /// Append an element constructed by `f`, panicking if the deque is full.
    pub fn push_back_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_push_back_with(f) {
            Ok(item) => item,
            Err(error) => error.panic(),
        }
    }

    /// Append an element constructed by `f`. The capacity is checked before
    /// `f` is called, and the deque is unchanged if `f` panics.
    pub fn try_push_back_with<F>(&mut self, f: F) -> Result<&mut T, StorageError>
    where
        F: FnOnce() -> T,
    {
        if self.is_full() {
            return Err(StorageError::CapacityLimit);
        }
        let item = f();
        Ok(unsafe { self.push_back_unchecked(item) })
    }

    /// Prepend an element, panicking if the deque is full.
    pub fn push_front(&mut self, item: T) {
        match self.try_push_front(item) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Prepend an element, returning it back if the deque is full.
    pub fn try_push_front(&mut self, item: T) -> Result<(), UpdateError<T>> {
        if self.is_full() {
            return Err(UpdateError::new(StorageError::CapacityLimit, item));
        }
        unsafe { self.push_front_unchecked(item) };
        Ok(())
    }

    #[inline]
    unsafe fn push_front_unchecked(&mut self, item: T) -> &mut T {
        let head = self.ring().prev(self.head);
        let slot = self.buffer.data_ptr_mut().add(head);
        slot.write(item);
        self.head = head;
        &mut *slot
    }

    /// Prepend an element constructed by `f`, panicking if the deque is full.
    pub fn push_front_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_push_front_with(f) {
            Ok(item) => item,
            Err(error) => error.panic(),
        }
    }

    /// Prepend an element constructed by `f`. The capacity is checked
    /// before `f` is called, and the deque is unchanged if `f` panics.
    pub fn try_push_front_with<F>(&mut self, f: F) -> Result<&mut T, StorageError>
    where
        F: FnOnce() -> T,
    {
        if self.is_full() {
            return Err(StorageError::CapacityLimit);
        }
        let item = f();
        Ok(unsafe { self.push_front_unchecked(item) })
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.tail = self.ring().prev(self.tail);
        Some(unsafe { self.buffer.data_ptr().add(self.tail).read() })
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let head = self.head;
        self.head = self.ring().next(head);
        Some(unsafe { self.buffer.data_ptr().add(head).read() })
    }

    /// Insert an element at `index`. Panics if the deque is full.
    pub fn insert(&mut self, index: usize, value: T) {
        match self.try_insert(index, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert an element at `index`, returning it back if the deque is full.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), UpdateError<T>> {
        if index > self.len() {
            index_panic();
        }
        if self.is_full() {
            return Err(UpdateError::new(StorageError::CapacityLimit, value));
        }
        unsafe { self.insert_unchecked(index, value) };
        Ok(())
    }

    /// Insert an element constructed by `f` at `index`. Panics if the deque
    /// is full.
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
    /// constructed before any elements are relocated, so the deque is
    /// unchanged if `f` panics.
    pub fn try_insert_with<F>(&mut self, index: usize, f: F) -> Result<&mut T, StorageError>
    where
        F: FnOnce() -> T,
    {
        if index > self.len() {
            index_panic();
        }
        if self.is_full() {
            return Err(StorageError::CapacityLimit);
        }
        let value = f();
        Ok(unsafe { self.insert_unchecked(index, value) })
    }

    /// Relocate the shorter side of `index` by one slot and write `value`
    /// into the vacated slot. The deque must not be full.
    unsafe fn insert_unchecked(&mut self, index: usize, value: T) -> &mut T {
        let ring = self.ring();
        let len = self.len();
        let base = self.buffer.data_ptr_mut();
        let slot = match Shift::shorter_side(index, len - index) {
            Shift::Front => {
                ring.relocate(base, self.head, index, 1, Shift::Front);
                self.head = ring.prev(self.head);
                ring.forward(self.head, index)
            }
            Shift::Back => {
                let at = ring.forward(self.head, index);
                ring.relocate(base, at, len - index, 1, Shift::Back);
                self.tail = ring.next(self.tail);
                at
            }
        };
        let slot = base.add(slot);
        slot.write(value);
        &mut *slot
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
    /// deque is restored to its previous contents.
    pub fn try_insert_n(&mut self, index: usize, count: usize, value: &T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        if index > self.len() {
            index_panic();
        }
        if count > self.capacity() - self.len() {
            return Err(StorageError::CapacityLimit);
        }
        let mut gap = InsertGap::open(self, index, count);
        for _ in 0..count {
            gap.push_clone(value);
        }
        gap.complete();
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
    /// panics, the deque is restored to its previous contents.
    pub fn try_insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        if index > self.len() {
            index_panic();
        }
        if values.len() > self.capacity() - self.len() {
            return Err(StorageError::CapacityLimit);
        }
        let mut gap = InsertGap::open(self, index, values.len());
        for item in values {
            gap.push_clone(item);
        }
        gap.complete();
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
    /// Items are inserted until the deque is full. If the iterator still has
    /// items at that point, the inserted items are kept and the first item
    /// which did not fit is returned in the error. If the iterator panics,
    /// the deque is restored to its previous contents.
    pub fn try_insert_iter<I>(&mut self, index: usize, iter: I) -> Result<(), UpdateError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.len() {
            index_panic();
        }
        let mut iter = iter.into_iter();
        let mut gap = InsertGap::open_spare(self, index);
        gap.push_iter(&mut iter);
        let full = gap.is_full();
        gap.complete();
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
        self.try_insert_slice(self.len(), items)
    }

    /// Append the items of an iterator. The first item which does not fit
    /// is returned in the error.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), UpdateError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        self.try_insert_iter(self.len(), iter)
    }

    /// Remove and return the element at `index`, relocating the shorter
    /// side into the vacated slot.
    pub fn remove(&mut self, index: usize) -> T {
        if index >= self.len() {
            index_panic();
        }
        unsafe {
            let result = self.slot_ptr(index).read();
            self.close_gap(index, 1);
            result
        }
    }

    /// Drop the elements in `range`, relocating the shorter of the two
    /// remaining sides into the vacated slots.
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) {
        let Range { start, end } = bounds_to_range(range, self.len());
        let count = end - start;
        if count == 0 {
            return;
        }
        let (first, second) = self.ring().split(self.ring().forward(self.head, start), count);
        let base = self.buffer.data_ptr_mut();
        let guard = CloseGap {
            deque: self,
            start,
            count,
        };
        unsafe {
            let second = DropRun(ptr::slice_from_raw_parts_mut(base.add(second.start), second.len()));
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(first.start), first.len()));
            drop(second);
        }
        drop(guard);
    }

    /// Move the elements on the shorter side of a run of `count` vacated
    /// slots at `start` into the run, and retract the head or tail.
    unsafe fn close_gap(&mut self, start: usize, count: usize) {
        let ring = self.ring();
        let after = self.len() - start - count;
        let base = self.buffer.data_ptr_mut();
        match Shift::shorter_side(start, after) {
            Shift::Front => {
                ring.relocate(base, self.head, start, count, Shift::Back);
                self.head = ring.forward(self.head, count);
            }
            Shift::Back => {
                let src = ring.forward(self.head, start + count);
                ring.relocate(base, src, after, count, Shift::Front);
                self.tail = ring.backward(self.tail, count);
            }
        }
    }

    /// Shorten the deque to at most `len` elements, dropping the rest from
    /// the back.
    pub fn truncate(&mut self, len: usize) {
        let old_len = self.len();
        if len >= old_len {
            return;
        }
        let ring = self.ring();
        let (first, second) = ring.split(ring.forward(self.head, len), old_len - len);
        let base = self.buffer.data_ptr_mut();
        if len == 0 {
            self.head = 0;
            self.tail = 0;
        } else {
            self.tail = ring.forward(self.head, len);
        }
        unsafe {
            let second = DropRun(ptr::slice_from_raw_parts_mut(base.add(second.start), second.len()));
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(first.start), first.len()));
            drop(second);
        }
    }

    /// Drop every element.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resize the deque, filling new slots at the back with clones of `value`.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        match self.try_resize(new_len, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Resize the deque, filling new slots at the back with clones of `value`.
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        let len = self.len();
        if new_len > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        if new_len > len {
            let count = new_len - len;
            let mut gap = InsertGap::open(self, len, count);
            for _ in 1..count {
                gap.push_clone(&value);
            }
            gap.push(value);
            gap.complete();
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }

    /// Resize the deque, filling new slots at the back with values returned
    /// by `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        match self.try_resize_with(new_len, f) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Resize the deque, filling new slots at the back with values returned
    /// by `f`.
    pub fn try_resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), StorageError>
    where
        F: FnMut() -> T,
    {
        let len = self.len();
        if new_len > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        if new_len > len {
            let count = new_len - len;
            let mut gap = InsertGap::open(self, len, count);
            for _ in 0..count {
                gap.push(f());
            }
            gap.complete();
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
            deque: &'a mut DequeView<T>,
            processed: usize,
            deleted: usize,
            len: usize,
        }

        impl<T> Drop for Backshift<'_, T> {
            fn drop(&mut self) {
                if self.deleted == 0 {
                    return;
                }
                let ring = self.deque.ring();
                unsafe {
                    ring.relocate(
                        self.deque.buffer.data_ptr_mut(),
                        ring.forward(self.deque.head, self.processed),
                        self.len - self.processed,
                        self.deleted,
                        Shift::Front,
                    );
                }
                self.deque.tail = ring.backward(self.deque.tail, self.deleted);
            }
        }

        let len = self.len();
        let mut shift = Backshift {
            deque: self,
            processed: 0,
            deleted: 0,
            len,
        };
        while shift.processed < len {
            let cur = shift.deque.slot_mut_ptr(shift.processed);
            if !f(unsafe { &mut *cur }) {
                shift.processed += 1;
                shift.deleted += 1;
                unsafe { ptr::drop_in_place(cur) };
                continue;
            }
            if shift.deleted > 0 {
                let dst = shift.deque.slot_mut_ptr(shift.processed - shift.deleted);
                unsafe { ptr::copy_nonoverlapping(cur, dst, 1) };
            }
            shift.processed += 1;
        }
        drop(shift);
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
    /// elements are dropped from the back and missing ones are appended.
    /// Fails without changes if `count` exceeds the capacity.
    pub fn try_assign_n(&mut self, count: usize, value: &T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        if count > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        let len = self.len();
        for item in self.iter_mut().take(count) {
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

    /// Replace the contents with clones of the contents of a slice. Fails
    /// without changes if the slice exceeds the capacity.
    #[inline]
    pub fn try_assign_from_slice(&mut self, values: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_assign_cloned(values.iter())
    }

    /// Replace the contents with clones of the elements of another deque,
    /// which may differ in capacity.
    pub fn assign_from(&mut self, other: &DequeView<T>)
    where
        T: Clone,
    {
        match self.try_assign_from(other) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the contents with clones of the elements of another deque,
    /// which may differ in capacity. Fails without changes if the elements
    /// do not fit.
    #[inline]
    pub fn try_assign_from(&mut self, other: &DequeView<T>) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_assign_cloned(other.iter())
    }

    fn try_assign_cloned<'a, I>(&mut self, mut values: I) -> Result<(), StorageError>
    where
        T: Clone + 'a,
        I: ExactSizeIterator<Item = &'a T>,
    {
        let count = values.len();
        if count > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        let len = self.len();
        for (item, value) in self.iter_mut().zip(values.by_ref()) {
            item.clone_from(value);
        }
        if count > len {
            let mut gap = InsertGap::open(self, len, count - len);
            for value in values {
                gap.push_clone(value);
            }
            gap.complete();
        } else {
            self.truncate(count);
        }
        Ok(())
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
        let len = self.len();
        let mut written = 0;
        for slot in self.iter_mut() {
            let Some(item) = iter.next() else { break };
            *slot = item;
            written += 1;
        }
        if written < len {
            self.truncate(written);
            Ok(())
        } else {
            self.try_extend(iter)
        }
    }

    /// Replace the contents by moving every element out of another deque,
    /// leaving it empty.
    pub fn take_from(&mut self, other: &mut DequeView<T>) {
        match self.try_take_from(other) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Replace the contents by moving every element out of another deque.
    /// Fails without changes to either deque if the elements do not fit.
    pub fn try_take_from(&mut self, other: &mut DequeView<T>) -> Result<(), StorageError> {
        let count = other.len();
        if count > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        self.clear();
        let (front, back) = other.as_slices();
        let base = self.buffer.data_ptr_mut();
        unsafe {
            ptr::copy_nonoverlapping(front.as_ptr(), base, front.len());
            ptr::copy_nonoverlapping(back.as_ptr(), base.add(front.len()), back.len());
        }
        other.head = 0;
        other.tail = 0;
        self.head = 0;
        self.tail = count;
        Ok(())
    }

    /// Exchange the contents of two deques, which may differ in capacity.
    pub fn swap_with(&mut self, other: &mut DequeView<T>) {
        match self.try_swap_with(other) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Exchange the contents of two deques, which may differ in capacity.
    ///
    /// The common prefix is swapped in place, then the surplus of the longer
    /// deque is moved to the back of the shorter one. Fails without changes
    /// if either deque's contents do not fit in the other.
    pub fn try_swap_with(&mut self, other: &mut DequeView<T>) -> Result<(), StorageError> {
        let (a_len, b_len) = (self.len(), other.len());
        if a_len > other.capacity() || b_len > self.capacity() {
            return Err(StorageError::CapacityLimit);
        }
        let common = a_len.min(b_len);
        for (a, b) in self.iter_mut().zip(other.iter_mut()) {
            core::mem::swap(a, b);
        }
        if a_len > common {
            Self::move_surplus(self, other, common);
        } else if b_len > common {
            Self::move_surplus(other, self, common);
        }
        Ok(())
    }

    /// Move the elements of `from` past `keep` to the back of `to`.
    fn move_surplus(from: &mut DequeView<T>, to: &mut DequeView<T>, keep: usize) {
        let len = from.len();
        for index in keep..len {
            unsafe {
                let item = from.slot_ptr(index).read();
                to.push_back_unchecked(item);
            }
        }
        from.tail = from.ring().forward(from.head, keep);
    }
}

impl<T: Clone, const N: usize> Clone for Deque<T, N> {
    fn clone(&self) -> Self {
        Self::cloned_from(self)
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<T, const N: usize> ConstDefault for Deque<T, N> {
    const DEFAULT: Self = Self::new();
}

impl<T: fmt::Debug, S: DequeBuffer<T> + ?Sized> fmt::Debug for DequeInner<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_view().iter()).finish()
    }
}

impl<T, const N: usize> Default for Deque<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Deref for Deque<T, N> {
    type Target = DequeView<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self
    }
}

impl<T, const N: usize> DerefMut for Deque<T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self
    }
}

impl<T, S: DequeBuffer<T> + ?Sized> Drop for DequeInner<T, S> {
    fn drop(&mut self) {
        self.as_mut_view().clear();
    }
}

impl<T, S: DequeBuffer<T> + ?Sized> Extend<T> for DequeInner<T, S> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        match self.as_mut_view().try_extend(iter) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<'a, T: Clone + 'a, S: DequeBuffer<T> + ?Sized> Extend<&'a T> for DequeInner<T, S> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        match self.as_mut_view().try_extend(iter.into_iter().cloned()) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }
}

impl<T, const N: usize> FromIterator<T> for Deque<T, N> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        match Self::try_from_iter(iter) {
            Ok(deque) => deque,
            Err(error) => error.panic(),
        }
    }
}

impl<T: Clone, const N: usize> From<&[T]> for Deque<T, N> {
    #[inline]
    fn from(data: &[T]) -> Self {
        Self::from_slice(data)
    }
}

impl<T, const N: usize, const M: usize> From<[T; M]> for Deque<T, N> {
    #[inline]
    fn from(data: [T; M]) -> Self {
        Self::from_iter(data)
    }
}

impl<T, S: DequeBuffer<T> + ?Sized> Index<usize> for DequeInner<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.as_view().get(index) {
            Some(item) => item,
            None => index_panic(),
        }
    }
}

impl<T, S: DequeBuffer<T> + ?Sized> IndexMut<usize> for DequeInner<T, S> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.as_mut_view().get_mut(index) {
            Some(item) => item,
            None => index_panic(),
        }
    }
}

impl<T, const N: usize> IntoIterator for Deque<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, S: DequeBuffer<T> + ?Sized> IntoIterator for &'a DequeInner<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_view().iter()
    }
}

impl<'a, T, S: DequeBuffer<T> + ?Sized> IntoIterator for &'a mut DequeInner<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_view().iter_mut()
    }
}

impl<T1, S1, T2, S2> PartialEq<DequeInner<T2, S2>> for DequeInner<T1, S1>
where
    T1: PartialEq<T2>,
    S1: DequeBuffer<T1> + ?Sized,
    S2: DequeBuffer<T2> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &DequeInner<T2, S2>) -> bool {
        let (a, b) = (self.as_view(), other.as_view());
        a.len() == b.len() && a.iter().eq(b.iter())
    }
}

impl<T: Eq, S: DequeBuffer<T> + ?Sized> Eq for DequeInner<T, S> {}

impl<T1, S1, T2> PartialEq<[T2]> for DequeInner<T1, S1>
where
    T1: PartialEq<T2>,
    S1: DequeBuffer<T1> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &[T2]) -> bool {
        let view = self.as_view();
        view.len() == other.len() && view.iter().eq(other.iter())
    }
}

impl<T1, S1, T2> PartialEq<&[T2]> for DequeInner<T1, S1>
where
    T1: PartialEq<T2>,
    S1: DequeBuffer<T1> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &&[T2]) -> bool {
        <Self as PartialEq<[T2]>>::eq(self, other)
    }
}

impl<T1, S1, T2, const N: usize> PartialEq<[T2; N]> for DequeInner<T1, S1>
where
    T1: PartialEq<T2>,
    S1: DequeBuffer<T1> + ?Sized,
{
    #[inline]
    fn eq(&self, other: &[T2; N]) -> bool {
        <Self as PartialEq<[T2]>>::eq(self, other.as_slice())
    }
}

impl<T, S1, S2> PartialOrd<DequeInner<T, S2>> for DequeInner<T, S1>
where
    T: PartialOrd,
    S1: DequeBuffer<T> + ?Sized,
    S2: DequeBuffer<T> + ?Sized,
{
    #[inline]
    fn partial_cmp(&self, other: &DequeInner<T, S2>) -> Option<Ordering> {
        self.as_view().iter().partial_cmp(other.as_view().iter())
    }
}

impl<T: Ord, S: DequeBuffer<T> + ?Sized> Ord for DequeInner<T, S> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_view().iter().cmp(other.as_view().iter())
    }
}

impl<T: Hash, S: DequeBuffer<T> + ?Sized> Hash for DequeInner<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let view = self.as_view();
        state.write_usize(view.len());
        view.iter().for_each(|item| item.hash(state));
    }
}

#[cfg(feature = "zeroize")]
impl<T, S> zeroize::Zeroize for DequeInner<T, S>
where
    S: DequeBuffer<T> + zeroize::Zeroize + ?Sized,
{
    fn zeroize(&mut self) {
        self.as_mut_view().clear();
        self.buffer.zeroize();
    }
}
