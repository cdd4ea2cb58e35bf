use core::mem;
use core::ptr;

use super::ring::{Ring, Shift};
use super::DequeView;
use crate::storage::RawBuffer;

/// Writes new elements into a gap opened inside a deque.
///
/// Opening the gap relocates the shorter side of the insertion point, but
/// `head` and `tail` are only updated when the insertion is completed.
/// Dropping an incomplete gap (on unwind) drops the new elements and moves
/// the relocated elements back, leaving the deque as it was.
pub(crate) struct InsertGap<'a, T> {
    deque: &'a mut DequeView<T>,
    ring: Ring,
    side: Shift,
    index: usize,
    len: usize,
    count: usize,
    written: usize,
}

impl<'a, T> InsertGap<'a, T> {
    /// Open a gap of `count` slots at `index`. The caller guarantees
    /// `index <= len` and that the deque has room for `count` more elements.
    pub fn open(deque: &'a mut DequeView<T>, index: usize, count: usize) -> Self {
        let ring = deque.ring();
        let len = deque.len();
        assert!(index <= len && count <= ring.capacity() - len);
        let side = Shift::shorter_side(index, len - index);
        let base = deque.buffer.data_ptr_mut();
        unsafe {
            match side {
                Shift::Front => ring.relocate(base, deque.head, index, count, Shift::Front),
                Shift::Back => ring.relocate(
                    base,
                    ring.forward(deque.head, index),
                    len - index,
                    count,
                    Shift::Back,
                ),
            }
        }
        Self {
            deque,
            ring,
            side,
            index,
            len,
            count,
            written: 0,
        }
    }

    /// Open a gap spanning all of the spare capacity at `index`.
    #[inline]
    pub fn open_spare(deque: &'a mut DequeView<T>, index: usize) -> Self {
        let spare = deque.capacity() - deque.len();
        Self::open(deque, index, spare)
    }

    /// The ring index of the first slot in the gap.
    #[inline]
    fn gap_start(&self) -> usize {
        match self.side {
            Shift::Front => self
                .ring
                .forward(self.ring.backward(self.deque.head, self.count), self.index),
            Shift::Back => self.ring.forward(self.deque.head, self.index),
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.written == self.count
    }

    #[inline]
    pub fn push(&mut self, val: T) {
        assert!(self.written < self.count);
        let slot = self.ring.forward(self.gap_start(), self.written);
        unsafe { self.deque.buffer.data_ptr_mut().add(slot).write(val) };
        self.written += 1;
    }

    #[inline]
    pub fn push_clone(&mut self, val: &T)
    where
        T: Clone,
    {
        self.push(val.clone());
    }

    #[inline]
    pub fn push_iter(&mut self, iter: &mut impl Iterator<Item = T>) {
        while !self.is_full() {
            let Some(item) = iter.next() else { break };
            self.push(item);
        }
    }

    /// Successfully complete the insertion, closing any unfilled part of
    /// the gap and returning the number of new elements written.
    pub fn complete(self) -> usize {
        let ring = self.ring;
        let remain = self.count - self.written;
        let base = self.deque.buffer.data_ptr_mut();
        unsafe {
            match self.side {
                Shift::Front => {
                    let start = ring.backward(self.deque.head, self.count);
                    ring.relocate(base, start, self.index + self.written, remain, Shift::Back);
                    self.deque.head = ring.backward(self.deque.head, self.written);
                }
                Shift::Back => {
                    let after = ring.forward(self.deque.head, self.index + self.count);
                    ring.relocate(base, after, self.len - self.index, remain, Shift::Front);
                    self.deque.tail = ring.forward(self.deque.tail, self.written);
                }
            }
        }
        let written = self.written;
        mem::forget(self);
        written
    }
}

impl<T> Drop for InsertGap<'_, T> {
    fn drop(&mut self) {
        let ring = self.ring;
        let start = self.gap_start();
        let base = self.deque.buffer.data_ptr_mut();
        unsafe {
            for i in 0..self.written {
                ptr::drop_in_place(base.add(ring.forward(start, i)));
            }
            match self.side {
                Shift::Front => ring.relocate(
                    base,
                    ring.backward(self.deque.head, self.count),
                    self.index,
                    self.count,
                    Shift::Back,
                ),
                Shift::Back => ring.relocate(
                    base,
                    ring.forward(self.deque.head, self.index + self.count),
                    self.len - self.index,
                    self.count,
                    Shift::Front,
                ),
            }
        }
    }
}

/// Closes a run of vacated slots inside a deque when dropped, whether the
/// elements were dropped normally or a destructor panicked.
pub(crate) struct CloseGap<'a, T> {
    pub deque: &'a mut DequeView<T>,
    pub start: usize,
    pub count: usize,
}

impl<T> Drop for CloseGap<'_, T> {
    fn drop(&mut self) {
        unsafe { self.deque.close_gap(self.start, self.count) };
    }
}

/// Drops a run of elements when dropped, so that a panicking destructor in
/// an earlier run does not leak it.
pub(crate) struct DropRun<T>(pub *mut [T]);

impl<T> Drop for DropRun<T> {
    fn drop(&mut self) {
        unsafe { ptr::drop_in_place(self.0) };
    }
}
