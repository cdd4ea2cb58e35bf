use core::mem::{self, MaybeUninit};
use core::ptr;

/// Writes new elements into a gap opened in front of a vector's tail.
///
/// While the inserter is live the owning vector's length only covers the
/// elements before the gap. Completing the insertion closes any unfilled
/// part of the gap. Dropping an incomplete inserter (on unwind) drops the
/// new elements and moves the tail back to its original position.
pub(crate) struct Inserter<'a, T> {
    buf: &'a mut [MaybeUninit<T>],
    len: &'a mut usize,
    start: usize,
    end: usize,
    gap_end: usize,
    tail: usize,
}

impl<'a, T> Inserter<'a, T> {
    /// Open a gap of `count` slots at `index`, relocating the following
    /// elements. The caller guarantees `index <= *len` and that the buffer
    /// has room for `count` more elements.
    #[inline]
    pub fn open(buf: &'a mut [MaybeUninit<T>], len: &'a mut usize, index: usize, count: usize) -> Self {
        let tail = *len - index;
        assert!(count <= buf.len() - *len);
        if tail > 0 && count > 0 {
            let head = buf[index..].as_mut_ptr();
            unsafe { ptr::copy(head, head.add(count), tail) };
        }
        *len = index;
        Self {
            buf,
            len,
            start: index,
            end: index,
            gap_end: index + count,
            tail,
        }
    }

    /// Open a gap spanning all of the spare capacity at `index`.
    #[inline]
    pub fn open_spare(buf: &'a mut [MaybeUninit<T>], len: &'a mut usize, index: usize) -> Self {
        let spare = buf.len() - *len;
        Self::open(buf, len, index, spare)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.end == self.gap_end
    }

    #[inline]
    pub fn push(&mut self, val: T) {
        assert!(self.end < self.gap_end);
        self.buf[self.end].write(val);
        self.end += 1;
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

    /// Successfully complete the insertion, returning the number of new
    /// elements written.
    #[inline]
    pub fn complete(self) -> usize {
        let added = self.end - self.start;
        if self.end < self.gap_end && self.tail > 0 {
            let range = self.buf.as_mut_ptr_range();
            unsafe {
                ptr::copy(
                    range.start.add(self.gap_end),
                    range.start.add(self.end),
                    self.tail,
                )
            };
        }
        *self.len = self.end + self.tail;
        mem::forget(self);
        added
    }
}

impl<T> Drop for Inserter<'_, T> {
    #[inline]
    fn drop(&mut self) {
        let base = self.buf.as_mut_ptr();
        if self.start != self.end {
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    base.add(self.start).cast::<T>(),
                    self.end - self.start,
                ))
            };
        }
        if self.tail > 0 && self.gap_end != self.start {
            unsafe { ptr::copy(base.add(self.gap_end), base.add(self.start), self.tail) };
        }
        *self.len = self.start + self.tail;
    }
}
