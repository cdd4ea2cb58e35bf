use core::fmt;
use core::iter::FusedIterator;
use core::ops::Range;
use core::ptr;
use core::slice;

use super::Vec;

/// An iterator which moves the elements out of a `Vec`.
pub struct IntoIter<T, const N: usize> {
    remain: Range<usize>,
    vec: Vec<T, N>,
}

impl<T, const N: usize> IntoIter<T, N> {
    pub(super) fn new(mut vec: Vec<T, N>) -> Self {
        let end = vec.len;
        // the iterator now owns the elements
        vec.len = 0;
        Self {
            remain: Range { start: 0, end },
            vec,
        }
    }

    /// Access the remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            slice::from_raw_parts(
                self.vec.as_ptr().add(self.remain.start),
                self.remain.len(),
            )
        }
    }

    /// Access the remaining elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe {
            slice::from_raw_parts_mut(
                self.vec.as_mut_ptr().add(self.remain.start),
                self.remain.len(),
            )
        }
    }

    fn clear(&mut self) {
        if !self.remain.is_empty() {
            let to_drop: *mut [T] = self.as_mut_slice();
            self.remain.start = self.remain.end;
            unsafe { ptr::drop_in_place(to_drop) };
        }
    }
}

impl<T, const N: usize> AsRef<[T]> for IntoIter<T, N> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> AsMut<[T]> for IntoIter<T, N> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.remain.start;
        if index != self.remain.end {
            self.remain.start = index + 1;
            unsafe { Some(ptr::read(self.vec.as_ptr().add(index))) }
        } else {
            None
        }
    }

    #[inline]
    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.len()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remain.len();
        (len, Some(len))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let mut index = self.remain.end;
        if index != self.remain.start {
            index -= 1;
            self.remain.end = index;
            unsafe { Some(ptr::read(self.vec.as_ptr().add(index))) }
        } else {
            None
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}
