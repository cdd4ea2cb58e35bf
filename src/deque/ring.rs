//! Index arithmetic over a ring of slots.
//!
//! A deque with capacity `N` owns a ring of `N + 1` slots. Live elements run
//! from `head` up to (not including) `tail`, wrapping at the end of the
//! ring. One slot is always vacant, so `head == tail` only when the deque is
//! empty.

use core::ops::Range;
use core::ptr;

/// The direction in which a run of elements is relocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shift {
    /// Toward the head of the deque.
    Front,
    /// Toward the tail of the deque.
    Back,
}

impl Shift {
    /// Select which side of a position to shift, given the number of
    /// elements before and after it. Ties shift the back.
    #[inline]
    pub const fn shorter_side(before: usize, after: usize) -> Self {
        if before < after {
            Self::Front
        } else {
            Self::Back
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ring {
    slots: usize,
}

impl Ring {
    #[inline]
    pub const fn new(slots: usize) -> Self {
        debug_assert!(slots > 0);
        Self { slots }
    }

    #[inline]
    pub const fn slots(self) -> usize {
        self.slots
    }

    #[inline]
    pub const fn capacity(self) -> usize {
        self.slots - 1
    }

    /// Advance `index` by `count` slots, wrapping at the end of the ring.
    #[inline]
    pub const fn forward(self, index: usize, count: usize) -> usize {
        let next = index + count;
        if next >= self.slots {
            next - self.slots
        } else {
            next
        }
    }

    /// Step `index` back by `count` slots, wrapping at the start of the ring.
    #[inline]
    pub const fn backward(self, index: usize, count: usize) -> usize {
        if index >= count {
            index - count
        } else {
            index + self.slots - count
        }
    }

    #[inline]
    pub const fn next(self, index: usize) -> usize {
        self.forward(index, 1)
    }

    #[inline]
    pub const fn prev(self, index: usize) -> usize {
        self.backward(index, 1)
    }

    /// The number of forward steps from `from` to `to`.
    #[inline]
    pub const fn distance(self, from: usize, to: usize) -> usize {
        if to >= from {
            to - from
        } else {
            to + self.slots - from
        }
    }

    /// Split a run of `count` slots starting at `start` into its physically
    /// contiguous parts.
    #[inline]
    pub fn split(self, start: usize, count: usize) -> (Range<usize>, Range<usize>) {
        let end = start + count;
        if end <= self.slots {
            (start..end, 0..0)
        } else {
            (start..self.slots, 0..end - self.slots)
        }
    }

    /// Move the `count` elements starting at `src` by `offset` slots.
    ///
    /// Elements are moved one at a time, starting with the element nearest
    /// the destination, so that every write lands on a slot which has
    /// already been vacated or was never occupied.
    ///
    /// # Safety
    /// `base` must address `slots` slots, and the source and destination
    /// runs must both lie within the ring.
    pub unsafe fn relocate<T>(self, base: *mut T, src: usize, count: usize, offset: usize, shift: Shift) {
        if count == 0 || offset == 0 {
            return;
        }
        match shift {
            Shift::Front => {
                let dst = self.backward(src, offset);
                for i in 0..count {
                    ptr::copy_nonoverlapping(
                        base.add(self.forward(src, i)),
                        base.add(self.forward(dst, i)),
                        1,
                    );
                }
            }
            Shift::Back => {
                let dst = self.forward(src, offset);
                for i in (0..count).rev() {
                    ptr::copy_nonoverlapping(
                        base.add(self.forward(src, i)),
                        base.add(self.forward(dst, i)),
                        1,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Ring, Shift};

    #[test]
    fn ring_wraps() {
        let ring = Ring::new(6);
        assert_eq!(ring.capacity(), 5);
        assert_eq!(ring.next(5), 0);
        assert_eq!(ring.prev(0), 5);
        assert_eq!(ring.forward(4, 3), 1);
        assert_eq!(ring.backward(1, 3), 4);
        assert_eq!(ring.forward(2, 0), 2);
        assert_eq!(ring.backward(2, 6), 2);
    }

    #[test]
    fn ring_distance() {
        let ring = Ring::new(6);
        assert_eq!(ring.distance(2, 2), 0);
        assert_eq!(ring.distance(1, 4), 3);
        assert_eq!(ring.distance(4, 1), 3);
        assert_eq!(ring.distance(0, 5), 5);
        assert_eq!(ring.distance(5, 4), 5);
    }

    #[test]
    fn ring_split() {
        let ring = Ring::new(6);
        assert_eq!(ring.split(1, 3), (1..4, 0..0));
        assert_eq!(ring.split(4, 2), (4..6, 0..0));
        assert_eq!(ring.split(4, 4), (4..6, 0..2));
        assert_eq!(ring.split(0, 0), (0..0, 0..0));
    }

    #[test]
    fn shorter_side() {
        assert_eq!(Shift::shorter_side(1, 3), Shift::Front);
        assert_eq!(Shift::shorter_side(3, 1), Shift::Back);
        assert_eq!(Shift::shorter_side(2, 2), Shift::Back);
        assert_eq!(Shift::shorter_side(0, 0), Shift::Back);
    }

    #[test]
    fn relocate_across_the_seam() {
        let ring = Ring::new(6);
        let mut slots = [0, 1, 2, 3, 4, 5];
        // move slots 4, 5, 0 two places toward the back
        unsafe { ring.relocate(slots.as_mut_ptr(), 4, 3, 2, Shift::Back) };
        assert_eq!(slots, [4, 5, 0, 3, 4, 5]);

        let mut slots = [0, 1, 2, 3, 4, 5];
        // move slots 1, 2, 3 two places toward the front
        unsafe { ring.relocate(slots.as_mut_ptr(), 1, 3, 2, Shift::Front) };
        assert_eq!(slots, [2, 3, 2, 3, 4, 1]);
    }
}
