#![allow(dead_code)]

use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};

thread_local! {
    static LIVE: Cell<usize> = const { Cell::new(0) };
    static CLONES: Cell<usize> = const { Cell::new(0) };
    static CLONE_FROMS: Cell<usize> = const { Cell::new(0) };
    static DROPS: Cell<usize> = const { Cell::new(0) };
    static FAIL_CLONE: Cell<Option<usize>> = const { Cell::new(None) };
    static FAIL_CLONE_FROM: Cell<Option<usize>> = const { Cell::new(None) };
    static FAIL_DROP: Cell<Option<i32>> = const { Cell::new(None) };
}

/// An element type which tracks its constructions, clones and drops on the
/// current thread, and can be told to panic while cloning or dropping.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Counted(i32);

impl Counted {
    pub fn new(value: i32) -> Self {
        LIVE.with(|c| c.set(c.get() + 1));
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl Clone for Counted {
    fn clone(&self) -> Self {
        let count = CLONES.with(|c| c.get()) + 1;
        if FAIL_CLONE.with(|f| f.get()) == Some(count) {
            FAIL_CLONE.with(|f| f.set(None));
            panic!("clone failed");
        }
        CLONES.with(|c| c.set(count));
        Self::new(self.0)
    }

    fn clone_from(&mut self, source: &Self) {
        let count = CLONE_FROMS.with(|c| c.get()) + 1;
        if FAIL_CLONE_FROM.with(|f| f.get()) == Some(count) {
            FAIL_CLONE_FROM.with(|f| f.set(None));
            panic!("clone_from failed");
        }
        CLONE_FROMS.with(|c| c.set(count));
        self.0 = source.0;
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        LIVE.with(|c| c.set(c.get() - 1));
        DROPS.with(|c| c.set(c.get() + 1));
        if FAIL_DROP.with(|f| f.get()) == Some(self.0) {
            FAIL_DROP.with(|f| f.set(None));
            panic!("drop failed");
        }
    }
}

/// Reset the counters for the current thread.
pub fn reset() {
    CLONES.with(|c| c.set(0));
    CLONE_FROMS.with(|c| c.set(0));
    DROPS.with(|c| c.set(0));
    FAIL_CLONE.with(|f| f.set(None));
    FAIL_CLONE_FROM.with(|f| f.set(None));
    FAIL_DROP.with(|f| f.set(None));
}

/// The number of `Counted` values currently alive.
pub fn live() -> usize {
    LIVE.with(|c| c.get())
}

pub fn clones() -> usize {
    CLONES.with(|c| c.get())
}

pub fn clone_froms() -> usize {
    CLONE_FROMS.with(|c| c.get())
}

pub fn drops() -> usize {
    DROPS.with(|c| c.get())
}

/// Panic once, on the `n`th call to `Clone::clone` after the last reset.
pub fn fail_clone_at(n: usize) {
    FAIL_CLONE.with(|f| f.set(Some(n)));
}

/// Panic once, on the `n`th call to `Clone::clone_from` after the last reset.
pub fn fail_clone_from_at(n: usize) {
    FAIL_CLONE_FROM.with(|f| f.set(Some(n)));
}

/// Panic once, when the next value equal to `value` is dropped. The value
/// is still counted as dropped.
pub fn fail_drop_of(value: i32) {
    FAIL_DROP.with(|f| f.set(Some(value)));
}

/// Create a sequence of counted values.
pub fn counted(values: &[i32]) -> std::vec::Vec<Counted> {
    values.iter().copied().map(Counted::new).collect()
}

/// Run `f`, expecting it to panic.
pub fn expect_panic<R>(f: impl FnOnce() -> R) {
    let result = catch_unwind(AssertUnwindSafe(f));
    assert!(result.is_err(), "expected a panic");
}
