#![cfg(feature = "zeroize")]

use zeroize::{Zeroize, Zeroizing};

use fixed_collections::{deque::Deque as FixedDeque, vec::Vec as FixedVec};

mod common;

use common::Counted;

#[test]
fn vec_zeroize() {
    let mut v = FixedVec::<u8, 4>::from([0xAA, 0xBB, 0xCC]);
    v.zeroize();
    assert!(v.is_empty());
    let spare = v.spare_capacity_mut();
    assert_eq!(spare.len(), 4);
    for slot in spare {
        assert_eq!(unsafe { slot.assume_init() }, 0);
    }
    v.extend_from_slice(&[1, 2]);
    assert_eq!(v, [1, 2]);
}

#[test]
fn vec_zeroize_drops_elements() {
    let mut v: FixedVec<Counted, 4> = common::counted(&[1, 2, 3]).into_iter().collect();
    assert_eq!(common::live(), 3);
    v.zeroize();
    assert!(v.is_empty());
    assert_eq!(common::live(), 0);
}

#[test]
fn deque_zeroize() {
    let mut deque = FixedDeque::<u32, 4>::from([1, 2, 3]);
    deque.pop_front();
    deque.push_back(4);
    deque.push_back(5);
    deque.zeroize();
    assert!(deque.is_empty());
    deque.push_front(9);
    assert_eq!(deque, [9]);
}

#[test]
fn zeroizing_wrapper() {
    let mut v = Zeroizing::new(FixedVec::<u8, 16>::new());
    v.extend_from_slice(b"secret");
    assert_eq!(v.len(), 6);

    let mut deque = Zeroizing::new(FixedDeque::<Counted, 4>::new());
    deque.push_back(Counted::new(1));
    drop(deque);
    assert_eq!(common::live(), 0);
}
