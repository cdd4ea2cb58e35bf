use core::mem::size_of;
use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use rand::{rngs::StdRng, Rng, SeedableRng};
use rstest::rstest;

use fixed_collections::{
    deque,
    deque::{swap, Deque as FixedDeque, DequeView},
    StorageError,
};

mod common;

use common::{counted, expect_panic, Counted};

const SLICE: &[usize] = &[0, 1, 2, 3, 4];

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Build a deque whose contents wrap around the end of the ring.
fn wrapped<const N: usize>(values: &[i32]) -> FixedDeque<Counted, N> {
    let mut deque = FixedDeque::new();
    let split = values.len() / 2;
    for v in values[..split].iter().rev() {
        deque.push_front(Counted::new(*v));
    }
    for v in &values[split..] {
        deque.push_back(Counted::new(*v));
    }
    deque
}

fn values<const N: usize>(deque: &FixedDeque<Counted, N>) -> std::vec::Vec<i32> {
    deque.iter().map(Counted::value).collect()
}

#[test]
fn deque_new() {
    let deque = FixedDeque::<usize, 4>::new();
    assert!(deque.is_empty());
    assert!(!deque.is_full());
    assert_eq!(deque.len(), 0);
    assert_eq!(deque.capacity(), 4);
    assert_eq!(deque.front(), None);
    assert_eq!(deque.back(), None);
}

#[test]
fn deque_zero_capacity() {
    let mut deque = FixedDeque::<usize, 0>::new();
    assert!(deque.is_empty());
    assert!(deque.is_full());
    assert_eq!(
        deque.try_push_back(1).map_err(|e| *e.error()),
        Err(StorageError::CapacityLimit)
    );
    assert_eq!(deque.pop_front(), None);
}

#[rstest]
#[case::empty(0)]
#[case::one(1)]
#[case::half(5)]
#[case::full(11)]
fn deque_push_back_round_trip(#[case] count: usize) {
    let mut deque = FixedDeque::<usize, 11>::new();
    for value in 0..count {
        deque.push_back(value);
    }
    assert_eq!(deque.len(), count);
    assert_eq!(deque.is_full(), count == 11);
    assert_eq!(deque.is_empty(), count == 0);
    assert!(deque.iter().copied().eq(0..count));
    for value in 0..count {
        assert_eq!(deque.pop_front(), Some(value));
    }
    assert_eq!(deque.pop_front(), None);
}

#[rstest]
#[case::empty(0)]
#[case::one(1)]
#[case::half(5)]
#[case::full(11)]
fn deque_push_front_round_trip(#[case] count: usize) {
    let mut deque = FixedDeque::<usize, 11>::new();
    for value in 0..count {
        deque.push_front(value);
    }
    assert!(deque.iter().copied().eq((0..count).rev()));
    for value in 0..count {
        assert_eq!(deque.pop_back(), Some(value));
    }
    assert!(deque.is_empty());
}

#[test]
fn deque_push_full() {
    let mut deque = FixedDeque::<usize, 3>::from([1, 2, 3]);
    assert!(deque.is_full());
    let err = deque.try_push_back(4).expect_err("deque is full");
    assert_eq!(err.error(), &StorageError::CapacityLimit);
    assert_eq!(err.into_value(), 4);
    assert_eq!(
        deque.try_push_front_with(|| unreachable!()).unwrap_err(),
        StorageError::CapacityLimit
    );
    assert_eq!(deque, [1, 2, 3]);
}

#[test]
#[should_panic(expected = "Exceeded storage capacity limit")]
fn deque_push_overflow() {
    let mut deque = FixedDeque::<usize, 2>::from([1, 2]);
    deque.push_front(0);
}

#[test]
fn deque_push_with_strong() {
    let mut deque = wrapped::<6>(&[1, 2, 3, 4]);
    expect_panic(|| {
        deque.push_back_with(|| panic!("construction failed"));
    });
    expect_panic(|| {
        deque.push_front_with(|| panic!("construction failed"));
    });
    expect_panic(|| {
        deque.insert_with(2, || panic!("construction failed"));
    });
    assert_eq!(values(&deque), [1, 2, 3, 4]);
    assert_eq!(common::live(), 4);
    *deque.push_back_with(|| Counted::new(5)) = Counted::new(6);
    assert_eq!(values(&deque), [1, 2, 3, 4, 6]);
}

#[test]
fn deque_insert_shifts_front() {
    let mut deque = FixedDeque::<usize, 11>::from_slice(SLICE);
    deque.insert(2, 10);
    // the two leading elements moved toward the front, across the ring seam
    assert_eq!(deque.as_slices(), (&[0][..], &[1, 10, 2, 3, 4][..]));
    assert_eq!(deque, [0, 1, 10, 2, 3, 4]);
}

#[test]
fn deque_insert_shifts_back() {
    let mut deque = FixedDeque::<usize, 11>::from_slice(SLICE);
    deque.insert(3, 10);
    assert_eq!(deque.as_slices(), (&[0, 1, 2, 10, 3, 4][..], &[][..]));
}

#[test]
fn deque_insert_tie_shifts_back() {
    let mut deque = FixedDeque::<usize, 11>::from([0, 1, 2, 3]);
    deque.insert(2, 10);
    assert_eq!(deque.as_slices(), (&[0, 1, 10, 2, 3][..], &[][..]));
}

#[rstest]
fn deque_insert_remove_restores(#[values(0, 1, 2, 3, 4, 5)] index: usize) {
    let mut deque = wrapped::<8>(&[0, 1, 2, 3, 4]);
    deque.insert(index, Counted::new(99));
    assert_eq!(deque.len(), 6);
    assert_eq!(deque[index].value(), 99);
    assert_eq!(deque.remove(index).value(), 99);
    assert_eq!(values(&deque), [0, 1, 2, 3, 4]);
    assert_eq!(common::live(), 5);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn deque_insert_invalid_index() {
    let mut deque = FixedDeque::<usize, 4>::from([1]);
    deque.insert(2, 0);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn deque_remove_invalid_index() {
    let mut deque = FixedDeque::<usize, 4>::from([1]);
    deque.remove(1);
}

#[test]
fn deque_at() {
    let mut deque = FixedDeque::<usize, 4>::from([1, 2]);
    assert_eq!(deque.at(1), Ok(&2));
    assert_eq!(deque.at(2), Err(StorageError::OutOfRange));
    *deque.at_mut(0).unwrap() = 5;
    assert_eq!(deque.at_mut(3), Err(StorageError::OutOfRange));
    assert_eq!(deque, [5, 2]);
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn deque_index_out_of_range() {
    let deque = FixedDeque::<usize, 4>::from([1, 2]);
    let _ = deque[2];
}

#[rstest]
#[case::front(1, 3, &[0, 3, 4, 5, 6, 7])]
#[case::back(4, 7, &[0, 1, 2, 3, 7])]
#[case::middle(3, 5, &[0, 1, 2, 5, 6, 7])]
#[case::head(0, 2, &[2, 3, 4, 5, 6, 7])]
#[case::tail(6, 8, &[0, 1, 2, 3, 4, 5])]
fn deque_erase_range(#[case] start: usize, #[case] end: usize, #[case] expect: &[i32]) {
    common::reset();
    let mut deque = wrapped::<10>(&[0, 1, 2, 3, 4, 5, 6, 7]);
    deque.erase(start..end);
    assert_eq!(values(&deque), expect);
    assert_eq!(common::drops(), end - start);
    assert_eq!(common::live(), expect.len());
}

#[test]
fn deque_erase_all() {
    common::reset();
    let mut deque = wrapped::<10>(&[0, 1, 2, 3, 4, 5, 6]);
    let len = deque.len();
    deque.erase(..);
    assert!(deque.is_empty());
    assert_eq!(common::drops(), len);
    assert_eq!(common::clone_froms(), 0);
    assert_eq!(common::clones(), 0);
}

#[test]
fn deque_erase_panicking_drop() {
    let all = [0, 1, 2, 3, 4, 5, 6, 7];
    for start in 0..all.len() {
        for end in start + 1..=all.len() {
            for failing in start..end {
                let mut deque = wrapped::<10>(&all);
                assert!(!deque.as_slices().1.is_empty());
                common::reset();
                common::fail_drop_of(failing as i32);
                expect_panic(|| deque.erase(start..end));

                let expect: std::vec::Vec<i32> =
                    all[..start].iter().chain(&all[end..]).copied().collect();
                assert_eq!(values(&deque), expect, "erase {}..{} failing at {}", start, end, failing);
                assert_eq!(deque.len(), expect.len());
                assert_eq!(common::drops(), end - start);
                assert_eq!(common::live(), expect.len());

                deque.push_front(Counted::new(-1));
                deque.push_back(Counted::new(8));
                assert_eq!(deque.front().map(Counted::value), Some(-1));
                assert_eq!(deque.back().map(Counted::value), Some(8));
                assert_eq!(deque.len(), expect.len() + 2);
                drop(deque);
                assert_eq!(common::live(), 0);
            }
        }
    }
}

#[test]
#[should_panic(expected = "Invalid element index")]
fn deque_erase_inverted_range() {
    let mut deque = FixedDeque::<usize, 4>::from([1, 2, 3]);
    #[allow(clippy::reversed_empty_ranges)]
    deque.erase(2..1);
}

#[test]
fn deque_insert_n_rollback() {
    let mut deque = wrapped::<12>(&[0, 1, 2, 3, 4, 5]);
    for index in [0, 2, 4, 6] {
        common::reset();
        common::fail_clone_at(3);
        let value = Counted::new(9);
        expect_panic(|| deque.insert_n(index, 4, &value));
        assert_eq!(values(&deque), [0, 1, 2, 3, 4, 5]);
        assert_eq!(common::live(), 7);
    }
    common::reset();
    deque.insert_n(3, 2, &Counted::new(9));
    assert_eq!(values(&deque), [0, 1, 2, 9, 9, 3, 4, 5]);
}

#[test]
fn deque_insert_slice() {
    let mut deque = FixedDeque::<usize, 8>::from([1, 2, 3]);
    deque.insert_slice(1, &[7, 8]);
    assert_eq!(deque, [1, 7, 8, 2, 3]);
    deque.insert_slice(4, &[9]);
    assert_eq!(deque, [1, 7, 8, 2, 9, 3]);
    assert_eq!(
        deque.try_insert_slice(0, &[0, 0, 0]),
        Err(StorageError::CapacityLimit)
    );
    assert_eq!(deque, [1, 7, 8, 2, 9, 3]);
}

#[test]
fn deque_insert_iter_partial() {
    let mut deque = FixedDeque::<usize, 4>::from([1]);
    let err = deque.try_insert_iter(0, [7, 8, 9, 10]).unwrap_err();
    assert_eq!(err.into_value(), 10);
    assert_eq!(deque, [7, 8, 9, 1]);

    let mut deque = FixedDeque::<usize, 6>::from([1, 2, 3]);
    deque.insert_iter(2, [5, 6]);
    assert_eq!(deque, [1, 2, 5, 6, 3]);
}

#[test]
fn deque_insert_iter_rollback() {
    let mut deque = wrapped::<8>(&[1, 2, 3]);
    let items = counted(&[7, 8, 9]);
    expect_panic(|| {
        deque.insert_iter(
            1,
            items.iter().cloned().chain(core::iter::from_fn(|| panic!("iteration failed"))),
        )
    });
    assert_eq!(values(&deque), [1, 2, 3]);
    assert_eq!(common::live(), 6);
}

#[test]
fn deque_assign() {
    let mut deque = FixedDeque::<usize, 6>::from([1, 2, 3]);
    deque.assign_n(5, &4);
    assert_eq!(deque, [4, 4, 4, 4, 4]);
    deque.assign_from_slice(&[1, 2]);
    assert_eq!(deque, [1, 2]);
    deque.assign_iter(3..9);
    assert_eq!(deque, [3, 4, 5, 6, 7, 8]);
    assert_eq!(
        deque.try_assign_n(7, &0),
        Err(StorageError::CapacityLimit)
    );
    assert_eq!(deque.len(), 6);
}

#[test]
fn deque_assign_clone_from_failure() {
    common::reset();
    let mut deque = wrapped::<6>(&[1, 2, 3]);
    let source = counted(&[7, 8, 9, 10]);
    common::fail_clone_from_at(2);
    expect_panic(|| deque.assign_from_slice(&source));
    // the first element was assigned before the failure
    assert_eq!(values(&deque), [7, 2, 3]);
    assert_eq!(common::live(), 7);
}

#[test]
fn deque_assign_across_capacities() {
    let small = FixedDeque::<usize, 3>::from([1, 2, 3]);
    let mut large = FixedDeque::<usize, 8>::from([9; 6]);
    large.assign_from(&small);
    assert_eq!(large, small);

    let mut tiny = FixedDeque::<usize, 2>::new();
    assert_eq!(tiny.try_assign_from(&small), Err(StorageError::CapacityLimit));
    assert!(tiny.is_empty());

    let copy = FixedDeque::<usize, 5>::cloned_from(&large);
    assert_eq!(copy, [1, 2, 3]);
}

#[test]
fn deque_take_from() {
    let mut source = wrapped::<6>(&[1, 2, 3, 4]);
    let mut target = FixedDeque::<Counted, 4>::from_iter(counted(&[9]));
    target.take_from(&mut source);
    assert!(source.is_empty());
    assert_eq!(values(&target), [1, 2, 3, 4]);
    assert_eq!(common::live(), 4);

    let mut small = FixedDeque::<Counted, 2>::new();
    assert_eq!(
        small.try_take_from(&mut target),
        Err(StorageError::CapacityLimit)
    );
    assert_eq!(target.len(), 4);

    let moved = FixedDeque::<Counted, 10>::moved_from(&mut target);
    assert!(target.is_empty());
    assert_eq!(values(&moved), [1, 2, 3, 4]);
}

#[test]
fn deque_swap_inverse() {
    let mut a = wrapped::<5>(&[1, 2, 3, 4]);
    let mut b = wrapped::<8>(&[5, 6]);
    swap(&mut a, &mut b);
    assert_eq!(values(&a), [5, 6]);
    assert_eq!(values(&b), [1, 2, 3, 4]);
    a.swap_with(&mut b);
    assert_eq!(values(&a), [1, 2, 3, 4]);
    assert_eq!(values(&b), [5, 6]);
    assert_eq!(common::live(), 6);
}

#[test]
fn deque_swap_capacity() {
    let mut a = FixedDeque::<usize, 2>::from([1, 2]);
    let mut b = FixedDeque::<usize, 8>::from([3, 4, 5]);
    assert_eq!(a.try_swap_with(&mut b), Err(StorageError::CapacityLimit));
    assert_eq!(a, [1, 2]);
    assert_eq!(b, [3, 4, 5]);
}

#[test]
fn deque_resize() {
    let mut deque = FixedDeque::<usize, 5>::from([1, 2]);
    deque.resize(4, 7);
    assert_eq!(deque, [1, 2, 7, 7]);
    deque.resize(1, 0);
    assert_eq!(deque, [1]);
    let mut next = 0;
    deque.resize_with(5, || {
        next += 1;
        next
    });
    assert_eq!(deque, [1, 1, 2, 3, 4]);
    assert_eq!(deque.try_resize(6, 0), Err(StorageError::CapacityLimit));
}

#[test]
fn deque_truncate_clear() {
    common::reset();
    let mut deque = wrapped::<8>(&[1, 2, 3, 4, 5, 6]);
    deque.truncate(4);
    assert_eq!(values(&deque), [1, 2, 3, 4]);
    assert_eq!(common::drops(), 2);
    deque.clear();
    assert!(deque.is_empty());
    assert_eq!(common::drops(), 6);
}

#[test]
fn deque_retain() {
    let mut deque = wrapped::<10>(&[1, 2, 3, 4, 5, 6, 7, 8]);
    deque.retain(|v| v.value() % 3 != 0);
    assert_eq!(values(&deque), [1, 2, 4, 5, 7, 8]);
    assert_eq!(common::live(), 6);

    let mut seen = 0;
    expect_panic(|| {
        deque.retain(|v| {
            seen += 1;
            if seen == 4 {
                panic!("predicate failed");
            }
            v.value() != 2
        })
    });
    assert_eq!(values(&deque), [1, 4, 5, 7, 8]);
    assert_eq!(common::live(), 5);
}

#[test]
fn deque_make_contiguous() {
    let mut deque = FixedDeque::<usize, 5>::new();
    deque.extend([3, 4, 5]);
    deque.push_front(2);
    deque.push_front(1);
    assert!(!deque.as_slices().1.is_empty());
    assert_eq!(deque.make_contiguous(), &[1, 2, 3, 4, 5]);
    assert_eq!(deque.as_slices(), (&[1, 2, 3, 4, 5][..], &[][..]));
}

#[test]
fn deque_iter() {
    let mut deque = FixedDeque::<usize, 6>::from([3, 4, 5]);
    deque.push_front(2);
    deque.push_front(1);
    let mut iter = deque.iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&5));
    assert_eq!(iter.nth(1), Some(&3));
    assert_eq!(iter.len(), 1);
    assert!(deque.iter().rev().copied().eq([5, 4, 3, 2, 1]));
    for item in deque.iter_mut() {
        *item *= 10;
    }
    assert_eq!(deque, [10, 20, 30, 40, 50]);
    let owned: std::vec::Vec<usize> = deque.into_iter().rev().collect();
    assert_eq!(owned, [50, 40, 30, 20, 10]);
}

#[test]
fn deque_into_iter_drops_remaining() {
    let deque = wrapped::<6>(&[1, 2, 3, 4]);
    let mut iter = deque.into_iter();
    assert_eq!(iter.next().map(|v| v.value()), Some(1));
    assert_eq!(iter.len(), 3);
    drop(iter);
    assert_eq!(common::live(), 0);
}

#[test]
fn deque_compare() {
    let a = FixedDeque::<usize, 4>::from([1, 2, 3]);
    let mut b = FixedDeque::<usize, 8>::new();
    b.extend([2, 3]);
    b.push_front(1);
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    b.push_back(0);
    assert!(a < b);
    b.pop_back();
    b.push_back(4);
    assert!(a < b);
    assert!(a > FixedDeque::<usize, 3>::from([1, 2, 2]));
    assert_eq!(a, &[1, 2, 3][..]);
}

#[test]
fn deque_clone() {
    let deque = wrapped::<6>(&[1, 2, 3]);
    common::reset();
    let mut copy = deque.clone();
    assert_eq!(common::clones(), 3);
    assert_eq!(copy, deque);
    copy.clone_from(&wrapped::<6>(&[4, 5]));
    assert_eq!(values(&copy), [4, 5]);
}

#[test]
fn deque_view() {
    fn fill(view: &mut DequeView<usize>) {
        let mut next = 0;
        while view.try_push_back(next).is_ok() {
            next += 1;
        }
    }

    let mut small = FixedDeque::<usize, 2>::new();
    let mut large = FixedDeque::<usize, 7>::new();
    fill(&mut small);
    fill(&mut large);
    assert_eq!(small, [0, 1]);
    assert_eq!(large.len(), 7);
    assert_eq!(large.as_view().capacity(), 7);
}

#[test]
fn deque_macro() {
    let empty: FixedDeque<usize, 3> = deque![];
    assert!(empty.is_empty());
    let fill: FixedDeque<usize, 3> = deque![5; 2];
    assert_eq!(fill, [5, 5]);
    let items: FixedDeque<usize, 3> = deque![1, 2, 3];
    assert_eq!(items, [1, 2, 3]);
}

#[test]
fn deque_footprint() {
    assert_eq!(size_of::<FixedDeque<usize, 0>>(), 3 * size_of::<usize>());
    assert_eq!(size_of::<FixedDeque<usize, 1>>(), 4 * size_of::<usize>());
    assert_eq!(size_of::<FixedDeque<usize, 11>>(), 14 * size_of::<usize>());
}

#[test]
fn deque_matches_std() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut fixed = FixedDeque::<u32, 16>::new();
    let mut expected = VecDeque::<u32>::new();

    for _ in 0..5000 {
        let len = expected.len();
        match rng.gen_range(0..8) {
            0 if len < 16 => {
                let v = rng.gen();
                fixed.push_back(v);
                expected.push_back(v);
            }
            1 if len < 16 => {
                let v = rng.gen();
                fixed.push_front(v);
                expected.push_front(v);
            }
            2 => assert_eq!(fixed.pop_back(), expected.pop_back()),
            3 => assert_eq!(fixed.pop_front(), expected.pop_front()),
            4 if len < 16 => {
                let index = rng.gen_range(0..=len);
                let v = rng.gen();
                fixed.insert(index, v);
                expected.insert(index, v);
            }
            5 if len > 0 => {
                let index = rng.gen_range(0..len);
                assert_eq!(fixed.remove(index), expected.remove(index).unwrap());
            }
            6 => {
                let start = rng.gen_range(0..=len);
                let end = rng.gen_range(start..=len);
                fixed.erase(start..end);
                expected.drain(start..end);
            }
            7 if len < 14 => {
                let index = rng.gen_range(0..=len);
                let items: [u32; 3] = [rng.gen(), rng.gen(), rng.gen()];
                fixed.insert_slice(index, &items);
                for (offset, item) in items.into_iter().enumerate() {
                    expected.insert(index + offset, item);
                }
            }
            _ => (),
        }
        assert_eq!(fixed.len(), expected.len());
        assert!(fixed.iter().eq(expected.iter()));
    }
}
