use alloc::{collections::VecDeque, vec::Vec};

use quickcheck::QuickCheck;

use super::quickcheck_tests;
use crate::RingBuffer;

/// Property: under any interleaving of pushes and pops the ring buffer
/// behaves like a FIFO queue, and logical indexing hides the wraparound.
#[test]
fn fifo_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(ops: Vec<Option<u16>>) -> bool {
        let mut ring = RingBuffer::new();
        let mut model = VecDeque::new();
        for op in ops {
            match op {
                Some(value) => {
                    ring.push(value);
                    model.push_back(value);
                }
                None => {
                    if ring.pop() != model.pop_front() {
                        return false;
                    }
                }
            }
            if ring.len() != model.len() || ring.is_empty() != model.is_empty() {
                return false;
            }
            if ring.capacity() < ring.len() {
                return false;
            }
            if !ring.iter().eq(model.iter()) {
                return false;
            }
            if (0..model.len()).any(|i| ring.get(i) != model.get(i)) {
                return false;
            }
        }
        ring.into_iter().eq(model)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Vec<Option<u16>>) -> bool);
}

/// Property: capacity only ever doubles (from two), so it is zero or a
/// power of two no smaller than two.
#[test]
fn growth_doubles_quickcheck() {
    fn prop(pushes: u8) -> bool {
        let mut ring = RingBuffer::new();
        for i in 0..pushes {
            let before = ring.capacity();
            ring.push(i);
            let after = ring.capacity();
            let grew = if before == 0 { after == 2 } else { after == before * 2 };
            if after != before && !grew {
                return false;
            }
        }
        let capacity = ring.capacity();
        capacity == 0 || (capacity >= 2 && capacity.is_power_of_two())
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(u8) -> bool);
}
