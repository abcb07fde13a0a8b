//! A growable circular queue.
//!
//! [`RingBuffer`] holds the scanner's lookahead and the serializer's pending
//! escape expansion. Indexing is always logical: `0` is the oldest element no
//! matter where it sits in the backing store, so callers never see the
//! wraparound.
//!
//! Growth doubles the capacity (or jumps to two slots from empty) and
//! relocates the live elements to the front of the new store in logical
//! order, which keeps `push` amortized O(1).
use alloc::vec::Vec;
use core::{fmt, iter::FusedIterator, ops::Index};

/// A FIFO queue backed by a circular buffer.
///
/// # Examples
///
/// ```
/// use jsontree::RingBuffer;
///
/// let mut ring = RingBuffer::new();
/// ring.push('a');
/// ring.push('b');
/// assert_eq!(ring[0], 'a');
/// assert_eq!(ring.pop(), Some('a'));
/// assert_eq!(ring.len(), 1);
/// ```
#[derive(Clone)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: 0,
            len: 0,
        }
    }

    /// Creates an empty buffer with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            len: 0,
        }
    }

    /// Number of elements the buffer holds before it has to grow.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of queued elements: pushes minus pops since it was last empty.
    #[doc(alias = "count")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` at the back.
    pub fn push(&mut self, value: T) {
        if self.len == self.slots.len() {
            self.grow();
        }
        let tail = self.physical(self.len);
        self.slots[tail] = Some(value);
        self.len += 1;
    }

    /// Removes and returns the oldest element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.head].take();
        self.len -= 1;
        self.head = if self.len == 0 {
            0
        } else {
            self.physical(1)
        };
        value
    }

    /// The oldest element, if any.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// The element `index` places behind the front.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.slots[self.physical(index)].as_ref()
    }

    /// Drops every element, keeping the allocation.
    pub fn clear(&mut self) {
        for logical in 0..self.len {
            let physical = self.physical(logical);
            self.slots[physical] = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Iterates front to back without consuming.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            front: 0,
            back: self.len,
        }
    }

    fn physical(&self, logical: usize) -> usize {
        let index = self.head + logical;
        if index >= self.slots.len() {
            index - self.slots.len()
        } else {
            index
        }
    }

    // Only called when full, so rotating the whole store puts the logical
    // front at slot 0.
    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = (old_capacity * 2).max(2);
        self.slots.rotate_left(self.head);
        self.slots.resize_with(new_capacity, || None);
        self.head = 0;
        tracing::trace!(old_capacity, new_capacity, "ring buffer grew");
    }
}

impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "index {index} out of bounds for ring buffer of length {}",
                self.len
            ),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingBuffer<T> {}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ring = Self::new();
        ring.extend(iter);
        ring
    }
}

/// Borrowing iterator over a [`RingBuffer`], oldest first.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    ring: &'a RingBuffer<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let value = self.ring.get(self.front);
        self.front += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.ring.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Draining iterator returned by `RingBuffer::into_iter`.
#[derive(Debug, Clone)]
pub struct IntoIter<T>(RingBuffer<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for RingBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}
