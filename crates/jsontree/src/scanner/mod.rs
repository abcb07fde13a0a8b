//! Scanner: position-tracked reads over an arbitrary pull source.
//!
//! What it does
//! - Wraps any `Iterator` (the pull source) and hands its elements out through
//!   `read()`/`peek()`, keeping an absolute `position` of consumed elements.
//! - Holds every element that has been pulled but not consumed in a
//!   [`RingBuffer`], so lookahead is unbounded: repeated `peek()`s walk a cursor
//!   forward through that run, `reset_peek()` rewinds the cursor, and
//!   `skip_peeked()` commits the run as consumed.
//!
//! Invariants
//! - `position` counts elements consumed through `read`, `skip_peeked` or
//!   `skip_while`; peeking never moves it.
//! - The peek cursor never exceeds the number of buffered elements.
//! - The source is fused: once it returns `None` it is not polled again.
//!
//! Notes
//! - A blocking source blocks the caller; the scanner has no timeout.
//! - Not reentrant. One scanner serves one call chain.
use core::{fmt, iter::Fuse};

use crate::RingBuffer;

/// Wraps a pull source with position tracking and resettable lookahead.
///
/// # Examples
///
/// ```
/// use jsontree::Scanner;
///
/// let mut scanner = Scanner::new("ab c".chars());
/// assert_eq!(scanner.peek(), Some('a'));
/// assert_eq!(scanner.peek(), Some('b'));
/// scanner.reset_peek();
/// assert_eq!(scanner.peek(), Some('a'));
/// assert_eq!(scanner.position(), 0);
///
/// scanner.skip_while(|c| c.is_alphabetic());
/// assert_eq!(scanner.position(), 2);
/// assert_eq!(scanner.read(), Some(' '));
/// assert_eq!(scanner.read(), Some('c'));
/// assert!(scanner.is_at_end());
/// ```
pub struct Scanner<I: Iterator> {
    source: Fuse<I>,
    lookahead: RingBuffer<I::Item>,
    peek_cursor: usize,
    position: usize,
}

impl<I> fmt::Debug for Scanner<I>
where
    I: Iterator,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("lookahead", &self.lookahead)
            .field("peek_cursor", &self.peek_cursor)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl<I> Scanner<I>
where
    I: Iterator,
    I::Item: Clone,
{
    /// Wraps `source` with nothing buffered and the position at zero.
    pub fn new(source: I) -> Self {
        Self {
            source: source.fuse(),
            lookahead: RingBuffer::new(),
            peek_cursor: 0,
            position: 0,
        }
    }

    /// Number of elements consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of elements pulled from the source but not yet consumed.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.lookahead.len()
    }

    /// Consumes and returns the next element, draining lookahead first.
    ///
    /// The peek cursor keeps pointing at the same element it did before, so
    /// a `peek()` after a `read()` continues where the last one left off.
    pub fn read(&mut self) -> Option<I::Item> {
        let item = match self.lookahead.pop() {
            Some(item) => {
                self.peek_cursor = self.peek_cursor.saturating_sub(1);
                item
            }
            None => self.source.next()?,
        };
        self.position += 1;
        Some(item)
    }

    /// Returns the element under the peek cursor and advances the cursor.
    ///
    /// Successive calls walk further ahead; nothing is consumed.
    pub fn peek(&mut self) -> Option<I::Item> {
        if self.peek_cursor == self.lookahead.len() {
            let item = self.source.next()?;
            self.lookahead.push(item);
        }
        let item = self.lookahead.get(self.peek_cursor).cloned();
        self.peek_cursor += 1;
        item
    }

    /// Rewinds the peek cursor to the first unconsumed element. Buffered
    /// elements stay buffered.
    pub fn reset_peek(&mut self) {
        self.peek_cursor = 0;
    }

    /// Commits every buffered element as consumed and rewinds the cursor.
    /// Returns how many elements were committed.
    pub fn skip_peeked(&mut self) -> usize {
        let skipped = self.lookahead.len();
        self.lookahead.clear();
        self.position += skipped;
        self.peek_cursor = 0;
        skipped
    }

    /// Consumes elements while `predicate` holds. The first element that
    /// fails stays available to the next `read()`/`peek()`. Returns how many
    /// elements were consumed.
    pub fn skip_while(&mut self, mut predicate: impl FnMut(&I::Item) -> bool) -> usize {
        let mut skipped = 0;
        loop {
            self.peek_cursor = 0;
            match self.peek() {
                Some(item) if predicate(&item) => {
                    self.lookahead.pop();
                    self.position += 1;
                    skipped += 1;
                }
                _ => break,
            }
        }
        self.peek_cursor = 0;
        skipped
    }

    /// `true` once no buffered element remains and the source is exhausted.
    ///
    /// May pull one element from the source into the lookahead; the peek
    /// cursor does not move.
    pub fn is_at_end(&mut self) -> bool {
        if !self.lookahead.is_empty() {
            return false;
        }
        match self.source.next() {
            Some(item) => {
                self.lookahead.push(item);
                false
            }
            None => true,
        }
    }
}
