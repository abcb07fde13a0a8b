use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::quickcheck_tests;
use crate::Scanner;

/// Reference model of a scanner: `position` elements consumed, `buffered`
/// elements pulled but unconsumed, `cursor` of those already peeked.
struct Model<'a> {
    source: &'a [u8],
    position: usize,
    buffered: usize,
    cursor: usize,
}

impl Model<'_> {
    fn read(&mut self) -> Option<u8> {
        let item = *self.source.get(self.position)?;
        if self.buffered > 0 {
            self.buffered -= 1;
            self.cursor = self.cursor.saturating_sub(1);
        }
        self.position += 1;
        Some(item)
    }

    fn peek(&mut self) -> Option<u8> {
        if self.cursor == self.buffered {
            if self.position + self.buffered == self.source.len() {
                return None;
            }
            self.buffered += 1;
        }
        let item = self.source[self.position + self.cursor];
        self.cursor += 1;
        Some(item)
    }

    fn skip_peeked(&mut self) -> usize {
        let skipped = self.buffered;
        self.position += skipped;
        self.buffered = 0;
        self.cursor = 0;
        skipped
    }

    fn skip_while(&mut self, threshold: u8) -> usize {
        let skipped = self.source[self.position..]
            .iter()
            .take_while(|&&b| b < threshold)
            .count();
        self.position += skipped;
        self.buffered = if self.buffered > skipped {
            self.buffered - skipped
        } else {
            usize::from(self.position < self.source.len())
        };
        self.cursor = 0;
        skipped
    }
}

/// Property: any sequence of scanner operations agrees with the model on
/// every returned element, the position and the amount of lookahead held.
#[test]
fn scanner_matches_model_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(source: Vec<u8>, ops: Vec<(u8, u8)>) -> bool {
        let mut scanner = Scanner::new(source.iter().copied());
        let mut model = Model {
            source: &source,
            position: 0,
            buffered: 0,
            cursor: 0,
        };
        for (op, arg) in ops {
            let agrees = match op % 6 {
                0 => scanner.read() == model.read(),
                1 | 2 => scanner.peek() == model.peek(),
                3 => {
                    scanner.reset_peek();
                    model.cursor = 0;
                    true
                }
                4 => scanner.skip_peeked() == model.skip_peeked(),
                _ => scanner.skip_while(|&b| b < arg) == model.skip_while(arg),
            };
            if !agrees
                || scanner.position() != model.position
                || scanner.buffered() != model.buffered
            {
                return false;
            }
        }
        let rest: Vec<u8> = core::iter::from_fn(|| scanner.read()).collect();
        rest == source[model.position..]
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Vec<u8>, Vec<(u8, u8)>) -> bool);
}
