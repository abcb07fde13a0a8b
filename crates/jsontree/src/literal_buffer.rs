use crate::Json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LiteralKind {
    Null,
    True,
    False,
}

/// What happened after feeding one more character into the literal matcher?
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore,
    /// Character matched *and* completed the literal.
    Done(Json),
    /// Character did **not** match; the matcher is unchanged.
    Reject,
}

/// Matches the tail of `null`, `true` or `false` one character at a time,
/// once the first character has picked which literal it is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteral {
    remaining: &'static [u8],
    kind: LiteralKind,
}

impl ExpectedLiteral {
    /// Start matching after the first character (`n`, `t`, or `f`). Any other
    /// character starts no literal.
    pub fn new(first: char) -> Option<Self> {
        let (remaining, kind): (&'static [u8], _) = match first {
            'n' => (b"ull", LiteralKind::Null),
            't' => (b"rue", LiteralKind::True),
            'f' => (b"alse", LiteralKind::False),
            _ => return None,
        };
        Some(Self { remaining, kind })
    }

    pub fn step(&mut self, c: char) -> Step {
        let Some((&expected, rest)) = self.remaining.split_first() else {
            return Step::Reject;
        };
        if char::from(expected) != c {
            return Step::Reject;
        }
        self.remaining = rest;
        if !rest.is_empty() {
            return Step::NeedMore;
        }
        Step::Done(match self.kind {
            LiteralKind::Null => Json::Null,
            LiteralKind::True => Json::Boolean(true),
            LiteralKind::False => Json::Boolean(false),
        })
    }
}
