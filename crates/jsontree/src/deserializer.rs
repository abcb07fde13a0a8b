//! Recursive-descent JSON deserializer over a [`Scanner`] of `char`s.
//!
//! The grammar is RFC 8259 with these choices:
//! - A number is the longest run of `0-9 - + . e E`. The run must spell an
//!   RFC 8259 number; it becomes an `Integer` if it fits an `i64`, otherwise
//!   a `Double` if it is finite, otherwise an error.
//! - Duplicate keys in one object are an error, raised before the duplicate's
//!   value is read.
//! - Trailing commas and trailing non-whitespace are errors.
//! - `\u` escapes naming a high surrogate must be followed by an escaped low
//!   surrogate; the pair decodes to one scalar.
//!
//! Every error reports the scanner's scalar offset at the point of failure.
//! Nothing is recovered: the partial tree is dropped.
use alloc::{string::String, vec::Vec};
use core::str::FromStr;

use bstr::ByteSlice;

use crate::{
    DeserializeError, DeserializerOptions, Json, Map, Scanner,
    escape_buffer::{HexEscapeBuffer, decode_surrogate_pair, is_high_surrogate, is_low_surrogate},
    literal_buffer::{ExpectedLiteral, Step},
};

type Result<T> = core::result::Result<T, DeserializeError>;

/// Parses one JSON document from a source of `char`s.
///
/// The source can be anything that yields `char`s, including a reader that
/// decodes input as it arrives. The deserializer looks at most one scalar
/// ahead.
///
/// # Examples
///
/// ```rust
/// use jsontree::{Deserializer, Json};
///
/// let mut de = Deserializer::new(r#" [1, "two"] "#.chars());
/// let value = de.deserialize().unwrap();
/// assert_eq!(value, Json::from(vec![Json::from(1), Json::from("two")]));
/// assert_eq!(de.position(), 12);
/// ```
#[derive(Debug)]
pub struct Deserializer<I: Iterator<Item = char>> {
    scanner: Scanner<I>,
    options: DeserializerOptions,
    depth: usize,
    hex: HexEscapeBuffer,
}

impl<I: Iterator<Item = char>> Deserializer<I> {
    /// A deserializer with default [`DeserializerOptions`].
    pub fn new(source: I) -> Self {
        Self::with_options(source, DeserializerOptions::default())
    }

    /// A deserializer with the given options.
    pub fn with_options(source: I, options: DeserializerOptions) -> Self {
        Self {
            scanner: Scanner::new(source),
            options,
            depth: 0,
            hex: HexEscapeBuffer::new(),
        }
    }

    /// Scalars consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Parses a complete document: optional whitespace, one value, optional
    /// whitespace, end of input.
    ///
    /// Calling it again parses the next document from wherever the scanner
    /// stopped, even after a failure.
    ///
    /// # Errors
    ///
    /// Any [`DeserializeError`] except `InvalidUtf8`.
    pub fn deserialize(&mut self) -> Result<Json> {
        self.depth = 0;
        let result = self.document();
        if let Err(err) = &result {
            tracing::debug!(error = %err, position = err.position(), "deserialization failed");
        }
        result
    }

    fn document(&mut self) -> Result<Json> {
        self.skip_whitespace();
        let value = self.parse_value()?;
        self.end()?;
        Ok(value)
    }

    /// Checks that nothing but whitespace is left.
    ///
    /// # Errors
    ///
    /// `UnexpectedScalar` at the first leftover scalar.
    pub fn end(&mut self) -> Result<()> {
        self.skip_whitespace();
        match self.peek_one() {
            Some(scalar) => Err(self.unexpected(scalar)),
            None => Ok(()),
        }
    }

    fn skip_whitespace(&mut self) {
        let options = self.options;
        self.scanner.skip_while(|&c| options.is_whitespace(c));
    }

    fn peek_one(&mut self) -> Option<char> {
        let scalar = self.scanner.peek();
        self.scanner.reset_peek();
        scalar
    }

    /// Consumes `expected` if it is next.
    fn eat(&mut self, expected: char) -> bool {
        if self.scanner.peek() == Some(expected) {
            self.scanner.skip_peeked();
            true
        } else {
            self.scanner.reset_peek();
            false
        }
    }

    /// Consumes the next scalar and returns it with its offset.
    fn next_scalar(&mut self) -> Result<(usize, char)> {
        let position = self.scanner.position();
        let scalar = self
            .scanner
            .read()
            .ok_or(DeserializeError::UnexpectedEndOfInput)?;
        Ok((position, scalar))
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.next_scalar()? {
            (_, scalar) if scalar == expected => Ok(()),
            (position, scalar) => Err(DeserializeError::UnexpectedScalar { scalar, position }),
        }
    }

    /// `UnexpectedScalar` for a scalar that was peeked but not consumed.
    fn unexpected(&self, scalar: char) -> DeserializeError {
        DeserializeError::UnexpectedScalar {
            scalar,
            position: self.scanner.position(),
        }
    }

    fn parse_value(&mut self) -> Result<Json> {
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(
            self.scanner.buffered() <= 1,
            "deserializer holds more than one scalar of lookahead"
        );

        let scalar = self.peek_one().ok_or(DeserializeError::UnexpectedEndOfInput)?;
        match scalar {
            'n' | 't' | 'f' => self.parse_literal(),
            '-' | '0'..='9' => self.parse_number(),
            '"' => self.parse_string().map(Json::String),
            '[' => self.parse_array(),
            '{' => self.parse_object(),
            other => Err(self.unexpected(other)),
        }
    }

    fn parse_literal(&mut self) -> Result<Json> {
        let (position, first) = self.next_scalar()?;
        let mut literal = ExpectedLiteral::new(first)
            .ok_or(DeserializeError::UnexpectedScalar { scalar: first, position })?;
        loop {
            let (position, scalar) = self.next_scalar()?;
            match literal.step(scalar) {
                Step::NeedMore => {}
                Step::Done(value) => return Ok(value),
                Step::Reject => return Err(DeserializeError::UnexpectedScalar { scalar, position }),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Json> {
        let position = self.scanner.position();
        let mut text = String::new();
        self.scanner.skip_while(|&c| {
            let hit = matches!(c, '0'..='9' | '-' | '+' | '.' | 'e' | 'E');
            if hit {
                text.push(c);
            }
            hit
        });
        if is_json_number(&text) {
            if let Ok(integer) = text.parse::<i64>() {
                return Ok(Json::Integer(integer));
            }
            if let Some(double) = text.parse::<f64>().ok().filter(|d| d.is_finite()) {
                return Ok(Json::Double(double));
            }
        }
        Err(DeserializeError::InvalidNumber { text, position })
    }

    fn parse_string(&mut self) -> Result<String> {
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.next_scalar()? {
                (_, '"') => return Ok(out),
                (_, '\\') => out.push(self.parse_escape()?),
                (position, scalar @ '\u{0}'..='\u{1f}') => {
                    return Err(DeserializeError::UnexpectedScalar { scalar, position });
                }
                (_, scalar) => out.push(scalar),
            }
        }
    }

    /// Decodes the escape after a `\`.
    fn parse_escape(&mut self) -> Result<char> {
        let decoded = match self.next_scalar()? {
            (_, '"') => '"',
            (_, '\\') => '\\',
            (_, '/') => '/',
            (_, 'b') => '\u{8}',
            (_, 'f') => '\u{c}',
            (_, 'n') => '\n',
            (_, 'r') => '\r',
            (_, 't') => '\t',
            (_, 'u') => return self.parse_unicode_escape(),
            (position, scalar) => return Err(DeserializeError::UnexpectedScalar { scalar, position }),
        };
        Ok(decoded)
    }

    /// Decodes the digits after `\u`, pulling in the low half when they name
    /// a high surrogate.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let (position, unit) = self.parse_hex_unit()?;
        if is_low_surrogate(unit) {
            return Err(self.invalid_hex_escape(position));
        }
        if !is_high_surrogate(unit) {
            return char::from_u32(u32::from(unit)).ok_or_else(|| self.invalid_hex_escape(position));
        }
        self.expect('\\')?;
        self.expect('u')?;
        let (low_position, low) = self.parse_hex_unit()?;
        decode_surrogate_pair(unit, low).ok_or_else(|| self.invalid_hex_escape(low_position))
    }

    /// Reads four hex digits. Returns the offset of the first digit and the
    /// code unit. The digits stay in `self.hex` for error reporting.
    fn parse_hex_unit(&mut self) -> Result<(usize, u16)> {
        let start = self.scanner.position();
        self.hex.reset();
        loop {
            let (_, scalar) = self.next_scalar()?;
            match self.hex.feed(scalar) {
                Ok(None) => {}
                Ok(Some(unit)) => return Ok((start, unit)),
                Err(_) => {
                    let mut text = self.hex.digits();
                    text.push(scalar);
                    return Err(DeserializeError::InvalidHexEscape { text, position: start });
                }
            }
        }
    }

    fn invalid_hex_escape(&self, position: usize) -> DeserializeError {
        DeserializeError::InvalidHexEscape {
            text: self.hex.digits(),
            position,
        }
    }

    fn enter(&mut self, position: usize) -> Result<()> {
        self.depth += 1;
        match self.options.max_depth {
            Some(limit) if self.depth > limit => {
                Err(DeserializeError::DepthLimitExceeded { limit, position })
            }
            _ => Ok(()),
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_array(&mut self) -> Result<Json> {
        let position = self.scanner.position();
        self.expect('[')?;
        self.enter(position)?;
        let mut items = Vec::new();
        self.skip_whitespace();
        if !self.eat(']') {
            loop {
                self.skip_whitespace();
                items.push(self.parse_value()?);
                self.skip_whitespace();
                if !self.eat(',') {
                    break;
                }
            }
            self.expect(']')?;
        }
        self.leave();
        Ok(Json::Array(items))
    }

    fn parse_object(&mut self) -> Result<Json> {
        let position = self.scanner.position();
        self.expect('{')?;
        self.enter(position)?;
        let mut map = Map::new();
        self.skip_whitespace();
        if !self.eat('}') {
            loop {
                self.skip_whitespace();
                let key_position = self.scanner.position();
                let key = self.parse_string()?;
                if map.contains_key(&key) {
                    return Err(DeserializeError::DuplicateObjectKey {
                        key,
                        position: key_position,
                    });
                }
                self.skip_whitespace();
                self.expect(':')?;
                self.skip_whitespace();
                let value = self.parse_value()?;
                map.insert(key, value);
                self.skip_whitespace();
                if !self.eat(',') {
                    break;
                }
            }
            self.expect('}')?;
        }
        self.leave();
        Ok(Json::Object(map))
    }
}

/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_json_number(text: &str) -> bool {
    fn digits(bytes: &[u8]) -> usize {
        bytes.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let mut rest = text.as_bytes();
    if let [b'-', tail @ ..] = rest {
        rest = tail;
    }
    match rest {
        [b'0', tail @ ..] => rest = tail,
        [b'1'..=b'9', ..] => rest = &rest[digits(rest)..],
        _ => return false,
    }
    if let [b'.', tail @ ..] = rest {
        let n = digits(tail);
        if n == 0 {
            return false;
        }
        rest = &tail[n..];
    }
    if let [b'e' | b'E', tail @ ..] = rest {
        let tail = match tail {
            [b'+' | b'-', signed @ ..] => signed,
            _ => tail,
        };
        let n = digits(tail);
        if n == 0 {
            return false;
        }
        rest = &tail[n..];
    }
    rest.is_empty()
}

/// Parses a JSON document from a string.
///
/// # Errors
///
/// The first [`DeserializeError`] met.
pub fn from_str(text: &str) -> Result<Json> {
    from_chars(text.chars())
}

/// [`from_str`] with non-default [`DeserializerOptions`].
///
/// # Errors
///
/// The first [`DeserializeError`] met.
pub fn from_str_with_options(text: &str, options: DeserializerOptions) -> Result<Json> {
    Deserializer::with_options(text.chars(), options).deserialize()
}

/// Parses a JSON document from any source of `char`s.
///
/// ```rust
/// use jsontree::Json;
///
/// let chunks = ["[tr", "ue, 1", "0]"];
/// let value = jsontree::from_chars(chunks.iter().flat_map(|c| c.chars())).unwrap();
/// assert_eq!(value, Json::from(vec![Json::Boolean(true), Json::Integer(10)]));
/// ```
///
/// # Errors
///
/// The first [`DeserializeError`] met.
pub fn from_chars(source: impl IntoIterator<Item = char>) -> Result<Json> {
    Deserializer::new(source.into_iter()).deserialize()
}

/// Parses a JSON document from UTF-8 bytes.
///
/// # Errors
///
/// `InvalidUtf8` with the byte offset of the first bad sequence, otherwise
/// the first [`DeserializeError`] met.
pub fn from_slice(bytes: &[u8]) -> Result<Json> {
    let text = bytes
        .to_str()
        .map_err(|err| DeserializeError::InvalidUtf8 {
            offset: err.valid_up_to(),
        })?;
    from_str(text)
}

impl FromStr for Json {
    type Err = DeserializeError;

    fn from_str(text: &str) -> Result<Json> {
        from_str(text)
    }
}
