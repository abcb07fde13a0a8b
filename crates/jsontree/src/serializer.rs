//! Writes a [`Json`] tree as text.
//!
//! Two layouts, picked by [`Style`]: compact (no whitespace outside strings)
//! and pretty (one child per line, indented per level, `": "` between key and
//! value). Writing never fails on its own; the only errors come from the
//! underlying [`fmt::Write`].
//!
//! Numbers: integers through `itoa`, doubles through `ryu`'s shortest
//! round-trip form, which always contains a `.` or an exponent so a double
//! never reads back as an integer. Non-finite doubles are written as `null`.
use alloc::string::String;
use core::fmt::{self, Write};

use crate::{Json, RingBuffer, Style};

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn needs_escape(c: char) -> bool {
    matches!(c, '"' | '\\' | '\u{0}'..='\u{1f}')
}

/// Escapes a stream of `char`s for the inside of a JSON string literal.
///
/// `"` and `\` get a backslash, the common controls their short form
/// (`\b \t \n \f \r`), and every other control below U+0020 the form
/// `\u00XX`. Everything else, `/` included, passes through.
///
/// One input scalar can expand to up to six output scalars; the expansion
/// waits in a [`RingBuffer`] and is handed out one scalar per call.
///
/// ```rust
/// use jsontree::EscapedChars;
///
/// let escaped: String = EscapedChars::new("a\"\n\u{1}".chars()).collect();
/// assert_eq!(escaped, r#"a\"\n\u0001"#);
/// ```
#[derive(Debug, Clone)]
pub struct EscapedChars<I> {
    source: I,
    pending: RingBuffer<char>,
}

impl<I: Iterator<Item = char>> EscapedChars<I> {
    /// Escapes the scalars `source` yields.
    pub fn new(source: I) -> Self {
        Self {
            source,
            pending: RingBuffer::with_capacity(6),
        }
    }

    fn expand(&mut self, c: char) {
        self.pending.push('\\');
        match c {
            '"' | '\\' => self.pending.push(c),
            '\u{8}' => self.pending.push('b'),
            '\t' => self.pending.push('t'),
            '\n' => self.pending.push('n'),
            '\u{c}' => self.pending.push('f'),
            '\r' => self.pending.push('r'),
            _ => {
                let code = u32::from(c);
                self.pending.extend(['u', '0', '0']);
                self.pending.push(char::from(HEX[((code >> 4) & 0xF) as usize]));
                self.pending.push(char::from(HEX[(code & 0xF) as usize]));
            }
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for EscapedChars<I> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if let Some(c) = self.pending.pop() {
            return Some(c);
        }
        let c = self.source.next()?;
        if !needs_escape(c) {
            return Some(c);
        }
        self.expand(c);
        self.pending.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (low, high) = self.source.size_hint();
        let pending = self.pending.len();
        (
            low.saturating_add(pending),
            high.and_then(|h| h.checked_mul(6))
                .and_then(|h| h.checked_add(pending)),
        )
    }
}

struct Serializer<'w, W> {
    out: &'w mut W,
    style: Style,
}

impl<W: Write> Serializer<'_, W> {
    fn write_value(&mut self, value: &Json, depth: usize) -> fmt::Result {
        match value {
            Json::Null => self.out.write_str("null"),
            Json::Boolean(true) => self.out.write_str("true"),
            Json::Boolean(false) => self.out.write_str("false"),
            Json::Integer(i) => self.out.write_str(itoa::Buffer::new().format(*i)),
            Json::Double(d) if d.is_finite() => {
                self.out.write_str(ryu::Buffer::new().format_finite(*d))
            }
            Json::Double(_) => self.out.write_str("null"),
            Json::String(s) => self.write_string(s),
            Json::Array(items) => {
                if items.is_empty() {
                    return self.out.write_str("[]");
                }
                self.out.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.write_char(',')?;
                    }
                    self.newline(depth + 1)?;
                    self.write_value(item, depth + 1)?;
                }
                self.newline(depth)?;
                self.out.write_char(']')
            }
            Json::Object(map) => {
                if map.is_empty() {
                    return self.out.write_str("{}");
                }
                self.out.write_char('{')?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        self.out.write_char(',')?;
                    }
                    self.newline(depth + 1)?;
                    self.write_string(key)?;
                    self.out.write_char(':')?;
                    if let Style::Pretty { .. } = self.style {
                        self.out.write_char(' ')?;
                    }
                    self.write_value(item, depth + 1)?;
                }
                self.newline(depth)?;
                self.out.write_char('}')
            }
        }
    }

    fn write_string(&mut self, s: &str) -> fmt::Result {
        self.out.write_char('"')?;
        if s.contains(needs_escape) {
            for c in EscapedChars::new(s.chars()) {
                self.out.write_char(c)?;
            }
        } else {
            self.out.write_str(s)?;
        }
        self.out.write_char('"')
    }

    /// Line break plus indentation for `depth`; nothing in compact mode.
    fn newline(&mut self, depth: usize) -> fmt::Result {
        let Style::Pretty { indent } = self.style else {
            return Ok(());
        };
        self.out.write_char('\n')?;
        for _ in 0..indent * depth {
            self.out.write_char(' ')?;
        }
        Ok(())
    }
}

/// Writes `value` to `out` in the given layout.
///
/// # Errors
///
/// Only those returned by `out`.
pub fn write_json<W: Write>(value: &Json, out: &mut W, style: Style) -> fmt::Result {
    Serializer { out, style }.write_value(value, 0)
}

/// Compact text for `value`.
///
/// ```rust
/// use jsontree::{Json, to_string};
///
/// let value: Json = r#"{ "b": [1, 2.0], "a": "x/y" }"#.parse().unwrap();
/// assert_eq!(to_string(&value), r#"{"a":"x/y","b":[1,2.0]}"#);
/// ```
#[must_use]
pub fn to_string(value: &Json) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_json(value, &mut out, Style::Compact);
    out
}

/// Pretty text for `value`, indented four spaces per level.
#[must_use]
pub fn to_string_pretty(value: &Json) -> String {
    let mut out = String::new();
    let _ = write_json(value, &mut out, Style::pretty());
    out
}

/// Compact by default; the alternate flag (`{:#}`) selects the pretty
/// layout.
impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = if f.alternate() {
            Style::pretty()
        } else {
            Style::Compact
        };
        write_json(self, f, style)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString, vec};

    use super::*;
    use crate::Map;

    fn escape(s: &str) -> String {
        EscapedChars::new(s.chars()).collect()
    }

    #[test]
    fn escapes_quote_backslash_and_controls() {
        assert_eq!(escape(r#"say "hi"\"#), r#"say \"hi\"\\"#);
        assert_eq!(escape("\u{8}\t\n\u{c}\r"), r"\b\t\n\f\r");
        assert_eq!(escape("\u{0}\u{1b}\u{1f}"), r"\u0000\u001B\u001F");
    }

    #[test]
    fn leaves_slash_and_non_controls_alone() {
        assert_eq!(escape("a/b é \u{7f} 😀"), "a/b é \u{7f} 😀");
    }

    #[test]
    fn escaped_chars_size_hint_is_sound() {
        let it = EscapedChars::new("\n\n".chars());
        let (low, high) = it.size_hint();
        let len = it.count();
        assert!(low <= len && high.is_none_or(|h| len <= h));
    }

    #[test]
    fn scalars() {
        assert_eq!(to_string(&Json::Null), "null");
        assert_eq!(to_string(&Json::Boolean(false)), "false");
        assert_eq!(to_string(&Json::Integer(i64::MIN)), "-9223372036854775808");
        assert_eq!(to_string(&Json::Double(1.0)), "1.0");
        assert_eq!(to_string(&Json::Double(-0.5)), "-0.5");
        assert_eq!(to_string(&Json::Double(1e300)), "1e300");
        assert_eq!(to_string(&Json::String("\"".into())), r#""\"""#);
    }

    #[test]
    fn non_finite_doubles_become_null() {
        assert_eq!(to_string(&Json::Double(f64::NAN)), "null");
        assert_eq!(to_string(&Json::Double(f64::NEG_INFINITY)), "null");
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        let value = Json::Array(vec![Json::Array(vec![]), Json::Object(Map::new())]);
        assert_eq!(to_string(&value), "[[],{}]");
        assert_eq!(to_string_pretty(&value), "[\n    [],\n    {}\n]");
    }

    #[test]
    fn pretty_nests_and_spaces_keys() {
        let value = Json::object([("k", Json::from(vec![1, 2]))]).unwrap();
        assert_eq!(
            to_string_pretty(&value),
            "{\n    \"k\": [\n        1,\n        2\n    ]\n}"
        );
    }

    #[test]
    fn indent_width_is_configurable() {
        let value = Json::from(vec![true]);
        let mut out = String::new();
        write_json(&value, &mut out, Style::Pretty { indent: 1 }).unwrap();
        assert_eq!(out, "[\n true\n]");
        out.clear();
        write_json(&value, &mut out, Style::Pretty { indent: 0 }).unwrap();
        assert_eq!(out, "[\ntrue\n]");
    }

    #[test]
    fn display_follows_the_alternate_flag() {
        let value = Json::from(vec![Json::from("a")]);
        assert_eq!(value.to_string(), r#"["a"]"#);
        assert_eq!(format!("{value:#}"), "[\n    \"a\"\n]");
    }
}
