use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use super::quickcheck_tests;
use crate::{Json, Style, from_chars, from_str, to_string, to_string_pretty, write_json};

/// Property: compact and pretty text both read back as the value written.
#[test]
fn text_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Json) -> bool {
        from_str(&to_string(&value)).as_ref() == Ok(&value)
            && from_str(&to_string_pretty(&value)).as_ref() == Ok(&value)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Json) -> bool);
}

/// Property: pretty output is compact output plus whitespace outside
/// strings.
#[test]
fn pretty_only_adds_whitespace_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Json, indent: u8) -> bool {
        let mut pretty = String::new();
        let style = Style::Pretty {
            indent: usize::from(indent % 9),
        };
        if write_json(&value, &mut pretty, style).is_err() {
            return false;
        }
        strip_structural_whitespace(&pretty) == to_string(&value)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Json, u8) -> bool);
}

fn strip_structural_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if !matches!(c, ' ' | '\n') {
            out.push(c);
        }
    }
    out
}

/// Property: splitting the text into arbitrary chunks and feeding them
/// through a pull source gives the same value as parsing the whole string.
#[test]
fn chunked_source_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Json, splits: Vec<usize>) -> bool {
        let src = to_string(&value);
        let chars: Vec<char> = src.chars().collect();
        let mut chunks: Vec<String> = Vec::new();
        let mut idx = 0;
        for s in splits {
            let remaining = chars.len() - idx;
            if remaining == 0 {
                break;
            }
            let end = idx + 1 + s % remaining;
            chunks.push(chars[idx..end].iter().collect());
            idx = end;
        }
        chunks.push(chars[idx..].iter().collect());

        let parsed = from_chars(chunks.iter().flat_map(|chunk| chunk.chars()));
        parsed.as_ref() == Ok(&value)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Json, Vec<usize>) -> bool);
}

/// Property: text written by `serde_json` from the same value reads back
/// the same. `serde_json` escapes with lowercase hex, which exercises the
/// other half of the `\u` decoder.
#[test]
fn serde_json_oracle_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Json) -> bool {
        let Ok(text) = serde_json::to_string(&value) else {
            return false;
        };
        from_str(&text).as_ref() == Ok(&value)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Json) -> bool);
}
