use alloc::{string::String, vec, vec::Vec};

use rstest::rstest;

use crate::{DeserializerOptions, Json, from_str, from_str_with_options};

fn string(s: &str) -> Json {
    Json::String(String::from(s))
}

fn object(pairs: Vec<(&str, Json)>) -> Json {
    pairs.into_iter().collect()
}

#[rstest]
#[case::null("null", Json::Null)]
#[case::true_padded(" true ", Json::Boolean(true))]
#[case::false_literal("false", Json::Boolean(false))]
#[case::zero("0", Json::Integer(0))]
#[case::negative_zero_integer("-0", Json::Integer(0))]
#[case::negative("-12", Json::Integer(-12))]
#[case::i64_max("9223372036854775807", Json::Integer(i64::MAX))]
#[case::fraction("1.5", Json::Double(1.5))]
#[case::integral_fraction("1.0", Json::Double(1.0))]
#[case::exponent("1e2", Json::Double(100.0))]
#[case::signed_exponent("2E-1", Json::Double(0.2))]
#[case::exponent_plus("-3.5e+1", Json::Double(-35.0))]
#[case::beyond_i64("18446744073709551616", Json::Double(18_446_744_073_709_551_616.0))]
#[case::empty_string(r#""""#, string(""))]
#[case::short_escapes(r#""\"\\\/\b\f\n\r\t""#, string("\"\\/\u{8}\u{c}\n\r\t"))]
#[case::unicode_escape(r#""\u00e9\u00C9""#, string("éÉ"))]
#[case::surrogate_pair(r#""\uD83D\uDE00""#, string("😀"))]
#[case::raw_astral(r#""😀 ok""#, string("😀 ok"))]
#[case::raw_delete_and_slash("\"\u{7f}/\"", string("\u{7f}/"))]
#[case::empty_array("[]", Json::Array(vec![]))]
#[case::padded_array("[ 1 , [ ] ]", Json::Array(vec![Json::Integer(1), Json::Array(vec![])]))]
#[case::empty_object("{}", object(vec![]))]
#[case::nested(
    r#"{"a":{"b":[null,false]}}"#,
    object(vec![("a", object(vec![("b", Json::Array(vec![Json::Null, Json::Boolean(false)]))]))])
)]
#[case::json_whitespace(
    "\n\t\r {\"k\" : \"v\" , \"n\":-1.25e-2 } \n",
    object(vec![("k", string("v")), ("n", Json::Double(-0.0125))])
)]
#[case::keys_sharing_a_prefix(
    r#"{"a":1,"ab":2}"#,
    object(vec![("a", Json::Integer(1)), ("ab", Json::Integer(2))])
)]
fn parses(#[case] input: &str, #[case] expected: Json) {
    assert_eq!(from_str(input), Ok(expected));
}

#[test]
fn negative_zero_double_keeps_its_sign() {
    let value = from_str("-0.0").unwrap();
    let Json::Double(d) = value else {
        panic!("expected a double, got {value:?}");
    };
    assert!(d == 0.0 && d.is_sign_negative());
}

#[test]
fn unicode_whitespace_is_opt_in() {
    let text = "\u{a0}[1,\u{2003}2]\u{3000}";
    assert!(from_str(text).is_err());
    let options = DeserializerOptions {
        allow_unicode_whitespace: true,
        ..Default::default()
    };
    assert_eq!(
        from_str_with_options(text, options),
        Ok(Json::Array(vec![Json::Integer(1), Json::Integer(2)]))
    );
}

#[test]
fn deep_nesting_without_a_limit() {
    let depth = 200;
    let text: String = "[".repeat(depth) + &"]".repeat(depth);
    let mut value = from_str(&text).unwrap();
    for _ in 0..depth - 1 {
        let Json::Array(mut items) = value else {
            panic!("expected an array");
        };
        value = items.pop().unwrap();
    }
    assert_eq!(value, Json::Array(vec![]));
}
