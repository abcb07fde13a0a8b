#![expect(missing_docs)]

use jsontree::{Json, Style, from_str, path, to_string_pretty, write_json};

fn render(text: &str, indent: usize) -> String {
    let value = from_str(text).expect("valid document");
    let mut out = String::new();
    write_json(&value, &mut out, Style::Pretty { indent }).expect("writing to a String");
    out
}

#[test]
fn snapshot_nested_document() {
    let text = r#"{"users":[{"id":1,"name":"Ada"},{"id":2,"name":"Grace","tags":[]}],"meta":{"count":2,"next":null,"ratio":0.5}}"#;
    let value = from_str(text).unwrap();

    // Inline snapshot taken from a known-good run via `cargo insta review`.
    insta::assert_snapshot!(to_string_pretty(&value), @r#"
    {
        "meta": {
            "count": 2,
            "next": null,
            "ratio": 0.5
        },
        "users": [
            {
                "id": 1,
                "name": "Ada"
            },
            {
                "id": 2,
                "name": "Grace",
                "tags": []
            }
        ]
    }
    "#);
}

#[test]
fn snapshot_two_space_indent() {
    insta::assert_snapshot!(render(r#"[[1,[2]],{"k":{}}]"#, 2), @r#"
    [
      [
        1,
        [
          2
        ]
      ],
      {
        "k": {}
      }
    ]
    "#);
}

#[test]
fn snapshot_escaped_strings() {
    let value = Json::from(vec!["tab\tnew\nline", "quote \" slash / back \\", "\u{1}\u{1f}", "é😀"]);
    insta::assert_snapshot!(to_string_pretty(&value), @r#"
    [
        "tab\tnew\nline",
        "quote \" slash / back \\",
        "\u0001\u001F",
        "é😀"
    ]
    "#);
}

#[test]
fn snapshot_scalars_stay_on_one_line() {
    insta::assert_snapshot!(render("true", 4), @"true");
    insta::assert_snapshot!(render("-1.5e-7", 4), @"-1.5e-7");
    insta::assert_snapshot!(render("[]", 4), @"[]");
}

#[test]
fn snapshot_alternate_display() {
    let value = from_str(r#"{"a":[true]}"#).unwrap();
    insta::assert_snapshot!(format!("{value}"), @r#"{"a":[true]}"#);
    insta::assert_snapshot!(format!("{value:#}"), @r#"
    {
        "a": [
            true
        ]
    }
    "#);
}

#[test]
fn snapshot_subscripting_errors() {
    let mut value = from_str(r#"{"list":[{"a":1}],"flag":true}"#).unwrap();
    let mut render_err = |p: jsontree::Path| value.set(&p, Json::Null).unwrap_err().to_string();

    insta::assert_snapshot!(render_err(path!["flag", 0]), @"cannot index into boolean at root[flag]");
    insta::assert_snapshot!(render_err(path!["list", "a"]), @"cannot look up a key in array at root[list]");
    insta::assert_snapshot!(render_err(path!["list", 3]), @"index 3 is out of bounds for an array of length 1 at root[list]");
    insta::assert_snapshot!(render_err(path!["nope", "x"]), @r#"no key "nope" in the object at root"#);
}
