// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::borrow::Cow;

use jsonparse::{
    parse, parse_standard_mode, parse_with_options, Error, Object, ParseErrorCode, ParseMode,
    ParseOptions, Value,
};
use serde_json::json;

fn test_parse_err(errors: &[(&str, &'static str)]) {
    for &(s, err) in errors {
        let res = parse(s);
        assert!(res.is_err(), "expected error for {:?}", s);
        assert_eq!(res.err().unwrap().to_string(), err, "input: {:?}", s);
    }
}

fn test_parse_ok(tests: Vec<(&str, Value<'_>)>) {
    for (s, val) in tests {
        assert_eq!(parse(s).unwrap(), val, "input: {:?}", s);
    }
}

fn test_parse_standard_err(errors: &[(&str, &'static str)]) {
    for &(s, err) in errors {
        let res = parse_standard_mode(s);
        assert!(res.is_err(), "expected error for {:?}", s);
        assert_eq!(res.err().unwrap().to_string(), err, "input: {:?}", s);
    }
}

fn test_parse_standard_ok(tests: Vec<(&str, Value<'_>)>) {
    for (s, val) in tests {
        assert_eq!(parse_standard_mode(s).unwrap(), val, "input: {:?}", s);
    }
}

fn string(s: &str) -> Value<'_> {
    Value::String(Cow::Borrowed(s))
}

fn object<'a>(members: Vec<(&str, Value<'a>)>) -> Value<'a> {
    let mut obj = Object::new();
    for (k, v) in members {
        obj.insert(k.to_string(), v);
    }
    Value::Object(obj)
}

#[test]
fn test_parse_null() {
    test_parse_err(&[
        ("n", "unexpected end of JSON input, pos 1"),
        ("nul", "unexpected end of JSON input, pos 3"),
        ("nulx", "unexpected token 'x', pos 3"),
        ("nUll", "unexpected token 'U', pos 1"),
        ("nulla", "unexpected token 'a', pos 4"),
    ]);

    test_parse_ok(vec![("null", Value::Null), ("  null\n", Value::Null)]);
}

#[test]
fn test_parse_boolean() {
    test_parse_err(&[
        ("t", "unexpected end of JSON input, pos 1"),
        ("truz", "unexpected token 'z', pos 3"),
        ("f", "unexpected end of JSON input, pos 1"),
        ("faz", "unexpected token 'z', pos 2"),
        ("truea", "unexpected token 'a', pos 4"),
        ("falsea", "unexpected token 'a', pos 5"),
    ]);

    test_parse_ok(vec![
        ("true", Value::Bool(true)),
        (" true ", Value::Bool(true)),
        ("false", Value::Bool(false)),
        ("\n false\t", Value::Bool(false)),
    ]);
}

#[test]
fn test_parse_number() {
    test_parse_ok(vec![
        ("0", Value::Number(0.0)),
        ("-100", Value::Number(-100.0)),
        ("-123.456E+2", Value::Number(-12345.6)),
        ("1e5", Value::Number(100000.0)),
        ("1E5", Value::Number(100000.0)),
        ("1e+5", Value::Number(100000.0)),
        ("1E-5", Value::Number(0.00001)),
        ("1.234", Value::Number(1.234)),
        ("-0.5", Value::Number(-0.5)),
        ("-0.123E2", Value::Number(-12.3)),
        ("-0.123E-3", Value::Number(-0.000123)),
    ]);

    // Malformed runs of number characters keep their longest numeric prefix.
    test_parse_ok(vec![
        ("1.2.3", Value::Number(1.2)),
        ("007", Value::Number(7.0)),
        ("1-2", Value::Number(1.0)),
        ("-", Value::Number(f64::NAN)),
    ]);

    test_parse_err(&[
        ("1a", "unexpected token 'a', pos 1"),
        ("12x", "unexpected token 'x', pos 2"),
        ("+1", "unexpected token '+', pos 0"),
        (".5", "unexpected token '.', pos 0"),
        ("1 2", "unexpected token ' ', pos 1"),
    ]);
}

#[test]
fn test_parse_string() {
    test_parse_ok(vec![
        (r#""value""#, string("value")),
        (r#""""#, string("")),
        (r#"  "  123"  "#, string("  123")),
        (r#""中文""#, string("中文")),
        (r#""abc\"qwe""#, string("abc\"qwe")),
        (r#""\/path""#, string("/path")),
        // only the first escape sequence is decoded
        (r#""a\nb\tc""#, string("a\nb\\tc")),
        // unicode escapes are not decoded
        (r#""\u0041""#, string("\\u0041")),
    ]);

    test_parse_err(&[
        (r#"""#, "unexpected end of JSON input, pos 1"),
        (r#""abc"#, "unexpected end of JSON input, pos 4"),
        // a backslash before the closing quote hides it
        (r#""ends with \\""#, "unexpected end of JSON input, pos 14"),
        (r#""a" "b""#, "unexpected token ' ', pos 3"),
    ]);
}

#[test]
fn test_parse_array() {
    test_parse_ok(vec![
        ("[]", Value::Array(vec![])),
        ("[ ]", Value::Array(vec![])),
        ("[[]]", Value::Array(vec![Value::Array(vec![])])),
        (
            "[1, 2, 3]",
            Value::Array(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0),
            ]),
        ),
        (
            "[true,false,null,\"x\",{}]",
            Value::Array(vec![
                Value::Bool(true),
                Value::Bool(false),
                Value::Null,
                string("x"),
                object(vec![]),
            ]),
        ),
    ]);

    // Missing, leading and doubled commas are tolerated.
    test_parse_ok(vec![
        (
            "[1 2]",
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]),
        ),
        ("[,1]", Value::Array(vec![Value::Number(1.0)])),
        (
            "[1,,2]",
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]),
        ),
    ]);

    test_parse_err(&[
        ("[", "unexpected end of JSON input, pos 1"),
        ("[1", "unexpected end of JSON input, pos 2"),
        ("[1,", "unexpected end of JSON input, pos 3"),
        ("[1,]", "unexpected token ']', pos 3"),
        ("[1}", "unexpected token '}', pos 2"),
        ("[1]]", "unexpected token ']', pos 3"),
        ("]", "unexpected token ']', pos 0"),
        ("[\"中\", x]", "unexpected token 'x', pos 8"),
    ]);
}

#[test]
fn test_parse_object() {
    test_parse_ok(vec![
        ("{}", object(vec![])),
        (r#"{ "key": "value" }"#, object(vec![("key", string("value"))])),
        (r#"{ "key": -100 }"#, object(vec![("key", Value::Number(-100.0))])),
        (r#"{ "key": 1e+5 }"#, object(vec![("key", Value::Number(100000.0))])),
        (r#"{ "key": null }"#, object(vec![("key", Value::Null)])),
        (
            r#"{ "key": { "key": "value" } }"#,
            object(vec![("key", object(vec![("key", string("value"))]))]),
        ),
        (
            r#"{ "key": [{}, [], "value"] }"#,
            object(vec![(
                "key",
                Value::Array(vec![object(vec![]), Value::Array(vec![]), string("value")]),
            )]),
        ),
        (
            r#"{ "key1": [], "key2": true, "key3": -0.123E2 }"#,
            object(vec![
                ("key1", Value::Array(vec![])),
                ("key2", Value::Bool(true)),
                ("key3", Value::Number(-12.3)),
            ]),
        ),
        (
            r#"  { "key":      true,    "key1":  "  123"}  "#,
            object(vec![("key", Value::Bool(true)), ("key1", string("  123"))]),
        ),
        // members need not be separated by commas
        (
            r#"{"a":1 "b":2}"#,
            object(vec![("a", Value::Number(1.0)), ("b", Value::Number(2.0))]),
        ),
    ]);

    test_parse_err(&[
        ("{", "unexpected end of JSON input, pos 1"),
        ("{{}", "unexpected token '{', pos 1"),
        ("{}{}", "unexpected token '{', pos 2"),
        ("{[]}", "unexpected token '[', pos 1"),
        ("{'123': 123}", "unexpected token '\\'', pos 1"),
        (r#"{"key",}"#, "unexpected token ',', pos 6"),
        (r#"{"key":,}"#, "unexpected token ',', pos 7"),
        (r#"{ "key": 1 23}"#, "unexpected token '2', pos 11"),
        (r#"{  "ke y": "#, "unexpected end of JSON input, pos 10"),
        ("{,}", "unexpected token ',', pos 1"),
        // only arrays skip stray commas
        (r#"{"a":1,,"b":2}"#, "unexpected token ',', pos 7"),
        (r#"{ "key" 123}"#, "unexpected token '1', pos 8"),
        (r#"{"key": , "key1": 123}"#, "unexpected token ',', pos 8"),
        (r#"{ "key": [1, 2,]}"#, "unexpected token ']', pos 15"),
        // a trailing comma reports the end of input
        (r#"{"key": 123,}"#, "unexpected end of JSON input, pos 12"),
        (
            r#"{"key": 123, "key1": "123" , }"#,
            "unexpected token '}', pos 29",
        ),
    ]);
}

#[test]
fn test_parse_object_order() {
    let value = parse(r#"{"z": 1, "a": 2, "m": 3, "a": 4}"#).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    assert_eq!(value.get("a"), Some(&Value::Number(4.0)));
}

#[test]
fn test_parse_complex() {
    let text = r#"{ "key": { "key": "value", "key1": [ 1, 2, 3 ], "key2": { "key": 123, "key1": true, "key2": [ true, false, true ], "key3": { "key": null, "key1": "abc\"qwe", "key2": -0.123E-3 } } } }"#;
    let expected = json!({
        "key": {
            "key": "value",
            "key1": [1, 2, 3],
            "key2": {
                "key": 123,
                "key1": true,
                "key2": [true, false, true],
                "key3": {"key": null, "key1": "abc\"qwe", "key2": -0.000123}
            }
        }
    });
    assert_eq!(parse(text).unwrap(), Value::from(&expected));
    assert_eq!(parse_standard_mode(text).unwrap(), Value::from(&expected));
}

#[test]
fn test_parse_input_types() {
    assert_eq!(parse(42u32).unwrap(), Value::Number(42.0));
    assert_eq!(parse(-0.5f64).unwrap(), Value::Number(-0.5));
    assert_eq!(parse(false).unwrap(), Value::Bool(false));
    assert_eq!(parse(()).unwrap(), Value::Null);
    assert_eq!(parse(None::<&str>).unwrap(), Value::Null);

    let text = String::from("[1]");
    assert_eq!(parse(&text).unwrap(), Value::Array(vec![Value::Number(1.0)]));

    // a string value is parsed as text
    let json = json!({"text": "\"x\"", "arr": [1]});
    assert_eq!(parse(&json["text"]).unwrap(), string("x"));

    let res = parse(&json);
    assert_eq!(res, Err(Error::InvalidInputType("object")));
    assert_eq!(
        res.err().unwrap().to_string(),
        "invalid input type object, expected text or a scalar"
    );
    assert_eq!(
        parse(&json["arr"]),
        Err(Error::InvalidInputType("array"))
    );
}

#[test]
fn test_parse_idempotent() {
    for text in ["-12.5", "true", "false", "null"] {
        let value = parse(text).unwrap();
        assert_eq!(parse(&value).unwrap(), value);
    }

    let value = parse(r#""[1, 2]""#).unwrap();
    assert_eq!(value, string("[1, 2]"));
    assert_eq!(
        parse(&value).unwrap(),
        Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
    );

    let value = parse("[]").unwrap();
    assert_eq!(parse(&value), Err(Error::InvalidInputType("array")));
}

#[test]
fn test_parse_control_whitespace() {
    test_parse_ok(vec![
        (
            "[\x01 1,\x1f\x0b2 ]",
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]),
        ),
        (
            "{\x02\"a\"\x03:\x04true\x05}",
            object(vec![("a", Value::Bool(true))]),
        ),
        ("[1\n]", Value::Array(vec![Value::Number(1.0)])),
    ]);
}

#[test]
fn test_parse_error_api() {
    let err = parse("[1, 2,]").unwrap_err();
    assert_eq!(err.code(), Some(&ParseErrorCode::UnexpectedToken(']')));
    assert_eq!(err.position(), Some(6));
    assert!(!err.is_eof());

    let err = parse("[1, 2").unwrap_err();
    assert!(err.is_eof());
    assert_eq!(err.position(), Some(5));
}

#[test]
fn test_parse_standard() {
    test_parse_standard_ok(vec![
        (
            "[1, 2, 3]",
            Value::Array(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0),
            ]),
        ),
        ("-0.123E-3", Value::Number(-0.000123)),
        (r#""a\nb\tc""#, Value::String(Cow::Owned("a\nb\tc".to_string()))),
        (r#""\\""#, string("\\")),
        (r#""\u0041\ud83d\ude00""#, string("A😀")),
        (" {\"a\" : [ {} ] }\r\n", object(vec![("a", Value::Array(vec![object(vec![])]))])),
    ]);

    test_parse_standard_err(&[
        ("[1 2]", "unexpected token '2', pos 3"),
        ("[,1]", "unexpected token ',', pos 1"),
        ("[1,,2]", "unexpected token ',', pos 3"),
        ("[1,]", "unexpected token ']', pos 3"),
        (r#"{"a":1,}"#, "unexpected token '}', pos 7"),
        (r#"{"a":1 "b":2}"#, "unexpected token '\"', pos 7"),
        ("01", "invalid number, pos 1"),
        ("1.", "invalid number, pos 2"),
        ("-", "invalid number, pos 1"),
        ("1.2.3", "invalid number, pos 3"),
        ("1e", "invalid number, pos 2"),
        (r#""a\qb""#, "invalid escape 'q', pos 3"),
        (r#""\u12G4""#, "invalid unicode escape, pos 3"),
        ("\"a\tb\"", "unexpected token '\\t', pos 2"),
        ("[\x011]", "unexpected token '\\u{1}', pos 1"),
        (r#""abc"#, "unexpected end of JSON input, pos 4"),
    ]);

    // The backslash only escapes the character right after it.
    assert!(parse(r#""\\""#).is_err());
    assert_eq!(parse_standard_mode(r#""\\""#).unwrap(), string("\\"));
}

#[test]
fn test_parse_options() {
    let options = ParseOptions::new()
        .with_mode(ParseMode::Standard)
        .with_max_depth(1);
    assert_eq!(
        parse_with_options("[1, 2]", &options).unwrap(),
        Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
    );
    assert_eq!(
        parse_with_options("[[1]]", &options),
        Err(Error::Syntax(ParseErrorCode::RecursionLimitExceeded, 1))
    );
    assert_eq!(
        parse_with_options("[1 2]", &options.clone().with_mode(ParseMode::Compatible))
            .unwrap(),
        Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
    );
    assert_eq!(parse_with_options(7i8, &options).unwrap(), Value::Number(7.0));
}
