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

use log::debug;
use log::trace;

use super::constants::*;
use super::error::Error;
use super::error::ParseErrorCode;
use super::error::Result;
use super::input::Input;
use super::number::is_number_char;
use super::number::is_number_start;
use super::number::parse_float_prefix;
use super::number::parse_float_strict;
use super::util::parse_string;
use super::util::unescape_first;
use super::value::Object;
use super::value::Value;

/// Grammar accepted by the parser.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// The tolerant grammar:
    /// - every control character counts as whitespace
    /// - a string ends at the first quote not preceded by a backslash, and
    ///   only its first escape sequence is decoded
    /// - numbers are converted from their longest numeric prefix
    /// - array and object members need not be separated by commas
    #[default]
    Compatible,
    /// RFC 8259 JSON.
    Standard,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: ParseMode,
    /// Deepest allowed nesting of arrays and objects.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parse JSON text into a [`Value`].
///
/// Scalars (`()`, booleans and numbers, or scalar values) are returned
/// unchanged, text is trimmed and scanned with the compatible grammar.
///
/// ```
/// use jsonparse::{parse, Value};
///
/// let value = parse(r#"{ "key": [1, 2, 3] }"#).unwrap();
/// assert_eq!(value.get("key").and_then(Value::array_length), Some(3));
/// assert_eq!(parse(true).unwrap(), Value::Bool(true));
/// ```
pub fn parse<'a>(input: impl Into<Input<'a>>) -> Result<Value<'a>> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse JSON text into a [`Value`] using the strict RFC 8259 grammar.
pub fn parse_standard_mode<'a>(input: impl Into<Input<'a>>) -> Result<Value<'a>> {
    parse_with_options(input, &ParseOptions::new().with_mode(ParseMode::Standard))
}

pub fn parse_with_options<'a>(
    input: impl Into<Input<'a>>,
    options: &ParseOptions,
) -> Result<Value<'a>> {
    let input = input.into();
    let text = match input {
        Input::Text(text) => text,
        Input::Null | Input::Bool(_) | Input::Number(_) => {
            trace!("pass through {} input", input.kind());
            return Ok(match input {
                Input::Bool(v) => Value::Bool(v),
                Input::Number(n) => Value::Number(n),
                _ => Value::Null,
            });
        }
        Input::Unsupported(ty) => {
            debug!("refusing to parse {} input", ty);
            return Err(Error::InvalidInputType(ty));
        }
    };
    let text = match options.mode {
        ParseMode::Compatible => text.trim_matches(is_trim_whitespace),
        ParseMode::Standard => text.trim_matches(&[' ', '\t', '\n', '\r'][..]),
    };
    debug!("parse {} bytes of text, mode {:?}", text.len(), options.mode);

    let mut parser = Parser::new(text, options);
    parser
        .parse()
        .inspect_err(|err| debug!("parse failed: {}", err))
}

// Space separators, the ASCII whitespace controls, the line and paragraph
// separators and the byte order mark. NEL (U+0085) is not trimmed.
fn is_trim_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\x0B' | '\x0C' | '\r' | ' ' | '\u{A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

// The cursor rests on the last character a rule consumed, callers step
// past it before reading on.
struct Parser<'a> {
    text: &'a str,
    buf: &'a [u8],
    idx: usize,
    mode: ParseMode,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, options: &ParseOptions) -> Parser<'a> {
        Self {
            text,
            buf: text.as_bytes(),
            idx: 0,
            mode: options.mode,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    fn parse(&mut self) -> Result<Value<'a>> {
        let val = self.parse_json_value()?;
        self.step();
        if self.idx != self.buf.len() {
            return Err(self.unexpected());
        }
        Ok(val)
    }

    fn parse_json_value(&mut self) -> Result<Value<'a>> {
        let Some(c) = self.peek() else {
            return Err(self.eof());
        };
        trace!("parse value at pos {}", self.idx);
        match c {
            b'"' => self.parse_json_string().map(Value::String),
            b'{' => self.parse_json_object(),
            b'[' => self.parse_json_array(),
            b't' => self.parse_json_true(),
            b'f' => self.parse_json_false(),
            b'n' => self.parse_json_null(),
            c if is_number_start(c) => self.parse_json_number(),
            _ => Err(self.unexpected()),
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.buf.get(self.idx).copied()
    }

    #[inline]
    fn step(&mut self) {
        self.idx += 1;
    }

    /// Step once, failing if the input is used up.
    #[inline]
    fn step_expect_more(&mut self) -> Result<()> {
        self.step();
        if self.is_eof() {
            return Err(self.eof());
        }
        Ok(())
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.idx >= self.buf.len()
    }

    fn error(&self, code: ParseErrorCode) -> Error {
        Error::Syntax(code, self.idx)
    }

    fn eof(&self) -> Error {
        self.error(ParseErrorCode::UnexpectedEndOfInput)
    }

    fn unexpected(&self) -> Error {
        match self.text.get(self.idx..).and_then(|s| s.chars().next()) {
            Some(c) => self.error(ParseErrorCode::UnexpectedToken(c)),
            None => self.eof(),
        }
    }

    #[inline]
    fn is_whitespace(&self, c: u8) -> bool {
        match self.mode {
            ParseMode::Compatible => c <= WHITESPACE_MAX,
            ParseMode::Standard => matches!(c, b' ' | b'\t' | b'\n' | b'\r'),
        }
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while self.peek().is_some_and(|c| self.is_whitespace(c)) {
            self.step();
            if self.is_eof() {
                return Err(self.eof());
            }
        }
        Ok(())
    }

    fn enter_container(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error(ParseErrorCode::RecursionLimitExceeded));
        }
        Ok(())
    }

    fn leave_container(&mut self) {
        self.depth -= 1;
    }

    // The final letter is checked but not stepped over.
    fn parse_keyword(&mut self, keyword: &[u8]) -> Result<()> {
        let last = keyword.len() - 1;
        for (i, expected) in keyword.iter().enumerate() {
            if self.peek() != Some(*expected) {
                return Err(self.unexpected());
            }
            if i == last {
                break;
            }
            self.step_expect_more()?;
        }
        Ok(())
    }

    fn parse_json_null(&mut self) -> Result<Value<'a>> {
        self.parse_keyword(NULL_KEYWORD)?;
        Ok(Value::Null)
    }

    fn parse_json_true(&mut self) -> Result<Value<'a>> {
        self.parse_keyword(TRUE_KEYWORD)?;
        Ok(Value::Bool(true))
    }

    fn parse_json_false(&mut self) -> Result<Value<'a>> {
        self.parse_keyword(FALSE_KEYWORD)?;
        Ok(Value::Bool(false))
    }

    /// Parse a JSON number.
    ///
    /// The token is the run of number characters up to whitespace, `,`,
    /// `]`, `}` or the end of input. Any other character inside the run is
    /// an unexpected token. In compatible mode the run is converted from its
    /// longest numeric prefix, so malformed runs like `1.2.3` still produce
    /// a value; standard mode rejects anything outside the JSON grammar.
    fn parse_json_number(&mut self) -> Result<Value<'a>> {
        let start = self.idx;
        while let Some(c) = self.peek() {
            if self.is_whitespace(c) || matches!(c, b',' | b']' | b'}') {
                break;
            }
            if !is_number_char(c) {
                return Err(self.unexpected());
            }
            self.step();
        }
        let end = self.idx;
        // the dispatcher guarantees at least one character was taken
        self.idx -= 1;

        let text = self.text;
        let s = &text[start..end];
        match self.mode {
            ParseMode::Compatible => Ok(Value::Number(parse_float_prefix(s))),
            ParseMode::Standard => parse_float_strict(s)
                .map(Value::Number)
                .map_err(|pos| Error::Syntax(ParseErrorCode::InvalidNumber, start + pos)),
        }
    }

    /// Parse a JSON string, leaving the cursor on the closing quote.
    ///
    /// Strings without escape sequences are borrowed from the input.
    fn parse_json_string(&mut self) -> Result<Cow<'a, str>> {
        if self.peek() != Some(b'"') {
            return Err(self.unexpected());
        }
        self.step();
        let start = self.idx;
        let text = self.text;

        match self.mode {
            ParseMode::Compatible => {
                // A quote right after a backslash never ends the string, even
                // when that backslash is itself escaped.
                let end = (start..self.buf.len())
                    .find(|&i| self.buf[i] == b'"' && self.buf[i - 1] != b'\\');
                match end {
                    Some(end) => {
                        self.idx = end;
                        Ok(unescape_first(&text[start..end]))
                    }
                    None => {
                        self.idx = self.buf.len();
                        Err(self.eof())
                    }
                }
            }
            ParseMode::Standard => {
                let mut escaped = false;
                loop {
                    let Some(c) = self.peek() else {
                        return Err(self.eof());
                    };
                    match c {
                        b'"' => break,
                        b'\\' => {
                            escaped = true;
                            self.step_expect_more()?;
                        }
                        c if c < 0x20 => return Err(self.unexpected()),
                        _ => {}
                    }
                    self.step();
                }
                let data = &text[start..self.idx];
                if escaped {
                    Ok(Cow::Owned(parse_string(data, start)?))
                } else {
                    Ok(Cow::Borrowed(data))
                }
            }
        }
    }

    fn parse_json_array(&mut self) -> Result<Value<'a>> {
        if self.peek() != Some(b'[') {
            return Err(self.unexpected());
        }
        self.enter_container()?;
        self.step_expect_more()?;
        self.skip_whitespace()?;

        let values = match self.mode {
            ParseMode::Compatible => self.parse_array_members()?,
            ParseMode::Standard => self.parse_array_members_standard()?,
        };
        self.leave_container();
        Ok(Value::Array(values))
    }

    // Commas are consumed wherever they appear, except directly before the
    // closing bracket.
    fn parse_array_members(&mut self) -> Result<Vec<Value<'a>>> {
        let mut values = Vec::new();
        while self.peek() != Some(b']') {
            if self.peek() != Some(b',') {
                values.push(self.parse_json_value()?);
                self.step();
            } else {
                self.step();
                if self.peek() == Some(b']') {
                    return Err(self.unexpected());
                }
            }
            if self.is_eof() {
                return Err(self.eof());
            }
            self.skip_whitespace()?;
        }
        Ok(values)
    }

    fn parse_array_members_standard(&mut self) -> Result<Vec<Value<'a>>> {
        let mut values = Vec::new();
        if self.peek() == Some(b']') {
            return Ok(values);
        }
        loop {
            values.push(self.parse_json_value()?);
            self.step_expect_more()?;
            self.skip_whitespace()?;
            match self.peek() {
                Some(b',') => {
                    self.step_expect_more()?;
                    self.skip_whitespace()?;
                }
                Some(b']') => return Ok(values),
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_json_object(&mut self) -> Result<Value<'a>> {
        if self.peek() != Some(b'{') {
            return Err(self.unexpected());
        }
        self.enter_container()?;
        self.step();
        self.skip_whitespace()?;

        let obj = match self.mode {
            ParseMode::Compatible => self.parse_object_members()?,
            ParseMode::Standard => self.parse_object_members_standard()?,
        };
        self.leave_container();
        Ok(Value::Object(obj))
    }

    // A comma directly before the closing brace reports the end of input,
    // not an unexpected token.
    fn parse_object_members(&mut self) -> Result<Object<'a>> {
        let mut obj = Object::new();
        while self.peek() != Some(b'}') {
            let (key, value) = self.parse_key_value()?;
            obj.insert(key, value);
            self.step_expect_more()?;
            self.skip_whitespace()?;
            match self.peek() {
                Some(b',') => {
                    self.step();
                    if self.is_eof() || self.peek() == Some(b'}') {
                        return Err(self.eof());
                    }
                }
                Some(b'}') => break,
                _ => {}
            }
        }
        Ok(obj)
    }

    fn parse_object_members_standard(&mut self) -> Result<Object<'a>> {
        let mut obj = Object::new();
        if self.peek() == Some(b'}') {
            return Ok(obj);
        }
        loop {
            let (key, value) = self.parse_key_value()?;
            obj.insert(key, value);
            self.step_expect_more()?;
            self.skip_whitespace()?;
            match self.peek() {
                Some(b',') => self.step_expect_more()?,
                Some(b'}') => return Ok(obj),
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_key_value(&mut self) -> Result<(String, Value<'a>)> {
        self.skip_whitespace()?;
        let key = self.parse_json_string()?.into_owned();
        self.step_expect_more()?;
        self.skip_whitespace()?;
        if self.peek() != Some(b':') {
            return Err(self.unexpected());
        }
        self.step_expect_more()?;
        self.skip_whitespace()?;
        let value = self.parse_json_value()?;
        Ok((key, value))
    }
}
