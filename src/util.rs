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

use super::constants::*;
use super::error::Error;
use super::error::ParseErrorCode;
use super::error::Result;

#[allow(clippy::zero_prefixed_literal)]
static HEX: [u8; 256] = {
    const __: u8 = 255; // not a hex digit
    [
        //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 0
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
        00, 01, 02, 03, 04, 05, 06, 07, 08, 09, __, __, __, __, __, __, // 3
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 4
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 5
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 6
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
    ]
};

#[inline]
fn simple_escape(byte: u8) -> Option<char> {
    match byte {
        b'"' => Some(QU),
        b'\\' => Some(BS),
        b'/' => Some(SD),
        b'b' => Some(BB),
        b'f' => Some(FF),
        b'n' => Some(NN),
        b'r' => Some(RR),
        b't' => Some(TT),
        _ => None,
    }
}

/// Rewrites the first recognized two-character escape of `data` into the
/// character it stands for. Any later escape is kept as written.
///
/// Returns the input borrowed when it holds no recognized escape.
pub(crate) fn unescape_first(data: &str) -> Cow<'_, str> {
    let bytes = data.as_bytes();
    for idx in 0..bytes.len().saturating_sub(1) {
        if bytes[idx] != b'\\' {
            continue;
        }
        if let Some(c) = simple_escape(bytes[idx + 1]) {
            let mut s = String::with_capacity(data.len() - 1);
            s.push_str(&data[..idx]);
            s.push(c);
            s.push_str(&data[idx + 2..]);
            return Cow::Owned(s);
        }
    }
    Cow::Borrowed(data)
}

/// Decodes every escape sequence of a string body, including `\uXXXX`
/// escapes and UTF-16 surrogate pairs.
///
/// `offset` is the position of `data` inside the parsed text and is only
/// used to report errors.
pub(crate) fn parse_string(data: &str, offset: usize) -> Result<String> {
    let bytes = data.as_bytes();
    let mut buf = String::with_capacity(data.len());
    let mut start = 0;
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] != b'\\' {
            idx += 1;
            continue;
        }
        buf.push_str(&data[start..idx]);
        idx = parse_escaped_string(data, idx + 1, offset, &mut buf)?;
        start = idx;
    }
    buf.push_str(&data[start..]);
    Ok(buf)
}

// `idx` points at the byte following the backslash, the returned index
// points past the whole escape sequence.
fn parse_escaped_string(data: &str, idx: usize, offset: usize, buf: &mut String) -> Result<usize> {
    let bytes = data.as_bytes();
    let Some(&byte) = bytes.get(idx) else {
        return Err(Error::Syntax(
            ParseErrorCode::UnexpectedEndOfInput,
            offset + idx,
        ));
    };
    if let Some(c) = simple_escape(byte) {
        buf.push(c);
        return Ok(idx + 1);
    }
    if byte != b'u' {
        let c = data[idx..].chars().next().unwrap_or(byte as char);
        return Err(Error::Syntax(ParseErrorCode::InvalidEscape(c), offset + idx));
    }

    let numbers = unicode_escape_digits(bytes, idx + 1, offset)?;
    let n1 = decode_hex_escape(numbers, offset + idx + 1)?;
    let mut next = idx + 1 + UNICODE_LEN;

    let c = match n1 {
        // Non-BMP characters are encoded as a sequence of two hex
        // escapes, representing UTF-16 surrogates.
        0xD800..=0xDBFF => {
            let low = if bytes.get(next) == Some(&b'\\') && bytes.get(next + 1) == Some(&b'u') {
                let lower_numbers = unicode_escape_digits(bytes, next + 2, offset)?;
                let n2 = decode_hex_escape(lower_numbers, offset + next + 2)?;
                (0xDC00..=0xDFFF).contains(&n2).then_some(n2)
            } else {
                None
            };
            match low {
                Some(n2) => {
                    next += 2 + UNICODE_LEN;
                    #[allow(clippy::precedence)]
                    let n = (((n1 - 0xD800) as u32) << 10 | (n2 - 0xDC00) as u32) + 0x1_0000;
                    char::from_u32(n)
                }
                None => None,
            }
        }
        // Low surrogate without preceding high surrogate
        0xDC00..=0xDFFF => None,
        n => char::from_u32(n as u32),
    };
    match c {
        Some(c) => buf.push(c),
        None => encode_invalid_unicode(numbers, buf),
    }
    Ok(next)
}

fn unicode_escape_digits(bytes: &[u8], idx: usize, offset: usize) -> Result<&[u8]> {
    bytes.get(idx..idx + UNICODE_LEN).ok_or(Error::Syntax(
        ParseErrorCode::InvalidUnicodeEscape,
        offset + idx,
    ))
}

// https://datatracker.ietf.org/doc/html/rfc8259#section-8.2
// RFC8259 allow invalid Unicode
#[inline]
fn encode_invalid_unicode(numbers: &[u8], buf: &mut String) {
    buf.push('\\');
    buf.push('u');
    for n in numbers {
        buf.push((*n).into());
    }
}

#[inline]
fn decode_hex_val(val: u8) -> Option<u16> {
    let n = HEX[val as usize] as u16;
    if n == 255 {
        None
    } else {
        Some(n)
    }
}

#[inline]
fn decode_hex_escape(numbers: &[u8], pos: usize) -> Result<u16> {
    let mut n = 0;
    for number in numbers {
        if let Some(hex) = decode_hex_val(*number) {
            n = (n << 4) + hex;
        } else {
            return Err(Error::Syntax(ParseErrorCode::InvalidUnicodeEscape, pos));
        }
    }
    Ok(n)
}
