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

/// Characters a number token may be assembled from.
#[inline]
pub(crate) fn is_number_char(c: u8) -> bool {
    matches!(c, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
}

/// Characters a number token may start with.
#[inline]
pub(crate) fn is_number_start(c: u8) -> bool {
    matches!(c, b'0'..=b'9' | b'-')
}

/// Converts the longest leading part of `s` that forms a decimal float.
///
/// Trailing characters that do not continue the number are ignored, so
/// `1.2.3` yields `1.2` and `1e` yields `1`. Text without any numeric
/// prefix yields `NaN`.
pub(crate) fn parse_float_prefix(s: &str) -> f64 {
    match fast_float2::parse_partial::<f64, _>(s) {
        Ok((v, _)) => v,
        Err(_) => f64::NAN,
    }
}

/// Converts a number that must match the JSON grammar exactly.
///
/// On failure returns the offset of the first offending byte.
pub(crate) fn parse_float_strict(s: &str) -> Result<f64, usize> {
    check_number_grammar(s.as_bytes())?;
    fast_float2::parse(s).map_err(|_| 0)
}

/// Checks `s` against the strict JSON number grammar
/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
///
/// Returns the offset of the first byte that breaks the grammar.
pub(crate) fn check_number_grammar(s: &[u8]) -> Result<(), usize> {
    let mut idx = 0;
    if s.get(idx) == Some(&b'-') {
        idx += 1;
    }
    match s.get(idx) {
        Some(b'0') => idx += 1,
        Some(b'1'..=b'9') => idx = step_digits(s, idx),
        _ => return Err(idx),
    }
    if s.get(idx) == Some(&b'.') {
        idx += 1;
        let end = step_digits(s, idx);
        if end == idx {
            return Err(idx);
        }
        idx = end;
    }
    if matches!(s.get(idx), Some(b'e' | b'E')) {
        idx += 1;
        if matches!(s.get(idx), Some(b'+' | b'-')) {
            idx += 1;
        }
        let end = step_digits(s, idx);
        if end == idx {
            return Err(idx);
        }
        idx = end;
    }
    if idx == s.len() {
        Ok(())
    } else {
        Err(idx)
    }
}

#[inline]
fn step_digits(s: &[u8], mut idx: usize) -> usize {
    while s.get(idx).is_some_and(u8::is_ascii_digit) {
        idx += 1;
    }
    idx
}
