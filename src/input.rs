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

use serde_json::Value as JsonValue;

use crate::constants::*;
use crate::value::Value;

/// Everything the parse entry accepts.
///
/// Text is scanned, scalars are handed back as they are, and anything
/// structured is rejected with [`crate::Error::InvalidInputType`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input<'a> {
    Text(&'a str),
    Null,
    Bool(bool),
    Number(f64),
    /// A structured value, named by its type.
    Unsupported(&'static str),
}

impl Input<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Input::Text(_) => TYPE_STRING,
            Input::Null => TYPE_NULL,
            Input::Bool(_) => TYPE_BOOLEAN,
            Input::Number(_) => TYPE_NUMBER,
            Input::Unsupported(ty) => ty,
        }
    }
}

macro_rules! input_from_number {
    ($($ty:ident)*) => {
        $(
            impl From<$ty> for Input<'_> {
                fn from(n: $ty) -> Self {
                    Input::Number(n as f64)
                }
            }
        )*
    };
}

input_from_number! {
    i8 i16 i32 i64 isize
    u8 u16 u32 u64 usize
    f32 f64
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Input::Text(s)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(s: &'a String) -> Self {
        Input::Text(s.as_str())
    }
}

impl From<bool> for Input<'_> {
    fn from(v: bool) -> Self {
        Input::Bool(v)
    }
}

impl From<()> for Input<'_> {
    fn from((): ()) -> Self {
        Input::Null
    }
}

impl<'a, T: Into<Input<'a>>> From<Option<T>> for Input<'a> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Input::Null,
        }
    }
}

impl<'a> From<&'a Value<'_>> for Input<'a> {
    fn from(value: &'a Value<'_>) -> Self {
        match value {
            Value::Null => Input::Null,
            Value::Bool(v) => Input::Bool(*v),
            Value::Number(n) => Input::Number(*n),
            Value::String(s) => Input::Text(s.as_ref()),
            Value::Array(_) | Value::Object(_) => Input::Unsupported(value.type_name()),
        }
    }
}

impl<'a> From<&'a JsonValue> for Input<'a> {
    fn from(value: &'a JsonValue) -> Self {
        match value {
            JsonValue::Null => Input::Null,
            JsonValue::Bool(v) => Input::Bool(*v),
            JsonValue::Number(n) => match n.as_f64() {
                Some(n) => Input::Number(n),
                None => Input::Unsupported(TYPE_NUMBER),
            },
            JsonValue::String(s) => Input::Text(s.as_str()),
            JsonValue::Array(_) => Input::Unsupported(TYPE_ARRAY),
            JsonValue::Object(_) => Input::Unsupported(TYPE_OBJECT),
        }
    }
}
