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
use std::iter::FromIterator;

use ordered_float::OrderedFloat;
use serde_json::Number as JsonNumber;
use serde_json::Value as JsonValue;

use crate::value::Object;
use crate::value::Value;

// Every JSON number is held as a double, wider integers lose precision.
macro_rules! number_into_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                #[inline]
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

number_into_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<OrderedFloat<f64>> for Value<'_> {
    fn from(n: OrderedFloat<f64>) -> Self {
        Value::Number(n.into_inner())
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<()> for Value<'_> {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        Value::String(s)
    }
}

impl<'a> From<Object<'a>> for Value<'a> {
    fn from(obj: Object<'a>) -> Self {
        Value::Object(obj)
    }
}

impl<'a, T: Into<Value<'a>>> From<Vec<T>> for Value<'a> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<'a, T: Clone + Into<Value<'a>>> From<&'a [T]> for Value<'a> {
    fn from(items: &'a [T]) -> Self {
        items.iter().cloned().collect()
    }
}

/// Collects items into an array.
impl<'a, T: Into<Value<'a>>> FromIterator<T> for Value<'a> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(T::into).collect())
    }
}

/// Collects key-value pairs into an object, a later pair overwrites an
/// earlier one with the same key.
impl<'a, K: Into<String>, V: Into<Value<'a>>> FromIterator<(K, V)> for Value<'a> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let obj: Object<'a> = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Value::Object(obj)
    }
}

impl From<&JsonValue> for Value<'_> {
    fn from(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(v) => Value::Bool(*v),
            JsonValue::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            JsonValue::String(s) => Value::String(Cow::Owned(s.clone())),
            JsonValue::Array(items) => items.iter().map(Value::from).collect(),
            JsonValue::Object(members) => members
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(v)))
                .collect(),
        }
    }
}

impl From<JsonValue> for Value<'_> {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::String(s) => Value::String(Cow::Owned(s)),
            JsonValue::Array(items) => items.into_iter().map(Value::from).collect(),
            JsonValue::Object(members) => members
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect(),
            scalar => Value::from(&scalar),
        }
    }
}

/// Non-finite numbers have no JSON form and become `null`.
impl From<Value<'_>> for JsonValue {
    fn from(value: Value<'_>) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(v) => JsonValue::Bool(v),
            Value::Number(n) => JsonNumber::from_f64(n).map_or(JsonValue::Null, JsonValue::Number),
            Value::String(s) => JsonValue::String(s.into_owned()),
            Value::Array(items) => JsonValue::Array(items.into_iter().map(JsonValue::from).collect()),
            Value::Object(members) => JsonValue::Object(
                members
                    .into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}
