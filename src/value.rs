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
use std::fmt::Debug;
use std::fmt::Formatter;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::constants::*;

/// Object members in the order they first appeared in the text.
pub type Object<'a> = IndexMap<String, Value<'a>>;

/// Represents a parsed JSON value.
///
/// Strings that needed no unescaping borrow from the parsed text.
#[derive(Clone, Default)]
pub enum Value<'a> {
    /// Represents a JSON null value
    #[default]
    Null,
    /// Represents a JSON boolean value (true or false)
    Bool(bool),
    /// Represents a JSON number, always held as a double
    Number(f64),
    /// Represents a JSON string value
    String(Cow<'a, str>),
    /// Represents a JSON array of values
    Array(Vec<Value<'a>>),
    /// Represents a JSON object as key-value pairs
    Object(Object<'a>),
}

// Numbers compare through `OrderedFloat`, so `NaN` equals itself and the
// relation stays an equivalence.
impl Eq for Value<'_> {}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(v1), Value::Bool(v2)) => v1 == v2,
            (Value::Number(v1), Value::Number(v2)) => OrderedFloat(*v1) == OrderedFloat(*v2),
            (Value::String(v1), Value::String(v2)) => v1 == v2,
            (Value::Array(arr1), Value::Array(arr2)) => arr1 == arr2,
            (Value::Object(obj1), Value::Object(obj2)) => obj1 == obj2,
            (_, _) => false,
        }
    }
}

// Strings print without the `Cow` wrapper.
impl Debug for Value<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Number(n) => write!(f, "Number({:?})", n),
            Value::String(s) => write!(f, "String({:?})", s.as_ref()),
            Value::Array(items) => {
                f.write_str("Array")?;
                f.debug_list().entries(items).finish()
            }
            Value::Object(members) => {
                f.write_str("Object")?;
                f.debug_map().entries(members).finish()
            }
        }
    }
}

impl<'a> Value<'a> {
    /// Whether the value is neither an array nor an object.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        if let Value::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value<'a>>> {
        if let Value::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_object(&self) -> Option<&Object<'a>> {
        if let Value::Object(members) = self {
            Some(members)
        } else {
            None
        }
    }

    /// Looks up an object member by key.
    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        self.as_object().and_then(|members| members.get(key))
    }

    /// Looks up an array element by index.
    pub fn get_index(&self, index: usize) -> Option<&Value<'a>> {
        self.as_array().and_then(|items| items.get(index))
    }

    pub fn array_length(&self) -> Option<usize> {
        self.as_array().map(Vec::len)
    }

    /// The member keys of an object as an array of strings, in member order.
    pub fn object_keys(&self) -> Option<Value<'a>> {
        self.as_object()
            .map(|members| members.keys().cloned().map(Value::from).collect())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => TYPE_NULL,
            Value::Bool(_) => TYPE_BOOLEAN,
            Value::Number(_) => TYPE_NUMBER,
            Value::String(_) => TYPE_STRING,
            Value::Array(_) => TYPE_ARRAY,
            Value::Object(_) => TYPE_OBJECT,
        }
    }

    /// Copies every borrowed string so the value no longer depends on the
    /// parsed text.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Null => Value::Null,
            Value::Bool(v) => Value::Bool(v),
            Value::Number(v) => Value::Number(v),
            Value::String(s) => Value::String(Cow::Owned(s.into_owned())),
            Value::Array(arr) => Value::Array(arr.into_iter().map(Value::into_owned).collect()),
            Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, v.into_owned()))
                    .collect(),
            ),
        }
    }
}
