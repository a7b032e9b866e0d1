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

//! `jsonparse` is a single-pass recursive-descent parser that turns `JSON` text into a [`Value`] tree.
//!
//! ## Features
//!
//! - Precise errors: every syntax error carries its kind and the byte offset it was found at.
//! - Ordered objects: members keep the order they appear in, a repeated key overwrites the earlier value.
//! - Zero-copy strings: strings without escape sequences borrow from the input text.
//! - Scalar pass-through: `()`, booleans and numbers handed to [`parse`] come back unchanged.
//!
//! ## Grammar
//!
//! [`parse`] uses the compatible grammar, a tolerant dialect of `JSON`:
//!
//! - every character up to and including the space counts as whitespace
//! - a string ends at the first `"` not directly preceded by `\`, and only its first escape sequence is decoded
//! - a number is the run of `0-9 - + . e E` characters, converted from its longest numeric prefix
//! - commas between array elements and between object members may be omitted
//! - a comma directly before `]` or `}` is rejected
//!
//! [`parse_standard_mode`] accepts exactly the RFC 8259 grammar instead.
//!
//! ```
//! use jsonparse::{parse, parse_standard_mode, Value};
//!
//! let value = parse(r#"  { "key": true, "key1": "  123"}  "#).unwrap();
//! assert_eq!(value.get("key"), Some(&Value::Bool(true)));
//! assert_eq!(value.get("key1").and_then(Value::as_str), Some("  123"));
//!
//! assert!(parse("[1 2]").is_ok());
//! assert!(parse_standard_mode("[1 2]").is_err());
//! ```

#![allow(clippy::uninlined_format_args)]

mod constants;
mod error;
mod from;
mod input;
mod number;
mod parser;
mod util;
mod value;

pub use error::Error;
pub use error::ParseErrorCode;
pub use error::Result;
#[allow(unused_imports)]
pub use from::*;
pub use input::Input;
pub use parser::parse;
pub use parser::parse_standard_mode;
pub use parser::parse_with_options;
pub use parser::ParseMode;
pub use parser::ParseOptions;
pub use value::*;
