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

use core::fmt::Display;

/// The reason a JSON text was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorCode {
    /// A rule needed more input than remains.
    UnexpectedEndOfInput,
    /// The character at the error position does not fit the rule in force.
    UnexpectedToken(char),

    // Standard mode only.
    InvalidNumber,
    InvalidEscape(char),
    InvalidUnicodeEscape,

    RecursionLimitExceeded,
}

impl Display for ParseErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ParseErrorCode::UnexpectedEndOfInput => f.write_str("unexpected end of JSON input"),
            ParseErrorCode::UnexpectedToken(c) => write!(f, "unexpected token {:?}", c),
            ParseErrorCode::InvalidNumber => f.write_str("invalid number"),
            ParseErrorCode::InvalidEscape(c) => write!(f, "invalid escape {:?}", c),
            ParseErrorCode::InvalidUnicodeEscape => f.write_str("invalid unicode escape"),
            ParseErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A syntax error and the zero-based byte offset it was found at.
    Syntax(ParseErrorCode, usize),
    /// The parse entry received a structured value it cannot scan.
    InvalidInputType(&'static str),
}

impl Error {
    pub fn code(&self) -> Option<&ParseErrorCode> {
        match self {
            Error::Syntax(code, _) => Some(code),
            Error::InvalidInputType(_) => None,
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Syntax(_, pos) => Some(*pos),
            Error::InvalidInputType(_) => None,
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Error::Syntax(ParseErrorCode::UnexpectedEndOfInput, _))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Error::Syntax(code, pos) => write!(f, "{}, pos {}", code, pos),
            Error::InvalidInputType(ty) => {
                write!(f, "invalid input type {}, expected text or a scalar", ty)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
