// mal-embed - Type conversion traits
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type conversion between Rust and mal values.
//!
//! | Rust Type | mal Type |
//! |-----------|----------|
//! | `()` | `nil` |
//! | `bool` | `bool` |
//! | `i32`, `i64`, `usize` | `int` |
//! | `String`, `&str` | `string` |
//! | `Vec<T>` | `vector` (a list is also accepted on the way in) |
//! | `Option<T>` | `T` or `nil` |
//!
//! Implement the traits for your own types to pass them across the
//! boundary:
//!
//! ```rust
//! use mal_embed::{Error, FromMalVal, IntoMalVal, MalVal, Result};
//!
//! struct Point { x: i64, y: i64 }
//!
//! impl IntoMalVal for Point {
//!     fn into_mal_val(self) -> MalVal {
//!         MalVal::vector(vec![MalVal::int(self.x), MalVal::int(self.y)])
//!     }
//! }
//!
//! impl FromMalVal for Point {
//!     fn from_mal_val(val: &MalVal) -> Result<Self> {
//!         match val.as_seq() {
//!             Some(items) if items.len() == 2 => Ok(Point {
//!                 x: i64::from_mal_val(&items[0])?,
//!                 y: i64::from_mal_val(&items[1])?,
//!             }),
//!             _ => Err(Error::type_error("pair of ints", val.type_name())),
//!         }
//!     }
//! }
//! ```

use std::rc::Rc;

use mal_core::{Error, Result};
use mal_parser::MalVal;

/// Convert a Rust type into a `MalVal`.
pub trait IntoMalVal {
    fn into_mal_val(self) -> MalVal;
}

/// Convert a `MalVal` into a Rust type.
pub trait FromMalVal: Sized {
    fn from_mal_val(val: &MalVal) -> Result<Self>;
}

// ============================================================================
// IntoMalVal implementations
// ============================================================================

impl IntoMalVal for MalVal {
    fn into_mal_val(self) -> MalVal {
        self
    }
}

impl IntoMalVal for () {
    fn into_mal_val(self) -> MalVal {
        MalVal::Nil
    }
}

impl IntoMalVal for bool {
    fn into_mal_val(self) -> MalVal {
        MalVal::Bool(self)
    }
}

impl IntoMalVal for i64 {
    fn into_mal_val(self) -> MalVal {
        MalVal::int(self)
    }
}

impl IntoMalVal for i32 {
    fn into_mal_val(self) -> MalVal {
        MalVal::int(i64::from(self))
    }
}

impl IntoMalVal for usize {
    /// Values beyond `i64::MAX` saturate.
    fn into_mal_val(self) -> MalVal {
        MalVal::int(i64::try_from(self).unwrap_or(i64::MAX))
    }
}

impl IntoMalVal for String {
    fn into_mal_val(self) -> MalVal {
        MalVal::string(self)
    }
}

impl IntoMalVal for &str {
    fn into_mal_val(self) -> MalVal {
        MalVal::string(self)
    }
}

impl IntoMalVal for Rc<str> {
    fn into_mal_val(self) -> MalVal {
        MalVal::Str(self)
    }
}

impl<T: IntoMalVal> IntoMalVal for Vec<T> {
    fn into_mal_val(self) -> MalVal {
        MalVal::vector(self.into_iter().map(IntoMalVal::into_mal_val).collect())
    }
}

impl<T: IntoMalVal> IntoMalVal for Option<T> {
    fn into_mal_val(self) -> MalVal {
        match self {
            Some(v) => v.into_mal_val(),
            None => MalVal::Nil,
        }
    }
}

// ============================================================================
// FromMalVal implementations
// ============================================================================

impl FromMalVal for MalVal {
    fn from_mal_val(val: &MalVal) -> Result<Self> {
        Ok(val.clone())
    }
}

impl FromMalVal for () {
    fn from_mal_val(val: &MalVal) -> Result<Self> {
        match val {
            MalVal::Nil => Ok(()),
            other => Err(Error::type_error("nil", other.type_name())),
        }
    }
}

impl FromMalVal for bool {
    fn from_mal_val(val: &MalVal) -> Result<Self> {
        match val {
            MalVal::Bool(b) => Ok(*b),
            other => Err(Error::type_error("bool", other.type_name())),
        }
    }
}

impl FromMalVal for i64 {
    fn from_mal_val(val: &MalVal) -> Result<Self> {
        match val {
            MalVal::Int(n) => Ok(*n),
            other => Err(Error::type_error("int", other.type_name())),
        }
    }
}

impl FromMalVal for i32 {
    fn from_mal_val(val: &MalVal) -> Result<Self> {
        match val {
            MalVal::Int(n) => i32::try_from(*n).map_err(|_| Error::Overflow("i32")),
            other => Err(Error::type_error("int", other.type_name())),
        }
    }
}

impl FromMalVal for usize {
    fn from_mal_val(val: &MalVal) -> Result<Self> {
        match val {
            MalVal::Int(n) if *n >= 0 => usize::try_from(*n).map_err(|_| Error::Overflow("usize")),
            MalVal::Int(_) => Err(Error::type_error("non-negative int", "negative int")),
            other => Err(Error::type_error("non-negative int", other.type_name())),
        }
    }
}

impl FromMalVal for String {
    fn from_mal_val(val: &MalVal) -> Result<Self> {
        match val {
            MalVal::Str(s) => Ok(s.to_string()),
            other => Err(Error::type_error("string", other.type_name())),
        }
    }
}

impl<T: FromMalVal> FromMalVal for Vec<T> {
    fn from_mal_val(val: &MalVal) -> Result<Self> {
        match val.as_seq() {
            Some(items) => items.iter().map(T::from_mal_val).collect(),
            None => Err(Error::type_error("list or vector", val.type_name())),
        }
    }
}

impl<T: FromMalVal> FromMalVal for Option<T> {
    fn from_mal_val(val: &MalVal) -> Result<Self> {
        match val {
            MalVal::Nil => Ok(None),
            other => T::from_mal_val(other).map(Some),
        }
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Convert a Rust value into a `MalVal`.
#[must_use]
pub fn to_mal<T: IntoMalVal>(value: T) -> MalVal {
    value.into_mal_val()
}

/// Convert a `MalVal` into a Rust type.
pub fn from_mal<T: FromMalVal>(val: &MalVal) -> Result<T> {
    T::from_mal_val(val)
}
