// mal-core - Error types for the mal evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for mal evaluation.
//!
//! Every error is recoverable: the REPL prints it and reads the next line.

use std::fmt;

use mal_parser::{MalVal, ParseError, Symbol};

/// Result type for mal evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
#[derive(Debug, Clone)]
pub enum Error {
    /// Symbol has no binding anywhere in the environment chain
    UnboundSymbol(Symbol),
    /// Wrong number of arguments to a function
    ArityMismatch {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// Special form with the wrong shape
    MalformedSpecialForm {
        form: &'static str,
        reason: String,
    },
    /// The operator position evaluated to something that isn't a function
    NotCallable(MalVal),
    /// Type error - wrong type for an operation
    TypeError {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },
    /// Division by zero
    DivisionByZero,
    /// Integer overflow in the named operation
    Overflow(&'static str),
    /// Index out of bounds
    IndexOutOfBounds { index: i64, length: usize },
    /// Non-tail evaluation nested deeper than the configured limit
    DepthExceeded(usize),
    /// Reader error from `read-string` or a loaded file
    Read(ParseError),
    /// I/O failure (e.g. `slurp` of a missing file)
    Io {
        context: &'static str,
        path: Option<String>,
        message: String,
    },
    /// Internal error - invariant violation
    Internal(String),
}

/// Expected arity of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnboundSymbol(sym) => write!(f, "'{}' not found", sym),
            Error::ArityMismatch {
                expected,
                got,
                name,
            } => {
                if let Some(name) = name {
                    write!(
                        f,
                        "Wrong number of arguments to '{}': expected {}, got {}",
                        name, expected, got
                    )
                } else {
                    write!(
                        f,
                        "Wrong number of arguments: expected {}, got {}",
                        expected, got
                    )
                }
            }
            Error::MalformedSpecialForm { form, reason } => {
                write!(f, "Malformed '{}': {}", form, reason)
            }
            Error::NotCallable(val) => write!(f, "Cannot call value: {}", val),
            Error::TypeError {
                expected,
                got,
                context,
            } => {
                if let Some(ctx) = context {
                    write!(f, "{}: expected {}, got {}", ctx, expected, got)
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, got)
                }
            }
            Error::DivisionByZero => write!(f, "Division by zero"),
            Error::Overflow(op) => write!(f, "Integer overflow in '{}'", op),
            Error::IndexOutOfBounds { index, length } => {
                write!(
                    f,
                    "Index {} out of bounds for collection of length {}",
                    index, length
                )
            }
            Error::DepthExceeded(max) => {
                write!(f, "Stack overflow: maximum recursion depth ({}) exceeded", max)
            }
            Error::Read(e) => write!(f, "{}", e),
            Error::Io {
                context,
                path,
                message,
            } => match path {
                Some(path) => write!(f, "{}: {}: {}", context, path, message),
                None => write!(f, "{}: {}", context, message),
            },
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Read(e)
    }
}

impl Error {
    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityMismatch {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity with function name.
    pub fn arity_at_least(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityMismatch {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error without context.
    pub fn type_error(expected: &'static str, got: &'static str) -> Self {
        Error::TypeError {
            expected,
            got,
            context: None,
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create a malformed special form error.
    pub fn malformed(form: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedSpecialForm {
            form,
            reason: reason.into(),
        }
    }

    /// Wrap an I/O error.
    pub fn io(context: &'static str, path: Option<String>, err: std::io::Error) -> Self {
        Error::Io {
            context,
            path,
            message: err.to_string(),
        }
    }
}
