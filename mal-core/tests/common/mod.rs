// mal-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers and utilities for mal integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate code in a fresh environment with builtins and prelude
//! - [`eval_str_with_env`] - Evaluate code in an existing environment
//! - [`eval_all`] - Evaluate multiple expressions, returning the last
//! - [`new_env`] - Create a new environment with builtins and prelude
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_eval_err!`] - Assert that code produces an error

// Re-export common types for convenience
#[allow(unused_imports)]
pub use mal_core::{Env, Error, eval, new_root_env};
#[allow(unused_imports)]
pub use mal_parser::{MalVal, Parser, pr_str, read};

/// Evaluate a mal expression string in a fresh environment.
///
/// # Returns
///
/// Returns the evaluated value, or the evaluation error.
#[allow(dead_code)]
pub fn eval_str(s: &str) -> Result<MalVal, Error> {
    let env = new_env();
    eval_str_with_env(s, &env)
}

/// Evaluate a mal expression string in the given environment.
#[allow(dead_code)]
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<MalVal, Error> {
    let mut parser = Parser::new(s)?;
    match parser.parse()? {
        Some(expr) => eval(&expr, env),
        None => Ok(MalVal::Nil),
    }
}

/// Evaluate multiple mal expressions, returning the last result.
///
/// This is useful when you need to set up definitions before the final
/// expression.
#[allow(dead_code)]
pub fn eval_all(s: &str, env: &Env) -> Result<MalVal, Error> {
    let mut parser = Parser::new(s)?;
    let mut result = MalVal::Nil;
    while let Some(expr) = parser.parse()? {
        result = eval(&expr, env)?;
    }
    Ok(result)
}

/// Create a new environment with builtins and the prelude installed.
///
/// # Panics
///
/// Panics if the prelude fails to load.
#[must_use]
pub fn new_env() -> Env {
    new_root_env().expect("prelude should load")
}

/// Evaluate `s` in a fresh environment and print the result readably.
#[allow(dead_code)]
pub fn eval_to_string(s: &str) -> String {
    match eval_str(s) {
        Ok(val) => pr_str(&val, true),
        Err(e) => panic!("evaluating {:?} failed: {}", s, e),
    }
}

/// Assert that code evaluates to an expected value.
///
/// # Examples
///
/// ```ignore
/// assert_eval!("(+ 1 2)", MalVal::int(3));
/// assert_eval!("(let* (x 1) x)", MalVal::int(1), "let* binding");
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($code:expr, $expected:expr) => {
        assert_eq!(
            $crate::common::eval_str($code).unwrap(),
            $expected,
            "evaluating: {}",
            $code
        );
    };
    ($code:expr, $expected:expr, $msg:expr) => {
        assert_eq!($crate::common::eval_str($code).unwrap(), $expected, $msg);
    };
}

/// Assert that code produces an error matching a pattern.
///
/// # Examples
///
/// ```ignore
/// assert_eval_err!("undefined-sym");
/// assert_eval_err!("(if)", Error::MalformedSpecialForm { form: "if", .. });
/// ```
#[macro_export]
macro_rules! assert_eval_err {
    ($code:expr) => {
        assert!(
            $crate::common::eval_str($code).is_err(),
            "expected error evaluating: {}",
            $code
        );
    };
    ($code:expr, $pattern:pat) => {
        match $crate::common::eval_str($code) {
            Err($pattern) => {}
            other => panic!(
                "evaluating {}: expected error matching {}, got {:?}",
                $code,
                stringify!($pattern),
                other
            ),
        }
    };
}
