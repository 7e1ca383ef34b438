// mal-core - Comparison built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Comparison operations: =, <, >, <=, >=

use mal_parser::MalVal;

use crate::error::{Error, Result};

use super::int_arg;

/// (= x & more) - true if all arguments are equal
pub(crate) fn builtin_eq(args: &[MalVal]) -> Result<MalVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least("=", 1, 0));
    }
    Ok(MalVal::bool(args.windows(2).all(|w| w[0] == w[1])))
}

/// Check that `holds` is true of every adjacent pair of integers.
fn compare_chain(name: &'static str, args: &[MalVal], holds: fn(i64, i64) -> bool) -> Result<MalVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least(name, 1, 0));
    }
    let nums = args
        .iter()
        .map(|arg| int_arg(name, arg))
        .collect::<Result<Vec<i64>>>()?;
    Ok(MalVal::bool(nums.windows(2).all(|w| holds(w[0], w[1]))))
}

/// (< x & more) - true if strictly increasing
pub(crate) fn builtin_lt(args: &[MalVal]) -> Result<MalVal> {
    compare_chain("<", args, |a, b| a < b)
}

/// (> x & more) - true if strictly decreasing
pub(crate) fn builtin_gt(args: &[MalVal]) -> Result<MalVal> {
    compare_chain(">", args, |a, b| a > b)
}

/// (<= x & more) - true if non-decreasing
pub(crate) fn builtin_le(args: &[MalVal]) -> Result<MalVal> {
    compare_chain("<=", args, |a, b| a <= b)
}

/// (>= x & more) - true if non-increasing
pub(crate) fn builtin_ge(args: &[MalVal]) -> Result<MalVal> {
    compare_chain(">=", args, |a, b| a >= b)
}
