// mal-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /
//!
//! Integers are 64-bit and every operation is checked: overflow is an
//! `Error::Overflow` rather than a wrap or a promotion.

use mal_parser::MalVal;

use crate::error::{Error, Result};

use super::int_arg;

fn fold_checked(
    name: &'static str,
    init: i64,
    args: &[MalVal],
    op: fn(i64, i64) -> Option<i64>,
) -> Result<MalVal> {
    let mut acc = init;
    for arg in args {
        let n = int_arg(name, arg)?;
        acc = op(acc, n).ok_or(Error::Overflow(name))?;
    }
    Ok(MalVal::int(acc))
}

/// (+ & nums) - sum, 0 with no arguments
pub(crate) fn builtin_add(args: &[MalVal]) -> Result<MalVal> {
    fold_checked("+", 0, args, i64::checked_add)
}

/// (* & nums) - product, 1 with no arguments
pub(crate) fn builtin_mul(args: &[MalVal]) -> Result<MalVal> {
    fold_checked("*", 1, args, i64::checked_mul)
}

/// (- x & more) - subtract more from x, or negate x
pub(crate) fn builtin_sub(args: &[MalVal]) -> Result<MalVal> {
    match args {
        [] => Err(Error::arity_at_least("-", 1, 0)),
        [x] => {
            let n = int_arg("-", x)?;
            n.checked_neg().map(MalVal::int).ok_or(Error::Overflow("-"))
        }
        [x, rest @ ..] => fold_checked("-", int_arg("-", x)?, rest, i64::checked_sub),
    }
}

/// (/ x & more) - integer division, truncating toward zero
pub(crate) fn builtin_div(args: &[MalVal]) -> Result<MalVal> {
    let (first, rest) = match args {
        [] => return Err(Error::arity_at_least("/", 1, 0)),
        [x] => (1, std::slice::from_ref(x)),
        [x, rest @ ..] => (int_arg("/", x)?, rest),
    };
    let mut acc = first;
    for arg in rest {
        let n = int_arg("/", arg)?;
        if n == 0 {
            return Err(Error::DivisionByZero);
        }
        acc = acc.checked_div(n).ok_or(Error::Overflow("/"))?;
    }
    Ok(MalVal::int(acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(ns: &[i64]) -> Vec<MalVal> {
        ns.iter().copied().map(MalVal::int).collect()
    }

    #[test]
    fn test_add() {
        assert_eq!(builtin_add(&[]).unwrap(), MalVal::int(0));
        assert_eq!(builtin_add(&ints(&[1, 2, 3])).unwrap(), MalVal::int(6));
    }

    #[test]
    fn test_sub() {
        assert_eq!(builtin_sub(&ints(&[5])).unwrap(), MalVal::int(-5));
        assert_eq!(builtin_sub(&ints(&[10, 3, 2])).unwrap(), MalVal::int(5));
        assert!(builtin_sub(&[]).is_err());
    }

    #[test]
    fn test_div() {
        assert_eq!(builtin_div(&ints(&[7, 2])).unwrap(), MalVal::int(3));
        assert_eq!(builtin_div(&ints(&[-7, 2])).unwrap(), MalVal::int(-3));
        assert!(matches!(
            builtin_div(&ints(&[1, 0])),
            Err(Error::DivisionByZero)
        ));
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            builtin_add(&ints(&[i64::MAX, 1])),
            Err(Error::Overflow("+"))
        ));
        assert!(matches!(
            builtin_mul(&ints(&[i64::MAX, 2])),
            Err(Error::Overflow("*"))
        ));
        assert!(matches!(
            builtin_sub(&ints(&[i64::MIN])),
            Err(Error::Overflow("-"))
        ));
        assert!(matches!(
            builtin_div(&ints(&[i64::MIN, -1])),
            Err(Error::Overflow("/"))
        ));
    }

    #[test]
    fn test_type_error() {
        assert!(matches!(
            builtin_add(&[MalVal::int(1), MalVal::string("a")]),
            Err(Error::TypeError { expected: "int", got: "string", .. })
        ));
    }
}
