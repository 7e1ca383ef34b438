// mal-core - Type predicates
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type predicates (nil?, true?, string?, ...) and the symbol/keyword
//! constructors.

use mal_parser::MalVal;

use crate::error::{Error, Result};

fn check(name: &'static str, args: &[MalVal], pred: fn(&MalVal) -> bool) -> Result<MalVal> {
    let [x] = args else {
        return Err(Error::arity_named(name, 1, args.len()));
    };
    Ok(MalVal::bool(pred(x)))
}

pub(crate) fn builtin_nil_p(args: &[MalVal]) -> Result<MalVal> {
    check("nil?", args, |x| matches!(x, MalVal::Nil))
}

pub(crate) fn builtin_true_p(args: &[MalVal]) -> Result<MalVal> {
    check("true?", args, |x| matches!(x, MalVal::Bool(true)))
}

pub(crate) fn builtin_false_p(args: &[MalVal]) -> Result<MalVal> {
    check("false?", args, |x| matches!(x, MalVal::Bool(false)))
}

pub(crate) fn builtin_symbol_p(args: &[MalVal]) -> Result<MalVal> {
    check("symbol?", args, |x| matches!(x, MalVal::Symbol(_)))
}

pub(crate) fn builtin_keyword_p(args: &[MalVal]) -> Result<MalVal> {
    check("keyword?", args, |x| matches!(x, MalVal::Keyword(_)))
}

pub(crate) fn builtin_string_p(args: &[MalVal]) -> Result<MalVal> {
    check("string?", args, |x| matches!(x, MalVal::Str(_)))
}

pub(crate) fn builtin_number_p(args: &[MalVal]) -> Result<MalVal> {
    check("number?", args, |x| matches!(x, MalVal::Int(_)))
}

pub(crate) fn builtin_fn_p(args: &[MalVal]) -> Result<MalVal> {
    check("fn?", args, |x| {
        matches!(x, MalVal::NativeFn(_) | MalVal::Closure(_))
    })
}

pub(crate) fn builtin_map_p(args: &[MalVal]) -> Result<MalVal> {
    check("map?", args, |x| matches!(x, MalVal::Map(_)))
}

/// (symbol name) - symbol with the given name
pub(crate) fn builtin_symbol(args: &[MalVal]) -> Result<MalVal> {
    match args {
        [MalVal::Str(s)] => Ok(MalVal::symbol(s)),
        [MalVal::Symbol(_)] => Ok(args[0].clone()),
        [other] => Err(Error::type_error_in("symbol", "string", other.type_name())),
        _ => Err(Error::arity_named("symbol", 1, args.len())),
    }
}

/// (keyword name) - keyword with the given name
pub(crate) fn builtin_keyword(args: &[MalVal]) -> Result<MalVal> {
    match args {
        [MalVal::Str(s)] => Ok(MalVal::keyword(s)),
        [MalVal::Keyword(_)] => Ok(args[0].clone()),
        [other] => Err(Error::type_error_in("keyword", "string", other.type_name())),
        _ => Err(Error::arity_named("keyword", 1, args.len())),
    }
}
