// mal-core - Sequence built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! List and vector operations: list, vector, cons, concat, vec, first, rest,
//! nth, count, empty? and the list?/vector? predicates.
//!
//! `cons`, `concat` and `rest` always return lists; `nil` is accepted
//! wherever a sequence is expected and behaves as the empty sequence.

use mal_parser::{MalVal, Vector};

use crate::error::{Error, Result};

use super::{int_arg, seq_arg};

/// (list & items) - create a list
pub(crate) fn builtin_list(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::list(args.to_vec()))
}

/// (list? x) - true if x is a list
pub(crate) fn builtin_list_p(args: &[MalVal]) -> Result<MalVal> {
    let [x] = args else {
        return Err(Error::arity_named("list?", 1, args.len()));
    };
    Ok(MalVal::bool(matches!(x, MalVal::List(_))))
}

/// (vector & items) - create a vector
pub(crate) fn builtin_vector(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::vector(args.to_vec()))
}

/// (vector? x) - true if x is a vector
pub(crate) fn builtin_vector_p(args: &[MalVal]) -> Result<MalVal> {
    let [x] = args else {
        return Err(Error::arity_named("vector?", 1, args.len()));
    };
    Ok(MalVal::bool(matches!(x, MalVal::Vector(_))))
}

/// (empty? coll) - true if coll has no elements
pub(crate) fn builtin_empty_p(args: &[MalVal]) -> Result<MalVal> {
    let [coll] = args else {
        return Err(Error::arity_named("empty?", 1, args.len()));
    };
    match coll {
        MalVal::Map(map) => Ok(MalVal::bool(map.is_empty())),
        other => Ok(MalVal::bool(seq_arg("empty?", other)?.is_empty())),
    }
}

/// (count coll) - number of elements; 0 for nil
pub(crate) fn builtin_count(args: &[MalVal]) -> Result<MalVal> {
    let [coll] = args else {
        return Err(Error::arity_named("count", 1, args.len()));
    };
    let len = match coll {
        MalVal::Map(map) => map.len(),
        other => seq_arg("count", other)?.len(),
    };
    i64::try_from(len)
        .map(MalVal::int)
        .map_err(|_| Error::Overflow("count"))
}

/// (cons x seq) - new list with x in front of seq
pub(crate) fn builtin_cons(args: &[MalVal]) -> Result<MalVal> {
    let [x, seq] = args else {
        return Err(Error::arity_named("cons", 2, args.len()));
    };
    let mut items = seq_arg("cons", seq)?;
    items.push_front(x.clone());
    Ok(MalVal::List(items))
}

/// (concat & seqs) - list of all elements of seqs, in order
pub(crate) fn builtin_concat(args: &[MalVal]) -> Result<MalVal> {
    let mut result = Vector::new();
    for arg in args {
        result.append(seq_arg("concat", arg)?);
    }
    Ok(MalVal::List(result))
}

/// (vec seq) - vector with the elements of seq
pub(crate) fn builtin_vec(args: &[MalVal]) -> Result<MalVal> {
    let [seq] = args else {
        return Err(Error::arity_named("vec", 1, args.len()));
    };
    Ok(MalVal::Vector(seq_arg("vec", seq)?))
}

/// (first seq) - first element, or nil if empty
pub(crate) fn builtin_first(args: &[MalVal]) -> Result<MalVal> {
    let [seq] = args else {
        return Err(Error::arity_named("first", 1, args.len()));
    };
    Ok(seq_arg("first", seq)?.front().cloned().unwrap_or(MalVal::Nil))
}

/// (rest seq) - list of all but the first element
pub(crate) fn builtin_rest(args: &[MalVal]) -> Result<MalVal> {
    let [seq] = args else {
        return Err(Error::arity_named("rest", 1, args.len()));
    };
    let mut items = seq_arg("rest", seq)?;
    items.pop_front();
    Ok(MalVal::List(items))
}

/// (nth seq index) - element at index
pub(crate) fn builtin_nth(args: &[MalVal]) -> Result<MalVal> {
    let [seq, index] = args else {
        return Err(Error::arity_named("nth", 2, args.len()));
    };
    let items = seq_arg("nth", seq)?;
    let index = int_arg("nth", index)?;
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i).cloned())
        .ok_or(Error::IndexOutOfBounds {
            index,
            length: items.len(),
        })
}
