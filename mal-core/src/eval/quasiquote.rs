// mal-core - Quasiquote expansion
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Quasiquote expansion.
//!
//! Rewrites a quasiquoted template into ordinary code built from `cons`,
//! `concat`, `vec` and `quote`. The rewrite is pure: it never looks at an
//! environment, and the evaluator simply evaluates whatever it returns.
//!
//! ```text
//! `(1 ~x ~@xs)  =>  (cons 1 (cons x (concat xs ())))
//! `[a]          =>  (vec (cons (quote a) ()))
//! ```

use mal_parser::{MalVal, Vector};
use tracing::trace;

/// Expand a quasiquoted form into code that rebuilds it.
pub fn quasiquote(ast: &MalVal) -> MalVal {
    match ast {
        MalVal::List(items) => match unwrap_call(ast, "unquote") {
            Some(unquoted) => unquoted.clone(),
            None => expand_items(items),
        },
        MalVal::Vector(items) => call("vec", vec![expand_items(items)]),
        MalVal::Symbol(_) | MalVal::Map(_) => call("quote", vec![ast.clone()]),
        MalVal::Nil
        | MalVal::Bool(_)
        | MalVal::Int(_)
        | MalVal::Str(_)
        | MalVal::Keyword(_)
        | MalVal::NativeFn(_)
        | MalVal::Closure(_)
        | MalVal::Atom(_) => ast.clone(),
    }
}

/// Return the expansion of `ast` without evaluating it.
///
/// This is what the `quasiquoteexpand` special form returns; it is exposed
/// so the expansion can be inspected directly.
pub fn quasiquoteexpand(ast: &MalVal) -> MalVal {
    let expanded = quasiquote(ast);
    trace!(from = %ast, to = %expanded, "quasiquoteexpand");
    expanded
}

/// Fold the elements right to left into a `cons`/`concat` chain ending in
/// the empty list.
fn expand_items(items: &Vector<MalVal>) -> MalVal {
    items.iter().rev().fold(MalVal::empty_list(), |acc, elt| {
        match unwrap_call(elt, "splice-unquote") {
            Some(spliced) => call("concat", vec![spliced.clone(), acc]),
            None => call("cons", vec![quasiquote(elt), acc]),
        }
    })
}

/// If `form` is exactly `(name x)`, return `x`.
fn unwrap_call<'a>(form: &'a MalVal, name: &str) -> Option<&'a MalVal> {
    match form {
        MalVal::List(items) if items.len() == 2 && items[0].is_symbol_named(name) => items.get(1),
        _ => None,
    }
}

fn call(name: &str, args: Vec<MalVal>) -> MalVal {
    let mut items = Vec::with_capacity(args.len() + 1);
    items.push(MalVal::symbol(name));
    items.extend(args);
    MalVal::list(items)
}
