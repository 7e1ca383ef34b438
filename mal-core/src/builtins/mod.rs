// mal-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Built-in functions for mal.

mod arithmetic;
mod atoms;
mod comparison;
mod io;
mod predicates;
mod sequences;

use mal_parser::{MalVal, Symbol, Vector};

use crate::env::{Env, WeakEnv};
use crate::error::{Error, Result};
use crate::eval::{eval, make_native_fn};

use arithmetic::{builtin_add, builtin_div, builtin_mul, builtin_sub};
use atoms::{builtin_atom, builtin_atom_p, builtin_deref, builtin_reset, builtin_swap};
use comparison::{builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt};
use io::{
    builtin_pr_str, builtin_println, builtin_prn, builtin_read_string, builtin_slurp, builtin_str,
};
use predicates::{
    builtin_false_p, builtin_fn_p, builtin_keyword, builtin_keyword_p, builtin_map_p,
    builtin_nil_p, builtin_number_p, builtin_string_p, builtin_symbol, builtin_symbol_p,
    builtin_true_p,
};
use sequences::{
    builtin_concat, builtin_cons, builtin_count, builtin_empty_p, builtin_first, builtin_list,
    builtin_list_p, builtin_nth, builtin_rest, builtin_vec, builtin_vector, builtin_vector_p,
};

/// Install every native function into `env`.
///
/// `eval` is bound to a closure over a weak handle to `env`, so it always
/// evaluates in this (root) environment regardless of where it is called.
pub fn register_builtins(env: &Env) {
    // Arithmetic
    env.define_native("+", builtin_add);
    env.define_native("-", builtin_sub);
    env.define_native("*", builtin_mul);
    env.define_native("/", builtin_div);

    // Comparison
    env.define_native("=", builtin_eq);
    env.define_native("<", builtin_lt);
    env.define_native(">", builtin_gt);
    env.define_native("<=", builtin_le);
    env.define_native(">=", builtin_ge);

    // Sequences
    env.define_native("list", builtin_list);
    env.define_native("list?", builtin_list_p);
    env.define_native("vector", builtin_vector);
    env.define_native("vector?", builtin_vector_p);
    env.define_native("empty?", builtin_empty_p);
    env.define_native("count", builtin_count);
    env.define_native("cons", builtin_cons);
    env.define_native("concat", builtin_concat);
    env.define_native("vec", builtin_vec);
    env.define_native("first", builtin_first);
    env.define_native("rest", builtin_rest);
    env.define_native("nth", builtin_nth);

    // Predicates and constructors
    env.define_native("nil?", builtin_nil_p);
    env.define_native("true?", builtin_true_p);
    env.define_native("false?", builtin_false_p);
    env.define_native("symbol?", builtin_symbol_p);
    env.define_native("keyword?", builtin_keyword_p);
    env.define_native("string?", builtin_string_p);
    env.define_native("number?", builtin_number_p);
    env.define_native("fn?", builtin_fn_p);
    env.define_native("map?", builtin_map_p);
    env.define_native("symbol", builtin_symbol);
    env.define_native("keyword", builtin_keyword);

    // Strings and I/O
    env.define_native("pr-str", builtin_pr_str);
    env.define_native("str", builtin_str);
    env.define_native("prn", builtin_prn);
    env.define_native("println", builtin_println);
    env.define_native("read-string", builtin_read_string);
    env.define_native("slurp", builtin_slurp);

    // Atoms
    env.define_native("atom", builtin_atom);
    env.define_native("atom?", builtin_atom_p);
    env.define_native("deref", builtin_deref);
    env.define_native("reset!", builtin_reset);
    env.define_native("swap!", builtin_swap);

    // Evaluation
    let root = env.downgrade();
    let native = make_native_fn("eval", move |args| builtin_eval(&root, args));
    env.bind(Symbol::new("eval"), MalVal::NativeFn(native));
}

/// Extension trait for registering native functions.
pub trait EnvExt {
    fn define_native(&self, name: &'static str, func: fn(&[MalVal]) -> Result<MalVal>);
}

impl EnvExt for Env {
    fn define_native(&self, name: &'static str, func: fn(&[MalVal]) -> Result<MalVal>) {
        let native = make_native_fn(name, func);
        self.bind(Symbol::new(name), MalVal::NativeFn(native));
    }
}

/// (eval form) - evaluate form in the root environment
fn builtin_eval(root: &WeakEnv, args: &[MalVal]) -> Result<MalVal> {
    let [form] = args else {
        return Err(Error::arity_named("eval", 1, args.len()));
    };
    let env = root
        .upgrade()
        .ok_or_else(|| Error::Internal("root environment dropped".into()))?;
    eval(form, &env)
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Elements of a list or vector argument; `nil` counts as empty.
pub(crate) fn seq_arg(name: &str, val: &MalVal) -> Result<Vector<MalVal>> {
    match val {
        MalVal::List(items) | MalVal::Vector(items) => Ok(items.clone()),
        MalVal::Nil => Ok(Vector::new()),
        other => Err(Error::type_error_in(name, "list or vector", other.type_name())),
    }
}

/// Integer argument.
pub(crate) fn int_arg(name: &str, val: &MalVal) -> Result<i64> {
    match val {
        MalVal::Int(n) => Ok(*n),
        other => Err(Error::type_error_in(name, "int", other.type_name())),
    }
}
