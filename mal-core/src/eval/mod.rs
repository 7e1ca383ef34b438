// mal-core - Tail-call-optimised evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Evaluator for mal expressions.
//!
//! [`eval`] is a trampoline: it holds the current `(ast, env)` pair in local
//! state and, whenever the next thing to evaluate is in tail position (the
//! body of a `let*`, the last form of a `do`, the chosen branch of an `if`,
//! the expansion of a `quasiquote` or the body of an applied closure), it
//! replaces that pair and loops instead of recursing. Only non-tail
//! sub-evaluations (arguments, conditions, `let*` values) call `eval`
//! recursively.

pub mod apply;
pub mod quasiquote;
mod special_forms;

pub use apply::{NativeFnImpl, apply, apply_closure, make_native_fn};
pub use quasiquote::{quasiquote, quasiquoteexpand};
pub use special_forms::SpecialForm;

use std::cell::Cell;

use mal_parser::{MalVal, Vector};
use tracing::trace;

use crate::env::Env;
use crate::error::{Error, Result};
use crate::stack::ensure_sufficient_stack;
use special_forms::Step;

// ============================================================================
// Stack Overflow Protection
// ============================================================================

/// Maximum nesting of non-tail `eval` calls. Can be configured via
/// `set_max_eval_depth`.
const DEFAULT_MAX_EVAL_DEPTH: usize = 1_000;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum eval recursion depth. Returns the previous value.
#[inline]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval recursion depth.
#[inline]
#[must_use]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// Get the current eval recursion depth.
#[inline]
#[must_use]
pub fn get_eval_depth() -> usize {
    EVAL_DEPTH.with(|d| d.get())
}

struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let current = EVAL_DEPTH.with(|d| {
            let current = d.get() + 1;
            d.set(current);
            current
        });
        let max = get_max_eval_depth();
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(Error::DepthExceeded(max))
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

// ============================================================================
// Main Eval Function
// ============================================================================

/// Evaluate an expression in an environment.
///
/// # Example
///
/// ```
/// use mal_core::{Env, eval, register_builtins};
/// use mal_parser::{MalVal, read};
///
/// let env = Env::new();
/// register_builtins(&env);
///
/// let expr = read("(let* (x 3) (+ x 4))").unwrap().unwrap();
/// assert_eq!(eval(&expr, &env).unwrap(), MalVal::int(7));
/// ```
///
/// # Errors
///
/// Returns an error if a symbol is unbound, a special form is malformed,
/// a non-function is called, a native function fails, or non-tail nesting
/// exceeds [`set_max_eval_depth`].
pub fn eval(expr: &MalVal, env: &Env) -> Result<MalVal> {
    let _guard = EvalDepthGuard::new()?;
    ensure_sufficient_stack(|| eval_loop(expr, env))
}

fn eval_loop(expr: &MalVal, env: &Env) -> Result<MalVal> {
    let mut ast = expr.clone();
    let mut env = env.clone();

    loop {
        let items = match &ast {
            MalVal::List(items) if !items.is_empty() => items.clone(),
            // Empty lists, atoms and non-list collections
            _ => return eval_ast(&ast, &env),
        };

        // Special forms are resolved from the head symbol's name before any
        // environment lookup, so user bindings cannot shadow them.
        if let Some(form) = items
            .front()
            .and_then(MalVal::as_symbol)
            .and_then(SpecialForm::from_symbol)
        {
            trace!(form = form.name(), "special form");
            match special_forms::eval_special(form, &items, &env)? {
                Step::Return(val) => return Ok(val),
                Step::TailCall(next_ast, next_env) => {
                    ast = next_ast;
                    env = next_env;
                    continue;
                }
            }
        }

        let mut evaluated = eval_items(&items, &env)?;
        let func = evaluated.remove(0);
        match func {
            MalVal::Closure(closure) => {
                env = apply::closure_env(&closure, &evaluated)?;
                ast = MalVal::clone(&closure.body);
            }
            MalVal::NativeFn(native) => return apply::apply_native(&native, &evaluated),
            other => return Err(Error::NotCallable(other)),
        }
    }
}

/// Evaluate a form without applying it.
///
/// Symbols resolve through the environment, lists and vectors evaluate each
/// element in order, maps evaluate each value (keys are kept as written).
/// Everything else evaluates to itself, including the empty list.
pub fn eval_ast(ast: &MalVal, env: &Env) -> Result<MalVal> {
    match ast {
        MalVal::Symbol(sym) => env.get(sym),
        MalVal::List(items) => Ok(MalVal::List(eval_items(items, env)?.into())),
        MalVal::Vector(items) => Ok(MalVal::Vector(eval_items(items, env)?.into())),
        MalVal::Map(map) => {
            let mut result = Vec::with_capacity(map.len());
            for (k, v) in map.iter() {
                result.push((k.clone(), eval(v, env)?));
            }
            Ok(MalVal::map(result))
        }
        MalVal::Nil
        | MalVal::Bool(_)
        | MalVal::Int(_)
        | MalVal::Str(_)
        | MalVal::Keyword(_)
        | MalVal::NativeFn(_)
        | MalVal::Closure(_)
        | MalVal::Atom(_) => Ok(ast.clone()),
    }
}

fn eval_items(items: &Vector<MalVal>, env: &Env) -> Result<Vec<MalVal>> {
    items.iter().map(|item| eval(item, env)).collect()
}
