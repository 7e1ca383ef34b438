// mal-core - Runtime and evaluator for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # mal-core
//!
//! Runtime and evaluator for the mal language: environments, the
//! quasiquote expander, the tail-call-optimised evaluator and the native
//! function library.

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
mod stack;

use tracing::debug;

pub use builtins::register_builtins;
pub use env::{Env, WeakEnv};
pub use error::{AritySpec, Error, Result};
pub use eval::{
    SpecialForm, apply, apply_closure, eval, eval_ast, get_eval_depth, get_max_eval_depth,
    make_native_fn, quasiquote, quasiquoteexpand, set_max_eval_depth,
};

// Re-export parser types for convenience
pub use mal_parser::{Keyword, MalVal, Symbol};

/// Embedded prelude source (functions written in mal itself).
const PRELUDE: &str = include_str!("../prelude/core.mal");

/// Evaluate the embedded prelude into `env`.
///
/// Call this after `register_builtins`: the prelude refers to `eval`,
/// `read-string`, `slurp` and `str`.
pub fn init_prelude(env: &Env) -> Result<()> {
    let mut parser = mal_parser::Parser::new(PRELUDE)?;
    let mut count = 0;
    while let Some(expr) = parser.parse()? {
        eval::eval(&expr, env)?;
        count += 1;
    }
    debug!(forms = count, "prelude loaded");
    Ok(())
}

/// Create a root environment with builtins and the prelude installed.
pub fn new_root_env() -> Result<Env> {
    let env = Env::new();
    register_builtins(&env);
    init_prelude(&env)?;
    Ok(env)
}
