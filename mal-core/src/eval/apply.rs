// mal-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Function application for mal.
//!
//! The trampoline and every eager call site (`swap!`, embedders) bind
//! closure arguments through the same [`closure_env`], so parameter binding
//! behaves identically in tail and non-tail position.

use std::any::Any;
use std::rc::Rc;

use mal_parser::{MalClosure, MalNativeFn, MalVal};
use tracing::trace;

use super::eval;
use crate::env::Env;
use crate::error::{Error, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[MalVal]) -> Result<MalVal>;

/// Apply a function value to already-evaluated arguments.
pub fn apply(func: &MalVal, args: &[MalVal]) -> Result<MalVal> {
    match func {
        MalVal::Closure(closure) => apply_closure(closure, args),
        MalVal::NativeFn(native) => apply_native(native, args),
        other => Err(Error::NotCallable(other.clone())),
    }
}

/// Call a closure eagerly: bind its parameters in a fresh child of the
/// captured environment, then evaluate the body to completion.
pub fn apply_closure(closure: &MalClosure, args: &[MalVal]) -> Result<MalVal> {
    let fn_env = closure_env(closure, args)?;
    eval(&closure.body, &fn_env)
}

/// Build the environment a closure body runs in.
pub(crate) fn closure_env(closure: &MalClosure, args: &[MalVal]) -> Result<Env> {
    trace!(params = %closure.params, args = args.len(), "apply closure");
    let captured = closure
        .env
        .downcast_ref::<Env>()
        .ok_or_else(|| Error::Internal("Closure environment has invalid type".into()))?;
    let fn_env = captured.child();
    fn_env.bind_params(&closure.params, args)?;
    Ok(fn_env)
}

/// Apply a native function.
pub(crate) fn apply_native(func: &MalNativeFn, args: &[MalVal]) -> Result<MalVal> {
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| Error::Internal("Native function has invalid type".into()))?;
    f(args)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &'static str,
    func: impl Fn(&[MalVal]) -> Result<MalVal> + 'static,
) -> MalNativeFn {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    MalNativeFn::new(name, func_any)
}
