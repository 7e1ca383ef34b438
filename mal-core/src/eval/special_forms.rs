// mal-core - Special forms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The reserved special forms and their evaluation rules.

use std::any::Any;
use std::rc::Rc;

use mal_parser::{MalClosure, MalVal, Params, Symbol, Vector};
use tracing::debug;

use super::eval;
use super::quasiquote::{quasiquote, quasiquoteexpand};
use crate::env::Env;
use crate::error::{Error, Result};

/// A special form, recognised by the name of a list's head symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    Def,
    Let,
    Do,
    If,
    Fn,
    Quote,
    Quasiquote,
    QuasiquoteExpand,
}

impl SpecialForm {
    pub const ALL: [SpecialForm; 8] = [
        SpecialForm::Def,
        SpecialForm::Let,
        SpecialForm::Do,
        SpecialForm::If,
        SpecialForm::Fn,
        SpecialForm::Quote,
        SpecialForm::Quasiquote,
        SpecialForm::QuasiquoteExpand,
    ];

    /// Look up the special form named by `sym`.
    pub fn from_symbol(sym: &Symbol) -> Option<Self> {
        Self::ALL.into_iter().find(|form| sym.is(form.name()))
    }

    /// The reserved symbol name.
    pub fn name(self) -> &'static str {
        match self {
            SpecialForm::Def => "def!",
            SpecialForm::Let => "let*",
            SpecialForm::Do => "do",
            SpecialForm::If => "if",
            SpecialForm::Fn => "fn*",
            SpecialForm::Quote => "quote",
            SpecialForm::Quasiquote => "quasiquote",
            SpecialForm::QuasiquoteExpand => "quasiquoteexpand",
        }
    }
}

/// The outcome of one trampoline step through a special form.
pub(super) enum Step {
    /// Evaluation is finished
    Return(MalVal),
    /// Continue the trampoline with this expression in this environment
    TailCall(MalVal, Env),
}

/// Evaluate the special form `form` whose full list is `items`.
pub(super) fn eval_special(form: SpecialForm, items: &Vector<MalVal>, env: &Env) -> Result<Step> {
    let args: Vec<MalVal> = items.iter().skip(1).cloned().collect();
    match form {
        SpecialForm::Def => eval_def(&args, env),
        SpecialForm::Let => eval_let(&args, env),
        SpecialForm::Do => eval_do(&args, env),
        SpecialForm::If => eval_if(&args, env),
        SpecialForm::Fn => eval_fn(&args, env),
        SpecialForm::Quote => {
            let [form] = one_arg("quote", &args)?;
            Ok(Step::Return(form.clone()))
        }
        SpecialForm::Quasiquote => {
            let [form] = one_arg("quasiquote", &args)?;
            Ok(Step::TailCall(quasiquote(form), env.clone()))
        }
        SpecialForm::QuasiquoteExpand => {
            let [form] = one_arg("quasiquoteexpand", &args)?;
            Ok(Step::Return(quasiquoteexpand(form)))
        }
    }
}

fn one_arg<'a>(form: &'static str, args: &'a [MalVal]) -> Result<&'a [MalVal; 1]> {
    args.try_into()
        .map_err(|_| Error::malformed(form, format!("expected 1 argument, got {}", args.len())))
}

/// (def! name value)
fn eval_def(args: &[MalVal], env: &Env) -> Result<Step> {
    let [name, value] = args else {
        return Err(Error::malformed(
            "def!",
            format!("expected a name and a value, got {} forms", args.len()),
        ));
    };
    let MalVal::Symbol(sym) = name else {
        return Err(Error::malformed(
            "def!",
            format!("name must be a symbol, got {}", name.type_name()),
        ));
    };

    let val = eval(value, env)?;
    debug!(symbol = %sym, "def!");
    env.bind(sym.clone(), val.clone());
    Ok(Step::Return(val))
}

/// (let* (name value ...) body)
fn eval_let(args: &[MalVal], env: &Env) -> Result<Step> {
    let [bindings, body] = args else {
        return Err(Error::malformed(
            "let*",
            format!("expected bindings and one body form, got {} forms", args.len()),
        ));
    };
    let Some(bindings) = bindings.as_seq() else {
        return Err(Error::malformed(
            "let*",
            format!("bindings must be a list or vector, got {}", bindings.type_name()),
        ));
    };
    if bindings.len() % 2 != 0 {
        return Err(Error::malformed("let*", "odd number of binding forms"));
    }

    // Each value is evaluated in the frame being built, so later bindings
    // see earlier ones.
    let let_env = env.child();
    let bindings: Vec<&MalVal> = bindings.iter().collect();
    for pair in bindings.chunks(2) {
        let MalVal::Symbol(sym) = pair[0] else {
            return Err(Error::malformed(
                "let*",
                format!("binding name must be a symbol, got {}", pair[0].type_name()),
            ));
        };
        let val = eval(pair[1], &let_env)?;
        let_env.bind(sym.clone(), val);
    }

    Ok(Step::TailCall(body.clone(), let_env))
}

/// (do form ... last)
fn eval_do(args: &[MalVal], env: &Env) -> Result<Step> {
    let Some((last, effects)) = args.split_last() else {
        return Err(Error::malformed("do", "expected at least one form"));
    };
    for form in effects {
        eval(form, env)?;
    }
    Ok(Step::TailCall(last.clone(), env.clone()))
}

/// (if cond then else?)
fn eval_if(args: &[MalVal], env: &Env) -> Result<Step> {
    let (cond, then, otherwise) = match args {
        [cond, then] => (cond, then, None),
        [cond, then, otherwise] => (cond, then, Some(otherwise)),
        _ => {
            return Err(Error::malformed(
                "if",
                format!("expected 2 or 3 arguments, got {}", args.len()),
            ));
        }
    };

    let branch = if eval(cond, env)?.is_truthy() {
        Some(then)
    } else {
        otherwise
    };
    match branch {
        Some(branch) => Ok(Step::TailCall(branch.clone(), env.clone())),
        None => Ok(Step::Return(MalVal::Nil)),
    }
}

/// (fn* (params) body)
fn eval_fn(args: &[MalVal], env: &Env) -> Result<Step> {
    let [params, body] = args else {
        return Err(Error::malformed(
            "fn*",
            format!("expected parameters and one body form, got {} forms", args.len()),
        ));
    };
    let params = parse_params(params)?;
    let captured: Rc<dyn Any> = Rc::new(env.clone());
    Ok(Step::Return(MalVal::Closure(MalClosure::new(
        params,
        body.clone(),
        captured,
    ))))
}

/// Parse a parameter list such as `(a b & rest)`.
fn parse_params(form: &MalVal) -> Result<Params> {
    let Some(items) = form.as_seq() else {
        return Err(Error::malformed(
            "fn*",
            format!("parameters must be a list or vector, got {}", form.type_name()),
        ));
    };

    let mut names = Vec::with_capacity(items.len());
    for item in items.iter() {
        match item {
            MalVal::Symbol(sym) => names.push(sym.clone()),
            other => {
                return Err(Error::malformed(
                    "fn*",
                    format!("parameter must be a symbol, got {}", other.type_name()),
                ));
            }
        }
    }

    // Exactly one name, other than the marker itself, follows `&`
    match names.iter().position(|s| s.is(Params::REST_MARKER)) {
        None => Ok(Params::new(names, None)),
        Some(pos) if pos + 2 == names.len() && !names[pos + 1].is(Params::REST_MARKER) => {
            let rest = names.pop();
            names.truncate(pos);
            Ok(Params::new(names, rest))
        }
        Some(_) => Err(Error::malformed(
            "fn*",
            format!("'{}' must be followed by exactly one parameter", Params::REST_MARKER),
        )),
    }
}
