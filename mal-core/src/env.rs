// mal-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use mal_parser::{MalVal, Params, Symbol};

use crate::error::{AritySpec, Error, Result};

/// A lexical environment for variable bindings.
///
/// Environments form a chain through parent references. Frames are shared:
/// a closure holds its defining frame alive for as long as the closure
/// itself is reachable, and a frame's parent never changes after creation.
///
/// # Examples
///
/// ```
/// use mal_core::Env;
/// use mal_parser::{MalVal, Symbol};
///
/// let env = Env::new();
/// env.bind(Symbol::new("x"), MalVal::int(42));
/// assert_eq!(env.get(&Symbol::new("x")).unwrap(), MalVal::int(42));
///
/// // Child frames see their parents and can shadow them
/// let child = env.child();
/// child.bind(Symbol::new("x"), MalVal::int(100));
/// assert_eq!(child.get(&Symbol::new("x")).unwrap(), MalVal::int(100));
/// assert_eq!(env.get(&Symbol::new("x")).unwrap(), MalVal::int(42));
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: HashMap<Symbol, MalVal>,
    parent: Option<Env>,
}

/// A non-owning handle to an environment.
///
/// Natives installed in the root frame use this to refer back to it without
/// creating a reference cycle.
#[derive(Debug, Clone)]
pub struct WeakEnv {
    inner: Weak<RefCell<EnvInner>>,
}

impl WeakEnv {
    /// Get the environment back, if it is still alive.
    pub fn upgrade(&self) -> Option<Env> {
        self.inner.upgrade().map(|inner| Env { inner })
    }
}

impl Env {
    /// Create a new root environment with no parent.
    pub fn new() -> Self {
        Env::with_parent(None)
    }

    /// Create an empty frame whose lookups fall back to `parent`.
    pub fn with_parent(parent: Option<Env>) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent,
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env::with_parent(Some(self.clone()))
    }

    /// Insert or overwrite a binding in this frame only.
    pub fn bind(&self, sym: Symbol, val: MalVal) {
        self.inner.borrow_mut().bindings.insert(sym, val);
    }

    /// Find the nearest frame, starting here, that binds `sym`.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    pub fn resolve(&self, sym: &Symbol) -> Result<Env> {
        let mut current = self.clone();
        loop {
            let parent = {
                let inner = current.inner.borrow();
                if inner.bindings.contains_key(sym) {
                    break;
                }
                inner.parent.clone()
            };
            match parent {
                Some(p) => current = p,
                None => return Err(Error::UnboundSymbol(sym.clone())),
            }
        }
        Ok(current)
    }

    /// Look up a symbol in this environment or its parent chain.
    pub fn get(&self, sym: &Symbol) -> Result<MalVal> {
        let frame = self.resolve(sym)?;
        let inner = frame.inner.borrow();
        inner
            .bindings
            .get(sym)
            .cloned()
            .ok_or_else(|| Error::UnboundSymbol(sym.clone()))
    }

    /// Check if a symbol is bound in this environment or its parent chain.
    #[must_use]
    pub fn is_bound(&self, sym: &Symbol) -> bool {
        self.resolve(sym).is_ok()
    }

    /// Bind closure parameters to positional arguments in this frame.
    ///
    /// The rest parameter, if any, receives a list of the arguments past the
    /// fixed ones (possibly empty). Extra arguments to a closure without a
    /// rest parameter are ignored; too few is an error.
    pub fn bind_params(&self, params: &Params, args: &[MalVal]) -> Result<()> {
        let min = params.min_arity();
        if args.len() < min {
            let expected = if params.is_variadic() {
                AritySpec::AtLeast(min)
            } else {
                AritySpec::Exact(min)
            };
            return Err(Error::ArityMismatch {
                expected,
                got: args.len(),
                name: None,
            });
        }

        let mut inner = self.inner.borrow_mut();
        for (param, arg) in params.fixed.iter().zip(args) {
            inner.bindings.insert(param.clone(), arg.clone());
        }
        if let Some(rest) = &params.rest {
            inner
                .bindings
                .insert(rest.clone(), MalVal::list(args[min..].to_vec()));
        }
        Ok(())
    }

    /// Get a non-owning handle to this environment.
    #[must_use]
    pub fn downgrade(&self) -> WeakEnv {
        WeakEnv {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Check whether two handles refer to the same frame.
    #[must_use]
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Symbol {
        Symbol::new(name)
    }

    #[test]
    fn test_bind_and_get() {
        let env = Env::new();
        env.bind(sym("x"), MalVal::int(1));
        assert_eq!(env.get(&sym("x")).unwrap(), MalVal::int(1));
    }

    #[test]
    fn test_unbound() {
        let env = Env::new();
        match env.get(&sym("nope")) {
            Err(Error::UnboundSymbol(s)) => assert_eq!(s, sym("nope")),
            other => panic!("expected UnboundSymbol, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_returns_binding_frame() {
        let root = Env::new();
        root.bind(sym("x"), MalVal::int(1));
        let child = root.child().child();
        assert!(child.resolve(&sym("x")).unwrap().ptr_eq(&root));
    }

    #[test]
    fn test_child_does_not_leak_to_parent() {
        let root = Env::new();
        root.bind(sym("x"), MalVal::int(1));
        let child = root.child();
        child.bind(sym("x"), MalVal::int(2));
        child.bind(sym("y"), MalVal::int(3));
        assert_eq!(root.get(&sym("x")).unwrap(), MalVal::int(1));
        assert!(!root.is_bound(&sym("y")));
    }

    #[test]
    fn test_bind_params_variadic() {
        let env = Env::new();
        let params = Params::new(vec![sym("a")], Some(sym("more")));
        env.bind_params(&params, &[MalVal::int(1), MalVal::int(2), MalVal::int(3)])
            .unwrap();
        assert_eq!(env.get(&sym("a")).unwrap(), MalVal::int(1));
        assert_eq!(
            env.get(&sym("more")).unwrap(),
            MalVal::list(vec![MalVal::int(2), MalVal::int(3)])
        );
    }

    #[test]
    fn test_bind_params_empty_rest() {
        let env = Env::new();
        let params = Params::new(vec![], Some(sym("xs")));
        env.bind_params(&params, &[]).unwrap();
        assert_eq!(env.get(&sym("xs")).unwrap(), MalVal::empty_list());
    }

    #[test]
    fn test_bind_params_too_few() {
        let env = Env::new();
        let params = Params::new(vec![sym("a"), sym("b")], None);
        let err = env.bind_params(&params, &[MalVal::int(1)]).unwrap_err();
        assert!(matches!(
            err,
            Error::ArityMismatch {
                expected: AritySpec::Exact(2),
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_bind_params_extra_ignored() {
        let env = Env::new();
        let params = Params::new(vec![sym("a")], None);
        env.bind_params(&params, &[MalVal::int(1), MalVal::int(2)])
            .unwrap();
        assert_eq!(env.get(&sym("a")).unwrap(), MalVal::int(1));
    }

    #[test]
    fn test_weak_handle() {
        let env = Env::new();
        let weak = env.downgrade();
        assert!(weak.upgrade().is_some());
        drop(env);
        assert!(weak.upgrade().is_none());
    }
}
