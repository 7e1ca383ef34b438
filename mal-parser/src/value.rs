// mal-parser - Value types for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core value type for mal.
//!
//! `MalVal` is the closed set of runtime values. The reader produces
//! `MalVal` trees and the evaluator consumes them read-only, so code and
//! data share one representation.

use std::any::Any;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use im::{OrdMap, Vector};

use crate::keyword::Keyword;
use crate::printer;
use crate::symbol::Symbol;

/// The core value type for mal.
///
/// Collections are persistent (`im`), so cloning a value is cheap and never
/// copies elements.
#[derive(Clone)]
pub enum MalVal {
    /// The nil value
    Nil,
    /// Boolean true or false
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// Immutable string
    Str(Rc<str>),
    /// Self-evaluating keyword
    Keyword(Keyword),
    /// Symbol, resolved through the environment
    Symbol(Symbol),
    /// List: code when evaluated, data when quoted
    List(Vector<MalVal>),
    /// Vector: evaluates each element in place
    Vector(Vector<MalVal>),
    /// Map from keys to values
    Map(OrdMap<MalVal, MalVal>),
    /// Native (Rust) function
    NativeFn(MalNativeFn),
    /// User-defined function with its captured environment
    Closure(MalClosure),
    /// Mutable reference cell
    Atom(MalAtom),
}

// ============================================================================
// Function Types
// ============================================================================

/// Formal parameters of a closure.
///
/// `(a b & more)` has fixed parameters `a b` and rest parameter `more`,
/// which receives a list of any arguments past the fixed ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub fixed: Vec<Symbol>,
    pub rest: Option<Symbol>,
}

impl Params {
    /// The marker symbol name introducing the rest parameter.
    pub const REST_MARKER: &'static str = "&";

    pub fn new(fixed: Vec<Symbol>, rest: Option<Symbol>) -> Self {
        Params { fixed, rest }
    }

    /// Minimum number of arguments accepted.
    #[must_use]
    pub fn min_arity(&self) -> usize {
        self.fixed.len()
    }

    #[must_use]
    pub fn is_variadic(&self) -> bool {
        self.rest.is_some()
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.fixed.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", param)?;
        }
        if let Some(rest) = &self.rest {
            if !self.fixed.is_empty() {
                write!(f, " ")?;
            }
            write!(f, "{} {}", Params::REST_MARKER, rest)?;
        }
        write!(f, ")")
    }
}

/// A user-defined function (closure).
///
/// Holds its parameters, its unevaluated body and the environment that was
/// active when `fn*` ran. The environment is type-erased because `Env` is
/// defined in mal-core; the evaluator downcasts it on application.
#[derive(Clone)]
pub struct MalClosure {
    pub params: Rc<Params>,
    pub body: Rc<MalVal>,
    pub env: Rc<dyn Any>,
}

impl MalClosure {
    pub fn new(params: Params, body: MalVal, env: Rc<dyn Any>) -> Self {
        MalClosure {
            params: Rc::new(params),
            body: Rc::new(body),
            env,
        }
    }

    /// Identity of this closure. Clones share it; each `fn*` evaluation
    /// makes a new one.
    fn addr(&self) -> usize {
        Rc::as_ptr(&self.body) as usize
    }
}

impl fmt::Debug for MalClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<function {}>", self.params)
    }
}

/// A native (Rust) function.
#[derive(Clone)]
pub struct MalNativeFn {
    /// Function name for display
    pub name: &'static str,
    /// The actual function (type-erased)
    func: Rc<dyn Any>,
}

impl MalNativeFn {
    /// Create a new native function with a type-erased function.
    pub fn new(name: &'static str, func: Rc<dyn Any>) -> Self {
        MalNativeFn { name, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the inner function reference.
    pub fn func(&self) -> &Rc<dyn Any> {
        &self.func
    }
}

impl fmt::Debug for MalNativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<native-fn {}>", self.name)
    }
}

// ============================================================================
// Atom Type
// ============================================================================

/// A mutable reference cell (`atom`).
///
/// Atoms compare and hash by identity: two atoms holding equal values are
/// still different atoms.
#[derive(Clone)]
pub struct MalAtom {
    value: Rc<RefCell<MalVal>>,
}

impl MalAtom {
    pub fn new(value: MalVal) -> Self {
        MalAtom {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Get the current value.
    pub fn deref(&self) -> MalVal {
        self.value.borrow().clone()
    }

    /// Replace the value, returning the new value.
    pub fn reset(&self, new_val: MalVal) -> MalVal {
        *self.value.borrow_mut() = new_val.clone();
        new_val
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.value) as usize
    }
}

impl fmt::Debug for MalAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        printer::write_val(f, &MalVal::Atom(self.clone()), true)
    }
}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl MalVal {
    pub fn nil() -> Self {
        MalVal::Nil
    }

    pub fn bool(b: bool) -> Self {
        MalVal::Bool(b)
    }

    pub fn int(n: i64) -> Self {
        MalVal::Int(n)
    }

    pub fn string(s: impl Into<Rc<str>>) -> Self {
        MalVal::Str(s.into())
    }

    /// Create a symbol value from its name
    pub fn symbol(name: &str) -> Self {
        MalVal::Symbol(Symbol::new(name))
    }

    /// Create a keyword value; the leading colon is optional
    pub fn keyword(name: &str) -> Self {
        MalVal::Keyword(Keyword::new(name))
    }

    pub fn empty_list() -> Self {
        MalVal::List(Vector::new())
    }

    pub fn list(elements: Vec<MalVal>) -> Self {
        MalVal::List(elements.into_iter().collect())
    }

    pub fn vector(elements: Vec<MalVal>) -> Self {
        MalVal::Vector(elements.into_iter().collect())
    }

    pub fn map(pairs: Vec<(MalVal, MalVal)>) -> Self {
        MalVal::Map(pairs.into_iter().collect())
    }

    pub fn atom(value: MalVal) -> Self {
        MalVal::Atom(MalAtom::new(value))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, MalVal::Nil)
    }

    /// Only `nil` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, MalVal::Nil | MalVal::Bool(false))
    }

    /// Elements of a list or vector.
    pub fn as_seq(&self) -> Option<&Vector<MalVal>> {
        match self {
            MalVal::List(items) | MalVal::Vector(items) => Some(items),
            _ => None,
        }
    }

    /// The symbol, if this value is one.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            MalVal::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// Check whether this is the symbol with the given name.
    pub fn is_symbol_named(&self, name: &str) -> bool {
        matches!(self, MalVal::Symbol(sym) if sym.is(name))
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            MalVal::Nil => "nil",
            MalVal::Bool(_) => "bool",
            MalVal::Int(_) => "int",
            MalVal::Str(_) => "string",
            MalVal::Keyword(_) => "keyword",
            MalVal::Symbol(_) => "symbol",
            MalVal::List(_) => "list",
            MalVal::Vector(_) => "vector",
            MalVal::Map(_) => "map",
            MalVal::NativeFn(_) | MalVal::Closure(_) => "fn",
            MalVal::Atom(_) => "atom",
        }
    }
}

// ============================================================================
// Display implementation
// ============================================================================

impl fmt::Display for MalVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        printer::write_val(f, self, true)
    }
}

impl fmt::Debug for MalVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// ============================================================================
// Equality and ordering (for use as map keys)
// ============================================================================

impl PartialEq for MalVal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MalVal::Nil, MalVal::Nil) => true,
            (MalVal::Bool(a), MalVal::Bool(b)) => a == b,
            (MalVal::Int(a), MalVal::Int(b)) => a == b,
            (MalVal::Str(a), MalVal::Str(b)) => a == b,
            (MalVal::Keyword(a), MalVal::Keyword(b)) => a == b,
            (MalVal::Symbol(a), MalVal::Symbol(b)) => a == b,
            // Lists and vectors are both sequential: [1 2] = (1 2)
            (
                MalVal::List(a) | MalVal::Vector(a),
                MalVal::List(b) | MalVal::Vector(b),
            ) => a == b,
            (MalVal::Map(a), MalVal::Map(b)) => a == b,
            (MalVal::NativeFn(a), MalVal::NativeFn(b)) => a.name == b.name,
            (MalVal::Atom(a), MalVal::Atom(b)) => Rc::ptr_eq(&a.value, &b.value),
            (MalVal::Closure(a), MalVal::Closure(b)) => a.addr() == b.addr(),
            _ => false,
        }
    }
}

impl Eq for MalVal {}

impl PartialOrd for MalVal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MalVal {
    fn cmp(&self, other: &Self) -> Ordering {
        fn type_order(v: &MalVal) -> u8 {
            match v {
                MalVal::Nil => 0,
                MalVal::Bool(_) => 1,
                MalVal::Int(_) => 2,
                MalVal::Str(_) => 3,
                MalVal::Keyword(_) => 4,
                MalVal::Symbol(_) => 5,
                MalVal::List(_) | MalVal::Vector(_) => 6,
                MalVal::Map(_) => 7,
                MalVal::NativeFn(_) => 8,
                MalVal::Closure(_) => 9,
                MalVal::Atom(_) => 10,
            }
        }

        let ta = type_order(self);
        let tb = type_order(other);
        if ta != tb {
            return ta.cmp(&tb);
        }

        match (self, other) {
            (MalVal::Bool(a), MalVal::Bool(b)) => a.cmp(b),
            (MalVal::Int(a), MalVal::Int(b)) => a.cmp(b),
            (MalVal::Str(a), MalVal::Str(b)) => a.cmp(b),
            (MalVal::Keyword(a), MalVal::Keyword(b)) => a.cmp(b),
            (MalVal::Symbol(a), MalVal::Symbol(b)) => a.cmp(b),
            (
                MalVal::List(a) | MalVal::Vector(a),
                MalVal::List(b) | MalVal::Vector(b),
            ) => a.iter().cmp(b.iter()),
            (MalVal::Map(a), MalVal::Map(b)) => a.iter().cmp(b.iter()),
            (MalVal::NativeFn(a), MalVal::NativeFn(b)) => a.name.cmp(b.name),
            (MalVal::Closure(a), MalVal::Closure(b)) => a.addr().cmp(&b.addr()),
            (MalVal::Atom(a), MalVal::Atom(b)) => a.addr().cmp(&b.addr()),
            _ => Ordering::Equal,
        }
    }
}

impl Hash for MalVal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            MalVal::Nil => 0u8.hash(state),
            MalVal::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            MalVal::Int(n) => {
                2u8.hash(state);
                n.hash(state);
            }
            MalVal::Str(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            MalVal::Keyword(kw) => {
                4u8.hash(state);
                kw.hash(state);
            }
            MalVal::Symbol(sym) => {
                5u8.hash(state);
                sym.hash(state);
            }
            // Same tag for both so that equal sequences hash equally
            MalVal::List(items) | MalVal::Vector(items) => {
                6u8.hash(state);
                for item in items.iter() {
                    item.hash(state);
                }
            }
            MalVal::Map(map) => {
                7u8.hash(state);
                for (k, v) in map.iter() {
                    k.hash(state);
                    v.hash(state);
                }
            }
            MalVal::NativeFn(nf) => {
                8u8.hash(state);
                nf.name.hash(state);
            }
            MalVal::Closure(c) => {
                9u8.hash(state);
                c.addr().hash(state);
            }
            MalVal::Atom(a) => {
                10u8.hash(state);
                a.addr().hash(state);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
