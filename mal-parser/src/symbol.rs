// mal-parser - Symbol type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols are identifiers resolved through the environment chain.
//!
//! Symbols are interned: two symbols with the same name share storage, so
//! equality and hashing are pointer operations. Ordering still compares
//! names so that maps keyed by symbols print deterministically.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::intern::{Table, intern};

/// An interned identifier.
#[derive(Clone)]
pub struct Symbol {
    name: Rc<str>,
}

impl Symbol {
    /// Create (or look up) the symbol with the given name.
    pub fn new(name: &str) -> Self {
        Symbol {
            name: intern(Table::Symbols, name),
        }
    }

    /// Get the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether this symbol has the given name.
    #[inline]
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        &*self.name == name
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.name)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.name, &other.name)
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.name).cast::<u8>().hash(state);
    }
}
