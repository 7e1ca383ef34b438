// mal-parser - String interning for symbols and keywords
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Per-thread string interner backing [`Symbol`](crate::Symbol) and
//! [`Keyword`](crate::Keyword).
//!
//! Interned names are never freed. Values are `Rc`-based and never leave the
//! thread that created them, so a thread-local table is sufficient and needs
//! no locking.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Which table a name is interned in. Symbols and keywords with the same
/// text are distinct values and must not share storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    Symbols,
    Keywords,
}

#[derive(Default)]
struct Interner {
    symbols: HashSet<Rc<str>>,
    keywords: HashSet<Rc<str>>,
}

impl Interner {
    fn table(&mut self, table: Table) -> &mut HashSet<Rc<str>> {
        match table {
            Table::Symbols => &mut self.symbols,
            Table::Keywords => &mut self.keywords,
        }
    }

    fn intern(&mut self, table: Table, name: &str) -> Rc<str> {
        let set = self.table(table);
        if let Some(existing) = set.get(name) {
            return Rc::clone(existing);
        }
        let interned: Rc<str> = Rc::from(name);
        set.insert(Rc::clone(&interned));
        interned
    }
}

thread_local! {
    static INTERNER: RefCell<Interner> = RefCell::new(Interner::default());
}

/// Return the shared storage for `name` in `table`, creating it on first use.
pub(crate) fn intern(table: Table, name: &str) -> Rc<str> {
    INTERNER.with(|interner| interner.borrow_mut().intern(table, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_shares_storage() {
        let a = intern(Table::Symbols, "foo");
        let b = intern(Table::Symbols, "foo");
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_tables_are_separate() {
        let sym = intern(Table::Symbols, "foo");
        let kw = intern(Table::Keywords, "foo");
        assert!(!Rc::ptr_eq(&sym, &kw));
    }
}
