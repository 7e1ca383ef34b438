// mal-parser - Keyword type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keywords are self-evaluating identifiers, printed with a leading colon.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::intern::{Table, intern};

/// An interned, self-evaluating identifier.
#[derive(Clone)]
pub struct Keyword {
    name: Rc<str>,
}

impl Keyword {
    /// Create (or look up) a keyword. The leading colon is optional.
    pub fn new(name: &str) -> Self {
        let name = name.strip_prefix(':').unwrap_or(name);
        Keyword {
            name: intern(Table::Keywords, name),
        }
    }

    /// Get the name, without the colon.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword({})", self)
    }
}

impl PartialEq for Keyword {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.name, &other.name)
    }
}

impl Eq for Keyword {}

impl PartialOrd for Keyword {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyword {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Keyword {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.name).cast::<u8>().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;

    #[test]
    fn test_keyword_display() {
        assert_eq!(format!("{}", Keyword::new("foo")), ":foo");
        assert_eq!(Keyword::new(":foo").name(), "foo");
    }

    #[test]
    fn test_colon_prefix_is_optional() {
        assert_eq!(Keyword::new("a"), Keyword::new(":a"));
    }

    #[test]
    fn test_keyword_distinct_from_symbol_name() {
        // Same text, different tables: only the names match.
        assert_eq!(Keyword::new("x").name(), Symbol::new("x").name());
    }
}
