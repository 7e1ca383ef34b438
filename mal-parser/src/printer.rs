// mal-parser - Printer for mal values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Converts values back to text.
//!
//! In readable mode strings are quoted and escaped so that the output can be
//! read back; otherwise their raw contents are written. Functions and atoms
//! have no reader syntax and print as opaque markers.

use std::fmt::{self, Write};

use crate::value::MalVal;

/// Print a value to a string.
pub fn pr_str(val: &MalVal, readably: bool) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_val(&mut out, val, readably);
    out
}

/// Print several values separated by `sep`, as `pr-str`, `str`, `prn` and
/// `println` do.
pub fn pr_seq<'a>(vals: impl IntoIterator<Item = &'a MalVal>, readably: bool, sep: &str) -> String {
    let mut out = String::new();
    for (i, val) in vals.into_iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        let _ = write_val(&mut out, val, readably);
    }
    out
}

pub(crate) fn write_val<W: Write>(out: &mut W, val: &MalVal, readably: bool) -> fmt::Result {
    Printer {
        readably,
        open_atoms: Vec::new(),
    }
    .write(out, val)
}

/// Marker written for an atom reached again while its contents are still
/// being printed.
const ATOM_CYCLE: &str = "(atom ...)";

struct Printer {
    readably: bool,
    /// Atoms whose contents are being written, innermost last.
    open_atoms: Vec<usize>,
}

impl Printer {
    fn write<W: Write>(&mut self, out: &mut W, val: &MalVal) -> fmt::Result {
        match val {
            MalVal::Nil => out.write_str("nil"),
            MalVal::Bool(b) => write!(out, "{}", b),
            MalVal::Int(n) => write!(out, "{}", n),
            MalVal::Str(s) if self.readably => write_escaped(out, s),
            MalVal::Str(s) => out.write_str(s),
            MalVal::Keyword(kw) => write!(out, "{}", kw),
            MalVal::Symbol(sym) => write!(out, "{}", sym),
            MalVal::List(items) => self.write_items(out, "(", items.iter(), ")"),
            MalVal::Vector(items) => self.write_items(out, "[", items.iter(), "]"),
            MalVal::Map(map) => {
                out.write_char('{')?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        out.write_char(' ')?;
                    }
                    self.write(out, k)?;
                    out.write_char(' ')?;
                    self.write(out, v)?;
                }
                out.write_char('}')
            }
            MalVal::NativeFn(nf) => write!(out, "#<native-fn {}>", nf.name()),
            MalVal::Closure(_) => out.write_str("#<function>"),
            MalVal::Atom(atom) => {
                let addr = atom.addr();
                if self.open_atoms.contains(&addr) {
                    return out.write_str(ATOM_CYCLE);
                }
                self.open_atoms.push(addr);
                out.write_str("(atom ")?;
                let result = self.write(out, &atom.deref());
                self.open_atoms.pop();
                result?;
                out.write_char(')')
            }
        }
    }

    fn write_items<'a, W: Write>(
        &mut self,
        out: &mut W,
        open: &str,
        items: impl Iterator<Item = &'a MalVal>,
        close: &str,
    ) -> fmt::Result {
        out.write_str(open)?;
        for (i, item) in items.enumerate() {
            if i > 0 {
                out.write_char(' ')?;
            }
            self.write(out, item)?;
        }
        out.write_str(close)
    }
}

fn write_escaped<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}
