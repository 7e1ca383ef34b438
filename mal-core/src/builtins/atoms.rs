// mal-core - Atom built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Atom operations: atom, atom?, deref, reset!, swap!

use mal_parser::{MalAtom, MalVal};

use crate::error::{Error, Result};
use crate::eval::apply;

fn atom_arg<'a>(name: &str, val: &'a MalVal) -> Result<&'a MalAtom> {
    match val {
        MalVal::Atom(atom) => Ok(atom),
        other => Err(Error::type_error_in(name, "atom", other.type_name())),
    }
}

/// (atom x) - Create an atom with initial value x
pub(crate) fn builtin_atom(args: &[MalVal]) -> Result<MalVal> {
    let [x] = args else {
        return Err(Error::arity_named("atom", 1, args.len()));
    };
    Ok(MalVal::atom(x.clone()))
}

/// (atom? x) - Returns true if x is an atom
pub(crate) fn builtin_atom_p(args: &[MalVal]) -> Result<MalVal> {
    let [x] = args else {
        return Err(Error::arity_named("atom?", 1, args.len()));
    };
    Ok(MalVal::bool(matches!(x, MalVal::Atom(_))))
}

/// (deref atom) - Current value of atom
pub(crate) fn builtin_deref(args: &[MalVal]) -> Result<MalVal> {
    let [atom] = args else {
        return Err(Error::arity_named("deref", 1, args.len()));
    };
    Ok(atom_arg("deref", atom)?.deref())
}

/// (reset! atom newval) - Set atom value, returns newval
pub(crate) fn builtin_reset(args: &[MalVal]) -> Result<MalVal> {
    let [atom, new_val] = args else {
        return Err(Error::arity_named("reset!", 2, args.len()));
    };
    Ok(atom_arg("reset!", atom)?.reset(new_val.clone()))
}

/// (swap! atom f & args) - Set atom to (f current args...), returns the new
/// value. `f` may be a closure or a native function.
pub(crate) fn builtin_swap(args: &[MalVal]) -> Result<MalVal> {
    let [atom, func, extra @ ..] = args else {
        return Err(Error::arity_at_least("swap!", 2, args.len()));
    };
    let atom = atom_arg("swap!", atom)?;

    let mut call_args = Vec::with_capacity(extra.len() + 1);
    call_args.push(atom.deref());
    call_args.extend_from_slice(extra);

    // The atom is not borrowed while f runs, so f may itself touch the atom.
    let new_val = apply(func, &call_args)?;
    Ok(atom.reset(new_val))
}
