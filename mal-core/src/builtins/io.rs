// mal-core - I/O built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Printing and reading: pr-str, str, prn, println, read-string, slurp

use std::fs;

use mal_parser::{MalVal, pr_seq, read};

use crate::error::{Error, Result};

// ============================================================================
// Print Output
// ============================================================================

/// (pr-str & args) - readable representations joined by spaces
pub(crate) fn builtin_pr_str(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::string(pr_seq(args, true, " ")))
}

/// (str & args) - raw representations concatenated
pub(crate) fn builtin_str(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::string(pr_seq(args, false, "")))
}

/// (prn & args) - print readable representations and a newline
pub(crate) fn builtin_prn(args: &[MalVal]) -> Result<MalVal> {
    println!("{}", pr_seq(args, true, " "));
    Ok(MalVal::Nil)
}

/// (println & args) - print raw representations and a newline
pub(crate) fn builtin_println(args: &[MalVal]) -> Result<MalVal> {
    println!("{}", pr_seq(args, false, " "));
    Ok(MalVal::Nil)
}

// ============================================================================
// Reading
// ============================================================================

/// (read-string s) - read the first form in s; nil if s has none
pub(crate) fn builtin_read_string(args: &[MalVal]) -> Result<MalVal> {
    match args {
        [MalVal::Str(s)] => Ok(read(s)?.unwrap_or(MalVal::Nil)),
        [other] => Err(Error::type_error_in(
            "read-string",
            "string",
            other.type_name(),
        )),
        _ => Err(Error::arity_named("read-string", 1, args.len())),
    }
}

/// (slurp path) - contents of the file at path
pub(crate) fn builtin_slurp(args: &[MalVal]) -> Result<MalVal> {
    match args {
        [MalVal::Str(path)] => fs::read_to_string(&**path)
            .map(MalVal::string)
            .map_err(|e| Error::io("slurp", Some(path.to_string()), e)),
        [other] => Err(Error::type_error_in("slurp", "string", other.type_name())),
        _ => Err(Error::arity_named("slurp", 1, args.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pr_str_and_str() {
        let args = [MalVal::string("a\"b"), MalVal::int(1), MalVal::Nil];
        assert_eq!(
            builtin_pr_str(&args).unwrap(),
            MalVal::string("\"a\\\"b\" 1 nil")
        );
        assert_eq!(builtin_str(&args).unwrap(), MalVal::string("a\"b1nil"));
    }

    #[test]
    fn test_read_string() {
        let form = builtin_read_string(&[MalVal::string("(1 2)")]).unwrap();
        assert_eq!(form, MalVal::list(vec![MalVal::int(1), MalVal::int(2)]));
        assert_eq!(
            builtin_read_string(&[MalVal::string("   ")]).unwrap(),
            MalVal::Nil
        );
        assert!(matches!(
            builtin_read_string(&[MalVal::string("(1")]),
            Err(Error::Read(_))
        ));
    }

    #[test]
    fn test_slurp_missing_file() {
        let err = builtin_slurp(&[MalVal::string("/no/such/file.mal")]).unwrap_err();
        assert!(matches!(err, Error::Io { context: "slurp", .. }));
    }
}
