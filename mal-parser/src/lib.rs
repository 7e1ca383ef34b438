// mal-parser - Reader, printer and value model for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # mal-parser
//!
//! Reader and printer for the mal language, plus the `MalVal` value model
//! they share with the evaluator.

mod intern;
pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod symbol;
pub mod value;

pub use im::{OrdMap, Vector};
pub use keyword::Keyword;
pub use lexer::{Lexer, LexerError};
pub use parser::{ParseError, Parser, read, read_all};
pub use printer::{pr_seq, pr_str};
pub use symbol::Symbol;
pub use value::{MalAtom, MalClosure, MalNativeFn, MalVal, Params};
