// mal-parser - Parser for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent reader for mal source code.
//!
//! Converts tokens into `MalVal` trees. Quoting prefixes expand to
//! two-element lists at read time, so `'x` reads as `(quote x)` and `~@xs`
//! as `(splice-unquote xs)`.

use std::fmt;

use crate::lexer::{Lexer, LexerError, Token};
use crate::value::MalVal;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}

/// The parser converts tokens into `MalVal` forms.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code.
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let line = lexer.line();
        let column = lexer.column();
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            line,
            column,
        })
    }

    /// Parse a single form from the source.
    /// Returns None if at end of input.
    pub fn parse(&mut self) -> Result<Option<MalVal>, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        let val = self.parse_form()?;
        Ok(Some(val))
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<MalVal>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    /// Parse a string and return the first form (convenience function).
    pub fn parse_str(source: &str) -> Result<Option<MalVal>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse()
    }

    /// Parse a string and return all forms (convenience function).
    pub fn parse_all_str(source: &str) -> Result<Vec<MalVal>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse_all()
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ParseError> {
        let prev = std::mem::replace(&mut self.current, Token::Eof);
        // Capture position of the next token before fetching it
        self.line = self.lexer.line();
        self.column = self.lexer.column();
        self.current = self.lexer.next_token()?;
        Ok(prev)
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    fn parse_form(&mut self) -> Result<MalVal, ParseError> {
        match self.advance()? {
            // Literals
            Token::Nil => Ok(MalVal::nil()),
            Token::True => Ok(MalVal::bool(true)),
            Token::False => Ok(MalVal::bool(false)),
            Token::Int(n) => Ok(MalVal::int(n)),
            Token::String(s) => Ok(MalVal::string(s)),
            Token::Symbol(s) => Ok(MalVal::symbol(&s)),
            Token::Keyword(s) => Ok(MalVal::keyword(&s)),

            // Collections
            Token::LParen => self.parse_seq(&Token::RParen).map(MalVal::list),
            Token::LBracket => self.parse_seq(&Token::RBracket).map(MalVal::vector),
            Token::LBrace => self.parse_map(),

            // Reader macros
            Token::Quote => self.parse_quote("quote"),
            Token::Quasiquote => self.parse_quote("quasiquote"),
            Token::Unquote => self.parse_quote("unquote"),
            Token::SpliceUnquote => self.parse_quote("splice-unquote"),
            Token::Deref => self.parse_quote("deref"),
            Token::Meta => self.parse_meta(),

            // Unexpected tokens
            Token::RParen => Err(self.error("Unexpected ')'".to_string())),
            Token::RBracket => Err(self.error("Unexpected ']'".to_string())),
            Token::RBrace => Err(self.error("Unexpected '}'".to_string())),
            Token::Eof => Err(self.error("Unexpected end of input".to_string())),
        }
    }

    /// Read forms up to `close`, consuming it. The opening delimiter has
    /// already been consumed.
    fn parse_seq(&mut self, close: &Token) -> Result<Vec<MalVal>, ParseError> {
        let mut elements = Vec::new();
        loop {
            if &self.current == close {
                self.advance()?;
                return Ok(elements);
            }
            if matches!(self.current, Token::Eof) {
                return Err(self.error(format!("Expected '{}', got EOF", close)));
            }
            elements.push(self.parse_form()?);
        }
    }

    fn parse_map(&mut self) -> Result<MalVal, ParseError> {
        let forms = self.parse_seq(&Token::RBrace)?;
        if forms.len() % 2 != 0 {
            return Err(self.error("Map literal must contain an even number of forms".to_string()));
        }
        let mut forms = forms.into_iter();
        let mut pairs = Vec::new();
        while let (Some(key), Some(value)) = (forms.next(), forms.next()) {
            pairs.push((key, value));
        }
        Ok(MalVal::map(pairs))
    }

    fn parse_quote(&mut self, name: &str) -> Result<MalVal, ParseError> {
        let form = self.parse_form()?;
        Ok(MalVal::list(vec![MalVal::symbol(name), form]))
    }

    fn parse_meta(&mut self) -> Result<MalVal, ParseError> {
        let meta = self.parse_form()?;
        let form = self.parse_form()?;
        // ^meta form reads as (with-meta form meta)
        Ok(MalVal::list(vec![MalVal::symbol("with-meta"), form, meta]))
    }
}

// ============================================================================
// Convenience function
// ============================================================================

/// Parse a string and return the first form.
pub fn read(source: &str) -> Result<Option<MalVal>, ParseError> {
    Parser::parse_str(source)
}

/// Parse a string and return all forms.
pub fn read_all(source: &str) -> Result<Vec<MalVal>, ParseError> {
    Parser::parse_all_str(source)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> MalVal {
        read(s).unwrap().unwrap()
    }

    #[test]
    fn test_atoms() {
        assert_eq!(parse("nil"), MalVal::nil());
        assert_eq!(parse("true"), MalVal::bool(true));
        assert_eq!(parse("-12"), MalVal::int(-12));
        assert_eq!(parse("\"hi\""), MalVal::string("hi"));
        assert_eq!(parse("abc"), MalVal::symbol("abc"));
        assert_eq!(parse(":kw"), MalVal::keyword("kw"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(read("").unwrap(), None);
        assert_eq!(read("  ; only a comment").unwrap(), None);
    }

    #[test]
    fn test_list() {
        assert_eq!(
            parse("(+ 1 2)"),
            MalVal::list(vec![MalVal::symbol("+"), MalVal::int(1), MalVal::int(2)])
        );
        assert!(matches!(parse("()"), MalVal::List(items) if items.is_empty()));
    }

    #[test]
    fn test_vector() {
        let v = parse("[1 [2]]");
        assert!(matches!(&v, MalVal::Vector(items) if items.len() == 2));
    }

    #[test]
    fn test_map() {
        assert_eq!(
            parse("{:a 1}"),
            MalVal::map(vec![(MalVal::keyword("a"), MalVal::int(1))])
        );
        assert!(read("{:a}").is_err());
    }

    #[test]
    fn test_quote_prefixes() {
        let cases = [
            ("'x", "quote"),
            ("`x", "quasiquote"),
            ("~x", "unquote"),
            ("~@x", "splice-unquote"),
            ("@x", "deref"),
        ];
        for (src, name) in cases {
            assert_eq!(
                parse(src),
                MalVal::list(vec![MalVal::symbol(name), MalVal::symbol("x")]),
                "reading {}",
                src
            );
        }
    }

    #[test]
    fn test_meta() {
        assert_eq!(
            parse("^{:a 1} [1]"),
            MalVal::list(vec![
                MalVal::symbol("with-meta"),
                MalVal::vector(vec![MalVal::int(1)]),
                MalVal::map(vec![(MalVal::keyword("a"), MalVal::int(1))]),
            ])
        );
    }

    #[test]
    fn test_unbalanced() {
        let err = read("(1 2").unwrap_err();
        assert!(err.message.contains("EOF"));
        let err = read(")").unwrap_err();
        assert_eq!(err.message, "Unexpected ')'");
    }

    #[test]
    fn test_read_all() {
        let forms = read_all("1 (2) [3]").unwrap();
        assert_eq!(forms.len(), 3);
    }

    #[test]
    fn test_error_position() {
        let err = read("(1\n  ]").unwrap_err();
        assert_eq!(err.line, 2);
    }
}
