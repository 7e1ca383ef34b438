// mal-parser - Lexer for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for mal source code.
//!
//! Converts a source string into a stream of tokens. Whitespace and commas
//! separate tokens; `;` starts a comment running to the end of the line.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }

    // Reader macros
    Quote,         // '
    Quasiquote,    // `
    Unquote,       // ~
    SpliceUnquote, // ~@
    Deref,         // @
    Meta,          // ^

    // Literals
    Nil,
    True,
    False,
    Int(i64),
    String(String),
    Symbol(String),
    Keyword(String),

    // Special
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Quote => write!(f, "'"),
            Token::Quasiquote => write!(f, "`"),
            Token::Unquote => write!(f, "~"),
            Token::SpliceUnquote => write!(f, "~@"),
            Token::Deref => write!(f, "@"),
            Token::Meta => write!(f, "^"),
            Token::Nil => write!(f, "nil"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Int(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Keyword(s) => write!(f, ":{}", s),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq)]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for LexerError {}

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token from the source.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_trivia();

        let Some(c) = self.peek() else {
            return Ok(Token::Eof);
        };

        match c {
            // Delimiters
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            '[' => self.single(Token::LBracket),
            ']' => self.single(Token::RBracket),
            '{' => self.single(Token::LBrace),
            '}' => self.single(Token::RBrace),

            // Reader macros
            '\'' => self.single(Token::Quote),
            '`' => self.single(Token::Quasiquote),
            '~' => {
                self.advance();
                if self.peek() == Some('@') {
                    self.advance();
                    Ok(Token::SpliceUnquote)
                } else {
                    Ok(Token::Unquote)
                }
            }
            '@' => self.single(Token::Deref),
            '^' => self.single(Token::Meta),

            // String
            '"' => self.read_string(),

            // Keyword
            ':' => self.read_keyword(),

            // Numbers, symbols and the reserved words
            _ if is_symbol_char(c) => self.read_atom(),

            _ => Err(self.error(format!("Unexpected character: '{}'", c))),
        }
    }

    /// Collect all tokens into a vector.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if matches!(token, Token::Eof) {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Get the current line number (1-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the current column number (1-indexed).
    pub fn column(&self) -> usize {
        self.column
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn single(&mut self, token: Token) -> Result<Token, LexerError> {
        self.advance();
        Ok(token)
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    /// Skip separators (whitespace and commas) and `;` line comments.
    fn skip_trivia(&mut self) {
        let mut in_comment = false;
        while let Some(c) = self.peek() {
            match c {
                '\n' => in_comment = false,
                ';' => in_comment = true,
                _ if in_comment || c.is_whitespace() || c == ',' => {}
                _ => break,
            }
            self.advance();
        }
    }

    fn read_string(&mut self) -> Result<Token, LexerError> {
        self.advance();
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(Token::String(text)),
                Some('\\') => text.push(self.read_escape()?),
                Some(c) => text.push(c),
                None => return Err(self.error("Unterminated string".to_string())),
            }
        }
    }

    /// The character after a backslash inside a string.
    fn read_escape(&mut self) -> Result<char, LexerError> {
        match self.advance() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some(c @ ('\\' | '"')) => Ok(c),
            Some(c) => Err(self.error(format!("Invalid escape '\\{}' in string", c))),
            None => Err(self.error("Unterminated string".to_string())),
        }
    }

    fn read_keyword(&mut self) -> Result<Token, LexerError> {
        self.advance();
        match self.collect_symbol_chars(String::new()) {
            name if name.is_empty() => Err(self.error("Keyword has no name".to_string())),
            name => Ok(Token::Keyword(name)),
        }
    }

    /// Read a run of symbol characters and classify it.
    ///
    /// The whole run is taken before deciding, so `12abc` is reported as a
    /// malformed number rather than lexed as two tokens.
    fn read_atom(&mut self) -> Result<Token, LexerError> {
        let text = self.collect_symbol_chars(String::new());
        let unsigned = text.strip_prefix(['-', '+']).unwrap_or(&text);
        if unsigned.starts_with(|c: char| c.is_ascii_digit()) {
            return self.parse_int(&text);
        }
        Ok(match text.as_str() {
            "nil" => Token::Nil,
            "true" => Token::True,
            "false" => Token::False,
            _ => Token::Symbol(text),
        })
    }

    fn collect_symbol_chars(&mut self, mut name: String) -> String {
        while let Some(c) = self.peek().filter(|&c| is_symbol_char(c)) {
            name.push(c);
            self.advance();
        }
        name
    }

    fn parse_int(&self, s: &str) -> Result<Token, LexerError> {
        let digits = s.trim_start_matches(['-', '+']);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(self.error(format!("Invalid number: {}", s)));
        }
        s.parse::<i64>()
            .map(Token::Int)
            .map_err(|_| self.error(format!("Integer literal out of range: {}", s)))
    }
}

/// Check if a character can appear in a symbol.
///
/// Anything that is not whitespace, a delimiter, a comment start, a string
/// quote or a quoting prefix is part of the symbol.
fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace()
        && !matches!(
            c,
            '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '"' | '`' | ',' | ';' | '~' | '@' | '^'
        )
}

// ============================================================================
// Tests
// ============================================================================
