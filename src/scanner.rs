//! Module `scanner` implements a one‑pass, streaming lexer for the Lox language.
//!
//! It transforms source text into a sequence of [`Token`]s, skipping whitespace
//! and comments, and emitting exactly one `EOF` token at the end. The scanner is
//! a `FusedIterator`, so it can be chained safely with other iterator adapters.
//!
//! # Public API
//!
//! - `Scanner::new(src: &str) -> Scanner<'_>`
//!   Create a new lexer over the input text.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token, LoxError>` on each `.next()`, where `Ok(token)` is a
//!   scanned token and `Err` reports a lexing error with line information.
//!   Scanning always continues after an error.
//!
//! - `scan_tokens(src, diagnostics) -> Vec<Token>`
//!   Drain a scanner, routing every error into the run's [`Diagnostics`].
//!
//! # Token Recognition
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `,`, `.`, `-`, `+`, `;`, `*`.
//! - Two‑character operators (maximal munch): `!=`, `==`, `<=`, `>=`.
//! - `//` line comments, skipped in bulk with `memchr`.
//! - String literals: `"` … `"`, may span lines, no escape sequences. An
//!   unterminated string is an error and produces no token.
//! - Numeric literals: digits with an optional fractional part; the `.` is
//!   only consumed when a digit follows it.
//! - Identifiers/keywords: alphanumeric/`_` runs, resolved through a
//!   perfect‑hash `KEYWORDS` map.
//!
//! # Example
//!
//! ```rust
//! use treelox::scanner::Scanner;
//!
//! let mut scanner = Scanner::new("print 123; // example");
//! for result in &mut scanner {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("Lex error: {}", err),
//!     }
//! }
//! ```

use crate::error::{Diagnostics, LoxError, Result};
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"    => TokenType::AND,
    b"class"  => TokenType::CLASS,
    b"else"   => TokenType::ELSE,
    b"false"  => TokenType::FALSE,
    b"fun"    => TokenType::FUN,
    b"for"    => TokenType::FOR,
    b"if"     => TokenType::IF,
    b"nil"    => TokenType::NIL,
    b"or"     => TokenType::OR,
    b"print"  => TokenType::PRINT,
    b"return" => TokenType::RETURN,
    b"super"  => TokenType::SUPER,
    b"this"   => TokenType::THIS,
    b"true"   => TokenType::TRUE,
    b"var"    => TokenType::VAR,
    b"while"  => TokenType::WHILE,
};

/// A single pass **scanner / lexer** over borrowed source text.
pub struct Scanner<'a> {
    src: &'a str,               // entire source text
    start: usize,               // byte index of the first byte of the current lexeme
    curr: usize,                // byte index one past the last byte examined
    line: usize,                // 1‑based line counter (\n increments)
    pending: Option<TokenType>, // recognised token kind waiting to be emitted
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.src.len()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one byte and return it.  Callers guard with [`Self::is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes()[self.curr];
        self.curr += 1;
        b
    }

    /// Current byte without consuming it, `0` past the end.
    #[inline(always)]
    fn peek(&self) -> u8 {
        self.bytes().get(self.curr).copied().unwrap_or(0)
    }

    /// One byte beyond [`Self::peek`], `0` past the end.
    #[inline(always)]
    fn peek_next(&self) -> u8 {
        self.bytes().get(self.curr + 1).copied().unwrap_or(0)
    }

    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn pick(&mut self, expected: u8, matched: TokenType, otherwise: TokenType) {
        let tt = if self.match_byte(expected) {
            matched
        } else {
            otherwise
        };

        self.pending = Some(tt);
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* lexeme starting at `self.curr`.  Real tokens leave their
    /// kind in `self.pending`; whitespace and comments leave it `None`.
    fn scan_token(&mut self) -> Result<()> {
        let b = self.advance();

        match b {
            b'(' => self.pending = Some(TokenType::LEFT_PAREN),
            b')' => self.pending = Some(TokenType::RIGHT_PAREN),
            b'{' => self.pending = Some(TokenType::LEFT_BRACE),
            b'}' => self.pending = Some(TokenType::RIGHT_BRACE),
            b',' => self.pending = Some(TokenType::COMMA),
            b'.' => self.pending = Some(TokenType::DOT),
            b'-' => self.pending = Some(TokenType::MINUS),
            b'+' => self.pending = Some(TokenType::PLUS),
            b';' => self.pending = Some(TokenType::SEMICOLON),
            b'*' => self.pending = Some(TokenType::STAR),

            b'!' => self.pick(b'=', TokenType::BANG_EQUAL, TokenType::BANG),
            b'=' => self.pick(b'=', TokenType::EQUAL_EQUAL, TokenType::EQUAL),
            b'<' => self.pick(b'=', TokenType::LESS_EQUAL, TokenType::LESS),
            b'>' => self.pick(b'=', TokenType::GREATER_EQUAL, TokenType::GREATER),

            b' ' | b'\r' | b'\t' => {}

            b'\n' => self.line += 1,

            b'/' => {
                if self.match_byte(b'/') {
                    // Leave the newline itself for the main loop so the line
                    // counter stays in one place.
                    match memchr(b'\n', &self.bytes()[self.curr..]) {
                        Some(pos) => self.curr += pos,
                        None => self.curr = self.len(),
                    }
                } else {
                    self.pending = Some(TokenType::SLASH);
                }
            }

            b'"' => return self.string(),

            b'0'..=b'9' => self.number(),

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(),

            _ => {
                // Step over the whole character, not just its first byte.
                let ch = self.src[self.start..].chars().next().unwrap_or('\u{FFFD}');
                self.curr = self.start + ch.len_utf8();

                return Err(LoxError::lex(
                    self.line,
                    format!("Unexpected character: {}", ch),
                ));
            }
        }

        Ok(())
    }

    /// Double‑quoted string literal; `self.start` points at the opening `"`.
    fn string(&mut self) -> Result<()> {
        while !self.is_at_end() && self.peek() != b'"' {
            if self.advance() == b'\n' {
                self.line += 1;
            }
        }

        if self.is_at_end() {
            return Err(LoxError::lex(self.line, "Unterminated string."));
        }

        self.advance(); // closing quote

        let contents: &str = &self.src[self.start + 1..self.curr - 1];
        self.pending = Some(TokenType::STRING(contents.to_owned()));

        Ok(())
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance(); // the "."

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        // Digits with at most one interior dot always parse.
        let n: f64 = self.src[self.start..self.curr].parse::<f64>().unwrap_or(0.0);
        self.pending = Some(TokenType::NUMBER(n));
    }

    fn identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.advance();
        }

        let word: &[u8] = &self.bytes()[self.start..self.curr];

        let tt: TokenType = KEYWORDS
            .get(word)
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER);

        self.pending = Some(tt);
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.curr <= self.len() {
            // Emit exactly one EOF, then terminate.
            if self.curr == self.len() {
                self.curr += 1;
                return Some(Ok(Token::new(TokenType::EOF, "", self.line)));
            }

            self.start = self.curr;
            self.pending = None;

            // Strings may span lines; report them on the line they start.
            let line = self.line;

            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            if let Some(tt) = self.pending.take() {
                let lexeme: &str = &self.src[self.start..self.curr];
                debug!("Scanned token ({:?}) on line {}", tt, line);

                return Some(Ok(Token::new(tt, lexeme, line)));
            }
        }

        None
    }
}

impl<'a> FusedIterator for Scanner<'a> {}

/// Scan `src` to completion.  Lexical errors go to `diagnostics`; the returned
/// token list always ends with `EOF`.
pub fn scan_tokens(src: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for result in Scanner::new(src) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => diagnostics.report(e),
        }
    }

    info!("Scanned {} tokens", tokens.len());

    tokens
}
