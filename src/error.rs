//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! All subsystems (scanner, parser, resolver, runtime) convert their failure
//! modes into one of the [`LoxError`] variants defined here.  Static errors
//! (scan / parse / resolve) are collected in a [`Diagnostics`] sink so that a
//! single pass can report every independent problem; runtime errors abort the
//! current run and travel up the call stack through `?`.
//!
//! The module **does not** print diagnostics itself; the CLI layer decides how
//! and where to render them.

use std::io;
use thiserror::Error;

use log::info;

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        line: usize,
        /// `" at end"`, `" at 'lexeme'"` or empty.
        location: String,
    },

    /// Static‑analysis or resolution failure (e.g. early‑binding errors).
    #[error("[line {line}] Error{location}: {message}")]
    Resolve {
        message: String,
        line: usize,
        location: String,
    },

    /// Runtime evaluation error, carrying the line of the offending token.
    #[error("{message}\n[line {line}]")]
    Runtime { message: String, line: usize },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

/// Location suffix used by token-anchored static errors.
fn location_of(token: &Token) -> String {
    if token.token_type == TokenType::EOF {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", token.line, message);

        LoxError::Parse {
            message,
            line: token.line,
            location: location_of(token),
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Resolve error: line={}, msg={}", token.line, message);

        LoxError::Resolve {
            message,
            line: token.line,
            location: location_of(token),
        }
    }

    /// Helper constructor for the **interpreter**.
    pub fn runtime<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Runtime error: line={}, msg={}", token.line, message);

        LoxError::Runtime {
            message,
            line: token.line,
        }
    }

    /// Source line the error points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoxError::Lex { line, .. }
            | LoxError::Parse { line, .. }
            | LoxError::Resolve { line, .. }
            | LoxError::Runtime { line, .. } => Some(*line),
            LoxError::Io(_) | LoxError::Utf8(_) => None,
        }
    }

    /// Bare message without line or location decoration.
    pub fn message(&self) -> String {
        match self {
            LoxError::Lex { message, .. }
            | LoxError::Parse { message, .. }
            | LoxError::Resolve { message, .. }
            | LoxError::Runtime { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// `true` for scan, parse and resolve errors.
    pub fn is_static(&self) -> bool {
        matches!(
            self,
            LoxError::Lex { .. } | LoxError::Parse { .. } | LoxError::Resolve { .. }
        )
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

/// Sink for static errors produced by one pipeline run.
///
/// Every front-end stage reports into the same instance; the driver asks
/// [`Diagnostics::had_error`] before deciding whether to run later stages.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<LoxError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, error: LoxError) {
        info!("Static error reported: {}", error);

        self.errors.push(error);
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[LoxError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<LoxError> {
        self.errors
    }
}

/// Outcome of a failed [`crate::session::Lox::run`].
#[derive(Debug, Error)]
pub enum RunError {
    /// One or more scan/parse/resolve errors; nothing was executed.
    #[error("{} static error(s)", .0.len())]
    Static(Vec<LoxError>),

    /// The first runtime error raised; the rest of the program was skipped.
    #[error(transparent)]
    Runtime(LoxError),
}

impl RunError {
    /// Conventional process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Static(_) => 65,
            RunError::Runtime(_) => 70,
        }
    }
}
