//! Pipeline driver: scan → parse → resolve → interpret, one `Lox` per
//! independent program state.

use std::io::{self, Write};

use log::info;

use crate::error::{Diagnostics, RunError};
use crate::expr::ExprId;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::scan_tokens;

/// An interpreter session.
///
/// Globals persist across [`Lox::run`] calls on the same session (a REPL
/// feeds it one line at a time); separate sessions share nothing.
pub struct Lox {
    interpreter: Interpreter,
    next_id: ExprId,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Session whose `print` output goes to `output`.
    pub fn with_output(output: Box<dyn Write>) -> Self {
        Self {
            interpreter: Interpreter::with_output(output),
            next_id: ExprId(0),
        }
    }

    /// Run one chunk of source.  Nothing executes if any static error is
    /// found; the resolver is skipped if scanning or parsing failed.
    pub fn run(&mut self, source: &str) -> Result<(), RunError> {
        let mut diagnostics = Diagnostics::new();

        let tokens = scan_tokens(source, &mut diagnostics);

        let statements = {
            let mut parser = Parser::new(&tokens, &mut diagnostics).starting_at(self.next_id);
            let statements = parser.parse();
            self.next_id = parser.next_id();
            statements
        };

        if diagnostics.had_error() {
            info!("Skipping execution: scan/parse errors");
            return Err(RunError::Static(diagnostics.into_errors()));
        }

        let locals = Resolver::new(&mut diagnostics)
            .with_defined_globals(self.interpreter.global_names())
            .resolve(&statements);

        if diagnostics.had_error() {
            info!("Skipping execution: resolve errors");
            return Err(RunError::Static(diagnostics.into_errors()));
        }

        self.interpreter.resolve_locals(locals);

        self.interpreter
            .interpret(&statements)
            .map_err(RunError::Runtime)
    }
}
