#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use treelox::{Lox, RunError};

/// `Write` sink that keeps everything written to it, shareable with a session.
#[derive(Debug, Clone, Default)]
pub struct OutputCapture {
    into: Rc<RefCell<Vec<u8>>>,
}

impl OutputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.into.borrow()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for OutputCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.into.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Fresh session with captured output.
pub fn session() -> (Lox, OutputCapture) {
    let output = OutputCapture::new();
    let lox = Lox::with_output(Box::new(output.clone()));
    (lox, output)
}

/// Run `source` in a fresh session; returns printed lines and the outcome.
pub fn run(source: &str) -> (Vec<String>, Result<(), RunError>) {
    let (mut lox, output) = session();
    let outcome = lox.run(source);
    (output.lines(), outcome)
}

/// Run `source`, which must succeed, and return its printed lines.
pub fn output_of(source: &str) -> Vec<String> {
    let (lines, outcome) = run(source);
    if let Err(e) = outcome {
        panic!("program failed: {:?}\nsource:\n{}", e, source);
    }
    lines
}

/// Messages of the static errors a program produced (panics otherwise).
pub fn static_errors(source: &str) -> Vec<String> {
    match run(source).1 {
        Err(RunError::Static(errors)) => errors.iter().map(|e| e.to_string()).collect(),
        other => panic!("expected static errors, got {:?}", other),
    }
}

/// The runtime error a program produced, plus what it printed before it.
pub fn runtime_error(source: &str) -> (Vec<String>, treelox::LoxError) {
    match run(source) {
        (lines, Err(RunError::Runtime(e))) => (lines, e),
        (_, other) => panic!("expected a runtime error, got {:?}", other),
    }
}
