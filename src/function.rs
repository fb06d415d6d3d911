use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, info};

use crate::class::LoxInstance;
use crate::environment::{EnvRef, Environment};
use crate::error::Result;
use crate::interpreter::{Flow, Interpreter};
use crate::stmt::FunctionDecl;
use crate::token::Token;
use crate::value::Value;

/// A user-defined function or method together with the scope it closes over.
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: EnvRef,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: EnvRef, is_initializer: bool) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Same declaration, closing over a fresh scope in which `this` is
    /// `instance`.
    pub fn bind(&self, instance: Rc<RefCell<LoxInstance>>) -> LoxFunction {
        debug!("Binding method '{}'", self.name());

        let env: EnvRef = Environment::child_of(&self.closure);
        env.borrow_mut().define("this", Value::Instance(instance));

        LoxFunction {
            declaration: Rc::clone(&self.declaration),
            closure: env,
            is_initializer: self.is_initializer,
        }
    }

    pub fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value> {
        info!("Calling function '{}'", self.name());

        let env: EnvRef = Environment::child_of(&self.closure);

        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            debug!("Binding parameter '{}' to {}", param.lexeme, argument);
            env.borrow_mut().define(&param.lexeme, argument);
        }

        let flow: Flow = interpreter.execute_block(&self.declaration.body, env)?;

        // Initializers hand back the instance whatever the body did.
        if self.is_initializer {
            let this = Token::synthetic("this", self.declaration.name.line);
            return Environment::get_at(&self.closure, 0, &this);
        }

        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}

impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The closure may (indirectly) contain this function; don't recurse.
        f.debug_struct("LoxFunction")
            .field("name", &self.name())
            .field("arity", &self.arity())
            .field("is_initializer", &self.is_initializer)
            .finish()
    }
}
