use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::class::LoxClass;
use crate::error::{LoxError, Result};
use crate::function::LoxFunction;
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::Value;

/// Host function exposed to scripts, e.g. `clock`.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: fn(&[Value]) -> std::result::Result<Value, String>,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({}/{})", self.name, self.arity)
    }
}

/// Anything that can appear to the left of `( … )`.
#[derive(Debug, Clone)]
pub enum Callable {
    Native(Rc<NativeFunction>),
    Function(Rc<LoxFunction>),
    Class(Rc<LoxClass>),
}

impl Callable {
    pub fn arity(&self) -> usize {
        match self {
            Callable::Native(native) => native.arity,
            Callable::Function(function) => function.arity(),
            Callable::Class(class) => class.arity(),
        }
    }

    /// Invoke with arguments whose count the caller has already checked
    /// against [`Callable::arity`].
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        paren: &Token,
        arguments: Vec<Value>,
    ) -> Result<Value> {
        match self {
            Callable::Native(native) => {
                debug!("Calling native function '{}'", native.name);

                (native.func)(&arguments).map_err(|message| LoxError::runtime(paren, message))
            }

            Callable::Function(function) => function.call(interpreter, arguments),

            Callable::Class(class) => LoxClass::instantiate(class, interpreter, arguments),
        }
    }

    /// Identity comparison, used by `==`.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Native(a), Callable::Native(b)) => Rc::ptr_eq(a, b),
            (Callable::Function(a), Callable::Function(b)) => Rc::ptr_eq(a, b),
            (Callable::Class(a), Callable::Class(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(_) => write!(f, "<native fn>"),
            Callable::Function(function) => write!(f, "<fn {}>", function.name()),
            Callable::Class(class) => write!(f, "{}", class.name),
        }
    }
}
