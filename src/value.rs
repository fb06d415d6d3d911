use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::callable::Callable;
use crate::class::LoxInstance;
use crate::expr::LiteralValue;

/// A runtime value.  Callables and instances are reference types: cloning a
/// `Value` clones the handle, not the object.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    Callable(Callable),
    Instance(Rc<RefCell<LoxInstance>>),
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::Str(s) => Value::String(s.clone()),
            LiteralValue::True => Value::Bool(true),
            LiteralValue::False => Value::Bool(false),
            LiteralValue::Nil => Value::Nil,
        }
    }
}

/// `nil` and `false` are falsy; everything else, `0` and `""` included, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Nil => false,
        Value::Bool(b) => *b,
        _ => true,
    }
}

/// Equality never fails: mismatched kinds are simply unequal, objects compare
/// by identity.
pub fn is_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
        (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

/// Integral numbers print without a fractional part (`3`, not `3.0`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 && n.is_sign_negative() {
        // An i64 has no negative zero.
        "-0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        let mut buf = itoa::Buffer::new();
        buf.format(n as i64).to_string()
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Number(n) => write!(f, "{}", format_number(*n)),

            Value::String(s) => write!(f, "{}", s),

            Value::Callable(callable) => write!(f, "{}", callable),

            Value::Instance(instance) => write!(f, "{}", instance.borrow()),
        }
    }
}
