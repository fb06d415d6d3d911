use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a scope.  Closures keep their defining scope alive by
/// holding one of these; the scope is freed with its last holder.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One lexical scope: name → value, plus a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Fresh child scope of `parent`, already wrapped for sharing.
    pub fn child_of(parent: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(parent))))
    }

    /// Always succeeds; redefining a name in the same scope overwrites it.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Names bound directly in this scope.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Dynamic lookup: this scope first, then each enclosing scope.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined_variable(name))
        }
    }

    /// Mutate the nearest scope that already binds `name`.  Never creates a
    /// binding.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined_variable(name))
        }
    }

    /// Walk exactly `distance` parent links from `env`.
    pub fn ancestor(env: &EnvRef, distance: usize) -> Option<EnvRef> {
        let mut current: EnvRef = Rc::clone(env);

        for _ in 0..distance {
            let parent: EnvRef = current.borrow().enclosing.as_ref().map(Rc::clone)?;
            current = parent;
        }

        Some(current)
    }

    /// Resolver-informed read: look only in the scope `distance` links up.
    pub fn get_at(env: &EnvRef, distance: usize, name: &Token) -> Result<Value> {
        debug!("get_at '{}' distance {}", name.lexeme, distance);

        let scope: EnvRef = Self::ancestor(env, distance).ok_or_else(|| broken_chain(name))?;
        let value: Option<Value> = scope.borrow().values.get(&name.lexeme).cloned();

        value.ok_or_else(|| undefined_variable(name))
    }

    /// Resolver-informed write: mutate only the scope `distance` links up.
    pub fn assign_at(env: &EnvRef, distance: usize, name: &Token, value: Value) -> Result<()> {
        debug!("assign_at '{}' distance {}", name.lexeme, distance);

        let scope: EnvRef = Self::ancestor(env, distance).ok_or_else(|| broken_chain(name))?;
        let mut scope = scope.borrow_mut();

        let outcome = match scope.values.get_mut(&name.lexeme) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(undefined_variable(name)),
        };

        outcome
    }
}

fn undefined_variable(name: &Token) -> LoxError {
    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}

fn broken_chain(name: &Token) -> LoxError {
    LoxError::runtime(
        name,
        format!("Scope chain too short while resolving '{}'.", name.lexeme),
    )
}
