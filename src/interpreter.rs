use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info, warn};

use crate::callable::{Callable, NativeFunction};
use crate::class::{LoxClass, LoxInstance};
use crate::environment::{EnvRef, Environment};
use crate::error::{LoxError, Result};
use crate::expr::{Expr, ExprId};
use crate::function::LoxFunction;
use crate::resolver::Locals;
use crate::stack::ensure_sufficient_stack;
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{Token, TokenType};
use crate::value::{is_equal, is_truthy, Value};

/// How a statement finished.  `return` unwinds through these, never through
/// the error channel.
#[derive(Debug)]
pub enum Flow {
    Normal,
    Return(Value),
}

/// Tree-walking evaluator.
///
/// `globals` is the fixed root scope, `environment` the scope statements are
/// currently running in, `locals` the resolver's distance table.
pub struct Interpreter {
    globals: EnvRef,
    environment: EnvRef,
    locals: Locals,
    output: Box<dyn Write>,
    call_depth: usize,
}

/// Deepest chain of nested Lox calls before "Stack overflow." is raised.
pub const MAX_CALL_DEPTH: usize = 16_384;

fn clock(_args: &[Value]) -> std::result::Result<Value, String> {
    let millis: i64 = chrono::Utc::now().timestamp_millis();

    Ok(Value::Number(millis as f64 / 1000.0))
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter printing to stdout, with native functions such as `clock`
    /// predefined.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Interpreter whose `print` statements go to `output`.
    pub fn with_output(output: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals: EnvRef = Rc::new(RefCell::new(Environment::new()));

        debug!("Defining native function 'clock'");

        globals.borrow_mut().define(
            "clock",
            Value::Callable(Callable::Native(Rc::new(NativeFunction {
                name: "clock",
                arity: 0,
                func: clock,
            }))),
        );

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
            call_depth: 0,
        }
    }

    /// Merge resolver output.  Ids are unique per session, so earlier
    /// entries (still used by live closures) are never overwritten.
    pub fn resolve_locals(&mut self, locals: Locals) {
        debug!("Recording {} resolved locals", locals.len());

        self.locals.extend(locals);
    }

    /// Names currently bound in the global scope, natives included.
    pub fn global_names(&self) -> Vec<String> {
        self.globals.borrow().names().map(str::to_owned).collect()
    }

    /// Run a program.  The first runtime error aborts the rest.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        info!("Interpreting {} statements", statements.len());

        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                // The resolver rejects top-level `return`, so this is a bug.
                warn!("Return of {} escaped to top level; stopping", value);
                break;
            }
        }

        info!("Interpretation completed successfully");

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────

    pub fn execute(&mut self, stmt: &Stmt) -> Result<Flow> {
        ensure_sufficient_stack(|| self.execute_stmt(stmt))
    }

    fn execute_stmt(&mut self, stmt: &Stmt) -> Result<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;
                writeln!(self.output, "{}", value)?;
                debug!("Printed value: {}", value);
                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Defining variable '{}' = {}", name.lexeme, value);
                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let env: EnvRef = Environment::child_of(&self.environment);
                self.execute_block(statements, env)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if is_truthy(&self.evaluate(condition)?) {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while is_truthy(&self.evaluate(condition)?) {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::Function(decl) => {
                let function = LoxFunction::new(Rc::clone(decl), Rc::clone(&self.environment), false);

                info!(
                    "Function '{}' defined with {} parameters",
                    decl.name.lexeme,
                    decl.params.len()
                );

                self.environment.borrow_mut().define(
                    &decl.name.lexeme,
                    Value::Callable(Callable::Function(Rc::new(function))),
                );
                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Returning value: {}", value);
                Ok(Flow::Return(value))
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                self.define_class(name, superclass.as_ref(), methods)?;
                Ok(Flow::Normal)
            }
        }
    }

    /// Run `statements` in `env`, restoring the current scope afterwards on
    /// every path (normal completion, `return`, or error).
    pub fn execute_block(&mut self, statements: &[Stmt], env: EnvRef) -> Result<Flow> {
        let previous: EnvRef = std::mem::replace(&mut self.environment, env);

        let result = self.execute_all(statements);

        self.environment = previous;

        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> Result<Flow> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    fn define_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> Result<()> {
        // Bound first so methods can refer to the class by name.
        self.environment.borrow_mut().define(&name.lexeme, Value::Nil);

        let superclass: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Callable(Callable::Class(class)) => Some(class),
                _ => {
                    let at: &Token = match expr {
                        Expr::Variable { name, .. } => name,
                        _ => name,
                    };
                    return Err(LoxError::runtime(at, "Superclass must be a class."));
                }
            },
            None => None,
        };

        let method_env: EnvRef = match &superclass {
            Some(superclass) => {
                let env: EnvRef = Environment::child_of(&self.environment);
                env.borrow_mut().define(
                    "super",
                    Value::Callable(Callable::Class(Rc::clone(superclass))),
                );
                env
            }
            None => Rc::clone(&self.environment),
        };

        let methods: HashMap<String, Rc<LoxFunction>> = methods
            .iter()
            .map(|decl| {
                let is_initializer: bool = decl.name.lexeme == "init";
                let method = LoxFunction::new(Rc::clone(decl), Rc::clone(&method_env), is_initializer);
                (decl.name.lexeme.clone(), Rc::new(method))
            })
            .collect();

        info!("Class '{}' defined with {} methods", name.lexeme, methods.len());

        let class = LoxClass::new(name.lexeme.clone(), superclass, methods);

        self.environment
            .borrow_mut()
            .assign(name, Value::Callable(Callable::Class(Rc::new(class))))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        ensure_sufficient_stack(|| self.evaluate_expr(expr))
    }

    fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left: Value = self.evaluate(left)?;

                let short_circuits: bool = if operator.token_type == TokenType::OR {
                    is_truthy(&left)
                } else {
                    !is_truthy(&left)
                };

                if short_circuits {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value: Value = self.evaluate(value)?;

                match self.locals.get(id).copied() {
                    Some(distance) => {
                        Environment::assign_at(&self.environment, distance, name, value.clone())?
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                debug!("Assigned {} to '{}'", value, name.lexeme);
                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee: Value = self.evaluate(callee)?;

                let mut values: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }

                let Value::Callable(callable) = callee else {
                    return Err(LoxError::runtime(
                        paren,
                        "Can only call functions and classes.",
                    ));
                };

                if values.len() != callable.arity() {
                    return Err(LoxError::runtime(
                        paren,
                        format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            values.len()
                        ),
                    ));
                }

                self.call(&callable, paren, values)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => LoxInstance::get(&instance, name),
                _ => Err(LoxError::runtime(name, "Only instances have properties.")),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(LoxError::runtime(name, "Only instances have fields."));
                };

                let value: Value = self.evaluate(value)?;
                instance.borrow_mut().set(name, value.clone());
                Ok(value)
            }

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),
        }
    }

    /// Every Lox-level call passes through here; the depth limit turns
    /// runaway recursion into a runtime error.
    fn call(&mut self, callable: &Callable, paren: &Token, arguments: Vec<Value>) -> Result<Value> {
        if self.call_depth >= MAX_CALL_DEPTH {
            warn!("Call depth limit {} reached at line {}", MAX_CALL_DEPTH, paren.line);
            return Err(LoxError::runtime(paren, "Stack overflow."));
        }

        self.call_depth += 1;
        let result = callable.call(self, paren, arguments);
        self.call_depth -= 1;

        result
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> Result<Value> {
        let right: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(LoxError::runtime(operator, "Operand must be a number.")),
            },
            TokenType::BANG => Ok(Value::Bool(!is_truthy(&right))),
            _ => Err(LoxError::runtime(operator, "Invalid unary operator.")),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left: Value = self.evaluate(left)?;
        let right: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::PLUS => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(LoxError::runtime(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenType::MINUS => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(a - b))
            }

            TokenType::STAR => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(a * b))
            }

            // IEEE semantics: x / 0 is ±Infinity (or NaN), not an error.
            TokenType::SLASH => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(a / b))
            }

            TokenType::GREATER => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a > b))
            }

            TokenType::GREATER_EQUAL => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a >= b))
            }

            TokenType::LESS => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a < b))
            }

            TokenType::LESS_EQUAL => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Bool(a <= b))
            }

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(is_equal(&left, &right))),

            TokenType::BANG_EQUAL => Ok(Value::Bool(!is_equal(&left, &right))),

            _ => Err(LoxError::runtime(operator, "Invalid binary operator.")),
        }
    }

    /// `super.method`: the method comes from the superclass captured when the
    /// class was declared, `this` from the scope just inside it.
    fn evaluate_super(&mut self, id: ExprId, keyword: &Token, method: &Token) -> Result<Value> {
        let distance: usize = self
            .locals
            .get(&id)
            .copied()
            .ok_or_else(|| LoxError::runtime(keyword, "Unresolved 'super'."))?;

        let superclass: Rc<LoxClass> = match Environment::get_at(&self.environment, distance, keyword)? {
            Value::Callable(Callable::Class(class)) => class,
            _ => return Err(LoxError::runtime(keyword, "Superclass must be a class.")),
        };

        let this = Token::synthetic("this", keyword.line);
        let this_distance: usize = distance
            .checked_sub(1)
            .ok_or_else(|| LoxError::runtime(keyword, "Unresolved 'this'."))?;

        let Value::Instance(object) = Environment::get_at(&self.environment, this_distance, &this)?
        else {
            return Err(LoxError::runtime(keyword, "'this' is not an instance."));
        };

        let method: Rc<LoxFunction> = superclass.find_method(&method.lexeme).ok_or_else(|| {
            LoxError::runtime(method, format!("Undefined property '{}'.", method.lexeme))
        })?;

        Ok(Value::Callable(Callable::Function(Rc::new(method.bind(object)))))
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> Result<Value> {
        match self.locals.get(&id) {
            Some(&distance) => Environment::get_at(&self.environment, distance, name),
            None => self.globals.borrow().get(name),
        }
    }
}

/// Both operands must be numbers; either one failing is an error.
fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
    }
}
