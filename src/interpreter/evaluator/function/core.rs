use std::fmt;

use tracing::trace;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::{builtin, http, min_max, print},
        },
        parser::block::FunctionDeclaration,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the interpreter, the evaluated arguments in call order
/// and the line number. It returns a native value that is converted back into
/// a node.
pub type BuiltinFn = fn(&mut Interpreter, &[Node], usize) -> EvalResult<NativeValue>;

/// What a builtin hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Node(Node),
    /// No value. Becomes `nil`.
    Unit,
}

impl From<NativeValue> for Node {
    fn from(value: NativeValue) -> Self {
        match value {
            NativeValue::Number(n) => Self::Number(n),
            NativeValue::Text(s) => Self::String(s),
            NativeValue::Bool(b) => Self::Boolean(b),
            NativeValue::Node(node) => node,
            NativeValue::Unit => Self::Nil,
        }
    }
}

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `AtLeast(n)` means the builtin takes `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// A function implemented in Rust.
#[derive(Clone, Copy)]
pub struct BuiltinFunction {
    pub name:  &'static str,
    pub arity: Arity,
    func:      BuiltinFn,
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinFunction")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// Anything that can be called by name.
#[derive(Debug)]
pub enum Function {
    User(FunctionDeclaration),
    Builtin(BuiltinFunction),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (registered into every new interpreter),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub(crate) static BUILTIN_TABLE: &[BuiltinFunction] = &[
            $(
                BuiltinFunction { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"   => { arity: Arity::AtLeast(0), func: print::print },
    "println" => { arity: Arity::AtLeast(0), func: print::println },
    "max"     => { arity: Arity::AtLeast(1), func: |_, args, line| min_max::min_max("max", args, line) },
    "min"     => { arity: Arity::AtLeast(1), func: |_, args, line| min_max::min_max("min", args, line) },
    "abs"     => { arity: Arity::Exact(1), func: builtin::abs },
    "modulus" => { arity: Arity::Exact(2), func: builtin::modulus },
    "get"     => { arity: Arity::Exact(1), func: http::get },
}

impl Interpreter {
    /// Calls a function by name with evaluated arguments.
    ///
    /// # Errors
    /// - `UnboundFunction` for an unknown name.
    /// - `ArgumentCountMismatch` when a builtin gets a wrong number of
    ///   arguments.
    /// - `StackOverflow` past the configured call depth.
    /// - Any error raised by the function itself.
    pub fn call_function(&mut self, name: &str, args: Vec<Node>, line: usize) -> EvalResult<Node> {
        let function = self.scopes.get_function(name, line)?;

        match &*function {
            Function::Builtin(builtin) => {
                if !builtin.arity.check(args.len()) {
                    return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                                     expected: builtin.arity.to_string(),
                                                                     found:    args.len(),
                                                                     line });
                }
                Ok((builtin.func)(self, &args, line)?.into())
            },
            Function::User(declaration) => self.call_user_function(declaration, args, line),
        }
    }

    /// Executes a user-defined function.
    ///
    /// Parameters are bound positionally in a new frame. A parameter without
    /// an argument takes its default, evaluated in that frame so it can refer
    /// to earlier parameters, or `nil` when it has none. Extra arguments are
    /// ignored.
    ///
    /// # Returns
    /// The value of the `return` that ended the body, or of its last
    /// statement.
    fn call_user_function(&mut self,
                          declaration: &FunctionDeclaration,
                          args: Vec<Node>,
                          line: usize)
                          -> EvalResult<Node> {
        let name = declaration.name();
        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::StackOverflow { name: name.to_string(),
                                                     depth: self.call_depth + 1,
                                                     line });
        }

        self.call_depth += 1;
        trace!(function = name, depth = self.call_depth, "call");

        let result = self.scoped(|interpreter| {
                             let mut args = args.into_iter();
                             for param in &declaration.header.params {
                                 let value = match (args.next(), &param.default) {
                                     (Some(value), _) => value,
                                     (None, Some(default)) => {
                                         interpreter.eval_expression(default, declaration.body.line)?
                                     },
                                     (None, None) => Node::Nil,
                                 };
                                 interpreter.scopes.define_variable(&param.name, value);
                             }
                             Ok(interpreter.run_children(&declaration.body.children)?
                                           .into_value())
                         });

        trace!(function = name, depth = self.call_depth, ok = result.is_ok(), "return");
        self.call_depth -= 1;
        result
    }

    /// Ensures that a user-defined function name is valid.
    ///
    /// Redeclaring a user function replaces it, but the name of a builtin
    /// cannot be taken.
    ///
    /// # Errors
    /// `BuiltinFunctionRedefinition` for builtin names.
    pub fn validate_function_name(&self, name: &str, line: usize) -> EvalResult<()> {
        if BUILTIN_FUNCTIONS.contains(&name) {
            return Err(RuntimeError::BuiltinFunctionRedefinition { name: name.to_string(),
                                                                   line });
        }
        Ok(())
    }
}

/// Reads a numeric argument of a builtin. Booleans count as 1 and 0.
///
/// # Errors
/// `InvalidArgument` for strings and `nil`.
pub fn number_argument(function: &str, arg: &Node, line: usize) -> EvalResult<f64> {
    match arg {
        Node::Number(n) => Ok(*n),
        Node::Boolean(b) => Ok(f64::from(u8::from(*b))),
        other => Err(RuntimeError::InvalidArgument { details: format!("'{function}' expects numbers, got '{other}'"),
                                                     line }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, interpreter::evaluator::core::InterpreterConfig};

    #[test]
    fn defaults_may_use_earlier_parameters() {
        let mut interpreter = Interpreter::new();
        let source = "function f(a, b = a + 1)\nreturn b\nend";
        interpreter.run(source).unwrap();

        assert_eq!(interpreter.evaluate("f(10)").unwrap(), "11");
        assert_eq!(interpreter.evaluate("f(10, 3)").unwrap(), "3");
    }

    #[test]
    fn missing_arguments_are_nil() {
        let mut interpreter = Interpreter::new();
        interpreter.run("function f(a)\nreturn a\nend").unwrap();

        assert_eq!(interpreter.evaluate("f()").unwrap(), "nil");
        assert_eq!(interpreter.evaluate("f(1, 2, 3)").unwrap(), "1");
    }

    #[test]
    fn parameters_shadow_outer_variables() {
        let mut interpreter = Interpreter::new();
        interpreter.run("a = 1\nfunction f(a)\na = a * 10\nreturn a\nend").unwrap();

        assert_eq!(interpreter.evaluate("f(5)").unwrap(), "50");
        assert_eq!(interpreter.evaluate("a").unwrap(), "1");
    }

    #[test]
    fn builtin_arity_is_checked() {
        let mut interpreter = Interpreter::new();
        let err = interpreter.evaluate("abs(1, 2)").unwrap_err();

        assert_eq!(err.to_string(), "Error on line 1: 'abs' expects exactly 1 argument(s) but got 2.");
        assert!(interpreter.evaluate("max()").is_err());
    }

    #[test]
    fn builtins_cannot_be_redefined() {
        let mut interpreter = Interpreter::new();
        let err = interpreter.run("x = 1\nfunction max(a)\nreturn a\nend").unwrap_err();

        assert!(matches!(err,
                         Error::Runtime(RuntimeError::BuiltinFunctionRedefinition { line: 2, .. })));
    }

    #[test]
    fn user_functions_can_be_replaced() {
        let mut interpreter = Interpreter::new();
        interpreter.run("function f()\nreturn 1\nend").unwrap();
        interpreter.run("function f()\nreturn 2\nend").unwrap();

        assert_eq!(interpreter.evaluate("f()").unwrap(), "2");
    }

    #[test]
    fn unknown_functions_are_unbound() {
        let mut interpreter = Interpreter::new();
        let err = interpreter.evaluate("nope(1)").unwrap_err();

        assert!(matches!(err, Error::Runtime(RuntimeError::UnboundFunction { .. })));
    }

    #[test]
    fn runaway_recursion_overflows() {
        let config = InterpreterConfig { max_call_depth: 16,
                                         ..InterpreterConfig::default() };
        let mut interpreter = Interpreter::with_config(config);
        interpreter.run("function down(n)\nreturn down(n + 1)\nend").unwrap();

        let err = interpreter.evaluate("down(0)").unwrap_err();
        assert!(matches!(err,
                         Error::Runtime(RuntimeError::StackOverflow { depth: 17, .. })),
                "{err}");
        assert_eq!(interpreter.scopes.depth(), 1);
        assert_eq!(interpreter.call_depth, 0);
    }
}
