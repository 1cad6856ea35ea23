use std::{
    io::{self, Write},
    rc::Rc,
    time::Duration,
};

use tracing::debug;

use crate::{
    ast::{Expression, Node},
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        evaluator::{
            function::core::{BUILTIN_TABLE, Function},
            scope::ScopeStack,
        },
        parser::{
            block::{FunctionDeclaration, parse_program},
            line::{Line, LineKind},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 128;
/// Default timeout of the requests made by `get`.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Default limit, in bytes, on strings built by `+` and `*`.
pub const DEFAULT_MAX_STRING_LEN: usize = 64 * 1024 * 1024;

/// Tunable limits of an [`Interpreter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Deepest allowed nesting of user function calls.
    pub max_call_depth: usize,
    /// Timeout of HTTP requests. `None` waits indefinitely.
    pub http_timeout:   Option<Duration>,
    /// Longest string, in bytes, that concatenation or repetition may build.
    pub max_string_len: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { max_call_depth: DEFAULT_MAX_CALL_DEPTH,
               http_timeout:   Some(DEFAULT_HTTP_TIMEOUT),
               max_string_len: DEFAULT_MAX_STRING_LEN, }
    }
}

/// Stores the runtime state of a session.
///
/// An interpreter owns its scope chain, its function table and its output
/// sink. Variables and functions persist across calls to [`evaluate`] and
/// [`run`], so a REPL simply keeps one interpreter alive for the whole
/// session. Independent interpreters share nothing.
///
/// [`evaluate`]: Interpreter::evaluate
/// [`run`]: Interpreter::run
pub struct Interpreter {
    pub scopes:            ScopeStack,
    pub(crate) config:     InterpreterConfig,
    pub(crate) call_depth: usize,
    pub(crate) output:     Box<dyn Write>,
    pub(crate) http:       ureq::Agent,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter with the default configuration, writing to
    /// stdout. Built-in functions are registered before anything runs.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    /// Creates an interpreter with the given configuration.
    #[must_use]
    pub fn with_config(config: InterpreterConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        let mut scopes = ScopeStack::new();
        for builtin in BUILTIN_TABLE {
            scopes.set_function(builtin.name, Rc::new(Function::Builtin(*builtin)));
        }

        Self { scopes,
               config,
               call_depth: 0,
               output: Box::new(io::stdout()),
               http: builder.build() }
    }

    /// Redirects the output of `print` and `println`.
    #[must_use]
    pub fn with_output<W>(mut self, output: W) -> Self
        where W: Write + 'static
    {
        self.output = Box::new(output);
        self
    }

    /// The configuration this interpreter was built with.
    #[must_use]
    pub const fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Evaluates a single line and returns the display form of its value.
    ///
    /// Blank and comment lines evaluate to an empty string. A leading
    /// `return` is accepted and ignored.
    ///
    /// # Errors
    /// - Any lexical or runtime error of the line.
    /// - `BlockStatementInExpression` for `if`, `for` and `function` lines,
    ///   which need a whole program (see [`Interpreter::run`]).
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::evaluator::core::Interpreter;
    ///
    /// let mut interpreter = Interpreter::new();
    /// assert_eq!(interpreter.evaluate("x = 2 + 2").unwrap(), "4");
    /// assert_eq!(interpreter.evaluate("x + 2").unwrap(), "6");
    /// assert_eq!(interpreter.evaluate("3 * \"lol\"").unwrap(), "lollollol");
    /// ```
    pub fn evaluate(&mut self, source: &str) -> Result<String, Error> {
        const LINE: usize = 1;

        let Line { kind, nodes, .. } = Line::parse(source, LINE)?;
        match kind {
            LineKind::Blank => Ok(String::new()),
            LineKind::Basic | LineKind::Return => {
                let expression = Expression::new(nodes, LINE)?;
                Ok(self.eval_expression(&expression, LINE)?.to_string())
            },
            LineKind::Else => Err(ParseError::UnexpectedElse { details:
                                                                   "'else' is only allowed inside an 'if' block".to_string(),
                                                               line:    LINE, }.into()),
            LineKind::End => Err(ParseError::UnexpectedEnd { line: LINE }.into()),
            LineKind::If | LineKind::For | LineKind::Function => {
                let keyword = kind.keyword().unwrap_or_default().to_string();
                Err(ParseError::BlockStatementInExpression { keyword,
                                                             line: LINE }.into())
            },
        }
    }

    /// Runs a whole program.
    ///
    /// Every function declared anywhere in the program is registered first,
    /// then the top-level statements run in order. A top-level `return` stops
    /// the program early.
    ///
    /// # Returns
    /// The value of the last statement executed, or of the `return`.
    ///
    /// # Errors
    /// The first lexical, structural or runtime error. Nothing runs when the
    /// program does not parse.
    ///
    /// # Example
    /// ```
    /// use blast::{ast::Node, interpreter::evaluator::core::Interpreter};
    ///
    /// let mut interpreter = Interpreter::new();
    /// let source = "function f(a, b = a + 1)\nreturn b\nend\nf(10)";
    ///
    /// assert_eq!(interpreter.run(source).unwrap(), Node::Number(11.0));
    /// ```
    pub fn run(&mut self, source: &str) -> Result<Node, Error> {
        let program = parse_program(source)?;
        debug!(statements = program.root.children.len(),
               functions = program.functions.len(),
               "running program");

        for function in program.functions {
            self.register_function(function)?;
        }

        Ok(self.run_children(&program.root.children)?.into_value())
    }

    /// Adds a user function to the function table.
    ///
    /// # Errors
    /// `BuiltinFunctionRedefinition` when the name belongs to a built-in.
    pub fn register_function(&mut self, function: FunctionDeclaration) -> EvalResult<()> {
        self.validate_function_name(function.name(), function.body.line)?;
        debug!(name = function.name(),
               params = function.header.params.len(),
               line = function.body.line,
               "registering function");

        let name = function.name().to_string();
        self.scopes.set_function(&name, Rc::new(Function::User(function)));
        Ok(())
    }

    /// Runs `body` in a fresh innermost frame, popping it on every path.
    pub(crate) fn scoped<T, F>(&mut self, body: F) -> EvalResult<T>
        where F: FnOnce(&mut Self) -> EvalResult<T>
    {
        self.scopes.push();
        let result = body(self);
        self.scopes.pop();
        result
    }
}
