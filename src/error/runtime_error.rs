use thiserror::Error;

/// Represents all errors that can occur during evaluation and runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Tried to read a variable that is not bound in any visible scope.
    #[error("Error on line {line}: Unbound variable '{name}'.")]
    UnboundVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that is neither built in nor declared.
    #[error("Error on line {line}: Unbound function '{name}'.")]
    UnboundFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operator was applied to operands it does not support.
    #[error("Error on line {line}: Invalid operand type: {details}.")]
    InvalidOperandType {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The left-hand side of `=` is not a variable.
    #[error("Error on line {line}: Cannot assign to '{target}', only variables can be assigned.")]
    AssignmentTarget {
        /// Display form of the node that was used as a target.
        target: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// An operator did not find both of its operands.
    #[error("Error on line {line}: Operator '{operator}' is missing an operand.")]
    MissingOperand {
        /// The operator symbol.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A built-in function was called with the wrong number of arguments.
    #[error("Error on line {line}: '{name}' expects {expected} argument(s) but got {found}.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Human readable description of the accepted counts.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// User function calls nested deeper than the configured limit.
    #[error("Error on line {line}: Stack overflow while calling '{name}' (call depth {depth}).")]
    StackOverflow {
        /// The function whose call exceeded the limit.
        name:  String,
        /// The depth that was reached.
        depth: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A `for` header evaluated to bounds or a step that cannot be iterated.
    #[error("Error on line {line}: Invalid loop bounds: {details}.")]
    InvalidLoopBounds {
        /// Details describing why the bounds are invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An argument was out of the range a function accepts.
    #[error("Error on line {line}: Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Integer remainder by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted to declare a function with the name of a built-in.
    #[error("Error on line {line}: Cannot redefine built-in function '{name}'.")]
    BuiltinFunctionRedefinition {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The HTTP request made by `get` failed.
    #[error("Error on line {line}: Request to '{url}' failed: {details}.")]
    Request {
        /// The requested URL.
        url:     String,
        /// The transport or status failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Writing to the output sink failed.
    #[error("Error on line {line}: Could not write output: {details}.")]
    Output {
        /// The underlying I/O failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}
