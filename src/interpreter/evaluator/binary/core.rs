use crate::{
    ast::{Node, Operator},
    error::RuntimeError,
    interpreter::evaluator::core::{EvalResult, Interpreter},
};

impl Interpreter {
    /// Evaluates a binary operation between two resolved values.
    ///
    /// Arithmetic operators go to `eval_arithmetic`, `^` to `eval_pow`,
    /// equality and ordering to `eval_comparison` and `&&`/`||` to
    /// `eval_logic`. Assignment never reaches this point, it is handled by the
    /// postfix evaluator before its target is resolved.
    ///
    /// # Errors
    /// - `InvalidOperandType` for operands the operator does not accept, and
    ///   for `->` outside a `for` header.
    ///
    /// # Example
    /// ```
    /// use blast::{
    ///     ast::{Node, Operator},
    ///     interpreter::evaluator::core::Interpreter,
    /// };
    ///
    /// let interpreter = Interpreter::new();
    /// let result = interpreter.eval_binary(Operator::Add, &Node::from("a"), &Node::Number(1.0), 1);
    ///
    /// assert_eq!(result.unwrap(), Node::from("a1"));
    /// ```
    pub fn eval_binary(&self,
                       op: Operator,
                       left: &Node,
                       right: &Node,
                       line: usize)
                       -> EvalResult<Node> {
        use Operator::{
            Add, And, Arrow, Assign, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul,
            NotEqual, Or, Pow, Sub,
        };

        match op {
            Add | Sub | Mul | Div => self.eval_arithmetic(op, left, right, line),
            Pow => Self::eval_pow(left, right, line),
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
                Self::eval_comparison(op, left, right, line)
            },
            And | Or => Self::eval_logic(op, left, right, line),
            Assign | Arrow => {
                Err(RuntimeError::InvalidOperandType { details: format!("'{op}' cannot be used here"),
                                                       line })
            },
        }
    }
}

/// Human readable name of a value's type, for error messages.
#[must_use]
pub const fn type_name(value: &Node) -> &'static str {
    match value {
        Node::Number(_) => "number",
        Node::Boolean(_) => "boolean",
        Node::String(_) => "string",
        Node::Nil => "nil",
        Node::Variable(_) => "variable",
        Node::FunctionCall(_) => "function",
        Node::Operator(_)
        | Node::Paren(_)
        | Node::Comma
        | Node::Reserved(_)
        | Node::ArgCount(_) => "symbol",
    }
}

/// Coerces an operand to a number. Booleans count as 1 and 0.
///
/// # Errors
/// `InvalidOperandType` for any other kind of value.
pub fn numeric_operand(op: Operator, value: &Node, line: usize) -> EvalResult<f64> {
    match value {
        Node::Number(n) => Ok(*n),
        Node::Boolean(b) => Ok(f64::from(u8::from(*b))),
        other => Err(operand_error(op, other, line)),
    }
}

/// The error for an operator applied to a value it does not accept.
#[must_use]
pub fn operand_error(op: Operator, value: &Node, line: usize) -> RuntimeError {
    let shown = match value {
        Node::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    };
    RuntimeError::InvalidOperandType { details: format!("'{op}' cannot be applied to the {} {shown}",
                                                        type_name(value)),
                                       line }
}
