use crate::{
    ast::{Node, Operator},
    interpreter::evaluator::{
        binary::core::{numeric_operand, operand_error},
        core::{EvalResult, Interpreter},
    },
};

impl Interpreter {
    /// Evaluates `&&` and `||`.
    ///
    /// Both operands are coerced to numbers and count as true when non-zero.
    /// Both sides are always evaluated.
    ///
    /// # Example
    /// ```
    /// use blast::{
    ///     ast::{Node, Operator},
    ///     interpreter::evaluator::core::Interpreter,
    /// };
    ///
    /// let result = Interpreter::eval_logic(Operator::Or, &Node::Number(0.0), &Node::Boolean(true), 1);
    /// assert_eq!(result.unwrap(), Node::Boolean(true));
    /// ```
    pub fn eval_logic(op: Operator, left: &Node, right: &Node, line: usize) -> EvalResult<Node> {
        let a = numeric_operand(op, left, line)? != 0.0;
        let b = numeric_operand(op, right, line)? != 0.0;

        match op {
            Operator::And => Ok(Node::Boolean(a && b)),
            Operator::Or => Ok(Node::Boolean(a || b)),
            _ => Err(operand_error(op, left, line)),
        }
    }
}
