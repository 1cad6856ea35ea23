use crate::{
    ast::{Node, Operator},
    interpreter::evaluator::{
        binary::core::numeric_operand,
        core::{EvalResult, Interpreter},
    },
};

impl Interpreter {
    /// Evaluates an exponentiation operation with `f64::powf`.
    ///
    /// Negative and fractional exponents are supported. A negative base with a
    /// fractional exponent gives NaN.
    ///
    /// # Example
    /// ```
    /// use blast::{ast::Node, interpreter::evaluator::core::Interpreter};
    ///
    /// let result = Interpreter::eval_pow(&Node::Number(2.0), &Node::Number(10.0), 1).unwrap();
    /// assert_eq!(result, Node::Number(1024.0));
    ///
    /// let result = Interpreter::eval_pow(&Node::Number(4.0), &Node::Number(-0.5), 1).unwrap();
    /// assert_eq!(result, Node::Number(0.5));
    /// ```
    pub fn eval_pow(base: &Node, exponent: &Node, line: usize) -> EvalResult<Node> {
        let base = numeric_operand(Operator::Pow, base, line)?;
        let exponent = numeric_operand(Operator::Pow, exponent, line)?;
        Ok(Node::Number(base.powf(exponent)))
    }
}
