use crate::{
    ast::{Node, Operator},
    error::RuntimeError,
    interpreter::evaluator::{
        binary::core::numeric_operand,
        core::{EvalResult, Interpreter},
    },
};

/// Equality as used by `==` and `!=`.
///
/// Strings compare by text, and a string never equals a non-string. `nil`
/// equals only `nil`. Everything else compares numerically, with booleans as
/// 1 and 0.
#[allow(clippy::float_cmp)]
fn values_equal(left: &Node, right: &Node, line: usize) -> EvalResult<bool> {
    match (left, right) {
        (Node::String(a), Node::String(b)) => Ok(a == b),
        (Node::String(_), _) | (_, Node::String(_)) => Ok(false),
        (Node::Nil, Node::Nil) => Ok(true),
        (Node::Nil, _) | (_, Node::Nil) => Ok(false),
        _ => {
            let a = numeric_operand(Operator::Equal, left, line)?;
            let b = numeric_operand(Operator::Equal, right, line)?;
            Ok(a == b)
        },
    }
}

impl Interpreter {
    /// Evaluates a comparison of the form `Node <Operator> Node`.
    ///
    /// `==` and `!=` never fail on well-formed values. Ordering operators
    /// coerce both operands to numbers.
    ///
    /// # Returns
    /// A `Node::Boolean`.
    ///
    /// # Errors
    /// `InvalidOperandType` when an ordering operator meets a string or `nil`.
    ///
    /// # Example
    /// ```
    /// use blast::{
    ///     ast::{Node, Operator},
    ///     interpreter::evaluator::core::Interpreter,
    /// };
    ///
    /// let equal = Interpreter::eval_comparison(Operator::Equal,
    ///                                          &Node::from("1"),
    ///                                          &Node::Number(1.0),
    ///                                          1);
    /// assert_eq!(equal.unwrap(), Node::Boolean(false));
    ///
    /// let less = Interpreter::eval_comparison(Operator::Less,
    ///                                         &Node::Boolean(false),
    ///                                         &Node::Number(0.5),
    ///                                         1);
    /// assert_eq!(less.unwrap(), Node::Boolean(true));
    /// ```
    pub fn eval_comparison(op: Operator,
                           left: &Node,
                           right: &Node,
                           line: usize)
                           -> EvalResult<Node> {
        if matches!(op, Operator::Equal | Operator::NotEqual) {
            let equal = values_equal(left, right, line)?;
            return Ok(Node::Boolean(equal == (op == Operator::Equal)));
        }

        let a = numeric_operand(op, left, line)?;
        let b = numeric_operand(op, right, line)?;
        let result = match op {
            Operator::Less => a < b,
            Operator::LessEqual => a <= b,
            Operator::Greater => a > b,
            Operator::GreaterEqual => a >= b,
            _ => {
                return Err(RuntimeError::InvalidOperandType { details: format!("'{op}' is not a comparison"),
                                                              line });
            },
        };
        Ok(Node::Boolean(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(op: Operator, left: Node, right: Node) -> EvalResult<Node> {
        Interpreter::eval_comparison(op, &left, &right, 1)
    }

    #[test]
    fn equality_rules() {
        let cases = [(Node::from("a"), Node::from("a"), true),
                     (Node::from("a"), Node::from("b"), false),
                     (Node::from("1"), Node::Number(1.0), false),
                     (Node::Boolean(true), Node::Number(1.0), true),
                     (Node::Nil, Node::Nil, true),
                     (Node::Nil, Node::Number(0.0), false),
                     (Node::Number(0.1 + 0.2), Node::Number(0.3), false)];

        for (left, right, expected) in cases {
            assert_eq!(compare(Operator::Equal, left.clone(), right.clone()).unwrap(),
                       Node::Boolean(expected),
                       "{left} == {right}");
            assert_eq!(compare(Operator::NotEqual, left.clone(), right.clone()).unwrap(),
                       Node::Boolean(!expected),
                       "{left} != {right}");
        }
    }

    #[test]
    fn ordering_needs_numbers() {
        assert_eq!(compare(Operator::GreaterEqual, Node::Number(2.0), Node::Number(2.0)).unwrap(),
                   Node::Boolean(true));
        assert!(compare(Operator::Less, Node::from("a"), Node::from("b")).is_err());
        assert!(compare(Operator::Greater, Node::Nil, Node::Number(1.0)).is_err());
    }
}
