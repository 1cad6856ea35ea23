use crate::{
    ast::{Node, Operator},
    error::RuntimeError,
    interpreter::evaluator::{
        binary::core::{numeric_operand, operand_error},
        core::{EvalResult, Interpreter},
    },
    util::num::floor_to_count,
};

impl Interpreter {
    /// Evaluates `+`, `-`, `*` and `/`.
    ///
    /// - `+` concatenates display forms as soon as one side is a string.
    /// - `*` with one string and one number repeats the string
    ///   `floor(number)` times.
    /// - Otherwise both operands must be numeric. Division follows IEEE 754, so
    ///   dividing by zero gives an infinity or NaN.
    ///
    /// Strings built by `+` and `*` are limited to
    /// `InterpreterConfig::max_string_len` bytes.
    ///
    /// # Errors
    /// - `InvalidOperandType` for strings in `-` and `/`, two strings in `*`,
    ///   and `nil` anywhere.
    /// - `InvalidArgument` when the resulting string would exceed the limit or
    ///   cannot be allocated.
    ///
    /// # Example
    /// ```
    /// use blast::{
    ///     ast::{Node, Operator},
    ///     interpreter::evaluator::core::Interpreter,
    /// };
    ///
    /// let interpreter = Interpreter::new();
    ///
    /// let repeated =
    ///     interpreter.eval_arithmetic(Operator::Mul, &Node::Number(3.0), &Node::from("lol"), 1);
    /// assert_eq!(repeated.unwrap(), Node::from("lollollol"));
    ///
    /// let difference =
    ///     interpreter.eval_arithmetic(Operator::Sub, &Node::from("lol"), &Node::Number(1.0), 1);
    /// assert!(difference.is_err());
    ///
    /// let huge =
    ///     interpreter.eval_arithmetic(Operator::Mul, &Node::from("ab"), &Node::Number(1e15), 1);
    /// assert!(huge.is_err());
    /// ```
    pub fn eval_arithmetic(&self,
                           op: Operator,
                           left: &Node,
                           right: &Node,
                           line: usize)
                           -> EvalResult<Node> {
        match (op, left, right) {
            (Operator::Add, Node::String(_), _) | (Operator::Add, _, Node::String(_)) => {
                self.concatenate(left, right, line)
            },
            (Operator::Mul, Node::String(text), count) | (Operator::Mul, count, Node::String(text))
                if !matches!(count, Node::String(_)) =>
            {
                let count = floor_to_count(numeric_operand(op, count, line)?, line)?;
                self.repeat(text, count, line)
            },
            _ => {
                let a = numeric_operand(op, left, line)?;
                let b = numeric_operand(op, right, line)?;
                let value = match op {
                    Operator::Add => a + b,
                    Operator::Sub => a - b,
                    Operator::Mul => a * b,
                    Operator::Div => a / b,
                    _ => return Err(operand_error(op, left, line)),
                };
                Ok(Node::Number(value))
            },
        }
    }

    fn concatenate(&self, left: &Node, right: &Node, line: usize) -> EvalResult<Node> {
        let (left, right) = (left.to_string(), right.to_string());

        let mut text = self.reserve_string(left.len().checked_add(right.len()), line)?;
        text.push_str(&left);
        text.push_str(&right);
        Ok(Node::String(text))
    }

    fn repeat(&self, text: &str, count: usize, line: usize) -> EvalResult<Node> {
        if text.is_empty() {
            return Ok(Node::String(String::new()));
        }

        let mut repeated = self.reserve_string(text.len().checked_mul(count), line)?;
        for _ in 0..count {
            repeated.push_str(text);
        }
        Ok(Node::String(repeated))
    }

    /// Allocates an empty string with room for `len` bytes.
    ///
    /// `None` stands for a length that overflowed `usize`. Lengths over the
    /// configured limit and failed allocations are errors.
    fn reserve_string(&self, len: Option<usize>, line: usize) -> EvalResult<String> {
        let limit = self.config.max_string_len;
        let Some(len) = len.filter(|len| *len <= limit) else {
            let details = format!("the resulting string would be longer than {limit} bytes");
            return Err(RuntimeError::InvalidArgument { details, line });
        };

        let mut text = String::new();
        text.try_reserve_exact(len)
            .map_err(|e| RuntimeError::InvalidArgument { details: format!("cannot allocate a string of {len} bytes: {e}"),
                                                         line })?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::core::InterpreterConfig;

    fn arith(op: Operator, left: Node, right: Node) -> EvalResult<Node> {
        Interpreter::new().eval_arithmetic(op, &left, &right, 1)
    }

    fn limited(max_string_len: usize) -> Interpreter {
        Interpreter::with_config(InterpreterConfig { max_string_len,
                                                     ..InterpreterConfig::default() })
    }

    #[test]
    fn concatenation_uses_display_forms() {
        assert_eq!(arith(Operator::Add, Node::from("a"), Node::Number(1.0)).unwrap(),
                   Node::from("a1"));
        assert_eq!(arith(Operator::Add, Node::Number(2.5), Node::from("x")).unwrap(),
                   Node::from("2.5x"));
        assert_eq!(arith(Operator::Add, Node::from("is "), Node::Boolean(true)).unwrap(),
                   Node::from("is true"));
        assert_eq!(arith(Operator::Add, Node::from("n"), Node::Nil).unwrap(),
                   Node::from("nnil"));
    }

    #[test]
    fn repetition_floors_the_count() {
        assert_eq!(arith(Operator::Mul, Node::from("ab"), Node::Number(2.9)).unwrap(),
                   Node::from("abab"));
        assert_eq!(arith(Operator::Mul, Node::Number(0.0), Node::from("ab")).unwrap(),
                   Node::from(""));
        assert!(arith(Operator::Mul, Node::from("ab"), Node::Number(-1.0)).is_err());
    }

    #[test]
    fn strings_are_rejected_elsewhere() {
        for (op, left, right) in [(Operator::Sub, Node::from("a"), Node::Number(1.0)),
                                  (Operator::Div, Node::Number(1.0), Node::from("a")),
                                  (Operator::Mul, Node::from("a"), Node::from("b"))]
        {
            assert!(matches!(arith(op, left, right),
                             Err(RuntimeError::InvalidOperandType { .. })));
        }
    }

    #[test]
    fn nil_is_not_a_number() {
        assert!(arith(Operator::Sub, Node::Nil, Node::Number(1.0)).is_err());
    }

    #[test]
    fn division_follows_ieee() {
        assert_eq!(arith(Operator::Div, Node::Number(1.0), Node::Number(0.0)).unwrap(),
                   Node::Number(f64::INFINITY));
        assert_eq!(arith(Operator::Div, Node::Number(7.0), Node::Number(2.0)).unwrap(),
                   Node::Number(3.5));
    }

    #[test]
    fn repetition_past_the_limit_is_an_error() {
        let err = arith(Operator::Mul, Node::from("ab"), Node::Number(1e15)).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidArgument { line: 1, .. }), "{err}");

        assert_eq!(arith(Operator::Mul, Node::Number(1e15), Node::from("")).unwrap(),
                   Node::from(""));
    }

    #[test]
    fn configured_string_limit() {
        let interpreter = limited(4);
        let eval = |op, left: Node, right: Node| interpreter.eval_arithmetic(op, &left, &right, 1);

        assert_eq!(eval(Operator::Mul, Node::from("ab"), Node::Number(2.0)).unwrap(),
                   Node::from("abab"));
        assert_eq!(eval(Operator::Add, Node::from("ab"), Node::Number(12.0)).unwrap(),
                   Node::from("ab12"));
        assert!(matches!(eval(Operator::Mul, Node::from("ab"), Node::Number(3.0)),
                         Err(RuntimeError::InvalidArgument { .. })));
        assert!(matches!(eval(Operator::Add, Node::from("abc"), Node::from("de")),
                         Err(RuntimeError::InvalidArgument { .. })));
    }
}
