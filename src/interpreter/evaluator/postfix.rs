use crate::{
    ast::{Expression, Node, Operator},
    error::RuntimeError,
    interpreter::evaluator::core::{EvalResult, Interpreter},
};

impl Interpreter {
    /// Evaluates an expression and returns its value.
    ///
    /// An empty expression, such as the one of a bare `return`, is `nil`.
    ///
    /// # Errors
    /// Any runtime error raised while evaluating the expression.
    pub fn eval_expression(&mut self, expression: &Expression, line: usize) -> EvalResult<Node> {
        self.eval_postfix(expression.postfix(), line)
    }

    /// Runs the value stack over nodes in postfix order.
    ///
    /// Operands are pushed as they come. An operator pops its right operand,
    /// then its left one, and pushes its result. A function call reads the
    /// `ArgCount` that follows it to know how many values to pop. Variables
    /// stay unresolved on the stack until they are used, so the target of
    /// `=` is still a name when the assignment runs.
    ///
    /// # Errors
    /// - `MissingOperand` when an operator lacks an operand.
    /// - `UnboundVariable` or `UnboundFunction` for unknown names.
    /// - Any error raised by an operator or a called function.
    pub fn eval_postfix(&mut self, postfix: &[Node], line: usize) -> EvalResult<Node> {
        let mut stack: Vec<Node> = Vec::new();
        let mut nodes = postfix.iter();

        while let Some(node) = nodes.next() {
            match node {
                Node::Operator(op) => {
                    let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                        return Err(RuntimeError::MissingOperand { operator: op.to_string(),
                                                                  line });
                    };
                    let right = self.resolve(right, line)?;
                    let result = if *op == Operator::Assign {
                        self.assign(left, right, line)?
                    } else {
                        let left = self.resolve(left, line)?;
                        self.eval_binary(*op, &left, &right, line)?
                    };
                    stack.push(result);
                },
                Node::FunctionCall(name) => {
                    let count = match nodes.next() {
                        Some(Node::ArgCount(count)) => *count,
                        _ => 0,
                    };
                    let first = stack.len().saturating_sub(count);
                    let args = stack.split_off(first)
                                    .into_iter()
                                    .map(|arg| self.resolve(arg, line))
                                    .collect::<EvalResult<Vec<_>>>()?;
                    stack.push(self.call_function(name, args, line)?);
                },
                _ => stack.push(node.clone()),
            }
        }

        match stack.pop() {
            Some(value) => self.resolve(value, line),
            None => Ok(Node::Nil),
        }
    }

    /// Replaces a variable reference by its value. Other nodes are returned
    /// as they are.
    fn resolve(&self, node: Node, line: usize) -> EvalResult<Node> {
        match node {
            Node::Variable(name) => self.scopes.get_variable(&name, line).cloned(),
            other => Ok(other),
        }
    }

    /// Binds `value` to the variable `target` and returns the value.
    fn assign(&mut self, target: Node, value: Node, line: usize) -> EvalResult<Node> {
        let Node::Variable(name) = target else {
            return Err(RuntimeError::AssignmentTarget { target: target.to_string(),
                                                        line });
        };
        self.scopes.set_variable(&name, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, RuntimeError},
        interpreter::evaluator::core::Interpreter,
    };

    fn eval(interpreter: &mut Interpreter, source: &str) -> String {
        interpreter.evaluate(source).unwrap()
    }

    #[test]
    fn precedence_is_respected() {
        let mut interpreter = Interpreter::new();
        assert_eq!(eval(&mut interpreter, "2 + 2 * 3"), "8");
        assert_eq!(eval(&mut interpreter, "(2 + 2) * 3"), "12");
        assert_eq!(eval(&mut interpreter, "2 ^ 3 ^ 2"), "512");
        assert_eq!(eval(&mut interpreter, "10 - 4 - 3"), "3");
        assert_eq!(eval(&mut interpreter, "300 - -30"), "330");
        assert_eq!(eval(&mut interpreter, "1 < 2 && 3 > 2"), "true");
    }

    #[test]
    fn assignment_returns_the_value() {
        let mut interpreter = Interpreter::new();
        assert_eq!(eval(&mut interpreter, "x = 2 + 2"), "4");
        assert_eq!(eval(&mut interpreter, "y = x"), "4");
        assert_eq!(eval(&mut interpreter, "x = x * 2"), "8");
        assert_eq!(eval(&mut interpreter, "y"), "4");
    }

    #[test]
    fn nested_calls() {
        let mut interpreter = Interpreter::new();
        assert_eq!(eval(&mut interpreter, "max(min(33, 413), 300, 102)"), "300");
        assert_eq!(eval(&mut interpreter, "abs(2 - 5) * 2"), "6");
    }

    #[test]
    fn missing_operand_is_an_error() {
        let mut interpreter = Interpreter::new();
        interpreter.evaluate("x = 1").unwrap();

        let err = interpreter.evaluate("- x").unwrap_err();
        assert!(matches!(err, Error::Runtime(RuntimeError::MissingOperand { .. })), "{err}");
    }

    #[test]
    fn only_variables_can_be_assigned() {
        let mut interpreter = Interpreter::new();

        let err = interpreter.evaluate("1 = 2").unwrap_err();
        assert!(matches!(err, Error::Runtime(RuntimeError::AssignmentTarget { .. })), "{err}");
    }
}
