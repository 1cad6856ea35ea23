use crate::{
    ast::{Expression, Node},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        parser::block::{Block, BlockKind},
    },
};

/// How a block finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Ran to the end. Holds the value of the last statement.
    Normal(Node),
    /// Stopped at a `return`. Holds the returned value.
    Return(Node),
}

impl Flow {
    /// The value carried, whichever way the block finished.
    #[must_use]
    pub fn into_value(self) -> Node {
        match self {
            Self::Normal(value) | Self::Return(value) => value,
        }
    }
}

/// Truthiness of a condition.
///
/// Booleans are themselves, numbers are true when non-zero, strings when
/// non-empty. `nil` is false.
///
/// # Example
/// ```
/// use blast::{ast::Node, interpreter::evaluator::block::is_truthy};
///
/// assert!(is_truthy(&Node::Number(-1.0)));
/// assert!(!is_truthy(&Node::String(String::new())));
/// assert!(!is_truthy(&Node::Nil));
/// ```
#[must_use]
pub fn is_truthy(value: &Node) -> bool {
    match value {
        Node::Boolean(b) => *b,
        Node::Number(n) => *n != 0.0,
        Node::String(s) => !s.is_empty(),
        _ => false,
    }
}

impl Interpreter {
    /// Runs blocks in order, stopping at the first `return`.
    ///
    /// # Returns
    /// `Flow::Return` with the returned value, or `Flow::Normal` with the
    /// value of the last block (`nil` when there are none).
    pub fn run_children(&mut self, children: &[Block]) -> EvalResult<Flow> {
        let mut last = Node::Nil;
        for child in children {
            match self.run_block(child)? {
                Flow::Normal(value) => last = value,
                returned @ Flow::Return(_) => return Ok(returned),
            }
        }
        Ok(Flow::Normal(last))
    }

    /// Runs a single block.
    pub fn run_block(&mut self, block: &Block) -> EvalResult<Flow> {
        match &block.kind {
            BlockKind::Root | BlockKind::Function => self.run_children(&block.children),
            BlockKind::Basic(expression) => {
                Ok(Flow::Normal(self.eval_expression(expression, block.line)?))
            },
            BlockKind::Return(expression) => {
                Ok(Flow::Return(self.eval_expression(expression, block.line)?))
            },
            BlockKind::If(condition) => self.run_if(condition, block),
            BlockKind::For(header) => self.run_for(header, block),
        }
    }

    /// Runs an `if` block in its own frame.
    ///
    /// The condition is evaluated inside the frame, so a variable first
    /// assigned in the condition does not outlive the block either.
    fn run_if(&mut self, condition: &Expression, block: &Block) -> EvalResult<Flow> {
        self.scoped(|interpreter| {
                let value = interpreter.eval_expression(condition, block.line)?;
                if is_truthy(&value) {
                    interpreter.run_children(&block.children)
                } else if block.else_children.is_empty() {
                    Ok(Flow::Normal(Node::Nil))
                } else {
                    interpreter.run_children(&block.else_children)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_mutation_survives_the_block() {
        let mut interpreter = Interpreter::new();
        interpreter.run("x = 2\nif true\nx = 5\ny = 1\nend").unwrap();

        assert_eq!(interpreter.evaluate("x").unwrap(), "5");
        assert!(interpreter.evaluate("y").is_err());
        assert_eq!(interpreter.scopes.depth(), 1);
    }

    #[test]
    fn else_branch_runs_when_false() {
        let mut interpreter = Interpreter::new();
        let value = interpreter.run("x = 0\nif x\nr = \"then\"\nelse\nr = \"else\"\nend")
                               .unwrap();

        assert_eq!(value, Node::String("else".into()));
    }

    #[test]
    fn false_condition_without_else_is_nil() {
        let mut interpreter = Interpreter::new();
        assert_eq!(interpreter.run("if 1 > 2\n3\nend").unwrap(), Node::Nil);
    }

    #[test]
    fn return_stops_the_program() {
        let mut interpreter = Interpreter::new();
        let value = interpreter.run("a = 1\nif a == 1\nreturn \"early\"\nend\na = 2").unwrap();

        assert_eq!(value, Node::String("early".into()));
        assert_eq!(interpreter.evaluate("a").unwrap(), "1");
        assert_eq!(interpreter.scopes.depth(), 1);
    }

    #[test]
    fn frame_is_popped_after_an_error() {
        let mut interpreter = Interpreter::new();
        assert!(interpreter.run("if true\nnope + 1\nend").is_err());
        assert_eq!(interpreter.scopes.depth(), 1);
    }
}
