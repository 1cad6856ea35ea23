use tracing::debug;

use crate::{
    ast::{Expression, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            block::Flow,
            core::{EvalResult, Interpreter},
        },
        parser::{block::Block, declaration::ForDeclaration},
    },
};

impl Interpreter {
    /// Runs a `for` block.
    ///
    /// The counter goes from `start` to `end`, both inclusive, moving by the
    /// step on every iteration. Without an explicit step it moves by 1 toward
    /// `end`. A step pointing away from `end` runs the body zero times.
    ///
    /// The loop has its own frame: the counter, and any variable first
    /// assigned in the body, are gone after the loop. A `return` in the body
    /// stops the loop and is propagated.
    ///
    /// # Errors
    /// - `InvalidLoopBounds` if a bound or the step is not a finite number, or
    ///   the step is zero.
    /// - `InvalidLoopBounds` if the step is too small to change the counter,
    ///   which happens near the edge of float precision.
    /// - Any error raised by the body.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::evaluator::core::Interpreter;
    ///
    /// let mut interpreter = Interpreter::new();
    /// interpreter.run("total = 0\nfor 1 -> 4, i\ntotal = total + i\nend").unwrap();
    ///
    /// assert_eq!(interpreter.evaluate("total").unwrap(), "10");
    /// assert!(interpreter.evaluate("i").is_err());
    /// ```
    pub fn run_for(&mut self, header: &ForDeclaration, block: &Block) -> EvalResult<Flow> {
        let line = block.line;

        self.scoped(|interpreter| {
                let start = interpreter.loop_number(&header.start, "start", line)?;
                let end = interpreter.loop_number(&header.end, "end", line)?;
                let step = match &header.step {
                    Some(step) => interpreter.loop_number(step, "step", line)?,
                    None if start <= end => 1.0,
                    None => -1.0,
                };
                if step == 0.0 {
                    return Err(RuntimeError::InvalidLoopBounds { details: "the step cannot be zero".to_string(),
                                                                 line });
                }

                debug!(line, start, end, step, counter = header.counter.as_deref(), "for loop");

                let mut previous = None;
                let mut index = 0.0_f64;
                loop {
                    let counter = step.mul_add(index, start);
                    if (step > 0.0 && counter > end) || (step < 0.0 && counter < end) {
                        break;
                    }
                    if previous == Some(counter) {
                        let details = format!("a step of {step} does not move the counter past {counter}");
                        return Err(RuntimeError::InvalidLoopBounds { details, line });
                    }
                    previous = Some(counter);
                    index += 1.0;

                    if let Some(name) = &header.counter {
                        interpreter.scopes.define_variable(name, Node::Number(counter));
                    }
                    if let returned @ Flow::Return(_) = interpreter.run_children(&block.children)? {
                        return Ok(returned);
                    }
                }

                Ok(Flow::Normal(Node::Nil))
            })
    }

    /// Evaluates one part of a `for` header to a finite number.
    fn loop_number(&mut self, expression: &Expression, part: &str, line: usize) -> EvalResult<f64> {
        match self.eval_expression(expression, line)? {
            Node::Number(n) if n.is_finite() => Ok(n),
            other => Err(RuntimeError::InvalidLoopBounds { details: format!("the {part} must be a finite number, found '{other}'"),
                                                           line }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io, rc::Rc};

    use super::*;
    use crate::error::Error;

    #[derive(Clone, Default)]
    struct Sink(Rc<RefCell<Vec<u8>>>);

    impl io::Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn printed(source: &str) -> String {
        let sink = Sink::default();
        let mut interpreter = Interpreter::new().with_output(sink.clone());
        interpreter.run(source).unwrap();
        let bytes = sink.0.borrow().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn counts_in_both_directions() {
        assert_eq!(printed("for 1 -> 3, i\nprintln(i)\nend"), "1\n2\n3\n");
        assert_eq!(printed("for 5 -> 1, i\nprint(i)\nend"), "54321");
    }

    #[test]
    fn explicit_step() {
        assert_eq!(printed("for 0 -> 10, i, 5\nprint(i, \"\")\nend"), "0 5 10 ");
        assert_eq!(printed("for 1 -> 2, i, 0.5\nprint(i, \"\")\nend"), "1 1.5 2 ");
        assert_eq!(printed("for 1 -> 3, i, -1\nprint(i)\nend"), "");
    }

    #[test]
    fn loop_without_counter() {
        assert_eq!(printed("for 1 -> 3\nprint(\"x\")\nend"), "xxx");
    }

    #[test]
    fn zero_step_is_rejected() {
        let mut interpreter = Interpreter::new();
        let err = interpreter.run("for 1 -> 3, i, 0\nend").unwrap_err();

        assert!(matches!(err, Error::Runtime(RuntimeError::InvalidLoopBounds { line: 1, .. })));
        assert_eq!(interpreter.scopes.depth(), 1);
    }

    #[test]
    fn fractional_steps_do_not_drift() {
        assert_eq!(printed("for 0 -> 1, i, 0.25\nprint(i, \"\")\nend"), "0 0.25 0.5 0.75 1 ");
    }

    #[test]
    fn step_lost_to_rounding_is_rejected() {
        let mut interpreter = Interpreter::new();
        let err = interpreter.run("for 9007199254740992 -> 9007199254740994, i\nend").unwrap_err();

        assert!(matches!(err, Error::Runtime(RuntimeError::InvalidLoopBounds { line: 1, .. })));
        assert_eq!(interpreter.scopes.depth(), 1);
    }

    #[test]
    fn non_numeric_bounds_are_rejected() {
        let mut interpreter = Interpreter::new();
        let err = interpreter.run("for \"a\" -> 3, i\nend").unwrap_err();

        assert!(matches!(err, Error::Runtime(RuntimeError::InvalidLoopBounds { .. })));
    }

    #[test]
    fn return_inside_a_loop_leaves_the_function() {
        let mut interpreter = Interpreter::new();
        let source = "function first_over(limit)\nfor 1 -> 100, i\nif i * i > limit\nreturn i\nend\nend\nend\nfirst_over(50)";

        assert_eq!(interpreter.run(source).unwrap(), Node::Number(8.0));
    }
}
