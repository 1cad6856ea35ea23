use std::io::Write;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::evaluator::{
        core::{EvalResult, Interpreter},
        function::core::NativeValue,
    },
};

/// Writes the arguments, separated by single spaces, without a newline.
///
/// Returns `nil`.
///
/// # Example
/// ```
/// use std::{cell::RefCell, io, rc::Rc};
///
/// use blast::{
///     ast::Node,
///     interpreter::evaluator::{core::Interpreter, function::print::print},
/// };
///
/// #[derive(Clone, Default)]
/// struct Sink(Rc<RefCell<Vec<u8>>>);
///
/// impl io::Write for Sink {
///     fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
///         self.0.borrow_mut().extend_from_slice(buf);
///         Ok(buf.len())
///     }
///
///     fn flush(&mut self) -> io::Result<()> {
///         Ok(())
///     }
/// }
///
/// let sink = Sink::default();
/// let mut interpreter = Interpreter::new().with_output(sink.clone());
/// print(&mut interpreter, &[Node::from("fib"), Node::Number(3.0)], 1).unwrap();
///
/// assert_eq!(sink.0.borrow().as_slice(), b"fib 3");
/// ```
pub fn print(interpreter: &mut Interpreter, args: &[Node], line: usize) -> EvalResult<NativeValue> {
    write_joined(interpreter, args, "", line)
}

/// Writes the arguments, separated by single spaces, followed by a newline.
///
/// Returns `nil`.
pub fn println(interpreter: &mut Interpreter,
               args: &[Node],
               line: usize)
               -> EvalResult<NativeValue> {
    write_joined(interpreter, args, "\n", line)
}

fn write_joined(interpreter: &mut Interpreter,
                args: &[Node],
                terminator: &str,
                line: usize)
                -> EvalResult<NativeValue> {
    let text = args.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");

    write!(interpreter.output, "{text}{terminator}").and_then(|()| interpreter.output.flush())
                                                     .map_err(|e| RuntimeError::Output { details: e.to_string(),
                                                                                         line })?;
    Ok(NativeValue::Unit)
}
