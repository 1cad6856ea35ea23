use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::evaluator::{
        core::{EvalResult, Interpreter},
        function::core::{NativeValue, number_argument},
    },
    util::num::truncate_to_i64,
};

/// Returns the absolute value of a number.
///
/// # Example
/// ```
/// use blast::{
///     ast::Node,
///     interpreter::evaluator::{core::Interpreter, function::builtin::abs},
/// };
///
/// let mut interpreter = Interpreter::new();
/// let result = abs(&mut interpreter, &[Node::Number(-4.5)], 1).unwrap();
/// assert_eq!(Node::from(result), Node::Number(4.5));
/// ```
pub fn abs(_: &mut Interpreter, args: &[Node], line: usize) -> EvalResult<NativeValue> {
    let [value] = args else {
        return Err(RuntimeError::InvalidArgument { details: "'abs' expects a single number".to_string(),
                                                   line });
    };
    Ok(NativeValue::Number(number_argument("abs", value, line)?.abs()))
}

/// Integer remainder of `a / b`.
///
/// Both operands are truncated toward zero first. The result has the sign of
/// `a`.
///
/// # Errors
/// - `DivisionByZero` when `b` truncates to zero.
/// - `InvalidArgument` for operands that are not numbers or too large to be
///   integers.
///
/// # Example
/// ```
/// use blast::{
///     ast::Node,
///     interpreter::evaluator::{core::Interpreter, function::builtin::modulus},
/// };
///
/// let mut interpreter = Interpreter::new();
/// let result = modulus(&mut interpreter, &[Node::Number(-7.8), Node::Number(3.0)], 1).unwrap();
/// assert_eq!(Node::from(result), Node::Number(-1.0));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn modulus(_: &mut Interpreter, args: &[Node], line: usize) -> EvalResult<NativeValue> {
    let [a, b] = args else {
        return Err(RuntimeError::InvalidArgument { details: "'modulus' expects two numbers".to_string(),
                                                   line });
    };
    let a = truncate_to_i64(number_argument("modulus", a, line)?, line)?;
    let b = truncate_to_i64(number_argument("modulus", b, line)?, line)?;

    let remainder = a.checked_rem(b).ok_or(RuntimeError::DivisionByZero { line })?;
    Ok(NativeValue::Number(remainder as f64))
}
