use ordered_float::OrderedFloat;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::evaluator::{
        core::EvalResult,
        function::core::{NativeValue, number_argument},
    },
};

/// Computes the minimum or maximum of one or more numeric values.
///
/// Booleans take part as 1 and 0. The operation is selected by the `name`
/// parameter, which must be `"min"` or `"max"`.
///
/// # Parameters
/// - `name`: Either `"min"` or `"max"`.
/// - `args`: At least one argument.
/// - `line`: Line number for error reporting.
///
/// # Example
/// ```
/// use blast::{ast::Node, interpreter::evaluator::function::min_max::min_max};
///
/// let args = [Node::Number(33.0), Node::Number(300.0), Node::Number(102.0)];
///
/// assert_eq!(Node::from(min_max("max", &args, 1).unwrap()), Node::Number(300.0));
/// assert_eq!(Node::from(min_max("min", &args, 1).unwrap()), Node::Number(33.0));
/// ```
pub fn min_max(name: &str, args: &[Node], line: usize) -> EvalResult<NativeValue> {
    let values = args.iter()
                     .map(|arg| number_argument(name, arg, line).map(OrderedFloat))
                     .collect::<EvalResult<Vec<_>>>()?;

    let result = if name == "min" {
        values.into_iter().min()
    } else {
        values.into_iter().max()
    };

    result.map(|value| NativeValue::Number(value.into_inner()))
          .ok_or_else(|| RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                               expected: "at least 1".to_string(),
                                                               found: 0,
                                                               line })
}
