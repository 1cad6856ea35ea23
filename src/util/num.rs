use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

/// Truncates an `f64` toward zero and converts it to `i64`.
///
/// ## Errors
/// Returns `InvalidArgument` if the value is not finite or its magnitude is
/// beyond `MAX_SAFE_INT`, where the integer part is no longer exact.
///
/// ## Example
/// ```
/// use blast::{error::RuntimeError, util::num::truncate_to_i64};
///
/// assert_eq!(truncate_to_i64(7.9, 1).unwrap(), 7);
/// assert_eq!(truncate_to_i64(-7.9, 1).unwrap(), -7);
///
/// let err = truncate_to_i64(f64::INFINITY, 3).unwrap_err();
/// assert!(matches!(err, RuntimeError::InvalidArgument { line: 3, .. }));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn truncate_to_i64(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() || value.abs() > MAX_SAFE_INT {
        return Err(RuntimeError::InvalidArgument { details:
                                                       format!("{value} cannot be used as an integer"),
                                                   line });
    }
    Ok(value.trunc() as i64)
}

/// Rounds an `f64` down and converts it to a repetition count.
///
/// ## Errors
/// Returns `InvalidArgument` for negative, non-finite or too large values.
///
/// ## Example
/// ```
/// use blast::util::num::floor_to_count;
///
/// assert_eq!(floor_to_count(3.7, 1).unwrap(), 3);
/// assert_eq!(floor_to_count(0.0, 1).unwrap(), 0);
/// assert!(floor_to_count(-1.0, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn floor_to_count(value: f64, line: usize) -> EvalResult<usize> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_INT {
        return Err(RuntimeError::InvalidArgument { details: format!("{value} is not a valid repetition count"),
                                                   line });
    }
    Ok(value.floor() as usize)
}
