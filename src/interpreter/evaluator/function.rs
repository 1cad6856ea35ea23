/// Function lookup, argument binding and dispatch.
///
/// Defines the built-in table and runs user-defined functions in their own
/// frame.
pub mod core;
/// `abs` and `modulus`.
pub mod builtin;
/// `min` and `max` function implementations.
///
/// Returns the minimum or maximum value from a list of arguments.
pub mod min_max;
/// `print` and `println`.
pub mod print;
/// The `get` function implementation.
///
/// Performs a blocking HTTP GET request.
pub mod http;
