/// Binary operator evaluation logic.
///
/// Implements the semantics of every operator of the language: arithmetic
/// and string operators, exponentiation, comparisons and logic.
pub mod binary;

/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, its configuration and the single-line and
/// whole-program entry points.
pub mod core;

/// Execution of the block tree.
///
/// Runs statements, `if` blocks and their `else` branches, and propagates
/// early returns.
pub mod block;

/// Evaluation of `for` blocks.
///
/// Computes the bounds and step, binds the counter and replays the body.
pub mod for_loop;

/// Postfix expression evaluation.
///
/// Runs the value stack over an expression in postfix order, including
/// assignment and function calls.
pub mod postfix;

/// The scope chain.
///
/// Holds variable frames and the global function table.
pub mod scope;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
