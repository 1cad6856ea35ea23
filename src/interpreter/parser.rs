/// Core parsing entry points.
///
/// Defines the parse result type and converts lexical items into nodes.
pub mod core;

/// Infix to postfix conversion.
///
/// Implements the shunting-yard pass, including the argument counts of
/// function calls.
pub mod postfix;

/// Line classification.
///
/// Decides what kind of statement a source line is from its leading keyword.
pub mod line;

/// Headers of `for` and `function` blocks.
///
/// Splits a header line into its bounds, counter, step, name and parameters.
pub mod declaration;

/// Block tree construction.
///
/// Nests classified lines into blocks and collects function declarations.
pub mod block;
