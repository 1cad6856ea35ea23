use std::path::PathBuf;

use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur while lexing a line, classifying
/// lines into blocks, or reading `for` and `function` declarations. Parse
/// errors are detected before any statement of the program runs.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating expressions
/// and running blocks, such as unbound names, operands of the wrong type or a
/// failing built-in.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure produced while running blast source.
///
/// This is what the public entry points return. It keeps the phase the error
/// came from so hosts can tell a syntax problem from a runtime one.
#[derive(Debug, Error)]
pub enum Error {
    /// The source could not be lexed or structured into blocks.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The source was well formed but failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// A script file could not be read.
    #[error("Failed to read the script '{}': {source}", path.display())]
    Io {
        /// The path that was requested.
        path:   PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
}
