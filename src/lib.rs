//! # blast
//!
//! blast is a small line-oriented scripting language and its interpreter,
//! written in Rust. Programs are made of expression statements, `if`/`else`,
//! counting `for` loops and functions with default parameters, over numbers,
//! strings and booleans.
//!
//! Every line is lexed into items, turned into nodes, reordered into postfix
//! form with the shunting-yard algorithm and evaluated on a value stack.
//! Lines are nested into a block tree by their `if`, `for`, `function` and
//! `end` keywords.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{ast::Node, error::Error, interpreter::evaluator::core::Interpreter};

/// Defines the nodes that expressions are made of.
///
/// A `Node` is both a token of a parsed line and a runtime value: the postfix
/// evaluator pushes the same type it reads. This module also declares the
/// operators with their precedence and `Expression`, an infix node list paired
/// with its postfix form.
///
/// # Responsibilities
/// - Defines `Node`, `Operator` and `Paren`.
/// - Stores every expression together with its evaluation order.
/// - Formats nodes the way the language displays values.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, nesting
/// blocks or evaluating code. Every error carries the line it occurred on.
///
/// # Responsibilities
/// - Defines `ParseError` for lexical and structural failures.
/// - Defines `RuntimeError` for evaluation failures.
/// - Wraps both, and file access failures, in `Error`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together the lexer, the parser and the evaluator to
/// provide a complete runtime for blast programs. It exposes the
/// `Interpreter` used by the command-line tool and by embedding hosts.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser and evaluator.
/// - Provides entry points for evaluating single lines or whole programs.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for checked numeric conversion.
pub mod util;

/// File extension of blast scripts.
pub const SCRIPT_EXTENSION: &str = "blast";

/// Runs a program in a fresh interpreter and returns the value of its last
/// statement.
///
/// # Examples
/// ```
/// use blast::{ast::Node, run_source};
///
/// let source = "x = 2\nif true\nx = 5\nend\nx";
/// assert_eq!(run_source(source).unwrap(), Node::Number(5.0));
///
/// // 'y' is never assigned.
/// assert!(run_source("y + 1").is_err());
/// ```
pub fn run_source(source: &str) -> Result<Node, Error> {
    Interpreter::new().run(source)
}

/// Reads a script and runs it in `interpreter`.
///
/// # Errors
/// `Error::Io` when the file cannot be read, otherwise any error of the
/// program itself.
pub fn run_file(interpreter: &mut Interpreter, path: &Path) -> Result<Node, Error> {
    let source = fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(),
                                                                      source })?;
    interpreter.run(&source)
}

/// Appends the `.blast` extension to a script path that lacks it.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
///
/// use blast::script_path;
///
/// assert_eq!(script_path("fib"), PathBuf::from("fib.blast"));
/// assert_eq!(script_path("demo/fib.blast"), PathBuf::from("demo/fib.blast"));
/// assert_eq!(script_path("v1.2"), PathBuf::from("v1.2.blast"));
/// ```
pub fn script_path<P>(path: P) -> PathBuf
    where P: AsRef<Path>
{
    let path = path.as_ref();
    if path.extension().is_some_and(|extension| extension == SCRIPT_EXTENSION) {
        return path.to_path_buf();
    }

    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(SCRIPT_EXTENSION);
    PathBuf::from(name)
}
