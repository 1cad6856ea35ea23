use thiserror::Error;

/// Represents all errors that can occur during lexing or block building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character does not start any lexeme of the language.
    #[error("Error on line {line}, position {position}: Unrecognized character '{character}'.")]
    UnrecognizedCharacter {
        /// The offending character.
        character: char,
        /// 0-based character (not byte) offset of the character within its line.
        position:  usize,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A run of operator characters is not one of the known operators.
    #[error("Error on line {line}, position {position}: Invalid operator '{operator}'.")]
    InvalidOperator {
        /// The operator text as written.
        operator: String,
        /// 0-based character offset of the operator within its line.
        position: usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A numeric literal could not be read as a number.
    #[error("Error on line {line}: Invalid number literal '{text}'.")]
    InvalidNumber {
        /// The literal as written.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An `end` line has no open block to close.
    #[error("Error on line {line}: 'end' without a matching 'if', 'for' or 'function'.")]
    UnexpectedEnd {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The input ended while a block was still open.
    #[error("Error on line {line}: This '{keyword}' block is never closed with 'end'.")]
    UnclosedBlock {
        /// Keyword that opened the block.
        keyword: &'static str,
        /// The line that opened the block.
        line:    usize,
    },
    /// An `else` line outside an `if` block, repeated, or followed by text.
    #[error("Error on line {line}: {details}.")]
    UnexpectedElse {
        /// Why the `else` is not allowed here.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The header of a `for` block could not be read.
    #[error("Error on line {line}: Invalid for declaration: {details}. Example: for 1 -> 10, i")]
    MalformedFor {
        /// Details about what is wrong with the header.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The header of a `function` block could not be read.
    #[error("Error on line {line}: Invalid function declaration: {details}. Example: function add(a, b = 1)")]
    MalformedFunction {
        /// Details about what is wrong with the header.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A keyword appeared in the middle of an expression.
    #[error("Error on line {line}: Keyword '{keyword}' cannot be used inside an expression.")]
    UnexpectedKeyword {
        /// The keyword found.
        keyword: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A block statement was given where a single expression was expected.
    #[error("Error on line {line}: '{keyword}' opens a block and cannot be evaluated on its own.")]
    BlockStatementInExpression {
        /// The keyword that opens the block.
        keyword: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}
