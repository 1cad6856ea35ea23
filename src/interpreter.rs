/// The evaluator module runs parsed programs and single lines.
///
/// The evaluator walks the block tree produced by the parser, evaluates the
/// postfix form of every expression on a value stack, manages the scope chain
/// and dispatches calls to built-in and user-defined functions.
///
/// # Responsibilities
/// - Evaluates expressions, `if` and `for` blocks and function calls.
/// - Keeps the session state (variables and functions) between runs.
/// - Reports runtime errors such as unbound names or invalid operand types.
pub mod evaluator;
/// The lexer module splits one line of source into items.
///
/// The lexer reads a single line and produces items, each carrying its kind,
/// its text and the position where it starts. It resolves the ambiguity of a
/// leading `-` between a negative number and a binary minus.
///
/// # Responsibilities
/// - Recognises numbers, strings, identifiers, keywords and operators.
/// - Validates operator spellings.
/// - Reports characters that start no lexeme.
pub mod lexer;
/// The parser module turns lines of items into executable structure.
///
/// The parser converts items into nodes, reorders expressions into postfix
/// form, reads `for` and `function` headers and nests the lines of a program
/// into a tree of blocks.
///
/// # Responsibilities
/// - Classifies every line by its leading keyword.
/// - Builds the block tree and collects function declarations.
/// - Reports structural errors with the offending line number.
pub mod parser;
