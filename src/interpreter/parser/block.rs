use crate::{
    ast::Expression,
    error::ParseError,
    interpreter::parser::{
        core::ParseResult,
        declaration::{ForDeclaration, FunctionHeader},
        line::{Line, LineKind, parse_lines},
    },
};

/// What a block does when it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    /// The top level of a program.
    Root,
    /// The body of a declared function.
    Function,
    /// An expression statement.
    Basic(Expression),
    /// `return <expression>`
    Return(Expression),
    /// `if <condition>`, with an optional `else` branch.
    If(Expression),
    /// `for start -> end[, counter[, step]]`
    For(ForDeclaration),
}

/// A node of the control-flow tree.
///
/// Leaf blocks hold one statement. `Root`, `Function`, `If` and `For` blocks
/// hold the statements nested in them, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind:          BlockKind,
    /// The line the block starts on.
    pub line:          usize,
    pub children:      Vec<Block>,
    /// Statements after `else`. Only `If` blocks have any.
    pub else_children: Vec<Block>,
}

impl Block {
    const fn new(kind: BlockKind, line: usize) -> Self {
        Self { kind,
               line,
               children: Vec::new(),
               else_children: Vec::new() }
    }

    /// The keyword that opened the block, for error messages.
    const fn keyword(&self) -> &'static str {
        match self.kind {
            BlockKind::If(_) => "if",
            BlockKind::For(_) => "for",
            BlockKind::Function => "function",
            BlockKind::Root | BlockKind::Basic(_) | BlockKind::Return(_) => "",
        }
    }
}

/// A function declared with `function ... end`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub header: FunctionHeader,
    pub body:   Block,
}

impl FunctionDeclaration {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.header.name
    }
}

/// A parsed program.
///
/// Function declarations are lifted out of the tree: their bodies never run
/// in place, only when called.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub root:      Block,
    pub functions: Vec<FunctionDeclaration>,
}

/// A block whose `end` has not been seen yet.
struct OpenBlock {
    block:   Block,
    in_else: bool,
    header:  Option<FunctionHeader>,
}

impl OpenBlock {
    const fn new(block: Block) -> Self {
        Self { block,
               in_else: false,
               header: None }
    }

    fn push_child(&mut self, child: Block) {
        if self.in_else {
            self.block.else_children.push(child);
        } else {
            self.block.children.push(child);
        }
    }
}

/// Parses a whole program into its block tree.
///
/// `if`, `for` and `function` lines open a block that collects every
/// following line up to the matching `end`. Blank and comment lines are
/// skipped.
///
/// # Errors
/// - Any lexical error, or a malformed `for` or `function` header.
/// - `UnexpectedEnd` for an `end` that closes nothing.
/// - `UnclosedBlock` when the input ends inside a block.
/// - `UnexpectedElse` for an `else` outside an `if`, a second `else`, or an
///   `else` followed by more text.
///
/// # Example
/// ```
/// use blast::interpreter::parser::block::{BlockKind, parse_program};
///
/// let program = parse_program("function double(x)\nreturn x * 2\nend\ny = double(2)").unwrap();
///
/// assert_eq!(program.functions[0].name(), "double");
/// assert_eq!(program.root.children.len(), 1);
/// assert!(matches!(program.root.children[0].kind, BlockKind::Basic(_)));
/// ```
pub fn parse_program(source: &str) -> ParseResult<Program> {
    build_program(parse_lines(source)?)
}

/// Nests classified lines into a block tree.
///
/// # Errors
/// See [`parse_program`].
pub fn build_program(lines: Vec<Line>) -> ParseResult<Program> {
    let mut root = OpenBlock::new(Block::new(BlockKind::Root, 0));
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut functions = Vec::new();

    for Line { number, kind, nodes } in lines {
        match kind {
            LineKind::Blank => {},
            LineKind::Basic => {
                let block = Block::new(BlockKind::Basic(Expression::new(nodes, number)?), number);
                current(&mut root, &mut stack).push_child(block);
            },
            LineKind::Return => {
                let block = Block::new(BlockKind::Return(Expression::new(nodes, number)?), number);
                current(&mut root, &mut stack).push_child(block);
            },
            LineKind::If => {
                let condition = Expression::new(nodes, number)?;
                stack.push(OpenBlock::new(Block::new(BlockKind::If(condition), number)));
            },
            LineKind::For => {
                let header = ForDeclaration::parse(&nodes, number)?;
                stack.push(OpenBlock::new(Block::new(BlockKind::For(header), number)));
            },
            LineKind::Function => {
                let header = FunctionHeader::parse(&nodes, number)?;
                let mut open = OpenBlock::new(Block::new(BlockKind::Function, number));
                open.header = Some(header);
                stack.push(open);
            },
            LineKind::Else => {
                let open = current(&mut root, &mut stack);
                let details = if !matches!(open.block.kind, BlockKind::If(_)) {
                    Some("'else' is only allowed inside an 'if' block")
                } else if open.in_else {
                    Some("an 'if' block can only have one 'else'")
                } else if !nodes.is_empty() {
                    Some("'else' must stand alone on its line")
                } else {
                    None
                };
                if let Some(details) = details {
                    return Err(ParseError::UnexpectedElse { details: details.to_string(),
                                                            line:    number, });
                }
                open.in_else = true;
            },
            LineKind::End => {
                if !nodes.is_empty() {
                    return Err(ParseError::UnexpectedKeyword { keyword: "end".to_string(),
                                                               line:    number, });
                }
                let Some(closed) = stack.pop() else {
                    return Err(ParseError::UnexpectedEnd { line: number });
                };
                match closed.header {
                    Some(header) => functions.push(FunctionDeclaration { header,
                                                                         body: closed.block }),
                    None => current(&mut root, &mut stack).push_child(closed.block),
                }
            },
        }
    }

    if let Some(unclosed) = stack.last() {
        return Err(ParseError::UnclosedBlock { keyword: unclosed.block.keyword(),
                                               line:    unclosed.block.line, });
    }

    Ok(Program { root: root.block,
                 functions })
}

/// The innermost open block.
fn current<'a>(root: &'a mut OpenBlock, stack: &'a mut [OpenBlock]) -> &'a mut OpenBlock {
    match stack.last_mut() {
        Some(open) => open,
        None => root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_follows_end_lines() {
        let program = parse_program("x = 1\nif x == 1\nfor 1 -> 2, i\nx = x + i\nend\nend\nx").unwrap();
        let root = &program.root.children;

        assert_eq!(root.len(), 3);
        assert!(matches!(root[1].kind, BlockKind::If(_)));
        assert_eq!(root[1].line, 2);
        assert!(matches!(root[1].children[0].kind, BlockKind::For(_)));
        assert_eq!(root[1].children[0].children.len(), 1);
        assert_eq!(root[2].line, 7);
    }

    #[test]
    fn else_splits_the_branches() {
        let program = parse_program("if x\na = 1\nb = 2\nelse\nc = 3\nend").unwrap();
        let block = &program.root.children[0];

        assert_eq!(block.children.len(), 2);
        assert_eq!(block.else_children.len(), 1);
    }

    #[test]
    fn functions_are_lifted_out_of_the_tree() {
        let program = parse_program("if true\nfunction f()\nreturn 1\nend\nend").unwrap();

        assert_eq!(program.functions.len(), 1);
        assert_eq!(program.functions[0].body.children.len(), 1);
        assert!(program.root.children[0].children.is_empty());
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let program = parse_program("\n-- comment\n   \nx = 1\n").unwrap();
        assert_eq!(program.root.children.len(), 1);
        assert_eq!(program.root.children[0].line, 4);
    }

    #[test]
    fn structural_errors() {
        assert_eq!(parse_program("x = 1\nend"), Err(ParseError::UnexpectedEnd { line: 2 }));
        assert_eq!(parse_program("x = 1\nfor 1 -> 2\nif x\nend"),
                   Err(ParseError::UnclosedBlock { keyword: "for",
                                                   line:    2, }));
        assert!(matches!(parse_program("else"), Err(ParseError::UnexpectedElse { line: 1, .. })));
        assert!(matches!(parse_program("if x\nelse\nelse\nend"),
                         Err(ParseError::UnexpectedElse { line: 3, .. })));
        assert!(matches!(parse_program("if x\nelse if y\nend\nend"),
                         Err(ParseError::UnexpectedElse { line: 2, .. })));
        assert!(matches!(parse_program("for 1 -> 2\nelse\nend"),
                         Err(ParseError::UnexpectedElse { line: 2, .. })));
    }
}
