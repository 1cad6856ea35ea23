use std::fmt;

use crate::interpreter::parser::{core::ParseResult, postfix::to_postfix};

/// A semantically typed token, and at the same time a runtime value.
///
/// Nodes are built one per lexical item by the node builder, reordered into
/// postfix by the shunting-yard pass and finally consumed by the postfix
/// evaluator, which pushes and pops them on its value stack. Values produced
/// at runtime (numbers, strings, booleans, nil) are plain nodes too, so a
/// variable binding simply stores a `Node`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A double precision number.
    Number(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// A string literal or string value. Quotes are not part of the text.
    String(String),
    /// A binary operator.
    Operator(Operator),
    /// An opening or closing parenthesis.
    Paren(Paren),
    /// The `,` separating call arguments.
    Comma,
    /// A reference to a variable by name.
    Variable(String),
    /// The name of a called function. Always followed by `(` in infix form.
    FunctionCall(String),
    /// A keyword such as `if` or `end`.
    Reserved(String),
    /// Number of arguments of the call right before it in postfix form.
    ///
    /// Only inserted by the shunting-yard pass and only consumed by the
    /// postfix evaluator.
    ArgCount(usize),
    /// The absence of a value.
    Nil,
}

/// The discriminant of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Number,
    Boolean,
    String,
    Operator,
    Paren,
    Comma,
    Variable,
    FunctionCall,
    Reserved,
    ArgCount,
    Nil,
}

impl Node {
    /// Returns the variant of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Number(_) => NodeKind::Number,
            Self::Boolean(_) => NodeKind::Boolean,
            Self::String(_) => NodeKind::String,
            Self::Operator(_) => NodeKind::Operator,
            Self::Paren(_) => NodeKind::Paren,
            Self::Comma => NodeKind::Comma,
            Self::Variable(_) => NodeKind::Variable,
            Self::FunctionCall(_) => NodeKind::FunctionCall,
            Self::Reserved(_) => NodeKind::Reserved,
            Self::ArgCount(_) => NodeKind::ArgCount,
            Self::Nil => NodeKind::Nil,
        }
    }

    /// Returns `true` for `Nil`.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Paren(paren) => write!(f, "{paren}"),
            Self::Comma => f.write_str(","),
            Self::Variable(name) | Self::FunctionCall(name) | Self::Reserved(name) => {
                f.write_str(name)
            },
            Self::ArgCount(n) => write!(f, "<{n}>"),
            Self::Nil => f.write_str("nil"),
        }
    }
}

/// Represents a binary operator.
///
/// Every operator of the language takes two operands. `->` only appears in
/// `for` headers, where it is split off before evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication or string repetition (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Assignment (`=`)
    Assign,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
    /// Range arrow of `for` headers (`->`)
    Arrow,
}

impl Operator {
    /// Looks an operator up by its spelling.
    ///
    /// # Example
    /// ```
    /// use blast::ast::Operator;
    ///
    /// assert_eq!(Operator::from_symbol("<="), Some(Operator::LessEqual));
    /// assert_eq!(Operator::from_symbol("=>"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "^" => Self::Pow,
            "=" => Self::Assign,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<" => Self::Less,
            "<=" => Self::LessEqual,
            ">" => Self::Greater,
            ">=" => Self::GreaterEqual,
            "&&" => Self::And,
            "||" => Self::Or,
            "->" => Self::Arrow,
            _ => return None,
        };
        Some(op)
    }

    /// Binding strength used by the shunting-yard pass. Higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> i8 {
        match self {
            Self::Arrow => -2,
            Self::Assign => -1,
            Self::And | Self::Or => 0,
            Self::Equal
            | Self::NotEqual
            | Self::Less
            | Self::LessEqual
            | Self::Greater
            | Self::GreaterEqual => 1,
            Self::Add | Self::Sub => 2,
            Self::Mul | Self::Div => 3,
            Self::Pow => 4,
        }
    }

    /// Only `^` groups to the right.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Assign => "=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Arrow => "->",
        };
        f.write_str(symbol)
    }
}

/// Which side of a parenthesised group a paren node stands for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Paren {
    Open,
    Close,
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("("),
            Self::Close => f.write_str(")"),
        }
    }
}

/// An infix expression together with its postfix form.
///
/// The postfix form is computed once when the expression is built, so a line
/// that runs many times (a loop body, a function body) is only reordered once.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    nodes:   Vec<Node>,
    postfix: Vec<Node>,
}

impl Expression {
    /// Builds an expression from infix nodes.
    ///
    /// # Example
    /// ```
    /// use blast::ast::{Expression, Node, Operator};
    ///
    /// let expression = Expression::new(vec![Node::Number(1.0),
    ///                                        Node::Operator(Operator::Add),
    ///                                        Node::Number(2.0)],
    ///                                   1).unwrap();
    ///
    /// assert_eq!(expression.postfix(),
    ///            &[Node::Number(1.0), Node::Number(2.0), Node::Operator(Operator::Add)]);
    /// ```
    pub fn new(nodes: Vec<Node>, line: usize) -> ParseResult<Self> {
        let postfix = to_postfix(&nodes, line)?;
        Ok(Self { nodes, postfix })
    }

    /// The nodes in source order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The nodes in evaluation order.
    #[must_use]
    pub fn postfix(&self) -> &[Node] {
        &self.postfix
    }

    /// `true` when the expression has no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match node {
                Node::String(s) => write!(f, "\"{s}\"")?,
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}
