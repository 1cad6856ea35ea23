use crate::{
    ast::Node,
    interpreter::{
        lexer::{ItemKind, lex},
        parser::core::{ParseResult, build_nodes},
    },
};

/// Lines whose first non-blank characters are this marker are comments.
pub const COMMENT_MARKER: &str = "--";

/// What kind of statement a line is, decided by its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// An expression statement.
    Basic,
    /// `if <condition>`
    If,
    /// `else`
    Else,
    /// `function name(params)`
    Function,
    /// `for start -> end[, counter[, step]]`
    For,
    /// `return <expression>`
    Return,
    /// `end`
    End,
    /// Whitespace only, or a comment.
    Blank,
}

impl LineKind {
    /// `true` for the kinds that must be closed by an `end` line.
    #[must_use]
    pub const fn opens_block(self) -> bool {
        matches!(self, Self::If | Self::Function | Self::For)
    }

    /// The keyword that starts lines of this kind, if any.
    #[must_use]
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::If => Some("if"),
            Self::Else => Some("else"),
            Self::Function => Some("function"),
            Self::For => Some("for"),
            Self::Return => Some("return"),
            Self::End => Some("end"),
            Self::Basic | Self::Blank => None,
        }
    }
}

/// A classified source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// 1-based line number within the program.
    pub number: usize,
    /// What the line does.
    pub kind:   LineKind,
    /// The nodes of the line, without the leading keyword.
    pub nodes:  Vec<Node>,
}

impl Line {
    /// Lexes and classifies one line of source.
    ///
    /// # Errors
    /// Any lexical error of the line.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::parser::line::{Line, LineKind};
    ///
    /// let line = Line::parse("for 1 -> 3, i", 7).unwrap();
    /// assert_eq!(line.kind, LineKind::For);
    /// assert_eq!(line.nodes.len(), 5);
    ///
    /// assert_eq!(Line::parse("  -- a comment", 8).unwrap().kind, LineKind::Blank);
    /// ```
    pub fn parse(source: &str, number: usize) -> ParseResult<Self> {
        let trimmed = source.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            return Ok(Self { number,
                             kind: LineKind::Blank,
                             nodes: Vec::new() });
        }

        let items = lex(source, number)?;
        let kind = match items.first().map(|item| item.kind) {
            Some(ItemKind::If) => LineKind::If,
            Some(ItemKind::Else) => LineKind::Else,
            Some(ItemKind::Function) => LineKind::Function,
            Some(ItemKind::For) => LineKind::For,
            Some(ItemKind::Return) => LineKind::Return,
            Some(ItemKind::End) => LineKind::End,
            _ => LineKind::Basic,
        };

        let body = if kind == LineKind::Basic { &items[..] } else { &items[1..] };
        let nodes = build_nodes(body, number)?;

        Ok(Self { number, kind, nodes })
    }
}

/// Splits a program into classified lines, numbering them from 1.
///
/// # Errors
/// The first lexical error found.
pub fn parse_lines(source: &str) -> ParseResult<Vec<Line>> {
    source.lines()
          .enumerate()
          .map(|(i, text)| Line::parse(text, i + 1))
          .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(source: &str) -> LineKind {
        Line::parse(source, 1).unwrap().kind
    }

    #[test]
    fn classification_by_leading_keyword() {
        assert_eq!(kind("x = 1"), LineKind::Basic);
        assert_eq!(kind("if x > 1"), LineKind::If);
        assert_eq!(kind("else"), LineKind::Else);
        assert_eq!(kind("function f(a)"), LineKind::Function);
        assert_eq!(kind("for 1 -> 2"), LineKind::For);
        assert_eq!(kind("return a"), LineKind::Return);
        assert_eq!(kind("  end"), LineKind::End);
        assert_eq!(kind(""), LineKind::Blank);
        assert_eq!(kind("   "), LineKind::Blank);
        assert_eq!(kind("-- println(1)"), LineKind::Blank);
    }

    #[test]
    fn keyword_is_not_part_of_the_nodes() {
        let line = Line::parse("return 1", 3).unwrap();
        assert_eq!(line.nodes, vec![Node::Number(1.0)]);
        assert_eq!(line.number, 3);
    }

    #[test]
    fn lines_are_numbered_from_one() {
        let lines = parse_lines("x = 1\n\nprintln(x)").unwrap();
        let numbers: Vec<_> = lines.iter().map(|line| line.number).collect();
        assert_eq!(numbers, [1, 2, 3]);
    }

    #[test]
    fn lexical_errors_carry_the_line() {
        let err = parse_lines("x = 1\ny = 2 @ 3").unwrap_err();
        assert_eq!(err.to_string(),
                   "Error on line 2, position 6: Unrecognized character '@'.");
    }
}
