use crate::{
    ast::{Node, Operator, Paren},
    error::ParseError,
    interpreter::lexer::{Item, ItemKind, item_at},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Converts lexical items into nodes.
///
/// An identifier immediately followed by `(` becomes a function call, any
/// other identifier a variable reference. Keywords become `Reserved` nodes so
/// that the line classifier and the header parsers can still see them.
///
/// # Parameters
/// - `items`: The items of one line.
/// - `line`: Line number, for error reporting.
///
/// # Returns
/// One node per item, in source order.
///
/// # Errors
/// - `InvalidNumber` if a number item cannot be read as an `f64`.
///
/// # Example
/// ```
/// use blast::{
///     ast::Node,
///     interpreter::{lexer::lex, parser::core::build_nodes},
/// };
///
/// let nodes = build_nodes(&lex("max(x, 1)", 1).unwrap(), 1).unwrap();
/// assert_eq!(nodes[0], Node::FunctionCall("max".to_string()));
/// assert_eq!(nodes[2], Node::Variable("x".to_string()));
/// ```
pub fn build_nodes(items: &[Item], line: usize) -> ParseResult<Vec<Node>> {
    let mut nodes = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let node = match item.kind {
            ItemKind::Number => Node::Number(parse_number(&item.text, line)?),
            ItemKind::Boolean => Node::Boolean(item.text == "true"),
            ItemKind::String => Node::String(item.text.clone()),
            ItemKind::Operator => match Operator::from_symbol(&item.text) {
                Some(op) => Node::Operator(op),
                None => {
                    return Err(ParseError::InvalidOperator { operator: item.text.clone(),
                                                             position: item.position,
                                                             line });
                },
            },
            ItemKind::Identifier => {
                if item_at(items, i + 1).kind == ItemKind::OpenParen {
                    Node::FunctionCall(item.text.clone())
                } else {
                    Node::Variable(item.text.clone())
                }
            },
            ItemKind::OpenParen => Node::Paren(Paren::Open),
            ItemKind::CloseParen => Node::Paren(Paren::Close),
            ItemKind::Comma => Node::Comma,
            ItemKind::If
            | ItemKind::Else
            | ItemKind::Function
            | ItemKind::Return
            | ItemKind::End
            | ItemKind::For => Node::Reserved(item.text.clone()),
            ItemKind::EndOfInput => break,
        };
        nodes.push(node);
    }

    Ok(nodes)
}

/// Reads a number literal.
///
/// Literals such as `5.` or `-.5` are accepted in addition to what `f64`'s
/// parser takes directly.
fn parse_number(text: &str, line: usize) -> ParseResult<f64> {
    let trimmed = text.strip_suffix('.').unwrap_or(text);
    trimmed.parse::<f64>()
           .or_else(|_| text.parse::<f64>())
           .map_err(|_| ParseError::InvalidNumber { text: text.to_string(),
                                                    line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::lex;

    fn nodes(source: &str) -> Vec<Node> {
        build_nodes(&lex(source, 1).unwrap(), 1).unwrap()
    }

    #[test]
    fn literals_keep_their_values() {
        assert_eq!(nodes("x2,x1,91,-99.9,-.78 .87"),
                   vec![Node::Variable("x2".into()),
                        Node::Comma,
                        Node::Variable("x1".into()),
                        Node::Comma,
                        Node::Number(91.0),
                        Node::Comma,
                        Node::Number(-99.9),
                        Node::Comma,
                        Node::Number(-0.78),
                        Node::Number(0.87)]);
    }

    #[test]
    fn keywords_become_reserved() {
        assert_eq!(nodes("for 1 -> 20, i, 2"),
                   vec![Node::Reserved("for".into()),
                        Node::Number(1.0),
                        Node::Operator(Operator::Arrow),
                        Node::Number(20.0),
                        Node::Comma,
                        Node::Variable("i".into()),
                        Node::Comma,
                        Node::Number(2.0)]);
    }

    #[test]
    fn trailing_dot_numbers() {
        assert_eq!(nodes("5."), vec![Node::Number(5.0)]);
        assert_eq!(nodes("-5."), vec![Node::Number(-5.0)]);
    }
}
