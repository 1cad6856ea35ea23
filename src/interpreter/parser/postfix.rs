use crate::{
    ast::{Node, Operator, Paren},
    error::ParseError,
    interpreter::parser::core::ParseResult,
};

/// Reorders infix nodes into postfix (reverse Polish) order.
///
/// This is the shunting-yard algorithm, extended with argument counting: every
/// function call is emitted right after its arguments and followed by an
/// `ArgCount` node telling the evaluator how many values it consumes.
///
/// Operators pop every operator of higher precedence off the stack, and those
/// of equal precedence as well unless the incoming operator is `^`, the only
/// right-associative one. Unmatched parentheses and unclosed calls are dropped
/// when the stack is drained at the end.
///
/// # Parameters
/// - `nodes`: The nodes of one expression, in source order.
/// - `line`: Line number, for error reporting.
///
/// # Returns
/// The nodes in evaluation order, without parentheses or commas.
///
/// # Errors
/// - `UnexpectedKeyword` if a keyword appears inside the expression.
///
/// # Example
/// ```
/// use blast::{
///     ast::{Node, Operator},
///     interpreter::parser::postfix::to_postfix,
/// };
///
/// let infix = [Node::Number(2.0),
///              Node::Operator(Operator::Add),
///              Node::Number(2.0),
///              Node::Operator(Operator::Mul),
///              Node::Number(3.0)];
///
/// assert_eq!(to_postfix(&infix, 1).unwrap(),
///            [Node::Number(2.0),
///             Node::Number(2.0),
///             Node::Number(3.0),
///             Node::Operator(Operator::Mul),
///             Node::Operator(Operator::Add)]);
/// ```
pub fn to_postfix(nodes: &[Node], line: usize) -> ParseResult<Vec<Node>> {
    let mut output = Vec::with_capacity(nodes.len());
    let mut stack: Vec<Node> = Vec::new();
    let mut arg_counts: Vec<usize> = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        match node {
            Node::Number(_)
            | Node::Boolean(_)
            | Node::String(_)
            | Node::Variable(_)
            | Node::ArgCount(_)
            | Node::Nil => output.push(node.clone()),
            Node::FunctionCall(_) => {
                let no_arguments = matches!(nodes.get(i + 2), Some(Node::Paren(Paren::Close)));
                arg_counts.push(usize::from(!no_arguments));
                stack.push(node.clone());
            },
            Node::Comma => {
                if let Some(count) = arg_counts.last_mut() {
                    *count += 1;
                }
                while let Some(Node::Operator(_)) = stack.last() {
                    output.extend(stack.pop());
                }
            },
            Node::Operator(op) => {
                while let Some(Node::Operator(top)) = stack.last()
                      && pops_before(*top, *op)
                {
                    output.extend(stack.pop());
                }
                stack.push(node.clone());
            },
            Node::Paren(Paren::Open) => stack.push(node.clone()),
            Node::Paren(Paren::Close) => {
                while let Some(top) = stack.pop() {
                    if top == Node::Paren(Paren::Open) {
                        break;
                    }
                    output.push(top);
                }
                if let Some(Node::FunctionCall(_)) = stack.last() {
                    output.extend(stack.pop());
                    output.push(Node::ArgCount(arg_counts.pop().unwrap_or_default()));
                }
            },
            Node::Reserved(keyword) => {
                return Err(ParseError::UnexpectedKeyword { keyword: keyword.clone(),
                                                           line });
            },
        }
    }

    while let Some(top) = stack.pop() {
        if let Node::Operator(_) = top {
            output.push(top);
        }
    }

    Ok(output)
}

/// Whether `top`, already on the operator stack, is emitted before `incoming`
/// is pushed.
fn pops_before(top: Operator, incoming: Operator) -> bool {
    top.precedence() > incoming.precedence()
    || (top.precedence() == incoming.precedence() && !incoming.is_right_associative())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{lexer::lex, parser::core::build_nodes};

    fn postfix(source: &str) -> String {
        let nodes = build_nodes(&lex(source, 1).unwrap(), 1).unwrap();
        to_postfix(&nodes, 1).unwrap()
                             .iter()
                             .map(ToString::to_string)
                             .collect::<Vec<_>>()
                             .join(" ")
    }

    #[test]
    fn precedence_and_grouping() {
        assert_eq!(postfix("2 + 2 * 3"), "2 2 3 * +");
        assert_eq!(postfix("(2 + 2) * 3"), "2 2 + 3 *");
        assert_eq!(postfix("1 - 2 - 3"), "1 2 - 3 -");
        assert_eq!(postfix("a < b && b < c"), "a b < b c < &&");
    }

    #[test]
    fn power_groups_to_the_right() {
        assert_eq!(postfix("2 ^ 3 ^ 2"), "2 3 2 ^ ^");
    }

    #[test]
    fn assignment_binds_loosest() {
        assert_eq!(postfix("x = 1 + 2"), "x 1 2 + =");
    }

    #[test]
    fn calls_are_followed_by_their_argument_count() {
        assert_eq!(postfix("max(min(33, 413), 300, 102)"),
                   "33 413 min <2> 300 102 max <3>");
        assert_eq!(postfix("f()"), "f <0>");
        assert_eq!(postfix("f(1 + 2)"), "1 2 + f <1>");
        assert_eq!(postfix("2 * f(3)"), "2 3 f <1> *");
    }

    #[test]
    fn keywords_are_rejected() {
        let nodes = build_nodes(&lex("1 + end", 4).unwrap(), 4).unwrap();
        assert_eq!(to_postfix(&nodes, 4),
                   Err(ParseError::UnexpectedKeyword { keyword: "end".to_string(),
                                                       line:    4, }));
    }
}
