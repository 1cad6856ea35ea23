use crate::{
    ast::{Expression, Node, Operator, Paren},
    error::ParseError,
    interpreter::parser::core::ParseResult,
};

/// The header of a `for` block: `start -> end[, counter[, step]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForDeclaration {
    pub start:   Expression,
    pub end:     Expression,
    /// Name the current value is bound to on every iteration.
    pub counter: Option<String>,
    /// Explicit step. Without one the loop counts toward `end` by 1.
    pub step:    Option<Expression>,
}

impl ForDeclaration {
    /// Reads a `for` header from the nodes following the keyword.
    ///
    /// # Errors
    /// `MalformedFor` when the `->` is missing, a bound or the step is empty,
    /// the counter is not a plain name or there are too many parts.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::parser::{declaration::ForDeclaration, line::Line};
    ///
    /// let line = Line::parse("for 1 -> 20, i, 2", 1).unwrap();
    /// let header = ForDeclaration::parse(&line.nodes, 1).unwrap();
    ///
    /// assert_eq!(header.counter.as_deref(), Some("i"));
    /// assert_eq!(header.end.to_string(), "20");
    /// assert!(header.step.is_some());
    /// ```
    pub fn parse(nodes: &[Node], line: usize) -> ParseResult<Self> {
        let malformed = |details: &str| ParseError::MalformedFor { details: details.to_string(),
                                                                   line };

        let groups = split_top_level(nodes, |node| *node == Node::Comma);
        if groups.len() > 3 {
            return Err(malformed("expected at most a range, a counter and a step"));
        }

        let range = groups[0];
        let arrow = split_top_level(range, |node| *node == Node::Operator(Operator::Arrow));
        let &[start, end] = arrow.as_slice() else {
            return Err(malformed("expected exactly one '->' between the bounds"));
        };
        if start.is_empty() || end.is_empty() {
            return Err(malformed("both bounds of the range are required"));
        }

        let counter = match groups.get(1) {
            None => None,
            Some([Node::Variable(name)]) => Some(name.clone()),
            Some(_) => return Err(malformed("the counter must be a single name")),
        };

        let step = match groups.get(2) {
            None => None,
            Some([]) => return Err(malformed("the step is empty")),
            Some(step) => Some(Expression::new(step.to_vec(), line)?),
        };

        Ok(Self { start: Expression::new(start.to_vec(), line)?,
                  end: Expression::new(end.to_vec(), line)?,
                  counter,
                  step })
    }
}

/// One parameter of a function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name:    String,
    /// Evaluated in the callee's frame when the call omits the argument.
    pub default: Option<Expression>,
}

/// The header of a `function` block: `name(p1, p2 = default, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionHeader {
    pub name:   String,
    pub params: Vec<Param>,
}

impl FunctionHeader {
    /// Reads a function header from the nodes following the keyword.
    ///
    /// # Errors
    /// `MalformedFunction` when the name or the parameter list is missing,
    /// when a parameter is not a name, or when a default is empty.
    ///
    /// # Example
    /// ```
    /// use blast::interpreter::parser::{declaration::FunctionHeader, line::Line};
    ///
    /// let line = Line::parse("function f(a, b = a + 1)", 1).unwrap();
    /// let header = FunctionHeader::parse(&line.nodes, 1).unwrap();
    ///
    /// assert_eq!(header.name, "f");
    /// assert_eq!(header.params[0].name, "a");
    /// assert_eq!(header.params[1].default.as_ref().unwrap().to_string(), "a + 1");
    /// ```
    pub fn parse(nodes: &[Node], line: usize) -> ParseResult<Self> {
        let malformed = |details: String| ParseError::MalformedFunction { details, line };

        let Some((Node::FunctionCall(name), rest)) = nodes.split_first() else {
            return Err(malformed("expected a name followed by '('".to_string()));
        };
        let [Node::Paren(Paren::Open), inner @ .., Node::Paren(Paren::Close)] = rest else {
            return Err(malformed(format!("the parameters of '{name}' must be enclosed in parentheses")));
        };
        if inner.is_empty() {
            return Ok(Self { name:   name.clone(),
                             params: Vec::new(), });
        }

        let mut params: Vec<Param> = Vec::new();
        for group in split_top_level(inner, |node| *node == Node::Comma) {
            let param = match group {
                [Node::Variable(param)] => Param { name:    param.clone(),
                                                   default: None, },
                [Node::Variable(param), Node::Operator(Operator::Assign), default @ ..]
                    if !default.is_empty() =>
                {
                    Param { name:    param.clone(),
                            default: Some(Expression::new(default.to_vec(), line)?), }
                },
                _ => {
                    let text = group.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
                    return Err(malformed(format!("'{text}' is not a parameter")));
                },
            };
            if params.iter().any(|p| p.name == param.name) {
                return Err(malformed(format!("parameter '{}' is declared twice", param.name)));
            }
            params.push(param);
        }

        Ok(Self { name: name.clone(),
                  params })
    }
}

/// Splits `nodes` at every separator that is not nested in parentheses.
///
/// Always returns at least one group, which may be empty.
fn split_top_level<F>(nodes: &[Node], is_separator: F) -> Vec<&[Node]>
    where F: Fn(&Node) -> bool
{
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, node) in nodes.iter().enumerate() {
        match node {
            Node::Paren(Paren::Open) => depth += 1,
            Node::Paren(Paren::Close) => depth = depth.saturating_sub(1),
            _ if depth == 0 && is_separator(node) => {
                groups.push(&nodes[start..i]);
                start = i + 1;
            },
            _ => {},
        }
    }
    groups.push(&nodes[start..]);

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::line::Line;

    fn for_header(source: &str) -> ParseResult<ForDeclaration> {
        ForDeclaration::parse(&Line::parse(source, 2).unwrap().nodes, 2)
    }

    fn function_header(source: &str) -> ParseResult<FunctionHeader> {
        FunctionHeader::parse(&Line::parse(source, 5).unwrap().nodes, 5)
    }

    #[test]
    fn for_header_parts() {
        let header = for_header("for 1 -> 3").unwrap();
        assert_eq!(header.start.to_string(), "1");
        assert_eq!(header.counter, None);
        assert_eq!(header.step, None);

        let header = for_header("for max(1, 2) -> n * 2, i").unwrap();
        assert_eq!(header.start.to_string(), "max ( 1 , 2 )");
        assert_eq!(header.end.to_string(), "n * 2");
        assert_eq!(header.counter.as_deref(), Some("i"));
    }

    #[test]
    fn for_header_errors() {
        assert!(matches!(for_header("for 1, i"), Err(ParseError::MalformedFor { line: 2, .. })));
        assert!(matches!(for_header("for -> 3"), Err(ParseError::MalformedFor { .. })));
        assert!(matches!(for_header("for 1 -> 3, 4"), Err(ParseError::MalformedFor { .. })));
        assert!(matches!(for_header("for 1 -> 3, i, 1, 2"), Err(ParseError::MalformedFor { .. })));
        assert!(matches!(for_header("for 1 -> 2 -> 3"), Err(ParseError::MalformedFor { .. })));
    }

    #[test]
    fn function_header_parts() {
        let header = function_header("function greet()").unwrap();
        assert_eq!(header.name, "greet");
        assert!(header.params.is_empty());

        let header = function_header("function f(p1 = 1, p2, p3 = max(1, 2))").unwrap();
        let names: Vec<_> = header.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["p1", "p2", "p3"]);
        assert!(header.params[1].default.is_none());
        assert_eq!(header.params[2].default.as_ref().unwrap().to_string(), "max ( 1 , 2 )");
    }

    #[test]
    fn function_header_errors() {
        for source in ["function", "function f", "function f(a", "function f(1)", "function f(a =)",
                       "function f(a,, b)", "function f(a, a)", "function f(a) b"]
        {
            assert!(matches!(function_header(source),
                             Err(ParseError::MalformedFunction { line: 5, .. })),
                    "{source}");
        }
    }
}
