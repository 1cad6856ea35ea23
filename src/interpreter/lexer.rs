use std::fmt;

use logos::Logos;

use crate::{ast::Operator, error::ParseError, interpreter::parser::core::ParseResult};

/// Raw lexemes recognised by the scanner.
///
/// Words are matched as one class and classified afterwards into numbers,
/// keywords and identifiers, so that `1.5`, `end` and `end_time` all go
/// through the same path. Runs of operator characters are matched greedily and
/// validated against the operator table afterwards.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// `"text"`, without escape processing.
    #[regex(r#""[^"]*""#, |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    }, allow_greedy = true)]
    Str(String),
    /// Numbers that start with `-` or `.`, such as `-3`, `-2.5`, `-.5` or `.87`.
    #[regex(r"-[0-9]+(\.[0-9]*)?", |lex| lex.slice().to_string())]
    #[regex(r"-?\.[0-9]+", |lex| lex.slice().to_string())]
    SignedNumber(String),
    /// Letters, digits, `_` and `.`: identifiers, keywords and plain numbers.
    #[regex(r"\w[\w.]*", |lex| lex.slice().to_string())]
    Word(String),
    /// A maximal run of operator characters.
    #[regex(r"[+\-*/^=<>!&|]+", |lex| lex.slice().to_string())]
    Operator(String),
    /// `(`
    #[token("(")]
    OpenParen,
    /// `)`
    #[token(")")]
    CloseParen,
    /// `,`
    #[token(",")]
    Comma,
    /// Whitespace.
    #[regex(r"\s+", logos::skip)]
    Ignored,
}

/// The category of an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Number,
    Boolean,
    String,
    Operator,
    Identifier,
    OpenParen,
    CloseParen,
    Comma,
    If,
    Else,
    Function,
    Return,
    End,
    For,
    EndOfInput,
}

impl ItemKind {
    /// Classifies a word against the reserved words of the language.
    fn from_word(word: &str) -> Self {
        match word {
            "if" => Self::If,
            "else" => Self::Else,
            "true" | "false" => Self::Boolean,
            "return" => Self::Return,
            "function" => Self::Function,
            "end" => Self::End,
            "for" => Self::For,
            _ => Self::Identifier,
        }
    }

    /// Items after which a `-` is a binary minus rather than a sign.
    const fn ends_value(self) -> bool {
        matches!(self,
                 Self::Number | Self::Boolean | Self::String | Self::Identifier | Self::CloseParen)
    }

    /// `true` for `if`, `else`, `function`, `return`, `end` and `for`.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(self,
                 Self::If | Self::Else | Self::Function | Self::Return | Self::End | Self::For)
    }
}

/// A lexical token: what it is, how it was written and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// The category of the item.
    pub kind:     ItemKind,
    /// The source text. String items hold their contents without quotes.
    pub text:     String,
    /// 0-based character offset of the first character within the line.
    /// Multibyte characters count as one.
    pub position: usize,
}

/// Returned by [`item_at`] for any index past the last item.
pub static END_OF_INPUT: Item = Item { kind:     ItemKind::EndOfInput,
                                       text:     String::new(),
                                       position: usize::MAX, };

impl Item {
    fn new(kind: ItemKind, text: impl Into<String>, position: usize) -> Self {
        Self { kind,
               text: text.into(),
               position }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Returns the item at `index`, or [`END_OF_INPUT`] when out of range.
///
/// # Example
/// ```
/// use blast::interpreter::lexer::{ItemKind, item_at, lex};
///
/// let items = lex("x", 1).unwrap();
/// assert_eq!(item_at(&items, 0).kind, ItemKind::Identifier);
/// assert_eq!(item_at(&items, 5).kind, ItemKind::EndOfInput);
/// ```
#[must_use]
pub fn item_at(items: &[Item], index: usize) -> &Item {
    items.get(index).unwrap_or(&END_OF_INPUT)
}

/// Scans one line of source into items.
///
/// A `-` directly followed by a digit or `.` belongs to the number unless the
/// previous item ends a value, in which case it is split off as a binary
/// minus. Words that start with a digit and read as a float are numbers.
///
/// # Errors
/// - `UnrecognizedCharacter` for a character that starts no lexeme, including
///   an unterminated string.
/// - `InvalidOperator` for a run of operator characters that is not an
///   operator, such as `=>` or `--`.
///
/// # Example
/// ```
/// use blast::interpreter::lexer::{ItemKind, lex};
///
/// let items = lex("300 - -30", 1).unwrap();
/// let texts: Vec<_> = items.iter().map(|item| item.text.as_str()).collect();
/// assert_eq!(texts, ["300", "-", "-30"]);
///
/// let items = lex("x-1", 1).unwrap();
/// assert_eq!(items[1].kind, ItemKind::Operator);
/// assert_eq!(items[2].text, "1");
/// ```
pub fn lex(source: &str, line: usize) -> ParseResult<Vec<Item>> {
    let mut items: Vec<Item> = Vec::new();
    let mut lexer = Token::lexer(source);
    let mut offset = CharOffset::default();

    while let Some(token) = lexer.next() {
        let position = offset.at(source, lexer.span().start);
        let Ok(token) = token else {
            let character = lexer.slice().chars().next().unwrap_or('"');
            return Err(ParseError::UnrecognizedCharacter { character,
                                                           position,
                                                           line });
        };

        let previous = items.last().map(|item| item.kind);

        match token {
            Token::Str(text) => items.push(Item::new(ItemKind::String, text, position)),
            Token::SignedNumber(text) => {
                if let Some(unsigned) = text.strip_prefix('-')
                   && previous.is_some_and(ItemKind::ends_value)
                {
                    items.push(Item::new(ItemKind::Operator, "-", position));
                    items.push(Item::new(ItemKind::Number, unsigned, position + 1));
                } else {
                    items.push(Item::new(ItemKind::Number, text, position));
                }
            },
            Token::Word(text) => {
                let kind = if reads_as_number(&text) {
                    ItemKind::Number
                } else {
                    ItemKind::from_word(&text)
                };
                items.push(Item::new(kind, text, position));
            },
            Token::Operator(text) => {
                if Operator::from_symbol(&text).is_none() {
                    return Err(ParseError::InvalidOperator { operator: text,
                                                             position,
                                                             line });
                }
                items.push(Item::new(ItemKind::Operator, text, position));
            },
            Token::OpenParen => items.push(Item::new(ItemKind::OpenParen, "(", position)),
            Token::CloseParen => items.push(Item::new(ItemKind::CloseParen, ")", position)),
            Token::Comma => items.push(Item::new(ItemKind::Comma, ",", position)),
            Token::Ignored => {},
        }
    }

    Ok(items)
}

/// Converts byte offsets of increasing value into character offsets without
/// rescanning the line from its start.
#[derive(Default)]
struct CharOffset {
    byte:  usize,
    chars: usize,
}

impl CharOffset {
    fn at(&mut self, source: &str, byte: usize) -> usize {
        self.chars += source[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

/// A word is a number when it starts with a digit and parses as a float.
///
/// Requiring the leading digit keeps names like `inf` or `nan` identifiers.
fn reads_as_number(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit()) && word.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<ItemKind> {
        lex(source, 1).unwrap().into_iter().map(|item| item.kind).collect()
    }

    #[test]
    fn words_are_classified() {
        assert_eq!(kinds("if x1 else 2.5 true end_time"),
                   [ItemKind::If,
                    ItemKind::Identifier,
                    ItemKind::Else,
                    ItemKind::Number,
                    ItemKind::Boolean,
                    ItemKind::Identifier]);
    }

    #[test]
    fn strings_lose_their_quotes() {
        let items = lex("\"a b\" + \"\"", 1).unwrap();

        assert_eq!(items[0].kind, ItemKind::String);
        assert_eq!(items[0].text, "a b");
        assert_eq!(items[2].text, "");
    }

    #[test]
    fn unterminated_string_points_at_the_quote() {
        assert_eq!(lex("x = \"abc", 3),
                   Err(ParseError::UnrecognizedCharacter { character: '"',
                                                           position:  4,
                                                           line:      3, }));
    }

    #[test]
    fn positions_count_characters() {
        let items = lex("\"\u{e9}t\u{e9}\" + x", 1).unwrap();
        let positions: Vec<_> = items.iter().map(|item| item.position).collect();
        assert_eq!(positions, [0, 6, 8]);

        assert_eq!(lex("name = \"h\u{e9}llo\" $", 2),
                   Err(ParseError::UnrecognizedCharacter { character: '$',
                                                           position:  15,
                                                           line:      2, }));
    }

    #[test]
    fn split_minus_keeps_positions() {
        let items = lex("\u{e9}-1", 1).unwrap();
        let positions: Vec<_> = items.iter().map(|item| item.position).collect();

        assert_eq!(kinds("\u{e9}-1"),
                   [ItemKind::Identifier, ItemKind::Operator, ItemKind::Number]);
        assert_eq!(positions, [0, 1, 2]);
    }

    #[test]
    fn invalid_operators_are_rejected() {
        assert!(matches!(lex("a => b", 1),
                         Err(ParseError::InvalidOperator { position: 2, .. })));
        assert!(matches!(lex("a % b", 1),
                         Err(ParseError::UnrecognizedCharacter { character: '%', .. })));
    }
}
