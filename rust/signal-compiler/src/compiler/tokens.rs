//! The token stream contract consumed by the parser (spec section 6).
//!
//! The lexer that produces this stream is an external collaborator in the
//! language spec, but a runnable crate needs one, so `lexer.rs` implements
//! it here against this same contract.

use serde::{Deserialize, Serialize};
use signal_core::Location;
use std::fmt;

/// Reserved words. `lets` is never mistaken for `let` — the lexer only
/// emits a `Keyword` once the whole identifier has been consumed and
/// matched exactly (spec section 6: "no keyword prefix match").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyword {
    Let,
    Def,
    End,
    Enum,
    And,
    Or,
    Not,
    True,
    False,
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Keyword> {
        Some(match word {
            "let" => Keyword::Let,
            "def" => Keyword::Def,
            "end" => Keyword::End,
            "enum" => Keyword::Enum,
            "and" => Keyword::And,
            "or" => Keyword::Or,
            "not" => Keyword::Not,
            "true" => Keyword::True,
            "false" => Keyword::False,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketKind {
    Round,
    Square,
    Curly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Punctuation {
    Colon,
    Comma,
    Arrow,
    Assign,
    Dot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralKind {
    Bool,
    Integer,
    Float,
    Text,
}

/// A literal's textual form, preserved verbatim as parsed (spec section 3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralToken {
    pub text: String,
    pub kind: LiteralKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    Identifier(String),
    /// A backtick-prefixed identifier in a type position, e.g. `` `T ``.
    GenericIdentifier(String),
    Keyword(Keyword),
    Literal(LiteralToken),
    Bracket(BracketKind, Side),
    Operator(Operator),
    Punctuation(Punctuation),
    NewLine,
    EndOfFile,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(s) => write!(f, "identifier `{s}`"),
            TokenKind::GenericIdentifier(s) => write!(f, "generic identifier `` `{s} ``"),
            TokenKind::Keyword(k) => write!(f, "keyword `{k:?}`"),
            TokenKind::Literal(l) => write!(f, "literal `{}`", l.text),
            TokenKind::Bracket(k, s) => write!(f, "{s:?} {k:?} bracket"),
            TokenKind::Operator(o) => write!(f, "operator `{o:?}`"),
            TokenKind::Punctuation(p) => write!(f, "punctuation `{p:?}`"),
            TokenKind::NewLine => write!(f, "new line"),
            TokenKind::EndOfFile => write!(f, "end of file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn is_new_line(&self) -> bool {
        matches!(self.kind, TokenKind::NewLine)
    }

    pub fn is_end_of_file(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfFile)
    }
}
