//! Lexer for the source language: turns source text into a token stream.
//!
//! The compiler pipeline proper (parser, semantic layer, type checker,
//! reactor translator) treats the lexer as an external collaborator — spec
//! section 6 only fixes its contract (token kinds, `new_line`/`end_of_file`
//! terminals, `(line, column)` on every token). This module gives that
//! contract a concrete implementation so the crate is runnable end to end.

use std::path::Path;

use signal_core::Location;
use thiserror::Error;

use crate::compiler::tokens::{
    BracketKind, Keyword, LiteralKind, LiteralToken, Operator, Punctuation, Side, Token, TokenKind,
};

#[derive(Debug, Error, PartialEq, Clone)]
pub enum LexError {
    #[error("{0}: unexpected character {1:?}")]
    UnexpectedChar(Location, char),
    #[error("{0}: unterminated text literal")]
    UnterminatedText(Location),
    #[error("{0}: invalid number literal")]
    InvalidNumber(Location),
}

impl LexError {
    pub fn location(&self) -> &Location {
        match self {
            LexError::UnexpectedChar(loc, _)
            | LexError::UnterminatedText(loc)
            | LexError::InvalidNumber(loc) => loc,
        }
    }
}

pub struct Lexer<'a> {
    path: &'a Path,
    source: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(path: &'a Path, source: &str) -> Self {
        Self {
            path,
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans the entire source into a token stream, ending with a single
    /// `end_of_file` terminal.
    pub fn tokenize(path: &'a Path, source: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Self::new(path, source);
        let mut tokens = Vec::new();
        loop {
            lexer.skip_inline_whitespace();
            if lexer.is_empty() {
                tokens.push(Token::new(TokenKind::EndOfFile, lexer.location()));
                return Ok(tokens);
            }
            let c = lexer.current();
            if c == '\n' {
                let loc = lexer.location();
                lexer.advance();
                tokens.push(Token::new(TokenKind::NewLine, loc));
                continue;
            }
            if c == '#' {
                while !lexer.is_empty() && lexer.current() != '\n' {
                    lexer.advance();
                }
                continue;
            }
            tokens.push(lexer.scan_token()?);
        }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current(&self) -> char {
        self.source[self.pos]
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    fn location(&self) -> Location {
        Location::new(self.path.to_string_lossy().into_owned(), self.line, self.column)
    }

    fn advance(&mut self) {
        if self.source[self.pos] == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn skip_inline_whitespace(&mut self) {
        while !self.is_empty() && (self.current() == ' ' || self.current() == '\t' || self.current() == '\r') {
            self.advance();
        }
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        let loc = self.location();
        let c = self.current();
        if c == '`' {
            self.advance();
            let name = self.scan_word();
            return Ok(Token::new(TokenKind::GenericIdentifier(name), loc));
        }
        if c.is_alphabetic() || c == '_' {
            let word = self.scan_word();
            if let Some(keyword) = Keyword::from_word(&word) {
                return Ok(Token::new(TokenKind::Keyword(keyword), loc));
            }
            return Ok(Token::new(TokenKind::Identifier(word), loc));
        }
        if c.is_ascii_digit() {
            return self.scan_number(loc);
        }
        if c == '"' {
            return self.scan_text(loc);
        }
        if let Some((kind, len)) = self.match_symbol() {
            for _ in 0..len {
                self.advance();
            }
            return Ok(Token::new(kind, loc));
        }
        Err(LexError::UnexpectedChar(loc, c))
    }

    fn scan_word(&mut self) -> String {
        let start = self.pos;
        while !self.is_empty() && (self.current().is_alphanumeric() || self.current() == '_') {
            self.advance();
        }
        self.source[start..self.pos].iter().collect()
    }

    fn scan_number(&mut self, loc: Location) -> Result<Token, LexError> {
        let start = self.pos;
        while !self.is_empty() && self.current().is_ascii_digit() {
            self.advance();
        }
        let mut is_float = false;
        if !self.is_empty() && self.current() == '.' && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while !self.is_empty() && self.current().is_ascii_digit() {
                self.advance();
            }
        }
        let text: String = self.source[start..self.pos].iter().collect();
        if !self.is_empty() && (self.current().is_alphabetic() || self.current() == '.') {
            return Err(LexError::InvalidNumber(loc));
        }
        let kind = if is_float {
            LiteralKind::Float
        } else {
            LiteralKind::Integer
        };
        Ok(Token::new(
            TokenKind::Literal(LiteralToken { text, kind }),
            loc,
        ))
    }

    fn scan_text(&mut self, loc: Location) -> Result<Token, LexError> {
        self.advance();
        let start = self.pos;
        while !self.is_empty() && self.current() != '"' {
            self.advance();
        }
        if self.is_empty() {
            return Err(LexError::UnterminatedText(loc));
        }
        let text: String = self.source[start..self.pos].iter().collect();
        self.advance();
        Ok(Token::new(
            TokenKind::Literal(LiteralToken {
                text,
                kind: LiteralKind::Text,
            }),
            loc,
        ))
    }

    /// Matches the longest fixed symbol (bracket, operator, punctuation)
    /// starting at the current position, returning its token kind and
    /// length in characters.
    fn match_symbol(&self) -> Option<(TokenKind, usize)> {
        let two: Option<(char, char)> = self.peek(0).zip(self.peek(1));
        if let Some((a, b)) = two {
            let kind = match (a, b) {
                ('=', '=') => Some(TokenKind::Operator(Operator::Eq)),
                ('!', '=') => Some(TokenKind::Operator(Operator::NotEq)),
                ('<', '=') => Some(TokenKind::Operator(Operator::LtEq)),
                ('>', '=') => Some(TokenKind::Operator(Operator::GtEq)),
                ('-', '>') => Some(TokenKind::Punctuation(Punctuation::Arrow)),
                _ => None,
            };
            if let Some(kind) = kind {
                return Some((kind, 2));
            }
        }
        let kind = match self.current() {
            '(' => TokenKind::Bracket(BracketKind::Round, Side::Open),
            ')' => TokenKind::Bracket(BracketKind::Round, Side::Close),
            '[' => TokenKind::Bracket(BracketKind::Square, Side::Open),
            ']' => TokenKind::Bracket(BracketKind::Square, Side::Close),
            '{' => TokenKind::Bracket(BracketKind::Curly, Side::Open),
            '}' => TokenKind::Bracket(BracketKind::Curly, Side::Close),
            ':' => TokenKind::Punctuation(Punctuation::Colon),
            ',' => TokenKind::Punctuation(Punctuation::Comma),
            '=' => TokenKind::Punctuation(Punctuation::Assign),
            '<' => TokenKind::Operator(Operator::Lt),
            '>' => TokenKind::Operator(Operator::Gt),
            '+' => TokenKind::Operator(Operator::Add),
            '-' => TokenKind::Operator(Operator::Sub),
            '*' => TokenKind::Operator(Operator::Mul),
            '/' => TokenKind::Operator(Operator::Div),
            '.' => TokenKind::Punctuation(Punctuation::Dot),
            _ => return None,
        };
        Some((kind, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tokenize(source: &str) -> Vec<TokenKind> {
        let path = PathBuf::from("test.sg");
        Lexer::tokenize(&path, source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn keyword_matches_exactly() {
        assert_eq!(tokenize("let"), vec![TokenKind::Keyword(Keyword::Let), TokenKind::EndOfFile]);
        assert_eq!(
            tokenize("lets"),
            vec![TokenKind::Identifier("lets".to_string()), TokenKind::EndOfFile]
        );
    }

    #[test]
    fn keyword_stops_at_non_identifier_char() {
        let tokens = tokenize("let+");
        assert_eq!(tokens[0], TokenKind::Keyword(Keyword::Let));
        assert_eq!(tokens[1], TokenKind::Operator(Operator::Add));
    }

    #[test]
    fn numbers_distinguish_integer_from_float() {
        assert_eq!(
            tokenize("42"),
            vec![
                TokenKind::Literal(LiteralToken {
                    text: "42".to_string(),
                    kind: LiteralKind::Integer
                }),
                TokenKind::EndOfFile
            ]
        );
        assert_eq!(
            tokenize("4.2"),
            vec![
                TokenKind::Literal(LiteralToken {
                    text: "4.2".to_string(),
                    kind: LiteralKind::Float
                }),
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn backtick_identifier_is_generic() {
        assert_eq!(
            tokenize("`T"),
            vec![TokenKind::GenericIdentifier("T".to_string()), TokenKind::EndOfFile]
        );
    }

    #[test]
    fn text_literal_preserves_contents_verbatim() {
        assert_eq!(
            tokenize("\"hi there\""),
            vec![
                TokenKind::Literal(LiteralToken {
                    text: "hi there".to_string(),
                    kind: LiteralKind::Text
                }),
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn dot_is_a_standalone_punctuation() {
        assert_eq!(
            tokenize("Color.Red"),
            vec![
                TokenKind::Identifier("Color".to_string()),
                TokenKind::Punctuation(Punctuation::Dot),
                TokenKind::Identifier("Red".to_string()),
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn arrow_is_one_token() {
        assert_eq!(
            tokenize("->"),
            vec![TokenKind::Punctuation(Punctuation::Arrow), TokenKind::EndOfFile]
        );
    }
}
