//! The syntactic parser: token stream → AST, with scope side effects (spec
//! §4.1). Populates the `Arena`/`Scope` it is handed as it parses — a
//! `Variable`/`Function` exists in the arena the moment its binding is
//! parsed, not once the whole program is.

use std::collections::HashMap;

use signal_core::Location;
use thiserror::Error;

use crate::compiler::ast::{EnumVariant, Expr, Literal, NodeIdGen, Param, Stmt, UnaryOp};
use crate::compiler::data_type::{DataType, GenericVar, Parameter};
use crate::compiler::semantic::{Arena, Element, Scope, Variable};
use crate::compiler::tokens::{BracketKind, Keyword, Operator, Punctuation, Side, Token, TokenKind};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("{location}: expected {expected}")]
    MissingToken { location: Location, expected: String },
    #[error("{location}: expected a statement")]
    StatementExpected { location: Location },
    #[error("{location}: expected an expression")]
    ExpressionExpected { location: Location },
    #[error("{location}: expected a new line or end of input")]
    NewLineExpected { location: Location },
    #[error("{location}: parameter `{name}` is already defined")]
    FunctionParameterAlreadyDefined { location: Location, name: String },
    #[error("{location}: `{name}` is already defined")]
    Redefinition {
        location: Location,
        name: String,
        original: Location,
    },
    /// An identifier with no binding visible from the current scope. Spec
    /// §7 groups this with `VARIABLE_NOT_FOUND`; it stays a distinct
    /// `ParseError` variant here because a name must already resolve to a
    /// `VariableId`/`FunctionId` by the time the parser builds an
    /// `Expr::Variable`/`Expr::Function` node (the type checker's
    /// `TypeError::VariableNotFound` covers a variable that resolved but
    /// whose type is still undetermined — a different failure).
    #[error("{location}: `{name}` is not defined")]
    VariableNotFound { location: Location, name: String },
}

impl ParseError {
    pub fn location(&self) -> &Location {
        match self {
            ParseError::MissingToken { location, .. }
            | ParseError::StatementExpected { location }
            | ParseError::ExpressionExpected { location }
            | ParseError::NewLineExpected { location }
            | ParseError::FunctionParameterAlreadyDefined { location, .. }
            | ParseError::Redefinition { location, .. }
            | ParseError::VariableNotFound { location, .. } => location,
        }
    }
}

/// Assigns a fresh, monotonic generic index to each distinct backtick-name
/// seen while parsing one function signature (spec §4.1: "`m_generic_index`
/// starting from 0, so that two occurrences of the same backtick-name
/// within one signature share an index").
#[derive(Default)]
struct GenericIndex(HashMap<String, u32>);

impl GenericIndex {
    fn resolve(&mut self, name: &str) -> u32 {
        let next = self.0.len() as u32;
        *self.0.entry(name.to_string()).or_insert(next)
    }
}

pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    bracket_depth: u32,
    arena: &'a mut Arena,
    ids: NodeIdGen,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, arena: &'a mut Arena) -> Self {
        Self {
            tokens,
            pos: 0,
            bracket_depth: 0,
            arena,
            ids: NodeIdGen::new(),
        }
    }

    /// Appends more tokens to the stream, replacing a trailing
    /// `end_of_file` if one is already present (spec §4.1 "Incrementality":
    /// a caller that received a recoverable error feeds more tokens and
    /// retries from the same position).
    pub fn feed(&mut self, mut more: Vec<Token>) {
        if self.tokens.last().is_some_and(Token::is_end_of_file) {
            self.tokens.pop();
        }
        self.tokens.append(&mut more);
    }

    pub fn parse_program(&mut self, scope: &Scope) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        loop {
            let stmt = self.parse_node(scope)?;
            let terminal = stmt.is_terminal();
            stmts.push(stmt);
            if terminal {
                return Ok(stmts);
            }
        }
    }

    /// Parses the next top-level statement, or the terminal marker at end
    /// of input. On error, rewinds to the position held before this call
    /// started so a caller can `feed` more tokens and retry cleanly (spec
    /// §4.1 "Incrementality").
    pub fn parse_node(&mut self, scope: &Scope) -> Result<Stmt, ParseError> {
        let checkpoint = self.pos;
        let bracket_checkpoint = self.bracket_depth;
        match self.parse_node_inner(scope) {
            Ok(stmt) => Ok(stmt),
            Err(err) => {
                self.pos = checkpoint;
                self.bracket_depth = bracket_checkpoint;
                Err(err)
            }
        }
    }

    fn parse_node_inner(&mut self, scope: &Scope) -> Result<Stmt, ParseError> {
        self.skip_blank_lines();
        if self.at_eof() {
            return Ok(Stmt::Terminal { location: self.here() });
        }
        let stmt = match self.peek_kind() {
            TokenKind::Keyword(Keyword::Let) => self.parse_let(scope)?,
            TokenKind::Keyword(Keyword::Enum) => self.parse_enum()?,
            _ => {
                let location = self.here();
                let expr = self.parse_expr(scope)?;
                Stmt::Expression { location, expr }
            }
        };
        self.expect_terminator()?;
        Ok(stmt)
    }

    // ---- low-level token access -----------------------------------------

    fn raw_peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn here(&self) -> Location {
        self.tokens[self.pos].location.clone()
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::EndOfFile)
    }

    /// Consumes the current token, tracking bracket depth, then silently
    /// swallows any run of new-lines while inside an unclosed bracket (spec
    /// §4.1 line-continuation rule (a)).
    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        match &token.kind {
            TokenKind::Bracket(_, Side::Open) => self.bracket_depth += 1,
            TokenKind::Bracket(_, Side::Close) => self.bracket_depth = self.bracket_depth.saturating_sub(1),
            _ => {}
        }
        while self.bracket_depth > 0 && matches!(self.raw_peek().kind, TokenKind::NewLine) {
            self.pos += 1;
        }
        token
    }

    /// Unconditionally swallows a run of new-lines, regardless of bracket
    /// depth — line-continuation rule (b), called right after consuming a
    /// binary/unary operator token.
    fn skip_operator_newlines(&mut self) {
        while matches!(self.raw_peek().kind, TokenKind::NewLine) {
            self.pos += 1;
        }
    }

    fn skip_blank_lines(&mut self) {
        while matches!(self.peek_kind(), TokenKind::NewLine) {
            self.pos += 1;
        }
    }

    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        match self.peek_kind() {
            TokenKind::NewLine => {
                self.skip_blank_lines();
                Ok(())
            }
            TokenKind::EndOfFile => Ok(()),
            _ => Err(ParseError::NewLineExpected { location: self.here() }),
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        let location = self.here();
        match self.peek_kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(ParseError::MissingToken {
                location,
                expected: "an identifier".to_string(),
            }),
        }
    }

    fn expect_punct(&mut self, wanted: Punctuation) -> Result<(), ParseError> {
        let location = self.here();
        match self.peek_kind() {
            TokenKind::Punctuation(p) if *p == wanted => {
                self.advance();
                Ok(())
            }
            _ => Err(ParseError::MissingToken {
                location,
                expected: format!("`{wanted:?}`"),
            }),
        }
    }

    fn expect_open_paren(&mut self) -> Result<(), ParseError> {
        let location = self.here();
        match self.peek_kind() {
            TokenKind::Bracket(BracketKind::Round, Side::Open) => {
                self.advance();
                Ok(())
            }
            _ => Err(ParseError::MissingToken {
                location,
                expected: "`(`".to_string(),
            }),
        }
    }

    fn expect_close_paren(&mut self) -> Result<(), ParseError> {
        let location = self.here();
        match self.peek_kind() {
            TokenKind::Bracket(BracketKind::Round, Side::Close) => {
                self.advance();
                Ok(())
            }
            _ => Err(ParseError::MissingToken {
                location,
                expected: "`)`".to_string(),
            }),
        }
    }

    // ---- statements --------------------------------------------------

    fn parse_let(&mut self, scope: &Scope) -> Result<Stmt, ParseError> {
        self.advance(); // `let`
        let name_location = self.here();
        let name = self.expect_identifier()?;
        if matches!(self.peek_kind(), TokenKind::Bracket(BracketKind::Round, Side::Open)) {
            self.parse_function_binding(scope, name, name_location)
        } else {
            self.expect_punct(Punctuation::Assign)?;
            let expr = self.parse_expr(scope)?;
            if let Some(Element::Function(fid)) = scope.find_within(&name) {
                let original = self
                    .arena
                    .function(fid)
                    .overloads
                    .first()
                    .map(|&v| self.arena.variable(v).location.clone())
                    .unwrap_or_else(Location::none);
                return Err(ParseError::Redefinition {
                    location: name_location,
                    name,
                    original,
                });
            }
            let variable = self.arena.insert_variable(Variable {
                location: name_location.clone(),
                name: name.clone(),
                data_type: None,
            });
            scope.add_variable(&name, variable);
            Ok(Stmt::BindVariable {
                location: name_location,
                variable,
                expr,
            })
        }
    }

    fn parse_function_binding(&mut self, scope: &Scope, name: String, name_location: Location) -> Result<Stmt, ParseError> {
        let stmt_id = self.ids.next();
        self.expect_open_paren()?;
        let params_scope = scope.child();
        let mut generics = GenericIndex::default();
        let mut params = Vec::new();
        if !matches!(self.peek_kind(), TokenKind::Bracket(BracketKind::Round, Side::Close)) {
            loop {
                let param_location = self.here();
                let pname = self.expect_identifier()?;
                if params_scope.find_within(&pname).is_some() {
                    return Err(ParseError::FunctionParameterAlreadyDefined {
                        location: param_location,
                        name: pname,
                    });
                }
                let declared_type = if matches!(self.peek_kind(), TokenKind::Punctuation(Punctuation::Colon)) {
                    self.advance();
                    Some(self.parse_type(&mut generics)?)
                } else {
                    None
                };
                let variable = self.arena.insert_variable(Variable {
                    location: param_location,
                    name: pname.clone(),
                    data_type: declared_type.clone(),
                });
                params_scope.add_variable(&pname, variable);
                params.push(Param { variable, declared_type });
                if matches!(self.peek_kind(), TokenKind::Punctuation(Punctuation::Comma)) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect_close_paren()?;
        self.expect_punct(Punctuation::Assign)?;

        let function = match scope.find_within(&name) {
            Some(Element::Function(fid)) => fid,
            Some(Element::Variable(vid)) => {
                return Err(ParseError::Redefinition {
                    location: name_location,
                    name,
                    original: self.arena.variable(vid).location.clone(),
                })
            }
            None => {
                let fid = self.arena.insert_function(&name);
                scope.add_function(&name, fid);
                fid
            }
        };

        let provisional_params: Vec<Parameter> = params
            .iter()
            .map(|p| {
                Parameter::new(
                    self.arena.variable(p.variable).name.clone(),
                    p.declared_type.clone().unwrap_or(DataType::Bool),
                )
            })
            .collect();
        let provisional_sig = DataType::function(provisional_params, DataType::Bool);
        let overload = self.arena.insert_variable(Variable {
            location: name_location.clone(),
            name: name.clone(),
            data_type: Some(provisional_sig),
        });
        if let Err(existing) = self.arena.add_overload(function, overload) {
            return Err(ParseError::Redefinition {
                location: name_location,
                name,
                original: self.arena.variable(existing).location.clone(),
            });
        }

        let body_scope = params_scope.child();
        let body = self.parse_expr(&body_scope)?;

        Ok(Stmt::BindFunction {
            id: stmt_id,
            location: name_location,
            function,
            overload,
            params,
            body,
        })
    }

    fn parse_enum(&mut self) -> Result<Stmt, ParseError> {
        let location = self.here();
        self.advance(); // `enum`
        let name = self.expect_identifier()?;
        self.expect_terminator()?;
        let mut variants = Vec::new();
        while let TokenKind::Identifier(_) = self.peek_kind() {
            let variant_location = self.here();
            let variant_name = self.expect_identifier()?;
            variants.push(EnumVariant {
                name: variant_name,
                location: variant_location,
            });
            self.expect_terminator()?;
        }
        match self.peek_kind() {
            TokenKind::Keyword(Keyword::End) => {
                self.advance();
            }
            _ => {
                return Err(ParseError::MissingToken {
                    location: self.here(),
                    expected: "`end`".to_string(),
                })
            }
        }
        Ok(Stmt::BindEnum { location, name, variants })
    }

    // ---- types ------------------------------------------------------

    fn parse_type(&mut self, generics: &mut GenericIndex) -> Result<DataType, ParseError> {
        let location = self.here();
        match self.peek_kind().clone() {
            TokenKind::GenericIdentifier(name) => {
                self.advance();
                let index = generics.resolve(&name);
                Ok(DataType::Generic(GenericVar { name, index }))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(match name.as_str() {
                    "Bool" => DataType::Bool,
                    "Int" => DataType::Integer,
                    "Float" => DataType::Float,
                    "Text" => DataType::Text,
                    _ => DataType::Enum(name),
                })
            }
            TokenKind::Bracket(BracketKind::Round, Side::Open) => {
                self.advance();
                let mut params = Vec::new();
                if !matches!(self.peek_kind(), TokenKind::Bracket(BracketKind::Round, Side::Close)) {
                    loop {
                        let pname = self.expect_identifier()?;
                        self.expect_punct(Punctuation::Colon)?;
                        let ty = self.parse_type(generics)?;
                        params.push(Parameter::new(pname, ty));
                        if matches!(self.peek_kind(), TokenKind::Punctuation(Punctuation::Comma)) {
                            self.advance();
                            continue;
                        }
                        break;
                    }
                }
                self.expect_close_paren()?;
                self.expect_punct(Punctuation::Arrow)?;
                let ret = self.parse_type(generics)?;
                Ok(DataType::function(params, ret))
            }
            _ => Err(ParseError::MissingToken {
                location,
                expected: "a type".to_string(),
            }),
        }
    }

    // ---- expressions (spec §4.1 precedence table, lowest to highest) ----

    fn parse_expr(&mut self, scope: &Scope) -> Result<Expr, ParseError> {
        self.parse_or(scope)
    }

    fn parse_or(&mut self, scope: &Scope) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_and(scope)?;
        while matches!(self.peek_kind(), TokenKind::Keyword(Keyword::Or)) {
            let location = self.here();
            self.advance();
            self.skip_operator_newlines();
            let rhs = self.parse_and(scope)?;
            lhs = self.binary(Operator::Or, location, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self, scope: &Scope) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_equality(scope)?;
        while matches!(self.peek_kind(), TokenKind::Keyword(Keyword::And)) {
            let location = self.here();
            self.advance();
            self.skip_operator_newlines();
            let rhs = self.parse_equality(scope)?;
            lhs = self.binary(Operator::And, location, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self, scope: &Scope) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_comparison(scope)?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Operator(op @ (Operator::Eq | Operator::NotEq)) => *op,
                _ => break,
            };
            let location = self.here();
            self.advance();
            self.skip_operator_newlines();
            let rhs = self.parse_comparison(scope)?;
            lhs = self.binary(op, location, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_comparison(&mut self, scope: &Scope) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_additive(scope)?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Operator(op @ (Operator::Lt | Operator::LtEq | Operator::Gt | Operator::GtEq)) => *op,
                _ => break,
            };
            let location = self.here();
            self.advance();
            self.skip_operator_newlines();
            let rhs = self.parse_additive(scope)?;
            lhs = self.binary(op, location, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self, scope: &Scope) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_multiplicative(scope)?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Operator(op @ (Operator::Add | Operator::Sub)) => *op,
                _ => break,
            };
            let location = self.here();
            self.advance();
            self.skip_operator_newlines();
            let rhs = self.parse_multiplicative(scope)?;
            lhs = self.binary(op, location, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self, scope: &Scope) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary(scope)?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Operator(op @ (Operator::Mul | Operator::Div)) => *op,
                _ => break,
            };
            let location = self.here();
            self.advance();
            self.skip_operator_newlines();
            let rhs = self.parse_unary(scope)?;
            lhs = self.binary(op, location, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self, scope: &Scope) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::Operator(Operator::Sub) => {
                let location = self.here();
                self.advance();
                self.skip_operator_newlines();
                let operand = self.parse_unary(scope)?;
                Ok(self.unary(UnaryOp::Negate, location, operand))
            }
            TokenKind::Keyword(Keyword::Not) => {
                let location = self.here();
                self.advance();
                self.skip_operator_newlines();
                let operand = self.parse_unary(scope)?;
                Ok(self.unary(UnaryOp::Not, location, operand))
            }
            _ => self.parse_call(scope),
        }
    }

    fn parse_call(&mut self, scope: &Scope) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary(scope)?;
        while matches!(self.peek_kind(), TokenKind::Bracket(BracketKind::Round, Side::Open)) {
            let location = expr.location().clone();
            self.advance();
            let mut args = Vec::new();
            if !matches!(self.peek_kind(), TokenKind::Bracket(BracketKind::Round, Side::Close)) {
                loop {
                    args.push(self.parse_expr(scope)?);
                    if matches!(self.peek_kind(), TokenKind::Punctuation(Punctuation::Comma)) {
                        self.advance();
                        continue;
                    }
                    break;
                }
            }
            self.expect_close_paren()?;
            expr = Expr::Call {
                id: self.ids.next(),
                location,
                callee: Box::new(expr),
                args,
            };
        }
        Ok(expr)
    }

    fn parse_primary(&mut self, scope: &Scope) -> Result<Expr, ParseError> {
        let location = self.here();
        match self.peek_kind().clone() {
            TokenKind::Literal(lit) => {
                self.advance();
                Ok(Expr::Literal {
                    id: self.ids.next(),
                    location,
                    literal: Literal {
                        text: lit.text,
                        kind: lit.kind,
                    },
                })
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(self.bool_literal(location, "true"))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(self.bool_literal(location, "false"))
            }
            TokenKind::Bracket(BracketKind::Round, Side::Open) => {
                self.advance();
                let expr = self.parse_expr(scope)?;
                self.expect_close_paren()?;
                Ok(expr)
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if matches!(self.peek_kind(), TokenKind::Punctuation(Punctuation::Dot)) {
                    self.advance();
                    let variant = self.expect_identifier()?;
                    return Ok(Expr::Enum {
                        id: self.ids.next(),
                        location,
                        enum_name: name,
                        variant,
                    });
                }
                match scope.find(&name) {
                    Some(Element::Variable(variable)) => Ok(Expr::Variable {
                        id: self.ids.next(),
                        location,
                        variable,
                    }),
                    Some(Element::Function(function)) => Ok(Expr::Function {
                        id: self.ids.next(),
                        location,
                        function,
                    }),
                    None => Err(ParseError::VariableNotFound { location, name }),
                }
            }
            _ => Err(ParseError::ExpressionExpected { location }),
        }
    }

    fn bool_literal(&mut self, location: Location, text: &str) -> Expr {
        Expr::Literal {
            id: self.ids.next(),
            location,
            literal: Literal {
                text: text.to_string(),
                kind: crate::compiler::tokens::LiteralKind::Bool,
            },
        }
    }

    fn binary(&mut self, op: Operator, location: Location, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            id: self.ids.next(),
            location,
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn unary(&mut self, op: UnaryOp, location: Location, operand: Expr) -> Expr {
        Expr::Unary {
            id: self.ids.next(),
            location,
            op,
            operand: Box::new(operand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::lexer::Lexer;
    use std::path::PathBuf;

    fn tokens(source: &str) -> Vec<Token> {
        Lexer::tokenize(&PathBuf::from("test.sg"), source).unwrap()
    }

    fn parse(source: &str) -> (Result<Vec<Stmt>, ParseError>, Arena) {
        let mut arena = Arena::new();
        let scope = Scope::root();
        let result = {
            let mut parser = Parser::new(tokens(source), &mut arena);
            parser.parse_program(&scope)
        };
        (result, arena)
    }

    #[test]
    fn two_expression_statements_without_a_newline_is_an_error() {
        let (result, _) = parse("1 2");
        assert!(matches!(result, Err(ParseError::NewLineExpected { .. })));
    }

    #[test]
    fn a_second_statement_on_the_same_line_is_an_error() {
        let (result, _) = parse("let x = true x");
        assert!(matches!(result, Err(ParseError::NewLineExpected { .. })));
    }

    #[test]
    fn newline_inside_brackets_is_a_continuation() {
        let (result, _) = parse("(\n5)");
        assert!(result.is_ok());
    }

    #[test]
    fn newline_after_a_binary_operator_is_a_continuation() {
        let (result, _) = parse("let x = 1 +\n 2 * 3");
        assert!(matches!(result, Ok(stmts) if stmts.len() == 2));
    }

    #[test]
    fn function_typed_parameter_parses() {
        let (result, _) = parse("let f(g: (x: Int) -> Int) = g(5)");
        let stmts = result.expect("should parse");
        assert!(matches!(stmts[0], Stmt::BindFunction { .. }));
    }

    #[test]
    fn duplicate_parameter_name_is_rejected() {
        let (result, _) = parse("let f(x: Int, x: Int) = x");
        assert!(matches!(
            result,
            Err(ParseError::FunctionParameterAlreadyDefined { .. })
        ));
    }

    #[test]
    fn redefining_a_variable_as_a_function_is_rejected() {
        let (result, _) = parse("let x = 1\nlet x(y: Int) = y");
        assert!(matches!(result, Err(ParseError::Redefinition { .. })));
    }

    #[test]
    fn two_overloads_with_the_same_signature_are_rejected() {
        let (result, _) = parse("let f(x: Int) = x\nlet f(y: Int) = y");
        assert!(matches!(result, Err(ParseError::Redefinition { .. })));
    }

    #[test]
    fn two_overloads_with_different_signatures_both_parse() {
        let (result, arena) = parse("let f(x: Int) = x\nlet f(y: Float) = y");
        let stmts = result.expect("should parse");
        let function = match &stmts[1] {
            Stmt::BindFunction { function, .. } => *function,
            _ => panic!("expected a function binding"),
        };
        assert_eq!(arena.function(function).overloads.len(), 2);
    }

    #[test]
    fn operators_desugar_to_binary_and_unary_nodes() {
        let (result, _) = parse("let x = 1 + 2 * 3\nlet y = not true\nlet z = -x");
        let stmts = result.expect("should parse");
        match &stmts[0] {
            Stmt::BindVariable { expr, .. } => assert!(matches!(expr, Expr::Binary { op: Operator::Add, .. })),
            _ => panic!("expected a variable binding"),
        }
        match &stmts[1] {
            Stmt::BindVariable { expr, .. } => {
                assert!(matches!(expr, Expr::Unary { op: UnaryOp::Not, .. }))
            }
            _ => panic!("expected a variable binding"),
        }
        match &stmts[2] {
            Stmt::BindVariable { expr, .. } => {
                assert!(matches!(expr, Expr::Unary { op: UnaryOp::Negate, .. }))
            }
            _ => panic!("expected a variable binding"),
        }
    }

    #[test]
    fn enum_literal_parses_as_a_dotted_reference() {
        let (result, _) = parse("enum Color\nRed\nGreen\nend\nlet c = Color.Red");
        let stmts = result.expect("should parse");
        match &stmts[0] {
            Stmt::BindEnum { name, variants, .. } => {
                assert_eq!(name, "Color");
                assert_eq!(variants.len(), 2);
            }
            _ => panic!("expected an enum binding"),
        }
        match &stmts[1] {
            Stmt::BindVariable { expr, .. } => assert!(matches!(expr, Expr::Enum { .. })),
            _ => panic!("expected a variable binding"),
        }
    }

    #[test]
    fn incomplete_statement_rewinds_and_accepts_fed_tokens() {
        let mut arena = Arena::new();
        let scope = Scope::root();
        let mut parser = Parser::new(tokens("let x "), &mut arena);
        assert!(parser.parse_node(&scope).is_err());
        parser.feed(tokens("= false"));
        let stmt = parser.parse_node(&scope).expect("should parse once fed");
        assert!(matches!(stmt, Stmt::BindVariable { .. }));
    }

    #[test]
    fn undefined_identifier_is_rejected() {
        let (result, _) = parse("let x = y");
        assert!(matches!(result, Err(ParseError::VariableNotFound { .. })));
    }
}
