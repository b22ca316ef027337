//! Signal Compiler
//!
//! Wires the pipeline described in spec §4 end to end: lex, parse (against a
//! built-in-populated scope), type-check, and lower to a reactor graph. Each
//! stage is its own module under [`compiler`]; this crate root only owns the
//! glue — a single [`CompileError`] every stage's error folds into, the
//! [`check`] entry point, and [`CheckedProgram::translate`] to build the
//! reactor graph from it.
//!
//! `check`'s output owns its `Arena` and call-resolution table rather than
//! the library hiding them behind a self-borrowing struct: `Translator<'a>`
//! borrows both, so the caller keeps them alive as long as the reactor graph
//! needs them, same as `lower.rs`'s own tests do.

pub mod compiler;
pub mod diagnostics;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use compiler::ast::{NodeId, Stmt};
use compiler::builtins::{self, BuiltinFunctions};
use compiler::lexer::{LexError, Lexer};
use compiler::lower::{TranslateError, Translator};
use compiler::parser::{ParseError, Parser};
use compiler::semantic::{Arena, FunctionDefinition, Scope};
use compiler::typecheck::{TypeChecker, TypeError};

pub use diagnostics::SyntaxError;

use signal_rt::trigger::Trigger;
use signal_rt::value::Value;

/// Any failure from any pipeline stage. `Parse` and `Type` carry every
/// diagnostic collected for the file, matching `Parser::parse_node`'s and
/// `TypeChecker::check`'s own non-stop-at-first-error behavior.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("{}", .0.first().map(ToString::to_string).unwrap_or_default())]
    Parse(Vec<ParseError>),
    #[error("{}", .0.first().map(ToString::to_string).unwrap_or_default())]
    Type(Vec<TypeError>),
    #[error("{0}")]
    Translate(#[from] TranslateError),
}

impl CompileError {
    /// Every diagnostic this error carries, in the `SyntaxError` shape spec
    /// §7 describes.
    pub fn syntax_errors(&self) -> Vec<SyntaxError> {
        match self {
            CompileError::Lex(e) => vec![SyntaxError::from(e)],
            CompileError::Parse(errs) => errs.iter().map(SyntaxError::from).collect(),
            CompileError::Type(errs) => errs.iter().map(SyntaxError::from).collect(),
            CompileError::Translate(e) => vec![SyntaxError::from(e)],
        }
    }
}

/// A fully parsed and type-checked program: the statements in source order,
/// the arena they bind into, every call site's resolved overload, and the
/// built-in function identities the translator needs to wire up generic
/// factories for.
pub struct CheckedProgram {
    program: Vec<Stmt>,
    arena: Arena,
    call_definitions: HashMap<NodeId, FunctionDefinition>,
    builtins: BuiltinFunctions,
}

impl CheckedProgram {
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn statements(&self) -> &[Stmt] {
        &self.program
    }

    /// Lowers every statement to the reactor graph and returns the
    /// translator driving it (spec §4.5). Borrows `self` and `trigger` for
    /// the graph's lifetime, same shape as `Translator::new` itself.
    pub fn translate<'a>(&'a self, trigger: &'a Trigger) -> Result<Translator<'a>, CompileError> {
        let mut translator = Translator::new(trigger, &self.arena, &self.call_definitions);
        translator.register_builtins(self.builtins);
        for stmt in &self.program {
            translator.translate(stmt).map_err(CompileError::Translate)?;
        }
        Ok(translator)
    }
}

/// Lexes, parses, and type-checks `source` (attributed to `path` in
/// diagnostics), returning a [`CheckedProgram`] ready for
/// [`CheckedProgram::translate`].
pub fn check(path: &Path, source: &str) -> Result<CheckedProgram, CompileError> {
    let tokens = Lexer::tokenize(path, source)?;

    let mut arena = Arena::new();
    let root = Scope::root();
    let builtins = builtins::populate(&mut arena, &root);

    let program = {
        let mut parser = Parser::new(tokens, &mut arena);
        parser.parse_program(&root).map_err(|e| CompileError::Parse(vec![e]))?
    };

    let call_definitions = {
        let mut checker = TypeChecker::new(&mut arena);
        checker.check(&program, &root).map_err(CompileError::Type)?;
        checker.call_definitions().clone()
    };

    Ok(CheckedProgram {
        program,
        arena,
        call_definitions,
        builtins,
    })
}

/// Runs a checked program's `main` reactor to completion against a fresh
/// trigger, ticking once per sequence the way the CLI driver does (spec
/// §6). Returns `None` if the program never bound a `main`.
pub fn run_to_completion(checked: &CheckedProgram) -> Result<Option<Value>, CompileError> {
    let trigger = Trigger::new();
    let translator = checked.translate(&trigger)?;
    let Some(main) = translator.get_main() else {
        return Ok(None);
    };
    loop {
        let sequence = trigger.signal();
        let update = main.borrow_mut().commit(sequence);
        if update.is_complete() {
            return Ok(main.borrow().value());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("test.sig")
    }

    #[test]
    fn compiles_and_runs_a_literal_main_binding() {
        let checked = check(&path(), "let main = 40 + 2\n").expect("compiles");
        let value = run_to_completion(&checked).expect("runs");
        assert_eq!(value, Some(Value::Int(42)));
    }

    #[test]
    fn program_without_main_runs_to_none() {
        let checked = check(&path(), "let x = 1\n").expect("compiles");
        let value = run_to_completion(&checked).expect("runs");
        assert_eq!(value, None);
    }

    #[test]
    fn undeclared_identifier_is_a_parse_error() {
        let err = check(&path(), "let main = unknown_name\n").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }

    #[test]
    fn mismatched_overload_is_a_type_error() {
        let source = "let f(x: Int) = x\nlet main = f(true)\n";
        let err = check(&path(), source).unwrap_err();
        assert!(matches!(err, CompileError::Type(_)));
    }

    #[test]
    fn missing_newline_between_statements_is_a_parse_error() {
        let err = check(&path(), "let x = 1 2\n").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }

    #[test]
    fn chain_of_two_values_yields_each_in_turn() {
        let checked = check(&path(), "let main = chain(1, 2)\n").expect("compiles");
        let trigger = Trigger::new();
        let translator = checked.translate(&trigger).expect("translates");
        let main = translator.get_main().expect("main was bound");
        assert_eq!(main.borrow_mut().commit(trigger.signal()), signal_rt::reactor::Update::Eval);
        assert_eq!(main.borrow().value(), Some(Value::Int(1)));
        assert_eq!(main.borrow_mut().commit(trigger.signal()), signal_rt::reactor::Update::CompleteEval);
        assert_eq!(main.borrow().value(), Some(Value::Int(2)));
    }
}
