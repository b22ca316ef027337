//! AST serialization to canonical JSON, for tooling that wants the parsed
//! (and, if `check` already ran, type-annotated) program without re-parsing
//! it — an editor integration or a snapshot test, say.

use serde_json;

use crate::compiler::ast::Stmt;

/// Emits a parsed program as pretty-printed JSON.
pub fn emit_json(program: &[Stmt]) -> String {
    serde_json::to_string_pretty(program).unwrap_or_else(|e| {
        panic!("failed to serialize program: {e}");
    })
}

/// Emits a parsed program as compact JSON, suitable for hashing or diffing.
pub fn emit_canonical_json(program: &[Stmt]) -> String {
    serde_json::to_string(program).unwrap_or_else(|e| {
        panic!("failed to serialize program: {e}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::semantic::{Arena, Scope};
    use crate::compiler::lexer::Lexer;
    use crate::compiler::parser::Parser;
    use std::path::PathBuf;

    #[test]
    fn emits_valid_json_containing_the_bound_name() {
        let path = PathBuf::from("test.sig");
        let tokens = Lexer::tokenize(&path, "let main = 42\n").unwrap();
        let mut arena = Arena::new();
        let scope = Scope::root();
        let program = {
            let mut parser = Parser::new(tokens, &mut arena);
            parser.parse_program(&scope).unwrap()
        };
        let json = emit_json(&program);
        assert!(json.contains("BindVariable"));
        let _: serde_json::Value = serde_json::from_str(&json).unwrap();
    }

    #[test]
    fn canonical_json_is_compact() {
        let path = PathBuf::from("test.sig");
        let tokens = Lexer::tokenize(&path, "let main = 42\n").unwrap();
        let mut arena = Arena::new();
        let scope = Scope::root();
        let program = {
            let mut parser = Parser::new(tokens, &mut arena);
            parser.parse_program(&scope).unwrap()
        };
        let pretty = emit_json(&program);
        let canonical = emit_canonical_json(&program);
        assert!(canonical.len() < pretty.len());
    }
}
