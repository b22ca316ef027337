//! A single `SyntaxError` kind every stage's error flattens into (spec §7):
//! `{code, location, optional secondary location}`, rendered as
//! `path:line:col: <code> <message>` for the CLI driver (spec §6).

use std::fmt;

use signal_core::Location;

use crate::compiler::error_codes::{self, ErrorCode};
use crate::compiler::lexer::LexError;
use crate::compiler::lower::TranslateError;
use crate::compiler::parser::ParseError;
use crate::compiler::typecheck::TypeError;

/// One diagnostic: a stable code, the location it was raised at, the
/// message to show, and — for `REDEFINITION` — the location of the
/// original binding it collides with.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub code: ErrorCode,
    pub location: Location,
    pub message: String,
    pub secondary: Option<Location>,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.location, self.code, self.message)?;
        if let Some(secondary) = &self.secondary {
            write!(f, " (originally defined at {secondary})")?;
        }
        Ok(())
    }
}

impl From<&LexError> for SyntaxError {
    fn from(e: &LexError) -> Self {
        SyntaxError {
            code: error_codes::lex_error_code(e),
            location: e.location().clone(),
            message: e.to_string(),
            secondary: None,
        }
    }
}

impl From<&ParseError> for SyntaxError {
    fn from(e: &ParseError) -> Self {
        let secondary = match e {
            ParseError::Redefinition { original, .. } => Some(original.clone()),
            _ => None,
        };
        SyntaxError {
            code: error_codes::parse_error_code(e),
            location: e.location().clone(),
            message: e.to_string(),
            secondary,
        }
    }
}

impl From<&TypeError> for SyntaxError {
    fn from(e: &TypeError) -> Self {
        SyntaxError {
            code: error_codes::type_error_code(e),
            location: e.location().clone(),
            message: e.to_string(),
            secondary: None,
        }
    }
}

impl From<&TranslateError> for SyntaxError {
    fn from(e: &TranslateError) -> Self {
        SyntaxError {
            code: error_codes::translate_error_code(e),
            location: e.location().clone(),
            message: e.to_string(),
            secondary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn renders_as_path_line_col_code_message() {
        let err = SyntaxError {
            code: ErrorCode::OverloadNotFound,
            location: Location::new(PathBuf::from("a.sig"), 3, 5),
            message: "no overload accepts the given argument types".to_string(),
            secondary: None,
        };
        let rendered = err.to_string();
        assert_eq!(rendered, "a.sig:3:5: OVERLOAD_NOT_FOUND no overload accepts the given argument types");
    }

    #[test]
    fn redefinition_includes_the_original_location() {
        let err = SyntaxError {
            code: ErrorCode::Redefinition,
            location: Location::new(PathBuf::from("a.sig"), 4, 1),
            message: "`f` is already defined".to_string(),
            secondary: Some(Location::new(PathBuf::from("a.sig"), 1, 1)),
        };
        assert!(err.to_string().ends_with("(originally defined at a.sig:1:1)"));
    }
}
