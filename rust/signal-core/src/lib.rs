//! Signal Core
//!
//! The smallest pieces of state shared by every stage of the compiler: a
//! source location and an interned identifier. Nothing else belongs here —
//! everything else is either a compiler concern (`signal-compiler`) or a
//! runtime concern (`signal-rt`).

mod symbol;

pub use symbol::{parse_identifier, Symbol};

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A position in a source file, used to anchor diagnostics and to carry a
/// "where was this defined" reference for redefinition errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    path: PathBuf,
    line: usize,
    column: usize,
}

impl Location {
    pub fn new(path: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }

    /// A location with no meaningful position, used for synthesized nodes
    /// (built-in bindings) that never appear in a diagnostic by themselves.
    pub fn none() -> Self {
        Self::new("", 0, 0)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_path_line_col() {
        let loc = Location::new("main.sg", 3, 7);
        assert_eq!(loc.to_string(), "main.sg:3:7");
    }

    #[test]
    fn none_is_distinguishable_only_by_fields() {
        let a = Location::none();
        let b = Location::none();
        assert_eq!(a, b);
    }
}
