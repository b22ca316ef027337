//! An interned textual symbol (spec section 3: "Identifier / Symbol").
//!
//! Equality is by string content, never by identity — two `Symbol`s built
//! from the same text are always equal even if neither was built from the
//! other. Cloning is a refcount bump (`Rc<str>`), not a string copy.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Symbol(Rc<str>);

impl Symbol {
    pub fn new(text: impl Into<Rc<str>>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.as_ref().hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Returns `s` parsed as an identifier iff it matches the identifier
/// grammar (`[A-Za-z_][A-Za-z0-9_]*`) in full — no partial match.
pub fn parse_identifier(s: &str) -> Option<&str> {
    let mut chars = s.chars();
    let first = chars.next()?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }
    if chars.all(|c| c.is_alphanumeric() || c == '_') {
        Some(s)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_content() {
        let a = Symbol::new("foo");
        let b = Symbol::new(String::from("foo"));
        assert_eq!(a, b);
    }

    #[test]
    fn round_trips_valid_identifiers() {
        assert_eq!(parse_identifier("foo_bar2"), Some("foo_bar2"));
        assert_eq!(parse_identifier("_x"), Some("_x"));
    }

    #[test]
    fn rejects_malformed_identifiers() {
        assert_eq!(parse_identifier("2foo"), None);
        assert_eq!(parse_identifier(""), None);
        assert_eq!(parse_identifier("a-b"), None);
    }
}
