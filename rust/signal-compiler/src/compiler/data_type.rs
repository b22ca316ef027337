//! The data type lattice: scalars, function signatures, callables, generics.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::compiler::semantic::FunctionId;

/// One parameter of a function signature. The name is carried for
/// diagnostics only — it plays no part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub data_type: DataType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.data_type == other.data_type
    }
}

/// A function signature: ordered parameters plus a return type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub parameters: Vec<Parameter>,
    pub return_type: DataType,
}

impl FunctionSignature {
    pub fn new(parameters: Vec<Parameter>, return_type: DataType) -> Self {
        Self {
            parameters,
            return_type,
        }
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// A generic type variable. Equality is by `index` alone — the name exists
/// only so diagnostics can say `` `T `` instead of `#0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericVar {
    pub name: String,
    pub index: u32,
}

impl PartialEq for GenericVar {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

/// The data type of an expression, variable, or function signature.
///
/// `Function` and `Generic` carry their own `PartialEq` impls (see above and
/// `FunctionSignature`); everything else is a plain singleton compared by
/// variant, which is equivalent to identity per spec §3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Integer,
    Float,
    Text,
    Function(Rc<FunctionSignature>),
    /// A reference to the overload set of a named function, used when the
    /// function is passed around as a first-class value rather than called
    /// immediately. Equality is by `FunctionId` identity.
    Callable(FunctionId),
    Generic(GenericVar),
    /// A user-declared enum, identified by name (spec §1 Non-goals: enums
    /// are parsed but their semantics beyond existing as a value are
    /// minimal and not specified further).
    Enum(String),
}

impl DataType {
    pub fn function(parameters: Vec<Parameter>, return_type: DataType) -> Self {
        DataType::Function(Rc::new(FunctionSignature::new(parameters, return_type)))
    }

    /// The stable string name used for display and (per spec §3's explicit
    /// invariant) as a hash basis.
    pub fn name(&self) -> String {
        match self {
            DataType::Bool => "Bool".to_string(),
            DataType::Integer => "Integer".to_string(),
            DataType::Float => "Float".to_string(),
            DataType::Text => "Text".to_string(),
            DataType::Function(sig) => {
                let params: Vec<String> = sig
                    .parameters
                    .iter()
                    .map(|p| p.data_type.name())
                    .collect();
                format!("({}) -> {}", params.join(", "), sig.return_type.name())
            }
            DataType::Callable(id) => format!("Callable({id:?})"),
            DataType::Generic(g) => format!("`{}", g.name),
            DataType::Enum(name) => name.clone(),
        }
    }

    pub fn as_function(&self) -> Option<&Rc<FunctionSignature>> {
        match self {
            DataType::Function(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<FunctionId> {
        match self {
            DataType::Callable(id) => Some(*id),
            _ => None,
        }
    }

    /// Counts occurrences of `Generic` within this type, used by overload
    /// resolution's "most specific wins" tie-break (§4.3.1).
    pub fn generic_occurrences(&self) -> usize {
        match self {
            DataType::Generic(_) => 1,
            DataType::Function(sig) => {
                sig.parameters
                    .iter()
                    .map(|p| p.data_type.generic_occurrences())
                    .sum::<usize>()
                    + sig.return_type.generic_occurrences()
            }
            _ => 0,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_is_not_float() {
        assert_ne!(DataType::Integer, DataType::Float);
    }

    #[test]
    fn function_equality_ignores_parameter_names() {
        let a = DataType::function(vec![Parameter::new("x", DataType::Integer)], DataType::Integer);
        let b = DataType::function(vec![Parameter::new("y", DataType::Integer)], DataType::Integer);
        assert_eq!(a, b);
    }

    #[test]
    fn generic_equality_is_by_index_not_name() {
        let a = DataType::Generic(GenericVar {
            name: "T".into(),
            index: 0,
        });
        let b = DataType::Generic(GenericVar {
            name: "U".into(),
            index: 0,
        });
        let c = DataType::Generic(GenericVar {
            name: "T".into(),
            index: 1,
        });
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn callable_equality_is_by_function_identity() {
        let a = DataType::Callable(FunctionId::from_raw(0));
        let b = DataType::Callable(FunctionId::from_raw(0));
        let c = DataType::Callable(FunctionId::from_raw(1));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
