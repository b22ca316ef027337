//! Variables, functions (overload sets), function definitions, and scopes.
//!
//! Functions and Variables live in a flat arena rather than behind shared
//! owning pointers: a Variable's type can reference the Function that owns
//! it (through a `Callable` data type) and a Function owns a list of
//! Variables, which would otherwise be a reference cycle. Storing both in
//! one arena and referring to them by index (`VariableId`/`FunctionId`)
//! breaks the cycle and makes every type-map key a plain, hashable `Copy`
//! value (see spec Design Notes, "Shared cyclic structures").

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use signal_core::Location;

use crate::compiler::data_type::DataType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableId(usize);

impl VariableId {
    pub fn from_raw(idx: usize) -> Self {
        Self(idx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionId(usize);

impl FunctionId {
    pub fn from_raw(idx: usize) -> Self {
        Self(idx)
    }
}

/// `(location, name, type)`. `data_type` is `None` for a parameter awaiting
/// inference; the type checker never mutates it in place — it records the
/// checked type in the `TypeMap` instead (see `type_map.rs` and the
/// "Mutable AST type slots" design note).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub location: Location,
    pub name: String,
    pub data_type: Option<DataType>,
}

/// An overload set: every `Variable` sharing a name, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub overloads: Vec<VariableId>,
}

/// Binds one overload (a `Variable` in some `Function`'s overload set) to
/// its complete signature (parameter types plus the checked return type)
/// and a source location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub location: Location,
    pub function: FunctionId,
    pub overload: VariableId,
    pub signature: DataType,
}

#[derive(Debug, Default)]
pub struct Arena {
    variables: Vec<Variable>,
    functions: Vec<Function>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_variable(&mut self, variable: Variable) -> VariableId {
        self.variables.push(variable);
        VariableId(self.variables.len() - 1)
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0]
    }

    /// Records the checked or inferred type for a variable already in the
    /// arena. The type checker calls this once per overload/parameter
    /// rather than mutating the AST (see the "Mutable AST type slots"
    /// design note).
    pub fn set_variable_type(&mut self, id: VariableId, data_type: DataType) {
        self.variables[id.0].data_type = Some(data_type);
    }

    pub fn insert_function(&mut self, name: impl Into<String>) -> FunctionId {
        self.functions.push(Function {
            name: name.into(),
            overloads: Vec::new(),
        });
        FunctionId(self.functions.len() - 1)
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id.0]
    }

    /// Adds `overload` to `function`'s overload set unless a structurally
    /// equal signature (by parameter types; the return type is not yet
    /// known at parse time, see `parser.rs`) is already present. On a
    /// duplicate, returns the conflicting `VariableId` so the caller can
    /// report its location as the REDEFINITION's secondary span, matching
    /// `Function::add`'s contract in spec §3.
    pub fn add_overload(&mut self, function: FunctionId, overload: VariableId) -> Result<(), VariableId> {
        let new_params = self.parameter_types(overload);
        for &existing in &self.functions[function.0].overloads {
            if self.parameter_types(existing) == new_params {
                return Err(existing);
            }
        }
        self.functions[function.0].overloads.push(overload);
        Ok(())
    }

    fn parameter_types(&self, variable: VariableId) -> Vec<DataType> {
        match &self.variables[variable.0].data_type {
            Some(DataType::Function(sig)) => {
                sig.parameters.iter().map(|p| p.data_type.clone()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// One named binding inside a scope.
#[derive(Debug, Clone)]
pub enum Element {
    Variable(VariableId),
    Function(FunctionId),
}

#[derive(Debug, Default)]
struct ScopeData {
    parent: Option<Scope>,
    bindings: HashMap<String, Element>,
    definitions: HashMap<VariableId, FunctionDefinition>,
    callable_types: HashMap<FunctionId, DataType>,
}

/// A nested dictionary indexed by name, falling back to its parent on a
/// missed lookup. Cheaply cloned — clones share the same underlying scope
/// via `Rc`, which lets the parser hand out a scope handle that outlives
/// its own push/pop stack discipline (e.g. a `Callable` type registered
/// against the enclosing scope from inside a function body).
#[derive(Debug, Clone)]
pub struct Scope(Rc<RefCell<ScopeData>>);

impl Scope {
    pub fn root() -> Self {
        Self(Rc::new(RefCell::new(ScopeData::default())))
    }

    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(ScopeData {
            parent: Some(self.clone()),
            ..ScopeData::default()
        })))
    }

    /// Binds `name` to a variable in this scope. Per spec §3, `add` fails
    /// if the name is already bound to an incompatible kind within this
    /// same scope.
    pub fn add_variable(&self, name: &str, id: VariableId) -> bool {
        let mut data = self.0.borrow_mut();
        match data.bindings.get(name) {
            Some(Element::Function(_)) => false,
            _ => {
                data.bindings.insert(name.to_string(), Element::Variable(id));
                true
            }
        }
    }

    /// Binds `name` to a fresh function overload set. Call this only when
    /// `find_within(name)` returned `None` — otherwise reuse the existing
    /// `Function` and call `Arena::add_overload`.
    pub fn add_function(&self, name: &str, id: FunctionId) {
        self.0
            .borrow_mut()
            .bindings
            .insert(name.to_string(), Element::Function(id));
    }

    pub fn add_definition(&self, definition: FunctionDefinition) {
        self.0
            .borrow_mut()
            .definitions
            .insert(definition.overload, definition);
    }

    pub fn add_callable_type(&self, function: FunctionId, callable: DataType) {
        self.0
            .borrow_mut()
            .callable_types
            .insert(function, callable);
    }

    /// Non-recursive lookup within this exact scope.
    pub fn find_within(&self, name: &str) -> Option<Element> {
        self.0.borrow().bindings.get(name).cloned()
    }

    /// Recursive lookup, falling back to parent scopes. A re-bound name
    /// shadows its parent's binding of the same name entirely — this is
    /// what gives function overload sets "replace rather than union"
    /// shadowing semantics (§4.2): a nested `let f(...)` that doesn't find
    /// `f` via `find_within` creates a brand-new `Function`, so only ever
    /// one `Function` identity is reachable per name at any scope depth.
    pub fn find(&self, name: &str) -> Option<Element> {
        let data = self.0.borrow();
        if let Some(element) = data.bindings.get(name) {
            return Some(element.clone());
        }
        data.parent.as_ref().and_then(|p| p.find(name))
    }

    pub fn find_variable(&self, name: &str) -> Option<VariableId> {
        match self.find(name)? {
            Element::Variable(id) => Some(id),
            Element::Function(_) => None,
        }
    }

    pub fn find_function(&self, name: &str) -> Option<FunctionId> {
        match self.find(name)? {
            Element::Function(id) => Some(id),
            Element::Variable(_) => None,
        }
    }

    /// Looks up the definition recorded for a single overload variable,
    /// walking outward through parent scopes.
    pub fn find_definition(&self, overload: VariableId) -> Option<FunctionDefinition> {
        let data = self.0.borrow();
        if let Some(def) = data.definitions.get(&overload) {
            return Some(def.clone());
        }
        data.parent.as_ref().and_then(|p| p.find_definition(overload))
    }

    /// Every `FunctionDefinition` belonging to `function`'s overload set
    /// that has been type-checked so far, in overload declaration order.
    /// Plays the role of the original's scope walk keyed on a predicate,
    /// but is expressed directly against the function's own authoritative
    /// overload list rather than re-deriving it from a second traversal —
    /// see DESIGN.md.
    pub fn definitions_for(&self, function: FunctionId, arena: &Arena) -> Vec<FunctionDefinition> {
        arena
            .function(function)
            .overloads
            .iter()
            .filter_map(|&v| self.find_definition(v))
            .collect()
    }

    pub fn find_callable_type(&self, function: FunctionId) -> Option<DataType> {
        let data = self.0.borrow();
        if let Some(ty) = data.callable_types.get(&function) {
            return Some(ty.clone());
        }
        data.parent.as_ref().and_then(|p| p.find_callable_type(function))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_variable(name: &str) -> Variable {
        Variable {
            location: Location::none(),
            name: name.to_string(),
            data_type: Some(DataType::Integer),
        }
    }

    #[test]
    fn child_scope_shadows_parent_variable() {
        let mut arena = Arena::new();
        let outer = Scope::root();
        let v1 = arena.insert_variable(int_variable("x"));
        outer.add_variable("x", v1);
        let inner = outer.child();
        let v2 = arena.insert_variable(int_variable("x"));
        inner.add_variable("x", v2);
        assert_eq!(inner.find_variable("x"), Some(v2));
        assert_eq!(outer.find_variable("x"), Some(v1));
    }

    #[test]
    fn lookup_falls_back_to_parent() {
        let mut arena = Arena::new();
        let outer = Scope::root();
        let v = arena.insert_variable(int_variable("y"));
        outer.add_variable("y", v);
        let inner = outer.child();
        assert_eq!(inner.find_variable("y"), Some(v));
    }

    #[test]
    fn duplicate_signature_overload_is_rejected() {
        let mut arena = Arena::new();
        let f = arena.insert_function("f");
        let sig = DataType::function(
            vec![crate::compiler::data_type::Parameter::new("x", DataType::Integer)],
            DataType::Integer,
        );
        let v1 = arena.insert_variable(Variable {
            location: Location::none(),
            name: "f".into(),
            data_type: Some(sig.clone()),
        });
        let v2 = arena.insert_variable(Variable {
            location: Location::none(),
            name: "f".into(),
            data_type: Some(sig),
        });
        assert!(arena.add_overload(f, v1).is_ok());
        assert_eq!(arena.add_overload(f, v2), Err(v1));
        assert_eq!(arena.function(f).overloads.len(), 1);
    }
}
