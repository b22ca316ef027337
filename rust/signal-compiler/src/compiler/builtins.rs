//! Populates the built-in scope: `add`, `multiply`, `print`, `chain`,
//! `count`, `fold` (spec §4.2). Every overload is synthesized at
//! `Location::none()` — it was never parsed, so it has no meaningful
//! position.
//!
//! `add`, `multiply`, and `print` are registered eagerly, one concrete
//! overload per scalar type pair: their overload sets never grow, so there
//! is nothing to gain from routing them through the lazy generic-builder
//! path (see DESIGN.md). `chain`, `count`, and `fold` are generic over
//! their element type and are left for the translator to register through
//! `add(function, generic_builder)` instead (spec §4.5.1) — this module
//! only hands back their `FunctionId`s so the translator can do so.

use signal_core::Location;

use crate::compiler::data_type::{DataType, Parameter};
use crate::compiler::semantic::{Arena, FunctionId, Scope, Variable, VariableId};

/// The function identities the built-in scope declares, handed back so the
/// translator can wire generic builder factories against the ones that need
/// one (`chain`, `count`, `fold`) without re-deriving them via a name
/// lookup.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinFunctions {
    pub add: FunctionId,
    pub multiply: FunctionId,
    pub print: FunctionId,
    pub chain: FunctionId,
    pub count: FunctionId,
    pub fold: FunctionId,
}

fn declare_overload(arena: &mut Arena, function: FunctionId, name: &str, signature: DataType) -> VariableId {
    let variable = arena.insert_variable(Variable {
        location: Location::none(),
        name: name.to_string(),
        data_type: Some(signature),
    });
    arena
        .add_overload(function, variable)
        .expect("built-in overloads never collide by construction");
    variable
}

fn declare_function(arena: &mut Arena, scope: &Scope, name: &str) -> FunctionId {
    let function = arena.insert_function(name);
    scope.add_function(name, function);
    function
}

fn generic(name: &str, index: u32) -> DataType {
    DataType::Generic(crate::compiler::data_type::GenericVar {
        name: name.to_string(),
        index,
    })
}

/// Populates `scope` (expected to be the root scope) with every built-in
/// overload and returns the `FunctionId`s the translator needs.
pub fn populate(arena: &mut Arena, scope: &Scope) -> BuiltinFunctions {
    let add = declare_function(arena, scope, "add");
    for scalar in [DataType::Integer, DataType::Float, DataType::Text] {
        let sig = DataType::function(
            vec![
                Parameter::new("a", scalar.clone()),
                Parameter::new("b", scalar.clone()),
            ],
            scalar,
        );
        declare_overload(arena, add, "add", sig);
    }

    let multiply = declare_function(arena, scope, "multiply");
    for scalar in [DataType::Integer, DataType::Float] {
        let sig = DataType::function(
            vec![
                Parameter::new("a", scalar.clone()),
                Parameter::new("b", scalar.clone()),
            ],
            scalar,
        );
        declare_overload(arena, multiply, "multiply", sig);
    }

    let print = declare_function(arena, scope, "print");
    for scalar in [DataType::Bool, DataType::Integer, DataType::Float, DataType::Text] {
        let sig = DataType::function(vec![Parameter::new("value", scalar.clone())], scalar);
        declare_overload(arena, print, "print", sig);
    }

    let chain = declare_function(arena, scope, "chain");
    {
        let t = generic("T", 0);
        let sig = DataType::function(
            vec![Parameter::new("a", t.clone()), Parameter::new("b", t.clone())],
            t,
        );
        declare_overload(arena, chain, "chain", sig);
    }

    let count = declare_function(arena, scope, "count");
    {
        let t = generic("T", 0);
        let sig = DataType::function(vec![Parameter::new("source", t)], DataType::Integer);
        declare_overload(arena, count, "count", sig);
    }

    let fold = declare_function(arena, scope, "fold");
    {
        let t = generic("T", 0);
        let u = generic("U", 1);
        let combine = DataType::function(
            vec![Parameter::new("acc", u.clone()), Parameter::new("item", t.clone())],
            u.clone(),
        );
        let sig = DataType::function(
            vec![
                Parameter::new("f", combine),
                Parameter::new("init", u.clone()),
                Parameter::new("source", t),
            ],
            u,
        );
        declare_overload(arena, fold, "fold", sig);
    }

    BuiltinFunctions {
        add,
        multiply,
        print,
        chain,
        count,
        fold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_has_one_overload_per_scalar() {
        let mut arena = Arena::new();
        let scope = Scope::root();
        let builtins = populate(&mut arena, &scope);
        assert_eq!(arena.function(builtins.add).overloads.len(), 3);
    }

    #[test]
    fn chain_is_a_single_generic_overload() {
        let mut arena = Arena::new();
        let scope = Scope::root();
        let builtins = populate(&mut arena, &scope);
        let overloads = &arena.function(builtins.chain).overloads;
        assert_eq!(overloads.len(), 1);
        let sig = arena.variable(overloads[0]).data_type.clone().unwrap();
        assert_eq!(sig.generic_occurrences(), 3);
    }

    #[test]
    fn every_builtin_name_is_reachable_from_the_root_scope() {
        let mut arena = Arena::new();
        let scope = Scope::root();
        populate(&mut arena, &scope);
        for name in ["add", "multiply", "print", "chain", "count", "fold"] {
            assert!(scope.find_function(name).is_some(), "{name} missing from scope");
        }
    }
}
