//! The side table the type checker records its results into (spec §3,
//! §4.4), instead of writing a type back into the AST — see the "Mutable
//! AST type slots" design note on `ast::Expr` and `semantic::Variable`.

use std::collections::HashMap;

use crate::compiler::ast::NodeId;
use crate::compiler::data_type::DataType;
use crate::compiler::semantic::{FunctionId, VariableId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BindingKey {
    Variable(VariableId),
    Function(FunctionId),
}

/// `expr_types` maps an `Expr`'s `NodeId` to its checked data type.
/// `binding_types` maps a variable or a function's `Callable` type to its
/// data type — kept apart from `Arena::variable().data_type` so the arena
/// itself never needs a `&mut` borrow during checking of sibling overloads.
#[derive(Debug, Clone, Default)]
pub struct TypeMap {
    expr_types: HashMap<NodeId, DataType>,
    binding_types: HashMap<BindingKey, DataType>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_expr(&mut self, id: NodeId, data_type: DataType) {
        self.expr_types.insert(id, data_type);
    }

    pub fn expr_type(&self, id: NodeId) -> Option<&DataType> {
        self.expr_types.get(&id)
    }

    pub fn record_variable(&mut self, id: VariableId, data_type: DataType) {
        self.binding_types.insert(BindingKey::Variable(id), data_type);
    }

    pub fn variable_type(&self, id: VariableId) -> Option<&DataType> {
        self.binding_types.get(&BindingKey::Variable(id))
    }

    pub fn record_function(&mut self, id: FunctionId, data_type: DataType) {
        self.binding_types.insert(BindingKey::Function(id), data_type);
    }

    pub fn function_type(&self, id: FunctionId) -> Option<&DataType> {
        self.binding_types.get(&BindingKey::Function(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expr_and_binding_tables_are_independent() {
        let mut map = TypeMap::new();
        let expr_id = NodeId::from_raw(0);
        map.record_expr(expr_id, DataType::Integer);
        let var = VariableId::from_raw(0);
        map.record_variable(var, DataType::Bool);
        assert_eq!(map.expr_type(expr_id), Some(&DataType::Integer));
        assert_eq!(map.variable_type(var), Some(&DataType::Bool));
    }
}
