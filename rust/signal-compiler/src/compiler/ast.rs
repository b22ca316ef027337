//! Syntax tree: expression/statement variants (spec section 3).
//!
//! Every expression carries a `NodeId` rather than a mutable type slot —
//! the type checker records each node's data type in a `TypeMap` side
//! table (see `typecheck::TypeMap`) instead of writing into the node, so
//! the tree stays immutable once the parser hands it back (see the
//! "Mutable AST type slots" design note).

use serde::{Deserialize, Serialize};
use signal_core::Location;
use std::cell::Cell;

use crate::compiler::data_type::DataType;
use crate::compiler::semantic::{FunctionId, VariableId};
use crate::compiler::tokens::{LiteralKind, Operator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn from_raw(idx: u32) -> Self {
        Self(idx)
    }
}

/// Hands out monotonically increasing `NodeId`s for one parse.
#[derive(Debug, Default)]
pub struct NodeIdGen(Cell<u32>);

impl NodeIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> NodeId {
        let id = self.0.get();
        self.0.set(id + 1);
        NodeId(id)
    }
}

/// A literal's textual form plus its data type (spec section 3). Text is
/// preserved verbatim; conversion to a runtime value happens at lowering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub text: String,
    pub kind: LiteralKind,
}

/// The unary operators of spec §4.1's precedence table. `tokens::Operator`
/// already names the ten binary operators and is reused directly for
/// `Expr::Binary`; unary `-`/`not` need their own tag since no token kind
/// carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal {
        id: NodeId,
        location: Location,
        literal: Literal,
    },
    /// An operator expression (spec §4.1's precedence table). Lowered
    /// directly to a runtime `BinaryReactor` rather than routed through
    /// overload resolution — arithmetic/comparison/logical operators are a
    /// runtime primitive, distinct from the named, overloadable `add` and
    /// `multiply` built-ins that share their surface syntax with `+`/`*`.
    Binary {
        id: NodeId,
        location: Location,
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        id: NodeId,
        location: Location,
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// A reference to a value-carrying binding introduced by `let x = ...`
    /// or a function parameter.
    Variable {
        id: NodeId,
        location: Location,
        variable: VariableId,
    },
    /// A reference to a named overload set used as a first-class value,
    /// e.g. passing `add` where a callback parameter is expected.
    Function {
        id: NodeId,
        location: Location,
        function: FunctionId,
    },
    Call {
        id: NodeId,
        location: Location,
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// An enum literal reference (`Color.Red`); parsed but its semantics
    /// beyond existing as a value are intentionally minimal per spec §1.
    Enum {
        id: NodeId,
        location: Location,
        enum_name: String,
        variant: String,
    },
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Literal { id, .. }
            | Expr::Variable { id, .. }
            | Expr::Function { id, .. }
            | Expr::Call { id, .. }
            | Expr::Enum { id, .. }
            | Expr::Binary { id, .. }
            | Expr::Unary { id, .. } => *id,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Expr::Literal { location, .. }
            | Expr::Variable { location, .. }
            | Expr::Function { location, .. }
            | Expr::Call { location, .. }
            | Expr::Enum { location, .. }
            | Expr::Binary { location, .. }
            | Expr::Unary { location, .. } => location,
        }
    }

    pub fn as_call(&self) -> Option<(&Expr, &[Expr])> {
        match self {
            Expr::Call { callee, args, .. } => Some((callee, args)),
            _ => None,
        }
    }
}

/// One declared parameter of a `BindFunction` statement: the parameter's
/// own `Variable` plus its declared type, if any (absent parameter types
/// trigger inference, spec §4.3 / §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub variable: VariableId,
    pub declared_type: Option<DataType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumVariant {
    pub name: String,
    pub location: Location,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    BindVariable {
        location: Location,
        variable: VariableId,
        expr: Expr,
    },
    BindFunction {
        id: NodeId,
        location: Location,
        function: FunctionId,
        overload: VariableId,
        params: Vec<Param>,
        body: Expr,
    },
    BindEnum {
        location: Location,
        name: String,
        variants: Vec<EnumVariant>,
    },
    /// A bare expression evaluated for its value (and, at the top level of
    /// `main`, printed), e.g. a line containing only `1 + 2`.
    Expression { location: Location, expr: Expr },
    /// End-of-input marker (spec §3).
    Terminal { location: Location },
}

impl Stmt {
    pub fn location(&self) -> &Location {
        match self {
            Stmt::BindVariable { location, .. }
            | Stmt::BindFunction { location, .. }
            | Stmt::BindEnum { location, .. }
            | Stmt::Expression { location, .. }
            | Stmt::Terminal { location } => location,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stmt::Terminal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_are_monotonic_and_distinct() {
        let gen = NodeIdGen::new();
        let a = gen.next();
        let b = gen.next();
        assert_ne!(a, b);
    }
}
