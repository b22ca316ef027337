//! Constraint sets for type inference (spec §3 "Constraint sets", §4.4).
//!
//! A parameter left without a declared type collects one constraint per
//! call site that applies it: "this expression's type must equal that
//! argument's type". A `ConjunctiveSet` is everything that must hold
//! simultaneously for one candidate assignment of the enclosing generics;
//! a `DisjunctiveSet` is the set of candidate assignments a single call
//! site admits. `infer_types` (in `typecheck.rs`) sweeps the product of
//! every undetermined variable's `DisjunctiveSet` looking for one
//! assignment that satisfies all of them at once.

use std::collections::HashMap;

use crate::compiler::ast::Expr;
use crate::compiler::data_type::DataType;
use crate::compiler::type_map::TypeMap;

/// One `(expression, required type)` pair. `expr` is an owned clone of the
/// sub-expression the constraint came from — cheap, since `Expr` is a small
/// tree of `Box`/`Vec` nodes, and it lets a `ConjunctiveSet` outlive the
/// call site's borrow of the AST it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub expr: Expr,
    pub required: DataType,
}

/// Everything that must hold at once for one candidate variable
/// assignment: every argument expression bound to the same generic index
/// must end up with the same, now-concrete, type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConjunctiveSet {
    constraints: Vec<Constraint>,
}

impl ConjunctiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, expr: Expr, required: DataType) {
        self.constraints.push(Constraint { expr, required });
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    /// Holds iff every constrained expression's recorded type (already
    /// resolved in `types`) equals that constraint's required type.
    pub fn is_satisfied(&self, types: &TypeMap) -> bool {
        self.constraints
            .iter()
            .all(|c| types.expr_type(c.expr.id()) == Some(&c.required))
    }
}

/// The candidate assignments admitted by one call site: each inner
/// `ConjunctiveSet` is one way the site's generics could be bound, and the
/// site is satisfied overall iff at least one of them is.
#[derive(Debug, Clone, Default)]
pub struct DisjunctiveSet {
    candidates: Vec<ConjunctiveSet>,
}

impl DisjunctiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_candidates(candidates: Vec<ConjunctiveSet>) -> Self {
        Self { candidates }
    }

    pub fn push(&mut self, set: ConjunctiveSet) {
        self.candidates.push(set);
    }

    pub fn candidates(&self) -> &[ConjunctiveSet] {
        &self.candidates
    }

    pub fn is_satisfied(&self, types: &TypeMap) -> bool {
        self.candidates.iter().any(|c| c.is_satisfied(types))
    }
}

/// All of the disjunctive sets collected while checking one program,
/// keyed by nothing in particular — order does not matter, only that every
/// one of them ends up satisfied once inference commits to an assignment.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    sets: Vec<DisjunctiveSet>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, set: DisjunctiveSet) {
        if !set.candidates().is_empty() {
            self.sets.push(set);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn sets(&self) -> &[DisjunctiveSet] {
        &self.sets
    }

    pub fn is_satisfied(&self, types: &TypeMap) -> bool {
        self.sets.iter().all(|s| s.is_satisfied(types))
    }
}

/// A candidate assignment of generic indices to concrete types, used while
/// sweeping a `Constraints` set (spec §4.4's odometer).
pub type Assignment = HashMap<u32, DataType>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::ast::NodeId;
    use signal_core::Location;

    fn literal(id: u32) -> Expr {
        Expr::Literal {
            id: NodeId::from_raw(id),
            location: Location::none(),
            literal: crate::compiler::ast::Literal {
                text: "0".into(),
                kind: crate::compiler::tokens::LiteralKind::Integer,
            },
        }
    }

    #[test]
    fn conjunctive_set_requires_every_constraint() {
        let mut types = TypeMap::new();
        let a = literal(0);
        let b = literal(1);
        types.record_expr(a.id(), DataType::Integer);
        types.record_expr(b.id(), DataType::Integer);

        let mut set = ConjunctiveSet::new();
        set.push(a, DataType::Integer);
        set.push(b, DataType::Float);
        assert!(!set.is_satisfied(&types));
    }

    #[test]
    fn disjunctive_set_is_satisfied_if_any_candidate_is() {
        let mut types = TypeMap::new();
        let a = literal(0);
        types.record_expr(a.id(), DataType::Integer);

        let mut mismatching = ConjunctiveSet::new();
        mismatching.push(a.clone(), DataType::Float);
        let mut matching = ConjunctiveSet::new();
        matching.push(a, DataType::Integer);

        let set = DisjunctiveSet::from_candidates(vec![mismatching, matching]);
        assert!(set.is_satisfied(&types));
    }

    #[test]
    fn empty_disjunctive_sets_are_dropped_on_push() {
        let mut constraints = Constraints::new();
        constraints.push(DisjunctiveSet::new());
        assert!(constraints.is_empty());
    }
}
