//! The type checker: overload resolution, generic instantiation, and
//! constraint-based inference for parameters left without a declared type
//! (spec §4.3, §4.4; grounded on `type_checks/type_checker.hpp`).

use std::collections::HashMap;
use std::rc::Rc;

use signal_core::Location;
use thiserror::Error;

use crate::compiler::ast::{Expr, Literal, NodeId, Stmt, UnaryOp};
use crate::compiler::constraints::{ConjunctiveSet, Constraints, DisjunctiveSet};
use crate::compiler::data_type::{DataType, FunctionSignature, Parameter};
use crate::compiler::semantic::{Arena, FunctionDefinition, FunctionId, Scope, VariableId};
use crate::compiler::tokens::{LiteralKind, Operator};
use crate::compiler::type_map::TypeMap;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypeError {
    #[error("{location}: variable has no determined type")]
    VariableNotFound { location: Location },
    #[error("{location}: no overload accepts the given argument types")]
    OverloadNotFound { location: Location },
    #[error("{location}: could not infer a type for this function's parameters")]
    InferenceFailed { location: Location },
    #[error("{location}: operator `{op:?}` does not accept a `{operand_type}` operand")]
    BadOperand {
        location: Location,
        op: String,
        operand_type: DataType,
    },
}

impl TypeError {
    pub fn location(&self) -> &Location {
        match self {
            TypeError::VariableNotFound { location }
            | TypeError::OverloadNotFound { location }
            | TypeError::InferenceFailed { location }
            | TypeError::BadOperand { location, .. } => location,
        }
    }
}

/// Which scalar types a binary operator accepts, and what it returns for
/// them. Arithmetic and comparisons are polymorphic over `Integer`/`Float`
/// (and `+` also over `Text`, matching the `add` built-in's overload set);
/// equality works over any scalar; logical ops are `Bool`-only.
fn binary_result_type(op: Operator, left: &DataType, right: &DataType) -> Option<DataType> {
    if left != right {
        return None;
    }
    use Operator::*;
    match op {
        Add => matches!(left, DataType::Integer | DataType::Float | DataType::Text).then(|| left.clone()),
        Sub | Mul | Div => matches!(left, DataType::Integer | DataType::Float).then(|| left.clone()),
        Eq | NotEq => matches!(
            left,
            DataType::Bool | DataType::Integer | DataType::Float | DataType::Text
        )
        .then_some(DataType::Bool),
        Lt | LtEq | Gt | GtEq => {
            matches!(left, DataType::Integer | DataType::Float).then_some(DataType::Bool)
        }
        And | Or => matches!(left, DataType::Bool).then_some(DataType::Bool),
    }
}

fn unary_result_type(op: UnaryOp, operand: &DataType) -> Option<DataType> {
    match op {
        UnaryOp::Negate => matches!(operand, DataType::Integer | DataType::Float).then(|| operand.clone()),
        UnaryOp::Not => matches!(operand, DataType::Bool).then(|| operand.clone()),
    }
}

pub(crate) fn literal_type(literal: &Literal) -> DataType {
    match literal.kind {
        LiteralKind::Bool => DataType::Bool,
        LiteralKind::Integer => DataType::Integer,
        LiteralKind::Float => DataType::Float,
        LiteralKind::Text => DataType::Text,
    }
}

fn bind_generic(index: u32, ty: DataType, bindings: &mut HashMap<u32, DataType>) -> bool {
    match bindings.get(&index) {
        Some(bound) => *bound == ty,
        None => {
            bindings.insert(index, ty);
            true
        }
    }
}

/// Matches one expected parameter type against an actual argument type,
/// extending `bindings` with any generic binding this requires and
/// rejecting the match if it would conflict with one already made (spec
/// §4.3.1: "generic binding consistency").
fn match_param(
    expected: &DataType,
    actual: &DataType,
    arena: &Arena,
    bindings: &mut HashMap<u32, DataType>,
) -> bool {
    match (expected, actual) {
        (DataType::Generic(g), DataType::Callable(fid)) => arena
            .function(*fid)
            .overloads
            .iter()
            .find_map(|&v| arena.variable(v).data_type.clone())
            .is_some_and(|sig| bind_generic(g.index, sig, bindings)),
        (DataType::Generic(g), _) => bind_generic(g.index, actual.clone(), bindings),
        (DataType::Function(esig), DataType::Callable(fid)) => {
            arena.function(*fid).overloads.iter().any(|&v| {
                let mut trial = bindings.clone();
                let matched = arena
                    .variable(v)
                    .data_type
                    .as_ref()
                    .and_then(DataType::as_function)
                    .is_some_and(|asig| match_function_sig(esig, asig, arena, &mut trial));
                if matched {
                    *bindings = trial;
                }
                matched
            })
        }
        (DataType::Function(esig), DataType::Function(asig)) => {
            match_function_sig(esig, asig, arena, bindings)
        }
        _ => expected == actual,
    }
}

fn match_function_sig(
    expected: &FunctionSignature,
    actual: &FunctionSignature,
    arena: &Arena,
    bindings: &mut HashMap<u32, DataType>,
) -> bool {
    expected.arity() == actual.arity()
        && expected
            .parameters
            .iter()
            .zip(&actual.parameters)
            .all(|(e, a)| match_param(&e.data_type, &a.data_type, arena, bindings))
        && match_param(&expected.return_type, &actual.return_type, arena, bindings)
}

/// Substitutes every bound generic in `ty` with its concrete type,
/// recursing into function signatures (spec §4.3.2).
pub(crate) fn instantiate(ty: &DataType, bindings: &HashMap<u32, DataType>) -> DataType {
    match ty {
        DataType::Generic(g) => bindings.get(&g.index).cloned().unwrap_or_else(|| ty.clone()),
        DataType::Function(sig) => DataType::function(
            sig.parameters
                .iter()
                .map(|p| Parameter::new(p.name.clone(), instantiate(&p.data_type, bindings)))
                .collect(),
            instantiate(&sig.return_type, bindings),
        ),
        _ => ty.clone(),
    }
}

/// The candidate overloads a callee type admits: every overload of a
/// `Callable`'s function, or the single signature of an already-concrete
/// `Function` value (e.g. a function passed in as a parameter).
pub(crate) fn candidates_for(arena: &Arena, callee_type: &DataType) -> Vec<(Option<VariableId>, Rc<FunctionSignature>)> {
    match callee_type {
        DataType::Callable(fid) => arena
            .function(*fid)
            .overloads
            .iter()
            .filter_map(|&v| {
                arena
                    .variable(v)
                    .data_type
                    .as_ref()
                    .and_then(DataType::as_function)
                    .map(|sig| (Some(v), sig.clone()))
            })
            .collect(),
        DataType::Function(sig) => vec![(None, sig.clone())],
        _ => Vec::new(),
    }
}

/// Picks the best-matching candidate for a call's argument types: the one
/// with the fewest generic occurrences wins a tie, and the first declared
/// overload wins a tie between equally specific candidates (spec §4.3.1).
pub(crate) fn best_match(
    candidates: &[(Option<VariableId>, Rc<FunctionSignature>)],
    arg_types: &[DataType],
    arena: &Arena,
) -> Option<(Option<VariableId>, Rc<FunctionSignature>, HashMap<u32, DataType>)> {
    let mut best: Option<(Option<VariableId>, Rc<FunctionSignature>, HashMap<u32, DataType>, usize)> = None;
    for (vid, sig) in candidates {
        if sig.arity() != arg_types.len() {
            continue;
        }
        let mut bindings = HashMap::new();
        let matched = sig
            .parameters
            .iter()
            .zip(arg_types)
            .all(|(p, a)| match_param(&p.data_type, a, arena, &mut bindings));
        if matched {
            let specificity = DataType::Function(sig.clone()).generic_occurrences();
            let replace = match &best {
                Some((_, _, _, best_specificity)) => specificity < *best_specificity,
                None => true,
            };
            if replace {
                best = Some((*vid, sig.clone(), bindings, specificity));
            }
        }
    }
    best.map(|(vid, sig, bindings, _)| (vid, sig, bindings))
}

/// Resolves `fid`'s overload set against an already-concrete expected
/// signature, used to record which overload a `Callable`-typed argument
/// binds to once the outer call's generics have been settled (spec §4.3's
/// "forwarded callable" case).
fn resolve_against(
    arena: &Arena,
    fid: FunctionId,
    expected: &Rc<FunctionSignature>,
) -> Option<(VariableId, Rc<FunctionSignature>)> {
    arena.function(fid).overloads.iter().find_map(|&v| {
        let sig = arena.variable(v).data_type.as_ref().and_then(DataType::as_function)?;
        let mut bindings = HashMap::new();
        match_function_sig(expected, sig, arena, &mut bindings).then(|| (v, sig.clone()))
    })
}

/// Walks `expr`, recording one `DisjunctiveSet` per call site (one
/// `ConjunctiveSet` per arity-matching overload) and, for every argument
/// that is a bare variable reference, the candidate types that variable
/// could take at that call site (spec §4.4's `m_candidates`).
fn collect_constraints(
    expr: &Expr,
    arena: &Arena,
    base_types: &TypeMap,
    constraints: &mut Constraints,
    candidates: &mut HashMap<VariableId, Vec<DataType>>,
) {
    match expr {
        Expr::Call { callee, args, .. } => {
            collect_constraints(callee, arena, base_types, constraints, candidates);
            let callee_type = match callee.as_ref() {
                Expr::Function { function, .. } => DataType::Callable(*function),
                other => base_types.expr_type(other.id()).cloned().unwrap_or(DataType::Bool),
            };
            let mut dset = DisjunctiveSet::new();
            for (_, sig) in candidates_for(arena, &callee_type) {
                if sig.arity() != args.len() {
                    continue;
                }
                let mut cset = ConjunctiveSet::new();
                for (param, arg) in sig.parameters.iter().zip(args) {
                    cset.push(arg.clone(), param.data_type.clone());
                    if let Expr::Variable { variable, .. } = arg {
                        candidates.entry(*variable).or_default().push(param.data_type.clone());
                    }
                }
                dset.push(cset);
            }
            constraints.push(dset);
            for arg in args {
                collect_constraints(arg, arena, base_types, constraints, candidates);
            }
        }
        Expr::Binary { left, right, .. } => {
            collect_constraints(left, arena, base_types, constraints, candidates);
            collect_constraints(right, arena, base_types, constraints, candidates);
        }
        Expr::Unary { operand, .. } => {
            collect_constraints(operand, arena, base_types, constraints, candidates);
        }
        _ => {}
    }
}

fn expr_type_under(
    expr: &Expr,
    assignment: &HashMap<VariableId, DataType>,
    arena: &Arena,
    base_types: &TypeMap,
) -> Option<DataType> {
    match expr {
        Expr::Literal { literal, .. } => Some(literal_type(literal)),
        Expr::Variable { variable, .. } => assignment
            .get(variable)
            .cloned()
            .or_else(|| arena.variable(*variable).data_type.clone()),
        Expr::Function { function, .. } => Some(DataType::Callable(*function)),
        Expr::Enum { enum_name, .. } => Some(DataType::Enum(enum_name.clone())),
        Expr::Call { id, .. } => base_types.expr_type(*id).cloned(),
        Expr::Binary { op, left, right, .. } => {
            let l = expr_type_under(left, assignment, arena, base_types)?;
            let r = expr_type_under(right, assignment, arena, base_types)?;
            binary_result_type(*op, &l, &r)
        }
        Expr::Unary { op, operand, .. } => {
            let t = expr_type_under(operand, assignment, arena, base_types)?;
            unary_result_type(*op, &t)
        }
    }
}

/// Sweeps the product of every inferred variable's candidate bucket
/// (capped at 10 000 combinations, spec §4.4) looking for an assignment
/// under which every collected constraint holds. `round` accumulates the
/// product of prior variables' candidate counts, giving a true mixed-radix
/// odometer over the combined assignment space — see DESIGN.md for why
/// this departs from `type_checker.hpp`'s literal (and, taken literally,
/// non-terminating) `round += ...` step while still matching the
/// enumeration order spec.md §8's `chain(f(x), g(y))` scenario depends on.
pub fn infer_types(body: &Expr, base_types: &TypeMap, arena: &mut Arena) -> Option<TypeMap> {
    let mut constraints = Constraints::new();
    let mut candidates: HashMap<VariableId, Vec<DataType>> = HashMap::new();
    collect_constraints(body, arena, base_types, &mut constraints, &mut candidates);
    if constraints.is_empty() {
        return Some(base_types.clone());
    }
    let inferred_variables: Vec<VariableId> = candidates.keys().copied().collect();
    if inferred_variables.iter().any(|v| candidates[v].is_empty()) {
        return None;
    }

    let mut index: u64 = 0;
    loop {
        let mut round: u64 = 1;
        let mut assignment = HashMap::new();
        for var in &inferred_variables {
            let bucket = &candidates[var];
            let choice = bucket[((index / round) as usize) % bucket.len()].clone();
            assignment.insert(*var, choice);
            round *= bucket.len() as u64;
        }

        let mut trial = base_types.clone();
        for (var, ty) in &assignment {
            trial.record_variable(*var, ty.clone());
        }
        for dset in constraints.sets() {
            for cset in dset.candidates() {
                for c in cset.iter() {
                    if let Some(ty) = expr_type_under(&c.expr, &assignment, arena, base_types) {
                        trial.record_expr(c.expr.id(), ty);
                    }
                }
            }
        }

        if constraints.is_satisfied(&trial) {
            for (var, ty) in &assignment {
                arena.set_variable_type(*var, ty.clone());
            }
            return Some(trial);
        }

        index += 1;
        if index >= 10_000 {
            return None;
        }
    }
}

/// Type checks a whole program against a pre-populated `Arena`/`Scope`
/// (built by the parser, spec §4.2), recording every expression's and
/// binding's data type plus which overload each call resolved to.
pub struct TypeChecker<'a> {
    arena: &'a mut Arena,
    types: TypeMap,
    definitions: HashMap<NodeId, FunctionDefinition>,
    call_definitions: HashMap<NodeId, FunctionDefinition>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(arena: &'a mut Arena) -> Self {
        Self {
            arena,
            types: TypeMap::new(),
            definitions: HashMap::new(),
            call_definitions: HashMap::new(),
        }
    }

    pub fn types(&self) -> &TypeMap {
        &self.types
    }

    pub fn definition(&self, stmt_id: NodeId) -> Option<&FunctionDefinition> {
        self.definitions.get(&stmt_id)
    }

    pub fn call_definition(&self, expr_id: NodeId) -> Option<&FunctionDefinition> {
        self.call_definitions.get(&expr_id)
    }

    /// The full call-site → resolved-overload map, handed to the translator
    /// so it can look up each `Call`'s resolution without re-running
    /// overload resolution (spec §4.5).
    pub fn call_definitions(&self) -> &HashMap<NodeId, FunctionDefinition> {
        &self.call_definitions
    }

    pub fn check(&mut self, program: &[Stmt], scope: &Scope) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();
        for stmt in program {
            if let Err(err) = self.check_stmt(stmt, scope) {
                errors.push(err);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt, scope: &Scope) -> Result<(), TypeError> {
        match stmt {
            Stmt::BindVariable { variable, expr, .. } => {
                let ty = self.check_expr(expr, scope)?;
                self.arena.set_variable_type(*variable, ty.clone());
                self.types.record_variable(*variable, ty);
                Ok(())
            }
            Stmt::BindFunction {
                id,
                location,
                function,
                overload,
                params,
                body,
            } => {
                let mut needs_inference = false;
                for param in params {
                    match &param.declared_type {
                        Some(declared) => self.arena.set_variable_type(param.variable, declared.clone()),
                        None => needs_inference = true,
                    }
                }
                if needs_inference {
                    match infer_types(body, &self.types, self.arena) {
                        Some(inferred) => self.types = inferred,
                        None => {
                            return Err(TypeError::InferenceFailed {
                                location: location.clone(),
                            })
                        }
                    }
                }
                let return_type = self.check_expr(body, scope)?;
                let parameters = params
                    .iter()
                    .map(|p| {
                        let variable = self.arena.variable(p.variable);
                        Parameter::new(
                            variable.name.clone(),
                            variable.data_type.clone().unwrap_or(DataType::Bool),
                        )
                    })
                    .collect();
                let signature = DataType::function(parameters, return_type);
                self.arena.set_variable_type(*overload, signature.clone());
                self.types.record_variable(*overload, signature.clone());
                let definition = FunctionDefinition {
                    location: location.clone(),
                    function: *function,
                    overload: *overload,
                    signature,
                };
                self.definitions.insert(*id, definition.clone());
                scope.add_definition(definition);
                Ok(())
            }
            Stmt::BindEnum { .. } | Stmt::Terminal { .. } => Ok(()),
        }
    }

    fn check_expr(&mut self, expr: &Expr, scope: &Scope) -> Result<DataType, TypeError> {
        match expr {
            Expr::Literal { literal, .. } => {
                let ty = literal_type(literal);
                self.types.record_expr(expr.id(), ty.clone());
                Ok(ty)
            }
            Expr::Variable { variable, location, .. } => {
                let ty = self
                    .arena
                    .variable(*variable)
                    .data_type
                    .clone()
                    .ok_or_else(|| TypeError::VariableNotFound {
                        location: location.clone(),
                    })?;
                self.types.record_expr(expr.id(), ty.clone());
                Ok(ty)
            }
            Expr::Function { function, .. } => {
                let ty = DataType::Callable(*function);
                self.types.record_expr(expr.id(), ty.clone());
                Ok(ty)
            }
            Expr::Enum { enum_name, .. } => {
                let ty = DataType::Enum(enum_name.clone());
                self.types.record_expr(expr.id(), ty.clone());
                Ok(ty)
            }
            Expr::Call {
                id,
                location,
                callee,
                args,
            } => self.check_call(*id, location, callee, args, scope),
            Expr::Binary {
                id,
                location,
                op,
                left,
                right,
            } => {
                let lt = self.check_expr(left, scope)?;
                let rt = self.check_expr(right, scope)?;
                let ty = binary_result_type(*op, &lt, &rt).ok_or_else(|| TypeError::BadOperand {
                    location: location.clone(),
                    op: format!("{op:?}"),
                    operand_type: lt.clone(),
                })?;
                self.types.record_expr(*id, ty.clone());
                Ok(ty)
            }
            Expr::Unary {
                id,
                location,
                op,
                operand,
            } => {
                let ot = self.check_expr(operand, scope)?;
                let ty = unary_result_type(*op, &ot).ok_or_else(|| TypeError::BadOperand {
                    location: location.clone(),
                    op: format!("{op:?}"),
                    operand_type: ot.clone(),
                })?;
                self.types.record_expr(*id, ty.clone());
                Ok(ty)
            }
        }
    }

    fn check_call(
        &mut self,
        id: NodeId,
        location: &Location,
        callee: &Expr,
        args: &[Expr],
        scope: &Scope,
    ) -> Result<DataType, TypeError> {
        let arg_types = args
            .iter()
            .map(|a| self.check_expr(a, scope))
            .collect::<Result<Vec<_>, _>>()?;
        let callee_type = match callee {
            Expr::Function { function, .. } => DataType::Callable(*function),
            other => self.check_expr(other, scope)?,
        };

        let candidates = candidates_for(self.arena, &callee_type);
        let (overload_vid, sig, bindings) =
            best_match(&candidates, &arg_types, self.arena).ok_or_else(|| TypeError::OverloadNotFound {
                location: location.clone(),
            })?;
        let return_type = instantiate(&sig.return_type, &bindings);

        if let (DataType::Callable(fid), Some(vid)) = (&callee_type, overload_vid) {
            let signature = DataType::function(
                sig.parameters
                    .iter()
                    .map(|p| Parameter::new(p.name.clone(), instantiate(&p.data_type, &bindings)))
                    .collect(),
                return_type.clone(),
            );
            let definition = FunctionDefinition {
                location: location.clone(),
                function: *fid,
                overload: vid,
                signature,
            };
            self.call_definitions.insert(id, definition.clone());
            scope.add_definition(definition);

            for (i, arg_ty) in arg_types.iter().enumerate() {
                if let DataType::Callable(arg_fid) = arg_ty {
                    let expected = instantiate(&sig.parameters[i].data_type, &bindings);
                    if let DataType::Function(expected_sig) = &expected {
                        if let Some((arg_vid, arg_sig)) = resolve_against(self.arena, *arg_fid, expected_sig) {
                            let arg_definition = FunctionDefinition {
                                location: args[i].location().clone(),
                                function: *arg_fid,
                                overload: arg_vid,
                                signature: DataType::Function(arg_sig),
                            };
                            self.call_definitions.insert(args[i].id(), arg_definition.clone());
                            scope.add_definition(arg_definition);
                        }
                    }
                }
            }
        }

        self.types.record_expr(id, return_type.clone());
        Ok(return_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::ast::NodeIdGen;
    use crate::compiler::semantic::Variable;

    fn loc() -> Location {
        Location::none()
    }

    #[test]
    fn binds_a_literal_variable() {
        let mut arena = Arena::new();
        let scope = Scope::root();
        let v = arena.insert_variable(Variable {
            location: loc(),
            name: "x".into(),
            data_type: None,
        });
        scope.add_variable("x", v);
        let nodes = NodeIdGen::new();
        let stmt = Stmt::BindVariable {
            location: loc(),
            variable: v,
            expr: Expr::Literal {
                id: nodes.next(),
                location: loc(),
                literal: Literal {
                    text: "1".into(),
                    kind: LiteralKind::Integer,
                },
            },
        };
        let mut checker = TypeChecker::new(&mut arena);
        checker.check(&[stmt], &scope).unwrap();
        assert_eq!(checker.types().variable_type(v), Some(&DataType::Integer));
    }

    #[test]
    fn call_with_no_matching_overload_is_an_error() {
        let mut arena = Arena::new();
        let scope = Scope::root();
        let f = arena.insert_function("f");
        let p = arena.insert_variable(Variable {
            location: loc(),
            name: "x".into(),
            data_type: None,
        });
        let overload = arena.insert_variable(Variable {
            location: loc(),
            name: "f".into(),
            data_type: Some(DataType::function(
                vec![Parameter::new("x", DataType::Integer)],
                DataType::Integer,
            )),
        });
        arena.add_overload(f, overload).unwrap();
        scope.add_function("f", f);
        let nodes = NodeIdGen::new();
        let callee = Expr::Function {
            id: nodes.next(),
            location: loc(),
            function: f,
        };
        let arg = Expr::Literal {
            id: nodes.next(),
            location: loc(),
            literal: Literal {
                text: "true".into(),
                kind: LiteralKind::Bool,
            },
        };
        let call = Expr::Call {
            id: nodes.next(),
            location: loc(),
            callee: Box::new(callee),
            args: vec![arg],
        };
        let stmt = Stmt::BindVariable {
            location: loc(),
            variable: p,
            expr: call,
        };
        let mut checker = TypeChecker::new(&mut arena);
        let result = checker.check(&[stmt], &scope);
        assert!(matches!(
            result,
            Err(errors) if matches!(errors[0], TypeError::OverloadNotFound { .. })
        ));
    }
}
