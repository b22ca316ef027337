//! The reactor translator: the last compiler stage, turning a type-checked
//! AST into a graph of `signal_rt::builders::ReactorBuilder`s (spec §4.5).
//! Consumes the runtime's builder/reactor contract rather than defining it —
//! this module's job is entirely about *which* builder a node lowers to and
//! how generic overloads get instantiated lazily, never about reactor
//! internals.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use signal_core::Location;
use signal_rt::builders::{self, CallReactorBuilder, ProxyReactorBuilder, ReactorBuilder, UserFunctionBuilder};
use signal_rt::reactor::{Reactor, ReactorHandle, Update};
use signal_rt::trigger::Trigger;
use signal_rt::value::Value;
use thiserror::Error;

use crate::compiler::ast::{Expr, Literal, NodeId, Param, Stmt, UnaryOp as AstUnaryOp};
use crate::compiler::builtins::BuiltinFunctions;
use crate::compiler::data_type::DataType;
use crate::compiler::semantic::{Arena, FunctionDefinition, FunctionId, VariableId};
use crate::compiler::tokens::{LiteralKind, Operator};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslateError {
    #[error("{location}: `{name}` has no builder and no generic definition to instantiate")]
    UnresolvedOverload { location: Location, name: String },
}

impl TranslateError {
    pub fn location(&self) -> &Location {
        match self {
            TranslateError::UnresolvedOverload { location, .. } => location,
        }
    }
}

type GenericFactory = Rc<dyn Fn(VariableId) -> Rc<dyn ReactorBuilder>>;

/// Lowers one checked program into a dataflow graph. Built incrementally by
/// repeated calls to `translate`, one per top-level statement, matching the
/// parser's own statement-at-a-time shape (spec §4.1's incrementality note
/// applies just as well downstream).
pub struct Translator<'a> {
    trigger: &'a Trigger,
    arena: &'a Arena,
    call_definitions: &'a HashMap<NodeId, FunctionDefinition>,
    builtins: Option<BuiltinFunctions>,
    /// Concrete builders, keyed by the `VariableId` of the overload (or
    /// `let`-bound variable) they implement. Populated eagerly for
    /// monomorphic bindings and lazily, on first use, for generic ones.
    variables: HashMap<VariableId, Rc<dyn ReactorBuilder>>,
    /// Which `Function` each overload variable belongs to, so a lookup miss
    /// in `variables` can find the right generic definition or builtin
    /// factory to instantiate from.
    overload_owner: HashMap<VariableId, FunctionId>,
    /// Parked `(params, body)` for a generic `BindFunction`, keyed by its
    /// overload variable. Cloned and re-lowered once per distinct concrete
    /// signature a call site resolves it to (spec §4.5.1).
    generic_definitions: HashMap<VariableId, (Vec<Param>, Expr)>,
    /// Builder factories for built-in generics (`chain`, `count`) that have
    /// exactly one Rust implementation regardless of element type — see
    /// `builders::make_chain_reactor_builder`'s own doc comment.
    generic_builders: HashMap<FunctionId, GenericFactory>,
    /// Memoized instantiations of a generic overload, keyed by its own
    /// variable plus the concrete signature name a particular call site
    /// resolved it to (`DataType` has no `Hash` impl; its stable `name()`
    /// string stands in for structural equality here — see DESIGN.md).
    instantiations: HashMap<(VariableId, String), Rc<dyn ReactorBuilder>>,
    main: Option<VariableId>,
}

impl<'a> Translator<'a> {
    pub fn new(trigger: &'a Trigger, arena: &'a Arena, call_definitions: &'a HashMap<NodeId, FunctionDefinition>) -> Self {
        Self {
            trigger,
            arena,
            call_definitions,
            builtins: None,
            variables: HashMap::new(),
            overload_owner: HashMap::new(),
            generic_definitions: HashMap::new(),
            generic_builders: HashMap::new(),
            instantiations: HashMap::new(),
            main: None,
        }
    }

    /// Installs a concrete builder for a single overload or `let` binding
    /// (spec §4.5's `add(variable, builder)`).
    pub fn add(&mut self, variable: VariableId, builder: Rc<dyn ReactorBuilder>) {
        self.variables.insert(variable, builder);
    }

    /// Installs a builder factory for a generic function's own overload
    /// variable (spec §4.5's `add(function, variable, generic_builder)`,
    /// collapsed here to `(function, factory)` since every generic built-in
    /// declares exactly one overload).
    pub fn add_generic_builder(&mut self, function: FunctionId, factory: impl Fn(VariableId) -> Rc<dyn ReactorBuilder> + 'static) {
        self.generic_builders.insert(function, Rc::new(factory));
    }

    /// Wires up `add`/`multiply`/`print` eagerly (one concrete overload each)
    /// and registers `chain`/`count` as generic factories; `fold` is handled
    /// entirely inside `lower_call` because its `f` parameter is itself a
    /// callable rather than a value a `ReactorBuilder` can be built from.
    pub fn register_builtins(&mut self, builtins: BuiltinFunctions) {
        for &overload in &self.arena.function(builtins.add).overloads {
            self.add(overload, builders::make_add_reactor_builder());
        }
        for &overload in &self.arena.function(builtins.multiply).overloads {
            self.add(overload, builders::make_multiply_reactor_builder());
        }
        for &overload in &self.arena.function(builtins.print).overloads {
            self.add(overload, builders::make_ostream_reactor_builder(Box::new(std::io::stdout())));
        }
        for &overload in &self.arena.function(builtins.chain).overloads {
            self.overload_owner.insert(overload, builtins.chain);
        }
        for &overload in &self.arena.function(builtins.count).overloads {
            self.overload_owner.insert(overload, builtins.count);
        }
        self.add_generic_builder(builtins.chain, |_v| builders::make_chain_reactor_builder());
        self.add_generic_builder(builtins.count, |_v| builders::make_count_reactor_builder());
        self.builtins = Some(builtins);
    }

    /// Lowers one top-level statement, applying its effect to the builder
    /// graph under construction.
    pub fn translate(&mut self, stmt: &Stmt) -> Result<(), TranslateError> {
        match stmt {
            Stmt::BindVariable { variable, expr, .. } => {
                let builder = self.lower_expr(expr)?;
                self.variables.insert(*variable, builder);
                if self.arena.variable(*variable).name == "main" {
                    self.main = Some(*variable);
                }
                Ok(())
            }
            Stmt::BindFunction { function, overload, params, body, .. } => {
                self.overload_owner.insert(*overload, *function);
                let is_generic = params
                    .iter()
                    .any(|p| p.declared_type.as_ref().is_some_and(|t| t.generic_occurrences() > 0));
                if is_generic {
                    self.generic_definitions.insert(*overload, (params.clone(), body.clone()));
                    return Ok(());
                }
                let builder = self.lower_function_body(params, body)?;
                self.variables.insert(*overload, builder);
                Ok(())
            }
            // Enum bindings carry no runtime value beyond their literal
            // references (lowered where used, as `Expr::Enum`); a bare
            // top-level expression has no binding for `get_main` to drive,
            // so there is nothing further to do with either here.
            Stmt::BindEnum { .. } | Stmt::Expression { .. } | Stmt::Terminal { .. } => Ok(()),
        }
    }

    /// Builds and returns the reactor for the `main` binding, or `None` if
    /// the program never declared one.
    pub fn get_main(&self) -> Option<ReactorHandle> {
        let main = self.main?;
        let builder = self.variables.get(&main)?.clone();
        Some(builder.build(&[], self.trigger))
    }

    fn lower_function_body(&mut self, params: &[Param], body: &Expr) -> Result<Rc<dyn ReactorBuilder>, TranslateError> {
        let proxies: Vec<Rc<ProxyReactorBuilder>> = params.iter().map(|_| ProxyReactorBuilder::new()).collect();
        for (p, proxy) in params.iter().zip(&proxies) {
            self.variables.insert(p.variable, proxy.clone() as Rc<dyn ReactorBuilder>);
        }
        let body_builder = self.lower_expr(body);
        for p in params {
            self.variables.remove(&p.variable);
        }
        let body_builder = body_builder?;
        Ok(Rc::new(UserFunctionBuilder { proxies, body: body_builder }))
    }

    fn lower_expr(&mut self, expr: &Expr) -> Result<Rc<dyn ReactorBuilder>, TranslateError> {
        match expr {
            Expr::Literal { literal, .. } => Ok(builders::make_constant_reactor_builder(literal_value(literal))),
            Expr::Variable { variable, location, .. } => self.variable_builder(*variable, location),
            Expr::Function { function, location, .. } => {
                let overload = self
                    .arena
                    .function(*function)
                    .overloads
                    .first()
                    .copied()
                    .ok_or_else(|| TranslateError::UnresolvedOverload {
                        location: location.clone(),
                        name: self.arena.function(*function).name.clone(),
                    })?;
                self.variable_builder(overload, location)
            }
            Expr::Enum { enum_name, variant, .. } => {
                Ok(builders::make_constant_reactor_builder(Value::Text(format!("{enum_name}.{variant}"))))
            }
            Expr::Binary { op, left, right, .. } => {
                let l = self.lower_expr(left)?;
                let r = self.lower_expr(right)?;
                Ok(Rc::new(CallReactorBuilder {
                    callee: binary_builder_for(*op),
                    arguments: vec![l, r],
                }))
            }
            Expr::Unary { op, operand, .. } => {
                let o = self.lower_expr(operand)?;
                Ok(Rc::new(CallReactorBuilder {
                    callee: unary_builder_for(*op),
                    arguments: vec![o],
                }))
            }
            Expr::Call { id, location, callee, args } => self.lower_call(*id, location, callee, args),
        }
    }

    fn lower_call(&mut self, id: NodeId, location: &Location, callee: &Expr, args: &[Expr]) -> Result<Rc<dyn ReactorBuilder>, TranslateError> {
        if let Some(definition) = self.call_definitions.get(&id).cloned() {
            if self.builtins.is_some_and(|b| b.fold == definition.function) {
                let f = self.lower_expr(&args[0])?;
                let init = self.lower_expr(&args[1])?;
                let source = self.lower_expr(&args[2])?;
                return Ok(Rc::new(FoldCallBuilder { f, init, source }));
            }
            let callee_builder = self.resolved_builder(definition.overload, &definition.signature, location)?;
            let mut arguments = Vec::with_capacity(args.len());
            for a in args {
                arguments.push(self.lower_expr(a)?);
            }
            return Ok(Rc::new(CallReactorBuilder { callee: callee_builder, arguments }));
        }
        let callee_builder = self.lower_expr(callee)?;
        let mut arguments = Vec::with_capacity(args.len());
        for a in args {
            arguments.push(self.lower_expr(a)?);
        }
        Ok(Rc::new(CallReactorBuilder { callee: callee_builder, arguments }))
    }

    fn variable_builder(&mut self, variable: VariableId, location: &Location) -> Result<Rc<dyn ReactorBuilder>, TranslateError> {
        if let Some(b) = self.variables.get(&variable) {
            return Ok(b.clone());
        }
        let concrete = self.arena.variable(variable).data_type.clone().unwrap_or(DataType::Bool);
        self.resolved_builder(variable, &concrete, location)
    }

    /// Looks up `variable`'s builder, instantiating it on first use (spec
    /// §4.5.1): a built-in generic factory is invoked directly; a
    /// user-defined generic is cloned from its parked definition,
    /// substituted implicitly by re-lowering its body against fresh
    /// parameter proxies, and memoized per concrete `signature`.
    fn resolved_builder(&mut self, variable: VariableId, signature: &DataType, location: &Location) -> Result<Rc<dyn ReactorBuilder>, TranslateError> {
        if let Some(b) = self.variables.get(&variable) {
            return Ok(b.clone());
        }
        let function = *self.overload_owner.get(&variable).ok_or_else(|| TranslateError::UnresolvedOverload {
            location: location.clone(),
            name: self.arena.variable(variable).name.clone(),
        })?;
        if let Some(factory) = self.generic_builders.get(&function).cloned() {
            let builder = factory(variable);
            self.variables.insert(variable, builder.clone());
            return Ok(builder);
        }
        let key = (variable, signature.name());
        if let Some(cached) = self.instantiations.get(&key) {
            return Ok(cached.clone());
        }
        let (params, body) = self
            .generic_definitions
            .get(&variable)
            .cloned()
            .ok_or_else(|| TranslateError::UnresolvedOverload {
                location: location.clone(),
                name: self.arena.variable(variable).name.clone(),
            })?;
        let builder = self.lower_function_body(&params, &body)?;
        self.instantiations.insert(key, builder.clone());
        Ok(builder)
    }
}

fn binary_builder_for(op: Operator) -> Rc<dyn ReactorBuilder> {
    match op {
        Operator::Add => builders::make_add_reactor_builder(),
        Operator::Sub => builders::make_subtract_reactor_builder(),
        Operator::Mul => builders::make_multiply_reactor_builder(),
        Operator::Div => builders::make_divide_reactor_builder(),
        Operator::Eq => builders::make_equals_reactor_builder(),
        Operator::NotEq => builders::make_not_equals_reactor_builder(),
        Operator::Lt => builders::make_less_than_reactor_builder(),
        Operator::LtEq => builders::make_less_equal_reactor_builder(),
        Operator::Gt => builders::make_greater_than_reactor_builder(),
        Operator::GtEq => builders::make_greater_equal_reactor_builder(),
        Operator::And => builders::make_and_reactor_builder(),
        Operator::Or => builders::make_or_reactor_builder(),
    }
}

fn unary_builder_for(op: AstUnaryOp) -> Rc<dyn ReactorBuilder> {
    match op {
        AstUnaryOp::Not => builders::make_not_reactor_builder(),
        AstUnaryOp::Negate => builders::make_negate_reactor_builder(),
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal.kind {
        LiteralKind::Bool => Value::Bool(literal.text == "true"),
        LiteralKind::Integer => Value::Int(literal.text.parse().unwrap_or_default()),
        LiteralKind::Float => Value::Float(literal.text.parse().unwrap_or_default()),
        LiteralKind::Text => Value::Text(literal.text.clone()),
    }
}

/// Backs a call to `fold`, the one built-in whose `f` parameter is itself a
/// callable rather than a plain value — `ReactorBuilder::build` only ever
/// receives already-built reactors, so `f` can't travel through the ordinary
/// `CallReactorBuilder` path the way `init`/`source` do. This builder keeps
/// `f`'s own builder around and hands it fresh accumulator/item reactors on
/// every new `source` value instead.
struct FoldCallBuilder {
    f: Rc<dyn ReactorBuilder>,
    init: Rc<dyn ReactorBuilder>,
    source: Rc<dyn ReactorBuilder>,
}

impl ReactorBuilder for FoldCallBuilder {
    fn build(&self, _parameters: &[ReactorHandle], trigger: &Trigger) -> ReactorHandle {
        let init = self.init.build(&[], trigger);
        let source = self.source.build(&[], trigger);
        Rc::new(RefCell::new(FoldReactor {
            f: self.f.clone(),
            init,
            init_done: false,
            source,
            acc: None,
        }))
    }
}

#[derive(Debug)]
struct FoldReactor {
    f: Rc<dyn ReactorBuilder>,
    init: ReactorHandle,
    init_done: bool,
    source: ReactorHandle,
    acc: Option<Value>,
}

impl Reactor for FoldReactor {
    fn commit(&mut self, sequence: u64) -> Update {
        if !self.init_done {
            let update = self.init.borrow_mut().commit(sequence);
            if !update.has_value() {
                return Update::None;
            }
            self.acc = self.init.borrow().value();
            self.init_done = true;
        }
        let update = self.source.borrow_mut().commit(sequence);
        if !update.has_value() {
            return Update::None;
        }
        let (Some(item), Some(acc)) = (self.source.borrow().value(), self.acc.clone()) else {
            return Update::None;
        };
        // `f` was resolved (and, if generic, instantiated) once at
        // translation time; invoking its builder here just materializes a
        // fresh combine step over the current accumulator and item. None of
        // our builders retain the trigger they're built with, so a scratch
        // one is safe — see `ReactorBuilder::build`'s own contract.
        let scratch = Trigger::new();
        let acc_reactor = builders::first(acc);
        let item_reactor = builders::first(item);
        let combined = self.f.build(&[acc_reactor, item_reactor], &scratch);
        combined.borrow_mut().commit(sequence);
        self.acc = combined.borrow().value();
        if update.is_complete() {
            Update::CompleteEval
        } else {
            Update::Eval
        }
    }

    fn value(&self) -> Option<Value> {
        self.acc.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::ast::NodeIdGen;
    use crate::compiler::builtins;
    use crate::compiler::semantic::{Arena, Scope, Variable};
    use signal_core::Location;

    fn lit(gen: &NodeIdGen, kind: LiteralKind, text: &str) -> Expr {
        Expr::Literal {
            id: gen.next(),
            location: Location::none(),
            literal: Literal { text: text.to_string(), kind },
        }
    }

    #[test]
    fn bind_variable_main_drives_get_main() {
        let gen = NodeIdGen::new();
        let mut arena = Arena::new();
        let main = arena.insert_variable(Variable {
            location: Location::none(),
            name: "main".to_string(),
            data_type: Some(DataType::Integer),
        });
        let trigger = Trigger::new();
        let call_definitions = HashMap::new();
        let mut translator = Translator::new(&trigger, &arena, &call_definitions);
        translator
            .translate(&Stmt::BindVariable {
                location: Location::none(),
                variable: main,
                expr: lit(&gen, LiteralKind::Integer, "3"),
            })
            .unwrap();
        let reactor = translator.get_main().expect("main was bound");
        assert_eq!(reactor.borrow_mut().commit(1), Update::CompleteEval);
        assert_eq!(reactor.borrow().value(), Some(Value::Int(3)));
    }

    #[test]
    fn no_main_binding_yields_none() {
        let arena = Arena::new();
        let trigger = Trigger::new();
        let call_definitions = HashMap::new();
        let translator = Translator::new(&trigger, &arena, &call_definitions);
        assert!(translator.get_main().is_none());
    }

    #[test]
    fn binary_add_lowers_to_the_runtime_binary_reactor() {
        let gen = NodeIdGen::new();
        let mut arena = Arena::new();
        let main = arena.insert_variable(Variable {
            location: Location::none(),
            name: "main".to_string(),
            data_type: Some(DataType::Integer),
        });
        let trigger = Trigger::new();
        let call_definitions = HashMap::new();
        let mut translator = Translator::new(&trigger, &arena, &call_definitions);
        let expr = Expr::Binary {
            id: gen.next(),
            location: Location::none(),
            op: Operator::Add,
            left: Box::new(lit(&gen, LiteralKind::Integer, "1")),
            right: Box::new(lit(&gen, LiteralKind::Integer, "2")),
        };
        translator
            .translate(&Stmt::BindVariable {
                location: Location::none(),
                variable: main,
                expr,
            })
            .unwrap();
        let reactor = translator.get_main().unwrap();
        assert_eq!(reactor.borrow_mut().commit(1), Update::CompleteEval);
        assert_eq!(reactor.borrow().value(), Some(Value::Int(3)));
    }

    #[test]
    fn calling_a_builtin_add_overload_through_call_definitions() {
        let gen = NodeIdGen::new();
        let mut arena = Arena::new();
        let scope = Scope::root();
        let builtins = builtins::populate(&mut arena, &scope);
        let add_overload = arena.function(builtins.add).overloads[0];
        let call_id = gen.next();
        let mut call_definitions = HashMap::new();
        call_definitions.insert(
            call_id,
            FunctionDefinition {
                location: Location::none(),
                function: builtins.add,
                overload: add_overload,
                signature: arena.variable(add_overload).data_type.clone().unwrap(),
            },
        );
        let main = arena.insert_variable(Variable {
            location: Location::none(),
            name: "main".to_string(),
            data_type: Some(DataType::Integer),
        });
        let trigger = Trigger::new();
        let mut translator = Translator::new(&trigger, &arena, &call_definitions);
        translator.register_builtins(builtins);
        let call = Expr::Call {
            id: call_id,
            location: Location::none(),
            callee: Box::new(Expr::Function {
                id: gen.next(),
                location: Location::none(),
                function: builtins.add,
            }),
            args: vec![lit(&gen, LiteralKind::Integer, "40"), lit(&gen, LiteralKind::Integer, "2")],
        };
        translator
            .translate(&Stmt::BindVariable {
                location: Location::none(),
                variable: main,
                expr: call,
            })
            .unwrap();
        let reactor = translator.get_main().unwrap();
        assert_eq!(reactor.borrow_mut().commit(1), Update::CompleteEval);
        assert_eq!(reactor.borrow().value(), Some(Value::Int(42)));
    }

    #[test]
    fn chain_instantiates_through_its_generic_factory() {
        let gen = NodeIdGen::new();
        let mut arena = Arena::new();
        let scope = Scope::root();
        let builtins = builtins::populate(&mut arena, &scope);
        let chain_overload = arena.function(builtins.chain).overloads[0];
        let call_id = gen.next();
        let mut call_definitions = HashMap::new();
        call_definitions.insert(
            call_id,
            FunctionDefinition {
                location: Location::none(),
                function: builtins.chain,
                overload: chain_overload,
                signature: arena.variable(chain_overload).data_type.clone().unwrap(),
            },
        );
        let main = arena.insert_variable(Variable {
            location: Location::none(),
            name: "main".to_string(),
            data_type: Some(DataType::Integer),
        });
        let trigger = Trigger::new();
        let mut translator = Translator::new(&trigger, &arena, &call_definitions);
        translator.register_builtins(builtins);
        let call = Expr::Call {
            id: call_id,
            location: Location::none(),
            callee: Box::new(Expr::Function {
                id: gen.next(),
                location: Location::none(),
                function: builtins.chain,
            }),
            args: vec![lit(&gen, LiteralKind::Integer, "1"), lit(&gen, LiteralKind::Integer, "2")],
        };
        translator
            .translate(&Stmt::BindVariable {
                location: Location::none(),
                variable: main,
                expr: call,
            })
            .unwrap();
        let reactor = translator.get_main().unwrap();
        assert_eq!(reactor.borrow_mut().commit(1), Update::Eval);
        assert_eq!(reactor.borrow().value(), Some(Value::Int(1)));
        assert_eq!(reactor.borrow_mut().commit(2), Update::CompleteEval);
        assert_eq!(reactor.borrow().value(), Some(Value::Int(2)));
    }

    #[test]
    fn monomorphic_user_function_call_threads_its_argument_through_a_proxy() {
        let gen = NodeIdGen::new();
        let mut arena = Arena::new();
        let x = arena.insert_variable(Variable {
            location: Location::none(),
            name: "x".to_string(),
            data_type: Some(DataType::Integer),
        });
        let f = arena.insert_function("f");
        let sig = DataType::function(
            vec![crate::compiler::data_type::Parameter::new("x", DataType::Integer)],
            DataType::Integer,
        );
        let f_overload = arena.insert_variable(Variable {
            location: Location::none(),
            name: "f".to_string(),
            data_type: Some(sig.clone()),
        });
        arena.add_overload(f, f_overload).unwrap();
        let body = Expr::Binary {
            id: gen.next(),
            location: Location::none(),
            op: Operator::Add,
            left: Box::new(Expr::Variable { id: gen.next(), location: Location::none(), variable: x }),
            right: Box::new(lit(&gen, LiteralKind::Integer, "1")),
        };
        let call_id = gen.next();
        let mut call_definitions = HashMap::new();
        call_definitions.insert(
            call_id,
            FunctionDefinition {
                location: Location::none(),
                function: f,
                overload: f_overload,
                signature: sig,
            },
        );
        let main = arena.insert_variable(Variable {
            location: Location::none(),
            name: "main".to_string(),
            data_type: Some(DataType::Integer),
        });
        let trigger = Trigger::new();
        let mut translator = Translator::new(&trigger, &arena, &call_definitions);
        translator
            .translate(&Stmt::BindFunction {
                id: gen.next(),
                location: Location::none(),
                function: f,
                overload: f_overload,
                params: vec![Param { variable: x, declared_type: Some(DataType::Integer) }],
                body,
            })
            .unwrap();
        let call = Expr::Call {
            id: call_id,
            location: Location::none(),
            callee: Box::new(Expr::Function { id: gen.next(), location: Location::none(), function: f }),
            args: vec![lit(&gen, LiteralKind::Integer, "41")],
        };
        translator
            .translate(&Stmt::BindVariable {
                location: Location::none(),
                variable: main,
                expr: call,
            })
            .unwrap();
        let reactor = translator.get_main().unwrap();
        assert_eq!(reactor.borrow_mut().commit(1), Update::CompleteEval);
        assert_eq!(reactor.borrow().value(), Some(Value::Int(42)));
    }
}
