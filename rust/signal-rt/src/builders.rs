//! The builder constructors named in spec section 6: `make_constant_reactor_builder`,
//! `make_add_reactor_builder`, `make_chain_reactor_builder`,
//! `make_ostream_reactor_builder`, a generic `function_reactor_builder`, and
//! the `first` test convenience.
//!
//! A `ReactorBuilder` is pure with respect to its captured environment:
//! calling `build` materializes a fresh reactor from whatever reactors its
//! `parameters` slice already represents (already-built children, not
//! nested builders — the translator is responsible for building arguments
//! before handing them to a callee's builder, matching how
//! `reactor_translator::visit(call_expression)` builds its parameter
//! builders down to reactors before invoking the callee).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::reactor::{
    BinaryOp, BinaryReactor, ChainReactor, ClosureReactor, ConstantReactor, CountReactor,
    OstreamReactor, Reactor, ReactorHandle, UnaryOp, UnaryReactor, Update,
};
use crate::trigger::Trigger;
use crate::value::Value;

/// A factory that materializes a concrete reactor from already-built
/// argument reactors. Implementations must not retain `trigger` past the
/// `build` call beyond moving it into a closure executed by that trigger.
pub trait ReactorBuilder {
    fn build(&self, parameters: &[ReactorHandle], trigger: &Trigger) -> ReactorHandle;
}

impl fmt::Debug for dyn ReactorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<reactor builder>")
    }
}

fn handle<R: Reactor + 'static>(r: R) -> ReactorHandle {
    Rc::new(RefCell::new(r))
}

struct ConstantBuilder {
    value: Value,
}

impl ReactorBuilder for ConstantBuilder {
    fn build(&self, _parameters: &[ReactorHandle], _trigger: &Trigger) -> ReactorHandle {
        handle(ConstantReactor::new(self.value.clone()))
    }
}

/// `make_constant_reactor_builder(value)` — one instance per literal.
pub fn make_constant_reactor_builder(value: Value) -> Rc<dyn ReactorBuilder> {
    Rc::new(ConstantBuilder { value })
}

struct BinaryBuilder {
    op: BinaryOp,
}

impl ReactorBuilder for BinaryBuilder {
    fn build(&self, parameters: &[ReactorHandle], _trigger: &Trigger) -> ReactorHandle {
        assert_eq!(parameters.len(), 2, "binary operators take exactly two operands");
        handle(BinaryReactor::new(
            parameters[0].clone(),
            parameters[1].clone(),
            self.op,
        ))
    }
}

/// `make_add_reactor_builder::<A, B>()` — monomorphic in spec terms, but
/// since every runtime value already carries its own `Value` variant there
/// is exactly one Rust implementation; type-checking already guaranteed the
/// two operands agree before translation ever reaches this builder.
pub fn make_add_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder { op: BinaryOp::Add })
}

/// `make_subtract_reactor_builder::<A, B>()`.
pub fn make_subtract_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder {
        op: BinaryOp::Subtract,
    })
}

/// `make_multiply_reactor_builder::<A, B>()`.
pub fn make_multiply_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder {
        op: BinaryOp::Multiply,
    })
}

/// `make_divide_reactor_builder::<A, B>()`.
pub fn make_divide_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder {
        op: BinaryOp::Divide,
    })
}

/// `make_equals_reactor_builder::<A, B>()`.
pub fn make_equals_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder {
        op: BinaryOp::Equals,
    })
}

/// `make_not_equals_reactor_builder::<A, B>()`.
pub fn make_not_equals_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder {
        op: BinaryOp::NotEquals,
    })
}

/// `make_less_than_reactor_builder::<A, B>()`.
pub fn make_less_than_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder {
        op: BinaryOp::LessThan,
    })
}

/// `make_less_equal_reactor_builder::<A, B>()`.
pub fn make_less_equal_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder {
        op: BinaryOp::LessEqual,
    })
}

/// `make_greater_than_reactor_builder::<A, B>()`.
pub fn make_greater_than_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder {
        op: BinaryOp::GreaterThan,
    })
}

/// `make_greater_equal_reactor_builder::<A, B>()`.
pub fn make_greater_equal_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder {
        op: BinaryOp::GreaterEqual,
    })
}

/// `make_and_reactor_builder()`.
pub fn make_and_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder { op: BinaryOp::And })
}

/// `make_or_reactor_builder()`.
pub fn make_or_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(BinaryBuilder { op: BinaryOp::Or })
}

struct UnaryBuilder {
    op: UnaryOp,
}

impl ReactorBuilder for UnaryBuilder {
    fn build(&self, parameters: &[ReactorHandle], _trigger: &Trigger) -> ReactorHandle {
        assert_eq!(parameters.len(), 1, "unary operators take exactly one operand");
        handle(UnaryReactor::new(parameters[0].clone(), self.op))
    }
}

/// `make_not_reactor_builder()`.
pub fn make_not_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(UnaryBuilder { op: UnaryOp::Not })
}

/// `make_negate_reactor_builder::<T>()`.
pub fn make_negate_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(UnaryBuilder {
        op: UnaryOp::Negate,
    })
}

struct ChainBuilder;

impl ReactorBuilder for ChainBuilder {
    fn build(&self, parameters: &[ReactorHandle], _trigger: &Trigger) -> ReactorHandle {
        handle(ChainReactor::new(parameters.to_vec()))
    }
}

/// `make_chain_reactor_builder::<T>()`.
pub fn make_chain_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(ChainBuilder)
}

struct CountBuilder;

impl ReactorBuilder for CountBuilder {
    fn build(&self, parameters: &[ReactorHandle], _trigger: &Trigger) -> ReactorHandle {
        assert_eq!(parameters.len(), 1, "count takes exactly one argument");
        handle(CountReactor::new(parameters[0].clone()))
    }
}

/// `make_count_reactor_builder::<T>()`.
pub fn make_count_reactor_builder() -> Rc<dyn ReactorBuilder> {
    Rc::new(CountBuilder)
}

struct OstreamBuilder {
    sink: RefCell<Option<Box<dyn std::io::Write>>>,
}

impl ReactorBuilder for OstreamBuilder {
    fn build(&self, parameters: &[ReactorHandle], _trigger: &Trigger) -> ReactorHandle {
        assert_eq!(parameters.len(), 1, "print takes exactly one argument");
        let sink = self
            .sink
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Box::new(std::io::stdout()));
        handle(OstreamReactor::new(parameters[0].clone(), sink))
    }
}

/// `make_ostream_reactor_builder::<T>(stream)`. The builder is single-use:
/// the sink is moved into the first reactor it builds (matching the
/// single-`main` translation this compiler performs).
pub fn make_ostream_reactor_builder(sink: Box<dyn std::io::Write>) -> Rc<dyn ReactorBuilder> {
    Rc::new(OstreamBuilder {
        sink: RefCell::new(Some(sink)),
    })
}

/// A mutable indirection the translator allocates once per function
/// parameter. The function's own builder assigns the caller's argument
/// reactor into the proxy before delegating to the body builder; any
/// `VariableExpression` referencing that parameter resolves through the
/// proxy rather than a fixed reactor.
#[derive(Debug, Default)]
pub struct ProxyReactorBuilder {
    current: RefCell<Option<ReactorHandle>>,
}

impl ProxyReactorBuilder {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn assign(&self, reactor: ReactorHandle) {
        *self.current.borrow_mut() = Some(reactor);
    }
}

impl ReactorBuilder for ProxyReactorBuilder {
    fn build(&self, _parameters: &[ReactorHandle], _trigger: &Trigger) -> ReactorHandle {
        self.current
            .borrow()
            .clone()
            .expect("parameter proxy built before its value was assigned")
    }
}

/// Installed for a non-generic `BindFunction`: assigns the caller's built
/// argument reactors to this function's parameter proxies, then builds the
/// body builder `E`.
pub struct UserFunctionBuilder {
    pub proxies: Vec<Rc<ProxyReactorBuilder>>,
    pub body: Rc<dyn ReactorBuilder>,
}

impl ReactorBuilder for UserFunctionBuilder {
    fn build(&self, parameters: &[ReactorHandle], trigger: &Trigger) -> ReactorHandle {
        assert_eq!(
            parameters.len(),
            self.proxies.len(),
            "argument count must match the checked arity"
        );
        for (proxy, argument) in self.proxies.iter().zip(parameters) {
            proxy.assign(argument.clone());
        }
        self.body.build(&[], trigger)
    }
}

/// Installed for every `Call`: builds the callee and each argument to
/// reactors, then asks the callee's builder to combine them.
pub struct CallReactorBuilder {
    pub callee: Rc<dyn ReactorBuilder>,
    pub arguments: Vec<Rc<dyn ReactorBuilder>>,
}

impl ReactorBuilder for CallReactorBuilder {
    fn build(&self, _parameters: &[ReactorHandle], trigger: &Trigger) -> ReactorHandle {
        let built: Vec<ReactorHandle> = self
            .arguments
            .iter()
            .map(|b| b.build(&[], trigger))
            .collect();
        self.callee.build(&built, trigger)
    }
}

struct ClosureBuilder<F>
where
    F: Fn(&[ReactorHandle], &Trigger) -> ReactorHandle,
{
    f: F,
}

impl<F> ReactorBuilder for ClosureBuilder<F>
where
    F: Fn(&[ReactorHandle], &Trigger) -> ReactorHandle,
{
    fn build(&self, parameters: &[ReactorHandle], trigger: &Trigger) -> ReactorHandle {
        (self.f)(parameters, trigger)
    }
}

/// A generic `function_reactor_builder` taking a closure
/// `(argument_reactors, trigger) -> reactor`, for built-ins (like `chain`'s
/// generic factory path) that don't need a dedicated struct.
pub fn function_reactor_builder(
    f: impl Fn(&[ReactorHandle], &Trigger) -> ReactorHandle + 'static,
) -> Rc<dyn ReactorBuilder> {
    Rc::new(ClosureBuilder { f })
}

/// `first(v)` — a convenience producer of a single-value reactor, used by
/// tests that want a ready-made leaf without going through a builder.
pub fn first(value: Value) -> ReactorHandle {
    handle(ConstantReactor::new(value))
}

/// Builds a reactor from a hand-rolled commit loop, for callers that need
/// more control than the constructors above provide.
pub fn closure_reactor<F>(
    commit_fn: F,
    value_fn: impl Fn() -> Option<Value> + 'static,
) -> ReactorHandle
where
    F: FnMut(u64) -> Update + 'static,
{
    handle(ClosureReactor::new(commit_fn, value_fn))
}
