//! Signal Runtime
//!
//! The reactor primitives consumed by `signal-compiler`'s translator:
//! `Trigger`, `Update`, the `Reactor`/`ReactorBuilder` traits, the concrete
//! builder constructors named in the language spec (`constant`, `chain`,
//! `add`, `ostream`, `function`), and the `first`/`assert_value` test
//! helpers. Everything here is a runtime concern, not a compiler concern:
//! the compiler only ever sees these through the `ReactorBuilder` trait.

pub mod builders;
pub mod reactor;
pub mod testing;
pub mod trigger;
pub mod value;

pub use builders::{
    first, function_reactor_builder, make_add_reactor_builder, make_and_reactor_builder,
    make_chain_reactor_builder, make_constant_reactor_builder, make_divide_reactor_builder,
    make_equals_reactor_builder, make_greater_equal_reactor_builder,
    make_greater_than_reactor_builder, make_less_equal_reactor_builder,
    make_less_than_reactor_builder, make_multiply_reactor_builder, make_negate_reactor_builder,
    make_not_equals_reactor_builder, make_not_reactor_builder, make_or_reactor_builder,
    make_count_reactor_builder, make_ostream_reactor_builder, make_subtract_reactor_builder,
    CallReactorBuilder, ProxyReactorBuilder, ReactorBuilder, UserFunctionBuilder,
};
pub use reactor::{BinaryOp, Reactor, ReactorHandle, UnaryOp, Update};
pub use testing::assert_value;
pub use trigger::Trigger;
pub use value::Value;
