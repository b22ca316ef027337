//! The reactor contract consumed (not defined-in-detail) by the translator.
//!
//! Internals of reactor evaluation are explicitly out of scope for the
//! compiler spec — only the interface (`Reactor`, `Update`, a handle type)
//! and the named builder constructors in spec section 6 are load-bearing.
//! What's here is a minimal, working implementation of that interface so
//! the translator has something real to lower into and the pipeline tests
//! in `signal-compiler` can run end to end.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// The three states a reactor can report after a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Nothing changed this sequence.
    None,
    /// A new value is available; more updates may follow.
    Eval,
    /// A new value is available and this reactor will never update again.
    CompleteEval,
}

impl Update {
    pub fn is_complete(self) -> bool {
        matches!(self, Update::CompleteEval)
    }

    pub fn has_value(self) -> bool {
        matches!(self, Update::Eval | Update::CompleteEval)
    }
}

/// A node in the dataflow graph, materialized by a `ReactorBuilder::build`
/// call. Shared via `Rc<RefCell<_>>`: built-in constants and `ostream`
/// reactors may be referenced from more than one place in the graph.
pub trait Reactor: fmt::Debug {
    /// Advances this reactor to `sequence`, returning its update for this
    /// step. Must be idempotent for a given `sequence` (a reactor may be
    /// asked to commit the same sequence more than once by a parent that
    /// commits several children).
    fn commit(&mut self, sequence: u64) -> Update;

    /// The reactor's current value, if it has produced one yet.
    fn value(&self) -> Option<Value>;
}

pub type ReactorHandle = Rc<RefCell<dyn Reactor>>;

/// A reactor whose value never changes after its first commit.
#[derive(Debug)]
pub struct ConstantReactor {
    value: Value,
    committed: bool,
}

impl ConstantReactor {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            committed: false,
        }
    }
}

impl Reactor for ConstantReactor {
    fn commit(&mut self, _sequence: u64) -> Update {
        if self.committed {
            Update::None
        } else {
            self.committed = true;
            Update::CompleteEval
        }
    }

    fn value(&self) -> Option<Value> {
        Some(self.value.clone())
    }
}

/// Combines two reactors with a binary operator, completing once both
/// operands have completed.
#[derive(Debug)]
pub struct BinaryReactor {
    lhs: ReactorHandle,
    rhs: ReactorHandle,
    op: BinaryOp,
    value: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equals,
    NotEquals,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    And,
    Or,
}

impl BinaryReactor {
    pub fn new(lhs: ReactorHandle, rhs: ReactorHandle, op: BinaryOp) -> Self {
        Self {
            lhs,
            rhs,
            op,
            value: None,
        }
    }
}

impl Reactor for BinaryReactor {
    fn commit(&mut self, sequence: u64) -> Update {
        let lu = self.lhs.borrow_mut().commit(sequence);
        let ru = self.rhs.borrow_mut().commit(sequence);
        if !lu.has_value() && self.value.is_none() || !ru.has_value() && self.value.is_none() {
            return Update::None;
        }
        let lv = self.lhs.borrow().value();
        let rv = self.rhs.borrow().value();
        let (Some(lv), Some(rv)) = (lv, rv) else {
            return Update::None;
        };
        let combined = match self.op {
            BinaryOp::Add => lv.add(&rv),
            BinaryOp::Subtract => lv.subtract(&rv),
            BinaryOp::Multiply => lv.multiply(&rv),
            BinaryOp::Divide => lv.divide(&rv),
            BinaryOp::Equals => lv.equals(&rv),
            BinaryOp::NotEquals => lv.not_equals(&rv),
            BinaryOp::LessThan => lv.less_than(&rv),
            BinaryOp::LessEqual => lv.less_equal(&rv),
            BinaryOp::GreaterThan => lv.greater_than(&rv),
            BinaryOp::GreaterEqual => lv.greater_equal(&rv),
            BinaryOp::And => lv.logical_and(&rv),
            BinaryOp::Or => lv.logical_or(&rv),
        };
        self.value = Some(combined);
        if lu.is_complete() && ru.is_complete() {
            Update::CompleteEval
        } else {
            Update::Eval
        }
    }

    fn value(&self) -> Option<Value> {
        self.value.clone()
    }
}

/// Applies a unary operator to a single operand, completing when it does.
#[derive(Debug)]
pub struct UnaryReactor {
    operand: ReactorHandle,
    op: UnaryOp,
    value: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
}

impl UnaryReactor {
    pub fn new(operand: ReactorHandle, op: UnaryOp) -> Self {
        Self {
            operand,
            op,
            value: None,
        }
    }
}

impl Reactor for UnaryReactor {
    fn commit(&mut self, sequence: u64) -> Update {
        let update = self.operand.borrow_mut().commit(sequence);
        if !update.has_value() {
            return Update::None;
        }
        let Some(v) = self.operand.borrow().value() else {
            return Update::None;
        };
        self.value = Some(match self.op {
            UnaryOp::Not => v.logical_not(),
            UnaryOp::Negate => v.negate(),
        });
        if update.is_complete() {
            Update::CompleteEval
        } else {
            Update::Eval
        }
    }

    fn value(&self) -> Option<Value> {
        self.value.clone()
    }
}

/// Replays each child reactor to completion in order, yielding that child's
/// final value, then advances to the next. Completes once the last child
/// has completed.
#[derive(Debug)]
pub struct ChainReactor {
    children: Vec<ReactorHandle>,
    index: usize,
    value: Option<Value>,
}

impl ChainReactor {
    pub fn new(children: Vec<ReactorHandle>) -> Self {
        Self {
            children,
            index: 0,
            value: None,
        }
    }
}

impl Reactor for ChainReactor {
    fn commit(&mut self, sequence: u64) -> Update {
        if self.index >= self.children.len() {
            return Update::None;
        }
        let update = self.children[self.index].borrow_mut().commit(sequence);
        match update {
            Update::None => Update::None,
            Update::Eval => {
                self.value = self.children[self.index].borrow().value();
                Update::Eval
            }
            Update::CompleteEval => {
                self.value = self.children[self.index].borrow().value();
                let was_last = self.index + 1 == self.children.len();
                self.index += 1;
                if was_last {
                    Update::CompleteEval
                } else {
                    Update::Eval
                }
            }
        }
    }

    fn value(&self) -> Option<Value> {
        self.value.clone()
    }
}

/// Counts how many updates its child has produced so far, completing when
/// the child does. Backs the `count` built-in.
#[derive(Debug)]
pub struct CountReactor {
    child: ReactorHandle,
    count: i64,
    started: bool,
}

impl CountReactor {
    pub fn new(child: ReactorHandle) -> Self {
        Self {
            child,
            count: 0,
            started: false,
        }
    }
}

impl Reactor for CountReactor {
    fn commit(&mut self, sequence: u64) -> Update {
        let update = self.child.borrow_mut().commit(sequence);
        if !update.has_value() {
            return Update::None;
        }
        self.count += 1;
        self.started = true;
        if update.is_complete() {
            Update::CompleteEval
        } else {
            Update::Eval
        }
    }

    fn value(&self) -> Option<Value> {
        self.started.then_some(Value::Int(self.count))
    }
}

/// Writes every value its child produces to a sink, passing the value
/// through unchanged. Backs the `print` built-in.
pub struct OstreamReactor {
    child: ReactorHandle,
    sink: Box<dyn std::io::Write>,
    value: Option<Value>,
}

impl fmt::Debug for OstreamReactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OstreamReactor")
            .field("value", &self.value)
            .finish()
    }
}

impl OstreamReactor {
    pub fn new(child: ReactorHandle, sink: Box<dyn std::io::Write>) -> Self {
        Self {
            child,
            sink,
            value: None,
        }
    }
}

impl Reactor for OstreamReactor {
    fn commit(&mut self, sequence: u64) -> Update {
        let update = self.child.borrow_mut().commit(sequence);
        if update.has_value() {
            if let Some(v) = self.child.borrow().value() {
                let _ = writeln!(self.sink, "{v}");
                self.value = Some(v);
            }
        }
        update
    }

    fn value(&self) -> Option<Value> {
        self.value.clone()
    }
}

/// A reactor driven entirely by a closure; backs `function_reactor_builder`.
pub struct ClosureReactor<F>
where
    F: FnMut(u64) -> Update,
{
    commit_fn: F,
    value_fn: Box<dyn Fn() -> Option<Value>>,
}

impl<F> fmt::Debug for ClosureReactor<F>
where
    F: FnMut(u64) -> Update,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureReactor").finish()
    }
}

impl<F> ClosureReactor<F>
where
    F: FnMut(u64) -> Update,
{
    pub fn new(commit_fn: F, value_fn: impl Fn() -> Option<Value> + 'static) -> Self {
        Self {
            commit_fn,
            value_fn: Box::new(value_fn),
        }
    }
}

impl<F> Reactor for ClosureReactor<F>
where
    F: FnMut(u64) -> Update,
{
    fn commit(&mut self, sequence: u64) -> Update {
        (self.commit_fn)(sequence)
    }

    fn value(&self) -> Option<Value> {
        (self.value_fn)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_completes_once() {
        let mut r = ConstantReactor::new(Value::Int(42));
        assert_eq!(r.commit(1), Update::CompleteEval);
        assert_eq!(r.value(), Some(Value::Int(42)));
        assert_eq!(r.commit(2), Update::None);
    }

    #[test]
    fn binary_add_completes_when_both_operands_complete() {
        let lhs: ReactorHandle = Rc::new(RefCell::new(ConstantReactor::new(Value::Int(1))));
        let rhs: ReactorHandle = Rc::new(RefCell::new(ConstantReactor::new(Value::Int(2))));
        let mut add = BinaryReactor::new(lhs, rhs, BinaryOp::Add);
        assert_eq!(add.commit(1), Update::CompleteEval);
        assert_eq!(add.value(), Some(Value::Int(3)));
    }

    #[test]
    fn count_tracks_the_number_of_child_updates() {
        let a: ReactorHandle = Rc::new(RefCell::new(ConstantReactor::new(Value::Int(1))));
        let mut count = CountReactor::new(a);
        assert_eq!(count.commit(1), Update::CompleteEval);
        assert_eq!(count.value(), Some(Value::Int(1)));
    }

    #[test]
    fn chain_yields_each_child_then_completes_on_last() {
        let a: ReactorHandle = Rc::new(RefCell::new(ConstantReactor::new(Value::Int(1))));
        let b: ReactorHandle = Rc::new(RefCell::new(ConstantReactor::new(Value::Int(2))));
        let mut chain = ChainReactor::new(vec![a, b]);
        assert_eq!(chain.commit(1), Update::Eval);
        assert_eq!(chain.value(), Some(Value::Int(1)));
        assert_eq!(chain.commit(2), Update::CompleteEval);
        assert_eq!(chain.value(), Some(Value::Int(2)));
    }
}
