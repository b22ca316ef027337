//! `assert_value` — the test helper named in spec section 6, driving a
//! reactor one tick at a time and asserting its reported update and value.

use crate::reactor::{ReactorHandle, Update};
use crate::trigger::Trigger;
use crate::value::Value;

/// Signals `trigger`, commits `reactor` to the resulting sequence number,
/// and asserts the update and value it reports match expectations.
///
/// `tick` is asserted against the trigger's sequence number after the
/// signal, so callers drive a sequence of ticks `1, 2, 3, ...` and get a
/// clear failure if a reactor is asserted out of order.
pub fn assert_value(
    reactor: &ReactorHandle,
    trigger: &Trigger,
    tick: u64,
    expected_update: Update,
    expected_value: Option<Value>,
) {
    let sequence = trigger.signal();
    assert_eq!(sequence, tick, "trigger sequence did not match expected tick");
    let update = reactor.borrow_mut().commit(sequence);
    assert_eq!(update, expected_update, "unexpected update at tick {tick}");
    if expected_update.has_value() {
        assert_eq!(
            reactor.borrow().value(),
            expected_value,
            "unexpected value at tick {tick}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::first;

    #[test]
    fn first_reactor_completes_immediately() {
        let trigger = Trigger::new();
        let r = first(Value::Int(123));
        assert_value(&r, &trigger, 1, Update::CompleteEval, Some(Value::Int(123)));
    }
}
