use signal_rt::builders::{
    function_reactor_builder, make_add_reactor_builder, make_chain_reactor_builder,
    make_constant_reactor_builder, make_ostream_reactor_builder, first,
};
use signal_rt::{assert_value, ReactorBuilder, Trigger, Update, Value};

#[test]
fn constant_reactor_completes_at_first_tick() {
    let trigger = Trigger::new();
    let builder = make_constant_reactor_builder(Value::Int(3));
    let reactor = builder.build(&[], &trigger);
    assert_value(&reactor, &trigger, 1, Update::CompleteEval, Some(Value::Int(3)));
}

#[test]
fn add_builder_sums_two_constants() {
    let trigger = Trigger::new();
    let one = make_constant_reactor_builder(Value::Int(1)).build(&[], &trigger);
    let two = make_constant_reactor_builder(Value::Int(2)).build(&[], &trigger);
    let add = make_add_reactor_builder().build(&[one, two], &trigger);
    assert_value(&add, &trigger, 1, Update::CompleteEval, Some(Value::Int(3)));
}

#[test]
fn chain_builder_replays_each_operand_in_order() {
    let trigger = Trigger::new();
    let one = make_constant_reactor_builder(Value::Int(1)).build(&[], &trigger);
    let two = make_constant_reactor_builder(Value::Int(2)).build(&[], &trigger);
    let chain = make_chain_reactor_builder().build(&[one, two], &trigger);
    assert_value(&chain, &trigger, 1, Update::Eval, Some(Value::Int(1)));
    assert_value(&chain, &trigger, 2, Update::CompleteEval, Some(Value::Int(2)));
}

#[test]
fn ostream_builder_passes_its_value_through() {
    let trigger = Trigger::new();
    let sink: Vec<u8> = Vec::new();
    let value = make_constant_reactor_builder(Value::Int(3)).build(&[], &trigger);
    let printed = make_ostream_reactor_builder(Box::new(sink)).build(&[value], &trigger);
    assert_value(&printed, &trigger, 1, Update::CompleteEval, Some(Value::Int(3)));
}

#[test]
fn function_reactor_builder_delegates_to_its_closure() {
    let trigger = Trigger::new();
    let builder = function_reactor_builder(|parameters, trigger| {
        make_constant_reactor_builder(parameters[0].borrow().value().unwrap()).build(&[], trigger)
    });
    let arg = make_constant_reactor_builder(Value::Bool(true)).build(&[], &trigger);
    let out = builder.build(&[arg], &trigger);
    assert_value(&out, &trigger, 1, Update::CompleteEval, Some(Value::Bool(true)));
}

#[test]
fn first_yields_a_single_completed_value() {
    let trigger = Trigger::new();
    let reactor = first(Value::Text("hi".to_string()));
    assert_value(&reactor, &trigger, 1, Update::CompleteEval, Some(Value::Text("hi".to_string())));
}
