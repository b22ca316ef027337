//! End-to-end `source → reactor value` scenarios, one per spec §8
//! "Translator / end-to-end scenarios" bullet.

use std::path::PathBuf;

use signal_compiler::{check, run_to_completion};
use signal_rt::value::Value;

fn path() -> PathBuf {
    PathBuf::from("scenario.sig")
}

#[test]
fn arithmetic_main_completes_with_its_sum() {
    let checked = check(&path(), "let main = 1 + 2\n").expect("compiles");
    let value = run_to_completion(&checked).expect("runs");
    assert_eq!(value, Some(Value::Int(3)));
}

#[test]
fn printing_a_sum_still_yields_it_as_mains_value() {
    let checked = check(&path(), "let main = print(1 + 2)\n").expect("compiles");
    let value = run_to_completion(&checked).expect("runs");
    assert_eq!(value, Some(Value::Int(3)));
}

#[test]
fn calling_a_monomorphic_user_function() {
    let source = "let f(x: Int) = x + 1\nlet main = f(41)\n";
    let checked = check(&path(), source).expect("compiles");
    let value = run_to_completion(&checked).expect("runs");
    assert_eq!(value, Some(Value::Int(42)));
}

#[test]
fn calling_a_generic_identity_function_instantiated_once() {
    let source = "let id(x: `T) = x\nlet main = id(true)\n";
    let checked = check(&path(), source).expect("compiles");
    let value = run_to_completion(&checked).expect("runs");
    assert_eq!(value, Some(Value::Bool(true)));
}

#[test]
fn chain_yields_each_argument_on_successive_signals() {
    let checked = check(&path(), "let main = chain(1, 2)\n").expect("compiles");
    let trigger = signal_rt::trigger::Trigger::new();
    let translator = checked.translate(&trigger).expect("translates");
    let main = translator.get_main().expect("main was bound");
    assert_eq!(main.borrow_mut().commit(trigger.signal()), signal_rt::reactor::Update::Eval);
    assert_eq!(main.borrow().value(), Some(Value::Int(1)));
    assert_eq!(main.borrow_mut().commit(trigger.signal()), signal_rt::reactor::Update::CompleteEval);
    assert_eq!(main.borrow().value(), Some(Value::Int(2)));
}

#[test]
fn calling_f_with_a_mismatched_overload_fails_type_checking() {
    let source = "let f(x: Int) = x\nlet main = f(false)\n";
    let err = check(&path(), source).unwrap_err();
    assert!(matches!(err, signal_compiler::CompileError::Type(_)));
}

#[test]
fn a_second_statement_without_a_newline_fails_parsing() {
    let err = check(&path(), "1 2\n").unwrap_err();
    assert!(matches!(err, signal_compiler::CompileError::Parse(_)));
}

#[test]
fn line_continuation_inside_brackets_and_after_operators() {
    check(&path(), "let x = (\n5)\nlet y = 1 +\n 2 * 3\n").expect("compiles");
}
