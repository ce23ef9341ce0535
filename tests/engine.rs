use linecalc::{evaluate_document, evaluate_line, Context, Evaluation, CONTEXT_CAPACITY};
use pretty_assertions::assert_eq;

fn eval(line: &str) -> Evaluation {
    let mut context = Context::new(CONTEXT_CAPACITY);
    let (_, result) = evaluate_line(line, &mut context);

    result
}

fn assert_value(line: &str, expected: f64) {
    let result = eval(line);

    assert!(result.valid, "'{line}' was expected to evaluate but did not");
    assert_eq!(result.value, expected, "'{line}' evaluated to the wrong value");
}

fn assert_invalid(line: &str) {
    let result = eval(line);

    assert!(!result.valid, "'{line}' evaluated to {} but was expected to fail", result.value);
}

#[test]
fn literals_and_basic_arithmetic() {
    assert_value("0", 0.0);
    assert_value("42", 42.0);
    assert_value("1 + 23", 24.0);
    assert_value("8 - 5", 3.0);
    assert_value("7 * 9", 63.0);
    assert_value("10 / 2", 5.0);
    assert_value("7 / 2", 3.5);
}

#[test]
fn number_formats() {
    assert_value("3.25", 3.25);
    assert_value(".5 * 2", 1.0);
    assert_value("1_000 + 0.5", 1000.5);
    assert_value("1_000_000 / 1_000", 1000.0);
    assert_value("1._5 + 0.5", 2.0);
}

#[test]
fn malformed_numbers() {
    assert_invalid("1.2.3");
    assert_invalid("1.2.3 / 2");
    assert_invalid("2x");
    assert_invalid("5.");
    assert_invalid(".");
    assert_invalid("1.2e3");
}

#[test]
fn binding_strength() {
    assert_value("1 + 23 * 456", 10489.0);
    assert_value("2 * 3 + 4", 10.0);
    assert_value("1 + 2 * 3 + 4", 11.0);
    assert_value("2 + 3 ^ 2", 11.0);
    assert_value("2 * 3 ^ 2", 18.0);
    assert_value("x: 1 + 2", 3.0);
}

#[test]
fn equal_strength_chains_run_left_to_right() {
    assert_value("8 - 4 - 2 - 1", 1.0);
    assert_value("500 - 40 + 1", 461.0);
    assert_value("1 - 2 + 3", 2.0);
    assert_value("100 - 10 - 10", 80.0);
    assert_value("15 / 3 * 4", 20.0);
    assert_value("2 ^ 3 ^ 2", 64.0);
    assert_value("1 * 20 + 300", 320.0);
}

#[test]
fn parentheses_group_structurally() {
    assert_value("(1 + 23) * 456", 10944.0);
    assert_value("2 * (3 + 4)", 14.0);
    assert_value("(2 + 3) * (4 + 5)", 45.0);
    assert_value("((((7))))", 7.0);
    assert_value("(1 + 2) * 3 - 4", 5.0);
    assert_value("2 ^ (1 + 1)", 4.0);
}

#[test]
fn unbalanced_parentheses() {
    assert_invalid("(1 + 2");
    assert_invalid("1 + 2)");
    assert_invalid("()");
    assert_invalid("(");
}

#[test]
fn prefix_negation() {
    assert_value("-5", -5.0);
    assert_value("--5", 5.0);
    assert_value("2 * -3", -6.0);
    assert_value("-(2 + 3)", -5.0);
    // The prefix binds the primary, not the power.
    assert_value("-2 ^ 2", 4.0);
}

#[test]
fn factorial() {
    assert_value("5!", 120.0);
    assert_value("0!", 1.0);
    assert_value("1!", 1.0);
    assert_value("3! + 1", 7.0);
    assert_value("2 * 3!", 12.0);
    assert_value("3.9!", 6.0);
    assert_value("(3!)!", 720.0);
}

#[test]
fn factorial_limits() {
    // -1! reads as (-1)!, and a second suffix is not part of the grammar.
    assert_invalid("-1!");
    assert_invalid("3!!");
    assert_invalid("!3");

    let large = eval("200!");
    assert!(large.valid);
    assert!(large.value.is_infinite());
}

#[test]
fn division_by_zero() {
    assert_invalid("5 / 0");
    assert_invalid("5 / (3 - 3)");
    assert_invalid("1 / 0 + 1");
    assert_value("5 / 0.5", 10.0);
}

#[test]
fn variables() {
    let mut context = Context::new(CONTEXT_CAPACITY);

    let (_, assigned) = evaluate_line("x: 10", &mut context);
    assert!(assigned.valid);
    assert_eq!(assigned.value, 10.0);
    assert_eq!(context.get("x"), Some(10.0));

    let (_, read) = evaluate_line("x + 1", &mut context);
    assert_eq!(read.value, 11.0);

    let (_, reassigned) = evaluate_line("x: x * 2", &mut context);
    assert_eq!(reassigned.value, 20.0);
    assert_eq!(context.get("x"), Some(20.0));
}

#[test]
fn undefined_variable() {
    assert_invalid("y");
    assert_invalid("y + 1");
}

#[test]
fn assignment_shapes() {
    assert_invalid("3: 4");
    assert_invalid("(x): 4");
    assert_invalid("x:");

    // A failed right side leaves the variable unbound.
    let mut context = Context::new(CONTEXT_CAPACITY);
    let (_, result) = evaluate_line("x: 1 / 0", &mut context);
    assert!(!result.valid);
    assert_eq!(context.get("x"), None);
}

#[test]
fn builtin_functions() {
    assert_value("pow(2, 10)", 1024.0);
    assert_value("pow(2, 3 + 2)", 32.0);
    assert_value("pow(pow(2, 2), 2)", 16.0);
    assert_value("sqrt(9)", 3.0);
    assert_value("abs(-3)", 3.0);
    assert_value("floor(3.7)", 3.0);
    assert_value("ceil(3.2)", 4.0);
    assert_value("round(2.5)", 3.0);
    assert_value("trunc(-1.5)", -1.0);
    assert_value("min(3, 7)", 3.0);
    assert_value("max(3, 7)", 7.0);
    assert_value("log(1)", 0.0);
    assert_value("ln(1)", 0.0);
    assert_value("exp(0)", 1.0);
    assert_value("sin(0)", 0.0);
}

#[test]
fn builtin_failures() {
    assert_invalid("sqrt(-1)");
    assert_invalid("pow(2)");
    assert_invalid("pow(1, 2, 3)");
    assert_invalid("nosuchfn(1)");
    assert_invalid("pow()");
    assert_invalid("sqrt(1 / 0)");
}

#[test]
fn malformed_expressions() {
    assert_invalid("");
    assert_invalid("1 2");
    assert_invalid("1 +");
    assert_invalid("+ 1");
    assert_invalid("1 + + 2");
    assert_invalid("#");
    assert_invalid("1 @ 2");
}

#[test]
fn document_prev_tracks_the_last_valid_line() {
    let results = evaluate_document("3 + 4\nprev * 2");

    assert_eq!(results[0].value, 7.0);
    assert_eq!(results[1].value, 14.0);
}

#[test]
fn document_prev_skips_invalid_lines() {
    let results = evaluate_document("3 + 4\noops(\nprev");

    assert!(results[0].valid);
    assert!(!results[1].valid);
    assert_eq!(results[2].value, 7.0);
}

#[test]
fn document_sum_accumulates_and_resets() {
    let results = evaluate_document("1\n2\nsum\n4\nsum");
    let values: Vec<f64> = results.iter().map(|r| r.value).collect();

    assert!(results.iter().all(|r| r.valid));
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 4.0]);
}

#[test]
fn document_variables_flow_between_lines() {
    let results = evaluate_document("x: 10\ny: x * 2\nx + y");

    assert_eq!(results[2].value, 30.0);
}

#[test]
fn reevaluation_is_stable() {
    let mut context = Context::new(CONTEXT_CAPACITY);
    context.set("y", 6.0);

    let (_, first) = evaluate_line("y * 2", &mut context);
    let (_, second) = evaluate_line("y * 2", &mut context);

    assert_eq!(first, second);
    assert_eq!(first.value, 12.0);
}
