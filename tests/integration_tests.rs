//! Integration tests for the whole pipeline.
//!
//! These tests run source text through tokenization, parsing, typechecking
//! and execution, with scripted input and captured output.

use std::collections::VecDeque;

use minilang::{
    ast::types::Value,
    check_source,
    errors::errors::{
        DynamicTypeError, Error, InputError, RuntimeError, ScopeError, StaticError,
        StaticTypeError, SyntaxErrorImpl,
    },
    execute, parse_source, run_source,
};
use pretty_assertions::assert_eq;

fn run_with_input(source: &str, input: Vec<Value>) -> (Result<(), Error>, Vec<Value>) {
    let mut input: VecDeque<Value> = input.into();
    let mut output: Vec<Value> = Vec::new();
    let result = run_source(source, Some("test.ml".to_string()), &mut input, &mut output);
    (result, output)
}

fn run(source: &str) -> (Result<(), Error>, Vec<Value>) {
    run_with_input(source, vec![])
}

fn output_of(source: &str) -> Vec<Value> {
    let (result, output) = run(source);
    if let Err(error) = result {
        panic!("program failed: {}", error);
    }
    output
}

fn static_error(source: &str) -> StaticError {
    match check_source(source, None) {
        Err(Error::Static(error)) => error,
        other => panic!("expected a static error, got {:?}", other),
    }
}

#[test]
fn test_declare_and_print() {
    assert_eq!(output_of("declare x = 3 + 4; print x;"), vec![Value::Num(7.0)]);
}

#[test]
fn test_type_mismatch_is_rejected_before_running() {
    let (result, output) = run("print 0; print (1 + true);");

    assert!(matches!(
        result,
        Err(Error::Static(StaticError::Type(StaticTypeError::TypeMismatch {
            ..
        })))
    ));
    assert!(output.is_empty());
}

#[test]
fn test_switch_on_computed_focus() {
    assert_eq!(
        output_of("switch (1+1) { case 2: print 1; default: print 2; }"),
        vec![Value::Num(1.0)]
    );
}

#[test]
fn test_assignment_to_undeclared_variable() {
    assert_eq!(
        static_error("x = 1;"),
        StaticError::Scope(ScopeError::UndeclaredAssignment {
            name: "x".to_string()
        })
    );
}

#[test]
fn test_inner_shadow_does_not_affect_outer() {
    assert_eq!(
        output_of("declare x = true; { declare x = 1; print x; } print x;"),
        vec![Value::Num(1.0), Value::Bool(true)]
    );
}

#[test]
fn test_switch_duplicate_case_resolves_to_last() {
    assert_eq!(
        output_of(
            "switch (1) { case 1: print 10; case 2: print 20; case 1: print 30; default: print 0; }"
        ),
        vec![Value::Num(30.0)]
    );
}

#[test]
fn test_switch_case_type_must_match_focus() {
    assert!(matches!(
        static_error("switch (1) { case true: print 1; }"),
        StaticError::Type(StaticTypeError::TypeMismatch { .. })
    ));
}

#[test]
fn test_switch_on_negative_and_boolean_labels() {
    let source = "
        switch (0 - 1) { case -1: print 1; case 1: print 2; }
        switch (1 < 2) { case false: print false; case true: print true; }
    ";

    assert_eq!(output_of(source), vec![Value::Num(1.0), Value::Bool(true)]);
}

#[test]
fn test_while_loop_sums() {
    let source = "
        // sum 1..5
        declare i = 1;
        declare total = 0;
        while (i < 6) {
            total = total + i;
            i = i + 1;
        }
        print total;
    ";

    assert_eq!(output_of(source), vec![Value::Num(15.0)]);
}

#[test]
fn test_if_else_chain() {
    let source = "
        declare n = input<num>;
        if (n < 0) print -1;
        else if (n == 0) print 0;
        else print 1;
    ";

    for (value, expected) in [(-5.0, -1.0), (0.0, 0.0), (2.5, 1.0)] {
        let (result, output) = run_with_input(source, vec![Value::Num(value)]);
        assert!(result.is_ok());
        assert_eq!(output, vec![Value::Num(expected)]);
    }
}

#[test]
fn test_input_values_flow_through() {
    let source = "
        declare a = input<num>;
        declare b = input<num>;
        declare flag = input<bool>;
        if (flag) print a * b; else print a - b;
    ";

    let (result, output) = run_with_input(
        source,
        vec![Value::Num(6.0), Value::Num(7.0), Value::Bool(true)],
    );
    assert!(result.is_ok());
    assert_eq!(output, vec![Value::Num(42.0)]);
}

#[test]
fn test_missing_input_aborts_after_earlier_output() {
    let (result, output) = run("print 1; print input<bool>; print 2;");

    assert!(matches!(
        result,
        Err(Error::Runtime(RuntimeError::Input(InputError::Closed { .. })))
    ));
    assert_eq!(output, vec![Value::Num(1.0)]);
}

#[test]
fn test_numeric_logical_operators_are_bitwise() {
    assert_eq!(
        output_of("print 12 && 10; print 12 || 3;"),
        vec![Value::Num(8.0), Value::Num(15.0)]
    );
}

#[test]
fn test_operator_precedence_end_to_end() {
    assert_eq!(
        output_of("print 1 + 2 * 3; print -2 ^ 2; print 2 ^ 3 ^ 2; print (1 + 2) * 3;"),
        vec![
            Value::Num(7.0),
            Value::Num(-4.0),
            Value::Num(512.0),
            Value::Num(9.0)
        ]
    );
}

#[test]
fn test_comparisons_and_logic() {
    assert_eq!(
        output_of("print 1 < 2 && !(2 < 1); print false < true; print 3 == 3 || false;"),
        vec![Value::Bool(true), Value::Bool(true), Value::Bool(true)]
    );
}

#[test]
fn test_block_variable_is_out_of_scope_afterwards() {
    assert_eq!(
        static_error("{ declare y = 1; } print y;"),
        StaticError::Scope(ScopeError::UndefinedName {
            name: "y".to_string()
        })
    );
}

#[test]
fn test_duplicate_declaration_in_same_block() {
    assert_eq!(
        static_error("declare x = 1; declare x = 2;"),
        StaticError::Scope(ScopeError::DuplicateDeclaration {
            name: "x".to_string()
        })
    );
}

#[test]
fn test_update_must_keep_type() {
    assert!(matches!(
        static_error("declare x = 1; x = true;"),
        StaticError::Type(StaticTypeError::TypeMismatch { .. })
    ));
}

#[test]
fn test_unchecked_program_fails_dynamically() {
    let program = parse_source("print 1; print (1 + true); print 2;", None).unwrap();
    let mut input: VecDeque<Value> = VecDeque::new();
    let mut output: Vec<Value> = Vec::new();

    let result = execute(&program, &mut input, &mut output);
    assert_eq!(
        result,
        Err(RuntimeError::Type(DynamicTypeError::Expected {
            expected: minilang::ast::types::SourceType::Num,
            value: Value::Bool(true),
        }))
    );
    assert_eq!(output, vec![Value::Num(1.0)]);
}

#[test]
fn test_unchecked_numeric_conditions_are_truthy() {
    let program = parse_source(
        "if (1) print 1; else print 2; declare i = 2; while (i) { print i; i = i - 1; }",
        None,
    )
    .unwrap();
    let mut input: VecDeque<Value> = VecDeque::new();
    let mut output: Vec<Value> = Vec::new();

    assert_eq!(execute(&program, &mut input, &mut output), Ok(()));
    assert_eq!(output, vec![Value::Num(1.0), Value::Num(2.0), Value::Num(1.0)]);
}

#[test]
fn test_syntax_errors_are_reported() {
    let (result, _) = run("declare x = 1 @ 2;");
    let Err(Error::Syntax(error)) = result else {
        panic!("expected a syntax error");
    };

    assert_eq!(error.get_position().0, 14);
    assert_eq!(error.get_position().1.as_str(), "test.ml");
    assert!(matches!(
        error.get_internal_error(),
        SyntaxErrorImpl::UnrecognisedToken { .. }
    ));
}

#[test]
fn test_printed_values_render_like_numbers() {
    let output = output_of("print 10 / 4; print 1 / 0; print 0 - 0; print 2 ^ 0.5 < 2;");

    let rendered: Vec<String> = output.iter().map(|value| value.to_string()).collect();
    assert_eq!(rendered, vec!["2.5", "Infinity", "0", "true"]);
}
