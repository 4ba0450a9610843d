//! Unit tests for the interpreter.
//!
//! Programs run against a scripted input queue and a capturing output vector.

use std::collections::VecDeque;

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        expressions::{BinaryOperator, Expr, PrefixOperator},
        statements::{Stmt, ValueCases},
        types::{SourceType, Value},
    },
    errors::errors::{DynamicTypeError, InputError, RuntimeError, ScopeError},
};

use super::{
    expr::{eval_expr, to_int32},
    interpreter::{execute, Interpreter},
    runtime::{parse_input_text, InputSource, LineInput},
    stmt::execute_stmt,
};

fn num(value: f64) -> Expr {
    Expr::Number(value)
}

fn boolean(value: bool) -> Expr {
    Expr::Boolean(value)
}

fn bin(left: Expr, operator: BinaryOperator, right: Expr) -> Expr {
    Expr::binary(left, operator, right)
}

fn declare(name: &str, initial_expr: Expr) -> Stmt {
    Stmt::VarDecl {
        name: name.to_string(),
        initial_expr,
    }
}

fn update(name: &str, new_expr: Expr) -> Stmt {
    Stmt::VarUpdate {
        name: name.to_string(),
        new_expr,
    }
}

fn eval(expr: &Expr) -> Result<Value, RuntimeError> {
    let mut input: VecDeque<Value> = VecDeque::new();
    let mut output: Vec<Value> = Vec::new();
    let mut interpreter = Interpreter::new(&mut input, &mut output);
    eval_expr(&mut interpreter, expr)
}

fn run(program: &Stmt) -> (Result<(), RuntimeError>, Vec<Value>) {
    run_with_input(program, vec![])
}

fn run_with_input(program: &Stmt, input: Vec<Value>) -> (Result<(), RuntimeError>, Vec<Value>) {
    let mut input: VecDeque<Value> = input.into();
    let mut output: Vec<Value> = Vec::new();
    let result = execute(program, &mut input, &mut output);
    (result, output)
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval(&bin(num(3.0), BinaryOperator::Plus, num(4.0))), Ok(Value::Num(7.0)));
    assert_eq!(eval(&bin(num(3.0), BinaryOperator::Minus, num(4.0))), Ok(Value::Num(-1.0)));
    assert_eq!(eval(&bin(num(3.0), BinaryOperator::Times, num(4.0))), Ok(Value::Num(12.0)));
    assert_eq!(eval(&bin(num(3.0), BinaryOperator::Divide, num(4.0))), Ok(Value::Num(0.75)));
    assert_eq!(eval(&bin(num(2.0), BinaryOperator::Exponent, num(10.0))), Ok(Value::Num(1024.0)));
    assert_eq!(
        eval(&bin(num(1.0), BinaryOperator::Divide, num(0.0))),
        Ok(Value::Num(f64::INFINITY))
    );
}

#[test]
fn test_arithmetic_requires_numbers() {
    assert_eq!(
        eval(&bin(num(1.0), BinaryOperator::Plus, boolean(true))),
        Err(RuntimeError::Type(DynamicTypeError::Expected {
            expected: SourceType::Num,
            value: Value::Bool(true)
        }))
    );
}

#[test]
fn test_and_or_on_booleans() {
    assert_eq!(eval(&bin(boolean(true), BinaryOperator::And, boolean(false))), Ok(Value::Bool(false)));
    assert_eq!(eval(&bin(boolean(true), BinaryOperator::Or, boolean(false))), Ok(Value::Bool(true)));
}

#[test]
fn test_and_or_on_numbers_are_bitwise() {
    assert_eq!(eval(&bin(num(6.0), BinaryOperator::And, num(3.0))), Ok(Value::Num(2.0)));
    assert_eq!(eval(&bin(num(6.0), BinaryOperator::Or, num(3.0))), Ok(Value::Num(7.0)));
    assert_eq!(eval(&bin(num(5.7), BinaryOperator::Or, num(0.0))), Ok(Value::Num(5.0)));
    assert_eq!(eval(&bin(num(-1.0), BinaryOperator::And, num(255.0))), Ok(Value::Num(255.0)));
}

#[test]
fn test_and_or_mixed_operands_fail() {
    assert!(matches!(
        eval(&bin(num(1.0), BinaryOperator::And, boolean(true))),
        Err(RuntimeError::Type(DynamicTypeError::Expected {
            expected: SourceType::Num,
            ..
        }))
    ));
    assert!(matches!(
        eval(&bin(boolean(true), BinaryOperator::Or, num(1.0))),
        Err(RuntimeError::Type(DynamicTypeError::Expected {
            expected: SourceType::Bool,
            ..
        }))
    ));
}

#[test]
fn test_to_int32() {
    assert_eq!(to_int32(1.9), 1);
    assert_eq!(to_int32(-1.9), -1);
    assert_eq!(to_int32(4294967296.0), 0);
    assert_eq!(to_int32(2147483648.0), -2147483648);
    assert_eq!(to_int32(f64::NAN), 0);
    assert_eq!(to_int32(f64::INFINITY), 0);
}

#[test]
fn test_comparisons() {
    assert_eq!(eval(&bin(num(1.0), BinaryOperator::LessThan, num(2.0))), Ok(Value::Bool(true)));
    assert_eq!(eval(&bin(num(2.0), BinaryOperator::LessThan, num(2.0))), Ok(Value::Bool(false)));
    assert_eq!(
        eval(&bin(boolean(false), BinaryOperator::LessThan, boolean(true))),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        eval(&bin(boolean(true), BinaryOperator::LessThan, boolean(true))),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        eval(&bin(num(1.0), BinaryOperator::LessThan, boolean(true))),
        Err(RuntimeError::Type(DynamicTypeError::SameType {
            left: Value::Num(1.0),
            right: Value::Bool(true)
        }))
    );
    assert_eq!(
        eval(&bin(boolean(false), BinaryOperator::LessThan, num(1.0))),
        Err(RuntimeError::Type(DynamicTypeError::SameType {
            left: Value::Bool(false),
            right: Value::Num(1.0)
        }))
    );
    assert_eq!(eval(&bin(num(2.0), BinaryOperator::Equal, num(2.0))), Ok(Value::Bool(true)));
    assert_eq!(
        eval(&bin(boolean(true), BinaryOperator::Equal, boolean(false))),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        eval(&bin(num(1.0), BinaryOperator::Equal, boolean(true))),
        Err(RuntimeError::Type(DynamicTypeError::SameType {
            left: Value::Num(1.0),
            right: Value::Bool(true)
        }))
    );
}

#[test]
fn test_prefix_operators() {
    assert_eq!(eval(&Expr::prefix(PrefixOperator::Negate, num(2.0))), Ok(Value::Num(-2.0)));
    assert_eq!(eval(&Expr::prefix(PrefixOperator::Not, boolean(true))), Ok(Value::Bool(false)));
    assert!(eval(&Expr::prefix(PrefixOperator::Not, num(0.0))).is_err());
}

#[test]
fn test_undefined_variable() {
    assert_eq!(
        eval(&Expr::symbol("x")),
        Err(RuntimeError::Scope(ScopeError::UndefinedName {
            name: "x".to_string()
        }))
    );
}

#[test]
fn test_input_reads_from_source() {
    let program = Stmt::Block(vec![
        declare("x", Expr::Input(SourceType::Num)),
        Stmt::Print(bin(Expr::symbol("x"), BinaryOperator::Times, num(2.0))),
        Stmt::Print(Expr::Input(SourceType::Bool)),
    ]);

    let (result, output) =
        run_with_input(&program, vec![Value::Num(21.0), Value::Bool(false)]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![Value::Num(42.0), Value::Bool(false)]);
}

#[test]
fn test_input_errors() {
    let program = Stmt::Print(Expr::Input(SourceType::Num));

    let (result, _) = run(&program);
    assert_eq!(
        result,
        Err(RuntimeError::Input(InputError::Closed {
            expected: SourceType::Num
        }))
    );

    let (result, _) = run_with_input(&program, vec![Value::Bool(true)]);
    assert!(matches!(result, Err(RuntimeError::Input(InputError::Mismatch { .. }))));
}

#[test]
fn test_line_input_reprompts() {
    let mut prompt = Vec::new();
    let mut input = LineInput::new("abc\n12.5\n".as_bytes(), &mut prompt);

    assert_eq!(input.read_input(SourceType::Num), Ok(Value::Num(12.5)));
    assert_eq!(
        input.read_input(SourceType::Num),
        Err(InputError::Closed {
            expected: SourceType::Num
        })
    );
    drop(input);

    let prompt = String::from_utf8(prompt).unwrap();
    assert_eq!(prompt.matches("Enter a value of type num.").count(), 3);
}

#[test]
fn test_parse_input_text() {
    assert_eq!(parse_input_text(" 3 ", SourceType::Num), Some(Value::Num(3.0)));
    assert_eq!(parse_input_text("-2.5", SourceType::Num), Some(Value::Num(-2.5)));
    assert_eq!(parse_input_text("Infinity", SourceType::Num), Some(Value::Num(f64::INFINITY)));
    assert_eq!(
        parse_input_text("-Infinity", SourceType::Num),
        Some(Value::Num(f64::NEG_INFINITY))
    );
    assert_eq!(parse_input_text("NaN", SourceType::Num), None);
    assert_eq!(parse_input_text("inf", SourceType::Num), None);
    assert_eq!(parse_input_text("infinity", SourceType::Num), None);
    assert_eq!(parse_input_text("1e5", SourceType::Num), None);
    assert_eq!(parse_input_text(".5", SourceType::Num), None);
    assert_eq!(parse_input_text("", SourceType::Num), None);
    assert_eq!(parse_input_text("true", SourceType::Bool), Some(Value::Bool(true)));
    assert_eq!(parse_input_text("1", SourceType::Bool), None);
}

#[test]
fn test_declare_and_print() {
    let program = Stmt::Block(vec![
        declare("x", bin(num(3.0), BinaryOperator::Plus, num(4.0))),
        Stmt::Print(Expr::symbol("x")),
    ]);

    let (result, output) = run(&program);
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![Value::Num(7.0)]);
}

#[test]
fn test_shadowing_does_not_affect_outer_binding() {
    let program = Stmt::Block(vec![
        declare("x", boolean(true)),
        Stmt::Block(vec![declare("x", num(1.0)), Stmt::Print(Expr::symbol("x"))]),
        Stmt::Print(Expr::symbol("x")),
    ]);

    let (result, output) = run(&program);
    assert_eq!(result, Ok(()));
    assert_eq!(output, vec![Value::Num(1.0), Value::Bool(true)]);
}

#[test]
fn test_update_undeclared_variable() {
    let (result, _) = run(&update("x", num(1.0)));

    assert_eq!(
        result,
        Err(RuntimeError::Scope(ScopeError::UndeclaredAssignment {
            name: "x".to_string()
        }))
    );
}

#[test]
fn test_if_else() {
    let make = |condition: bool| Stmt::If {
        condition: boolean(condition),
        true_branch: Box::new(Stmt::Print(num(1.0))),
        false_branch: Some(Box::new(Stmt::Print(num(2.0)))),
    };

    assert_eq!(run(&make(true)).1, vec![Value::Num(1.0)]);
    assert_eq!(run(&make(false)).1, vec![Value::Num(2.0)]);

    let no_else = Stmt::If {
        condition: boolean(false),
        true_branch: Box::new(Stmt::Print(num(1.0))),
        false_branch: None,
    };
    assert_eq!(run(&no_else), (Ok(()), vec![]));
}

#[test]
fn test_if_branch_declarations_are_scoped() {
    let program = Stmt::Block(vec![
        Stmt::If {
            condition: boolean(true),
            true_branch: Box::new(declare("y", num(1.0))),
            false_branch: None,
        },
        Stmt::Print(Expr::symbol("y")),
    ]);

    let (result, _) = run(&program);
    assert!(matches!(result, Err(RuntimeError::Scope(ScopeError::UndefinedName { .. }))));
}

#[test]
fn test_while_loop_counts() {
    let program = Stmt::Block(vec![
        declare("i", num(0.0)),
        Stmt::While {
            condition: bin(Expr::symbol("i"), BinaryOperator::LessThan, num(3.0)),
            body: Box::new(Stmt::Block(vec![
                Stmt::Print(Expr::symbol("i")),
                update("i", bin(Expr::symbol("i"), BinaryOperator::Plus, num(1.0))),
            ])),
        },
        Stmt::Print(Expr::symbol("i")),
    ]);

    let (result, output) = run(&program);
    assert_eq!(result, Ok(()));
    assert_eq!(
        output,
        vec![Value::Num(0.0), Value::Num(1.0), Value::Num(2.0), Value::Num(3.0)]
    );
}

#[test]
fn test_while_frame_is_shared_across_iterations() {
    // A bare declaration as the loop body lands in the loop's single frame, so
    // the second iteration redeclares it.
    let program = Stmt::Block(vec![
        declare("i", num(0.0)),
        Stmt::While {
            condition: bin(Expr::symbol("i"), BinaryOperator::LessThan, num(2.0)),
            body: Box::new(Stmt::Block(vec![update(
                "i",
                bin(Expr::symbol("i"), BinaryOperator::Plus, num(1.0)),
            )])),
        },
        Stmt::While {
            condition: bin(Expr::symbol("i"), BinaryOperator::LessThan, num(4.0)),
            body: Box::new(declare("tmp", num(0.0))),
        },
    ]);

    let (result, _) = run(&program);
    assert_eq!(
        result,
        Err(RuntimeError::Scope(ScopeError::DuplicateDeclaration {
            name: "tmp".to_string()
        }))
    );
}

#[test]
fn test_numeric_conditions_use_truthiness() {
    let if_program = Stmt::If {
        condition: num(1.0),
        true_branch: Box::new(Stmt::Print(num(1.0))),
        false_branch: Some(Box::new(Stmt::Print(num(2.0)))),
    };
    assert_eq!(run(&if_program), (Ok(()), vec![Value::Num(1.0)]));

    let skipped_loop = Stmt::While {
        condition: num(0.0),
        body: Box::new(Stmt::Print(num(1.0))),
    };
    assert_eq!(run(&skipped_loop), (Ok(()), vec![]));

    // Counts down until the condition reaches 0
    let countdown = Stmt::Block(vec![
        declare("i", num(2.0)),
        Stmt::While {
            condition: Expr::symbol("i"),
            body: Box::new(Stmt::Block(vec![
                Stmt::Print(Expr::symbol("i")),
                update("i", bin(Expr::symbol("i"), BinaryOperator::Minus, num(1.0))),
            ])),
        },
    ]);
    assert_eq!(run(&countdown), (Ok(()), vec![Value::Num(2.0), Value::Num(1.0)]));

    let nan_condition = Stmt::If {
        condition: bin(num(0.0), BinaryOperator::Divide, num(0.0)),
        true_branch: Box::new(Stmt::Print(num(1.0))),
        false_branch: Some(Box::new(Stmt::Print(num(2.0)))),
    };
    assert_eq!(run(&nan_condition), (Ok(()), vec![Value::Num(2.0)]));
}

fn switch(focus: Expr, cases: Vec<(Value, Stmt)>, default_case: Option<Stmt>) -> Stmt {
    Stmt::Switch {
        focus,
        value_cases: cases.into_iter().collect::<ValueCases>(),
        default_case: default_case.map(Box::new),
    }
}

#[test]
fn test_switch_dispatch() {
    let make = |focus: f64| {
        switch(
            num(focus),
            vec![
                (Value::Num(1.0), Stmt::Print(num(10.0))),
                (Value::Num(2.0), Stmt::Print(num(20.0))),
            ],
            Some(Stmt::Print(num(0.0))),
        )
    };

    assert_eq!(run(&make(1.0)).1, vec![Value::Num(10.0)]);
    assert_eq!(run(&make(2.0)).1, vec![Value::Num(20.0)]);
    assert_eq!(run(&make(3.0)).1, vec![Value::Num(0.0)]);
}

#[test]
fn test_switch_without_default_does_nothing() {
    let program = switch(boolean(true), vec![(Value::Bool(false), Stmt::Print(num(1.0)))], None);

    assert_eq!(run(&program), (Ok(()), vec![]));
}

#[test]
fn test_switch_duplicate_case_uses_last() {
    let program = switch(
        num(1.0),
        vec![
            (Value::Num(1.0), Stmt::Print(num(1.0))),
            (Value::Num(2.0), Stmt::Print(num(2.0))),
            (Value::Num(1.0), Stmt::Print(num(3.0))),
        ],
        None,
    );

    assert_eq!(run(&program).1, vec![Value::Num(3.0)]);
}

#[test]
fn test_scope_balanced_after_runtime_failure() {
    let mut input: VecDeque<Value> = VecDeque::new();
    let mut output: Vec<Value> = Vec::new();
    let mut interpreter = Interpreter::new(&mut input, &mut output);

    let program = Stmt::Block(vec![Stmt::While {
        condition: boolean(true),
        body: Box::new(Stmt::Block(vec![Stmt::Print(bin(
            num(1.0),
            BinaryOperator::Plus,
            boolean(true),
        ))])),
    }]);

    assert!(execute_stmt(&mut interpreter, &program).is_err());
    assert_eq!(interpreter.scope.depth(), 1);
}
