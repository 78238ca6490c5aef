use std::{error::Error as _, fs};

use shuntcalc::{
    error::{Error, ParseError, RuntimeError},
    evaluate,
    interpreter::{evaluator::core::evaluate_expression, tokenizer::format_tokens},
    parse, postfix,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for line in extract_example_lines(&content) {
            count += 1;
            let (expression, expected) =
                line.split_once("=>")
                    .unwrap_or_else(|| panic!("Example in {path:?} has no '=>': {line}"));
            let (expression, expected) = (expression.trim(), expected.trim());

            let result = evaluate(expression);
            if expected == "error" {
                assert!(result.is_err(),
                        "Example {expression:?} in {path:?} should fail but gave {result:?}");
            } else {
                let expected: f64 = expected.parse()
                                            .unwrap_or_else(|e| {
                                                panic!("Bad expected value in {path:?}: {line} ({e})")
                                            });
                match result {
                    Ok(value) => assert_close(value, expected, expression),
                    Err(e) => panic!("Example {expression:?} in {path:?} failed: {e}"),
                }
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

fn extract_example_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut inside = false;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```shuntcalc") {
            inside = true;
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            continue;
        }
        if inside && !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines
}

fn assert_close(actual: f64, expected: f64, src: &str) {
    assert!((actual - expected).abs() < 1e-9,
            "{src:?} evaluated to {actual}, expected {expected}");
}

fn assert_value(src: &str, expected: f64) {
    match evaluate(src) {
        Ok(value) => assert_close(value, expected, src),
        Err(e) => panic!("{src:?} failed: {e}"),
    }
}

fn assert_runtime_error(src: &str) -> RuntimeError {
    match evaluate(src) {
        Err(Error::Runtime(e)) => e,
        other => panic!("{src:?} should fail at runtime but gave {other:?}"),
    }
}

fn assert_parse_error(src: &str) -> ParseError {
    match evaluate(src) {
        Err(Error::Parse(e)) => e,
        other => panic!("{src:?} should fail to parse but gave {other:?}"),
    }
}

#[test]
fn precedence_and_parentheses() {
    assert_value("3 + 5 * (2 - 4)", -7.0);
    assert_value("2 + 3 * 4", 14.0);
    assert_value("(2 + 3) * 4", 20.0);
    assert_value("((2))", 2.0);
    assert_value("2 * (3 + (4 - 1)) / 3", 4.0);
}

#[test]
fn operators_without_parentheses_match_manual_evaluation() {
    let cases = [("1+2*3-4/2", 1.0 + 2.0 * 3.0 - 4.0 / 2.0),
                 ("10-4-3", 3.0),
                 ("100/10/5", 2.0),
                 ("2*3+4*5-6/3", 2.0 * 3.0 + 4.0 * 5.0 - 6.0 / 3.0),
                 ("7-2*3+8/4*2", 7.0 - 2.0 * 3.0 + 8.0 / 4.0 * 2.0),
                 ("1.5*4-0.25", 5.75)];

    for (src, expected) in cases {
        assert_value(src, expected);
    }
}

#[test]
fn exponent_is_right_associative() {
    assert_value("2^3^2", 512.0);
    assert_value("(2^3)^2", 64.0);
    assert_value("2*3^2", 18.0);
    assert_value("4^0.5", 2.0);
}

#[test]
fn unary_minus() {
    assert_value("-5+3", -2.0);
    assert_value("2*-3", -6.0);
    assert_value("-2^2", -4.0);
    assert_value("(-2)^2", 4.0);
    assert_value("2^-1", 0.5);
    assert_value("3--2", 5.0);
    assert_value("-(1+2)", -3.0);
    assert_value("--4", 4.0);
}

#[test]
fn functions() {
    assert_value("sqrt(sin(0)+1)", 1.0);
    assert_value("sqrt(16)", 4.0);
    assert_value("cos(0)*2", 2.0);
    assert_value("tan(0)", 0.0);
    assert_value("sqrt(sqrt(81)) + 1", 4.0);
    assert_value("2^sqrt(4)", 4.0);
    assert_value("-sqrt(9)", -3.0);
}

#[test]
fn square_root_of_negative_is_nan() {
    assert!(evaluate("sqrt(-4)").unwrap().is_nan());
}

#[test]
fn whitespace_is_removed_before_tokenizing() {
    assert_value("  1 +\t2 ", 3.0);
    assert_value("1 2 + 1", 13.0);
    assert_value("s q r t ( 9 )", 3.0);
}

#[test]
fn division_by_zero() {
    assert_eq!(assert_runtime_error("5/0"), RuntimeError::DivisionByZero { position: 1 });
    assert_eq!(assert_runtime_error("1/(2-2)"), RuntimeError::DivisionByZero { position: 1 });
    assert_value("0/5", 0.0);
}

#[test]
fn mismatched_parentheses() {
    assert_eq!(assert_parse_error("(2+3"), ParseError::MismatchedParentheses { position: 0 });
    assert_eq!(assert_parse_error("2+3)"), ParseError::MismatchedParentheses { position: 3 });
    assert!(matches!(assert_parse_error(")("), ParseError::MismatchedParentheses { .. }));
}

#[test]
fn invalid_input() {
    assert_eq!(assert_parse_error("2$3"),
               ParseError::InvalidCharacter { character: '$',
                                              position:  1, });
    assert_eq!(assert_parse_error("x+1"),
               ParseError::InvalidCharacter { character: 'x',
                                              position:  0, });
    assert_eq!(assert_parse_error("1.2.3"),
               ParseError::InvalidToken { token:    "1.2.3".to_string(),
                                          position: 0, });
    assert_eq!(assert_parse_error("sin(2"),
               ParseError::UnmatchedFunctionParens { name:     "sin".to_string(),
                                                     position: 0, });
}

#[test]
fn insufficient_operands() {
    assert_eq!(assert_runtime_error("*"),
               RuntimeError::InsufficientOperands { operator: "*".to_string(),
                                                    position: 0, });
    assert_eq!(assert_runtime_error("2+"),
               RuntimeError::InsufficientOperands { operator: "+".to_string(),
                                                    position: 1, });
    assert!(matches!(assert_runtime_error("-"), RuntimeError::InsufficientOperands { .. }));
}

#[test]
fn malformed_expressions() {
    assert_eq!(assert_runtime_error(""), RuntimeError::MalformedExpression { values: 0 });
    assert_eq!(assert_runtime_error("2(3)"), RuntimeError::MalformedExpression { values: 2 });
}

#[test]
fn errors_in_function_arguments_carry_the_argument() {
    let error = assert_runtime_error("1 + sqrt(4 / (1 - 1))");

    assert_eq!(error.root_cause(), &RuntimeError::DivisionByZero { position: 8 });
    let RuntimeError::FunctionArgument { name, argument, .. } = &error else {
        panic!("expected a wrapped argument error, got {error:?}");
    };
    assert_eq!(name, "sqrt");
    assert_eq!(argument, "4/(1-1)");
    assert!(error.source().is_some());
    assert_eq!(error.to_string(),
               "Invalid argument in sqrt(4/(1-1)): Cannot divide by zero at position 8.");
}

#[test]
fn nested_function_errors_wrap_once_per_call() {
    let error = assert_runtime_error("cos(sin(1/0))");

    let RuntimeError::FunctionArgument { name, source, .. } = &error else {
        panic!("expected a wrapped argument error, got {error:?}");
    };
    assert_eq!(name, "cos");
    assert!(matches!(source.as_ref(), RuntimeError::FunctionArgument { name, .. } if name == "sin"));
    assert_eq!(error.root_cause(), &RuntimeError::DivisionByZero { position: 9 });
}

#[test]
fn postfix_form() {
    let tokens = postfix("3 + 5 * (2 - 4)").unwrap();
    assert_eq!(format_tokens(&tokens), "3 5 2 4 - * +");

    let tokens = postfix("-cos(0)^2").unwrap();
    assert_eq!(format_tokens(&tokens), "0 cos 2 ^ neg");
}

#[test]
fn tree_form() {
    assert_eq!(parse("1-2-3").unwrap().to_string(), "((1 - 2) - 3)");
    assert_eq!(parse("sqrt(2*2)").unwrap().to_string(), "sqrt((2 * 2))");
    assert_eq!(parse("1+2").unwrap().depth(), 2);
}

#[test]
fn arguments_are_evaluated_on_their_own() {
    for src in ["3sin()", "1+2sqrt()", "5sqrt(*4)", "2-cos(-)", "sqrt((1)(2))"] {
        let error = assert_runtime_error(src);
        assert!(matches!(error, RuntimeError::FunctionArgument { .. }),
                "{src:?} should fail inside the argument but gave {error:?}");
    }

    assert_eq!(assert_runtime_error("sin()"),
               RuntimeError::MalformedExpression { values: 0 }.in_argument("sin", ""));
    assert_eq!(assert_runtime_error("5sqrt(*4)").root_cause(),
               &RuntimeError::InsufficientOperands { operator: "*".to_string(),
                                                     position: 6, });
    assert_value("2*sqrt(4)-1", 3.0);
}

#[test]
fn parse_errors_in_arguments_carry_the_argument() {
    let error = assert_parse_error("sqrt(1.2.3)");

    assert_eq!(error.root_cause(),
               &ParseError::InvalidToken { token:    "1.2.3".to_string(),
                                           position: 5, });
    assert!(error.source().is_some());
    assert_eq!(error.to_string(),
               "Invalid argument in sqrt(1.2.3): Invalid token '1.2.3' at position 5.");
    assert!(matches!(assert_parse_error("1+cos(2#)"), ParseError::FunctionArgument { .. }));
}

#[test]
fn long_expressions_do_not_overflow_the_stack() {
    let sum = vec!["1"; 20_000].join("+");
    assert_value(&sum, 20_000.0);

    let tree = parse(&sum).unwrap();
    assert_eq!(tree.depth(), 20_000);
    assert_eq!(evaluate_expression(&tree), Ok(20_000.0));
    assert!(tree.to_string().ends_with(" + 1) + 1)"));
    drop(tree);

    let nested = format!("{}2{}", "(".repeat(5_000), ")".repeat(5_000));
    assert_value(&nested, 2.0);
}

#[test]
fn every_error_is_reported_not_raised() {
    let inputs = ["", "(", ")", "+", "-", "^^", "sqrt(", "sqrt()", "1//2", "..", "2^", "sin(()",
                  "((((1))))+", "tan(1)(2)", "cos", "1e5", "1,5", "3sin()", "5sqrt(*4)",
                  "1+2sqrt()", "sqrt(1.2.3)", "sqrt((1)(2))"];

    for src in inputs {
        match evaluate(src) {
            Err(e) => assert!(!e.to_string().is_empty(), "{src:?} produced an empty message"),
            Ok(value) => panic!("{src:?} should be rejected but gave {value}"),
        }
    }
}
