use mathexpr::{
    error::{BuildError, EvalError},
    expression::core::Expression,
    generate::{generate, ShapeRequest},
    operator::Operator,
    value::{complex::ComplexNumber, core::Value},
};
use rand::SeedableRng;

fn binary(op: Operator, left: Expression, right: Expression) -> Expression {
    Expression::binary(op, left, right).unwrap()
}

fn int(n: i64) -> Expression {
    Expression::constant(n)
}

fn complex(real: f64, imaginary: f64) -> Expression {
    Expression::constant(Value::Complex(ComplexNumber::new(real, imaginary)))
}

#[test]
fn constant_evaluates_to_itself() {
    assert_eq!(int(7).evaluate().unwrap(), Value::Integer(7));
    assert_eq!(Expression::constant(2.5).evaluate().unwrap(), Value::Real(2.5));
}

#[test]
fn brackets_follow_precedence() {
    let grouped = binary(Operator::Multiply, binary(Operator::Add, int(2), int(3)), int(4));
    assert_eq!(grouped.text(), "(2+3)*4");
    assert_eq!(grouped.evaluate().unwrap(), Value::Integer(20));

    let flat = binary(Operator::Add, binary(Operator::Multiply, int(2), int(3)), int(4));
    assert_eq!(flat.text(), "2*3+4");
    assert_eq!(flat.evaluate().unwrap(), Value::Integer(10));
}

#[test]
fn brackets_follow_associativity() {
    let left_chain = binary(Operator::Subtract, binary(Operator::Subtract, int(5), int(2)), int(1));
    assert_eq!(left_chain.text(), "5-2-1");

    let right_grouped = binary(Operator::Subtract, int(5), binary(Operator::Subtract, int(2), int(1)));
    assert_eq!(right_grouped.text(), "5-(2-1)");

    let tower = binary(Operator::Power, int(2), binary(Operator::Power, int(3), int(2)));
    assert_eq!(tower.text(), "2^3^2");
    assert_eq!(tower.evaluate().unwrap(), Value::Integer(512));

    let left_tower = binary(Operator::Power, binary(Operator::Power, int(2), int(3)), int(2));
    assert_eq!(left_tower.text(), "(2^3)^2");
    assert_eq!(left_tower.evaluate().unwrap(), Value::Integer(64));
}

#[test]
fn negation_renders_as_prefix() {
    let negated = Expression::unary(Operator::Negate, int(5)).unwrap();
    assert_eq!(negated.text(), "-5");
    assert_eq!(negated.evaluate().unwrap(), Value::Integer(-5));

    let negated_sum = Expression::unary(Operator::Negate, binary(Operator::Add, int(2), int(3))).unwrap();
    assert_eq!(negated_sum.text(), "-(2+3)");
    assert_eq!(negated_sum.evaluate().unwrap(), Value::Integer(-5));

    // Negation binds looser than exponentiation: -2^2 is -(2^2).
    let negated_power = Expression::unary(Operator::Negate, binary(Operator::Power, int(2), int(2))).unwrap();
    assert_eq!(negated_power.text(), "-2^2");
    assert_eq!(negated_power.evaluate().unwrap(), Value::Integer(-4));

    let minus_minus = binary(Operator::Subtract,
                             int(1),
                             Expression::unary(Operator::Negate, int(2)).unwrap());
    assert_eq!(minus_minus.text(), "1-(-2)");
    assert_eq!(minus_minus.evaluate().unwrap(), Value::Integer(3));
}

#[test]
fn random_constant_samples_once_per_instance() {
    let expr = Expression::random_integer(1..=1_000_000).unwrap();

    let first = expr.evaluate().unwrap();
    assert_eq!(expr.evaluate().unwrap(), first);
    assert_eq!(expr.text(), first.to_string());
    assert_eq!(expr.evaluate().unwrap(), first);
}

#[test]
fn formatting_first_still_resolves_once() {
    let expr = Expression::random_integer(1..=1_000_000).unwrap();

    let rendered = expr.text();
    assert_eq!(expr.evaluate().unwrap().to_string(), rendered);
    assert_eq!(expr.text(), rendered);
}

#[test]
fn division_by_zero_fails() {
    let expr = binary(Operator::Divide, int(5), int(0));
    assert_eq!(expr.evaluate().unwrap_err(), EvalError::DivisionByZero);

    let real = binary(Operator::Divide, Expression::constant(5.0), Expression::constant(0.0));
    assert_eq!(real.evaluate().unwrap_err(), EvalError::DivisionByZero);

    let complex_divisor = binary(Operator::Divide, complex(1.0, 2.0), complex(0.0, 0.0));
    assert_eq!(complex_divisor.evaluate().unwrap_err(), EvalError::DivisionByZero);
}

#[test]
fn complex_division_by_zero_magnitude_fails() {
    let a = ComplexNumber::new(3.0, 4.0);
    assert_eq!(a.checked_div(ComplexNumber::new(0.0, 0.0)).unwrap_err(),
               EvalError::DivisionByZero);
}

#[test]
fn integer_division_stays_exact_or_promotes() {
    assert_eq!(binary(Operator::Divide, int(6), int(3)).evaluate().unwrap(),
               Value::Integer(2));
    assert_eq!(binary(Operator::Divide, int(7), int(2)).evaluate().unwrap(),
               Value::Real(3.5));
}

#[test]
fn complex_operand_promotes_whole_tree() {
    // The imaginary parts cancel, yet the result stays complex-typed.
    let expr = binary(Operator::Add, complex(2.0, 5.0), complex(3.0, -5.0));
    let result = expr.evaluate().unwrap();

    assert!(result.is_complex());
    assert_eq!(result, Value::Complex(ComplexNumber::new(5.0, 0.0)));

    let mixed = binary(Operator::Multiply, int(2), complex(1.0, 1.0));
    assert_eq!(mixed.evaluate().unwrap(),
               Value::Complex(ComplexNumber::new(2.0, 2.0)));
}

#[test]
fn complex_values_render_their_four_forms() {
    assert_eq!(complex(0.0, 0.0).text(), "0");
    assert_eq!(complex(3.0, 0.0).text(), "3");
    assert_eq!(complex(0.0, 2.0).text(), "2j");
    assert_eq!(complex(3.0, 2.0).text(), "3+2j");
    assert_eq!(complex(3.0, -2.5).text(), "3-2.5j");
}

#[test]
fn end_to_end_question() {
    let product = binary(Operator::Multiply, int(2), Expression::bound_variable("x", 5));
    let expr = binary(Operator::Add, product, int(1));

    assert_eq!(expr.evaluate().unwrap(), Value::Integer(11));
    assert_eq!(expr.text(), "2*x+1");
}

#[test]
fn unbound_variable_fails() {
    let expr = binary(Operator::Add, Expression::variable("y"), int(1));
    assert_eq!(expr.evaluate().unwrap_err(),
               EvalError::UnboundVariable { name: "y".to_string() });
}

#[test]
fn binding_after_construction() {
    let mut expr = binary(Operator::Multiply, int(3), Expression::variable("x"));
    assert!(expr.evaluate().is_err());

    expr.bind("x", 4);
    assert_eq!(expr.evaluate().unwrap(), Value::Integer(12));
    assert_eq!(expr.text(), "3*x");
}

#[test]
fn arity_is_checked_at_construction() {
    let err = Expression::node(Operator::Add, vec![int(1)]).unwrap_err();
    assert_eq!(err,
               BuildError::MalformedExpression { operator: Operator::Add,
                                                 expected: 2,
                                                 found:    1, });

    assert!(Expression::node(Operator::Negate, vec![int(1), int(2)]).is_err());
}

#[test]
fn value_equality_uses_tolerance() {
    let computed = binary(Operator::Add, Expression::constant(0.1), Expression::constant(0.2));
    let expected = Expression::constant(0.3);

    // 0.1 + 0.2 != 0.3 exactly, but the answer checker accepts it.
    assert!(computed.value_eq(&expected).unwrap());
    assert!(!computed.value_eq(&Expression::constant(0.31)).unwrap());

    // Shape is irrelevant, only the value counts.
    let twice = binary(Operator::Multiply, int(2), int(6));
    let dozen = int(12);
    assert!(twice.value_eq(&dozen).unwrap());
}

#[test]
fn domain_policy_is_enforced() {
    let zero_to_zero = binary(Operator::Power, int(0), int(0));
    assert!(matches!(zero_to_zero.evaluate().unwrap_err(), EvalError::Domain { .. }));

    let zero_to_negative = binary(Operator::Power, int(0), int(-2));
    assert!(matches!(zero_to_negative.evaluate().unwrap_err(), EvalError::Domain { .. }));

    let negative_root = binary(Operator::Power, Expression::constant(-8.0), Expression::constant(0.5));
    assert!(matches!(negative_root.evaluate().unwrap_err(), EvalError::Domain { .. }));

    let complex_exponent = binary(Operator::Power, int(2), complex(1.0, 1.0));
    assert!(matches!(complex_exponent.evaluate().unwrap_err(), EvalError::Domain { .. }));
}

#[test]
fn powers_follow_promotion() {
    assert_eq!(binary(Operator::Power, int(2), int(10)).evaluate().unwrap(),
               Value::Integer(1024));
    assert_eq!(binary(Operator::Power, int(2), int(-1)).evaluate().unwrap(),
               Value::Real(0.5));
    assert_eq!(binary(Operator::Power, complex(0.0, 1.0), int(2)).evaluate().unwrap(),
               Value::Complex(ComplexNumber::new(-1.0, 0.0)));
}

#[test]
fn integer_overflow_is_reported() {
    let sum = binary(Operator::Add, int(i64::MAX), int(1));
    assert_eq!(sum.evaluate().unwrap_err(), EvalError::Overflow);

    let power = binary(Operator::Power, int(10), int(100));
    assert_eq!(power.evaluate().unwrap_err(), EvalError::Overflow);

    // i64::MIN / -1 is the one division that overflows instead of dividing.
    let quotient = binary(Operator::Divide, int(i64::MIN), int(-1));
    assert_eq!(quotient.evaluate().unwrap_err(), EvalError::Overflow);
}

#[test]
fn extreme_complex_exponents_are_reported() {
    assert_eq!(ComplexNumber::new(2.0, 0.0).checked_powi(i64::MIN).unwrap_err(),
               EvalError::Overflow);

    let power = binary(Operator::Power, complex(2.0, 0.0), int(i64::MIN));
    assert_eq!(power.evaluate().unwrap_err(), EvalError::Overflow);
}

#[test]
#[allow(clippy::reversed_empty_ranges)]
fn empty_sampling_ranges_are_rejected() {
    assert!(matches!(Expression::random_integer(10..=1).unwrap_err(),
                     BuildError::InvalidRequest { .. }));
    assert!(matches!(Expression::random_real(1.0..1.0).unwrap_err(),
                     BuildError::InvalidRequest { .. }));
}

#[test]
fn freeze_then_thaw_reproduces_output() {
    let random_part = binary(Operator::Multiply,
                             Expression::random_integer(1..=100).unwrap(),
                             int(3));
    let expr = binary(Operator::Add, random_part, Expression::bound_variable("x", 5));

    let frozen = expr.freeze().unwrap();
    let thawed = frozen.thaw().unwrap();

    assert_eq!(thawed.text(), expr.text());
    assert_eq!(thawed.evaluate().unwrap(), expr.evaluate().unwrap());
}

#[test]
fn frozen_form_survives_serialization() {
    let expr = binary(Operator::Add,
                      Expression::random_integer(1..=100).unwrap(),
                      Expression::bound_variable("x", 2.5));

    let frozen = expr.freeze().unwrap();
    let stored = serde_json::to_string(&frozen).unwrap();
    let restored: mathexpr::expression::frozen::FrozenExpression =
        serde_json::from_str(&stored).unwrap();
    let thawed = restored.thaw().unwrap();

    assert_eq!(thawed.text(), expr.text());
    assert_eq!(thawed.evaluate().unwrap(), expr.evaluate().unwrap());
}

#[test]
fn freezing_an_unbound_variable_fails() {
    let expr = binary(Operator::Add, Expression::variable("y"), int(1));
    assert_eq!(expr.freeze().unwrap_err(),
               EvalError::UnboundVariable { name: "y".to_string() });
}

#[test]
fn generated_expressions_match_their_request() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);

    let request = ShapeRequest { operators: vec![Operator::Add],
                                 depth: 1,
                                 constant_range: 1..=10,
                                 ..ShapeRequest::default() };
    let expr = generate(&mut rng, &request).unwrap();

    assert_eq!(expr.top_operator(), Some(Operator::Add));
    match expr.evaluate().unwrap() {
        Value::Integer(n) => assert!((2..=20).contains(&n)),
        other => panic!("expected an integer sum, found {other}"),
    }

    let complex_request = ShapeRequest { depth: 0,
                                         complex_probability: 1.0,
                                         ..ShapeRequest::default() };
    let leaf = generate(&mut rng, &complex_request).unwrap();
    assert!(leaf.evaluate().unwrap().is_complex());
}

#[test]
fn invalid_requests_are_rejected() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);

    let no_operators = ShapeRequest { operators: Vec::new(),
                                      ..ShapeRequest::default() };
    assert!(matches!(generate(&mut rng, &no_operators).unwrap_err(),
                     BuildError::InvalidRequest { .. }));

    #[allow(clippy::reversed_empty_ranges)]
    let empty_range = ShapeRequest { constant_range: 5..=1,
                                     ..ShapeRequest::default() };
    assert!(matches!(generate(&mut rng, &empty_range).unwrap_err(),
                     BuildError::InvalidRequest { .. }));

    let bad_probability = ShapeRequest { complex_probability: 1.5,
                                         ..ShapeRequest::default() };
    assert!(matches!(generate(&mut rng, &bad_probability).unwrap_err(),
                     BuildError::InvalidRequest { .. }));
}
