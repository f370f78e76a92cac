//! # mathexpr
//!
//! mathexpr is a symbolic maths expression engine for randomly generated
//! quiz questions. It represents arithmetic expressions as trees of
//! operators and operands (fixed constants, once-sampled random constants,
//! named variables, and complex numbers), evaluates them numerically, and
//! renders them to precedence-correct text.
//!
//! The surrounding quiz machinery (routing, sessions, persistence stores,
//! templating) lives elsewhere; it builds trees through this crate, asks for
//! their value and text, and stores the frozen form between requests.
//!
//! ```
//! use mathexpr::{expression::core::Expression, operator::Operator, value::core::Value};
//!
//! let product = Expression::binary(Operator::Multiply,
//!                                  Expression::constant(2),
//!                                  Expression::bound_variable("x", 5)).unwrap();
//! let question = Expression::binary(Operator::Add, product, Expression::constant(1)).unwrap();
//!
//! assert_eq!(question.text(), "2*x+1");
//! assert_eq!(question.evaluate().unwrap(), Value::Integer(11));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

/// The precedence policy shared by operators and the formatter.
///
/// This module defines the BODMAS lookup: precedence ranks for every
/// operator and the single bracket-placement rule every formatting decision
/// goes through. The policy is an immutable value handed to the formatter,
/// not a scattering of per-operator special cases.
///
/// # Responsibilities
/// - Maps each operator to its precedence rank.
/// - Decides whether a child expression needs brackets under its parent.
pub mod bodmas;
/// Provides unified error types for construction and evaluation.
///
/// This module defines all errors the engine can raise. Construction errors
/// are detected eagerly while a tree is being built; evaluation errors
/// surface synchronously to the caller, which decides remediation (for
/// example, regenerating a fresh random expression). Nothing is retried,
/// logged, or converted to a sentinel value internally.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (construction, evaluation).
/// - Attaches detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// The expression tree and everything that walks it.
///
/// This module ties together operands and operators into the tree the quiz
/// logic builds once per question, then queries repeatedly: post-order
/// evaluation, precedence-correct rendering, value equality for answer
/// checking, and the frozen persistence form.
///
/// # Responsibilities
/// - Defines the `Expression` tree with eager arity checking.
/// - Evaluates bottom-up with structural complex promotion.
/// - Renders text and freezes/thaws resolved state.
pub mod expression;
/// Shape-driven expression generation.
///
/// This module turns a construction request (operator set, nesting depth,
/// random-constant ranges, variable bindings) into a fresh expression tree.
/// It is the entry point quiz implementations use to vary their questions.
///
/// # Responsibilities
/// - Validates shape requests before generating.
/// - Picks operators and leaf kinds with a caller-supplied generator.
/// - Leaves random constants unsampled for lazy, memoized resolution.
pub mod generate;
/// Leaf values of an expression tree.
///
/// This module defines the `Operand` kinds: fixed constants, once-sampled
/// random constants, and named variables. Random constants memoize their
/// sample in a resolve-once cell shared by evaluation and rendering.
///
/// # Responsibilities
/// - Resolves operands to numeric values, sampling randoms exactly once.
/// - Renders operand text (integers without a decimal point, variables by
///   name).
/// - Compares operands by resolved value.
pub mod operand;
/// The closed set of supported operators.
///
/// This module defines the operator descriptors: symbol, arity,
/// associativity and render form as plain data, plus the evaluation rules
/// over resolved operand values with explicit division-by-zero, domain and
/// overflow checks.
///
/// # Responsibilities
/// - Declares the operator table (`Add` through `Negate`).
/// - Applies operators with pairwise numeric promotion.
/// - Enforces the declared numeric domain policy.
pub mod operator;
/// General utilities for safe numeric conversion.
///
/// This module provides reusable conversion routines used throughout the
/// engine, chiefly exact `i64` to `f64` promotion.
///
/// # Responsibilities
/// - Safely convert between integer and floating-point types without silent
///   data loss.
pub mod util;
/// The value module defines the numeric types evaluation produces.
///
/// This module declares the `Value` enum (integer, real, complex) and the
/// `ComplexNumber` type, together with promotion, tolerance-based
/// comparison, and quiz-friendly rendering.
///
/// # Responsibilities
/// - Defines `Value` and `ComplexNumber` with their arithmetic.
/// - Provides safe promotion between numeric types.
/// - Implements the shared approximate-equality rule.
pub mod value;
