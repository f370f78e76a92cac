use std::ops::{Range, RangeInclusive};

use crate::{
    bodmas::Bodmas,
    error::{eval_error::EvalResult, BuildError},
    expression::{format, frozen::FrozenExpression},
    operand::Operand,
    operator::Operator,
    value::core::{is_close, Value, ABS_TOLERANCE, REL_TOLERANCE},
};

/// An expression tree composing operands and operators.
///
/// A tree is built once per quiz question, queried any number of times
/// through [`Expression::evaluate`] and [`Expression::text`], and either
/// discarded or frozen for persistence when the question is answered. The
/// child count of every node is checked against the operator's arity at
/// construction; evaluation never re-checks it.
///
/// The only mutable state is the once-only memoized resolution of random
/// constants, which is not thread-safe: keep each instance confined to a
/// single in-flight question.
#[derive(Debug, Clone)]
pub enum Expression {
    /// A leaf operand.
    Leaf(Operand),
    /// An operator applied to an ordered sequence of children.
    Node {
        /// The operator at this node.
        op:       Operator,
        /// Exactly `op.arity()` children, left to right.
        children: Vec<Expression>,
    },
}

impl From<Operand> for Expression {
    fn from(operand: Operand) -> Self {
        Self::Leaf(operand)
    }
}

impl Expression {
    /// Creates a leaf holding a fixed constant.
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Leaf(Operand::constant(value))
    }
    /// Creates a leaf holding a random integer constant.
    ///
    /// # Errors
    /// Returns `BuildError::InvalidRequest` when `range` is empty, so an
    /// unsampleable leaf can never exist; the check is as eager as the arity
    /// check on nodes.
    pub fn random_integer(range: RangeInclusive<i64>) -> Result<Self, BuildError> {
        Ok(Self::Leaf(Operand::random_integer(range)?))
    }
    /// Creates a leaf holding a random real constant.
    ///
    /// # Errors
    /// Returns `BuildError::InvalidRequest` when `range` is empty.
    pub fn random_real(range: Range<f64>) -> Result<Self, BuildError> {
        Ok(Self::Leaf(Operand::random_real(range)?))
    }
    /// Creates a leaf holding an unbound variable.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Leaf(Operand::variable(name))
    }
    /// Creates a leaf holding a variable with a bound value.
    pub fn bound_variable(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Leaf(Operand::bound_variable(name, value))
    }
    /// Creates an operator node over an ordered sequence of children.
    ///
    /// # Errors
    /// Returns `BuildError::MalformedExpression` when the child count does
    /// not equal the operator's arity. The check happens here, eagerly, so a
    /// malformed tree can never reach evaluation.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{expression::core::Expression, operator::Operator};
    ///
    /// let ok = Expression::node(Operator::Add,
    ///                           vec![Expression::constant(1), Expression::constant(2)]);
    /// assert!(ok.is_ok());
    ///
    /// let bad = Expression::node(Operator::Add, vec![Expression::constant(1)]);
    /// assert!(bad.is_err());
    /// ```
    pub fn node(op: Operator, children: Vec<Self>) -> Result<Self, BuildError> {
        if children.len() != op.arity() {
            return Err(BuildError::MalformedExpression { operator: op,
                                                         expected: op.arity(),
                                                         found:    children.len(), });
        }
        Ok(Self::Node { op, children })
    }
    /// Creates a binary operator node.
    ///
    /// # Errors
    /// Returns `BuildError::MalformedExpression` for a unary operator.
    pub fn binary(op: Operator, left: Self, right: Self) -> Result<Self, BuildError> {
        Self::node(op, vec![left, right])
    }
    /// Creates a unary operator node.
    ///
    /// # Errors
    /// Returns `BuildError::MalformedExpression` for a binary operator.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{expression::core::Expression, operator::Operator};
    ///
    /// let negated = Expression::unary(Operator::Negate, Expression::constant(5)).unwrap();
    /// assert_eq!(negated.text(), "-5");
    /// ```
    pub fn unary(op: Operator, child: Self) -> Result<Self, BuildError> {
        Self::node(op, vec![child])
    }

    /// Returns the operator at the root, or `None` for a leaf.
    #[must_use]
    pub const fn top_operator(&self) -> Option<Operator> {
        match self {
            Self::Leaf(_) => None,
            Self::Node { op, .. } => Some(*op),
        }
    }
    /// Evaluates the tree bottom-up.
    ///
    /// Children are resolved post-order, then each node's operator is
    /// applied. The result type promotes to complex if any operand in the
    /// tree is complex-typed, and stays complex even when the imaginary
    /// component works out to zero. Random constants resolve through their
    /// memoized cache, so repeated evaluation never resamples.
    ///
    /// # Errors
    /// Propagates the first `EvalError` raised by operand resolution or
    /// operator application.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{expression::core::Expression, operator::Operator, value::core::Value};
    ///
    /// let product = Expression::binary(Operator::Multiply,
    ///                                  Expression::constant(2),
    ///                                  Expression::bound_variable("x", 5)).unwrap();
    /// let expr = Expression::binary(Operator::Add, product, Expression::constant(1)).unwrap();
    ///
    /// assert_eq!(expr.evaluate().unwrap(), Value::Integer(11));
    /// assert_eq!(expr.text(), "2*x+1");
    /// ```
    pub fn evaluate(&self) -> EvalResult<Value> {
        match self {
            Self::Leaf(operand) => operand.value(),
            Self::Node { op, children } => {
                let mut resolved = Vec::with_capacity(children.len());
                for child in children {
                    resolved.push(child.evaluate()?);
                }
                op.apply(&resolved)
            },
        }
    }
    /// Renders the tree under the default BODMAS policy.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{expression::core::Expression, operator::Operator};
    ///
    /// let sum = Expression::binary(Operator::Add,
    ///                              Expression::constant(2),
    ///                              Expression::constant(3)).unwrap();
    /// let expr = Expression::binary(Operator::Multiply, sum, Expression::constant(4)).unwrap();
    ///
    /// assert_eq!(expr.text(), "(2+3)*4");
    /// ```
    #[must_use]
    pub fn text(&self) -> String {
        self.text_with(Bodmas::default())
    }
    /// Renders the tree under an explicit precedence policy.
    #[must_use]
    pub fn text_with(&self, policy: Bodmas) -> String {
        format::render(self, policy)
    }
    /// Compares two expressions by evaluated value, within the default
    /// tolerances (component-wise for complex results).
    ///
    /// This is the comparison answer-checking uses; structural equality of
    /// the trees is deliberately not considered.
    ///
    /// # Errors
    /// Propagates any evaluation error from either side.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{expression::core::Expression, operator::Operator};
    ///
    /// let a = Expression::binary(Operator::Add,
    ///                            Expression::constant(2),
    ///                            Expression::constant(2)).unwrap();
    /// let b = Expression::constant(4.0);
    ///
    /// assert!(a.value_eq(&b).unwrap());
    /// ```
    pub fn value_eq(&self, other: &Self) -> EvalResult<bool> {
        is_close(&self.evaluate()?,
                 &other.evaluate()?,
                 ABS_TOLERANCE,
                 REL_TOLERANCE)
    }
    /// Binds `value` to every variable named `name` in the tree.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{expression::core::Expression, value::core::Value};
    ///
    /// let mut x = Expression::variable("x");
    /// assert!(x.evaluate().is_err());
    ///
    /// x.bind("x", 3);
    /// assert_eq!(x.evaluate().unwrap(), Value::Integer(3));
    /// ```
    pub fn bind(&mut self, name: &str, value: impl Into<Value>) {
        self.bind_value(name, value.into());
    }

    fn bind_value(&mut self, name: &str, value: Value) {
        match self {
            Self::Leaf(Operand::Variable { name: leaf_name,
                                           binding, }) if leaf_name == name => {
                *binding = Some(value);
            },
            Self::Leaf(_) => {},
            Self::Node { children, .. } => {
                for child in children {
                    child.bind_value(name, value);
                }
            },
        }
    }
    /// Exports the fully-resolved operand values as a plain value tree.
    ///
    /// Random constants are resolved (through the shared cache) and recorded
    /// as constants; variables keep their name alongside their bound value.
    /// The frozen form serializes, so the persistence collaborator can store
    /// it between requests instead of re-running construction.
    ///
    /// # Errors
    /// Returns `EvalError::UnboundVariable` if any variable in the tree has
    /// no bound value.
    ///
    /// # Example
    /// ```
    /// use mathexpr::expression::core::Expression;
    ///
    /// let expr = Expression::random_integer(1..=6).unwrap();
    /// let frozen = expr.freeze().unwrap();
    /// let thawed = frozen.thaw().unwrap();
    ///
    /// assert_eq!(expr.text(), thawed.text());
    /// ```
    pub fn freeze(&self) -> EvalResult<FrozenExpression> {
        FrozenExpression::freeze(self)
    }
    /// Rebuilds an expression from a frozen value tree.
    ///
    /// # Errors
    /// Returns `BuildError::MalformedExpression` if the frozen tree (for
    /// example, one deserialized from storage) carries a wrong child count.
    pub fn thaw(frozen: FrozenExpression) -> Result<Self, BuildError> {
        frozen.thaw()
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}
