use serde::{Deserialize, Serialize};

use crate::{
    error::{eval_error::EvalResult, BuildError},
    expression::core::Expression,
    operand::Operand,
    operator::Operator,
    value::core::Value,
};

/// A fully-resolved expression as a plain value tree.
///
/// Every random constant has been replaced by its sampled value and every
/// variable carries its bound value alongside its name, so thawing never
/// resamples or rebinds anything. This is the form the persistence
/// collaborator stores between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrozenExpression {
    /// A resolved constant (fixed or sampled).
    Constant(Value),
    /// A variable, preserved by name so it still renders symbolically.
    Variable {
        /// The variable's name.
        name:  String,
        /// The value it was bound to when frozen.
        value: Value,
    },
    /// An operator over frozen children.
    Node {
        /// The operator at this node.
        op:       Operator,
        /// The frozen children, left to right.
        children: Vec<FrozenExpression>,
    },
}

impl FrozenExpression {
    pub(crate) fn freeze(expr: &Expression) -> EvalResult<Self> {
        match expr {
            Expression::Leaf(operand) => match operand {
                Operand::Constant(value) => Ok(Self::Constant(*value)),
                Operand::RandomConstant { .. } => Ok(Self::Constant(operand.value()?)),
                Operand::Variable { name, .. } => Ok(Self::Variable { name:  name.clone(),
                                                                      value: operand.value()?, }),
            },
            Expression::Node { op, children } => {
                let mut frozen = Vec::with_capacity(children.len());
                for child in children {
                    frozen.push(Self::freeze(child)?);
                }
                Ok(Self::Node { op:       *op,
                                children: frozen, })
            },
        }
    }
    /// Rebuilds an expression that evaluates and renders identically to the
    /// one that was frozen.
    ///
    /// # Errors
    /// Returns `BuildError::MalformedExpression` when a node's child count
    /// does not match its operator's arity; frozen trees straight from
    /// [`Expression::freeze`] always thaw cleanly, but deserialized storage
    /// is re-checked.
    ///
    /// # Example
    /// ```
    /// use mathexpr::expression::core::Expression;
    ///
    /// let expr = Expression::bound_variable("x", 5);
    /// let thawed = expr.freeze().unwrap().thaw().unwrap();
    ///
    /// assert_eq!(thawed.text(), "x");
    /// assert!(expr.value_eq(&thawed).unwrap());
    /// ```
    pub fn thaw(self) -> Result<Expression, BuildError> {
        match self {
            Self::Constant(value) => Ok(Expression::Leaf(Operand::Constant(value))),
            Self::Variable { name, value } => {
                Ok(Expression::Leaf(Operand::bound_variable(name, value)))
            },
            Self::Node { op, children } => {
                let children = children.into_iter()
                                       .map(Self::thaw)
                                       .collect::<Result<Vec<_>, _>>()?;
                Expression::node(op, children)
            },
        }
    }
}
