use crate::{
    expression::core::Expression,
    operator::{Associativity, Operator},
};

/// Which side of its parent a child expression sits on.
///
/// The single child of a prefix operator counts as `Right`: it sits to the
/// right of the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildPosition {
    /// The left child of a binary operator.
    Left,
    /// The right child of a binary operator, or the child of a prefix one.
    Right,
}

/// The precedence policy: Brackets, Orders, Division/Multiplication,
/// Addition/Subtraction.
///
/// A stateless, immutable lookup shared by the operator table and the
/// formatter. Every bracket-placement decision in the crate goes through
/// [`Bodmas::needs_brackets`]; the rule is implemented exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bodmas;

impl Bodmas {
    /// Returns the operator's precedence rank. A lower rank binds tighter.
    ///
    /// Unary negation ranks with addition: `-2^2` reads as `-(2^2)` and a
    /// negated sum renders as `-(a+b)`.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{bodmas::Bodmas, operator::Operator};
    ///
    /// let policy = Bodmas::default();
    /// assert!(policy.precedence_of(Operator::Power) < policy.precedence_of(Operator::Multiply));
    /// assert!(policy.precedence_of(Operator::Multiply) < policy.precedence_of(Operator::Add));
    /// ```
    #[must_use]
    pub const fn precedence_of(self, op: Operator) -> u8 {
        match op {
            Operator::Power => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Add | Operator::Subtract | Operator::Negate => 3,
        }
    }
    /// Decides whether a child needs brackets under the given parent.
    ///
    /// A child needs brackets if its top-level operator binds strictly
    /// looser than the parent, or equally tightly but on the side the
    /// parent's associativity forbids (`a-(b-c)` versus `a-b-c`). Leaf
    /// operands never receive brackets.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{
    ///     bodmas::{Bodmas, ChildPosition},
    ///     expression::core::Expression,
    ///     operator::Operator,
    /// };
    ///
    /// let policy = Bodmas::default();
    /// let sum = Expression::binary(Operator::Add,
    ///                              Expression::constant(2),
    ///                              Expression::constant(3)).unwrap();
    ///
    /// // (2+3)*4 keeps its brackets, a bare 4 never gets any.
    /// assert!(policy.needs_brackets(Operator::Multiply, &sum, ChildPosition::Left));
    /// assert!(!policy.needs_brackets(Operator::Multiply, &Expression::constant(4), ChildPosition::Right));
    /// ```
    #[must_use]
    pub fn needs_brackets(self,
                          parent: Operator,
                          child: &Expression,
                          position: ChildPosition)
                          -> bool {
        let Some(child_op) = child.top_operator() else {
            return false;
        };

        let parent_rank = self.precedence_of(parent);
        let child_rank = self.precedence_of(child_op);

        if child_rank != parent_rank {
            return child_rank > parent_rank;
        }

        match parent.associativity() {
            Associativity::Left => matches!(position, ChildPosition::Right),
            Associativity::Right => matches!(position, ChildPosition::Left),
        }
    }
}
