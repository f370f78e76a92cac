use crate::{
    bodmas::{Bodmas, ChildPosition},
    expression::core::Expression,
    operator::{Operator, RenderForm},
};

/// Renders an expression tree to precedence-correct text.
///
/// The walk is post-order: each child is rendered first, wrapped in
/// brackets when [`Bodmas::needs_brackets`] says so, then assembled using
/// the node operator's render form (infix symbol between two children,
/// prefixed sign before one).
///
/// # Example
/// ```
/// use mathexpr::{
///     bodmas::Bodmas,
///     expression::{core::Expression, format::render},
///     operator::Operator,
/// };
///
/// let product = Expression::binary(Operator::Multiply,
///                                  Expression::constant(2),
///                                  Expression::constant(3)).unwrap();
/// let expr = Expression::binary(Operator::Add, product, Expression::constant(4)).unwrap();
///
/// // No superfluous brackets: multiplication already binds tighter.
/// assert_eq!(render(&expr, Bodmas::default()), "2*3+4");
/// ```
#[must_use]
pub fn render(expr: &Expression, policy: Bodmas) -> String {
    match expr {
        Expression::Leaf(operand) => operand.text(),
        Expression::Node { op, children } => match op.render_form() {
            RenderForm::Prefix => {
                let child = render_child(&children[0], *op, ChildPosition::Right, policy);
                format!("{}{child}", op.symbol())
            },
            RenderForm::Infix => {
                let left = render_child(&children[0], *op, ChildPosition::Left, policy);
                let right = render_child(&children[1], *op, ChildPosition::Right, policy);
                format!("{left}{}{right}", op.symbol())
            },
        },
    }
}

fn render_child(child: &Expression,
                parent: Operator,
                position: ChildPosition,
                policy: Bodmas)
                -> String {
    let text = render(child, policy);

    if policy.needs_brackets(parent, child, position) {
        format!("({text})")
    } else {
        text
    }
}
