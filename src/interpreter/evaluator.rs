use crate::{
    ast::Node,
    interpreter::{
        builtins,
        context::Context,
        lexer::{Operator, TokenKind},
    },
};

/// The outcome of evaluating one expression tree.
///
/// There is no error channel: anything that cannot produce a number, from a
/// malformed token to a division by zero, collapses into `valid == false`,
/// and the carried `value` of an invalid evaluation is meaningless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// The computed value. Only meaningful when `valid` is `true`.
    pub value: f64,
    /// Whether the expression produced a usable number.
    pub valid: bool,
}

impl Evaluation {
    /// The failed evaluation.
    pub const INVALID: Self = Self { value: 0.0,
                                     valid: false, };

    /// Wraps a computed value, folding `NaN` into the invalid evaluation.
    ///
    /// This is the single guard against `NaN` escaping the engine; infinite
    /// values pass through, only the not-a-number case is rejected.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value.is_nan() {
            Self::INVALID
        } else {
            Self { value, valid: true }
        }
    }
}

/// Evaluates an expression tree against the variable context.
///
/// Number spans are parsed to floats here, not in the lexer; a tree marked
/// invalid by the parser short-circuits without touching the context.
pub fn evaluate(node: &Node<'_>, context: &mut Context) -> Evaluation {
    if node.invalid {
        return Evaluation::INVALID;
    }

    match node.token.kind {
        TokenKind::Number => evaluate_number(node.token.text),
        TokenKind::Identifier => {
            if node.left.is_some() {
                evaluate_call(node, context)
            } else {
                context.get(node.token.text).map_or(Evaluation::INVALID, Evaluation::of)
            }
        },
        TokenKind::Operator(operator) => evaluate_operator(node, operator, context),
        _ => Evaluation::INVALID,
    }
}

/// Parses a numeric literal span, stripping `_` grouping separators.
fn evaluate_number(text: &str) -> Evaluation {
    let digits: String = text.chars().filter(|&c| c != '_').collect();

    digits.parse::<f64>().map_or(Evaluation::INVALID, Evaluation::of)
}

fn evaluate_operator(node: &Node<'_>, operator: Operator, context: &mut Context) -> Evaluation {
    match operator {
        Operator::Assign => evaluate_assignment(node, context),
        Operator::Factorial => {
            let operand = match &node.left {
                Some(operand) => evaluate(operand, context),
                None => return Evaluation::INVALID,
            };

            if operand.valid && operand.value >= 0.0 {
                Evaluation::of(factorial(operand.value))
            } else {
                Evaluation::INVALID
            }
        },
        Operator::Sub if node.left.is_none() => {
            let operand = match &node.right {
                Some(operand) => evaluate(operand, context),
                None => return Evaluation::INVALID,
            };

            if operand.valid {
                Evaluation::of(-operand.value)
            } else {
                Evaluation::INVALID
            }
        },
        _ => evaluate_binary(node, operator, context),
    }
}

/// Evaluates a binary arithmetic node.
///
/// Both operands are evaluated even when the left one fails, so a line like
/// `1/0 + (x: 3)` still performs its assignment; only the combination step
/// requires both results to be valid.
fn evaluate_binary(node: &Node<'_>, operator: Operator, context: &mut Context) -> Evaluation {
    let (Some(left), Some(right)) = (&node.left, &node.right) else {
        return Evaluation::INVALID;
    };

    let lhs = evaluate(left, context);
    let rhs = evaluate(right, context);

    if !(lhs.valid && rhs.valid) {
        return Evaluation::INVALID;
    }

    match operator {
        Operator::Add => Evaluation::of(lhs.value + rhs.value),
        Operator::Sub => Evaluation::of(lhs.value - rhs.value),
        Operator::Mul => Evaluation::of(lhs.value * rhs.value),
        Operator::Div => {
            if rhs.value == 0.0 {
                Evaluation::INVALID
            } else {
                Evaluation::of(lhs.value / rhs.value)
            }
        },
        Operator::Pow => Evaluation::of(lhs.value.powf(rhs.value)),
        Operator::Assign | Operator::Factorial => Evaluation::INVALID,
    }
}

/// Evaluates `name: expression`.
///
/// The left child must be a bare identifier leaf; any other shape, such as
/// `3: 4` or `f(x): 1`, is invalid. The binding only happens when the right
/// side evaluates cleanly, and the line's value is the assigned value.
fn evaluate_assignment(node: &Node<'_>, context: &mut Context) -> Evaluation {
    let (Some(target), Some(value)) = (&node.left, &node.right) else {
        return Evaluation::INVALID;
    };

    // A parenthesized identifier keeps its token but spans three tokens, so
    // the span check rejects `(x): 4` along with every non-leaf shape.
    let bare_name = target.token.kind == TokenKind::Identifier
                    && target.consumed == 1
                    && target.left.is_none()
                    && target.right.is_none()
                    && !target.invalid;
    if !bare_name {
        return Evaluation::INVALID;
    }

    let result = evaluate(value, context);
    if result.valid {
        context.set(target.token.text, result.value);
    }

    result
}

/// Evaluates a function call node.
///
/// Walks the separator chain hanging off the call node's left edge,
/// evaluating arguments left to right and stopping at the first invalid one,
/// then dispatches to the builtin table by name and arity.
fn evaluate_call(node: &Node<'_>, context: &mut Context) -> Evaluation {
    let mut values = Vec::new();
    let mut cursor = node.left.as_deref();

    while let Some(current) = cursor {
        let argument = match (current.token.kind, current.left.as_deref(), current.right.as_deref())
        {
            (TokenKind::Separator, Some(argument), Some(rest)) => {
                cursor = Some(rest);
                argument
            },
            _ => {
                cursor = None;
                current
            },
        };

        let result = evaluate(argument, context);
        if !result.valid {
            return Evaluation::INVALID;
        }
        values.push(result.value);
    }

    builtins::dispatch(node.token.text, &values)
}

/// Integer factorial of `floor(value)`, as a float.
///
/// `0!` and `1!` are 1. The product loop stops as soon as it overflows to
/// infinity, so large operands terminate immediately instead of grinding
/// through the full count.
fn factorial(value: f64) -> f64 {
    let n = value.floor();
    let mut product = 1.0_f64;
    let mut k = 2.0_f64;

    while k <= n {
        product *= k;
        if !product.is_finite() {
            break;
        }
        k += 1.0;
    }

    product
}
