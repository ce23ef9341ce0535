//! # linecalc
//!
//! linecalc is a line-oriented calculator engine. Every line of a document is
//! an independent arithmetic expression, tokenized and parsed into a tree and
//! evaluated against a variable context that persists across lines; the
//! engine additionally maintains the `prev` and `sum` variables between
//! lines. Nothing here ever fails hard: malformed input flows through as
//! invalid tokens, invalid tree nodes, and finally invalid evaluations.

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
#![allow(clippy::missing_panics_doc)]

use crate::interpreter::{
    lexer::{tokenize, TokenList},
    parser::{parse, Enclosing},
};

/// Defines the structure of parsed lines.
///
/// This module declares the expression tree `Node` and the operator
/// `Precedence` classification the parser's rotation is driven by.
pub mod ast;
/// Orchestrates the entire process of line evaluation.
///
/// This module ties together the lexer, parser, evaluator, variable context,
/// and builtin function table that turn one line of text into a number.
pub mod interpreter;

pub use crate::interpreter::{builtins::BUILTIN_NAMES, context::Context, evaluator::Evaluation};

/// How many variables one document's context can hold.
pub const CONTEXT_CAPACITY: usize = 100;

/// The variable holding the most recent valid line's value.
const PREV: &str = "prev";
/// The variable holding the running total of valid line values.
const SUM: &str = "sum";

/// Evaluates one line against a shared context.
///
/// Returns the line's token sequence alongside the result, so callers that
/// render or inspect lines (highlighting, the `sum` reference query) do not
/// tokenize twice. The engine-maintained variables are the document layer's
/// concern; this function only reads and writes what the line itself says.
///
/// ## Example
/// ```
/// use linecalc::{evaluate_line, Context, CONTEXT_CAPACITY};
///
/// let mut context = Context::new(CONTEXT_CAPACITY);
///
/// let (_, first) = evaluate_line("x: 10", &mut context);
/// let (_, second) = evaluate_line("x + 1", &mut context);
///
/// assert!(first.valid);
/// assert_eq!(second.value, 11.0);
/// ```
pub fn evaluate_line<'a>(line: &'a str, context: &mut Context) -> (TokenList<'a>, Evaluation) {
    let tokens = tokenize(line);
    let tree = parse(&tokens, 0, Enclosing::None);
    let result = interpreter::evaluator::evaluate(&tree, context);

    (tokens, result)
}

/// Evaluates a whole document, line by line, against one fresh context.
///
/// Maintains the engine variables between lines:
/// - `prev` is the value of the most recent valid line.
/// - `sum` accumulates valid line values; a valid line that references `sum`
///   reads the current total, then resets the accumulator to zero without
///   adding its own value.
///
/// Invalid lines leave both variables untouched.
///
/// ## Example
/// ```
/// use linecalc::evaluate_document;
///
/// let results = evaluate_document("x: 10\nx + 1");
///
/// assert_eq!(results[1].value, 11.0);
/// ```
#[must_use]
pub fn evaluate_document(source: &str) -> Vec<Evaluation> {
    let mut context = Context::new(CONTEXT_CAPACITY);
    context.set(SUM, 0.0);

    source.lines()
          .map(|line| {
              let (tokens, result) = evaluate_line(line, &mut context);

              if result.valid {
                  context.set(PREV, result.value);

                  if tokens.references_identifier(SUM) {
                      context.set(SUM, 0.0);
                  } else {
                      let total = context.get(SUM).unwrap_or(0.0);
                      context.set(SUM, total + result.value);
                  }
              }

              result
          })
          .collect()
}
