/// The static table of builtin math functions.
///
/// Declares every callable name, its fixed arity, and its implementation, and
/// performs the name-then-arity dispatch the evaluator delegates call nodes
/// to.
pub mod builtins;
/// The variable store shared across a document's lines.
///
/// A capacity-bounded, linearly scanned association of names to values,
/// including the engine-maintained `prev` and `sum` entries.
pub mod context;
/// Turns expression trees into numbers.
///
/// Walks the parsed tree against a context, parsing number spans lazily,
/// resolving variables and builtins, and collapsing every failure mode into
/// the `Evaluation` result's `valid` flag.
pub mod evaluator;
/// Splits a line of text into tokens.
///
/// A total, never-failing tokenizer built on a generated scanner; malformed
/// words become `Invalid` tokens and every list ends with an `End` sentinel.
pub mod lexer;
/// Builds expression trees from token sequences.
///
/// One recursive function that threads its position through per-subtree token
/// counts and re-associates operator chains by local left-rotation.
pub mod parser;
