use crate::interpreter::lexer::{Token, TokenKind};

/// Rotation class of a binary operator node.
///
/// The ordering drives the parser's re-association rotation: a freshly built
/// node rotates into its right child whenever the child's class is less than
/// or equal to its own. Operators of equal mathematical binding strength get
/// adjacent but distinct levels (`Addition < Subtraction`, `Multiplication <
/// Division`), which lets the comparison skip rotations that would only
/// rebuild a numerically equivalent tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Assignment (`:`), the loosest binding.
    Assignment,
    /// Addition (`+`)
    Addition,
    /// Subtraction (`-`)
    Subtraction,
    /// Multiplication (`*`)
    Multiplication,
    /// Division (`/`)
    Division,
    /// Exponentiation (`^`), the tightest binding.
    Exponentiation,
}

/// A node of the expression tree built from one line.
///
/// Every node records how many tokens its whole subtree spans in `consumed`;
/// the parser threads its position through these counts instead of carrying a
/// cursor. Children are exclusively owned, so the rotation in the parser is a
/// pure ownership swap.
///
/// `precedence` is `Some` only while the node is a binary operator eligible
/// for rotation. Parenthesized subtrees, prefix and suffix nodes, call nodes,
/// and leaves carry `None` and are never rotated into.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'a> {
    /// The token this node was built from.
    pub token:      Token<'a>,
    /// Number of tokens the subtree rooted here spans.
    pub consumed:   usize,
    /// Left operand, argument chain of a call, or operand of a suffix.
    pub left:       Option<Box<Node<'a>>>,
    /// Right operand, or operand of a prefix.
    pub right:      Option<Box<Node<'a>>>,
    /// Rotation class, present only on rotatable binary operator nodes.
    pub precedence: Option<Precedence>,
    /// Whether anything in this subtree failed to parse.
    pub invalid:    bool,
}

impl<'a> Node<'a> {
    /// Creates a leaf spanning exactly the given token.
    ///
    /// The leaf is invalid when the token itself is, so lexical damage
    /// surfaces through the tree without a separate error channel.
    #[must_use]
    pub fn leaf(token: Token<'a>) -> Self {
        let invalid = token.kind == TokenKind::Invalid;
        Self { token,
               consumed: 1,
               left: None,
               right: None,
               precedence: None,
               invalid }
    }

    /// Creates an invalid zero-width node at the given token.
    ///
    /// Used where the grammar requires an operand and none is present; the
    /// surrounding expression keeps its shape and the damage is flagged.
    #[must_use]
    pub fn placeholder(token: Token<'a>) -> Self {
        Self { token,
               consumed: 0,
               left: None,
               right: None,
               precedence: None,
               invalid: true }
    }
}
