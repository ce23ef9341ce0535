use crate::{
    ast::{Node, Precedence},
    interpreter::lexer::{Operator, Paren, Token, TokenKind, TokenList},
};

/// What may legally follow the expression currently being parsed.
///
/// The parser is one recursive function; instead of passing a growing set of
/// stop tokens it passes the syntactic context it was entered from, and the
/// final termination check derives the acceptable follower from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enclosing {
    /// Top level of a line; the expression must run to `End`.
    None,
    /// Inside `( ... )`; the expression must stop at `)`.
    Parenthesis,
    /// Inside a call's argument list; the expression must stop at `,` or `)`.
    FunctionArgs,
}

/// Parses the expression starting at token `from` into a tree.
///
/// ## Grammar
/// ```text
/// expression = primary [ "!" ] [ binary-operator expression ]
/// primary    = number
///            | identifier
///            | identifier "(" expression { "," expression } ")"
///            | "(" expression ")"
///            | "-" primary
/// ```
///
/// The function is total: it never aborts on malformed input, it marks the
/// offending node `invalid` and keeps going. Position is threaded through the
/// `consumed` counts of the returned subtrees rather than a cursor, so the
/// caller learns where the expression ended by adding `node.consumed` to
/// `from`.
///
/// Binary operators are parsed greedily right-first and re-associated by
/// [`rotate`], so the returned tree honours both binding strength and
/// left-to-right order at equal strength.
///
/// # Parameters
/// - `tokens` - The token sequence of the line.
/// - `from` - Index of the first token of this expression.
/// - `enclosing` - The syntactic context, which decides the terminator.
///
/// # Returns
/// The root of the expression's tree. `root.consumed` counts every token the
/// expression spans, including the parentheses of grouped subexpressions but
/// never the terminator itself.
#[must_use]
pub fn parse<'a>(tokens: &TokenList<'a>, from: usize, enclosing: Enclosing) -> Node<'a> {
    let mut node = parse_primary(tokens, from);

    let suffix = tokens[from + node.consumed].clone();
    if suffix.kind == TokenKind::Operator(Operator::Factorial) {
        let consumed = node.consumed + 1;
        let invalid = node.invalid;
        node = Node { token: suffix,
                      consumed,
                      left: Some(Box::new(node)),
                      right: None,
                      precedence: None,
                      invalid };
    }

    if let TokenKind::Operator(operator) = tokens[from + node.consumed].kind {
        if let Some(precedence) = operator.precedence() {
            let token = tokens[from + node.consumed].clone();
            let offset = node.consumed + 1;
            let right = parse(tokens, from + offset, enclosing);

            let consumed = offset + right.consumed;
            let invalid = node.invalid || right.invalid;
            let parent = Node { token,
                                consumed,
                                left: Some(Box::new(node)),
                                right: Some(Box::new(right)),
                                precedence: Some(precedence),
                                invalid };

            // The recursive right-hand parse already verified the terminator.
            return rotate(parent);
        }
    }

    let following = tokens[from + node.consumed].kind;
    let terminated = match enclosing {
        Enclosing::None => following == TokenKind::End,
        Enclosing::Parenthesis => following == TokenKind::Parenthesis(Paren::Close),
        Enclosing::FunctionArgs => {
            matches!(following,
                     TokenKind::Separator | TokenKind::Parenthesis(Paren::Close))
        },
    };

    if !terminated {
        node.invalid = true;
    }

    node
}

/// Parses one primary: a leaf, a call, a parenthesized expression, or a
/// prefix negation.
///
/// A parenthesized subtree keeps its root operator token but has its
/// `precedence` demoted to `None`, which shields it from rotation in both
/// directions; the grouping is thereby structural, not just visual.
fn parse_primary<'a>(tokens: &TokenList<'a>, from: usize) -> Node<'a> {
    let token = tokens[from].clone();

    match token.kind {
        TokenKind::Number => Node::leaf(token),
        TokenKind::Identifier => {
            if tokens[from + 1].kind == TokenKind::Parenthesis(Paren::Open) {
                parse_call(tokens, from)
            } else {
                Node::leaf(token)
            }
        },
        TokenKind::Parenthesis(Paren::Open) => {
            let mut inner = parse(tokens, from + 1, Enclosing::Parenthesis);

            if tokens[from + 1 + inner.consumed].kind == TokenKind::Parenthesis(Paren::Close) {
                inner.consumed += 2;
                inner.precedence = None;
                inner
            } else {
                Node::placeholder(token)
            }
        },
        TokenKind::Operator(Operator::Sub) => {
            let operand = parse_primary(tokens, from + 1);
            let consumed = operand.consumed + 1;
            let invalid = operand.invalid;
            Node { token,
                   consumed,
                   left: None,
                   right: Some(Box::new(operand)),
                   precedence: None,
                   invalid }
        },
        TokenKind::Invalid => Node::leaf(token),
        _ => Node::placeholder(token),
    }
}

/// Parses a function call starting at its name token.
///
/// The call node keeps the name token; its left child is the argument list,
/// chained right-leaning through the separator tokens:
///
/// ```text
/// f(a, b, c)        f
///                  /
///                 ,
///                / \
///               a   ,
///                  / \
///                 b   c
/// ```
///
/// An empty argument list parses but is marked invalid; no builtin takes
/// zero arguments, and reading `f()` as the variable `f` would silently
/// change its meaning.
fn parse_call<'a>(tokens: &TokenList<'a>, from: usize) -> Node<'a> {
    let name = tokens[from].clone();

    // Name and opening parenthesis.
    let mut consumed = 2;
    let mut invalid = false;
    let mut arguments = Vec::new();
    let mut separators = Vec::new();

    if tokens[from + 2].kind == TokenKind::Parenthesis(Paren::Close) {
        consumed = 3;
        invalid = true;
    } else {
        loop {
            let argument = parse(tokens, from + consumed, Enclosing::FunctionArgs);
            consumed += argument.consumed;
            invalid = invalid || argument.invalid;
            arguments.push(argument);

            match tokens[from + consumed].kind {
                TokenKind::Separator => {
                    separators.push(tokens[from + consumed].clone());
                    consumed += 1;
                },
                TokenKind::Parenthesis(Paren::Close) => {
                    consumed += 1;
                    break;
                },
                _ => {
                    invalid = true;
                    break;
                },
            }
        }
    }

    Node { token: name,
           consumed,
           left: chain_arguments(arguments, separators),
           right: None,
           precedence: None,
           invalid }
}

/// Folds parsed arguments into the right-leaning separator chain hanging off
/// a call node's left edge.
fn chain_arguments<'a>(arguments: Vec<Node<'a>>,
                       separators: Vec<Token<'a>>)
                       -> Option<Box<Node<'a>>> {
    let mut nodes = arguments.into_iter().rev();
    let mut chain = Box::new(nodes.next()?);

    for (argument, separator) in nodes.zip(separators.into_iter().rev()) {
        let consumed = argument.consumed + 1 + chain.consumed;
        let invalid = argument.invalid || chain.invalid;
        chain = Box::new(Node { token: separator,
                                consumed,
                                left: Some(Box::new(argument)),
                                right: Some(chain),
                                precedence: None,
                                invalid });
    }

    Some(chain)
}

/// Re-associates a freshly built binary node with its right child.
///
/// Right-first parsing makes every operator chain lean right; whenever the
/// right child binds no tighter than the new node, the tree is rotated left
/// so the earlier operator applies first:
///
/// ```text
///     -                    -
///    / \                  / \
///   8   -       =>       -   1
///      / \              / \
///     4   1            8   4
/// ```
///
/// The sunk node is rotated again against its new right child, so chains of
/// any length re-associate fully (`8 - 4 - 2 - 1` ends up as
/// `((8 - 4) - 2) - 1`). Nodes without a rotation class, in particular
/// parenthesized subtrees, stop the descent.
///
/// The new root inherits the whole span; the interior counts are recomputed
/// from the re-linked children, so every node keeps `consumed` equal to the
/// token count of its subtree.
fn rotate(mut node: Node<'_>) -> Node<'_> {
    let Some(precedence) = node.precedence else {
        return node;
    };

    let rotatable = node.right
                        .as_deref()
                        .and_then(|right| right.precedence)
                        .is_some_and(|right| right <= precedence);
    if !rotatable {
        return node;
    }

    let total = node.consumed;
    let damaged = node.invalid;

    let mut root = match node.right.take() {
        Some(right) => right,
        None => return node,
    };

    node.right = root.left.take();
    node.consumed = subtree_span(&node);
    root.left = Some(Box::new(rotate(node)));
    root.consumed = total;
    root.invalid = damaged;

    *root
}

/// Token count of a subtree, from its children's counts plus its own token.
fn subtree_span(node: &Node<'_>) -> usize {
    let left = node.left.as_deref().map_or(0, |child| child.consumed);
    let right = node.right.as_deref().map_or(0, |child| child.consumed);

    left + right + 1
}
