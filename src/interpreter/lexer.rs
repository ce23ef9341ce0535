use logos::{FilterResult, Lexer, Logos};

use crate::ast::Precedence;

/// Raw lexemes recognized by the generated scanner.
///
/// These are internal to the lexer: `tokenize` wraps them into [`Token`]s,
/// folds scanner errors into [`TokenKind::Invalid`], and appends the final
/// [`TokenKind::End`] marker.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n]+")]
enum Lexeme {
    /// A run starting with a digit or `.`. The callback rejects runs with a
    /// second `.`, an alphabetic codepoint, or a trailing `.`; rejected runs
    /// absorb the rest of the word and surface as invalid tokens.
    #[regex(r"[0-9.][0-9A-Za-z_.]*", number)]
    Number,
    /// Variable or function names such as `x` or `sqrt`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    /// One-codepoint operators. `:` is assignment, `!` is the postfix
    /// factorial, `^` is exponentiation.
    #[token(":", |_| Operator::Assign)]
    #[token("+", |_| Operator::Add)]
    #[token("-", |_| Operator::Sub)]
    #[token("*", |_| Operator::Mul)]
    #[token("/", |_| Operator::Div)]
    #[token("^", |_| Operator::Pow)]
    #[token("!", |_| Operator::Factorial)]
    Operator(Operator),
    /// `(` or `)`.
    #[token("(", |_| Paren::Open)]
    #[token(")", |_| Paren::Close)]
    Parenthesis(Paren),
    /// `,`, the argument delimiter inside function calls.
    #[token(",")]
    Separator,
    /// Any codepoint no other rule starts with, absorbing the rest of the
    /// word up to the next whitespace.
    #[regex(r"[^ \t\n0-9A-Za-z_+\-*/^!:(),.]", junk)]
    Junk,
}

/// Validates a scanned number run.
///
/// A run is well formed when it contains at most one `.`, no alphabetic
/// codepoints, and does not end in `.` (which also rejects a bare `.`).
/// Underscores are allowed anywhere; they are grouping separators the
/// evaluator strips before parsing the value. A malformed run swallows the
/// rest of the word, so `1.2.3+4` becomes a single invalid token.
fn number(lexer: &mut Lexer<Lexeme>) -> FilterResult<(), ()> {
    let slice = lexer.slice();
    let decimals = slice.chars().filter(|&c| c == '.').count();
    let alphabetic = slice.chars().any(|c| c.is_ascii_alphabetic());

    if decimals > 1 || alphabetic || slice.ends_with('.') {
        absorb_word(lexer);
        FilterResult::Error(())
    } else {
        FilterResult::Emit(())
    }
}

fn junk(lexer: &mut Lexer<Lexeme>) {
    absorb_word(lexer);
}

/// Extends the current lexeme over every codepoint up to the next whitespace.
fn absorb_word(lexer: &mut Lexer<Lexeme>) {
    let rest = lexer.remainder();
    let trailing = rest.find([' ', '\t', '\n']).unwrap_or(rest.len());
    lexer.bump(trailing);
}

/// A one-codepoint operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Assignment (`:`)
    Assign,
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`), also the prefix negation
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Postfix factorial (`!`)
    Factorial,
}

impl Operator {
    /// Rotation class of this operator when it binds two operands.
    ///
    /// `!` never binds as a binary operator, so it has no class; a `!` in
    /// binary position fails the parser's termination check instead.
    #[must_use]
    pub const fn precedence(self) -> Option<Precedence> {
        match self {
            Self::Assign => Some(Precedence::Assignment),
            Self::Add => Some(Precedence::Addition),
            Self::Sub => Some(Precedence::Subtraction),
            Self::Mul => Some(Precedence::Multiplication),
            Self::Div => Some(Precedence::Division),
            Self::Pow => Some(Precedence::Exponentiation),
            Self::Factorial => None,
        }
    }
}

/// Opening or closing parenthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paren {
    /// `(`
    Open,
    /// `)`
    Close,
}

/// Classification of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Numeric literal text; parsed into a float lazily, by the evaluator.
    Number,
    /// Variable or function name.
    Identifier,
    /// One of the one-codepoint operators.
    Operator(Operator),
    /// `(` or `)`.
    Parenthesis(Paren),
    /// `,` between function call arguments.
    Separator,
    /// End of input. Every token list ends with exactly one of these.
    End,
    /// A lexeme no rule accepts (malformed number, unknown symbol).
    Invalid,
}

/// One lexical token: a classification plus the text it spans.
///
/// The text borrows from the original line; nothing is copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

static END: Token<'static> = Token { kind: TokenKind::End,
                                     text: "", };

/// The ordered token sequence of one line.
///
/// Indexing past the end yields a persistent `End` sentinel rather than
/// panicking, so parser lookahead never needs bounds checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenList<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> TokenList<'a> {
    /// Number of tokens, including the trailing `End`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always `false`: `tokenize` terminates every list with `End`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'a>> {
        self.tokens.iter()
    }

    /// Whether any identifier token in this line spells `name` exactly.
    ///
    /// This is the query the editor uses to decide, for example, whether a
    /// line reads the running `sum` variable.
    #[must_use]
    pub fn references_identifier(&self, name: &str) -> bool {
        self.tokens
            .iter()
            .any(|token| token.kind == TokenKind::Identifier && token.text == name)
    }
}

impl<'a> std::ops::Index<usize> for TokenList<'a> {
    type Output = Token<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        self.tokens.get(index).unwrap_or(&END)
    }
}

/// Splits one line of text into tokens.
///
/// Total and deterministic: every input produces a token list terminated by
/// a single `End` token, and malformed lexemes become `Invalid` tokens
/// rather than errors.
///
/// ## Example
/// ```
/// use linecalc::interpreter::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("1 + 23");
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[0].kind, TokenKind::Number);
/// assert_eq!(tokens[2].text, "23");
/// assert_eq!(tokens[3].kind, TokenKind::End);
/// ```
#[must_use]
pub fn tokenize(line: &str) -> TokenList<'_> {
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(line);

    while let Some(lexeme) = lexer.next() {
        let kind = match lexeme {
            Ok(Lexeme::Number) => TokenKind::Number,
            Ok(Lexeme::Identifier) => TokenKind::Identifier,
            Ok(Lexeme::Operator(operator)) => TokenKind::Operator(operator),
            Ok(Lexeme::Parenthesis(paren)) => TokenKind::Parenthesis(paren),
            Ok(Lexeme::Separator) => TokenKind::Separator,
            Ok(Lexeme::Junk) | Err(()) => TokenKind::Invalid,
        };
        tokens.push(Token { kind,
                            text: &line[lexer.span()], });
    }

    tokens.push(Token { kind: TokenKind::End,
                        text: &line[line.len()..], });

    TokenList { tokens }
}
