use linecalc::{
    evaluate_line,
    interpreter::{
        lexer::{tokenize, TokenKind},
        parser::{parse, Enclosing},
    },
    Context, CONTEXT_CAPACITY,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn tokenization_is_total(line in ".*") {
        let tokens = tokenize(&line);

        prop_assert!(tokens.len() >= 1);
        prop_assert_eq!(tokens[tokens.len() - 1].kind, TokenKind::End);

        let ends = tokens.iter()
                         .filter(|token| token.kind == TokenKind::End)
                         .count();
        prop_assert_eq!(ends, 1);
    }

    // Every non-whitespace codepoint of the input lands in exactly one
    // token's text, in order; nothing is dropped or duplicated.
    #[test]
    fn tokens_cover_all_non_whitespace(line in ".*") {
        let tokens = tokenize(&line);

        let covered: String = tokens.iter().map(|token| token.text).collect();
        let expected: String = line.chars()
                                   .filter(|c| !matches!(c, ' ' | '\t' | '\n'))
                                   .collect();

        prop_assert_eq!(covered, expected);
    }

    #[test]
    fn parse_span_never_exceeds_the_token_count(line in ".*") {
        let tokens = tokenize(&line);
        let tree = parse(&tokens, 0, Enclosing::None);

        prop_assert!(tree.consumed <= tokens.len());
    }

    #[test]
    fn evaluation_never_panics(line in ".*") {
        let mut context = Context::new(CONTEXT_CAPACITY);
        let (_, result) = evaluate_line(&line, &mut context);

        // An invalid result carries no meaningful value; a valid one is
        // never NaN.
        if result.valid {
            prop_assert!(!result.value.is_nan());
        }
    }
}
