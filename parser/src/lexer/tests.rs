use std::sync::Arc;

use miden_diagnostics::CodeMap;
use pretty_assertions::assert_eq;

use super::{Lexer, LexicalError, Token};

fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    let codemap = Arc::new(CodeMap::new());
    let source_id = codemap.add("test", source.to_string());
    Lexer::new(source_id, source)
        .map(|result| result.map(|(_, token)| token))
        .collect()
}

fn expect_valid_tokenization(source: &str, expected: Vec<Token>) {
    assert_eq!(tokenize(source).unwrap(), expected);
}

// VALID TOKENIZATIONS
// ================================================================================================

#[test]
fn element_line() {
    let source = "R1 1 2 4.7k";
    let tokens = vec![
        Token::Ident("R1".to_string()),
        Token::Num(1.0),
        Token::Num(2.0),
        Token::Num(4700.0),
    ];
    expect_valid_tokenization(source, tokens);
}

#[test]
fn symbolic_marker() {
    let source = "C3 2 0 sym";
    let tokens = vec![
        Token::Ident("C3".to_string()),
        Token::Num(2.0),
        Token::Num(0.0),
        Token::Sym,
    ];
    expect_valid_tokenization(source, tokens);
}

#[test]
fn directives_and_newlines() {
    let source = ".out 2\n.end\n";
    let tokens = vec![
        Token::Out,
        Token::Num(2.0),
        Token::Newline,
        Token::End,
        Token::Newline,
    ];
    expect_valid_tokenization(source, tokens);
}

#[test]
fn comments_are_skipped() {
    let source = "* a comment line\nR1 1 0 ; trailing comment\n";
    let tokens = vec![
        Token::Newline,
        Token::Ident("R1".to_string()),
        Token::Num(1.0),
        Token::Num(0.0),
        Token::Newline,
    ];
    expect_valid_tokenization(source, tokens);
}

#[test]
fn engineering_suffixes() {
    let source = "1p 1n 1u 1m 1k 1meg 1g 1t";
    let tokens = vec![
        Token::Num(1e-12),
        Token::Num(1e-9),
        Token::Num(1e-6),
        Token::Num(1e-3),
        Token::Num(1e3),
        Token::Num(1e6),
        Token::Num(1e9),
        Token::Num(1e12),
    ];
    expect_valid_tokenization(source, tokens);
}

#[test]
fn scientific_notation() {
    let source = "1e3 -2.5e-2 .5";
    let tokens = vec![Token::Num(1000.0), Token::Num(-0.025), Token::Num(0.5)];
    expect_valid_tokenization(source, tokens);
}

// ERRORS
// ================================================================================================

#[test]
fn error_unexpected_character() {
    let result = tokenize("R1 1 2 @");
    assert!(matches!(result, Err(LexicalError::UnexpectedCharacter { found: '@', .. })));
}

#[test]
fn error_bad_suffix() {
    let result = tokenize("R1 1 2 10x");
    assert!(matches!(result, Err(LexicalError::InvalidNumber { .. })));
}

#[test]
fn error_unknown_directive() {
    let result = tokenize(".bogus 1");
    assert!(matches!(result, Err(LexicalError::UnknownDirective { .. })));
}
