//! The statement-level parser for the netlist language.

#[cfg(test)]
mod tests;

use miden_diagnostics::{Diagnostic, SourceSpan, ToDiagnostic};

use crate::{
    ast::{self, Element, ElementKind, Ident, MAX_NODE},
    lexer::{Lexer, LexicalError, Token},
    sema::SemanticAnalysisError,
};

/// Errors that may be produced when parsing a netlist.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexer(#[from] LexicalError),
    #[error("unexpected token: expected {expected}, found '{found}'")]
    UnexpectedToken { span: SourceSpan, expected: String, found: String },
    #[error("unexpected end of line: expected {expected}")]
    UnexpectedEol { span: SourceSpan, expected: String },
    #[error("'{name}' does not name a known element kind")]
    UnknownElement { span: SourceSpan, name: String },
    #[error("node numbers must be integers in [0, {limit})", limit = MAX_NODE)]
    InvalidNode { span: SourceSpan },
    #[error(transparent)]
    SemanticAnalysis(#[from] SemanticAnalysisError),
}
impl ToDiagnostic for ParseError {
    fn to_diagnostic(self) -> Diagnostic {
        match self {
            Self::Lexer(err) => err.to_diagnostic(),
            Self::SemanticAnalysis(err) => err.to_diagnostic(),
            err => Diagnostic::error().with_message(err.to_string()),
        }
    }
}

/// Parses the token stream of a netlist into an [ast::Netlist].
pub(crate) fn parse_netlist(lexer: Lexer<'_>) -> Result<ast::Netlist, ParseError> {
    let mut tokens = Vec::new();
    for result in lexer {
        tokens.push(result?);
    }
    let span = tokens
        .first()
        .zip(tokens.last())
        .map(|((first, _), (last, _))| SourceSpan::new(first.start(), last.end()))
        .unwrap_or(SourceSpan::UNKNOWN);

    let mut netlist = ast::Netlist { span, elements: Vec::new(), outputs: Vec::new() };
    let mut lines = tokens.split(|(_, token)| *token == Token::Newline);
    for line in &mut lines {
        if line.is_empty() {
            continue;
        }
        if !parse_statement(line, &mut netlist)? {
            break;
        }
    }
    Ok(netlist)
}

/// Parses a single statement line. Returns `false` when the statement was the
/// `.end` terminator.
fn parse_statement(
    line: &[(SourceSpan, Token)],
    netlist: &mut ast::Netlist,
) -> Result<bool, ParseError> {
    let (span, token) = &line[0];
    match token {
        Token::End => Ok(false),
        Token::Out => {
            let node = expect_node(&line[1..], *span)?;
            expect_eol(&line[2..])?;
            netlist.outputs.push(miden_diagnostics::Span::new(node.0, node.1));
            Ok(true)
        }
        Token::Ident(name) => {
            let line_span = line
                .last()
                .map(|(last, _)| SourceSpan::new(span.start(), last.end()))
                .unwrap_or(*span);
            let element = parse_element(line_span, *span, name, &line[1..])?;
            netlist.elements.push(element);
            Ok(true)
        }
        token => Err(ParseError::UnexpectedToken {
            span: *span,
            expected: "an element or directive".to_string(),
            found: token.to_string(),
        }),
    }
}

fn parse_element(
    span: SourceSpan,
    name_span: SourceSpan,
    name: &str,
    rest: &[(SourceSpan, Token)],
) -> Result<Element, ParseError> {
    let kind = ElementKind::of(name)
        .ok_or_else(|| ParseError::UnknownElement { span: name_span, name: name.to_string() })?;

    let mut cursor = rest;
    let mut next_node = |expected: &str| -> Result<u32, ParseError> {
        let (_, node) = expect_node(cursor, span).map_err(|err| match err {
            ParseError::UnexpectedEol { span, .. } => {
                ParseError::UnexpectedEol { span, expected: expected.to_string() }
            }
            err => err,
        })?;
        cursor = &cursor[1..];
        Ok(node)
    };

    let pos = next_node("the positive terminal")?;
    let neg = next_node("the negative terminal")?;
    let ctrl = if kind.is_controlled() {
        let cpos = next_node("the positive control terminal")?;
        let cneg = next_node("the negative control terminal")?;
        Some((cpos, cneg))
    } else {
        None
    };

    // An explicit value makes the element numeric unless `sym` follows; with
    // no value the element is symbolic with a unit weight.
    let mut value = 1.0;
    let mut sym = true;
    if kind.has_value() {
        if let Some(((_, Token::Num(num)), rest)) = cursor.split_first() {
            value = *num;
            sym = false;
            cursor = rest;
        }
        if let Some(((_, Token::Sym), rest)) = cursor.split_first() {
            sym = true;
            cursor = rest;
        }
    }
    expect_eol(cursor)?;

    Ok(Element {
        span,
        name: Ident::new(name_span, name),
        kind,
        pos,
        neg,
        ctrl,
        value,
        sym,
    })
}

fn expect_node(
    tokens: &[(SourceSpan, Token)],
    statement: SourceSpan,
) -> Result<(SourceSpan, u32), ParseError> {
    match tokens.first() {
        Some((span, Token::Num(num))) => {
            if num.fract() != 0.0 || *num < 0.0 || *num >= MAX_NODE as f64 {
                return Err(ParseError::InvalidNode { span: *span });
            }
            Ok((*span, *num as u32))
        }
        Some((span, token)) => Err(ParseError::UnexpectedToken {
            span: *span,
            expected: "a node number".to_string(),
            found: token.to_string(),
        }),
        None => Err(ParseError::UnexpectedEol {
            span: statement,
            expected: "a node number".to_string(),
        }),
    }
}

fn expect_eol(tokens: &[(SourceSpan, Token)]) -> Result<(), ParseError> {
    match tokens.first() {
        None => Ok(()),
        Some((span, token)) => Err(ParseError::UnexpectedToken {
            span: *span,
            expected: "end of line".to_string(),
            found: token.to_string(),
        }),
    }
}
