//! Tokenization of netlist source text.

#[cfg(test)]
mod tests;

use core::fmt;

use miden_diagnostics::{
    ByteIndex, Diagnostic, SourceId, SourceIndex, SourceSpan, ToDiagnostic,
};

/// Errors that may occur during lexing of the source.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexicalError {
    #[error("encountered unexpected character '{found}'")]
    UnexpectedCharacter { start: SourceIndex, found: char },
    #[error("invalid numeric literal")]
    InvalidNumber { span: SourceSpan },
    #[error("unknown directive")]
    UnknownDirective { span: SourceSpan },
}
impl ToDiagnostic for LexicalError {
    fn to_diagnostic(self) -> Diagnostic {
        Diagnostic::error().with_message(self.to_string())
    }
}

/// The token type produced by [Lexer].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An element name, e.g. `R1`
    Ident(String),
    /// A numeric literal, with any engineering suffix already applied
    Num(f64),
    /// The `sym` marker, forcing an element to be treated symbolically
    Sym,
    /// The `.out` directive keyword
    Out,
    /// The `.end` directive keyword
    End,
    /// The end of a statement line
    Newline,
}
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ident(name) => write!(f, "{name}"),
            Self::Num(value) => write!(f, "{value}"),
            Self::Sym => write!(f, "sym"),
            Self::Out => write!(f, ".out"),
            Self::End => write!(f, ".end"),
            Self::Newline => write!(f, "end of line"),
        }
    }
}

/// The lexer for the netlist language.
///
/// The language is line-oriented, so unlike most lexers this one emits a
/// [Token::Newline] for every line break; the parser uses them as statement
/// separators. Comments (`*` or `;` to end of line) and horizontal whitespace
/// are skipped.
pub struct Lexer<'a> {
    source_id: SourceId,
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source_id: SourceId, source: &'a str) -> Self {
        Self { source_id, source, pos: 0 }
    }

    fn span(&self, start: usize, end: usize) -> SourceSpan {
        SourceSpan::new(
            SourceIndex::new(self.source_id, ByteIndex(start as u32)),
            SourceIndex::new(self.source_id, ByteIndex(end as u32)),
        )
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes characters while `predicate` holds, returning the consumed
    /// slice.
    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.bump();
        }
        &self.source[start..self.pos]
    }

    fn lex_ident(&mut self) -> (usize, Token) {
        let start = self.pos;
        let ident = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let token = if ident.eq_ignore_ascii_case("sym") {
            Token::Sym
        } else {
            Token::Ident(ident.to_string())
        };
        (start, token)
    }

    fn lex_directive(&mut self) -> Result<(usize, Token), LexicalError> {
        let start = self.pos;
        self.bump();
        let word = self.take_while(|c| c.is_ascii_alphanumeric());
        if word.eq_ignore_ascii_case("out") {
            Ok((start, Token::Out))
        } else if word.eq_ignore_ascii_case("end") {
            Ok((start, Token::End))
        } else {
            Err(LexicalError::UnknownDirective { span: self.span(start, self.pos) })
        }
    }

    fn lex_number(&mut self) -> Result<(usize, Token), LexicalError> {
        let start = self.pos;
        // Leading sign, digits, decimal point, exponent or suffix letters; a
        // sign is only part of the literal directly after an exponent marker.
        if matches!(self.peek(), Some('+') | Some('-')) {
            self.bump();
        }
        let mut prev = '\0';
        while let Some(c) = self.peek() {
            let take = c.is_ascii_alphanumeric()
                || c == '.'
                || ((c == '+' || c == '-') && matches!(prev, 'e' | 'E'));
            if !take {
                break;
            }
            prev = c;
            self.bump();
        }
        let lexeme = &self.source[start..self.pos];
        match parse_value(lexeme) {
            Some(value) => Ok((start, Token::Num(value))),
            None => Err(LexicalError::InvalidNumber { span: self.span(start, self.pos) }),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<(SourceSpan, Token), LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.pos;
            let c = self.peek()?;
            let result = match c {
                ' ' | '\t' | '\r' => {
                    self.bump();
                    continue;
                }
                '\n' => {
                    self.bump();
                    Ok((start, Token::Newline))
                }
                '*' | ';' => {
                    self.take_while(|c| c != '\n');
                    continue;
                }
                '.' if self.source[self.pos + 1..].starts_with(|c: char| c.is_ascii_alphabetic()) => {
                    self.lex_directive()
                }
                c if c.is_ascii_alphabetic() || c == '_' => Ok(self.lex_ident()),
                c if c.is_ascii_digit() || c == '.' || c == '+' || c == '-' => self.lex_number(),
                c => {
                    let index = SourceIndex::new(self.source_id, ByteIndex(start as u32));
                    self.bump();
                    Err(LexicalError::UnexpectedCharacter { start: index, found: c })
                }
            };
            return Some(result.map(|(start, token)| (self.span(start, self.pos), token)));
        }
    }
}

/// Parses a numeric literal, honoring the usual engineering suffixes
/// (`p`, `n`, `u`, `m`, `k`, `meg`, `g`, `t`, case-insensitive).
fn parse_value(lexeme: &str) -> Option<f64> {
    if let Ok(value) = lexeme.parse::<f64>() {
        return Some(value);
    }
    // Not a plain float: split off a trailing alphabetic suffix. The split
    // point is the first alphabetic character, which is correct here because a
    // valid exponent would have parsed above.
    let split = lexeme.find(|c: char| c.is_ascii_alphabetic())?;
    let (digits, suffix) = lexeme.split_at(split);
    let base = digits.parse::<f64>().ok()?;
    let multiplier = match suffix.to_ascii_lowercase().as_str() {
        "p" => 1e-12,
        "n" => 1e-9,
        "u" => 1e-6,
        "m" => 1e-3,
        "k" => 1e3,
        "meg" => 1e6,
        "g" => 1e9,
        "t" => 1e12,
        _ => return None,
    };
    Some(base * multiplier)
}
