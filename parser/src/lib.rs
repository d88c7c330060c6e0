//! Parsing for the sana netlist language.
//!
//! A netlist is a line-oriented description of a lumped linear circuit: one
//! element or directive per line, with `*` or `;` starting a comment. The
//! parser produces an [ast::Netlist] which is then lowered to a circuit by
//! downstream crates.

pub mod ast;
mod lexer;
mod parser;
mod sema;

pub use self::{
    lexer::{Lexer, LexicalError, Token},
    parser::ParseError,
    sema::SemanticAnalysisError,
};

use std::sync::Arc;

use miden_diagnostics::{CodeMap, DiagnosticsHandler};

/// Parses a netlist from `source` and runs semantic analysis over the result.
///
/// The source is registered with the given codemap so that spans attached to
/// the returned AST (and to any diagnostics) can be rendered against it.
pub fn parse(
    diagnostics: &DiagnosticsHandler,
    codemap: Arc<CodeMap>,
    source: &str,
) -> Result<ast::Netlist, ParseError> {
    let source_id = codemap.add("nofile", source.to_string());
    let lexer = Lexer::new(source_id, source);
    let netlist = parser::parse_netlist(lexer)?;
    sema::analyze(diagnostics, &netlist)?;
    Ok(netlist)
}
