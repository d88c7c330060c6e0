//! Semantic analysis of a parsed netlist.
//!
//! The netlist language is flat, so there is not much to analyze: element
//! names must be unique, and exactly one output node must be designated.
//! Structural problems (an undriven circuit, an out-of-range output node) can
//! only be detected once the nullor expansion is known, and are reported by
//! the circuit builder instead.

use std::collections::BTreeMap;

use miden_diagnostics::{
    Diagnostic, DiagnosticsHandler, Severity, SourceSpan, Spanned, ToDiagnostic,
};

use crate::ast;

/// Errors produced by semantic analysis of a netlist.
#[derive(Debug, thiserror::Error)]
pub enum SemanticAnalysisError {
    #[error("element '{name}' is declared more than once")]
    DuplicateName { name: String, span: SourceSpan, prev: SourceSpan },
    #[error("the netlist does not designate an output node with .out")]
    MissingOutput,
    #[error("the output node is designated more than once")]
    DuplicateOutput { span: SourceSpan },
    #[error("the output node cannot be the ground node")]
    OutputIsGround { span: SourceSpan },
}
impl ToDiagnostic for SemanticAnalysisError {
    fn to_diagnostic(self) -> Diagnostic {
        Diagnostic::error().with_message(self.to_string())
    }
}

/// Validates a parsed netlist, emitting warnings for suspicious but legal
/// constructs.
pub(crate) fn analyze(
    diagnostics: &DiagnosticsHandler,
    netlist: &ast::Netlist,
) -> Result<(), SemanticAnalysisError> {
    let mut names = BTreeMap::new();
    for element in netlist.elements.iter() {
        if let Some(prev) = names.insert(element.name.as_str().to_string(), element.name.span) {
            return Err(SemanticAnalysisError::DuplicateName {
                name: element.name.as_str().to_string(),
                span: element.name.span,
                prev,
            });
        }
        if element.pos == element.neg {
            diagnostics
                .diagnostic(Severity::Warning)
                .with_message(format!("element '{}' shorts its own terminals", element.name))
                .with_primary_label(element.span, "both terminals are the same node")
                .emit();
        }
    }

    match netlist.outputs.as_slice() {
        [] => Err(SemanticAnalysisError::MissingOutput),
        [output] => {
            if **output == 0 {
                Err(SemanticAnalysisError::OutputIsGround { span: output.span() })
            } else {
                Ok(())
            }
        }
        [_, duplicate, ..] => {
            Err(SemanticAnalysisError::DuplicateOutput { span: duplicate.span() })
        }
    }
}
