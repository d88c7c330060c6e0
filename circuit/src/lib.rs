//! The dual-graph intermediate representation of a circuit.
//!
//! Every element of a netlist expands into one or more weighted edges over two
//! graphs sharing the same edge set: the current graph and the voltage graph.
//! Ordinary elements produce a single edge with identical endpoints in both
//! graphs; sources, controlled sources and op-amps expand into their nullor
//! models, which split the two views apart and pin parts of the tree search
//! with forced edges.

pub mod ir;
pub mod passes;
#[cfg(test)]
mod tests;

use miden_diagnostics::{Diagnostic, ToDiagnostic};

pub use self::ir::*;

/// Errors describing a structurally unusable circuit.
#[derive(Debug, thiserror::Error)]
pub enum CircuitError {
    #[error("the circuit is not driven by any independent source")]
    MissingReference,
    #[error("the circuit does not designate an output node")]
    MissingOutput,
    #[error("output node {0} is not a node of the circuit")]
    OutputOutOfRange(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] sana_parser::ParseError),
    #[error(transparent)]
    SemanticAnalysis(#[from] sana_parser::SemanticAnalysisError),
    #[error(transparent)]
    InvalidCircuit(#[from] CircuitError),
    #[error("compilation failed, see diagnostics for more information")]
    Failed,
}

impl ToDiagnostic for CompileError {
    fn to_diagnostic(self) -> Diagnostic {
        match self {
            Self::Parse(err) => err.to_diagnostic(),
            Self::SemanticAnalysis(err) => err.to_diagnostic(),
            Self::InvalidCircuit(err) => Diagnostic::error().with_message(err.to_string()),
            Self::Failed => Diagnostic::error().with_message(self.to_string()),
        }
    }
}
