//! Symbolic transfer-function extraction.
//!
//! The analysis enumerates the common spanning trees of the two graph views
//! of a circuit. Every tree that contains all forced edges and the closing
//! edge of the running pass contributes one signed monomial; the sum of those
//! monomials is one polynomial in the complex frequency `s`. The pass seeded
//! with the YREF closing edge yields the denominator, the one seeded with
//! GREF the numerator.
//!
//! The approach is Grimbleby's common-tree formulation of symbolic network
//! analysis; the nullor expansion performed by the circuit builder is what
//! lets controlled sources and op-amps take part in a purely topological
//! enumeration.

mod components;
pub mod emit;
mod enumerate;
mod evaluate;
pub mod passes;
mod poly;
#[cfg(test)]
mod tests;

use miden_diagnostics::{Diagnostic, ToDiagnostic};

pub use self::poly::{Monomial, Polynomial, TransferFunction};

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] sana_parser::ParseError),
    #[error(transparent)]
    SemanticAnalysis(#[from] sana_parser::SemanticAnalysisError),
    #[error(transparent)]
    InvalidCircuit(#[from] sana_circuit::CircuitError),
    #[error("the forced edges of the circuit close a loop, so no common tree exists")]
    ForcedCycle,
    #[error("analysis failed, see diagnostics for more information")]
    Failed,
}

impl From<sana_circuit::CompileError> for CompileError {
    fn from(err: sana_circuit::CompileError) -> Self {
        match err {
            sana_circuit::CompileError::Parse(err) => Self::Parse(err),
            sana_circuit::CompileError::SemanticAnalysis(err) => Self::SemanticAnalysis(err),
            sana_circuit::CompileError::InvalidCircuit(err) => Self::InvalidCircuit(err),
            sana_circuit::CompileError::Failed => Self::Failed,
        }
    }
}

impl ToDiagnostic for CompileError {
    fn to_diagnostic(self) -> Diagnostic {
        match self {
            Self::Parse(err) => err.to_diagnostic(),
            Self::SemanticAnalysis(err) => err.to_diagnostic(),
            Self::InvalidCircuit(err) => Diagnostic::error().with_message(err.to_string()),
            Self::ForcedCycle => Diagnostic::error().with_message(self.to_string()),
            Self::Failed => Diagnostic::error().with_message(self.to_string()),
        }
    }
}
