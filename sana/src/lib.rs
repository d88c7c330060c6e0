//! The sana driver library: netlist in, transfer function out.
//!
//! The heavy lifting lives in the workspace crates; this crate wires the
//! parser and the two analysis passes into one pipeline for the command-line
//! binary and for integration tests.

use std::sync::Arc;

use miden_diagnostics::{CodeMap, DiagnosticsHandler};
use sana_pass::Pass;

pub use sana_circuit::BuildOptions;
pub use sana_expr::{emit, CompileError, TransferFunction};

/// Compiles netlist source into its symbolic transfer function.
pub fn compile(
    diagnostics: &DiagnosticsHandler,
    codemap: Arc<CodeMap>,
    source: &str,
    options: BuildOptions,
) -> Result<TransferFunction, CompileError> {
    sana_parser::parse(diagnostics, codemap, source)
        .map_err(CompileError::Parse)
        .and_then(|netlist| {
            let mut pipeline = sana_circuit::passes::AstToCircuit::with_options(
                diagnostics,
                options,
            )
            .chain(sana_expr::passes::CircuitToTransfer::new(diagnostics));
            pipeline.run(netlist)
        })
}
