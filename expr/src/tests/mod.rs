use std::sync::Arc;

use miden_diagnostics::{
    term::termcolor::ColorChoice, CodeMap, DefaultEmitter, DiagnosticsHandler,
};
use sana_pass::Pass;

use crate::{CompileError, Monomial, TransferFunction};


/// Compiles a netlist all the way to its transfer function.
pub(crate) fn compile(source: &str) -> Result<TransferFunction, CompileError> {
    let codemap = Arc::new(CodeMap::new());
    let emitter = Arc::new(DefaultEmitter::new(ColorChoice::Auto));
    let diagnostics = DiagnosticsHandler::new(Default::default(), codemap.clone(), emitter);

    let netlist = sana_parser::parse(&diagnostics, codemap, source).map_err(CompileError::Parse)?;
    let mut pipeline = sana_circuit::passes::AstToCircuit::new(&diagnostics)
        .chain(crate::passes::CircuitToTransfer::new(&diagnostics));
    pipeline.run(netlist)
}

pub(crate) fn term(coeff: f64, degree: i16, symbols: &[&str]) -> Monomial {
    Monomial {
        coeff,
        degree,
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
    }
}
