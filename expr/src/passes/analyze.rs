use miden_diagnostics::{DiagnosticsHandler, Severity};
use sana_circuit::{Circuit, CircuitError, EdgeId};
use sana_pass::Pass;

use crate::{
    components::Components, enumerate::TreeSearch, evaluate::Evaluator, CompileError, Polynomial,
    TransferFunction,
};

/// This pass extracts the symbolic transfer function from a normalized
/// circuit.
///
/// The common-tree enumeration runs twice over the same read-only circuit:
/// seeded with the YREF closing edge it yields the denominator, seeded with
/// GREF the numerator. The forced edges are linked into the component tables
/// once up front; each pass pushes its closing edge, runs the search, and
/// pops the closing edge again so the next pass starts clean.
pub struct CircuitToTransfer<'a> {
    diagnostics: &'a DiagnosticsHandler,
}

impl<'a> CircuitToTransfer<'a> {
    /// Create a new instance of this pass
    #[inline]
    pub fn new(diagnostics: &'a DiagnosticsHandler) -> Self {
        Self { diagnostics }
    }

    fn closing_pass(
        &self,
        circuit: &Circuit,
        closing: EdgeId,
        ccgi: &mut Components,
        ccgv: &mut Components,
        tree: &mut Vec<EdgeId>,
        evaluator: &mut Evaluator,
    ) -> Result<Polynomial, CompileError> {
        let edge = circuit.edge(closing);
        if ccgi.connected(edge.gi.0, edge.gi.1) || ccgv.connected(edge.gv.0, edge.gv.1) {
            self.diagnostics
                .diagnostic(Severity::Error)
                .with_message("the closing edge loops against the forced edges")
                .emit();
            return Err(CompileError::ForcedCycle);
        }
        ccgi.link(edge.gi.0, edge.gi.1);
        ccgv.link(edge.gv.0, edge.gv.1);
        tree.push(closing);

        let mut poly = Polynomial::new();
        TreeSearch::new(circuit, ccgi, ccgv, tree).run(evaluator, &mut poly);

        tree.pop();
        ccgi.cut(edge.gi.0, edge.gi.1);
        ccgv.cut(edge.gv.0, edge.gv.1);
        Ok(poly)
    }
}

impl Pass for CircuitToTransfer<'_> {
    type Input<'a> = Circuit;
    type Output<'a> = TransferFunction;
    type Error = CompileError;

    fn run<'a>(&mut self, circuit: Self::Input<'a>) -> Result<Self::Output<'a>, Self::Error> {
        let nnum = circuit.nnum();
        let onode = circuit.output_node();
        if onode == circuit.basenode() || onode >= nnum {
            let err = CircuitError::OutputOutOfRange(onode);
            self.diagnostics
                .diagnostic(Severity::Error)
                .with_message(err.to_string())
                .emit();
            return Err(err.into());
        }

        let mut ccgi = Components::new(nnum);
        let mut ccgv = Components::new(nnum);
        let mut tree = Vec::with_capacity(nnum - 1);
        for &forced in circuit.forced() {
            let edge = circuit.edge(forced);
            if ccgi.connected(edge.gi.0, edge.gi.1) || ccgv.connected(edge.gv.0, edge.gv.1) {
                self.diagnostics
                    .diagnostic(Severity::Error)
                    .with_message("the nullor edges of the circuit close a loop")
                    .emit();
                return Err(CompileError::ForcedCycle);
            }
            ccgi.link(edge.gi.0, edge.gi.1);
            ccgv.link(edge.gv.0, edge.gv.1);
            tree.push(forced);
        }

        let mut evaluator = Evaluator::new(&circuit);
        let denominator = match circuit.yref() {
            Some(closing) => {
                self.closing_pass(&circuit, closing, &mut ccgi, &mut ccgv, &mut tree, &mut evaluator)?
            }
            None => Polynomial::new(),
        };
        let numerator = match circuit.gref() {
            Some(closing) => {
                self.closing_pass(&circuit, closing, &mut ccgi, &mut ccgv, &mut tree, &mut evaluator)?
            }
            None => Polynomial::new(),
        };

        Ok(TransferFunction { numerator, denominator })
    }
}
