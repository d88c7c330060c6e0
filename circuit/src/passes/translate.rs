use miden_diagnostics::{DiagnosticsHandler, Severity, Spanned};
use sana_parser::ast::{self, ElementKind};
use sana_pass::Pass;

use crate::{BuildOptions, Circuit, CircuitError, CompileError, NodeId};

/// This pass expands a parsed netlist into the dual-graph circuit
/// representation.
///
/// Elements are expanded in netlist order, so the edge numbering (and with it
/// the deterministic order of the tree enumeration) follows the source. After
/// expansion the closing block is attached and virtual node ids are collapsed,
/// leaving the circuit ready for analysis.
pub struct AstToCircuit<'a> {
    diagnostics: &'a DiagnosticsHandler,
    options: BuildOptions,
}

impl<'a> AstToCircuit<'a> {
    /// Create a new instance of this pass
    #[inline]
    pub fn new(diagnostics: &'a DiagnosticsHandler) -> Self {
        Self { diagnostics, options: BuildOptions::default() }
    }

    /// Create a new instance of this pass with explicit build options
    pub fn with_options(diagnostics: &'a DiagnosticsHandler, options: BuildOptions) -> Self {
        Self { diagnostics, options }
    }
}

impl Pass for AstToCircuit<'_> {
    type Input<'a> = ast::Netlist;
    type Output<'a> = Circuit;
    type Error = CompileError;

    fn run<'a>(&mut self, netlist: Self::Input<'a>) -> Result<Self::Output<'a>, Self::Error> {
        let mut circuit = Circuit::with_options(self.options);

        for element in netlist.elements.iter() {
            let name = element.name.as_str();
            let a = element.pos as NodeId;
            let b = element.neg as NodeId;
            let value = element.value;
            let sym = element.sym;
            // the parser guarantees a control port on four-terminal elements
            let ctrl = || {
                element
                    .ctrl
                    .map(|(ac, bc)| (ac as NodeId, bc as NodeId))
                    .expect("missing control port on a controlled element")
            };
            match element.kind {
                ElementKind::Resistor => {
                    circuit.add_resistor(name, a, b, value, sym);
                }
                ElementKind::Inductor => {
                    circuit.add_inductor(name, a, b, value, sym);
                }
                ElementKind::Capacitor => {
                    circuit.add_capacitor(name, a, b, value, sym);
                }
                ElementKind::Conductance => {
                    circuit.add_conductance(name, a, b, value, sym);
                }
                ElementKind::Voltage => {
                    circuit.add_voltage_source(name, a, b, value, sym);
                }
                ElementKind::Current => {
                    circuit.add_current_source(name, a, b, value, sym);
                }
                ElementKind::Vcvs => {
                    let (ac, bc) = ctrl();
                    circuit.add_vcvs(name, a, b, ac, bc, value, sym);
                }
                ElementKind::Cccs => {
                    let (ac, bc) = ctrl();
                    circuit.add_cccs(name, a, b, ac, bc, value, sym);
                }
                ElementKind::Ccvs => {
                    let (ac, bc) = ctrl();
                    circuit.add_ccvs(name, a, b, ac, bc, value, sym);
                }
                ElementKind::Vccs => {
                    let (ac, bc) = ctrl();
                    circuit.add_vccs(name, a, b, ac, bc, value, sym);
                }
                ElementKind::OpAmp => {
                    let (ac, bc) = ctrl();
                    circuit.add_opamp(a, b, ac, bc);
                }
            }
        }

        if let Some(output) = netlist.output() {
            let output = output as NodeId;
            // the closing block would happily attach to a node no element
            // touches, so range-check the output before it does
            if output >= circuit.nnum() {
                let err = CircuitError::OutputOutOfRange(output);
                let span = netlist.outputs.first().map(|s| s.span()).unwrap_or(netlist.span());
                self.diagnostics
                    .diagnostic(Severity::Error)
                    .with_message(err.to_string())
                    .with_primary_label(span, "designated here")
                    .emit();
                return Err(err.into());
            }
            circuit.set_output(output);
        }

        if let Err(err) = circuit.set_block() {
            self.diagnostics
                .diagnostic(Severity::Error)
                .with_message(err.to_string())
                .with_primary_label(netlist.span(), "in this netlist")
                .emit();
            return Err(err.into());
        }

        circuit.normalize();

        Ok(circuit)
    }
}
