use std::collections::BTreeMap;
use std::sync::Arc;

use miden_diagnostics::{
    term::termcolor::ColorChoice, CodeMap, DefaultEmitter, DiagnosticsHandler,
};
use pretty_assertions::assert_eq;
use sana_pass::Pass;

use crate::{
    passes::AstToCircuit, AdjacencyGraph, BuildOptions, Circuit, CircuitError, CompileError,
    EdgeId, EdgeKind, LIMIT,
};

/// Expands a netlist into a normalized circuit.
fn build(source: &str) -> Result<Circuit, CompileError> {
    let codemap = Arc::new(CodeMap::new());
    let emitter = Arc::new(DefaultEmitter::new(ColorChoice::Auto));
    let diagnostics = DiagnosticsHandler::new(Default::default(), codemap.clone(), emitter);
    let netlist = sana_parser::parse(&diagnostics, codemap, source)?;
    AstToCircuit::new(&diagnostics).run(netlist)
}

/// Counts the adjacency cells of every edge in one graph view.
fn cells_per_edge(graph: &AdjacencyGraph) -> BTreeMap<EdgeId, usize> {
    let mut cells = BTreeMap::new();
    for head in graph.heads() {
        for tail in head.tails.iter() {
            *cells.entry(tail.edge).or_insert(0) += 1;
        }
    }
    cells
}

// EXPANSIONS
// ================================================================================================

#[test]
fn resistor_is_one_edge() {
    let mut circuit = Circuit::new();
    circuit.add_resistor("R1", 1, 2, 10.0, false);
    assert_eq!(circuit.ednum(), 1);
    assert_eq!(circuit.efnum(), 0);
    let edge = circuit.edge(EdgeId::from(0));
    assert_eq!(edge.kind, EdgeKind::Impedance);
    assert_eq!(edge.degree, 0);
    assert_eq!(edge.gi, (1, 2));
    assert_eq!(edge.gv, (1, 2));
    assert_eq!(edge.name.as_deref(), Some("R1"));
}

#[test]
fn reactive_elements_have_degree_one() {
    let mut circuit = Circuit::new();
    circuit.add_inductor("L1", 1, 2, 1.0, true);
    circuit.add_capacitor("C1", 2, 0, 1.0, true);
    let inductor = circuit.edge(EdgeId::from(0));
    let capacitor = circuit.edge(EdgeId::from(1));
    assert_eq!((inductor.kind, inductor.degree), (EdgeKind::Impedance, 1));
    assert_eq!((capacitor.kind, capacitor.degree), (EdgeKind::Admittance, 1));
}

#[test]
fn voltage_source_expands_to_nullor_model() {
    let mut circuit = Circuit::new();
    circuit.add_voltage_source("V1", 1, 0, 1.0, false);
    assert_eq!(circuit.ednum(), 3);
    assert_eq!(circuit.efnum(), 1);
    assert_eq!(circuit.reference(), 1);

    let driver = circuit.edge(EdgeId::from(0));
    let companion = circuit.edge(EdgeId::from(1));
    let nullor = circuit.edge(EdgeId::from(2));
    let fresh = LIMIT + 1;
    assert_eq!(driver.gi, (fresh, circuit.reserved()));
    assert_eq!(driver.gv, (circuit.reserved(), circuit.reference()));
    assert_eq!(companion.gi, (fresh, circuit.reserved()));
    assert_eq!(companion.gv, (0, 1));
    assert_eq!(companion.value, 1.0);
    assert!(!companion.sym);
    assert_eq!(nullor.kind, EdgeKind::Forced);
    assert_eq!(nullor.gi, (0, 1));
    assert_eq!(nullor.gv, (circuit.reserved(), fresh));
}

#[test]
fn reverse_sign_mode_flips_companion_edges() {
    let mut circuit = Circuit::with_options(BuildOptions { reverse_sign: true });
    circuit.add_voltage_source("V1", 1, 0, 1.0, false);
    circuit.add_vcvs("E1", 2, 0, 1, 0, 2.0, false);
    circuit.add_cccs("F1", 3, 0, 1, 0, 2.0, false);
    // the companion edge is the second of each expansion
    assert_eq!(circuit.edge(EdgeId::from(1)).value, -1.0);
    assert_eq!(circuit.edge(EdgeId::from(4)).value, -1.0);
    assert_eq!(circuit.edge(EdgeId::from(7)).value, -1.0);
    // the driven edges keep their own values
    assert_eq!(circuit.edge(EdgeId::from(0)).value, 1.0);
    assert_eq!(circuit.edge(EdgeId::from(3)).value, 2.0);
    assert_eq!(circuit.edge(EdgeId::from(6)).value, 2.0);
}

#[test]
fn current_source_reference_skips_ground() {
    let mut circuit = Circuit::new();
    circuit.add_current_source("I1", 0, 2, 1.0, false);
    assert_eq!(circuit.reference(), 2);
    let edge = circuit.edge(EdgeId::from(0));
    assert_eq!(edge.gi, (0, 2));
    assert_eq!(edge.gv, (circuit.reserved(), 2));
}

#[test]
fn opamp_is_one_forced_edge() {
    let mut circuit = Circuit::new();
    circuit.add_opamp(3, 0, 0, 2);
    assert_eq!(circuit.ednum(), 1);
    assert_eq!(circuit.efnum(), 1);
    let edge = circuit.edge(EdgeId::from(0));
    assert_eq!(edge.kind, EdgeKind::Forced);
    assert_eq!(edge.gi, (0, 3));
    assert_eq!(edge.gv, (2, 0));
}

// ADJACENCY INVARIANTS
// ================================================================================================

#[test]
fn every_edge_owns_four_cells() {
    let circuit = build(
        "V1 1 0 1
         R1 1 2
         C1 2 0
         E1 3 0 2 0 2
         .out 3",
    )
    .unwrap();

    let gi = cells_per_edge(circuit.current_graph());
    let gv = cells_per_edge(circuit.voltage_graph());
    for index in 0..circuit.ednum() {
        let id = EdgeId::from(index);
        assert_eq!(gi.get(&id), Some(&2), "edge {id} in the current graph");
        assert_eq!(gv.get(&id), Some(&2), "edge {id} in the voltage graph");
    }
    assert_eq!(circuit.current_graph().cell_count(), 2 * circuit.ednum());
    assert_eq!(circuit.voltage_graph().cell_count(), 2 * circuit.ednum());
}

#[test]
fn edge_counts_add_up() {
    let circuit = build(
        "V1 1 0 1
         R1 1 2
         C1 2 0
         .out 2",
    )
    .unwrap();
    // V expands to 2 simple + 1 forced; R and C are simple; plus the closing
    // block
    let simple = 2 + 2;
    assert_eq!(circuit.efnum(), 1);
    assert_eq!(circuit.ednum(), circuit.efnum() + simple + 2);
    assert!(circuit.yref().is_some());
    assert!(circuit.gref().is_some());
}

// NORMALIZATION
// ================================================================================================

#[test]
fn normalize_collapses_virtual_ids() {
    let circuit = build(
        "V1 1 0 1
         R1 1 2
         .out 2",
    )
    .unwrap();
    // real nodes 0..=2, then the reserved bus and the source's fresh node
    assert_eq!(circuit.nnum(), 5);
    assert_eq!(circuit.reserved(), 3);
    for edge in circuit.edges() {
        for node in [edge.gi.0, edge.gi.1, edge.gv.0, edge.gv.1] {
            assert!(node < circuit.nnum());
        }
    }
    for head in circuit.current_graph().heads().chain(circuit.voltage_graph().heads()) {
        assert!(head.node < circuit.nnum());
        for tail in head.tails.iter() {
            assert!(tail.node < circuit.nnum());
        }
    }
}

#[test]
fn normalize_is_idempotent() {
    let mut circuit = Circuit::new();
    circuit.add_voltage_source("V1", 1, 0, 1.0, false);
    circuit.add_resistor("R1", 1, 2, 1.0, true);
    circuit.set_output(2);
    circuit.set_block().unwrap();
    circuit.normalize();
    let edges: Vec<_> = circuit.edges().iter().map(|e| (e.gi, e.gv)).collect();
    let nnum = circuit.nnum();
    circuit.normalize();
    assert_eq!(circuit.nnum(), nnum);
    assert_eq!(circuit.edges().iter().map(|e| (e.gi, e.gv)).collect::<Vec<_>>(), edges);
}

// CLOSING BLOCK
// ================================================================================================

#[test]
fn set_block_requires_a_source() {
    let mut circuit = Circuit::new();
    circuit.add_resistor("R1", 1, 0, 1.0, true);
    circuit.set_output(1);
    assert!(matches!(circuit.set_block(), Err(CircuitError::MissingReference)));
}

#[test]
fn set_block_requires_an_output() {
    let mut circuit = Circuit::new();
    circuit.add_voltage_source("V1", 1, 0, 1.0, false);
    assert!(matches!(circuit.set_block(), Err(CircuitError::MissingOutput)));
}

#[test]
fn set_block_attaches_both_closing_edges() {
    let circuit = build(
        "V1 1 0 1
         R1 1 2
         .out 2",
    )
    .unwrap();
    let yref = circuit.edge(circuit.yref().unwrap());
    let gref = circuit.edge(circuit.gref().unwrap());
    assert_eq!(yref.kind, EdgeKind::YRef);
    assert_eq!(gref.kind, EdgeKind::GRef);
    assert_eq!(yref.gi, (circuit.reference(), circuit.reserved()));
    assert_eq!(yref.gv, (circuit.reference(), circuit.reserved()));
    assert_eq!(gref.gi, (circuit.reference(), circuit.reserved()));
    assert_eq!(gref.gv, (circuit.basenode(), circuit.output_node()));
}

#[test]
fn undriven_netlist_is_rejected() {
    let err = build(
        "R1 1 0
         .out 1",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CompileError::InvalidCircuit(CircuitError::MissingReference)
    ));
}
