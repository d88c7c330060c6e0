use std::sync::Arc;

use miden_diagnostics::{
    term::termcolor::ColorChoice, CodeMap, DefaultEmitter, DiagnosticsHandler, SourceSpan,
};
use pretty_assertions::assert_eq;

use crate::{
    ast::{Element, ElementKind, Ident, Netlist},
    ParseError, SemanticAnalysisError,
};

// TEST HARNESS
// ================================================================================================

struct ParseTest {
    diagnostics: Arc<DiagnosticsHandler>,
    codemap: Arc<CodeMap>,
}

impl ParseTest {
    fn new() -> Self {
        let codemap = Arc::new(CodeMap::new());
        let emitter = Arc::new(DefaultEmitter::new(ColorChoice::Auto));
        let diagnostics =
            Arc::new(DiagnosticsHandler::new(Default::default(), codemap.clone(), emitter));
        Self { diagnostics, codemap }
    }

    fn parse(&self, source: &str) -> Result<Netlist, ParseError> {
        crate::parse(&self.diagnostics, self.codemap.clone(), source)
    }

    fn expect_netlist(&self, source: &str, expected: &Netlist) {
        let netlist = self.parse(source).expect("expected netlist to parse");
        assert_eq!(&netlist, expected);
    }
}

fn element(name: &str, pos: u32, neg: u32, value: f64, sym: bool) -> Element {
    Element {
        span: SourceSpan::UNKNOWN,
        name: Ident::new(SourceSpan::UNKNOWN, name),
        kind: ElementKind::of(name).unwrap(),
        pos,
        neg,
        ctrl: None,
        value,
        sym,
    }
}

fn controlled(
    name: &str,
    pos: u32,
    neg: u32,
    ctrl: (u32, u32),
    value: f64,
    sym: bool,
) -> Element {
    Element { ctrl: Some(ctrl), ..element(name, pos, neg, value, sym) }
}

fn netlist(elements: Vec<Element>, output: u32) -> Netlist {
    Netlist {
        span: SourceSpan::UNKNOWN,
        elements,
        outputs: vec![miden_diagnostics::Span::new(SourceSpan::UNKNOWN, output)],
    }
}

// ELEMENTS
// ================================================================================================

#[test]
fn two_terminal_elements() {
    let source = "
    R1 1 2 4.7k
    L1 2 3
    C1 3 0 1u sym
    G1 1 0 0.5
    .out 3";
    let expected = netlist(
        vec![
            element("R1", 1, 2, 4700.0, false),
            element("L1", 2, 3, 1.0, true),
            element("C1", 3, 0, 1e-6, true),
            element("G1", 1, 0, 0.5, false),
        ],
        3,
    );
    ParseTest::new().expect_netlist(source, &expected);
}

#[test]
fn sources() {
    let source = "
    V1 1 0 1
    I1 0 2 2m
    .out 2";
    let expected = netlist(
        vec![element("V1", 1, 0, 1.0, false), element("I1", 0, 2, 0.002, false)],
        2,
    );
    ParseTest::new().expect_netlist(source, &expected);
}

#[test]
fn controlled_sources() {
    let source = "
    V1 1 0 1
    E1 3 0 1 2 10
    F1 4 0 1 2
    H1 5 0 1 2 2k sym
    T1 6 0 1 2 1m
    .out 3";
    let expected = netlist(
        vec![
            element("V1", 1, 0, 1.0, false),
            controlled("E1", 3, 0, (1, 2), 10.0, false),
            controlled("F1", 4, 0, (1, 2), 1.0, true),
            controlled("H1", 5, 0, (1, 2), 2000.0, true),
            controlled("T1", 6, 0, (1, 2), 0.001, false),
        ],
        3,
    );
    ParseTest::new().expect_netlist(source, &expected);
}

#[test]
fn opamp_takes_no_value() {
    let source = "
    V1 1 0 1
    A1 2 0 0 1
    .out 2";
    let expected = netlist(
        vec![
            element("V1", 1, 0, 1.0, false),
            controlled("A1", 2, 0, (0, 1), 1.0, true),
        ],
        2,
    );
    ParseTest::new().expect_netlist(source, &expected);

    let err = ParseTest::new().parse("V1 1 0 1\nA1 2 0 0 1 5\n.out 2").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}

#[test]
fn end_stops_parsing() {
    let source = "
    V1 1 0 1
    R1 1 0
    .out 1
    .end
    R1 99 98";
    let expected = netlist(
        vec![element("V1", 1, 0, 1.0, false), element("R1", 1, 0, 1.0, true)],
        1,
    );
    ParseTest::new().expect_netlist(source, &expected);
}

// ERRORS
// ================================================================================================

#[test]
fn err_unknown_element() {
    let err = ParseTest::new().parse("Q1 1 0\n.out 1").unwrap_err();
    assert!(matches!(err, ParseError::UnknownElement { .. }));
}

#[test]
fn err_missing_terminal() {
    let err = ParseTest::new().parse("R1 1\n.out 1").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEol { .. }));
}

#[test]
fn err_fractional_node() {
    let err = ParseTest::new().parse("R1 1.5 0\n.out 1").unwrap_err();
    assert!(matches!(err, ParseError::InvalidNode { .. }));
}

#[test]
fn err_node_out_of_range() {
    let err = ParseTest::new().parse("R1 1024 0\n.out 1").unwrap_err();
    assert!(matches!(err, ParseError::InvalidNode { .. }));
}

#[test]
fn err_duplicate_name() {
    let err = ParseTest::new().parse("R1 1 0\nR1 2 0\n.out 1").unwrap_err();
    assert!(matches!(
        err,
        ParseError::SemanticAnalysis(SemanticAnalysisError::DuplicateName { .. })
    ));
}

#[test]
fn err_missing_output() {
    let err = ParseTest::new().parse("R1 1 0").unwrap_err();
    assert!(matches!(
        err,
        ParseError::SemanticAnalysis(SemanticAnalysisError::MissingOutput)
    ));
}

#[test]
fn err_output_is_ground() {
    let err = ParseTest::new().parse("R1 1 0\n.out 0").unwrap_err();
    assert!(matches!(
        err,
        ParseError::SemanticAnalysis(SemanticAnalysisError::OutputIsGround { .. })
    ));
}

#[test]
fn err_duplicate_output() {
    let err = ParseTest::new().parse("R1 1 0\n.out 1\n.out 1").unwrap_err();
    assert!(matches!(
        err,
        ParseError::SemanticAnalysis(SemanticAnalysisError::DuplicateOutput { .. })
    ));
}
