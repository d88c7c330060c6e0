//! This module provides the AST for parsed netlists.
//!
//! A netlist is flat: there are no nested scopes or expressions, only a
//! sequence of element statements plus the `.out` directive. Node numbers are
//! kept as raw integers here; the circuit builder assigns them meaning.

use std::fmt;

use miden_diagnostics::{SourceSpan, Span, Spanned};

/// The largest node number a netlist may reference.
///
/// Larger ids are reserved for the virtual nodes synthesized while expanding
/// elements into their nullor models.
pub const MAX_NODE: u32 = 1024;

/// A parsed netlist: the element statements in source order, plus any output
/// node designations encountered.
///
/// Semantic analysis enforces that exactly one `.out` directive is present;
/// until then every occurrence is kept so that duplicates can be reported with
/// their locations.
#[derive(Debug, Clone, Spanned)]
pub struct Netlist {
    #[span]
    pub span: SourceSpan,
    pub elements: Vec<Element>,
    pub outputs: Vec<Span<u32>>,
}
impl Netlist {
    /// Returns the designated output node, if any.
    pub fn output(&self) -> Option<u32> {
        self.outputs.first().map(|span| **span)
    }
}
impl Eq for Netlist {}
impl PartialEq for Netlist {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
            && self.outputs.len() == other.outputs.len()
            && self
                .outputs
                .iter()
                .zip(other.outputs.iter())
                .all(|(a, b)| **a == **b)
    }
}

/// A named element statement.
#[derive(Debug, Clone, Spanned)]
pub struct Element {
    #[span]
    pub span: SourceSpan,
    pub name: Ident,
    pub kind: ElementKind,
    /// The positive terminal.
    pub pos: u32,
    /// The negative terminal.
    pub neg: u32,
    /// The control port of a four-terminal element, as (positive, negative).
    pub ctrl: Option<(u32, u32)>,
    pub value: f64,
    /// Whether the element contributes its name as a symbolic factor rather
    /// than its numeric value.
    pub sym: bool,
}
impl Eq for Element {}
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.pos == other.pos
            && self.neg == other.neg
            && self.ctrl == other.ctrl
            && self.value == other.value
            && self.sym == other.sym
    }
}

/// The kind of an element, derived from the first letter of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `R`: resistor
    Resistor,
    /// `L`: inductor
    Inductor,
    /// `C`: capacitor
    Capacitor,
    /// `G`: conductance
    Conductance,
    /// `V`: independent voltage source
    Voltage,
    /// `I`: independent current source
    Current,
    /// `E`: voltage-controlled voltage source
    Vcvs,
    /// `F`: current-controlled current source
    Cccs,
    /// `H`: current-controlled voltage source
    Ccvs,
    /// `T`: voltage-controlled current source (transconductance)
    Vccs,
    /// `A`: ideal operational amplifier
    OpAmp,
}
impl ElementKind {
    /// Classifies an element name by its leading letter.
    pub fn of(name: &str) -> Option<Self> {
        let kind = match name.chars().next()?.to_ascii_uppercase() {
            'R' => Self::Resistor,
            'L' => Self::Inductor,
            'C' => Self::Capacitor,
            'G' => Self::Conductance,
            'V' => Self::Voltage,
            'I' => Self::Current,
            'E' => Self::Vcvs,
            'F' => Self::Cccs,
            'H' => Self::Ccvs,
            'T' => Self::Vccs,
            'A' => Self::OpAmp,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this element has a control port (four terminals).
    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::Vcvs | Self::Cccs | Self::Ccvs | Self::Vccs | Self::OpAmp)
    }

    /// Whether this element carries a value (the op-amp is the only one that
    /// does not).
    pub fn has_value(&self) -> bool {
        !matches!(self, Self::OpAmp)
    }
}
impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Resistor => write!(f, "resistor"),
            Self::Inductor => write!(f, "inductor"),
            Self::Capacitor => write!(f, "capacitor"),
            Self::Conductance => write!(f, "conductance"),
            Self::Voltage => write!(f, "voltage source"),
            Self::Current => write!(f, "current source"),
            Self::Vcvs => write!(f, "voltage-controlled voltage source"),
            Self::Cccs => write!(f, "current-controlled current source"),
            Self::Ccvs => write!(f, "current-controlled voltage source"),
            Self::Vccs => write!(f, "voltage-controlled current source"),
            Self::OpAmp => write!(f, "op-amp"),
        }
    }
}

/// A named identifier with its source location.
#[derive(Debug, Clone, Spanned)]
pub struct Ident {
    #[span]
    pub span: SourceSpan,
    pub name: String,
}
impl Ident {
    pub fn new(span: SourceSpan, name: impl Into<String>) -> Self {
        Self { span, name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}
impl Eq for Ident {}
impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
