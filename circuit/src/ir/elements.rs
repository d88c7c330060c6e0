//! Expansion of high-level electrical elements into edges.
//!
//! Two-terminal passives map onto a single edge with identical endpoint pairs
//! in both graphs. Everything else is a nullor model: one or two companion
//! edges describing the controlled quantity, plus a forced edge pinning the
//! nullor into every spanning tree. Current directions follow the convention
//! that an element `(a, b)` drives from its positive terminal `a` to its
//! negative terminal `b`.

use super::{Circuit, EdgeId, EdgeKind, NodeId};

impl Circuit {
    /// `R`: one impedance edge of degree 0.
    pub fn add_resistor(
        &mut self,
        name: &str,
        a: NodeId,
        b: NodeId,
        value: f64,
        sym: bool,
    ) -> EdgeId {
        self.add_simple(a, b, a, b, Some(name), EdgeKind::Impedance, 0, value, sym)
    }

    /// `L`: one impedance edge of degree 1.
    pub fn add_inductor(
        &mut self,
        name: &str,
        a: NodeId,
        b: NodeId,
        value: f64,
        sym: bool,
    ) -> EdgeId {
        self.add_simple(a, b, a, b, Some(name), EdgeKind::Impedance, 1, value, sym)
    }

    /// `G`: one admittance edge of degree 0.
    pub fn add_conductance(
        &mut self,
        name: &str,
        a: NodeId,
        b: NodeId,
        value: f64,
        sym: bool,
    ) -> EdgeId {
        self.add_simple(a, b, a, b, Some(name), EdgeKind::Admittance, 0, value, sym)
    }

    /// `C`: one admittance edge of degree 1.
    pub fn add_capacitor(
        &mut self,
        name: &str,
        a: NodeId,
        b: NodeId,
        value: f64,
        sym: bool,
    ) -> EdgeId {
        self.add_simple(a, b, a, b, Some(name), EdgeKind::Admittance, 1, value, sym)
    }

    /// `V`: an independent voltage source between `a` and `b`.
    ///
    /// The source is routed through a fresh virtual node onto the internal
    /// bus, with a unity companion edge carrying the driven port and a nullor
    /// enforcing the port voltage.
    pub fn add_voltage_source(&mut self, name: &str, a: NodeId, b: NodeId, value: f64, sym: bool) {
        self.pick_reference(a, b);
        let fresh = self.fresh_node();
        let (reserved, reference) = (self.reserved(), self.reference());
        let weight = self.companion_weight();
        self.add_simple(
            fresh,
            reserved,
            reserved,
            reference,
            Some(name),
            EdgeKind::Admittance,
            0,
            value,
            sym,
        );
        self.add_simple(fresh, reserved, b, a, None, EdgeKind::Admittance, 0, weight, false);
        self.add_nullor(b, a, reserved, fresh);
    }

    /// `I`: an independent current source driving from `a` to `b`.
    pub fn add_current_source(
        &mut self,
        name: &str,
        a: NodeId,
        b: NodeId,
        value: f64,
        sym: bool,
    ) -> EdgeId {
        self.pick_reference(a, b);
        let (reserved, reference) = (self.reserved(), self.reference());
        self.add_simple(a, b, reserved, reference, Some(name), EdgeKind::Admittance, 0, value, sym)
    }

    /// `T`: a voltage-controlled current source; a single admittance edge with
    /// the control port on the voltage side.
    pub fn add_vccs(
        &mut self,
        name: &str,
        a: NodeId,
        b: NodeId,
        ac: NodeId,
        bc: NodeId,
        value: f64,
        sym: bool,
    ) -> EdgeId {
        self.add_simple(a, b, ac, bc, Some(name), EdgeKind::Admittance, 0, value, sym)
    }

    /// `E`: a voltage-controlled voltage source.
    pub fn add_vcvs(
        &mut self,
        name: &str,
        a: NodeId,
        b: NodeId,
        ac: NodeId,
        bc: NodeId,
        value: f64,
        sym: bool,
    ) {
        let fresh = self.fresh_node();
        let weight = self.companion_weight();
        self.add_simple(fresh, bc, ac, bc, Some(name), EdgeKind::Admittance, 0, value, sym);
        self.add_simple(fresh, bc, b, a, None, EdgeKind::Admittance, 0, weight, false);
        self.add_nullor(b, a, bc, fresh);
    }

    /// `F`: a current-controlled current source.
    pub fn add_cccs(
        &mut self,
        name: &str,
        a: NodeId,
        b: NodeId,
        ac: NodeId,
        bc: NodeId,
        value: f64,
        sym: bool,
    ) {
        let fresh = self.fresh_node();
        let weight = self.companion_weight();
        self.add_simple(ac, bc, bc, fresh, Some(name), EdgeKind::Admittance, 0, value, sym);
        self.add_simple(a, b, bc, fresh, None, EdgeKind::Admittance, 0, weight, false);
        self.add_nullor(bc, fresh, bc, ac);
    }

    /// `H`: a current-controlled voltage source.
    pub fn add_ccvs(
        &mut self,
        name: &str,
        a: NodeId,
        b: NodeId,
        ac: NodeId,
        bc: NodeId,
        value: f64,
        sym: bool,
    ) {
        self.add_simple(ac, bc, a, b, Some(name), EdgeKind::Impedance, 0, value, sym);
        self.add_nullor(b, a, bc, ac);
    }

    /// `A`: an ideal op-amp, which is exactly one nullor.
    pub fn add_opamp(&mut self, a: NodeId, b: NodeId, ac: NodeId, bc: NodeId) -> EdgeId {
        self.add_nullor(b, a, bc, ac)
    }
}
