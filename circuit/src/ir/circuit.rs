use crate::CircuitError;

use super::{AdjacencyGraph, Edge, EdgeId, EdgeKind, NodeId, LIMIT, STDDIM};

/// Options controlling how elements are expanded into edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// SapWin compatibility mode: the unity-valued companion edge synthesized
    /// for V, VCVS and CCCS elements carries weight -1 instead of +1.
    pub reverse_sign: bool,
}

/// The dual-graph representation of a circuit under construction.
///
/// Edges are appended by the element expansion methods and addressed by their
/// position; each edge has one endpoint pair in the current graph and one in
/// the voltage graph. Virtual node ids handed out by [Circuit::fresh_node] are
/// collapsed onto dense ids by [Circuit::normalize], after which the circuit
/// is ready for analysis.
#[derive(Debug, Clone)]
pub struct Circuit {
    options: BuildOptions,
    /// The dedicated virtual node closing every source onto the internal bus.
    reserved: NodeId,
    /// The common reference node for sources; 0 until the first V/I element
    /// picks it.
    reference: NodeId,
    /// The ground node.
    basenode: NodeId,
    /// The designated output node.
    onode: NodeId,
    /// The number of virtual ids handed out since the last normalization.
    offset: usize,
    /// The number of real nodes in use.
    nnum: usize,
    edges: Vec<Edge>,
    gi: AdjacencyGraph,
    gv: AdjacencyGraph,
    /// The forced (nullor) edges, in insertion order.
    flist: Vec<EdgeId>,
    yref: Option<EdgeId>,
    gref: Option<EdgeId>,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    pub fn new() -> Self {
        Self::with_options(BuildOptions::default())
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            options,
            reserved: LIMIT,
            reference: 0,
            basenode: 0,
            onode: 0,
            // the reserved node consumes the first virtual id
            offset: 1,
            nnum: 0,
            edges: Vec::with_capacity(STDDIM),
            gi: AdjacencyGraph::default(),
            gv: AdjacencyGraph::default(),
            flist: Vec::new(),
            yref: None,
            gref: None,
        }
    }

    // ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// The number of real nodes in use; once normalized, the total number of
    /// nodes.
    pub fn nnum(&self) -> usize {
        self.nnum
    }

    /// The total number of edges.
    pub fn ednum(&self) -> usize {
        self.edges.len()
    }

    /// The number of forced edges.
    pub fn efnum(&self) -> usize {
        self.flist.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// The forced edges, in insertion order.
    pub fn forced(&self) -> &[EdgeId] {
        &self.flist
    }

    pub fn yref(&self) -> Option<EdgeId> {
        self.yref
    }

    pub fn gref(&self) -> Option<EdgeId> {
        self.gref
    }

    pub fn reference(&self) -> NodeId {
        self.reference
    }

    pub fn reserved(&self) -> NodeId {
        self.reserved
    }

    pub fn basenode(&self) -> NodeId {
        self.basenode
    }

    pub fn output_node(&self) -> NodeId {
        self.onode
    }

    pub fn set_output(&mut self, node: NodeId) {
        self.onode = node;
    }

    /// The current-graph adjacency.
    pub fn current_graph(&self) -> &AdjacencyGraph {
        &self.gi
    }

    /// The voltage-graph adjacency.
    pub fn voltage_graph(&self) -> &AdjacencyGraph {
        &self.gv
    }

    pub(super) fn companion_weight(&self) -> f64 {
        if self.options.reverse_sign {
            -1.0
        } else {
            1.0
        }
    }

    /// Picks the common reference node for sources, if not already picked.
    pub(super) fn pick_reference(&mut self, pos: NodeId, neg: NodeId) {
        if self.reference == 0 {
            self.reference = if pos != 0 { pos } else { neg };
        }
    }

    // CONSTRUCTION
    // --------------------------------------------------------------------------------------------

    /// Allocates a fresh virtual node id.
    pub fn fresh_node(&mut self) -> NodeId {
        let node = LIMIT + self.offset;
        self.offset += 1;
        node
    }

    /// Appends a raw edge with endpoints `(git, gih)` in the current graph and
    /// `(gvt, gvh)` in the voltage graph, wiring all four adjacency cells.
    fn add_edge(
        &mut self,
        git: NodeId,
        gih: NodeId,
        gvt: NodeId,
        gvh: NodeId,
        edge: Edge,
    ) -> EdgeId {
        let id = EdgeId::from(self.edges.len());
        self.gi.add_edge(git, gih, id);
        self.gv.add_edge(gvt, gvh, id);
        for node in [git, gih, gvt, gvh] {
            if node < LIMIT && node + 1 > self.nnum {
                self.nnum = node + 1;
            }
        }
        self.edges.push(edge);
        id
    }

    /// Appends one simple (non-forced) edge.
    pub fn add_simple(
        &mut self,
        nt: NodeId,
        nh: NodeId,
        ntc: NodeId,
        nhc: NodeId,
        name: Option<&str>,
        kind: EdgeKind,
        degree: i16,
        value: f64,
        sym: bool,
    ) -> EdgeId {
        self.add_edge(
            nt,
            nh,
            ntc,
            nhc,
            Edge {
                name: name.map(str::to_string),
                kind,
                degree,
                sym,
                value,
                gi: (nt, nh),
                gv: (ntc, nhc),
            },
        )
    }

    /// Appends one forced (nullor) edge and tracks it for the tree search.
    pub fn add_nullor(&mut self, nt: NodeId, nh: NodeId, ntc: NodeId, nhc: NodeId) -> EdgeId {
        let id = self.add_edge(
            nt,
            nh,
            ntc,
            nhc,
            Edge {
                name: None,
                kind: EdgeKind::Forced,
                degree: 0,
                sym: true,
                value: 1.0,
                gi: (nt, nh),
                gv: (ntc, nhc),
            },
        );
        self.flist.push(id);
        id
    }

    /// Attaches the two synthetic closing edges used by the analysis passes.
    ///
    /// The YREF edge closes the internal bus onto the reference node in both
    /// graphs and seeds the denominator pass; the GREF edge closes ground onto
    /// the output node in the voltage graph and seeds the numerator pass.
    pub fn set_block(&mut self) -> Result<(), CircuitError> {
        if self.reference == 0 {
            return Err(CircuitError::MissingReference);
        }
        if self.onode == 0 {
            return Err(CircuitError::MissingOutput);
        }
        let yref = self.add_simple(
            self.reference,
            self.reserved,
            self.reference,
            self.reserved,
            None,
            EdgeKind::YRef,
            0,
            1.0,
            false,
        );
        self.yref = Some(yref);
        let gref = self.add_simple(
            self.reference,
            self.reserved,
            self.basenode,
            self.onode,
            None,
            EdgeKind::GRef,
            0,
            1.0,
            false,
        );
        self.gref = Some(gref);
        Ok(())
    }

    /// Collapses every virtual node id onto the dense range past the real
    /// nodes.
    ///
    /// Idempotent as long as no new virtual ids have been handed out since
    /// the previous call.
    pub fn normalize(&mut self) {
        self.gi.normalize(self.nnum);
        self.gv.normalize(self.nnum);
        for edge in self.edges.iter_mut() {
            for node in [&mut edge.gi.0, &mut edge.gi.1, &mut edge.gv.0, &mut edge.gv.1] {
                if *node >= LIMIT {
                    *node = self.nnum + *node % LIMIT;
                }
            }
        }
        if self.reference >= LIMIT {
            self.reference = self.nnum + self.reference % LIMIT;
        }
        if self.reserved >= LIMIT {
            self.reserved = self.nnum + self.reserved % LIMIT;
        }
        self.nnum += self.offset;
        self.offset = 0;
    }
}
