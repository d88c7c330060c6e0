//! The backtracking search for common spanning trees.

use sana_circuit::{Circuit, EdgeId};

use crate::{components::Components, evaluate::Evaluator, poly::Polynomial};

/// The search state machine.
///
/// Free edges are tried in strictly ascending position order, which makes the
/// enumeration deterministic: select the next position, reject it if it would
/// close a loop in either graph view, include it otherwise, and when the tree
/// is complete hand it to the evaluator before backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Advance to the next candidate position.
    Select,
    /// Reject the candidate if it loops in either graph.
    LoopTest,
    /// Push the candidate onto the tree.
    Include,
    /// Check whether the tree is complete.
    Test,
    /// No candidates left at this depth.
    End,
    /// Undo the most recent inclusion.
    Backtrack,
}

/// One run of the tree search for a single closing edge.
///
/// `tree` arrives holding the fixed prefix (every forced edge followed by the
/// closing edge), and both component tables arrive with exactly those edges
/// linked. The search leaves all three as it found them.
pub(crate) struct TreeSearch<'a> {
    circuit: &'a Circuit,
    ccgi: &'a mut Components,
    ccgv: &'a mut Components,
    tree: &'a mut Vec<EdgeId>,
}

impl<'a> TreeSearch<'a> {
    pub fn new(
        circuit: &'a Circuit,
        ccgi: &'a mut Components,
        ccgv: &'a mut Components,
        tree: &'a mut Vec<EdgeId>,
    ) -> Self {
        Self { circuit, ccgi, ccgv, tree }
    }

    /// Runs the search, folding the monomial of every complete common
    /// spanning tree into `poly`.
    pub fn run(&mut self, evaluator: &mut Evaluator, poly: &mut Polynomial) {
        let edges = self.circuit.edges();
        let ednum = edges.len() as isize;
        // a spanning tree of an nnum-node graph has nnum - 1 edges
        let sdim = self.circuit.nnum() - 1;
        let fixed = self.tree.len();

        let mut pos: isize = -1;
        let mut state = State::Select;
        loop {
            match state {
                State::Select => {
                    pos += 1;
                    let needed = (sdim - self.tree.len()) as isize;
                    state = if pos >= ednum || needed > ednum - pos {
                        State::End
                    } else {
                        State::LoopTest
                    };
                }
                State::LoopTest => {
                    let edge = &edges[pos as usize];
                    let loops = self.ccgi.connected(edge.gi.0, edge.gi.1)
                        || self.ccgv.connected(edge.gv.0, edge.gv.1);
                    state = if loops { State::Select } else { State::Include };
                }
                State::Include => {
                    let edge = &edges[pos as usize];
                    self.tree.push(EdgeId::from(pos as usize));
                    self.ccgi.link(edge.gi.0, edge.gi.1);
                    self.ccgv.link(edge.gv.0, edge.gv.1);
                    state = State::Test;
                }
                State::Test => {
                    if self.tree.len() == sdim {
                        evaluator.burn(self.circuit, self.tree, poly);
                        state = State::Backtrack;
                    } else {
                        state = State::Select;
                    }
                }
                State::End => {
                    if self.tree.len() == fixed {
                        break;
                    }
                    state = State::Backtrack;
                }
                State::Backtrack => {
                    // the End state breaks before the fixed prefix can be
                    // popped
                    let id = self.tree.pop().expect("backtracked into the fixed tree prefix");
                    let edge = self.circuit.edge(id);
                    pos = id.index() as isize;
                    self.ccgi.cut(edge.gi.0, edge.gi.1);
                    self.ccgv.cut(edge.gv.0, edge.gv.1);
                    state = State::Select;
                }
            }
        }
    }
}
