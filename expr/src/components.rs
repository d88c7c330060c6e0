//! Connected components of a partially built tree, with support for undoing
//! the most recent link.

use sana_circuit::NodeId;

/// The component table of one graph view.
///
/// `root` labels every node with the id of its component representative.
/// `parent` describes each component as an oriented chain rooted at that
/// representative; [Components::link] re-roots the chain of the absorbed
/// component so that [Components::cut] can split it again. Cuts must undo
/// links in LIFO order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    root: Vec<NodeId>,
    parent: Vec<Option<NodeId>>,
}

impl Components {
    /// A table of `nnum` isolated nodes.
    pub fn new(nnum: usize) -> Self {
        Self { root: (0..nnum).collect(), parent: vec![None; nnum] }
    }

    /// Whether `a` and `b` lie in the same component, i.e. whether linking
    /// them would close a loop.
    pub fn connected(&self, a: NodeId, b: NodeId) -> bool {
        self.root[a] == self.root[b]
    }

    /// Adds the edge `(nt, nh)`, merging the component of `nh` into that of
    /// `nt`.
    pub fn link(&mut self, nt: NodeId, nh: NodeId) {
        let root = self.root[nh];
        let target = self.root[nt];
        for label in self.root.iter_mut() {
            if *label == root {
                *label = target;
            }
        }
        // Reverse the parent chain from nh up to its old representative, so
        // that the chain stays a consistent orientation once nh is
        // re-parented below.
        if self.parent[nh].is_some() {
            let mut below = nh;
            let mut cursor = self.parent[nh];
            while below != root {
                let Some(node) = cursor else { break };
                let next = self.parent[node];
                self.parent[node] = Some(below);
                below = node;
                cursor = next;
            }
        }
        self.parent[nh] = Some(nt);
    }

    /// Removes the edge `(nt, nh)`, splitting its component back in two.
    ///
    /// The edge must be the most recently linked edge still present; the node
    /// order may be given either way round.
    pub fn cut(&mut self, nt: NodeId, nh: NodeId) {
        let nh = if self.parent[nh] == Some(nt) { nh } else { nt };
        self.parent[nh] = None;
        self.root[nh] = nh;
        // relabel the side of the split now represented by nh, walking until
        // the labels reach a fixed point
        let mut changed = true;
        while changed {
            changed = false;
            for node in 0..self.root.len() {
                if node == nh {
                    continue;
                }
                if let Some(parent) = self.parent[node] {
                    if self.root[node] != nh && self.root[parent] == nh {
                        self.root[node] = nh;
                        changed = true;
                    }
                }
            }
        }
    }

    /// The number of nodes in the table.
    pub fn len(&self) -> usize {
        self.root.len()
    }
}
