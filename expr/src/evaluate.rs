//! Evaluation of a single common spanning tree into a signed monomial.

use sana_circuit::{Circuit, EdgeId, EdgeKind};

use crate::poly::{Monomial, Polynomial};

/// Scratch state for turning completed trees into monomials.
///
/// The evaluator is reused across every tree of an analysis: the per-edge
/// mask is stamped with a fresh marker per tree instead of being cleared, and
/// the two incidence matrices are zeroed in place.
pub(crate) struct Evaluator {
    mask: Vec<u32>,
    mark: u32,
    gi_matrix: Vec<i32>,
    gv_matrix: Vec<i32>,
    nnum: usize,
}

impl Evaluator {
    pub fn new(circuit: &Circuit) -> Self {
        let nnum = circuit.nnum();
        Self {
            mask: vec![0; circuit.ednum()],
            mark: 0,
            gi_matrix: vec![0; nnum * (nnum - 1)],
            gv_matrix: vec![0; nnum * (nnum - 1)],
            nnum,
        }
    }

    /// Produces the monomial of the given complete tree and folds it into
    /// `poly`.
    ///
    /// An edge contributes a factor iff it is an admittance edge inside the
    /// tree or an impedance edge outside of it; forced and closing edges are
    /// structural and never contribute. The sign of the monomial is the
    /// product of the determinants of the two reduced incidence matrices.
    pub fn burn(&mut self, circuit: &Circuit, tree: &[EdgeId], poly: &mut Polynomial) {
        let cols = self.nnum - 1;
        self.mark += 1;
        for id in tree {
            self.mask[id.index()] = self.mark;
        }
        self.gi_matrix.fill(0);
        self.gv_matrix.fill(0);

        let mut monomial = Monomial::unit();
        let mut offset = 0;
        for (index, edge) in circuit.edges().iter().enumerate() {
            let in_tree = self.mask[index] == self.mark;
            if in_tree {
                self.gi_matrix[cols * edge.gi.0 + offset] = -1;
                self.gi_matrix[cols * edge.gi.1 + offset] = 1;
                self.gv_matrix[cols * edge.gv.0 + offset] = -1;
                self.gv_matrix[cols * edge.gv.1 + offset] = 1;
                offset += 1;
            }
            let contributes = (in_tree && edge.kind == EdgeKind::Admittance)
                || (!in_tree && edge.kind == EdgeKind::Impedance);
            if contributes {
                if edge.sym {
                    if let Some(name) = edge.name.as_deref() {
                        monomial.push_symbol(name);
                    }
                } else {
                    monomial.coeff *= edge.value;
                }
                monomial.degree += edge.degree;
            }
        }

        monomial.coeff *= f64::from(determinant(&mut self.gi_matrix, self.nnum, cols));
        monomial.coeff *= f64::from(determinant(&mut self.gv_matrix, self.nnum, cols));
        poly.insert(monomial);
    }
}

/// In-place Gauss elimination of a `rows x cols` integer matrix, returning
/// the determinant of its leading `cols x cols` part.
///
/// Incidence matrices of graphs are totally unimodular, so the arithmetic
/// stays exact in integers; for the incidence matrix of a spanning tree the
/// result is +1 or -1.
pub(crate) fn determinant(matrix: &mut [i32], rows: usize, cols: usize) -> i32 {
    let mut det = 1;
    for ofs in 0..cols {
        // find a pivot row for this column; a fully zero column leaves a zero
        // on the diagonal and the determinant collapses below
        let Some(pivot_row) = (ofs..rows).find(|&row| matrix[row * cols + ofs] != 0) else {
            continue;
        };
        if pivot_row != ofs {
            for col in ofs..cols {
                matrix.swap(pivot_row * cols + col, ofs * cols + col);
            }
            det = -det;
        }
        let pivot = matrix[ofs * cols + ofs];
        for row in (ofs + 1)..rows {
            let entry = matrix[row * cols + ofs];
            if entry != 0 {
                let weight = -pivot / entry;
                for col in ofs..cols {
                    matrix[row * cols + col] += matrix[ofs * cols + col] * weight;
                }
            }
        }
    }
    for index in 0..cols {
        det *= matrix[index * cols + index];
    }
    det
}
