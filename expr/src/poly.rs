//! The canonical symbolic expression: a sorted, fused sum of monomials.

/// One term of a polynomial in `s`: a numeric coefficient, a sorted list of
/// symbol names multiplied together, and the exponent of `s`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Monomial {
    pub coeff: f64,
    pub degree: i16,
    /// The symbolic factors, kept in lexicographic order.
    pub symbols: Vec<String>,
}

impl Monomial {
    /// The multiplicative unit: coefficient 1, no symbols, degree 0.
    pub fn unit() -> Self {
        Self { coeff: 1.0, degree: 0, symbols: Vec::new() }
    }

    /// Adds a symbolic factor, preserving the lexicographic order.
    pub fn push_symbol(&mut self, name: &str) {
        let index = self.symbols.partition_point(|symbol| symbol.as_str() < name);
        self.symbols.insert(index, name.to_string());
    }
}

/// A polynomial in `s`, stored as monomials sorted by descending degree.
///
/// Accumulation fuses like terms: two monomials of equal degree whose symbol
/// lists are identical sequences collapse into one by adding coefficients.
/// A fused coefficient may well be zero; such terms are kept, and it is up to
/// the emitters to render them appropriately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polynomial {
    terms: Vec<Monomial>,
}

impl Polynomial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a polynomial from terms that are already canonically ordered,
    /// e.g. read back from the binary cache.
    pub fn from_terms(terms: Vec<Monomial>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[Monomial] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Inserts a monomial at its canonical position, fusing it into an
    /// existing like term if there is one.
    pub fn insert(&mut self, monomial: Monomial) {
        let mut index = 0;
        for term in self.terms.iter_mut() {
            if monomial.degree > term.degree {
                break;
            }
            if monomial.degree == term.degree && term.symbols == monomial.symbols {
                term.coeff += monomial.coeff;
                return;
            }
            index += 1;
        }
        self.terms.insert(index, monomial);
    }
}

/// The outcome of the analysis: H(s) as numerator over denominator.
///
/// The numerator is the polynomial of the GREF enumeration pass, the
/// denominator that of the YREF pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferFunction {
    pub numerator: Polynomial,
    pub denominator: Polynomial,
}
