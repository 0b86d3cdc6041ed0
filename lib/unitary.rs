//! Dense-matrix representation of small *n*-qubit operators.
//!
//! Slower than [`stab`][crate::stab] and exponential in *n*, but independent
//! of the tableau formalism, which makes it a useful second opinion on group
//! identity. Operators generated by *X*, *Y*, *Z*, and CNOT are monomial
//! matrices whose nonzero entries are powers of *i*, so they are held exactly
//! and keyed after dividing out the global phase.
//!
//! Qubit 0 is the most significant bit of a basis-state index.

use std::{ f64::consts::FRAC_PI_2, fmt };
use itertools::Itertools;
use nalgebra as na;
use num_complex::Complex64 as C64;
use once_cell::sync::Lazy;
use serde::{ Deserialize, Serialize };
use crate::tableau::Tableau;

/// A single-qubit identity matrix.
pub static PAULI_I: Lazy<na::DMatrix<C64>> =
    Lazy::new(|| na::DMatrix::identity(2, 2));

/// A single-qubit Pauli *X* matrix.
pub static PAULI_X: Lazy<na::DMatrix<C64>> =
    Lazy::new(|| {
        let mut x = na::DMatrix::zeros(2, 2);
        x[(0, 1)] = C64::from(1.0);
        x[(1, 0)] = C64::from(1.0);
        x
    });

/// A single-qubit Pauli *Y* matrix.
pub static PAULI_Y: Lazy<na::DMatrix<C64>> =
    Lazy::new(|| {
        let mut y = na::DMatrix::zeros(2, 2);
        y[(0, 1)] = -C64::i();
        y[(1, 0)] =  C64::i();
        y
    });

/// A single-qubit Pauli *Z* matrix.
pub static PAULI_Z: Lazy<na::DMatrix<C64>> =
    Lazy::new(|| {
        let mut z = na::DMatrix::zeros(2, 2);
        z[(0, 0)] = C64::from( 1.0);
        z[(1, 1)] = C64::from(-1.0);
        z
    });

const SYMBOLS: [&str; 5] = ["0", "1", "i", "-1", "-i"];

/// An `n`-qubit operator as a `2^n × 2^n` complex matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Unitary {
    n: usize,
    mat: na::DMatrix<C64>,
}

impl Unitary {
    /// Return a reference to the underlying matrix.
    pub fn matrix(&self) -> &na::DMatrix<C64> { &self.mat }

    fn mask(&self, k: usize) -> usize { 1 << (self.n - 1 - k) }

    // left-multiply by `op` acting on qubit k
    fn apply_single(&mut self, k: usize, op: &na::DMatrix<C64>) -> &mut Self {
        let full
            = (0..self.n)
            .fold(na::DMatrix::identity(1, 1), |acc: na::DMatrix<C64>, j| {
                if j == k { acc.kronecker(op) } else { acc.kronecker(Lazy::force(&PAULI_I)) }
            });
        self.mat = full * &self.mat;
        self
    }

    // entries divided by the first nonzero entry (column-major), encoded as
    // indices into `SYMBOLS`
    fn codes(&self) -> Vec<u8> {
        let Some(ph)
            = self.mat.iter().find(|z| z.norm() > 0.5).copied()
            else { return vec![0; self.mat.len()]; };
        self.mat.iter()
            .map(|z| {
                let w = z / ph;
                if w.norm() < 0.5 {
                    0
                } else {
                    let quarter = (w.arg() / FRAC_PI_2).round() as i64;
                    1 + quarter.rem_euclid(4) as u8
                }
            })
            .collect()
    }
}

impl Tableau for Unitary {
    type Key = UnitaryKey;

    fn new(n: usize) -> Self {
        let dim = 1_usize << n;
        Self { n, mat: na::DMatrix::identity(dim, dim) }
    }

    fn num_qubits(&self) -> usize { self.n }

    fn apply_x(&mut self, k: usize) -> &mut Self {
        self.apply_single(k, &PAULI_X)
    }

    fn apply_y(&mut self, k: usize) -> &mut Self {
        self.apply_single(k, &PAULI_Y)
    }

    fn apply_z(&mut self, k: usize) -> &mut Self {
        self.apply_single(k, &PAULI_Z)
    }

    fn apply_cnot(&mut self, a: usize, b: usize) -> &mut Self {
        // CNOT permutes basis states; it is its own inverse, so row t of the
        // product is row perm(t) of the original
        let (ma, mb) = (self.mask(a), self.mask(b));
        let perm = |s: usize| if s & ma != 0 { s ^ mb } else { s };
        let dim = self.mat.nrows();
        let mat = &self.mat;
        self.mat = na::DMatrix::from_fn(dim, dim, |t, c| mat[(perm(t), c)]);
        self
    }

    fn canonical_key(&self) -> UnitaryKey { UnitaryKey(self.codes()) }

    fn describe(&self) -> String { self.to_string() }
}

/// Prints the phase-normalized matrix, one row per line.
impl fmt::Display for Unitary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes = self.codes();
        let dim = self.mat.nrows();
        for row in 0..dim {
            let line
                = (0..dim)
                .map(|col| format!("{:>2}", SYMBOLS[codes[col * dim + row] as usize]))
                .join(" ");
            write!(f, "{}", line)?;
            if row < dim - 1 { writeln!(f)?; }
        }
        Ok(())
    }
}

/// Canonical key of a [`Unitary`]: its entries in column-major order after
/// normalizing the global phase, each encoded as `0` for zero or `1 + k` for
/// *i*<sup>*k*</sup>.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize,
)]
pub struct UnitaryKey(pub Vec<u8>);

impl fmt::Display for UnitaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn c(re: f64) -> C64 { C64::from(re) }

    #[test]
    fn qubit_ordering() {
        let mut u = Unitary::new(2);
        u.apply_x(0);
        // |00> -> |10>
        assert_eq!(u.matrix()[(2, 0)], c(1.0));
        assert_eq!(u.matrix()[(0, 0)], c(0.0));
        let mut u = Unitary::new(2);
        u.apply_x(1);
        assert_eq!(u.matrix()[(1, 0)], c(1.0));
    }

    #[test]
    fn cnot_matrix() {
        let mut u = Unitary::new(2);
        u.apply_cnot(0, 1);
        let expected = na::DMatrix::from_row_slice(4, 4, &[
            c(1.0), c(0.0), c(0.0), c(0.0),
            c(0.0), c(1.0), c(0.0), c(0.0),
            c(0.0), c(0.0), c(0.0), c(1.0),
            c(0.0), c(0.0), c(1.0), c(0.0),
        ]);
        assert_eq!(u.matrix(), &expected);
        u.apply_cnot(0, 1);
        assert_eq!(u, Unitary::new(2));
    }

    #[test]
    fn global_phase_ignored() {
        let mut y = Unitary::new(1);
        y.apply_y(0);
        let mut xz = Unitary::new(1);
        xz.apply_x(0).apply_z(0);
        assert_ne!(y.matrix(), xz.matrix());
        assert_eq!(y.canonical_key(), xz.canonical_key());
        assert_eq!(y.to_string(), " 0 -1\n 1  0");
    }

    #[test]
    fn keys() {
        assert_eq!(Unitary::new(1).canonical_key().to_string(), "1001");
        let mut z = Unitary::new(1);
        z.apply_z(0);
        assert_eq!(z.canonical_key(), UnitaryKey(vec![1, 0, 0, 3]));
    }
}
