//! *n*-qubit Clifford operators in the Aaronson-Gottesman tableau
//! representation.
//!
//! Starting from the identity, the tableau tracks the images of the *n*
//! single-qubit *X* operators ("destabilizers") and the *n* single-qubit *Z*
//! operators ("stabilizers") under conjugation by the gates applied so far,
//! each as an *n*-qubit Pauli string with a sign. Those 2*n* images determine a
//! Clifford operator up to a global phase, which is exactly the equivalence
//! used to identify elements of the Pauli and CNOT-Pauli groups.
//!
//! Rows are bit-packed as in Scott Aaronson's CHP code (see
//! [arXiv:quant-ph/0406196][tableau] and [here][chp]): the (*i*, *j*)-th *x* and
//! *z* bits encode the *j*-th Pauli of the *i*-th row, and the phase of each
//! row is stored as a power of *i* (always 0 or 2 here).
//!
//! # Example
//! ```
//! use rb_groups::{ stab::Stab, tableau::Tableau };
//!
//! let mut stab = Stab::new(2);
//! stab.apply_cnot(0, 1).apply_x(0);
//! println!("{}", stab.as_group());
//! // -1 ZI | +1 XX
//! // -1 ZZ | +1 IX
//! ```
//!
//! [tableau]: https://arxiv.org/abs/quant-ph/0406196
//! [chp]: https://www.scottaaronson.com/chp/

use std::fmt;
use itertools::Itertools;
use serde::{ Deserialize, Serialize };
use crate::{
    gate::{ Pauli, Phase },
    tableau::Tableau,
};

const PW: [u32; 32] = [ // PW[i] = 2^i
    1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768,
    65536, 131072, 262144, 524288, 1048576, 2097152, 4194304, 8388608, 16777216,
    33554432, 67108864, 134217728, 268435456, 536870912, 1073741824, 2147483648
];

/// An `n`-qubit Clifford operator, identified by the signed images of the
/// single-qubit *X* and *Z* operators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stab {
    n: usize,
    // `x` and `z` are row-major bit arrays of size 2n × n; for space
    // efficiency, the columns are packed into u32s
    x: Vec<u32>, // Pauli-X bits; size 2n × over32
    z: Vec<u32>, // Pauli-Z bits; size 2n × over32
    r: Vec<u8>, // Phases (0 for +1, 2 for -1); size 2n
    over32: usize, // = floor(n / 32) + 1
}

impl Stab {
    #[inline]
    fn loc(&self, i: usize, k: usize) -> (usize, u32) {
        (i * self.over32 + (k >> 5), PW[k & 31])
    }

    fn xbit(&self, i: usize, k: usize) -> bool {
        let (w, pw) = self.loc(i, k);
        self.x[w] & pw != 0
    }

    fn zbit(&self, i: usize, k: usize) -> bool {
        let (w, pw) = self.loc(i, k);
        self.z[w] & pw != 0
    }

    // negate every row for which `anti(x_ik, z_ik)` holds, i.e. every row
    // anticommuting with a Pauli on qubit k
    fn flip_signs<F>(&mut self, k: usize, anti: F) -> &mut Self
    where F: Fn(bool, bool) -> bool
    {
        for i in 0..2 * self.n {
            if anti(self.xbit(i, k), self.zbit(i, k)) {
                self.r[i] = (self.r[i] + 2) % 4;
            }
        }
        self
    }

    /// Convert `self` to a more human-readable destabilizer/stabilizer group
    /// representation.
    pub fn as_group(&self) -> StabGroup {
        let rows: Vec<NPauli>
            = (0..2 * self.n)
            .map(|i| {
                NPauli {
                    phase: Phase::from_int(self.r[i]),
                    ops: (0..self.n)
                        .map(|k| Pauli::from_xz(self.xbit(i, k), self.zbit(i, k)))
                        .collect(),
                }
            })
            .collect();
        let (destab, stab) = rows.split_at(self.n);
        StabGroup { destab: destab.to_vec(), stab: stab.to_vec() }
    }
}

impl Tableau for Stab {
    type Key = StabKey;

    /// Create a new tableau for the identity on `n` qubits.
    fn new(n: usize) -> Self {
        let over32: usize = (n >> 5) + 1;
        let mut q = Self {
            n,
            x: vec![0; 2 * n * over32],
            z: vec![0; 2 * n * over32],
            r: vec![0; 2 * n],
            over32,
        };
        for k in 0..n {
            let (w, pw) = q.loc(k, k);
            q.x[w] = pw;
            let (w, pw) = q.loc(n + k, k);
            q.z[w] = pw;
        }
        q
    }

    fn num_qubits(&self) -> usize { self.n }

    fn apply_x(&mut self, k: usize) -> &mut Self {
        self.flip_signs(k, |_, z| z)
    }

    fn apply_y(&mut self, k: usize) -> &mut Self {
        self.flip_signs(k, |x, z| x ^ z)
    }

    fn apply_z(&mut self, k: usize) -> &mut Self {
        self.flip_signs(k, |x, _| x)
    }

    fn apply_cnot(&mut self, a: usize, b: usize) -> &mut Self {
        for i in 0..2 * self.n {
            let (wa, pwa) = self.loc(i, a);
            let (wb, pwb) = self.loc(i, b);
            if self.x[wa] & pwa != 0 { self.x[wb] ^= pwb; }
            if self.z[wb] & pwb != 0 { self.z[wa] ^= pwa; }
            if self.x[wa] & pwa != 0 && self.z[wb] & pwb != 0
                && self.x[wb] & pwb != 0 && self.z[wa] & pwa != 0
            { self.r[i] = (self.r[i] + 2) % 4; }
            if self.x[wa] & pwa != 0 && self.z[wb] & pwb != 0
                && self.x[wb] & pwb == 0 && self.z[wa] & pwa == 0
            { self.r[i] = (self.r[i] + 2) % 4; }
        }
        self
    }

    fn canonical_key(&self) -> StabKey {
        let words
            = (0..2 * self.n)
            .flat_map(|i| {
                let row = i * self.over32..(i + 1) * self.over32;
                self.x[row.clone()].iter()
                    .chain(&self.z[row])
                    .copied()
                    .chain(std::iter::once(u32::from(self.r[i])))
            })
            .collect();
        StabKey(words)
    }

    fn describe(&self) -> String { self.as_group().to_string() }
}

impl fmt::Display for Stab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_group(), f)
    }
}

/// Canonical key of a [`Stab`]: the packed rows of the tableau, each followed
/// by its phase.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize,
)]
pub struct StabKey(pub Vec<u32>);

impl fmt::Display for StabKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0.iter().format("."))
    }
}

/// A single `n`-qubit Pauli operator with a phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NPauli {
    pub phase: Phase,
    pub ops: Vec<Pauli>,
}

impl fmt::Display for NPauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.phase, f)?;
        write!(f, " ")?;
        self.ops.iter()
            .try_for_each(|p| fmt::Display::fmt(p, f))
    }
}

/// The images of the single-qubit *X* (`destab`) and *Z* (`stab`) operators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StabGroup {
    pub stab: Vec<NPauli>,
    pub destab: Vec<NPauli>,
}

impl fmt::Display for StabGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.stab.len();
        for (k, (stab, destab)) in
            self.stab.iter().zip(&self.destab).enumerate()
        {
            fmt::Display::fmt(stab, f)?;
            write!(f, " | ")?;
            fmt::Display::fmt(destab, f)?;
            if k < n - 1 { writeln!(f)?; }
        }
        Ok(())
    }
}
