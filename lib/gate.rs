//! Primitive gates generating the Pauli and CNOT-Pauli groups, and ordered
//! lists of them.
//!
//! Every gate here is an involution, which is what lets
//! [`GateList::reversed`] double as a group inverse.
//!
//! Gates have a fixed textual form used for storage and golden comparisons:
//!
//! | Gate            | Text         |
//! | :-------------- | :----------- |
//! | `X(q)`          | `x <q>`      |
//! | `Y(q)`          | `y <q>`      |
//! | `Z(q)`          | `z <q>`      |
//! | `CX(c, t)`      | `cx <c> <t>` |

use std::{ fmt, str::FromStr };
use itertools::Itertools;
use serde::{ Deserialize, Serialize };
use crate::error::{ GroupError, GroupResult };

/// The argument of a complex phase factor, limited to integer multiples of
/// π/2.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// 0
    Pi0,
    /// π/2
    Pi1h,
    /// π
    Pi,
    /// 3π/2
    Pi3h,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Pi0 => write!(f, "+1"),
            Self::Pi1h => write!(f, "+i"),
            Self::Pi => write!(f, "-1"),
            Self::Pi3h => write!(f, "-i"),
        }
    }
}

impl Phase {
    /// Convert to the bare multiple of π/2.
    pub fn to_int(&self) -> u8 {
        match self {
            Self::Pi0  => 0,
            Self::Pi1h => 1,
            Self::Pi   => 2,
            Self::Pi3h => 3,
        }
    }

    /// Convert from a bare multiple of π/2 (modulo 4).
    pub fn from_int(i: u8) -> Self {
        match i % 4 {
            0 => Self::Pi0,
            1 => Self::Pi1h,
            2 => Self::Pi,
            3 => Self::Pi3h,
            _ => unreachable!(),
        }
    }
}

/// Tag identifying the kind of a [`Gate`], independent of its operands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GateKind {
    X,
    Y,
    Z,
    CX,
}

impl GateKind {
    /// Textual tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::CX => "cx",
        }
    }

    /// Number of qubit operands taken by gates of this kind.
    pub fn arity(self) -> usize {
        match self {
            Self::X | Self::Y | Self::Z => 1,
            Self::CX => 2,
        }
    }
}

impl FromStr for GateKind {
    type Err = GroupError;

    fn from_str(s: &str) -> GroupResult<Self> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            "cx" => Ok(Self::CX),
            _ => Err(GroupError::UnsupportedGateKind(s.to_string())),
        }
    }
}

/// Description of a single gate on a small register of qubits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gate {
    /// π rotation about X
    X(usize),
    /// π rotation about Y
    Y(usize),
    /// π rotation about Z
    Z(usize),
    /// Z-controlled π rotation about X.
    ///
    /// The first qubit index is the control.
    CX(usize, usize),
}

impl Gate {
    /// Return `true` if `self` is `X`.
    pub fn is_x(&self) -> bool { matches!(self, Self::X(..)) }

    /// Return `true` if `self` is `Y`.
    pub fn is_y(&self) -> bool { matches!(self, Self::Y(..)) }

    /// Return `true` if `self` is `Z`.
    pub fn is_z(&self) -> bool { matches!(self, Self::Z(..)) }

    /// Return `true` if `self` is `CX`.
    pub fn is_cx(&self) -> bool { matches!(self, Self::CX(..)) }

    pub fn kind(&self) -> GateKind {
        match self {
            Self::X(..) => GateKind::X,
            Self::Y(..) => GateKind::Y,
            Self::Z(..) => GateKind::Z,
            Self::CX(..) => GateKind::CX,
        }
    }

    /// Return `true` if applying `self` twice is the identity.
    ///
    /// Holds for every gate kind currently defined. A non-involutive kind
    /// added here would break inversion by reversal.
    pub fn is_involution(&self) -> bool {
        match self.kind() {
            GateKind::X | GateKind::Y | GateKind::Z | GateKind::CX => true,
        }
    }

    /// Verify that all qubit indices are less than `n` and that two-qubit
    /// gate indices are non-equal.
    pub fn check(&self, n: usize) -> GroupResult<()> {
        match *self {
            Self::X(k) | Self::Y(k) | Self::Z(k) if k < n => Ok(()),
            Self::CX(a, b) if a == b
                => Err(GroupError::MalformedGate(
                    format!("`{}` has equal control and target", self))),
            Self::CX(a, b) if a < n && b < n => Ok(()),
            _ => Err(GroupError::QubitOutOfRange {
                gate: self.to_string(),
                num_qubits: n,
            }),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::X(k) | Self::Y(k) | Self::Z(k)
                => write!(f, "{} {}", self.kind().tag(), k),
            Self::CX(a, b) => write!(f, "{} {} {}", self.kind().tag(), a, b),
        }
    }
}

impl FromStr for Gate {
    type Err = GroupError;

    fn from_str(s: &str) -> GroupResult<Self> {
        let mut parts = s.split_whitespace();
        let kind: GateKind
            = parts.next()
            .ok_or_else(|| GroupError::MalformedGate("empty gate".into()))?
            .parse()?;
        let qubits: Vec<usize>
            = parts
            .map(|p| {
                p.parse::<usize>()
                    .map_err(|_| GroupError::MalformedGate(
                        format!("bad qubit index {:?} in {:?}", p, s)))
            })
            .collect::<GroupResult<_>>()?;
        if qubits.len() != kind.arity() {
            return Err(GroupError::MalformedGate(
                format!(
                    "{:?} takes {} qubit(s); got {:?}",
                    kind.tag(), kind.arity(), s,
                )
            ));
        }
        match kind {
            GateKind::X => Ok(Self::X(qubits[0])),
            GateKind::Y => Ok(Self::Y(qubits[0])),
            GateKind::Z => Ok(Self::Z(qubits[0])),
            GateKind::CX => Ok(Self::CX(qubits[0], qubits[1])),
        }
    }
}

/// A single-qubit Pauli operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// σ<sub>*x*</sub>
    X,
    /// σ<sub>*y*</sub>
    Y,
    /// σ<sub>*z*</sub>
    Z,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::I => write!(f, "{}", if f.alternate() { "." } else { "I" }),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Pauli {
    /// Decode a single-qubit Pauli from its index in the benchmarking
    /// ordering (modulo 4): `0 → I`, `1 → Z`, `2 → X`, `3 → Y`.
    pub fn from_index(u: usize) -> Self {
        match u % 4 {
            0 => Self::I,
            1 => Self::Z,
            2 => Self::X,
            3 => Self::Y,
            _ => unreachable!(),
        }
    }

    /// Inverse of [`Self::from_index`].
    pub fn to_index(self) -> usize {
        match self {
            Self::I => 0,
            Self::Z => 1,
            Self::X => 2,
            Self::Y => 3,
        }
    }

    /// The gate applying `self` to qubit `k`, or `None` for the identity.
    pub fn gate(self, k: usize) -> Option<Gate> {
        match self {
            Self::I => None,
            Self::X => Some(Gate::X(k)),
            Self::Y => Some(Gate::Y(k)),
            Self::Z => Some(Gate::Z(k)),
        }
    }

    pub(crate) fn from_xz(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Self::I,
            (true,  false) => Self::X,
            (true,  true ) => Self::Y,
            (false, true ) => Self::Z,
        }
    }
}

/// An ordered series of [`Gate`]s realizing one group element.
///
/// Representations are not unique: two different lists may realize the same
/// element, so equality here is structural only. Group identity is decided by
/// a [`Tableau`][crate::tableau::Tableau]'s canonical key.
///
/// (De)serializes as a sequence of textual gate tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct GateList(Vec<Gate>);

impl IntoIterator for GateList {
    type Item = Gate;
    type IntoIter = <Vec<Gate> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a> IntoIterator for &'a GateList {
    type Item = &'a Gate;
    type IntoIter = <&'a Vec<Gate> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl FromIterator<Gate> for GateList {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = Gate>
    {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Gate>> for GateList {
    fn from(gates: Vec<Gate>) -> Self { Self(gates) }
}

impl AsRef<[Gate]> for GateList {
    fn as_ref(&self) -> &[Gate] { &self.0 }
}

impl From<GateList> for Vec<String> {
    fn from(gates: GateList) -> Self { gates.to_tokens() }
}

impl TryFrom<Vec<String>> for GateList {
    type Error = GroupError;

    fn try_from(tokens: Vec<String>) -> GroupResult<Self> {
        Self::parse(tokens)
    }
}

impl fmt::Display for GateList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

impl GateList {
    pub fn new() -> Self { Self(Vec::new()) }

    /// Parse a series of textual gate tokens.
    pub fn parse<I, S>(tokens: I) -> GroupResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens.into_iter()
            .map(|tok| tok.as_ref().parse::<Gate>())
            .collect()
    }

    /// Render as a series of textual gate tokens.
    pub fn to_tokens(&self) -> Vec<String> {
        self.0.iter().map(|g| g.to_string()).collect()
    }

    pub fn push(&mut self, gate: Gate) { self.0.push(gate); }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Gate> { self.0.iter() }

    /// Return a copy of `self` with the gate order reversed.
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }

    /// Verify every gate against an `n`-qubit register.
    pub fn check(&self, n: usize) -> GroupResult<()> {
        self.0.iter().try_for_each(|g| g.check(n))
    }
}
