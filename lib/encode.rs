//! Closed-form enumeration of group elements as gate sequences.
//!
//! Each supported group assigns every integer a [`GateList`] after reduction
//! modulo the group order, so any `i64` is a valid index. Composed with a
//! tableau's canonical key, the map from `[0, N)` is a bijection onto the
//! group; [`table`][crate::table] checks this on every build.
//!
//! The two-qubit CNOT-Pauli group (order 64) factors as four structural
//! cosets of the two-qubit Pauli group (order 16). Index `i` selects the coset
//! representative [`CNOT_PREFIXES`]`[i / 16]`, which is followed by the Pauli
//! residue `i % 16`.

use std::fmt;
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ check_dim, GroupResult },
    gate::{ Gate, GateList, Pauli },
};

/// Order of the single-qubit Pauli group (modulo phases).
pub const PAULI1_ORDER: usize = 4;

/// Order of the two-qubit Pauli group (modulo phases).
pub const PAULI2_ORDER: usize = 16;

/// Number of cosets of the two-qubit Pauli group in the two-qubit CNOT-Pauli
/// group.
pub const NUM_COSETS: usize = 4;

/// Order of the two-qubit CNOT-Pauli group (modulo phases).
pub const CNOT_PAULI2_ORDER: usize = NUM_COSETS * PAULI2_ORDER;

/// Coset representatives of the two-qubit Pauli group inside the two-qubit
/// CNOT-Pauli group, in canonical order.
///
/// The last is equivalent to a swap.
pub const CNOT_PREFIXES: [&[Gate]; NUM_COSETS] = [
    &[],
    &[Gate::CX(0, 1)],
    &[Gate::CX(0, 1), Gate::CX(1, 0)],
    &[Gate::CX(0, 1), Gate::CX(1, 0), Gate::CX(0, 1)],
];

/// A family of groups enumerated by this crate.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize,
)]
pub enum GroupFamily {
    /// Products of single-qubit Paulis.
    Pauli,
    /// The Pauli group extended by CNOTs.
    CNOTPauli,
}

impl fmt::Display for GroupFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pauli => write!(f, "Pauli"),
            Self::CNOTPauli => write!(f, "CNOT-Pauli"),
        }
    }
}

impl GroupFamily {
    /// Number of elements in the `num_qubits`-qubit group.
    pub fn order(self, num_qubits: usize) -> GroupResult<usize> {
        check_dim(num_qubits)?;
        match (self, num_qubits) {
            (Self::Pauli, 1) | (Self::CNOTPauli, 1) => Ok(PAULI1_ORDER),
            (Self::Pauli, _) => Ok(PAULI2_ORDER),
            (Self::CNOTPauli, _) => Ok(CNOT_PAULI2_ORDER),
        }
    }

    /// The canonical gate sequence for index `idx` in the `num_qubits`-qubit
    /// group.
    pub fn gates(self, num_qubits: usize, idx: i64) -> GroupResult<GateList> {
        check_dim(num_qubits)?;
        let gates
            = match (self, num_qubits) {
                (Self::Pauli, 1) => pauli1_gates(idx),
                (Self::Pauli, _) => pauli2_gates(idx),
                (Self::CNOTPauli, 1) => cnot_pauli1_gates(idx),
                (Self::CNOTPauli, _) => cnot_pauli2_gates(idx),
            };
        Ok(gates)
    }
}

fn reduce(idx: i64, order: usize) -> usize {
    idx.rem_euclid(order as i64) as usize
}

fn push_pauli(gates: &mut GateList, k: usize, pauli: Pauli) {
    if let Some(g) = pauli.gate(k) { gates.push(g); }
}

fn push_pauli2(gates: &mut GateList, pauli: usize) {
    push_pauli(gates, 0, Pauli::from_index(pauli % 4));
    push_pauli(gates, 1, Pauli::from_index(pauli / 4));
}

/// Single-qubit Pauli for index `idx` (mod 4).
pub fn pauli1_gates(idx: i64) -> GateList {
    let mut gates = GateList::new();
    push_pauli(&mut gates, 0, Pauli::from_index(reduce(idx, PAULI1_ORDER)));
    gates
}

/// Two-qubit Pauli for index `idx` (mod 16), read as the base-4 pair
/// `(idx % 4, idx / 4)` for qubits 0 and 1.
pub fn pauli2_gates(idx: i64) -> GateList {
    let mut gates = GateList::new();
    push_pauli2(&mut gates, reduce(idx, PAULI2_ORDER));
    gates
}

/// Single-qubit CNOT-Pauli for index `idx` (mod 4); identical to
/// [`pauli1_gates`].
pub fn cnot_pauli1_gates(idx: i64) -> GateList { pauli1_gates(idx) }

/// Two-qubit CNOT-Pauli for index `idx` (mod 64).
pub fn cnot_pauli2_gates(idx: i64) -> GateList {
    let canon = reduce(idx, CNOT_PAULI2_ORDER);
    let mut gates: GateList
        = CNOT_PREFIXES[canon / PAULI2_ORDER].iter().copied().collect();
    push_pauli2(&mut gates, canon % PAULI2_ORDER);
    gates
}
