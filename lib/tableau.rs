//! The oracle for group-element identity, and the adapter that drives it from
//! gate lists.
//!
//! A [`Tableau`] is any representation of an *n*-qubit operator that can be
//! updated by the four generating gates and reduced to a canonical key: two
//! gate sequences realize the same group element if and only if the tableaus
//! they produce have equal keys. Two implementations are provided,
//! [`Stab`][crate::stab::Stab] and [`Unitary`][crate::unitary::Unitary].

use std::{ fmt, hash::Hash };
use crate::{
    error::GroupResult,
    gate::{ Gate, GateList },
};

/// An *n*-qubit operator built up gate by gate from the identity.
pub trait Tableau: Sized {
    /// Hashable, totally ordered value identifying the equivalence class of
    /// the operator.
    type Key: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display;

    /// Create the identity on `n` qubits.
    fn new(n: usize) -> Self;

    /// Return the number of qubits.
    fn num_qubits(&self) -> usize;

    fn apply_x(&mut self, k: usize) -> &mut Self;

    fn apply_y(&mut self, k: usize) -> &mut Self;

    fn apply_z(&mut self, k: usize) -> &mut Self;

    /// Apply a CNOT with control `a` and target `b`.
    fn apply_cnot(&mut self, a: usize, b: usize) -> &mut Self;

    fn canonical_key(&self) -> Self::Key;

    /// Human-readable rendering used in lookup diagnostics.
    fn describe(&self) -> String;
}

/// Perform the action of a gate after checking it against the tableau's
/// register size.
pub fn apply_gate<T>(tab: &mut T, gate: Gate) -> GroupResult<&mut T>
where T: Tableau
{
    gate.check(tab.num_qubits())?;
    let tab
        = match gate {
            Gate::X(k) => tab.apply_x(k),
            Gate::Y(k) => tab.apply_y(k),
            Gate::Z(k) => tab.apply_z(k),
            Gate::CX(a, b) => tab.apply_cnot(a, b),
        };
    Ok(tab)
}

/// Apply a series of gates, in order.
///
/// Stops at the first gate that does not fit the register, leaving the
/// tableau partially updated.
pub fn compose_gates<'a, T, I>(tab: &mut T, gates: I) -> GroupResult<&mut T>
where
    T: Tableau,
    I: IntoIterator<Item = &'a Gate>,
{
    for gate in gates.into_iter().copied() {
        apply_gate(tab, gate)?;
    }
    Ok(tab)
}

/// Like [`compose_gates`], but for gates in textual form.
///
/// Fails with [`UnsupportedGateKind`][crate::error::GroupError::UnsupportedGateKind]
/// on any unrecognized tag. Tokens are all parsed before any is applied.
pub fn compose_tokens<T, I, S>(tab: &mut T, tokens: I) -> GroupResult<&mut T>
where
    T: Tableau,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let gates = GateList::parse(tokens)?;
    compose_gates(tab, &gates)
}

/// Realize a gate list on a fresh `n`-qubit tableau.
pub fn from_gates<T>(n: usize, gates: &GateList) -> GroupResult<T>
where T: Tableau
{
    let mut tab = T::new(n);
    compose_gates(&mut tab, gates)?;
    Ok(tab)
}

/// Canonical key of the element realized by `gates` on `n` qubits.
pub fn key_of<T>(n: usize, gates: &GateList) -> GroupResult<T::Key>
where T: Tableau
{
    from_gates::<T>(n, gates).map(|tab| tab.canonical_key())
}
