//! Errors raised while enumerating, realizing, or looking up group elements.
//!
//! Nothing here is recovered from locally: a wrong group-theoretic answer is
//! never an acceptable fallback, so every failure is handed straight back to
//! the caller.

use std::io;
use thiserror::Error;
use crate::encode::GroupFamily;

#[derive(Debug, Error)]
pub enum GroupError {
    /// Only one- and two-qubit groups are enumerated.
    #[error("the number of qubits should be only 1 or 2; got {num_qubits}")]
    UnsupportedDimension { num_qubits: usize },

    /// A gate token carried a tag other than `x`, `y`, `z`, or `cx`.
    #[error("unknown gate type: {0:?}")]
    UnsupportedGateKind(String),

    /// A gate token had the right tag but unusable operands.
    #[error("malformed gate: {0}")]
    MalformedGate(String),

    /// A gate addressed a qubit the tableau does not have.
    #[error("gate `{gate}` acts outside a {num_qubits}-qubit register")]
    QubitOutOfRange { gate: String, num_qubits: usize },

    /// Two encoder indices resolved to the same canonical key.
    #[error(
        "{family} table on {num_qubits} qubit(s) has {found} distinct \
        elements; expected {expected}"
    )]
    TableCardinality {
        family: GroupFamily,
        num_qubits: usize,
        expected: usize,
        found: usize,
    },

    /// An element's canonical key is absent from the group table.
    #[error("inverse not found in lookup table!\nkey: {key}\n{element}")]
    KeyNotFound { key: String, element: String },

    /// A persisted table disagrees with the group it claims to describe.
    #[error("table mismatch: {0}")]
    TableMismatch(String),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GroupResult<T> = Result<T, GroupError>;

/// Fail with [`GroupError::UnsupportedDimension`] unless `num_qubits` is 1 or
/// 2.
pub fn check_dim(num_qubits: usize) -> GroupResult<()> {
    if (1..=2).contains(&num_qubits) {
        Ok(())
    } else {
        Err(GroupError::UnsupportedDimension { num_qubits })
    }
}
