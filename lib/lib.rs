//! Enumeration, sampling, and inversion for the small Pauli and CNOT-Pauli
//! groups used in randomized benchmarking.
//!
//! Every element of a group on one or two qubits is assigned a canonical index
//! by a fixed encoder ([`encode`]) that maps the index to a short sequence of
//! *X*, *Y*, *Z*, and CNOT gates. Elements are compared through a
//! [`Tableau`][tableau::Tableau], which reduces a gate sequence to a canonical
//! key; [`stab::Stab`] (a stabilizer tableau) and [`unitary::Unitary`] (a
//! dense matrix) are provided. [`group::Group`] ties these together with
//! cached lookup tables, seeded sampling, and inversion.
//!
//! The Pauli group mod phase has 4<sup>*n*</sup> elements; the CNOT-Pauli
//! group adds four CNOT cosets on two qubits, for 4 and 64 elements.

pub mod error;
pub mod gate;
pub mod encode;
pub mod tableau;
pub mod stab;
pub mod unitary;
pub mod table;
pub mod group;
pub mod rng;
