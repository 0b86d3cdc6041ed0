//! Per-family entry point for tables, sampling, inversion, and lookup.
//!
//! A [`Group`] fixes a [`GroupFamily`] and a [`Tableau`] implementation and
//! caches one [`GroupTable`] per qubit count. Tables are built lazily on the
//! first call that needs them and kept until [`Group::rebuild_tables`].
//!
//! # Thread safety
//! Each cached table sits in a [`OnceCell`], so concurrent first accesses
//! through a shared `&Group` build a table at most once and never see one half
//! built. Calls that change the working gate list or the cache take
//! `&mut self`; sharing a `Group` between threads that call them requires
//! external locking.
//!
//! # Example
//! ```
//! use rb_groups::group::Group;
//!
//! let mut group = Group::cnot_pauli();
//! let gates = group.random_gates(2).unwrap();
//! let inverse = group.find_inverse_gates(2, &gates).unwrap();
//! let mut elem = group.from_gates(2, &gates).unwrap();
//! group.compose_gates(&mut elem, &inverse).unwrap();
//! assert_eq!(group.find_index(&elem, 2).unwrap(), 0);
//! ```

use once_cell::sync::OnceCell;
use rand::Rng;
use tracing::trace;
use crate::{
    encode::GroupFamily,
    error::{ check_dim, GroupError, GroupResult },
    gate::GateList,
    rng,
    stab::Stab,
    table::GroupTable,
    tableau::{ self, Tableau },
};

/// The Pauli or CNOT-Pauli group on one or two qubits, with cached lookup
/// tables.
pub struct Group<T = Stab>
where T: Tableau
{
    family: GroupFamily,
    num_qubits: usize,
    tables: [OnceCell<GroupTable<T::Key>>; 2], // indexed by num_qubits - 1
    gatelist: Option<GateList>,
}

impl Group {
    /// Two-qubit Pauli group, identified by stabilizer tableaus.
    pub fn pauli() -> Self { Self::with_defaults(GroupFamily::Pauli) }

    /// Two-qubit CNOT-Pauli group, identified by stabilizer tableaus.
    pub fn cnot_pauli() -> Self { Self::with_defaults(GroupFamily::CNOTPauli) }

    fn with_defaults(family: GroupFamily) -> Self {
        Self {
            family,
            num_qubits: 2,
            tables: Default::default(),
            gatelist: None,
        }
    }
}

impl<T> Group<T>
where T: Tableau
{
    /// Create a new group of the given family on `num_qubits` qubits, with no
    /// tables built yet.
    pub fn new(family: GroupFamily, num_qubits: usize) -> GroupResult<Self> {
        check_dim(num_qubits)?;
        Ok(Self {
            family,
            num_qubits,
            tables: Default::default(),
            gatelist: None,
        })
    }

    pub fn family(&self) -> GroupFamily { self.family }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.num_qubits }

    /// Most recent gate list produced by sampling or composition.
    pub fn gatelist(&self) -> Option<&GateList> { self.gatelist.as_ref() }

    /// Return the cached table for `num_qubits` qubits, if it has been built.
    pub fn group_tables(&self, num_qubits: usize)
        -> Option<&GroupTable<T::Key>>
    {
        check_dim(num_qubits).ok()?;
        self.tables[num_qubits - 1].get()
    }

    /// Return the table for `num_qubits` qubits, building it on first use.
    pub fn load_tables(&self, num_qubits: usize)
        -> GroupResult<&GroupTable<T::Key>>
    {
        check_dim(num_qubits)?;
        self.tables[num_qubits - 1]
            .get_or_try_init(|| GroupTable::build::<T>(self.family, num_qubits))
    }

    /// Discard every cached table.
    pub fn rebuild_tables(&mut self) {
        self.tables = Default::default();
    }

    /// Replace the cached table for `table.num_qubits()` qubits, e.g. with
    /// one read by [`GroupTable::load_json`].
    pub fn install_table(&mut self, table: GroupTable<T::Key>)
        -> GroupResult<()>
    {
        check_dim(table.num_qubits())?;
        if table.family() != self.family {
            return Err(GroupError::TableMismatch(
                format!(
                    "cannot install a {} table in a {} group",
                    table.family(), self.family,
                )
            ));
        }
        let k = table.num_qubits() - 1;
        self.tables[k] = OnceCell::from(table);
        Ok(())
    }

    /// Pick a uniformly random element on `num_qubits` qubits using the
    /// process-wide generator (see [`rng::seed`]).
    ///
    /// The result also becomes the working gate list.
    pub fn random_gates(&mut self, num_qubits: usize) -> GroupResult<GateList> {
        rng::with_global(|rng| self.random_gates_with(num_qubits, rng))
    }

    /// Like [`Self::random_gates`], but drawing from `rng`.
    pub fn random_gates_with<R>(&mut self, num_qubits: usize, rng: &mut R)
        -> GroupResult<GateList>
    where R: Rng + ?Sized
    {
        let order = self.family.order(num_qubits)?;
        let idx: usize = rng.gen_range(0..order);
        trace!(family = %self.family, num_qubits, idx, "sampled group index");
        let gates = self.family.gates(num_qubits, idx as i64)?;
        self.gatelist = Some(gates.clone());
        Ok(gates)
    }

    /// Find the inverse of an element on `num_qubits` qubits.
    ///
    /// This is the input in reverse order, which is the group inverse only
    /// because every gate kind is its own inverse (see
    /// [`Gate::is_involution`][crate::gate::Gate::is_involution]).
    pub fn find_inverse_gates(&self, num_qubits: usize, gatelist: &GateList)
        -> GroupResult<GateList>
    {
        check_dim(num_qubits)?;
        debug_assert!(gatelist.iter().all(|g| g.is_involution()));
        Ok(gatelist.reversed())
    }

    /// Realize `gatelist` on a fresh `num_qubits`-qubit tableau and make it
    /// the working gate list.
    pub fn from_gates(&mut self, num_qubits: usize, gatelist: &GateList)
        -> GroupResult<T>
    {
        check_dim(num_qubits)?;
        let tab = tableau::from_gates::<T>(num_qubits, gatelist)?;
        self.gatelist = Some(gatelist.clone());
        Ok(tab)
    }

    /// Apply `gatelist` to an existing tableau and make it the working gate
    /// list.
    pub fn compose_gates<'a>(&mut self, tab: &'a mut T, gatelist: &GateList)
        -> GroupResult<&'a mut T>
    {
        let tab = tableau::compose_gates(tab, gatelist)?;
        self.gatelist = Some(gatelist.clone());
        Ok(tab)
    }

    /// Find the canonical key of `elem`, checking that it belongs to the
    /// `num_qubits`-qubit group.
    ///
    /// [`GroupError::KeyNotFound`] here means `elem` lies outside the group
    /// (or the table is corrupt), not a recoverable condition.
    pub fn find_key(&self, elem: &T, num_qubits: usize) -> GroupResult<T::Key> {
        let table = self.load_tables(num_qubits)?;
        let key = elem.canonical_key();
        if table.contains_key(&key) {
            Ok(key)
        } else {
            Err(GroupError::KeyNotFound {
                key: key.to_string(),
                element: elem.describe(),
            })
        }
    }

    /// Find the canonical index of `elem` in the `num_qubits`-qubit group.
    pub fn find_index(&self, elem: &T, num_qubits: usize) -> GroupResult<usize> {
        let key = self.find_key(elem, num_qubits)?;
        self.load_tables(num_qubits)?
            .index_of(&key)
            .ok_or_else(|| GroupError::KeyNotFound {
                key: key.to_string(),
                element: elem.describe(),
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{ rngs::StdRng, SeedableRng };
    use crate::{
        encode::cnot_pauli2_gates,
        gate::Gate,
        unitary::Unitary,
    };

    const FAMILIES: [GroupFamily; 2] = [GroupFamily::Pauli, GroupFamily::CNOTPauli];

    fn group<T: Tableau>(family: GroupFamily) -> Group<T> {
        Group::<T>::new(family, 2).unwrap()
    }

    fn tables_are_cached<T: Tableau>() {
        for family in FAMILIES {
            let mut g = group::<T>(family);
            assert!(g.group_tables(1).is_none());
            assert!(g.group_tables(2).is_none());
            let first = g.load_tables(2).unwrap() as *const _;
            let second = g.load_tables(2).unwrap() as *const _;
            assert_eq!(first, second);
            assert!(g.group_tables(1).is_none());
            assert_eq!(g.group_tables(2).unwrap().len(), family.order(2).unwrap());
            assert_eq!(g.load_tables(1).unwrap().len(), 4);
            g.rebuild_tables();
            assert!(g.group_tables(1).is_none());
            assert!(g.group_tables(2).is_none());
        }
    }

    fn inverses_cancel<T: Tableau>() {
        for family in FAMILIES {
            for n in 1..=2 {
                let mut g = group::<T>(family);
                let identity = T::new(n).canonical_key();
                let lists: Vec<GateList>
                    = g.load_tables(n).unwrap()
                    .iter()
                    .map(|(_, gates)| gates.clone())
                    .collect();
                for gates in lists {
                    let inverse = g.find_inverse_gates(n, &gates).unwrap();
                    assert_eq!(
                        inverse.iter().copied().collect::<Vec<Gate>>(),
                        gates.iter().rev().copied().collect::<Vec<Gate>>(),
                    );
                    let mut elem = g.from_gates(n, &gates).unwrap();
                    g.compose_gates(&mut elem, &inverse).unwrap();
                    assert_eq!(elem.canonical_key(), identity);
                    assert_eq!(g.find_index(&elem, n).unwrap(), 0);
                    assert_eq!(g.gatelist(), Some(&inverse));
                }
            }
        }
    }

    #[test]
    fn stab_cache() { tables_are_cached::<Stab>(); }

    #[test]
    fn unitary_cache() { tables_are_cached::<Unitary>(); }

    #[test]
    fn stab_inverses() { inverses_cancel::<Stab>(); }

    #[test]
    fn unitary_inverses() { inverses_cancel::<Unitary>(); }

    #[test]
    fn defaults() {
        let g = Group::pauli();
        assert_eq!(g.family(), GroupFamily::Pauli);
        assert_eq!(g.num_qubits(), 2);
        assert!(g.gatelist().is_none());
        assert_eq!(Group::cnot_pauli().family(), GroupFamily::CNOTPauli);
    }

    #[test]
    fn unsupported_dimensions() {
        assert!(matches!(
            Group::<Stab>::new(GroupFamily::Pauli, 3),
            Err(GroupError::UnsupportedDimension { num_qubits: 3 })
        ));
        let mut g = Group::cnot_pauli();
        for n in [0, 3] {
            assert!(matches!(
                g.load_tables(n),
                Err(GroupError::UnsupportedDimension { .. })
            ));
            assert!(matches!(
                g.random_gates_with(n, &mut StdRng::seed_from_u64(0)),
                Err(GroupError::UnsupportedDimension { .. })
            ));
            assert!(matches!(
                g.find_inverse_gates(n, &GateList::new()),
                Err(GroupError::UnsupportedDimension { .. })
            ));
            assert!(g.group_tables(n).is_none());
        }
        assert!(g.gatelist().is_none());
    }

    #[test]
    fn seeded_sampling_repeats() {
        for family in FAMILIES {
            for n in 1..=2 {
                let mut g = group::<Stab>(family);
                for seed in 0..20 {
                    let a = g.random_gates_with(n, &mut StdRng::seed_from_u64(seed))
                        .unwrap();
                    assert_eq!(g.gatelist(), Some(&a));
                    let b = g.random_gates_with(n, &mut StdRng::seed_from_u64(seed))
                        .unwrap();
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn global_seeded_sampling_repeats() {
        let mut g = Group::cnot_pauli();
        rng::seed(1234);
        let a: Vec<GateList>
            = (0..10).map(|_| g.random_gates(2).unwrap()).collect();
        rng::seed(1234);
        let b: Vec<GateList>
            = (0..10).map(|_| g.random_gates(2).unwrap()).collect();
        assert_eq!(a, b);
        assert_eq!(g.gatelist(), b.last());
    }

    #[test]
    fn sampling_covers_group() {
        let mut g = Group::cnot_pauli();
        let mut rng = StdRng::seed_from_u64(5);
        let table = GroupTable::<<Stab as Tableau>::Key>::build::<Stab>(
            GroupFamily::CNOTPauli, 2).unwrap();
        let mut hits = [0_usize; 64];
        for _ in 0..64 * 100 {
            let gates = g.random_gates_with(2, &mut rng).unwrap();
            let key = tableau::key_of::<Stab>(2, &gates).unwrap();
            hits[table.index_of(&key).unwrap()] += 1;
        }
        assert!(hits.iter().all(|&h| h > 0));
    }

    #[test]
    fn key_and_index_lookup() {
        let mut g = Group::cnot_pauli();
        let gates = cnot_pauli2_gates(17);
        let elem = g.from_gates(2, &gates).unwrap();
        assert_eq!(g.gatelist(), Some(&gates));
        let key = g.find_key(&elem, 2).unwrap();
        assert_eq!(key, elem.canonical_key());
        assert_eq!(g.find_index(&elem, 2).unwrap(), 17);
        assert_eq!(g.load_tables(2).unwrap().get(&key), Some(&gates));
    }

    #[test]
    fn foreign_element_not_found() {
        let mut g = Group::pauli();
        let gates: GateList = vec![Gate::CX(0, 1), Gate::X(1)].into();
        let elem = g.from_gates(2, &gates).unwrap();
        match g.find_key(&elem, 2) {
            Err(GroupError::KeyNotFound { key, element }) => {
                assert_eq!(key, elem.canonical_key().to_string());
                assert_eq!(element, elem.to_string());
            },
            other => panic!("expected KeyNotFound, got {:?}", other),
        }
        assert!(matches!(
            g.find_index(&elem, 2),
            Err(GroupError::KeyNotFound { .. })
        ));
        // same element is fine in the larger group
        assert_eq!(Group::cnot_pauli().find_index(&elem, 2).unwrap(), 16 + 8);
    }

    #[test]
    fn install_loaded_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pauli2.json");
        GroupTable::<<Stab as Tableau>::Key>::build::<Stab>(GroupFamily::Pauli, 2)
            .unwrap()
            .save_json(&path)
            .unwrap();
        let table = GroupTable::load_json::<Stab, _>(&path).unwrap();

        let mut g = Group::pauli();
        g.install_table(table.clone()).unwrap();
        assert_eq!(g.group_tables(2), Some(&table));

        let mut h = Group::cnot_pauli();
        assert!(matches!(
            h.install_table(table),
            Err(GroupError::TableMismatch(_))
        ));
        assert!(h.group_tables(2).is_none());
    }
}
