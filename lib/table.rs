//! Lookup tables from canonical keys to gate sequences.
//!
//! A table is built by running every index of a group through the encoder in
//! [`encode`][crate::encode], realizing the result on a fresh [`Tableau`], and
//! recording the resulting key. Since the encoder is meant to be a bijection
//! onto the group, a complete table has exactly as many distinct keys as the
//! group has elements; anything less is reported as
//! [`GroupError::TableCardinality`] rather than silently kept.
//!
//! Tables can be saved to and loaded from JSON. A loaded table is checked
//! against the group it names before it is handed out.

use std::{
    fmt,
    fs,
    hash::Hash,
    io::Write,
    path::Path,
};
use rustc_hash::FxHashMap;
use serde::{ de::DeserializeOwned, Deserialize, Serialize };
use tracing::debug;
use crate::{
    encode::GroupFamily,
    error::{ GroupError, GroupResult },
    gate::GateList,
    tableau::{ self, Tableau },
};

/// Every element of one group, addressable by canonical key or by canonical
/// index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupTable<K>
where K: Eq + Hash
{
    family: GroupFamily,
    num_qubits: usize,
    gates: Vec<GateList>, // indexed by canonical index
    index: FxHashMap<K, usize>,
}

#[derive(Serialize, Deserialize)]
struct TableFile<K> {
    family: GroupFamily,
    num_qubits: usize,
    entries: Vec<TableEntry<K>>,
}

#[derive(Serialize, Deserialize)]
struct TableEntry<K> {
    key: K,
    gates: GateList,
}

impl<K> GroupTable<K>
where K: Clone + Eq + Hash + Ord + fmt::Display
{
    /// Build the complete table for the `num_qubits`-qubit group of `family`,
    /// using `T` to identify elements.
    pub fn build<T>(family: GroupFamily, num_qubits: usize) -> GroupResult<Self>
    where T: Tableau<Key = K>
    {
        let order = family.order(num_qubits)?;
        let mut gates: Vec<GateList> = Vec::with_capacity(order);
        let mut index: FxHashMap<K, usize>
            = FxHashMap::with_capacity_and_hasher(order, Default::default());
        for idx in 0..order {
            let circ = family.gates(num_qubits, idx as i64)?;
            let key = tableau::key_of::<T>(num_qubits, &circ)?;
            index.insert(key, idx);
            gates.push(circ);
        }
        let table = Self { family, num_qubits, gates, index };
        table.check_cardinality(order)?;
        debug!(
            family = %family,
            num_qubits,
            entries = table.len(),
            "built group table",
        );
        Ok(table)
    }

    fn check_cardinality(&self, expected: usize) -> GroupResult<()> {
        if self.index.len() == expected && self.gates.len() == expected {
            Ok(())
        } else {
            Err(GroupError::TableCardinality {
                family: self.family,
                num_qubits: self.num_qubits,
                expected,
                found: self.index.len(),
            })
        }
    }

    pub fn family(&self) -> GroupFamily { self.family }

    pub fn num_qubits(&self) -> usize { self.num_qubits }

    /// Number of distinct elements.
    pub fn len(&self) -> usize { self.index.len() }

    pub fn is_empty(&self) -> bool { self.index.is_empty() }

    pub fn contains_key(&self, key: &K) -> bool { self.index.contains_key(key) }

    /// Gate sequence realizing the element with canonical key `key`.
    pub fn get(&self, key: &K) -> Option<&GateList> {
        self.index.get(key).map(|&idx| &self.gates[idx])
    }

    /// Canonical index of the element with canonical key `key`.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Gate sequence for canonical index `idx`.
    pub fn gates_at(&self, idx: usize) -> Option<&GateList> {
        self.gates.get(idx)
    }

    /// Iterate over `(key, gates)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &GateList)> + '_ {
        let mut keyed: Vec<(&K, usize)>
            = self.index.iter().map(|(k, &idx)| (k, idx)).collect();
        keyed.sort_unstable_by(|l, r| l.0.cmp(r.0));
        keyed.into_iter().map(|(k, idx)| (k, &self.gates[idx]))
    }

    /// All gate sequences, sorted by their textual form.
    pub fn sorted_gatelists(&self) -> Vec<&GateList> {
        let mut lists: Vec<&GateList> = self.gates.iter().collect();
        lists.sort_by_cached_key(|g| g.to_tokens());
        lists
    }

    fn key_by_index(&self) -> Vec<&K> {
        let mut keys: Vec<Option<&K>> = vec![None; self.gates.len()];
        self.index.iter().for_each(|(k, &idx)| { keys[idx] = Some(k); });
        keys.into_iter().flatten().collect()
    }

    /// Write `self` to `path` as JSON, replacing any existing file.
    pub fn save_json<P>(&self, path: P) -> GroupResult<&Self>
    where
        P: AsRef<Path>,
        K: Serialize,
    {
        let file = TableFile {
            family: self.family,
            num_qubits: self.num_qubits,
            entries: self.key_by_index().into_iter()
                .zip(&self.gates)
                .map(|(key, gates)| TableEntry { key, gates: gates.clone() })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::OpenOptions::new()
            .write(true)
            .append(false)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?
            .write_all(json.as_bytes())?;
        debug!(
            path = %path.as_ref().display(),
            entries = self.len(),
            "saved group table",
        );
        Ok(self)
    }

    /// Read a table written by [`Self::save_json`].
    ///
    /// Entries must appear in canonical-index order. Each stored gate
    /// sequence is realized with `T` and must reproduce both its stored key
    /// and the key of the canonical element at its position; otherwise this
    /// fails with [`GroupError::TableMismatch`].
    pub fn load_json<T, P>(path: P) -> GroupResult<Self>
    where
        T: Tableau<Key = K>,
        P: AsRef<Path>,
        K: DeserializeOwned,
    {
        let json = fs::read_to_string(path.as_ref())?;
        let file: TableFile<K> = serde_json::from_str(&json)?;
        let TableFile { family, num_qubits, entries } = file;
        let order = family.order(num_qubits)?;
        if entries.len() != order {
            return Err(GroupError::TableCardinality {
                family,
                num_qubits,
                expected: order,
                found: entries.len(),
            });
        }
        let mut gates: Vec<GateList> = Vec::with_capacity(order);
        let mut index: FxHashMap<K, usize>
            = FxHashMap::with_capacity_and_hasher(order, Default::default());
        for (idx, TableEntry { key, gates: circ }) in entries.into_iter().enumerate() {
            let realized = tableau::key_of::<T>(num_qubits, &circ)?;
            if realized != key {
                return Err(GroupError::TableMismatch(
                    format!("entry {} gates {} do not realize key {}", idx, circ, key)
                ));
            }
            let canon = family.gates(num_qubits, idx as i64)?;
            if tableau::key_of::<T>(num_qubits, &canon)? != key {
                return Err(GroupError::TableMismatch(
                    format!("entry {} is not canonical element {}", idx, canon)
                ));
            }
            index.insert(key, idx);
            gates.push(circ);
        }
        let table = Self { family, num_qubits, gates, index };
        table.check_cardinality(order)?;
        debug!(
            path = %path.as_ref().display(),
            family = %family,
            num_qubits,
            entries = table.len(),
            "loaded group table",
        );
        Ok(table)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ gate::Gate, stab::Stab, unitary::Unitary };

    const CONFIGS: [(GroupFamily, usize, usize); 4] = [
        (GroupFamily::Pauli, 1, 4),
        (GroupFamily::Pauli, 2, 16),
        (GroupFamily::CNOTPauli, 1, 4),
        (GroupFamily::CNOTPauli, 2, 64),
    ];

    // an oracle that can't tell anything apart
    struct Blind(usize);

    impl Tableau for Blind {
        type Key = u8;
        fn new(n: usize) -> Self { Self(n) }
        fn num_qubits(&self) -> usize { self.0 }
        fn apply_x(&mut self, _: usize) -> &mut Self { self }
        fn apply_y(&mut self, _: usize) -> &mut Self { self }
        fn apply_z(&mut self, _: usize) -> &mut Self { self }
        fn apply_cnot(&mut self, _: usize, _: usize) -> &mut Self { self }
        fn canonical_key(&self) -> u8 { 0 }
        fn describe(&self) -> String { "?".into() }
    }

    fn cardinality_and_bijection<T: Tableau>() {
        for (family, n, order) in CONFIGS {
            let table = GroupTable::build::<T>(family, n).unwrap();
            assert_eq!(table.len(), order);
            assert_eq!(table.family(), family);
            assert_eq!(table.num_qubits(), n);
            let mut seen = std::collections::BTreeSet::new();
            for idx in 0..order {
                let gates = family.gates(n, idx as i64).unwrap();
                let key = tableau::key_of::<T>(n, &gates).unwrap();
                assert_eq!(table.index_of(&key), Some(idx));
                assert_eq!(table.get(&key), Some(&gates));
                assert_eq!(table.gates_at(idx), Some(&gates));
                assert!(seen.insert(key));
            }
            assert_eq!(seen.len(), order);
            assert_eq!(table.iter().count(), order);
            assert!(table.iter().zip(table.iter().skip(1)).all(|(a, b)| a.0 < b.0));
        }
    }

    #[test]
    fn stab_tables() { cardinality_and_bijection::<Stab>(); }

    #[test]
    fn unitary_tables() { cardinality_and_bijection::<Unitary>(); }

    #[test]
    fn collisions_are_fatal() {
        let res = GroupTable::build::<Blind>(GroupFamily::Pauli, 2);
        assert!(matches!(
            res,
            Err(GroupError::TableCardinality { expected: 16, found: 1, .. })
        ));
    }

    #[test]
    fn bad_dimension() {
        assert!(matches!(
            GroupTable::build::<Stab>(GroupFamily::CNOTPauli, 3),
            Err(GroupError::UnsupportedDimension { num_qubits: 3 })
        ));
    }

    #[test]
    fn sorted_listing() {
        let table = GroupTable::build::<Stab>(GroupFamily::Pauli, 1).unwrap();
        let listed: Vec<String>
            = table.sorted_gatelists().into_iter()
            .map(|g| g.to_string())
            .collect();
        assert_eq!(listed, vec!["[]", "[x 0]", "[y 0]", "[z 0]"]);
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cnot_pauli2.json");
        let table = GroupTable::build::<Stab>(GroupFamily::CNOTPauli, 2).unwrap();
        table.save_json(&path).unwrap();
        let loaded = GroupTable::load_json::<Stab, _>(&path).unwrap();
        assert_eq!(loaded, table);

        let path = dir.path().join("pauli1.json");
        let table = GroupTable::build::<Unitary>(GroupFamily::Pauli, 1).unwrap();
        table.save_json(&path).unwrap();
        assert_eq!(GroupTable::load_json::<Unitary, _>(&path).unwrap(), table);
    }

    #[test]
    fn json_tampering_detected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pauli1.json");
        let table = GroupTable::build::<Stab>(GroupFamily::Pauli, 1).unwrap();
        table.save_json(&path).unwrap();

        let mut file: TableFile<<Stab as Tableau>::Key>
            = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        file.entries[1].gates = vec![Gate::X(0)].into();
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();
        assert!(matches!(
            GroupTable::load_json::<Stab, _>(&path),
            Err(GroupError::TableMismatch(_))
        ));

        file.entries.swap(1, 2);
        file.entries[1].gates = vec![Gate::X(0)].into();
        file.entries[2].gates = vec![Gate::Z(0)].into();
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();
        assert!(matches!(
            GroupTable::load_json::<Stab, _>(&path),
            Err(GroupError::TableMismatch(_))
        ));

        file.entries.truncate(3);
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();
        assert!(matches!(
            GroupTable::load_json::<Stab, _>(&path),
            Err(GroupError::TableCardinality { expected: 4, found: 3, .. })
        ));

        fs::write(&path, r#"{"family":"Pauli","num_qubits":1,"entries":[{"key":[1],"gates":["h 0"]}]}"#).unwrap();
        assert!(GroupTable::load_json::<Stab, _>(&path).is_err());
    }
}
