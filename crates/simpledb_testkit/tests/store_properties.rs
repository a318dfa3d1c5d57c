//! Property tests for the layered store and its count index.

use simpledb_core::Store;
use simpledb_testkit::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// Effective view plus the count of every generator value.
fn observe(store: &Store) -> (BTreeMap<String, String>, Vec<u64>) {
    let counts = value_universe()
        .iter()
        .map(|v| store.num_equal_to(v))
        .collect();
    (store.effective_entries(), counts)
}

fn apply_plain(store: &mut Store, op: &StoreOp) {
    match op {
        StoreOp::Set { key, value } => store.set(key, value).unwrap(),
        StoreOp::Unset { key } => store.unset(key).unwrap(),
        other => panic!("not a plain op: {other:?}"),
    }
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn store_matches_model(ops in op_sequence_strategy(1, 120)) {
        let mut checked = CheckedStore::new();
        checked.apply_all(&ops);
    }

    #[test]
    fn get_returns_last_surviving_set(ops in prop::collection::vec(plain_op_strategy(), 0..60)) {
        let mut store = Store::new();
        let mut expected: HashMap<String, String> = HashMap::new();
        for op in &ops {
            apply_plain(&mut store, op);
            match op {
                StoreOp::Set { key, value } => {
                    expected.insert(key.clone(), value.clone());
                }
                StoreOp::Unset { key } => {
                    expected.remove(key);
                }
                _ => unreachable!(),
            }
        }
        for k in 0..KEY_POOL {
            let key = format!("k{k}");
            prop_assert_eq!(store.get(&key), expected.get(&key).map(String::as_str));
        }
    }

    #[test]
    fn rollback_restores_state_before_each_begin(
        prefix in prop::collection::vec(plain_op_strategy(), 0..30),
        levels in prop::collection::vec(prop::collection::vec(plain_op_strategy(), 0..20), 1..5),
    ) {
        let mut store = Store::new();
        for op in &prefix {
            apply_plain(&mut store, op);
        }

        let mut snapshots = Vec::new();
        for ops in &levels {
            snapshots.push(observe(&store));
            store.begin();
            for op in ops {
                apply_plain(&mut store, op);
            }
        }

        while let Some(before) = snapshots.pop() {
            store.rollback().unwrap();
            prop_assert_eq!(observe(&store), before);
        }
        prop_assert!(store.rollback().is_err());
    }

    #[test]
    fn commit_applies_layers_oldest_to_newest(
        prefix in prop::collection::vec(plain_op_strategy(), 0..30),
        levels in prop::collection::vec(prop::collection::vec(plain_op_strategy(), 0..20), 1..5),
    ) {
        let mut nested = Store::new();
        let mut flat = Store::new();
        for op in &prefix {
            apply_plain(&mut nested, op);
            apply_plain(&mut flat, op);
        }

        for ops in &levels {
            nested.begin();
            for op in ops {
                apply_plain(&mut nested, op);
                apply_plain(&mut flat, op);
            }
        }
        nested.commit().unwrap();

        prop_assert!(!nested.in_transaction());
        prop_assert_eq!(observe(&nested), observe(&flat));
        prop_assert_eq!(nested.len(), flat.len());
    }

    #[test]
    fn repeated_set_counts_once(
        key in key_strategy(),
        value in value_strategy(),
        others in prop::collection::vec(plain_op_strategy(), 0..30),
        in_txn in any::<bool>(),
    ) {
        let mut store = Store::new();
        for op in &others {
            apply_plain(&mut store, op);
        }
        if in_txn {
            store.begin();
        }

        store.set(&key, &value).unwrap();
        let once = store.num_equal_to(&value);
        store.set(&key, &value).unwrap();

        prop_assert_eq!(store.num_equal_to(&value), once);
        let scanned = store
            .effective_entries()
            .values()
            .filter(|v| **v == value)
            .count() as u64;
        prop_assert_eq!(once, scanned);
    }
}

#[test]
fn unset_of_unknown_key_is_count_noop() {
    let mut checked = CheckedStore::new();
    checked.apply_all(&[
        StoreOp::Set {
            key: "k1".into(),
            value: "v0".into(),
        },
        StoreOp::Begin,
        StoreOp::Unset { key: "k7".into() },
        StoreOp::Get { key: "k7".into() },
        StoreOp::NumEqualTo { value: "v0".into() },
        StoreOp::Begin,
        StoreOp::Get { key: "k7".into() },
        StoreOp::Commit,
    ]);
    assert_eq!(checked.store.num_equal_to("v0"), 1);
}

#[test]
fn retained_zero_counts_behave_identically() {
    let store = Store::with_config(simpledb_core::StoreConfig::new().retain_zero_counts(true));
    let mut checked = CheckedStore::with_store(store);
    checked.apply_all(&[
        StoreOp::Set {
            key: "k0".into(),
            value: "v0".into(),
        },
        StoreOp::Begin,
        StoreOp::Unset { key: "k0".into() },
        StoreOp::NumEqualTo { value: "v0".into() },
        StoreOp::Rollback,
        StoreOp::NumEqualTo { value: "v0".into() },
    ]);
}
