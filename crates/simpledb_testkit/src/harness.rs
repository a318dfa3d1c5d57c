//! Store-vs-model cross-checking harness.

use crate::generators::{value_universe, StoreOp};
use crate::model::ReferenceModel;
use simpledb_core::{process_line, CoreError, Reply, Store};

/// A store paired with a reference model.
///
/// Every applied operation runs against both, and every reply is compared.
/// After each mutation the full effective view and all tracked counts are
/// compared as well.
pub struct CheckedStore {
    /// The store under test.
    pub store: Store,
    /// The oracle.
    pub model: ReferenceModel,
    /// Values whose counts are verified after each mutation.
    tracked_values: Vec<String>,
}

impl Default for CheckedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckedStore {
    /// Creates a harness tracking every generator value.
    pub fn new() -> Self {
        Self::with_store(Store::new())
    }

    /// Creates a harness around an existing empty store.
    pub fn with_store(store: Store) -> Self {
        let mut tracked_values = value_universe();
        // A value no key ever holds must still count as zero.
        tracked_values.push("never-set".to_string());
        Self {
            store,
            model: ReferenceModel::new(),
            tracked_values,
        }
    }

    /// Applies one operation through the protocol and checks the reply.
    pub fn apply(&mut self, op: &StoreOp) -> Reply {
        let reply = process_line(&mut self.store, &op.to_line());
        let expected = self.model_reply(op);
        assert_eq!(reply, expected, "reply mismatch for {op:?}");

        if op.is_mutation() {
            self.verify();
        }
        reply
    }

    /// Applies a sequence of operations.
    pub fn apply_all(&mut self, ops: &[StoreOp]) {
        for op in ops {
            self.apply(op);
        }
    }

    /// Compares the full effective view and every tracked count.
    pub fn verify(&self) {
        assert_eq!(
            self.store.effective_entries(),
            self.model.effective_entries(),
            "effective view mismatch"
        );
        assert_eq!(self.store.depth().as_usize(), self.model.depth());
        assert_eq!(self.store.len(), self.model.effective_entries().len());
        for value in &self.tracked_values {
            assert_eq!(
                self.store.num_equal_to(value),
                self.model.num_equal_to(value),
                "count mismatch for {value:?}"
            );
        }
    }

    fn model_reply(&mut self, op: &StoreOp) -> Reply {
        match op {
            StoreOp::Set { key, value } => {
                self.model.set(key, value);
                Reply::Done
            }
            StoreOp::Unset { key } => {
                self.model.unset(key);
                Reply::Done
            }
            StoreOp::Get { key } => Reply::Value(self.model.get(key).map(str::to_string)),
            StoreOp::NumEqualTo { value } => Reply::Count(self.model.num_equal_to(value)),
            StoreOp::Begin => {
                self.model.begin();
                Reply::Done
            }
            StoreOp::Rollback => transaction_reply(self.model.rollback()),
            StoreOp::Commit => transaction_reply(self.model.commit()),
        }
    }
}

fn transaction_reply(closed: bool) -> Reply {
    if closed {
        Reply::Done
    } else {
        Reply::Error(CoreError::NoActiveTransaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(key: &str, value: &str) -> StoreOp {
        StoreOp::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    #[test]
    fn harness_tracks_nested_scenario() {
        let mut checked = CheckedStore::new();
        checked.apply_all(&[
            set("k0", "v1"),
            StoreOp::Begin,
            set("k0", "v2"),
            StoreOp::Begin,
            StoreOp::Unset { key: "k0".into() },
            StoreOp::Rollback,
            StoreOp::Commit,
            StoreOp::Commit,
        ]);
        assert_eq!(checked.store.get("k0"), Some("v2"));
    }
}
