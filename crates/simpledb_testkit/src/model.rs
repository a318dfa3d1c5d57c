//! Brute-force reference model.
//!
//! The model keeps every layer as a plain map and answers count queries by
//! scanning, so it is slow but obviously correct.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Naive layered store used as an oracle.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    /// `layers[0]` is the base; `None` marks a tombstone.
    layers: Vec<HashMap<String, Option<String>>>,
}

impl Default for ReferenceModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceModel {
    /// Creates a model with only the base layer.
    pub fn new() -> Self {
        Self {
            layers: vec![HashMap::new()],
        }
    }

    /// Number of open transactions.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Opens a transaction.
    pub fn begin(&mut self) {
        self.layers.push(HashMap::new());
    }

    /// Drops the innermost transaction. Returns `false` if none is open.
    pub fn rollback(&mut self) -> bool {
        if self.layers.len() <= 1 {
            return false;
        }
        self.layers.pop();
        true
    }

    /// Folds every transaction into the base. Returns `false` if none is open.
    pub fn commit(&mut self) -> bool {
        if self.layers.len() <= 1 {
            return false;
        }
        let view = self.effective_entries();
        self.layers = vec![view.into_iter().map(|(k, v)| (k, Some(v))).collect()];
        true
    }

    /// Records a value in the innermost layer.
    pub fn set(&mut self, key: &str, value: &str) {
        self.top().insert(key.to_string(), Some(value.to_string()));
    }

    /// Records a tombstone in the innermost layer.
    pub fn unset(&mut self, key: &str) {
        self.top().insert(key.to_string(), None);
    }

    /// Resolves a key from the innermost layer down.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.get(key))
            .and_then(|entry| entry.as_deref())
    }

    /// Counts keys holding `value` by scanning every key.
    pub fn num_equal_to(&self, value: &str) -> u64 {
        self.effective_entries()
            .values()
            .filter(|v| v.as_str() == value)
            .count() as u64
    }

    /// Materializes the effective view.
    pub fn effective_entries(&self) -> BTreeMap<String, String> {
        let keys: BTreeSet<&String> = self.layers.iter().flat_map(|l| l.keys()).collect();
        keys.into_iter()
            .filter_map(|key| self.get(key).map(|v| (key.clone(), v.to_string())))
            .collect()
    }

    fn top(&mut self) -> &mut HashMap<String, Option<String>> {
        // The base layer is never popped.
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tombstone_hides_base() {
        let mut model = ReferenceModel::new();
        model.set("a", "1");
        model.begin();
        model.unset("a");
        assert_eq!(model.get("a"), None);
        assert!(model.rollback());
        assert_eq!(model.get("a"), Some("1"));
    }

    #[test]
    fn commit_flattens() {
        let mut model = ReferenceModel::new();
        model.begin();
        model.set("a", "1");
        model.begin();
        model.set("a", "2");
        model.set("b", "2");
        assert!(model.commit());
        assert_eq!(model.depth(), 0);
        assert_eq!(model.num_equal_to("2"), 2);
        assert!(!model.commit());
    }
}
