//! Layered key/value store with a live value-count index.
//!
//! The store is a stack of write-sets: one committed base layer plus one
//! layer per open transaction. Reads walk the stack from the innermost
//! transaction down to the base and stop at the first layer that mentions
//! the key, so a tombstone in a newer layer hides a value in an older one.
//!
//! ## Count index
//!
//! `counts` always reflects the effective view at the top of the stack,
//! which makes `NUMEQUALTO` a single map lookup regardless of dataset size
//! or transaction depth. Every adjustment made while a transaction is open
//! is also accumulated in that layer's `undo` map as a net signed delta
//! per value:
//!
//! - `ROLLBACK` subtracts the popped layer's deltas from `counts`.
//! - `COMMIT` folds the write-sets into the base and drops every `undo`
//!   map, since `counts` is already correct for the folded state.

use crate::config::StoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::stats::StoreStats;
use crate::types::{Depth, Entry, Resolved};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// One open transaction's private state.
#[derive(Debug, Default)]
struct Layer {
    /// Keys written in this transaction: value or tombstone.
    writes: HashMap<String, Entry>,
    /// Net adjustments this layer made to the live count index.
    undo: HashMap<String, i64>,
    /// Net change this layer made to the number of live keys.
    key_delta: isize,
}

/// In-process key/value store with nested transactions.
///
/// A `Store` is owned by a single session; it is not shared between
/// sessions and needs no locking.
///
/// # Example
///
/// ```rust
/// use simpledb_core::Store;
///
/// let mut store = Store::new();
/// store.set("a", "10").unwrap();
/// store.set("b", "10").unwrap();
/// assert_eq!(store.num_equal_to("10"), 2);
///
/// store.begin();
/// store.unset("a").unwrap();
/// assert_eq!(store.get("a"), None);
/// store.commit().unwrap();
///
/// assert_eq!(store.num_equal_to("10"), 1);
/// ```
#[derive(Debug, Default)]
pub struct Store {
    config: StoreConfig,
    /// Committed state. Never holds tombstones.
    base: HashMap<String, String>,
    /// Open transactions, oldest first. The last element is the top of stack.
    layers: Vec<Layer>,
    /// Value -> number of keys whose effective value equals it.
    counts: HashMap<String, u64>,
    /// Number of keys with an effective value.
    live_keys: usize,
    stats: StoreStats,
}

impl Store {
    /// Creates an empty store with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> Depth {
        Depth(self.layers.len())
    }

    /// Returns `true` if at least one transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.layers.is_empty()
    }

    /// Returns the number of keys that currently have a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_keys
    }

    /// Returns `true` if no key currently has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_keys == 0
    }

    /// Opens a new transaction layer on top of the stack.
    pub fn begin(&mut self) {
        self.layers.push(Layer::default());
        self.stats.record_begin();
        debug!(depth = %self.depth(), "transaction begun");
    }

    /// Discards the innermost transaction and everything it did.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] when only the base layer
    /// is present.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let Some(layer) = self.layers.pop() else {
            self.stats.record_error();
            return Err(CoreError::NoActiveTransaction);
        };

        for (value, delta) in &layer.undo {
            apply_count_delta(
                &mut self.counts,
                value,
                -delta,
                self.config.retain_zero_counts,
            );
        }
        self.live_keys = shift_len(self.live_keys, -layer.key_delta);

        self.stats.record_rollback();
        debug!(
            depth = %self.depth(),
            discarded_writes = layer.writes.len(),
            "transaction rolled back"
        );
        Ok(())
    }

    /// Folds every open transaction into the base layer.
    ///
    /// Layers are applied oldest first, so when nested transactions touch
    /// the same key the innermost write wins.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] when only the base layer
    /// is present.
    pub fn commit(&mut self) -> CoreResult<()> {
        if self.layers.is_empty() {
            self.stats.record_error();
            return Err(CoreError::NoActiveTransaction);
        }

        let closed = self.layers.len();
        let mut applied = 0;
        for layer in self.layers.drain(..) {
            applied += layer.writes.len();
            for (key, entry) in layer.writes {
                match entry {
                    Entry::Value(value) => {
                        self.base.insert(key, value);
                    }
                    Entry::Tombstone => {
                        self.base.remove(&key);
                    }
                }
            }
        }

        self.stats.record_commit();
        debug!(closed, applied, "transactions committed");
        Ok(())
    }

    /// Sets `key` to `value` in the current layer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingArgument`] if either argument is empty.
    pub fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        let supplied = usize::from(!key.is_empty()) + usize::from(!value.is_empty());
        if supplied < 2 {
            self.stats.record_error();
            return Err(CoreError::missing_argument("SET", 2, supplied));
        }

        let previous = self.resolve(key).value().map(str::to_owned);
        match previous.as_deref() {
            Some(old) if old == value => {}
            Some(old) => {
                self.adjust(old, -1);
                self.adjust(value, 1);
            }
            None => {
                self.adjust(value, 1);
                self.adjust_len(1);
            }
        }

        match self.layers.last_mut() {
            Some(layer) => {
                layer
                    .writes
                    .insert(key.to_owned(), Entry::Value(value.to_owned()));
            }
            None => {
                self.base.insert(key.to_owned(), value.to_owned());
            }
        }

        self.stats.record_write();
        Ok(())
    }

    /// Returns the effective value of `key`, or `None` if it is unset.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.stats.record_read();
        self.resolve(key).value()
    }

    /// Unsets `key` in the current layer.
    ///
    /// Inside a transaction a tombstone is recorded even if the key never
    /// had a value, so it hides anything older once committed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingArgument`] if `key` is empty.
    pub fn unset(&mut self, key: &str) -> CoreResult<()> {
        if key.is_empty() {
            self.stats.record_error();
            return Err(CoreError::missing_argument("UNSET", 1, 0));
        }

        if let Some(old) = self.resolve(key).value().map(str::to_owned) {
            self.adjust(&old, -1);
            self.adjust_len(-1);
        }

        match self.layers.last_mut() {
            Some(layer) => {
                layer.writes.insert(key.to_owned(), Entry::Tombstone);
            }
            None => {
                self.base.remove(key);
            }
        }

        self.stats.record_unset();
        Ok(())
    }

    /// Returns how many keys currently hold exactly `value`.
    #[must_use]
    pub fn num_equal_to(&self, value: &str) -> u64 {
        self.stats.record_count_query();
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Resolves `key` by walking the stack from the top down.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Resolved<'_> {
        for layer in self.layers.iter().rev() {
            if let Some(entry) = layer.writes.get(key) {
                return Resolved::from(Some(entry));
            }
        }
        match self.base.get(key) {
            Some(value) => Resolved::Present(value),
            None => Resolved::Absent,
        }
    }

    /// Materializes the effective view of every key.
    ///
    /// This scans all layers and is intended for diagnostics and tests.
    #[must_use]
    pub fn effective_entries(&self) -> BTreeMap<String, String> {
        let mut view: BTreeMap<String, String> = self
            .base
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for layer in &self.layers {
            for (key, entry) in &layer.writes {
                match entry {
                    Entry::Value(value) => {
                        view.insert(key.clone(), value.clone());
                    }
                    Entry::Tombstone => {
                        view.remove(key);
                    }
                }
            }
        }
        view
    }

    fn adjust(&mut self, value: &str, delta: i64) {
        apply_count_delta(
            &mut self.counts,
            value,
            delta,
            self.config.retain_zero_counts,
        );
        if let Some(layer) = self.layers.last_mut() {
            let net = layer.undo.entry(value.to_owned()).or_insert(0);
            *net += delta;
            if *net == 0 {
                layer.undo.remove(value);
            }
        }
        trace!(value, delta, "count adjusted");
    }

    fn adjust_len(&mut self, delta: isize) {
        self.live_keys = shift_len(self.live_keys, delta);
        if let Some(layer) = self.layers.last_mut() {
            layer.key_delta += delta;
        }
    }
}

fn apply_count_delta(counts: &mut HashMap<String, u64>, value: &str, delta: i64, retain: bool) {
    let current = counts.get(value).copied().unwrap_or(0);
    debug_assert!(
        current.checked_add_signed(delta).is_some(),
        "count for {value:?} would go negative"
    );
    let next = current.saturating_add_signed(delta);
    if next == 0 && !retain {
        counts.remove(value);
    } else {
        counts.insert(value.to_owned(), next);
    }
}

fn shift_len(len: usize, delta: isize) -> usize {
    debug_assert!(len.checked_add_signed(delta).is_some());
    len.saturating_add_signed(delta)
}
