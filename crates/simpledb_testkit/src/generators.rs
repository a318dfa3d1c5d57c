//! Property-based test generators using proptest.
//!
//! Keys and values are drawn from small pools so that generated sequences
//! overwrite, unset and re-set the same keys and share values often.

use proptest::prelude::*;

/// Number of distinct keys generated.
pub const KEY_POOL: u8 = 8;

/// Number of distinct values generated.
pub const VALUE_POOL: u8 = 5;

/// A single store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// `SET key value`
    Set {
        /// Key
        key: String,
        /// Value
        value: String,
    },
    /// `GET key`
    Get {
        /// Key
        key: String,
    },
    /// `UNSET key`
    Unset {
        /// Key
        key: String,
    },
    /// `NUMEQUALTO value`
    NumEqualTo {
        /// Value
        value: String,
    },
    /// `BEGIN`
    Begin,
    /// `ROLLBACK`
    Rollback,
    /// `COMMIT`
    Commit,
}

impl StoreOp {
    /// Renders the operation as a protocol line.
    #[must_use]
    pub fn to_line(&self) -> String {
        match self {
            Self::Set { key, value } => format!("SET {key} {value}"),
            Self::Get { key } => format!("GET {key}"),
            Self::Unset { key } => format!("UNSET {key}"),
            Self::NumEqualTo { value } => format!("NUMEQUALTO {value}"),
            Self::Begin => "BEGIN".to_string(),
            Self::Rollback => "ROLLBACK".to_string(),
            Self::Commit => "COMMIT".to_string(),
        }
    }

    /// Returns `true` for operations that may change the store.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get { .. } | Self::NumEqualTo { .. })
    }
}

/// Every value the generators can produce.
#[must_use]
pub fn value_universe() -> Vec<String> {
    (0..VALUE_POOL).map(|v| format!("v{v}")).collect()
}

/// Strategy for generating keys from the pool.
pub fn key_strategy() -> impl Strategy<Value = String> {
    (0..KEY_POOL).prop_map(|k| format!("k{k}"))
}

/// Strategy for generating values from the pool.
pub fn value_strategy() -> impl Strategy<Value = String> {
    (0..VALUE_POOL).prop_map(|v| format!("v{v}"))
}

/// Strategy for a single operation of any kind.
pub fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOp::Set { key, value }),
        3 => key_strategy().prop_map(|key| StoreOp::Unset { key }),
        2 => key_strategy().prop_map(|key| StoreOp::Get { key }),
        2 => value_strategy().prop_map(|value| StoreOp::NumEqualTo { value }),
        2 => Just(StoreOp::Begin),
        1 => Just(StoreOp::Rollback),
        1 => Just(StoreOp::Commit),
    ]
}

/// Strategy for operations that never open or close a transaction.
pub fn plain_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOp::Set { key, value }),
        2 => key_strategy().prop_map(|key| StoreOp::Unset { key }),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn op_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(store_op_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simpledb_core::Command;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn generated_lines_parse(op in store_op_strategy()) {
            let command = Command::parse(&op.to_line());
            prop_assert!(command.is_ok());
        }

        #[test]
        fn plain_ops_are_mutations(op in plain_op_strategy()) {
            prop_assert!(op.is_mutation());
            prop_assert!(!matches!(op, StoreOp::Begin | StoreOp::Rollback | StoreOp::Commit));
        }
    }

    #[test]
    fn value_universe_covers_pool() {
        assert_eq!(value_universe().len(), usize::from(VALUE_POOL));
    }
}
