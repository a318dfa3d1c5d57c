//! Benchmark utilities.

use simpledb_core::Store;

/// Builds a committed store with `keys` keys spread over `distinct` values.
pub fn populated_store(keys: usize, distinct: usize) -> Store {
    let mut store = Store::new();
    for i in 0..keys {
        store
            .set(&format!("key{i}"), &format!("value{}", i % distinct.max(1)))
            .expect("non-empty key and value");
    }
    store
}
