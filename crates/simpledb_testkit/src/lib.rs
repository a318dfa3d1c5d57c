//! # SimpleDB Testkit
//!
//! Test utilities for SimpleDB.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - A brute-force reference model of the store
//! - A harness that cross-checks the store against the model
//!
//! ## Usage
//!
//! ```rust,ignore
//! use simpledb_testkit::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn store_matches_model(ops in op_sequence_strategy(1, 100)) {
//!         let mut checked = CheckedStore::new();
//!         checked.apply_all(&ops);
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod generators;
pub mod harness;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::generators::*;
    pub use crate::harness::*;
    pub use crate::model::*;
    pub use proptest::prelude::*;
}

pub use generators::*;
pub use harness::*;
pub use model::*;
