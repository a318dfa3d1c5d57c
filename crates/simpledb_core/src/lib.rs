//! # SimpleDB Core
//!
//! In-process key/value store with nested transactions.
//!
//! This crate provides:
//! - A layered write-set stack for `BEGIN` / `ROLLBACK` / `COMMIT`
//! - A live count index answering "how many keys hold this value" in O(1)
//! - The line-oriented command protocol used by the `simpledb` binary
//!
//! ```rust
//! use simpledb_core::Store;
//!
//! let mut store = Store::new();
//! store.set("a", "10").unwrap();
//! store.begin();
//! store.set("a", "20").unwrap();
//! assert_eq!(store.num_equal_to("10"), 0);
//! store.rollback().unwrap();
//! assert_eq!(store.get("a"), Some("10"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
mod config;
mod error;
mod stats;
mod store;
mod types;

pub use command::{process_line, Command, Reply, NULL_LITERAL};
pub use config::StoreConfig;
pub use error::{
    CoreError, CoreResult, MISSING_ARGUMENT_MESSAGE, NO_TRANSACTION_MESSAGE,
    UNRECOGNIZED_COMMAND_MESSAGE,
};
pub use stats::{StatsSnapshot, StoreStats};
pub use store::Store;
pub use types::{Depth, Entry, Resolved};

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
