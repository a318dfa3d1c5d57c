//! Line-oriented command protocol.
//!
//! Each input line is split on whitespace into a command name and its
//! arguments. Names are exact and case-sensitive:
//!
//! | Command            | Arguments | Output                 |
//! |--------------------|-----------|------------------------|
//! | `BEGIN`            | none      | none                   |
//! | `ROLLBACK`         | none      | none, or error literal |
//! | `COMMIT`           | none      | none, or error literal |
//! | `SET key value`    | 2         | none                   |
//! | `GET key`          | 1         | value or `NULL`        |
//! | `UNSET key`        | 1         | none                   |
//! | `NUMEQUALTO value` | 1         | decimal count          |
//! | `END`              | none      | ends the session       |
//!
//! Arguments beyond those required are ignored. Errors render as the
//! fixed literals of [`CoreError::protocol_message`].

use crate::error::{CoreError, CoreResult};
use crate::store::Store;
use std::fmt;
use tracing::trace;

/// Text printed by `GET` for a key without a value.
pub const NULL_LITERAL: &str = "NULL";

/// A parsed protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a nested transaction.
    Begin,
    /// Discard the innermost transaction.
    Rollback,
    /// Fold all open transactions into the base layer.
    Commit,
    /// Set a key.
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// Read a key.
    Get {
        /// Key to read.
        key: String,
    },
    /// Unset a key.
    Unset {
        /// Key to remove.
        key: String,
    },
    /// Count keys holding a value.
    NumEqualTo {
        /// Value to count.
        value: String,
    },
    /// End the session.
    End,
}

impl Command {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnrecognizedCommand`] for an unknown (or empty)
    /// command name and [`CoreError::MissingArgument`] when too few
    /// arguments follow a known one.
    pub fn parse(line: &str) -> CoreResult<Self> {
        let mut tokens = line.split_ascii_whitespace();
        let name = tokens.next().unwrap_or("");
        let args: Vec<&str> = tokens.collect();

        let command = match name {
            "BEGIN" => Self::Begin,
            "ROLLBACK" => Self::Rollback,
            "COMMIT" => Self::Commit,
            "END" => Self::End,
            "SET" => {
                let [key, value] = require::<2>("SET", &args)?;
                Self::Set {
                    key: key.to_owned(),
                    value: value.to_owned(),
                }
            }
            "GET" => {
                let [key] = require::<1>("GET", &args)?;
                Self::Get {
                    key: key.to_owned(),
                }
            }
            "UNSET" => {
                let [key] = require::<1>("UNSET", &args)?;
                Self::Unset {
                    key: key.to_owned(),
                }
            }
            "NUMEQUALTO" => {
                let [value] = require::<1>("NUMEQUALTO", &args)?;
                Self::NumEqualTo {
                    value: value.to_owned(),
                }
            }
            other => return Err(CoreError::unrecognized_command(other)),
        };
        Ok(command)
    }

    /// Returns the protocol name of the command.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Begin => "BEGIN",
            Self::Rollback => "ROLLBACK",
            Self::Commit => "COMMIT",
            Self::Set { .. } => "SET",
            Self::Get { .. } => "GET",
            Self::Unset { .. } => "UNSET",
            Self::NumEqualTo { .. } => "NUMEQUALTO",
            Self::End => "END",
        }
    }

    /// Runs the command against `store`.
    ///
    /// # Errors
    ///
    /// Propagates store errors; the store is left untouched when one occurs.
    pub fn execute(&self, store: &mut Store) -> CoreResult<Reply> {
        let reply = match self {
            Self::Begin => {
                store.begin();
                Reply::Done
            }
            Self::Rollback => {
                store.rollback()?;
                Reply::Done
            }
            Self::Commit => {
                store.commit()?;
                Reply::Done
            }
            Self::Set { key, value } => {
                store.set(key, value)?;
                Reply::Done
            }
            Self::Get { key } => Reply::Value(store.get(key).map(str::to_owned)),
            Self::Unset { key } => {
                store.unset(key)?;
                Reply::Done
            }
            Self::NumEqualTo { value } => Reply::Count(store.num_equal_to(value)),
            Self::End => Reply::End,
        };
        Ok(reply)
    }
}

fn require<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> CoreResult<[&'a str; N]> {
    match args.get(..N) {
        Some(head) => {
            let mut out = [""; N];
            out.copy_from_slice(head);
            Ok(out)
        }
        None => Err(CoreError::missing_argument(command, N, args.len())),
    }
}

/// Outcome of processing one protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The command succeeded and prints nothing.
    Done,
    /// Result of `GET`.
    Value(Option<String>),
    /// Result of `NUMEQUALTO`.
    Count(u64),
    /// The command was rejected.
    Error(CoreError),
    /// The session should end.
    End,
}

impl Reply {
    /// Returns `true` if the session should stop reading input.
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    /// Returns `true` if this reply prints a line.
    #[must_use]
    pub fn has_output(&self) -> bool {
        matches!(self, Self::Value(_) | Self::Count(_) | Self::Error(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done | Self::End => Ok(()),
            Self::Value(Some(value)) => f.write_str(value),
            Self::Value(None) => f.write_str(NULL_LITERAL),
            Self::Count(count) => write!(f, "{count}"),
            Self::Error(err) => f.write_str(err.protocol_message()),
        }
    }
}

/// Parses and executes one input line.
///
/// Protocol errors never escape: they come back as [`Reply::Error`] and
/// leave the store unchanged.
pub fn process_line(store: &mut Store, line: &str) -> Reply {
    let result = Command::parse(line).inspect_err(|_| store.stats().record_error());
    let reply = match result.and_then(|command| command.execute(store)) {
        Ok(reply) => reply,
        Err(err) => Reply::Error(err),
    };
    trace!(line, ?reply, "processed");
    reply
}
