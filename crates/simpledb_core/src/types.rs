//! Core type definitions for SimpleDB.

use std::fmt;

/// What a single layer records for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// The key holds this value as of this layer.
    Value(String),
    /// The key was unset in this layer, hiding anything older.
    Tombstone,
}

/// Result of resolving a key through the layer stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The newest layer mentioning the key holds a value.
    Present(&'a str),
    /// The newest layer mentioning the key holds a tombstone.
    Tombstone,
    /// No layer mentions the key.
    Absent,
}

impl<'a> Resolved<'a> {
    /// Collapses tombstone and absence into `None`.
    #[must_use]
    pub fn value(self) -> Option<&'a str> {
        match self {
            Self::Present(value) => Some(value),
            Self::Tombstone | Self::Absent => None,
        }
    }
}

impl<'a> From<Option<&'a Entry>> for Resolved<'a> {
    fn from(entry: Option<&'a Entry>) -> Self {
        match entry {
            Some(Entry::Value(value)) => Self::Present(value),
            Some(Entry::Tombstone) => Self::Tombstone,
            None => Self::Absent,
        }
    }
}

/// Number of open transaction layers above the base layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Depth(pub usize);

impl Depth {
    /// Returns the raw depth.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth:{}", self.0)
    }
}
