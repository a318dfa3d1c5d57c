//! Store configuration.

/// Configuration for a [`Store`](crate::Store).
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Keep count-index entries that drop to zero instead of pruning them.
    ///
    /// Observable results are identical either way; retaining trades memory
    /// for fewer map insertions when values churn.
    pub retain_zero_counts: bool,
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether zero counts are retained in the count index.
    #[must_use]
    pub const fn retain_zero_counts(mut self, value: bool) -> Self {
        self.retain_zero_counts = value;
        self
    }
}
