//! Database configuration.

/// Configuration for creating a database.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of nested open transactions (`None` = unbounded).
    pub max_transaction_depth: Option<usize>,

    /// Whether to update operation counters.
    pub collect_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_transaction_depth: None,
            collect_stats: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum transaction nesting depth.
    #[must_use]
    pub const fn max_transaction_depth(mut self, limit: Option<usize>) -> Self {
        self.max_transaction_depth = limit;
        self
    }

    /// Sets whether to collect operation statistics.
    #[must_use]
    pub const fn collect_stats(mut self, value: bool) -> Self {
        self.collect_stats = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.max_transaction_depth, None);
        assert!(config.collect_stats);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .max_transaction_depth(Some(8))
            .collect_stats(false);

        assert_eq!(config.max_transaction_depth, Some(8));
        assert!(!config.collect_stats);
    }
}
