//! Runtime configuration for an [`InventorySystem`](crate::lifecycle::InventorySystem).
//!
//! The binary fills this from command-line flags and `STOCKROOM_*` environment
//! variables; library callers build it directly.

use std::path::PathBuf;

/// Channel capacity for each resource actor.
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Directory used when none is given.
pub const DEFAULT_DATA_DIR: &str = ".stockroom";

/// Default `tracing` directive when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the key-value files live.
    pub data_dir: PathBuf,
    pub buffer_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// The directive handed to the tracing subscriber, e.g. `stockroom=debug`.
    /// A bare level applies to every crate.
    pub fn log_directive(&self) -> &str {
        &self.log_level
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            buffer_size: DEFAULT_BUFFER_SIZE,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directive_follows_log_level() {
        let config = Config::new("/tmp/shop");
        assert_eq!(config.log_directive(), DEFAULT_LOG_LEVEL);
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);

        let config = Config {
            log_level: "stockroom=debug".to_string(),
            ..config
        };
        assert_eq!(config.log_directive(), "stockroom=debug");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/shop"));
    }
}
