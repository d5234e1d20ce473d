//! Pool configuration.

use serde::{Deserialize, Serialize};

/// Default initial worker count: pools start empty and are grown by
/// [`Pool::resize`](crate::Pool::resize).
fn default_initial_workers() -> usize {
    0
}

/// Default thread stack size: 2MB.
fn default_thread_stack_size() -> usize {
    2 * 1024 * 1024
}

/// Default prefix for worker thread names.
fn default_thread_name_prefix() -> String {
    "wp-worker".to_string()
}

/// Configuration for a [`Pool`](crate::Pool).
///
/// The scheduling policy is not configuration; it is selected by the
/// pool's type. All fields have serde defaults, so a partial JSON document
/// is enough to build a configuration.
///
/// # Example
///
/// ```
/// use workpool::PoolConfig;
///
/// let config = PoolConfig::new()
///     .with_initial_workers(4)
///     .with_thread_stack_size(512 * 1024);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Workers spawned at construction.
    ///
    /// Default: 0. The pool is grown later with
    /// [`Pool::resize`](crate::Pool::resize).
    #[serde(default = "default_initial_workers")]
    pub initial_workers: usize,

    /// Stack size per worker thread in bytes.
    ///
    /// Default: 2MB (2 * 1024 * 1024 bytes).
    #[serde(default = "default_thread_stack_size")]
    pub thread_stack_size: usize,

    /// Prefix for worker thread names; threads are named
    /// `<prefix>-<n>`.
    #[serde(default = "default_thread_name_prefix")]
    pub thread_name_prefix: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_workers: default_initial_workers(),
            thread_stack_size: default_thread_stack_size(),
            thread_name_prefix: default_thread_name_prefix(),
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of workers spawned at construction.
    #[must_use]
    pub fn with_initial_workers(mut self, count: usize) -> Self {
        self.initial_workers = count;
        self
    }

    /// Spawn one initial worker per logical CPU.
    #[must_use]
    pub fn with_cpu_workers(mut self) -> Self {
        self.initial_workers = num_cpus::get();
        self
    }

    /// Set the worker thread stack size.
    #[must_use]
    pub fn with_thread_stack_size(mut self, size: usize) -> Self {
        self.thread_stack_size = size;
        self
    }

    /// Set the worker thread name prefix.
    #[must_use]
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.thread_stack_size < 64 * 1024 {
            return Err("thread_stack_size must be at least 64KB".into());
        }
        if self.thread_name_prefix.is_empty() {
            return Err("thread_name_prefix must not be empty".into());
        }
        Ok(())
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
