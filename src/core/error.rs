//! Error types for pool operations.

use thiserror::Error;

/// Errors surfaced by a pool.
///
/// Resize contention and mid-resize spawn failures are reported as a
/// `false` return from [`Pool::resize`](crate::Pool::resize) rather than
/// through this enum.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Tasks are pending but the pool has no live worker to run them.
    #[error("tasks pending but no worker is alive")]
    NoWorker,
    /// Worker thread creation failed.
    #[error("worker thread creation failed")]
    ResourceExhausted,
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", PoolError::NoWorker),
            "tasks pending but no worker is alive"
        );
        assert_eq!(
            format!("{}", PoolError::ResourceExhausted),
            "worker thread creation failed"
        );
        assert_eq!(
            format!("{}", PoolError::InvalidConfig("bad stack".into())),
            "invalid configuration: bad stack"
        );
    }
}
