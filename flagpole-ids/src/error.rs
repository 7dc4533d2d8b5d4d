//! Error types for identifier allocation and its configuration.

use std::sync::Arc;
use thiserror::Error;

/// Result type for allocation operations.
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Boxed failure from a backing store, shared so the error stays `Clone`.
pub type LookupSource = Arc<dyn std::error::Error + Send + Sync>;

/// Failures surfaced by an available-identifier lookup.
///
/// Allocators pass these through unchanged; callers match on the variant.
/// Two `Lookup` errors are equal only when they share the same source.
#[derive(Debug, Clone, Error)]
pub enum AllocationError {
    /// No identifier left to hand out for the table
    #[error("identifier space exhausted for table {0}")]
    Exhausted(String),

    /// Table name rejected before reaching the store
    #[error("invalid table name: {0:?}")]
    InvalidTable(String),

    /// Backing store failed to answer the lookup
    #[error("identifier lookup failed: {0}")]
    Lookup(#[source] LookupSource),
}

impl AllocationError {
    /// Wrap a backing store failure, keeping it as the error source.
    pub fn lookup(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        AllocationError::Lookup(Arc::from(source.into()))
    }
}

impl PartialEq for AllocationError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exhausted(a), Self::Exhausted(b)) => a == b,
            (Self::InvalidTable(a), Self::InvalidTable(b)) => a == b,
            (Self::Lookup(a), Self::Lookup(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for AllocationError {}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Allocation configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Unknown allocation strategy: {0}")]
    InvalidStrategy(String),

    #[error("Invalid table entry: {0}")]
    InvalidTable(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_lookup_keeps_source_chain() {
        let err = AllocationError::lookup(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "replica went away",
        ));

        assert_eq!(err.to_string(), "identifier lookup failed: replica went away");
        let source = err.source().expect("lookup error has a source");
        assert_eq!(source.to_string(), "replica went away");

        let AllocationError::Lookup(inner) = &err else {
            panic!("expected a lookup error, got {err:?}");
        };
        let io_err = inner
            .downcast_ref::<io::Error>()
            .expect("source is the original io::Error");
        assert_eq!(io_err.kind(), io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn test_lookup_equality_follows_shared_source() {
        let err = AllocationError::lookup("timeout");
        assert_eq!(err, err.clone());
        assert_ne!(err, AllocationError::lookup("timeout"));
        assert_ne!(err, AllocationError::Exhausted("timeout".to_string()));
        assert_eq!(
            AllocationError::Exhausted("flags".to_string()),
            AllocationError::Exhausted("flags".to_string())
        );
    }
}
