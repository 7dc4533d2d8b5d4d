//! Identifier allocation contracts.
//!
//! Two separate traits, one per allocation policy. A table is served by
//! exactly one of them.

use crate::context::AllocationContext;
use crate::error::AllocationResult;
use crate::table::TableName;
use async_trait::async_trait;

/// Monotonic counter allocation.
#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Next identifier for `table`.
    ///
    /// Values are strictly increasing per table and never reused, so gaps
    /// left by deleted rows stay gaps. This call does not fail.
    async fn next_id(&self, ctx: &AllocationContext, table: &TableName) -> i64;
}

/// Available-identifier lookup.
#[async_trait]
pub trait IdRepository: Send + Sync {
    /// An identifier currently free in `table`.
    ///
    /// The value may be one released by an earlier deletion rather than the
    /// historical maximum plus one.
    ///
    /// # Errors
    ///
    /// Returns the store's failure (exhaustion, lookup error) unchanged.
    async fn available_id(&self, ctx: &AllocationContext, table: &TableName)
    -> AllocationResult<i64>;
}
