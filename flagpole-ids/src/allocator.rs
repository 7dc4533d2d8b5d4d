//! Strategy dispatch: routes each table to the repository configured for it.

use crate::config::{AllocationConfig, AllocationStrategy};
use crate::context::AllocationContext;
use crate::error::AllocationResult;
use crate::table::TableName;
use crate::traits::{CounterRepository, IdRepository};
use flagpole_log::{debug, warn};
use std::sync::Arc;

/// Allocates identifiers with the strategy configured per table.
#[derive(Clone)]
pub struct IdAllocator {
    counter: Arc<dyn CounterRepository>,
    lookup: Arc<dyn IdRepository>,
    config: AllocationConfig,
}

impl IdAllocator {
    /// Create an allocator over a counter repository and an available-id
    /// repository.
    pub fn new(
        counter: Arc<dyn CounterRepository>,
        lookup: Arc<dyn IdRepository>,
        config: AllocationConfig,
    ) -> Self {
        Self {
            counter,
            lookup,
            config,
        }
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Strategy that serves `table`.
    pub fn strategy_for(&self, table: &TableName) -> AllocationStrategy {
        self.config.strategy_for(table)
    }

    /// Allocate an identifier for `table`.
    ///
    /// # Errors
    ///
    /// Only tables using [`AllocationStrategy::Available`] can fail; the
    /// lookup's error is returned as is.
    pub async fn allocate(
        &self,
        ctx: &AllocationContext,
        table: &TableName,
    ) -> AllocationResult<i64> {
        match self.strategy_for(table) {
            AllocationStrategy::Counter => {
                let id = self.counter.next_id(ctx, table).await;
                debug!(target: "flagpole::ids", "allocated {} in {} via counter", id, table);
                Ok(id)
            }
            AllocationStrategy::Available => {
                match self.lookup.available_id(ctx, table).await {
                    Ok(id) => {
                        debug!(target: "flagpole::ids", "allocated {} in {} via lookup", id, table);
                        Ok(id)
                    }
                    Err(err) => {
                        warn!(target: "flagpole::ids", "id lookup failed for {}: {}", table, err);
                        Err(err)
                    }
                }
            }
        }
    }
}
