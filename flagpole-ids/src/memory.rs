//! In-memory identifier store (for testing/development)

use crate::context::AllocationContext;
use crate::error::{AllocationError, AllocationResult};
use crate::table::TableName;
use crate::traits::{CounterRepository, IdRepository};
use async_trait::async_trait;
use flagpole_log::{debug, trace, warn};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct TableState {
    /// Highest identifier issued so far
    last: Option<i64>,
    /// Released identifiers, reused smallest first
    free: BTreeSet<i64>,
}

impl TableState {
    /// Next fresh identifier, `None` once `i64::MAX` has been issued.
    fn next_fresh(&self, first_id: i64) -> Option<i64> {
        match self.last {
            None => Some(first_id),
            Some(last) => last.checked_add(1),
        }
    }
}

/// In-memory store implementing both allocation strategies, with one
/// identifier space per table.
///
/// Both strategies draw fresh values from the same per-table high-water
/// mark, so a counter-allocated value is never handed out again as a fresh
/// value. Only [`IdRepository::available_id`] looks at released identifiers.
///
/// `i64::MAX` is the hard ceiling of every table. The infallible counter
/// keeps returning it once reached and logs a warning on each call;
/// `available_id` reports [`AllocationError::Exhausted`] instead.
#[derive(Clone)]
pub struct InMemoryIdStore {
    tables: Arc<Mutex<HashMap<TableName, TableState>>>,
    first_id: i64,
    max_id: i64,
}

impl InMemoryIdStore {
    /// Store whose tables start at 1 with no ceiling.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(HashMap::new())),
            first_id: 1,
            max_id: i64::MAX,
        }
    }

    /// First identifier issued in every table.
    pub fn with_first_id(mut self, first_id: i64) -> Self {
        self.first_id = first_id;
        self
    }

    /// Highest identifier `available_id` may issue before reporting
    /// exhaustion.
    pub fn with_max_id(mut self, max_id: i64) -> Self {
        self.max_id = max_id;
        self
    }

    /// Return `id` to the free pool of `table`.
    ///
    /// Returns `false` when the id was never issued or is already free.
    pub async fn release(&self, table: &TableName, id: i64) -> bool {
        let mut tables = self.tables.lock().await;
        let Some(state) = tables.get_mut(table) else {
            return false;
        };

        if id < self.first_id || state.last.is_none_or(|last| id > last) {
            return false;
        }

        let released = state.free.insert(id);
        if released {
            trace!(target: "flagpole::ids", "released id {} in table {}", id, table);
        }
        released
    }

    /// Highest identifier issued for `table`, `None` if none yet.
    pub async fn issued(&self, table: &TableName) -> Option<i64> {
        self.tables
            .lock()
            .await
            .get(table)
            .and_then(|state| state.last)
    }

    /// Number of released identifiers waiting for reuse in `table`.
    pub async fn free_count(&self, table: &TableName) -> usize {
        self.tables
            .lock()
            .await
            .get(table)
            .map_or(0, |state| state.free.len())
    }
}

impl Default for InMemoryIdStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterRepository for InMemoryIdStore {
    async fn next_id(&self, ctx: &AllocationContext, table: &TableName) -> i64 {
        let mut tables = self.tables.lock().await;
        let state = tables.entry(table.clone()).or_default();

        let id = state.next_fresh(self.first_id).unwrap_or_else(|| {
            warn!(
                target: "flagpole::ids",
                "counter for table {} is saturated at {}",
                table,
                i64::MAX
            );
            i64::MAX
        });
        state.last = Some(id);
        debug!(
            target: "flagpole::ids",
            "counter issued {} for table {} ({})",
            id,
            table,
            ctx.label().unwrap_or("-")
        );
        id
    }
}

#[async_trait]
impl IdRepository for InMemoryIdStore {
    async fn available_id(
        &self,
        ctx: &AllocationContext,
        table: &TableName,
    ) -> AllocationResult<i64> {
        let mut tables = self.tables.lock().await;
        let state = tables.entry(table.clone()).or_default();

        if let Some(id) = state.free.pop_first() {
            debug!(target: "flagpole::ids", "reused id {} for table {}", id, table);
            return Ok(id);
        }

        let id = state
            .next_fresh(self.first_id)
            .filter(|id| *id <= self.max_id)
            .ok_or_else(|| AllocationError::Exhausted(table.to_string()))?;

        state.last = Some(id);
        debug!(
            target: "flagpole::ids",
            "lookup issued {} for table {} ({})",
            id,
            table,
            ctx.label().unwrap_or("-")
        );
        Ok(id)
    }
}
