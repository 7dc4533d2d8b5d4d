//! Test doubles for the allocation contracts.
//!
//! Each double keeps its own counter; two instances never share a sequence.
//! Tables are ignored, so one double hands out a single sequence for all of
//! them.

use crate::context::AllocationContext;
use crate::error::{AllocationError, AllocationResult};
use crate::table::TableName;
use crate::traits::{CounterRepository, IdRepository};
use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Counter double: returns 1, 2, 3, ...
#[derive(Debug, Default)]
pub struct MockCounterRepository {
    next: AtomicI64,
}

impl MockCounterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value handed out, 0 before the first call.
    pub fn last_issued(&self) -> i64 {
        self.next.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterRepository for MockCounterRepository {
    async fn next_id(&self, _ctx: &AllocationContext, _table: &TableName) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Available-id double with an injectable failure.
///
/// Without a failure it behaves like [`MockCounterRepository`]. With one,
/// every call returns a clone of it and the counter stays put. The failure
/// can be switched on and off between calls with [`set_failure`].
///
/// [`set_failure`]: MockIdRepository::set_failure
#[derive(Debug, Default)]
pub struct MockIdRepository {
    next: AtomicI64,
    failure: Mutex<Option<AllocationError>>,
}

impl MockIdRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Double that fails every lookup with `error`.
    pub fn failing(error: AllocationError) -> Self {
        Self::new().with_failure(error)
    }

    /// Inject the failure returned by every lookup.
    pub fn with_failure(self, error: AllocationError) -> Self {
        self.set_failure(Some(error));
        self
    }

    /// Replace the injected failure; `None` lets lookups succeed again.
    pub fn set_failure(&self, error: Option<AllocationError>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }

    /// Last value handed out, 0 before the first successful call.
    pub fn last_issued(&self) -> i64 {
        self.next.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdRepository for MockIdRepository {
    async fn available_id(
        &self,
        _ctx: &AllocationContext,
        _table: &TableName,
    ) -> AllocationResult<i64> {
        let failure = self.failure.lock().unwrap_or_else(PoisonError::into_inner).clone();
        if let Some(error) = failure {
            return Err(error);
        }
        Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
