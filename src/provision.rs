//! Flag provisioning: validate, allocate an identifier, hand back a
//! persisted-shaped flag.

use flagpole_features::{Flag, FlagError};
use flagpole_ids::{AllocationContext, AllocationError, IdAllocator, TableName};
use flagpole_log::{debug, info};
use thiserror::Error;

/// Errors from [`FlagProvisioner::create`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Flag(#[from] FlagError),

    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

/// Creates flags with identifiers from an [`IdAllocator`].
#[derive(Clone)]
pub struct FlagProvisioner {
    allocator: IdAllocator,
    table: TableName,
}

impl FlagProvisioner {
    /// Provisioner allocating in the `flags` table.
    pub fn new(allocator: IdAllocator) -> Self {
        Self::with_table(allocator, TableName::flags())
    }

    /// Provisioner allocating in `table`.
    pub fn with_table(allocator: IdAllocator, table: TableName) -> Self {
        Self { allocator, table }
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Validate the fields, allocate an identifier and return the flag
    /// carrying it.
    ///
    /// Validation runs first, so rejected input never consumes an
    /// identifier. The returned flag keeps the timestamps taken at
    /// construction.
    pub async fn create(
        &self,
        ctx: &AllocationContext,
        env_id: i64,
        rollout: i64,
        key: impl Into<String>,
        description: impl Into<String>,
        enabled: bool,
    ) -> Result<Flag, ProvisionError> {
        let draft = Flag::new(env_id, rollout, key, description, enabled)?;

        let id = self.allocator.allocate(ctx, &self.table).await?;
        debug!(target: "flagpole::provision", "assigned id {} to flag {}", id, draft.key());

        let flag = Flag::rehydrate(
            id,
            draft.env_id(),
            draft.rollout(),
            draft.key(),
            draft.description(),
            draft.is_enabled(),
            draft.created_at(),
            draft.updated_at(),
        );
        info!(
            target: "flagpole::provision",
            "created flag {} ({}) in environment {}",
            flag.key(),
            id,
            flag.env_id()
        );
        Ok(flag)
    }
}
