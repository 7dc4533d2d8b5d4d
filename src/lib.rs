// Flagpole - feature flag aggregate and identifier allocation
//
// Re-exports the workspace crates and adds flag provisioning on top of them.

pub mod provision;

pub use flagpole_features;
pub use flagpole_ids;
pub use flagpole_log;

pub use provision::{FlagProvisioner, ProvisionError};

// Prelude for common imports
pub mod prelude {
    pub use crate::provision::{FlagProvisioner, ProvisionError};
    pub use flagpole_features::{
        Flag, FlagError, FlagResult, MAX_DESCRIPTION_LENGTH, MAX_KEY_LENGTH, MAX_ROLLOUT,
        MIN_ROLLOUT,
    };
    pub use flagpole_ids::{
        AllocationConfig, AllocationContext, AllocationError, AllocationResult,
        AllocationStrategy, CounterRepository, IdAllocator, IdRepository, InMemoryIdStore,
        TableName,
    };
}
