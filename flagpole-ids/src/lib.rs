//! Identifier allocation for Flagpole.
//!
//! Two allocation policies, kept as separate traits:
//!
//! - [`CounterRepository`] - strictly increasing identifiers that are never
//!   reused. Cannot fail.
//! - [`IdRepository`] - whichever identifier is currently free, possibly one
//!   released by a deletion. Can fail, and the failure reaches the caller
//!   unchanged.
//!
//! Every call names the [`TableName`] it allocates in and carries an
//! [`AllocationContext`].
//!
//! # Modules
//!
//! - [`mock`] - per-instance counting doubles, with failure injection
//! - [`memory`] - in-memory store with per-table spaces and id recycling
//! - [`config`] - strategy per table, from TOML or the environment
//! - [`allocator`] - dispatch to the configured strategy
//!
//! # Examples
//!
//! ```
//! use flagpole_ids::*;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let store = Arc::new(InMemoryIdStore::new());
//! let config = AllocationConfig::new()
//!     .with_table(TableName::flags(), AllocationStrategy::Available);
//! let allocator = IdAllocator::new(store.clone(), store.clone(), config);
//!
//! let ctx = AllocationContext::background();
//! let id = allocator.allocate(&ctx, &TableName::flags()).await?;
//! assert_eq!(id, 1);
//!
//! // Released ids come back under the "available" strategy
//! store.release(&TableName::flags(), id).await;
//! assert_eq!(allocator.allocate(&ctx, &TableName::flags()).await?, 1);
//! # Ok::<(), AllocationError>(())
//! # }).unwrap();
//! ```

pub mod allocator;
pub mod config;
pub mod context;
pub mod error;
pub mod memory;
pub mod mock;
pub mod table;
pub mod traits;

pub use allocator::IdAllocator;
pub use config::{AllocationConfig, AllocationStrategy};
pub use context::AllocationContext;
pub use error::{AllocationError, AllocationResult, ConfigError, ConfigResult, LookupSource};
pub use memory::InMemoryIdStore;
pub use mock::{MockCounterRepository, MockIdRepository};
pub use table::TableName;
pub use traits::{CounterRepository, IdRepository};
