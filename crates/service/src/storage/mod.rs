//! Storage abstractions for the service layer
//!
//! The whole collection is the unit of persistence: `load` returns every
//! record in stored order and `save` replaces all of them.

use async_trait::async_trait;
use models::Proverb;

use crate::errors::ServiceError;

pub mod json_file_store;
pub mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

/// Capability over the persisted proverb collection.
/// Implementations can be file-backed, in-memory, or a keyed store later on.
#[async_trait]
pub trait ProverbRepository: Send + Sync {
    /// Read the full collection, creating an empty one if none exists yet.
    /// Creating the empty collection must not overwrite a concurrent `save`.
    async fn load(&self) -> Result<Vec<Proverb>, ServiceError>;
    /// Overwrite the full collection.
    async fn save(&self, proverbs: &[Proverb]) -> Result<(), ServiceError>;
}
