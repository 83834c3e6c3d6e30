pub mod cached_profile_store;
pub mod error;
pub mod memory_profile_store;
pub mod profile_store;
pub mod sqlite_profile_cache;

pub use cached_profile_store::CachedProfileStore;
pub use error::{Result, StoreError};
pub use memory_profile_store::MemoryProfileStore;
pub use profile_store::ProfileStore;
pub use sqlite_profile_cache::SqliteProfileCache;
