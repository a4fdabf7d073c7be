//! Cache store implementations

mod redb_store;

pub use redb_store::{CacheOpenError, RedbCacheStore};
