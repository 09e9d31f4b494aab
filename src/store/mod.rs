pub mod keys;
pub mod kv;
pub mod state;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use state::StudyState;
