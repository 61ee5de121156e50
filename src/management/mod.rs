mod storage;

pub use storage::FileStore;
pub use storage::KeyValueStore;
pub use storage::MemoryStore;
pub use storage::SESSION_STORAGE_KEY;
pub use storage::StoreError;
