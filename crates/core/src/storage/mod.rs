pub mod blob;
pub mod gateway;
pub mod record;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use gateway::{find, remove, save, PersistenceGateway, DEFAULT_STORAGE_KEY};
