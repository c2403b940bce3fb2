//! Storage infrastructure - key-value store implementations

mod factory;
mod file;
mod in_memory;

pub use factory::{StorageFactory, StorageType};
pub use file::JsonFileStore;
pub use in_memory::InMemoryKeyValueStore;
