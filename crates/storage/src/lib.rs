pub mod error;
pub mod mem;
pub mod models;
pub mod repository;
pub mod store;

pub use error::{Result, StorageError};
pub use mem::MemStore;
pub use store::{Entity, Store};
