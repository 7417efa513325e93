//! Key-value object storage shared by the rating and queue subsystems
//!
//! The [`ObjectStore`] trait is the seam to the external store. Both stores in
//! this crate talk to it through `Arc<dyn ObjectStore>` and convert every
//! [`StoreError`] into [`crate::LadderError::StoreUnavailable`].

pub mod fs;
pub mod memory;
pub mod object_store;
pub mod record;

// Re-export commonly used types
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use object_store::{ObjectMeta, ObjectStore, StoreError, StoreResult};
pub use record::Record;

#[cfg(test)]
pub use object_store::MockObjectStore;
