//! Record store implementations for spraycoat-dashboard
//!
//! Both stores keep every document in one path-keyed map. `FileStore`
//! writes the whole map back to disk after each mutation.

mod file;
mod memory;
mod records;

pub use file::FileStore;
pub use memory::MemoryStore;
