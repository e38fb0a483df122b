//! Registry backends for the Snip URL shortener.

pub mod memory;

pub use memory::InMemoryRegistry;
pub use snip_core::error::StorageError;
pub use snip_core::registry::{ReadRegistry, Registry, Result};
