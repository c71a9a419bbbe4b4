//! Config source adapters.

mod local;
mod memory;

pub use local::LocalConfigSource;
pub use memory::MemoryConfigSource;
