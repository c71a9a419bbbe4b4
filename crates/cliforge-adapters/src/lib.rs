//! Infrastructure adapters for cliforge.
//!
//! This crate implements the ports defined in `cliforge_core::application::ports`.
//! All filesystem access, YAML handling and settings layering live here.

pub mod parser;
pub mod settings;
pub mod source;

// Re-export commonly used adapters
pub use parser::YamlParser;
pub use settings::{EffectiveSettings, LayeredSettings, MemorySettings};
pub use source::{LocalConfigSource, MemoryConfigSource};
