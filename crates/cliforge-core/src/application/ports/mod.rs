//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `cliforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ConfigSource`: config file metadata and contents
//!   - `DocumentParser`: structured document parsing
//!   - `SettingsStore`: the live configuration store defaults are applied to
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ConfigSource, DocumentParser, FileInfo, SettingsStore};

#[cfg(test)]
pub use output::MockConfigSource;
