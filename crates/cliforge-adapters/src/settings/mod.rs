//! Settings store adapters.

mod layered;
mod memory;

pub use layered::{EffectiveSettings, LayeredSettings, env_overrides, overrides_from};
pub use memory::MemorySettings;
