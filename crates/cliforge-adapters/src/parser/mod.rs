//! Document parser adapters.

mod yaml;

pub use yaml::YamlParser;
