// Adapters - External system implementations

pub mod json_record;
pub mod node_identity;
pub mod toml_config;

// Re-export adapters
pub use json_record::JsonRecordAdapter;
pub use node_identity::{EnvNodeAdapter, FixedNodeAdapter};
pub use toml_config::TomlConfigAdapter;
