// Ports - Interface definitions (contracts)

use crate::config::Settings;
use crate::domain::model::FileDescriptor;
use crate::error::PrepResult;

/// Port for reading the host's per-file record
pub trait FileRecordPort: Send + Sync {
    /// Load the record at `source`; `-` reads standard input
    fn load_file(&self, source: &str) -> PrepResult<FileDescriptor>;
}

/// Port for the identity of the execution node running the decision
pub trait NodePort: Send + Sync {
    /// Current node name, if one is configured
    fn current_node(&self) -> Option<String>;
}

/// Port for loading process settings
pub trait ConfigPort: Send + Sync {
    /// Load settings; absent sources yield the defaults
    fn load_settings(&self) -> PrepResult<Settings>;
}
