//! Process settings
//!
//! Defaults are overlaid by an optional TOML file and then by CLI flags.
//! The result is converted once into the read-only tables the rules use.

use serde::{Deserialize, Serialize};

use crate::domain::policy::{NodeRegistry, PolicyTables};
use crate::error::{PrepError, PrepResult};

pub const DEFAULT_NODE_ENV_VAR: &str = "nodeName";

/// Top-level settings file layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub policy: PolicyTables,
    pub nodes: NodeSettings,
    pub logging: LoggingSettings,
}

/// `[nodes]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSettings {
    pub known: Vec<String>,
    pub accelerated: Vec<String>,
    /// Environment variable holding the current node name
    pub env_var: String,
}

impl Default for NodeSettings {
    fn default() -> Self {
        let registry = NodeRegistry::default();
        Self {
            known: registry.known().to_vec(),
            accelerated: registry.accelerated().to_vec(),
            env_var: DEFAULT_NODE_ENV_VAR.to_string(),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Settings {
    /// Parse a settings document; missing sections and keys take defaults
    pub fn from_toml_str(content: &str) -> PrepResult<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> PrepResult<()> {
        if self.nodes.env_var.trim().is_empty() {
            return Err(PrepError::config("nodes.env_var must not be empty"));
        }
        if self.policy.target_container.trim().is_empty() {
            return Err(PrepError::config("policy.target_container must not be empty"));
        }
        self.node_registry()?;
        Ok(())
    }

    pub fn policy_tables(&self) -> PolicyTables {
        self.policy.clone().normalized()
    }

    pub fn node_registry(&self) -> PrepResult<NodeRegistry> {
        Ok(NodeRegistry::new(&self.nodes.known, &self.nodes.accelerated)?)
    }
}
