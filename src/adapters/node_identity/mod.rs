// Node identity adapters - Where the current execution node name comes from

use crate::ports::NodePort;

/// Reads the node name from an environment variable
#[derive(Debug, Clone)]
pub struct EnvNodeAdapter {
    var: String,
}

impl EnvNodeAdapter {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl NodePort for EnvNodeAdapter {
    fn current_node(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .filter(|name| !name.trim().is_empty())
    }
}

/// Node name fixed at construction, e.g. from `--node`
#[derive(Debug, Clone)]
pub struct FixedNodeAdapter {
    node: Option<String>,
}

impl FixedNodeAdapter {
    pub fn new(node: Option<String>) -> Self {
        Self { node }
    }
}

impl NodePort for FixedNodeAdapter {
    fn current_node(&self) -> Option<String> {
        self.node.clone().filter(|name| !name.trim().is_empty())
    }
}
