// Order interactor - Runs the stream orderer and conform planner

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::model::{DecisionResult, FileDescriptor};
use crate::domain::plugins::{details, resolve_inputs, PluginId, LOWER_BOUND};
use crate::domain::policy::{NodeRegistry, PolicyTables};
use crate::domain::rules::{StreamOrderer, DEFAULT_LOWER_BOUND_MB};
use crate::error::PrepResult;
use crate::ports::{FileRecordPort, NodePort};

/// Interactor for the order and transcode use case
pub struct OrderInteractor {
    file_port: Arc<dyn FileRecordPort>,
    node_port: Arc<dyn NodePort>,
    policy: Arc<PolicyTables>,
    nodes: Arc<NodeRegistry>,
}

impl OrderInteractor {
    /// Create new order interactor with injected ports
    pub fn new(
        file_port: Arc<dyn FileRecordPort>,
        node_port: Arc<dyn NodePort>,
        policy: Arc<PolicyTables>,
        nodes: Arc<NodeRegistry>,
    ) -> Self {
        Self {
            file_port,
            node_port,
            policy,
            nodes,
        }
    }

    /// Load the record at `source` and decide with the host's raw inputs
    #[instrument(skip(self, inputs))]
    pub fn execute(&self, source: &str, inputs: &BTreeMap<String, String>) -> PrepResult<DecisionResult> {
        let file = self.file_port.load_file(source)?;
        self.decide(&file, inputs)
    }

    pub fn decide(&self, file: &FileDescriptor, inputs: &BTreeMap<String, String>) -> PrepResult<DecisionResult> {
        let resolved = resolve_inputs(&details(PluginId::OrderStreamsAndTranscode), inputs)?;
        let lower_bound = resolved.get(LOWER_BOUND).unwrap_or(DEFAULT_LOWER_BOUND_MB);

        let node = self.node_port.current_node().unwrap_or_default();
        let result = StreamOrderer::new(&self.policy, &self.nodes).evaluate(file, &node, lower_bound)?;

        info!(process_file = result.process_file, lower_bound, "Order decision made");
        Ok(result)
    }
}
