// Sanitize interactor - Runs the stream sanitizer against a host file record

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::model::{DecisionResult, FileDescriptor};
use crate::domain::policy::{NodeRegistry, PolicyTables};
use crate::domain::rules::StreamSanitizer;
use crate::error::PrepResult;
use crate::ports::{FileRecordPort, NodePort};

/// Interactor for the stream sanitizer use case
pub struct SanitizeInteractor {
    file_port: Arc<dyn FileRecordPort>,
    node_port: Arc<dyn NodePort>,
    policy: Arc<PolicyTables>,
    nodes: Arc<NodeRegistry>,
}

impl SanitizeInteractor {
    /// Create new sanitize interactor with injected ports
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

    /// Load the record at `source` and decide
    #[instrument(skip(self))]
    pub fn execute(&self, source: &str) -> PrepResult<DecisionResult> {
        let file = self.file_port.load_file(source)?;
        self.decide(&file)
    }

    /// Decide for an already loaded record
    pub fn decide(&self, file: &FileDescriptor) -> PrepResult<DecisionResult> {
        // An unset node only matters once a command has to be built
        let node = self.node_port.current_node().unwrap_or_default();
        let result = StreamSanitizer::new(&self.policy, &self.nodes).evaluate(file, &node)?;

        info!(process_file = result.process_file, "Sanitize decision made");
        Ok(result)
    }
}
