use std::sync::Arc;

use crate::adapters::{EnvNodeAdapter, FixedNodeAdapter, JsonRecordAdapter};
use crate::app::{OrderInteractor, SanitizeInteractor, SizeCheckInteractor};
use crate::config::Settings;
use crate::error::PrepResult;
use crate::ports::{FileRecordPort, NodePort};

pub trait AppContainer: Send + Sync {
    fn sanitize_interactor(&self) -> Arc<SanitizeInteractor>;
    fn order_interactor(&self) -> Arc<OrderInteractor>;
    fn size_check_interactor(&self) -> Arc<SizeCheckInteractor>;
}

pub struct DefaultAppContainer {
    sanitize_interactor: Arc<SanitizeInteractor>,
    order_interactor: Arc<OrderInteractor>,
    size_check_interactor: Arc<SizeCheckInteractor>,
}

impl DefaultAppContainer {
    /// Wire the interactors from loaded settings
    ///
    /// `node_override` replaces the environment lookup when given.
    pub fn new(settings: &Settings, node_override: Option<String>) -> PrepResult<Self> {
        let file_port: Arc<dyn FileRecordPort> = Arc::new(JsonRecordAdapter::new());
        let node_port: Arc<dyn NodePort> = match node_override {
            Some(node) => Arc::new(FixedNodeAdapter::new(Some(node))),
            None => Arc::new(EnvNodeAdapter::new(settings.nodes.env_var.clone())),
        };
        Self::with_ports(settings, file_port, node_port)
    }

    /// Wire the interactors around caller-supplied ports
    pub fn with_ports(
        settings: &Settings,
        file_port: Arc<dyn FileRecordPort>,
        node_port: Arc<dyn NodePort>,
    ) -> PrepResult<Self> {
        let policy = Arc::new(settings.policy_tables());
        let nodes = Arc::new(settings.node_registry()?);

        let sanitize_interactor = Arc::new(SanitizeInteractor::new(
            Arc::clone(&file_port),
            Arc::clone(&node_port),
            Arc::clone(&policy),
            Arc::clone(&nodes),
        ));

        let order_interactor = Arc::new(OrderInteractor::new(
            Arc::clone(&file_port),
            Arc::clone(&node_port),
            Arc::clone(&policy),
            Arc::clone(&nodes),
        ));

        let size_check_interactor = Arc::new(SizeCheckInteractor::new(Arc::clone(&file_port)));

        Ok(Self {
            sanitize_interactor,
            order_interactor,
            size_check_interactor,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn sanitize_interactor(&self) -> Arc<SanitizeInteractor> {
        Arc::clone(&self.sanitize_interactor)
    }

    fn order_interactor(&self) -> Arc<OrderInteractor> {
        Arc::clone(&self.order_interactor)
    }

    fn size_check_interactor(&self) -> Arc<SizeCheckInteractor> {
        Arc::clone(&self.size_check_interactor)
    }
}
