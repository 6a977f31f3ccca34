// Size check interactor - Post-processing validation of the new file size

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::model::DecisionResult;
use crate::domain::plugins::{details, resolve_inputs, PluginId, LOWER_BOUND_PERCENTAGE, UPPER_BOUND_PERCENTAGE};
use crate::domain::rules::{check_new_file_size, SizeBounds};
use crate::error::PrepResult;
use crate::ports::FileRecordPort;

/// Interactor for the output size validation use case
pub struct SizeCheckInteractor {
    file_port: Arc<dyn FileRecordPort>,
}

impl SizeCheckInteractor {
    pub fn new(file_port: Arc<dyn FileRecordPort>) -> Self {
        Self { file_port }
    }

    /// Compare the sizes of two host file records
    #[instrument(skip(self, inputs))]
    pub fn execute(
        &self,
        new_source: &str,
        original_source: &str,
        inputs: &BTreeMap<String, String>,
    ) -> PrepResult<DecisionResult> {
        let new_file = self.file_port.load_file(new_source)?;
        let original = self.file_port.load_file(original_source)?;
        self.check_sizes(new_file.file_size_mb, original.file_size_mb, inputs)
    }

    /// Compare two sizes given in MB
    pub fn check_sizes(
        &self,
        new_size: f64,
        original_size: f64,
        inputs: &BTreeMap<String, String>,
    ) -> PrepResult<DecisionResult> {
        let bounds = Self::bounds(inputs)?;
        let result = check_new_file_size(new_size, original_size, &bounds)?;

        info!(new_size, original_size, "Size check passed");
        Ok(result)
    }

    fn bounds(inputs: &BTreeMap<String, String>) -> PrepResult<SizeBounds> {
        let resolved = resolve_inputs(&details(PluginId::NewFileSizeCheck), inputs)?;
        let defaults = SizeBounds::default();

        Ok(SizeBounds {
            upper_percentage: resolved.get(UPPER_BOUND_PERCENTAGE).unwrap_or(defaults.upper_percentage),
            lower_percentage: resolved.get(LOWER_BOUND_PERCENTAGE).unwrap_or(defaults.lower_percentage),
        })
    }
}
