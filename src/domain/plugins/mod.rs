// Plugin details - Static descriptions of each decision module and their inputs

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::rules::orderer::DEFAULT_LOWER_BOUND_MB;
use crate::domain::rules::size_check::{DEFAULT_LOWER_BOUND_PERCENTAGE, DEFAULT_UPPER_BOUND_PERCENTAGE};

pub const LOWER_BOUND: &str = "lowerBound";
pub const UPPER_BOUND_PERCENTAGE: &str = "upperBoundPercentage";
pub const LOWER_BOUND_PERCENTAGE: &str = "lowerBoundPercentage";

/// The decision modules known to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginId {
    CleanAndFormatStreams,
    OrderStreamsAndTranscode,
    NewFileSizeCheck,
}

impl PluginId {
    pub const ALL: [PluginId; 3] = [
        PluginId::CleanAndFormatStreams,
        PluginId::OrderStreamsAndTranscode,
        PluginId::NewFileSizeCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PluginId::CleanAndFormatStreams => "clean_and_format_streams",
            PluginId::OrderStreamsAndTranscode => "order_streams_and_transcode",
            PluginId::NewFileSizeCheck => "new_file_size_check",
        }
    }

    /// Parse a plugin id; dashes and case are ignored
    pub fn parse(id: &str) -> Result<Self, DomainError> {
        let normalized = id.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|plugin| plugin.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownPlugin(id.to_string()))
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When the host runs the plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    #[serde(rename = "Pre-processing")]
    PreProcessing,
    #[serde(rename = "Post-processing")]
    PostProcessing,
}

/// A numeric input the host may supply
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInput {
    pub name: &'static str,
    pub default_value: f64,
    pub tooltip: &'static str,
}

/// Host-facing description of a plugin
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginDetails {
    #[serde(rename = "id")]
    pub id: &'static str,
    pub stage: Stage,
    pub name: &'static str,
    #[serde(rename = "Type")]
    pub kind: &'static str,
    pub operation: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub tags: &'static str,
    pub inputs: Vec<PluginInput>,
}

pub fn details(plugin: PluginId) -> PluginDetails {
    match plugin {
        PluginId::CleanAndFormatStreams => PluginDetails {
            id: plugin.as_str(),
            stage: Stage::PreProcessing,
            name: "Cleans and formats file streams",
            kind: "Video",
            operation: "Transcode",
            description: "Removes data streams and filters/formats audio and subtitle streams.",
            version: "1.0",
            tags: "pre-processing,ffmpeg",
            inputs: Vec::new(),
        },
        PluginId::OrderStreamsAndTranscode => PluginDetails {
            id: plugin.as_str(),
            stage: Stage::PreProcessing,
            name: "Order streams and transcode file",
            kind: "Video",
            operation: "Transcode",
            description: "Orders streams into video, audio (2ch, 6ch, 8ch), subtitles and then transcodes the file to hevc mp4.",
            version: "1.0",
            tags: "pre-processing,ffmpeg",
            inputs: vec![PluginInput {
                name: LOWER_BOUND,
                default_value: DEFAULT_LOWER_BOUND_MB,
                tooltip: "Lower bound size in MB for files which should be processed. Files below this size won't be processed.",
            }],
        },
        PluginId::NewFileSizeCheck => PluginDetails {
            id: plugin.as_str(),
            stage: Stage::PostProcessing,
            name: "Check new file size",
            kind: "Video",
            operation: "Transcode",
            description: "Errors if the new file is not within a percentage range of the original file size.",
            version: "1.00",
            tags: "",
            inputs: vec![
                PluginInput {
                    name: UPPER_BOUND_PERCENTAGE,
                    default_value: DEFAULT_UPPER_BOUND_PERCENTAGE,
                    tooltip: "Upper bound percentage as a number. Files above this size will error.",
                },
                PluginInput {
                    name: LOWER_BOUND_PERCENTAGE,
                    default_value: DEFAULT_LOWER_BOUND_PERCENTAGE,
                    tooltip: "Lower bound percentage as a number. Files below this size will error.",
                },
            ],
        },
    }
}

/// Input values after defaults were applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedInputs {
    values: BTreeMap<&'static str, f64>,
}

impl ResolvedInputs {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Merge host-supplied raw values over the declared defaults
///
/// Missing or blank values take the default. Keys the plugin does not
/// declare are ignored.
pub fn resolve_inputs(
    details: &PluginDetails,
    supplied: &BTreeMap<String, String>,
) -> Result<ResolvedInputs, DomainError> {
    let mut values = BTreeMap::new();

    for input in &details.inputs {
        let value = match supplied.get(input.name).map(|raw| raw.trim()) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| DomainError::InvalidInput {
                    name: input.name.to_string(),
                    value: raw.to_string(),
                })?,
            _ => input.default_value,
        };
        values.insert(input.name, value);
    }

    for key in supplied.keys() {
        if !details.inputs.iter().any(|input| input.name == key) {
            debug!(plugin = details.id, input = %key, "Ignoring undeclared input");
        }
    }

    Ok(ResolvedInputs { values })
}
