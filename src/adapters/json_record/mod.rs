// JSON record adapter - Host file records in ffprobe-style JSON

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::model::{FileDescriptor, StreamDescriptor, StreamKind};
use crate::error::PrepResult;
use crate::ports::FileRecordPort;

/// Source name that reads the record from standard input
pub const STDIN_SOURCE: &str = "-";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFileRecord {
    container: String,
    #[serde(rename = "fileMedium")]
    file_medium: String,
    file_size: Option<f64>,
    video_codec_name: String,
    #[serde(rename = "ffProbeData")]
    ffprobe_data: RawProbeData,
    meta: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProbeData {
    streams: Vec<RawStream>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStream {
    codec_type: String,
    codec_name: String,
    channels: Option<u32>,
    tags: BTreeMap<String, Value>,
}

/// Reads host file records from a path or standard input
#[derive(Debug, Default, Clone)]
pub struct JsonRecordAdapter;

impl JsonRecordAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Convert a JSON document into a file descriptor
    pub fn parse(content: &str) -> PrepResult<FileDescriptor> {
        let raw: RawFileRecord = serde_json::from_str(content)?;
        Ok(raw.into_descriptor())
    }
}

impl RawFileRecord {
    fn into_descriptor(self) -> FileDescriptor {
        let medium = if self.file_medium.trim().is_empty() {
            "video".to_string()
        } else {
            self.file_medium.trim().to_lowercase()
        };

        let mut file = FileDescriptor::new(self.container, self.video_codec_name, self.file_size.unwrap_or(0.0))
            .with_medium(medium);

        file.streams = self
            .ffprobe_data
            .streams
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let mut stream = StreamDescriptor::new(index, StreamKind::parse(&raw.codec_type), raw.codec_name)
                    .with_channels(raw.channels.unwrap_or(0));
                stream.tags = stringify_values(raw.tags);
                stream
            })
            .collect();
        file.tags = stringify_values(self.meta);

        file
    }
}

/// Tag values may be strings, numbers or booleans; null values are dropped
fn stringify_values(values: BTreeMap<String, Value>) -> BTreeMap<String, String> {
    values
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((key, text)),
            other => Some((key, other.to_string())),
        })
        .collect()
}

impl FileRecordPort for JsonRecordAdapter {
    fn load_file(&self, source: &str) -> PrepResult<FileDescriptor> {
        let content = if source == STDIN_SOURCE {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            std::fs::read_to_string(Path::new(source))?
        };

        let file = Self::parse(&content)?;
        debug!(source, streams = file.streams.len(), container = %file.container, "File record loaded");
        Ok(file)
    }
}
