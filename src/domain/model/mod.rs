// Domain models - Probed file and stream descriptors, decision record

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Elementary stream category as reported by the probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
    Data,
    Other,
}

impl StreamKind {
    /// Map a probe `codec_type` value onto a stream kind (case-insensitive)
    pub fn parse(codec_type: &str) -> Self {
        match codec_type.trim().to_lowercase().as_str() {
            "video" => StreamKind::Video,
            "audio" => StreamKind::Audio,
            "subtitle" => StreamKind::Subtitle,
            "data" => StreamKind::Data,
            _ => StreamKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Video => "video",
            StreamKind::Audio => "audio",
            StreamKind::Subtitle => "subtitle",
            StreamKind::Data => "data",
            StreamKind::Other => "other",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One probed stream
///
/// `index` is the ordinal position of the stream in the container. Codec
/// names and tag values are compared case-insensitively, so the codec name
/// is stored lower-cased and tag lookups lower-case their values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub index: usize,
    pub kind: StreamKind,
    pub codec_name: String,
    pub channels: u32,
    pub tags: BTreeMap<String, String>,
}

impl StreamDescriptor {
    /// Create a stream with no channels and no tags
    pub fn new(index: usize, kind: StreamKind, codec_name: impl Into<String>) -> Self {
        Self {
            index,
            kind,
            codec_name: codec_name.into().trim().to_lowercase(),
            channels: 0,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_channels(mut self, channels: u32) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn is(&self, kind: StreamKind) -> bool {
        self.kind == kind
    }

    /// Lower-cased `language` tag, `None` when absent or blank
    pub fn language(&self) -> Option<String> {
        self.tag_lowercase("language")
    }

    /// Lower-cased `title` tag, `None` when absent or blank
    pub fn title(&self) -> Option<String> {
        self.tag_lowercase("title")
    }

    fn tag_lowercase(&self, key: &str) -> Option<String> {
        self.tags
            .get(key)
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty())
    }
}

/// Everything the host knows about one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Container extension without the dot (`mp4`, `mkv`, `ts`)
    pub container: String,
    /// Host medium classification; only `video` files are processed
    pub medium: String,
    /// File size in megabytes, as reported by the host
    pub file_size_mb: f64,
    /// Codec of the primary video stream
    pub video_codec: String,
    pub streams: Vec<StreamDescriptor>,
    /// Container-level metadata (`Title`, ...)
    pub tags: BTreeMap<String, String>,
}

impl FileDescriptor {
    /// Create a video file record with no streams
    pub fn new(container: impl Into<String>, video_codec: impl Into<String>, file_size_mb: f64) -> Self {
        Self {
            container: container.into().trim().to_lowercase(),
            medium: "video".to_string(),
            file_size_mb,
            video_codec: video_codec.into().trim().to_lowercase(),
            streams: Vec::new(),
            tags: BTreeMap::new(),
        }
    }

    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = medium.into();
        self
    }

    /// Append a stream; its index becomes its position in the stream list
    pub fn with_stream(mut self, kind: StreamKind, codec_name: &str, build: impl FnOnce(StreamDescriptor) -> StreamDescriptor) -> Self {
        let stream = build(StreamDescriptor::new(self.streams.len(), kind, codec_name));
        self.streams.push(stream);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn is_video(&self) -> bool {
        self.medium == "video"
    }

    /// Container-level title, `None` when absent or blank
    pub fn title(&self) -> Option<&str> {
        self.tags
            .get("Title")
            .map(|title| title.as_str())
            .filter(|title| !title.trim().is_empty())
    }

    pub fn streams_of(&self, kind: StreamKind) -> impl Iterator<Item = &StreamDescriptor> {
        self.streams.iter().filter(move |stream| stream.is(kind))
    }

    pub fn count(&self, kind: StreamKind) -> usize {
        self.streams_of(kind).count()
    }
}

/// Outcome handed back to the host for one file
///
/// Field names on the wire follow the host's response record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    /// Output container with a leading dot; absent for post-processing checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(rename = "FFmpegMode")]
    pub ffmpeg_mode: bool,
    #[serde(rename = "infoLog")]
    pub info_log: String,
    /// Command arguments in `<input options>, <output options>` form
    pub preset: String,
    #[serde(rename = "processFile")]
    pub process_file: bool,
    #[serde(rename = "reQueueAfter")]
    pub requeue_after: bool,
}
