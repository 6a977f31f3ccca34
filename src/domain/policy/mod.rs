// Domain policy - Read-only allow/deny tables and execution node registry

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Language, codec and container tables consulted by the rules
///
/// Built once at start-up and shared by reference; nothing mutates it
/// afterwards. Entries are compared against lower-cased probe values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTables {
    /// Audio languages that are kept
    pub audio_languages: Vec<String>,
    /// Subtitle languages that are kept
    pub subtitle_languages: Vec<String>,
    /// Audio codecs the output cannot carry at all
    pub unsupported_audio_codecs: Vec<String>,
    /// Lossless or high-bitrate audio codecs re-encoded to AAC
    pub reencode_audio_codecs: Vec<String>,
    /// Subtitle codecs the target container cannot hold
    pub invalid_subtitle_codecs: Vec<String>,
    /// Input container whose timestamps are regenerated
    pub timestamp_regen_container: String,
    pub target_video_codec: String,
    pub target_container: String,
}

impl Default for PolicyTables {
    fn default() -> Self {
        Self {
            audio_languages: vec!["eng".to_string(), "und".to_string()],
            subtitle_languages: vec!["eng".to_string()],
            unsupported_audio_codecs: vec!["pcm_s24le".to_string()],
            reencode_audio_codecs: vec!["truehd".to_string(), "flac".to_string(), "opus".to_string()],
            invalid_subtitle_codecs: vec![
                "hdmv_pgs_subtitle".to_string(),
                "eia_608".to_string(),
                "subrip".to_string(),
            ],
            timestamp_regen_container: "ts".to_string(),
            target_video_codec: "hevc".to_string(),
            target_container: "mp4".to_string(),
        }
    }
}

impl PolicyTables {
    /// Lower-case every entry so lookups match normalized probe values
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.audio_languages,
            &mut self.subtitle_languages,
            &mut self.unsupported_audio_codecs,
            &mut self.reencode_audio_codecs,
            &mut self.invalid_subtitle_codecs,
        ] {
            lowercase_all(list);
        }
        self.timestamp_regen_container = self.timestamp_regen_container.trim().to_lowercase();
        self.target_video_codec = self.target_video_codec.trim().to_lowercase();
        self.target_container = self.target_container.trim().to_lowercase();
        self
    }

    pub fn is_audio_language_allowed(&self, language: &str) -> bool {
        contains(&self.audio_languages, language)
    }

    pub fn is_subtitle_language_allowed(&self, language: &str) -> bool {
        contains(&self.subtitle_languages, language)
    }

    pub fn is_unsupported_audio_codec(&self, codec: &str) -> bool {
        contains(&self.unsupported_audio_codecs, codec)
    }

    /// True for codecs that must be re-encoded before muxing into the target
    pub fn needs_audio_reencode(&self, codec: &str) -> bool {
        contains(&self.reencode_audio_codecs, codec) || self.is_unsupported_audio_codec(codec)
    }

    pub fn is_invalid_subtitle_codec(&self, codec: &str) -> bool {
        contains(&self.invalid_subtitle_codecs, codec)
    }
}

fn contains(list: &[String], value: &str) -> bool {
    list.iter().any(|entry| entry == value)
}

fn lowercase_all(list: &mut [String]) {
    for entry in list.iter_mut() {
        *entry = entry.trim().to_lowercase();
    }
}

/// Hardware capability of an execution node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// CPU-only node, uses the software encoder
    Software,
    /// Node with QSV hardware acceleration
    Accelerated,
}

/// A node name that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNode {
    pub name: String,
    pub class: NodeClass,
}

impl ResolvedNode {
    pub fn is_accelerated(&self) -> bool {
        self.class == NodeClass::Accelerated
    }
}

/// Known execution nodes and the subset with hardware acceleration
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRegistry {
    known: Vec<String>,
    accelerated: Vec<String>,
}

impl NodeRegistry {
    /// Build a registry; every accelerated node must also be a known node
    pub fn new<I, J, S, T>(known: I, accelerated: J) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let known: Vec<String> = known.into_iter().map(|n| n.as_ref().trim().to_lowercase()).collect();
        let accelerated: Vec<String> = accelerated
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .collect();

        if let Some(stray) = accelerated.iter().find(|node| !known.contains(node)) {
            return Err(DomainError::InvalidPolicy(format!(
                "accelerated node '{}' is not in the known node list",
                stray
            )));
        }

        Ok(Self { known, accelerated })
    }

    /// Validate the current node name (case-insensitive) and classify it
    pub fn resolve(&self, node: &str) -> Result<ResolvedNode, DomainError> {
        let name = node.trim().to_lowercase();

        if !self.known.contains(&name) {
            return Err(DomainError::UnidentifiedNode { node: name });
        }

        let class = if self.accelerated.contains(&name) {
            NodeClass::Accelerated
        } else {
            NodeClass::Software
        };

        Ok(ResolvedNode { name, class })
    }

    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn accelerated(&self) -> &[String] {
        &self.accelerated
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self {
            known: vec!["unraid_node".to_string(), "glg_node".to_string(), "mbp_node".to_string()],
            accelerated: vec!["unraid_node".to_string()],
        }
    }
}
