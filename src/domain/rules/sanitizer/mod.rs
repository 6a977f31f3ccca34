//! Stream sanitizer
//!
//! Drops data streams, foreign or commentary audio, and subtitles the
//! target container cannot hold. Untagged audio is retagged as English and
//! title metadata is cleared. The resulting command keeps every stream by
//! default and stream-copies everything.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::domain::context::DecisionContext;
use crate::domain::directive::{Directive, Preset};
use crate::domain::errors::DomainError;
use crate::domain::model::{DecisionResult, FileDescriptor, StreamDescriptor, StreamKind};
use crate::domain::policy::{NodeRegistry, PolicyTables};

/// Why an audio stream is dropped; the first matching reason wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioExclusion {
    UnsupportedCodec(String),
    UnwantedLanguage(String),
    Commentary,
}

impl AudioExclusion {
    fn describe(&self, index: usize) -> String {
        match self {
            AudioExclusion::UnsupportedCodec(codec) => {
                format!("Audio stream 0:{} is unsupported codec '{}'. Removing.", index, codec)
            }
            AudioExclusion::UnwantedLanguage(language) => {
                format!("Audio stream 0:{} has unwanted language tag '{}'. Removing.", index, language)
            }
            AudioExclusion::Commentary => {
                format!("Audio stream 0:{} detected as being commentary. Removing.", index)
            }
        }
    }
}

/// Why a subtitle stream is dropped; the first matching reason wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleExclusion {
    UnwantedLanguage(String),
    MissingLanguage,
    IncompatibleCodec(String),
}

impl SubtitleExclusion {
    fn describe(&self, index: usize) -> String {
        match self {
            SubtitleExclusion::UnwantedLanguage(language) => format!(
                "Subtitle stream 0:{} has unwanted language tag '{}'. Removing.",
                index, language
            ),
            SubtitleExclusion::MissingLanguage => {
                format!("Subtitle stream 0:{} has no defined language. Removing.", index)
            }
            SubtitleExclusion::IncompatibleCodec(codec) => format!(
                "Subtitle stream 0:{} contains invalid subtitle format '{}'. Removing.",
                index, codec
            ),
        }
    }
}

/// Clean-up rules for a single file
pub struct StreamSanitizer<'a> {
    policy: &'a PolicyTables,
    nodes: &'a NodeRegistry,
}

impl<'a> StreamSanitizer<'a> {
    pub fn new(policy: &'a PolicyTables, nodes: &'a NodeRegistry) -> Self {
        Self { policy, nodes }
    }

    /// Evaluate every rule against `file` on execution node `node`
    pub fn evaluate(&self, file: &FileDescriptor, node: &str) -> Result<DecisionResult, DomainError> {
        let container = Some(format!(".{}", file.container));
        let mut ctx = DecisionContext::new();

        if !file.is_video() {
            ctx.note(format!("File is a '{}', not a video. Skipping.", file.medium));
            return Ok(ctx.finish(container, None));
        }

        if file.streams.is_empty() {
            return Err(DomainError::StreamDataUnreadable);
        }

        let data = self.data_directives(&file.streams, &mut ctx);
        let audio = self.audio_directives(&file.streams, &mut ctx);
        let subtitles = self.subtitle_directives(&file.streams, &mut ctx);

        let excluded: HashSet<usize> = data
            .iter()
            .chain(&audio)
            .chain(&subtitles)
            .filter_map(|directive| match directive {
                Directive::Exclude(index) => Some(*index),
                _ => None,
            })
            .collect();
        let titles = self.title_directives(file, &excluded, &mut ctx);

        if !ctx.should_process() {
            ctx.note("File does not contain any undesired or un-tagged streams. Skipping.");
            debug!("No clean-up needed");
            return Ok(ctx.finish(container, None));
        }

        let node = self.nodes.resolve(node)?;
        ctx.note(format!("Node '{}' detected. Setting command.", node.name));

        let mut preset = Preset::new();
        if node.is_accelerated() {
            preset.push_input(Directive::HardwareAccel);
        }
        preset.push_output(Directive::IncludeAll);
        preset.extend_output(data);
        preset.extend_output(audio);
        preset.extend_output(subtitles);
        preset.extend_output(titles);
        preset.extend_output([Directive::CopyAll, Directive::Strict, Directive::MuxQueue]);

        info!(node = %node.name, excluded = excluded.len(), "Clean-up command built");
        Ok(ctx.finish(container, Some(&preset)))
    }

    /// Exclude every data stream
    pub fn data_directives(&self, streams: &[StreamDescriptor], ctx: &mut DecisionContext) -> Vec<Directive> {
        let directives: Vec<Directive> = streams
            .iter()
            .filter(|stream| stream.is(StreamKind::Data))
            .map(|stream| Directive::Exclude(stream.index))
            .collect();

        if !directives.is_empty() {
            debug!(count = directives.len(), "Removing data streams");
            ctx.flag_process();
        }

        directives
    }

    /// First exclusion rule an audio stream trips, if any
    pub fn audio_exclusion(&self, stream: &StreamDescriptor) -> Option<AudioExclusion> {
        let language = stream.language();
        let title = stream.title().unwrap_or_default();

        if self.policy.is_unsupported_audio_codec(&stream.codec_name) {
            Some(AudioExclusion::UnsupportedCodec(stream.codec_name.clone()))
        } else if let Some(language) = language.filter(|l| !self.policy.is_audio_language_allowed(l)) {
            Some(AudioExclusion::UnwantedLanguage(language))
        } else if title.contains("commentary") || title.contains("description") {
            Some(AudioExclusion::Commentary)
        } else {
            None
        }
    }

    /// Audio exclusions and English retags, in stream order
    ///
    /// When every audio stream would be excluded the exclusions are dropped
    /// again so the output keeps its audio.
    pub fn audio_directives(&self, streams: &[StreamDescriptor], ctx: &mut DecisionContext) -> Vec<Directive> {
        let mut directives = Vec::new();
        let mut total = 0;
        let mut removed = 0;
        let mut kept = 0;

        for stream in streams.iter().filter(|stream| stream.is(StreamKind::Audio)) {
            total += 1;

            if let Some(reason) = self.audio_exclusion(stream) {
                ctx.note(reason.describe(stream.index));
                directives.push(Directive::Exclude(stream.index));
                removed += 1;
                continue;
            }

            match stream.language().as_deref() {
                Some("und") => {
                    ctx.note(format!(
                        "Audio stream 0:{} has 'und' language tag. Re-tagging as 'en'.",
                        stream.index
                    ));
                    directives.push(retag_english(kept));
                }
                None => {
                    ctx.note(format!(
                        "Audio stream 0:{} has no defined language. Tagging as 'en'.",
                        stream.index
                    ));
                    directives.push(retag_english(kept));
                }
                Some(_) => {}
            }
            kept += 1;
        }

        if total > 0 && removed == total {
            warn!(streams = total, "Every audio stream matched an exclusion rule, keeping them");
            ctx.note("All audio streams would be removed. Resetting command.");
            directives.retain(|directive| !directive.is_exclusion());
        }

        if !directives.is_empty() {
            ctx.flag_process();
        }

        directives
    }

    /// First exclusion rule a subtitle stream trips, if any
    pub fn subtitle_exclusion(&self, stream: &StreamDescriptor) -> Option<SubtitleExclusion> {
        match stream.language() {
            Some(language) if !self.policy.is_subtitle_language_allowed(&language) => {
                Some(SubtitleExclusion::UnwantedLanguage(language))
            }
            None => Some(SubtitleExclusion::MissingLanguage),
            Some(_) if self.policy.is_invalid_subtitle_codec(&stream.codec_name) => {
                Some(SubtitleExclusion::IncompatibleCodec(stream.codec_name.clone()))
            }
            Some(_) => None,
        }
    }

    pub fn subtitle_directives(&self, streams: &[StreamDescriptor], ctx: &mut DecisionContext) -> Vec<Directive> {
        let mut directives = Vec::new();

        for stream in streams.iter().filter(|stream| stream.is(StreamKind::Subtitle)) {
            if let Some(reason) = self.subtitle_exclusion(stream) {
                ctx.note(reason.describe(stream.index));
                directives.push(Directive::Exclude(stream.index));
            }
        }

        if !directives.is_empty() {
            ctx.flag_process();
        }

        directives
    }

    /// Clear the container title and the titles of video streams
    ///
    /// Stream titles are addressed by output position, which skips the
    /// streams in `excluded`. A container title alone does not flag the
    /// file for processing.
    pub fn title_directives(
        &self,
        file: &FileDescriptor,
        excluded: &HashSet<usize>,
        ctx: &mut DecisionContext,
    ) -> Vec<Directive> {
        let mut directives = Vec::new();

        if file.title().is_some() {
            ctx.note("File contains title metadata. Removing.");
            directives.push(Directive::ClearTitle(None));
        }

        let mut output_index = 0;
        for stream in &file.streams {
            if excluded.contains(&stream.index) {
                continue;
            }

            if stream.is(StreamKind::Video) && stream.title().is_some() {
                ctx.note(format!("Video stream 0:{} contains title metadata. Removing.", stream.index));
                directives.push(Directive::ClearTitle(Some(output_index)));
                ctx.flag_process();
            }
            output_index += 1;
        }

        directives
    }
}

fn retag_english(audio_ordinal: usize) -> Directive {
    Directive::Retag {
        audio_ordinal,
        key: "language".to_string(),
        value: "en".to_string(),
    }
}

#[cfg(test)]
mod tests;
