//! Stream orderer and conform planner
//!
//! Puts streams into video, audio (by ascending channel count), subtitle
//! order, drops streams the target container cannot hold, and decides
//! whether the file has to be transcoded to the target codec and container.

use tracing::{debug, info};

use crate::domain::context::DecisionContext;
use crate::domain::directive::{Directive, Encoder, Preset};
use crate::domain::errors::DomainError;
use crate::domain::model::{DecisionResult, FileDescriptor, StreamDescriptor, StreamKind};
use crate::domain::policy::{NodeRegistry, PolicyTables};
use crate::utils::size::human_readable_size;

/// Default size in MB above which a file is transcoded regardless of codec
pub const DEFAULT_LOWER_BOUND_MB: f64 = 1000.0;

/// Streams split into the ones kept and the ones dropped
///
/// Built fresh for every file.
#[derive(Debug, Default)]
pub struct StreamClassification<'s> {
    pub video: Vec<&'s StreamDescriptor>,
    pub audio: Vec<&'s StreamDescriptor>,
    pub subtitles: Vec<&'s StreamDescriptor>,
    pub undesired: Vec<&'s StreamDescriptor>,
}

impl<'s> StreamClassification<'s> {
    pub fn classify(streams: &'s [StreamDescriptor], ctx: &mut DecisionContext) -> Self {
        let mut classification = Self::default();

        for stream in streams {
            match stream.kind {
                StreamKind::Video if stream.codec_name == "mjpeg" => {
                    ctx.note("File contains undesired 'mjpeg' video stream. Removing.");
                    classification.undesired.push(stream);
                }
                StreamKind::Video => classification.video.push(stream),
                StreamKind::Audio => classification.audio.push(stream),
                StreamKind::Subtitle => classification.subtitles.push(stream),
                StreamKind::Data | StreamKind::Other => {
                    ctx.note(format!("File contains invalid codec type '{}'. Removing.", stream.kind));
                    classification.undesired.push(stream);
                }
            }
        }

        classification
    }

    /// Explicit inclusion list in canonical order followed by exclusions
    pub fn map_directives(&self) -> Vec<Directive> {
        let mut audio = self.audio.clone();
        // stable: equal channel counts keep their original order
        audio.sort_by_key(|stream| stream.channels);

        self.video
            .iter()
            .chain(audio.iter())
            .chain(self.subtitles.iter())
            .map(|stream| Directive::Include(stream.index))
            .chain(self.undesired.iter().map(|stream| Directive::Exclude(stream.index)))
            .collect()
    }
}

/// First ordering violation found by the forward scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderReason {
    VideoNotFirst,
    AudioNotSecond,
    StereoNotFirst,
    SurroundNotSecond,
}

impl ReorderReason {
    fn describe(&self) -> &'static str {
        match self {
            ReorderReason::VideoNotFirst => "Video stream not first. Reordering.",
            ReorderReason::AudioNotSecond => "Audio stream not second. Reordering.",
            ReorderReason::StereoNotFirst => "Audio 2 channel stream not first. Reordering.",
            ReorderReason::SurroundNotSecond => "Audio 6 channel stream not second. Reordering.",
        }
    }
}

/// Scan streams in order and report the first layout violation
///
/// Only kind, channel count and position are consulted.
pub fn find_reorder_reason(streams: &[StreamDescriptor]) -> Option<ReorderReason> {
    let mut audio_seen = 0;
    let mut surround_seen = 0;
    let mut wide_seen = 0;
    let mut subtitles_seen = 0;

    for stream in streams {
        match stream.kind {
            StreamKind::Video if audio_seen > 0 || subtitles_seen > 0 => {
                return Some(ReorderReason::VideoNotFirst);
            }
            StreamKind::Audio => {
                audio_seen += 1;

                if subtitles_seen > 0 {
                    return Some(ReorderReason::AudioNotSecond);
                }

                match stream.channels {
                    2 if surround_seen > 0 || wide_seen > 0 => {
                        return Some(ReorderReason::StereoNotFirst);
                    }
                    6 if wide_seen > 0 => return Some(ReorderReason::SurroundNotSecond),
                    6 => surround_seen += 1,
                    8 => wide_seen += 1,
                    _ => {}
                }
            }
            StreamKind::Subtitle => subtitles_seen += 1,
            _ => {}
        }
    }

    None
}

/// Directives that make the streams fit the target container
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConformPlan {
    /// Input-side timestamp regeneration
    pub regenerate_timestamps: bool,
    /// Streams the container cannot carry
    pub exclusions: Vec<Directive>,
    /// Input indices of audio streams re-encoded to AAC
    pub reencodes: Vec<usize>,
}

impl ConformPlan {
    pub fn is_empty(&self) -> bool {
        !self.regenerate_timestamps && self.exclusions.is_empty() && self.reencodes.is_empty()
    }

    /// Re-encode directives addressed by output position
    ///
    /// `layout` lists the input index of every output stream in output order.
    pub fn reencode_directives(&self, layout: &[usize]) -> Vec<Directive> {
        self.reencodes
            .iter()
            .filter_map(|input| layout.iter().position(|kept| kept == input))
            .map(Directive::ReencodeAudio)
            .collect()
    }
}

/// Input index of every output stream, in output order
///
/// An explicit inclusion list defines the order; without one every input
/// stream is kept in place. Excluded streams never reach the output.
pub fn output_layout(streams: &[StreamDescriptor], order: &[Directive], exclusions: &[Directive]) -> Vec<usize> {
    let included: Vec<usize> = order
        .iter()
        .filter_map(|directive| match directive {
            Directive::Include(index) => Some(*index),
            _ => None,
        })
        .collect();

    let kept = if included.is_empty() {
        streams.iter().map(|stream| stream.index).collect()
    } else {
        included
    };

    kept.into_iter()
        .filter(|index| !exclusions.contains(&Directive::Exclude(*index)))
        .collect()
}

/// Why the file has to be transcoded
#[derive(Debug, Clone, PartialEq)]
pub enum TranscodeReason {
    VideoCodec(String),
    Container(String),
    FileSize(f64),
}

impl TranscodeReason {
    fn describe(&self) -> String {
        match self {
            TranscodeReason::VideoCodec(codec) => format!("File codec is currently {}. Setting command.", codec),
            TranscodeReason::Container(container) => {
                format!("File container is currently {}. Setting command.", container)
            }
            TranscodeReason::FileSize(size) => {
                format!("File is currently {}. Setting command.", human_readable_size(*size))
            }
        }
    }
}

/// Ordering, conform and transcode planning for a single file
pub struct StreamOrderer<'a> {
    policy: &'a PolicyTables,
    nodes: &'a NodeRegistry,
}

impl<'a> StreamOrderer<'a> {
    pub fn new(policy: &'a PolicyTables, nodes: &'a NodeRegistry) -> Self {
        Self { policy, nodes }
    }

    /// Evaluate `file` on execution node `node`
    ///
    /// `lower_bound_mb` is the size above which a file already in the target
    /// codec and container is still transcoded.
    pub fn evaluate(&self, file: &FileDescriptor, node: &str, lower_bound_mb: f64) -> Result<DecisionResult, DomainError> {
        let container = Some(format!(".{}", self.policy.target_container));
        let mut ctx = DecisionContext::new();

        if !file.is_video() {
            ctx.note(format!("File is a {}, not a video. Skipping.", file.medium));
            return Ok(ctx.finish(container, None));
        }

        if file.streams.is_empty() {
            return Err(DomainError::StreamDataUnreadable);
        }

        let order = self.order_directives(&file.streams, &mut ctx);
        let conform = self.conform_plan(file, &mut ctx);
        let transcode = self.transcode_reason(file, lower_bound_mb);
        if let Some(reason) = &transcode {
            ctx.note(reason.describe());
        }

        if order.is_empty() && conform.is_empty() && transcode.is_none() {
            ctx.note("File meets desired output conditions. Skipping.");
            debug!("File already conforms");
            return Ok(ctx.finish(container, None));
        }

        let node = self.nodes.resolve(node)?;
        ctx.note(format!("Node '{}' detected. Setting command.", node.name));
        let encoder = if node.is_accelerated() {
            Encoder::HevcQsv
        } else {
            Encoder::Libx265
        };
        ctx.flag_process();

        let mut preset = Preset::new();
        if node.is_accelerated() {
            preset.push_input(Directive::HardwareAccel);
        }
        if conform.regenerate_timestamps {
            preset.push_input(Directive::RegenerateTimestamps);
        }

        let layout = output_layout(&file.streams, &order, &conform.exclusions);
        let reencodes = conform.reencode_directives(&layout);

        if order.is_empty() {
            preset.push_output(Directive::IncludeAll);
        }
        preset.extend_output(order);
        preset.extend_output(conform.exclusions);
        preset.push_output(Directive::CopyAll);
        preset.extend_output(reencodes);
        preset.extend_output([
            Directive::VideoEncoder(encoder),
            Directive::Quality,
            Directive::Strict,
            Directive::MuxQueue,
        ]);

        info!(node = %node.name, ?encoder, transcode = ?transcode, "Order and transcode command built");
        Ok(ctx.finish(container, Some(&preset)))
    }

    /// Explicit map list when the layout is wrong or streams must go
    pub fn order_directives(&self, streams: &[StreamDescriptor], ctx: &mut DecisionContext) -> Vec<Directive> {
        let classification = StreamClassification::classify(streams, ctx);
        let reorder = find_reorder_reason(streams);

        if let Some(reason) = reorder {
            ctx.note(reason.describe());
        }

        if reorder.is_none() && classification.undesired.is_empty() {
            return Vec::new();
        }

        debug!(?reorder, undesired = classification.undesired.len(), "Building explicit stream map");
        classification.map_directives()
    }

    /// Timestamp, timed_id3 and audio codec fixes for the target container
    pub fn conform_plan(&self, file: &FileDescriptor, ctx: &mut DecisionContext) -> ConformPlan {
        let mut plan = ConformPlan {
            regenerate_timestamps: file.container == self.policy.timestamp_regen_container,
            ..ConformPlan::default()
        };

        for stream in &file.streams {
            if stream.codec_name == "timed_id3" {
                ctx.note(format!("File stream 0:{} is a 'timed_id3' codec. Removing.", stream.index));
                plan.exclusions.push(Directive::Exclude(stream.index));
                continue;
            }

            if stream.is(StreamKind::Audio) && self.policy.needs_audio_reencode(&stream.codec_name) {
                ctx.note(format!(
                    "Audio stream 0:{} is a '{}' codec. Re-encoding.",
                    stream.index, stream.codec_name
                ));
                plan.reencodes.push(stream.index);
            }
        }

        plan
    }

    /// First transcode condition that holds; later ones are not reported
    pub fn transcode_reason(&self, file: &FileDescriptor, lower_bound_mb: f64) -> Option<TranscodeReason> {
        if file.video_codec != self.policy.target_video_codec {
            Some(TranscodeReason::VideoCodec(file.video_codec.clone()))
        } else if file.container != self.policy.target_container {
            Some(TranscodeReason::Container(file.container.clone()))
        } else if file.file_size_mb > lower_bound_mb {
            Some(TranscodeReason::FileSize(file.file_size_mb))
        } else {
            None
        }
    }
}
