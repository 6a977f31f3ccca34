// Command directives - Typed ffmpeg arguments and their single serialization step

use std::fmt;

/// Video encoder chosen for the execution node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoder {
    /// Intel Quick Sync HEVC encoder
    HevcQsv,
    /// x265 software encoder with the fastest preset
    Libx265,
}

impl Encoder {
    fn tokens(&self) -> &'static [&'static str] {
        match self {
            Encoder::HevcQsv => &["hevc_qsv"],
            Encoder::Libx265 => &["libx265", "-preset", "ultrafast"],
        }
    }
}

/// One instruction for the media tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// QSV decode and device selection (input side)
    HardwareAccel,
    /// Regenerate presentation timestamps (input side)
    RegenerateTimestamps,
    /// Keep every input stream
    IncludeAll,
    /// Keep input stream `i`
    Include(usize),
    /// Drop input stream `i`
    Exclude(usize),
    /// Set a metadata key on the n-th output audio stream
    Retag {
        audio_ordinal: usize,
        key: String,
        value: String,
    },
    /// Clear the container title, or the title of output stream `i`
    ClearTitle(Option<usize>),
    /// Re-encode output stream `i` to 320k AAC
    ReencodeAudio(usize),
    /// Stream copy by default
    CopyAll,
    VideoEncoder(Encoder),
    /// Fixed CRF and x265 profile parameters
    Quality,
    /// Relaxed strictness for experimental codecs
    Strict,
    /// Enlarged muxing queue
    MuxQueue,
}

impl Directive {
    /// Argument tokens for this directive, in order
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Directive::HardwareAccel => owned(&[
                "-hwaccel",
                "qsv",
                "-hwaccel_output_format",
                "qsv",
                "-qsv_device",
                "/dev/dri/renderD128",
            ]),
            Directive::RegenerateTimestamps => owned(&["-fflags", "+genpts"]),
            Directive::IncludeAll => owned(&["-map", "0"]),
            Directive::Include(index) => vec!["-map".to_string(), format!("0:{}", index)],
            Directive::Exclude(index) => vec!["-map".to_string(), format!("-0:{}", index)],
            Directive::Retag { audio_ordinal, key, value } => vec![
                format!("-metadata:s:a:{}", audio_ordinal),
                format!("{}={}", key, value),
            ],
            Directive::ClearTitle(None) => owned(&["-metadata", "title="]),
            Directive::ClearTitle(Some(index)) => {
                vec![format!("-metadata:s:{}", index), "title=".to_string()]
            }
            Directive::ReencodeAudio(index) => vec![
                format!("-c:{}", index),
                "aac".to_string(),
                format!("-b:{}", index),
                "320k".to_string(),
            ],
            Directive::CopyAll => owned(&["-c", "copy"]),
            Directive::VideoEncoder(encoder) => {
                let mut tokens = vec!["-c:v".to_string()];
                tokens.extend(encoder.tokens().iter().map(|t| t.to_string()));
                tokens
            }
            Directive::Quality => owned(&["-crf", "25", "-x265-params", "profile=auto:level=auto"]),
            Directive::Strict => owned(&["-strict", "-2"]),
            Directive::MuxQueue => owned(&["-max_muxing_queue_size", "9999"]),
        }
    }

    pub fn is_exclusion(&self) -> bool {
        matches!(self, Directive::Exclude(_))
    }
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

/// Full command split into input-side and output-side directives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preset {
    input: Vec<Directive>,
    output: Vec<Directive>,
}

impl Preset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_input(&mut self, directive: Directive) {
        self.input.push(directive);
    }

    pub fn push_output(&mut self, directive: Directive) {
        self.output.push(directive);
    }

    pub fn extend_output(&mut self, directives: impl IntoIterator<Item = Directive>) {
        self.output.extend(directives);
    }

    pub fn input(&self) -> &[Directive] {
        &self.input
    }

    pub fn output(&self) -> &[Directive] {
        &self.output
    }

    /// Render as `<input options>, <output options>`
    pub fn render(&self) -> String {
        format!("{}, {}", join(&self.input), join(&self.output))
    }
}

fn join(directives: &[Directive]) -> String {
    directives
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
