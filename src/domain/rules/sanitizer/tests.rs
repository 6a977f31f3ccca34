// Unit tests for the stream sanitizer

use super::*;

fn sanitizer_parts() -> (PolicyTables, NodeRegistry) {
    (PolicyTables::default(), NodeRegistry::default())
}

fn english_audio(stream: StreamDescriptor) -> StreamDescriptor {
    stream.with_channels(2).with_tag("language", "eng")
}

#[test]
fn test_non_video_file_is_skipped() {
    let (policy, nodes) = sanitizer_parts();
    let file = FileDescriptor::new("mp3", "", 5.0).with_medium("audio");

    let result = StreamSanitizer::new(&policy, &nodes).evaluate(&file, "glg_node").unwrap();
    assert!(!result.process_file);
    assert_eq!(result.container.as_deref(), Some(".mp3"));
    assert_eq!(result.info_log, "File is a 'audio', not a video. Skipping.\n");
}

#[test]
fn test_empty_stream_list_is_fatal() {
    let (policy, nodes) = sanitizer_parts();
    let file = FileDescriptor::new("mkv", "h264", 100.0);

    let err = StreamSanitizer::new(&policy, &nodes).evaluate(&file, "glg_node").unwrap_err();
    assert_eq!(err, DomainError::StreamDataUnreadable);
}

#[test]
fn test_clean_file_is_skipped_without_node_check() {
    let (policy, nodes) = sanitizer_parts();
    let file = FileDescriptor::new("mp4", "hevc", 800.0)
        .with_stream(StreamKind::Video, "hevc", |s| s)
        .with_stream(StreamKind::Audio, "aac", english_audio)
        .with_stream(StreamKind::Subtitle, "mov_text", |s| s.with_tag("language", "eng"));

    let result = StreamSanitizer::new(&policy, &nodes).evaluate(&file, "unknown_node").unwrap();
    assert!(!result.process_file);
    assert_eq!(result.preset, "");
    assert!(result.info_log.ends_with("File does not contain any undesired or un-tagged streams. Skipping.\n"));
}

#[test]
fn test_data_streams_are_excluded() {
    let (policy, nodes) = sanitizer_parts();
    let file = FileDescriptor::new("mkv", "h264", 100.0)
        .with_stream(StreamKind::Video, "h264", |s| s)
        .with_stream(StreamKind::Audio, "aac", english_audio)
        .with_stream(StreamKind::Data, "bin_data", |s| s)
        .with_stream(StreamKind::Data, "timed_id3", |s| s);

    let result = StreamSanitizer::new(&policy, &nodes).evaluate(&file, "glg_node").unwrap();
    assert!(result.process_file);
    assert_eq!(
        result.preset,
        ", -map 0 -map -0:2 -map -0:3 -c copy -strict -2 -max_muxing_queue_size 9999"
    );
}

#[test]
fn test_no_data_streams_yield_no_data_directives() {
    let (policy, nodes) = sanitizer_parts();
    let sanitizer = StreamSanitizer::new(&policy, &nodes);
    let streams = vec![
        StreamDescriptor::new(0, StreamKind::Video, "h264"),
        StreamDescriptor::new(1, StreamKind::Audio, "aac"),
        StreamDescriptor::new(2, StreamKind::Subtitle, "subrip"),
    ];

    let mut ctx = DecisionContext::new();
    assert!(sanitizer.data_directives(&streams, &mut ctx).is_empty());
    assert!(!ctx.should_process());
}

#[test]
fn test_audio_exclusion_priority() {
    let (policy, nodes) = sanitizer_parts();
    let sanitizer = StreamSanitizer::new(&policy, &nodes);

    let unsupported = StreamDescriptor::new(1, StreamKind::Audio, "pcm_s24le")
        .with_tag("language", "fre")
        .with_tag("title", "Commentary");
    assert_eq!(
        sanitizer.audio_exclusion(&unsupported),
        Some(AudioExclusion::UnsupportedCodec("pcm_s24le".to_string()))
    );

    let foreign = StreamDescriptor::new(1, StreamKind::Audio, "aac")
        .with_tag("language", "FRE")
        .with_tag("title", "Commentary");
    assert_eq!(
        sanitizer.audio_exclusion(&foreign),
        Some(AudioExclusion::UnwantedLanguage("fre".to_string()))
    );

    let commentary = StreamDescriptor::new(1, StreamKind::Audio, "aac")
        .with_tag("language", "eng")
        .with_tag("title", "Director's COMMENTARY");
    assert_eq!(sanitizer.audio_exclusion(&commentary), Some(AudioExclusion::Commentary));

    let described = StreamDescriptor::new(1, StreamKind::Audio, "ac3").with_tag("title", "Audio Description");
    assert_eq!(sanitizer.audio_exclusion(&described), Some(AudioExclusion::Commentary));

    let main = StreamDescriptor::new(1, StreamKind::Audio, "eac3").with_tag("language", "eng");
    assert_eq!(sanitizer.audio_exclusion(&main), None);
}

#[test]
fn test_untagged_audio_is_retagged_by_output_position() {
    let (policy, nodes) = sanitizer_parts();
    let sanitizer = StreamSanitizer::new(&policy, &nodes);
    let streams = vec![
        StreamDescriptor::new(0, StreamKind::Video, "h264"),
        StreamDescriptor::new(1, StreamKind::Audio, "aac").with_tag("language", "ger"),
        StreamDescriptor::new(2, StreamKind::Audio, "aac").with_tag("language", "und"),
        StreamDescriptor::new(3, StreamKind::Audio, "ac3"),
    ];

    let mut ctx = DecisionContext::new();
    let directives = sanitizer.audio_directives(&streams, &mut ctx);

    assert_eq!(
        directives,
        vec![
            Directive::Exclude(1),
            Directive::Retag { audio_ordinal: 0, key: "language".to_string(), value: "en".to_string() },
            Directive::Retag { audio_ordinal: 1, key: "language".to_string(), value: "en".to_string() },
        ]
    );
    assert!(ctx.should_process());
    assert!(ctx.log().contains("Audio stream 0:2 has 'und' language tag. Re-tagging as 'en'."));
    assert!(ctx.log().contains("Audio stream 0:3 has no defined language. Tagging as 'en'."));
}

#[test]
fn test_removing_all_audio_is_rolled_back() {
    let (policy, nodes) = sanitizer_parts();
    let file = FileDescriptor::new("mkv", "h264", 100.0)
        .with_stream(StreamKind::Video, "h264", |s| s)
        .with_stream(StreamKind::Audio, "aac", |s| s.with_tag("language", "jpn"))
        .with_stream(StreamKind::Audio, "pcm_s24le", |s| s.with_tag("language", "eng"));

    let sanitizer = StreamSanitizer::new(&policy, &nodes);
    let mut ctx = DecisionContext::new();
    let directives = sanitizer.audio_directives(&file.streams, &mut ctx);
    assert!(directives.is_empty());
    assert!(!ctx.should_process());
    assert!(ctx.log().ends_with("All audio streams would be removed. Resetting command.\n"));

    let result = sanitizer.evaluate(&file, "glg_node").unwrap();
    assert!(!result.process_file);
}

#[test]
fn test_no_rollback_without_audio() {
    let (policy, nodes) = sanitizer_parts();
    let sanitizer = StreamSanitizer::new(&policy, &nodes);
    let streams = vec![StreamDescriptor::new(0, StreamKind::Video, "h264")];

    let mut ctx = DecisionContext::new();
    assert!(sanitizer.audio_directives(&streams, &mut ctx).is_empty());
    assert_eq!(ctx.log(), "");
}

#[test]
fn test_subtitle_exclusion_priority() {
    let (policy, nodes) = sanitizer_parts();
    let sanitizer = StreamSanitizer::new(&policy, &nodes);

    let foreign_pgs = StreamDescriptor::new(2, StreamKind::Subtitle, "hdmv_pgs_subtitle").with_tag("language", "spa");
    assert_eq!(
        sanitizer.subtitle_exclusion(&foreign_pgs),
        Some(SubtitleExclusion::UnwantedLanguage("spa".to_string()))
    );

    let untagged = StreamDescriptor::new(2, StreamKind::Subtitle, "subrip");
    assert_eq!(sanitizer.subtitle_exclusion(&untagged), Some(SubtitleExclusion::MissingLanguage));

    let english_srt = StreamDescriptor::new(2, StreamKind::Subtitle, "subrip").with_tag("language", "eng");
    assert_eq!(
        sanitizer.subtitle_exclusion(&english_srt),
        Some(SubtitleExclusion::IncompatibleCodec("subrip".to_string()))
    );

    let english_text = StreamDescriptor::new(2, StreamKind::Subtitle, "mov_text").with_tag("language", "eng");
    assert_eq!(sanitizer.subtitle_exclusion(&english_text), None);
}

#[test]
fn test_container_title_alone_does_not_trigger_processing() {
    let (policy, nodes) = sanitizer_parts();
    let file = FileDescriptor::new("mp4", "hevc", 100.0)
        .with_tag("Title", "Release.Name")
        .with_stream(StreamKind::Video, "hevc", |s| s)
        .with_stream(StreamKind::Audio, "aac", english_audio);

    let result = StreamSanitizer::new(&policy, &nodes).evaluate(&file, "glg_node").unwrap();
    assert!(!result.process_file);
    assert!(result.info_log.contains("File contains title metadata. Removing."));
}

#[test]
fn test_video_title_is_cleared_at_output_position() {
    let (policy, nodes) = sanitizer_parts();
    let file = FileDescriptor::new("mkv", "h264", 100.0)
        .with_tag("Title", "Release.Name")
        .with_stream(StreamKind::Data, "bin_data", |s| s)
        .with_stream(StreamKind::Video, "h264", |s| s.with_tag("title", "Main Feature"))
        .with_stream(StreamKind::Audio, "aac", english_audio);

    let result = StreamSanitizer::new(&policy, &nodes).evaluate(&file, "mbp_node").unwrap();
    assert!(result.process_file);
    assert_eq!(
        result.preset,
        ", -map 0 -map -0:0 -metadata title= -metadata:s:0 title= -c copy -strict -2 -max_muxing_queue_size 9999"
    );
    assert!(result.info_log.contains("Video stream 0:1 contains title metadata. Removing."));
}

#[test]
fn test_accelerated_node_prefix_and_assembly_order() {
    let (policy, nodes) = sanitizer_parts();
    let file = FileDescriptor::new("mkv", "h264", 100.0)
        .with_stream(StreamKind::Video, "h264", |s| s.with_tag("title", "x"))
        .with_stream(StreamKind::Audio, "aac", |s| s.with_tag("language", "und"))
        .with_stream(StreamKind::Audio, "aac", |s| s.with_tag("language", "ita"))
        .with_stream(StreamKind::Subtitle, "subrip", |s| s.with_tag("language", "fre"))
        .with_stream(StreamKind::Data, "bin_data", |s| s);

    let result = StreamSanitizer::new(&policy, &nodes).evaluate(&file, "Unraid_Node").unwrap();
    assert_eq!(
        result.preset,
        "-hwaccel qsv -hwaccel_output_format qsv -qsv_device /dev/dri/renderD128, \
         -map 0 -map -0:4 -metadata:s:a:0 language=en -map -0:2 -map -0:3 -metadata:s:0 title= \
         -c copy -strict -2 -max_muxing_queue_size 9999"
    );
    assert!(result.info_log.ends_with("Node 'unraid_node' detected. Setting command.\n"));
}

#[test]
fn test_unknown_node_fails_when_work_is_needed() {
    let (policy, nodes) = sanitizer_parts();
    let file = FileDescriptor::new("mkv", "h264", 100.0)
        .with_stream(StreamKind::Video, "h264", |s| s)
        .with_stream(StreamKind::Data, "bin_data", |s| s);

    let err = StreamSanitizer::new(&policy, &nodes).evaluate(&file, "laptop").unwrap_err();
    assert_eq!(err, DomainError::UnidentifiedNode { node: "laptop".to_string() });
}
