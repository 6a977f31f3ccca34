// Decision context - Per-invocation accumulator for log text and the process flag

use crate::domain::directive::Preset;
use crate::domain::model::DecisionResult;

/// Mutable state shared by the rules while one file is evaluated
///
/// A context lives for exactly one invocation. It only becomes a
/// [`DecisionResult`] through [`DecisionContext::finish`], so a rule that
/// fails leaves nothing behind.
#[derive(Debug, Default)]
pub struct DecisionContext {
    log: String,
    process: bool,
}

impl DecisionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line to the host-facing log
    pub fn note(&mut self, line: impl AsRef<str>) {
        self.log.push_str(line.as_ref());
        self.log.push('\n');
    }

    /// Mark the file as needing work
    pub fn flag_process(&mut self) {
        self.process = true;
    }

    pub fn should_process(&self) -> bool {
        self.process
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    /// Close the context into the record returned to the host
    pub fn finish(self, container: Option<String>, preset: Option<&Preset>) -> DecisionResult {
        DecisionResult {
            container,
            ffmpeg_mode: true,
            info_log: self.log,
            preset: preset.map(Preset::render).unwrap_or_default(),
            process_file: self.process,
            requeue_after: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directive::Directive;

    #[test]
    fn test_note_appends_lines() {
        let mut ctx = DecisionContext::new();
        ctx.note("first");
        ctx.note(String::from("second"));
        assert_eq!(ctx.log(), "first\nsecond\n");
        assert!(!ctx.should_process());
    }

    #[test]
    fn test_finish_without_preset() {
        let mut ctx = DecisionContext::new();
        ctx.note("skipping");
        let result = ctx.finish(Some(".mkv".to_string()), None);

        assert_eq!(result.container.as_deref(), Some(".mkv"));
        assert!(result.ffmpeg_mode);
        assert!(!result.process_file);
        assert!(!result.requeue_after);
        assert_eq!(result.preset, "");
    }

    #[test]
    fn test_finish_with_preset() {
        let mut ctx = DecisionContext::new();
        ctx.flag_process();
        let mut preset = Preset::new();
        preset.push_output(Directive::IncludeAll);

        let result = ctx.finish(None, Some(&preset));
        assert!(result.process_file);
        assert_eq!(result.preset, ", -map 0");
    }
}
