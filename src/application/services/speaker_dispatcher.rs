//! Speaker Dispatcher - 台词到音色的分派

use crate::domain::podcast::{clean_script, parse_lines, ScriptLine, VoiceCast};
use crate::domain::voice::VoiceId;

/// 已分派音色的台词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedLine {
    pub line: ScriptLine,
    pub voice: VoiceId,
}

/// 台词分派器
#[derive(Debug, Default, Clone, Copy)]
pub struct SpeakerDispatcher;

impl SpeakerDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// 清理、解析脚本并为每行解析音色
    ///
    /// 角色没有对应音色的行被静默丢弃。
    pub fn dispatch(&self, script: &str, cast: &VoiceCast) -> Vec<DispatchedLine> {
        let cleaned = clean_script(script);
        let lines = parse_lines(&cleaned);
        let parsed = lines.len();

        let dispatched: Vec<DispatchedLine> = lines
            .into_iter()
            .filter_map(|line| match cast.voice_for(line.role) {
                Some(voice) => Some(DispatchedLine {
                    voice: voice.clone(),
                    line,
                }),
                None => {
                    tracing::debug!(role = %line.role, "No voice for role, dropping line");
                    None
                }
            })
            .collect();

        tracing::info!(
            parsed_lines = parsed,
            dispatched_lines = dispatched.len(),
            "Script dispatched to speakers"
        );

        dispatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::podcast::Role;

    fn cast() -> VoiceCast {
        VoiceCast::new(VoiceId::new("host-voice"), VoiceId::new("guest-voice"))
    }

    #[test]
    fn test_dispatch_resolves_voices_in_order() {
        let script = "**Host:** Hello there.\nGuest: Hi!\nHost: Great, thanks.";
        let lines = SpeakerDispatcher::new().dispatch(script, &cast());

        let roles: Vec<Role> = lines.iter().map(|l| l.line.role).collect();
        assert_eq!(roles, vec![Role::Host, Role::Guest, Role::Host]);
        assert_eq!(lines[0].line.text, "Hello there.");
        assert_eq!(lines[0].voice.as_str(), "host-voice");
        assert_eq!(lines[1].voice.as_str(), "guest-voice");
    }

    #[test]
    fn test_unmapped_role_dropped() {
        let host_only = VoiceCast::default().with(Role::Host, VoiceId::new("host-voice"));
        let lines = SpeakerDispatcher::new().dispatch("Host: One.\nGuest: Two.", &host_only);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line.text, "One.");
    }

    #[test]
    fn test_empty_script_dispatches_nothing() {
        assert!(SpeakerDispatcher::new().dispatch("", &cast()).is_empty());
    }
}
