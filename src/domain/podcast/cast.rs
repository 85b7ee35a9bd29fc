//! Podcast Context - 阵容选择
//!
//! 一次运行固定一位主持人、一位嘉宾，以及各自的音色。

use std::collections::BTreeMap;

use super::{Persona, PersonaCatalog, PodcastError, Role};
use crate::domain::voice::{VoiceDirectory, VoiceId};

/// 阵容选择（按名称）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastChoice {
    pub host: String,
    pub guest: String,
    pub host_voice: String,
    pub guest_voice: String,
}

impl Default for CastChoice {
    fn default() -> Self {
        Self {
            host: "Kurt Cobain".to_string(),
            guest: "Tupac Shakur".to_string(),
            host_voice: "Eric".to_string(),
            guest_voice: "Brian".to_string(),
        }
    }
}

/// 角色 → 音色映射
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceCast {
    voices: BTreeMap<Role, VoiceId>,
}

impl VoiceCast {
    pub fn new(host: VoiceId, guest: VoiceId) -> Self {
        Self::default().with(Role::Host, host).with(Role::Guest, guest)
    }

    pub fn with(mut self, role: Role, voice: VoiceId) -> Self {
        self.voices.insert(role, voice);
        self
    }

    pub fn voice_for(&self, role: Role) -> Option<&VoiceId> {
        self.voices.get(&role)
    }
}

/// 选定的阵容
#[derive(Debug, Clone)]
pub struct Cast {
    pub host: Persona,
    pub guest: Persona,
    pub voices: VoiceCast,
}

impl Cast {
    /// 从人设目录和音色目录中解析阵容
    ///
    /// 任一人设或音色名称找不到都会失败。
    pub fn select(
        choice: &CastChoice,
        catalog: &PersonaCatalog,
        directory: &VoiceDirectory,
    ) -> Result<Self, PodcastError> {
        let host = catalog.find(Role::Host, &choice.host)?.clone();
        let guest = catalog.find(Role::Guest, &choice.guest)?.clone();
        let host_voice = directory.voice_for_name(&choice.host_voice)?;
        let guest_voice = directory.voice_for_name(&choice.guest_voice)?;

        Ok(Self {
            host,
            guest,
            voices: VoiceCast::new(host_voice, guest_voice),
        })
    }
}
