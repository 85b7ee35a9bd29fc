//! Voice Directory - 音色目录
//!
//! 音色 ID 与显示名之间的双向映射。
//! 主表为 id → name，反向索引在构造时一次性派生，之后不可变。

use std::collections::HashMap;

use super::{VoiceError, VoiceId, VoiceName};

/// 未知音色 ID 的显示名
pub const UNKNOWN_VOICE_NAME: &str = "Unknown";

/// 内置音色表（语音合成服务的预置音色）
const BUILTIN_VOICES: &[(&str, &str)] = &[
    ("9BWtsMINqrJLrRacOk9x", "Aria"),
    ("CwhRBWXzGAHq8TQ4Fs17", "Roger"),
    ("EXAVITQu4vr4xnSDxMaL", "Sarah"),
    ("FGY2WhTYpPnrIDTdsKH5", "Laura"),
    ("IKne3meq5aSn9XLyUdCD", "Charlie"),
    ("JBFqnCBsd6RMkjVDRZzb", "George"),
    ("N2lVS1w4EtoT3dr4eOWO", "Callum"),
    ("SAz9YHcvj6GT2YYXdXww", "River"),
    ("TX3LPaxmHKxFdv7VOQHJ", "Liam"),
    ("XB0fDUnXU5powFXDhCwa", "Charlotte"),
    ("Xb7hH8MSUJpSbSDYk0k2", "Alice"),
    ("XrExE9yKIg1WjnnlVkGX", "Matilda"),
    ("bIHbv24MWmeRgasZH58o", "Will"),
    ("cgSgspJ2msm6clMCkdW9", "Jessica"),
    ("cjVigY5qzO86Huf0OWal", "Eric"),
    ("iP95p4xoKVk53GoZ742B", "Chris"),
    ("nPczCjzI2devNBz1zQrb", "Brian"),
    ("onwK4e9ZLuTAKqWW03F9", "Daniel"),
    ("pFZP5JQG7iQjIQuC4Bku", "Lily"),
    ("pqHfZKP75CvOlQylNhV4", "Bill"),
];

/// 音色目录
#[derive(Debug, Clone)]
pub struct VoiceDirectory {
    /// 主表，保持插入顺序
    entries: Vec<(VoiceId, VoiceName)>,
    by_id: HashMap<VoiceId, usize>,
    by_name: HashMap<String, usize>,
}

impl VoiceDirectory {
    /// 从 (id, name) 列表构建目录
    ///
    /// id 或 name 重复时返回错误，保证双向视图一致。
    pub fn from_entries<I, K, N>(entries: I) -> Result<Self, VoiceError>
    where
        I: IntoIterator<Item = (K, N)>,
        K: Into<String>,
        N: Into<String>,
    {
        let mut directory = Self {
            entries: Vec::new(),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        };

        for (id, name) in entries {
            let id = VoiceId::new(id);
            let name = name.into();
            let name = VoiceName::new(name.clone()).map_err(|_| VoiceError::InvalidName(name))?;

            if directory.by_id.contains_key(&id) {
                return Err(VoiceError::DuplicateId(id));
            }
            if directory.by_name.contains_key(name.as_str()) {
                return Err(VoiceError::DuplicateName {
                    name: name.as_str().to_string(),
                    id,
                });
            }

            let index = directory.entries.len();
            directory.by_id.insert(id.clone(), index);
            directory.by_name.insert(name.as_str().to_string(), index);
            directory.entries.push((id, name));
        }

        Ok(directory)
    }

    /// 内置音色目录
    pub fn builtin() -> Self {
        // 内置表在编译期固定，且无重复项
        Self::from_entries(BUILTIN_VOICES.iter().copied())
            .unwrap_or_else(|e| unreachable!("builtin voice table is invalid: {e}"))
    }

    /// 根据 ID 查询显示名，未知 ID 返回 "Unknown"
    pub fn name_for_voice(&self, id: &VoiceId) -> &str {
        self.by_id
            .get(id)
            .map(|&i| self.entries[i].1.as_str())
            .unwrap_or(UNKNOWN_VOICE_NAME)
    }

    /// 根据显示名查询 ID
    pub fn voice_for_name(&self, name: &str) -> Result<VoiceId, VoiceError> {
        self.by_name
            .get(name)
            .map(|&i| self.entries[i].0.clone())
            .ok_or_else(|| VoiceError::UnknownName(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VoiceId, &VoiceName)> {
        self.entries.iter().map(|(id, name)| (id, name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VoiceDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}
