//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 音色唯一标识（语音合成服务侧的不透明 token）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音色名称（人类可读的显示名）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("音色名称不能为空");
        }
        if name.len() > 100 {
            return Err("音色名称长度不能超过100字符");
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_name_validation() {
        assert!(VoiceName::new("Eric").is_ok());
        assert!(VoiceName::new("").is_err());
        assert!(VoiceName::new("   ").is_err());
        assert!(VoiceName::new("x".repeat(101)).is_err());
    }

    #[test]
    fn test_voice_id_display() {
        let id = VoiceId::new("cjVigY5qzO86Huf0OWal");
        assert_eq!(id.to_string(), "cjVigY5qzO86Huf0OWal");
        assert_eq!(id.as_str(), "cjVigY5qzO86Huf0OWal");
    }
}
