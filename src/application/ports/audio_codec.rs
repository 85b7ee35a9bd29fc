//! Audio Codec Port - 音频编解码抽象
//!
//! 把合成服务返回的编码音频解码为 PCM 片段，并把拼接结果编码为输出容器

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::domain::podcast::AudioClip;

/// 编解码错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),
}

/// 音频输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// 16 位 PCM WAV，用作中间文件
    #[default]
    Wav,
    /// Opus 格式（OGG 容器）- 压缩输出
    Opus,
}

impl AudioFormat {
    /// 根据文件扩展名推断输出格式
    pub fn from_path(path: &Path) -> Result<Self, CodecError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| CodecError::UnsupportedFormat(path.display().to_string()))?;
        ext.parse()
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioFormat::Wav => write!(f, "wav"),
            AudioFormat::Opus => write!(f, "opus"),
        }
    }
}

impl std::str::FromStr for AudioFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wav" => Ok(AudioFormat::Wav),
            "opus" | "ogg" => Ok(AudioFormat::Opus),
            _ => Err(CodecError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Audio Codec Port
///
/// 纯 CPU 操作，不涉及 IO
pub trait AudioCodecPort: Send + Sync {
    /// 解码音频
    ///
    /// # Arguments
    /// * `data` - 编码后的音频字节
    /// * `hint` - 可选的扩展名提示（如 "mp3"）
    fn decode(&self, data: &[u8], hint: Option<&str>) -> Result<AudioClip, CodecError>;

    /// 编码为指定容器格式
    fn encode(&self, clip: &AudioClip, format: AudioFormat) -> Result<Vec<u8>, CodecError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            AudioFormat::from_path(Path::new("podcast.ogg")).unwrap(),
            AudioFormat::Opus
        );
        assert_eq!(
            AudioFormat::from_path(Path::new("temp_audio.WAV")).unwrap(),
            AudioFormat::Wav
        );
        assert!(AudioFormat::from_path(Path::new("podcast.mp3")).is_err());
        assert!(AudioFormat::from_path(Path::new("podcast")).is_err());
    }
}
