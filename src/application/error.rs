//! 应用层错误定义
//!
//! 流水线中需要中止运行的错误

use thiserror::Error;

use crate::application::services::AssemblyError;
use crate::domain::podcast::PodcastError;
use crate::domain::voice::VoiceError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 人设或音色查找失败
    #[error("Cast selection failed: {0}")]
    Cast(#[from] PodcastError),

    /// 合成、解码或导出失败
    #[error("Audio assembly failed: {0}")]
    Assembly(#[from] AssemblyError),

    /// 临时文件清理等存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建存储错误
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError(message.into())
    }
}

impl From<VoiceError> for ApplicationError {
    fn from(err: VoiceError) -> Self {
        Self::Cast(PodcastError::Voice(err))
    }
}
