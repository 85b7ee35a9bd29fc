//! Script Model Port - 文本生成服务抽象
//!
//! 不透明的文本补全能力：输入提示词和采样参数，输出生成的文本

use async_trait::async_trait;
use thiserror::Error;

/// 生成服务错误
#[derive(Debug, Error)]
pub enum ScriptModelError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Response blocked: {0}")]
    Blocked(String),
}

/// 采样参数
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    /// 期望的响应 MIME 类型（纯文本）
    pub response_mime_type: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".to_string(),
        }
    }
}

/// Script Model Port
#[async_trait]
pub trait ScriptModelPort: Send + Sync {
    /// 单次补全，不做重试
    async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ScriptModelError>;
}
