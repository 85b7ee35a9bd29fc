//! Document Extractor Port - 文档文本提取抽象
//!
//! 定义从源文档读取纯文本的接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 文本提取错误
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Unsupported document type: {0}")]
    UnsupportedType(String),

    #[error("Failed to parse document: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Document Extractor Port
///
/// 读取文档并返回按页拼接的文本
#[async_trait]
pub trait DocumentExtractorPort: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}
