//! File Document Extractor - 从本地文件提取纯文本
//!
//! 实现 DocumentExtractorPort trait
//!
//! - .pdf: pdf-extract 逐页提取，页间以换行分隔
//! - .txt / .md: 按 UTF-8 原样读取

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use crate::application::ports::{DocumentExtractorPort, ExtractError};

/// 文件文本提取器
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDocumentExtractor;

impl FileDocumentExtractor {
    pub fn new() -> Self {
        Self
    }

    async fn read(path: &Path) -> Result<Vec<u8>, ExtractError> {
        fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ExtractError::NotFound(path.display().to_string()),
            _ => ExtractError::IoError(format!("{}: {}", path.display(), e)),
        })
    }
}

#[async_trait]
impl DocumentExtractorPort for FileDocumentExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let text = match ext.as_str() {
            "pdf" => {
                let data = Self::read(path).await?;
                // PDF 解析是 CPU 密集操作
                tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                    .await
                    .map_err(|e| ExtractError::ParseError(format!("Extraction task failed: {}", e)))?
                    .map_err(|e| ExtractError::ParseError(e.to_string()))?
            }
            "txt" | "md" => {
                let data = Self::read(path).await?;
                String::from_utf8(data)
                    .map_err(|e| ExtractError::ParseError(format!("Invalid UTF-8: {}", e)))?
            }
            _ => return Err(ExtractError::UnsupportedType(path.display().to_string())),
        };

        tracing::debug!(
            path = %path.display(),
            chars = text.chars().count(),
            "Document text extracted"
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_extract_plain_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Line one.\nLine two.").unwrap();

        let text = FileDocumentExtractor::new().extract(&path).await.unwrap();
        assert_eq!(text, "Line one.\nLine two.");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let result = FileDocumentExtractor::new()
            .extract(&dir.path().join("AstrologyforBeginners.pdf"))
            .await;

        assert!(matches!(result, Err(ExtractError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slides.pptx");
        std::fs::write(&path, b"binary").unwrap();

        let result = FileDocumentExtractor::new().extract(&path).await;
        assert!(matches!(result, Err(ExtractError::UnsupportedType(_))));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let result = FileDocumentExtractor::new().extract(&path).await;
        assert!(matches!(result, Err(ExtractError::ParseError(_))));
    }
}
