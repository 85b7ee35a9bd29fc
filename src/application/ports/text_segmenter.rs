//! Text Segmenter Port - 分句抽象
//!
//! 定义分句的抽象接口，具体实现在 infrastructure/adapters 层

use thiserror::Error;

/// 分句错误
#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("Segmentation failed: {0}")]
    Failed(String),
}

/// Text Segmenter Port
///
/// 将原文拆成一句一个元素，顺序与原文一致
pub trait TextSegmenterPort: Send + Sync {
    fn segment(&self, text: &str) -> Result<Vec<String>, SegmentError>;
}
