//! Document Adapter - 文档文本提取

mod file_extractor;

pub use file_extractor::FileDocumentExtractor;
