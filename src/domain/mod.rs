//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Podcast Context: 人设、阵容、脚本与音频片段
//! - Voice Context: 音色目录

pub mod podcast;
pub mod voice;

// 共享的句子分割器
mod text_segmenter;

pub use text_segmenter::{segment_sentences, SegmentConfig, DEFAULT_MIN_CHARS};
