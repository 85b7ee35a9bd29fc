//! Docucast - 文档转双人播客
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Podcast Context: 人设、阵容、脚本解析、音频片段
//! - Voice Context: 音色目录
//!
//! 应用层 (application/):
//! - Ports: 端口定义（DocumentExtractor, TextSegmenter, ScriptModel, TtsEngine, AudioCodec）
//! - Services: ScriptGenerator, SpeakerDispatcher, AudioAssembler
//! - RateLimiter: 生成服务分钟级限流
//! - Commands: GeneratePodcast 命令处理器
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Gemini, ElevenLabs, PDF 提取, 规则分句, symphonia/opus 编解码

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
