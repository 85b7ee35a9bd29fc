//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（文本提取、分句、脚本生成、TTS、编解码）
//! - services: 脚本生成、台词分派、音频拼接
//! - rate_limiter: 生成服务调用的分钟级限流
//! - commands: GeneratePodcast 命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod rate_limiter;
pub mod services;

// Re-exports
pub use commands::{handlers::GeneratePodcastHandler, GeneratePodcast, GeneratePodcastResponse};

pub use error::ApplicationError;

pub use ports::{
    AudioCodecPort, AudioFormat, CodecError, DocumentExtractorPort, ExtractError,
    GenerationOptions, ScriptModelError, ScriptModelPort, SegmentError, SynthesisRequest,
    SynthesisResponse, TextSegmenterPort, TtsEnginePort, TtsError,
};

pub use rate_limiter::{Clock, RateLimiter, RatePermit, SystemClock};

pub use services::{
    AssemblyError, AssemblyReport, AudioAssembler, DispatchedLine, ScriptGenerator,
    SpeakerDispatcher,
};
