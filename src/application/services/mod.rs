//! 应用服务 - 流水线各阶段
//!
//! - ScriptGenerator: 限流后生成对话脚本
//! - SpeakerDispatcher: 台词解析与音色分派
//! - AudioAssembler: 逐行合成并按时长上限拼接

mod audio_assembler;
mod script_generator;
mod speaker_dispatcher;

pub use audio_assembler::{
    AssemblyError, AssemblyReport, AudioAssembler, DEFAULT_MAX_AUDIO_DURATION_MS,
    DEFAULT_MODEL_ID,
};
pub use script_generator::{build_prompt, ScriptGenerator, DEFAULT_MAX_SCRIPT_CHARS};
pub use speaker_dispatcher::{DispatchedLine, SpeakerDispatcher};
