//! Podcast Context - 播客限界上下文
//!
//! 职责:
//! - 主持人 / 嘉宾人设与阵容
//! - 对话脚本解析
//! - 音频片段拼接与截断

mod audio_clip;
mod cast;
mod errors;
mod persona;
mod script;

pub use audio_clip::{resample_linear, AudioClip, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};
pub use cast::{Cast, CastChoice, VoiceCast};
pub use errors::PodcastError;
pub use persona::{Persona, PersonaCatalog, Role};
pub use script::{clean_script, parse_lines, truncate_chars, ScriptLine};
