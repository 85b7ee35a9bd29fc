//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色 ID / 显示名双向查询
//! - 内置音色表

mod directory;
mod errors;
mod value_objects;

pub use directory::{VoiceDirectory, UNKNOWN_VOICE_NAME};
pub use errors::VoiceError;
pub use value_objects::{VoiceId, VoiceName};
