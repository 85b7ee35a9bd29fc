//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_codec;
mod document_extractor;
mod script_model;
mod text_segmenter;
mod tts_engine;

pub use audio_codec::{AudioCodecPort, AudioFormat, CodecError};
pub use document_extractor::{DocumentExtractorPort, ExtractError};
pub use script_model::{GenerationOptions, ScriptModelError, ScriptModelPort};
pub use text_segmenter::{SegmentError, TextSegmenterPort};
pub use tts_engine::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};
