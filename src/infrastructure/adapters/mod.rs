//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod codec;
pub mod document;
pub mod llm;
pub mod segmenter;
pub mod tts;

pub use codec::*;
pub use document::*;
pub use llm::*;
pub use segmenter::*;
pub use tts::*;
