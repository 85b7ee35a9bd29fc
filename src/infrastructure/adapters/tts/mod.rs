//! TTS Adapter - 文本转语音客户端实现

mod elevenlabs_client;
mod fake_tts_client;

pub use elevenlabs_client::{ElevenLabsClient, ElevenLabsClientConfig};
pub use fake_tts_client::{FakeTtsClient, FakeTtsClientConfig};
