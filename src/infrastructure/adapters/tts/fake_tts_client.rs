//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 始终返回固定时长的静音 WAV，不实际调用 TTS 服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};
use crate::domain::podcast::AudioClip;
use crate::infrastructure::adapters::codec::encode_wav;

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 每次返回的音频时长（毫秒）
    pub duration_ms: u64,
    /// 采样率
    pub sample_rate: u32,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            duration_ms: 5000,
            sample_rate: 22050,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    /// 缓存的音频数据
    audio_data: Vec<u8>,
    calls: AtomicUsize,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        let audio_data = encode_wav(&AudioClip::silence(config.duration_ms, config.sample_rate, 1));
        tracing::info!(
            duration_ms = config.duration_ms,
            sample_rate = config.sample_rate,
            "FakeTtsClient initialized"
        );
        Self {
            config,
            audio_data,
            calls: AtomicUsize::new(0),
        }
    }

    /// 已处理的合成请求数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            duration_ms = self.config.duration_ms,
            "FakeTtsClient: returning fixed audio"
        );

        Ok(SynthesisResponse {
            audio_data: self.audio_data.clone(),
            format_hint: Some("wav".to_string()),
        })
    }
}
