//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::ports::GenerationOptions;
use crate::domain::podcast::{CastChoice, Persona, PersonaCatalog};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 脚本生成服务配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// 语音合成服务配置
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    /// 文件路径配置
    #[serde(default)]
    pub paths: PathsConfig,

    /// 预算与限流配置
    #[serde(default)]
    pub limits: LimitsConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 分句配置
    #[serde(default)]
    pub segment: SegmentSettings,

    /// 阵容选择
    #[serde(default)]
    pub cast: CastConfig,

    /// 自定义人设（为空时使用内置人设）
    #[serde(default)]
    pub personas: Vec<Persona>,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 人设目录
    pub fn persona_catalog(&self) -> PersonaCatalog {
        if self.personas.is_empty() {
            PersonaCatalog::default()
        } else {
            PersonaCatalog::new(self.personas.clone())
        }
    }
}

/// Gemini 配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_gemini_url")]
    pub base_url: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_response_mime_type")]
    pub response_mime_type: String,
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_temperature() -> f32 {
    1.0
}

fn default_top_p() -> f32 {
    0.95
}

fn default_top_k() -> u32 {
    64
}

fn default_max_output_tokens() -> u32 {
    8192
}

fn default_response_mime_type() -> String {
    "text/plain".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_gemini_url(),
            model: default_gemini_model(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
            response_mime_type: default_response_mime_type(),
        }
    }
}

impl GeminiConfig {
    /// 生成参数
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens,
            response_mime_type: self.response_mime_type.clone(),
        }
    }
}

/// ElevenLabs 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_elevenlabs_url")]
    pub base_url: String,

    /// 声学模型
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// 返回音频格式
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_elevenlabs_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_model_id() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_output_format() -> String {
    "mp3_44100_128".to_string()
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_elevenlabs_url(),
            model_id: default_model_id(),
            output_format: default_output_format(),
            timeout_secs: default_timeout(),
        }
    }
}

/// 路径配置
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// 输入文档
    #[serde(default = "default_document")]
    pub document: PathBuf,

    /// 中间音频文件（运行结束后删除）
    #[serde(default = "default_temp_audio")]
    pub temp_audio: PathBuf,

    /// 输出音频，格式由扩展名决定（.ogg / .wav）
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_document() -> PathBuf {
    PathBuf::from("AstrologyforBeginners.pdf")
}

fn default_temp_audio() -> PathBuf {
    PathBuf::from("temp_audio.wav")
}

fn default_output() -> PathBuf {
    PathBuf::from("podcast.ogg")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            document: default_document(),
            temp_audio: default_temp_audio(),
            output: default_output(),
        }
    }
}

/// 预算与限流配置
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// 脚本字符预算
    #[serde(default = "default_max_script_chars")]
    pub max_script_chars: usize,

    /// 输出时长上限（毫秒）
    #[serde(default = "default_max_audio_duration_ms")]
    pub max_audio_duration_ms: u64,

    /// 生成服务每分钟调用上限
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,
}

fn default_max_script_chars() -> usize {
    2000
}

fn default_max_audio_duration_ms() -> u64 {
    60_000
}

fn default_rate_limit() -> u32 {
    15
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_script_chars: default_max_script_chars(),
            max_audio_duration_ms: default_max_audio_duration_ms(),
            rate_limit_per_minute: default_rate_limit(),
        }
    }
}

/// 音频配置
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// Opus 比特率（bps）
    /// 语音推荐: 16000-64000
    #[serde(default = "default_bitrate")]
    pub bitrate: u32,
}

fn default_bitrate() -> u32 {
    64000
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            bitrate: default_bitrate(),
        }
    }
}

/// 分句配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SegmentSettings {
    /// 最小句长，0 表示不合并
    #[serde(default)]
    pub min_chars: usize,
}

/// 阵容配置
#[derive(Debug, Clone, Deserialize)]
pub struct CastConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_guest")]
    pub guest: String,

    #[serde(default = "default_host_voice")]
    pub host_voice: String,

    #[serde(default = "default_guest_voice")]
    pub guest_voice: String,
}

fn default_host() -> String {
    "Kurt Cobain".to_string()
}

fn default_guest() -> String {
    "Tupac Shakur".to_string()
}

fn default_host_voice() -> String {
    "Eric".to_string()
}

fn default_guest_voice() -> String {
    "Brian".to_string()
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            guest: default_guest(),
            host_voice: default_host_voice(),
            guest_voice: default_guest_voice(),
        }
    }
}

impl From<&CastConfig> for CastChoice {
    fn from(config: &CastConfig) -> Self {
        CastChoice {
            host: config.host.clone(),
            guest: config.guest.clone(),
            host_voice: config.host_voice.clone(),
            guest_voice: config.guest_voice.clone(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
