//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（DOCUCAST_*）
//! 2. 配置文件（config.toml）
//! 3. 旧版环境变量（GEMINI_API_KEY / ELEVEN_LABS_KEY）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 旧版凭据环境变量 → 配置键
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("GEMINI_API_KEY", "gemini.api_key"),
    ("ELEVEN_LABS_KEY", "elevenlabs.api_key"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `DOCUCAST_GEMINI__API_KEY=...`
/// - `DOCUCAST_PATHS__DOCUMENT=/data/book.pdf`
/// - `DOCUCAST_LIMITS__MAX_AUDIO_DURATION_MS=30000`
/// - `DOCUCAST_CAST__HOST_VOICE=Eric`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let legacy: Vec<(&str, String)> = LEGACY_KEYS
        .iter()
        .filter_map(|(var, key)| std::env::var(var).ok().map(|value| (*key, value)))
        .collect();
    load_config_from(None, &legacy)
}

/// 加载配置
///
/// `config_path` 为 None 时按默认文件名搜索
fn load_config_from(
    config_path: Option<&Path>,
    legacy: &[(&str, String)],
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("gemini.base_url", "https://generativelanguage.googleapis.com/v1beta")?
        .set_default("gemini.model", "gemini-1.5-flash")?
        .set_default("gemini.timeout_secs", 120)?
        .set_default("elevenlabs.base_url", "https://api.elevenlabs.io")?
        .set_default("elevenlabs.model_id", "eleven_monolingual_v1")?
        .set_default("elevenlabs.output_format", "mp3_44100_128")?
        .set_default("elevenlabs.timeout_secs", 120)?
        .set_default("paths.document", "AstrologyforBeginners.pdf")?
        .set_default("paths.temp_audio", "temp_audio.wav")?
        .set_default("paths.output", "podcast.ogg")?
        .set_default("limits.max_script_chars", 2000)?
        .set_default("limits.max_audio_duration_ms", 60_000)?
        .set_default("limits.rate_limit_per_minute", 15)?
        .set_default("audio.bitrate", 64_000)?
        .set_default("segment.min_chars", 0)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 旧版凭据变量只作为默认值，配置文件和 DOCUCAST_* 都能覆盖
    for (key, value) in legacy {
        builder = builder.set_default(*key, value.as_str())?;
    }

    // 3. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 4. 环境变量（最高优先级）
    // 前缀: DOCUCAST_
    // 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("DOCUCAST")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.limits.max_script_chars == 0 {
        return Err(ConfigError::ValidationError(
            "max_script_chars cannot be 0".to_string(),
        ));
    }

    if config.limits.max_audio_duration_ms == 0 {
        return Err(ConfigError::ValidationError(
            "max_audio_duration_ms cannot be 0".to_string(),
        ));
    }

    if config.limits.rate_limit_per_minute == 0 {
        return Err(ConfigError::ValidationError(
            "rate_limit_per_minute cannot be 0".to_string(),
        ));
    }

    let paths = [
        ("document", &config.paths.document),
        ("temp_audio", &config.paths.temp_audio),
        ("output", &config.paths.output),
    ];
    for (name, path) in paths {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "paths.{} cannot be empty",
                name
            )));
        }
    }

    if config.paths.temp_audio == config.paths.output {
        return Err(ConfigError::ValidationError(
            "paths.temp_audio and paths.output must differ".to_string(),
        ));
    }

    if config.gemini.base_url.is_empty() || config.elevenlabs.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Service base URL cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 凭据只显示是否已设置
fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "****"
    }
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Gemini: {} ({})", config.gemini.model, config.gemini.base_url);
    tracing::info!("Gemini API Key: {}", mask(&config.gemini.api_key));
    tracing::info!(
        "ElevenLabs: {} ({})",
        config.elevenlabs.model_id,
        config.elevenlabs.base_url
    );
    tracing::info!("ElevenLabs API Key: {}", mask(&config.elevenlabs.api_key));
    tracing::info!("Document: {:?}", config.paths.document);
    tracing::info!("Temp Audio: {:?}", config.paths.temp_audio);
    tracing::info!("Output: {:?}", config.paths.output);
    tracing::info!("Max Script Chars: {}", config.limits.max_script_chars);
    tracing::info!("Max Audio Duration: {}ms", config.limits.max_audio_duration_ms);
    tracing::info!("Rate Limit: {}/min", config.limits.rate_limit_per_minute);
    tracing::info!(
        "Cast: {} ({}) / {} ({})",
        config.cast.host,
        config.cast.host_voice,
        config.cast.guest,
        config.cast.guest_voice
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
