//! Docucast - 文档转双人播客
//!
//! 一次运行：读取文档 → 生成对话脚本 → 逐行合成语音 → 导出音频

use std::sync::Arc;

use docucast::application::{
    AudioAssembler, GeneratePodcast, GeneratePodcastHandler, RateLimiter, ScriptGenerator,
};
use docucast::config::{load_config, print_config, AppConfig};
use docucast::domain::podcast::CastChoice;
use docucast::domain::voice::VoiceDirectory;
use docucast::domain::SegmentConfig;
use docucast::infrastructure::adapters::{
    ElevenLabsClient, ElevenLabsClientConfig, FileDocumentExtractor, GeminiClient,
    GeminiClientConfig, RuleSentenceSegmenter, SymphoniaCodec,
};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},docucast={}", config.log.level, config.log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

fn build_handler(config: &AppConfig) -> anyhow::Result<GeneratePodcastHandler> {
    // 脚本生成
    let gemini = GeminiClient::new(GeminiClientConfig {
        base_url: config.gemini.base_url.clone(),
        api_key: config.gemini.api_key.clone(),
        model: config.gemini.model.clone(),
        timeout_secs: config.gemini.timeout_secs,
    })?;
    let limiter = Arc::new(RateLimiter::new(config.limits.rate_limit_per_minute));
    let script_generator = Arc::new(ScriptGenerator::new(
        Arc::new(gemini),
        limiter,
        config.gemini.generation_options(),
        config.limits.max_script_chars,
    ));

    // 语音合成与拼接
    let elevenlabs = ElevenLabsClient::new(ElevenLabsClientConfig {
        base_url: config.elevenlabs.base_url.clone(),
        api_key: config.elevenlabs.api_key.clone(),
        output_format: config.elevenlabs.output_format.clone(),
        timeout_secs: config.elevenlabs.timeout_secs,
    })?;
    let codec = SymphoniaCodec::new(config.audio.bitrate);
    let assembler = Arc::new(AudioAssembler::new(
        Arc::new(elevenlabs),
        Arc::new(codec),
        config.elevenlabs.model_id.clone(),
        config.limits.max_audio_duration_ms,
    ));

    let segmenter = RuleSentenceSegmenter::new(SegmentConfig {
        min_chars: config.segment.min_chars,
    });

    Ok(GeneratePodcastHandler::new(
        Arc::new(FileDocumentExtractor::new()),
        Arc::new(segmenter),
        script_generator,
        assembler,
        Arc::new(VoiceDirectory::builtin()),
        config.persona_catalog(),
        CastChoice::from(&config.cast),
        config.paths.temp_audio.clone(),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 旧版凭据变量 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Docucast - 文档转双人播客");
    print_config(&config);

    let handler = build_handler(&config)?;

    let response = handler
        .handle(GeneratePodcast {
            document_path: config.paths.document.clone(),
            output_path: config.paths.output.clone(),
        })
        .await?;

    tracing::info!(
        output = %response.output_path.display(),
        duration_ms = response.duration_ms,
        script_lines = response.script_lines,
        "Podcast generation complete"
    );

    Ok(())
}
