//! Podcast Command Handlers

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::commands::{GeneratePodcast, GeneratePodcastResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{DocumentExtractorPort, TextSegmenterPort};
use crate::application::services::{AudioAssembler, ScriptGenerator, SpeakerDispatcher};
use crate::domain::podcast::{Cast, CastChoice, PersonaCatalog, Role};
use crate::domain::voice::{VoiceDirectory, UNKNOWN_VOICE_NAME};

/// GeneratePodcast 命令处理器
///
/// 提取 → 分句 → 生成脚本 → 分派音色 → 合成拼接 → 导出 → 清理临时文件。
/// 提取、分句、生成失败时以空输入继续；合成与导出失败则中止。
pub struct GeneratePodcastHandler {
    extractor: Arc<dyn DocumentExtractorPort>,
    segmenter: Arc<dyn TextSegmenterPort>,
    script_generator: Arc<ScriptGenerator>,
    assembler: Arc<AudioAssembler>,
    directory: Arc<VoiceDirectory>,
    catalog: PersonaCatalog,
    cast_choice: CastChoice,
    temp_audio_path: PathBuf,
}

impl GeneratePodcastHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        extractor: Arc<dyn DocumentExtractorPort>,
        segmenter: Arc<dyn TextSegmenterPort>,
        script_generator: Arc<ScriptGenerator>,
        assembler: Arc<AudioAssembler>,
        directory: Arc<VoiceDirectory>,
        catalog: PersonaCatalog,
        cast_choice: CastChoice,
        temp_audio_path: PathBuf,
    ) -> Self {
        Self {
            extractor,
            segmenter,
            script_generator,
            assembler,
            directory,
            catalog,
            cast_choice,
            temp_audio_path,
        }
    }

    pub async fn handle(
        &self,
        cmd: GeneratePodcast,
    ) -> Result<GeneratePodcastResponse, ApplicationError> {
        tracing::info!(
            document = %cmd.document_path.display(),
            output = %cmd.output_path.display(),
            "Generating podcast"
        );

        let text = self.extract_text(&cmd.document_path).await;
        let sentences = self.segment_text(&text);
        let prepared = sentences.join("\n");

        let cast = Cast::select(&self.cast_choice, &self.catalog, &self.directory)?;

        let script = self
            .script_generator
            .generate(&prepared, &cast.host, &cast.guest)
            .await;

        let lines = SpeakerDispatcher::new().dispatch(&script, &cast.voices);

        let temp_path = self.temp_audio_path.as_path();
        if let Err(e) = self
            .assembler
            .synthesize_and_assemble(&lines, temp_path)
            .await
        {
            tracing::error!(error = %e, "Error converting text to speech");
            remove_quietly(temp_path).await;
            return Err(e.into());
        }

        let report = match self
            .assembler
            .combine_files(&[temp_path], &cmd.output_path)
            .await
        {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Error combining audio segments");
                remove_quietly(temp_path).await;
                return Err(e.into());
            }
        };

        tokio::fs::remove_file(temp_path).await.map_err(|e| {
            ApplicationError::storage(format!(
                "Failed to remove temporary audio {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        let host_voice_name = self.voice_name(&cast, Role::Host);
        let guest_voice_name = self.voice_name(&cast, Role::Guest);

        tracing::info!(
            output = %cmd.output_path.display(),
            duration_ms = report.duration_ms,
            truncated = report.truncated,
            host = %cast.host.name,
            host_voice = %host_voice_name,
            guest = %cast.guest.name,
            guest_voice = %guest_voice_name,
            "Podcast generated"
        );

        Ok(GeneratePodcastResponse {
            output_path: cmd.output_path,
            script_chars: script.chars().count(),
            script_lines: lines.len(),
            duration_ms: report.duration_ms,
            truncated: report.truncated,
            host_voice_name,
            guest_voice_name,
        })
    }

    async fn extract_text(&self, path: &Path) -> String {
        match self.extractor.extract(path).await {
            Ok(text) => {
                tracing::info!(chars = text.chars().count(), "Document text extracted");
                text
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Error extracting text, continuing with empty text"
                );
                String::new()
            }
        }
    }

    fn segment_text(&self, text: &str) -> Vec<String> {
        match self.segmenter.segment(text) {
            Ok(sentences) => {
                tracing::info!(sentences = sentences.len(), "Text segmented");
                sentences
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error segmenting text, continuing with empty text");
                Vec::new()
            }
        }
    }

    fn voice_name(&self, cast: &Cast, role: Role) -> String {
        cast.voices
            .voice_for(role)
            .map(|id| self.directory.name_for_voice(id))
            .unwrap_or(UNKNOWN_VOICE_NAME)
            .to_string()
    }
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove temporary audio");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AudioCodecPort, ExtractError, GenerationOptions, ScriptModelError, ScriptModelPort,
        SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError,
    };
    use crate::application::rate_limiter::tests::ManualClock;
    use crate::application::rate_limiter::RateLimiter;
    use crate::application::services::{AssemblyError, DEFAULT_MODEL_ID};
    use crate::infrastructure::adapters::codec::ogg_duration_ms;
    use crate::infrastructure::adapters::{
        FakeTtsClient, FakeTtsClientConfig, RuleSentenceSegmenter, SymphoniaCodec,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::{tempdir, TempDir};

    struct StubExtractor(Result<String, ()>);

    #[async_trait]
    impl DocumentExtractorPort for StubExtractor {
        async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
            self.0
                .clone()
                .map_err(|_| ExtractError::NotFound(path.display().to_string()))
        }
    }

    struct StubModel {
        response: Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubModel {
        fn new(response: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                response: response.map(str::to_string).map_err(str::to_string),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ScriptModelPort for StubModel {
        async fn complete(
            &self,
            prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<String, ScriptModelError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.response.clone().map_err(ScriptModelError::ServiceError)
        }
    }

    struct FailingTts;

    #[async_trait]
    impl TtsEnginePort for FailingTts {
        async fn synthesize(
            &self,
            _request: SynthesisRequest,
        ) -> Result<SynthesisResponse, TtsError> {
            Err(TtsError::NetworkError("connection refused".to_string()))
        }
    }

    const SCRIPT: &str = "Host: Hello there.\nGuest: Hi!\nHost: Great, thanks.";

    struct Fixture {
        dir: TempDir,
        handler: GeneratePodcastHandler,
    }

    impl Fixture {
        fn temp_path(&self) -> PathBuf {
            self.dir.path().join("temp_audio.wav")
        }

        fn command(&self, output: &str) -> GeneratePodcast {
            GeneratePodcast {
                document_path: self.dir.path().join("doc.pdf"),
                output_path: self.dir.path().join(output),
            }
        }
    }

    fn fixture(
        extracted: Result<&str, ()>,
        model: Arc<StubModel>,
        tts: Arc<dyn TtsEnginePort>,
        cast_choice: CastChoice,
    ) -> Fixture {
        let dir = tempdir().unwrap();
        let limiter = Arc::new(RateLimiter::with_clock(
            15,
            Arc::new(ManualClock::at(Duration::ZERO)),
        ));
        let generator = Arc::new(ScriptGenerator::new(
            model,
            limiter,
            GenerationOptions::default(),
            2000,
        ));
        let assembler = Arc::new(AudioAssembler::new(
            tts,
            Arc::new(SymphoniaCodec::default()),
            DEFAULT_MODEL_ID,
            1200,
        ));
        let handler = GeneratePodcastHandler::new(
            Arc::new(StubExtractor(extracted.map(str::to_string))),
            Arc::new(RuleSentenceSegmenter::default()),
            generator,
            assembler,
            Arc::new(VoiceDirectory::builtin()),
            PersonaCatalog::default(),
            cast_choice,
            dir.path().join("temp_audio.wav"),
        );
        Fixture { dir, handler }
    }

    fn fake_tts() -> Arc<FakeTtsClient> {
        Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            duration_ms: 500,
            sample_rate: 16000,
        }))
    }

    #[tokio::test]
    async fn test_end_to_end_pipeline() {
        let model = StubModel::new(Ok(SCRIPT));
        let tts = fake_tts();
        let fx = fixture(Ok("A. B. C."), model.clone(), tts.clone(), CastChoice::default());

        let response = fx.handler.handle(fx.command("podcast.wav")).await.unwrap();

        assert!(model.prompts()[0].contains("A.\nB.\nC."));
        assert_eq!(response.script_lines, 3);
        assert_eq!(response.duration_ms, 1200);
        assert!(response.truncated);
        assert_eq!(tts.calls(), 3);
        assert_eq!(response.host_voice_name, "Eric");
        assert_eq!(response.guest_voice_name, "Brian");
        assert!(response.output_path.exists());
        assert!(!fx.temp_path().exists());

        let written = std::fs::read(&response.output_path).unwrap();
        let clip = SymphoniaCodec::default().decode(&written, Some("wav")).unwrap();
        assert_eq!(clip.duration_ms(), 1200);
    }

    #[tokio::test]
    async fn test_generation_failure_yields_empty_podcast() {
        let model = StubModel::new(Err("quota exceeded"));
        let tts = fake_tts();
        let fx = fixture(Ok("Some text."), model, tts.clone(), CastChoice::default());

        let response = fx.handler.handle(fx.command("podcast.wav")).await.unwrap();

        assert_eq!(response.script_chars, 0);
        assert_eq!(response.script_lines, 0);
        assert_eq!(response.duration_ms, 0);
        assert_eq!(tts.calls(), 0);
        assert!(response.output_path.exists());
    }

    #[tokio::test]
    async fn test_extraction_failure_degrades_to_empty_text() {
        let model = StubModel::new(Ok(SCRIPT));
        let fx = fixture(Err(()), model.clone(), fake_tts(), CastChoice::default());

        let response = fx.handler.handle(fx.command("podcast.wav")).await.unwrap();

        // 仍然用空文本调用一次生成服务
        assert_eq!(model.prompts().len(), 1);
        assert_eq!(response.script_lines, 3);
    }

    #[tokio::test]
    async fn test_unknown_voice_aborts_before_generation() {
        let model = StubModel::new(Ok(SCRIPT));
        let tts = fake_tts();
        let choice = CastChoice {
            host_voice: "Nobody".to_string(),
            ..CastChoice::default()
        };
        let fx = fixture(Ok("Text."), model.clone(), tts.clone(), choice);

        let result = fx.handler.handle(fx.command("podcast.wav")).await;

        assert!(matches!(result, Err(ApplicationError::Cast(_))));
        assert!(model.prompts().is_empty());
        assert_eq!(tts.calls(), 0);
    }

    #[tokio::test]
    async fn test_synthesis_failure_aborts_and_cleans_temp() {
        let model = StubModel::new(Ok(SCRIPT));
        let fx = fixture(Ok("Text."), model, Arc::new(FailingTts), CastChoice::default());
        let cmd = fx.command("podcast.wav");
        let output = cmd.output_path.clone();

        let result = fx.handler.handle(cmd).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Assembly(AssemblyError::Synthesis { .. }))
        ));
        assert!(!fx.temp_path().exists());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_ogg_output() {
        let model = StubModel::new(Ok(SCRIPT));
        let fx = fixture(Ok("Text."), model, fake_tts(), CastChoice::default());

        let response = fx.handler.handle(fx.command("podcast.ogg")).await.unwrap();

        let written = std::fs::read(&response.output_path).unwrap();
        assert_eq!(&written[..4], b"OggS");
        assert_eq!(response.duration_ms, 1200);
        assert_eq!(ogg_duration_ms(&written), 1200);
        assert!(!fx.temp_path().exists());
    }
}
