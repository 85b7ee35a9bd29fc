//! Audio Assembler - 逐行合成并拼接音频
//!
//! 按脚本顺序逐行合成、解码、拼接；累计时长一旦超过上限就截断到上限并停止，
//! 后续行不再合成。

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::DispatchedLine;
use crate::application::ports::{
    AudioCodecPort, AudioFormat, CodecError, SynthesisRequest, TtsEnginePort, TtsError,
};
use crate::domain::podcast::AudioClip;

/// 默认最大输出时长（毫秒）
pub const DEFAULT_MAX_AUDIO_DURATION_MS: u64 = 60_000;

/// 默认声学模型
pub const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";

/// 拼接错误
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("Synthesis failed for line {index}: {source}")]
    Synthesis {
        index: usize,
        #[source]
        source: TtsError,
    },

    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: CodecError,
    },

    #[error("Failed to encode output: {0}")]
    Encode(#[from] CodecError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 拼接结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyReport {
    /// 实际拼接的片段数
    pub clips: usize,
    /// 输出时长（毫秒）
    pub duration_ms: u64,
    /// 是否因时长上限被截断
    pub truncated: bool,
}

/// 带时长上限的拼接缓冲
struct CappedAssembly {
    combined: AudioClip,
    max_duration_ms: u64,
    clips: usize,
    truncated: bool,
}

impl CappedAssembly {
    fn new(max_duration_ms: u64) -> Self {
        Self {
            combined: AudioClip::empty(),
            max_duration_ms,
            clips: 0,
            truncated: false,
        }
    }

    /// 追加片段，达到上限时返回 true
    fn push(&mut self, clip: AudioClip) -> bool {
        self.combined.append(clip);
        self.clips += 1;

        if self.combined.duration_ms() > self.max_duration_ms {
            self.combined.truncate_ms(self.max_duration_ms);
            self.truncated = true;
        }
        self.truncated
    }

    fn report(&self) -> AssemblyReport {
        AssemblyReport {
            clips: self.clips,
            duration_ms: self.combined.duration_ms(),
            truncated: self.truncated,
        }
    }
}

/// 音频拼接器
pub struct AudioAssembler {
    tts_engine: Arc<dyn TtsEnginePort>,
    codec: Arc<dyn AudioCodecPort>,
    model_id: String,
    max_duration_ms: u64,
}

impl AudioAssembler {
    pub fn new(
        tts_engine: Arc<dyn TtsEnginePort>,
        codec: Arc<dyn AudioCodecPort>,
        model_id: impl Into<String>,
        max_duration_ms: u64,
    ) -> Self {
        Self {
            tts_engine,
            codec,
            model_id: model_id.into(),
            max_duration_ms,
        }
    }

    /// 逐行合成并写出到 `output_path`
    ///
    /// 任一行合成或解码失败都会中止整个阶段。
    pub async fn synthesize_and_assemble(
        &self,
        lines: &[DispatchedLine],
        output_path: &Path,
    ) -> Result<AssemblyReport, AssemblyError> {
        let format = AudioFormat::from_path(output_path)?;
        tracing::info!(
            lines = lines.len(),
            max_duration_ms = self.max_duration_ms,
            "Converting text to speech"
        );

        let mut assembly = CappedAssembly::new(self.max_duration_ms);

        for (index, dispatched) in lines.iter().enumerate() {
            let request = SynthesisRequest {
                text: dispatched.line.text.clone(),
                voice_id: dispatched.voice.clone(),
                model_id: self.model_id.clone(),
            };

            tracing::debug!(
                index,
                role = %dispatched.line.role,
                voice_id = %dispatched.voice,
                text_len = request.text.len(),
                "Synthesizing line"
            );

            let response = self
                .tts_engine
                .synthesize(request)
                .await
                .map_err(|source| AssemblyError::Synthesis { index, source })?;

            let clip = self
                .codec
                .decode(&response.audio_data, response.format_hint.as_deref())
                .map_err(|source| AssemblyError::Decode {
                    what: format!("line {}", index),
                    source,
                })?;

            if assembly.push(clip) {
                tracing::info!(
                    synthesized = index + 1,
                    skipped = lines.len() - index - 1,
                    "Duration ceiling reached, remaining lines skipped"
                );
                break;
            }
        }

        let report = assembly.report();
        self.export(&assembly.combined, format, output_path).await?;

        tracing::info!(
            path = %output_path.display(),
            clips = report.clips,
            duration_ms = report.duration_ms,
            truncated = report.truncated,
            "Text to speech conversion complete"
        );

        Ok(report)
    }

    /// 按相同的截断规则拼接已有音频文件
    pub async fn combine_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        output_path: &Path,
    ) -> Result<AssemblyReport, AssemblyError> {
        let format = AudioFormat::from_path(output_path)?;
        tracing::info!(files = paths.len(), "Combining audio segments");

        let mut assembly = CappedAssembly::new(self.max_duration_ms);

        for path in paths {
            let path = path.as_ref();
            let data = tokio::fs::read(path).await.map_err(|source| AssemblyError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let hint = path.extension().and_then(|e| e.to_str());
            let clip = self
                .codec
                .decode(&data, hint)
                .map_err(|source| AssemblyError::Decode {
                    what: path.display().to_string(),
                    source,
                })?;

            if assembly.push(clip) {
                break;
            }
        }

        let report = assembly.report();
        self.export(&assembly.combined, format, output_path).await?;

        tracing::info!(
            path = %output_path.display(),
            duration_ms = report.duration_ms,
            "Audio segments combined"
        );

        Ok(report)
    }

    async fn export(
        &self,
        clip: &AudioClip,
        format: AudioFormat,
        path: &Path,
    ) -> Result<(), AssemblyError> {
        let data = self.codec.encode(clip, format)?;
        tokio::fs::write(path, &data)
            .await
            .map_err(|source| AssemblyError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            format = %format,
            size = data.len(),
            "Audio exported"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SynthesisResponse;
    use crate::domain::podcast::{Role, ScriptLine};
    use crate::domain::voice::VoiceId;
    use crate::infrastructure::adapters::{FakeTtsClient, FakeTtsClientConfig, SymphoniaCodec};
    use async_trait::async_trait;
    use tempfile::tempdir;

    struct FailingTts;

    #[async_trait]
    impl TtsEnginePort for FailingTts {
        async fn synthesize(
            &self,
            _request: SynthesisRequest,
        ) -> Result<SynthesisResponse, TtsError> {
            Err(TtsError::ServiceError("HTTP 401: invalid api key".to_string()))
        }
    }

    fn lines(count: usize) -> Vec<DispatchedLine> {
        (0..count)
            .map(|i| {
                let role = if i % 2 == 0 { Role::Host } else { Role::Guest };
                DispatchedLine {
                    line: ScriptLine::new(role, format!("Line {}", i)),
                    voice: VoiceId::new(format!("voice-{}", role)),
                }
            })
            .collect()
    }

    fn fake_tts(duration_ms: u64) -> Arc<FakeTtsClient> {
        Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            duration_ms,
            sample_rate: 16000,
        }))
    }

    fn assembler(tts: Arc<dyn TtsEnginePort>, max_duration_ms: u64) -> AudioAssembler {
        AudioAssembler::new(
            tts,
            Arc::new(SymphoniaCodec::default()),
            DEFAULT_MODEL_ID,
            max_duration_ms,
        )
    }

    #[tokio::test]
    async fn test_truncates_at_ceiling_and_stops_synthesizing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.wav");
        let tts = fake_tts(500);
        let assembler = assembler(tts.clone(), 1200);

        let report = assembler
            .synthesize_and_assemble(&lines(5), &output)
            .await
            .unwrap();

        assert_eq!(
            report,
            AssemblyReport {
                clips: 3,
                duration_ms: 1200,
                truncated: true,
            }
        );
        // 第 3 行越界后不再合成第 4、5 行
        assert_eq!(tts.calls(), 3);

        let written = std::fs::read(&output).unwrap();
        let clip = SymphoniaCodec::default().decode(&written, Some("wav")).unwrap();
        assert_eq!(clip.duration_ms(), 1200);
    }

    #[tokio::test]
    async fn test_under_ceiling_keeps_everything() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.wav");
        let tts = fake_tts(500);
        let assembler = assembler(tts.clone(), 60_000);

        let report = assembler
            .synthesize_and_assemble(&lines(2), &output)
            .await
            .unwrap();

        assert_eq!(report.duration_ms, 1000);
        assert!(!report.truncated);
        assert_eq!(tts.calls(), 2);
    }

    #[tokio::test]
    async fn test_no_lines_writes_empty_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.wav");
        let tts = fake_tts(500);
        let assembler = assembler(tts.clone(), 1200);

        let report = assembler.synthesize_and_assemble(&[], &output).await.unwrap();

        assert_eq!(report.clips, 0);
        assert_eq!(report.duration_ms, 0);
        assert_eq!(tts.calls(), 0);
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_synthesis_failure_aborts_stage() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.wav");
        let assembler = assembler(Arc::new(FailingTts), 1200);

        let err = assembler
            .synthesize_and_assemble(&lines(3), &output)
            .await
            .unwrap_err();

        assert!(matches!(err, AssemblyError::Synthesis { index: 0, .. }));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_unsupported_output_format_fails_before_synthesis() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.mp3");
        let tts = fake_tts(500);
        let assembler = assembler(tts.clone(), 1200);

        let result = assembler.synthesize_and_assemble(&lines(2), &output).await;

        assert!(matches!(result, Err(AssemblyError::Encode(_))));
        assert_eq!(tts.calls(), 0);
    }

    #[tokio::test]
    async fn test_combine_files_applies_same_ceiling() {
        let dir = tempdir().unwrap();
        let codec = SymphoniaCodec::default();
        let first = dir.path().join("a.wav");
        let second = dir.path().join("b.wav");
        std::fs::write(
            &first,
            codec.encode(&AudioClip::silence(800, 16000, 1), AudioFormat::Wav).unwrap(),
        )
        .unwrap();
        std::fs::write(
            &second,
            codec.encode(&AudioClip::silence(800, 22050, 2), AudioFormat::Wav).unwrap(),
        )
        .unwrap();

        let output = dir.path().join("combined.wav");
        let assembler = assembler(fake_tts(500), 1200);
        let report = assembler
            .combine_files(&[first, second], &output)
            .await
            .unwrap();

        assert_eq!(report.clips, 2);
        assert_eq!(report.duration_ms, 1200);
        assert!(report.truncated);
    }

    #[tokio::test]
    async fn test_combine_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let assembler = assembler(fake_tts(500), 1200);

        let result = assembler
            .combine_files(&[dir.path().join("missing.wav")], &dir.path().join("out.wav"))
            .await;

        assert!(matches!(result, Err(AssemblyError::Io { .. })));
    }
}
