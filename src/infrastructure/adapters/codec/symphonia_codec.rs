//! Symphonia Codec - 音频编解码器
//!
//! 支持：
//! - 任意 symphonia 可探测格式 → PCM（合成结果为 MP3，中间文件为 WAV）
//! - PCM → WAV（16 位）
//! - PCM → Opus (OGG 容器)

use ogg::writing::PacketWriter;
use opus::{Application, Channels, Encoder};
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioCodecPort, AudioFormat, CodecError};
use crate::domain::podcast::{AudioClip, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};

/// 默认 Opus 比特率
pub const DEFAULT_OPUS_BITRATE: u32 = 64_000;

/// 音频编解码器
pub struct SymphoniaCodec {
    /// Opus 编码比特率
    bitrate: u32,
}

impl SymphoniaCodec {
    pub fn new(bitrate: u32) -> Self {
        Self { bitrate }
    }

    /// 使用 symphonia 解码为交错 PCM
    fn decode_to_pcm(&self, data: &[u8], hint_ext: Option<&str>) -> Result<AudioClip, CodecError> {
        let cursor = Cursor::new(data.to_vec());
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = hint_ext {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| CodecError::DecodingError(format!("Probe failed: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| CodecError::DecodingError("No audio track found".to_string()))?;

        // MP3 的声道数可能要等到第一帧解码后才知道
        let mut sample_rate = track.codec_params.sample_rate;
        let mut channels = track.codec_params.channels.map(|c| c.count() as u16);

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| CodecError::DecodingError(format!("Decoder creation failed: {}", e)))?;

        let mut samples: Vec<f32> = Vec::new();
        let track_id = track.id;

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    break;
                }
                Err(e) => {
                    return Err(CodecError::DecodingError(format!(
                        "Packet read error: {}",
                        e
                    )));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(e)) => {
                    tracing::warn!("Decode error (skipping packet): {}", e);
                    continue;
                }
                Err(e) => {
                    return Err(CodecError::DecodingError(format!("Decode failed: {}", e)));
                }
            };

            let spec = *decoded.spec();
            sample_rate.get_or_insert(spec.rate);
            channels.get_or_insert(spec.channels.count() as u16);

            let num_frames = decoded.frames();
            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            let actual_samples = num_frames * spec.channels.count();
            samples.extend(&sample_buf.samples()[..actual_samples]);
        }

        let sample_rate = sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE);
        let channels = channels.unwrap_or(DEFAULT_CHANNELS).max(1);

        if sample_rate == 0 {
            return Err(CodecError::DecodingError("Unknown sample rate".to_string()));
        }

        Ok(AudioClip::new(samples, sample_rate, channels))
    }

    /// 将 PCM 编码为 Opus (OGG 容器)
    fn encode_opus(&self, clip: &AudioClip) -> Result<Vec<u8>, CodecError> {
        // Opus 仅支持单声道或立体声，以及 8/12/16/24/48 kHz
        let channel_count: u16 = if clip.channels() == 1 { 1 } else { 2 };
        let sample_rate = opus_compatible_sample_rate(clip.sample_rate());
        let clip = if sample_rate != clip.sample_rate() || channel_count != clip.channels() {
            clip.clone().converted(sample_rate, channel_count)
        } else {
            clip.clone()
        };

        let channels = if channel_count == 1 {
            Channels::Mono
        } else {
            Channels::Stereo
        };

        let mut encoder = Encoder::new(sample_rate, channels, Application::Voip).map_err(|e| {
            CodecError::EncodingError(format!("Failed to create Opus encoder: {}", e))
        })?;

        encoder
            .set_bitrate(opus::Bitrate::Bits(self.bitrate as i32))
            .map_err(|e| CodecError::EncodingError(format!("Failed to set bitrate: {}", e)))?;

        // granule position 与 pre-skip 都以 48kHz 计
        let granule_scale = 48000 / sample_rate as u64;
        let lookahead = encoder.get_lookahead().map(|l| l as u64).unwrap_or(104);
        let pre_skip = lookahead * granule_scale;
        let pre_skip_head = u16::try_from(pre_skip).map_err(|_| {
            CodecError::EncodingError(format!("Opus pre-skip out of range: {}", pre_skip))
        })?;

        // 末页 granule 截掉补零与冲刷帧，播放时长等于内容时长
        let end_granule = pre_skip + clip.frames() as u64 * granule_scale;

        let pcm_i16 = to_i16(clip.samples());

        // 20ms 帧
        let frame_size = (sample_rate as usize * 20) / 1000;
        let samples_per_frame = frame_size * channel_count as usize;

        let mut ogg_data = Vec::new();
        {
            let mut packet_writer = PacketWriter::new(&mut ogg_data);

            let opus_head = create_opus_head(channel_count as u8, sample_rate, pre_skip_head);
            packet_writer
                .write_packet(opus_head, 0, ogg::PacketWriteEndInfo::EndPage, 0)
                .map_err(|e| {
                    CodecError::EncodingError(format!("Failed to write Opus head: {}", e))
                })?;

            packet_writer
                .write_packet(create_opus_tags(), 0, ogg::PacketWriteEndInfo::EndPage, 0)
                .map_err(|e| {
                    CodecError::EncodingError(format!("Failed to write Opus tags: {}", e))
                })?;

            let mut output_buf = vec![0u8; 4000];

            let frame_granule = frame_size as u64 * granule_scale;
            let mut granule_pos = pre_skip;

            // 额外的静音帧把编码器缓冲区里剩余的样本刷出来
            let flush_frames = (lookahead as usize).div_ceil(frame_size).max(1);
            let silence = vec![0i16; samples_per_frame];

            let frames = pcm_i16
                .chunks(samples_per_frame)
                .map(|chunk| {
                    let mut frame = chunk.to_vec();
                    frame.resize(samples_per_frame, 0);
                    frame
                })
                .chain(std::iter::repeat(silence).take(flush_frames));

            let total = pcm_i16.len().div_ceil(samples_per_frame) + flush_frames;

            for (index, frame) in frames.enumerate() {
                let encoded_len = encoder.encode(&frame, &mut output_buf).map_err(|e| {
                    CodecError::EncodingError(format!("Opus encode failed: {}", e))
                })?;

                granule_pos = (granule_pos + frame_granule).min(end_granule);

                let end_info = if index + 1 == total {
                    ogg::PacketWriteEndInfo::EndStream
                } else {
                    ogg::PacketWriteEndInfo::NormalPacket
                };

                packet_writer
                    .write_packet(output_buf[..encoded_len].to_vec(), 0, end_info, granule_pos)
                    .map_err(|e| {
                        CodecError::EncodingError(format!("Failed to write Opus packet: {}", e))
                    })?;
            }
        }

        tracing::debug!(
            frames = clip.frames(),
            opus_size = ogg_data.len(),
            bitrate = self.bitrate,
            "Encoded to Opus"
        );

        Ok(ogg_data)
    }
}

impl Default for SymphoniaCodec {
    fn default() -> Self {
        Self::new(DEFAULT_OPUS_BITRATE)
    }
}

impl AudioCodecPort for SymphoniaCodec {
    fn decode(&self, data: &[u8], hint: Option<&str>) -> Result<AudioClip, CodecError> {
        if data.is_empty() {
            return Err(CodecError::InvalidInput("Empty audio data".to_string()));
        }
        self.decode_to_pcm(data, hint)
    }

    fn encode(&self, clip: &AudioClip, format: AudioFormat) -> Result<Vec<u8>, CodecError> {
        match format {
            AudioFormat::Wav => Ok(encode_wav(clip)),
            AudioFormat::Opus => self.encode_opus(clip),
        }
    }
}

/// 将 PCM 编码为 16 位 WAV
pub fn encode_wav(clip: &AudioClip) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let num_channels = clip.channels();
    let sample_rate = clip.sample_rate();
    let byte_rate = sample_rate * num_channels as u32 * (bits_per_sample / 8) as u32;
    let block_align = num_channels * (bits_per_sample / 8);

    let pcm_data = to_i16(clip.samples());
    let data_size = pcm_data.len() * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(file_size as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&num_channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_size as u32).to_le_bytes());

    for sample in pcm_data {
        wav.extend_from_slice(&sample.to_le_bytes());
    }

    wav
}

fn to_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
        .collect()
}

fn opus_compatible_sample_rate(sample_rate: u32) -> u32 {
    match sample_rate {
        8000 | 12000 | 16000 | 24000 | 48000 => sample_rate,
        r if r <= 8000 => 8000,
        r if r <= 12000 => 12000,
        r if r <= 16000 => 16000,
        r if r <= 24000 => 24000,
        _ => 48000,
    }
}

/// Opus Head 包 (RFC 7845)
fn create_opus_head(channels: u8, sample_rate: u32, pre_skip: u16) -> Vec<u8> {
    let mut head = Vec::with_capacity(19);
    head.extend_from_slice(b"OpusHead");
    head.push(1); // version
    head.push(channels);
    head.extend_from_slice(&pre_skip.to_le_bytes());
    head.extend_from_slice(&sample_rate.to_le_bytes());
    head.extend_from_slice(&0i16.to_le_bytes()); // output gain
    head.push(0); // channel mapping family
    head
}

fn create_opus_tags() -> Vec<u8> {
    let vendor = "docucast";
    let mut tags = Vec::new();
    tags.extend_from_slice(b"OpusTags");
    tags.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    tags.extend_from_slice(vendor.as_bytes());
    tags.extend_from_slice(&0u32.to_le_bytes());
    tags
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ogg::reading::PacketReader;

    /// 按 OpusHead 的 pre-skip 与末页 granule 计算播放时长（毫秒）
    pub(crate) fn ogg_duration_ms(data: &[u8]) -> u64 {
        let mut reader = PacketReader::new(Cursor::new(data.to_vec()));
        let head = reader.read_packet().unwrap().unwrap();
        assert_eq!(&head.data[..8], b"OpusHead");
        let pre_skip = u16::from_le_bytes([head.data[10], head.data[11]]) as u64;

        let mut last_granule = 0;
        while let Some(packet) = reader.read_packet().unwrap() {
            last_granule = packet.absgp_page();
            if packet.last_in_stream() {
                break;
            }
        }
        (last_granule - pre_skip) / 48
    }

    fn tone(duration_ms: u64, sample_rate: u32, channels: u16) -> AudioClip {
        let frames = (duration_ms * sample_rate as u64 / 1000) as usize;
        let samples = (0..frames * channels as usize)
            .map(|i| ((i as f32) * 0.05).sin() * 0.5)
            .collect();
        AudioClip::new(samples, sample_rate, channels)
    }

    #[test]
    fn test_wav_header() {
        let wav = encode_wav(&tone(1000, 16000, 1));

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + 16000 * 2);
    }

    #[test]
    fn test_wav_decode_preserves_format_and_duration() {
        let codec = SymphoniaCodec::default();
        let wav = encode_wav(&tone(750, 22050, 2));

        let clip = codec.decode(&wav, Some("wav")).unwrap();

        assert_eq!(clip.sample_rate(), 22050);
        assert_eq!(clip.channels(), 2);
        assert_eq!(clip.duration_ms(), 750);
    }

    #[test]
    fn test_decode_without_hint_detects_format() {
        let codec = SymphoniaCodec::default();
        let wav = encode_wav(&tone(200, 16000, 1));

        let clip = codec.decode(&wav, None).unwrap();
        assert_eq!(clip.duration_ms(), 200);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let codec = SymphoniaCodec::default();

        assert!(matches!(
            codec.decode(&[], Some("mp3")),
            Err(CodecError::InvalidInput(_))
        ));
        assert!(matches!(
            codec.decode(b"definitely not audio", Some("wav")),
            Err(CodecError::DecodingError(_))
        ));
    }

    #[test]
    fn test_encode_opus_ogg_container() {
        let codec = SymphoniaCodec::new(32000);
        let clip = tone(1000, 16000, 1);
        let wav = encode_wav(&clip);

        let ogg = codec.encode(&clip, AudioFormat::Opus).unwrap();

        assert_eq!(&ogg[0..4], b"OggS");
        assert!(ogg.len() < wav.len());
    }

    #[test]
    fn test_opus_duration_matches_content() {
        let codec = SymphoniaCodec::default();

        for clip in [tone(1200, 16000, 1), tone(1010, 24000, 2), tone(330, 48000, 1)] {
            let ogg = codec.encode(&clip, AudioFormat::Opus).unwrap();
            assert_eq!(ogg_duration_ms(&ogg), clip.duration_ms());
        }
    }

    #[test]
    fn test_opus_head_pre_skip_in_48khz_units() {
        let codec = SymphoniaCodec::default();
        let ogg = codec.encode(&tone(500, 16000, 1), AudioFormat::Opus).unwrap();

        let mut reader = PacketReader::new(Cursor::new(ogg));
        let head = reader.read_packet().unwrap().unwrap();
        let pre_skip = u16::from_le_bytes([head.data[10], head.data[11]]);

        // 16kHz 下每个编码器样本对应 3 个 48kHz 样本
        assert_eq!(pre_skip % 3, 0);
        assert!(pre_skip > 0);
    }

    #[test]
    fn test_encode_opus_resamples_unsupported_rate() {
        let codec = SymphoniaCodec::default();
        let ogg = codec
            .encode(&tone(300, 44100, 2), AudioFormat::Opus)
            .unwrap();
        assert_eq!(&ogg[0..4], b"OggS");
        assert!(ogg_duration_ms(&ogg).abs_diff(300) <= 1);
    }

    #[test]
    fn test_opus_compatible_sample_rate() {
        assert_eq!(opus_compatible_sample_rate(16000), 16000);
        assert_eq!(opus_compatible_sample_rate(22050), 24000);
        assert_eq!(opus_compatible_sample_rate(44100), 48000);
        assert_eq!(opus_compatible_sample_rate(7000), 8000);
    }
}
