//! Podcast Context - 解码后的音频片段
//!
//! 交错排列的 f32 PCM 样本，附带采样率和声道数。

/// 空片段的默认采样率
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;
/// 空片段的默认声道数
pub const DEFAULT_CHANNELS: u16 = 1;

/// 音频片段
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioClip {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate: sample_rate.max(1),
            channels: channels.max(1),
        }
    }

    /// 零时长片段
    pub fn empty() -> Self {
        Self::new(Vec::new(), DEFAULT_SAMPLE_RATE, DEFAULT_CHANNELS)
    }

    /// 指定时长的静音
    pub fn silence(duration_ms: u64, sample_rate: u32, channels: u16) -> Self {
        let frames = frames_for_ms(duration_ms, sample_rate);
        Self::new(
            vec![0.0; frames * channels.max(1) as usize],
            sample_rate,
            channels,
        )
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// 每声道样本数
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// 时长（毫秒，向下取整）
    pub fn duration_ms(&self) -> u64 {
        (self.frames() as u64 * 1000) / self.sample_rate as u64
    }

    /// 截断到指定时长，已短于该时长时不变
    pub fn truncate_ms(&mut self, duration_ms: u64) {
        let frames = frames_for_ms(duration_ms, self.sample_rate);
        self.samples.truncate(frames * self.channels as usize);
    }

    /// 追加另一个片段
    ///
    /// 自身为空时直接采用对方的格式；否则先把对方转换到自身的采样率与声道布局。
    pub fn append(&mut self, other: AudioClip) {
        if self.is_empty() {
            *self = other;
            return;
        }
        let converted = other.converted(self.sample_rate, self.channels);
        self.samples.extend_from_slice(&converted.samples);
    }

    /// 转换到目标采样率与声道数
    pub fn converted(self, sample_rate: u32, channels: u16) -> AudioClip {
        let channels = channels.max(1);
        let remixed = if self.channels == channels {
            self.samples
        } else {
            remix(&self.samples, self.channels, channels)
        };
        let resampled = resample_linear(&remixed, self.sample_rate, sample_rate, channels);
        AudioClip::new(resampled, sample_rate, channels)
    }
}

impl Default for AudioClip {
    fn default() -> Self {
        Self::empty()
    }
}

fn frames_for_ms(duration_ms: u64, sample_rate: u32) -> usize {
    ((duration_ms as u128 * sample_rate as u128) / 1000) as usize
}

/// 声道重混：单声道输出取平均，单声道输入复制到各声道，其余按声道号对齐
fn remix(samples: &[f32], from: u16, to: u16) -> Vec<f32> {
    let from = from as usize;
    let to = to as usize;
    let frame_count = samples.len() / from;
    let mut out = Vec::with_capacity(frame_count * to);

    for frame in samples.chunks_exact(from) {
        if to == 1 {
            out.push(frame.iter().sum::<f32>() / from as f32);
        } else if from == 1 {
            out.extend(std::iter::repeat(frame[0]).take(to));
        } else {
            out.extend((0..to).map(|ch| frame[ch.min(from - 1)]));
        }
    }

    out
}

/// 简单线性重采样
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32, channels: u16) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let channel_count = channels.max(1) as usize;
    let frame_count = samples.len() / channel_count;
    let new_frame_count = (frame_count as f64 * ratio) as usize;
    let mut resampled = Vec::with_capacity(new_frame_count * channel_count);

    for i in 0..new_frame_count {
        let src_pos = i as f64 / ratio;
        let src_idx = src_pos as usize;
        let frac = src_pos - src_idx as f64;

        for ch in 0..channel_count {
            let idx0 = src_idx * channel_count + ch;
            let idx1 = ((src_idx + 1).min(frame_count - 1)) * channel_count + ch;

            let s0 = samples.get(idx0).copied().unwrap_or(0.0);
            let s1 = samples.get(idx1).copied().unwrap_or(s0);

            // 线性插值
            resampled.push(s0 + (s1 - s0) * frac as f32);
        }
    }

    resampled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_duration() {
        let clip = AudioClip::silence(500, 16000, 1);
        assert_eq!(clip.frames(), 8000);
        assert_eq!(clip.duration_ms(), 500);

        let stereo = AudioClip::silence(250, 44100, 2);
        assert_eq!(stereo.samples().len(), 11025 * 2);
        assert_eq!(stereo.duration_ms(), 250);
    }

    #[test]
    fn test_truncate_to_exact_ceiling() {
        let mut clip = AudioClip::silence(1500, 16000, 1);
        clip.truncate_ms(1200);
        assert_eq!(clip.duration_ms(), 1200);

        // 截断到更长的时长不改变片段
        clip.truncate_ms(5000);
        assert_eq!(clip.duration_ms(), 1200);
    }

    #[test]
    fn test_append_adopts_first_format() {
        let mut combined = AudioClip::empty();
        combined.append(AudioClip::silence(100, 44100, 2));
        assert_eq!(combined.sample_rate(), 44100);
        assert_eq!(combined.channels(), 2);
        assert_eq!(combined.duration_ms(), 100);
    }

    #[test]
    fn test_append_converts_heterogeneous_clips() {
        let mut combined = AudioClip::silence(500, 16000, 1);
        combined.append(AudioClip::silence(500, 32000, 2));

        assert_eq!(combined.sample_rate(), 16000);
        assert_eq!(combined.channels(), 1);
        assert_eq!(combined.duration_ms(), 1000);
    }

    #[test]
    fn test_remix_stereo_to_mono_averages() {
        let mono = remix(&[1.0, 0.0, 0.5, 0.5], 2, 1);
        assert_eq!(mono, vec![0.5, 0.5]);
    }

    #[test]
    fn test_remix_mono_to_stereo_duplicates() {
        let stereo = remix(&[0.25, -0.25], 1, 2);
        assert_eq!(stereo, vec![0.25, 0.25, -0.25, -0.25]);
    }

    #[test]
    fn test_resample_halves_frame_count() {
        let samples: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let out = resample_linear(&samples, 48000, 24000, 1);
        assert_eq!(out.len(), 50);
        assert_eq!(out[0], 0.0);
    }
}
