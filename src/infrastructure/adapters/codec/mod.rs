//! Codec Adapter - 基于 symphonia / opus 的音频编解码

mod symphonia_codec;

pub use symphonia_codec::{encode_wav, SymphoniaCodec, DEFAULT_OPUS_BITRATE};

#[cfg(test)]
pub(crate) use symphonia_codec::tests::ogg_duration_ms;
