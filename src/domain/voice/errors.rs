//! Voice Context - Errors

use thiserror::Error;

use super::VoiceId;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Unknown voice name: {0}")]
    UnknownName(String),

    #[error("Duplicate voice name {name} for voice {id}")]
    DuplicateName { name: String, id: VoiceId },

    #[error("Duplicate voice id: {0}")]
    DuplicateId(VoiceId),

    #[error("Invalid voice name: {0}")]
    InvalidName(String),
}
