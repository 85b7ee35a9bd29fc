//! Podcast Context - Errors

use thiserror::Error;

use super::Role;
use crate::domain::voice::VoiceError;

#[derive(Debug, Error)]
pub enum PodcastError {
    #[error("Unknown {role} persona: {name}")]
    UnknownPersona { role: Role, name: String },

    #[error(transparent)]
    Voice(#[from] VoiceError),
}
