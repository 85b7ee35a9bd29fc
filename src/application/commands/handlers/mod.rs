//! Command Handlers

mod podcast_handlers;

pub use podcast_handlers::GeneratePodcastHandler;
