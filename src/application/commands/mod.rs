//! 应用层 - 命令
//!
//! 一次运行 = 一条 GeneratePodcast 命令

mod podcast_commands;

pub mod handlers;

pub use podcast_commands::*;
