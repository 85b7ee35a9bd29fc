//! Podcast Commands - 文档转播客命令

use std::path::PathBuf;

/// 把一份文档转换为播客音频
#[derive(Debug, Clone)]
pub struct GeneratePodcast {
    pub document_path: PathBuf,
    pub output_path: PathBuf,
}

/// 转换结果
#[derive(Debug, Clone)]
pub struct GeneratePodcastResponse {
    pub output_path: PathBuf,
    /// 截断后的脚本字符数
    pub script_chars: usize,
    /// 分派到音色的台词数
    pub script_lines: usize,
    /// 输出时长（毫秒）
    pub duration_ms: u64,
    pub truncated: bool,
    pub host_voice_name: String,
    pub guest_voice_name: String,
}
