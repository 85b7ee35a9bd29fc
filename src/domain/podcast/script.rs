//! Podcast Context - 对话脚本
//!
//! 解析生成服务返回的逐行脚本，每行以 "Host:" 或 "Guest:" 标记说话人。

use super::Role;

/// 生成服务用于强调的标记字符
const MARKUP_CHARS: &[char] = &['*'];

/// 一行已解析的台词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub role: Role,
    pub text: String,
}

impl ScriptLine {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// 去除强调标记（仅限星号）
pub fn clean_script(script: &str) -> String {
    script.chars().filter(|c| !MARKUP_CHARS.contains(c)).collect()
}

/// 按字符数硬截断，可能截在一句话中间
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// 找出一行的说话人：同时出现两个标记时 Host 优先
fn detect_role(line: &str) -> Option<Role> {
    Role::ALL
        .iter()
        .copied()
        .find(|role| line.contains(role.marker()))
}

/// 将脚本拆分为有序的台词
///
/// - 没有任何标记的行被丢弃
/// - 所有标记子串都会从台词中移除
/// - 移除标记后为空的行被丢弃
pub fn parse_lines(script: &str) -> Vec<ScriptLine> {
    script
        .lines()
        .filter_map(|line| {
            let role = detect_role(line)?;
            let text = Role::ALL
                .iter()
                .fold(line.to_string(), |acc, r| acc.replace(r.marker(), ""));
            let text = text.trim();
            if text.is_empty() {
                tracing::debug!(role = %role, "Dropping script line with no text after marker");
                return None;
            }
            Some(ScriptLine::new(role, text))
        })
        .collect()
}
