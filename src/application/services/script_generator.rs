//! Script Generator - 对话脚本生成
//!
//! 构造带人设的提示词，经限流后调用一次生成服务，并按字符预算截断结果。

use std::sync::Arc;

use crate::application::ports::{GenerationOptions, ScriptModelError, ScriptModelPort};
use crate::application::rate_limiter::RateLimiter;
use crate::domain::podcast::{truncate_chars, Persona};

/// 默认脚本字符预算
pub const DEFAULT_MAX_SCRIPT_CHARS: usize = 2000;

/// 构造生成提示词
pub fn build_prompt(text: &str, host: &Persona, guest: &Persona) -> String {
    format!(
        r#"Generate a conversational script based on the following text:
{text}

The script should be engaging, informative, and suitable for a podcast format.
Use two speakers: a host named {host_name} and a guest named {guest_name}.
{host_name}: {host_description}. Signature line: "{host_catchphrase}"
{guest_name}: {guest_description}. Signature line: "{guest_catchphrase}"

The host should guide the conversation with insightful questions, while the guest provides detailed responses.
Include interruptions, interjections, and natural pauses to make the conversation feel spontaneous and engaging.
Clearly label the speakers with "Host:" and "Guest:". The script should not exceed 1 minute in length and should
be free of special characters. Example interjections: "Wow!", "That's fascinating!", "I see what you mean.", etc.
The host can interrupt or interject abruptly while the guest is speaking, and the guest can do so politely while
the host is speaking.

Focus on a friendly, informal tone. Include humor and fun facts about the topic.
Emphasize key points from the document. Follow this dialogue structure:

Host: (Introduction/Topic)
Guest: (Response/Explanation)
Host: (Follow-up Question/Clarification)
Guest: (Additional Information/Example)
"#,
        text = text,
        host_name = host.name,
        guest_name = guest.name,
        host_description = host.description,
        host_catchphrase = host.catchphrase,
        guest_description = guest.description,
        guest_catchphrase = guest.catchphrase,
    )
}

/// 脚本生成器
pub struct ScriptGenerator {
    model: Arc<dyn ScriptModelPort>,
    limiter: Arc<RateLimiter>,
    options: GenerationOptions,
    max_chars: usize,
}

impl ScriptGenerator {
    pub fn new(
        model: Arc<dyn ScriptModelPort>,
        limiter: Arc<RateLimiter>,
        options: GenerationOptions,
        max_chars: usize,
    ) -> Self {
        Self {
            model,
            limiter,
            options,
            max_chars,
        }
    }

    /// 生成脚本，失败时记录日志并返回空字符串
    pub async fn generate(&self, text: &str, host: &Persona, guest: &Persona) -> String {
        match self.try_generate(text, host, guest).await {
            Ok(script) => script,
            Err(e) => {
                tracing::error!(error = %e, "Error generating conversational script");
                String::new()
            }
        }
    }

    /// 生成脚本并返回底层错误
    pub async fn try_generate(
        &self,
        text: &str,
        host: &Persona,
        guest: &Persona,
    ) -> Result<String, ScriptModelError> {
        tracing::info!(
            host = %host.name,
            guest = %guest.name,
            text_len = text.len(),
            "Generating conversational script"
        );

        let prompt = build_prompt(text, host, guest);
        let permit = self.limiter.acquire().await;
        if let Some(waited) = permit.waited() {
            tracing::debug!(waited_ms = waited.as_millis() as u64, "Rate permit granted after wait");
        }

        let raw = self.model.complete(&prompt, &self.options).await?;
        let script = truncate_chars(&raw, self.max_chars);

        tracing::info!(
            raw_chars = raw.chars().count(),
            script_chars = script.chars().count(),
            "Conversational script generation complete"
        );
        tracing::info!(script = %script, "Generated script");

        Ok(script)
    }
}
