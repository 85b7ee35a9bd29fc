//! LLM Adapter - 脚本生成服务客户端

mod gemini_client;

pub use gemini_client::{GeminiClient, GeminiClientConfig};
