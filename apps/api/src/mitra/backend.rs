//! Mitra reply backends — pluggable, trait-based reply generation.
//!
//! Default when configured: `OpenAiBackend` (proxies to the Chat Completions API).
//! Without an API key: `OfflineBackend` (fixed reply; the DVI suggestion still
//! comes from the text heuristic, which runs in the handler either way).
//!
//! `AppState` holds an `Arc<dyn ReplyBackend>`, selected at startup.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::{ChatTurn, LlmClient};

/// The reply backend trait. Implement this to swap reply generation without
/// touching the endpoint or handler code.
#[async_trait]
pub trait ReplyBackend: Send + Sync {
    /// Generates Mitra's reply for the latest user message, given the per-user
    /// system prompt and prior conversation turns.
    async fn reply(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, AppError>;
}

/// Proxies the conversation to the OpenAI Chat Completions API.
pub struct OpenAiBackend(pub LlmClient);

#[async_trait]
impl ReplyBackend for OpenAiBackend {
    async fn reply(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, AppError> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatTurn {
            role: "system".to_string(),
            content: system_prompt.to_string(),
        });
        messages.extend_from_slice(history);
        messages.push(ChatTurn {
            role: "user".to_string(),
            content: message.to_string(),
        });

        let reply = self.0.chat(&messages).await?;
        Ok(reply)
    }
}

/// Fallback reply used when no OpenAI key is configured.
pub const OFFLINE_REPLY: &str = "Ciao, sono Mitra 💜\n\n\
    Al momento il motore AI completo non è configurato sul server, \
    ma posso comunque darti un’idea di come il tuo DVI potrebbe reagire \
    alla situazione che hai descritto.\n\n\
    Usa il pulsante 'Applica suggerimento di Mitra' per aggiornare i tuoi valori DVI.";

/// Soft fallback: a fixed reply, no outbound call.
pub struct OfflineBackend;

#[async_trait]
impl ReplyBackend for OfflineBackend {
    async fn reply(
        &self,
        _system_prompt: &str,
        _history: &[ChatTurn],
        _message: &str,
    ) -> Result<String, AppError> {
        Ok(OFFLINE_REPLY.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_backend_is_deterministic() {
        let backend = OfflineBackend;
        let a = backend.reply("system", &[], "help").await.unwrap();
        let b = backend.reply("other system", &[], "different").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a, OFFLINE_REPLY);
    }
}
