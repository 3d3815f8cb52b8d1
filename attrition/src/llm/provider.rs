use async_trait::async_trait;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{AttritionError, Result};
use crate::llm::api::LlmApiClient;
use crate::llm::envelope::GenerationEnvelope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

impl LlmBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::OpenRouter => "openrouter",
            Self::Ollama => "ollama",
            Self::LmStudio => "lmstudio",
            Self::OpenAICompatible { .. } => "openai-compatible",
            Self::Unavailable { .. } => "unavailable",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Text generation service the narrative step calls.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    fn provider_name(&self) -> &str;

    fn model(&self) -> &str;

    fn is_available(&self) -> bool {
        true
    }

    /// Instructions sent ahead of every prompt, recorded with the call audit.
    fn system_prompt(&self) -> Option<&str> {
        None
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<GenerationEnvelope>;
}

const SYSTEM_PROMPT: &str =
    "You are an HR analytics assistant. You reply with a single JSON object and nothing else.";

#[derive(Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    model: String,
    client: Option<LlmApiClient>,
}

impl LlmProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No LLM configuration provided");
        };

        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    LlmBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        if let LlmBackend::Unavailable { reason } = &backend {
            return Self::unavailable(reason);
        }

        match LlmApiClient::new(config) {
            Ok(client) => Self {
                backend,
                model: client.model().to_string(),
                client: Some(client),
            },
            Err(e) => {
                tracing::warn!(error = %e, model = %config.model, "LLM client could not be created");
                Self::unavailable(&e.to_string())
            }
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            model: String::new(),
            client: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some() && !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            _ => "LLM client not initialized".to_string(),
        }
    }
}

#[async_trait]
impl NarrativeGenerator for LlmProvider {
    fn provider_name(&self) -> &str {
        self.backend.name()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        LlmProvider::is_available(self)
    }

    fn system_prompt(&self) -> Option<&str> {
        Some(SYSTEM_PROMPT)
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<GenerationEnvelope> {
        let client = self
            .client
            .as_ref()
            .filter(|_| self.is_available())
            .ok_or_else(|| AttritionError::LlmUnavailable(self.unavailable_reason()))?;

        client.generate(prompt, self.system_prompt(), options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(model: &str, base_url: Option<&str>, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            model: model.to_string(),
            api_key: api_key.map(str::to_string),
            base_url: base_url.map(str::to_string),
            timeout_secs: 5,
            max_retries: 0,
        }
    }

    #[test]
    fn missing_config_is_unavailable() {
        let provider = LlmProvider::new(None);
        assert!(!provider.is_available());
        assert_eq!(provider.provider_name(), "unavailable");
    }

    #[test]
    fn provider_reports_the_system_prompt_it_sends() {
        let provider = LlmProvider::unavailable("disabled");
        assert_eq!(provider.system_prompt(), Some(SYSTEM_PROMPT));
    }

    #[test]
    fn known_provider_resolves_backend() {
        let provider = LlmProvider::new(Some(&config("ollama/llama3", None, None)));
        assert!(provider.is_available());
        assert_eq!(provider.backend(), &LlmBackend::Ollama);
        assert_eq!(provider.model(), "llama3");
    }

    #[test]
    fn unknown_provider_with_base_url_is_compatible() {
        let provider = LlmProvider::new(Some(&config(
            "my-model",
            Some("http://llm.internal/v1"),
            None,
        )));
        assert!(provider.is_available());
        assert_eq!(provider.provider_name(), "openai-compatible");
    }

    #[test]
    fn hosted_provider_without_key_is_unavailable() {
        let provider = LlmProvider::new(Some(&config("openai/gpt-4o-mini", None, None)));
        assert!(!provider.is_available());
    }

    #[tokio::test]
    async fn unavailable_provider_errors_on_generate() {
        let provider = LlmProvider::unavailable("disabled");
        let result = provider
            .generate("prompt", &CompletionOptions::default())
            .await;
        assert!(matches!(result, Err(AttritionError::LlmUnavailable(reason)) if reason == "disabled"));
    }
}
