use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use serde_json::Value;

use crate::{
    config::{parse_llm_provider_model, LlmConfig},
    error::{AttritionError, Result},
    llm::envelope::GenerationEnvelope,
    llm::provider::CompletionOptions,
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

#[derive(Debug, Clone)]
struct ApiConfig {
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout_secs: u64,
    max_retries: u32,
}

/// Chat-completions client for any OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct LlmApiClient {
    client: Client<OpenAIConfig>,
    config: ApiConfig,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_config = ApiConfig::from_llm_config(config);

        let (provider, _) = parse_llm_provider_model(&config.model);
        let needs_api_key = !matches!(
            provider.to_lowercase().as_str(),
            "ollama" | "local" | "lmstudio"
        );

        if needs_api_key && api_config.api_key.is_none() {
            return Err(AttritionError::LlmUnavailable(format!(
                "API key required for provider '{provider}'"
            )));
        }

        let openai_config = OpenAIConfig::new()
            .with_api_base(api_config.base_url.clone())
            .with_api_key(api_config.api_key.clone().unwrap_or_default());

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()
            .map_err(|error| {
                AttritionError::Llm(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        // async-openai retries 5xx on its own backoff; cap it at the request timeout
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(api_config.timeout_secs)),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            config: api_config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Sends one chat completion and returns the response as a
    /// [`GenerationEnvelope`]. The body is decoded loosely so completion-style
    /// `text` replies are accepted as well as chat choices. Retries transient failures with a short
    /// exponential delay; rate limits and auth failures are returned at once.
    pub async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        options: &CompletionOptions,
    ) -> Result<GenerationEnvelope> {
        if prompt.trim().is_empty() {
            return Err(AttritionError::Validation(
                "Prompt cannot be empty".to_string(),
            ));
        }

        let mut last_error: Option<AttritionError> = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay_ms = 100 * 2_u64.pow(attempt - 1);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }

            let request = self.build_request(prompt, system_prompt, options)?;

            match self
                .client
                .chat()
                .create_byot::<_, Value>(request)
                .await
            {
                Ok(response) => {
                    let envelope = GenerationEnvelope::from_value(&response);
                    tracing::debug!(
                        attempt,
                        choices = envelope.len(),
                        "LLM response received"
                    );
                    return Ok(envelope);
                }
                Err(error) => {
                    if let Some(rate_limit_error) = Self::rate_limit_error(&error) {
                        return Err(rate_limit_error);
                    }

                    if let Some(auth_error) = Self::auth_error(&error) {
                        return Err(auth_error);
                    }

                    let retryable = Self::is_retryable(&error);
                    let mapped_error = Self::map_openai_error(error);

                    if retryable && attempt < self.config.max_retries {
                        tracing::debug!(attempt, error = %mapped_error, "Retrying LLM request");
                        last_error = Some(mapped_error);
                        continue;
                    }

                    return Err(mapped_error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AttritionError::Llm("LLM completion failed after retries".to_string())
        }))
    }

    fn build_request(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        options: &CompletionOptions,
    ) -> Result<CreateChatCompletionRequest> {
        let mut messages = Vec::new();

        if let Some(system_prompt) = system_prompt.filter(|value| !value.trim().is_empty()) {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|error| {
                        AttritionError::Validation(format!("Invalid system prompt: {error}"))
                    })?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|error| {
                    AttritionError::Validation(format!("Invalid user prompt: {error}"))
                })?
                .into(),
        );

        let mut request = CreateChatCompletionRequestArgs::default();
        request.model(self.config.model.clone()).messages(messages);

        if let Some(temperature) = options.temperature {
            request.temperature(temperature);
        }
        if let Some(max_tokens) = options.max_tokens {
            request.max_tokens(max_tokens);
        }

        request.build().map_err(|error| {
            AttritionError::Validation(format!("Invalid LLM completion request: {error}"))
        })
    }

    fn is_retryable(error: &OpenAIError) -> bool {
        match error {
            OpenAIError::ApiError(api_error) => {
                api_error.r#type.is_none() && api_error.code.is_none()
            }
            OpenAIError::Reqwest(reqwest_error) => reqwest_error
                .status()
                .map(|status| status.is_server_error())
                .unwrap_or(true),
            _ => false,
        }
    }

    fn rate_limit_error(error: &OpenAIError) -> Option<AttritionError> {
        match error {
            OpenAIError::Reqwest(reqwest_error)
                if reqwest_error.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) =>
            {
                Some(AttritionError::LlmRateLimit { retry_after: None })
            }
            OpenAIError::ApiError(api_error) if Self::is_rate_limit_api_error(api_error) => {
                Some(AttritionError::LlmRateLimit { retry_after: None })
            }
            _ => None,
        }
    }

    fn auth_error(error: &OpenAIError) -> Option<AttritionError> {
        match error {
            OpenAIError::Reqwest(reqwest_error)
                if reqwest_error.status() == Some(reqwest::StatusCode::UNAUTHORIZED)
                    || reqwest_error.status() == Some(reqwest::StatusCode::FORBIDDEN) =>
            {
                Some(AttritionError::Llm(format!(
                    "LLM authentication failed: {reqwest_error}"
                )))
            }
            OpenAIError::ApiError(api_error) if Self::is_auth_api_error(api_error) => Some(
                AttritionError::Llm(format!("LLM authentication failed: {api_error}")),
            ),
            _ => None,
        }
    }

    fn is_rate_limit_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("rate limit")
            || message.contains("too many requests")
            || error_type.contains("rate_limit")
            || code.contains("rate_limit")
            || code == "insufficient_quota"
    }

    fn is_auth_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("unauthorized")
            || message.contains("invalid api key")
            || code.contains("invalid_api_key")
            || error_type.contains("authentication")
    }

    fn map_openai_error(error: OpenAIError) -> AttritionError {
        match error {
            OpenAIError::Reqwest(reqwest_error) if reqwest_error.is_timeout() => {
                AttritionError::Llm(format!("LLM request timed out: {reqwest_error}"))
            }
            OpenAIError::Reqwest(reqwest_error) => {
                AttritionError::Llm(format!("LLM request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => {
                AttritionError::Llm(format!("LLM API error: {api_error}"))
            }
            OpenAIError::JSONDeserialize(err) => {
                AttritionError::Llm(format!("Failed to parse LLM response: {err}"))
            }
            OpenAIError::InvalidArgument(message) => AttritionError::Validation(message),
            other => AttritionError::Llm(other.to_string()),
        }
    }
}

impl ApiConfig {
    fn from_llm_config(config: &LlmConfig) -> Self {
        let (provider, model) = parse_llm_provider_model(&config.model);

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(provider).to_string());

        let normalized_model = if provider.eq_ignore_ascii_case("local") {
            config.model.clone()
        } else {
            model.to_string()
        };

        Self {
            base_url,
            api_key: config.api_key.clone(),
            model: normalized_model,
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
        }
    }
}

fn default_base_url(provider: &str) -> &'static str {
    match provider.to_lowercase().as_str() {
        "openrouter" => OPENROUTER_BASE_URL,
        "ollama" => OLLAMA_BASE_URL,
        "lmstudio" => LMSTUDIO_BASE_URL,
        _ => OPENAI_BASE_URL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(model: &str, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            model: model.to_string(),
            api_key: api_key.map(str::to_string),
            base_url: None,
            timeout_secs: 5,
            max_retries: 0,
        }
    }

    #[test]
    fn hosted_provider_requires_api_key() {
        let result = LlmApiClient::new(&llm_config("openai/gpt-4o-mini", None));
        assert!(matches!(result, Err(AttritionError::LlmUnavailable(_))));
    }

    #[test]
    fn local_provider_needs_no_key() {
        let client = LlmApiClient::new(&llm_config("ollama/llama3", None)).unwrap();
        assert_eq!(client.model(), "llama3");
        assert_eq!(client.base_url(), OLLAMA_BASE_URL);
    }

    #[test]
    fn unprefixed_model_is_kept_whole() {
        let client = LlmApiClient::new(&llm_config("my-finetune", None)).unwrap();
        assert_eq!(client.model(), "my-finetune");
        assert_eq!(client.base_url(), OPENAI_BASE_URL);
    }

    #[test]
    fn request_carries_budget_and_temperature() {
        let client = LlmApiClient::new(&llm_config("ollama/llama3", None)).unwrap();
        let options = CompletionOptions {
            temperature: Some(0.2),
            max_tokens: Some(400),
        };

        let request = client
            .build_request("Explain this score", Some("Be concise"), &options)
            .unwrap();

        assert_eq!(request.model, "llama3");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.temperature, Some(0.2));
        #[allow(deprecated)]
        let max_tokens = request.max_tokens;
        assert_eq!(max_tokens, Some(400));
        assert!(request.response_format.is_none());
    }

    #[test]
    fn blank_system_prompt_is_dropped() {
        let client = LlmApiClient::new(&llm_config("ollama/llama3", None)).unwrap();
        let request = client
            .build_request("prompt", Some("   "), &CompletionOptions::default())
            .unwrap();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.temperature, None);
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected() {
        let client = LlmApiClient::new(&llm_config("ollama/llama3", None)).unwrap();
        let result = client
            .generate("  ", None, &CompletionOptions::default())
            .await;
        assert!(matches!(result, Err(AttritionError::Validation(_))));
    }
}
