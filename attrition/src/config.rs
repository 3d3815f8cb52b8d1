use serde::Deserialize;
use std::collections::HashMap;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse `ATTRITION_API_KEYS`.
/// Format: comma-separated `caller_id:token` pairs, e.g. `hr-portal:s3cret,alice:t0ken`
fn parse_api_keys() -> HashMap<String, String> {
    match env::var("ATTRITION_API_KEYS") {
        Ok(val) if !val.is_empty() => parse_api_key_pairs(&val),
        _ => HashMap::new(),
    }
}

/// Returns a `token -> caller_id` map. Pairs without both halves are skipped.
pub fn parse_api_key_pairs(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter(|pair| !pair.trim().is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, ':');
            let caller = parts.next()?.trim();
            let token = parts.next().map(str::trim).unwrap_or_default();
            if caller.is_empty() || token.is_empty() {
                tracing::warn!(
                    "Invalid caller:token pair in ATTRITION_API_KEYS, skipping (expected caller_id:token)"
                );
                None
            } else {
                Some((token.to_string(), caller.to_string()))
            }
        })
        .collect()
}

fn parse_list(var: &str) -> Vec<String> {
    env::var(var)
        .map(|items| {
            items
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: Option<LlmConfig>,
    pub narrative: NarrativeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Bearer token -> caller id.
    pub api_keys: HashMap<String, String>,
    /// Caller ids allowed to append weight vectors.
    pub admin_callers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
    pub busy_timeout_ms: u64,
    pub journal_mode: String,
    pub synchronous: String,
}

impl DatabaseConfig {
    /// Local file database with default pragmas.
    pub fn local(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: None,
            local_path: None,
            busy_timeout_ms: 5000,
            journal_mode: "WAL".to_string(),
            synchronous: "NORMAL".to_string(),
        }
    }
}

/// LLM configuration for the narrative generation model
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

/// Request shaping for the narrative call.
#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeConfig {
    pub max_tokens: u32,
    // Low on purpose: explanations should be stable across re-scores
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            max_tokens: 400,
            temperature: 0.2,
            timeout_secs: 20,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("ATTRITION_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("ATTRITION_PORT", 3000),
                api_keys: parse_api_keys(),
                admin_callers: parse_list("ATTRITION_ADMIN_CALLERS"),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:attrition.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
                busy_timeout_ms: parse_env_or("DATABASE_BUSY_TIMEOUT_MS", 5000),
                journal_mode: env::var("DATABASE_JOURNAL_MODE")
                    .unwrap_or_else(|_| "WAL".to_string()),
                synchronous: env::var("DATABASE_SYNCHRONOUS")
                    .unwrap_or_else(|_| "NORMAL".to_string()),
            },
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                model,
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 20),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 1),
            }),
            narrative: NarrativeConfig {
                max_tokens: parse_env_or("NARRATIVE_MAX_TOKENS", 400),
                temperature: parse_env_or("NARRATIVE_TEMPERATURE", 0.2),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 20),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

impl ServerConfig {
    pub fn caller_for_token(&self, token: &str) -> Option<&str> {
        self.api_keys.get(token).map(String::as_str)
    }

    pub fn is_admin(&self, caller_id: &str) -> bool {
        self.admin_callers.iter().any(|admin| admin == caller_id)
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_api_key_pairs() {
        let keys = parse_api_key_pairs("hr-portal:abc123, alice : xyz ,broken,:nocaller,");
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.get("abc123").map(String::as_str), Some("hr-portal"));
        assert_eq!(keys.get("xyz").map(String::as_str), Some("alice"));
    }

    #[test]
    fn test_token_may_contain_colons() {
        let keys = parse_api_key_pairs("svc:part1:part2");
        assert_eq!(keys.get("part1:part2").map(String::as_str), Some("svc"));
    }

    #[test]
    #[serial]
    fn test_llm_config_absent_without_model() {
        std::env::remove_var("LLM_MODEL");
        let config = Config::default();
        assert!(config.llm.is_none());
    }

    #[test]
    #[serial]
    fn test_llm_config_from_env() {
        std::env::set_var("LLM_MODEL", "openai/gpt-4o-mini");
        std::env::set_var("LLM_TIMEOUT", "7");

        let config = Config::default();
        let llm = config.llm.expect("llm config");
        assert_eq!(llm.model, "openai/gpt-4o-mini");
        assert_eq!(llm.timeout_secs, 7);
        assert_eq!(llm.max_retries, 1);
        assert_eq!(config.narrative.timeout_secs, 7);

        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_TIMEOUT");
    }

    #[test]
    #[serial]
    fn test_narrative_defaults() {
        std::env::remove_var("NARRATIVE_MAX_TOKENS");
        std::env::remove_var("NARRATIVE_TEMPERATURE");
        std::env::remove_var("LLM_TIMEOUT");
        let config = Config::default();
        assert_eq!(config.narrative.max_tokens, 400);
        assert!((config.narrative.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.narrative.timeout_secs, 20);
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back_to_default() {
        std::env::set_var("ATTRITION_PORT", "not-a-port");
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        std::env::remove_var("ATTRITION_PORT");
    }

    #[test]
    #[serial]
    fn test_admin_callers_from_env() {
        std::env::set_var("ATTRITION_ADMIN_CALLERS", "alice, ,bob");
        let config = Config::default();
        assert!(config.server.is_admin("alice"));
        assert!(config.server.is_admin("bob"));
        assert!(!config.server.is_admin("mallory"));
        std::env::remove_var("ATTRITION_ADMIN_CALLERS");
    }

    #[test]
    fn test_parse_llm_provider_model() {
        assert_eq!(
            parse_llm_provider_model("openai/gpt-4o-mini"),
            ("openai", "gpt-4o-mini")
        );
        assert_eq!(
            parse_llm_provider_model("openrouter/anthropic/claude"),
            ("openrouter", "anthropic/claude")
        );
        assert_eq!(parse_llm_provider_model("llama3"), ("local", "llama3"));
    }
}
