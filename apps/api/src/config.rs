use thiserror::Error;

/// Application configuration loaded from environment variables.
/// Each component receives only the pieces it needs via constructor injection.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_api_url: String,
    pub prompts_file: String,
    pub port: u16,
    pub rust_log: String,
}

/// Errors raised while assembling the configuration at startup.
/// These are fatal before the server ever listens — never at call time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable '{0}' is not set")]
    MissingVar(String),

    #[error("Environment variable '{name}' is invalid: {reason}")]
    InvalidVar { name: String, reason: String },
}

const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_PROMPTS_FILE: &str = "data/prompts.json";

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_api_url: std::env::var("GROQ_API_URL")
                .unwrap_or_else(|_| DEFAULT_GROQ_API_URL.to_string()),
            prompts_file: std::env::var("PROMPTS_FILE")
                .unwrap_or_else(|_| DEFAULT_PROMPTS_FILE.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidVar {
                    name: "PORT".to_string(),
                    reason: e.to_string(),
                })?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unique variable names keep these tests safe under parallel execution.

    #[test]
    fn test_require_env_missing_var() {
        let err = require_env("API_TEST_UNSET_VAR_7F3K").unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(name) if name == "API_TEST_UNSET_VAR_7F3K"));
    }

    #[test]
    fn test_require_env_empty_var_is_missing() {
        std::env::set_var("API_TEST_EMPTY_VAR_7F3K", "   ");
        let err = require_env("API_TEST_EMPTY_VAR_7F3K").unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }

    #[test]
    fn test_require_env_present_var() {
        std::env::set_var("API_TEST_SET_VAR_7F3K", "gsk_abc123");
        assert_eq!(require_env("API_TEST_SET_VAR_7F3K").unwrap(), "gsk_abc123");
    }
}
