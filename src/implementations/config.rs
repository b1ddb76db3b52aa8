use log::debug;
use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::models::common::{ Backend, ModelChoice };

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key for {0}")]
    MissingApiKey(Backend),

    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ApiConfig {
    /// API key for the backend; falls back to the environment
    pub api_key: Option<String>,

    /// Base endpoint override
    pub api_endpoint: Option<String>,
}

/// Vertex AI needs a project, a region and an OAuth access token
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct VertexConfig {
    pub project: Option<String>,
    pub location: Option<String>,
    pub access_token: Option<String>,
    pub api_endpoint: Option<String>,
}

/// Resolved Vertex credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexCredentials {
    pub project: String,
    pub location: String,
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorConfig {
    pub gemini: ApiConfig,

    pub openai: ApiConfig,

    pub vertex: VertexConfig,

    /// Maximum tokens for API calls
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0)
    pub temperature: Option<f32>,

    /// HTTP timeout per call, in seconds
    pub timeout_secs: u64,

    /// Generation attempts per artifact
    pub max_attempts: u32,

    /// Model used when the CLI names none
    pub default_generator: ModelChoice,

    pub default_auditor: ModelChoice,
}

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".to_string()));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid("max_tokens must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Get the API key for a key-based backend, checking the environment if not in config
    pub fn get_api_key(&self, backend: Backend) -> Result<String, ConfigError> {
        let (configured, env_vars): (&Option<String>, &[&str]) = match backend {
            Backend::Gemini => (&self.gemini.api_key, &["GEMINI_API_KEY", "GOOGLE_API_KEY"]),
            Backend::OpenAi => (&self.openai.api_key, &["OPENAI_API_KEY"]),
            Backend::Vertex => (&self.vertex.access_token, &["VERTEX_ACCESS_TOKEN"]),
        };

        if let Some(key) = configured.as_ref().filter(|k| !k.trim().is_empty()) {
            debug!("Using {} API key from config", backend);
            return Ok(key.clone());
        }

        for env_var in env_vars {
            if let Ok(key) = std::env::var(env_var) {
                if !key.trim().is_empty() {
                    debug!("Using {} API key from {}", backend, env_var);
                    return Ok(key);
                }
            }
        }

        Err(ConfigError::MissingApiKey(backend))
    }

    /// Resolve project, region and token for Vertex AI
    pub fn vertex_credentials(&self) -> Result<VertexCredentials, ConfigError> {
        let project = Self::setting_or_env(&self.vertex.project, "GCP_PROJECT")?;
        let location = Self::setting_or_env(&self.vertex.location, "GCP_LOCATION")?;
        let access_token = self.get_api_key(Backend::Vertex)?;
        Ok(VertexCredentials { project, location, access_token })
    }

    pub fn gemini_endpoint(&self) -> String {
        self.gemini.api_endpoint.clone().unwrap_or_else(|| GEMINI_BASE_URL.to_string())
    }

    pub fn openai_endpoint(&self) -> String {
        self.openai.api_endpoint.clone().unwrap_or_else(|| OPENAI_BASE_URL.to_string())
    }

    pub fn vertex_endpoint(&self, location: &str) -> String {
        self.vertex.api_endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{}-aiplatform.googleapis.com/v1", location))
    }

    fn setting_or_env(value: &Option<String>, env_var: &str) -> Result<String, ConfigError> {
        match value.as_ref().filter(|v| !v.trim().is_empty()) {
            Some(v) => Ok(v.clone()),
            None =>
                std::env
                    ::var(env_var)
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| ConfigError::EnvVarNotFound(env_var.to_string())),
        }
    }
}

/// Default configuration
impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            gemini: ApiConfig::default(),
            openai: ApiConfig::default(),
            vertex: VertexConfig::default(),
            max_tokens: 4000,
            temperature: None,
            timeout_secs: 120,
            max_attempts: 3,
            default_generator: ModelChoice::new(Backend::OpenAi, "gpt-4o"),
            default_auditor: ModelChoice::new(Backend::Gemini, "gemini-1.5-pro"),
        }
    }
}
