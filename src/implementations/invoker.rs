use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };
use std::time::Duration;
use thiserror::Error;

use crate::errors::{ DidactError, DidactResult };
use crate::implementations::config::{ ConfigError, GeneratorConfig };
use crate::models::common::Backend;
use crate::traits::model_invoker::ModelInvoker;

#[derive(Debug, Error)]
pub enum InvokerError {
    #[error("Configuration error: {0}")] ConfigError(#[from] ConfigError),

    #[error("Network error: {0}")] NetworkError(String),

    #[error("HTTP error: {status} - {message}")] HttpError {
        status: u16,
        message: String,
    },

    #[error("Failed to parse API response: {0}")] ParseError(String),

    #[error("API error: {0}")] ApiError(String),
}

impl InvokerError {
    /// Attach the backend the failing call was made against
    pub fn into_didact(self, backend: Backend) -> DidactError {
        match self {
            InvokerError::ConfigError(err) => DidactError::ConfigurationError(err.to_string()),
            other =>
                DidactError::InvocationError {
                    backend,
                    message: other.to_string(),
                },
        }
    }
}

/// Gemini / Vertex AI request and response types
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

/// OpenAI chat completion request and response types
#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatResponseChoice>,
}

/// HTTP-backed implementation of the ModelInvoker trait
///
/// # API Keys
/// Credentials come from the configuration or from the environment:
///    - Gemini: GEMINI_API_KEY or GOOGLE_API_KEY
///    - OpenAI: OPENAI_API_KEY
///    - Vertex AI: VERTEX_ACCESS_TOKEN, GCP_PROJECT and GCP_LOCATION
#[derive(Clone)]
pub struct LlmInvoker {
    config: GeneratorConfig,
    http_client: reqwest::Client,
}

impl LlmInvoker {
    /// Create a new LlmInvoker with the given configuration
    pub fn new(config: GeneratorConfig) -> DidactResult<Self> {
        let http_client = reqwest::Client
            ::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DidactError::SystemError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http_client })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    async fn call_gemini(&self, model: &str, prompt: &str) -> Result<String, InvokerError> {
        let api_key = self.config.get_api_key(Backend::Gemini)?;
        let url = format!("{}/models/{}:generateContent", self.config.gemini_endpoint(), model);

        debug!("Gemini endpoint: {}", url);
        let request = self.http_client
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&self.gemini_request(prompt));

        let body = self.send(request, Backend::Gemini).await?;
        extract_gemini_text(&body)
    }

    async fn call_vertex(&self, model: &str, prompt: &str) -> Result<String, InvokerError> {
        let credentials = self.config.vertex_credentials()?;
        let url = format!(
            "{}/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.config.vertex_endpoint(&credentials.location),
            credentials.project,
            credentials.location,
            model
        );

        debug!("Vertex AI endpoint: {}", url);
        let request = self.http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", credentials.access_token))
            .json(&self.gemini_request(prompt));

        let body = self.send(request, Backend::Vertex).await?;
        extract_gemini_text(&body)
    }

    async fn call_openai(&self, model: &str, prompt: &str) -> Result<String, InvokerError> {
        let api_key = self.config.get_api_key(Backend::OpenAi)?;
        let url = format!("{}/chat/completions", self.config.openai_endpoint());

        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("OpenAI endpoint: {}", url);
        let request_builder = self.http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request);

        let body = self.send(request_builder, Backend::OpenAi).await?;

        let response: ChatResponse = serde_json
            ::from_str(&body)
            .map_err(|e| InvokerError::ParseError(format!("Invalid JSON response: {}", e)))?;

        let content = response.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| InvokerError::ApiError("No response content from API".to_string()))?;

        debug!("Response content length: {} characters", content.len());
        Ok(content)
    }

    fn gemini_request(&self, prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: Some(prompt.to_string()) }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
            },
        }
    }

    /// Send the request and return the body of a successful response
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        backend: Backend
    ) -> Result<String, InvokerError> {
        let response = request.send().await.map_err(|e| {
            let error_msg = format!("Network error when calling {}: {}", backend, e);
            warn!("{}", error_msg);
            if e.is_timeout() {
                warn!("Request timed out");
            }
            if e.is_connect() {
                warn!("Connection error - check network connectivity");
            }
            InvokerError::NetworkError(error_msg)
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, error_text);
            return Err(InvokerError::HttpError {
                status,
                message: error_text,
            });
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to get response text: {}", e);
            InvokerError::ParseError(e.to_string())
        })?;

        info!("Successfully received response from {}", backend);
        debug!("Response length: {} characters", body.len());
        Ok(body)
    }
}

/// Join the text parts of the first candidate
fn extract_gemini_text(body: &str) -> Result<String, InvokerError> {
    let response: GeminiResponse = serde_json
        ::from_str(body)
        .map_err(|e| InvokerError::ParseError(format!("Invalid JSON response: {}", e)))?;

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(InvokerError::ApiError(format!("Prompt blocked by provider: {}", reason)));
    }

    let candidate = response.candidates
        .into_iter()
        .next()
        .ok_or_else(|| InvokerError::ApiError("Response contained no candidates".to_string()))?;

    let text: String = candidate.content
        .map(|content| {
            content.parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(InvokerError::ApiError(format!("Empty response (finish reason: {})", reason)));
    }

    Ok(text)
}

#[async_trait]
impl ModelInvoker for LlmInvoker {
    async fn invoke(&self, backend: Backend, model: &str, prompt: &str) -> DidactResult<String> {
        info!("Making LLM API request to {} ({})", backend, model);
        debug!("Prompt length: {} characters", prompt.len());

        let result = match backend {
            Backend::Gemini => self.call_gemini(model, prompt).await,
            Backend::OpenAi => self.call_openai(model, prompt).await,
            Backend::Vertex => self.call_vertex(model, prompt).await,
        };

        result.map_err(|e| e.into_didact(backend))
    }

    fn ensure_configured(&self, backend: Backend) -> DidactResult<()> {
        let check = match backend {
            Backend::Vertex => self.config.vertex_credentials().map(|_| ()),
            other => self.config.get_api_key(other).map(|_| ()),
        };
        check.map_err(|e| DidactError::ConfigurationError(e.to_string()))
    }
}
