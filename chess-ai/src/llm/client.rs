//! Gemini REST API client
//!
//! Talks to the Generative Language `generateContent` endpoint and returns
//! the raw text of the first candidate. No retry here: any transport,
//! authentication or decode failure is the caller's single failure signal.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Gemini client configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API base URL
    pub base_url: String,
    /// Model name, e.g. "gemini-2.0-flash"
    pub model: String,
    /// API key; the only credential in the system
    pub api_key: String,
    /// Sampling temperature, 0.0-1.0
    pub temperature: f32,
    /// Max generated tokens
    pub max_output_tokens: u32,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key: String::new(),
            temperature: 0.3,
            max_output_tokens: 256,
            timeout_secs: 30,
        }
    }
}

impl GeminiConfig {
    /// Build a config from the environment: `GEMINI_API_KEY` (required),
    /// `GEMINI_MODEL` and `GEMINI_BASE_URL` (optional overrides).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?;
        let mut config = Self {
            api_key,
            ..Self::default()
        };
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }
}

/// `generateContent` request body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// `generateContent` response body
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Seam over the text-generation backend so the resolution pipeline can be
/// exercised without network access.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// One prompt in, free-form text out.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Gemini client
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    /// Create a client configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Current configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        debug!(
            "Sending request to Gemini: model={}, prompt_len={}",
            self.config.model,
            prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .context("Failed to send generateContent request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            let preview: String = body.chars().take(200).collect();
            anyhow::bail!("Gemini returned {}: {}", status, preview);
        }

        let resp: GenerateResponse =
            serde_json::from_str(&body).context("Failed to parse generateContent response")?;

        let text = resp
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            warn!("Gemini returned an empty response");
        } else {
            let preview: String = text.chars().take(200).collect();
            debug!("Gemini output: {}", preview);
        }

        Ok(text)
    }
}
