//! AI job descriptions via the Gemini `generateContent` API.
//!
//! The user types a few keywords ("replaced tap, fixed leak under sink") and
//! gets back a short professional description for the job log. This is a
//! single request with no retry. Any failure becomes the generic
//! [`GenerationError::Failed`] and the caller keeps the keywords it had.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tradelog::api::gemini::DescriptionGenerator;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let generator = DescriptionGenerator::from_env()?;
//! let description = generator.generate("replaced tap, fixed leak").await?;
//! # Ok(())
//! # }
//! ```

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Default Gemini endpoint.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for descriptions.
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No Gemini API key found, set GEMINI_API_KEY")]
    MissingApiKey,
    #[error("Failed to generate description from AI.")]
    Failed,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|part| part.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// The instruction sent to the model for a set of keywords.
pub fn build_prompt(keywords: &str) -> String {
    format!(
        "You are an assistant for a tradesperson. Based on the following keywords, write a concise and professional job completion description suitable for a client invoice or job log. Be specific about the work performed. Keywords: \"{}\"",
        keywords
    )
}

#[derive(Debug, Clone)]
pub struct DescriptionGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl DescriptionGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            model: GEMINI_MODEL.to_string(),
        }
    }

    /// Reads the API key from the environment, loading `.env` first.
    pub fn from_env() -> Result<Self, GenerationError> {
        let _ = dotenv::dotenv();
        API_KEY_VARS
            .iter()
            .find_map(|name| env::var(name).ok().filter(|value| !value.trim().is_empty()))
            .map(Self::new)
            .ok_or(GenerationError::MissingApiKey)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Generates a description from keywords. Blank keywords give an empty
    /// description without calling the API.
    pub async fn generate(&self, keywords: &str) -> Result<String, GenerationError> {
        if keywords.trim().is_empty() {
            return Ok(String::new());
        }

        self.request(&build_prompt(keywords)).await.map_err(|e| {
            tracing::error!(error = %e, "error generating description");
            GenerationError::Failed
        })
    }

    async fn request(&self, prompt: &str) -> anyhow::Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        response
            .json::<GenerateResponse>()
            .await?
            .text()
            .ok_or_else(|| anyhow::anyhow!("response contained no text"))
    }
}
