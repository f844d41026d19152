use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::LLMClient;
use crate::config::{Credential, Settings};
use crate::error::{VoxError, VoxResult};

/// Gemini `generateContent` client. No retries, no streaming.
#[derive(Clone)]
pub struct APIClient {
    client: Client,
    llm_host: String,
    llm_model: String,
    credential: Credential,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
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
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
}

impl APIClient {
    pub fn new(settings: &Settings, credential: Credential) -> VoxResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| VoxError::remote(format!("failed to build HTTP client: {}", e)))?;

        Ok(APIClient {
            client,
            llm_host: settings.llm_host.trim_end_matches('/').to_string(),
            llm_model: settings.llm_model.clone(),
            credential,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.llm_host, self.llm_model)
    }
}

#[async_trait]
impl LLMClient for APIClient {
    async fn complete(&self, prompt: &str) -> VoxResult<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!("POST {}", self.endpoint());
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| VoxError::remote(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VoxError::remote(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            warn!("Model endpoint returned {}", status);
            return Err(VoxError::remote(error_message(status.as_u16(), &body)));
        }

        extract_text(&body)
    }

    fn model_name(&self) -> &str {
        &self.llm_model
    }
}

fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{} ({}): {}", status, code, envelope.error.message),
            None => format!("{}: {}", status, envelope.error.message),
        },
        Err(_) => format!("{}: {}", status, body.trim()),
    }
}

fn extract_text(body: &str) -> VoxResult<String> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| VoxError::remote(format!("unexpected response: {}", e)))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| VoxError::remote("empty response (no candidates)"))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(VoxError::remote(format!("empty response (finish reason: {})", reason)));
    }
    Ok(text)
}
