use std::fmt::Write as _;

use serde::Deserialize;
use serde_json::json;
use tokio::runtime::Runtime;

use crate::config::AiConfig;

use super::domain::FitnessRecord;
use super::evaluation::ScoringConfig;

/// Outbound text-generation hook. The real implementation talks to
/// OpenRouter; tests and offline demos substitute an in-memory gateway.
pub trait CommentGateway: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, CommentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    #[error("comment backend unreachable: {0}")]
    Transport(String),
    #[error("comment backend rejected the request: {0}")]
    Api(String),
    #[error("comment backend returned no choices")]
    EmptyResponse,
    #[error("comment runtime unavailable: {0}")]
    Runtime(String),
}

/// Build the coach prompt from a stored record.
///
/// Weak items (score at or below 2) get called out for drill suggestions and
/// strong items feed the team recommendation, matching the brief the PE head
/// wrote for the original site.
pub fn build_coach_prompt(record: &FitnessRecord, config: &ScoringConfig) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Role: you are a warm, experienced primary-school PE department head."
    );
    let _ = writeln!(
        prompt,
        "Task: write a personalised exercise recommendation of roughly 150 words \
         for the student below."
    );
    let _ = writeln!(
        prompt,
        "\nStudent: {} ({}, class {})",
        record.student.name,
        record.measurement.gender.label(),
        record.student.class
    );
    let _ = writeln!(prompt, "Results:");
    for entry in &record.result.items {
        let _ = writeln!(
            prompt,
            "- {}: {}{} (score {}/{})",
            entry.subject,
            entry.raw_value,
            if entry.unit.is_empty() {
                String::new()
            } else {
                format!(" {}", entry.unit)
            },
            entry.score,
            config.max_score
        );
    }
    if !record.result.recommendations.is_empty() {
        let _ = writeln!(
            prompt,
            "Rule-based team suggestions: {}",
            record.result.recommendations.join(", ")
        );
    }
    let _ = writeln!(
        prompt,
        "\nPlease include: a friendly opening; concrete training drills for any \
         item scoring 2 or below; a school-team suggestion built on the \
         student's strengths; and a positive, encouraging tone throughout."
    );
    prompt
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<ChatApiError>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatApiError {
    message: String,
}

/// Thin wrapper around the OpenRouter chat-completions endpoint allowing
/// synchronous workflows to request a comment without exposing async details.
///
/// The API key comes from server-side configuration and is only ever attached
/// to this outbound request; clients of the portal never see it.
#[derive(Debug)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    runtime: Runtime,
    config: AiConfig,
}

impl OpenRouterClient {
    pub fn new(http: reqwest::Client, runtime: Runtime, config: AiConfig) -> Self {
        Self {
            http,
            runtime,
            config,
        }
    }

    pub fn with_runtime(config: AiConfig) -> Result<Self, CommentError> {
        let runtime = Runtime::new().map_err(|err| CommentError::Runtime(err.to_string()))?;
        Ok(Self::new(reqwest::Client::new(), runtime, config))
    }

    async fn request_completion(&self, prompt: &str) -> Result<String, CommentError> {
        let body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| CommentError::Transport(err.to_string()))?;

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| CommentError::Transport(err.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(CommentError::Api(error.message));
        }

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(CommentError::EmptyResponse)
    }
}

impl CommentGateway for OpenRouterClient {
    fn generate(&self, prompt: &str) -> Result<String, CommentError> {
        self.runtime.block_on(self.request_completion(prompt))
    }
}
