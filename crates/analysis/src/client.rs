//! Chat-completion client for the analysis provider.
//!
//! Speaks the OpenAI-compatible `/chat/completions` wire format so the
//! provider can be swapped via configuration. Both entry points carry an
//! explicit request timeout; an unbounded hang is never an option.

use std::time::Duration;

use serde::Deserialize;

use crate::verdict::{parse_verdict, Verdict};

/// Timeout for a triage evaluation call.
const EVALUATE_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for an analytics chat call.
const CHAT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default completion endpoint when `ANALYSIS_API_URL` is not set.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model when `ANALYSIS_MODEL` is not set.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the analysis provider layer.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Analysis provider error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider responded 2xx but the payload was not usable.
    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Configuration for the analysis provider.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Chat-completion endpoint URL.
    pub api_url: String,
    /// Bearer API key.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
}

impl AnalysisConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `ANALYSIS_API_KEY` is not set, signalling that the
    /// provider is not configured: triage then fails open and the chat
    /// endpoint reports the provider unavailable.
    ///
    /// | Variable           | Required | Default                          |
    /// |--------------------|----------|----------------------------------|
    /// | `ANALYSIS_API_KEY` | yes      | —                                |
    /// | `ANALYSIS_API_URL` | no       | OpenAI chat-completions endpoint |
    /// | `ANALYSIS_MODEL`   | no       | `gpt-4o-mini`                    |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("ANALYSIS_API_KEY").ok()?;
        Some(Self {
            api_url: std::env::var("ANALYSIS_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key,
            model: std::env::var("ANALYSIS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Report context
// ---------------------------------------------------------------------------

/// Report fields handed to the classifier as evaluation context.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub reference_number: String,
    pub school_name: String,
    pub region_name: String,
    pub school_level_name: String,
    pub grade: String,
    pub teacher_name: String,
    pub subject: String,
    pub reporter_type: String,
    pub description: String,
}

impl ReportContext {
    /// Render the context block embedded in the evaluation prompt.
    fn to_prompt_block(&self) -> String {
        format!(
            "Reference: {}\nSchool: {} ({}, {})\nGrade: {}\nTeacher: {}\nSubject: {}\nReported by: {}\nDescription: {}",
            self.reference_number,
            self.school_name,
            self.region_name,
            self.school_level_name,
            self.grade,
            self.teacher_name,
            self.subject,
            self.reporter_type,
            self.description,
        )
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the analysis provider.
pub struct AnalysisClient {
    client: reqwest::Client,
    config: AnalysisConfig,
}

impl AnalysisClient {
    /// Create a new client with a pre-configured HTTP client.
    pub fn new(config: AnalysisConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(CHAT_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Evaluate a submitted report's quality.
    ///
    /// Returns the provider's verdict, or an error the caller converts to
    /// [`Verdict::fail_open`]. A 2xx response whose body contains no
    /// parsable verdict object is also an error -- never guess a closure.
    pub async fn evaluate_report(&self, context: &ReportContext) -> Result<Verdict, AnalysisError> {
        let prompt = format!(
            "You are a quality gate for a government teacher-absence reporting portal.\n\
             Evaluate whether the following report is a genuine, actionable submission\n\
             (as opposed to spam, gibberish, a test entry, or abuse).\n\n\
             {}\n\n\
             Respond with ONLY a JSON object:\n\
             {{\"isValid\": boolean, \"reason\": \"one sentence\", \"confidence\": number between 0 and 1}}",
            context.to_prompt_block()
        );

        let content = self.complete(&prompt, EVALUATE_TIMEOUT).await?;
        let verdict = parse_verdict(&content).ok_or_else(|| {
            AnalysisError::Malformed(format!("no verdict object in: {content}"))
        })?;

        tracing::debug!(
            is_valid = verdict.is_valid,
            confidence = verdict.confidence,
            "Report evaluation verdict received"
        );
        Ok(verdict)
    }

    /// Answer an analytics question against a pre-rendered stats context.
    ///
    /// Unlike triage there is no safe default here; errors propagate so the
    /// chat endpoint can surface a 503.
    pub async fn chat(&self, question: &str, stats_context: &str) -> Result<String, AnalysisError> {
        let prompt = format!(
            "You are an analytics assistant for a ministry teacher-absence reporting portal.\n\
             Current reporting statistics:\n{stats_context}\n\n\
             Answer the officer's question concisely using only the data above.\n\n\
             Question: {question}"
        );
        self.complete(&prompt, CHAT_TIMEOUT).await
    }

    /// Execute one chat-completion round-trip and return the message text.
    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, AnalysisError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Malformed(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AnalysisError::Malformed("empty choices array".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
