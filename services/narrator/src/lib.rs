//! Trade Narrator
//!
//! Turns computed trade statistics into short written narratives via an
//! OpenAI/OpenRouter-compatible chat-completion API:
//! - pure prompt templating over a `NarrativeContext`
//! - a pass-through HTTP client with a sliding-window rate limiter
//! - an explicitly constructed usage monitor with its own lifecycle

pub mod monitor;
pub mod prompt;

pub use monitor::{AlertLevel, MonitorConfig, NarratorEvent, UsageCounters, UsageMonitor};
pub use prompt::{NarrativeContext, build_prompt};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use services_common::ServiceError;

const SYSTEM_PROMPT: &str = "You are a trade statistician writing short, factual narratives \
for a national trade dashboard. Use only the figures provided. Two paragraphs at most.";

/// Narrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// Base URL of the chat-completion API
    pub api_base: String,
    /// Bearer token for the upstream API
    pub api_key: String,
    /// Model identifier passed through to the upstream
    pub model: String,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Upstream request timeout in seconds
    pub request_timeout_secs: u64,
    /// Calls allowed per sliding one-minute window
    pub requests_per_minute: u32,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            api_base: "https://openrouter.ai/api/v1".to_string(),
            api_key: String::new(),
            model: "openai/gpt-4o-mini".to_string(),
            max_tokens: 512,
            request_timeout_secs: 30,
            requests_per_minute: 20,
        }
    }
}

/// Sliding-window rate limiter for upstream calls
#[derive(Debug)]
pub struct RateLimiter {
    requests_per_minute: u32,
    last_requests: Vec<DateTime<Utc>>,
}

impl RateLimiter {
    /// Create a limiter with a per-minute cap
    #[must_use]
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            last_requests: Vec::new(),
        }
    }

    /// Record a call at `now`, or report that the window is full.
    ///
    /// Callers on a request path must not sleep; a full window is a
    /// `RateLimited` error they surface immediately.
    pub fn try_acquire(&mut self, now: DateTime<Utc>) -> Result<(), ServiceError> {
        self.last_requests
            .retain(|&req_time| (now - req_time).num_seconds() < 60);
        if self.last_requests.len() >= self.requests_per_minute as usize {
            return Err(ServiceError::RateLimited(format!(
                "{} upstream calls in the last minute",
                self.last_requests.len()
            )));
        }
        self.last_requests.push(now);
        Ok(())
    }
}

/// A generated narrative and the model that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Narrative {
    /// The generated text
    pub text: String,
    /// Model identifier reported by the upstream
    pub model: String,
}

/// Pass-through client for a chat-completion upstream
pub struct ChatClient {
    client: Client,
    config: NarratorConfig,
    rate_limiter: Mutex<RateLimiter>,
    counters: Arc<UsageCounters>,
}

impl ChatClient {
    /// Build a client with its own counter set
    pub fn new(config: NarratorConfig) -> Result<Self> {
        Self::with_counters(config, Arc::new(UsageCounters::default()))
    }

    /// Build a client that reports usage into an injected counter set
    pub fn with_counters(config: NarratorConfig, counters: Arc<UsageCounters>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("tradescope/1.0")
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;
        let rate_limiter = Mutex::new(RateLimiter::new(config.requests_per_minute));
        Ok(Self {
            client,
            config,
            rate_limiter,
            counters,
        })
    }

    /// Shared counters, for wiring a `UsageMonitor`
    #[must_use]
    pub fn counters(&self) -> Arc<UsageCounters> {
        Arc::clone(&self.counters)
    }

    /// Render the prompt for a context and pass it to the upstream.
    pub async fn narrate(&self, context: &NarrativeContext) -> Result<Narrative, ServiceError> {
        self.rate_limiter.lock().await.try_acquire(Utc::now())?;
        self.counters.record_request();

        let request = ChatRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_prompt(context),
                },
            ],
        };

        let url = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                self.counters.record_failure();
                ServiceError::from(err)
            })?;

        if !response.status().is_success() {
            self.counters.record_failure();
            return Err(ServiceError::UpstreamFailed(format!(
                "chat API returned status {}",
                response.status()
            )));
        }

        let body: ChatResponse = response.json().await.map_err(|err| {
            self.counters.record_failure();
            ServiceError::from(err)
        })?;

        let text = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        if text.is_empty() {
            self.counters.record_failure();
            return Err(ServiceError::UpstreamFailed(
                "chat API returned no choices".to_string(),
            ));
        }

        debug!("narrative generated by {} ({} chars)", body.model, text.len());
        Ok(Narrative {
            text,
            model: body.model,
        })
    }
}

/// Chat-completion wire format
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_rate_limiter_denies_over_cap() {
        let mut limiter = RateLimiter::new(3);
        let now = Utc::now();

        for _ in 0..3 {
            assert!(limiter.try_acquire(now).is_ok());
        }
        assert!(matches!(
            limiter.try_acquire(now),
            Err(ServiceError::RateLimited(_))
        ));
    }

    #[test]
    fn test_rate_limiter_window_slides() {
        let mut limiter = RateLimiter::new(1);
        let start = Utc::now();

        assert!(limiter.try_acquire(start).is_ok());
        assert!(limiter.try_acquire(start).is_err());
        // A minute later the window has drained
        assert!(limiter.try_acquire(start + TimeDelta::seconds(61)).is_ok());
    }

    #[test]
    fn test_chat_response_decoding() {
        let body: ChatResponse = serde_json::from_str(
            r#"{
                "model": "openai/gpt-4o-mini",
                "choices": [
                    {"message": {"role": "assistant", "content": "Exports fell."}}
                ]
            }"#,
        )
        .expect("response decodes");
        assert_eq!(body.model, "openai/gpt-4o-mini");
        assert_eq!(body.choices[0].message.content, "Exports fell.");
    }
}
