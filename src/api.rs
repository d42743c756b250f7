//! LLM API interaction with exponential backoff retry logic.
//!
//! Summaries come from an OpenAI-compatible `/chat/completions` endpoint.
//! The module uses a trait-based design:
//! - [`AskAsync`]: core trait defining async LLM interaction
//! - [`ChatClient`]: concrete client speaking the chat-completions protocol
//! - [`RetryAsk`]: decorator that adds retry logic to any `AskAsync`
//!   implementation
//!
//! # Retry Strategy
//!
//! - Maximum 5 retry attempts
//! - Exponential backoff starting at 1 second
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd

use crate::settings::Settings;
use rand::{Rng, rng};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

/// Trait for async LLM interaction.
///
/// Implementors can send text to an LLM and receive a response. The
/// abstraction exists so decorators (like retry logic) and test doubles can
/// stand in for the real client.
pub trait AskAsync {
    /// The type of response returned by the LLM.
    type Response;

    /// Send text to the LLM and receive a response.
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>>;
}

/// Wrapper that adds exponential backoff retry logic to any [`AskAsync`]
/// implementation.
///
/// The delay between retries follows:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryAsk<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryAsk<T>
where
    T: AskAsync,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> fmt::Debug for RetryAsk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryAsk")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> AskAsync for RetryAsk<T>
where
    T: AskAsync,
{
    type Response = T::Response;

    #[instrument(level = "info", skip_all)]
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.ask(text).await {
                Ok(resp) => {
                    return Ok(resp);
                }
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis(),
                            elapsed_ms_total = total_dt.as_millis(),
                            error = %e,
                            "ask() exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis(),
                        elapsed_ms_total = total_dt.as_millis(),
                        ?delay,
                        error = %e,
                        "ask() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// One instance per prompt role (article summarizer, discussion summarizer);
/// instances share the process-wide `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    system_prompt: &'static str,
}

impl ChatClient {
    /// Build a client from settings. The API key is read from the
    /// environment variable named by `settings.api_key_env`; a missing key
    /// is not fatal here, every `ask` will fail and the affected summaries
    /// stay empty.
    pub fn from_settings(
        http: reqwest::Client,
        settings: &Settings,
        system_prompt: &'static str,
    ) -> Self {
        let api_key = std::env::var(&settings.api_key_env).unwrap_or_default();
        if api_key.is_empty() {
            warn!(
                var = %settings.api_key_env,
                "API key environment variable is empty; summarization will fail"
            );
        }
        Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
            system_prompt,
        }
    }
}

impl AskAsync for ChatClient {
    type Response = String;

    #[instrument(level = "info", skip_all)]
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>> {
        if self.api_key.is_empty() {
            return Err("no API key configured".into());
        }

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: 0.2,
        };

        let t0 = Instant::now();
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body: ChatResponse = response.json().await?;
        let dt = t0.elapsed();

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();
        if content.is_empty() {
            warn!(elapsed_ms = dt.as_millis(), "Model returned an empty completion");
            return Err("empty completion".into());
        }
        Ok(content)
    }
}

/// High-level call with exponential backoff; the entry point used by
/// enrichment.
#[instrument(level = "info", skip_all)]
pub async fn ask_with_backoff(client: &ChatClient, text: &str) -> Result<String, Box<dyn Error>> {
    let t0 = Instant::now();
    let api = RetryAsk::new(client.clone(), 5, StdDuration::from_secs(1));
    let res = api.ask(text).await;
    let dt = t0.elapsed();

    match &res {
        Ok(_) => info!(elapsed_ms_total = dt.as_millis(), "ask_with_backoff succeeded"),
        Err(e) => {
            error!(elapsed_ms_total = dt.as_millis(), error = %e, "ask_with_backoff failed")
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlakyAsk {
        calls: AtomicUsize,
        succeed_on: usize,
    }

    impl AskAsync for FlakyAsk {
        type Response = String;

        async fn ask(&self, _text: &str) -> Result<String, Box<dyn Error>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call >= self.succeed_on {
                Ok("ok".to_string())
            } else {
                Err("transient".into())
            }
        }
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_transient_failures() {
        let flaky = FlakyAsk {
            calls: AtomicUsize::new(0),
            succeed_on: 3,
        };
        let api = RetryAsk::new(flaky, 5, StdDuration::from_millis(1));

        let out = api.ask("input").await.unwrap();
        assert_eq!(out, "ok");
        assert_eq!(api.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_retries() {
        let broken = FlakyAsk {
            calls: AtomicUsize::new(0),
            succeed_on: usize::MAX,
        };
        let api = RetryAsk::new(broken, 2, StdDuration::from_millis(1));

        assert!(api.ask("input").await.is_err());
        // initial attempt plus two retries
        assert_eq!(api.inner.calls.load(Ordering::SeqCst), 3);
    }
}
