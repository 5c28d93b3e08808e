//! HTTP client for the sweepstakes backend.

use super::SweepstakeApi;
use super::response::{decode_body, error_detail};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::state::{CreateSweepstakeRequest, EventType, MarketInfo, Sweepstake, SweepstakeHistory};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// Builder for creating an API client.
pub struct ApiClientBuilder {
    config: ApiConfig,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the backend base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Build the API client.
    pub fn build(self) -> Result<ApiClient> {
        ApiClient::new(self.config)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A single request to the backend.
struct Call<'a> {
    method: Method,
    segments: Vec<&'a str>,
    query: Option<(&'static str, &'static str)>,
    body: Option<String>,
    /// What the request is about, for `NotFound` and validation messages.
    resource: String,
}

impl<'a> Call<'a> {
    fn new(method: Method, segments: Vec<&'a str>, resource: impl Into<String>) -> Self {
        Self {
            method,
            segments,
            query: None,
            body: None,
            resource: resource.into(),
        }
    }

    /// "GET /api/sweepstakes/abc", for logs and decode errors.
    fn endpoint(&self) -> String {
        format!("{} /{}", self.method, self.segments.join("/"))
    }
}

/// reqwest-backed implementation of [`SweepstakeApi`].
pub struct ApiClient {
    /// Configuration.
    config: ApiConfig,
    base_url: Url,
    http: reqwest::Client,
    /// Rate limiter state.
    rate_limiter: Arc<RwLock<RateLimiter>>,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::config(format!("invalid base_url {:?}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base_url {:?} cannot carry a path",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            rate_limiter: Arc::new(RwLock::new(RateLimiter::new(config.rate_limit))),
            config,
            base_url,
            http,
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send `call` and decode the success body into `T`.
    async fn fetch<T: DeserializeOwned>(&self, call: Call<'_>) -> Result<T> {
        let body = self.send(&call).await?;
        decode_body(&call.endpoint(), &body)
    }

    /// Send with retries. Only GETs are retried, and only for errors that
    /// may go away on their own.
    async fn send(&self, call: &Call<'_>) -> Result<String> {
        let retries = if call.method == Method::GET {
            self.config.max_retries
        } else {
            0
        };

        let mut attempt = 0;
        loop {
            match self.send_once(call).await {
                Err(e) if attempt < retries && e.is_retryable() => {
                    let delay = backoff_delay(self.config.retry_backoff_ms, attempt);
                    warn!(
                        endpoint = %call.endpoint(),
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after error: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn send_once(&self, call: &Call<'_>) -> Result<String> {
        self.rate_limit().await;

        let mut url = build_url(&self.base_url, &call.segments)?;
        if let Some((key, value)) = call.query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let mut request = self.http.request(call.method.clone(), url);
        if let Some(body) = &call.body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let status = response.status();
        let text = response.text().await;

        debug!(
            endpoint = %call.endpoint(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request finished"
        );

        if !status.is_success() {
            let detail = text.map(|t| error_detail(&t)).unwrap_or_default();
            return Err(Error::from_status(status.as_u16(), &call.resource, detail));
        }

        text.map_err(|e| Error::transport(e.to_string()))
    }

    /// Apply rate limiting.
    async fn rate_limit(&self) {
        let mut limiter = self.rate_limiter.write().await;
        limiter.wait().await;
    }
}

#[async_trait]
impl SweepstakeApi for ApiClient {
    #[instrument(skip(self))]
    async fn get_sweepstake(&self, id: &str) -> Result<Sweepstake> {
        self.fetch(Call::new(
            Method::GET,
            vec!["api", "sweepstakes", id],
            format!("sweepstake {id}"),
        ))
        .await
    }

    #[instrument(skip(self))]
    async fn list_sweepstakes(&self, include_closed: bool) -> Result<Vec<Sweepstake>> {
        let mut call = Call::new(Method::GET, vec!["api", "sweepstakes"], "sweepstakes");
        if include_closed {
            call.query = Some(("include_closed", "true"));
        }
        self.fetch(call).await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_sweepstake(&self, request: &CreateSweepstakeRequest) -> Result<Sweepstake> {
        let mut call = Call::new(Method::POST, vec!["api", "sweepstakes"], "sweepstake");
        call.body = Some(
            serde_json::to_string(request)
                .map_err(|e| Error::invalid_input(format!("unencodable request: {e}")))?,
        );
        self.fetch(call).await
    }

    #[instrument(skip(self))]
    async fn refresh_sweepstake(&self, id: &str) -> Result<Sweepstake> {
        self.fetch(Call::new(
            Method::POST,
            vec!["api", "sweepstakes", id, "refresh"],
            format!("sweepstake {id}"),
        ))
        .await
    }

    #[instrument(skip(self))]
    async fn close_sweepstake(&self, id: &str) -> Result<()> {
        let call = Call::new(
            Method::POST,
            vec!["api", "sweepstakes", id, "close"],
            format!("sweepstake {id}"),
        );
        self.send(&call).await.map(|_| ())
    }

    #[instrument(skip(self))]
    async fn get_event_types(&self) -> Result<Vec<EventType>> {
        self.fetch(Call::new(Method::GET, vec!["api", "event-types"], "event types"))
            .await
    }

    #[instrument(skip(self))]
    async fn get_markets(&self, event_type: &str) -> Result<Vec<MarketInfo>> {
        self.fetch(Call::new(
            Method::GET,
            vec!["api", "markets", event_type],
            format!("markets for event type {event_type}"),
        ))
        .await
    }

    #[instrument(skip(self))]
    async fn get_sweepstake_history(&self, id: &str) -> Result<SweepstakeHistory> {
        self.fetch(Call::new(
            Method::GET,
            vec!["api", "sweepstakes", id, "history"],
            format!("history of sweepstake {id}"),
        ))
        .await
    }
}

/// Append percent-encoded path segments to `base`.
fn build_url(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::config(format!("base_url {base} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Exponential backoff: `base`, `2 * base`, `4 * base`, ...
fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    Duration::from_millis(base_ms.saturating_mul(1u64 << attempt.min(16)))
}

/// Simple token-bucket rate limiter.
#[derive(Debug)]
struct RateLimiter {
    requests_per_second: u32,
    last_request: Instant,
    tokens: f64,
}

impl RateLimiter {
    fn new(requests_per_second: u32) -> Self {
        let requests_per_second = requests_per_second.max(1);
        Self {
            requests_per_second,
            last_request: Instant::now(),
            tokens: requests_per_second as f64,
        }
    }

    async fn wait(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_request).as_secs_f64();

        // Replenish tokens
        self.tokens = (self.tokens + elapsed * self.requests_per_second as f64)
            .min(self.requests_per_second as f64);

        if self.tokens < 1.0 {
            let wait_time = (1.0 - self.tokens) / self.requests_per_second as f64;
            tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
            self.tokens = 1.0;
        }

        self.tokens -= 1.0;
        self.last_request = Instant::now();
    }
}
