//! Page retrieval: one HTTP GET per attempt, wrapped in a fixed-delay retry policy.

use crate::config::ScrapeConfig;
use crate::error::FetchError;
use reqwest::{Client, header};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Something that can turn a fully composed URL into page markup.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Plain reqwest-backed page source with a fixed identity header and timeout.
pub struct HttpSource {
    client: Client,
    user_agent: String,
}

impl HttpSource {
    pub fn new(config: &ScrapeConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait::async_trait]
impl PageSource for HttpSource {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .header(header::USER_AGENT, self.user_agent.as_str())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(resp.text().await?)
    }
}

/// Fixed-delay retry: at most `max_attempts` calls, `delay` between them.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// `max_attempts` below 1 is raised to 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Runs `op` until it succeeds, the error is not `retryable`, or attempts
    /// run out. The last error is returned as-is.
    pub async fn run<T, E, F, Fut, P>(&self, mut op: F, retryable: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let max = self.max_attempts;
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < max && retryable(&e) => {
                    warn!("attempt {}/{} failed: {}", attempt, max, e);
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// A page source plus the retry policy applied to every request.
pub struct Fetcher<S> {
    source: S,
    policy: RetryPolicy,
}

impl<S: PageSource> Fetcher<S> {
    pub fn new(source: S, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("fetching {}", url);
        self.policy
            .run(move || self.source.get(url), FetchError::is_transient)
            .await
    }
}

impl Fetcher<HttpSource> {
    pub fn from_config(config: &ScrapeConfig) -> Result<Self, FetchError> {
        Ok(Self::new(
            HttpSource::new(config)?,
            RetryPolicy::new(config.max_attempts, config.retry_delay),
        ))
    }
}
