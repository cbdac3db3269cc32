//! Rate-limited, retrying HTTP client for scraping
//!
//! Every request waits a randomised pacing delay, goes out with a randomly
//! chosen user agent and, when proxies are configured, through a randomly
//! chosen proxy. Callers run requests one after another; nothing here fans out.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use reqwest::header::{ACCEPT_ENCODING, HeaderValue, USER_AGENT};
use reqwest::{Client as ReqwestClient, Proxy, Request, Response};
use tracing::{debug, instrument, warn};

use super::config::ClientConfig;
use crate::error::{Error, Result};

/// HTTP client with request pacing, identity rotation and retries
#[derive(Debug, Clone)]
pub struct ScrapeClient {
    /// Transport used when no proxies are configured
    direct: ReqwestClient,

    /// One transport per configured proxy
    proxied: Vec<ReqwestClient>,

    /// User agent pool, never empty
    user_agents: Vec<HeaderValue>,

    /// Base pacing delay
    pacing: Duration,

    /// Retry backoff step
    backoff: Duration,

    /// Attempts used by `execute_with_default_retry`
    max_retries: u32,
}

fn build_transport(timeout: Duration, proxy: Option<Proxy>) -> Result<ReqwestClient> {
    let mut builder = ReqwestClient::builder().timeout(timeout);
    if let Some(proxy) = proxy {
        builder = builder.proxy(proxy);
    }
    builder
        .build()
        .map_err(|e| Error::transport("failed to build HTTP client", e))
}

impl ScrapeClient {
    /// Create a client from its configuration
    ///
    /// Fails when the user agent pool is empty, a user agent is not a valid
    /// header value, or a proxy URL cannot be parsed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.user_agents.is_empty() {
            return Err(Error::Config("user agents list cannot be empty".to_string()));
        }

        let user_agents = config
            .user_agents
            .iter()
            .map(|ua| {
                HeaderValue::from_str(ua)
                    .map_err(|e| Error::Config(format!("invalid user agent {:?}: {}", ua, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        let proxied = config
            .proxies
            .iter()
            .map(|url| {
                let proxy = Proxy::all(url.as_str())
                    .map_err(|e| Error::Config(format!("invalid proxy URL {}: {}", url, e)))?;
                build_transport(config.timeout, Some(proxy))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            direct: build_transport(config.timeout, None)?,
            proxied,
            user_agents,
            pacing: config.pacing,
            backoff: config.backoff,
            max_retries: config.max_retries,
        })
    }

    /// Build a GET request that asks for an uncompressed body
    pub fn get(&self, url: &str) -> Result<Request> {
        self.direct
            .get(url)
            .header(ACCEPT_ENCODING, "identity")
            .build()
            .map_err(|e| Error::InvalidRequest(format!("{}: {}", url, e)))
    }

    /// Delay drawn uniformly from `[pacing, 2 * pacing)`
    fn pacing_delay(&self) -> Duration {
        let nanos = u64::try_from(self.pacing.as_nanos()).unwrap_or(u64::MAX);
        if nanos == 0 {
            return Duration::ZERO;
        }
        self.pacing + Duration::from_nanos(rand::thread_rng().gen_range(0..nanos))
    }

    fn pick_user_agent(&self) -> HeaderValue {
        let index = rand::thread_rng().gen_range(0..self.user_agents.len());
        self.user_agents[index].clone()
    }

    fn pick_transport(&self) -> &ReqwestClient {
        if self.proxied.is_empty() {
            return &self.direct;
        }
        let index = rand::thread_rng().gen_range(0..self.proxied.len());
        &self.proxied[index]
    }

    /// Send a request after the pacing delay, with a rotated identity
    ///
    /// Any HTTP status is a successful send; only transport failures are errors.
    #[instrument(skip(self, request), fields(url = %request.url()), level = "debug")]
    pub async fn execute(&self, mut request: Request) -> Result<Response> {
        let delay = self.pacing_delay();
        debug!("waiting for {:?} before sending request", delay);
        tokio::time::sleep(delay).await;

        request
            .headers_mut()
            .insert(USER_AGENT, self.pick_user_agent());

        let url = request.url().to_string();
        let response = self
            .pick_transport()
            .execute(request)
            .await
            .map_err(|e| Error::transport(format!("request to {} failed", url), e))?;
        debug!("received response with status code: {}", response.status());
        Ok(response)
    }

    /// Send a request, retrying transport failures up to `max_retries` attempts
    ///
    /// Attempt `n` failing waits `n` backoff steps before the next attempt.
    pub async fn execute_with_retry(&self, request: Request, max_retries: u32) -> Result<Response> {
        retry_with_backoff(max_retries, self.backoff, || {
            let attempt = request.try_clone();
            async move {
                match attempt {
                    Some(request) => self.execute(request).await,
                    None => Err(Error::InvalidRequest(
                        "request body cannot be cloned for retry".to_string(),
                    )),
                }
            }
        })
        .await
    }

    /// Send a request using the configured number of attempts
    pub async fn execute_with_default_retry(&self, request: Request) -> Result<Response> {
        self.execute_with_retry(request, self.max_retries).await
    }
}

/// Run `operation` up to `max_retries` times with linear backoff
///
/// Returns the first success. When every attempt fails, the last error is
/// returned wrapped with the attempt count. `max_retries == 0` fails without
/// running the operation.
pub async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff: Duration,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if max_retries == 0 {
        return Err(Error::InvalidRequest(
            "max retries should be greater than 0".to_string(),
        ));
    }

    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_retries => {
                return Err(Error::RetriesExhausted {
                    attempts: max_retries,
                    source: Box::new(err),
                });
            }
            Err(err) => {
                warn!("attempt {}: {}", attempt, err);
                tokio::time::sleep(backoff * attempt).await;
                attempt += 1;
            }
        }
    }
}
