//! # Scrape Client Configuration Module
//!
//! Configuration for the pacing, identity rotation and retry behaviour of the
//! scrape client, using the same builder pattern as the other configuration
//! types in this crate.
//!
//! ## Defaults
//!
//! - 100 ms base pacing (each request waits between 1x and 2x this)
//! - A pool of current desktop browser user agents
//! - No proxies (direct connection)
//! - 30 second transport timeout
//! - Linear retry backoff in steps of one second, three attempts

use std::time::Duration;

/// Default user agents rotated across requests
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Configuration for the scrape client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base pacing delay before every request
    pub pacing: Duration,

    /// User agents to rotate through; must not be empty
    pub user_agents: Vec<String>,

    /// Proxy URLs to rotate through; empty means direct connection
    pub proxies: Vec<String>,

    /// Transport timeout per request
    pub timeout: Duration,

    /// Backoff step; attempt `n` failing waits `n` steps
    pub backoff: Duration,

    /// Attempts made by fetches that retry
    pub max_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            pacing: Duration::from_millis(100),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
            proxies: Vec::new(),
            timeout: Duration::from_secs(30),
            backoff: Duration::from_secs(1),
            max_retries: 3,
        }
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Set the base pacing delay
    pub fn pacing(mut self, pacing: Duration) -> Self {
        self.config.pacing = pacing;
        self
    }

    /// Replace the user agent pool
    pub fn user_agents(mut self, user_agents: Vec<String>) -> Self {
        self.config.user_agents = user_agents;
        self
    }

    /// Set the proxy pool
    pub fn proxies(mut self, proxies: Vec<String>) -> Self {
        self.config.proxies = proxies;
        self
    }

    /// Set the transport timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry backoff step
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.config.backoff = backoff;
        self
    }

    /// Set the number of attempts for retrying fetches
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl ClientConfig {
    /// Create a new builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}
