use std::time::Duration;

use crate::error::{Error, Result};

/// Per-invocation search parameters
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Keywords to search for; at least one is required
    pub keywords: Vec<String>,

    /// Regions to search in (job search only)
    pub regions: Vec<String>,

    /// Pause between consecutive pages or result URLs
    pub interval: Duration,

    /// Maximum number of candidate URLs requested from the search engine
    pub limit: usize,

    /// Log every fetched URL and record
    pub debug: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            regions: Vec::new(),
            interval: Duration::from_millis(100),
            limit: 100,
            debug: false,
        }
    }
}

impl SearchOptions {
    /// Create a new builder
    pub fn builder() -> SearchOptionsBuilder {
        SearchOptionsBuilder::new()
    }

    /// Site-restricted query for the given LinkedIn path, e.g. `company`
    pub fn site_query(&self, site_path: &str) -> String {
        format!("site:linkedin.com/{} {}", site_path, self.keywords.join(" "))
    }

    /// Fail unless at least one non-blank keyword is present
    pub fn require_keywords(&self) -> Result<()> {
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(Error::InvalidRequest(
                "at least one keyword is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Fail unless at least one non-blank region is present
    pub fn require_regions(&self) -> Result<()> {
        if self.regions.iter().all(|r| r.trim().is_empty()) {
            return Err(Error::InvalidRequest(
                "at least one region is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for SearchOptions
#[derive(Debug, Default)]
pub struct SearchOptionsBuilder {
    options: SearchOptions,
}

impl SearchOptionsBuilder {
    /// Create a new builder with default options
    pub fn new() -> Self {
        Self {
            options: SearchOptions::default(),
        }
    }

    /// Set the keywords
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the regions
    pub fn regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the pause between pages or URLs
    pub fn interval(mut self, interval: Duration) -> Self {
        self.options.interval = interval;
        self
    }

    /// Set the candidate URL limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.options.limit = limit;
        self
    }

    /// Enable debug logging of fetched URLs and records
    pub fn debug(mut self, debug: bool) -> Self {
        self.options.debug = debug;
        self
    }

    /// Build the options
    pub fn build(self) -> SearchOptions {
        self.options
    }
}
