//! Sequential batch fetching of search results

use std::fmt::Debug;

use tracing::{info, instrument, warn};

use super::engine::SearchEngine;
use super::options::SearchOptions;
use crate::entity::{Company, Post, Pulse, User};
use crate::error::Error;
use crate::record::Collection;
use crate::scrape::{Extract, ScrapeClient, fetch_record};

/// Records gathered by a batch, plus the error that ended or marred it
///
/// A batch can both collect records and fail: a rate limit stops it early
/// and other per-URL failures are aggregated while the rest is fetched.
#[derive(Debug)]
pub struct BatchOutcome<R> {
    pub records: Collection<R>,
    pub error: Option<Error>,
}

impl<R> BatchOutcome<R> {
    pub fn ok(records: Collection<R>) -> Self {
        Self {
            records,
            error: None,
        }
    }

    pub fn failed(records: Collection<R>, error: Error) -> Self {
        Self {
            records,
            error: Some(error),
        }
    }

    /// Whether the batch was cut short by a rate limit
    pub fn is_rate_limited(&self) -> bool {
        self.error.as_ref().is_some_and(Error::is_rate_limited)
    }
}

/// An entity kind that can be found with a site-restricted web search
pub trait Searchable: Extract + Debug {
    /// LinkedIn path the search is restricted to
    const SITE_PATH: &'static str;
}

impl Searchable for Company {
    const SITE_PATH: &'static str = "company";
}

impl Searchable for Post {
    const SITE_PATH: &'static str = "posts";
}

impl Searchable for Pulse {
    const SITE_PATH: &'static str = "pulse";
}

impl Searchable for User {
    const SITE_PATH: &'static str = "in";
}

/// Fetch every URL in order, one at a time
///
/// A rate-limited URL ends the batch at once and later URLs are never
/// requested. Any other failure is recorded as `"<url>: <error>"` and the
/// batch moves on; recorded failures come back joined with `"; "`.
#[instrument(skip(client, urls, options), fields(count = urls.len()))]
pub async fn fetch_all<R>(
    client: &ScrapeClient,
    urls: &[String],
    options: &SearchOptions,
) -> BatchOutcome<R>
where
    R: Extract + Debug,
{
    let mut records = Collection::new();
    let mut failures = Vec::new();

    for (i, url) in urls.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(options.interval).await;
        }

        match fetch_record::<R>(client, url, options.debug).await {
            Ok(record) => records.push(record),
            Err(err) if err.is_rate_limited() => {
                warn!("rate limited at {}, stopping after {} records", url, records.len());
                return BatchOutcome::failed(records, err);
            }
            Err(err) => {
                warn!("failed to fetch {}: {}", url, err);
                failures.push(format!("{}: {}", url, err));
            }
        }
    }

    if failures.is_empty() {
        BatchOutcome::ok(records)
    } else {
        BatchOutcome::failed(records, Error::Batch(failures.join("; ")))
    }
}

/// Search for pages of kind `R` and fetch each result
pub async fn search_records<R, E>(
    client: &ScrapeClient,
    engine: &E,
    options: &SearchOptions,
) -> BatchOutcome<R>
where
    R: Searchable,
    E: SearchEngine + ?Sized,
{
    if let Err(err) = options.require_keywords() {
        return BatchOutcome::failed(Collection::new(), err);
    }

    let query = options.site_query(R::SITE_PATH);
    let urls = match engine.search(&query, options.limit).await {
        Ok(urls) => urls,
        Err(err) => return BatchOutcome::failed(Collection::new(), err),
    };
    info!("{} candidate {} pages for {:?}", urls.len(), R::NAME, query);

    fetch_all(client, &urls, options).await
}

pub async fn search_companies<E: SearchEngine + ?Sized>(
    client: &ScrapeClient,
    engine: &E,
    options: &SearchOptions,
) -> BatchOutcome<Company> {
    search_records(client, engine, options).await
}

pub async fn search_posts<E: SearchEngine + ?Sized>(
    client: &ScrapeClient,
    engine: &E,
    options: &SearchOptions,
) -> BatchOutcome<Post> {
    search_records(client, engine, options).await
}

pub async fn search_pulses<E: SearchEngine + ?Sized>(
    client: &ScrapeClient,
    engine: &E,
    options: &SearchOptions,
) -> BatchOutcome<Pulse> {
    search_records(client, engine, options).await
}

pub async fn search_users<E: SearchEngine + ?Sized>(
    client: &ScrapeClient,
    engine: &E,
    options: &SearchOptions,
) -> BatchOutcome<User> {
    search_records(client, engine, options).await
}
