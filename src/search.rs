//! # Search Module
//!
//! Keyword search over LinkedIn pages. Companies, posts, pulses and users are
//! found through a site-restricted web search and then fetched one by one;
//! jobs come from LinkedIn's paginated guest job search.
//!
//! ## Key Components
//!
//! - `SearchOptions`: keywords, regions, pause interval and result limit
//! - `SearchEngine`: the web search returning candidate URLs (`DuckDuckGo`)
//! - `search_records`: search then fetch every result sequentially
//! - `search_jobs`: walk the job search pages
//! - `BatchOutcome`: the records gathered plus the error, if any
//!
//! ## Failure handling
//!
//! Batches never run requests concurrently. A rate limit (HTTP 429) ends a
//! batch immediately with the records gathered so far. Other per-URL failures
//! are collected into one error while the remaining URLs are still fetched;
//! a failing job search page ends the job search.

mod engine;
mod jobs;
mod options;
mod orchestrator;

pub use engine::{DUCKDUCKGO_URL, DuckDuckGo, SearchEngine};
pub use jobs::{JOB_MAX_OFFSET, JOB_PAGE_SIZE, JOB_SEARCH_URL, search_jobs, search_jobs_at};
pub use options::{SearchOptions, SearchOptionsBuilder};
pub use orchestrator::{
    BatchOutcome, Searchable, fetch_all, search_companies, search_posts, search_pulses,
    search_records, search_users,
};
