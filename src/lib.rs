//! # lictl - LinkedIn scraping for Rust
//!
//! This crate fetches public LinkedIn pages (companies, jobs, posts, pulses and
//! user profiles), extracts structured records from them and serializes the
//! results as JSON or `|`-separated CSV.
//!
//! ## Features
//!
//! - Reflection-free records: each entity declares a static field table that
//!   drives JSON, CSV header and CSV row rendering
//! - Rate-limited HTTP client with pacing jitter, user agent and proxy rotation
//!   and linear retry backoff
//! - Rate limits (HTTP 429) surface as a distinguished error that stops a batch
//! - Keyword search through a web search engine, and paginated job search
//! - Timestamped, never-overwritten output files
//! - Async API with Tokio; every batch runs its requests strictly in sequence
//!
//! ## Example
//!
//! ```rust,no_run
//! use lictl::entity::Company;
//! use lictl::scrape::{ClientConfig, ScrapeClient, fetch_record};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ScrapeClient::new(ClientConfig::default())?;
//!
//!     let url = "https://www.linkedin.com/company/linkedin";
//!     match fetch_record::<Company>(&client, url, false).await {
//!         Ok(company) => println!("{}", lictl::record::Record::json(&company)),
//!         Err(err) if err.is_rate_limited() => eprintln!("slow down"),
//!         Err(err) => eprintln!("Error: {}", err),
//!     }
//!     Ok(())
//! }
//! ```

mod error;

pub mod entity;
pub mod output;
pub mod record;
pub mod scrape;
pub mod search;

pub use error::{Error, HttpError, Result};

/// Re-export of the types most callers need
pub mod prelude {
    pub use crate::entity::{Company, Job, Post, Pulse, User};
    pub use crate::error::{Error, HttpError, Result};
    pub use crate::output::OutputFormat;
    pub use crate::record::{Collection, Record};
    pub use crate::scrape::{ClientConfig, Extract, ScrapeClient};
    pub use crate::search::{BatchOutcome, SearchOptions};
}
