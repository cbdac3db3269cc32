//! # Scrape Client Module
//!
//! HTTP plumbing shared by every fetch: a paced, identity-rotating client with
//! bounded retries, a queryable HTML document, and the generic pipeline that
//! turns a URL into a populated record.
//!
//! ## Key Components
//!
//! - `ScrapeClient`: pacing jitter, user agent and proxy rotation, retries
//! - `ClientConfig`: configuration for the client, built with `ClientConfig::builder()`
//! - `Document`: parsed HTML with first/all/attribute/text lookups
//! - `Extract`: per-entity field mapping from a `Document`
//! - `fetch_record`: fetch, classify the status, parse and extract
//!
//! ## Status classification
//!
//! - 2xx: the body is parsed and extracted; missing fields stay empty
//! - 429: the rate-limit error, which callers treat as "stop now"
//! - anything else: an `HttpError` carrying the status
//!
//! Retries cover transport failures only. A response with any status is a
//! completed exchange and is classified once.

mod client;
mod config;
mod document;
mod fetch;
pub mod text;

pub use client::{ScrapeClient, retry_with_backoff};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_USER_AGENTS};
pub use document::{Document, Node};
pub use fetch::{Extract, fetch_document, fetch_record};
