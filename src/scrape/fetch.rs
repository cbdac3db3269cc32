//! Generic fetch-classify-parse pipeline
//!
//! Every entity kind is fetched the same way: a GET with identity encoding
//! goes through the retrying client, the status is classified, and a 2xx body
//! is parsed into a `Document` that the entity's `Extract` impl maps to fields.

use std::fmt::Debug;

use tracing::{debug, info, instrument};

use super::client::ScrapeClient;
use super::document::Document;
use crate::error::{Error, HttpError, Result};
use crate::record::Record;

/// Field mapping from a parsed page to a record
///
/// Extraction never fails: fields the page lacks keep their zero value.
pub trait Extract: Record {
    /// Build a record from the document fetched from `url`
    fn extract(doc: &Document, url: &str) -> Self;
}

/// Fetch `url` and hand the parsed document to `parse`
///
/// A 429 response yields the rate-limit error; any other non-2xx status
/// yields an `HttpError` carrying that status.
#[instrument(skip(client, parse, debug), level = "debug")]
pub async fn fetch_document<T, F>(
    client: &ScrapeClient,
    url: &str,
    debug: bool,
    parse: F,
) -> Result<T>
where
    F: FnOnce(&Document) -> T,
{
    if debug {
        info!("going to fetch {}", url);
    }

    let request = client.get(url)?;
    let response = client.execute_with_default_retry(request).await?;

    let status = response.status();
    debug!("{} answered {}", url, status);
    if !status.is_success() {
        return Err(HttpError::from_status(status, url).into());
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| Error::HtmlParse(format!("failed to read document from {}: {}", url, e)))?;

    let document = Document::parse(&body);
    Ok(parse(&document))
}

/// Fetch and extract a single record
pub async fn fetch_record<R>(client: &ScrapeClient, url: &str, debug: bool) -> Result<R>
where
    R: Extract + Debug,
{
    let record = fetch_document(client, url, debug, |doc| R::extract(doc, url)).await?;
    if debug {
        info!("{} from {}: {:?}", R::NAME, url, record);
    }
    Ok(record)
}
