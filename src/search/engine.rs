//! External web search returning candidate result URLs

use std::future::Future;
use std::pin::Pin;

use tracing::{debug, instrument};
use url::Url;

use crate::error::{Error, Result};
use crate::scrape::{Document, ScrapeClient, fetch_document};

/// HTML endpoint of DuckDuckGo
pub const DUCKDUCKGO_URL: &str = "https://html.duckduckgo.com/html/";

/// A web search returning result URLs in ranking order
pub trait SearchEngine {
    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>>;
}

/// DuckDuckGo's JavaScript-free results pages, fetched through the scrape client
///
/// Result pages are followed through their "Next" form until `limit` links
/// are collected, a page adds no new link, or there is no next page.
#[derive(Debug, Clone)]
pub struct DuckDuckGo {
    client: ScrapeClient,
    base_url: String,
}

impl DuckDuckGo {
    pub fn new(client: ScrapeClient) -> Self {
        Self::with_base_url(client, DUCKDUCKGO_URL)
    }

    pub fn with_base_url(client: ScrapeClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn run(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let mut links: Vec<String> = Vec::new();
        if limit == 0 {
            return Ok(links);
        }

        let mut params = vec![("q".to_string(), query.to_string())];
        let mut page_number = 1;
        loop {
            let url = Url::parse_with_params(&self.base_url, &params).map_err(|e| {
                Error::Search(format!("invalid search URL {}: {}", self.base_url, e))
            })?;

            let base = url.clone();
            let page = fetch_document(&self.client, url.as_str(), false, move |doc| {
                ResultPage::parse(doc, &base)
            })
            .await?;

            let before = links.len();
            for link in page.links {
                if links.len() >= limit {
                    break;
                }
                if !links.contains(&link) {
                    links.push(link);
                }
            }
            debug!(
                "page {} added {} links ({} total)",
                page_number,
                links.len() - before,
                links.len()
            );

            if links.len() >= limit || links.len() == before {
                break;
            }
            match page.next {
                Some(next) => params = with_query(next, query),
                None => break,
            }
            page_number += 1;
        }

        Ok(links)
    }
}

impl SearchEngine for DuckDuckGo {
    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>> {
        Box::pin(self.run(query, limit))
    }
}

/// Resolve a result anchor to its target, unwrapping `uddg=` redirects
fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let link = base.join(href).ok()?;
    let target = match link.query_pairs().find(|(key, _)| key == "uddg") {
        Some((_, target)) => Url::parse(&target).ok()?,
        None => link,
    };
    matches!(target.scheme(), "http" | "https").then_some(target)
}

/// Result links and the follow-up form of one results page
struct ResultPage {
    links: Vec<String>,
    next: Option<Vec<(String, String)>>,
}

impl ResultPage {
    fn parse(doc: &Document, base: &Url) -> Self {
        Self {
            links: result_links(doc, base),
            next: next_page_params(doc),
        }
    }
}

/// Resolved result links in ranking order, without duplicates
fn result_links(doc: &Document, base: &Url) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    for anchor in doc.find_all("a.result__a") {
        let Some(target) = anchor.attr("href").and_then(|href| resolve_link(href, base)) else {
            continue;
        };
        let target = target.to_string();
        if !links.contains(&target) {
            links.push(target);
        }
    }
    links
}

/// Hidden fields of the "Next" navigation form, if the page has one
fn next_page_params(doc: &Document) -> Option<Vec<(String, String)>> {
    let form = doc.find_all(".nav-link form").into_iter().find(|form| {
        form.find_all("input[type='submit']")
            .iter()
            .any(|button| button.attr("value").is_some_and(|v| v.trim() == "Next"))
    })?;

    let params = form
        .find_all("input[type='hidden']")
        .into_iter()
        .filter_map(|input| {
            let name = input.attr("name")?;
            Some((name.to_string(), input.attr("value").unwrap_or_default().to_string()))
        })
        .collect();
    Some(params)
}

/// Make sure a follow-up request still carries the query
fn with_query(mut params: Vec<(String, String)>, query: &str) -> Vec<(String, String)> {
    if !params.iter().any(|(name, _)| name == "q") {
        params.insert(0, ("q".to_string(), query.to_string()));
    }
    params
}
