//! Paginated guest job search

use tracing::{info, instrument, warn};
use url::Url;

use super::options::SearchOptions;
use super::orchestrator::BatchOutcome;
use crate::entity::Job;
use crate::error::{Error, Result};
use crate::record::Collection;
use crate::scrape::{ScrapeClient, fetch_document};

/// Guest job search endpoint, paginated with `start`
pub const JOB_SEARCH_URL: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";

/// Jobs returned per page
pub const JOB_PAGE_SIZE: usize = 25;

/// Highest `start` offset requested
pub const JOB_MAX_OFFSET: usize = 975;

fn page_url(base_url: &str, options: &SearchOptions, offset: usize) -> Result<String> {
    let url = Url::parse_with_params(
        base_url,
        &[
            ("location", options.regions.join(",")),
            ("keywords", options.keywords.join(",")),
            ("start", offset.to_string()),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid job search URL {}: {}", base_url, e)))?;
    Ok(url.into())
}

/// Search LinkedIn jobs in the given regions
pub async fn search_jobs(client: &ScrapeClient, options: &SearchOptions) -> BatchOutcome<Job> {
    search_jobs_at(client, JOB_SEARCH_URL, options).await
}

/// Search jobs against an alternative endpoint with the same paging contract
///
/// Pages are requested one at a time, `interval` apart, until a page holds no
/// job cards or the maximum offset has been fetched. A failing page ends the
/// search and the jobs gathered so far are returned with the error.
#[instrument(skip(client, options), fields(regions = ?options.regions, keywords = ?options.keywords))]
pub async fn search_jobs_at(
    client: &ScrapeClient,
    base_url: &str,
    options: &SearchOptions,
) -> BatchOutcome<Job> {
    if let Err(err) = options
        .require_keywords()
        .and_then(|_| options.require_regions())
    {
        return BatchOutcome::failed(Collection::new(), err);
    }

    let mut jobs = Collection::new();
    for offset in (0..=JOB_MAX_OFFSET).step_by(JOB_PAGE_SIZE) {
        if offset > 0 {
            tokio::time::sleep(options.interval).await;
        }

        let url = match page_url(base_url, options, offset) {
            Ok(url) => url,
            Err(err) => return BatchOutcome::failed(jobs, err),
        };

        let page = match fetch_document(client, &url, options.debug, Job::extract_listing).await {
            Ok(page) => page,
            Err(err) => {
                if err.is_rate_limited() {
                    warn!("rate limited at offset {}, stopping after {} jobs", offset, jobs.len());
                } else {
                    warn!("job search failed at offset {}: {}", offset, err);
                }
                return BatchOutcome::failed(jobs, err);
            }
        };

        if page.is_empty() {
            info!("no more jobs after offset {}", offset);
            break;
        }
        jobs.extend(page);
    }

    BatchOutcome::ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::ClientConfig;
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use std::time::Duration;

    fn test_client() -> ScrapeClient {
        let config = ClientConfig::builder()
            .pacing(Duration::ZERO)
            .backoff(Duration::from_millis(1))
            .build();
        ScrapeClient::new(config).unwrap()
    }

    fn options() -> SearchOptions {
        SearchOptions::builder()
            .keywords(["rust", "tokio"])
            .regions(["Belgium"])
            .interval(Duration::from_millis(1))
            .build()
    }

    fn cards(titles: &[&str]) -> String {
        let items: String = titles
            .iter()
            .map(|title| {
                format!(
                    r#"<li><div data-entity-urn="urn:li:jobPosting:{0}">
                         <h3 class="base-search-card__title">{0}</h3>
                       </div></li>"#,
                    title
                )
            })
            .collect();
        format!("<html><body><ul>{}</ul></body></html>", items)
    }

    async fn page(server: &mut ServerGuard, start: usize, status: usize, body: String) -> Mock {
        server
            .mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("start".into(), start.to_string()))
            .with_status(status)
            .with_body(body)
            .expect(1)
            .create_async()
            .await
    }

    #[test]
    fn test_page_url() {
        let url = page_url(JOB_SEARCH_URL, &options(), 50).unwrap();
        assert_eq!(
            url,
            "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search?location=Belgium&keywords=rust%2Ctokio&start=50"
        );
    }

    #[tokio::test]
    async fn test_stops_on_empty_page() {
        let mut server = Server::new_async().await;
        let first = page(&mut server, 0, 200, cards(&["1", "2"])).await;
        let second = page(&mut server, 25, 200, cards(&["3"])).await;
        let third = page(&mut server, 50, 200, cards(&[])).await;
        let never = server
            .mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("start".into(), "75".into()))
            .expect(0)
            .create_async()
            .await;

        let base = format!("{}/search", server.url());
        let outcome = search_jobs_at(&test_client(), &base, &options()).await;

        assert!(outcome.error.is_none());
        let urns: Vec<_> = outcome.records.iter().map(|j| j.job_urn.as_str()).collect();
        assert_eq!(urns, vec!["1", "2", "3"]);

        first.assert_async().await;
        second.assert_async().await;
        third.assert_async().await;
        never.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limit_keeps_collected_jobs() {
        let mut server = Server::new_async().await;
        let _first = page(&mut server, 0, 200, cards(&["1", "2"])).await;
        let _second = page(&mut server, 25, 429, String::new()).await;

        let base = format!("{}/search", server.url());
        let outcome = search_jobs_at(&test_client(), &base, &options()).await;

        assert!(outcome.is_rate_limited());
        assert_eq!(outcome.records.len(), 2);
    }

    #[tokio::test]
    async fn test_other_error_stops_paging() {
        let mut server = Server::new_async().await;
        let _first = page(&mut server, 0, 200, cards(&["1"])).await;
        let _second = page(&mut server, 25, 502, String::new()).await;

        let base = format!("{}/search", server.url());
        let outcome = search_jobs_at(&test_client(), &base, &options()).await;

        assert_eq!(outcome.records.len(), 1);
        let err = outcome.error.unwrap();
        assert!(!err.is_rate_limited());
        assert_eq!(err.http().map(|e| e.status_code), Some(502));
    }

    #[tokio::test]
    async fn test_regions_required() {
        let options = SearchOptions::builder().keywords(["rust"]).build();
        let outcome = search_jobs_at(&test_client(), "http://127.0.0.1:9/search", &options).await;
        assert!(matches!(outcome.error, Some(Error::InvalidRequest(_))));
        assert!(outcome.records.is_empty());
    }

    #[test]
    fn test_offsets_cover_forty_pages() {
        let offsets: Vec<_> = (0..=JOB_MAX_OFFSET).step_by(JOB_PAGE_SIZE).collect();
        assert_eq!(offsets.len(), 40);
        assert_eq!(offsets.last(), Some(&975));
    }
}
