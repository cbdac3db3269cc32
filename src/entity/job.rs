use crate::record::{FieldSpec, FieldValue, Record};
use crate::scrape::text::{clean_url, urn_id};
use crate::scrape::{Document, Extract, Node};

/// A LinkedIn job posting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Job {
    pub job_title: String,
    pub company_name: String,
    pub company_linkedin_url: String,
    pub location: String,
    pub date_posted: String,
    pub job_link: String,
    pub job_urn: String,
}

static SCHEMA: [FieldSpec<Job>; 7] = [
    FieldSpec::new("jobTitle", |j| FieldValue::Text(&j.job_title)),
    FieldSpec::new("companyName", |j| FieldValue::Text(&j.company_name)),
    FieldSpec::new("companyLinkedInURL", |j| {
        FieldValue::Text(&j.company_linkedin_url)
    }),
    FieldSpec::new("location", |j| FieldValue::Text(&j.location)),
    FieldSpec::new("datePosted", |j| FieldValue::Text(&j.date_posted)),
    FieldSpec::new("jobLink", |j| FieldValue::Text(&j.job_link)),
    FieldSpec::new("jobURN", |j| FieldValue::Text(&j.job_urn)),
];

impl Record for Job {
    const NAME: &'static str = "job";

    fn schema() -> &'static [FieldSpec<Self>] {
        &SCHEMA
    }
}

/// Numeric id at the end of a job link, e.g. `.../jobs/view/rust-dev-at-acme-3712345678`
fn job_id_from_link(link: &str) -> String {
    let slug = link.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    let id = slug.rsplit('-').next().unwrap_or_default();
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        id.to_string()
    } else {
        String::new()
    }
}

impl Job {
    /// Map one guest job search card, `None` when the card has no title
    fn from_card(card: Node<'_>) -> Option<Self> {
        let job_title = card.text(".base-search-card__title");
        if job_title.is_empty() {
            return None;
        }

        let company_link = card.attr_or("h4 a", "href", "");
        Some(Job {
            job_title,
            company_name: card.text("h4"),
            company_linkedin_url: if company_link.is_empty() {
                String::new()
            } else {
                clean_url(&company_link)
            },
            location: card.text(".job-search-card__location"),
            date_posted: card.attr_or(
                ".job-search-card__listdate, .job-search-card__listdate--new",
                "datetime",
                "",
            ),
            job_link: clean_url(&card.attr_or(".base-card__full-link", "href", "")),
            job_urn: urn_id(&card.attr_or("div[data-entity-urn]", "data-entity-urn", "")),
        })
    }

    /// All job cards on a guest job search results page
    pub fn extract_listing(doc: &Document) -> Vec<Self> {
        doc.find_all("li")
            .into_iter()
            .filter_map(Self::from_card)
            .collect()
    }
}

impl Extract for Job {
    fn extract(doc: &Document, url: &str) -> Self {
        let job_link = doc.canonical_url(url);
        let company_link = doc.attr_or(".topcard__org-name-link", "href", "");
        Job {
            job_title: doc.text(".top-card-layout__title"),
            company_name: doc.text(".topcard__org-name-link"),
            company_linkedin_url: if company_link.is_empty() {
                String::new()
            } else {
                clean_url(&company_link)
            },
            location: doc.text(".topcard__flavor--bullet"),
            date_posted: doc.text(".posted-time-ago__text"),
            job_urn: job_id_from_link(&job_link),
            job_link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body><ul>
          <li>
            <div class="base-card" data-entity-urn="urn:li:jobPosting:3712345678">
              <a class="base-card__full-link" href="https://be.linkedin.com/jobs/view/rust-developer-at-acme-3712345678?refId=abc&trackingId=xyz"></a>
              <h3 class="base-search-card__title"> Rust Developer </h3>
              <h4 class="base-search-card__subtitle">
                <a href="https://www.linkedin.com/company/acme?trk=public_jobs">Acme</a>
              </h4>
              <span class="job-search-card__location">Brussels, Belgium</span>
              <time class="job-search-card__listdate" datetime="2024-01-15">2 weeks ago</time>
            </div>
          </li>
          <li>
            <div class="base-card">
              <h3 class="base-search-card__title">Systems Engineer</h3>
              <h4 class="base-search-card__subtitle">Beta Labs</h4>
              <time class="job-search-card__listdate--new" datetime="2024-01-29">1 day ago</time>
            </div>
          </li>
          <li><div class="not-a-job">Sign in to see more</div></li>
        </ul></body></html>
    "#;

    #[test]
    fn test_extract_listing() {
        let doc = Document::parse_str(LISTING);
        let jobs = Job::extract_listing(&doc);
        assert_eq!(jobs.len(), 2);

        assert_eq!(
            jobs[0],
            Job {
                job_title: "Rust Developer".to_string(),
                company_name: "Acme".to_string(),
                company_linkedin_url: "https://www.linkedin.com/company/acme".to_string(),
                location: "Brussels, Belgium".to_string(),
                date_posted: "2024-01-15".to_string(),
                job_link: "https://be.linkedin.com/jobs/view/rust-developer-at-acme-3712345678"
                    .to_string(),
                job_urn: "3712345678".to_string(),
            }
        );

        // a card without URN or company link keeps those fields empty
        assert_eq!(jobs[1].job_title, "Systems Engineer");
        assert_eq!(jobs[1].company_name, "Beta Labs");
        assert_eq!(jobs[1].company_linkedin_url, "");
        assert_eq!(jobs[1].job_urn, "");
        assert_eq!(jobs[1].date_posted, "2024-01-29");
    }

    #[test]
    fn test_empty_listing() {
        let doc = Document::parse_str("<html><body></body></html>");
        assert!(Job::extract_listing(&doc).is_empty());
    }

    #[test]
    fn test_extract_job_page() {
        let doc = Document::parse_str(
            r#"<html><head>
                 <link rel="canonical" href="https://www.linkedin.com/jobs/view/rust-developer-at-acme-3712345678">
               </head><body>
                 <h1 class="top-card-layout__title">Rust Developer</h1>
                 <a class="topcard__org-name-link" href="https://www.linkedin.com/company/acme?trk=x"> Acme </a>
                 <span class="topcard__flavor topcard__flavor--bullet"> Brussels, Belgium </span>
                 <span class="posted-time-ago__text">2 weeks ago</span>
               </body></html>"#,
        );
        let job = Job::extract(&doc, "https://www.linkedin.com/jobs/view/3712345678?trk=y");
        assert_eq!(job.job_title, "Rust Developer");
        assert_eq!(job.company_name, "Acme");
        assert_eq!(job.company_linkedin_url, "https://www.linkedin.com/company/acme");
        assert_eq!(job.location, "Brussels, Belgium");
        assert_eq!(job.date_posted, "2 weeks ago");
        assert_eq!(
            job.job_link,
            "https://www.linkedin.com/jobs/view/rust-developer-at-acme-3712345678"
        );
        assert_eq!(job.job_urn, "3712345678");
    }

    #[test]
    fn test_job_id_from_link() {
        assert_eq!(job_id_from_link("https://x/jobs/view/dev-at-acme-42"), "42");
        assert_eq!(job_id_from_link("https://x/jobs/view/42/"), "42");
        assert_eq!(job_id_from_link("https://x/jobs/search"), "");
        assert_eq!(job_id_from_link(""), "");
    }
}
