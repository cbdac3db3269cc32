use crate::record::{FieldSpec, FieldValue, Record};
use crate::scrape::text::{clean_url, extract_labelled_count, parse_count};
use crate::scrape::{Document, Extract};

/// A LinkedIn Pulse article
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pulse {
    pub author: String,
    pub author_linkedin_url: String,
    pub author_title: String,
    pub comment_count: u64,
    pub author_following_count: u64,
    pub likes_count: u64,
    pub publish_date: String,
    pub pulse_link: String,
    pub title: String,
}

static SCHEMA: [FieldSpec<Pulse>; 9] = [
    FieldSpec::new("author", |p| FieldValue::Text(&p.author)),
    FieldSpec::new("authorLinkedInUrl", |p| {
        FieldValue::Text(&p.author_linkedin_url)
    }),
    FieldSpec::new("authorTitle", |p| FieldValue::Text(&p.author_title)),
    FieldSpec::new("commentCount", |p| FieldValue::Count(p.comment_count)),
    FieldSpec::new("authorFollowingCount", |p| {
        FieldValue::Count(p.author_following_count)
    }),
    FieldSpec::new("likesCount", |p| FieldValue::Count(p.likes_count)),
    FieldSpec::new("publishDate", |p| FieldValue::Text(&p.publish_date)),
    FieldSpec::new("pulseLink", |p| FieldValue::Text(&p.pulse_link)),
    FieldSpec::new("title", |p| FieldValue::Text(&p.title)),
];

impl Record for Pulse {
    const NAME: &'static str = "pulse";

    fn schema() -> &'static [FieldSpec<Self>] {
        &SCHEMA
    }
}

impl Extract for Pulse {
    fn extract(doc: &Document, url: &str) -> Self {
        let author_link = doc.attr_or(".base-main-card a.base-card__full-link", "href", "");
        let publish_date = doc
            .json_ld_string("datePublished")
            .unwrap_or_else(|| doc.text(".base-main-card__metadata time"));
        Pulse {
            author: doc.text(".base-main-card__title"),
            author_linkedin_url: if author_link.is_empty() {
                String::new()
            } else {
                clean_url(&author_link)
            },
            author_title: doc.text(".base-main-card__subtitle"),
            comment_count: extract_labelled_count(
                &doc.text("a[data-test-id='social-actions__comments']"),
                "comment",
            )
            .unwrap_or_default(),
            author_following_count: extract_labelled_count(
                &doc.text(".base-main-card__metadata"),
                "followers",
            )
            .unwrap_or_default(),
            likes_count: parse_count(
                &doc.text("span[data-test-id='social-actions__reaction-count']"),
            )
            .unwrap_or_default(),
            publish_date,
            pulse_link: doc.canonical_url(url),
            title: doc.text("h1.pulse-title"),
        }
    }
}
