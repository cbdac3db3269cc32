use crate::record::{FieldSpec, FieldValue, Record};
use crate::scrape::text::{clean_url, extract_labelled_count, parse_count};
use crate::scrape::{Document, Extract};

const ACTOR_LINK: &str = "a[data-tracking-control-name='public_post_feed-actor-name']";

/// A LinkedIn feed post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    pub activity_urn: String,
    pub author: String,
    pub author_linkedin_url: String,
    pub author_title: String,
    pub comment_count: u64,
    pub company_follower_count: u64,
    pub freshness: String,
    pub likes_count: u64,
    pub post_link: String,
    pub publish_date: String,
    pub share_urn: String,
}

static SCHEMA: [FieldSpec<Post>; 11] = [
    FieldSpec::new("activityURN", |p| FieldValue::Text(&p.activity_urn)),
    FieldSpec::new("author", |p| FieldValue::Text(&p.author)),
    FieldSpec::new("authorLinkedInUrl", |p| {
        FieldValue::Text(&p.author_linkedin_url)
    }),
    FieldSpec::new("authorTitle", |p| FieldValue::Text(&p.author_title)),
    FieldSpec::new("commentCount", |p| FieldValue::Count(p.comment_count)),
    FieldSpec::new("companyFollowerCount", |p| {
        FieldValue::Count(p.company_follower_count)
    }),
    FieldSpec::new("freshness", |p| FieldValue::Text(&p.freshness)),
    FieldSpec::new("likesCount", |p| FieldValue::Count(p.likes_count)),
    FieldSpec::new("postLink", |p| FieldValue::Text(&p.post_link)),
    FieldSpec::new("publishDate", |p| FieldValue::Text(&p.publish_date)),
    FieldSpec::new("shareURN", |p| FieldValue::Text(&p.share_urn)),
];

impl Record for Post {
    const NAME: &'static str = "post";

    fn schema() -> &'static [FieldSpec<Self>] {
        &SCHEMA
    }
}

impl Extract for Post {
    fn extract(doc: &Document, url: &str) -> Self {
        let author_link = doc.attr_or(ACTOR_LINK, "href", "");
        let subtitle = doc.text(".base-main-feed-card__entity-lockup p");
        // company actors show a follower count where members show a headline
        let company_followers = extract_labelled_count(&subtitle, "followers");
        Post {
            activity_urn: doc.attr_or("[data-activity-urn]", "data-activity-urn", ""),
            author: doc.text(ACTOR_LINK),
            author_linkedin_url: if author_link.is_empty() {
                String::new()
            } else {
                clean_url(&author_link)
            },
            author_title: if company_followers.is_some() {
                String::new()
            } else {
                subtitle
            },
            comment_count: extract_labelled_count(
                &doc.text("a[data-test-id='social-actions__comments']"),
                "comment",
            )
            .unwrap_or_default(),
            company_follower_count: company_followers.unwrap_or_default(),
            freshness: doc.text(".base-main-feed-card__entity-lockup time"),
            likes_count: parse_count(
                &doc.text("span[data-test-id='social-actions__reaction-count']"),
            )
            .unwrap_or_default(),
            post_link: doc.canonical_url(url),
            publish_date: doc.json_ld_string("datePublished").unwrap_or_default(),
            share_urn: doc.attr_or("[data-attributed-urn]", "data-attributed-urn", ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_company_post() {
        let doc = Document::parse_str(
            r#"<html><head>
                 <link rel="canonical" href="https://www.linkedin.com/posts/acme_rust-activity-7110-abcd">
                 <script type="application/ld+json">{"@type":"SocialMediaPosting","datePublished":"2023-09-20T08:00:00.000Z"}</script>
               </head><body>
                 <article data-activity-urn="urn:li:activity:7110" data-attributed-urn="urn:li:share:7109">
                   <div class="base-main-feed-card__entity-lockup">
                     <a data-tracking-control-name="public_post_feed-actor-name" href="https://www.linkedin.com/company/acme?trk=public_post">
                       Acme
                     </a>
                     <p>12,345 followers</p>
                     <time>3w</time>
                   </div>
                   <span data-test-id="social-actions__reaction-count">1,024</span>
                   <a data-test-id="social-actions__comments">56 Comments</a>
                 </article>
               </body></html>"#,
        );
        let post = Post::extract(&doc, "https://www.linkedin.com/posts/whatever?utm=1");
        assert_eq!(
            post,
            Post {
                activity_urn: "urn:li:activity:7110".to_string(),
                author: "Acme".to_string(),
                author_linkedin_url: "https://www.linkedin.com/company/acme".to_string(),
                author_title: String::new(),
                comment_count: 56,
                company_follower_count: 12_345,
                freshness: "3w".to_string(),
                likes_count: 1024,
                post_link: "https://www.linkedin.com/posts/acme_rust-activity-7110-abcd"
                    .to_string(),
                publish_date: "2023-09-20T08:00:00.000Z".to_string(),
                share_urn: "urn:li:share:7109".to_string(),
            }
        );
    }

    #[test]
    fn test_extract_member_post_without_reactions() {
        let doc = Document::parse_str(
            r#"<div class="base-main-feed-card__entity-lockup">
                 <a data-tracking-control-name="public_post_feed-actor-name" href="https://www.linkedin.com/in/jane">Jane Doe</a>
                 <p>Staff Engineer at Acme</p>
               </div>"#,
        );
        let post = Post::extract(&doc, "https://www.linkedin.com/posts/jane_activity-1?trk=x");
        assert_eq!(post.author, "Jane Doe");
        assert_eq!(post.author_title, "Staff Engineer at Acme");
        assert_eq!(post.company_follower_count, 0);
        assert_eq!(post.likes_count, 0);
        assert_eq!(post.comment_count, 0);
        assert_eq!(post.post_link, "https://www.linkedin.com/posts/jane_activity-1");
        assert_eq!(post.publish_date, "");
    }

    #[test]
    fn test_post_json_keeps_zero_counts() {
        let value: serde_json::Value = serde_json::from_str(&Post::default().json()).unwrap();
        assert_eq!(value["commentCount"], 0);
        assert_eq!(value["likesCount"], 0);
        assert_eq!(value["author"], "");
    }
}
