use regex::Regex;

use crate::record::{FieldSpec, FieldValue, Record};
use crate::scrape::{Document, Extract};

/// A LinkedIn member profile
///
/// Profiles show connection and follower counts as display text such as
/// `500+` or `1K`, so both are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub connection_count: String,
    pub follower_count: String,
    pub user_title: String,
    pub location: String,
    pub name: String,
    pub user_link: String,
}

static SCHEMA: [FieldSpec<User>; 6] = [
    FieldSpec::new("connectionCount", |u| {
        FieldValue::Text(&u.connection_count)
    }),
    FieldSpec::new("followerCount", |u| FieldValue::Text(&u.follower_count)),
    FieldSpec::new("userTitle", |u| FieldValue::Text(&u.user_title)),
    FieldSpec::new("location", |u| FieldValue::Text(&u.location)),
    FieldSpec::new("name", |u| FieldValue::Text(&u.name)),
    FieldSpec::new("userLink", |u| FieldValue::Text(&u.user_link)),
];

impl Record for User {
    const NAME: &'static str = "user";

    fn schema() -> &'static [FieldSpec<Self>] {
        &SCHEMA
    }
}

/// The count in front of `label` in a subline item such as `500+ connections`
fn count_text(item: &str, label: &str) -> Option<String> {
    let re = Regex::new(&format!(r"(?i)^\s*(\S+)\s+{}", regex::escape(label))).ok()?;
    Some(re.captures(item)?.get(1)?.as_str().to_string())
}

impl Extract for User {
    fn extract(doc: &Document, url: &str) -> Self {
        let mut user = User {
            user_title: doc.text(".top-card-layout__headline"),
            name: doc.text(".top-card-layout__title"),
            user_link: doc.canonical_url(url),
            ..Default::default()
        };

        for item in doc.find_all(".top-card__subline-item") {
            let text = item.own_text();
            if let Some(count) = count_text(&text, "connection") {
                user.connection_count = count;
            } else if let Some(count) = count_text(&text, "follower") {
                user.follower_count = count;
            } else if user.location.is_empty() {
                user.location = text;
            }
        }

        user
    }
}
