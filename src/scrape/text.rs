//! Text helpers shared by the entity extractors

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,3}(?:,\d{3})+|\d+").expect("number pattern is valid")
});

/// Drop the query string from a URL; unparseable input is returned as is
pub fn clean_url(link: &str) -> String {
    match Url::parse(link) {
        Ok(mut url) => {
            url.set_query(None);
            url.to_string()
        }
        Err(_) => link.to_string(),
    }
}

/// Parse the first number in `text`, ignoring thousands separators
///
/// `"1,234"` parses as 1234. Returns `None` when there are no digits.
pub fn parse_count(text: &str) -> Option<u64> {
    let found = NUMBER.find(text)?;
    found.as_str().replace(',', "").parse().ok()
}

/// Extract the number in front of `label`, e.g. `"1,234 followers"` → 1234
///
/// Matching is case-insensitive. Returns `None` when the label does not
/// follow a number anywhere in `text`.
pub fn extract_labelled_count(text: &str, label: &str) -> Option<u64> {
    let pattern = format!(
        r"(?i)(\d{{1,3}}(?:,\d{{3}})+|\d+)\s*{}",
        regex::escape(label)
    );
    let re = Regex::new(&pattern).ok()?;
    let captures = re.captures(text)?;
    captures.get(1)?.as_str().replace(',', "").parse().ok()
}

/// Last `:`-separated segment of a URN, e.g. `urn:li:jobPosting:42` → `42`
pub fn urn_id(urn: &str) -> String {
    urn.rsplit(':').next().unwrap_or_default().trim().to_string()
}
