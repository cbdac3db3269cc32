//! Queryable HTML documents
//!
//! Thin layer over `scraper` giving the lookups the entity extractors need:
//! first match, all matches, attribute-or-default and trimmed text. A lookup
//! that matches nothing yields an empty string rather than an error.

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::warn;

use super::text::clean_url;

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!("Failed to parse selector '{}': {}", css, e);
            None
        }
    }
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw response bytes, replacing invalid UTF-8
    pub fn parse(bytes: &[u8]) -> Self {
        Self::parse_str(&String::from_utf8_lossy(bytes))
    }

    /// Parse an HTML string
    pub fn parse_str(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The root of the document as a queryable node
    pub fn root(&self) -> Node<'_> {
        Node {
            element: self.html.root_element(),
        }
    }

    /// Trimmed text of the first element matching `css`
    ///
    /// Only the first match is read; text of later matches is not appended.
    pub fn text(&self, css: &str) -> String {
        self.root().text(css)
    }

    /// Attribute of the first element matching `css`, or `default`
    pub fn attr_or(&self, css: &str, attr: &str, default: &str) -> String {
        self.root().attr_or(css, attr, default)
    }

    /// First element matching `css`
    pub fn find(&self, css: &str) -> Option<Node<'_>> {
        self.root().find(css)
    }

    /// All elements matching `css`, in document order
    pub fn find_all(&self, css: &str) -> Vec<Node<'_>> {
        self.root().find_all(css)
    }

    /// The page's canonical link without query, falling back to `url`
    pub fn canonical_url(&self, url: &str) -> String {
        let canonical = self.attr_or("link[rel='canonical']", "href", "");
        if canonical.is_empty() {
            clean_url(url)
        } else {
            clean_url(&canonical)
        }
    }

    /// First string value stored under `key` in the page's JSON-LD blocks
    pub fn json_ld_string(&self, key: &str) -> Option<String> {
        self.find_all("script[type='application/ld+json']")
            .into_iter()
            .filter_map(|node| serde_json::from_str::<Value>(&node.raw_text()).ok())
            .find_map(|value| value.get(key).and_then(Value::as_str).map(String::from))
    }
}

/// An element inside a `Document`
#[derive(Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl<'a> Node<'a> {
    /// First descendant matching `css`
    pub fn find(&self, css: &str) -> Option<Node<'a>> {
        let selector = selector(css)?;
        self.element
            .select(&selector)
            .next()
            .map(|element| Node { element })
    }

    /// All descendants matching `css`
    pub fn find_all(&self, css: &str) -> Vec<Node<'a>> {
        let Some(selector) = selector(css) else {
            return Vec::new();
        };
        self.element
            .select(&selector)
            .map(|element| Node { element })
            .collect()
    }

    /// Trimmed text of the first descendant matching `css`; later matches are ignored
    pub fn text(&self, css: &str) -> String {
        self.find(css).map(|node| node.own_text()).unwrap_or_default()
    }

    /// Attribute of the first descendant matching `css`, or `default`
    pub fn attr_or(&self, css: &str, attr: &str, default: &str) -> String {
        self.find(css)
            .and_then(|node| node.attr(attr))
            .map(|value| value.trim().to_string())
            .unwrap_or_else(|| default.to_string())
    }

    /// Attribute of this element
    pub fn attr(&self, attr: &str) -> Option<&'a str> {
        self.element.value().attr(attr)
    }

    /// Trimmed text content of this element
    pub fn own_text(&self) -> String {
        trimmed_text(self.element)
    }

    /// Untrimmed text content of this element
    pub fn raw_text(&self) -> String {
        self.element.text().collect()
    }
}
