//! Parsed HTML document adapter
//!
//! Wraps the HTML parser behind the small surface the crawler and the
//! extractors need:
//! - find all elements matching a tag name (or any CSS selector)
//! - read an element's trimmed text or one of its attributes
//! - enumerate the page's followable links
//!
//! Parsing never fails. Malformed markup degrades to the best-effort tree the
//! HTML5 parsing algorithm produces.

use crate::url::resolve_link;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// An immutable parsed view of one fetched page
pub struct Document {
    html: Html,
}

/// A single element inside a [`Document`]
#[derive(Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl Document {
    /// Parses raw page bytes
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use skraper::document::Document;
    ///
    /// let doc = Document::parse(b"<p>one<p>two");
    /// assert_eq!(doc.find_all("p").len(), 2);
    /// ```
    pub fn parse(bytes: &[u8]) -> Self {
        Self::from_html(&String::from_utf8_lossy(bytes))
    }

    /// Parses an HTML string
    pub fn from_html(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Returns every element matching `selector`, in document order
    ///
    /// `selector` is usually a bare tag name. A selector that does not parse
    /// matches nothing.
    pub fn find_all(&self, selector: &str) -> Vec<Element<'_>> {
        match parse_selector(selector) {
            Some(selector) => self
                .html
                .select(&selector)
                .map(|inner| Element { inner })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns the whole document text, concatenated
    pub fn text(&self) -> String {
        self.html.root_element().text().collect()
    }

    /// Returns the canonical targets of every `<a href>` on the page
    ///
    /// Hrefs are resolved against `base_url`; anything that does not resolve
    /// to an http(s) URL is dropped. Document order is preserved and
    /// duplicates are kept.
    pub fn links(&self, base_url: &Url) -> Vec<Url> {
        self.find_all("a[href]")
            .into_iter()
            .filter_map(|anchor| anchor.attr("href"))
            .filter_map(|href| resolve_link(href, base_url))
            .collect()
    }
}

impl<'a> Element<'a> {
    /// Lowercase tag name of the element
    pub fn name(&self) -> &'a str {
        self.inner.value().name()
    }

    /// Concatenated, whitespace-trimmed descendant text
    pub fn text(&self) -> String {
        self.inner.text().collect::<String>().trim().to_string()
    }

    /// Value of the attribute `name`, if present
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// Descendant elements matching `selector`, in document order
    pub fn find_all(&self, selector: &str) -> Vec<Element<'a>> {
        match parse_selector(selector) {
            Some(selector) => self
                .inner
                .select(&selector)
                .map(|inner| Element { inner })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Nearest enclosing element named `name`, not counting this one
    pub fn closest_ancestor(&self, name: &str) -> Option<Element<'a>> {
        self.inner
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| ancestor.value().name() == name)
            .map(|inner| Element { inner })
    }

    /// Whether both handles point at the same node
    pub fn is_same(&self, other: &Element<'_>) -> bool {
        self.inner.id() == other.inner.id()
    }

    /// Direct child elements, in document order
    pub fn children(&self) -> Vec<Element<'a>> {
        self.inner
            .children()
            .filter_map(ElementRef::wrap)
            .map(|inner| Element { inner })
            .collect()
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    let selector = selector.trim();
    if selector.is_empty() {
        return None;
    }

    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!("Ignoring invalid selector '{}': {:?}", selector, e);
            None
        }
    }
}
