//! Explicit document context passed to every rule.
//!
//! Rules never read an ambient global document: the caller parses HTML into
//! a [`DocumentContext`] and hands it (plus, for frame-aware rules, a
//! [`FrameLoader`]) to each rule function. This keeps rules independently
//! testable and allows auditing several documents side by side.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A parsed document plus the base URL its relative references resolve
/// against.
#[derive(Debug)]
pub struct DocumentContext {
    document: Html,
    url: String,
    base_url: Option<Url>,
}

impl DocumentContext {
    /// Parse an HTML string with no associated URL.
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
            url: String::new(),
            base_url: None,
        }
    }

    /// Parse an HTML string located at `url`. A non-parseable URL is kept
    /// verbatim for display but does not resolve relative references.
    pub fn parse_with_url(html: &str, url: &str) -> Self {
        Self {
            document: Html::parse_document(html),
            url: url.to_string(),
            base_url: Url::parse(url).ok(),
        }
    }

    /// The parsed document.
    pub fn document(&self) -> &Html {
        &self.document
    }

    /// The document's URL as given, possibly empty.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The parsed base URL, when the document URL was absolute.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// First element with the given `id` attribute, in document order.
    pub fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().attr("id") == Some(id))
    }

    /// All elements with the given legacy `name` attribute.
    pub fn elements_by_name(&self, name: &str) -> Vec<ElementRef<'_>> {
        self.document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().attr("name") == Some(name))
            .collect()
    }

    /// The root `<html>` element.
    pub fn root(&self) -> ElementRef<'_> {
        self.document.root_element()
    }

    /// The document title text, trimmed. Only the `<head>` title counts;
    /// `<title>` children of inline SVG do not.
    pub fn title(&self) -> String {
        let selector = Selector::parse("head > title").expect("valid selector");
        self.document
            .select(&selector)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }
}

/// Capability for resolving nested frame documents.
///
/// Frame-aware rules attempt to load each `iframe` source through this
/// trait. Returning `None` models an inaccessible document (cross-origin,
/// missing file) and is treated as "no nested frames", never as an error.
pub trait FrameLoader {
    /// Load and parse the document an iframe `src` points to, resolved
    /// against the parent document. `None` when unavailable.
    fn load(&self, src: &str, parent: &DocumentContext) -> Option<DocumentContext>;
}

/// Loader that treats every frame as inaccessible. The default for callers
/// auditing a single document.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFrames;

impl FrameLoader for NoFrames {
    fn load(&self, _src: &str, _parent: &DocumentContext) -> Option<DocumentContext> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_by_id_finds_first_match() {
        let ctx = DocumentContext::parse(r#"<div id="a">one</div><span id="a">two</span>"#);
        let el = ctx.element_by_id("a").unwrap();
        assert_eq!(el.value().name(), "div");
        assert!(ctx.element_by_id("missing").is_none());
    }

    #[test]
    fn elements_by_name_collects_all() {
        let ctx = DocumentContext::parse(r#"<a name="x"></a><div name="x"></div>"#);
        assert_eq!(ctx.elements_by_name("x").len(), 2);
    }

    #[test]
    fn title_is_trimmed() {
        let ctx = DocumentContext::parse("<html><head><title>  Hello </title></head></html>");
        assert_eq!(ctx.title(), "Hello");
    }

    #[test]
    fn base_url_requires_absolute_document_url() {
        let ctx = DocumentContext::parse_with_url("<html></html>", "https://example.com/a/");
        assert!(ctx.base_url().is_some());
        let ctx = DocumentContext::parse_with_url("<html></html>", "not a url");
        assert!(ctx.base_url().is_none());
        assert_eq!(ctx.url(), "not a url");
    }

    #[test]
    fn no_frames_loader_never_loads() {
        let ctx = DocumentContext::parse("<html></html>");
        assert!(NoFrames.load("child.html", &ctx).is_none());
    }
}
