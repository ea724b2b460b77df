//! Alternative-text rule for CSS background images.
//!
//! Scans every element whose inline style declares a background image and
//! checks that meaningful ones carry an accessible name. Interactive hosts
//! (links, buttons, tab stops) are held to the stricter standard: a missing
//! name fails rather than warns.

use crate::context::DocumentContext;
use crate::dom::labels::{resolve_label, BG_IMAGE_SOURCES};
use crate::dom::style::{inline_style, is_visible};
use crate::dom::{has_interactive_host, urls};
use crate::verdict::Verdict;
use regex::Regex;
use scraper::ElementRef;

/// Result record for one background-image host.
#[derive(Debug)]
pub struct BgImageCheck<'a> {
    /// The inspected node
    pub element: ElementRef<'a>,
    /// Whether the node was hidden at evaluation time
    pub hidden: bool,
    /// First `url(...)` reference, resolved against the document base
    pub src: String,
    /// Resolved label (`aria-label` → `title` → visible text), possibly empty
    pub alt: String,
    /// Verdict
    pub valid: Verdict,
    /// Findings
    pub issues: Vec<String>,
    /// Link/button host, tab stop, or explicit button role
    pub interactive: bool,
}

fn background_image(el: ElementRef<'_>) -> Option<String> {
    let declared = inline_style(el, "background-image")
        .or_else(|| inline_style(el, "background"))?;
    if declared == "none" || !declared.contains("url(") {
        return None;
    }
    Some(declared)
}

/// Audit every element with an inline CSS background image.
pub fn check_bg_images<'a>(ctx: &'a DocumentContext) -> Vec<BgImageCheck<'a>> {
    let url_re = Regex::new(r#"url\(['"]?([^'"()]+)['"]?\)"#).expect("valid regex");

    ctx.document()
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter_map(|el| {
            let declared = background_image(el)?;
            let raw = url_re
                .captures(&declared)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str())
                .unwrap_or("");
            let src = urls::resolve(raw, ctx.base_url());

            let value = el.value();
            let has_name = value.attr("aria-label").map_or(false, |a| !a.trim().is_empty())
                || value.attr("title").map_or(false, |t| !t.trim().is_empty());
            let interactive = has_interactive_host(el)
                || value.attr("tabindex").is_some()
                || value.attr("role") == Some("button");

            let mut issues = Vec::new();
            let valid = if interactive && !has_name {
                issues.push(
                    "interactive element's background image has no accessible name".to_string(),
                );
                Verdict::Fail
            } else if !has_name {
                issues.push(
                    "background image has no accessible name - add aria-label or title if it carries meaning"
                        .to_string(),
                );
                Verdict::Warning
            } else {
                Verdict::Pass
            };

            Some(BgImageCheck {
                element: el,
                hidden: !is_visible(el),
                src,
                alt: resolve_label(ctx, el, BG_IMAGE_SOURCES).unwrap_or_default(),
                valid,
                issues,
                interactive,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Vec<BgImageCheck<'static>> {
        let ctx: &'static DocumentContext =
            Box::leak(Box::new(DocumentContext::parse_with_url(
                html,
                "https://example.com/",
            )));
        check_bg_images(ctx)
    }

    #[test]
    fn elements_without_background_are_skipped() {
        let results = run(r#"<div>plain</div><p style="color: red">text</p>"#);
        assert!(results.is_empty());
    }

    #[test]
    fn unnamed_background_warns() {
        let results = run(r#"<div style="background-image: url('hero.jpg')">x</div>"#);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].valid, Verdict::Warning);
        assert_eq!(results[0].src, "https://example.com/hero.jpg");
    }

    #[test]
    fn interactive_unnamed_background_fails() {
        let results = run(concat!(
            r#"<a href="/"><span style="background-image: url(icon.png)">go</span></a>"#,
            r#"<div tabindex="0" style="background-image: url(btn.png)">press</div>"#,
            r#"<div role="button" style="background: url(btn2.png) no-repeat">press</div>"#,
        ));
        assert_eq!(results.len(), 3);
        for r in &results {
            assert!(r.interactive);
            assert_eq!(r.valid, Verdict::Fail);
        }
    }

    #[test]
    fn named_background_passes_and_resolves_label() {
        let results = run(
            r#"<div aria-label="Search" style="background-image: url(search.png)">x</div>"#,
        );
        assert_eq!(results[0].valid, Verdict::Pass);
        assert_eq!(results[0].alt, "Search");
    }

    #[test]
    fn title_counts_as_name() {
        let results =
            run(r#"<div title="Logo" style="background-image: url(logo.png)"></div>"#);
        assert_eq!(results[0].valid, Verdict::Pass);
        assert_eq!(results[0].alt, "Logo");
    }

    #[test]
    fn background_none_is_skipped() {
        let results = run(r#"<div style="background-image: none">x</div>"#);
        assert!(results.is_empty());
    }
}
