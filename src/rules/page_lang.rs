//! Page language rule.
//!
//! Checks the `lang`/`xml:lang` declaration on the root element of every
//! reachable http(s) document in the frame tree. Under the XHTML namespace
//! both attributes are expected; `xml:lang` alone is a warning there.
//! Documents with non-http(s) URLs are skipped.

use crate::context::{DocumentContext, FrameLoader};
use crate::verdict::Verdict;
use scraper::Selector;

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Result record for one document in the frame tree. Owned, because nested
/// documents are loaded during traversal.
#[derive(Debug, Clone)]
pub struct PageLangCheck {
    /// The `lang` attribute, empty when absent
    pub lang: String,
    /// The document URL
    pub url: String,
    /// Human-readable declaration summary, e.g. `lang=en`
    pub value: String,
    /// Verdict
    pub valid: Verdict,
}

fn is_http(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn inspect(ctx: &DocumentContext, loader: &dyn FrameLoader, out: &mut Vec<PageLangCheck>) {
    if is_http(ctx.url()) {
        let html = ctx.root();
        let is_xhtml = html.value().attr("xmlns") == Some(XHTML_NS);
        let lang = html.value().attr("lang").unwrap_or("").to_string();
        let xml_lang = html.value().attr("xml:lang").unwrap_or("").to_string();

        let (valid, value) = if is_xhtml && !xml_lang.is_empty() && !lang.is_empty() {
            (Verdict::Pass, format!("xml:lang={}, lang={}", xml_lang, lang))
        } else if is_xhtml && !xml_lang.is_empty() {
            (Verdict::Warning, format!("xml:lang={}", xml_lang))
        } else if !lang.is_empty() {
            (Verdict::Pass, format!("lang={}", lang))
        } else {
            (Verdict::Fail, String::new())
        };

        out.push(PageLangCheck {
            lang,
            url: ctx.url().to_string(),
            value,
            valid,
        });
    }

    let iframe_sel = Selector::parse("iframe").expect("valid selector");
    for frame in ctx.document().select(&iframe_sel) {
        let Some(src) = frame.value().attr("src") else {
            continue;
        };
        if let Some(nested) = loader.load(src, ctx) {
            inspect(&nested, loader, out);
        }
    }
}

/// Audit language declarations across the frame-document tree.
pub fn check_page_lang(ctx: &DocumentContext, loader: &dyn FrameLoader) -> Vec<PageLangCheck> {
    let mut out = Vec::new();
    inspect(ctx, loader, &mut out);
    out
}
