//! Skip-navigation rule.
//!
//! Inspects at most the first 20 anchors of the document. Only anchors with
//! a `#`-prefixed `href` are candidates; the fragment must resolve to an
//! element `id` or a legacy `name` attribute. A bare `href="#"` always
//! fails. Anchors with other hrefs are excluded from the result entirely.

use crate::context::DocumentContext;
use crate::dom::style::is_visible;
use crate::dom::text_content;
use crate::verdict::Verdict;
use scraper::{ElementRef, Selector};

/// How many leading anchors are considered.
const MAX_ANCHORS: usize = 20;

/// Result record for one fragment anchor.
#[derive(Debug)]
pub struct SkipNavCheck<'a> {
    /// The anchor element
    pub element: ElementRef<'a>,
    /// Whether the anchor was hidden at evaluation time
    pub hidden: bool,
    /// Ordinal label, e.g. `link 3`
    pub label: String,
    /// `(#target) link text`
    pub value: String,
    /// Whether the fragment resolves to a target
    pub connected: bool,
    /// Verdict
    pub valid: Verdict,
}

/// Audit the document's leading fragment anchors.
pub fn check_skip_nav<'a>(ctx: &'a DocumentContext) -> Vec<SkipNavCheck<'a>> {
    let anchor_sel = Selector::parse("a").expect("valid selector");

    ctx.document()
        .select(&anchor_sel)
        .take(MAX_ANCHORS)
        .enumerate()
        .filter_map(|(index, a)| {
            let href = a.value().attr("href")?;
            if !href.starts_with('#') {
                return None;
            }

            let target = &href[1..];
            let connected = !target.is_empty()
                && (ctx.element_by_id(target).is_some()
                    || !ctx.elements_by_name(target).is_empty());

            Some(SkipNavCheck {
                element: a,
                hidden: !is_visible(a),
                label: format!("link {}", index + 1),
                value: format!("({}) {}", href, text_content(a)),
                connected,
                valid: if connected { Verdict::Pass } else { Verdict::Fail },
            })
        })
        .collect()
}
