//! Heading inventory rule.
//!
//! Headings pass by presence; level ordering is not validated. The result
//! gives callers the document's heading outline with visibility flags.

use crate::context::DocumentContext;
use crate::dom::style::is_visible;
use crate::dom::text_content;
use crate::verdict::Verdict;
use scraper::{ElementRef, Selector};

/// Result record for one heading.
#[derive(Debug)]
pub struct HeadingCheck<'a> {
    /// The heading element
    pub element: ElementRef<'a>,
    /// Always `heading`
    pub label: &'static str,
    /// Tag name, `h1`..`h6`
    pub value: String,
    /// Trimmed heading text
    pub contents: String,
    /// Whether the heading was hidden at evaluation time
    pub hidden: bool,
    /// Always `pass`
    pub valid: Verdict,
}

/// Inventory every `h1`–`h6` in the document.
pub fn check_headings<'a>(ctx: &'a DocumentContext) -> Vec<HeadingCheck<'a>> {
    let selector = Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector");

    ctx.document()
        .select(&selector)
        .map(|heading| HeadingCheck {
            element: heading,
            label: "heading",
            value: heading.value().name().to_string(),
            contents: text_content(heading),
            hidden: !is_visible(heading),
            valid: Verdict::Pass,
        })
        .collect()
}
