//! New-window popup rule.
//!
//! Considers only `a`/`area`/`input`/`button` elements whose inline
//! `onclick` invokes `window.open`. The user must be told a new window will
//! open: a `title`, visible text containing a new-window phrase, or (for
//! links and areas) `target="_blank"`. Listeners attached from script are
//! not detectable here and are out of scope.

use crate::context::DocumentContext;
use crate::dom::style::is_visible;
use crate::dom::text_content;
use crate::verdict::Verdict;
use regex::Regex;
use scraper::{ElementRef, Selector};

/// Phrases that announce a new window, matched case-insensitively against
/// the element's visible text.
const NEW_WINDOW_PHRASES: &[&str] = &["새창", "팝업", "new win"];

/// Result record for one popup-triggering control.
#[derive(Debug)]
pub struct UserRequestCheck<'a> {
    /// The triggering element
    pub element: ElementRef<'a>,
    /// Lowercased tag name
    pub tag: String,
    /// `title` attribute, empty when absent
    pub title: String,
    /// `target` attribute, empty when absent
    pub target: String,
    /// Visible text
    pub text: String,
    /// Whether the element was hidden at evaluation time
    pub hidden: bool,
    /// Verdict
    pub valid: Verdict,
}

/// Audit popup-triggering controls.
pub fn check_user_request<'a>(ctx: &'a DocumentContext) -> Vec<UserRequestCheck<'a>> {
    let selector = Selector::parse("a, area, input, button").expect("valid selector");
    let window_open_re = Regex::new(r"window\.open\s*\(").expect("valid regex");

    ctx.document()
        .select(&selector)
        .filter_map(|el| {
            let onclick = el.value().attr("onclick")?;
            if !window_open_re.is_match(onclick) {
                return None;
            }

            let tag = el.value().name().to_string();
            let title = el.value().attr("title").unwrap_or("").to_string();
            let target = el.value().attr("target").unwrap_or("").to_string();
            let text = text_content(el);
            let text_lower = text.to_lowercase();

            let mut valid = Verdict::Fail;
            if matches!(tag.as_str(), "a" | "area") && target == "_blank" {
                valid = Verdict::Pass;
            }
            if NEW_WINDOW_PHRASES.iter().any(|p| text_lower.contains(p)) {
                valid = Verdict::Pass;
            }
            if !title.is_empty() {
                valid = Verdict::Pass;
            }

            Some(UserRequestCheck {
                hidden: !is_visible(el),
                element: el,
                tag,
                title,
                target,
                text,
                valid,
            })
        })
        .collect()
}
