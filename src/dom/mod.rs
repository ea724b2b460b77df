//! Shared DOM helpers used by every rule: visibility, URL resolution,
//! accessible-name resolution, and small traversal utilities.

pub mod labels;
pub mod style;
pub mod urls;

use scraper::ElementRef;

/// Nearest element (self first, then ancestors) matching the predicate.
///
/// Equivalent to `Element.closest()` for the predicate-based lookups the
/// rules need (interactive ancestors, wrapping labels, map hosts).
pub fn closest<'a, F>(el: ElementRef<'a>, mut pred: F) -> Option<ElementRef<'a>>
where
    F: FnMut(ElementRef<'a>) -> bool,
{
    if pred(el) {
        return Some(el);
    }
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| pred(*ancestor))
}

/// Whether the element is, or sits inside, a link, button, or
/// `[role="button"]` host.
pub fn has_interactive_host(el: ElementRef<'_>) -> bool {
    closest(el, |e| {
        let v = e.value();
        matches!(v.name(), "a" | "button") || v.attr("role") == Some("button")
    })
    .is_some()
}

/// Trimmed text content of the element's descendants.
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Opening-tag snapshot of an element, e.g. `<img src="a.png" alt="">`.
pub fn opening_tag(el: ElementRef<'_>) -> String {
    let value = el.value();
    let attrs = value
        .attrs()
        .map(|(k, v)| format!(" {}=\"{}\"", k, v))
        .collect::<String>();
    format!("<{}{}>", value.name(), attrs)
}
