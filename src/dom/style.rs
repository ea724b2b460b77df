//! Inline-style parsing and the visibility oracle.
//!
//! A statically parsed document carries no layout boxes or computed styles,
//! so visibility is derived from what the markup itself declares: the
//! `hidden` attribute and inline `style` properties. `display: none` hides
//! an element's whole subtree, so it is checked on ancestors as well;
//! `visibility` and `opacity` are checked on the element itself.

use scraper::ElementRef;

/// Value of an inline `style` property, trimmed and lowercased, if declared.
pub fn inline_style(el: ElementRef<'_>, property: &str) -> Option<String> {
    let style = el.value().attr("style")?;
    for declaration in style.split(';') {
        let mut parts = declaration.splitn(2, ':');
        let name = parts.next().unwrap_or("").trim();
        if !name.eq_ignore_ascii_case(property) {
            continue;
        }
        if let Some(value) = parts.next() {
            return Some(value.trim().to_ascii_lowercase());
        }
    }
    None
}

/// Whether the element itself declares `display: none` or carries the
/// `hidden` attribute.
fn declares_display_none(el: ElementRef<'_>) -> bool {
    el.value().attr("hidden").is_some()
        || inline_style(el, "display").as_deref() == Some("none")
}

/// Whether a node is user-perceivable.
///
/// Hidden when the element or any ancestor declares `display: none` (or
/// `hidden`), or when the element declares `visibility: hidden`.
pub fn is_visible(el: ElementRef<'_>) -> bool {
    if declares_display_none(el) {
        return false;
    }
    if inline_style(el, "visibility").as_deref() == Some("hidden") {
        return false;
    }
    !el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(declares_display_none)
}

/// Visibility with the stricter opacity check used by the form-label rule.
pub fn is_perceivable(el: ElementRef<'_>) -> bool {
    if !is_visible(el) {
        return false;
    }
    !matches!(inline_style(el, "opacity").as_deref(), Some("0") | Some("0.0"))
}

/// Whether the element's inline style suppresses the focus outline
/// (`outline: none`, `outline: 0`, or a zero `outline-width`).
pub fn suppresses_outline(el: ElementRef<'_>) -> bool {
    if matches!(inline_style(el, "outline-width").as_deref(), Some("0") | Some("0px")) {
        return true;
    }
    match inline_style(el, "outline").as_deref() {
        Some(outline) => {
            outline == "none" || outline == "0" || outline.starts_with("0 ") || outline.starts_with("0px")
        }
        None => false,
    }
}
