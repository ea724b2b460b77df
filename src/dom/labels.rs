//! Accessible-name resolution.
//!
//! Each element type derives its user-facing label from a strict priority
//! chain of markup sources. Resolution walks the chain and returns the
//! first source that yields non-empty text; a reference-based source whose
//! target is missing or textless is skipped, not treated as terminal.

use crate::context::DocumentContext;
use crate::dom::text_content;
use scraper::{ElementRef, Selector};

/// A candidate source for an element's accessible name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    /// `aria-labelledby` id reference (resolved through the document)
    AriaLabelledBy,
    /// `aria-label` attribute
    AriaLabel,
    /// `title` attribute
    Title,
    /// Text of a `<caption>` child
    Caption,
    /// Legacy `summary` attribute
    SummaryAttr,
    /// Text of a `[role="heading"]` descendant
    HeadingDescendant,
    /// The element's own visible text
    VisibleText,
}

/// Priority chain for table labels.
pub const TABLE_SOURCES: &[LabelSource] = &[
    LabelSource::AriaLabelledBy,
    LabelSource::AriaLabel,
    LabelSource::Caption,
    LabelSource::SummaryAttr,
];

/// Priority chain for dialog titles.
pub const DIALOG_SOURCES: &[LabelSource] = &[
    LabelSource::AriaLabelledBy,
    LabelSource::AriaLabel,
    LabelSource::HeadingDescendant,
];

/// Priority chain for background-image hosts.
pub const BG_IMAGE_SOURCES: &[LabelSource] = &[
    LabelSource::AriaLabel,
    LabelSource::Title,
    LabelSource::VisibleText,
];

fn resolve_source(
    ctx: &DocumentContext,
    el: ElementRef<'_>,
    source: LabelSource,
) -> Option<String> {
    let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };
    match source {
        LabelSource::AriaLabelledBy => {
            let id = el.value().attr("aria-labelledby")?.trim().to_string();
            let target = ctx.element_by_id(&id)?;
            non_empty(text_content(target))
        }
        LabelSource::AriaLabel => {
            non_empty(el.value().attr("aria-label")?.trim().to_string())
        }
        LabelSource::Title => non_empty(el.value().attr("title")?.trim().to_string()),
        LabelSource::Caption => {
            let selector = Selector::parse("caption").expect("valid selector");
            let caption = el.select(&selector).next()?;
            non_empty(text_content(caption))
        }
        LabelSource::SummaryAttr => {
            non_empty(el.value().attr("summary")?.trim().to_string())
        }
        LabelSource::HeadingDescendant => {
            let selector = Selector::parse("[role=\"heading\"]").expect("valid selector");
            let heading = el.select(&selector).next()?;
            non_empty(text_content(heading))
        }
        LabelSource::VisibleText => non_empty(text_content(el)),
    }
}

/// First non-empty label the ordered source chain yields.
pub fn resolve_label(
    ctx: &DocumentContext,
    el: ElementRef<'_>,
    sources: &[LabelSource],
) -> Option<String> {
    sources
        .iter()
        .find_map(|source| resolve_source(ctx, el, *source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn table_label(html: &str) -> Option<String> {
        let ctx = DocumentContext::parse(html);
        let selector = Selector::parse("table").unwrap();
        let table = ctx.document().select(&selector).next().unwrap();
        resolve_label(&ctx, table, TABLE_SOURCES)
    }

    #[test]
    fn labelledby_wins_when_target_has_text() {
        let label = table_label(
            r#"<p id="t">Quarterly sales</p>
               <table aria-labelledby="t" aria-label="fallback"><caption>cap</caption></table>"#,
        );
        assert_eq!(label.as_deref(), Some("Quarterly sales"));
    }

    #[test]
    fn dangling_labelledby_falls_through() {
        let label = table_label(
            r#"<table aria-labelledby="missing" aria-label="Sales"><caption>cap</caption></table>"#,
        );
        assert_eq!(label.as_deref(), Some("Sales"));
    }

    #[test]
    fn empty_target_text_falls_through_to_caption() {
        let label = table_label(
            r#"<p id="t"> </p><table aria-labelledby="t"><caption>Caption text</caption></table>"#,
        );
        assert_eq!(label.as_deref(), Some("Caption text"));
    }

    #[test]
    fn summary_is_the_last_resort() {
        let label = table_label(r#"<table summary="legacy summary"><tr><td>1</td></tr></table>"#);
        assert_eq!(label.as_deref(), Some("legacy summary"));
    }

    #[test]
    fn unlabelled_table_resolves_to_none() {
        assert!(table_label(r#"<table><tr><td>1</td></tr></table>"#).is_none());
    }

    #[test]
    fn dialog_chain_uses_heading_descendant() {
        let ctx = DocumentContext::parse(
            r#"<div role="dialog"><div role="heading">Settings</div></div>"#,
        );
        let selector = Selector::parse("[role=\"dialog\"]").unwrap();
        let dialog = ctx.document().select(&selector).next().unwrap();
        assert_eq!(
            resolve_label(&ctx, dialog, DIALOG_SOURCES).as_deref(),
            Some("Settings")
        );
    }
}
