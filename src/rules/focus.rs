//! Focus visibility and keyboard reachability rule.
//!
//! This rule is a filter, not a full map: elements with nothing wrong are
//! dropped. Alongside the per-element list it returns document-wide
//! analyses: tabindex buckets, keyboard traps in displayed modal
//! containers, and tab-order risk.
//!
//! Only inline handler and style text is inspected; listeners attached from
//! script are invisible to a static pass.

use crate::context::DocumentContext;
use crate::dom::style::{is_visible, suppresses_outline};
use crate::dom::text_content;
use crate::verdict::Verdict;
use scraper::{ElementRef, Selector};

/// What suppressed the focus indicator on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusIssueKind {
    /// An inline handler calls `blur()`
    BlurCall,
    /// Inline style removes the outline
    OutlineSuppressed,
}

/// A single element with focus-related problems.
#[derive(Debug)]
pub struct FocusIssue<'a> {
    /// The offending element
    pub element: ElementRef<'a>,
    /// Lowercased tag name
    pub tag: String,
    /// Trimmed text content
    pub text: String,
    /// Suppression mechanism, when one was found
    pub kind: Option<FocusIssueKind>,
    /// The offending attribute or style text
    pub detail: String,
    /// Findings for this element
    pub issues: Vec<String>,
    /// Verdict: `fail` for blur suppression, `warning` otherwise
    pub valid: Verdict,
}

/// Buckets of elements with a `tabindex` attribute.
#[derive(Debug, Default)]
pub struct TabindexAnalysis<'a> {
    /// `tabindex` greater than zero
    pub positive: Vec<ElementRef<'a>>,
    /// `tabindex="0"` on a natively focusable element
    pub redundant_zero: Vec<ElementRef<'a>>,
    /// Non-numeric `tabindex` values
    pub invalid: Vec<ElementRef<'a>>,
}

impl TabindexAnalysis<'_> {
    /// Whether any bucket is non-empty.
    pub fn has_issues(&self) -> bool {
        !self.positive.is_empty() || !self.redundant_zero.is_empty() || !self.invalid.is_empty()
    }
}

/// A displayed modal container keyboard users cannot escape.
#[derive(Debug)]
pub struct KeyboardTrap<'a> {
    /// The modal container
    pub element: ElementRef<'a>,
    /// The container's role (`dialog` or `alertdialog`)
    pub role: String,
    /// What is missing
    pub issues: Vec<String>,
}

/// Document-wide tab-order observations.
#[derive(Debug, Default)]
pub struct FocusOrderAnalysis {
    /// Any element uses a positive tabindex
    pub has_positive_tabindex: bool,
    /// Order-risk findings
    pub order_issues: Vec<String>,
    /// Count of tabbable elements (native plus `tabindex >= 0`)
    pub total_tabbable: usize,
}

/// Aggregated counters for the whole report.
#[derive(Debug, Default)]
pub struct FocusSummary {
    /// Number of per-element entries
    pub total_issues: usize,
    /// Entries with a `fail` verdict
    pub failure_count: usize,
    /// Entries with a `warning` verdict
    pub warning_count: usize,
    /// Any tabindex bucket is non-empty
    pub has_tabindex_issues: bool,
    /// Any keyboard trap was found
    pub has_keyboard_traps: bool,
}

/// Full result of the focus rule.
#[derive(Debug)]
pub struct FocusReport<'a> {
    /// Per-element problems, document order
    pub focus_issues: Vec<FocusIssue<'a>>,
    /// Tabindex buckets
    pub tabindex: TabindexAnalysis<'a>,
    /// Keyboard traps in displayed modal containers
    pub keyboard_traps: Vec<KeyboardTrap<'a>>,
    /// Tab-order observations
    pub focus_order: FocusOrderAnalysis,
    /// Aggregated counters
    pub summary: FocusSummary,
}

/// Words that make a button or link read as a close control.
const CLOSE_WORDS: &[&str] = &["close", "닫기", "dismiss"];

fn natively_focusable(el: ElementRef<'_>) -> bool {
    let value = el.value();
    match value.name() {
        "button" | "select" | "textarea" => true,
        "a" => value.attr("href").is_some(),
        "input" => value.attr("type") != Some("hidden"),
        _ => false,
    }
}

fn blur_handler(el: ElementRef<'_>) -> Option<String> {
    for attr in ["onfocus", "onclick"] {
        if let Some(handler) = el.value().attr(attr) {
            if handler.contains("blur()") {
                return Some(handler.to_string());
            }
        }
    }
    None
}

fn reads_as_close_control(el: ElementRef<'_>) -> bool {
    let label = el
        .value()
        .attr("aria-label")
        .map(str::to_lowercase)
        .unwrap_or_default();
    let text = text_content(el).to_lowercase();
    CLOSE_WORDS
        .iter()
        .any(|w| label.contains(w) || text.contains(w))
        || matches!(text.as_str(), "x" | "×" | "✕")
}

fn indicates_esc_support(container: ElementRef<'_>) -> bool {
    let handler_mentions_esc = |el: ElementRef<'_>| {
        ["onkeydown", "onkeyup", "onkeypress"].iter().any(|attr| {
            el.value()
                .attr(attr)
                .map(|h| {
                    let lower = h.to_lowercase();
                    lower.contains("esc") || lower.contains("27")
                })
                .unwrap_or(false)
        })
    };
    handler_mentions_esc(container)
        || container
            .descendants()
            .filter_map(ElementRef::wrap)
            .any(handler_mentions_esc)
}

fn find_keyboard_traps<'a>(ctx: &'a DocumentContext) -> Vec<KeyboardTrap<'a>> {
    let modal_sel =
        Selector::parse("[role=\"dialog\"], [role=\"alertdialog\"]").expect("valid selector");
    let control_sel =
        Selector::parse("button, [role=\"button\"], a").expect("valid selector");

    ctx.document()
        .select(&modal_sel)
        .filter(|modal| is_visible(*modal))
        .filter_map(|modal| {
            let has_close = modal.select(&control_sel).any(reads_as_close_control);
            let has_esc = indicates_esc_support(modal);
            if has_close || has_esc {
                return None;
            }
            Some(KeyboardTrap {
                element: modal,
                role: modal.value().attr("role").unwrap_or("").to_string(),
                issues: vec![
                    "no discoverable close control".to_string(),
                    "no indication of ESC key support".to_string(),
                ],
            })
        })
        .collect()
}

/// Audit focus visibility across the document.
pub fn check_focus<'a>(ctx: &'a DocumentContext) -> FocusReport<'a> {
    let mut focus_issues = Vec::new();
    let mut tabindex = TabindexAnalysis::default();
    let mut total_tabbable = 0usize;

    for el in ctx
        .document()
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
    {
        if !is_visible(el) {
            continue;
        }

        let mut issues = Vec::new();
        let mut kind = None;
        let mut detail = String::new();

        if let Some(handler) = blur_handler(el) {
            kind = Some(FocusIssueKind::BlurCall);
            detail = handler;
            issues.push("an inline handler removes focus with blur()".to_string());
        } else if suppresses_outline(el) {
            kind = Some(FocusIssueKind::OutlineSuppressed);
            detail = el.value().attr("style").unwrap_or("").to_string();
            issues.push("inline style suppresses the focus outline".to_string());
        }

        if let Some(raw) = el.value().attr("tabindex") {
            match raw.trim().parse::<i32>() {
                Ok(v) if v > 0 => {
                    tabindex.positive.push(el);
                    issues.push(format!(
                        "positive tabindex ({}) may break the logical tab order",
                        v
                    ));
                }
                Ok(0) if natively_focusable(el) => {
                    tabindex.redundant_zero.push(el);
                    issues.push(
                        "redundant tabindex=\"0\" on a natively focusable element".to_string(),
                    );
                }
                Ok(_) => {}
                Err(_) => {
                    tabindex.invalid.push(el);
                    issues.push(format!("tabindex \"{}\" is not a number", raw));
                }
            }
        }

        if natively_focusable(el) || el.value().attr("tabindex").map_or(false, |t| {
            t.trim().parse::<i32>().map_or(false, |v| v >= 0)
        }) {
            total_tabbable += 1;
        }

        if issues.is_empty() {
            continue;
        }

        let valid = if kind == Some(FocusIssueKind::BlurCall) {
            Verdict::Fail
        } else {
            Verdict::Warning
        };

        focus_issues.push(FocusIssue {
            element: el,
            tag: el.value().name().to_string(),
            text: text_content(el),
            kind,
            detail,
            issues,
            valid,
        });
    }

    let keyboard_traps = find_keyboard_traps(ctx);

    let has_positive = !tabindex.positive.is_empty();
    let mut order_issues = Vec::new();
    if has_positive {
        order_issues
            .push("positive tabindex values may create an illogical tab order".to_string());
    }
    let focus_order = FocusOrderAnalysis {
        has_positive_tabindex: has_positive,
        order_issues,
        total_tabbable,
    };

    let failure_count = focus_issues.iter().filter(|i| i.valid == Verdict::Fail).count();
    let warning_count = focus_issues
        .iter()
        .filter(|i| i.valid == Verdict::Warning)
        .count();
    let summary = FocusSummary {
        total_issues: focus_issues.len(),
        failure_count,
        warning_count,
        has_tabindex_issues: tabindex.has_issues(),
        has_keyboard_traps: !keyboard_traps.is_empty(),
    };

    FocusReport {
        focus_issues,
        tabindex,
        keyboard_traps,
        focus_order,
        summary,
    }
}
