//! The rule catalog.
//!
//! Each rule is an independently invocable function over a
//! [`DocumentContext`], returning typed result records in document order.
//! [`run_rules`] runs a selection of the catalog and projects every
//! warning/fail result into the serializable [`Audit`] form used by
//! reports; library consumers who need pass results or the rule-specific
//! fields call the rule functions directly.

pub mod bg_images;
pub mod focus;
pub mod frames;
pub mod headings;
pub mod images;
pub mod input_labels;
pub mod page_lang;
pub mod page_title;
pub mod skip_nav;
pub mod tables;
pub mod user_request;
pub mod widgets;

pub use bg_images::{check_bg_images, BgImageCheck};
pub use focus::{
    check_focus, FocusIssue, FocusIssueKind, FocusOrderAnalysis, FocusReport, FocusSummary,
    KeyboardTrap, TabindexAnalysis,
};
pub use frames::{check_frames, FrameCheck};
pub use headings::{check_headings, HeadingCheck};
pub use images::{check_images, ImageCheck};
pub use input_labels::{check_input_labels, InputLabelCheck};
pub use page_lang::{check_page_lang, PageLangCheck};
pub use page_title::{check_page_title, PageTitleCheck};
pub use skip_nav::{check_skip_nav, SkipNavCheck};
pub use tables::{check_tables, TableCheck};
pub use user_request::{check_user_request, UserRequestCheck};
pub use widgets::{check_web_application, WidgetCheck, WidgetDetail};

use crate::context::{DocumentContext, FrameLoader};
use crate::dom::opening_tag;
use crate::verdict::{Audit, Finding, RuleId, Verdict};

fn report_worthy(verdict: Verdict) -> bool {
    verdict != Verdict::Pass
}

fn images_findings(ctx: &DocumentContext, audit: &mut Audit) {
    for r in check_images(ctx) {
        if report_worthy(r.valid) {
            audit.add(
                Finding::new(RuleId::Images, r.valid, r.issues.clone())
                    .with_element(opening_tag(r.element))
                    .with_hidden(r.hidden),
            );
        }
    }
}

fn bg_images_findings(ctx: &DocumentContext, audit: &mut Audit) {
    for r in check_bg_images(ctx) {
        if report_worthy(r.valid) {
            audit.add(
                Finding::new(RuleId::BgImages, r.valid, r.issues.clone())
                    .with_element(opening_tag(r.element))
                    .with_hidden(r.hidden),
            );
        }
    }
}

fn tables_findings(ctx: &DocumentContext, audit: &mut Audit) {
    for r in check_tables(ctx) {
        if report_worthy(r.valid) {
            audit.add(
                Finding::new(RuleId::Tables, r.valid, r.issues.clone())
                    .with_element(opening_tag(r.element))
                    .with_hidden(r.hidden),
            );
        }
    }
}

fn focus_findings(ctx: &DocumentContext, audit: &mut Audit) {
    let report = check_focus(ctx);
    for issue in &report.focus_issues {
        audit.add(
            Finding::new(RuleId::Focus, issue.valid, issue.issues.clone())
                .with_element(opening_tag(issue.element)),
        );
    }
    for trap in &report.keyboard_traps {
        let mut issues = vec![format!(
            "displayed {} may trap keyboard users",
            trap.role
        )];
        issues.extend(trap.issues.iter().cloned());
        audit.add(
            Finding::new(RuleId::Focus, Verdict::Fail, issues)
                .with_element(opening_tag(trap.element)),
        );
    }
}

fn skip_nav_findings(ctx: &DocumentContext, audit: &mut Audit) {
    for r in check_skip_nav(ctx) {
        if report_worthy(r.valid) {
            audit.add(
                Finding::new(
                    RuleId::SkipNav,
                    r.valid,
                    vec![format!("skip link {} does not resolve to a target", r.value)],
                )
                .with_element(opening_tag(r.element))
                .with_hidden(r.hidden),
            );
        }
    }
}

fn page_title_findings(ctx: &DocumentContext, audit: &mut Audit) {
    let r = check_page_title(ctx);
    if report_worthy(r.valid) {
        let issue = if r.title.is_empty() {
            "document title is empty".to_string()
        } else {
            format!("document title contains doubled decorative characters: \"{}\"", r.title)
        };
        audit.add(Finding::new(RuleId::PageTitle, r.valid, vec![issue]));
    }
}

fn frames_findings(ctx: &DocumentContext, loader: &dyn FrameLoader, audit: &mut Audit) {
    for r in check_frames(ctx, loader) {
        if report_worthy(r.valid) {
            audit.add(
                Finding::new(
                    RuleId::Frames,
                    r.valid,
                    vec!["iframe has no title attribute".to_string()],
                )
                .with_element(format!("<iframe src=\"{}\">", r.contents))
                .with_hidden(r.hidden),
            );
        }
    }
}

fn page_lang_findings(ctx: &DocumentContext, loader: &dyn FrameLoader, audit: &mut Audit) {
    for r in check_page_lang(ctx, loader) {
        if report_worthy(r.valid) {
            let issue = match r.valid {
                Verdict::Warning => {
                    "xml:lang is declared without lang under the XHTML namespace".to_string()
                }
                _ => "no lang attribute on the html element".to_string(),
            };
            audit.add(
                Finding::new(RuleId::PageLang, r.valid, vec![issue])
                    .with_element(format!("<html> ({})", r.url)),
            );
        }
    }
}

fn user_request_findings(ctx: &DocumentContext, audit: &mut Audit) {
    for r in check_user_request(ctx) {
        if report_worthy(r.valid) {
            audit.add(
                Finding::new(
                    RuleId::UserRequest,
                    r.valid,
                    vec![
                        "popup is not announced (no title, new-window text, or target=\"_blank\")"
                            .to_string(),
                    ],
                )
                .with_element(opening_tag(r.element))
                .with_hidden(r.hidden),
            );
        }
    }
}

fn input_labels_findings(ctx: &DocumentContext, audit: &mut Audit) {
    for r in check_input_labels(ctx) {
        if report_worthy(r.valid) {
            let issue = if r.has_title {
                "control is labelled only by its title attribute".to_string()
            } else {
                format!("<{}> has no associated label", r.tag)
            };
            audit.add(
                Finding::new(RuleId::InputLabels, r.valid, vec![issue])
                    .with_element(opening_tag(r.element))
                    .with_hidden(r.hidden),
            );
        }
    }
}

fn widgets_findings(ctx: &DocumentContext, audit: &mut Audit) {
    for r in check_web_application(ctx) {
        if report_worthy(r.valid) {
            audit.add(
                Finding::new(RuleId::Widgets, r.valid, r.issues.clone())
                    .with_element(opening_tag(r.element))
                    .with_hidden(r.hidden),
            );
        }
    }
}

/// Run the selected rules over a document and collect every warning/fail
/// result as a finding. Headings never produce findings; they are an
/// inventory rule.
pub fn run_rules(
    ctx: &DocumentContext,
    loader: &dyn FrameLoader,
    rules: &[RuleId],
) -> Audit {
    let mut audit = Audit::new();
    for rule in rules {
        match rule {
            RuleId::Images => images_findings(ctx, &mut audit),
            RuleId::BgImages => bg_images_findings(ctx, &mut audit),
            RuleId::Tables => tables_findings(ctx, &mut audit),
            RuleId::Focus => focus_findings(ctx, &mut audit),
            RuleId::SkipNav => skip_nav_findings(ctx, &mut audit),
            RuleId::PageTitle => page_title_findings(ctx, &mut audit),
            RuleId::Frames => frames_findings(ctx, loader, &mut audit),
            RuleId::Headings => {}
            RuleId::PageLang => page_lang_findings(ctx, loader, &mut audit),
            RuleId::UserRequest => user_request_findings(ctx, &mut audit),
            RuleId::InputLabels => input_labels_findings(ctx, &mut audit),
            RuleId::Widgets => widgets_findings(ctx, &mut audit),
        }
    }
    audit
}
