//! domaudit - WCAG-style accessibility auditing for HTML documents
//!
//! Audits a parsed document tree against a fixed catalog of accessibility
//! rules and returns per-node verdicts (`pass`/`warning`/`fail`). The
//! engine is a pure read + classify pass: it never mutates the document,
//! performs no network access, and every rule call returns a complete
//! result set rather than raising.
//!
//! ## Rules
//!
//! - **Images** (`check_images`): alternative text on `img`,
//!   `input[type=image]`, `area`, and `svg`
//! - **Background images** (`check_bg_images`): accessible names for CSS
//!   background images
//! - **Tables** (`check_tables`): header structure, headers/id reference
//!   graph, layout-table detection
//! - **Focus** (`check_focus`): focus suppression, tabindex anomalies,
//!   keyboard traps, tab-order risk
//! - **Skip navigation** (`check_skip_nav`): leading fragment anchors
//! - **Page title** (`check_page_title`), **frames** (`check_frames`),
//!   **headings** (`check_headings`), **page language** (`check_page_lang`)
//! - **User request** (`check_user_request`): announced popups
//! - **Input labels** (`check_input_labels`): form control labels
//! - **Web application** (`check_web_application`): nine composite ARIA
//!   widget patterns
//!
//! ## Usage
//!
//! ```
//! use domaudit::context::DocumentContext;
//! use domaudit::rules::check_images;
//! use domaudit::verdict::Verdict;
//!
//! let ctx = DocumentContext::parse(r#"<img src="chart.png">"#);
//! let results = check_images(&ctx);
//! assert_eq!(results[0].valid, Verdict::Fail);
//! ```
//!
//! Rules that cross frame boundaries (`check_frames`, `check_page_lang`)
//! take a [`context::FrameLoader`]; pass [`context::NoFrames`] to audit a
//! single document, or implement the trait to resolve nested documents.
//! A frame the loader cannot produce is treated as empty, never as an
//! error.
//!
//! Detection is static: only inline handler text and inline styles are
//! inspected, so listeners and styles attached from script are invisible
//! to the audit.

pub mod context;
pub mod dom;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod verdict;

pub use context::{DocumentContext, FrameLoader, NoFrames};
pub use rules::{
    check_bg_images, check_focus, check_frames, check_headings, check_images,
    check_input_labels, check_page_lang, check_page_title, check_skip_nav, check_tables,
    check_user_request, check_web_application,
};
pub use verdict::{Audit, Finding, RuleId, Verdict};
