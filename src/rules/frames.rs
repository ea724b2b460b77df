//! Frame title rule.
//!
//! Every `iframe` must carry a non-empty `title`. The frame tree is walked
//! recursively through the caller-supplied [`FrameLoader`]; a frame whose
//! document cannot be loaded (the cross-origin case) simply contributes no
//! nested frames.

use crate::context::{DocumentContext, FrameLoader};
use crate::dom::style::is_visible;
use crate::verdict::Verdict;
use scraper::Selector;
use tracing::debug;

/// Result record for one frame. Owned, because nested frames belong to
/// documents loaded during the traversal.
#[derive(Debug, Clone)]
pub struct FrameCheck {
    /// Always `iframe`
    pub label: &'static str,
    /// The frame's `title` attribute, empty when absent
    pub value: String,
    /// The frame's `src` attribute
    pub contents: String,
    /// Nesting depth; 0 for frames of the root document
    pub depth: usize,
    /// Whether the iframe element was hidden at evaluation time
    pub hidden: bool,
    /// Verdict
    pub valid: Verdict,
}

fn collect(
    ctx: &DocumentContext,
    loader: &dyn FrameLoader,
    depth: usize,
    out: &mut Vec<FrameCheck>,
) {
    let iframe_sel = Selector::parse("iframe").expect("valid selector");

    for frame in ctx.document().select(&iframe_sel) {
        let title = frame.value().attr("title").unwrap_or("").to_string();
        let src = frame.value().attr("src").unwrap_or("").to_string();

        out.push(FrameCheck {
            label: "iframe",
            valid: if title.is_empty() { Verdict::Fail } else { Verdict::Pass },
            value: title,
            contents: src.clone(),
            depth,
            hidden: !is_visible(frame),
        });

        if src.is_empty() {
            continue;
        }
        match loader.load(&src, ctx) {
            Some(nested) => collect(&nested, loader, depth + 1, out),
            None => debug!(src = %src, "frame document not loadable, treating as empty"),
        }
    }
}

/// Audit every reachable frame in the document tree.
pub fn check_frames(ctx: &DocumentContext, loader: &dyn FrameLoader) -> Vec<FrameCheck> {
    let mut out = Vec::new();
    collect(ctx, loader, 0, &mut out);
    out
}
