//! Document title rule.
//!
//! A page fails when its title is empty or contains doubled decorative
//! characters (`::`, `--`, `★★`, ...), a pattern common in spam-like or
//! separator-padded titles that screen readers announce verbatim.

use crate::context::DocumentContext;
use crate::verdict::Verdict;

/// Doubled character pairs that disqualify a title.
const DOUBLED_CHARACTERS: &[&str] = &[
    "::", "||", "--", "@@", "##", "$$", "%%", "&&", "**", "((", "))", "++",
    "==", "~~", ";;", "<<", ">>", "[[", "]]", "★★", "☆☆", "◎◎", "●●", "◆◆",
    "◇◇", "□□", "■■", "△△", "▲▲", "▽▽", "▼▼", "◁◁", "◀◀", "▷▷", "▶▶",
    "♠♠", "♤♤", "♡♡", "♥♥", "♧♧", "♣♣", "⊙⊙", "◈◈", "▣▣", "◐◐", "◑◑",
    "▒▒", "▤▤", "▥▥", "▨▨", "▧▧", "▦▦", "▩▩", "♨♨", "☏☏", "☎☎",
];

/// Result record for the page title check.
#[derive(Debug, Clone)]
pub struct PageTitleCheck {
    /// The document title, trimmed
    pub title: String,
    /// Verdict
    pub valid: Verdict,
}

/// Audit the document title.
pub fn check_page_title(ctx: &DocumentContext) -> PageTitleCheck {
    let title = ctx.title();
    let has_doubled = DOUBLED_CHARACTERS.iter().any(|pair| title.contains(pair));

    PageTitleCheck {
        valid: if !title.is_empty() && !has_doubled {
            Verdict::Pass
        } else {
            Verdict::Fail
        },
        title,
    }
}
