//! URL resolution against the document base.
//!
//! Rules report verdicts, never errors, so resolution is total: malformed
//! input comes back verbatim instead of failing.

use url::Url;

/// Resolve a possibly relative URL against the document base.
///
/// Returns the absolute form when resolution succeeds, otherwise the raw
/// string unchanged.
pub fn resolve(raw: &str, base: Option<&Url>) -> String {
    match base {
        Some(base) => base
            .join(raw)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => Url::parse(raw)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| raw.to_string()),
    }
}

/// Whether the string resolves to a syntactically valid URL against the
/// base. Used for `longdesc` validation; no network request is made.
pub fn is_resolvable(raw: &str, base: Option<&Url>) -> bool {
    match base {
        Some(base) => base.join(raw).is_ok(),
        None => Url::parse(raw).is_ok(),
    }
}
