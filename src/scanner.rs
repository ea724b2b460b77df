//! File and directory scanning.
//!
//! Walks directory trees, audits every HTML document, and aggregates the
//! findings. Frame references inside scanned files are resolved on disk
//! through [`FsFrameLoader`]; anything that leaves the scan root or points
//! at a remote origin is treated as inaccessible.

use crate::context::{DocumentContext, FrameLoader};
use crate::rules::run_rules;
use crate::verdict::{Audit, RuleId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;
use walkdir::WalkDir;

/// File extensions to scan
const SCANNABLE_EXTENSIONS: &[&str] = &["html", "htm", "xhtml"];

/// Directories to skip
const SKIP_DIRS: &[&str] = &[
    "node_modules", ".git", "target", "dist", "build",
    "_build", "vendor", ".next", ".nuxt", "coverage",
];

/// Loads iframe documents from disk, relative to the parent document.
///
/// Remote (`http(s)`, protocol-relative) sources and paths escaping the
/// scan root return `None`, the cross-origin analog. A visited set breaks
/// frame cycles.
pub struct FsFrameLoader {
    root: PathBuf,
    visited: RefCell<HashSet<PathBuf>>,
}

impl FsFrameLoader {
    /// Loader rooted at the directory being scanned.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            visited: RefCell::new(HashSet::new()),
        }
    }
}

impl FrameLoader for FsFrameLoader {
    fn load(&self, src: &str, parent: &DocumentContext) -> Option<DocumentContext> {
        if src.starts_with("http://") || src.starts_with("https://") || src.starts_with("//") {
            debug!(src, "remote frame source, treating as inaccessible");
            return None;
        }

        let path = match parent.base_url() {
            Some(base) => base.join(src).ok()?.to_file_path().ok()?,
            None => return None,
        };
        let canonical = path.canonicalize().ok()?;
        let root = self.root.canonicalize().ok()?;
        if !canonical.starts_with(&root) {
            debug!(src, "frame source escapes the scan root, skipping");
            return None;
        }
        if !self.visited.borrow_mut().insert(canonical.clone()) {
            debug!(src, "frame cycle detected, skipping");
            return None;
        }

        let html = std::fs::read_to_string(&canonical).ok()?;
        let url = Url::from_file_path(&canonical).ok()?;
        Some(DocumentContext::parse_with_url(&html, url.as_str()))
    }
}

/// Audit a single HTML file with the selected rules.
pub fn scan_file(path: &Path, rules: &[RuleId]) -> anyhow::Result<Audit> {
    let html = std::fs::read_to_string(path)?;
    let ctx = match path.canonicalize().ok().and_then(|p| Url::from_file_path(p).ok()) {
        Some(url) => DocumentContext::parse_with_url(&html, url.as_str()),
        None => DocumentContext::parse(&html),
    };

    let root = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let loader = FsFrameLoader::new(root);

    let mut audit = run_rules(&ctx, &loader, rules);
    for finding in &mut audit.findings {
        finding.file = Some(path.to_path_buf());
    }
    Ok(audit)
}

/// Audit every HTML file under a directory.
pub fn scan_directory(dir: &Path, rules: &[RuleId]) -> anyhow::Result<Audit> {
    let mut all_findings = Audit::new();
    let mut files_scanned = 0;

    info!("scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.file_type().is_dir() {
                return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !SCANNABLE_EXTENSIONS.contains(&ext) {
            continue;
        }

        match scan_file(path, rules) {
            Ok(audit) => {
                all_findings.extend(audit.findings);
                files_scanned += 1;
            }
            Err(e) => {
                info!("skipping {}: {}", path.display(), e);
            }
        }
    }

    info!(
        "scanned {} files, found {} issues",
        files_scanned,
        all_findings.len()
    );

    Ok(all_findings)
}
