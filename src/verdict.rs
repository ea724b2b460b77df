//! Shared verdict model and the serializable finding records built from
//! rule results.
//!
//! Every rule assigns exactly one [`Verdict`] per inspected node. Typed rule
//! results borrow the document they were computed from; [`Finding`] is the
//! owned projection used by reports and machine-readable output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Three-valued outcome assigned to each inspected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Conforms.
    Pass,
    /// Should be addressed.
    Warning,
    /// Violates the rule.
    Fail,
}

impl Verdict {
    /// Whether this verdict should fail a CI run.
    pub fn is_failure(&self) -> bool {
        matches!(self, Verdict::Fail)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Warning => write!(f, "WARNING"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

/// Identifier for each rule in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// Alternative text on img / input[type=image] / area / svg
    Images,
    /// Alternative text on CSS background images
    BgImages,
    /// Table structure: headers, labels, layout detection
    Tables,
    /// Focus visibility and keyboard reachability
    Focus,
    /// Skip-navigation fragment links
    SkipNav,
    /// Document title
    PageTitle,
    /// Frame titles
    Frames,
    /// Heading inventory
    Headings,
    /// Page language declaration
    PageLang,
    /// New-window popups announced to the user
    UserRequest,
    /// Form control labels
    InputLabels,
    /// Composite ARIA widget patterns
    Widgets,
}

impl RuleId {
    /// All rules, in catalog order.
    pub const ALL: &'static [RuleId] = &[
        RuleId::Images,
        RuleId::BgImages,
        RuleId::Tables,
        RuleId::Focus,
        RuleId::SkipNav,
        RuleId::PageTitle,
        RuleId::Frames,
        RuleId::Headings,
        RuleId::PageLang,
        RuleId::UserRequest,
        RuleId::InputLabels,
        RuleId::Widgets,
    ];

    /// Stable kebab-case name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            RuleId::Images => "images",
            RuleId::BgImages => "bg-images",
            RuleId::Tables => "tables",
            RuleId::Focus => "focus",
            RuleId::SkipNav => "skip-nav",
            RuleId::PageTitle => "page-title",
            RuleId::Frames => "frames",
            RuleId::Headings => "headings",
            RuleId::PageLang => "page-lang",
            RuleId::UserRequest => "user-request",
            RuleId::InputLabels => "input-labels",
            RuleId::Widgets => "widgets",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleId::ALL
            .iter()
            .copied()
            .find(|r| r.name() == s)
            .ok_or_else(|| format!("unknown rule: {}", s))
    }
}

/// An owned, serializable audit finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Unique identifier
    pub id: Uuid,
    /// Producing tool
    pub source: String,
    /// Rule that produced this finding
    pub rule: RuleId,
    /// Verdict for the inspected node
    pub verdict: Verdict,
    /// Primary message (first issue, or a generic summary)
    pub message: String,
    /// All issue strings, in evaluation order
    pub issues: Vec<String>,
    /// Opening-tag snapshot of the inspected element
    pub element: Option<String>,
    /// File the document was read from, when scanning
    pub file: Option<PathBuf>,
    /// Whether the node was hidden at evaluation time
    pub hidden: bool,
    /// When this finding was created
    pub created_at: DateTime<Utc>,
}

impl Finding {
    /// Create a finding for a rule verdict.
    pub fn new(rule: RuleId, verdict: Verdict, issues: Vec<String>) -> Self {
        let message = issues
            .first()
            .cloned()
            .unwrap_or_else(|| format!("{} check reported {}", rule, verdict));
        Self {
            id: Uuid::new_v4(),
            source: "domaudit".to_string(),
            rule,
            verdict,
            message,
            issues,
            element: None,
            file: None,
            hidden: false,
            created_at: Utc::now(),
        }
    }

    /// Attach an opening-tag element snapshot.
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Attach the source file.
    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }

    /// Mark whether the node was hidden.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// An ordered collection of findings with aggregation helpers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Audit {
    /// All findings, in rule-catalog then document order
    pub findings: Vec<Finding>,
}

impl Audit {
    /// Create an empty audit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finding.
    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Extend with findings from an iterator.
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Findings with the given verdict.
    pub fn by_verdict(&self, verdict: Verdict) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.verdict == verdict).collect()
    }

    /// Findings produced by the given rule.
    pub fn by_rule(&self, rule: RuleId) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.rule == rule).collect()
    }

    /// All failures.
    pub fn failures(&self) -> Vec<&Finding> {
        self.by_verdict(Verdict::Fail)
    }

    /// All warnings.
    pub fn warnings(&self) -> Vec<&Finding> {
        self.by_verdict(Verdict::Warning)
    }

    /// Whether any finding is a failure.
    pub fn has_failures(&self) -> bool {
        self.findings.iter().any(|f| f.verdict.is_failure())
    }

    /// Total finding count.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Whether the audit is empty.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}
