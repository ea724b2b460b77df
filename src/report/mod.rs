//! Report generation for audit findings.
//!
//! Supports multiple output formats:
//! - Text: human-readable findings grouped by verdict
//! - JSON: structured findings for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI
//!   integration

use crate::verdict::{Audit, Verdict};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report from an audit
pub fn generate_report(audit: &Audit, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(audit),
        OutputFormat::Json => generate_json_report(audit),
        OutputFormat::Sarif => generate_sarif_report(audit),
    }
}

/// Generate human-readable text report
fn generate_text_report(audit: &Audit) -> String {
    let mut output = String::new();

    output.push_str("=== domaudit accessibility report ===\n\n");

    if audit.is_empty() {
        output.push_str("No accessibility issues found. All checks passed.\n");
        return output;
    }

    let failures = audit.failures().len();
    let warnings = audit.warnings().len();

    output.push_str(&format!(
        "Found {} issue(s): {} failure(s), {} warning(s)\n\n",
        audit.len(),
        failures,
        warnings
    ));

    for verdict in &[Verdict::Fail, Verdict::Warning] {
        let group = audit.by_verdict(*verdict);
        if group.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", verdict, group.len()));

        for finding in group {
            output.push_str(&format!("[{}] {}\n", finding.rule, finding.message));

            for issue in finding.issues.iter().skip(1) {
                output.push_str(&format!("  Also: {}\n", issue));
            }

            if let Some(ref element) = finding.element {
                output.push_str(&format!("  Element: {}\n", element));
            }

            if let Some(ref file) = finding.file {
                output.push_str(&format!("  File: {}\n", file.display()));
            }

            if finding.hidden {
                output.push_str("  Note: element was hidden at evaluation time\n");
            }

            output.push('\n');
        }
    }

    if audit.has_failures() {
        output.push_str("RESULT: FAIL (failures found)\n");
    } else if warnings > 0 {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

/// Generate JSON report
fn generate_json_report(audit: &Audit) -> String {
    serde_json::to_string_pretty(audit)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize findings: {}\"}}", e))
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

/// Generate SARIF report
fn generate_sarif_report(audit: &Audit) -> String {
    let results: Vec<SarifResult> = audit
        .findings
        .iter()
        .map(|f| {
            let level = match f.verdict {
                Verdict::Fail => "error",
                Verdict::Warning => "warning",
                Verdict::Pass => "note",
            };

            let mut locations = Vec::new();
            if let Some(ref file) = f.file {
                locations.push(SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: file.display().to_string(),
                        },
                    },
                });
            }

            SarifResult {
                rule_id: f.rule.to_string(),
                level: level.to_string(),
                message: SarifMessage {
                    text: f.message.clone(),
                },
                locations,
            }
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "domaudit".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://github.com/domaudit/domaudit".to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e))
}
