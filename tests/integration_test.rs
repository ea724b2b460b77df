//! Integration tests for domaudit

use domaudit::context::{DocumentContext, NoFrames};
use domaudit::report::{generate_report, OutputFormat};
use domaudit::rules;
use domaudit::scanner;
use domaudit::verdict::{RuleId, Verdict};
use std::path::Path;

#[test]
fn test_scan_accessible_fixture() {
    let audit = scanner::scan_file(Path::new("tests/fixtures/accessible.html"), RuleId::ALL)
        .expect("scan should succeed");

    let failures = audit.failures();
    assert!(
        failures.is_empty(),
        "Accessible fixture should have no failures, got {}: {:?}",
        failures.len(),
        failures.iter().map(|f| (&f.rule, &f.message)).collect::<Vec<_>>()
    );
}

#[test]
fn test_scan_inaccessible_fixture() {
    let audit = scanner::scan_file(Path::new("tests/fixtures/inaccessible.html"), RuleId::ALL)
        .expect("scan should succeed");

    assert!(
        audit.len() >= 10,
        "Inaccessible fixture should have many findings, got {}",
        audit.len()
    );
    assert!(audit.has_failures());

    // The broken parts each surface under their own rule.
    for rule in [
        RuleId::Images,
        RuleId::Tables,
        RuleId::Focus,
        RuleId::SkipNav,
        RuleId::PageTitle,
        RuleId::Frames,
        RuleId::UserRequest,
        RuleId::InputLabels,
        RuleId::Widgets,
    ] {
        assert!(
            !audit.by_rule(rule).is_empty(),
            "expected findings from rule {}",
            rule
        );
    }
}

#[test]
fn test_scan_partial_fixture() {
    let audit = scanner::scan_file(Path::new("tests/fixtures/partial.html"), RuleId::ALL)
        .expect("scan should succeed");

    assert!(
        !audit.is_empty(),
        "Partial fixture should have some findings"
    );
    assert!(
        !audit.has_failures(),
        "Partial fixture should only warn, got failures: {:?}",
        audit.failures().iter().map(|f| &f.message).collect::<Vec<_>>()
    );
}

#[test]
fn test_scan_fixtures_directory() {
    let audit = scanner::scan_directory(Path::new("tests/fixtures"), RuleId::ALL)
        .expect("scan should succeed");

    assert!(
        audit.len() >= 10,
        "Fixture directory should have many total findings, got {}",
        audit.len()
    );
}

#[test]
fn test_json_report_valid() {
    let audit = scanner::scan_file(Path::new("tests/fixtures/inaccessible.html"), RuleId::ALL)
        .expect("scan should succeed");

    let report = generate_report(&audit, OutputFormat::Json);
    let parsed: serde_json::Value =
        serde_json::from_str(&report).expect("JSON report should be valid JSON");

    assert!(parsed["findings"].is_array());
    assert!(!parsed["findings"].as_array().unwrap().is_empty());
}

#[test]
fn test_sarif_report_valid() {
    let audit = scanner::scan_file(Path::new("tests/fixtures/inaccessible.html"), RuleId::ALL)
        .expect("scan should succeed");

    let report = generate_report(&audit, OutputFormat::Sarif);
    let parsed: serde_json::Value =
        serde_json::from_str(&report).expect("SARIF report should be valid JSON");

    assert_eq!(parsed["version"], "2.1.0");
    assert!(parsed["runs"].is_array());
    assert!(parsed["runs"][0]["results"].is_array());
    assert!(parsed["runs"][0]["tool"]["driver"]["name"] == "domaudit");
}

#[test]
fn test_text_report_format() {
    let audit = scanner::scan_file(Path::new("tests/fixtures/inaccessible.html"), RuleId::ALL)
        .expect("scan should succeed");

    let report = generate_report(&audit, OutputFormat::Text);

    assert!(report.contains("domaudit accessibility report"));
    assert!(report.contains("RESULT: FAIL"));
}

#[test]
fn test_rule_filter() {
    let all = scanner::scan_file(Path::new("tests/fixtures/inaccessible.html"), RuleId::ALL)
        .expect("scan should succeed");
    let only_images = scanner::scan_file(
        Path::new("tests/fixtures/inaccessible.html"),
        &[RuleId::Images],
    )
    .expect("scan should succeed");

    assert!(only_images.len() < all.len());
    assert!(only_images.findings.iter().all(|f| f.rule == RuleId::Images));
}

// End-to-end checks against in-memory documents.

#[test]
fn e2e_missing_alt() {
    let ctx = DocumentContext::parse(r#"<img src="b.jpg">"#);
    let results = rules::check_images(&ctx);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].valid, Verdict::Fail);
    assert!(results[0].issues.iter().any(|i| i.contains("missing alt attribute")));
}

#[test]
fn e2e_well_formed_table_passes() {
    let ctx = DocumentContext::parse(
        r#"<table><caption>T</caption><thead><tr><th scope="col">H</th></tr></thead></table>"#,
    );
    let results = rules::check_tables(&ctx);
    assert_eq!(results[0].valid, Verdict::Pass);
}

#[test]
fn e2e_dangling_skip_link() {
    let ctx = DocumentContext::parse(r##"<a href="#missing">x</a>"##);
    let results = rules::check_skip_nav(&ctx);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].valid, Verdict::Fail);
    assert!(!results[0].connected);
}

#[test]
fn e2e_tablist_with_dangling_panel_reference() {
    let ctx = DocumentContext::parse(
        r#"<div role="tablist"><div role="tab" aria-controls="p1">t</div></div>"#,
    );
    let results = rules::check_web_application(&ctx);
    let tablist = results.iter().find(|r| r.interface == "tablist").unwrap();
    assert_eq!(tablist.valid, Verdict::Fail);
}

#[test]
fn e2e_empty_title() {
    let ctx = DocumentContext::parse("<html><head><title></title></head><body></body></html>");
    assert_eq!(rules::check_page_title(&ctx).valid, Verdict::Fail);
}

#[test]
fn e2e_combobox_with_empty_listbox() {
    let ctx = DocumentContext::parse(
        r#"<div role="combobox"><input/><div role="listbox"></div></div>"#,
    );
    let results = rules::check_web_application(&ctx);
    let combobox = results.iter().find(|r| r.interface == "combobox").unwrap();
    assert_eq!(combobox.valid, Verdict::Fail);
    assert!(combobox
        .issues
        .iter()
        .any(|i| i.contains("listbox present but no option")));
}

#[test]
fn e2e_frames_without_loader_see_only_the_root_document() {
    let ctx = DocumentContext::parse(
        r#"<iframe src="a.html"></iframe><iframe src="b.html" title="Titled"></iframe>"#,
    );
    let results = rules::check_frames(&ctx, &NoFrames);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].valid, Verdict::Fail);
    assert_eq!(results[1].valid, Verdict::Pass);
}
