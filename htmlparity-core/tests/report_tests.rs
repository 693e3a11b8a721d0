// Tests for report generation functionality

use htmlparity_core::report::{PageReport, ReportFormat, RunReport, generate_run_report};
use htmlparity_core::{ComparisonOutcome, PageId};
use std::path::PathBuf;

fn page(index: usize, id: &str, outcome: ComparisonOutcome, whitelisted: bool) -> PageReport {
    let mut report = PageReport::new(index, PageId::parse(id), format!("Page {}.html", id));
    report.outcome = outcome;
    report.whitelisted = whitelisted;
    report
}

fn sample_report() -> RunReport {
    let mut report = RunReport::new(PageId::parse("abc"), 3);
    report.pages = vec![
        page(1, "abc", ComparisonOutcome::Match, false),
        page(2, "def", ComparisonOutcome::MatchAfterNormalize, true),
        page(3, "ghi", ComparisonOutcome::ReferenceMissing, false),
    ];
    report
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str_text() {
    let format = ReportFormat::from_str("text");
    assert!(matches!(format, Some(ReportFormat::Text)));
}

#[test]
fn test_report_format_from_str_json() {
    let format = ReportFormat::from_str("json");
    assert!(matches!(format, Some(ReportFormat::Json)));
}

#[test]
fn test_report_format_from_str_case_insensitive() {
    assert!(matches!(
        ReportFormat::from_str("TEXT"),
        Some(ReportFormat::Text)
    ));
    assert!(matches!(
        ReportFormat::from_str("Json"),
        Some(ReportFormat::Json)
    ));
}

#[test]
fn test_report_format_from_str_invalid() {
    assert!(ReportFormat::from_str("csv").is_none());
    assert!(ReportFormat::from_str("").is_none());
}

// ============================================================================
// Status Line Tests
// ============================================================================

#[test]
fn test_status_line_match() {
    assert_eq!(page(1, "a", ComparisonOutcome::Match, false).status_line(), "ok");
}

#[test]
fn test_status_line_whitelisted_match() {
    assert_eq!(
        page(1, "a", ComparisonOutcome::MatchAfterNormalize, true).status_line(),
        "ok after formatting (AND ALSO WHITELISTED)"
    );
}

#[test]
fn test_status_line_whitelisted_mismatch() {
    assert_eq!(
        page(1, "a", ComparisonOutcome::MismatchWhitelisted, true).status_line(),
        "doesn't match but whitelisted"
    );
}

// ============================================================================
// Run Report Tests
// ============================================================================

#[test]
fn test_run_report_counts() {
    let report = sample_report();

    assert_eq!(report.count(ComparisonOutcome::Match), 1);
    assert_eq!(report.count(ComparisonOutcome::MatchAfterNormalize), 1);
    assert_eq!(report.count(ComparisonOutcome::MismatchFailFast), 0);
    assert!(report.is_success());
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_run_report_fail_fast_exit_code() {
    let mut report = sample_report();
    report.fail_fast = Some(PageId::parse("ghi"));

    assert!(!report.is_success());
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_outcome_is_mismatch() {
    assert!(ComparisonOutcome::MismatchBatched.is_mismatch());
    assert!(ComparisonOutcome::MismatchWhitelisted.is_mismatch());
    assert!(ComparisonOutcome::MismatchFailFast.is_mismatch());
    assert!(!ComparisonOutcome::Match.is_mismatch());
    assert!(!ComparisonOutcome::ReferenceMissing.is_mismatch());
}

// ============================================================================
// Report Generation Tests
// ============================================================================

#[test]
fn test_generate_text_report() {
    let text = generate_run_report(&sample_report(), ReportFormat::Text);

    assert!(text.contains("Root page: abc"));
    assert!(text.contains("Reference files: 3"));
    assert!(text.contains("Pages checked: 3"));
    assert!(text.contains("Matched: 1"));
    assert!(text.contains("Matched after formatting: 1"));
    assert!(text.contains("Missing reference: 1"));
    assert!(text.contains("03: ghi 'Page ghi.html' missing from reference files"));
    assert!(!text.contains("Mismatched"));
    assert!(!text.contains("Stopped at first mismatch"));
}

#[test]
fn test_generate_text_report_with_mismatch_paths() {
    let mut report = sample_report();
    let mut mismatch = page(4, "jkl", ComparisonOutcome::MismatchFailFast, false);
    mismatch.got_path = Some(PathBuf::from("/tmp/diff/got/jkl.html"));
    report.pages.push(mismatch);
    report.fail_fast = Some(PageId::parse("jkl"));

    let text = generate_run_report(&report, ReportFormat::Text);

    assert!(text.contains("Mismatched (fatal): 1"));
    assert!(text.contains("got: /tmp/diff/got/jkl.html"));
    assert!(text.contains("Stopped at first mismatch: jkl"));
}

#[test]
fn test_generate_json_report() {
    let json = generate_run_report(&sample_report(), ReportFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["root"], "abc");
    assert_eq!(value["reference_files"], 3);
    assert_eq!(value["pages"].as_array().unwrap().len(), 3);
    assert_eq!(value["pages"][1]["outcome"], "match_after_normalize");
    assert_eq!(value["pages"][1]["whitelisted"], true);
    // optional fields are omitted
    assert!(value.get("fail_fast").is_none());
    assert!(value["pages"][0].get("got_path").is_none());
}

#[test]
fn test_json_report_round_trips() {
    let json = generate_run_report(&sample_report(), ReportFormat::Json);
    let parsed: RunReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.pages.len(), 3);
    assert_eq!(parsed.pages[2].outcome, ComparisonOutcome::ReferenceMissing);
}
