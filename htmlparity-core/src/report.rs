// Run results and report generation

use crate::compare::ComparisonOutcome;
use crate::id::PageId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Result of comparing one visited page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    /// 1-based position in visit order.
    pub index: usize,
    pub id: PageId,
    pub title: String,
    pub file_name: String,
    pub outcome: ComparisonOutcome,
    pub whitelisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub got_path: Option<PathBuf>,
}

impl PageReport {
    pub fn new(index: usize, id: PageId, file_name: String) -> Self {
        Self {
            index,
            id,
            title: String::new(),
            file_name,
            outcome: ComparisonOutcome::ReferenceMissing,
            whitelisted: false,
            expected_path: None,
            got_path: None,
        }
    }

    /// Short human-readable status, e.g. `ok (AND ALSO WHITELISTED)`.
    pub fn status_line(&self) -> String {
        let status = match self.outcome {
            ComparisonOutcome::Match => "ok",
            ComparisonOutcome::MatchAfterNormalize => "ok after formatting",
            ComparisonOutcome::ReferenceMissing => "missing from reference files",
            ComparisonOutcome::MismatchBatched => "doesn't match (queued for directory diff)",
            ComparisonOutcome::MismatchWhitelisted => "doesn't match but whitelisted",
            ComparisonOutcome::MismatchFailFast => "doesn't match",
        };
        let matched = matches!(
            self.outcome,
            ComparisonOutcome::Match | ComparisonOutcome::MatchAfterNormalize
        );
        if matched && self.whitelisted {
            format!("{} (AND ALSO WHITELISTED)", status)
        } else {
            status.to_string()
        }
    }
}

/// Everything a run produced. The caller decides the exit status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub root: PageId,
    pub reference_files: usize,
    pub pages: Vec<PageReport>,
    pub batched_mismatches: usize,
    /// Page whose mismatch stopped the run, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_fast: Option<PageId>,
    pub dir_diff_launched: bool,
}

impl RunReport {
    pub fn new(root: PageId, reference_files: usize) -> Self {
        Self {
            root,
            reference_files,
            pages: Vec::new(),
            batched_mismatches: 0,
            fail_fast: None,
            dir_diff_launched: false,
        }
    }

    pub fn count(&self, outcome: ComparisonOutcome) -> usize {
        self.pages.iter().filter(|p| p.outcome == outcome).count()
    }

    pub fn is_success(&self) -> bool {
        self.fail_fast.is_none()
    }

    /// 0 unless a fail-fast mismatch stopped the run.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}

pub fn generate_run_report(report: &RunReport, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => generate_text_report(report),
        ReportFormat::Json => serde_json::to_string_pretty(report)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
    }
}

fn generate_text_report(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    out.push_str("# Summary:\n");
    out.push_str(&format!("  Root page: {}\n", report.root));
    out.push_str(&format!("  Reference files: {}\n", report.reference_files));
    out.push_str(&format!("  Pages checked: {}\n", report.pages.len()));

    let rows = [
        ("Matched", ComparisonOutcome::Match),
        ("Matched after formatting", ComparisonOutcome::MatchAfterNormalize),
        ("Missing reference", ComparisonOutcome::ReferenceMissing),
        ("Mismatched (batched)", ComparisonOutcome::MismatchBatched),
        ("Mismatched (whitelisted)", ComparisonOutcome::MismatchWhitelisted),
        ("Mismatched (fatal)", ComparisonOutcome::MismatchFailFast),
    ];
    for (label, outcome) in rows {
        let count = report.count(outcome);
        if count > 0 {
            out.push_str(&format!("  {}: {}\n", label, count));
        }
    }

    let mismatches: Vec<&PageReport> = report
        .pages
        .iter()
        .filter(|p| p.outcome.is_mismatch() || p.outcome == ComparisonOutcome::ReferenceMissing)
        .collect();
    if !mismatches.is_empty() {
        out.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
        out.push_str("## Problems\n");
        for page in mismatches {
            out.push_str(&format!(
                "  {:02}: {} '{}' {}\n",
                page.index,
                page.id,
                page.file_name,
                page.status_line()
            ));
            if let Some(ref path) = page.got_path {
                out.push_str(&format!("      got: {}\n", path.display()));
            }
        }
    }

    if let Some(ref id) = report.fail_fast {
        out.push_str(&format!("\nStopped at first mismatch: {}\n", id));
    }
    if report.dir_diff_launched {
        out.push_str(&format!(
            "\nDirectory diff opened for {} mismatching page(s)\n",
            report.batched_mismatches
        ));
    }
    out
}
