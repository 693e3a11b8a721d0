// Classifying a rendered page against its reference

use crate::bundle::ReferenceBundle;
use crate::diff::DiffPresenter;
use crate::error::Result;
use crate::export::DiffArtifactExporter;
use crate::id::PageId;
use crate::known_bad::KnownBadRegistry;
use crate::normalize::normalize_html;
use crate::render::{HtmlRenderer, Renderer};
use crate::report::PageReport;
use htmlparity_fetch::PageTree;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOutcome {
    /// Byte-identical to the reference.
    Match,
    /// Identical once both sides are normalized.
    MatchAfterNormalize,
    /// No reference file ends with the rendered file name.
    ReferenceMissing,
    /// Mismatch exported for the end-of-run directory diff.
    MismatchBatched,
    /// Mismatch on a known-bad page; tolerated.
    MismatchWhitelisted,
    /// Mismatch that ends the run.
    MismatchFailFast,
}

impl ComparisonOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOutcome::Match => "match",
            ComparisonOutcome::MatchAfterNormalize => "match_after_normalize",
            ComparisonOutcome::ReferenceMissing => "reference_missing",
            ComparisonOutcome::MismatchBatched => "mismatch_batched",
            ComparisonOutcome::MismatchWhitelisted => "mismatch_whitelisted",
            ComparisonOutcome::MismatchFailFast => "mismatch_fail_fast",
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            ComparisonOutcome::MismatchBatched
                | ComparisonOutcome::MismatchWhitelisted
                | ComparisonOutcome::MismatchFailFast
        )
    }
}

pub struct Comparator<'a> {
    bundle: &'a ReferenceBundle,
    known_bad: &'a KnownBadRegistry,
    exporter: &'a DiffArtifactExporter,
    presenter: &'a dyn DiffPresenter,
    renderer: &'a dyn Renderer,
    compat: bool,
    has_dir_diff: bool,
    reference_name_listings: usize,
    batched: usize,
}

impl<'a> Comparator<'a> {
    pub fn new(
        bundle: &'a ReferenceBundle,
        known_bad: &'a KnownBadRegistry,
        exporter: &'a DiffArtifactExporter,
        presenter: &'a dyn DiffPresenter,
    ) -> Self {
        Self {
            bundle,
            known_bad,
            exporter,
            presenter,
            renderer: &HtmlRenderer,
            compat: true,
            has_dir_diff: presenter.has_dir_diff(),
            reference_name_listings: 0,
            batched: 0,
        }
    }

    pub fn with_renderer(mut self, renderer: &'a dyn Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_compat(mut self, compat: bool) -> Self {
        self.compat = compat;
        self
    }

    /// Number of mismatches exported for the directory diff so far.
    pub fn batched_mismatches(&self) -> usize {
        self.batched
    }

    /// How many times the reference file names were dumped; at most once.
    pub fn reference_name_listings(&self) -> usize {
        self.reference_name_listings
    }

    /// Render `page`, find its reference and classify the pair.
    ///
    /// Mismatches are exported before classification; a fail-fast mismatch
    /// has already had its file diff launched when this returns.
    pub fn compare(&mut self, index: usize, id: &PageId, page: &PageTree) -> Result<PageReport> {
        let rendered = self.renderer.render(page, self.compat);
        let whitelisted = self.known_bad.is_known_bad(id);
        let mut report = PageReport::new(index, id.clone(), rendered.file_name.clone());
        report.title = page.title().to_string();
        report.whitelisted = whitelisted;

        let Some(expected) = self.bundle.find_by_expected_name(&rendered.file_name) else {
            warn!(
                "'{}' from '{}' is not present in the reference files",
                rendered.file_name,
                page.title()
            );
            if self.reference_name_listings == 0 {
                let names: Vec<&str> = self.bundle.names().collect();
                warn!("Names in reference files:\n  {}", names.join("\n  "));
                self.reference_name_listings += 1;
            }
            report.outcome = ComparisonOutcome::ReferenceMissing;
            return Ok(report);
        };

        if rendered.html == expected {
            report.outcome = ComparisonOutcome::Match;
            return Ok(report);
        }

        let expected_normalized = normalize_html(expected);
        let got_normalized = normalize_html(&rendered.html);
        if expected_normalized == got_normalized {
            report.outcome = ComparisonOutcome::MatchAfterNormalize;
            return Ok(report);
        }

        let (expected_path, got_path) =
            self.exporter
                .export_mismatch(id, &expected_normalized, &got_normalized)?;
        info!("HTML for {} ({}) doesn't match", id, rendered.file_name);
        report.expected_path = Some(expected_path.clone());
        report.got_path = Some(got_path.clone());

        report.outcome = if self.has_dir_diff {
            self.batched += 1;
            ComparisonOutcome::MismatchBatched
        } else if whitelisted {
            ComparisonOutcome::MismatchWhitelisted
        } else {
            self.presenter.file_diff(&expected_path, &got_path)?;
            ComparisonOutcome::MismatchFailFast
        };
        Ok(report)
    }
}
