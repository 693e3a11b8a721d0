use crate::compare::{Comparator, ComparisonOutcome};
use crate::diff::DiffPresenter;
use crate::error::{CheckError, Result};
use crate::export::DiffArtifactExporter;
use crate::id::PageId;
use crate::known_bad::KnownBadRegistry;
use crate::render::{HtmlRenderer, Renderer};
use crate::report::{PageReport, RunReport};
use crate::source::{PageSource, ReferenceSource};
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Breadth-first worklist over the page graph.
///
/// Pages may be queued several times (one per referencing parent); the
/// visited check at dequeue time makes sure each is handed out once.
#[derive(Debug)]
pub struct PageWalker {
    pending: VecDeque<PageId>,
    visited: HashSet<PageId>,
}

impl PageWalker {
    pub fn new(root: PageId) -> Self {
        Self {
            pending: VecDeque::from([root]),
            visited: HashSet::new(),
        }
    }

    /// Next page not visited yet, marked visited. `None` once the queue is
    /// drained.
    pub fn next_page(&mut self) -> Option<PageId> {
        while let Some(id) = self.pending.pop_front() {
            if self.visited.insert(id.clone()) {
                return Some(id);
            }
            debug!("Skipping already visited page {}", id);
        }
        None
    }

    /// Append sub-page ids to the tail of the queue, in order.
    pub fn enqueue<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.pending
            .extend(ids.into_iter().map(|id| PageId::parse(id.as_ref())));
    }

    pub fn is_visited(&self, id: &PageId) -> bool {
        self.visited.contains(id)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// Options for a check run.
pub struct CheckOptions {
    pub root: PageId,
    /// Directory receiving the `exp` and `got` mismatch directories.
    pub diff_dir: PathBuf,
    pub known_bad: KnownBadRegistry,
    pub compat: bool,
}

/// Callback invoked after every compared page
pub type PageResultCallback = Arc<dyn Fn(&PageReport) + Send + Sync>;

/// Callback invoked once the reference export is loaded, with its file count
pub type ReferenceLoadedCallback = Arc<dyn Fn(usize) + Send + Sync>;

pub struct Checker<'a, S, D> {
    source: &'a S,
    presenter: &'a D,
    renderer: &'a dyn Renderer,
    result_callback: Option<PageResultCallback>,
    reference_callback: Option<ReferenceLoadedCallback>,
}

impl<'a, S, D> Checker<'a, S, D>
where
    S: PageSource + ReferenceSource,
    D: DiffPresenter,
{
    pub fn new(source: &'a S, presenter: &'a D) -> Self {
        Self {
            source,
            presenter,
            renderer: &HtmlRenderer,
            result_callback: None,
            reference_callback: None,
        }
    }

    pub fn with_renderer(mut self, renderer: &'a dyn Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_result_callback(mut self, callback: PageResultCallback) -> Self {
        self.result_callback = Some(callback);
        self
    }

    pub fn with_reference_callback(mut self, callback: ReferenceLoadedCallback) -> Self {
        self.reference_callback = Some(callback);
        self
    }

    /// Walk every page reachable from the root and compare it with the
    /// reference export.
    ///
    /// Fetch failures abort with an error. A fail-fast mismatch stops the
    /// walk and is reported through `RunReport::fail_fast`; pages still
    /// queued are never visited.
    pub async fn check(&self, options: CheckOptions) -> Result<RunReport> {
        let CheckOptions {
            root,
            diff_dir,
            known_bad,
            compat,
        } = options;
        info!("Starting check of {}", root);

        let bundle = self
            .source
            .fetch_reference_bundle(&root)
            .await
            .map_err(|source| CheckError::ReferenceFetch {
                id: root.to_string(),
                source,
            })?;
        info!("There are {} files in the reference export", bundle.len());
        if let Some(ref callback) = self.reference_callback {
            callback(bundle.len());
        }

        let exporter = DiffArtifactExporter::prepare(&diff_dir)?;
        let mut comparator = Comparator::new(&bundle, &known_bad, &exporter, self.presenter)
            .with_renderer(self.renderer)
            .with_compat(compat);

        let mut report = RunReport::new(root.clone(), bundle.len());
        let mut walker = PageWalker::new(root);

        while let Some(id) = walker.next_page() {
            let page = self
                .source
                .fetch_page(&id)
                .await
                .map_err(|source| CheckError::PageFetch {
                    id: id.to_string(),
                    source,
                })?;
            walker.enqueue(page.sub_pages());

            let page_report = comparator.compare(walker.visited_count(), &id, &page)?;
            if let Some(ref callback) = self.result_callback {
                callback(&page_report);
            }
            let outcome = page_report.outcome;
            report.pages.push(page_report);

            if outcome == ComparisonOutcome::MismatchFailFast {
                info!(
                    "Stopping at first mismatch {}, {} page(s) left unchecked",
                    id,
                    walker.pending_count()
                );
                report.fail_fast = Some(id);
                return Ok(report);
            }
        }

        report.batched_mismatches = comparator.batched_mismatches();
        if report.batched_mismatches > 0 {
            self.presenter
                .dir_diff(exporter.expected_dir(), exporter.got_dir())?;
            report.dir_diff_launched = true;
        }

        info!(
            "Check complete. Visited {} pages, {} mismatched",
            walker.visited_count(),
            report.pages.iter().filter(|p| p.outcome.is_mismatch()).count()
        );
        Ok(report)
    }
}
