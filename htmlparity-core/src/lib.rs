pub mod bundle;
pub mod compare;
pub mod diff;
pub mod error;
pub mod export;
pub mod id;
pub mod known_bad;
pub mod normalize;
pub mod render;
pub mod report;
pub mod source;
pub mod walk;

pub use bundle::ReferenceBundle;
pub use compare::{Comparator, ComparisonOutcome};
pub use diff::{DiffPresenter, ExternalDiffTools, RecordingPresenter};
pub use error::CheckError;
pub use export::DiffArtifactExporter;
pub use id::PageId;
pub use known_bad::KnownBadRegistry;
pub use normalize::normalize_html;
pub use render::{HtmlRenderer, RenderedPage, Renderer};
pub use report::{PageReport, ReportFormat, RunReport, generate_run_report};
pub use walk::{CheckOptions, Checker, PageResultCallback, PageWalker};
