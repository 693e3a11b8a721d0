use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use htmlparity_core::report::{PageReport, ReportFormat, RunReport, generate_run_report};
use htmlparity_core::source::{PageSource, ReferenceSource};
use htmlparity_core::{
    CheckError, CheckOptions, Checker, ComparisonOutcome, DiffPresenter, ExternalDiffTools,
    KnownBadRegistry, PageId, normalize_html,
};
use htmlparity_fetch::{ApiClient, LocalSource};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Exit status for errors that stop a run before it can report.
pub const EXIT_FATAL: i32 = 2;

/// Where pages and the reference export come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSettings {
    Api {
        url: Url,
        token: Option<String>,
        timeout: u64,
    },
    Local {
        pages_dir: PathBuf,
        export_dir: PathBuf,
    },
}

/// Everything the `check` subcommand was asked to do.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub root: PageId,
    pub source: SourceSettings,
    pub data_dir: PathBuf,
    pub known_bad_file: Option<PathBuf>,
    pub compat: bool,
    pub dir_diff: bool,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
    pub quiet: bool,
}

impl CheckSettings {
    pub fn diff_dir(&self) -> PathBuf {
        self.data_dir.join("diff")
    }
}

pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

pub fn print_banner() {
    println!(
        "{} {}",
        "htmlparity".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
}

/// Expand `~` and environment variables in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
    }
}

fn expand_path_buf(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => expand_path(raw),
        None => path.to_path_buf(),
    }
}

/// Collect `check` arguments into settings. Clap has already enforced that
/// exactly one of the API or local sources was chosen.
pub fn check_settings_from_matches(args: &ArgMatches) -> Result<CheckSettings> {
    let root = args
        .get_one::<String>("root")
        .map(|raw| PageId::parse(raw))
        .context("--root is required")?;
    if root.as_str().is_empty() {
        anyhow::bail!("--root must not be empty");
    }

    let source = if let Some(url) = args.get_one::<Url>("api-url") {
        SourceSettings::Api {
            url: url.clone(),
            token: args.get_one::<String>("token").cloned(),
            timeout: args.get_one::<u64>("timeout").copied().unwrap_or(30),
        }
    } else {
        let pages_dir = args
            .get_one::<PathBuf>("pages-dir")
            .context("either --api-url or --pages-dir must be provided")?;
        let export_dir = args
            .get_one::<PathBuf>("export-dir")
            .context("--export-dir is required with --pages-dir")?;
        SourceSettings::Local {
            pages_dir: expand_path_buf(pages_dir),
            export_dir: expand_path_buf(export_dir),
        }
    };

    let data_dir = args
        .get_one::<String>("data-dir")
        .map(|raw| expand_path(raw))
        .context("--data-dir has no value")?;

    let format_name = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let format = ReportFormat::from_str(format_name)
        .with_context(|| format!("unknown report format '{}'", format_name))?;

    Ok(CheckSettings {
        root,
        source,
        data_dir,
        known_bad_file: args.get_one::<PathBuf>("known-bad").map(|p| expand_path_buf(p)),
        compat: !args.get_flag("no-compat"),
        dir_diff: !args.get_flag("no-dir-diff"),
        format,
        output: args.get_one::<PathBuf>("output").cloned(),
        quiet: args.get_flag("quiet"),
    })
}

pub fn load_known_bad(path: Option<&Path>, root: &PageId) -> Result<KnownBadRegistry> {
    match path {
        Some(path) => KnownBadRegistry::from_file(path, root)
            .with_context(|| format!("failed to read known-bad list {}", path.display())),
        None => Ok(KnownBadRegistry::default()),
    }
}

pub fn build_check_options(settings: &CheckSettings) -> Result<CheckOptions> {
    let known_bad = load_known_bad(settings.known_bad_file.as_deref(), &settings.root)?;
    debug!("{} known-bad pages loaded", known_bad.len());
    Ok(CheckOptions {
        root: settings.root.clone(),
        diff_dir: settings.diff_dir(),
        known_bad,
        compat: settings.compat,
    })
}

/// One progress line per page, e.g. `03: <id> 'Title <id>.html' ok`.
pub fn describe_page(page: &PageReport) -> String {
    format!(
        "{:02}: {} '{}' {}",
        page.index,
        page.id,
        page.file_name,
        page.status_line()
    )
}

fn print_page_result(page: &PageReport) {
    let line = describe_page(page);
    let line = match page.outcome {
        ComparisonOutcome::Match | ComparisonOutcome::MatchAfterNormalize => line.green(),
        ComparisonOutcome::ReferenceMissing | ComparisonOutcome::MismatchWhitelisted => {
            line.yellow()
        }
        ComparisonOutcome::MismatchBatched => line.red(),
        ComparisonOutcome::MismatchFailFast => line.red().bold(),
    };
    println!("{}", line);
    if page.outcome == ComparisonOutcome::MismatchFailFast {
        if let (Some(expected), Some(got)) = (&page.expected_path, &page.got_path) {
            println!("  {} {}", "expected:".blue(), expected.display());
            println!("  {} {}", "got:".blue(), got.display());
        }
    }
}

/// Run a check against any source, printing per-page lines unless quiet.
pub async fn run_check<S, D>(
    source: &S,
    presenter: &D,
    options: CheckOptions,
    quiet: bool,
) -> std::result::Result<RunReport, CheckError>
where
    S: PageSource + ReferenceSource,
    D: DiffPresenter,
{
    let spinner = ProgressBar::new_spinner();
    if quiet {
        spinner.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    } else if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Downloading reference export for {}", options.root));

    let loaded_spinner = spinner.clone();
    let mut checker = Checker::new(source, presenter).with_reference_callback(Arc::new(
        move |count: usize| {
            loaded_spinner
                .finish_with_message(format!("There are {} files in the reference export", count));
        },
    ));
    if !quiet {
        checker = checker.with_result_callback(Arc::new(|page: &PageReport| {
            print_page_result(page);
        }));
    }

    let result = checker.check(options).await;
    if !spinner.is_finished() {
        spinner.finish_and_clear();
    }
    result
}

fn write_report(report: &RunReport, format: ReportFormat, output: Option<&Path>) -> Result<()> {
    let rendered = generate_run_report(report, format);
    match output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            println!(
                "{} Report saved to: {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => {
            println!();
            print!("{}", rendered);
        }
    }
    Ok(())
}

fn print_settings(settings: &CheckSettings, presenter: &ExternalDiffTools) {
    println!("{} Root page: {}", "→".blue(), settings.root.dashed());
    match &settings.source {
        SourceSettings::Api { url, .. } => println!("{} API: {}", "→".blue(), url),
        SourceSettings::Local {
            pages_dir,
            export_dir,
        } => {
            println!("{} Pages: {}", "→".blue(), pages_dir.display());
            println!("{} Reference export: {}", "→".blue(), export_dir.display());
        }
    }
    println!("{} Diff directory: {}", "→".blue(), settings.diff_dir().display());
    match presenter.dir_tool() {
        Some(tool) => println!("{} Directory diff: {}", "→".blue(), tool.display()),
        None => println!("{} Directory diff: none, stopping at first mismatch", "→".blue()),
    }
    println!();
}

fn fatal(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "✗".red().bold(), message);
    std::process::exit(EXIT_FATAL);
}

pub async fn handle_check(sub_matches: &ArgMatches) {
    let settings = check_settings_from_matches(sub_matches).unwrap_or_else(|e| fatal(format!("{:#}", e)));
    let options = build_check_options(&settings).unwrap_or_else(|e| fatal(format!("{:#}", e)));
    let presenter = if settings.dir_diff {
        ExternalDiffTools::detect()
    } else {
        ExternalDiffTools::without_dir_diff()
    };

    if !settings.quiet {
        print_settings(&settings, &presenter);
    }

    let result = match &settings.source {
        SourceSettings::Api {
            url,
            token,
            timeout,
        } => {
            let mut client = ApiClient::with_timeout(url.as_str(), *timeout)
                .unwrap_or_else(|e| fatal(format!("failed to create API client: {}", e)));
            if let Some(token) = token {
                client = client.with_token(token.clone());
            }
            run_check(&client, &presenter, options, settings.quiet).await
        }
        SourceSettings::Local {
            pages_dir,
            export_dir,
        } => {
            let source = LocalSource::new(pages_dir, export_dir);
            run_check(&source, &presenter, options, settings.quiet).await
        }
    };

    let report = result.unwrap_or_else(|e| fatal(format!("Check failed: {}", e)));
    if let Err(e) = write_report(&report, settings.format, settings.output.as_deref()) {
        fatal(format!("{:#}", e));
    }
    std::process::exit(report.exit_code());
}

/// Normalize one file and return the pretty-printed bytes.
pub fn normalize_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(normalize_html(&bytes))
}

pub fn handle_normalize(sub_matches: &ArgMatches) {
    let Some(file) = sub_matches.get_one::<PathBuf>("FILE") else {
        fatal("FILE is required");
    };
    let normalized = normalize_file(file).unwrap_or_else(|e| fatal(format!("{:#}", e)));

    let written = match sub_matches.get_one::<PathBuf>("output") {
        Some(path) => fs::write(path, &normalized)
            .with_context(|| format!("failed to write {}", path.display())),
        None => io::stdout()
            .write_all(&normalized)
            .context("failed to write to stdout"),
    };
    if let Err(e) = written {
        fatal(format!("{:#}", e));
    }
}
