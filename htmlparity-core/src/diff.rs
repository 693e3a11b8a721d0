// Launching external diff viewers

use crate::error::{CheckError, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Shows mismatching files to the user.
pub trait DiffPresenter {
    /// Whether a tool that can compare whole directories is available.
    fn has_dir_diff(&self) -> bool;

    fn dir_diff(&self, expected_dir: &Path, got_dir: &Path) -> Result<()>;

    fn file_diff(&self, expected: &Path, got: &Path) -> Result<()>;
}

/// Diff tools found on this machine, probed once per run.
#[derive(Debug, Clone, Default)]
pub struct ExternalDiffTools {
    dir_tool: Option<PathBuf>,
    file_tool: Option<PathBuf>,
}

impl ExternalDiffTools {
    pub fn detect() -> Self {
        let tools = Self {
            dir_tool: find_dir_diff_tool(),
            file_tool: which::which("code").ok(),
        };
        info!(
            "Directory diff tool: {:?}, file diff tool: {:?}",
            tools.dir_tool, tools.file_tool
        );
        tools
    }

    /// Probe only the file diff tool, so every mismatch fails the run.
    pub fn without_dir_diff() -> Self {
        Self {
            dir_tool: None,
            file_tool: which::which("code").ok(),
        }
    }

    pub fn dir_tool(&self) -> Option<&Path> {
        self.dir_tool.as_deref()
    }
}

/// WinMerge (PATH or its per-user install location), then opendiff.
fn find_dir_diff_tool() -> Option<PathBuf> {
    if let Ok(path) = which::which("WinMergeU") {
        return Some(path);
    }
    let per_user = shellexpand::tilde("~/AppData/Local/Programs/WinMerge/WinMergeU.exe");
    let per_user = PathBuf::from(per_user.as_ref());
    if per_user.is_file() {
        return Some(per_user);
    }
    which::which("opendiff").ok()
}

fn is_winmerge(tool: &Path) -> bool {
    tool.file_name()
        .map(|name| name.to_string_lossy().contains("WinMergeU"))
        .unwrap_or(false)
}

fn launch(command: &mut Command) -> Result<()> {
    debug!("Launching {:?}", command);
    // the viewer outlives the run; it is never waited on
    command
        .spawn()
        .map(|_| ())
        .map_err(|e| CheckError::DiffTool(format!("{:?}: {}", command.get_program(), e)))
}

impl DiffPresenter for ExternalDiffTools {
    fn has_dir_diff(&self) -> bool {
        self.dir_tool.is_some()
    }

    fn dir_diff(&self, expected_dir: &Path, got_dir: &Path) -> Result<()> {
        let Some(ref tool) = self.dir_tool else {
            return Err(CheckError::DiffTool(
                "no directory diff tool available".to_string(),
            ));
        };
        let mut command = Command::new(tool);
        if is_winmerge(tool) {
            command.arg("/r");
        }
        command.arg(expected_dir).arg(got_dir);
        launch(&mut command)
    }

    fn file_diff(&self, expected: &Path, got: &Path) -> Result<()> {
        let Some(ref tool) = self.file_tool else {
            warn!(
                "No file diff tool found, compare {} and {} manually",
                expected.display(),
                got.display()
            );
            return Ok(());
        };
        let mut command = Command::new(tool);
        command
            .arg("--new-window")
            .arg("--diff")
            .arg(expected)
            .arg(got);
        launch(&mut command)
    }
}

/// One recorded presenter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffInvocation {
    Dir { expected: PathBuf, got: PathBuf },
    File { expected: PathBuf, got: PathBuf },
}

/// Presenter that launches nothing and remembers what it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    dir_diff_available: bool,
    invocations: RefCell<Vec<DiffInvocation>>,
}

impl RecordingPresenter {
    pub fn new(dir_diff_available: bool) -> Self {
        Self {
            dir_diff_available,
            invocations: RefCell::new(Vec::new()),
        }
    }

    pub fn invocations(&self) -> Vec<DiffInvocation> {
        self.invocations.borrow().clone()
    }
}

impl DiffPresenter for RecordingPresenter {
    fn has_dir_diff(&self) -> bool {
        self.dir_diff_available
    }

    fn dir_diff(&self, expected_dir: &Path, got_dir: &Path) -> Result<()> {
        self.invocations.borrow_mut().push(DiffInvocation::Dir {
            expected: expected_dir.to_path_buf(),
            got: got_dir.to_path_buf(),
        });
        Ok(())
    }

    fn file_diff(&self, expected: &Path, got: &Path) -> Result<()> {
        self.invocations.borrow_mut().push(DiffInvocation::File {
            expected: expected.to_path_buf(),
            got: got.to_path_buf(),
        });
        Ok(())
    }
}
