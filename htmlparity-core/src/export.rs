// Persisting mismatching pages for offline diffing

use crate::error::Result;
use crate::id::PageId;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Two sibling directories, `exp` and `got`, holding the normalized reference
/// and rendered HTML of every mismatching page under the same file name.
#[derive(Debug, Clone)]
pub struct DiffArtifactExporter {
    expected_dir: PathBuf,
    got_dir: PathBuf,
}

impl DiffArtifactExporter {
    /// Create `<diff_dir>/exp` and `<diff_dir>/got` and empty them, so files
    /// from an earlier run cannot be paired with this one.
    pub fn prepare(diff_dir: &Path) -> Result<Self> {
        let exporter = Self {
            expected_dir: diff_dir.join("exp"),
            got_dir: diff_dir.join("got"),
        };
        for dir in [&exporter.expected_dir, &exporter.got_dir] {
            fs::create_dir_all(dir)?;
            remove_files_in_dir(dir)?;
        }
        Ok(exporter)
    }

    pub fn expected_dir(&self) -> &Path {
        &self.expected_dir
    }

    pub fn got_dir(&self) -> &Path {
        &self.got_dir
    }

    /// Write both variants as `<id>.html` and return `(expected, got)` paths.
    pub fn export_mismatch(
        &self,
        id: &PageId,
        expected: &[u8],
        got: &[u8],
    ) -> Result<(PathBuf, PathBuf)> {
        let file_name = format!("{}.html", id);
        let expected_path = self.expected_dir.join(&file_name);
        let got_path = self.got_dir.join(&file_name);

        fs::write(&expected_path, expected)?;
        fs::write(&got_path, got)?;
        debug!(
            "Exported {} to {} and {}",
            id,
            expected_path.display(),
            got_path.display()
        );
        Ok((expected_path, got_path))
    }
}

fn remove_files_in_dir(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
