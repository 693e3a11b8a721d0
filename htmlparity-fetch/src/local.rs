use crate::error::{FetchError, Result};
use crate::page::PageTree;
use crate::ReferenceFiles;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Serves pages and the reference export from local directories.
///
/// Pages are `<pages_dir>/<id>.json`. The export directory is read
/// recursively; file names are `/`-separated paths relative to it.
pub struct LocalSource {
    pages_dir: PathBuf,
    export_dir: PathBuf,
}

impl LocalSource {
    pub fn new(pages_dir: impl Into<PathBuf>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            pages_dir: pages_dir.into(),
            export_dir: export_dir.into(),
        }
    }

    pub async fn fetch_page(&self, id: &str) -> Result<PageTree> {
        // ids come from page content; keep them inside pages_dir
        if !is_plain_file_stem(id) {
            warn!("Refusing to read page with unsafe id '{}'", id);
            return Err(FetchError::NotFound(id.to_string()));
        }
        let path = self.pages_dir.join(format!("{}.json", id));
        debug!("Reading page {} from {}", id, path.display());

        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FetchError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&data)?)
    }

    pub async fn fetch_reference_bundle(&self, root_id: &str) -> Result<ReferenceFiles> {
        info!(
            "Reading reference export for {} from {}",
            root_id,
            self.export_dir.display()
        );

        let mut files = ReferenceFiles::new();
        let mut pending = vec![self.export_dir.clone()];
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                    continue;
                }
                let data = tokio::fs::read(&path).await?;
                files.insert(relative_name(&self.export_dir, &path), data);
            }
        }

        if files.is_empty() {
            return Err(FetchError::EmptyBundle(root_id.to_string()));
        }
        Ok(files)
    }
}

fn relative_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_plain_file_stem(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\', '\0'])
        && !Path::new(id).has_root()
}
