// Lookup of reference files by expected name

use htmlparity_fetch::ReferenceFiles;
use tracing::warn;

/// The fetched reference export, read-only for the whole run.
///
/// Export paths carry a directory/title prefix the renderer does not
/// reproduce, so entries are matched by suffix against the rendered file
/// name.
#[derive(Debug, Clone, Default)]
pub struct ReferenceBundle {
    files: ReferenceFiles,
}

impl ReferenceBundle {
    pub fn new(files: ReferenceFiles) -> Self {
        Self { files }
    }

    /// First entry (in name order) whose name ends with `expected_name`.
    ///
    /// When several entries share the suffix the first still wins; the
    /// ambiguity is logged.
    pub fn find_by_expected_name(&self, expected_name: &str) -> Option<&[u8]> {
        let mut matches = self
            .files
            .iter()
            .filter(|(name, _)| name.ends_with(expected_name));
        let (name, data) = matches.next()?;
        let others: Vec<&str> = matches.map(|(name, _)| name.as_str()).collect();
        if !others.is_empty() {
            warn!(
                "'{}' matches several reference files, using '{}' (also: {})",
                expected_name,
                name,
                others.join(", ")
            );
        }
        Some(data.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl From<ReferenceFiles> for ReferenceBundle {
    fn from(files: ReferenceFiles) -> Self {
        Self::new(files)
    }
}

impl<S: Into<String>, D: Into<Vec<u8>>> FromIterator<(S, D)> for ReferenceBundle {
    fn from_iter<T: IntoIterator<Item = (S, D)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(name, data)| (name.into(), data.into()))
                .collect(),
        )
    }
}
