// Pages that are allowed to mismatch without failing a run

use crate::error::Result;
use crate::id::PageId;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct KnownBadRegistry {
    ids: HashSet<PageId>,
}

impl KnownBadRegistry {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ids: ids.into_iter().map(|id| PageId::parse(id.as_ref())).collect(),
        }
    }

    /// Parse a known-bad list, keeping the entries that apply to `root`.
    ///
    /// One entry per line, `#` starts a comment. A bare id applies to every
    /// root; `<root-id> <page-id>` applies only to that root. Lines with more
    /// fields are skipped.
    pub fn parse(content: &str, root: &PageId) -> Self {
        let mut ids = HashSet::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("").trim();
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next(), fields.next()) {
                (Some(_), Some(_), Some(_)) => {
                    warn!(
                        "Skipping known-bad line {}: expected '<page-id>' or '<root-id> <page-id>', got '{}'",
                        number + 1,
                        line
                    );
                }
                (Some(page), None, _) => {
                    ids.insert(PageId::parse(page));
                }
                (Some(scope), Some(page), None) => {
                    if PageId::parse(scope) == *root {
                        ids.insert(PageId::parse(page));
                    }
                }
                _ => {}
            }
        }
        debug!("{} known-bad pages apply to {}", ids.len(), root);
        Self { ids }
    }

    pub fn from_file(path: &Path, root: &PageId) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content, root))
    }

    pub fn is_known_bad(&self, id: &PageId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
