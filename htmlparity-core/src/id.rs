// Page identifier canonicalization

use serde::{Deserialize, Serialize};
use std::fmt;

/// A page identifier in canonical form.
///
/// Ids show up both dashed (`0367c2db-381a-4f8b-9ce3-60f388a6b2e3`) and
/// without dashes (`0367c2db381a4f8b9ce360f388a6b2e3`). The canonical form is
/// the no-dash one, lowercased, so every set and lookup keyed by `PageId`
/// treats both encodings as the same page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn parse(raw: &str) -> Self {
        PageId(canonicalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The dashed 8-4-4-4-12 form, or the canonical form unchanged when it
    /// is not 32 characters long.
    pub fn dashed(&self) -> String {
        to_dashed(&self.0)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(raw: &str) -> Self {
        PageId::parse(raw)
    }
}

impl From<String> for PageId {
    fn from(raw: String) -> Self {
        PageId::parse(&raw)
    }
}

/// Canonical (no-dash, lowercase) form of a raw id. Idempotent.
pub fn canonicalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub fn to_dashed(raw: &str) -> String {
    let id = canonicalize(raw);
    if id.len() != 32 || !id.is_ascii() {
        return id;
    }
    format!(
        "{}-{}-{}-{}-{}",
        &id[..8],
        &id[8..12],
        &id[12..16],
        &id[16..20],
        &id[20..]
    )
}

pub fn ids_equal(a: &str, b: &str) -> bool {
    canonicalize(a) == canonicalize(b)
}
