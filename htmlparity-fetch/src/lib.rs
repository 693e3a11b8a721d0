pub mod client;
pub mod error;
pub mod local;
pub mod page;

use std::collections::BTreeMap;

pub use client::ApiClient;
pub use error::FetchError;
pub use local::LocalSource;
pub use page::{Block, BlockKind, PageTree};

/// Reference export contents: file name as stored in the export, to raw bytes.
pub type ReferenceFiles = BTreeMap<String, Vec<u8>>;
