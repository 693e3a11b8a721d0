use htmlparity_fetch::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Failed to fetch page {id}: {source}")]
    PageFetch {
        id: String,
        #[source]
        source: FetchError,
    },

    #[error("Failed to fetch reference export for {id}: {source}")]
    ReferenceFetch {
        id: String,
        #[source]
        source: FetchError,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Diff tool error: {0}")]
    DiffTool(String),
}

pub type Result<T> = std::result::Result<T, CheckError>;
