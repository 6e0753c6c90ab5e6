use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The input could not be opened. Nothing was streamed.
    #[error("Failed to open source '{path}': {source}")]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single CSV record could not be parsed. The line is skipped.
    #[error("Malformed record at line {line}: {source}")]
    RecordParse {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// The input failed mid-stream. The counts so far are incomplete.
    #[error("Failed to read source at line {line}: {source}")]
    SourceRead {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid email address format: '{0}'")]
    InvalidEmail(String),

    #[error("Failed to write report: {0}")]
    SinkWrite(#[source] std::io::Error),

    #[error("Unknown sort key '{0}' (expected 'name' or 'count')")]
    InvalidSortKey(String),

    #[error("Unknown sort order '{0}' (expected 'asc' or 'desc')")]
    InvalidSortOrder(String),

    #[error("Record reader thread panicked")]
    ProducerPanicked,
}

pub type Result<T> = std::result::Result<T, ImportError>;
