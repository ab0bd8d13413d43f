use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridlySyncError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("CSV export is missing the \"{column}\" column")]
    MissingColumn { column: String },

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Gridly returned {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("Upload of chunk {chunk} of {total} failed: {source}")]
    UploadFailed {
        chunk: usize,
        total: usize,
        #[source]
        source: Box<GridlySyncError>,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid entries: {0}")]
    InvalidEntries(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl GridlySyncError {
    /// Status code carried by the error, looking through upload wrappers.
    pub fn status(&self) -> Option<u16> {
        match self {
            GridlySyncError::HttpStatusError { status, .. } => Some(*status),
            GridlySyncError::UploadFailed { source, .. } => source.status(),
            GridlySyncError::TransportError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GridlySyncError>;
