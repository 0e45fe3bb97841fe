use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Record file not found: {0}")]
    FileNotFound(String),

    #[error("Frame does not start with a channel header row")]
    MissingHeader,

    #[error("Header declares no data columns")]
    EmptyHeader,

    #[error("Sample count {count} does not fill rows of {width} channels")]
    ShapeMismatch { count: usize, width: usize },

    #[error("Failed to parse record: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, RecordError>;
