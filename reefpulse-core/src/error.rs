use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReefError {
    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to process CSV '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("CSV '{0}' must have a header row and at least one data row")]
    NoDataRows(String),
}
