use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Date range needs both bounds (from: {from:?}, to: {to:?})")]
    IncompleteDateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },

    #[error("Date range is inverted: {from} is after {to}")]
    InvertedDateRange { from: NaiveDate, to: NaiveDate },

    #[error("Size bounds are inverted: min {min} bytes > max {max} bytes")]
    InvertedSizeRange { min: u64, max: u64 },

    #[error("Could not determine the user's home directory")]
    NoHomeDirectory,

    #[error("Root is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
