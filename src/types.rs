use chrono::{DateTime, Local};
use std::fmt;
use std::time::SystemTime;

pub const PERMISSION_DENIED: &str = "Permission denied";
pub const UNAVAILABLE: &str = "Unavailable";
pub const BINARY_CONTENT: &str = "Cannot display content: unsupported file format or binary file";

/// `ctime`-style stamp, e.g. `Mon Jul 29 09:05:00 2024`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

#[must_use]
pub fn format_timestamp(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format(TIMESTAMP_FORMAT).to_string()
}

/// Metadata record for one indexed file. Fields that could not be read hold a sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDetails {
    pub path: String,
    pub size: String,
    pub created: String,
    pub modified: String,
    /// Raw byte count, `None` when the stat failed.
    pub size_bytes: Option<u64>,
}

impl FileDetails {
    #[must_use]
    pub fn unavailable(path: String, sentinel: &str) -> Self {
        FileDetails {
            path,
            size: sentinel.to_string(),
            created: sentinel.to_string(),
            modified: sentinel.to_string(),
            size_bytes: None,
        }
    }
}

/// Outcome of reading a file for preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    PermissionDenied(String),
    Binary,
    Unreadable(String),
}

impl FileContent {
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, FileContent::Text(_))
    }
}

impl fmt::Display for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileContent::Text(text) => f.write_str(text),
            FileContent::PermissionDenied(path) => write!(f, "{PERMISSION_DENIED}: {path}"),
            FileContent::Binary => f.write_str(BINARY_CONTENT),
            FileContent::Unreadable(path) => write!(f, "Cannot read file: {path}"),
        }
    }
}
