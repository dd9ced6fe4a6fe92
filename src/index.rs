use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::scanner;
use crate::types::{FileContent, FileDetails, PERMISSION_DENIED, UNAVAILABLE, format_timestamp};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Point-in-time snapshot of the files under a root that matched the filters.
///
/// Built once, read-only afterwards. Queries take `&self`, so one index can be
/// shared between threads without locking.
#[derive(Debug, Clone)]
pub struct FileIndex {
    config: IndexConfig,
    root: PathBuf,
    paths: Vec<PathBuf>,
}

impl FileIndex {
    /// Resolves the root, walks it and keeps the files that pass the filters.
    ///
    /// # Errors
    ///
    /// Fails only on misconfiguration: no home directory to fall back on, or a
    /// root that is missing or not a directory. A missing root is an error,
    /// not an empty index. Unreadable entries below the root are skipped, never
    /// reported as errors.
    pub fn build(config: IndexConfig) -> Result<Self> {
        let root = resolve_root(&config.root)?;
        let paths = scanner::scan_files(&root, &config);

        Ok(FileIndex {
            config,
            root,
            paths,
        })
    }

    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All indexed paths in traversal order.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths containing `needle` as a plain, case-sensitive substring.
    #[must_use]
    pub fn find(&self, needle: &str) -> Vec<&Path> {
        self.paths
            .iter()
            .filter(|p| p.to_string_lossy().contains(needle))
            .map(PathBuf::as_path)
            .collect()
    }

    /// The first `count` entries of the index.
    ///
    /// "Recent" here means earliest in traversal order. File timestamps play
    /// no part; callers have always relied on this ordering.
    #[must_use]
    pub fn recent(&self, count: usize) -> &[PathBuf] {
        &self.paths[..count.min(self.paths.len())]
    }

    /// Size and timestamps for `path`, with sentinels in place of anything the stat could not read.
    #[must_use]
    pub fn get_file_details(&self, path: &Path) -> FileDetails {
        let display = path.to_string_lossy().to_string();

        let meta = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return FileDetails::unavailable(display, PERMISSION_DENIED);
            }
            Err(e) => {
                log::warn!("Cannot stat {display}: {e}");
                return FileDetails::unavailable(display, UNAVAILABLE);
            }
        };

        let created = scanner::creation_time(&meta)
            .map_or_else(|_| UNAVAILABLE.to_string(), format_timestamp);
        let modified = meta
            .modified()
            .map_or_else(|_| UNAVAILABLE.to_string(), format_timestamp);

        FileDetails {
            path: display,
            size: meta.len().to_string(),
            created,
            modified,
            size_bytes: Some(meta.len()),
        }
    }

    /// Whole file decoded as UTF-8. Never fails; failures come back as sentinel variants.
    #[must_use]
    pub fn open_file(&self, path: &Path) -> FileContent {
        let display = path.to_string_lossy().to_string();

        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return FileContent::PermissionDenied(display);
            }
            Err(e) => {
                log::warn!("Cannot read {display}: {e}");
                return FileContent::Unreadable(display);
            }
        };

        match String::from_utf8(bytes) {
            Ok(text) => FileContent::Text(text),
            Err(_) => FileContent::Binary,
        }
    }
}

fn resolve_root(root: &str) -> Result<PathBuf> {
    let root = if root.trim().is_empty() {
        dirs::home_dir().ok_or(IndexError::NoHomeDirectory)?
    } else {
        PathBuf::from(root)
    };

    if !root.is_dir() {
        return Err(IndexError::RootNotADirectory(root));
    }

    Ok(std::path::absolute(&root)?)
}
