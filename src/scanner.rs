use crate::config::IndexConfig;
use chrono::{DateTime, Local};
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::{DirEntry, WalkDir};

/// Walks `root` once and returns every regular file passing the filters in `config`,
/// in the order the directory walk yields them. That order comes from the
/// filesystem and is not sorted.
///
/// Unreadable directories and files whose metadata cannot be read are skipped
/// with a warning.
#[must_use]
pub fn scan_files(root: &Path, config: &IndexConfig) -> Vec<PathBuf> {
    let suffix = config.extension_suffix();
    let mut skipped = 0usize;
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                skipped += 1;
                continue;
            }
        };

        if !is_regular_file(&entry) || !matches_type(&entry, suffix.as_deref()) {
            continue;
        }

        if config.needs_metadata() {
            match file_metadata(&entry) {
                Ok(meta) => {
                    if !matches_metadata(&meta, config) {
                        continue;
                    }
                }
                Err(e) => {
                    log::warn!("Permission denied or unreadable: {}: {e}", entry.path().display());
                    skipped += 1;
                    continue;
                }
            }
        }

        files.push(entry.into_path());
    }

    log::debug!(
        "Indexed {} files under {} ({} skipped)",
        files.len(),
        root.display(),
        skipped
    );
    files
}

/// Symlinks count when their target is a regular file. Symlinked directories
/// are never descended into.
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_symlink() {
        match fs::metadata(entry.path()) {
            Ok(meta) => meta.is_file(),
            Err(e) => {
                log::debug!("Dangling symlink {}: {e}", entry.path().display());
                false
            }
        }
    } else {
        file_type.is_file()
    }
}

/// Metadata of the file itself, or of the target for a symlink.
fn file_metadata(entry: &DirEntry) -> io::Result<Metadata> {
    if entry.path_is_symlink() {
        fs::metadata(entry.path())
    } else {
        entry.metadata().map_err(io::Error::from)
    }
}

fn matches_type(entry: &DirEntry, suffix: Option<&str>) -> bool {
    match suffix {
        None => true,
        Some(suffix) => entry.file_name().to_string_lossy().ends_with(suffix),
    }
}

fn matches_metadata(meta: &Metadata, config: &IndexConfig) -> bool {
    if let Some(range) = &config.size_range
        && !range.contains(meta.len())
    {
        return false;
    }

    if let Some(range) = &config.date_range {
        let created: DateTime<Local> = match creation_time(meta) {
            Ok(t) => t.into(),
            Err(_) => return false,
        };
        if !range.contains(created.naive_local()) {
            return false;
        }
    }

    true
}

/// Birth time where the platform records one, otherwise the inode change time.
pub fn creation_time(meta: &Metadata) -> io::Result<SystemTime> {
    meta.created().or_else(|_| change_time(meta))
}

#[cfg(unix)]
fn change_time(meta: &Metadata) -> io::Result<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    use std::time::Duration;

    let nanos = Duration::from_nanos(meta.ctime_nsec().max(0) as u64);
    let stamp = if meta.ctime() >= 0 {
        SystemTime::UNIX_EPOCH.checked_add(Duration::from_secs(meta.ctime() as u64) + nanos)
    } else {
        SystemTime::UNIX_EPOCH
            .checked_sub(Duration::from_secs(meta.ctime().unsigned_abs()))
            .and_then(|t| t.checked_add(nanos))
    };
    stamp.ok_or_else(|| io::Error::other("ctime out of range"))
}

#[cfg(not(unix))]
fn change_time(meta: &Metadata) -> io::Result<SystemTime> {
    meta.modified()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn make_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), "print('a')\n").unwrap();
        fs::write(dir.path().join("b.txt"), "bee").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.py"), "").unwrap();
        dir
    }

    fn names(root: &Path, files: &[PathBuf]) -> HashSet<String> {
        files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let dir = make_tree();
        let files = scan_files(dir.path(), &IndexConfig::new("", "py"));

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.to_string_lossy().ends_with(".py")));
        let expected: HashSet<String> =
            ["a.py".to_string(), format!("sub{}c.py", std::path::MAIN_SEPARATOR)]
                .into_iter()
                .collect();
        assert_eq!(names(dir.path(), &files), expected);
    }

    #[test]
    fn test_scan_wildcard_matches_everything() {
        let dir = make_tree();
        assert_eq!(scan_files(dir.path(), &IndexConfig::new("", "*")).len(), 3);
        assert_eq!(scan_files(dir.path(), &IndexConfig::new("", "")).len(), 3);
    }

    #[test]
    fn test_scan_extension_is_suffix_of_name_not_substring() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.pyc"), "").unwrap();
        fs::write(dir.path().join("py"), "").unwrap();
        fs::write(dir.path().join("x.PY"), "").unwrap();

        assert!(scan_files(dir.path(), &IndexConfig::new("", "py")).is_empty());
    }

    #[test]
    fn test_scan_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("folder.py")).unwrap();
        assert!(scan_files(dir.path(), &IndexConfig::new("", "py")).is_empty());
    }

    #[test]
    fn test_scan_size_bounds() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.log"), "").unwrap();
        fs::write(dir.path().join("small.log"), "12345").unwrap();
        fs::write(dir.path().join("big.log"), vec![b'x'; 4096]).unwrap();

        let config = IndexConfig::new("", "log")
            .with_sizes(Some(1), Some(1024))
            .unwrap();
        let files = scan_files(dir.path(), &config);
        assert_eq!(names(dir.path(), &files), HashSet::from(["small.log".to_string()]));

        let config = IndexConfig::new("", "log").with_sizes(Some(5), None).unwrap();
        assert_eq!(scan_files(dir.path(), &config).len(), 2);
    }

    #[test]
    fn test_scan_date_range_on_creation_time() {
        let dir = make_tree();
        let today = Local::now().date_naive();

        let around_today = IndexConfig::new("", "*")
            .with_dates(Some(today - Duration::days(1)), Some(today + Duration::days(1)))
            .unwrap();
        assert_eq!(scan_files(dir.path(), &around_today).len(), 3);

        let long_ago = IndexConfig::new("", "*")
            .with_dates(
                NaiveDate::from_ymd_opt(2000, 1, 1),
                NaiveDate::from_ymd_opt(2000, 12, 31),
            )
            .unwrap();
        assert!(scan_files(dir.path(), &long_ago).is_empty());
    }

    #[test]
    fn test_creation_time_is_recent_for_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.txt");
        fs::write(&path, "x").unwrap();

        let created: DateTime<Local> = creation_time(&fs::metadata(&path).unwrap()).unwrap().into();
        assert!(Local::now().signed_duration_since(created).num_minutes() < 5);
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(scan_files(dir.path(), &IndexConfig::new("", "*")).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_includes_symlinked_files() {
        let outside = TempDir::new().unwrap();
        let target = outside.path().join("target.py");
        fs::write(&target, "x = 1\n").unwrap();

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("plain.py"), "").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link.py")).unwrap();

        let files = scan_files(dir.path(), &IndexConfig::new("", "py"));
        assert_eq!(
            names(dir.path(), &files),
            HashSet::from(["plain.py".to_string(), "link.py".to_string()])
        );

        // Size filters look at the target, not the link itself
        let config = IndexConfig::new("", "py").with_sizes(Some(6), Some(6)).unwrap();
        assert_eq!(
            names(dir.path(), &scan_files(dir.path(), &config)),
            HashSet::from(["link.py".to_string()])
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_does_not_descend_into_symlinked_dirs() {
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("inner.py"), "").unwrap();

        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked_dir")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing.py"), dir.path().join("dangling.py"))
            .unwrap();

        assert!(scan_files(dir.path(), &IndexConfig::new("", "py")).is_empty());
    }
}
