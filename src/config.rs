use crate::error::{IndexError, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Inclusive range of calendar days, `[from 00:00:00, to 23:59:59]` in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Both bounds or neither. A single bound is a configuration error.
    pub fn from_bounds(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Option<Self>> {
        match (from, to) {
            (None, None) => Ok(None),
            (Some(from), Some(to)) if from > to => Err(IndexError::InvertedDateRange { from, to }),
            (Some(from), Some(to)) => Ok(Some(DateRange { from, to })),
            _ => Err(IndexError::IncompleteDateRange { from, to }),
        }
    }

    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let start = self.from.and_hms_opt(0, 0, 0);
        // Nanoseconds up to the end of 23:59:59 keep sub-second stamps in range
        let end = self.to.and_hms_nano_opt(23, 59, 59, 999_999_999);
        match (start, end) {
            (Some(start), Some(end)) => at >= start && at <= end,
            _ => false,
        }
    }
}

/// Inclusive size bounds in bytes; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl SizeRange {
    pub fn from_bounds(min: Option<u64>, max: Option<u64>) -> Result<Option<Self>> {
        match (min, max) {
            (None, None) => Ok(None),
            (Some(min), Some(max)) if min > max => Err(IndexError::InvertedSizeRange { min, max }),
            _ => Ok(Some(SizeRange { min, max })),
        }
    }

    #[must_use]
    pub fn contains(&self, size: u64) -> bool {
        self.min.is_none_or(|min| size >= min) && self.max.is_none_or(|max| size <= max)
    }
}

/// Everything one indexing pass needs. Built once by the caller, never mutated by the engine.
#[derive(Debug, Clone, Default)]
pub struct IndexConfig {
    /// Blank means the user's home directory.
    pub root: String,
    /// `*` or empty matches every file; otherwise the extension without the dot.
    pub file_type: String,
    pub date_range: Option<DateRange>,
    pub size_range: Option<SizeRange>,
}

impl IndexConfig {
    #[must_use]
    pub fn new(root: impl Into<String>, file_type: impl Into<String>) -> Self {
        IndexConfig {
            root: root.into(),
            file_type: file_type.into(),
            date_range: None,
            size_range: None,
        }
    }

    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        self.date_range = DateRange::from_bounds(from, to)?;
        Ok(self)
    }

    pub fn with_sizes(mut self, min: Option<u64>, max: Option<u64>) -> Result<Self> {
        self.size_range = SizeRange::from_bounds(min, max)?;
        Ok(self)
    }

    /// The `.ext` suffix to match, or `None` when the filter is a wildcard.
    #[must_use]
    pub fn extension_suffix(&self) -> Option<String> {
        let ft = self.file_type.trim();
        if ft.is_empty() || ft == "*" {
            None
        } else {
            Some(format!(".{ft}"))
        }
    }

    /// Date and size filters both need a stat per file; the type filter does not.
    #[must_use]
    pub fn needs_metadata(&self) -> bool {
        self.date_range.is_some() || self.size_range.is_some()
    }
}
