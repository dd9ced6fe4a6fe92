//! File indexer - walk a directory tree once, then query the snapshot
//!
//! The index keeps every regular file under a root that passes an extension
//! filter and optional creation-date and size bounds. Queries run against
//! that snapshot:
//!
//! - `find`: plain substring match on the path
//! - `recent`: the first N entries in traversal order
//! - `get_file_details`: size and timestamps, sentinels on access failure
//! - `open_file`: whole-file UTF-8 preview, sentinels on failure
//!
//! # Example
//!
//! ```no_run
//! use file_indexer::{FileIndex, IndexConfig};
//!
//! let index = FileIndex::build(IndexConfig::new("/home/alice/src", "rs"))?;
//! for path in index.find("main") {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), file_indexer::IndexError>(())
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod report;
pub mod scanner;
pub mod types;

pub use config::{DateRange, IndexConfig, SizeRange};
pub use error::{IndexError, Result};
pub use index::FileIndex;
pub use types::{FileContent, FileDetails};
