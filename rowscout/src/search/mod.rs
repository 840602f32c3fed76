//! Streaming filter-and-paginate search over a record source.
//!
//! A scan is one forward pass over the source:
//! ```rust,ignore
//! let source = CsvSource::new("customers.csv");
//! let request = PageRequest::new(2, NonZeroUsize::new(50).unwrap());
//! let result = scan(&source, "paris", request)?;
//! println!("{} matches, showing {}", result.total_matches, result.records.len());
//! ```
//!
//! The work is split three ways:
//! 1. **Predicate** (`matcher`): a pure, case-insensitive substring test over the
//!    fields of one record, plus the blank-row check.
//! 2. **Page window** (`paginator`): hands out match ordinals and keeps only the
//!    records whose ordinal falls on the requested page.
//! 3. **Scan loop** (`engine`): reads the header, feeds every non-blank row through
//!    the predicate and the window, and switches to counting only once the page is
//!    full so the total stays exact without retaining more rows.
//!
//! Nothing is cached between scans. Each call opens the source afresh and the
//! reader is dropped before the call returns.
pub mod engine;
pub mod matcher;
pub mod paginator;

pub use engine::{read_header, scan, search};
pub use matcher::{is_blank_record, MatchStrategy, RecordMatcher};
pub use paginator::{PageRequest, PageWindow};
