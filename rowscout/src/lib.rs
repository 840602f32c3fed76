pub mod config;
pub mod errors;
pub mod metrics;
pub mod results;
pub mod search;
pub mod source;

pub use config::{ConfigOverrides, ScanConfig};
pub use errors::{SearchError, SearchResult};
pub use results::{total_pages, ScanResult, ScanStats, ID_COLUMN};
pub use search::{read_header, scan, search, PageRequest};
pub use source::{CsvSource, MemorySource, Record, RecordReader, RecordSource};
