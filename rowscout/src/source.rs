//! Record sources.
//!
//! The scanner only needs to pull records forward, one at a time. A [`RecordSource`]
//! knows how to open a fresh reader for each scan; the [`RecordReader`] it hands back
//! yields records until it returns `Ok(None)`. Closing is `Drop`: the reader owns the
//! underlying handle, so it is released on every exit path, including early return
//! through `?`.
//!
//! Parsing (delimiters, quoting, decoding) is entirely the source's business. The
//! scanner treats a record as an opaque list of fields.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use tracing::{trace, warn};

use crate::config::ScanConfig;
use crate::errors::{SearchError, SearchResult};

/// One logical row of field values
pub type Record = Vec<String>;

const BUFFER_CAPACITY: usize = 65536;

/// Something that can be opened for a single forward pass over its records
pub trait RecordSource {
    type Reader: RecordReader;

    /// Opens a fresh reader positioned at the first record (the header)
    fn open(&self) -> SearchResult<Self::Reader>;

    /// Human-readable name used in errors and logs
    fn describe(&self) -> String;
}

/// Forward-only cursor over the records of an opened source
pub trait RecordReader {
    /// Returns the next record, or `None` at end of stream
    fn read_next(&mut self) -> SearchResult<Option<Record>>;
}

/// A delimited text file read through the `csv` crate.
///
/// Rows may have any number of fields; no arity check is made against the header.
/// Invalid UTF-8 is replaced rather than rejected.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    delimiter: u8,
    quote: u8,
}

impl CsvSource {
    /// Creates a comma-separated source with `"` quoting
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
            quote: b'"',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Builds a source from the file path, delimiter and quote in `config`
    pub fn from_config(config: &ScanConfig) -> SearchResult<Self> {
        Ok(Self::new(&config.file_path)
            .with_delimiter(config.delimiter_byte()?)
            .with_quote(config.quote_byte()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvSource {
    type Reader = CsvRecordReader<BufReader<File>>;

    fn open(&self) -> SearchResult<Self::Reader> {
        trace!("Opening record source: {}", self.path.display());

        let file = File::open(&self.path).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::NotFound => "file not found".to_string(),
                ErrorKind::PermissionDenied => "permission denied".to_string(),
                _ => e.to_string(),
            };
            SearchError::source_unavailable(self.describe(), reason)
        })?;

        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .from_reader(BufReader::with_capacity(BUFFER_CAPACITY, file));

        Ok(CsvRecordReader::new(reader, self.describe()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reader half of [`CsvSource`]; also usable over any `Read` for in-memory text
pub struct CsvRecordReader<R> {
    inner: csv::Reader<R>,
    row: csv::ByteRecord,
    name: String,
    lossy_reported: bool,
}

impl<R: Read> CsvRecordReader<R> {
    pub fn new(inner: csv::Reader<R>, name: impl Into<String>) -> Self {
        Self {
            inner,
            row: csv::ByteRecord::new(),
            name: name.into(),
            lossy_reported: false,
        }
    }
}

impl<R: Read> RecordReader for CsvRecordReader<R> {
    fn read_next(&mut self) -> SearchResult<Option<Record>> {
        let more = self
            .inner
            .read_byte_record(&mut self.row)
            .map_err(|e| SearchError::source_unavailable(&self.name, e.to_string()))?;
        if !more {
            return Ok(None);
        }

        let line = self.row.position().map_or(0, |p| p.line());
        let Self {
            row,
            name,
            lossy_reported,
            ..
        } = self;
        let record = row
            .iter()
            .map(|field| decode_field(field, name, line, lossy_reported))
            .collect();
        Ok(Some(record))
    }
}

/// Decodes one field, replacing invalid UTF-8 and warning once per reader
fn decode_field(bytes: &[u8], name: &str, line: u64, lossy_reported: &mut bool) -> String {
    match std::str::from_utf8(bytes) {
        Ok(field) => field.to_owned(),
        Err(_) => {
            if !*lossy_reported {
                warn!("Invalid UTF-8 replaced in {} (first at line {})", name, line);
                *lossy_reported = true;
            }
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Records held in memory. The first record is the header.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Record>,
    unavailable: Option<String>,
}

impl MemorySource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            unavailable: None,
        }
    }

    /// Builds a source from string slices, header first
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|field| field.to_string()).collect())
                .collect(),
        )
    }

    /// A source whose `open` always fails with the given reason
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            unavailable: Some(reason.into()),
        }
    }
}

impl RecordSource for MemorySource {
    type Reader = std::vec::IntoIter<Record>;

    fn open(&self) -> SearchResult<Self::Reader> {
        if let Some(reason) = &self.unavailable {
            return Err(SearchError::source_unavailable(self.describe(), reason.clone()));
        }
        Ok(self.records.clone().into_iter())
    }

    fn describe(&self) -> String {
        format!("<memory: {} records>", self.records.len())
    }
}

impl RecordReader for std::vec::IntoIter<Record> {
    fn read_next(&mut self) -> SearchResult<Option<Record>> {
        Ok(self.next())
    }
}
