use tracing::{debug, info};

use super::matcher::{is_blank_record, RecordMatcher};
use super::paginator::{PageRequest, PageWindow};
use crate::config::ScanConfig;
use crate::errors::{SearchError, SearchResult};
use crate::metrics::ScanMetrics;
use crate::results::{ScanResult, ID_COLUMN};
use crate::source::{CsvSource, Record, RecordReader, RecordSource};

/// Scans `source` once, returning the requested page of records matching `query`
/// and the exact number of matches in the whole source.
///
/// The first record of the source is the header. Blank data rows are skipped and
/// take no ID. Once the page is full the remaining rows are still read, but only
/// counted, so memory stays bounded by the page size.
pub fn scan<S>(source: &S, query: &str, request: PageRequest) -> SearchResult<ScanResult>
where
    S: RecordSource + ?Sized,
{
    info!(
        "Scanning {} for {:?} (page {}, page size {})",
        source.describe(),
        query,
        request.page,
        request.page_size
    );

    let mut reader = source.open()?;
    let header = read_header_row(&mut reader, source)?;

    let matcher = RecordMatcher::new(query);
    let mut window = PageWindow::new(request);
    let mut metrics = ScanMetrics::new();
    let mut total_matches: u64 = 0;

    while let Some(record) = reader.read_next()? {
        metrics.record_row();
        if is_blank_record(&record) {
            metrics.record_empty_row();
            continue;
        }

        if window.is_filled() {
            metrics.record_early_exit(metrics.rows_read() - 1);
            metrics.record_count_only_row();
            if matcher.is_match(&record) {
                total_matches += 1;
            }
            continue;
        }

        if matcher.is_match(&record) {
            total_matches += 1;
            window.offer(record);
        }
    }
    drop(reader);

    debug!(
        "Offered {} matches to the page window, kept {}",
        window.offered(),
        window.len()
    );
    metrics.log_stats();
    info!(
        "Scan complete. Found {} matches, returning {} records",
        total_matches,
        window.len()
    );

    Ok(ScanResult {
        header,
        records: window.into_records(),
        total_matches,
        stats: metrics.get_stats(),
    })
}

/// Opens `source` and returns its header with the ID column prepended
pub fn read_header<S>(source: &S) -> SearchResult<Record>
where
    S: RecordSource + ?Sized,
{
    let mut reader = source.open()?;
    read_header_row(&mut reader, source)
}

/// Searches the file named in `config`
pub fn search(config: &ScanConfig, query: &str, page: usize) -> SearchResult<ScanResult> {
    let source = CsvSource::from_config(config)?;
    scan(&source, query, config.page_request(page))
}

fn read_header_row<S, R>(reader: &mut R, source: &S) -> SearchResult<Record>
where
    S: RecordSource + ?Sized,
    R: RecordReader,
{
    let mut header = reader
        .read_next()?
        .ok_or_else(|| SearchError::source_unavailable(source.describe(), "missing header row"))?;
    header.insert(0, ID_COLUMN.to_string());
    Ok(header)
}
