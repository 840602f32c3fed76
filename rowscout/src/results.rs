use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::source::Record;

/// Label of the synthetic match-ordinal column prepended to every output record
pub const ID_COLUMN: &str = "ID";

/// One page of matching records plus the exact number of matches in the whole source.
///
/// `header` and every entry of `records` start with the synthetic ID column. The
/// IDs count matches across the whole source in file order, so the first record of
/// page 3 with a page size of 10 has ID 21.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub header: Record,
    pub records: Vec<Record>,
    pub total_matches: u64,
    #[serde(default)]
    pub stats: ScanStats,
}

/// What the scan did with the rows it read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Data rows pulled from the source, header excluded
    pub rows_read: u64,
    /// Rows skipped as structurally empty
    pub empty_rows_skipped: u64,
    /// Rows evaluated after the page filled up, for counting only
    pub count_only_rows: u64,
    /// Whether the scan switched to count-only mode
    pub early_exit: bool,
}

impl ScanResult {
    /// Number of pages needed to show every match, never less than one
    pub fn total_pages(&self, page_size: NonZeroUsize) -> u64 {
        total_pages(self.total_matches, page_size)
    }

    /// ID of each returned record, parsed back from its first field
    pub fn ids(&self) -> Vec<u64> {
        self.records
            .iter()
            .filter_map(|record| record.first()?.parse().ok())
            .collect()
    }

    /// True when the requested page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// `ceil(total_matches / page_size)` with a floor of one page
pub fn total_pages(total_matches: u64, page_size: NonZeroUsize) -> u64 {
    total_matches.div_ceil(page_size.get() as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(total_matches: u64, records: Vec<Record>) -> ScanResult {
        ScanResult {
            header: vec![ID_COLUMN.to_string(), "Name".to_string()],
            records,
            total_matches,
            stats: ScanStats::default(),
        }
    }

    #[test]
    fn test_total_pages() {
        let ten = NonZeroUsize::new(10).unwrap();
        assert_eq!(total_pages(0, ten), 1);
        assert_eq!(total_pages(1, ten), 1);
        assert_eq!(total_pages(10, ten), 1);
        assert_eq!(total_pages(11, ten), 2);
        assert_eq!(total_pages(2500, NonZeroUsize::new(1000).unwrap()), 3);
    }

    #[test]
    fn test_ids_and_pages() {
        let r = result(
            2,
            vec![
                vec!["4".to_string(), "Dan".to_string()],
                vec!["5".to_string(), "Eve".to_string()],
            ],
        );
        assert_eq!(r.ids(), vec![4, 5]);
        assert!(!r.is_empty());
        assert_eq!(r.total_pages(NonZeroUsize::new(1).unwrap()), 2);
    }

    #[test]
    fn test_serializes_to_json() {
        let r = result(0, vec![]);
        assert!(r.is_empty());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["header"][0], "ID");
        assert_eq!(json["total_matches"], 0);
        assert!(json["records"].as_array().unwrap().is_empty());
    }
}
