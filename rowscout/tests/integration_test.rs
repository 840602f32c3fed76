use anyhow::Result;
use rowscout::search::{scan, search, PageRequest};
use rowscout::{CsvSource, MemorySource, ScanConfig, SearchError};
use std::fs::File;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

fn create_csv(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(content.as_bytes())?;
    Ok(path)
}

/// Writes a header plus `rows` data rows; every third row mentions Paris
fn create_large_csv(dir: &TempDir, rows: usize) -> Result<PathBuf> {
    let path = dir.path().join("large.csv");
    let mut file = File::create(&path)?;
    writeln!(file, "Name,City,Note")?;
    for i in 0..rows {
        let city = if i % 3 == 0 { "Paris" } else { "Lyon" };
        writeln!(file, "person {},{},row {}", i, city, i)?;
    }
    Ok(path)
}

fn request(page: usize, page_size: usize) -> PageRequest {
    PageRequest::new(page, NonZeroUsize::new(page_size).unwrap())
}

const PEOPLE: &str = "Name,City\nAlice,Paris\nBob,Paris\nCarol,Lyon\n";

#[test]
fn test_query_selects_matching_rows() -> Result<()> {
    let dir = tempdir()?;
    let path = create_csv(&dir, "people.csv", PEOPLE)?;

    let result = scan(&CsvSource::new(&path), "paris", request(1, 10))?;
    assert_eq!(result.header, vec!["ID", "Name", "City"]);
    assert_eq!(result.total_matches, 2);
    assert_eq!(
        result.records,
        vec![vec!["1", "Alice", "Paris"], vec!["2", "Bob", "Paris"]]
    );
    Ok(())
}

#[test]
fn test_empty_query_first_page() -> Result<()> {
    let dir = tempdir()?;
    let path = create_csv(&dir, "people.csv", PEOPLE)?;

    let result = scan(&CsvSource::new(&path), "", request(1, 2))?;
    assert_eq!(result.total_matches, 3);
    assert_eq!(
        result.records,
        vec![vec!["1", "Alice", "Paris"], vec!["2", "Bob", "Paris"]]
    );
    Ok(())
}

#[test]
fn test_empty_query_second_page() -> Result<()> {
    let dir = tempdir()?;
    let path = create_csv(&dir, "people.csv", PEOPLE)?;

    let result = scan(&CsvSource::new(&path), "", request(2, 2))?;
    assert_eq!(result.total_matches, 3);
    assert_eq!(result.records, vec![vec!["3", "Carol", "Lyon"]]);
    Ok(())
}

#[test]
fn test_large_file_first_page_counts_past_the_page() -> Result<()> {
    let source = MemorySource::new(
        std::iter::once(vec!["Value".to_string()])
            .chain((0..2500).map(|i| vec![format!("match {}", i)]))
            .collect(),
    );

    let result = scan(&source, "match", request(1, 1000))?;
    assert_eq!(result.records.len(), 1000);
    assert_eq!(result.ids(), (1..=1000).collect::<Vec<u64>>());
    assert_eq!(result.total_matches, 2500);
    assert!(result.stats.early_exit);
    assert_eq!(result.stats.count_only_rows, 1500);
    Ok(())
}

#[test]
fn test_missing_file_is_source_unavailable() -> Result<()> {
    let dir = tempdir()?;
    let source = CsvSource::new(dir.path().join("nope.csv"));

    let err = scan(&source, "", request(1, 10)).unwrap_err();
    assert!(matches!(err, SearchError::SourceUnavailable { .. }));
    Ok(())
}

#[test]
fn test_empty_file_is_source_unavailable() -> Result<()> {
    let dir = tempdir()?;
    let path = create_csv(&dir, "empty.csv", "")?;

    let err = scan(&CsvSource::new(&path), "", request(1, 10)).unwrap_err();
    assert!(err.is_source_unavailable());
    assert!(err.to_string().contains("missing header row"));
    Ok(())
}

#[test]
fn test_total_is_independent_of_paging() -> Result<()> {
    let dir = tempdir()?;
    let path = create_large_csv(&dir, 1000)?;
    let source = CsvSource::new(&path);

    let expected = scan(&source, "paris", request(1, 1000))?.total_matches;
    assert_eq!(expected, 334);

    for (page, page_size) in [(1, 1), (2, 7), (5, 50), (48, 7), (1000, 3)] {
        let result = scan(&source, "PARIS", request(page, page_size))?;
        assert_eq!(
            result.total_matches, expected,
            "page {} size {}",
            page, page_size
        );
    }
    Ok(())
}

#[test]
fn test_page_length_and_id_continuity() -> Result<()> {
    let dir = tempdir()?;
    let path = create_large_csv(&dir, 100)?;
    let source = CsvSource::new(&path);

    // 34 matches in total
    for (page, page_size) in [(1, 10), (3, 10), (4, 10), (5, 10), (2, 34), (1, 100)] {
        let result = scan(&source, "paris", request(page, page_size))?;
        let total = result.total_matches as usize;
        let skipped = (page - 1) * page_size;
        let expected_len = page_size.min(total.saturating_sub(skipped));
        assert_eq!(result.records.len(), expected_len, "page {} size {}", page, page_size);

        let ids = result.ids();
        if let Some(first) = ids.first() {
            assert_eq!(*first as usize, skipped + 1);
        }
        assert!(ids.windows(2).all(|pair| pair[1] == pair[0] + 1));
    }
    Ok(())
}

#[test]
fn test_page_beyond_last_match_is_empty() -> Result<()> {
    let dir = tempdir()?;
    let path = create_csv(&dir, "people.csv", PEOPLE)?;

    let result = scan(&CsvSource::new(&path), "", request(50, 2))?;
    assert!(result.records.is_empty());
    assert_eq!(result.total_matches, 3);
    Ok(())
}

#[test]
fn test_repeated_scans_are_identical() -> Result<()> {
    let dir = tempdir()?;
    let path = create_large_csv(&dir, 300)?;
    let source = CsvSource::new(&path);

    let first = scan(&source, "row 1", request(2, 5))?;
    let second = scan(&source, "row 1", request(2, 5))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_blank_rows_are_invisible() -> Result<()> {
    let dir = tempdir()?;
    let path = create_csv(
        &dir,
        "gaps.csv",
        "Name,City\n   \nAlice,Paris\n\"\"\n\nBob,Lyon\n",
    )?;

    let result = scan(&CsvSource::new(&path), "", request(1, 10))?;
    assert_eq!(result.total_matches, 2);
    assert_eq!(result.records, vec![vec!["1", "Alice", "Paris"], vec!["2", "Bob", "Lyon"]]);
    assert_eq!(result.stats.empty_rows_skipped, 2);
    Ok(())
}

#[test]
fn test_search_uses_config() -> Result<()> {
    let dir = tempdir()?;
    let path = create_csv(&dir, "people.ssv", "Name;City\nAlice;Paris\nBob;Lyon\n")?;

    let config = ScanConfig {
        delimiter: ";".to_string(),
        page_size: NonZeroUsize::new(1).unwrap(),
        ..ScanConfig::for_file(&path)
    };

    let result = search(&config, "", 0)?;
    assert_eq!(result.records, vec![vec!["1", "Alice", "Paris"]]);
    assert_eq!(result.total_matches, 2);
    assert_eq!(result.total_pages(config.page_size), 2);
    Ok(())
}
