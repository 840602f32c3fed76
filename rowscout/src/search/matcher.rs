/// Strategy for matching a query against record fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Empty query, every record matches
    All,
    /// ASCII query, compared byte-wise without allocating
    Ascii(Vec<u8>),
    /// Non-ASCII query, compared after Unicode lowercasing
    Unicode(String),
}

/// Case-insensitive substring predicate over the fields of a record
#[derive(Debug, Clone)]
pub struct RecordMatcher {
    strategy: MatchStrategy,
}

impl RecordMatcher {
    /// Creates a matcher for the given query
    pub fn new(query: &str) -> Self {
        let strategy = if query.is_empty() {
            MatchStrategy::All
        } else if query.is_ascii() {
            MatchStrategy::Ascii(query.to_ascii_lowercase().into_bytes())
        } else {
            MatchStrategy::Unicode(query.to_lowercase())
        };
        Self { strategy }
    }

    pub fn strategy(&self) -> &MatchStrategy {
        &self.strategy
    }

    /// Returns true if any field contains the query, ignoring case.
    /// Stops at the first matching field.
    pub fn is_match<S: AsRef<str>>(&self, record: &[S]) -> bool {
        match &self.strategy {
            MatchStrategy::All => true,
            MatchStrategy::Ascii(needle) => record
                .iter()
                .any(|field| contains_ascii_ignore_case(field.as_ref().as_bytes(), needle)),
            MatchStrategy::Unicode(needle) => record
                .iter()
                .any(|field| field.as_ref().to_lowercase().contains(needle.as_str())),
        }
    }
}

/// A record is blank when it has no fields, or a single field that is empty after trimming
pub fn is_blank_record<S: AsRef<str>>(record: &[S]) -> bool {
    match record {
        [] => true,
        [only] => only.as_ref().trim().is_empty(),
        _ => false,
    }
}

/// `needle` must already be ASCII-lowercased. Non-ASCII bytes in `haystack` never
/// equal an ASCII needle byte, so UTF-8 boundaries need no special handling.
fn contains_ascii_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}
