use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::source::Record;

/// Which page of matches to return, and how many matches make a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: NonZeroUsize,
    pub page_size: NonZeroUsize,
}

impl PageRequest {
    /// Creates a request, clamping page 0 to page 1
    pub fn new(page: usize, page_size: NonZeroUsize) -> Self {
        Self {
            page: NonZeroUsize::new(page).unwrap_or(NonZeroUsize::MIN),
            page_size,
        }
    }

    /// Zero-based ordinal of the first match on this page
    pub fn window_start(&self) -> usize {
        (self.page.get() - 1).saturating_mul(self.page_size.get())
    }

    /// Zero-based ordinal one past the last match on this page
    pub fn window_end(&self) -> usize {
        self.window_start().saturating_add(self.page_size.get())
    }
}

/// Collects the matches that fall inside one page window.
///
/// Every match is offered in file order. The window hands out the 1-based match
/// ordinal and keeps the record only if that ordinal lands on the requested page.
#[derive(Debug)]
pub struct PageWindow {
    request: PageRequest,
    next_ordinal: usize,
    records: Vec<Record>,
}

impl PageWindow {
    pub fn new(request: PageRequest) -> Self {
        Self {
            request,
            next_ordinal: 0,
            // Capacity capped; page_size may be arbitrarily large
            records: Vec::with_capacity(request.page_size.get().min(1024)),
        }
    }

    /// Offers the next matching record. Returns true if it was retained.
    pub fn offer(&mut self, mut record: Record) -> bool {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;

        if ordinal >= self.request.window_start() && self.records.len() < self.request.page_size.get() {
            record.insert(0, (ordinal + 1).to_string());
            self.records.push(record);
            true
        } else {
            false
        }
    }

    /// True once the page holds `page_size` records; later matches only need counting
    pub fn is_filled(&self) -> bool {
        self.records.len() >= self.request.page_size.get()
            && self.next_ordinal >= self.request.window_end()
    }

    /// Number of matches offered so far
    pub fn offered(&self) -> usize {
        self.next_ordinal
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
