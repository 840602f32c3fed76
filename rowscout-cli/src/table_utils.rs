use rowscout::Record;

/// Widest a table cell is allowed to get before it is truncated
pub const MAX_CELL_WIDTH: usize = 32;

/// One entry in the pagination line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(u64),
    Current(u64),
    Gap,
}

/// Pages to link to: the first and last page, `radius` pages either side of
/// `current`, and gaps where pages are left out.
pub fn page_links(current: u64, total_pages: u64, radius: u64) -> Vec<PageLink> {
    let total_pages = total_pages.max(1);
    let start = current.saturating_sub(radius).clamp(1, total_pages);
    let end = current.saturating_add(radius).clamp(start, total_pages);

    let mut links = Vec::new();
    if start > 1 {
        links.push(PageLink::Page(1));
        if start > 2 {
            links.push(PageLink::Gap);
        }
    }
    for page in start..=end {
        if page == current {
            links.push(PageLink::Current(page));
        } else {
            links.push(PageLink::Page(page));
        }
    }
    if end < total_pages {
        if end + 1 < total_pages {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Page(total_pages));
    }
    links
}

pub fn format_page_links(links: &[PageLink]) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page(page) => page.to_string(),
            PageLink::Current(page) => format!("[{}]", page),
            PageLink::Gap => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cuts `cell` to at most `width` characters, marking the cut with an ellipsis
pub fn truncate_cell(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.to_string();
    }
    let mut truncated: String = cell.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

/// Makes a field safe to print on a terminal. Tabs and line breaks become
/// spaces; every other control character is written as an escape sequence
/// so nothing from the file reaches the terminal as a raw control byte.
pub fn escape_cell(cell: &str) -> String {
    let mut escaped = String::with_capacity(cell.len());
    for c in cell.chars() {
        match c {
            '\t' | '\r' | '\n' => escaped.push(' '),
            c if c.is_control() => escaped.extend(c.escape_default()),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Lays out the header and records as aligned text rows, header first.
///
/// Rows may be ragged; missing cells are left blank. Cells are escaped with
/// [`escape_cell`] before they are measured.
pub fn format_table(header: &[String], records: &[Record]) -> Vec<String> {
    let rows: Vec<Vec<String>> = std::iter::once(header)
        .chain(records.iter().map(|record| record.as_slice()))
        .map(|row| {
            row.iter()
                .map(|cell| truncate_cell(&escape_cell(cell), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            (0..columns)
                .map(|i| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", cell, width = widths[i])
                })
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        })
        .collect()
}
