// Search, filter and paginate records for display

use crate::record::{Record, RecordKind};

/// Rows shown per page unless configured otherwise
pub const PAGE_SIZE: usize = 5;

/// Completion status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StatusFilter {
    #[default]
    #[value(alias = "all")]
    Any,
    Completed,
    #[value(name = "not_completed", alias = "not-completed")]
    NotCompleted,
}

impl StatusFilter {
    fn matches(self, completed: bool) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Completed => completed,
            StatusFilter::NotCompleted => !completed,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::Any => write!(f, "any"),
            StatusFilter::Completed => write!(f, "completed"),
            StatusFilter::NotCompleted => write!(f, "not_completed"),
        }
    }
}

/// Query and filters applied to a store before paging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewFilter {
    /// Case-insensitive substring of the name; empty matches everything
    pub query: String,
    pub status: StatusFilter,
    /// Exact category value; empty matches everything
    pub category: String,
}

impl ViewFilter {
    pub fn matches<K: RecordKind>(&self, record: &Record<K>) -> bool {
        let matches_query =
            self.query.is_empty() || record.name.to_lowercase().contains(&self.query.to_lowercase());
        let matches_category = self.category.is_empty() || record.category == self.category;

        matches_query && self.status.matches(record.completed) && matches_category
    }

    /// Matching records in store order
    pub fn apply<'a, K: RecordKind>(&self, records: &'a [Record<K>]) -> Vec<&'a Record<K>> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// One page of filtered records plus what the pager needs
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, K: RecordKind> {
    pub records: Vec<&'a Record<K>>,
    /// 1-based page that was requested
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Number of pages needed for `matches` rows; 0 when nothing matched.
/// A page size of 0 is treated as 1.
pub fn total_pages(matches: usize, page_size: usize) -> usize {
    matches.div_ceil(page_size.max(1))
}

/// Filter then slice out the 1-based `page`.
///
/// The page is not clamped: page 0 and pages past the end come back empty.
pub fn paginate<'a, K: RecordKind>(
    records: &'a [Record<K>],
    filter: &ViewFilter,
    page: usize,
    page_size: usize,
) -> Page<'a, K> {
    let page_size = page_size.max(1);
    let matched = filter.apply(records);
    let total_matches = matched.len();

    let records = match page.checked_sub(1) {
        Some(index) => matched
            .into_iter()
            .skip(index.saturating_mul(page_size))
            .take(page_size)
            .collect(),
        None => Vec::new(),
    };

    Page {
        records,
        page,
        total_pages: total_pages(total_matches, page_size),
        total_matches,
    }
}
