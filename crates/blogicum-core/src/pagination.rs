//! Fixed-size pagination with clamping page resolution.
//!
//! Out-of-range page requests never error: below-range requests resolve
//! to the first page, past-the-end requests to the last. An empty
//! result set still has exactly one (empty) page, so a page number is
//! always valid.

/// Resolve a requested page number against the actual page count.
///
/// `requested` is the raw client value (`None` when absent or
/// unparseable). The result is 1-based and always within
/// `1..=max(total_pages, 1)`.
pub fn resolve_page(requested: Option<i64>, total_pages: u64) -> u64 {
    let last = total_pages.max(1);
    match requested {
        None => 1,
        Some(n) if n < 1 => 1,
        Some(n) => (n as u64).min(last),
    }
}

/// One page of an ordered result set, with enough counters for clients
/// to render pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served (after clamping).
    pub number: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Convert the items while keeping the page counters.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
