//! Fixed-size pagination with boundary clamping

use serde::Serialize;

/// Pagination metadata for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub number: usize,
    pub num_pages: usize,
    pub per_page: usize,
    /// Total items across all pages
    pub count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<usize>,
    pub previous_page_number: Option<usize>,
    /// 1-based index of the first item on the page, 0 when there are no items
    pub start_index: usize,
    /// 1-based index of the last item on the page, 0 when there are no items
    pub end_index: usize,
}

/// One page of items
#[derive(Debug, Clone)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub info: PageInfo,
}

/// Splits an ordered slice into pages of `per_page` items
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    per_page: usize,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], per_page: usize) -> Self {
        Self {
            items,
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Number of pages; an empty collection still has one (empty) page
    pub fn num_pages(&self) -> usize {
        self.items.len().div_ceil(self.per_page).max(1)
    }

    /// Clamp a page number to the nearest valid page
    pub fn clamp(&self, number: i64) -> usize {
        if number < 1 {
            1
        } else {
            usize::try_from(number)
                .unwrap_or(usize::MAX)
                .min(self.num_pages())
        }
    }

    /// The requested page, clamped to `[1, num_pages]`
    pub fn page(&self, number: i64) -> Page<'a, T> {
        let number = self.clamp(number);
        let num_pages = self.num_pages();
        let count = self.items.len();

        let start = ((number - 1) * self.per_page).min(count);
        let end = (start + self.per_page).min(count);
        let items = &self.items[start..end];

        let (start_index, end_index) = if items.is_empty() {
            (0, 0)
        } else {
            (start + 1, end)
        };

        Page {
            items,
            info: PageInfo {
                number,
                num_pages,
                per_page: self.per_page,
                count,
                has_next: number < num_pages,
                has_previous: number > 1,
                next_page_number: (number < num_pages).then_some(number + 1),
                previous_page_number: (number > 1).then(|| number - 1),
                start_index,
                end_index,
            },
        }
    }

    /// Page from a raw query value; missing or non-numeric input means page 1
    pub fn get_page(&self, raw: Option<&str>) -> Page<'a, T> {
        self.page(parse_page_number(raw))
    }
}

/// Parse a requested page number, treating anything unusable as page 1.
///
/// Integers too large for `i64` saturate, so an oversized number still
/// lands on the last page once clamped.
pub fn parse_page_number(raw: Option<&str>) -> i64 {
    let Some(raw) = raw.map(str::trim) else {
        return 1;
    };
    if let Ok(n) = raw.parse::<i64>() {
        return n;
    }
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 1;
    }
    if negative {
        i64::MIN
    } else {
        i64::MAX
    }
}
