//! Bounded, centered window of page numbers for pager links

use serde::Serialize;

/// Page numbers to show in the pager
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// Consecutive page numbers, ascending
    pub pages: Vec<usize>,
    pub current: usize,
    pub total_pages: usize,
}

impl PageWindow {
    /// Compute the window of at most `max_visible` pages around `current`.
    ///
    /// The window always holds `min(max_visible, total_pages)` entries and
    /// slides against the last page instead of shrinking near the end.
    pub fn compute(total_pages: usize, current: usize, max_visible: usize) -> Self {
        let max_visible = max_visible.max(1);

        let (start, end) = if total_pages <= max_visible {
            (1, total_pages)
        } else {
            let mut start = current.saturating_sub(max_visible / 2).max(1);
            let mut end = start + max_visible - 1;
            if end > total_pages {
                end = total_pages;
                start = end - max_visible + 1;
            }
            (start, end)
        };

        Self {
            pages: (start..=end).collect(),
            current,
            total_pages,
        }
    }

    pub fn first(&self) -> Option<usize> {
        self.pages.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.pages.last().copied()
    }

    pub fn contains(&self, page: usize) -> bool {
        self.pages.contains(&page)
    }

    /// Whether pages exist before the window (for a leading ellipsis)
    pub fn has_hidden_before(&self) -> bool {
        self.first().is_some_and(|first| first > 1)
    }

    /// Whether pages exist after the window (for a trailing ellipsis)
    pub fn has_hidden_after(&self) -> bool {
        self.last().is_some_and(|last| last < self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_pages_when_few() {
        let window = PageWindow::compute(5, 3, 5);
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5]);
        let window = PageWindow::compute(2, 2, 5);
        assert_eq!(window.pages, vec![1, 2]);
    }

    #[test]
    fn test_centered() {
        assert_eq!(PageWindow::compute(10, 5, 5).pages, vec![3, 4, 5, 6, 7]);
        assert_eq!(PageWindow::compute(10, 3, 5).pages, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_clamped_at_start() {
        assert_eq!(PageWindow::compute(10, 1, 5).pages, vec![1, 2, 3, 4, 5]);
        assert_eq!(PageWindow::compute(10, 2, 5).pages, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_clamped_at_end() {
        assert_eq!(PageWindow::compute(10, 8, 5).pages, vec![6, 7, 8, 9, 10]);
        assert_eq!(PageWindow::compute(10, 10, 5).pages, vec![6, 7, 8, 9, 10]);
        assert_eq!(PageWindow::compute(6, 6, 5).pages, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_size_and_membership_invariant() {
        for total in 1..=15 {
            for current in 1..=total {
                let window = PageWindow::compute(total, current, 5);
                assert_eq!(window.pages.len(), total.min(5));
                assert!(window.contains(current), "total={} current={}", total, current);
                assert!(window.pages.windows(2).all(|w| w[1] == w[0] + 1));
            }
        }
    }

    #[test]
    fn test_even_window() {
        assert_eq!(PageWindow::compute(10, 5, 4).pages, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_hidden_markers() {
        let window = PageWindow::compute(10, 5, 5);
        assert!(window.has_hidden_before());
        assert!(window.has_hidden_after());
        let window = PageWindow::compute(3, 1, 5);
        assert!(!window.has_hidden_before());
        assert!(!window.has_hidden_after());
    }
}
