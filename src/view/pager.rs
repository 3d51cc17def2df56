//! Pagination control rules.

/// Maximum number of numbered page buttons shown at once.
pub const MAX_PAGE_BUTTONS: u32 = 5;

/// Current page and page count of the lead list.
///
/// `total_pages` is never below 1, so an empty result still shows "Page 1 of 1"
/// and both navigation controls stay disabled. `page` always lies in
/// `1..=total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    total_pages: u32,
}

impl Pager {
    pub fn new(page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            page: page.clamp(1, total_pages),
            total_pages,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page reached by "Previous", clamped to 1.
    pub fn prev(&self) -> u32 {
        self.page.saturating_sub(1).clamp(1, self.total_pages)
    }

    /// Page reached by "Next", clamped to the last page.
    pub fn next(&self) -> u32 {
        self.page.saturating_add(1).clamp(1, self.total_pages)
    }

    /// Numbered buttons to render.
    ///
    /// Shows pages `1..=5` until the current page passes 3 on a list longer
    /// than 5 pages; from then on the window is centred on the current page.
    /// Numbers past the last page are dropped.
    pub fn window(&self) -> Vec<u32> {
        let slots = MAX_PAGE_BUTTONS.min(self.total_pages);
        let first = if self.page > 3 && self.total_pages > MAX_PAGE_BUTTONS {
            self.page - 2
        } else {
            1
        };

        (first..=first.saturating_add(slots - 1))
            .filter(|p| *p <= self.total_pages)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_centres_on_current_page() {
        assert_eq!(Pager::new(5, 10).window(), vec![3, 4, 5, 6, 7]);
        assert_eq!(Pager::new(4, 6).window(), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_window_starts_at_one_for_early_pages() {
        assert_eq!(Pager::new(1, 10).window(), vec![1, 2, 3, 4, 5]);
        assert_eq!(Pager::new(3, 10).window(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_short_lists() {
        assert_eq!(Pager::new(1, 1).window(), vec![1]);
        assert_eq!(Pager::new(2, 3).window(), vec![1, 2, 3]);
        assert_eq!(Pager::new(5, 5).window(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_never_exceeds_total_pages() {
        for total in 1..=12 {
            for page in 1..=total {
                let window = Pager::new(page, total).window();
                assert!(window.len() <= 5);
                assert!(window.iter().all(|p| *p >= 1 && *p <= total));
                assert!(window.contains(&page), "page {page} of {total}");
            }
        }
    }

    #[test]
    fn test_window_suppresses_pages_past_the_end() {
        assert_eq!(Pager::new(10, 10).window(), vec![8, 9, 10]);
        assert_eq!(Pager::new(9, 10).window(), vec![7, 8, 9, 10]);
    }

    #[test]
    fn test_prev_next_clamp() {
        let first = Pager::new(1, 5);
        assert!(!first.has_prev());
        assert_eq!(first.prev(), 1);
        assert_eq!(first.next(), 2);

        let last = Pager::new(5, 5);
        assert!(!last.has_next());
        assert_eq!(last.next(), 5);
        assert_eq!(last.prev(), 4);
    }

    #[test]
    fn test_page_past_the_end_is_clamped() {
        let pager = Pager::new(20, 10);
        assert_eq!(pager.page(), 10);
        assert!(!pager.has_next());
        assert_eq!(pager.window(), vec![8, 9, 10]);

        let pager = Pager::new(u32::MAX, 10);
        assert_eq!(pager.page(), 10);
        assert_eq!(pager.window(), vec![8, 9, 10]);

        let pager = Pager::new(u32::MAX, u32::MAX);
        assert_eq!(pager.window(), vec![u32::MAX - 2, u32::MAX - 1, u32::MAX]);
    }

    #[test]
    fn test_empty_result_counts_as_one_page() {
        let pager = Pager::new(1, 0);
        assert_eq!(pager.total_pages(), 1);
        assert!(!pager.has_prev());
        assert!(!pager.has_next());
        assert_eq!(pager.next(), 1);
    }
}
