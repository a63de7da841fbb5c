//! Paging view over an ordered product list.

use std::num::NonZeroUsize;
use std::ops::{Range, RangeInclusive};

use serde::Serialize;

/// Default number of products per page.
pub const DEFAULT_PER_PAGE: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(n) => n,
    None => unreachable!(),
};

/// Paging metadata. `current_page` is 1-indexed and always within
/// `1..=total_pages`; an empty list still has one (empty) page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    current_page: usize,
    per_page: usize,
    total_items: usize,
    total_pages: usize,
}

impl PageView {
    /// Builds the view, clamping `requested_page` into `[1, total_pages]`.
    pub fn new(requested_page: usize, per_page: NonZeroUsize, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(per_page.get()).max(1);
        Self {
            current_page: requested_page.clamp(1, total_pages),
            per_page: per_page.get(),
            total_items,
            total_pages,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }

    /// Index range of the current page within the full list.
    pub fn item_range(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.per_page;
        let end = (start + self.per_page).min(self.total_items);
        start.min(end)..end
    }
}

/// Slices `items` to the requested page.
pub fn paginate<T>(items: &[T], requested_page: usize, per_page: NonZeroUsize) -> (&[T], PageView) {
    let view = PageView::new(requested_page, per_page, items.len());
    (&items[view.item_range()], view)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_page(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_twenty_five_items_eight_per_page() {
        let items: Vec<u32> = (1..=25).collect();

        let (page, view) = paginate(&items, 4, per_page(8));
        assert_eq!(view.total_pages(), 4);
        assert_eq!(page, &[25]);

        let (page, view) = paginate(&items, 0, per_page(8));
        assert_eq!(view.current_page(), 1);
        assert_eq!(page, &[1, 2, 3, 4, 5, 6, 7, 8]);

        let (page, view) = paginate(&items, 5, per_page(8));
        assert_eq!(view.current_page(), 4);
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let items: Vec<u32> = Vec::new();
        let (page, view) = paginate(&items, 3, DEFAULT_PER_PAGE);
        assert!(page.is_empty());
        assert_eq!(view.total_pages(), 1);
        assert_eq!(view.current_page(), 1);
        assert!(!view.has_previous());
        assert!(!view.has_next());
    }

    #[test]
    fn test_exact_multiple() {
        let view = PageView::new(2, per_page(8), 16);
        assert_eq!(view.total_pages(), 2);
        assert_eq!(view.item_range(), 8..16);
        assert!(view.has_previous());
        assert!(!view.has_next());
        assert_eq!(view.page_numbers().collect::<Vec<_>>(), vec![1, 2]);
    }
}
