//! Page slicing with re-clamping.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Rows per table page.
pub const PAGE_SIZE: usize = 10;

/// Cursor of the grades table. `current_page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self { current_page: 1 }
    }
}

impl PaginationState {
    pub fn first() -> Self {
        Self::default()
    }

    /// The page that would actually be shown for `count` filtered records.
    pub fn clamped(self, count: usize) -> Self {
        Self {
            current_page: clamp_page(self.current_page, total_pages(count, PAGE_SIZE)),
        }
    }
}

/// One page of a filtered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Effective page number after clamping.
    pub page_number: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    count.div_ceil(size)
}

fn clamp_page(page_number: usize, total_pages: usize) -> usize {
    page_number.clamp(1, total_pages.max(1))
}

/// Slices `items` to the requested page, re-clamping out-of-range page numbers to the nearest
/// valid page. With no items the result is page 1 of 0 with both directions disabled.
pub fn page<T>(items: &[T], page_number: usize, page_size: usize) -> Page<'_, T> {
    let size = page_size.max(1);
    let total = total_pages(items.len(), size);
    let current = clamp_page(page_number, total);

    let start = ((current - 1) * size).min(items.len());
    let end = (start + size).min(items.len());

    Page {
        items: &items[start..end],
        page_number: current,
        total_pages: total,
        has_prev: current > 1,
        has_next: current < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_records_split_into_two_pages() {
        let items: Vec<u32> = (1..=12).collect();
        let p1 = page(&items, 1, PAGE_SIZE);
        assert_eq!(p1.items, &items[0..10]);
        assert_eq!(p1.total_pages, 2);
        assert!(!p1.has_prev);
        assert!(p1.has_next);

        let p2 = page(&items, 2, PAGE_SIZE);
        assert_eq!(p2.items, &[11, 12]);
        assert!(p2.has_prev);
        assert!(!p2.has_next);
    }

    #[test]
    fn empty_input_has_zero_pages_and_no_navigation() {
        let items: Vec<u32> = Vec::new();
        let p = page(&items, 3, PAGE_SIZE);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.page_number, 1);
        assert!(!p.has_prev);
        assert!(!p.has_next);
    }

    #[test]
    fn out_of_range_pages_reclamp() {
        let items: Vec<u32> = (1..=3).collect();
        let p = page(&items, 5, PAGE_SIZE);
        assert_eq!(p.page_number, 1);
        assert_eq!(p.items, &[1, 2, 3]);

        let items: Vec<u32> = (1..=25).collect();
        let p = page(&items, 9, PAGE_SIZE);
        assert_eq!(p.page_number, 3);
        assert_eq!(p.items, &[21, 22, 23, 24, 25]);

        let p = page(&items, 0, PAGE_SIZE);
        assert_eq!(p.page_number, 1);
    }

    #[test]
    fn pages_cover_sequence_without_gap_or_overlap() {
        for count in 0..40usize {
            for size in 1..12usize {
                let items: Vec<usize> = (0..count).collect();
                let total = total_pages(count, size);
                assert_eq!(total, (count + size - 1) / size);
                let mut joined = Vec::new();
                for n in 1..=total {
                    joined.extend_from_slice(page(&items, n, size).items);
                }
                assert_eq!(joined, items);
            }
        }
    }

    #[test]
    fn state_clamps_against_count() {
        let state = PaginationState { current_page: 4 };
        assert_eq!(state.clamped(12).current_page, 2);
        assert_eq!(state.clamped(0).current_page, 1);
        assert_eq!(state.clamped(100).current_page, 4);
    }
}
