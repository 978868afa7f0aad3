//! Page links shown by the table pager.

use serde::Serialize;

/// How many links surround the edges and the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagerLayout {
    pub left_edge: usize,
    pub left_current: usize,
    pub right_current: usize,
    pub right_edge: usize,
}

impl Default for PagerLayout {
    fn default() -> Self {
        Self {
            left_edge: 2,
            left_current: 2,
            right_current: 4,
            right_edge: 2,
        }
    }
}

impl PagerLayout {
    /// Inclusive one-based page ranges kept visible: the left edge, the
    /// window around `page` and the right edge. Ranges may overlap or be
    /// empty (`start > end`).
    fn visible_ranges(&self, page: usize, total_pages: usize) -> [(usize, usize); 3] {
        let window_start = page.saturating_sub(self.left_current).max(1);
        let window_end = (page + self.right_current).min(total_pages);
        let right_start = (total_pages + 1).saturating_sub(self.right_edge).max(1);

        [
            (1, self.left_edge.min(total_pages)),
            (window_start, window_end),
            (right_start, total_pages),
        ]
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Pager {
    /// One-based page the table currently shows.
    pub page: usize,
    pub total_pages: usize,
    /// Page numbers to link to; `None` marks a gap.
    pub links: Vec<Option<usize>>,
}

impl Pager {
    /// Builds the pager for a zero-based page index.
    pub fn new(page_index: usize, total_pages: usize) -> Self {
        Self::with_layout(page_index, total_pages, PagerLayout::default())
    }

    pub fn with_layout(page_index: usize, total_pages: usize, layout: PagerLayout) -> Self {
        let page = page_index + 1;
        let mut links = Vec::new();
        let mut last_shown = 0;

        for (start, end) in layout.visible_ranges(page, total_pages) {
            let start = start.max(last_shown + 1);
            if start > end {
                continue;
            }
            if start > last_shown + 1 {
                links.push(None);
            }
            links.extend((start..=end).map(Some));
            last_shown = end;
        }

        Self {
            page,
            total_pages,
            links,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
