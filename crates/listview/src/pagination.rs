//! Page cursor arithmetic and the derived pagination metadata.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

/// Page sizes offered by the page-size selector.
pub const DEFAULT_PAGE_SIZES: [usize; 5] = [5, 8, 10, 20, 50];

pub const DEFAULT_PAGE_SIZE: usize = 8;

/// How many numbered page buttons are shown before the ellipsis.
pub const PAGE_BUTTONS: usize = 5;

/// Number of pages needed for `total` rows. Zero rows means zero pages.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// The page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Pagination {
            page_index: 0,
            page_size,
        }
    }

    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.page_size)
    }

    /// Largest valid index for `total` rows.
    pub fn last_index(&self, total: usize) -> usize {
        self.page_count(total).saturating_sub(1)
    }

    /// Clamps `index` into `[0, page_count - 1]`.
    pub fn clamp_index(&self, index: usize, total: usize) -> usize {
        index.min(self.last_index(total))
    }

    /// Pulls the cursor back onto a page that has rows. Returns true if it moved.
    pub fn clamp(&mut self, total: usize) -> bool {
        let clamped = self.clamp_index(self.page_index, total);
        let moved = clamped != self.page_index;
        self.page_index = clamped;
        moved
    }

    /// Row positions of the current page within the filtered view.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = self.page_index.saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, total: usize) -> bool {
        self.page_index + 1 < self.page_count(total)
    }

    /// Changes the page size, keeping the first visible row on screen when
    /// it still exists. Otherwise the cursor goes back to the first page.
    pub fn resize(&mut self, page_size: usize, total: usize) {
        let first_row = self.page_index.saturating_mul(self.page_size);
        self.page_size = page_size;
        self.page_index = if first_row < total {
            first_row / page_size
        } else {
            0
        };
    }

    pub fn summary(&self, total: usize) -> PageSummary {
        PageSummary {
            page_index: self.page_index,
            page_size: self.page_size,
            total_filtered: total,
            page_count: self.page_count(total),
        }
    }
}

/// Pagination metadata derived from the cursor and the filtered count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub page_index: usize,
    pub page_size: usize,
    pub total_filtered: usize,
    pub page_count: usize,
}

impl PageSummary {
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    /// One-based row range for the "Showing X to Y of Z entries" footer.
    pub fn showing(&self) -> ShowingRange {
        if self.total_filtered == 0 {
            return ShowingRange::default();
        }
        let first = self.page_index * self.page_size + 1;
        let last = ((self.page_index + 1) * self.page_size).min(self.total_filtered);
        ShowingRange {
            first,
            last,
            total: self.total_filtered,
        }
    }

    /// Buttons for the pagination bar: the first few pages, then an
    /// ellipsis and the last page when there are more.
    pub fn page_buttons(&self) -> Vec<PageButton> {
        let mut buttons: Vec<PageButton> = (0..self.page_count.min(PAGE_BUTTONS))
            .map(PageButton::Page)
            .collect();
        if self.page_count > PAGE_BUTTONS {
            buttons.push(PageButton::Ellipsis);
            buttons.push(PageButton::Page(self.page_count - 1));
        }
        buttons
    }
}

/// An entry in the pagination bar. Pages are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageButton {
    Page(usize),
    Ellipsis,
}

impl PageButton {
    pub fn is_current(&self, page_index: usize) -> bool {
        matches!(self, PageButton::Page(i) if *i == page_index)
    }
}

impl fmt::Display for PageButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageButton::Page(i) => write!(f, "{}", i + 1),
            PageButton::Ellipsis => f.write_str("..."),
        }
    }
}

/// One-based, inclusive row range. All zeros when the view is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShowingRange {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl fmt::Display for ShowingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} entries",
            self.first, self.last, self.total
        )
    }
}
