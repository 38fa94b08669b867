//! Pagination state and the fixed page-size ladder.

/// Rows-per-page. Only these four values exist; anything else coming from a
/// persisted location path is treated as malformed and defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    Ten,
    #[default]
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn rows(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }

    pub fn from_rows(rows: usize) -> Option<PageSize> {
        Self::ALL.into_iter().find(|s| s.rows() == rows)
    }

    /// Next size on the ladder, wrapping 100 → 10.
    pub fn cycle(self) -> PageSize {
        match self {
            PageSize::Ten => PageSize::TwentyFive,
            PageSize::TwentyFive => PageSize::Fifty,
            PageSize::Fifty => PageSize::Hundred,
            PageSize::Hundred => PageSize::Ten,
        }
    }
}

/// Current page, page size, and the total record count from the most recent
/// fetch. Replaced on every level change; only the Artist level may seed it
/// from the persisted location path instead of the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page: usize, // 1-based
    size: PageSize,
    total: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            size: PageSize::default(),
            total: 0,
        }
    }
}

impl PaginationState {
    /// Seeded state for the Artist level at session start.
    pub fn seeded(page: usize, size: PageSize) -> Self {
        Self {
            page: page.max(1),
            size,
            total: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Offset of the first visible row. Saturates so an absurd page number
    /// from a hand-corrupted session file cannot overflow the offset.
    pub fn first_row(&self) -> usize {
        (self.page - 1).saturating_mul(self.size.rows())
    }

    /// `ceil(total / rows)` — zero while nothing has been fetched.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.size.rows())
    }

    /// Record the total from a committed fetch.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    /// Move forward one page. Returns false when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Move back one page. Returns false when already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn first_page(&mut self) -> bool {
        let moved = self.page != 1;
        self.page = 1;
        moved
    }

    pub fn last_page(&mut self) -> bool {
        let last = self.page_count().max(1);
        let moved = self.page != last;
        self.page = last;
        moved
    }

    /// Change the rows-per-page. The page index is intentionally left alone
    /// even when it now points past the last page — the observed behavior of
    /// the system, preserved rather than clamped here. An out-of-range page
    /// simply shows an empty listing until the user navigates.
    pub fn set_size(&mut self, size: PageSize) -> bool {
        let changed = self.size != size;
        self.size = size;
        changed
    }
}
