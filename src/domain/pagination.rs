// src/domain/pagination.rs

/// Which slice of a result set a page covers. Built from the raw `page`
/// request parameter and the total match count, never failing: missing
/// or garbage input means page 1, and out-of-range numbers are clamped
/// into `1..=num_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub per_page: u64,
}

impl PageWindow {
    pub fn resolve(requested: Option<&str>, total: u64, per_page: u64) -> Self {
        let per_page = per_page.max(1);
        // An empty result set still has one (empty) page.
        let num_pages = total.div_ceil(per_page).max(1);

        let number = requested
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .clamp(1, i64::try_from(num_pages).unwrap_or(i64::MAX));

        PageWindow {
            number: number.unsigned_abs(),
            num_pages,
            per_page,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.per_page
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow, total: u64) -> Self {
        Page {
            items,
            number: window.number,
            num_pages: window.num_pages,
            total,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }
}
