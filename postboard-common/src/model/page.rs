use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
/// Number of page links advertised per window in a list response.
pub const PAGE_WINDOW_LEN: u32 = 5;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    /// The 1-based page number, with zero falling back to the first page.
    #[must_use]
    pub fn page(self) -> u32 {
        if self.page == 0 {
            DEFAULT_PAGE
        } else {
            self.page
        }
    }

    #[must_use]
    pub fn size(self) -> u32 {
        match self.size {
            0 => DEFAULT_PAGE_SIZE,
            size => size.min(MAX_PAGE_SIZE),
        }
    }

    #[must_use]
    pub fn offset(self) -> i64 {
        (i64::from(self.page()) - 1) * i64::from(self.size())
    }

    #[must_use]
    pub fn limit(self) -> i64 {
        i64::from(self.size())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub start_page: u32,
    pub end_page: u32,
    pub prev: bool,
    pub next: bool,
    pub total_count: u64,
}

impl PageInfo {
    #[must_use]
    pub fn new(query: PageQuery, total_count: u64) -> Self {
        let current_page = query.page();
        let total_pages = total_count.div_ceil(u64::from(query.size()));

        let window_end = current_page.div_ceil(PAGE_WINDOW_LEN) * PAGE_WINDOW_LEN;
        let start_page = window_end - PAGE_WINDOW_LEN + 1;
        let end_page = u32::try_from(total_pages.min(u64::from(window_end))).unwrap_or(window_end);

        Self {
            current_page,
            start_page,
            end_page,
            prev: start_page > 1,
            next: u64::from(end_page) < total_pages,
            total_count,
        }
    }
}
