use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
        }
    }
}

/// Query for a paginated listing. Pages are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub search: Option<String>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            search: None,
        }
    }

    /// Blank terms are dropped so they never reach the query string.
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string);
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// Position within a paginated table and the state of its controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageCursor {
    current: u32,
    total_pages: u32,
}

impl PageCursor {
    pub fn new(current: u32, total_pages: u32) -> Self {
        let mut cursor = Self {
            current,
            total_pages,
        };
        cursor.current = cursor.clamp(current);
        cursor
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Records the page count reported by the latest fetch.
    pub fn update_total(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
        self.current = self.clamp(self.current);
    }

    pub fn has_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.total_pages == 0 || self.current == self.total_pages - 1
    }

    pub fn previous(&mut self) -> u32 {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    pub fn next(&mut self) -> u32 {
        self.current = self.clamp(self.current.saturating_add(1));
        self.current
    }

    pub fn select(&mut self, page: u32) -> u32 {
        self.current = self.clamp(page);
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// One-based labels for the page buttons.
    pub fn labels(&self) -> Vec<u32> {
        (1..=self.total_pages).collect()
    }

    fn clamp(&self, page: u32) -> u32 {
        page.min(self.total_pages.saturating_sub(1))
    }
}
