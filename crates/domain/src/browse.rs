//! Browse session state: the active query plus the page being viewed.

use serde::Serialize;

use crate::entities::Record;
use crate::pager::{self, DEFAULT_PAGE_SIZE};
use crate::query::{filter_and_sort, QuerySpec};

/// Default cap on navigable pages.
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// One rendered page of a browse session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseView {
    pub items: Vec<Record>,
    pub page: usize,
    pub page_count: usize,
    /// Length of the whole filtered view, across all pages.
    pub total: usize,
}

/// Tracks a [`QuerySpec`] and page number, resetting to the first page
/// whenever the query changes so a stale page never outlives its view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    spec: QuerySpec,
    page: usize,
    page_size: usize,
    max_visible_pages: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new(QuerySpec::browse_defaults())
    }
}

impl BrowseState {
    pub fn new(spec: QuerySpec) -> Self {
        Self {
            spec,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_visible_pages(mut self, max_visible_pages: usize) -> Self {
        self.max_visible_pages = max_visible_pages;
        self
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// The requested page number, before clamping.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replaces the query. A different query sends the session back to page 1.
    pub fn set_spec(&mut self, spec: QuerySpec) {
        if spec != self.spec {
            self.spec = spec;
            self.page = 1;
        }
    }

    /// Edits the query in place, with the same page reset as [`set_spec`].
    ///
    /// [`set_spec`]: BrowseState::set_spec
    pub fn update_spec(&mut self, edit: impl FnOnce(&mut QuerySpec)) {
        let mut spec = self.spec.clone();
        edit(&mut spec);
        self.set_spec(spec);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Navigable pages for a view of `view_len` records.
    pub fn visible_page_count(&self, view_len: usize) -> usize {
        let count = pager::page_count(view_len, self.page_size);
        if self.max_visible_pages == 0 {
            count
        } else {
            count.min(self.max_visible_pages)
        }
    }

    /// The requested page clamped into `1..=visible_page_count`.
    pub fn clamped_page(&self, view_len: usize) -> usize {
        self.page.clamp(1, self.visible_page_count(view_len))
    }

    /// Derives the current page from a store snapshot.
    pub fn view(&self, snapshot: &[Record]) -> BrowseView {
        let filtered = filter_and_sort(snapshot, &self.spec);
        let total = filtered.len();
        let page = self.clamped_page(total);
        BrowseView {
            items: pager::page(&filtered, page, self.page_size).to_vec(),
            page,
            page_count: self.visible_page_count(total),
            total,
        }
    }
}
