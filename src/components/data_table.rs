//! Paginated, sortable table state.
//!
//! The table never filters or sorts rows itself. It tracks the page window and
//! sort order the user picked and turns each gesture into a
//! [`TableEvent::Fetch`] for the controller to dispatch.

use crate::components::column::Column;
use crate::domain::paging::{FetchRequest, PageRequest, SortRequest};
use crate::domain::search::SearchResult;
use crate::domain::types::{ColumnName, SortDirection};
use crate::dto::table::{PageChangeEvent, SortChangeEvent, SortingOrder, TableEvent};
use crate::pagination::Pager;

pub const PAGE_SIZES: [usize; 3] = [10, 15, 20];
pub const DEFAULT_SORT_COLUMN: &str = "identifier";
pub const DEFAULT_ACTION_COLUMN_LABEL: &str = "SHOW";

#[derive(Debug)]
pub struct DataTable<R> {
    page_sizes: Vec<usize>,
    current_page: PageRequest,
    current_sort: SortRequest,
    search_term: Option<String>,
    columns: Vec<Column>,
    pub sortable: bool,
    pub pageable: bool,
    pub action_column: bool,
    pub action_column_label: String,
    loading: bool,
    data: SearchResult<R>,
}

impl<R> Default for DataTable<R> {
    fn default() -> Self {
        Self {
            page_sizes: PAGE_SIZES.to_vec(),
            current_page: PageRequest {
                page_index: 0,
                size: PAGE_SIZES[0],
            },
            current_sort: SortRequest {
                sort_column: ColumnName::from_static(DEFAULT_SORT_COLUMN),
                sort_direction: SortDirection::Asc,
            },
            search_term: None,
            columns: Vec::new(),
            sortable: false,
            pageable: false,
            action_column: true,
            action_column_label: DEFAULT_ACTION_COLUMN_LABEL.to_string(),
            loading: false,
            data: SearchResult::empty(),
        }
    }
}

impl<R> DataTable<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `page_sizes` for the size selector; the first entry becomes the
    /// initial page size. An empty list keeps the defaults.
    pub fn with_page_sizes(mut self, page_sizes: Vec<usize>) -> Self {
        let page_sizes: Vec<usize> = page_sizes.into_iter().filter(|size| *size > 0).collect();
        if let Some(first) = page_sizes.first() {
            self.current_page = PageRequest {
                page_index: 0,
                size: *first,
            };
            self.page_sizes = page_sizes;
        }
        self
    }

    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    pub fn current_page(&self) -> PageRequest {
        self.current_page
    }

    pub fn current_sort(&self) -> &SortRequest {
        &self.current_sort
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Replaces the columns with freshly resolved descriptors.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    /// Changes the sort column only, keeping the direction.
    pub fn set_sort_by(&mut self, column: ColumnName) {
        self.current_sort.sort_column = column;
    }

    /// Term carried by subsequent fetches. Blank terms clear it.
    pub fn set_search_term(&mut self, term: Option<String>) {
        self.search_term = term
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn data(&self) -> &SearchResult<R> {
        &self.data
    }

    pub fn set_data(&mut self, data: SearchResult<R>) {
        self.data = data;
    }

    pub fn has_data(&self) -> bool {
        !self.data.elements.is_empty()
    }

    /// Moves to a one-based `page` and fetches it.
    pub fn on_page_change(&mut self, event: PageChangeEvent) -> TableEvent<R> {
        self.current_page = PageRequest {
            page_index: event.page.saturating_sub(1),
            size: event.page_size.max(1),
        };
        self.fetch()
    }

    /// Re-sorts by the clicked column and fetches.
    pub fn on_sort_change(&mut self, event: SortChangeEvent) -> TableEvent<R> {
        // Ascending in the header maps to DESC on the wire; kept as observed.
        let sort_direction = match event.order {
            SortingOrder::Ascending => SortDirection::Desc,
            SortingOrder::Descending => SortDirection::Asc,
        };

        if let Ok(sort_column) = ColumnName::new(event.name) {
            self.current_sort = SortRequest {
                sort_column,
                sort_direction,
            };
        } else {
            log::warn!("Ignoring sort change without a column name");
            self.current_sort.sort_direction = sort_direction;
        }

        self.fetch()
    }

    /// Re-emits the clicked row unchanged.
    pub fn on_action_cell_click(&self, row: R) -> TableEvent<R> {
        TableEvent::ActionCellClick(row)
    }

    /// Request for the current search term, page and sort.
    pub fn fetch_request(&self) -> FetchRequest {
        let request = FetchRequest::new(self.current_page, self.current_sort.clone());
        match &self.search_term {
            Some(term) => request.search(term.clone()),
            None => request,
        }
    }

    fn fetch(&self) -> TableEvent<R> {
        TableEvent::Fetch(self.fetch_request())
    }

    pub fn pager(&self) -> Pager {
        Pager::new(self.current_page.page_index, self.data.total_pages)
    }
}
