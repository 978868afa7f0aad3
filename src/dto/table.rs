//! Events flowing in and out of the data table component.

use crate::domain::paging::FetchRequest;

/// Pager gesture. `page` is one-based as shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageChangeEvent {
    pub page: usize,
    pub page_size: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortingOrder {
    Ascending,
    Descending,
}

/// Column header gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortChangeEvent {
    pub name: String,
    pub order: SortingOrder,
}

/// Outbound events of the table.
#[derive(Clone, Debug, PartialEq)]
pub enum TableEvent<R> {
    Fetch(FetchRequest),
    ActionCellClick(R),
}
