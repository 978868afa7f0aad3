use serde::{Deserialize, Serialize};

use crate::domain::types::{ColumnName, LedgerId, SortDirection, TypeConstraintError};

/// Window of rows requested from the backend. `page_index` is zero-based.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase", try_from = "RawPageRequest")]
pub struct PageRequest {
    pub page_index: usize,
    pub size: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageRequest {
    page_index: usize,
    size: usize,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = TypeConstraintError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.page_index, raw.size)
    }
}

impl PageRequest {
    /// Builds a page window, rejecting empty pages.
    pub fn new(page_index: usize, size: usize) -> Result<Self, TypeConstraintError> {
        if size == 0 {
            return Err(TypeConstraintError::ZeroPageSize);
        }
        Ok(Self { page_index, size })
    }

    /// Number of rows preceding this page.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.size)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SortRequest {
    pub sort_column: ColumnName,
    pub sort_direction: SortDirection,
}

impl SortRequest {
    pub fn new(sort_column: ColumnName, sort_direction: SortDirection) -> Self {
        Self {
            sort_column,
            sort_direction,
        }
    }
}

/// Page, sort and optional term of a single search, built fresh for every
/// paging or sorting gesture.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    pub page: PageRequest,
    pub sort: SortRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
}

impl FetchRequest {
    pub fn new(page: PageRequest, sort: SortRequest) -> Self {
        Self {
            page,
            sort,
            search_term: None,
        }
    }

    /// Attaches a free-text term. Blank terms are dropped.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search_term = Some(term).filter(|t| !t.is_empty());
        self
    }
}

/// Payload of a search scoped to the accounts of one ledger.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSearch {
    pub ledger_id: LedgerId,
    pub fetch_request: FetchRequest,
}
