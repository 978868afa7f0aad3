use crate::{
    domain::{
        account::Account,
        paging::{FetchRequest, PageRequest, SortRequest},
        types::LedgerId,
    },
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod memory;

#[derive(Debug, Clone)]
pub struct AccountListQuery {
    pub ledger: Option<LedgerId>,
    pub search: Option<String>,
    pub sort: Option<SortRequest>,
    pub pagination: Option<PageRequest>,
}

impl AccountListQuery {
    pub fn new() -> Self {
        Self {
            ledger: None,
            search: None,
            sort: None,
            pagination: None,
        }
    }

    pub fn ledger(mut self, ledger: LedgerId) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, sort: SortRequest) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.pagination = Some(page);
        self
    }
}

impl Default for AccountListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl From<FetchRequest> for AccountListQuery {
    fn from(request: FetchRequest) -> Self {
        let mut query = Self::new().sort(request.sort).paginate(request.page);
        if let Some(term) = request.search_term {
            query = query.search(term);
        }
        query
    }
}

pub trait AccountReader {
    /// Returns the total number of matching accounts and the requested page.
    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<(usize, Vec<Account>)>;
}
