//! Account store held in memory, loaded from a JSON array of accounts.

use std::cmp::Ordering;
use std::path::Path;

use crate::{
    domain::{account::Account, paging::PageRequest, types::SortDirection},
    repository::{
        AccountListQuery, AccountReader,
        errors::{RepositoryError, RepositoryResult},
    },
};

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Vec<Account>,
}

impl InMemoryAccountRepository {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Reads a JSON array of accounts from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> RepositoryResult<Self> {
        let accounts: Vec<Account> = serde_json::from_str(raw)?;
        Ok(Self::new(accounts))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn matches_term(account: &Account, term: &str) -> bool {
    let term = term.to_lowercase();
    account.identifier.to_lowercase().contains(&term) || account.name.to_lowercase().contains(&term)
}

fn comparator(column: &str) -> RepositoryResult<fn(&Account, &Account) -> Ordering> {
    let compare: fn(&Account, &Account) -> Ordering = match column {
        "identifier" => |a, b| a.identifier.cmp(&b.identifier),
        "name" => |a, b| a.name.cmp(&b.name),
        "type" => |a, b| a.account_type.cmp(&b.account_type),
        "ledger" => |a, b| a.ledger.cmp(&b.ledger),
        "balance" => |a, b| a.balance.total_cmp(&b.balance),
        "state" => |a, b| a.state.cmp(&b.state),
        "createdOn" => |a, b| a.created_on.cmp(&b.created_on),
        other => {
            return Err(RepositoryError::ValidationError(format!(
                "Unknown sort column: {other}"
            )));
        }
    };
    Ok(compare)
}

impl AccountReader for InMemoryAccountRepository {
    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<(usize, Vec<Account>)> {
        let pagination = query
            .pagination
            .map(|page| PageRequest::new(page.page_index, page.size))
            .transpose()?;

        let mut items: Vec<&Account> = self
            .accounts
            .iter()
            .filter(|account| query.ledger.as_ref().is_none_or(|l| &account.ledger == l))
            .filter(|account| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|term| matches_term(account, term))
            })
            .collect();

        if let Some(sort) = &query.sort {
            let compare = comparator(sort.sort_column.as_str())?;
            items.sort_by(|a, b| match sort.sort_direction {
                SortDirection::Asc => compare(a, b),
                SortDirection::Desc => compare(b, a),
            });
        }

        let total = items.len();

        let page = match pagination {
            Some(page) => items
                .into_iter()
                .skip(page.offset())
                .take(page.size)
                .cloned()
                .collect(),
            None => items.into_iter().cloned().collect(),
        };

        Ok((total, page))
    }
}
